//! Prompt assembly: evidence context, answer instructions, verification.
//!
//! Pure string building. The language-model call itself happens outside this
//! crate; consumers feed these prompts to their completion client.

use std::fmt::Write as _;

use sift_core::chunk::Chunk;
use sift_core::session::Turn;

use crate::citation;

const VERDICT_FAIL_MARKER: &str = "verdict: fail";
const REVISED_ANSWER_MARKER: &str = "revised_answer:";

/// Build the answering prompt: enumerated evidence block, the question, and
/// the fixed instruction text.
pub fn build_prompt(question: &str, chunks: &[Chunk]) -> String {
    let mut prompt = String::from("你是一个精确的文档问答助手。\n\n");
    push_evidence_block(&mut prompt, chunks);

    prompt.push_str("### 用户问题：\n");
    prompt.push_str(question);
    prompt.push_str("\n\n### 回答要求：\n");
    prompt.push_str("1. 【重要】仔细阅读所有文档片段，不要遗漏任何信息\n");
    prompt.push_str(
        "2. 【重要】如果问题是\"有哪些\"\"分为几个\"等列举类问题，必须完整列出文档中提到的每一个类别，即使某些描述很简短\n",
    );
    prompt.push_str("3. 严格基于上述文档内容回答，不得添加文档外的信息\n");
    prompt.push_str("4. 引用依据时标注片段编号，例如[片段 2]\n");
    prompt.push_str("5. 答案格式：先总结有几个类别，再逐一说明每个类别的特点\n");
    prompt.push_str("6. 如果文档中确实没有相关信息，才说明\"文档中未提及\"\n\n");
    prompt.push_str("### 回答：\n");
    prompt
}

/// Build the verification prompt asking a downstream model to judge whether
/// a draft answer is fully supported by the same evidence.
pub fn build_verification_prompt(question: &str, draft: &str, chunks: &[Chunk]) -> String {
    let mut prompt = String::from("你是一个严格的答案审核助手。\n\n");
    push_evidence_block(&mut prompt, chunks);

    prompt.push_str("### 用户问题：\n");
    prompt.push_str(question);
    prompt.push_str("\n\n### 草稿答案：\n");
    prompt.push_str(draft);
    prompt.push_str("\n\n### 审核要求：\n");
    prompt.push_str("1. 逐条核对草稿中的事实能否在文档片段中找到依据\n");
    prompt.push_str("2. 第一行输出 verdict: pass 或 verdict: fail\n");
    prompt.push_str(
        "3. 若为 fail，另起一行以 revised_answer: 开头，给出仅基于文档片段的修正答案\n\n",
    );
    prompt.push_str("### 审核结果：\n");
    prompt
}

/// Merge a verifier's output with the draft: the draft stands unless the
/// output carries both the fail verdict and a revised answer.
pub fn merge_verification(draft: &str, verification: &str) -> String {
    if verification.trim().is_empty() {
        return draft.to_string();
    }
    if find_ascii_ci(verification, VERDICT_FAIL_MARKER).is_some() {
        if let Some(idx) = find_ascii_ci(verification, REVISED_ANSWER_MARKER) {
            return verification[idx + REVISED_ANSWER_MARKER.len()..]
                .trim()
                .to_string();
        }
    }
    draft.to_string()
}

/// Render prior turns as `role: content` lines for the caller to append to
/// the prompt; `无` when the history is empty.
pub fn history_block(turns: &[Turn]) -> String {
    if turns.is_empty() {
        return "无".to_string();
    }
    let mut block = String::new();
    for turn in turns {
        let _ = writeln!(block, "{}: {}", turn.role.as_str(), turn.content);
    }
    block
}

fn push_evidence_block(prompt: &mut String, chunks: &[Chunk]) {
    prompt.push_str("### 参考文档：\n");
    for (i, chunk) in chunks.iter().enumerate() {
        let source = citation::display_source_name(chunk.source());
        let _ = writeln!(prompt, "[文档片段 {} | 来源: {}]\n{}\n", i + 1, source, chunk.text);
    }
}

/// ASCII-case-insensitive substring search, byte-safe for slicing: a match
/// of an ASCII needle always starts and ends on char boundaries.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::session::Role;

    fn chunks() -> Vec<Chunk> {
        vec![
            Chunk::new("一星级：基本设施。").with_source("175_标准.pdf"),
            Chunk::new("五星级：豪华设施。").with_source("指南.docx"),
        ]
    }

    #[test]
    fn prompt_enumerates_chunks_with_sources() {
        let prompt = build_prompt("有哪些星级？", &chunks());
        assert!(prompt.contains("[文档片段 1 | 来源: 标准.pdf]"));
        assert!(prompt.contains("[文档片段 2 | 来源: 指南.docx]"));
        assert!(prompt.contains("有哪些星级？"));
        assert!(prompt.contains("严格基于上述文档内容回答"));
    }

    #[test]
    fn verification_prompt_carries_draft_and_markers() {
        let prompt = build_verification_prompt("问题", "草稿答案", &chunks());
        assert!(prompt.contains("草稿答案"));
        assert!(prompt.contains("verdict: pass 或 verdict: fail"));
        assert!(prompt.contains("revised_answer:"));
    }

    #[test]
    fn merge_keeps_draft_on_pass() {
        assert_eq!(merge_verification("草稿", "verdict: pass"), "草稿");
        assert_eq!(merge_verification("草稿", ""), "草稿");
        // Fail without a revision also keeps the draft.
        assert_eq!(merge_verification("草稿", "verdict: fail"), "草稿");
    }

    #[test]
    fn merge_takes_revision_on_fail() {
        let verification = "verdict: fail\nrevised_answer: 修正后的答案。\n";
        assert_eq!(merge_verification("草稿", verification), "修正后的答案。");
    }

    #[test]
    fn merge_markers_match_case_insensitively() {
        let verification = "Verdict: FAIL\nREVISED_ANSWER:   修正版";
        assert_eq!(merge_verification("草稿", verification), "修正版");
    }

    #[test]
    fn history_block_renders_roles() {
        assert_eq!(history_block(&[]), "无");
        let turns = vec![
            Turn::new(Role::User, "第一个问题"),
            Turn::new(Role::Assistant, "第一个回答"),
        ];
        let block = history_block(&turns);
        assert_eq!(block, "user: 第一个问题\nassistant: 第一个回答\n");
    }
}
