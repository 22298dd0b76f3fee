//! Dense/lexical hybrid rescore over an already-ranked pool.
//!
//! The current ordering supplies the dense signal (`1 − rank/poolSize`); hits
//! of non-stopword question tokens supply the lexical signal, normalized by
//! the best hit count in the pool. `final = dense·(1−w) + lexical·w`.

use std::cmp::Ordering;

use sift_core::chunk::Chunk;
use sift_core::config::Lexicon;

use crate::text;

/// Rescore and re-sort the pool. Skipped entirely (input returned unchanged)
/// when no question token of at least two chars survives stopword removal.
pub fn rescore(
    chunks: Vec<Chunk>,
    question: &str,
    lexical_weight: f64,
    lexicon: &Lexicon,
) -> Vec<Chunk> {
    let tokens: Vec<String> = text::terms(question)
        .into_iter()
        .filter(|t| t.chars().count() >= 2 && !lexicon.is_stopword(t))
        .map(|t| t.to_lowercase())
        .collect();
    if tokens.is_empty() || chunks.is_empty() {
        return chunks;
    }

    let hits: Vec<usize> = chunks
        .iter()
        .map(|chunk| {
            let content = chunk.text.to_lowercase();
            tokens.iter().filter(|t| content.contains(t.as_str())).count()
        })
        .collect();
    let max_hits = hits.iter().copied().max().unwrap_or(0).max(1) as f64;
    let pool_size = chunks.len() as f64;

    let mut scored: Vec<(Chunk, f64)> = chunks
        .into_iter()
        .zip(hits)
        .enumerate()
        .map(|(rank, (chunk, hit_count))| {
            let dense = 1.0 - rank as f64 / pool_size;
            let lexical = hit_count as f64 / max_hits;
            let score = dense * (1.0 - lexical_weight) + lexical * lexical_weight;
            (chunk, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.into_iter().map(|(chunk, _)| chunk).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_hits_can_overtake_dense_rank() {
        let chunks = vec![
            Chunk::new("完全无关的内容").with_id("dense-top"),
            Chunk::new("介绍星级标准与评定流程").with_id("lexical-hit"),
        ];
        let out = rescore(chunks, "星级标准 评定", 0.35, &Lexicon::default());
        // dense-top: 1.0·0.65 = 0.65; lexical-hit: 0.5·0.65 + 1.0·0.35 = 0.675.
        assert_eq!(out[0].id.as_deref(), Some("lexical-hit"));
    }

    #[test]
    fn skipped_when_no_tokens_survive() {
        let chunks = vec![
            Chunk::new("乙").with_id("first"),
            Chunk::new("星级标准").with_id("second"),
        ];
        // Single-char and stopword tokens only.
        let out = rescore(chunks.clone(), "的 是 在", 0.35, &Lexicon::default());
        assert_eq!(out, chunks);
    }

    #[test]
    fn deterministic() {
        let chunks = vec![
            Chunk::new("星级标准介绍").with_id("a"),
            Chunk::new("评定流程介绍").with_id("b"),
            Chunk::new("无关内容").with_id("c"),
        ];
        let first = rescore(chunks.clone(), "星级标准 评定流程", 0.35, &Lexicon::default());
        let second = rescore(chunks, "星级标准 评定流程", 0.35, &Lexicon::default());
        assert_eq!(first, second);
    }
}
