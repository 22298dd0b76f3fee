//! Citation metadata for answer display.

use serde::Serialize;

use sift_core::chunk::Chunk;

/// Snippet cutoff in chars, after whitespace normalization.
const SNIPPET_CHARS: usize = 180;

/// Per-chunk source and snippet for citation display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    /// 1-based position in the final chunk list.
    pub index: usize,
    /// Display filename, upload prefix stripped.
    pub source: String,
    pub snippet: String,
}

/// Build citations for a final chunk list, in order.
pub fn build(chunks: &[Chunk]) -> Vec<Citation> {
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| Citation {
            index: i + 1,
            source: display_source_name(chunk.source()),
            snippet: snippet(&chunk.text),
        })
        .collect()
}

/// Strip path components and the disambiguating `<digits>_` upload prefix
/// from a stored source name.
pub fn display_source_name(source: &str) -> String {
    let name = source.rsplit(['/', '\\']).next().unwrap_or(source);
    match name.split_once('_') {
        Some((prefix, rest)) if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) => {
            rest.to_string()
        }
        _ => name.to_string(),
    }
}

/// First [`SNIPPET_CHARS`] whitespace-normalized chars, ellipsis when truncated.
pub fn snippet(text: &str) -> String {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = normalized.chars();
    let head: String = chars.by_ref().take(SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
