//! Composite relevance scorer over four factors.
//!
//! `composite = 0.5·relevance + w_pos·position + w_div·diversity + w_cov·coverage`
//! with the factor weights taken from [`RerankWeights`].

use std::cmp::Ordering;

use sift_core::chunk::Chunk;
use sift_core::config::RerankWeights;

/// Chunk plus its composite score; lives only within a single ranking pass.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f64,
}

/// Composite score for a chunk at its current 0-based rank.
pub fn composite(chunk: &Chunk, query: &str, rank: usize, weights: &RerankWeights) -> f64 {
    0.5 * relevance(chunk, query)
        + weights.position * position(rank)
        + weights.diversity * diversity(chunk)
        + weights.coverage * coverage(chunk)
}

/// Score every chunk at its current rank and stable-sort descending.
pub fn rerank(chunks: Vec<Chunk>, query: &str, weights: &RerankWeights) -> Vec<Chunk> {
    let mut scored: Vec<ScoredChunk> = chunks
        .into_iter()
        .enumerate()
        .map(|(rank, chunk)| ScoredChunk {
            score: composite(&chunk, query, rank, weights),
            chunk,
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.into_iter().map(|s| s.chunk).collect()
}

/// Full-query containment, token match ratio, and a length-sanity bonus,
/// capped at 1.0.
fn relevance(chunk: &Chunk, query: &str) -> f64 {
    let content = chunk.text.to_lowercase();
    let query = query.to_lowercase();

    let mut score = 0.0;
    if content.contains(&query) {
        score += 0.5;
    }

    let tokens: Vec<&str> = query.split_whitespace().collect();
    if !tokens.is_empty() {
        let matched = tokens.iter().filter(|t| content.contains(**t)).count();
        score += matched as f64 / tokens.len() as f64 * 0.3;
    }

    let length = content.chars().count();
    if length > 100 && length < 2000 {
        score += 0.2;
    }

    score.min(1.0)
}

/// Logarithmic decay over the originating rank: early hits are rewarded
/// without zeroing out later ones.
fn position(rank: usize) -> f64 {
    1.0 / (1.0 + ((rank + 1) as f64).ln())
}

/// Coarse passage-size proxy: short snippets score low, comprehensive
/// passages high.
fn diversity(chunk: &Chunk) -> f64 {
    let length = chunk.text.chars().count();
    if length < 200 {
        0.3
    } else if length > 1500 {
        0.8
    } else {
        0.6
    }
}

/// Information-density bonuses: sentence count, figures, list glyphs,
/// structural punctuation. Capped at 1.0.
fn coverage(chunk: &Chunk) -> f64 {
    let text = &chunk.text;
    let mut score: f64 = 0.0;

    if text.split(['。', '！', '？']).count() > 5 {
        score += 0.3;
    }
    if text.chars().any(|c| c.is_ascii_digit()) {
        score += 0.2;
    }
    if has_list_glyph(text) {
        score += 0.2;
    }
    if text.chars().any(|c| matches!(c, ':' | '：' | '→' | '-')) {
        score += 0.2;
    }

    score.min(1.0)
}

fn has_list_glyph(text: &str) -> bool {
    if text
        .chars()
        .any(|c| matches!(c, '•' | '·' | '×' | '√' | '☆' | '★'))
    {
        return true;
    }
    // Numbered enumerators: "1." through "9.".
    text.as_bytes()
        .windows(2)
        .any(|w| (b'1'..=b'9').contains(&w[0]) && w[1] == b'.')
}
