//! Source-diversity-aware final selection.
//!
//! A greedy pass admits chunks in ranked order under a per-source cap;
//! everything else lands in an overflow list. A backfill pass then tops up
//! when the selection is short on documents or on distinct sources,
//! preferring sources not yet covered.

use std::collections::HashMap;

use sift_core::chunk::Chunk;
use sift_core::config::SelectionConfig;

/// Select the final chunk list from a ranked pool.
pub fn select_diverse(pool: Vec<Chunk>, config: &SelectionConfig) -> Vec<Chunk> {
    let mut selected: Vec<Chunk> = Vec::new();
    let mut overflow: Vec<Chunk> = Vec::new();
    let mut per_source: HashMap<String, usize> = HashMap::new();

    for chunk in pool {
        let source_count = per_source.get(chunk.source()).copied().unwrap_or(0);
        if selected.len() < config.max_documents && source_count < config.max_per_source {
            *per_source.entry(chunk.source().to_string()).or_insert(0) += 1;
            selected.push(chunk);
        } else {
            overflow.push(chunk);
        }
    }

    // Backfill may relax the per-source cap to reach the coverage target.
    while (selected.len() < config.max_documents
        || per_source.len() < config.min_source_coverage)
        && !overflow.is_empty()
    {
        let pick = overflow
            .iter()
            .position(|c| !per_source.contains_key(c.source()))
            .unwrap_or(0);
        let chunk = overflow.remove(pick);
        *per_source.entry(chunk.source().to_string()).or_insert(0) += 1;
        selected.push(chunk);
    }

    // Trim back to the size bound without giving up covered sources: drop the
    // latest chunk of an over-represented source, never a sole representative.
    while selected.len() > config.max_documents {
        let drop_at = selected
            .iter()
            .rposition(|c| per_source.get(c.source()).copied().unwrap_or(0) > 1)
            .unwrap_or(selected.len() - 1);
        let removed = selected.remove(drop_at);
        if let Some(count) = per_source.get_mut(removed.source()) {
            *count -= 1;
        }
    }

    selected
}
