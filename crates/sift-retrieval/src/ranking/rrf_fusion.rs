//! Reciprocal Rank Fusion across per-query result lists.
//!
//! Each chunk at 0-based rank `i` in a query's list contributes
//! `weight(query) / (60 + i + 1)` to its accumulated score. Chunks ranking
//! well across several reformulations beat chunks that top a single list.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use sift_core::chunk::{Chunk, ChunkKey};

/// RRF smoothing constant. Higher values reduce the influence of
/// high-ranking items from any single list.
pub const RRF_K: f64 = 60.0;

/// Fuse per-query ranked lists into a single ranking. `weights` maps a query
/// to its fusion weight (missing entries default to 1.0). Accumulation is in
/// first-seen order so equal scores sort deterministically.
pub fn fuse(query_results: &[(String, Vec<Chunk>)], weights: &HashMap<String, f64>) -> Vec<Chunk> {
    let mut order: Vec<ChunkKey> = Vec::new();
    let mut scores: HashMap<ChunkKey, (Chunk, f64)> = HashMap::new();

    for (query, chunks) in query_results {
        let weight = weights.get(query).copied().unwrap_or(1.0);
        for (rank, chunk) in chunks.iter().enumerate() {
            let contribution = weight / (RRF_K + rank as f64 + 1.0);
            match scores.entry(chunk.key()) {
                Entry::Occupied(mut occupied) => occupied.get_mut().1 += contribution,
                Entry::Vacant(vacant) => {
                    order.push(chunk.key());
                    vacant.insert((chunk.clone(), contribution));
                }
            }
        }
    }

    let mut fused: Vec<(Chunk, f64)> = order
        .into_iter()
        .filter_map(|key| scores.remove(&key))
        .collect();
    fused.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    fused.into_iter().map(|(chunk, _)| chunk).collect()
}
