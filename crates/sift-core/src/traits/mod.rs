//! Trait seams to external collaborators.

use crate::chunk::Chunk;
use crate::errors::SiftResult;

/// Nearest-neighbor vector search backend.
///
/// Implementations return chunks ranked by similarity, descending, honoring
/// the result-count bound and the similarity-score floor. Errors (timeouts,
/// malformed requests) are isolated per query by the orchestrator.
pub trait IVectorSearch: Send + Sync {
    fn search(&self, query: &str, top_k: usize, threshold: f64) -> SiftResult<Vec<Chunk>>;
}
