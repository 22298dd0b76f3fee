/// Retrieval subsystem errors.
///
/// A failed backend search is isolated by the orchestrator: the failing
/// query contributes an empty result list and the call continues.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("search backend failed: {reason}")]
    SearchFailed { reason: String },
}
