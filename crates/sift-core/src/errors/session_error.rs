/// Session store errors.
///
/// Persistence failures never propagate to the request path; the store logs
/// them and keeps the in-memory table authoritative.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("snapshot io failed at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
