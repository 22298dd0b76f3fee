//! Document chunk model and computed chunk identity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Metadata key carrying the originating filename.
pub const META_SOURCE: &str = "source";

/// Metadata key carrying the lowercase file extension.
pub const META_FILE_TYPE: &str = "fileType";

/// A chunk of ingested document text with attached metadata.
///
/// Chunks are produced by the external ingestion pipeline and are immutable
/// here: the retrieval engine only reorders, filters, and annotates scores in
/// call-local wrappers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Backend-assigned id. May be absent or blank; identity falls back to
    /// `source` plus a text hash via [`Chunk::key`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Chunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata.insert(META_SOURCE.to_string(), source.into());
        self
    }

    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.metadata
            .insert(META_FILE_TYPE.to_string(), file_type.into());
        self
    }

    /// Originating filename, `"unknown"` when the metadata is missing.
    pub fn source(&self) -> &str {
        self.metadata
            .get(META_SOURCE)
            .map(String::as_str)
            .unwrap_or("unknown")
    }

    /// File extension as recorded by ingestion. Falls back to the extension
    /// of the source filename when the `fileType` metadata is absent.
    /// Comparisons against it should be case-insensitive.
    pub fn file_type(&self) -> &str {
        match self.metadata.get(META_FILE_TYPE) {
            Some(ft) if !ft.is_empty() => ft,
            _ => file_extension(self.source()),
        }
    }

    /// Resolved identity used for deduplication and fusion.
    pub fn key(&self) -> ChunkKey {
        ChunkKey::resolve(self)
    }
}

/// Computed chunk identity: the backend id when present and non-blank,
/// otherwise the source filename plus a hash of the chunk text. Modeling
/// identity as one computed value avoids special-casing nullable ids in
/// scoring and dedup logic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkKey(String);

impl ChunkKey {
    fn resolve(chunk: &Chunk) -> Self {
        match &chunk.id {
            Some(id) if !id.trim().is_empty() => Self(id.clone()),
            _ => {
                let digest = blake3::hash(chunk.text.as_bytes());
                Self(format!("{}#{}", chunk.source(), digest.to_hex()))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extension of a filename, empty when there is none.
pub fn file_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains('/') => ext,
        _ => "",
    }
}
