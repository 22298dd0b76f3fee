//! Per-call retrieval parameters: metadata filters and search bounds.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::chunk::Chunk;

/// Post-retrieval metadata filters. Empty sets act as wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalOptions {
    /// Requested source filenames; a chunk passes when its `source` metadata
    /// contains any of them, case-insensitively.
    pub source_files: HashSet<String>,
    /// Requested file extensions; a chunk passes when its extension equals
    /// any of them, case-insensitively.
    pub file_types: HashSet<String>,
}

impl RetrievalOptions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.source_files.is_empty() && self.file_types.is_empty()
    }

    /// Whether a chunk survives both filters.
    pub fn admits(&self, chunk: &Chunk) -> bool {
        let source_ok = self.source_files.is_empty() || {
            let source = chunk.source().to_lowercase();
            self.source_files
                .iter()
                .any(|wanted| source.contains(&wanted.to_lowercase()))
        };

        let type_ok = self.file_types.is_empty() || {
            let extension = chunk.file_type();
            self.file_types
                .iter()
                .any(|wanted| wanted.eq_ignore_ascii_case(extension))
        };

        source_ok && type_ok
    }
}

/// Transient per-call search parameters. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Result-count bound passed to the search backend.
    pub top_k: usize,
    /// Similarity-score floor passed to the search backend.
    pub threshold: f64,
}
