//! Tunable retrieval configuration with documented defaults.

mod lexicon;

pub use lexicon::{Lexicon, SynonymRule};

use serde::{Deserialize, Serialize};

pub mod defaults {
    /// Base result-count bound per backend search.
    pub const TOP_K: usize = 20;
    /// Base similarity floor per backend search.
    pub const THRESHOLD: f64 = 0.25;
    /// Total queries issued per call, original included.
    pub const MAX_QUERIES: usize = 5;
    /// Blend factor of the dense/lexical hybrid rescore.
    pub const LEXICAL_WEIGHT: f64 = 0.35;
    /// Composite-score weight of the position factor.
    pub const POSITION_WEIGHT: f64 = 0.2;
    /// Composite-score weight of the diversity factor.
    pub const DIVERSITY_WEIGHT: f64 = 0.15;
    /// Composite-score weight of the coverage factor.
    pub const COVERAGE_WEIGHT: f64 = 0.15;
    /// Upper bound on chunks in the final selection.
    pub const MAX_DOCUMENTS: usize = 15;
    /// Per-source admission cap during selection.
    pub const MAX_PER_SOURCE: usize = 4;
    /// Distinct sources the selection tries to cover.
    pub const MIN_SOURCE_COVERAGE: usize = 2;
}

/// Retrieval engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Base result-count bound; adapted per question class, then clamped to [5, 50].
    pub top_k: usize,
    /// Base similarity floor; adapted per question class, then clamped to [0.1, 0.5].
    pub threshold: f64,
    /// Generate alternate query phrasings before searching.
    pub query_expansion: bool,
    /// Apply fusion, composite rerank, and the hybrid rescore.
    pub rerank: bool,
    /// Cap on total queries per call (original included).
    pub max_queries: usize,
    /// Lexical share of the dense/lexical hybrid rescore, in [0, 1].
    pub lexical_weight: f64,
    pub weights: RerankWeights,
    pub selection: SelectionConfig,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::TOP_K,
            threshold: defaults::THRESHOLD,
            query_expansion: true,
            rerank: true,
            max_queries: defaults::MAX_QUERIES,
            lexical_weight: defaults::LEXICAL_WEIGHT,
            weights: RerankWeights::default(),
            selection: SelectionConfig::default(),
        }
    }
}

/// Weights for the composite rerank factors. Relevance is fixed at 0.5;
/// the remaining factors are tunable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankWeights {
    /// Rewards chunks that ranked early in their originating result list.
    pub position: f64,
    /// Rewards comprehensive passages over short snippets.
    pub diversity: f64,
    /// Rewards information-dense text (sentences, figures, list structure).
    pub coverage: f64,
}

impl Default for RerankWeights {
    fn default() -> Self {
        Self {
            position: defaults::POSITION_WEIGHT,
            diversity: defaults::DIVERSITY_WEIGHT,
            coverage: defaults::COVERAGE_WEIGHT,
        }
    }
}

/// Source-diversified selection bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Upper bound on chunks in the final list.
    pub max_documents: usize,
    /// Chunks admitted per source before deferring to overflow.
    pub max_per_source: usize,
    /// Distinct sources the backfill pass tries to cover.
    pub min_source_coverage: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_documents: defaults::MAX_DOCUMENTS,
            max_per_source: defaults::MAX_PER_SOURCE,
            min_source_coverage: defaults::MIN_SOURCE_COVERAGE,
        }
    }
}
