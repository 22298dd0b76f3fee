//! Question classification driving adaptive search parameters.

use sift_core::config::{Lexicon, RetrievalConfig};
use sift_core::options::SearchConfig;

/// Coarse question class. Listing questions need breadth (more candidates,
/// lower floor); precision lookups need exactness (fewer, higher floor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    Listing,
    Precision,
    General,
}

/// Classify a question by keyword containment. Listing wins when both
/// keyword sets match.
pub fn classify(question: &str, lexicon: &Lexicon) -> QueryIntent {
    if lexicon
        .listing_keywords
        .iter()
        .any(|k| question.contains(k.as_str()))
    {
        QueryIntent::Listing
    } else if lexicon
        .precision_keywords
        .iter()
        .any(|k| question.contains(k.as_str()))
    {
        QueryIntent::Precision
    } else {
        QueryIntent::General
    }
}

/// Derive the per-call search parameters for a classified question.
/// topK is clamped to [5, 50], the similarity floor to [0.1, 0.5].
pub fn search_config(intent: QueryIntent, config: &RetrievalConfig) -> SearchConfig {
    let mut top_k = config.top_k as f64;
    let mut threshold = config.threshold;

    match intent {
        QueryIntent::Listing => {
            top_k *= 1.5;
            threshold -= 0.05;
        }
        QueryIntent::Precision => {
            top_k *= 0.7;
            threshold += 0.05;
        }
        QueryIntent::General => {}
    }

    SearchConfig {
        top_k: (top_k as usize).clamp(5, 50),
        threshold: threshold.clamp(0.1, 0.5),
    }
}
