//! RetrievalEngine: orchestrates the full retrieval pipeline.
//!
//! classify → expand → parallel multi-query search → dedup → metadata filter
//! → listing supplement / low-yield retry → RRF fusion → composite rerank →
//! dense/lexical hybrid rescore → source-diversified selection → citations.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use sift_core::chunk::{Chunk, ChunkKey};
use sift_core::config::{Lexicon, RetrievalConfig};
use sift_core::options::{RetrievalOptions, SearchConfig};
use sift_core::traits::IVectorSearch;

use crate::citation::{self, Citation};
use crate::expansion;
use crate::intent::{self, QueryIntent};
use crate::ranking::{hybrid, rrf_fusion, scorer};
use crate::selection;

/// Pool size below which the listing supplement search kicks in.
const SUPPLEMENT_FLOOR: usize = 10;
/// Pool size below which the low-yield retry kicks in.
const RETRY_FLOOR: usize = 5;
/// Fixed bounds of the supplement and retry searches.
const SUPPLEMENT_TOP_K: usize = 10;
const RELAXED_THRESHOLD: f64 = 0.15;
/// Extra candidates requested by the low-yield retry.
const RETRY_TOP_K_BOOST: usize = 10;

/// The final ranked chunks plus their citation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalOutcome {
    pub chunks: Vec<Chunk>,
    pub citations: Vec<Citation>,
}

impl RetrievalOutcome {
    /// An empty result set is a valid terminal state, not an error.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// The retrieval orchestrator. Holds no state across calls; the session
/// store is read separately by the consumer during prompt assembly.
pub struct RetrievalEngine<'a> {
    backend: &'a dyn IVectorSearch,
    config: RetrievalConfig,
    lexicon: Lexicon,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(backend: &'a dyn IVectorSearch, config: RetrievalConfig) -> Self {
        Self {
            backend,
            config,
            lexicon: Lexicon::default(),
        }
    }

    /// Swap in a custom lexicon (e.g. loaded from TOML).
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Run the full pipeline for one question.
    pub fn retrieve(&self, question: &str, options: &RetrievalOptions) -> RetrievalOutcome {
        // Step 1: Classify and derive adaptive search parameters.
        let query_intent = intent::classify(question, &self.lexicon);
        let primary = intent::search_config(query_intent, &self.config);
        debug!(
            ?query_intent,
            top_k = primary.top_k,
            threshold = primary.threshold,
            "classified question"
        );

        // Step 2: Expand into a bounded query set.
        let queries: Vec<String> = if self.config.query_expansion {
            expansion::expand(question, &self.lexicon)
                .into_iter()
                .take(self.config.max_queries)
                .collect()
        } else {
            vec![question.to_string()]
        };

        // Step 3: Parallel per-query fan-out; failures contribute empty lists.
        let result_lists: Vec<Vec<Chunk>> = queries
            .par_iter()
            .map(|query| self.search_or_empty(query, &primary))
            .collect();
        let mut per_query: Vec<(String, Vec<Chunk>)> =
            queries.into_iter().zip(result_lists).collect();

        // Dedup across queries, preserving query order then rank order.
        let mut seen: HashSet<ChunkKey> = HashSet::new();
        let mut pool: Vec<Chunk> = Vec::new();
        for (_, chunks) in &per_query {
            for chunk in chunks {
                if seen.insert(chunk.key()) {
                    pool.push(chunk.clone());
                }
            }
        }
        info!(
            queries = per_query.len(),
            pool = pool.len(),
            "primary retrieval merged"
        );

        // Step 4: Metadata filter on the pool and on each per-query list
        // (the latter feed fusion).
        if !options.is_unfiltered() {
            pool.retain(|c| options.admits(c));
            for (_, chunks) in &mut per_query {
                chunks.retain(|c| options.admits(c));
            }
            debug!(pool = pool.len(), "metadata filter applied");
        }

        // Step 5: Listing supplement with a broadened query.
        if query_intent == QueryIntent::Listing && pool.len() < SUPPLEMENT_FLOOR {
            let broad = self.broaden(question);
            let config = SearchConfig {
                top_k: SUPPLEMENT_TOP_K,
                threshold: (primary.threshold - 0.1).max(RELAXED_THRESHOLD),
            };
            let extra = self.search_or_empty(&broad, &config);
            merge_filtered(&mut pool, &mut seen, extra, options);
            info!(pool = pool.len(), query = %broad, "listing supplement merged");
        }

        // Step 6: Low-yield retry with a relaxed floor.
        if pool.len() < RETRY_FLOOR {
            warn!(pool = pool.len(), "low yield, retrying with relaxed threshold");
            let config = SearchConfig {
                top_k: primary.top_k + RETRY_TOP_K_BOOST,
                threshold: RELAXED_THRESHOLD,
            };
            let extra = self.search_or_empty(question, &config);
            merge_filtered(&mut pool, &mut seen, extra, options);
            info!(pool = pool.len(), "retry merged");
        }

        // Step 7: Fuse, rerank, and hybrid-rescore.
        let ranked = if self.config.rerank && !pool.is_empty() {
            let ordered = self.fuse_pool(question, pool, &per_query);
            let ordered = scorer::rerank(ordered, question, &self.config.weights);
            hybrid::rescore(ordered, question, self.config.lexical_weight, &self.lexicon)
        } else {
            pool
        };

        // Step 8: Source-diversified selection.
        let chunks = selection::select_diverse(ranked, &self.config.selection);
        info!(selected = chunks.len(), "retrieval complete");

        let citations = citation::build(&chunks);
        RetrievalOutcome { chunks, citations }
    }

    /// RRF-fuse the per-query lists when more than one contributed, then
    /// append pool chunks (supplement/retry extras) the lists do not cover.
    fn fuse_pool(
        &self,
        question: &str,
        pool: Vec<Chunk>,
        per_query: &[(String, Vec<Chunk>)],
    ) -> Vec<Chunk> {
        let contributing: Vec<(String, Vec<Chunk>)> = per_query
            .iter()
            .filter(|(_, chunks)| !chunks.is_empty())
            .cloned()
            .collect();
        if contributing.len() < 2 {
            return pool;
        }

        let weights: HashMap<String, f64> = contributing
            .iter()
            .map(|(query, _)| (query.clone(), expansion::importance(query, question)))
            .collect();
        let mut fused = rrf_fusion::fuse(&contributing, &weights);

        let fused_keys: HashSet<ChunkKey> = fused.iter().map(Chunk::key).collect();
        fused.extend(
            pool.into_iter()
                .filter(|chunk| !fused_keys.contains(&chunk.key())),
        );
        fused
    }

    fn search_or_empty(&self, query: &str, config: &SearchConfig) -> Vec<Chunk> {
        match self.backend.search(query, config.top_k, config.threshold) {
            Ok(chunks) => chunks,
            Err(err) => {
                warn!(%query, error = %err, "search failed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Strip listing markers and the question mark to broaden a listing
    /// question for the supplement search.
    fn broaden(&self, question: &str) -> String {
        let mut broad = question.to_string();
        for marker in &self.lexicon.supplement_markers {
            broad = broad.replace(marker.as_str(), "");
        }
        broad.replace('？', "").trim().to_string()
    }
}

/// Merge extra results into the pool, honoring the filter and the
/// seen-identity set.
fn merge_filtered(
    pool: &mut Vec<Chunk>,
    seen: &mut HashSet<ChunkKey>,
    extra: Vec<Chunk>,
    options: &RetrievalOptions,
) {
    for chunk in extra {
        if options.admits(&chunk) && seen.insert(chunk.key()) {
            pool.push(chunk);
        }
    }
}
