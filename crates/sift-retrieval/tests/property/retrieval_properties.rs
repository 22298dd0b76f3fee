//! Property tests for the ranking and selection invariants.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use sift_core::chunk::{Chunk, ChunkKey};
use sift_core::config::{Lexicon, RerankWeights, SelectionConfig};
use sift_retrieval::ranking::{hybrid, rrf_fusion, scorer};
use sift_retrieval::{expansion, selection};

fn arb_chunk() -> impl Strategy<Value = Chunk> {
    ("[a-e]", "[一-十]{0,30}", 0u32..1000).prop_map(|(source, text, n)| {
        Chunk::new(format!("{text}{n}"))
            .with_id(format!("id-{n}"))
            .with_source(format!("{source}.pdf"))
    })
}

fn arb_pool() -> impl Strategy<Value = Vec<Chunk>> {
    prop::collection::vec(arb_chunk(), 0..40)
}

proptest! {
    // ── Selection ─────────────────────────────────────────────────────────

    #[test]
    fn selection_respects_size_bound(pool in arb_pool()) {
        let config = SelectionConfig::default();
        let selected = selection::select_diverse(pool.clone(), &config);
        prop_assert!(selected.len() <= config.max_documents);
        prop_assert!(selected.len() <= pool.len());
    }

    #[test]
    fn selection_covers_multiple_sources_when_pool_does(pool in arb_pool()) {
        let config = SelectionConfig::default();
        let pool_sources: HashSet<String> =
            pool.iter().map(|c| c.source().to_string()).collect();
        let selected = selection::select_diverse(pool, &config);
        let selected_sources: HashSet<String> =
            selected.iter().map(|c| c.source().to_string()).collect();

        if pool_sources.len() >= config.min_source_coverage {
            prop_assert!(selected_sources.len() >= config.min_source_coverage);
        }
    }

    #[test]
    fn selection_emits_only_pool_members(pool in arb_pool()) {
        let keys: HashSet<ChunkKey> = pool.iter().map(Chunk::key).collect();
        let selected = selection::select_diverse(pool, &SelectionConfig::default());
        prop_assert!(selected.iter().all(|c| keys.contains(&c.key())));
    }

    // ── Fusion ────────────────────────────────────────────────────────────

    #[test]
    fn fusion_is_deterministic_and_duplicate_free(
        first in arb_pool(),
        second in arb_pool(),
    ) {
        let lists = vec![
            ("查询一".to_string(), first),
            ("查询二".to_string(), second),
        ];
        let weights = HashMap::new();

        let a = rrf_fusion::fuse(&lists, &weights);
        let b = rrf_fusion::fuse(&lists, &weights);
        prop_assert_eq!(&a, &b);

        let keys: HashSet<ChunkKey> = a.iter().map(Chunk::key).collect();
        prop_assert_eq!(keys.len(), a.len());
    }

    // ── Rerank and rescore are permutations ───────────────────────────────

    #[test]
    fn rerank_permutes_without_loss(pool in arb_pool()) {
        let reranked = scorer::rerank(pool.clone(), "星级标准", &RerankWeights::default());
        prop_assert_eq!(reranked.len(), pool.len());

        let mut before: Vec<ChunkKey> = pool.iter().map(Chunk::key).collect();
        let mut after: Vec<ChunkKey> = reranked.iter().map(Chunk::key).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn rescore_permutes_without_loss(pool in arb_pool()) {
        let rescored = hybrid::rescore(pool.clone(), "星级标准 评定", 0.35, &Lexicon::default());
        prop_assert_eq!(rescored.len(), pool.len());

        let mut before: Vec<ChunkKey> = pool.iter().map(Chunk::key).collect();
        let mut after: Vec<ChunkKey> = rescored.iter().map(Chunk::key).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    // ── Expansion ─────────────────────────────────────────────────────────

    #[test]
    fn expansion_is_deterministic_and_bounded(question in "\\PC{0,40}") {
        let lexicon = Lexicon::default();
        let a = expansion::expand(&question, &lexicon);
        let b = expansion::expand(&question, &lexicon);
        prop_assert_eq!(&a, &b);
        prop_assert!(a.len() <= expansion::MAX_EXPANSIONS);
        prop_assert_eq!(&a[0], &question);

        let unique: HashSet<&String> = a.iter().collect();
        prop_assert_eq!(unique.len(), a.len());
    }
}
