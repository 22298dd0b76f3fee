//! Deterministic query expansion over the domain lexicon.
//!
//! Strategies, in generation order: synonym substitution, keyword focus,
//! conjunction decomposition, listing generalization. Pure, no I/O.

use std::collections::HashSet;

use sift_core::config::Lexicon;

use crate::text;

/// Upper bound on queries returned by [`expand`], original included.
pub const MAX_EXPANSIONS: usize = 10;

/// Expand a question into alternate queries. The original question is always
/// first; generated variants are deduplicated exactly, variants of char-length
/// ≤ 2 are dropped, and the total is capped at [`MAX_EXPANSIONS`] preserving
/// generation order.
pub fn expand(question: &str, lexicon: &Lexicon) -> Vec<String> {
    let mut queries = vec![question.to_string()];

    synonym_queries(question, lexicon, &mut queries);
    keyword_query(question, lexicon, &mut queries);
    decomposed_queries(question, lexicon, &mut queries);
    generalized_queries(question, lexicon, &mut queries);

    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(question.to_string());
    let mut result = vec![queries.remove(0)];
    for query in queries {
        if query.chars().count() > 2 && seen.insert(query.clone()) {
            result.push(query);
        }
    }
    result.truncate(MAX_EXPANSIONS);
    result
}

/// Fusion weight of a query relative to the original question: 1.5 for the
/// original itself, 1.2 for clearly shorter keyword-style variants, else 1.0.
pub fn importance(query: &str, original: &str) -> f64 {
    if query == original {
        return 1.5;
    }
    let query_tokens = query.split_whitespace().count() as f64;
    let original_tokens = original.split_whitespace().count() as f64;
    if query_tokens < original_tokens * 0.7 {
        1.2
    } else {
        1.0
    }
}

/// One variant per synonym for every table phrase the question contains.
fn synonym_queries(question: &str, lexicon: &Lexicon, out: &mut Vec<String>) {
    for rule in &lexicon.synonyms {
        if question.contains(rule.phrase.as_str()) {
            for synonym in &rule.synonyms {
                out.push(question.replace(rule.phrase.as_str(), synonym));
            }
        }
    }
}

/// All terms minus stopwords, space-joined. Only for questions with more than
/// three terms; skipped when nothing survives.
fn keyword_query(question: &str, lexicon: &Lexicon, out: &mut Vec<String>) {
    let tokens = text::terms(question);
    if tokens.len() <= 3 {
        return;
    }
    let kept: Vec<&str> = tokens
        .into_iter()
        .filter(|t| !lexicon.is_stopword(t))
        .collect();
    if !kept.is_empty() {
        out.push(kept.join(" "));
    }
}

/// Split compound questions on each conjunction group and emit the clauses.
fn decomposed_queries(question: &str, lexicon: &Lexicon, out: &mut Vec<String>) {
    for group in &lexicon.conjunction_groups {
        if !group.iter().any(|c| question.contains(c.as_str())) {
            continue;
        }
        let mut parts: Vec<&str> = vec![question];
        for separator in group {
            parts = parts
                .into_iter()
                .flat_map(|p| p.split(separator.as_str()))
                .collect();
        }
        for part in parts {
            let clause = part.trim().replace(['？', '。'], "");
            if clause.chars().count() > 2 {
                out.push(clause);
            }
        }
    }
}

/// For listing-style questions, emit the marker-stripped form plus its
/// suffixed generalizations.
fn generalized_queries(question: &str, lexicon: &Lexicon, out: &mut Vec<String>) {
    if !lexicon
        .generalization_triggers
        .iter()
        .any(|t| question.contains(t.as_str()))
    {
        return;
    }
    let mut generalized = question.to_string();
    for marker in &lexicon.listing_markers {
        generalized = generalized.replace(marker.as_str(), "");
    }
    let generalized = generalized.replace(['？', '。'], "").trim().to_string();
    if generalized.chars().count() > 2 {
        out.push(generalized.clone());
        for suffix in &lexicon.generalization_suffixes {
            out.push(format!("{generalized}{suffix}"));
        }
    }
}
