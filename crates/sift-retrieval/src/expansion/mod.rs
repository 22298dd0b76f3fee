//! Query expansion: one question → a bounded set of alternate search queries.

mod expander;

pub use expander::{expand, importance, MAX_EXPANSIONS};
