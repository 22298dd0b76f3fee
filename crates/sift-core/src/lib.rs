//! # sift-core
//!
//! Foundation crate for the sift retrieval engine.
//! Defines the chunk model, retrieval filters, tunable configuration,
//! the domain lexicon, errors, and the trait seams to external backends.
//! Every other crate in the workspace depends on this.

pub mod chunk;
pub mod config;
pub mod errors;
pub mod options;
pub mod session;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use chunk::{Chunk, ChunkKey};
pub use config::{Lexicon, RetrievalConfig};
pub use errors::{SiftError, SiftResult};
pub use options::{RetrievalOptions, SearchConfig};
pub use traits::IVectorSearch;
