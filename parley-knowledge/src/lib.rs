//! Knowledge subsystem for parley.
//!
//! Covers the whole learning pipeline: normalizing raw text or HTML into a
//! single clean string, splitting it into candidate sentences, merging the
//! new ones into the persistent corpus, and matching user utterances against
//! the corpus by keyword overlap.

pub mod errors;
pub mod fetch;
pub mod matcher;
pub mod normalize;
pub mod segment;
pub mod store;

pub use errors::{KnowledgeError, KnowledgeResult};
pub use matcher::best_match;
pub use store::KnowledgeStore;
