//! Relevance engine for the compiled reference corpus.
//!
//! Scoring combines fuzzy string similarity, a weighted domain-keyword table,
//! and word-set overlap into one composite relevance value per section.

pub(crate) mod engine;
pub(crate) mod scoring;

pub use engine::{SearchEngine, SearchTuning};
pub use scoring::{ScoreWeights, default_keyword_weights};
