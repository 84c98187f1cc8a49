pub mod cli;
pub mod compile;
pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod format;
pub mod search;
pub mod segments;
pub mod server;
pub mod tracing;
pub mod types;

pub use error::{CorpusError, Result};
pub use search::{SearchEngine, SearchTuning};
pub use types::{Corpus, ScoreBreakdown, Section, SectionMatch};
