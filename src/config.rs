//! Search tuning configuration.
//!
//! The keyword table, composite weights, threshold and limit are tuning
//! values, not contract; this module lets a TOML file override any of them
//! while everything absent falls back to the built-in defaults.

use crate::error::Result;
use crate::search::{SearchTuning, ScoreWeights, default_keyword_weights};
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;

fn default_threshold() -> f64 {
    20.0
}

fn default_limit() -> usize {
    3
}

fn default_title_weight() -> f64 {
    0.4
}

fn default_content_weight() -> f64 {
    0.3
}

fn default_keyword_weight() -> f64 {
    20.0
}

fn default_word_match_weight() -> f64 {
    0.3
}

/// On-disk search configuration, all fields optional.
///
/// ```toml
/// threshold = 15.0
/// limit = 5
///
/// [keywords]
/// iterator = 1.4
/// ```
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_title_weight")]
    pub title_weight: f64,
    #[serde(default = "default_content_weight")]
    pub content_weight: f64,
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,
    #[serde(default = "default_word_match_weight")]
    pub word_match_weight: f64,
    /// Replaces the built-in keyword table entirely when present.
    #[serde(default)]
    pub keywords: Option<BTreeMap<String, f64>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            limit: default_limit(),
            title_weight: default_title_weight(),
            content_weight: default_content_weight(),
            keyword_weight: default_keyword_weight(),
            word_match_weight: default_word_match_weight(),
            keywords: None,
        }
    }
}

impl SearchConfig {
    /// Load from a TOML file, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        toml::from_str(&data)
            .with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Convert into the engine's runtime tuning.
    pub fn into_tuning(self) -> SearchTuning {
        let keyword_weights = match self.keywords {
            Some(table) => table.into_iter().collect(),
            None => default_keyword_weights(),
        };
        SearchTuning {
            weights: ScoreWeights {
                title: self.title_weight,
                content: self.content_weight,
                keyword: self.keyword_weight,
                word_match: self.word_match_weight,
            },
            keyword_weights,
            threshold: self.threshold,
            limit: self.limit,
        }
    }
}
