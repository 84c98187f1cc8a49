//! The search engine: scores a whole corpus against one query.

use super::scoring::{QueryTerms, ScoreWeights, default_keyword_weights, score_section};
use crate::types::{Corpus, SectionMatch};
use ahash::AHashMap;

/// Tunable search parameters.
///
/// The defaults mirror the original tool's empirically chosen constants;
/// callers can override them wholesale (config file) or per query.
#[derive(Debug, Clone)]
pub struct SearchTuning {
    pub weights: ScoreWeights,
    pub keyword_weights: AHashMap<String, f64>,
    /// Matches scoring at or below this are discarded (strictly greater
    /// survives).
    pub threshold: f64,
    /// Maximum number of matches returned.
    pub limit: usize,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            keyword_weights: default_keyword_weights(),
            threshold: 20.0,
            limit: 3,
        }
    }
}

/// Scores free-text queries against a loaded corpus.
///
/// The engine owns its corpus and treats it as immutable for the lifetime of
/// every query; there is no hidden shared state, so one engine can serve any
/// number of sequential queries deterministically.
#[derive(Debug)]
pub struct SearchEngine {
    corpus: Corpus,
    tuning: SearchTuning,
}

impl SearchEngine {
    pub fn new(corpus: Corpus) -> Self {
        Self::with_tuning(corpus, SearchTuning::default())
    }

    pub fn with_tuning(corpus: Corpus, tuning: SearchTuning) -> Self {
        Self { corpus, tuning }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn tuning(&self) -> &SearchTuning {
        &self.tuning
    }

    /// Search with the engine's configured limit and threshold.
    pub fn search(&self, query: &str) -> Vec<SectionMatch> {
        self.search_with(query, self.tuning.limit, self.tuning.threshold)
    }

    /// Search with explicit limit and threshold overrides.
    ///
    /// Every section in the corpus is scored; survivors (strictly above the
    /// threshold) are sorted by composite score descending. The sort is
    /// stable, so ties keep corpus order (category order, then in-category
    /// order) and results stay deterministic.
    pub fn search_with(&self, query: &str, limit: usize, threshold: f64) -> Vec<SectionMatch> {
        let terms = QueryTerms::new(query);
        if terms.is_empty() {
            // Degenerate query: both threshold-relevant signals are starved,
            // so nothing could rank anyway.
            return Vec::new();
        }

        let mut matches: Vec<SectionMatch> = self
            .corpus
            .iter_sections()
            .filter_map(|(category, section)| {
                let breakdown = score_section(&terms, section, &self.tuning.keyword_weights);
                let score = self.tuning.weights.composite(&breakdown);
                (score > threshold).then(|| SectionMatch {
                    category: category.to_string(),
                    section: section.clone(),
                    score,
                    breakdown,
                })
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(limit);

        tracing::debug!(
            query,
            matches = matches.len(),
            sections = self.corpus.section_count(),
            "search complete"
        );
        matches
    }
}
