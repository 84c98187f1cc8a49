//! Relevance sub-scores and their composite weighting.
//!
//! Four independent signals are computed per section and combined linearly.
//! The keyword multiplier is large (×20 on a small-magnitude signal) so that
//! domain-term hits outrank generic fuzzy overlap, and title similarity
//! outweighs raw content similarity because titles are curated labels.

use crate::types::{ScoreBreakdown, Section};
use ahash::{AHashMap, AHashSet};
use rapidfuzz::fuzz;

/// Multipliers applied to each sub-score when forming the composite.
///
/// The values are tuning, not contract; the linear four-signal shape is the
/// contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub title: f64,
    pub content: f64,
    pub keyword: f64,
    pub word_match: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            title: 0.4,
            content: 0.3,
            keyword: 20.0,
            word_match: 0.3,
        }
    }
}

impl ScoreWeights {
    /// Weighted linear combination of the four sub-scores.
    pub fn composite(&self, breakdown: &ScoreBreakdown) -> f64 {
        breakdown.title * self.title
            + breakdown.content * self.content
            + breakdown.keyword * self.keyword
            + breakdown.word_match * self.word_match
    }
}

/// The default per-keyword weights, carried over from the original reference
/// tool's empirically tuned table. Overridable through `SearchTuning`.
pub fn default_keyword_weights() -> AHashMap<String, f64> {
    [
        ("list", 1.5),
        ("string", 1.5),
        ("dictionary", 1.5),
        ("set", 1.5),
        ("tuple", 1.5),
        ("add", 1.3),
        ("remove", 1.3),
        ("find", 1.3),
        ("search", 1.3),
        ("convert", 1.3),
        ("example", 0.8),
        ("purpose", 1.2),
        ("syntax", 1.2),
    ]
    .into_iter()
    .map(|(word, weight)| (word.to_string(), weight))
    .collect()
}

/// A query preprocessed once per search: lowercased text, its tokens in
/// order, and the deduplicated word set.
///
/// `tokens` and `words` coexist on purpose: keyword scoring counts a repeated
/// keyword once per occurrence, word-overlap scoring treats the query as a
/// set.
#[derive(Debug)]
pub(crate) struct QueryTerms {
    pub(crate) lower: String,
    pub(crate) tokens: Vec<String>,
    pub(crate) words: AHashSet<String>,
}

impl QueryTerms {
    pub(crate) fn new(query: &str) -> Self {
        let lower = query.to_lowercase();
        let tokens: Vec<String> = lower.split_whitespace().map(str::to_string).collect();
        let words = tokens.iter().cloned().collect();
        Self { lower, tokens, words }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Compute all four sub-scores for one section.
pub(crate) fn score_section(
    terms: &QueryTerms,
    section: &Section,
    keyword_weights: &AHashMap<String, f64>,
) -> ScoreBreakdown {
    let blob = section.text_blob().to_lowercase();
    let title = section.title.to_lowercase();

    ScoreBreakdown {
        title: fuzz::ratio(terms.lower.chars(), title.chars()),
        content: partial_ratio(&terms.lower, &blob),
        keyword: keyword_score(terms, &blob, keyword_weights),
        word_match: word_match_score(terms, &blob),
    }
}

/// Best-aligning-substring similarity, 0–100.
///
/// The rapidfuzz crate exposes only the full-string `ratio`, so the partial
/// variant is built on top of it: slide a window the length of the shorter
/// string across the longer one and keep the best full ratio. An exact
/// substring therefore scores 100 regardless of how much longer the other
/// string is. Either side empty scores 0.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let comparator = fuzz::RatioBatchComparator::new(shorter.iter().copied());

    longer
        .windows(shorter.len())
        .map(|window| comparator.similarity(window.iter().copied()))
        .fold(0.0, f64::max)
}

/// Sum of keyword weights for every query word that is both a recognized
/// keyword and present in the section text (case-insensitive substring).
///
/// Walks the ordered token list, not the word set: a keyword repeated in the
/// query counts its weight once per occurrence, and the summation order is
/// fixed.
fn keyword_score(terms: &QueryTerms, blob_lower: &str, weights: &AHashMap<String, f64>) -> f64 {
    terms
        .tokens
        .iter()
        .filter_map(|word| {
            weights
                .get(word)
                .filter(|_| blob_lower.contains(word.as_str()))
        })
        .sum()
}

/// Fraction of query words present in the blob's word set, scaled to 0–100.
/// Defined as 0 for an empty query, so there is no division by zero.
fn word_match_score(terms: &QueryTerms, blob_lower: &str) -> f64 {
    if terms.words.is_empty() {
        return 0.0;
    }
    let blob_words: AHashSet<&str> = blob_lower.split_whitespace().collect();
    let overlap = terms
        .words
        .iter()
        .filter(|word| blob_words.contains(word.as_str()))
        .count();
    overlap as f64 / terms.words.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn section(title: &str, purpose: &str) -> Section {
        Section {
            title: title.into(),
            purpose: purpose.into(),
            ..Default::default()
        }
    }

    #[rstest]
    #[case("list", 1.5)] // recognized and present
    #[case("list add", 2.8)] // both recognized and present
    #[case("append", 0.0)] // not a recognized keyword
    #[case("tuple", 0.0)] // recognized but absent from the text
    #[case("", 0.0)]
    fn keyword_scores(#[case] query: &str, #[case] expected: f64) {
        let terms = QueryTerms::new(query);
        let blob = "list methods add an element".to_string();
        let score = keyword_score(&terms, &blob, &default_keyword_weights());
        check!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn repeated_query_keywords_count_once_per_occurrence() {
        let terms = QueryTerms::new("list list");
        let blob = "append() add an element to the end of the list".to_string();
        let score = keyword_score(&terms, &blob, &default_keyword_weights());
        check!((score - 3.0).abs() < 1e-9);
        // The word set still deduplicates for the overlap signal.
        check!((word_match_score(&terms, &blob) - 100.0).abs() < 1e-9);
    }

    #[rstest]
    #[case("append", "list.append(element)", 100.0)] // exact substring aligns perfectly
    #[case("append()", "append()", 100.0)]
    #[case("", "anything", 0.0)]
    #[case("anything", "", 0.0)]
    fn partial_ratio_finds_the_best_window(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: f64,
    ) {
        check!((partial_ratio(a, b) - expected).abs() < 1e-9);
    }

    #[test]
    fn partial_ratio_is_symmetric_in_argument_order() {
        let one = partial_ratio("append", "my_list.append(4)");
        let two = partial_ratio("my_list.append(4)", "append");
        check!((one - two).abs() < 1e-9);
        check!(one > 0.0);
    }

    #[test]
    fn partial_ratio_beats_full_ratio_for_substrings() {
        let full = fuzz::ratio("append".chars(), "list.append(element)".chars());
        let partial = partial_ratio("append", "list.append(element)");
        check!(partial > full);
        check!((partial - 100.0).abs() < 1e-9);
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let terms = QueryTerms::new("LIST");
        let blob = "working with List values".to_lowercase();
        let score = keyword_score(&terms, &blob, &default_keyword_weights());
        check!((score - 1.5).abs() < 1e-9);
    }

    #[rstest]
    #[case("list append", "my_list append items", 50.0)] // "append" matches, "list" does not ("my_list")
    #[case("add element", "add an element to it", 100.0)]
    #[case("missing words", "nothing shared here", 0.0)]
    #[case("", "anything", 0.0)] // empty query: defined as zero
    fn word_match_scores(#[case] query: &str, #[case] blob: &str, #[case] expected: f64) {
        let terms = QueryTerms::new(query);
        let score = word_match_score(&terms, &blob.to_lowercase());
        check!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn composite_is_monotonic_in_title_score() {
        // Raising the title sub-score while holding the others fixed can
        // never lower the composite: its weight is non-negative.
        let weights = ScoreWeights::default();
        let mut previous = f64::MIN;
        for step in 0..=10 {
            let breakdown = ScoreBreakdown {
                title: f64::from(step) * 10.0,
                content: 40.0,
                keyword: 1.5,
                word_match: 50.0,
            };
            let score = weights.composite(&breakdown);
            check!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn exact_title_match_scores_full_similarity() {
        let terms = QueryTerms::new("append()");
        let breakdown = score_section(
            &terms,
            &section("append()", "Add an element"),
            &default_keyword_weights(),
        );
        check!((breakdown.title - 100.0).abs() < 1e-9);
        check!((breakdown.content - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_query_starves_every_signal() {
        let terms = QueryTerms::new("   ");
        check!(terms.is_empty());
        let breakdown = score_section(
            &terms,
            &section("append()", "Add an element to the list"),
            &default_keyword_weights(),
        );
        check!(breakdown.keyword == 0.0);
        check!(breakdown.word_match == 0.0);
    }
}
