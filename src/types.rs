//! Core data model: sections, the compiled corpus, and search matches.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One documented concept, extracted from a single delimited block.
///
/// All fields default to empty when absent so that hand-edited or older corpus
/// files deserialize cleanly. A `Section` with an empty title never leaves the
/// extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Short human label; the first non-blank line of the source block.
    #[serde(default)]
    pub title: String,
    /// One-line description, from a `Purpose:` line.
    #[serde(default)]
    pub purpose: String,
    /// One-line usage pattern, from a `How to use:` line.
    #[serde(default)]
    pub syntax: String,
    /// Free-text example bodies in source order, edge-trimmed.
    #[serde(default)]
    pub examples: Vec<String>,
}

impl Section {
    /// Concatenation of every searchable field, space-joined.
    ///
    /// This is the text the content, keyword, and word-overlap scores run
    /// against.
    pub fn text_blob(&self) -> String {
        let mut parts = vec![
            self.title.as_str(),
            self.purpose.as_str(),
            self.syntax.as_str(),
        ];
        parts.extend(self.examples.iter().map(String::as_str));
        parts.join(" ")
    }
}

/// The full compiled reference: sections grouped by category.
///
/// Categories live in a `BTreeMap` so iteration order (and therefore tie-break
/// order during search, and key order in the persisted JSON) is deterministic:
/// lexicographic by category label, then source order within a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    /// Human title for the whole reference, e.g. "Python Reference Guide".
    #[serde(default)]
    pub title: String,
    /// Category label → sections, in source-file order within each category.
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<Section>>,
}

impl Corpus {
    /// Total number of sections across all categories.
    pub fn section_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Whether the corpus holds no sections at all.
    pub fn is_empty(&self) -> bool {
        self.categories.values().all(Vec::is_empty)
    }

    /// Iterate every `(category, section)` pair in deterministic corpus order.
    pub fn iter_sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.categories
            .iter()
            .flat_map(|(category, sections)| {
                sections.iter().map(move |section| (category.as_str(), section))
            })
    }
}

/// The four independent relevance signals computed for one section.
///
/// Kept on every match so callers can explain *why* a result ranked where it
/// did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Full-string fuzzy similarity between query and title (0–100).
    pub title: f64,
    /// Best-aligning substring fuzzy similarity against the text blob (0–100).
    pub content: f64,
    /// Sum of recognized keyword weights hit by the query (unbounded, small).
    pub keyword: f64,
    /// Query-word coverage of the blob word set (0–100).
    pub word_match: f64,
}

/// One ranked search result: a section, where it lives, and how it scored.
#[derive(Debug, Clone)]
pub struct SectionMatch {
    pub category: String,
    pub section: Section,
    /// Weighted composite of the four sub-scores.
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn text_blob_joins_all_fields() {
        let section = Section {
            title: "append()".into(),
            purpose: "Add an element".into(),
            syntax: "list.append(x)".into(),
            examples: vec!["my_list.append(4)".into()],
        };
        check!(section.text_blob() == "append() Add an element list.append(x) my_list.append(4)");
    }

    #[test]
    fn iter_sections_walks_categories_in_order() {
        let mut corpus = Corpus::default();
        corpus
            .categories
            .insert("Zulu".into(), vec![Section { title: "z".into(), ..Default::default() }]);
        corpus
            .categories
            .insert("Alpha".into(), vec![Section { title: "a".into(), ..Default::default() }]);

        let titles: Vec<&str> = corpus
            .iter_sections()
            .map(|(_, s)| s.title.as_str())
            .collect();
        check!(titles == ["a", "z"]);
        check!(corpus.section_count() == 2);
        check!(!corpus.is_empty());
    }
}
