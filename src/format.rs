//! Plain-text rendering of search results and corpus summaries.
//!
//! Output goes to a terminal or an MCP client verbatim; plain ASCII, no
//! color, no markup.

use crate::segments::split_code_segments;
use crate::types::{Corpus, SectionMatch};
use std::fmt::Write as _;

/// Render a ranked match list for a query.
pub fn render_matches(query: &str, matches: &[SectionMatch]) -> String {
    if matches.is_empty() {
        return format!(
            "No matches found for '{}'.\n\n\
             Search tips:\n\
             - Try a shorter or more general term\n\
             - Domain words like 'list', 'string', 'dictionary' boost relevance\n",
            query
        );
    }

    let mut out = format!(
        "Search results for '{}' ({} match{}):\n\n",
        query,
        matches.len(),
        if matches.len() == 1 { "" } else { "es" }
    );

    for (rank, m) in matches.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - {} (score {:.1})",
            rank + 1,
            m.section.title,
            m.category,
            m.score
        );
        if !m.section.purpose.is_empty() {
            let _ = writeln!(out, "   Purpose: {}", m.section.purpose);
        }
        if !m.section.syntax.is_empty() {
            let _ = writeln!(out, "   Syntax:  {}", m.section.syntax);
        }
        let _ = writeln!(
            out,
            "   Scores:  title {:.1}, content {:.1}, keywords {:.1}, word match {:.1}",
            m.breakdown.title, m.breakdown.content, m.breakdown.keyword, m.breakdown.word_match
        );

        for example in &m.section.examples {
            let _ = writeln!(out, "   Example:");
            for segment in split_code_segments(example) {
                for line in segment.lines() {
                    let _ = writeln!(out, "     {}", line.trim_end());
                }
            }
        }
        out.push('\n');
    }

    out
}

/// Render the category listing with section counts.
pub fn render_categories(corpus: &Corpus) -> String {
    if corpus.categories.is_empty() {
        return "The corpus holds no categories.\n".to_string();
    }

    let mut out = if corpus.title.is_empty() {
        format!("Categories ({}):\n", corpus.categories.len())
    } else {
        format!("{} - {} categories:\n", corpus.title, corpus.categories.len())
    };

    for (category, sections) in &corpus.categories {
        let _ = writeln!(
            out,
            "  - {} ({} section{})",
            category,
            sections.len(),
            if sections.len() == 1 { "" } else { "s" }
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScoreBreakdown, Section};
    use assert2::check;

    fn sample_match() -> SectionMatch {
        SectionMatch {
            category: "List Methods".into(),
            section: Section {
                title: "append()".into(),
                purpose: "Add an element to the end of the list".into(),
                syntax: "list.append(element)".into(),
                examples: vec!["my_list = [1, 2, 3]\nmy_list.append(4)".into()],
            },
            score: 87.3,
            breakdown: ScoreBreakdown { title: 45.0, content: 90.0, keyword: 1.5, word_match: 100.0 },
        }
    }

    #[test]
    fn renders_fields_scores_and_example_code() {
        let text = render_matches("list append", &[sample_match()]);
        check!(text.contains("1. append() - List Methods (score 87.3)"));
        check!(text.contains("Purpose: Add an element to the end of the list"));
        check!(text.contains("Syntax:  list.append(element)"));
        check!(text.contains("keywords 1.5"));
        check!(text.contains("my_list.append(4)"));
    }

    #[test]
    fn no_matches_message_names_the_query() {
        let text = render_matches("frobnicate", &[]);
        check!(text.contains("No matches found for 'frobnicate'"));
    }

    #[test]
    fn category_listing_counts_sections() {
        let mut corpus = Corpus { title: "Python Reference Guide".into(), ..Default::default() };
        corpus.categories.insert("List Methods".into(), vec![Section::default(), Section::default()]);
        let text = render_categories(&corpus);
        check!(text.contains("Python Reference Guide - 1 categories:"));
        check!(text.contains("- List Methods (2 sections)"));
    }

    #[test]
    fn rendered_output_is_plain_ascii() {
        let matches = render_matches("list append", &[sample_match()]);
        let empty = render_matches("frobnicate", &[]);
        let mut corpus = Corpus { title: "Python Reference Guide".into(), ..Default::default() };
        corpus.categories.insert("List Methods".into(), vec![Section::default()]);
        let categories = render_categories(&corpus);

        for text in [matches, empty, categories] {
            check!(text.is_ascii());
        }
    }
}
