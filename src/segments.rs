//! Code-segment isolation for example bodies.
//!
//! Example text interleaves prose and code. The presentation layer wants the
//! code pieces on their own so they can be rendered distinctly; prose is
//! deliberately discarded here.

/// Leading tokens that mark a line as a statement even without operators.
const STATEMENT_KEYWORDS: &[&str] = &[
    "def", "class", "import", "from", "return", "if", "for", "while", "print",
];

/// Heuristic: does this line look like code rather than prose?
///
/// True for comment lines and for lines containing an assignment, call or
/// indexing punctuation, a colon, or starting with a statement keyword.
pub fn looks_like_code(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.starts_with('#') {
        return true;
    }
    if trimmed.contains('=')
        || trimmed.contains('(')
        || trimmed.contains('[')
        || trimmed.contains(']')
        || trimmed.contains(':')
    {
        return true;
    }
    let leading = trimmed.split_whitespace().next().unwrap_or("");
    STATEMENT_KEYWORDS.contains(&leading)
}

/// Split one example body into its code segments.
///
/// Consecutive code-classified lines, plus any non-blank lines immediately
/// following them, form one segment. A blank line closes the open segment.
/// Non-code lines outside a segment are dropped. If nothing was ever
/// classified as code and the text is non-empty, the whole text is returned
/// as a single segment so the caller always has something to show.
pub fn split_code_segments(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_segment = false;

    for line in text.lines() {
        let blank = line.trim().is_empty();

        if !blank && looks_like_code(line) {
            in_segment = true;
            current.push(line);
        } else if in_segment && !blank {
            // Prose continuation inside a segment stays attached.
            current.push(line);
        } else if in_segment && blank {
            flush_segment(&mut current, &mut segments);
            in_segment = false;
        }
        // Non-code line outside any segment: dropped.
    }
    flush_segment(&mut current, &mut segments);

    if segments.is_empty() && !text.trim().is_empty() {
        segments.push(text.to_string());
    }

    segments
}

fn flush_segment(current: &mut Vec<&str>, segments: &mut Vec<String>) {
    if !current.is_empty() {
        segments.push(current.join("\n"));
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("# a comment", true)]
    #[case("x = 1", true)]
    #[case("my_list.append(4)", true)]
    #[case("values[0]", true)]
    #[case("for item in items:", true)]
    #[case("return result", true)]
    #[case("import os", true)]
    #[case("just some prose", false)]
    #[case("formula without operators", false)]
    #[case("", false)]
    fn code_line_classification(#[case] line: &str, #[case] expected: bool) {
        check!(looks_like_code(line) == expected);
    }

    #[test]
    fn blank_lines_split_segments() {
        let text = "x = 1\ny = 2\n\nz = 3";
        let segments = split_code_segments(text);
        check!(segments == ["x = 1\ny = 2", "z = 3"]);
    }

    #[test]
    fn trailing_prose_extends_an_open_segment() {
        let text = "x = compute()\nwhich prints the total";
        let segments = split_code_segments(text);
        check!(segments == ["x = compute()\nwhich prints the total"]);
    }

    #[test]
    fn prose_outside_segments_is_dropped() {
        let text = "intro prose here\n\nx = 1";
        let segments = split_code_segments(text);
        check!(segments == ["x = 1"]);
    }

    #[test]
    fn whole_text_fallback_when_nothing_looks_like_code() {
        let text = "only prose\nmore prose";
        let segments = split_code_segments(text);
        check!(segments == [text]);
    }

    #[test]
    fn empty_text_yields_no_segments() {
        check!(split_code_segments("").is_empty());
        check!(split_code_segments("  \n \n").is_empty());
    }
}
