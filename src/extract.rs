//! Section extraction: turning a raw documentation blob into structured records.
//!
//! Source files are loosely formatted: documented concepts sit inside
//! triple-quote delimited blocks, with labelled lines (`Purpose:`,
//! `How to use:`, `Sample usage:`) inside each block. Everything outside a
//! block is ignored.

use crate::types::Section;

/// Delimiter bounding a documentation block. Markers alternate strictly:
/// the first one opens a block, the next one closes it.
pub const BLOCK_MARKER: &str = "\"\"\"";

const PURPOSE_LABEL: &str = "Purpose:";
const SYNTAX_LABEL: &str = "How to use:";
const EXAMPLE_LABEL: &str = "Sample usage:";

/// Extract every well-formed section from a raw text blob.
///
/// Blocks that yield no usable lines (and therefore no title) are dropped
/// silently; they are expected noise in loosely structured input. Never fails,
/// for arbitrary input.
pub fn extract(raw: &str) -> Vec<Section> {
    split_blocks(raw)
        .iter()
        .filter_map(|block| parse_block(block))
        .collect()
}

/// Split raw text into the delimited blocks between marker pairs.
///
/// A marker is recognized only at the start of a trimmed line, and markers
/// never nest: open/close strictly alternate, so two adjacent blocks are never
/// merged even when the input is sloppy. An example containing a literal
/// marker line will truncate its block early; that is a known limitation of
/// the format, not something this splitter tries to repair. A dangling open
/// marker with no close discards the trailing partial block.
pub fn split_blocks(raw: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in raw.lines() {
        let trimmed = line.trim_start();
        let Some(rest) = trimmed.strip_prefix(BLOCK_MARKER) else {
            if let Some(lines) = current.as_mut() {
                lines.push(line);
            }
            continue;
        };

        match current.take() {
            // Closing marker; anything after it on the line is outside-block
            // text and ignored.
            Some(lines) => blocks.push(lines.join("\n")),
            // Opening marker. A second marker on the same line closes the
            // block immediately (`"""title"""`).
            None => {
                if let Some(end) = rest.find(BLOCK_MARKER) {
                    blocks.push(rest[..end].to_string());
                } else {
                    let mut lines = Vec::new();
                    if !rest.trim().is_empty() {
                        lines.push(rest);
                    }
                    current = Some(lines);
                }
            }
        }
    }

    blocks
}

/// Parse one block's inner text into a `Section`.
///
/// The first non-blank line is the title. Later lines are classified by
/// literal prefix: `Purpose:` and `How to use:` are scalar fields
/// (first occurrence wins), and `Sample usage:` switches the rest of the
/// block into example accumulation, where blank lines separate examples.
/// Unlabelled lines before `Sample usage:` are ignored. Returns `None` when
/// no title is recoverable.
pub fn parse_block(block: &str) -> Option<Section> {
    let block = block.trim().trim_matches('"').trim();

    let mut title: Option<String> = None;
    let mut purpose: Option<String> = None;
    let mut syntax: Option<String> = None;
    let mut examples: Vec<String> = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut in_example = false;

    for line in block.lines() {
        let trimmed = line.trim();

        if title.is_none() {
            if !trimmed.is_empty() {
                title = Some(trimmed.to_string());
            }
            continue;
        }

        if in_example {
            if trimmed.is_empty() {
                flush_example(&mut buffer, &mut examples);
            } else {
                // Keep the original line so internal indentation survives.
                buffer.push(line);
            }
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix(PURPOSE_LABEL) {
            if purpose.is_none() {
                purpose = Some(rest.trim().to_string());
            }
        } else if let Some(rest) = trimmed.strip_prefix(SYNTAX_LABEL) {
            if syntax.is_none() {
                syntax = Some(rest.trim().to_string());
            }
        } else if trimmed.starts_with(EXAMPLE_LABEL) {
            in_example = true;
        }
        // Any other line before `Sample usage:` carries no field and is
        // dropped.
    }

    flush_example(&mut buffer, &mut examples);

    Some(Section {
        title: title?,
        purpose: purpose.unwrap_or_default(),
        syntax: syntax.unwrap_or_default(),
        examples,
    })
}

/// Complete the current example: newline-join, edge-trim, keep if non-empty.
fn flush_example(buffer: &mut Vec<&str>, examples: &mut Vec<String>) {
    if buffer.is_empty() {
        return;
    }
    let example = buffer.join("\n").trim().to_string();
    buffer.clear();
    if !example.is_empty() {
        examples.push(example);
    }
}

/// Derive the human category label from a source identifier (a file stem).
///
/// Strips a known topic prefix, turns separators into spaces, and title-cases
/// each word: `python_list_operations` → `List Operations`.
pub fn category_label(identifier: &str, strip_prefix: &str) -> String {
    let stem = if !strip_prefix.is_empty() {
        identifier.strip_prefix(strip_prefix).unwrap_or(identifier)
    } else {
        identifier
    };

    stem.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
