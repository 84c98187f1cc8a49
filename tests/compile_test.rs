//! End-to-end compile pipeline: raw source files → corpus → JSON store.

use assert2::{check, let_assert};
use docref_mcp::compile::{CompileOptions, compile_dir};
use docref_mcp::error::CorpusError;
use docref_mcp::corpus;
use std::path::PathBuf;

const LIST_DOC: &str = r#"
# ==================== BASIC LIST OPERATIONS ====================

"""
Creating Lists
--------
Purpose: Different ways to create and initialize lists
How to use: Various list creation methods
Sample usage:
    empty_list = []

    numbers = [1, 2, 3, 4, 5]
"""

"""
append()
Purpose: Add an element to the end of the list
How to use: list.append(element)
Sample usage:
    my_list = [1, 2, 3]
    my_list.append(4)
"""
"#;

const STRING_DOC: &str = r#"
"""
upper()
Purpose: Convert a string to uppercase
How to use: text.upper()
"""
"#;

fn write_sources(dir: &tempfile::TempDir) -> PathBuf {
    let root = dir.path().join("sources");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("python_list_operations.py"), LIST_DOC).unwrap();
    std::fs::write(root.join("python_string_manipulations.py"), STRING_DOC).unwrap();
    root
}

fn options() -> CompileOptions {
    CompileOptions {
        title: "Python Reference Guide".to_string(),
        strip_prefix: "python_".to_string(),
        ..Default::default()
    }
}

#[test]
fn compile_extracts_every_block_with_titles_in_source_order() {
    let dir = tempfile::tempdir().unwrap();
    let report = compile_dir(&write_sources(&dir), &options()).unwrap();

    check!(report.sources == 2);
    check!(report.skipped == 0);
    check!(report.corpus.section_count() == 3);

    let lists = &report.corpus.categories["List Operations"];
    check!(lists.len() == 2);
    check!(lists[0].title == "Creating Lists");
    check!(lists[1].title == "append()");
    check!(report.corpus.categories["String Manipulations"][0].title == "upper()");
}

#[test]
fn examples_split_on_blank_lines_and_are_trimmed() {
    let dir = tempfile::tempdir().unwrap();
    let report = compile_dir(&write_sources(&dir), &options()).unwrap();

    let creating = &report.corpus.categories["List Operations"][0];
    check!(creating.examples.len() == 2);
    check!(creating.examples[0] == "empty_list = []");
    check!(creating.examples[1] == "numbers = [1, 2, 3, 4, 5]");
    check!(creating.purpose == "Different ways to create and initialize lists");
    check!(creating.syntax == "Various list creation methods");
}

#[test]
fn saved_corpus_round_trips_identically() {
    let dir = tempfile::tempdir().unwrap();
    let report = compile_dir(&write_sources(&dir), &options()).unwrap();

    let store = dir.path().join("reference.json");
    corpus::save(&report.corpus, &store).unwrap();
    let reloaded = corpus::load(&store).unwrap();
    check!(reloaded == report.corpus);

    // Serialization is byte-stable across save/load cycles.
    let first = std::fs::read_to_string(&store).unwrap();
    corpus::save(&reloaded, &store).unwrap();
    let second = std::fs::read_to_string(&store).unwrap();
    check!(first == second);
}

#[test]
fn recompile_rebuilds_the_store_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let root = write_sources(&dir);
    let store = dir.path().join("reference.json");

    let report = compile_dir(&root, &options()).unwrap();
    corpus::save(&report.corpus, &store).unwrap();

    // Drop a source and recompile: its category must be gone.
    std::fs::remove_file(root.join("python_string_manipulations.py")).unwrap();
    let report = compile_dir(&root, &options()).unwrap();
    corpus::save(&report.corpus, &store).unwrap();

    let reloaded = corpus::load(&store).unwrap();
    check!(!reloaded.categories.contains_key("String Manipulations"));
    check!(reloaded.categories.contains_key("List Operations"));
}

#[test]
fn loading_a_missing_store_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = corpus::load(&dir.path().join("nope.json"));
    let_assert!(Err(CorpusError::NotFound { .. }) = result);
}
