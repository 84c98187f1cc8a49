//! Batch compilation: walk documentation sources and assemble a corpus.

use crate::error::Result;
use crate::extract::{category_label, extract};
use crate::types::Corpus;
use anyhow::Context;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Knobs for one compile run.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Human title written into the corpus.
    pub title: String,
    /// Topic prefix stripped from file stems before forming category labels,
    /// e.g. `python_`.
    pub strip_prefix: String,
    /// File extensions treated as documentation sources.
    pub extensions: Vec<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            title: "Reference Guide".to_string(),
            strip_prefix: String::new(),
            extensions: vec!["txt".to_string(), "py".to_string()],
        }
    }
}

/// Outcome of a compile run: the corpus plus batch accounting.
#[derive(Debug)]
pub struct CompileReport {
    pub corpus: Corpus,
    /// Sources successfully extracted.
    pub sources: usize,
    /// Sources skipped because they could not be read.
    pub skipped: usize,
}

/// Compile every documentation source under `root` into a corpus.
///
/// Sources are processed in lexicographic path order so category contents are
/// reproducible run to run. An unreadable source is skipped with a warning
/// and counted; the batch never aborts for one bad file.
pub fn compile_dir(root: &Path, options: &CompileOptions) -> Result<CompileReport> {
    let paths = collect_sources(root, &options.extensions)?;
    Ok(compile_files(&paths, options))
}

/// Compile an explicit list of source files, in the order given.
pub fn compile_files(paths: &[PathBuf], options: &CompileOptions) -> CompileReport {
    let mut corpus = Corpus {
        title: options.title.clone(),
        ..Default::default()
    };
    let mut sources = 0;
    let mut skipped = 0;

    for path in paths {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable source");
                skipped += 1;
                continue;
            }
        };

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let category = category_label(&stem, &options.strip_prefix);
        if category.is_empty() {
            tracing::warn!(path = %path.display(), "skipping source with empty category label");
            skipped += 1;
            continue;
        }

        let sections = extract(&raw);
        tracing::debug!(path = %path.display(), category, sections = sections.len(), "extracted source");
        corpus.categories.entry(category).or_default().extend(sections);
        sources += 1;
    }

    tracing::info!(
        sources,
        skipped,
        sections = corpus.section_count(),
        categories = corpus.categories.len(),
        "compile finished"
    );

    CompileReport { corpus, sources, skipped }
}

/// Gather source files under `root` with a matching extension, sorted.
fn collect_sources(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    anyhow::ensure!(root.is_dir(), "source root {} is not a directory", root.display());

    let mut paths = Vec::new();
    let walk = WalkBuilder::new(root).standard_filters(false).build();

    for entry in walk {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        let path = entry.path();
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| want == ext));
        if matches {
            paths.push(path.to_path_buf());
        }
    }

    paths.sort();
    Ok(paths)
}
