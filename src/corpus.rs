//! Corpus persistence: the JSON backing store for compiled references.

use crate::error::CorpusError;
use crate::types::Corpus;
use anyhow::Context;
use std::io::ErrorKind;
use std::path::Path;

/// Load a corpus from its JSON backing store.
///
/// A missing file and a malformed file are reported as distinct errors so a
/// caller can tell "nothing compiled yet" apart from a corrupt store. Neither
/// condition is a crash.
pub fn load(path: &Path) -> Result<Corpus, CorpusError> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            return Err(CorpusError::NotFound { path: path.to_path_buf() });
        }
        Err(source) => {
            return Err(CorpusError::Io { path: path.to_path_buf(), source });
        }
    };

    serde_json::from_str(&data).map_err(|err| CorpusError::Malformed {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Persist a corpus as pretty-printed JSON.
///
/// The corpus is rebuilt wholesale on every compile, so this is a plain
/// truncating write; category key order comes from the corpus `BTreeMap` and
/// is stable across runs.
pub fn save(corpus: &Corpus, path: &Path) -> crate::error::Result<()> {
    let mut data = serde_json::to_string_pretty(corpus)
        .context("failed to serialize corpus")?;
    data.push('\n');
    std::fs::write(path, data)
        .with_context(|| format!("failed to write corpus to {}", path.display()))?;
    tracing::debug!(path = %path.display(), "corpus written");
    Ok(())
}
