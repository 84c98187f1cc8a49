use clap::{Parser, Subcommand};
use std::borrow::Cow;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docref")]
#[command(about = "Compile and search structured documentation references", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile documentation sources into a corpus file
    Compile {
        /// Directory holding the documentation sources
        input: PathBuf,
        #[arg(short, long, default_value = "reference.json")]
        output: PathBuf,
        /// Human title stored in the corpus
        #[arg(long, default_value = "Reference Guide")]
        title: String,
        /// Topic prefix stripped from file stems (e.g. "python_")
        #[arg(long, default_value = "")]
        strip_prefix: String,
        /// Source file extensions to pick up
        #[arg(long, default_values_t = vec!["txt".to_string(), "py".to_string()])]
        extension: Vec<String>,
    },
    /// Run one query against a compiled corpus
    Search {
        query: String,
        #[arg(short, long, default_value = "reference.json")]
        corpus: PathBuf,
        /// Maximum number of matches returned
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Minimum composite score (strictly greater survives)
        #[arg(short, long)]
        threshold: Option<f64>,
        /// Optional TOML file with search tuning overrides
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the categories in a compiled corpus
    Categories {
        #[arg(short, long, default_value = "reference.json")]
        corpus: PathBuf,
    },
    /// Serve the corpus over MCP on stdio
    Serve {
        #[arg(short, long, default_value = "reference.json")]
        corpus: PathBuf,
        /// Optional TOML file with search tuning overrides
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
