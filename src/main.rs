use anyhow::Context;
use clap::Parser;
use docref_mcp::cli::{Cli, Commands, expand_tilde};
use docref_mcp::compile::{CompileOptions, compile_dir};
use docref_mcp::config::SearchConfig;
use docref_mcp::format::{render_categories, render_matches};
use docref_mcp::search::SearchEngine;
use docref_mcp::{corpus, server};
use std::path::{Path, PathBuf};

/// Apply tilde expansion to a user-supplied path argument.
fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(expand_tilde(&path.to_string_lossy()).into_owned())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interfere with MCP traffic or search
    // output on stdout.
    docref_mcp::tracing::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compile { input, output, title, strip_prefix, extension } => {
            let options = CompileOptions { title, strip_prefix, extensions: extension };
            let report = compile_dir(&resolve_path(&input), &options)?;
            let output = resolve_path(&output);
            corpus::save(&report.corpus, &output)?;

            println!(
                "Compiled {} sections across {} categories to {}",
                report.corpus.section_count(),
                report.corpus.categories.len(),
                output.display()
            );
            if report.skipped > 0 {
                println!("Skipped {} unreadable source(s); see log for details", report.skipped);
            }
        }
        Commands::Search { query, corpus: corpus_path, limit, threshold, config } => {
            let tuning = SearchConfig::load(config.as_deref())?.into_tuning();
            let loaded = corpus::load(&resolve_path(&corpus_path))
                .context("cannot search without a corpus")?;

            let engine = SearchEngine::with_tuning(loaded, tuning);
            let limit = limit.unwrap_or(engine.tuning().limit);
            let threshold = threshold.unwrap_or(engine.tuning().threshold);
            let matches = engine.search_with(&query, limit, threshold);
            print!("{}", render_matches(&query, &matches));
        }
        Commands::Categories { corpus: corpus_path } => {
            let loaded = corpus::load(&resolve_path(&corpus_path))
                .context("cannot list categories without a corpus")?;
            print!("{}", render_categories(&loaded));
        }
        Commands::Serve { corpus: corpus_path, config } => {
            let config = SearchConfig::load(config.as_deref())?;
            tracing::info!("Starting docref-mcp MCP server");
            server::serve_stdio(resolve_path(&corpus_path), config).await?;
        }
    }

    Ok(())
}
