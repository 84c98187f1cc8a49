//! MCP server implementation and session state management.

use crate::config::SearchConfig;
use crate::corpus;
use crate::format::{render_categories, render_matches};
use crate::search::{SearchEngine, SearchTuning};
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
    transport::stdio,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Parameters for the search_reference tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchReferenceRequest {
    /// Free-text query, e.g. "list append"
    pub query: String,
    /// Maximum number of matches to return (default: 3)
    #[serde(default)]
    pub limit: Option<usize>,
    /// Minimum composite score; matches at or below it are dropped (default: 20)
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// Parameters for the list_categories tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ListCategoriesRequest {
    /// Optional case-insensitive substring filter on category names
    #[serde(default)]
    pub filter: Option<String>,
}

/// Parameters for the reload_corpus tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ReloadCorpusRequest {
    /// Corpus file to load; defaults to the path the server was started with
    #[serde(default)]
    pub path: Option<String>,
}

/// Per-session state: where the corpus lives and the engine built from it.
///
/// `engine` is `None` when the last load attempt failed; the error text is
/// kept so queries can report *why* no corpus is loaded instead of pretending
/// there were simply no matches.
struct ServerState {
    corpus_path: PathBuf,
    tuning: SearchTuning,
    engine: Option<SearchEngine>,
    load_error: Option<String>,
}

impl ServerState {
    fn reload(&mut self) {
        match corpus::load(&self.corpus_path) {
            Ok(corpus) => {
                tracing::info!(
                    path = %self.corpus_path.display(),
                    sections = corpus.section_count(),
                    "corpus loaded"
                );
                self.engine = Some(SearchEngine::with_tuning(corpus, self.tuning.clone()));
                self.load_error = None;
            }
            Err(err) => {
                tracing::warn!(path = %self.corpus_path.display(), error = %err, "corpus load failed");
                self.engine = None;
                self.load_error = Some(err.to_string());
            }
        }
    }

    fn no_corpus_message(&self) -> String {
        match &self.load_error {
            Some(error) => format!("No corpus loaded: {}", error),
            None => "No corpus loaded.".to_string(),
        }
    }
}

/// MCP server for documentation reference queries
#[derive(Clone)]
pub struct ReferenceServer {
    state: Arc<Mutex<ServerState>>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ReferenceServer {
    /// Create a server for the given corpus file, loading it eagerly.
    ///
    /// A failed load is not fatal: the server starts anyway and reports the
    /// load error on every query until a reload succeeds.
    pub fn new(corpus_path: PathBuf, config: SearchConfig) -> Self {
        let mut state = ServerState {
            corpus_path,
            tuning: config.into_tuning(),
            engine: None,
            load_error: None,
        };
        state.reload();

        Self {
            state: Arc::new(Mutex::new(state)),
            tool_router: Self::tool_router(),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ServerState> {
        self.state.lock().unwrap_or_else(|_poisoned| {
            tracing::error!("docref-mcp: server state corrupted, aborting");
            std::process::abort();
        })
    }

    #[tool(
        description = "Search the compiled documentation reference with a free-text query. Returns ranked sections with per-signal score breakdowns."
    )]
    fn search_reference(
        &self,
        Parameters(request): Parameters<SearchReferenceRequest>,
    ) -> Result<String, String> {
        let state = self.lock_state();
        let engine = state.engine.as_ref().ok_or_else(|| state.no_corpus_message())?;

        let limit = request.limit.unwrap_or(engine.tuning().limit);
        let threshold = request.threshold.unwrap_or(engine.tuning().threshold);
        let matches = engine.search_with(&request.query, limit, threshold);

        Ok(render_matches(&request.query, &matches))
    }

    #[tool(
        description = "List the categories in the loaded corpus with their section counts. Optionally filter by a name substring."
    )]
    fn list_categories(
        &self,
        Parameters(request): Parameters<ListCategoriesRequest>,
    ) -> Result<String, String> {
        let state = self.lock_state();
        let engine = state.engine.as_ref().ok_or_else(|| state.no_corpus_message())?;

        let corpus = engine.corpus();
        match request.filter {
            None => Ok(render_categories(corpus)),
            Some(filter) => {
                let needle = filter.to_lowercase();
                let mut filtered = corpus.clone();
                filtered
                    .categories
                    .retain(|name, _| name.to_lowercase().contains(&needle));
                Ok(render_categories(&filtered))
            }
        }
    }

    #[tool(
        description = "Reload the corpus from disk, optionally from a different path. Use after recompiling the reference."
    )]
    fn reload_corpus(
        &self,
        Parameters(request): Parameters<ReloadCorpusRequest>,
    ) -> Result<String, String> {
        let mut state = self.lock_state();
        if let Some(path) = request.path {
            state.corpus_path = PathBuf::from(crate::cli::expand_tilde(&path).into_owned());
        }
        state.reload();

        match &state.engine {
            Some(engine) => Ok(format!(
                "Loaded {} sections across {} categories from {}.",
                engine.corpus().section_count(),
                engine.corpus().categories.len(),
                state.corpus_path.display()
            )),
            None => Err(state.no_corpus_message()),
        }
    }
}

#[tool_handler]
impl ServerHandler for ReferenceServer {
    fn get_info(&self) -> ServerInfo {
        // ServerInfo is non-exhaustive, so it cannot be built with a struct
        // expression.
        let mut info = ServerInfo::default();
        info.protocol_version = ProtocolVersion::V_2024_11_05;
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info = Implementation::from_build_env();
        info.instructions = Some(
            "docref-mcp: search a compiled documentation reference. Use search_reference for ranked free-text queries, list_categories to browse, and reload_corpus after recompiling."
                .to_string(),
        );
        info
    }
}

/// Serve the corpus over stdio until the client disconnects.
pub async fn serve_stdio(corpus_path: PathBuf, config: SearchConfig) -> crate::error::Result<()> {
    let server = ReferenceServer::new(corpus_path, config);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}
