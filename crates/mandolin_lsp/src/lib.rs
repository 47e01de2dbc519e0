//! Mandolin LSP server
//!
//! Language Server Protocol front end for the external `lute` linter.
//! Every lint cycle runs the linter as a subprocess against a document's
//! full text, publishes the resulting diagnostics, and records their fix
//! actions in a range-indexed registry so code-action requests are answered
//! without touching the linter again.

mod conversion;
mod settings;
mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, error, info};

use mandolin_core::translate;
use mandolin_toolchain::{
    JSON_FLAG, MANIFEST_FILE, RULES_FLAG, ResolvedToolchain, bundled_linter, invoke_lint,
    resolve_config_path, resolve_toolchain,
};

pub use crate::settings::Settings;
use crate::state::{BackendState, DocumentData, SharedState};

/// Language identifiers the server lints.
const LANGUAGES: [&str; 2] = ["luau", "lua"];

/// Delay before a changed document is re-linted.
const CHANGE_DEBOUNCE: Duration = Duration::from_millis(300);

/// The LSP backend for Mandolin.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for publishing diagnostics and log messages.
    client: Client,
    /// Shared state.
    state: SharedState,
}

impl Backend {
    /// Creates a new backend with the given client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(BackendState::new()),
        }
    }

    /// Runs one lint cycle for a document and publishes the results.
    ///
    /// The cycle invokes the linter once with the base rules and, when a
    /// rule-config path is set, a second time with that file; both reports
    /// are concatenated in order with no deduplication. Diagnostics and fix
    /// actions are published together in the final synchronous step, so a
    /// code-action query never observes one without the other.
    async fn lint_document(&self, uri: &Url, text: &str, version: Option<i32>) {
        debug!("Linting document: {}", uri);

        let generation = self.state.begin_generation(uri);

        let toolchain = match self.ensure_toolchain().await {
            Some(toolchain) => toolchain,
            None => {
                // Prior diagnostics and actions stay in place.
                info!("No usable linter executable, skipping lint cycle for {}", uri);
                return;
            }
        };

        let working_dir = toolchain.rule_config_dir.as_deref();

        let mut violations = invoke_lint(
            &toolchain.executable,
            &[JSON_FLAG.to_string()],
            text,
            working_dir,
        )
        .await;

        let rules_path = self.current_settings().lint_rules;
        if !rules_path.is_empty() {
            let workspace_root = self.first_workspace_root();
            let resolved = resolve_config_path(&rules_path, workspace_root.as_deref());
            info!("Linting {} with custom rules: {}", uri, resolved.display());

            let rule_violations = invoke_lint(
                &toolchain.executable,
                &[
                    JSON_FLAG.to_string(),
                    RULES_FLAG.to_string(),
                    resolved.to_string_lossy().into_owned(),
                ],
                text,
                working_dir,
            )
            .await;
            violations.extend(rule_violations);
        }

        if !self.state.is_current_generation(uri, generation) {
            debug!("Discarding stale lint results for {}", uri);
            return;
        }

        let mut diagnostics = Vec::with_capacity(violations.len());
        let mut actions = Vec::new();
        for violation in violations {
            let (diagnostic, action) = translate(violation);
            diagnostics.push(conversion::to_lsp_diagnostic(&diagnostic));
            actions.extend(action);
        }

        info!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.state.registry.publish(uri.as_str(), actions);
        self.client
            .publish_diagnostics(uri.clone(), diagnostics, version)
            .await;
    }

    /// Resolves the toolchain once per session. A foreman-managed install
    /// is written back into the session settings so later cycles take the
    /// explicit-path fast path; when the whole chain misses, the bundled
    /// linter next to the server binary is the last resort.
    async fn ensure_toolchain(&self) -> Option<ResolvedToolchain> {
        if let Some(toolchain) = self.cached_toolchain() {
            return Some(toolchain);
        }

        let settings = self.current_settings();
        let roots = self.workspace_roots();

        let resolved = match resolve_toolchain(&settings.lute_exec_path, &roots) {
            Some(toolchain) => {
                if toolchain.rule_config_dir.is_some() {
                    self.record_foreman_resolution(&toolchain).await;
                }
                toolchain
            }
            None => {
                info!("Linter executable not found, falling back to the bundled linter");
                let executable = match bundled_linter() {
                    Some(path) if path.is_file() => path,
                    Some(path) => {
                        info!("Bundled linter missing at {}", path.display());
                        return None;
                    }
                    None => {
                        error!("Cannot determine the bundled linter location");
                        return None;
                    }
                };
                ResolvedToolchain {
                    executable,
                    rule_config_dir: None,
                }
            }
        };

        match self.state.toolchain.write() {
            Ok(mut guard) => *guard = Some(resolved.clone()),
            Err(e) => error!("Toolchain lock poisoned: {}", e),
        }

        Some(resolved)
    }

    /// Records a successful foreman fallback resolution in the session
    /// settings and announces it to the client.
    async fn record_foreman_resolution(&self, toolchain: &ResolvedToolchain) {
        match self.state.settings.write() {
            Ok(mut settings) => {
                settings.lute_exec_path = toolchain.executable.to_string_lossy().into_owned();
                if let Some(dir) = &toolchain.rule_config_dir {
                    settings.foreman_toml_path =
                        dir.join(MANIFEST_FILE).to_string_lossy().into_owned();
                }
            }
            Err(e) => error!("Settings lock poisoned: {}", e),
        }

        self.client
            .log_message(
                MessageType::INFO,
                format!(
                    "Using foreman-managed linter at {}",
                    toolchain.executable.display()
                ),
            )
            .await;
    }

    fn current_settings(&self) -> Settings {
        match self.state.settings.read() {
            Ok(guard) => guard.clone(),
            Err(e) => {
                error!("Settings lock poisoned: {}", e);
                Settings::default()
            }
        }
    }

    fn cached_toolchain(&self) -> Option<ResolvedToolchain> {
        match self.state.toolchain.read() {
            Ok(guard) => guard.clone(),
            Err(e) => {
                error!("Toolchain lock poisoned: {}", e);
                None
            }
        }
    }

    fn workspace_roots(&self) -> Vec<PathBuf> {
        match self.state.workspace_roots.read() {
            Ok(guard) => guard.clone(),
            Err(e) => {
                error!("Workspace roots lock poisoned: {}", e);
                Vec::new()
            }
        }
    }

    fn first_workspace_root(&self) -> Option<PathBuf> {
        self.workspace_roots().into_iter().next()
    }

    /// Looks up a tracked document's text.
    fn document_text(&self, uri: &Url) -> Option<String> {
        match self.state.documents.read() {
            Ok(guard) => guard.get(uri).map(|doc| doc.text.clone()),
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                None
            }
        }
    }

    fn is_tracked(&self, uri: &Url) -> bool {
        match self.state.documents.read() {
            Ok(guard) => guard.contains_key(uri),
            Err(e) => {
                error!("Documents lock poisoned: {}", e);
                false
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Mandolin language server initializing...");

        let mut roots: Vec<PathBuf> = params
            .workspace_folders
            .unwrap_or_default()
            .iter()
            .filter_map(|folder| folder.uri.to_file_path().ok())
            .collect();
        if roots.is_empty() {
            #[allow(deprecated)]
            let root_uri = params.root_uri;
            if let Some(path) = root_uri.and_then(|uri| uri.to_file_path().ok()) {
                roots.push(path);
            }
        }

        match self.state.workspace_roots.write() {
            Ok(mut guard) => *guard = roots,
            Err(e) => error!("Workspace roots lock poisoned: {}", e),
        }

        if let Some(options) = params.initialization_options {
            let settings = Settings::from_value(&options);
            match self.state.settings.write() {
                Ok(mut guard) => *guard = settings,
                Err(e) => error!("Settings lock poisoned: {}", e),
            }
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(true),
                        })),
                        ..Default::default()
                    },
                )),
                code_action_provider: Some(CodeActionProviderCapability::Options(
                    CodeActionOptions {
                        code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
                        resolve_provider: Some(false),
                        work_done_progress_options: Default::default(),
                    },
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "mandolin".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Mandolin language server initialized!")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Mandolin language server shutting down...");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        debug!("Document opened: {}", params.text_document.uri);

        if !LANGUAGES.contains(&params.text_document.language_id.as_str()) {
            debug!(
                "Ignoring document in unlinted language `{}`",
                params.text_document.language_id
            );
            return;
        }

        {
            let mut docs = match self.state.documents.write() {
                Ok(guard) => guard,
                Err(e) => {
                    error!("Documents lock poisoned: {}", e);
                    return;
                }
            };
            docs.insert(
                params.text_document.uri.clone(),
                DocumentData {
                    text: params.text_document.text.clone(),
                    version: params.text_document.version,
                },
            );
        }

        self.lint_document(
            &params.text_document.uri,
            &params.text_document.text,
            Some(params.text_document.version),
        )
        .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        debug!("Document changed: {}", params.text_document.uri);

        if !self.is_tracked(&params.text_document.uri) {
            return;
        }

        // Full sync: the last change carries the whole document.
        let Some(change) = params.content_changes.into_iter().next() else {
            return;
        };
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        let text = change.text;

        {
            let mut docs = match self.state.documents.write() {
                Ok(guard) => guard,
                Err(e) => {
                    error!("Documents lock poisoned: {}", e);
                    return;
                }
            };
            docs.insert(
                uri.clone(),
                DocumentData {
                    text: text.clone(),
                    version,
                },
            );
        }

        // Debounce: lint only if this version is still current afterwards.
        let backend = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(CHANGE_DEBOUNCE).await;

            let still_current = match backend.state.documents.read() {
                Ok(docs) => docs.get(&uri).is_some_and(|doc| doc.version == version),
                Err(e) => {
                    error!("Documents lock poisoned: {}", e);
                    false
                }
            };

            if still_current {
                backend.lint_document(&uri, &text, Some(version)).await;
            }
        });
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        debug!("Document saved: {}", params.text_document.uri);

        let uri = params.text_document.uri;
        if !self.is_tracked(&uri) {
            return;
        }

        let text = match params.text.or_else(|| self.document_text(&uri)) {
            Some(text) => text,
            None => return,
        };

        self.lint_document(&uri, &text, None).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("Document closed: {}", params.text_document.uri);

        let uri = params.text_document.uri;
        {
            let mut docs = match self.state.documents.write() {
                Ok(guard) => guard,
                Err(e) => {
                    error!("Documents lock poisoned: {}", e);
                    return;
                }
            };
            docs.remove(&uri);
        }

        self.state.registry.clear(uri.as_str());
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let settings = Settings::from_value(&params.settings);
        debug!("Settings changed: {:?}", settings);

        let executable_changed = settings.lute_exec_path != self.current_settings().lute_exec_path;

        match self.state.settings.write() {
            Ok(mut guard) => *guard = settings,
            Err(e) => error!("Settings lock poisoned: {}", e),
        }

        // A different executable override invalidates the session's cached
        // resolution; the next cycle re-resolves.
        if executable_changed {
            match self.state.toolchain.write() {
                Ok(mut guard) => *guard = None,
                Err(e) => error!("Toolchain lock poisoned: {}", e),
            }
        }
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        debug!("Code action request: {}", params.text_document.uri);

        let uri = params.text_document.uri;
        let range = conversion::from_lsp_range(params.range);

        // Answered entirely from the registry; the linter is not consulted.
        let actions = self
            .state
            .registry
            .query(uri.as_str(), range)
            .iter()
            .map(|stored| CodeActionOrCommand::CodeAction(conversion::to_code_action(&uri, stored)))
            .collect();

        Ok(Some(actions))
    }
}

/// Starts the LSP server over stdio.
///
/// This function does not return unless an error occurs or the server
/// shuts down.
pub async fn run() {
    info!("Mandolin language server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
