use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{debug, error, info, warn};

use crate::analyzer::engine::AnalysisEngine;
use crate::analyzer::session::{AnalyzerBridge, AnalyzerSession};
use crate::analyzer::types::EnginePosition;
use crate::lsp::completions::completion_list;
use crate::lsp::convert;
use crate::lsp::diagnostics;
use crate::lsp::documents::DocumentStore;

pub struct Backend {
    client: Client,
    engine: Arc<dyn AnalysisEngine>,
    documents: DocumentStore,
    session: RwLock<AnalyzerSession>,
}

impl Backend {
    pub fn new(client: Client, engine: Arc<dyn AnalysisEngine>) -> Self {
        Self {
            client,
            engine,
            documents: DocumentStore::default(),
            session: RwLock::new(AnalyzerSession::Uninitialized),
        }
    }

    pub fn server_capabilities() -> ServerCapabilities {
        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(
                TextDocumentSyncKind::FULL,
            )),
            completion_provider: Some(CompletionOptions {
                resolve_provider: Some(false),
                ..Default::default()
            }),
            hover_provider: Some(HoverProviderCapability::Simple(true)),
            definition_provider: Some(OneOf::Left(true)),
            ..Default::default()
        }
    }

    /// Workspace root from the initialize params, if the client sent one.
    #[allow(deprecated)]
    fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
        if let Some(uri) = &params.root_uri {
            if let Ok(path) = uri.to_file_path() {
                return Some(path);
            }
        }
        params.root_path.as_ref().map(PathBuf::from)
    }

    /// One full diagnostics pass for a document: push the text to the
    /// engine, fetch the warnings, publish the complete set. An empty set is
    /// published too, clearing anything shown before.
    async fn scan_document(&self, uri: Url, text: String) {
        let session = self.session.read().await;
        let Some(bridge) = session.ready() else {
            return;
        };
        let Some(local) = bridge.local_path(&uri) else {
            return;
        };

        // Queries for this document queue up behind the engine seeing the
        // new text; last-write-wins per path.
        let _guard = bridge.path_lock(&local).await.lock_owned().await;

        if let Err(e) = self.engine.file_changed(&local, &text).await {
            error!("fileChanged failed for {:?}: {}", local, e);
            return;
        }

        let warnings = match self.engine.warnings_for_file(&local).await {
            Ok(warnings) => warnings,
            Err(e) => {
                error!("getWarningsForFile failed for {:?}: {}", local, e);
                return;
            }
        };

        let diagnostics = match diagnostics::from_warnings(warnings) {
            Ok(diagnostics) => diagnostics,
            Err(e) => {
                error!("Diagnostics pass aborted for {:?}: {}", local, e);
                return;
            }
        };

        debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        self.client
            .log_message(MessageType::INFO, "element-lsp initializing")
            .await;

        match Self::workspace_root(&params) {
            Some(root) => {
                info!("Workspace root: {:?}", root);
                let bridge = AnalyzerBridge::new(Arc::clone(&self.engine), root);

                // The engine's view starts from the editor's open buffers,
                // not from disk.
                for (uri, text) in self.documents.all() {
                    let Some(local) = bridge.local_path(&uri) else {
                        continue;
                    };
                    if let Err(e) = self.engine.file_changed(&local, &text).await {
                        warn!("Initial fileChanged failed for {:?}: {}", local, e);
                    }
                }

                *self.session.write().await = AnalyzerSession::Ready(bridge);
            }
            None => {
                warn!("Initialize carried no workspace root, analysis stays offline");
            }
        }

        Ok(InitializeResult {
            capabilities: Self::server_capabilities(),
            server_info: Some(ServerInfo {
                name: "element-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "element-lsp initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.client
            .log_message(MessageType::INFO, "element-lsp shutting down")
            .await;
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;
        debug!("Document opened: {}", uri);

        self.documents.open_or_change(uri.clone(), text.clone());
        self.scan_document(uri, text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        // FULL sync: the last change event carries the complete new text.
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };

        self.documents.open_or_change(uri.clone(), change.text.clone());
        self.scan_document(uri, change.text).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("Document closed: {}", params.text_document.uri);
        self.documents.close(&params.text_document.uri);
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        // Observed only; re-analyzing files outside the open set is a future
        // extension.
        info!("Watched files changed: {} event(s)", params.changes.len());
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let position_params = params.text_document_position_params;
        let uri = position_params.text_document.uri;

        let session = self.session.read().await;
        let Some(bridge) = session.ready() else {
            return Ok(None);
        };
        let Some(local) = bridge.local_path(&uri) else {
            return Ok(None);
        };

        let _guard = bridge.path_lock(&local).await.lock_owned().await;
        let position = convert::engine_position(position_params.position);

        match self.engine.documentation_at(&local, position).await {
            Ok(Some(documentation)) => Ok(Some(Hover {
                contents: HoverContents::Scalar(MarkedString::String(documentation)),
                range: None,
            })),
            Ok(None) => Ok(None),
            Err(e) => {
                warn!("Documentation query failed for {:?}: {}", local, e);
                Ok(None)
            }
        }
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let position_params = params.text_document_position_params;
        let uri = position_params.text_document.uri;

        let session = self.session.read().await;
        let Some(bridge) = session.ready() else {
            return Ok(None);
        };
        let Some(local) = bridge.local_path(&uri) else {
            return Ok(None);
        };

        let _guard = bridge.path_lock(&local).await.lock_owned().await;
        let position = convert::engine_position(position_params.position);

        match self.engine.definition_at(&local, position).await {
            Ok(Some(definition)) => {
                let Some(target) = bridge.uri_for(&definition.file) else {
                    return Ok(None);
                };

                // The engine reports a point; serve a zero-width range.
                let start = convert::lsp_position(EnginePosition {
                    line: definition.line,
                    column: definition.column,
                });
                Ok(Some(GotoDefinitionResponse::Scalar(Location {
                    uri: target,
                    range: Range { start, end: start },
                })))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                warn!("Definition query failed for {:?}: {}", local, e);
                Ok(None)
            }
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let position_params = params.text_document_position;
        let uri = position_params.text_document.uri;

        let session = self.session.read().await;
        let Some(bridge) = session.ready() else {
            return Ok(None);
        };
        let Some(local) = bridge.local_path(&uri) else {
            return Ok(None);
        };

        let _guard = bridge.path_lock(&local).await.lock_owned().await;
        let position = convert::engine_position(position_params.position);

        match self.engine.completions_at(&local, position).await {
            Ok(Some(result)) => Ok(completion_list(result).map(CompletionResponse::List)),
            Ok(None) => Ok(None),
            Err(e) => {
                warn!("Completion query failed for {:?}: {}", local, e);
                Ok(None)
            }
        }
    }
}
