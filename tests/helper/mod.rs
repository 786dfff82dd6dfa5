//! Shared helpers for the e2e tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;
use tokio::sync::mpsc;
use tower_lsp::ClientSocket;
use tower_lsp::jsonrpc::{Request, Response};

use element_lsp::analyzer::engine::AnalysisEngine;
use element_lsp::analyzer::error::EngineError;
use element_lsp::analyzer::types::{
    CompletionResult, DefinitionLocation, EnginePosition, EngineRange, Severity, Warning,
};

/// Scripted analysis engine.
///
/// Warnings are keyed by (path, needle): a warning is reported only while
/// the last text pushed via `file_changed` still contains its needle, which
/// models an engine re-analyzing each full-document update. Hover,
/// definition, and completion answers are keyed by path.
#[derive(Default)]
pub struct MockEngine {
    texts: Mutex<HashMap<PathBuf, String>>,
    warnings: Vec<(PathBuf, String, Warning)>,
    documentation: HashMap<PathBuf, String>,
    definitions: HashMap<PathBuf, DefinitionLocation>,
    completions: HashMap<PathBuf, CompletionResult>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_warning(mut self, path: &str, needle: &str, warning: Warning) -> Self {
        self.warnings
            .push((PathBuf::from(path), needle.to_string(), warning));
        self
    }

    pub fn with_documentation(mut self, path: &str, documentation: &str) -> Self {
        self.documentation
            .insert(PathBuf::from(path), documentation.to_string());
        self
    }

    pub fn with_definition(mut self, path: &str, definition: DefinitionLocation) -> Self {
        self.definitions.insert(PathBuf::from(path), definition);
        self
    }

    pub fn with_completions(mut self, path: &str, completions: CompletionResult) -> Self {
        self.completions.insert(PathBuf::from(path), completions);
        self
    }
}

#[async_trait]
impl AnalysisEngine for MockEngine {
    async fn file_changed(&self, path: &Path, text: &str) -> Result<(), EngineError> {
        self.texts
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    async fn warnings_for_file(&self, path: &Path) -> Result<Vec<Warning>, EngineError> {
        let texts = self.texts.lock().unwrap();
        let Some(text) = texts.get(path) else {
            return Ok(Vec::new());
        };

        Ok(self
            .warnings
            .iter()
            .filter(|(warning_path, needle, _)| warning_path == path && text.contains(needle))
            .map(|(_, _, warning)| warning.clone())
            .collect())
    }

    async fn documentation_at(
        &self,
        path: &Path,
        _position: EnginePosition,
    ) -> Result<Option<String>, EngineError> {
        Ok(self.documentation.get(path).cloned())
    }

    async fn definition_at(
        &self,
        path: &Path,
        _position: EnginePosition,
    ) -> Result<Option<DefinitionLocation>, EngineError> {
        Ok(self.definitions.get(path).cloned())
    }

    async fn completions_at(
        &self,
        path: &Path,
        _position: EnginePosition,
    ) -> Result<Option<CompletionResult>, EngineError> {
        Ok(self.completions.get(path).cloned())
    }
}

pub fn warning(
    code: &str,
    message: &str,
    start: (u32, u32),
    end: (u32, u32),
    severity: Severity,
) -> Warning {
    Warning {
        code: code.to_string(),
        message: message.to_string(),
        source_range: EngineRange {
            start: EnginePosition {
                line: start.0,
                column: start.1,
            },
            end: EnginePosition {
                line: end.0,
                column: end.1,
            },
        },
        severity,
    }
}

pub fn create_initialize_request(id: i64, root_uri: Option<&str>) -> Request {
    Request::build("initialize")
        .id(id)
        .params(json!({ "capabilities": {}, "rootUri": root_uri }))
        .finish()
}

pub fn create_initialized_notification() -> Request {
    Request::build("initialized").params(json!({})).finish()
}

pub fn create_did_open_notification(uri: &str, text: &str) -> Request {
    Request::build("textDocument/didOpen")
        .params(json!({
            "textDocument": {
                "uri": uri,
                "languageId": "html",
                "version": 1,
                "text": text
            }
        }))
        .finish()
}

pub fn create_did_change_notification(uri: &str, version: i32, text: &str) -> Request {
    Request::build("textDocument/didChange")
        .params(json!({
            "textDocument": { "uri": uri, "version": version },
            "contentChanges": [{ "text": text }]
        }))
        .finish()
}

fn position_params(uri: &str, line: u32, character: u32) -> serde_json::Value {
    json!({
        "textDocument": { "uri": uri },
        "position": { "line": line, "character": character }
    })
}

pub fn create_hover_request(id: i64, uri: &str, line: u32, character: u32) -> Request {
    Request::build("textDocument/hover")
        .id(id)
        .params(position_params(uri, line, character))
        .finish()
}

pub fn create_definition_request(id: i64, uri: &str, line: u32, character: u32) -> Request {
    Request::build("textDocument/definition")
        .id(id)
        .params(position_params(uri, line, character))
        .finish()
}

pub fn create_completion_request(id: i64, uri: &str, line: u32, character: u32) -> Request {
    Request::build("textDocument/completion")
        .id(id)
        .params(position_params(uri, line, character))
        .finish()
}

/// Drains everything the server pushes to the client into a channel so
/// tests can await specific notifications.
pub fn spawn_notification_collector(socket: ClientSocket) -> mpsc::UnboundedReceiver<Request> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut socket = socket;
        while let Some(request) = socket.next().await {
            if tx.send(request).is_err() {
                break;
            }
        }
    });

    rx
}

/// Waits for the next notification with the given method, skipping
/// unrelated traffic such as window/logMessage.
pub async fn wait_for_notification(
    rx: &mut mpsc::UnboundedReceiver<Request>,
    method: &str,
) -> Option<Request> {
    tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(request) = rx.recv().await {
            if request.method() == method {
                return Some(request);
            }
        }
        None
    })
    .await
    .ok()
    .flatten()
}

/// Unwraps a successful response into its result value.
pub fn response_result(response: Response) -> serde_json::Value {
    let (_, result) = response.into_parts();
    result.expect("request failed")
}
