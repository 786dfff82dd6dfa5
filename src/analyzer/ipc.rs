//! Child-process engine transport
//!
//! Speaks newline-delimited JSON over the engine's stdio: every request
//! carries an id, every response echoes it back with either `result` or
//! `error`. A reader task routes responses to pending oneshot channels, so
//! a slow answer for one document never blocks requests for another.

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{Mutex, oneshot};
use tracing::{debug, error, info, warn};

use crate::analyzer::engine::AnalysisEngine;
use crate::analyzer::error::EngineError;
use crate::analyzer::types::{CompletionResult, DefinitionLocation, EnginePosition, Warning};

#[derive(Serialize)]
struct EngineRequest<'a> {
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct EngineResponse {
    id: u64,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, EngineError>>>>>;

/// An [`AnalysisEngine`] reached over a spawned engine process.
pub struct IpcEngine {
    stdin: Mutex<ChildStdin>,
    pending: PendingMap,
    next_id: AtomicU64,
    // Held so the engine process is killed when the bridge goes away.
    _child: Child,
}

impl IpcEngine {
    /// Spawns the engine command and starts the response router.
    pub fn spawn(command: &str, args: &[String]) -> Result<Self, EngineError> {
        info!("Spawning analysis engine: {} {:?}", command, args);

        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::Transport("engine stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::Transport("engine stdout unavailable".to_string()))?;

        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        tokio::spawn(route_responses(BufReader::new(stdout), Arc::clone(&pending)));

        Ok(Self {
            stdin: Mutex::new(stdin),
            pending,
            next_id: AtomicU64::new(1),
            _child: child,
        })
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, EngineError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        let mut line = serde_json::to_vec(&EngineRequest { id, method, params })?;
        line.push(b'\n');

        {
            let mut stdin = self.stdin.lock().await;
            stdin.write_all(&line).await?;
            stdin.flush().await?;
        }

        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(EngineError::Transport(
                "engine exited before responding".to_string(),
            )),
        }
    }
}

async fn route_responses(mut stdout: BufReader<ChildStdout>, pending: PendingMap) {
    let mut line = String::new();

    loop {
        line.clear();
        match stdout.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("Engine stdout read failed: {}", e);
                break;
            }
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response: EngineResponse = match serde_json::from_str(trimmed) {
            Ok(response) => response,
            Err(e) => {
                warn!("Discarding malformed engine line: {}", e);
                continue;
            }
        };

        let Some(tx) = pending.lock().await.remove(&response.id) else {
            debug!("Engine response for unknown request id {}", response.id);
            continue;
        };

        let outcome = match (response.result, response.error) {
            (_, Some(message)) => Err(EngineError::Request(message)),
            (Some(value), None) => Ok(value),
            (None, None) => Ok(Value::Null),
        };
        let _ = tx.send(outcome);
    }

    // Engine is gone; fail whatever is still waiting on it.
    warn!("Engine process closed its stdout");
    let mut pending = pending.lock().await;
    for (_, tx) in pending.drain() {
        let _ = tx.send(Err(EngineError::Transport("engine exited".to_string())));
    }
}

#[async_trait::async_trait]
impl AnalysisEngine for IpcEngine {
    async fn file_changed(&self, path: &Path, text: &str) -> Result<(), EngineError> {
        self.request("fileChanged", json!({ "path": path, "text": text }))
            .await?;
        Ok(())
    }

    async fn warnings_for_file(&self, path: &Path) -> Result<Vec<Warning>, EngineError> {
        let value = self
            .request("getWarningsForFile", json!({ "path": path }))
            .await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(value)?)
    }

    async fn documentation_at(
        &self,
        path: &Path,
        position: EnginePosition,
    ) -> Result<Option<String>, EngineError> {
        let value = self
            .request(
                "getDocumentationAtPosition",
                json!({ "path": path, "position": position }),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn definition_at(
        &self,
        path: &Path,
        position: EnginePosition,
    ) -> Result<Option<DefinitionLocation>, EngineError> {
        let value = self
            .request(
                "getDefinitionForFeatureAtPosition",
                json!({ "path": path, "position": position }),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn completions_at(
        &self,
        path: &Path,
        position: EnginePosition,
    ) -> Result<Option<CompletionResult>, EngineError> {
        let value = self
            .request(
                "getTypeaheadCompletionsAtPosition",
                json!({ "path": path, "position": position }),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}
