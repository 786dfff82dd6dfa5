//! Analyzer session lifecycle
//!
//! The engine can only be queried once `initialize` has delivered a
//! workspace root. Instead of a nullable handle, the lifecycle is a
//! two-state enum: the `Uninitialized` arm exposes no query surface at all,
//! so a missed readiness check cannot compile.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::Url;

use crate::analyzer::engine::AnalysisEngine;
use crate::workspace;

pub enum AnalyzerSession {
    Uninitialized,
    Ready(AnalyzerBridge),
}

impl AnalyzerSession {
    /// The bridge, once `initialize` has built it.
    pub fn ready(&self) -> Option<&AnalyzerBridge> {
        match self {
            AnalyzerSession::Ready(bridge) => Some(bridge),
            AnalyzerSession::Uninitialized => None,
        }
    }
}

/// The engine bound to a workspace root.
///
/// Constructed exactly once per process; the engine accumulates incremental
/// state keyed by local path, so rebuilding the bridge would mean re-feeding
/// every open document.
pub struct AnalyzerBridge {
    engine: Arc<dyn AnalysisEngine>,
    root: PathBuf,
    // The LSP runtime runs handlers concurrently. Engine traffic is
    // serialized per local path so a query never observes a document older
    // than the last change the editor sent for it.
    path_locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl AnalyzerBridge {
    pub fn new(engine: Arc<dyn AnalysisEngine>, root: PathBuf) -> Self {
        Self {
            engine,
            root,
            path_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &Arc<dyn AnalysisEngine> {
        &self.engine
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Workspace-relative path for `uri`; `None` when the document is not a
    /// workspace file.
    pub fn local_path(&self, uri: &Url) -> Option<PathBuf> {
        workspace::local_path(uri, &self.root)
    }

    /// File URI for an engine-reported workspace-relative path.
    pub fn uri_for(&self, local: &Path) -> Option<Url> {
        workspace::to_uri(local, &self.root)
    }

    /// The ordering lock for one document. Hold it across a
    /// `file_changed` + query sequence, or across a single query, to get
    /// last-write-wins per document; unrelated documents stay concurrent.
    pub async fn path_lock(&self, local: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.path_locks.lock().await;
        locks.entry(local.to_path_buf()).or_default().clone()
    }
}
