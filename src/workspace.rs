//! Workspace path resolution
//!
//! The editor identifies documents by file URIs while the engine identifies
//! them by workspace-relative paths. Both directions of that mapping live
//! here; nothing in this module holds state beyond the root passed in.

use std::path::{Path, PathBuf};

use tower_lsp::lsp_types::Url;

/// Resolves a document URI to a workspace-relative path.
///
/// Returns `None` for non-file URIs and for files outside the workspace
/// root. Callers treat that as "not a workspace file" and skip the document;
/// untitled buffers and files from other workspaces are a normal occurrence.
pub fn local_path(uri: &Url, root: &Path) -> Option<PathBuf> {
    if uri.scheme() != "file" {
        return None;
    }

    let absolute = uri.to_file_path().ok()?;
    absolute.strip_prefix(root).ok().map(Path::to_path_buf)
}

/// Builds the file URI for a workspace-relative path.
///
/// Inverse of [`local_path`] for paths inside the root.
pub fn to_uri(local: &Path, root: &Path) -> Option<Url> {
    Url::from_file_path(root.join(local)).ok()
}
