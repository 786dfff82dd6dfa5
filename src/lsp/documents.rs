//! Open-document store
//!
//! Full-document sync only: every change notification carries the complete
//! new text and the store overwrites. No deltas, no merging.

use std::collections::HashMap;
use std::sync::Mutex;

use tower_lsp::lsp_types::Url;

#[derive(Default)]
pub struct DocumentStore {
    documents: Mutex<HashMap<Url, String>>,
}

impl DocumentStore {
    /// Records the full current text for a document, replacing any previous
    /// content wholesale.
    pub fn open_or_change(&self, uri: Url, text: String) {
        self.documents.lock().unwrap().insert(uri, text);
    }

    pub fn close(&self, uri: &Url) {
        self.documents.lock().unwrap().remove(uri);
    }

    pub fn get(&self, uri: &Url) -> Option<String> {
        self.documents.lock().unwrap().get(uri).cloned()
    }

    /// Snapshot of every open document, used to feed the engine when the
    /// session becomes ready.
    pub fn all(&self) -> Vec<(Url, String)> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .map(|(uri, text)| (uri.clone(), text.clone()))
            .collect()
    }
}
