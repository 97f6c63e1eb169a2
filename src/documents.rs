//! Open document contents kept in sync with the client

use crate::sfc::LineIndex;
use dashmap::DashMap;
use tower_lsp_server::ls_types::{TextDocumentContentChangeEvent, Uri};

/// Text of every open document, keyed by URI
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Uri, String>,
}

impl DocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, uri: Uri, text: String) {
        self.documents.insert(uri, text);
    }

    pub fn close(&self, uri: &Uri) {
        self.documents.remove(uri);
    }

    /// Snapshot of a document's current text
    #[must_use]
    pub fn get(&self, uri: &Uri) -> Option<String> {
        self.documents.get(uri).map(|entry| entry.value().clone())
    }

    /// Apply changes in order and return the resulting text
    ///
    /// Returns `None` for documents that were never opened.
    pub fn apply_changes(
        &self,
        uri: &Uri,
        changes: &[TextDocumentContentChangeEvent],
    ) -> Option<String> {
        let mut entry = self.documents.get_mut(uri)?;

        for change in changes {
            apply_change(entry.value_mut(), change);
        }

        Some(entry.value().clone())
    }
}

/// Apply one content change; changes without a range replace the whole text
pub fn apply_change(text: &mut String, change: &TextDocumentContentChangeEvent) {
    let Some(range) = change.range else {
        text.clone_from(&change.text);
        return;
    };

    let index = LineIndex::new(text.as_str());
    let start = index.offset(range.start.line as usize, range.start.character as usize);
    let end = index
        .offset(range.end.line as usize, range.end.character as usize)
        .max(start);

    text.replace_range(start..end, &change.text);
}
