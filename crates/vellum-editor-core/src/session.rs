//! Editor session: one host, one transaction log, one writer.
//!
//! The session is the object the UI layer holds. It is explicitly
//! constructed and explicitly owned - no module-level globals - and
//! notifies registered observers whenever the committed content changes
//! (commit, undo, redo). Observers are plain callbacks; a reactive UI
//! wires its own state container to them.

use smol_str::SmolStr;

use crate::edit::{self, EditError};
use crate::history::{DEFAULT_MAX_TRANSACTIONS, TransactionLog};
use crate::offset::canonical_text;
use crate::platform::{EditHost, PlatformError};
use crate::selection::{self, LineInfo, SelectionInfo};

/// An editor session over one host document.
pub struct EditorSession<H: EditHost> {
    host: H,
    history: TransactionLog,
    observers: Vec<Box<dyn FnMut(&str)>>,
}

impl<H: EditHost> EditorSession<H> {
    pub fn new(host: H) -> Self {
        Self::with_history_cap(host, DEFAULT_MAX_TRANSACTIONS)
    }

    pub fn with_history_cap(host: H, max_transactions: usize) -> Self {
        Self {
            host,
            history: TransactionLog::new(max_transactions),
            observers: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn history(&self) -> &TransactionLog {
        &self.history
    }

    /// Register a callback fired with the new content on every commit,
    /// undo, and redo.
    pub fn subscribe(&mut self, observer: impl FnMut(&str) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, content: &str) {
        for observer in &mut self.observers {
            observer(content);
        }
    }

    // === Selection queries ===

    /// Normalized selection state, recomputed from the live native
    /// selection. The all-zero empty selection when the host surface is
    /// unreachable.
    pub fn selection_info(&self) -> SelectionInfo {
        let root = match self.host.root() {
            Ok(root) => root,
            Err(err) => {
                tracing::warn!(%err, "selection_info: host root unavailable");
                return SelectionInfo::default();
            }
        };
        selection::selection_info(self.host.read_selection().as_ref(), &root)
    }

    /// Whether the selection spans any text.
    pub fn has_selection(&self) -> bool {
        !self.selection_info().is_empty
    }

    /// Bounds and text of the line holding the caret.
    pub fn current_line_info(&self) -> LineInfo {
        let root = match self.host.root() {
            Ok(root) => root,
            Err(err) => {
                tracing::warn!(%err, "current_line_info: host root unavailable");
                return selection::line_info("", 0);
            }
        };
        let caret = selection::selection_info(self.host.read_selection().as_ref(), &root).start;
        selection::line_info(&canonical_text(&root), caret)
    }

    // === Mutation primitives ===

    pub fn replace_range(&self, start: usize, end: usize, new_text: &str) -> Result<(), EditError> {
        edit::replace_range(&self.host, start, end, new_text)
    }

    pub fn insert_text(&self, text: &str) -> Result<(), EditError> {
        edit::insert_text(&self.host, text)
    }

    pub fn set_cursor(&self, offset: usize) -> Result<(), EditError> {
        edit::set_cursor(&self.host, offset)
    }

    pub fn select_range(&self, start: usize, end: usize) -> Result<(), EditError> {
        edit::select_range(&self.host, start, end)
    }

    // === History ===

    /// Record an externally produced snapshot as a transaction.
    pub fn push_transaction(&mut self, content: impl Into<String>, label: impl Into<SmolStr>) {
        let content = content.into();
        let label = label.into();
        tracing::trace!(%label, len = content.len(), "push_transaction");
        self.history.push(content.clone(), label);
        self.notify(&content);
    }

    /// Serialize the host document and record it as a transaction.
    pub fn commit(&mut self, label: impl Into<SmolStr>) -> Result<(), PlatformError> {
        let content = self.host.serialize()?;
        self.push_transaction(content, label);
        Ok(())
    }

    /// Step back one transaction, returning the snapshot the caller must
    /// write back into the document. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<String> {
        let content = self.history.undo()?.to_string();
        tracing::trace!(len = content.len(), "undo");
        self.notify(&content);
        Some(content)
    }

    /// Step forward one transaction. `None` when already at the tail.
    pub fn redo(&mut self) -> Option<String> {
        let content = self.history.redo()?.to_string();
        tracing::trace!(len = content.len(), "redo");
        self.notify(&content);
        Some(content)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
