//! Snapshot-based undo/redo transaction log.
//!
//! Each transaction stores the entire serialized document rather than a
//! patch: memory traded for trivially correct undo/redo, bounded by the
//! size cap. The external contract (push/undo/redo/can_undo/can_redo)
//! would survive an upgrade to incremental diffs.

use smol_str::{SmolStr, format_smolstr};
use web_time::{SystemTime, UNIX_EPOCH};

/// Default bound on the undo window.
pub const DEFAULT_MAX_TRANSACTIONS: usize = 50;

/// One immutable, labeled, timestamped full-document snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTransaction {
    /// Log-unique id (`tx-{n}` from a monotonic counter).
    pub id: SmolStr,
    /// Human-readable description of the edit.
    pub label: SmolStr,
    /// Full serialized document after the edit.
    pub content: String,
    /// Unix epoch milliseconds at creation.
    pub timestamp: u64,
}

/// Append-only, truncating transaction log with undo/redo navigation.
///
/// `current = None` is the pristine state, before any recorded
/// transaction. Pushing while not at the tail discards everything after
/// the current entry - redo history is linear and any edit made after an
/// undo invalidates it.
#[derive(Debug, Clone)]
pub struct TransactionLog {
    transactions: Vec<EditTransaction>,
    current: Option<usize>,
    max_transactions: usize,
    next_id: usize,
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TRANSACTIONS)
    }
}

impl TransactionLog {
    /// Create a log bounded to `max_transactions` entries (minimum 1).
    pub fn new(max_transactions: usize) -> Self {
        Self {
            transactions: Vec::new(),
            current: None,
            max_transactions: max_transactions.max(1),
            next_id: 0,
        }
    }

    /// Record a new transaction at the current position.
    ///
    /// Truncates the redo branch, appends, and evicts the oldest entry
    /// once the cap is exceeded.
    pub fn push(&mut self, content: impl Into<String>, label: impl Into<SmolStr>) {
        let keep = self.current.map(|i| i + 1).unwrap_or(0);
        self.transactions.truncate(keep);

        self.transactions.push(EditTransaction {
            id: format_smolstr!("tx-{}", self.next_id),
            label: label.into(),
            content: content.into(),
            timestamp: now_millis(),
        });
        self.next_id += 1;
        self.current = Some(self.transactions.len() - 1);

        while self.transactions.len() > self.max_transactions {
            self.transactions.remove(0);
            self.current = self.current.and_then(|i| i.checked_sub(1));
        }
    }

    /// Step back one transaction.
    ///
    /// Returns the snapshot to restore: the previous entry's content, or
    /// `""` when stepping back to the pristine state. `None` when there
    /// is nothing to undo.
    pub fn undo(&mut self) -> Option<&str> {
        let index = self.current?;
        if index == 0 {
            self.current = None;
            Some("")
        } else {
            self.current = Some(index - 1);
            Some(self.transactions[index - 1].content.as_str())
        }
    }

    /// Step forward one transaction. `None` when already at the tail.
    pub fn redo(&mut self) -> Option<&str> {
        let next = self.current.map(|i| i + 1).unwrap_or(0);
        if next >= self.transactions.len() {
            return None;
        }
        self.current = Some(next);
        Some(self.transactions[next].content.as_str())
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.current.is_some()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.current.map(|i| i + 1).unwrap_or(0) < self.transactions.len()
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.current = None;
    }

    /// Recorded transactions, oldest first.
    pub fn transactions(&self) -> &[EditTransaction] {
        &self.transactions
    }

    /// Index of the current transaction; `None` in the pristine state.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
