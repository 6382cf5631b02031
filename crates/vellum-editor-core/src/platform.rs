//! Platform abstraction for selection and mutation hosts.
//!
//! The core never owns the document - a host does. These traits define
//! the seam between the offset/selection/history logic and a concrete
//! host (browser DOM, in-memory tree), so the same algorithms run against
//! either. `SimpleHost` is the in-memory reference implementation.

use std::cell::RefCell;

use crate::offset::{canonical_text, offset_of};
use crate::selection::RawSelection;
use crate::tree::{DocNode, DomPoint, SimpleNode};

/// Error type for platform operations.
#[derive(Debug, Clone)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Read and write the host's native selection.
///
/// One implementation per host. The core only relies on the documented
/// contract (node/offset pairs in document order), never on any single
/// host's quirks.
pub trait SelectionHost {
    type Node: DocNode;

    /// The editable root. Fails when the host surface is gone (e.g. the
    /// editor element was removed from the page).
    fn root(&self) -> Result<Self::Node, PlatformError>;

    /// The current native selection, or `None` when there is none (or it
    /// lies outside the editable root).
    fn read_selection(&self) -> Option<RawSelection<Self::Node>>;

    /// Replace the native selection with the given anchor/focus pair.
    fn apply_selection(
        &self,
        anchor: DomPoint<Self::Node>,
        focus: DomPoint<Self::Node>,
    ) -> Result<(), PlatformError>;
}

/// Mutate the host document.
pub trait EditHost: SelectionHost {
    /// Delete the content spanning `[start, end)` and insert `text` at
    /// that point. Takes effect synchronously; any previously computed
    /// offsets are stale afterwards.
    fn splice(
        &self,
        start: DomPoint<Self::Node>,
        end: DomPoint<Self::Node>,
        text: &str,
    ) -> Result<(), PlatformError>;

    /// Serialized form of the document, as stored in history transactions.
    fn serialize(&self) -> Result<String, PlatformError>;
}

/// In-memory host over a [`SimpleNode`] tree.
///
/// Selection state lives in the host itself. `splice` rewrites the
/// canonical text and rebuilds the tree shape in place - a browser host
/// edits the live DOM instead, but the observable contract is the same.
pub struct SimpleHost {
    root: SimpleNode,
    selection: RefCell<Option<RawSelection<SimpleNode>>>,
}

impl SimpleHost {
    pub fn new(root: SimpleNode) -> Self {
        Self {
            root,
            selection: RefCell::new(None),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(SimpleNode::from_text(text))
    }
}

impl SelectionHost for SimpleHost {
    type Node = SimpleNode;

    fn root(&self) -> Result<SimpleNode, PlatformError> {
        Ok(self.root.clone())
    }

    fn read_selection(&self) -> Option<RawSelection<SimpleNode>> {
        self.selection.borrow().clone()
    }

    fn apply_selection(
        &self,
        anchor: DomPoint<SimpleNode>,
        focus: DomPoint<SimpleNode>,
    ) -> Result<(), PlatformError> {
        *self.selection.borrow_mut() = Some(RawSelection::new(anchor, focus));
        Ok(())
    }
}

impl EditHost for SimpleHost {
    fn splice(
        &self,
        start: DomPoint<SimpleNode>,
        end: DomPoint<SimpleNode>,
        text: &str,
    ) -> Result<(), PlatformError> {
        let from = offset_of(&start.node, start.offset, &self.root);
        let to = offset_of(&end.node, end.offset, &self.root);
        let (from, to) = if from <= to { (from, to) } else { (to, from) };

        let current: Vec<char> = canonical_text(&self.root).chars().collect();
        if to > current.len() {
            return Err(format!("splice range {from}..{to} outside document").into());
        }

        let mut next: String = current[..from].iter().collect();
        next.push_str(text);
        next.extend(current[to..].iter());
        self.root.rebuild_from_text(&next);

        // Node handles in the stored selection are dangling after the
        // rebuild; drop them rather than resolve against stale nodes.
        *self.selection.borrow_mut() = None;
        Ok(())
    }

    fn serialize(&self) -> Result<String, PlatformError> {
        Ok(canonical_text(&self.root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offset::point_at;

    #[test]
    fn test_simple_host_splice_within_run() {
        let host = SimpleHost::from_text("Hello World");
        let root = host.root().unwrap();
        let start = point_at(6, &root).unwrap();
        let end = point_at(11, &root).unwrap();
        host.splice(start, end, "Rust").unwrap();
        assert_eq!(host.serialize().unwrap(), "Hello Rust");
    }

    #[test]
    fn test_simple_host_splice_across_lines() {
        let host = SimpleHost::from_text("ab\ncd");
        let root = host.root().unwrap();
        let start = point_at(1, &root).unwrap();
        let end = point_at(4, &root).unwrap();
        host.splice(start, end, "").unwrap();
        assert_eq!(host.serialize().unwrap(), "ad");
        // Single line left in the tree after the rebuild.
        assert_eq!(host.root().unwrap().children().len(), 1);
    }

    #[test]
    fn test_simple_host_splice_inserting_newline() {
        let host = SimpleHost::from_text("ab");
        let root = host.root().unwrap();
        let point = point_at(1, &root).unwrap();
        host.splice(point.clone(), point, "\n").unwrap();
        assert_eq!(host.serialize().unwrap(), "a\nb");
        assert_eq!(host.root().unwrap().children().len(), 2);
    }

    #[test]
    fn test_simple_host_selection_round_trip() {
        let host = SimpleHost::from_text("abc");
        assert!(host.read_selection().is_none());
        let root = host.root().unwrap();
        let point = point_at(2, &root).unwrap();
        host.apply_selection(point.clone(), point).unwrap();
        let raw = host.read_selection().unwrap();
        assert_eq!(offset_of(&raw.anchor.node, raw.anchor.offset, &root), 2);
    }
}
