//! Document tree abstraction.
//!
//! The editor never owns the document tree - the browser (or a test
//! fixture) does. `DocNode` is the seam all offset math is written
//! against: a cloneable handle into a host-owned tree whose nodes are
//! either text runs, line-break markers, or line containers.
//!
//! `SimpleNode` is the in-memory reference implementation, used by the
//! test suite and by hosts that have no real DOM.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Classification of a document-tree node.
///
/// Any node outside these three shapes is an external precondition
/// violation - hosts are expected to normalize the tree before the core
/// operates on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A run of characters.
    Text,
    /// A blank-line placeholder (`<br>` in the browser). Zero width.
    LineBreak,
    /// A block-level line container. Its trailing boundary is one newline
    /// in canonical text when it has a following sibling.
    Container,
}

/// A handle into the host-owned document tree.
///
/// Handles are cheap to clone (reference-counted pointer or JS object
/// reference) and compare by node identity, not content.
pub trait DocNode: Clone + PartialEq + Sized {
    /// What kind of node this handle points at.
    fn kind(&self) -> NodeKind;

    /// The character run of a text node. Empty for elements.
    fn text(&self) -> String;

    /// Child nodes in document order.
    fn children(&self) -> Vec<Self>;

    /// Parent node, if any.
    fn parent(&self) -> Option<Self>;

    /// Character (Unicode scalar) length of a text node's run.
    fn text_len(&self) -> usize {
        self.text().chars().count()
    }

    /// The next sibling in document order.
    fn next_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let siblings = parent.children();
        let index = siblings.iter().position(|s| s == self)?;
        siblings.into_iter().nth(index + 1)
    }

    /// This node's index among its parent's children. 0 for a detached node.
    fn index_in_parent(&self) -> usize {
        self.parent()
            .and_then(|p| p.children().iter().position(|s| s == self))
            .unwrap_or(0)
    }
}

/// A resolved position in the document tree: a node plus an in-node offset.
///
/// For text nodes the offset is a character offset into the run; for
/// elements it is a child index, matching how browsers report
/// element-anchored selections.
#[derive(Debug, Clone, PartialEq)]
pub struct DomPoint<N> {
    pub node: N,
    pub offset: usize,
}

impl<N> DomPoint<N> {
    pub fn new(node: N, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// In-memory document tree implementing [`DocNode`].
///
/// Nodes are `Rc`-backed so handles stay cheap and identity-comparable,
/// mirroring how DOM node references behave in the browser.
#[derive(Debug, Clone)]
pub struct SimpleNode(Rc<RefCell<SimpleInner>>);

#[derive(Debug)]
struct SimpleInner {
    kind: NodeKind,
    text: String,
    children: Vec<SimpleNode>,
    parent: Weak<RefCell<SimpleInner>>,
}

impl PartialEq for SimpleNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SimpleNode {}

impl SimpleNode {
    fn with_kind(kind: NodeKind, text: String) -> Self {
        SimpleNode(Rc::new(RefCell::new(SimpleInner {
            kind,
            text,
            children: Vec::new(),
            parent: Weak::new(),
        })))
    }

    /// Create an empty document root.
    pub fn root() -> Self {
        Self::with_kind(NodeKind::Container, String::new())
    }

    /// Create an empty line container.
    pub fn container() -> Self {
        Self::with_kind(NodeKind::Container, String::new())
    }

    /// Create a text node holding the given run.
    pub fn text_node(text: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Text, text.into())
    }

    /// Create a line-break marker.
    pub fn line_break() -> Self {
        Self::with_kind(NodeKind::LineBreak, String::new())
    }

    /// Append a child, reparenting it under this node.
    pub fn append(&self, child: SimpleNode) {
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child);
    }

    /// Build a document root holding the canonical tree shape for `text`.
    pub fn from_text(text: &str) -> Self {
        let root = Self::root();
        root.rebuild_from_text(text);
        root
    }

    /// Replace this node's children with the canonical shape for `text`:
    /// one container per line, blank lines holding a single line-break
    /// marker. An empty string leaves the node childless.
    pub fn rebuild_from_text(&self, text: &str) {
        self.0.borrow_mut().children.clear();
        if text.is_empty() {
            return;
        }
        for line in text.split('\n') {
            let container = SimpleNode::container();
            if line.is_empty() {
                container.append(SimpleNode::line_break());
            } else {
                container.append(SimpleNode::text_node(line));
            }
            self.append(container);
        }
    }
}

impl DocNode for SimpleNode {
    fn kind(&self) -> NodeKind {
        self.0.borrow().kind
    }

    fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    fn parent(&self) -> Option<Self> {
        self.0.borrow().parent.upgrade().map(SimpleNode)
    }
}
