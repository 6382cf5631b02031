//! `DocNode` over live DOM nodes.
//!
//! Classifies `web_sys::Node`s into the three supported shapes (text
//! runs, `<br>` line-break markers, block containers) and converts
//! between the DOM's UTF-16 code-unit offsets and the core's character
//! offsets.

use vellum_editor_core::{DocNode, NodeKind};

/// A handle to a live DOM node.
///
/// Equality is node identity, matching how the Selection API hands the
/// same underlying node back across reads.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserNode(web_sys::Node);

impl BrowserNode {
    pub fn new(node: web_sys::Node) -> Self {
        Self(node)
    }

    /// The underlying DOM node.
    pub fn raw(&self) -> &web_sys::Node {
        &self.0
    }

    pub fn into_raw(self) -> web_sys::Node {
        self.0
    }
}

impl From<web_sys::Node> for BrowserNode {
    fn from(node: web_sys::Node) -> Self {
        Self(node)
    }
}

impl From<web_sys::Element> for BrowserNode {
    fn from(element: web_sys::Element) -> Self {
        Self(element.into())
    }
}

impl DocNode for BrowserNode {
    fn kind(&self) -> NodeKind {
        if self.0.node_type() == web_sys::Node::TEXT_NODE {
            NodeKind::Text
        } else if self.0.node_name().eq_ignore_ascii_case("br") {
            NodeKind::LineBreak
        } else {
            NodeKind::Container
        }
    }

    fn text(&self) -> String {
        match self.kind() {
            NodeKind::Text => self.0.text_content().unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn children(&self) -> Vec<Self> {
        let list = self.0.child_nodes();
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(BrowserNode)
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_node().map(BrowserNode)
    }

    fn next_sibling(&self) -> Option<Self> {
        self.0.next_sibling().map(BrowserNode)
    }

    fn index_in_parent(&self) -> usize {
        let mut index = 0;
        let mut cursor = self.0.previous_sibling();
        while let Some(node) = cursor {
            index += 1;
            cursor = node.previous_sibling();
        }
        index
    }
}

/// Convert a UTF-16 code-unit offset (as the Selection API reports) to a
/// character offset into `text`. Clamps past-the-end input to the run's
/// character length.
pub fn utf16_to_char_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    let mut chars = 0;
    for ch in text.chars() {
        if units >= utf16_offset {
            break;
        }
        units += ch.len_utf16();
        chars += 1;
    }
    chars
}

/// Convert a character offset back to the UTF-16 code-unit offset the DOM
/// APIs expect.
pub fn char_to_utf16_offset(text: &str, char_offset: usize) -> usize {
    text.chars().take(char_offset).map(char::len_utf16).sum()
}
