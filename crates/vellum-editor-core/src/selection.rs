//! Selection normalization and line-scoped queries.
//!
//! The host's native selection arrives as raw anchor/focus positions in
//! whatever order the user dragged. This module converts both ends
//! independently through the offset mapper and normalizes them into a
//! `start <= end` pair, plus the line-bounds query paragraph-level
//! formatting needs.

use crate::offset::{canonical_text, offset_of};
use crate::tree::{DocNode, DomPoint};

/// A selection as the host reports it: anchor and focus, in drag order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSelection<N> {
    /// Where the selection started.
    pub anchor: DomPoint<N>,
    /// Where the caret is now.
    pub focus: DomPoint<N>,
}

impl<N> RawSelection<N> {
    pub fn new(anchor: DomPoint<N>, focus: DomPoint<N>) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed selection (caret only).
    pub fn collapsed(point: DomPoint<N>) -> Self
    where
        N: Clone,
    {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }
}

/// Normalized selection state: ordered offsets plus the covered text.
///
/// Recomputed on demand from the live native selection, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionInfo {
    pub start: usize,
    pub end: usize,
    pub selected_text: String,
    pub is_empty: bool,
}

impl Default for SelectionInfo {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            selected_text: String::new(),
            is_empty: true,
        }
    }
}

/// Normalize a raw host selection against the tree under `root`.
///
/// Anchor and focus convert independently; a right-to-left drag reports
/// them reversed and gets swapped here, so `start <= end` always holds.
/// With no native selection, the all-zero empty selection comes back.
pub fn selection_info<N: DocNode>(raw: Option<&RawSelection<N>>, root: &N) -> SelectionInfo {
    let Some(raw) = raw else {
        return SelectionInfo::default();
    };

    let anchor = offset_of(&raw.anchor.node, raw.anchor.offset, root);
    let focus = offset_of(&raw.focus.node, raw.focus.offset, root);
    let (start, end) = if anchor <= focus {
        (anchor, focus)
    } else {
        (focus, anchor)
    };

    let selected_text: String = canonical_text(root)
        .chars()
        .skip(start)
        .take(end - start)
        .collect();

    SelectionInfo {
        start,
        end,
        selected_text,
        is_empty: start == end,
    }
}

/// Whether the host selection spans any text.
pub fn has_selection<N: DocNode>(raw: Option<&RawSelection<N>>, root: &N) -> bool {
    !selection_info(raw, root).is_empty
}

/// Bounds and text of the line containing the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInfo {
    pub line_start: usize,
    pub line_end: usize,
    pub line_text: String,
}

/// Line bounds around `caret` in canonical text.
///
/// Scans backward to the previous newline (or document start) and forward
/// to the next (or document end). A caret on a blank line yields an empty
/// `line_text`.
pub fn line_info(text: &str, caret: usize) -> LineInfo {
    let chars: Vec<char> = text.chars().collect();
    let caret = caret.min(chars.len());

    let mut line_start = caret;
    while line_start > 0 && chars[line_start - 1] != '\n' {
        line_start -= 1;
    }
    let mut line_end = caret;
    while line_end < chars.len() && chars[line_end] != '\n' {
        line_end += 1;
    }

    LineInfo {
        line_start,
        line_end,
        line_text: chars[line_start..line_end].iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SimpleNode;

    fn hello_world() -> (SimpleNode, SimpleNode) {
        let root = SimpleNode::from_text("Hello World");
        let text = root.children()[0].children()[0].clone();
        (root, text)
    }

    #[test]
    fn test_selection_info_forward() {
        let (root, text) = hello_world();
        let raw = RawSelection::new(DomPoint::new(text.clone(), 6), DomPoint::new(text, 11));
        let info = selection_info(Some(&raw), &root);
        assert_eq!(info.start, 6);
        assert_eq!(info.end, 11);
        assert_eq!(info.selected_text, "World");
        assert!(!info.is_empty);
    }

    #[test]
    fn test_selection_info_reversed_drag() {
        let (root, text) = hello_world();
        // Anchor after focus: dragged right-to-left. Same result.
        let raw = RawSelection::new(DomPoint::new(text.clone(), 11), DomPoint::new(text, 6));
        let info = selection_info(Some(&raw), &root);
        assert_eq!(info.start, 6);
        assert_eq!(info.end, 11);
        assert_eq!(info.selected_text, "World");
        assert!(!info.is_empty);
    }

    #[test]
    fn test_selection_info_none() {
        let root = SimpleNode::from_text("abc");
        let info = selection_info(None, &root);
        assert_eq!(info, SelectionInfo::default());
        assert!(info.is_empty);
    }

    #[test]
    fn test_selection_spanning_lines() {
        let root = SimpleNode::from_text("ab\ncd");
        let first = root.children()[0].children()[0].clone();
        let second = root.children()[1].children()[0].clone();
        let raw = RawSelection::new(DomPoint::new(first, 1), DomPoint::new(second, 1));
        let info = selection_info(Some(&raw), &root);
        assert_eq!(info.start, 1);
        assert_eq!(info.end, 4);
        assert_eq!(info.selected_text, "b\nc");
    }

    #[test]
    fn test_selection_anchored_on_root() {
        // Select-all reports the root element with child indices.
        let root = SimpleNode::from_text("ab\ncd");
        let raw = RawSelection::new(DomPoint::new(root.clone(), 0), DomPoint::new(root.clone(), 1));
        let info = selection_info(Some(&raw), &root);
        assert_eq!(info.start, 0);
        assert_eq!(info.end, 3);
        assert_eq!(info.selected_text, "ab\n");
    }

    #[test]
    fn test_has_selection() {
        let (root, text) = hello_world();
        let collapsed = RawSelection::collapsed(DomPoint::new(text.clone(), 3));
        assert!(!has_selection(Some(&collapsed), &root));
        let spanning = RawSelection::new(DomPoint::new(text.clone(), 0), DomPoint::new(text, 5));
        assert!(has_selection(Some(&spanning), &root));
    }

    #[test]
    fn test_line_info_middle_line() {
        let info = line_info("ab\ncd\nef", 4);
        assert_eq!(info.line_start, 3);
        assert_eq!(info.line_end, 5);
        assert_eq!(info.line_text, "cd");
    }

    #[test]
    fn test_line_info_blank_line_is_empty() {
        // Caret on the blank line between "ab" and "cd".
        let info = line_info("ab\n\ncd", 3);
        assert_eq!(info.line_start, 3);
        assert_eq!(info.line_end, 3);
        assert_eq!(info.line_text, "");
    }

    #[test]
    fn test_line_info_document_edges() {
        let info = line_info("ab\ncd", 0);
        assert_eq!(info.line_start, 0);
        assert_eq!(info.line_text, "ab");

        let info = line_info("ab\ncd", 5);
        assert_eq!(info.line_end, 5);
        assert_eq!(info.line_text, "cd");
    }

    #[test]
    fn test_line_info_caret_past_end_clamps() {
        let info = line_info("ab", 10);
        assert_eq!(info.line_start, 0);
        assert_eq!(info.line_end, 2);
        assert_eq!(info.line_text, "ab");
    }
}
