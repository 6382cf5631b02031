//! Offset mapper: absolute character offsets <-> tree positions.
//!
//! Every function here consumes the same traversal rule set:
//!
//! 1. text nodes contribute their character length;
//! 2. line-break markers contribute zero characters;
//! 3. a line container contributes one newline after its subtree, only if
//!    it is not the traversal root and has a following sibling.
//!
//! The rules live in a single walker ([`walk`]) precisely so the mapping
//! stays bijective: the browser's own `innerText` extraction counts a lone
//! `<br>` inside a container as two separators where this model wants one,
//! which desynchronizes caret math on blank lines.

use crate::tree::{DocNode, DomPoint, NodeKind};

/// One step of the shared traversal.
enum Visit<N> {
    /// Pre-order arrival at a node, before any of its content.
    Enter(N),
    /// A text node's character run.
    Text(N),
    /// A line-break marker (zero width).
    Marker(N),
    /// End of a container's content, before its trailing boundary.
    Leave(N),
    /// The trailing boundary of a non-root container with a following
    /// sibling: exactly one newline.
    Boundary(N),
}

/// Depth-first pre-order walk emitting [`Visit`] steps.
///
/// Returning `Some` from the visitor stops the walk and propagates the
/// value out.
fn walk<N: DocNode, B>(
    node: &N,
    root: &N,
    f: &mut impl FnMut(Visit<N>) -> Option<B>,
) -> Option<B> {
    if let Some(found) = f(Visit::Enter(node.clone())) {
        return Some(found);
    }
    match node.kind() {
        NodeKind::Text => f(Visit::Text(node.clone())),
        NodeKind::LineBreak => f(Visit::Marker(node.clone())),
        NodeKind::Container => {
            for child in node.children() {
                if let Some(found) = walk(&child, root, f) {
                    return Some(found);
                }
            }
            if let Some(found) = f(Visit::Leave(node.clone())) {
                return Some(found);
            }
            if node != root && node.next_sibling().is_some() {
                f(Visit::Boundary(node.clone()))
            } else {
                None
            }
        }
    }
}

/// Linear text of the document under `root`.
///
/// This is the canonical string every offset refers into. It is distinct
/// from the host's own logical-text extraction, which double-counts blank
/// lines.
pub fn canonical_text<N: DocNode>(root: &N) -> String {
    let mut out = String::new();
    let _: Option<()> = walk(root, root, &mut |visit| {
        match visit {
            Visit::Text(n) => out.push_str(&n.text()),
            Visit::Boundary(_) => out.push('\n'),
            _ => {}
        }
        None
    });
    out
}

/// Absolute character offset of a tree position.
///
/// For a text node, `inner_offset` is a character offset into its run. For
/// an element, `inner_offset` is a child index (the way browsers report
/// element-anchored selections) and resolves to the canonical length of
/// the preceding children. A node that is not a descendant of `root` is
/// unspecified input; the accumulated document length comes back.
pub fn offset_of<N: DocNode>(node: &N, inner_offset: usize, root: &N) -> usize {
    // Reduce element targets to (node-to-enter, chars-to-add) up front so
    // the walk itself only ever looks for one node.
    let (target, at_end, inner) = match node.kind() {
        NodeKind::Text => (node.clone(), false, inner_offset),
        NodeKind::LineBreak => (node.clone(), false, 0),
        NodeKind::Container => match node.children().into_iter().nth(inner_offset) {
            Some(child) => (child, false, 0),
            None => (node.clone(), true, 0),
        },
    };

    let mut acc = 0usize;
    let found = walk(root, root, &mut |visit| match visit {
        Visit::Enter(n) => (!at_end && n == target).then(|| acc + inner),
        Visit::Leave(n) => (at_end && n == target).then(|| acc),
        Visit::Text(n) => {
            acc += n.text_len();
            None
        }
        Visit::Boundary(_) => {
            acc += 1;
            None
        }
        Visit::Marker(_) => None,
    });
    found.unwrap_or(acc)
}

/// Resolve an absolute offset back to a tree position.
///
/// Offsets landing in a text node resolve into that node; an offset at the
/// exact end of a text run resolves to the run's end rather than the start
/// of the following line. Blank lines resolve to the marker's parent plus
/// the marker's child index, since a line-break marker cannot itself host
/// a caret. Returns `None` when `offset` exceeds the document length; an
/// entirely empty document resolves offset 0 to `(root, 0)`.
pub fn point_at<N: DocNode>(offset: usize, root: &N) -> Option<DomPoint<N>> {
    let mut acc = 0usize;
    let found = walk(root, root, &mut |visit| match visit {
        Visit::Text(n) => {
            let len = n.text_len();
            if acc + len >= offset {
                return Some(DomPoint::new(n, offset - acc));
            }
            acc += len;
            None
        }
        Visit::Marker(n) => {
            if acc == offset {
                let index = n.index_in_parent();
                n.parent().map(|parent| DomPoint::new(parent, index))
            } else {
                None
            }
        }
        Visit::Leave(n) => {
            // A childless container is still a caret slot (a structurally
            // blank line with no marker yet).
            if acc == offset && n != *root && n.children().is_empty() {
                Some(DomPoint::new(n, 0))
            } else {
                None
            }
        }
        Visit::Boundary(_) => {
            acc += 1;
            None
        }
        Visit::Enter(_) => None,
    });

    if found.is_some() {
        return found;
    }
    if offset == 0 && acc == 0 {
        return Some(DomPoint::new(root.clone(), 0));
    }
    tracing::trace!(offset, doc_len = acc, "point_at: offset beyond document end");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SimpleNode;

    #[test]
    fn test_canonical_text_blank_line_is_one_separator() {
        // <div>a</div><div><br></div> - the browser's innerText reports
        // "a\n\n" here; the canonical model wants "a\n".
        let root = SimpleNode::root();
        let first = SimpleNode::container();
        first.append(SimpleNode::text_node("a"));
        let blank = SimpleNode::container();
        blank.append(SimpleNode::line_break());
        root.append(first);
        root.append(blank);

        assert_eq!(canonical_text(&root), "a\n");
    }

    #[test]
    fn test_canonical_text_round_trips_from_text() {
        for text in ["", "Hello World", "a\nb", "a\n\nb", "\nx", "x\n"] {
            let root = SimpleNode::from_text(text);
            assert_eq!(canonical_text(&root), text, "for {text:?}");
        }
    }

    #[test]
    fn test_no_trailing_separator() {
        let root = SimpleNode::from_text("a\nb");
        // The last container has no following sibling, so no trailing "\n".
        assert_eq!(canonical_text(&root), "a\nb");
    }

    #[test]
    fn test_offset_of_text_node() {
        let root = SimpleNode::from_text("ab\ncd");
        let second_line_text = root.children()[1].children()[0].clone();
        // "ab" (2) + separator (1) = 3 before "cd".
        assert_eq!(offset_of(&second_line_text, 0, &root), 3);
        assert_eq!(offset_of(&second_line_text, 2, &root), 5);
    }

    #[test]
    fn test_offset_of_element_child_index() {
        let root = SimpleNode::from_text("ab\ncd");
        // Child index 1 of the root is the start of the second line.
        assert_eq!(offset_of(&root, 0, &root), 0);
        assert_eq!(offset_of(&root, 1, &root), 3);
        // Index past the last child is the end of the document.
        assert_eq!(offset_of(&root, 2, &root), 5);
    }

    #[test]
    fn test_offset_of_marker() {
        let root = SimpleNode::from_text("a\n\nb");
        let marker = root.children()[1].children()[0].clone();
        assert_eq!(offset_of(&marker, 0, &root), 2);
    }

    #[test]
    fn test_point_at_text_positions() {
        let root = SimpleNode::from_text("ab\ncd");
        let first_text = root.children()[0].children()[0].clone();
        let second_text = root.children()[1].children()[0].clone();

        assert_eq!(point_at(0, &root), Some(DomPoint::new(first_text.clone(), 0)));
        // End of a run resolves into the run, not past the separator.
        assert_eq!(point_at(2, &root), Some(DomPoint::new(first_text, 2)));
        assert_eq!(point_at(3, &root), Some(DomPoint::new(second_text.clone(), 0)));
        assert_eq!(point_at(5, &root), Some(DomPoint::new(second_text, 2)));
    }

    #[test]
    fn test_point_at_blank_line_resolves_to_marker_parent() {
        let root = SimpleNode::from_text("a\n\nb");
        let blank_container = root.children()[1].clone();
        assert_eq!(point_at(2, &root), Some(DomPoint::new(blank_container, 0)));
    }

    #[test]
    fn test_point_at_out_of_range() {
        let root = SimpleNode::from_text("abc");
        assert_eq!(point_at(4, &root), None);
    }

    #[test]
    fn test_point_at_empty_document() {
        let root = SimpleNode::from_text("");
        assert_eq!(point_at(0, &root), Some(DomPoint::new(root.clone(), 0)));
        assert_eq!(point_at(1, &root), None);
    }

    #[test]
    fn test_point_at_empty_container() {
        let root = SimpleNode::root();
        root.append(SimpleNode::container());
        let line = root.children()[0].clone();
        assert_eq!(point_at(0, &root), Some(DomPoint::new(line, 0)));
    }

    #[test]
    fn test_offset_round_trip_through_point_at() {
        for text in ["Hello World", "a\n\nb", "ab\ncd\n\nef", "🙂x\ny"] {
            let root = SimpleNode::from_text(text);
            let len = canonical_text(&root).chars().count();
            for offset in 0..=len {
                let point = point_at(offset, &root)
                    .unwrap_or_else(|| panic!("no point at {offset} in {text:?}"));
                assert_eq!(
                    offset_of(&point.node, point.offset, &root),
                    offset,
                    "round trip at {offset} in {text:?}"
                );
            }
        }
    }

    #[test]
    fn test_text_position_round_trip_through_offset_of() {
        let root = SimpleNode::from_text("ab\n\ncd");
        for container in root.children() {
            for child in container.children() {
                if child.kind() != NodeKind::Text {
                    continue;
                }
                for inner in 0..=child.text_len() {
                    let offset = offset_of(&child, inner, &root);
                    let point = point_at(offset, &root).expect("offset maps back");
                    // Same resolved character slot.
                    assert_eq!(offset_of(&point.node, point.offset, &root), offset);
                }
            }
        }
    }
}
