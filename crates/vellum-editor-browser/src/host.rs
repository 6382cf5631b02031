//! Browser implementation of the selection and edit host traits.
//!
//! Uses the DOM Selection and Range APIs. The editor element is looked
//! up by id on every call rather than held, since frameworks re-create
//! the element across re-renders.

use vellum_editor_core::{
    DocNode, DomPoint, EditHost, NodeKind, PlatformError, RawSelection, SelectionHost,
};

use crate::node::{BrowserNode, char_to_utf16_offset, utf16_to_char_offset};

/// Host over a content-editable element, addressed by element id.
pub struct BrowserHost {
    editor_id: String,
}

impl BrowserHost {
    /// Create a host for the given editor element id.
    pub fn new(editor_id: impl Into<String>) -> Self {
        Self {
            editor_id: editor_id.into(),
        }
    }

    /// Get the editor element id.
    pub fn editor_id(&self) -> &str {
        &self.editor_id
    }

    fn editor_element(&self) -> Result<web_sys::Element, PlatformError> {
        gloo_utils::document()
            .get_element_by_id(&self.editor_id)
            .ok_or_else(|| format!("editor element not found: {}", self.editor_id).into())
    }
}

/// Wrap a raw selection endpoint, converting a text node's UTF-16 offset
/// to a character offset. Element endpoints carry child indices and pass
/// through unchanged.
fn dom_point(node: web_sys::Node, offset: usize) -> DomPoint<BrowserNode> {
    let node = BrowserNode::from(node);
    let offset = match node.kind() {
        NodeKind::Text => utf16_to_char_offset(&node.text(), offset),
        _ => offset,
    };
    DomPoint::new(node, offset)
}

/// The raw (node, UTF-16 offset) pair the DOM APIs expect for a point.
fn raw_position(point: &DomPoint<BrowserNode>) -> (web_sys::Node, u32) {
    let offset = match point.node.kind() {
        NodeKind::Text => char_to_utf16_offset(&point.node.text(), point.offset),
        _ => point.offset,
    };
    (point.node.raw().clone(), offset as u32)
}

impl SelectionHost for BrowserHost {
    type Node = BrowserNode;

    fn root(&self) -> Result<BrowserNode, PlatformError> {
        Ok(BrowserNode::from(self.editor_element()?))
    }

    fn read_selection(&self) -> Option<RawSelection<BrowserNode>> {
        let editor = self.editor_element().ok()?;
        let selection = gloo_utils::window().get_selection().ok()??;

        let anchor_node = selection.anchor_node()?;
        let focus_node = selection.focus_node()?;

        // Ignore selections outside the editable surface.
        let editor_node: &web_sys::Node = editor.as_ref();
        if !editor_node.contains(Some(&anchor_node)) || !editor_node.contains(Some(&focus_node)) {
            tracing::trace!("read_selection: selection outside editor");
            return None;
        }

        Some(RawSelection::new(
            dom_point(anchor_node, selection.anchor_offset() as usize),
            dom_point(focus_node, selection.focus_offset() as usize),
        ))
    }

    fn apply_selection(
        &self,
        anchor: DomPoint<BrowserNode>,
        focus: DomPoint<BrowserNode>,
    ) -> Result<(), PlatformError> {
        let document = gloo_utils::document();
        let selection = gloo_utils::window()
            .get_selection()
            .map_err(|e| format!("get_selection failed: {:?}", e))?
            .ok_or("no selection object")?;

        let range = document
            .create_range()
            .map_err(|e| format!("create_range failed: {:?}", e))?;
        let (anchor_node, anchor_offset) = raw_position(&anchor);
        let (focus_node, focus_offset) = raw_position(&focus);
        range
            .set_start(&anchor_node, anchor_offset)
            .map_err(|e| format!("set_start failed: {:?}", e))?;
        range
            .set_end(&focus_node, focus_offset)
            .map_err(|e| format!("set_end failed: {:?}", e))?;

        selection
            .remove_all_ranges()
            .map_err(|e| format!("remove_all_ranges failed: {:?}", e))?;
        selection
            .add_range(&range)
            .map_err(|e| format!("add_range failed: {:?}", e))?;

        Ok(())
    }
}

impl EditHost for BrowserHost {
    fn splice(
        &self,
        start: DomPoint<BrowserNode>,
        end: DomPoint<BrowserNode>,
        text: &str,
    ) -> Result<(), PlatformError> {
        let document = gloo_utils::document();
        let range = document
            .create_range()
            .map_err(|e| format!("create_range failed: {:?}", e))?;

        let (start_node, start_offset) = raw_position(&start);
        let (end_node, end_offset) = raw_position(&end);
        range
            .set_start(&start_node, start_offset)
            .map_err(|e| format!("set_start failed: {:?}", e))?;
        range
            .set_end(&end_node, end_offset)
            .map_err(|e| format!("set_end failed: {:?}", e))?;

        range
            .delete_contents()
            .map_err(|e| format!("delete_contents failed: {:?}", e))?;

        if !text.is_empty() {
            let text_node = document.create_text_node(text);
            let text_node: &web_sys::Node = text_node.as_ref();
            range
                .insert_node(text_node)
                .map_err(|e| format!("insert_node failed: {:?}", e))?;
        }

        tracing::trace!(inserted_len = text.len(), "splice applied");
        Ok(())
    }

    fn serialize(&self) -> Result<String, PlatformError> {
        Ok(self.editor_element()?.inner_html())
    }
}
