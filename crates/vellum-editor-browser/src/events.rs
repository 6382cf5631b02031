//! Keyboard wiring for the history shortcuts.
//!
//! Ctrl/Cmd+Z undoes, Ctrl/Cmd+Shift+Z redoes. Snapshots returned by the
//! session are written straight back into the editor element; everything
//! else about keyboard handling belongs to the layer above.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;

use vellum_editor_core::{EditorSession, PlatformError};

use crate::host::BrowserHost;

/// Attach the undo/redo shortcuts to the session's editor element.
///
/// The returned listener detaches when dropped, so the caller owns its
/// lifetime alongside the session.
pub fn bind_history_shortcuts(
    session: Rc<RefCell<EditorSession<BrowserHost>>>,
) -> Result<EventListener, PlatformError> {
    let editor_id = session.borrow().host().editor_id().to_string();
    let editor = gloo_utils::document()
        .get_element_by_id(&editor_id)
        .ok_or_else(|| format!("editor element not found: {editor_id}"))?;

    let target: web_sys::EventTarget = editor.into();
    let listener = EventListener::new(&target, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
            return;
        };
        if !(event.ctrl_key() || event.meta_key()) || !event.key().eq_ignore_ascii_case("z") {
            return;
        }
        event.prevent_default();

        let snapshot = if event.shift_key() {
            session.borrow_mut().redo()
        } else {
            session.borrow_mut().undo()
        };

        match snapshot {
            Some(content) => {
                if let Some(editor) = gloo_utils::document().get_element_by_id(&editor_id) {
                    editor.set_inner_html(&content);
                } else {
                    tracing::warn!(%editor_id, "history snapshot dropped: editor element gone");
                }
            }
            // Boundary reached: nothing to navigate to, safe no-op.
            None => tracing::trace!(shift = event.shift_key(), "history boundary"),
        }
    });

    Ok(listener)
}
