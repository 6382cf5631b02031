//! Browser DOM layer for the vellum editor core.
//!
//! Implements the core's host traits over the DOM Selection and Range
//! APIs. Assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `node`: `DocNode` over `web_sys::Node`, UTF-16 offset conversion
//! - `host`: `SelectionHost`/`EditHost` over the Selection and Range APIs
//! - `events`: undo/redo keyboard shortcut wiring
//!
//! # Re-exports
//!
//! This crate re-exports `vellum-editor-core` for convenience, so
//! consumers only need to depend on `vellum-editor-browser`.

// Re-export core crate
pub use vellum_editor_core;
pub use vellum_editor_core::*;

pub mod events;
pub mod host;
pub mod node;

pub use events::bind_history_shortcuts;
pub use host::BrowserHost;
pub use node::{BrowserNode, char_to_utf16_offset, utf16_to_char_offset};
