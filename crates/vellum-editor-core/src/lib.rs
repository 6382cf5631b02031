//! vellum-editor-core: position mapping and edit history for a
//! content-editable WYSIWYG editor, without framework dependencies.
//!
//! This crate provides:
//! - `DocNode` trait abstracting the host-owned document tree, with
//!   `SimpleNode` as the in-memory implementation
//! - the offset mapper: `offset_of`, `point_at`, `canonical_text`
//! - selection normalization and line queries
//! - offset-addressed mutation primitives, generic over `EditHost`
//! - `TransactionLog` - snapshot-based undo/redo
//! - `EditorSession` - the owned entry point binding it all together

pub mod edit;
pub mod history;
pub mod offset;
pub mod platform;
pub mod selection;
pub mod session;
pub mod tree;

pub use edit::{EditError, insert_text, replace_range, select_range, set_cursor};
pub use history::{DEFAULT_MAX_TRANSACTIONS, EditTransaction, TransactionLog};
pub use offset::{canonical_text, offset_of, point_at};
pub use platform::{EditHost, PlatformError, SelectionHost, SimpleHost};
pub use selection::{
    LineInfo, RawSelection, SelectionInfo, has_selection, line_info, selection_info,
};
pub use session::EditorSession;
pub use smol_str::SmolStr;
pub use tree::{DocNode, DomPoint, NodeKind, SimpleNode};
