//! Offset-addressed mutation primitives.
//!
//! All higher-level formatting (bold toggles, heading application, block
//! insertion) composes these four operations plus the selection queries.
//! Each call resolves its offsets fresh against the live tree, mutates
//! synchronously, and leaves the caret in a defined place - offsets
//! computed before a call are stale after it.

use thiserror::Error;

use crate::offset::point_at;
use crate::platform::{EditHost, PlatformError, SelectionHost};
use crate::selection::selection_info;

/// Failure of a mutation primitive. Callers treat these as no-ops.
#[derive(Debug, Error)]
pub enum EditError {
    /// An offset did not resolve to a position in the document.
    #[error("offset {0} is outside the document")]
    OutOfRange(usize),
    /// The host rejected the operation.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Delete `[start, end)` and insert `new_text` at that point.
///
/// The caret collapses to the end of the inserted text. `start` and
/// `end` are swapped if given in reverse.
pub fn replace_range<H: EditHost>(
    host: &H,
    start: usize,
    end: usize,
    new_text: &str,
) -> Result<(), EditError> {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let root = host.root()?;
    let from = point_at(start, &root).ok_or(EditError::OutOfRange(start))?;
    let to = point_at(end, &root).ok_or(EditError::OutOfRange(end))?;

    tracing::trace!(start, end, inserted_len = new_text.len(), "replace_range");
    host.splice(from, to, new_text)?;

    // The splice invalidated every resolved position; recompute the caret
    // against the mutated tree.
    set_cursor(host, start + new_text.chars().count())
}

/// Insert `text` at the caret (the start of the current selection).
pub fn insert_text<H: EditHost>(host: &H, text: &str) -> Result<(), EditError> {
    let root = host.root()?;
    let caret = selection_info(host.read_selection().as_ref(), &root).start;
    replace_range(host, caret, caret, text)
}

/// Collapse the selection to a single point at `offset`.
pub fn set_cursor<H: SelectionHost>(host: &H, offset: usize) -> Result<(), EditError> {
    select_range(host, offset, offset)
}

/// Set the native selection to span `[start, end)`.
///
/// Used after formatting to keep the just-edited text highlighted.
pub fn select_range<H: SelectionHost>(host: &H, start: usize, end: usize) -> Result<(), EditError> {
    let root = host.root()?;
    let anchor = point_at(start, &root).ok_or(EditError::OutOfRange(start))?;
    let focus = point_at(end, &root).ok_or(EditError::OutOfRange(end))?;
    host.apply_selection(anchor, focus)?;
    Ok(())
}
