//! Cursor context and snapshot types

use serde::{Deserialize, Serialize};

/// Marker token joining the before/after halves of a context window.
///
/// Chosen to be absent from natural text; it is also sent to the model as a
/// stop sequence so completions never run past the caret.
pub const CURSOR_SENTINEL: &str = "<CURSOR>";

/// Characters of context kept before the caret.
///
/// Fixed policy rather than configuration: together with [`AFTER_WINDOW`]
/// this bounds worst-case request payload size and API cost.
pub const BEFORE_WINDOW: usize = 500;

/// Characters of context kept after the caret.
pub const AFTER_WINDOW: usize = 250;

/// An atomic copy of an editable region plus the caret's linear text offset
///
/// `caret` is a char offset into `text`. Producing a snapshot is the
/// surface's one chance to observe the host; everything downstream works on
/// the copy, so a mutating host can never be observed half-updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    pub text: String,
    pub caret: usize,
}

impl SurfaceSnapshot {
    pub fn new(text: impl Into<String>, caret: usize) -> Self {
        Self {
            text: text.into(),
            caret,
        }
    }
}

/// Bounded text window around the caret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorContext {
    /// Up to [`BEFORE_WINDOW`] chars preceding the caret
    pub before: String,
    /// Up to [`AFTER_WINDOW`] chars following the caret
    pub after: String,
    /// `before` + [`CURSOR_SENTINEL`] + `after`, the payload sent upstream
    pub full_context: String,
}

impl CursorContext {
    /// Build a context window from a single surface snapshot
    ///
    /// Returns `None` when the snapshot has no usable caret (offset past the
    /// end of the text).
    pub fn from_snapshot(snapshot: &SurfaceSnapshot) -> Option<Self> {
        let total_chars = snapshot.text.chars().count();
        if snapshot.caret > total_chars {
            return None;
        }

        let caret_byte = char_offset_to_byte(&snapshot.text, snapshot.caret);
        let before = tail_chars(&snapshot.text[..caret_byte], BEFORE_WINDOW);
        let after = head_chars(&snapshot.text[caret_byte..], AFTER_WINDOW);

        Some(Self::from_parts(before, after))
    }

    /// Assemble a context from already-sliced halves
    pub fn from_parts(before: impl Into<String>, after: impl Into<String>) -> Self {
        let before = before.into();
        let after = after.into();
        let full_context = format!("{before}{CURSOR_SENTINEL}{after}");
        Self {
            before,
            after,
            full_context,
        }
    }
}

/// On-screen caret position handed to the suggestion renderer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

impl ScreenPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

fn char_offset_to_byte(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

fn tail_chars(text: &str, n: usize) -> &str {
    let total = text.chars().count();
    if total <= n {
        return text;
    }
    let start = char_offset_to_byte(text, total - n);
    &text[start..]
}

fn head_chars(text: &str, n: usize) -> &str {
    let end = char_offset_to_byte(text, n);
    &text[..end]
}
