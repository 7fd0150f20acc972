//! Editable-surface capability trait

use std::any::Any;

use crate::types::{ScreenPosition, SurfaceSnapshot};

/// Capability interface for one supported host editor
///
/// Each implementation knows how to recognize and read a single kind of
/// editing surface (a content-editable region, a specific rich text editor,
/// an in-memory buffer). Targets are passed as `dyn Any` because only the
/// surface that registered for a host knows the concrete target type; the
/// orchestration layer never inspects targets itself.
pub trait EditorSurface: Send + Sync {
    /// Stable identifier, e.g. `"buffer"`
    fn id(&self) -> &str;

    /// Whether this surface implementation handles the given host URL
    fn matches_host(&self, url: &str) -> bool;

    /// Whether the event target is an editable region this surface owns
    fn is_editable_target(&self, target: &dyn Any) -> bool;

    /// Atomically observe the text and caret of the target
    ///
    /// Returns `None` when the target has no usable caret.
    fn snapshot(&self, target: &dyn Any) -> Option<SurfaceSnapshot>;

    /// On-screen caret position, for anchoring the suggestion overlay
    fn caret_position(&self, target: &dyn Any) -> Option<ScreenPosition>;

    /// Splice text at the caret and notify the host editor of the change
    ///
    /// Implementations must advance the caret past the inserted text and
    /// synthesize whatever input notification the host editor needs to
    /// recognize the edit as its own. Returns `false` when the target is not
    /// editable or not of this surface's kind.
    fn insert_at_caret(&self, target: &mut dyn Any, text: &str) -> bool;
}
