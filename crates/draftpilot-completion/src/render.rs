//! Suggestion renderer seam
//!
//! The core never draws anything. It hands a [`SuggestionView`] to whatever
//! overlay the host provides, and hands `None` to unmount it. Acceptance
//! and dismissal flow back through the driver's `accept_suggestion` and
//! `dismiss_suggestion` entry points.

use draftpilot_surface::ScreenPosition;

/// A suggestion ready to draw at the caret
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionView {
    pub text: String,
    pub position: ScreenPosition,
}

/// Host-provided suggestion overlay
pub trait SuggestionRenderer: Send + Sync {
    /// Show the suggestion, or hide the overlay when `view` is `None`
    fn render(&self, view: Option<SuggestionView>);
}

/// Renderer that draws nothing, for headless use
pub struct NullRenderer;

impl SuggestionRenderer for NullRenderer {
    fn render(&self, _view: Option<SuggestionView>) {}
}
