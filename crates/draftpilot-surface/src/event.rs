//! Editor event model
//!
//! The inbound event surface the host feeds into a session: input, key,
//! composition, click, and scroll events on the editable surface.

/// Keys the completion lifecycle reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Enter,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Any key the lifecycle does not treat specially
    Other,
}

impl Key {
    /// Whether pressing this key moves the caret and so invalidates a
    /// displayed suggestion
    pub fn moves_caret(&self) -> bool {
        matches!(
            self,
            Key::Enter | Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        )
    }
}

/// A raw event from the host's editable surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// Text was inserted or deleted
    Input,
    KeyDown(Key),
    KeyUp(Key),
    /// An IME composition finished committing text
    CompositionEnd,
    Click,
    Scroll,
}

impl EditorEvent {
    /// Whether this event can change the text around the caret
    ///
    /// Input, key-up, and composition-end all re-enter the trigger path;
    /// key-down is reserved for accept/dismiss handling.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            EditorEvent::Input | EditorEvent::KeyUp(_) | EditorEvent::CompositionEnd
        )
    }
}
