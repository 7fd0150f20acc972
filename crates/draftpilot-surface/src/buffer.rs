//! In-memory buffer surface
//!
//! The reference [`EditorSurface`] implementation: a plain text buffer with
//! a caret, standing in for a native content-editable region. It is also the
//! surface the orchestrator tests drive.

use std::any::Any;

use crate::surface::EditorSurface;
use crate::types::{ScreenPosition, SurfaceSnapshot};

/// A plain editable text buffer with a caret
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: String,
    /// Caret as a char offset into `text`
    caret: usize,
    editable: bool,
    caret_origin: ScreenPosition,
    synthesized_inputs: usize,
}

impl TextBuffer {
    /// Create a buffer with the caret at the end of the text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        Self {
            text,
            caret,
            editable: true,
            caret_origin: ScreenPosition::default(),
            synthesized_inputs: 0,
        }
    }

    /// Create a buffer with an explicit caret offset (clamped to the text)
    pub fn with_caret(text: impl Into<String>, caret: usize) -> Self {
        let mut buffer = Self::new(text);
        buffer.set_caret(caret);
        buffer
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret, clamping to the end of the text
    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.text.chars().count());
    }

    /// Mark the buffer read-only, like a non-editable region
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Where the host reports the caret on screen
    pub fn set_caret_origin(&mut self, origin: ScreenPosition) {
        self.caret_origin = origin;
    }

    /// How many input notifications have been synthesized on this buffer
    ///
    /// Incremented on every programmatic splice so the host editor's own
    /// state can recognize accepted completions as edits.
    pub fn synthesized_inputs(&self) -> usize {
        self.synthesized_inputs
    }

    /// Splice text at the caret, advancing the caret past it
    pub fn insert(&mut self, text: &str) -> bool {
        if !self.editable {
            return false;
        }
        let byte_at = self
            .text
            .char_indices()
            .nth(self.caret)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len());
        self.text.insert_str(byte_at, text);
        self.caret += text.chars().count();
        self.synthesized_inputs += 1;
        true
    }

    /// Atomic copy of the current text and caret
    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot::new(self.text.clone(), self.caret)
    }
}

/// Generic surface over [`TextBuffer`] targets
pub struct BufferSurface;

impl EditorSurface for BufferSurface {
    fn id(&self) -> &str {
        "buffer"
    }

    fn matches_host(&self, _url: &str) -> bool {
        // Generic fallback: any host with a plain editable region
        true
    }

    fn is_editable_target(&self, target: &dyn Any) -> bool {
        target
            .downcast_ref::<TextBuffer>()
            .map(|b| b.is_editable())
            .unwrap_or(false)
    }

    fn snapshot(&self, target: &dyn Any) -> Option<SurfaceSnapshot> {
        target.downcast_ref::<TextBuffer>().map(|b| b.snapshot())
    }

    fn caret_position(&self, target: &dyn Any) -> Option<ScreenPosition> {
        target.downcast_ref::<TextBuffer>().map(|b| b.caret_origin)
    }

    fn insert_at_caret(&self, target: &mut dyn Any, text: &str) -> bool {
        match target.downcast_mut::<TextBuffer>() {
            Some(buffer) => buffer.insert(text),
            None => false,
        }
    }
}
