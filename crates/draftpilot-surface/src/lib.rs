//! DraftPilot Editable Surface Abstraction
//!
//! A *surface* is any region the host treats as directly user-editable: a
//! content-editable region, a rich text editor's internal focus target, or a
//! plain in-memory buffer in tests. The completion core only ever sees this
//! crate's capability trait, never a concrete host API, so host-specific
//! quirks stay out of the trigger and orchestration logic.
//!
//! The central invariant is snapshot atomicity: a [`CursorContext`] is built
//! from a single [`SurfaceSnapshot`], so the text before and after the caret
//! always come from the same observation of the surface.

pub mod buffer;
pub mod event;
pub mod registry;
pub mod surface;
pub mod types;

pub use buffer::{BufferSurface, TextBuffer};
pub use event::{EditorEvent, Key};
pub use registry::SurfaceRegistry;
pub use surface::EditorSurface;
pub use types::{CursorContext, ScreenPosition, SurfaceSnapshot, CURSOR_SENTINEL};
