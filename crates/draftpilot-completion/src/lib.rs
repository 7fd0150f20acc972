//! DraftPilot Completion Core
//!
//! Decides when an edit warrants requesting an inline AI completion, manages
//! the debounced request lifecycle, and reconciles responses against the
//! user's live cursor position.
//!
//! # Architecture
//!
//! The lifecycle is split into a pure state machine and a thin async shell:
//!
//! 1. **Trigger detection**: heuristics over the text before the caret
//!    decide whether an edit qualifies at all.
//! 2. **Session state machine** ([`CompletionSession`]): owns every piece of
//!    per-surface state (debounce generation, request counter, display
//!    flag) and returns [`SessionEffect`]s instead of doing I/O, so the
//!    `Idle → Pending → InFlight → Displaying` lifecycle is testable in
//!    isolation.
//! 3. **Driver** ([`SessionDriver`]): interprets effects with tokio timers,
//!    a [`CompletionDispatcher`](draftpilot_dispatch::CompletionDispatcher),
//!    and a [`SuggestionRenderer`].
//! 4. **Normalization**: pure cleanup of raw model output so the suggestion
//!    never duplicates text the user already typed.
//!
//! Overlapping requests are resolved by identifier comparison only: the last
//! issued request wins, earlier in-flight calls keep running but their
//! results are dropped, never cancelled.

pub mod driver;
pub mod error;
pub mod normalize;
pub mod render;
pub mod session;
pub mod trigger;

pub use driver::SessionDriver;
pub use error::{CompletionError, Result};
pub use normalize::normalize;
pub use render::{SuggestionRenderer, SuggestionView};
pub use session::{CompletionSession, DebounceTicket, SessionEffect, SessionState};
pub use trigger::should_trigger;
