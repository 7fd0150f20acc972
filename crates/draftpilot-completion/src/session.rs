//! Completion request orchestration
//!
//! [`CompletionSession`] is the explicit owner of all per-surface lifecycle
//! state: the debounce generation, the last observed context, the request
//! counter, and the display flag. It is a pure state machine; every entry
//! point returns [`SessionEffect`]s for the driver to interpret, which keeps
//! the `Idle → Pending → InFlight → Displaying` lifecycle testable without
//! timers or network.
//!
//! Staleness policy: the last issued request wins, by identifier. Earlier
//! in-flight calls are never cancelled; their responses are compared against
//! the newest identifier and silently dropped when overtaken.

use std::time::Duration;

use tracing::{debug, warn};

use draftpilot_config::{AssistantConfig, UrlMatcher};
use draftpilot_dispatch::{CompletionRequest, CompletionResponse};
use draftpilot_surface::CursorContext;

use crate::error::CompletionError;
use crate::normalize::normalize;
use crate::trigger::should_trigger;

/// Handle for one armed debounce wait
///
/// Carries the generation that armed it and the context observed at arm
/// time. The timer only fires into a request if the generation is still
/// current *and* the surface context is byte-equal when it elapses.
#[derive(Debug, Clone)]
pub struct DebounceTicket {
    generation: u64,
    context: CursorContext,
}

impl DebounceTicket {
    /// Context captured when the debounce was armed
    pub fn context(&self) -> &CursorContext {
        &self.context
    }
}

/// Instructions for the async shell around the session
#[derive(Debug)]
pub enum SessionEffect {
    /// Unmount any visible suggestion
    HideSuggestion,
    /// Start (or restart) the debounce timer
    ArmDebounce {
        ticket: DebounceTicket,
        wait: Duration,
    },
    /// Hand the request to the remote dispatcher
    Dispatch(CompletionRequest),
    /// Show a normalized suggestion at the caret
    ShowSuggestion { text: String },
}

/// UI-visible lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// Debounce armed, waiting for the quiet period to elapse
    Pending,
    /// Request issued, awaiting the dispatcher
    InFlight,
    /// A suggestion is on screen
    Displaying,
}

/// Per-surface completion session
pub struct CompletionSession {
    config: AssistantConfig,
    matcher: UrlMatcher,
    /// Bumped on every edit; outstanding tickets with older generations are
    /// dead. This is the explicit form of cancel-and-replace debouncing.
    debounce_generation: u64,
    armed: bool,
    /// Context of the last observed edit, for de-duplication and for
    /// normalizing late responses against what the user sees now
    last_context: Option<CursorContext>,
    /// Monotonic identifier source, one per completion attempt
    request_counter: u64,
    /// Most recently issued request and the context it was built from
    in_flight: Option<(u64, CursorContext)>,
    /// Currently displayed suggestion, if any
    display: Option<String>,
}

impl CompletionSession {
    pub fn new(config: AssistantConfig) -> Self {
        let matcher = UrlMatcher::new(&config.urls);
        Self {
            config,
            matcher,
            debounce_generation: 0,
            armed: false,
            last_context: None,
            request_counter: 0,
            in_flight: None,
            display: None,
        }
    }

    /// Replace the observed configuration snapshot
    ///
    /// Editing state is invalidated: the pending debounce is cancelled and
    /// any visible suggestion is hidden, since it was produced under the old
    /// settings.
    pub fn update_config(&mut self, config: AssistantConfig) -> Vec<SessionEffect> {
        debug!(model = %config.model, "session observed configuration update");
        self.matcher = UrlMatcher::new(&config.urls);
        self.config = config;
        self.cancel_pending();
        let mut effects = Vec::new();
        self.hide_into(&mut effects);
        effects
    }

    /// Process a qualifying-or-not edit on the surface
    ///
    /// Every edit unconditionally cancels the pending debounce and hides a
    /// displayed suggestion; editing invalidates the previous suggestion no
    /// matter what. A new debounce is armed only when the URL is active, the
    /// target editable, the context fresh, and the trigger heuristics pass.
    pub fn handle_edit(
        &mut self,
        url: &str,
        editable: bool,
        context: Option<CursorContext>,
    ) -> Vec<SessionEffect> {
        if !self.matcher.matches(url) {
            return Vec::new();
        }
        if !editable {
            return Vec::new();
        }

        let mut effects = Vec::new();
        self.cancel_pending();
        self.hide_into(&mut effects);

        let Some(context) = context else {
            return effects;
        };
        let unchanged = self
            .last_context
            .as_ref()
            .is_some_and(|last| last.full_context == context.full_context);
        if unchanged {
            return effects;
        }
        self.last_context = Some(context.clone());

        if !should_trigger(&context.before) {
            return effects;
        }

        self.armed = true;
        effects.push(SessionEffect::ArmDebounce {
            ticket: DebounceTicket {
                generation: self.debounce_generation,
                context,
            },
            wait: self.config.wait_duration(),
        });
        effects
    }

    /// The debounce wait for `ticket` elapsed; `fresh` is a context taken
    /// from the surface just now
    ///
    /// Issues a request only when the ticket is still the current
    /// generation and the fresh context is byte-equal to the armed one.
    /// The equality guard catches edits that completed during the wait
    /// without re-arming, e.g. programmatic changes.
    pub fn debounce_elapsed(
        &mut self,
        ticket: DebounceTicket,
        fresh: Option<CursorContext>,
    ) -> Vec<SessionEffect> {
        if ticket.generation != self.debounce_generation {
            // Expected whenever the user kept typing; not an error
            debug!(
                generation = ticket.generation,
                current = self.debounce_generation,
                "debounce superseded before firing"
            );
            return Vec::new();
        }
        self.armed = false;

        let Some(fresh) = fresh else {
            debug!("caret vanished during debounce wait");
            return Vec::new();
        };
        if fresh.full_context != ticket.context.full_context {
            debug!("context changed during debounce wait, dropping request");
            return Vec::new();
        }

        if !self.config.has_api_key() {
            debug!(
                reason = %CompletionError::ConfigurationMissing,
                "completion suppressed"
            );
            return Vec::new();
        }

        self.request_counter += 1;
        let request_id = self.request_counter;
        self.in_flight = Some((request_id, fresh.clone()));
        debug!(request_id, "issuing completion request");

        vec![SessionEffect::Dispatch(CompletionRequest {
            request_id,
            config: self.config.clone(),
            context: fresh.full_context,
        })]
    }

    /// Reconcile a dispatcher response against the newest issued request
    ///
    /// Responses whose identifier does not match the most recently issued
    /// one are dropped silently; being overtaken is expected. Failures and
    /// empty normalizations end the attempt with a diagnostic log only.
    pub fn handle_response(&mut self, response: CompletionResponse) -> Vec<SessionEffect> {
        let (latest, context) = match self.in_flight.take() {
            Some(pair) => pair,
            None => {
                debug!(
                    request_id = response.request_id,
                    "dropping completion response with no request outstanding"
                );
                return Vec::new();
            }
        };
        if response.request_id != latest {
            debug!(
                request_id = response.request_id,
                latest, "dropping stale completion response"
            );
            // The newest request is still outstanding
            self.in_flight = Some((latest, context));
            return Vec::new();
        }

        if !response.success {
            let reason = response
                .error
                .unwrap_or_else(|| "unknown dispatch failure".to_string());
            warn!(request_id = latest, %reason, "completion request failed");
            return Vec::new();
        }
        let Some(raw) = response.completion else {
            warn!(
                request_id = latest,
                reason = %CompletionError::MalformedResponse("missing completion text".to_string()),
                "completion response unusable"
            );
            return Vec::new();
        };

        // Clean against what the user sees now, falling back to the context
        // the request was built from
        let basis = self.last_context.as_ref().unwrap_or(&context);
        let text = normalize(&raw, basis);
        if text.is_empty() {
            debug!(request_id = latest, "completion empty after normalization");
            return Vec::new();
        }

        self.display = Some(text.clone());
        vec![SessionEffect::ShowSuggestion { text }]
    }

    /// Take the displayed candidate for splicing at the caret
    pub fn accept(&mut self) -> Option<String> {
        self.display.take()
    }

    /// Discard the displayed candidate, if any
    pub fn dismiss(&mut self) -> Vec<SessionEffect> {
        let mut effects = Vec::new();
        self.hide_into(&mut effects);
        effects
    }

    /// Current UI-visible lifecycle state
    pub fn state(&self) -> SessionState {
        if self.display.is_some() {
            SessionState::Displaying
        } else if self.armed {
            SessionState::Pending
        } else if self.in_flight.is_some() {
            SessionState::InFlight
        } else {
            SessionState::Idle
        }
    }

    /// Identifier of the most recently issued request
    pub fn last_request_id(&self) -> u64 {
        self.request_counter
    }

    fn cancel_pending(&mut self) {
        self.debounce_generation += 1;
        self.armed = false;
    }

    fn hide_into(&mut self, effects: &mut Vec<SessionEffect>) {
        if self.display.take().is_some() {
            effects.push(SessionEffect::HideSuggestion);
        }
    }
}
