//! Session state machine tests
//!
//! Drives the orchestrator's pure state machine through the lifecycle
//! scenarios: debounce cancel-and-replace, context revalidation at fire
//! time, last-writer-wins by request identifier, and silent failure paths.

use draftpilot_completion::{CompletionSession, DebounceTicket, SessionEffect, SessionState};
use draftpilot_config::AssistantConfig;
use draftpilot_dispatch::{CompletionRequest, CompletionResponse, DispatchError};
use draftpilot_surface::CursorContext;

const URL: &str = "https://docs.example.com/d/1/edit";

fn config() -> AssistantConfig {
    AssistantConfig {
        urls: vec!["https://docs.example.com/*".to_string()],
        api_key: "sk-test".to_string(),
        wait_time: 1.0,
        ..AssistantConfig::default()
    }
}

fn ctx(before: &str) -> CursorContext {
    CursorContext::from_parts(before, "")
}

/// Extract the single armed ticket from a batch of effects
fn armed_ticket(effects: Vec<SessionEffect>) -> DebounceTicket {
    let mut tickets: Vec<DebounceTicket> = effects
        .into_iter()
        .filter_map(|e| match e {
            SessionEffect::ArmDebounce { ticket, .. } => Some(ticket),
            _ => None,
        })
        .collect();
    assert_eq!(tickets.len(), 1, "expected exactly one armed debounce");
    tickets.pop().unwrap()
}

/// Extract the single dispatched request from a batch of effects
fn dispatched(effects: Vec<SessionEffect>) -> CompletionRequest {
    let mut requests: Vec<CompletionRequest> = effects
        .into_iter()
        .filter_map(|e| match e {
            SessionEffect::Dispatch(request) => Some(request),
            _ => None,
        })
        .collect();
    assert_eq!(requests.len(), 1, "expected exactly one dispatch");
    requests.pop().unwrap()
}

fn shown_text(effects: &[SessionEffect]) -> Option<&str> {
    effects.iter().find_map(|e| match e {
        SessionEffect::ShowSuggestion { text } => Some(text.as_str()),
        _ => None,
    })
}

/// Arm and fire a debounce for the given context, returning the request
fn issue(session: &mut CompletionSession, context: &CursorContext) -> CompletionRequest {
    let ticket = armed_ticket(session.handle_edit(URL, true, Some(context.clone())));
    dispatched(session.debounce_elapsed(ticket, Some(context.clone())))
}

#[test]
fn unmatched_url_never_arms() {
    let mut session = CompletionSession::new(config());
    let effects = session.handle_edit("https://other.example/", true, Some(ctx("Hello there")));
    assert!(effects.is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn non_editable_target_never_arms() {
    let mut session = CompletionSession::new(config());
    let effects = session.handle_edit(URL, false, Some(ctx("Hello there")));
    assert!(effects.is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn qualifying_edit_arms_debounce() {
    let mut session = CompletionSession::new(config());
    let effects = session.handle_edit(URL, true, Some(ctx("The quick brown fox")));
    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], SessionEffect::ArmDebounce { .. }));
    assert_eq!(session.state(), SessionState::Pending);
}

#[test]
fn short_prefix_does_not_arm() {
    let mut session = CompletionSession::new(config());
    let effects = session.handle_edit(URL, true, Some(ctx("ab")));
    assert!(effects.is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn unchanged_context_does_not_rearm() {
    let mut session = CompletionSession::new(config());
    let context = ctx("Same context here");
    armed_ticket(session.handle_edit(URL, true, Some(context.clone())));
    let effects = session.handle_edit(URL, true, Some(context));
    assert!(effects.is_empty());
}

#[test]
fn superseded_ticket_never_dispatches() {
    // Timer armed at C1; a new qualifying edit producing C2 arrives before
    // it fires. The C1 request must never be sent.
    let mut session = CompletionSession::new(config());
    let c1 = ctx("First sentence draft");
    let c2 = ctx("First sentence draft, continued");

    let ticket1 = armed_ticket(session.handle_edit(URL, true, Some(c1)));
    let ticket2 = armed_ticket(session.handle_edit(URL, true, Some(c2.clone())));

    assert!(session
        .debounce_elapsed(ticket1, Some(c2.clone()))
        .is_empty());
    assert_eq!(session.state(), SessionState::Pending);

    let request = dispatched(session.debounce_elapsed(ticket2, Some(c2.clone())));
    assert_eq!(request.request_id, 1);
    assert_eq!(request.context, c2.full_context);
}

#[test]
fn context_drift_during_wait_drops_request() {
    // Generation still current, but the surface changed without an input
    // event (programmatic edit): byte-equality fails, nothing is sent.
    let mut session = CompletionSession::new(config());
    let armed = ctx("Original text here");
    let drifted = ctx("Original text here plus injected");

    let ticket = armed_ticket(session.handle_edit(URL, true, Some(armed)));
    assert!(session.debounce_elapsed(ticket, Some(drifted)).is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn vanished_caret_drops_request() {
    let mut session = CompletionSession::new(config());
    let context = ctx("Some good text");
    let ticket = armed_ticket(session.handle_edit(URL, true, Some(context)));
    assert!(session.debounce_elapsed(ticket, None).is_empty());
}

#[test]
fn missing_api_key_suppresses_request_silently() {
    let mut cfg = config();
    cfg.api_key = String::new();
    let mut session = CompletionSession::new(cfg);

    let context = ctx("Plenty of text here");
    let ticket = armed_ticket(session.handle_edit(URL, true, Some(context.clone())));
    assert!(session.debounce_elapsed(ticket, Some(context)).is_empty());
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.last_request_id(), 0);
}

#[test]
fn successful_response_displays_normalized_text() {
    let mut session = CompletionSession::new(config());
    let context = ctx("The quick brown fox jumps over");
    let request = issue(&mut session, &context);
    assert_eq!(session.state(), SessionState::InFlight);

    let effects =
        session.handle_response(CompletionResponse::ok(request.request_id, "over the lazy dog."));
    assert_eq!(shown_text(&effects), Some("the lazy dog."));
    assert_eq!(session.state(), SessionState::Displaying);
}

#[test]
fn stale_response_is_dropped_regardless_of_arrival_order() {
    // Requests 5..=6 shape: two requests in flight, the older response
    // arrives last and must not clobber the newer suggestion.
    let mut session = CompletionSession::new(config());
    let c1 = ctx("Draft number one");
    let c2 = ctx("Draft number one, revised");

    let first = issue(&mut session, &c1);
    let second = issue(&mut session, &c2);
    assert!(first.request_id < second.request_id);

    let effects = session.handle_response(CompletionResponse::ok(
        second.request_id,
        "and then improved.",
    ));
    assert_eq!(shown_text(&effects), Some("and then improved."));

    // The older response arrives after the newer one was displayed
    let stale =
        session.handle_response(CompletionResponse::ok(first.request_id, "something older"));
    assert!(stale.is_empty());
    assert_eq!(session.state(), SessionState::Displaying);
}

#[test]
fn stale_response_before_latest_settles_keeps_in_flight() {
    let mut session = CompletionSession::new(config());
    let c1 = ctx("Draft number one");
    let c2 = ctx("Draft number one, revised");

    let first = issue(&mut session, &c1);
    let second = issue(&mut session, &c2);

    // Old response first: dropped, newest still outstanding
    assert!(session
        .handle_response(CompletionResponse::ok(first.request_id, "old"))
        .is_empty());
    assert_eq!(session.state(), SessionState::InFlight);

    let effects = session.handle_response(CompletionResponse::ok(second.request_id, "new text"));
    assert_eq!(shown_text(&effects), Some("new text"));
}

#[test]
fn failed_latest_response_reverts_to_idle() {
    let mut session = CompletionSession::new(config());
    let c1 = ctx("Draft number one");
    let c2 = ctx("Draft number one, revised");

    let first = issue(&mut session, &c1);
    let second = issue(&mut session, &c2);

    let err = DispatchError::Api {
        status: 500,
        message: "upstream".to_string(),
    };
    assert!(session
        .handle_response(CompletionResponse::failed(second.request_id, &err))
        .is_empty());
    assert_eq!(session.state(), SessionState::Idle);

    // The older success can no longer resurrect anything
    assert!(session
        .handle_response(CompletionResponse::ok(first.request_id, "too late"))
        .is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn response_missing_completion_text_is_silent() {
    let mut session = CompletionSession::new(config());
    let context = ctx("Plenty of text");
    let request = issue(&mut session, &context);

    let malformed = CompletionResponse {
        success: true,
        request_id: request.request_id,
        completion: None,
        error: None,
    };
    assert!(session.handle_response(malformed).is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn echo_only_completion_displays_nothing() {
    let mut session = CompletionSession::new(config());
    let context = ctx("Only an echo");
    let request = issue(&mut session, &context);

    let effects =
        session.handle_response(CompletionResponse::ok(request.request_id, "\"Only an echo\""));
    assert!(effects.is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn accept_hands_over_candidate_once() {
    let mut session = CompletionSession::new(config());
    let context = ctx("Finish this thought");
    let request = issue(&mut session, &context);
    session.handle_response(CompletionResponse::ok(request.request_id, " with a flourish."));

    assert_eq!(session.accept().as_deref(), Some("with a flourish."));
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.accept(), None);
}

#[test]
fn new_edit_hides_displayed_suggestion() {
    let mut session = CompletionSession::new(config());
    let context = ctx("Show me something");
    let request = issue(&mut session, &context);
    session.handle_response(CompletionResponse::ok(request.request_id, " nice."));
    assert_eq!(session.state(), SessionState::Displaying);

    let effects = session.handle_edit(URL, true, Some(ctx("Show me something else")));
    assert!(effects
        .iter()
        .any(|e| matches!(e, SessionEffect::HideSuggestion)));
}

#[test]
fn dismiss_discards_candidate() {
    let mut session = CompletionSession::new(config());
    let context = ctx("Another suggestion");
    let request = issue(&mut session, &context);
    session.handle_response(CompletionResponse::ok(request.request_id, " appears."));

    let effects = session.dismiss();
    assert!(matches!(effects[0], SessionEffect::HideSuggestion));
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.accept(), None);
}

#[test]
fn config_update_cancels_and_hides() {
    let mut session = CompletionSession::new(config());
    let context = ctx("Suggestion under old settings");
    let request = issue(&mut session, &context);
    session.handle_response(CompletionResponse::ok(request.request_id, " done."));

    let mut new_config = config();
    new_config.model = "gpt-4o".to_string();
    let effects = session.update_config(new_config);
    assert!(effects
        .iter()
        .any(|e| matches!(e, SessionEffect::HideSuggestion)));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn request_identifiers_are_monotonic() {
    let mut session = CompletionSession::new(config());
    let mut previous = 0;
    for text in ["First edit text", "Second edit text", "Third edit text"] {
        let request = issue(&mut session, &ctx(text));
        assert!(request.request_id > previous);
        previous = request.request_id;
    }
}
