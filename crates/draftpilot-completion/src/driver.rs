//! Async shell around the completion session
//!
//! The driver owns one [`CompletionSession`] per editable surface and
//! interprets its effects: tokio sleeps for the debounce, a
//! [`CompletionDispatcher`] for the network boundary, and a
//! [`SuggestionRenderer`] for the overlay. All session state is touched
//! under one mutex from whichever task currently holds an event, which
//! serializes UI-visible transitions the same way a single-threaded event
//! loop would.

use std::any::Any;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use draftpilot_config::AssistantConfig;
use draftpilot_dispatch::CompletionDispatcher;
use draftpilot_surface::{CursorContext, EditorEvent, EditorSurface, Key};

use crate::render::{SuggestionRenderer, SuggestionView};
use crate::session::{CompletionSession, DebounceTicket, SessionEffect, SessionState};

/// Driver for one editable surface on one page
pub struct SessionDriver {
    session: Mutex<CompletionSession>,
    surface: Arc<dyn EditorSurface>,
    target: Mutex<Box<dyn Any + Send>>,
    dispatcher: Arc<dyn CompletionDispatcher>,
    renderer: Arc<dyn SuggestionRenderer>,
    url: String,
}

impl SessionDriver {
    pub fn new(
        config: AssistantConfig,
        surface: Arc<dyn EditorSurface>,
        target: Box<dyn Any + Send>,
        dispatcher: Arc<dyn CompletionDispatcher>,
        renderer: Arc<dyn SuggestionRenderer>,
        url: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            session: Mutex::new(CompletionSession::new(config)),
            surface,
            target: Mutex::new(target),
            dispatcher,
            renderer,
            url: url.into(),
        })
    }

    /// Route one raw editor event into the lifecycle
    pub fn handle_event(self: &Arc<Self>, event: EditorEvent) {
        match event {
            event if event.is_edit() => self.handle_edit(),
            EditorEvent::KeyDown(Key::Tab) => self.accept_suggestion(),
            EditorEvent::KeyDown(Key::Escape) => self.dismiss_suggestion(),
            EditorEvent::KeyDown(key) if key.moves_caret() => self.dismiss_suggestion(),
            EditorEvent::Click | EditorEvent::Scroll => self.dismiss_suggestion(),
            _ => {}
        }
    }

    /// Splice the displayed suggestion at the caret
    ///
    /// Also the accept callback for host overlays. No-op when nothing is
    /// displayed.
    pub fn accept_suggestion(self: &Arc<Self>) {
        let accepted = lock(&self.session).accept();
        if let Some(text) = accepted {
            {
                let mut target = lock(&self.target);
                if !self.surface.insert_at_caret(target.as_mut(), &text) {
                    warn!("accepted completion could not be spliced into the surface");
                }
            }
            self.renderer.render(None);
        }
    }

    /// Discard the displayed suggestion
    pub fn dismiss_suggestion(self: &Arc<Self>) {
        let effects = lock(&self.session).dismiss();
        self.apply(effects);
    }

    /// Current lifecycle state, for hosts and tests
    pub fn state(&self) -> SessionState {
        lock(&self.session).state()
    }

    /// Inspect the surface target, e.g. to read a buffer back in tests
    pub fn target(&self) -> MutexGuard<'_, Box<dyn Any + Send>> {
        lock(&self.target)
    }

    /// Follow configuration snapshot replacements until the store is dropped
    pub fn watch_config(
        self: &Arc<Self>,
        mut rx: watch::Receiver<AssistantConfig>,
    ) -> JoinHandle<()> {
        let driver = Arc::clone(self);
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let config = rx.borrow_and_update().clone();
                let effects = lock(&driver.session).update_config(config);
                driver.apply(effects);
            }
        })
    }

    fn handle_edit(self: &Arc<Self>) {
        let (editable, context) = {
            let target = lock(&self.target);
            let editable = self.surface.is_editable_target(target.as_ref());
            (editable, self.fresh_context(target.as_ref()))
        };
        let effects = lock(&self.session).handle_edit(&self.url, editable, context);
        self.apply(effects);
    }

    fn on_debounce_elapsed(self: &Arc<Self>, ticket: DebounceTicket) {
        let context = {
            let target = lock(&self.target);
            self.fresh_context(target.as_ref())
        };
        let effects = lock(&self.session).debounce_elapsed(ticket, context);
        self.apply(effects);
    }

    fn fresh_context(&self, target: &dyn Any) -> Option<CursorContext> {
        self.surface
            .snapshot(target)
            .and_then(|snapshot| CursorContext::from_snapshot(&snapshot))
    }

    fn apply(self: &Arc<Self>, effects: Vec<SessionEffect>) {
        for effect in effects {
            match effect {
                SessionEffect::HideSuggestion => self.renderer.render(None),
                SessionEffect::ShowSuggestion { text } => {
                    let position = {
                        let target = lock(&self.target);
                        self.surface
                            .caret_position(target.as_ref())
                            .unwrap_or_default()
                    };
                    self.renderer.render(Some(SuggestionView { text, position }));
                }
                SessionEffect::ArmDebounce { ticket, wait } => {
                    let driver = Arc::clone(self);
                    tokio::spawn(async move {
                        tokio::time::sleep(wait).await;
                        driver.on_debounce_elapsed(ticket);
                    });
                }
                SessionEffect::Dispatch(request) => {
                    let driver = Arc::clone(self);
                    let dispatcher = Arc::clone(&self.dispatcher);
                    tokio::spawn(async move {
                        let response = dispatcher.complete(request).await;
                        let effects = lock(&driver.session).handle_response(response);
                        driver.apply(effects);
                    });
                }
            }
        }
    }
}

/// Lock a mutex, recovering the data if a panicking task poisoned it
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
