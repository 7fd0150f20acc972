//! Configuration store with change notification
//!
//! The store owns the current snapshot. Settings surfaces call [`ConfigStore::update`]
//! to publish a replacement; completion sessions hold a watch receiver and
//! observe the newest snapshot between edits. Snapshots are cloned out, so
//! observers never see a half-updated configuration.

use tokio::sync::watch;
use tracing::debug;

use crate::types::AssistantConfig;

/// Owner of the live configuration snapshot
#[derive(Debug)]
pub struct ConfigStore {
    tx: watch::Sender<AssistantConfig>,
}

impl ConfigStore {
    /// Create a store seeded with an initial snapshot
    pub fn new(initial: AssistantConfig) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Publish a new snapshot, waking all subscribers
    pub fn update(&self, config: AssistantConfig) {
        debug!(model = %config.model, urls = config.urls.len(), "configuration updated");
        // send_replace never fails even with no live receivers
        self.tx.send_replace(config);
    }

    /// Clone out the current snapshot
    pub fn snapshot(&self) -> AssistantConfig {
        self.tx.borrow().clone()
    }

    /// Subscribe to snapshot replacements
    pub fn subscribe(&self) -> watch::Receiver<AssistantConfig> {
        self.tx.subscribe()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(AssistantConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_reaches_subscriber() {
        let store = ConfigStore::default();
        let mut rx = store.subscribe();

        let mut next = store.snapshot();
        next.api_key = "sk-new".to_string();
        store.update(next);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().api_key, "sk-new");
    }

    #[test]
    fn snapshot_is_a_copy() {
        let store = ConfigStore::default();
        let mut snap = store.snapshot();
        snap.api_key = "sk-local".to_string();
        assert!(store.snapshot().api_key.is_empty());
    }

    #[tokio::test]
    async fn late_subscriber_sees_latest_snapshot() {
        let store = ConfigStore::default();
        let mut next = store.snapshot();
        next.model = "gpt-4o".to_string();
        store.update(next);

        let rx = store.subscribe();
        assert_eq!(rx.borrow().model, "gpt-4o");
    }
}
