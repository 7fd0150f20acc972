//! DraftPilot Configuration Management
//!
//! This crate provides the read-only configuration snapshots the completion
//! core observes: endpoint credentials, trigger debounce timing, URL
//! activation patterns, and the user's conversational talk tools.
//!
//! The core never mutates configuration. A [`ConfigStore`] owns the current
//! snapshot and publishes replacements through a watch channel so sessions
//! can pick up updates between edits.

pub mod error;
pub mod matcher;
pub mod store;
pub mod types;

pub use error::{ConfigError, Result};
pub use matcher::UrlMatcher;
pub use store::ConfigStore;
pub use types::{AssistantConfig, TalkTool};
