//! Chat-platform event plumbing
//!
//! The transport that delivers mention events is modeled as an injected
//! [`EventSource`] so the listener logic stays testable without a live
//! Slack connection.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod slack;

pub use slack::SlackListener;

/// An app-mention event received from the chat platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionEvent {
    pub user: String,
    pub text: String,
    pub channel: String,
}

/// Delivers mention events; `None` means the stream is exhausted.
#[async_trait]
pub trait EventSource: Send {
    async fn next_event(&mut self) -> Result<Option<MentionEvent>>;
}
