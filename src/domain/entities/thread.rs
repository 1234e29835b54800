//! Thread aggregation record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Message, MessageId};

/// Aggregation record for a message thread.
///
/// A thread's id is stable and always equals its root message's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageThread {
    /// Thread id, equal to the root message's id.
    pub id: MessageId,
    /// Number of replies under the root.
    pub reply_count: u32,
    /// Whether the viewer follows this thread.
    #[serde(default)]
    pub is_following: bool,
    /// Creation time of the most recent reply, if any.
    #[serde(default)]
    pub last_reply_at: Option<DateTime<Utc>>,
}

impl MessageThread {
    /// Creates a new thread record.
    #[must_use]
    pub fn new(id: impl Into<MessageId>, reply_count: u32, is_following: bool) -> Self {
        Self {
            id: id.into(),
            reply_count,
            is_following,
            last_reply_at: None,
        }
    }

    /// Sets the last reply timestamp.
    #[must_use]
    pub const fn with_last_reply_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.last_reply_at = Some(timestamp);
        self
    }

    /// Synthesizes a thread record from a root message whose aggregation
    /// record has not been loaded, using the counters denormalized onto
    /// the root itself.
    #[must_use]
    pub fn synthetic(root: &Message) -> Self {
        Self {
            id: root.id(),
            reply_count: root.reply_count(),
            is_following: root.is_following().unwrap_or(false),
            last_reply_at: None,
        }
    }
}
