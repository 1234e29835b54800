//! Read state entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ChannelId;

/// Read state for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadState {
    /// Channel ID.
    pub channel_id: ChannelId,
    /// Time the viewer last viewed the channel.
    pub last_viewed_at: Option<DateTime<Utc>>,
    /// Number of unread mentions.
    #[serde(default)]
    pub mention_count: u32,
}

impl ReadState {
    /// Creates a new read state.
    #[must_use]
    pub fn new(channel_id: ChannelId, last_viewed_at: Option<DateTime<Utc>>) -> Self {
        Self {
            channel_id,
            last_viewed_at,
            mention_count: 0,
        }
    }

    /// Sets the mention count.
    #[must_use]
    pub const fn with_mention_count(mut self, count: u32) -> Self {
        self.mention_count = count;
        self
    }
}
