//! Cached message chunk.

use serde::{Deserialize, Serialize};

use super::MessageId;

/// A contiguous cached run of message ids for one channel.
///
/// Ids are ordered ascending by message creation time. `at_newest` marks
/// the chunk that abuts the newest known message of the channel (at most
/// one per channel), `at_oldest` the one reaching the start of history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelChunk {
    order: Vec<MessageId>,
    #[serde(default)]
    at_newest: bool,
    #[serde(default)]
    at_oldest: bool,
}

impl ChannelChunk {
    /// Creates a chunk from ascending message ids.
    #[must_use]
    pub fn new(order: Vec<MessageId>) -> Self {
        Self {
            order,
            at_newest: false,
            at_oldest: false,
        }
    }

    /// Marks the chunk as abutting the newest known message.
    #[must_use]
    pub fn at_newest(mut self) -> Self {
        self.at_newest = true;
        self
    }

    /// Marks the chunk as reaching the start of the channel's history.
    #[must_use]
    pub fn at_oldest(mut self) -> Self {
        self.at_oldest = true;
        self
    }

    /// The message ids in ascending creation order.
    #[must_use]
    pub fn order(&self) -> &[MessageId] {
        &self.order
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn is_at_newest(&self) -> bool {
        self.at_newest
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn is_at_oldest(&self) -> bool {
        self.at_oldest
    }

    /// Whether the chunk contains the given message id.
    #[must_use]
    pub fn contains(&self, id: MessageId) -> bool {
        self.order.contains(&id)
    }

    /// Id of the oldest message in the chunk.
    #[must_use]
    pub fn oldest_id(&self) -> Option<MessageId> {
        self.order.first().copied()
    }

    /// Id of the newest message in the chunk.
    #[must_use]
    pub fn newest_id(&self) -> Option<MessageId> {
        self.order.last().copied()
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
