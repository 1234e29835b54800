//! Dispatchable state-mutating intents.

use serde::{Deserialize, Serialize};

use super::entities::{ChannelId, MessageId, UserId};

/// A named intent the host application's store knows how to apply.
///
/// Each variant carries the minimal identifiers the host needs; the
/// mutation itself (and its error handling) belongs to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Start or stop following a thread.
    FollowThread {
        #[allow(missing_docs)]
        viewer_id: UserId,
        #[allow(missing_docs)]
        thread_id: MessageId,
        /// Desired follow state.
        following: bool,
    },
    /// Mark everything from the given message onward as unread.
    MarkMessageUnread {
        #[allow(missing_docs)]
        message_id: MessageId,
    },
    /// Mark the channel read.
    MarkChannelRead {
        #[allow(missing_docs)]
        channel_id: ChannelId,
    },
    /// Record that the viewer is currently looking at the channel.
    MarkChannelViewed {
        #[allow(missing_docs)]
        channel_id: ChannelId,
    },
    /// Pin a message to its channel.
    PinMessage {
        #[allow(missing_docs)]
        message_id: MessageId,
    },
    /// Remove a message's pin.
    UnpinMessage {
        #[allow(missing_docs)]
        message_id: MessageId,
    },
    /// Save a message to the viewer's saved list.
    SaveMessage {
        #[allow(missing_docs)]
        message_id: MessageId,
    },
    /// Remove a message from the viewer's saved list.
    UnsaveMessage {
        #[allow(missing_docs)]
        message_id: MessageId,
    },
    /// Open the message for editing.
    EditMessage {
        #[allow(missing_docs)]
        message_id: MessageId,
    },
    /// Delete a message.
    DeleteMessage {
        #[allow(missing_docs)]
        message_id: MessageId,
    },
    /// Fetch the newest messages of a channel from the server.
    LoadNewestMessages {
        #[allow(missing_docs)]
        channel_id: ChannelId,
    },
}
