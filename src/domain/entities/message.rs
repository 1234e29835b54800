use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChannelId, UserId};

/// Unique identifier for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MessageId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.parse().unwrap_or(0))
    }
}

/// Message type.
///
/// Everything other than [`MessageKind::Normal`] is generated by the
/// server (join/leave notices, channel property changes) rather than
/// typed by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum MessageKind {
    #[default]
    Normal,
    JoinChannel,
    LeaveChannel,
    AddToChannel,
    RemoveFromChannel,
    HeaderChange,
    PurposeChange,
    DisplaynameChange,
    ChannelArchived,
    ChannelUnarchived,
}

impl MessageKind {
    /// Returns true if this is a regular user-authored message.
    #[must_use]
    pub const fn is_regular(self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Returns true if this is a system-generated message.
    #[must_use]
    pub const fn is_system(self) -> bool {
        !self.is_regular()
    }
}

/// Chat message entity.
///
/// A message with no `root_id` is itself a thread root. `reply_count` and
/// `is_following` mirror the aggregation counters the server denormalizes
/// onto root messages, so a thread can be synthesized from the root alone
/// before its aggregation record is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Message {
    id: MessageId,
    channel_id: ChannelId,
    author_id: UserId,
    text: String,
    created_at: DateTime<Utc>,
    edited_at: Option<DateTime<Utc>>,
    kind: MessageKind,
    #[serde(default)]
    root_id: Option<MessageId>,
    #[serde(default)]
    pinned: bool,
    #[serde(default)]
    reply_count: u32,
    #[serde(default)]
    is_following: Option<bool>,
}

#[allow(missing_docs)]
impl Message {
    #[must_use]
    pub fn new(
        id: impl Into<MessageId>,
        channel_id: impl Into<ChannelId>,
        author_id: impl Into<UserId>,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            author_id: author_id.into(),
            text: text.into(),
            created_at,
            edited_at: None,
            kind: MessageKind::Normal,
            root_id: None,
            pinned: false,
            reply_count: 0,
            is_following: None,
        }
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_root(mut self, root_id: impl Into<MessageId>) -> Self {
        self.root_id = Some(root_id.into());
        self
    }

    #[must_use]
    pub const fn with_edited_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.edited_at = Some(timestamp);
        self
    }

    #[must_use]
    pub const fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    #[must_use]
    pub const fn with_reply_count(mut self, count: u32) -> Self {
        self.reply_count = count;
        self
    }

    #[must_use]
    pub const fn with_following(mut self, following: bool) -> Self {
        self.is_following = Some(following);
        self
    }

    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub const fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn edited_at(&self) -> Option<DateTime<Utc>> {
        self.edited_at
    }

    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    #[must_use]
    pub const fn root_id(&self) -> Option<MessageId> {
        self.root_id
    }

    /// The id of the thread this message belongs to: its root's id, or its
    /// own id when the message is itself a root.
    #[must_use]
    pub fn thread_root_id(&self) -> MessageId {
        self.root_id.unwrap_or(self.id)
    }

    /// Returns true when the message starts its own thread.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.root_id.is_none()
    }

    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        self.pinned
    }

    #[must_use]
    pub const fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }

    #[must_use]
    pub const fn is_system(&self) -> bool {
        self.kind.is_system()
    }

    #[must_use]
    pub const fn reply_count(&self) -> u32 {
        self.reply_count
    }

    #[must_use]
    pub const fn is_following(&self) -> Option<bool> {
        self.is_following
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let message = Message::new(1_u64, 100_u64, 7_u64, "Hello, world!", Utc::now());

        assert_eq!(message.id().as_u64(), 1);
        assert_eq!(message.channel_id().as_u64(), 100);
        assert_eq!(message.text(), "Hello, world!");
        assert!(message.is_root());
        assert!(!message.is_edited());
        assert!(!message.is_system());
        assert_eq!(message.reply_count(), 0);
    }

    #[test]
    fn test_thread_root_id_for_reply() {
        let reply = Message::new(2_u64, 100_u64, 7_u64, "a reply", Utc::now()).with_root(1_u64);

        assert!(!reply.is_root());
        assert_eq!(reply.thread_root_id().as_u64(), 1);
    }

    #[test]
    fn test_thread_root_id_for_root() {
        let root = Message::new(1_u64, 100_u64, 7_u64, "a root", Utc::now());
        assert_eq!(root.thread_root_id(), root.id());
    }

    #[test]
    fn test_message_kind_is_system() {
        assert!(MessageKind::Normal.is_regular());
        assert!(!MessageKind::JoinChannel.is_regular());
        assert!(MessageKind::JoinChannel.is_system());
        assert!(MessageKind::HeaderChange.is_system());
    }

    #[test]
    fn test_message_id_from_string() {
        let id = MessageId::from("42");
        assert_eq!(id.as_u64(), 42);
    }

    #[test]
    fn test_message_deserializes_from_wire_shape() {
        let message: Message = serde_json::from_value(serde_json::json!({
            "id": 1,
            "channel_id": 100,
            "author_id": 7,
            "text": "hi",
            "created_at": "2024-05-01T12:00:00Z",
            "edited_at": null,
            "kind": "join_channel",
        }))
        .unwrap();

        assert_eq!(message.id(), MessageId(1));
        assert!(message.is_system());
        assert!(message.is_root());
        assert_eq!(message.reply_count(), 0);
    }
}
