use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::mention::MentionMatcher;
use crate::domain::entities::{MentionKey, Message, MessageId};
use crate::domain::snapshot::StateSnapshot;

/// Derived thread state for a single message, consumed by context-menu
/// view models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadContext {
    /// Canonical thread id for the message.
    pub thread_id: MessageId,
    /// Whether the viewer follows the thread.
    pub is_following: bool,
    /// Whether the viewer was at-mentioned in the thread's root message
    /// before any replies existed.
    pub is_mentioned_in_root: bool,
    /// Number of replies in the thread.
    pub reply_count: u32,
}

impl ThreadContext {
    /// The degenerate context used whenever thread state cannot or should
    /// not be resolved: the message stands for itself.
    #[must_use]
    pub const fn default_for(message_id: MessageId) -> Self {
        Self {
            thread_id: message_id,
            is_following: false,
            is_mentioned_in_root: false,
            reply_count: 0,
        }
    }
}

/// Resolves the thread context of a message against a state snapshot.
pub struct ThreadContextResolver;

impl ThreadContextResolver {
    /// Computes the thread context for `message`.
    ///
    /// Returns [`ThreadContext::default_for`] when thread aggregation is
    /// disabled, the message is system-generated, or the root message is
    /// not present in the snapshot. Absent data degrades to the defaults,
    /// never an error.
    #[must_use]
    #[instrument(level = "trace", skip_all, fields(message_id = %message.id()))]
    pub fn resolve(
        snapshot: &StateSnapshot,
        message: &Message,
        aggregation_enabled: bool,
        viewer_mention_keys: &[MentionKey],
    ) -> ThreadContext {
        if !aggregation_enabled || message.is_system() {
            return ThreadContext::default_for(message.id());
        }

        let Some(root) = snapshot.message(message.thread_root_id()) else {
            return ThreadContext::default_for(message.id());
        };

        let thread = snapshot.thread_or_synthetic(root);

        // The root author may have mentioned the viewer before anyone
        // replied; once replies exist the thread itself carries the state.
        let is_mentioned_in_root = thread.reply_count == 0
            && MentionMatcher::text_mentions_viewer(root.text(), viewer_mention_keys);

        ThreadContext {
            thread_id: thread.id,
            is_following: thread.is_following,
            is_mentioned_in_root,
            reply_count: thread.reply_count,
        }
    }
}
