//! Context-menu view model for a single message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::entities::{Message, UserId};
use crate::domain::services::{ThreadContext, ThreadContextResolver};
use crate::domain::snapshot::StateSnapshot;

/// Where the menu is being opened from.
///
/// Thread context is only meaningful in the message list and in the
/// thread sidebar; search results and overlays get the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuLocation {
    /// The main message list.
    #[default]
    Center,
    /// Root message in the thread sidebar.
    RhsRoot,
    /// Reply in the thread sidebar.
    RhsComment,
    /// Search results.
    Search,
    /// Anywhere else.
    NoWhere,
}

impl MenuLocation {
    /// Whether menus opened here show thread state.
    #[must_use]
    pub const fn shows_thread_context(self) -> bool {
        matches!(self, Self::Center | Self::RhsRoot | Self::RhsComment)
    }
}

/// Derived state backing a message's context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuContext {
    /// Thread state for the message (defaults outside eligible locations).
    pub thread: ThreadContext,
    /// Whether the containing channel is archived.
    pub channel_is_archived: bool,
    /// Whether the viewer may edit the message right now.
    pub can_edit: bool,
    /// Whether the viewer may delete the message.
    pub can_delete: bool,
    /// Whether thread aggregation is enabled for the viewer.
    pub is_collapsed_threads_enabled: bool,
    /// The viewer's id.
    pub viewer_id: UserId,
}

/// Builds [`MenuContext`] values from a snapshot.
pub struct MenuService;

impl MenuService {
    /// Computes the menu state for `message` as seen from `location` at
    /// time `now`.
    #[must_use]
    #[instrument(level = "trace", skip_all, fields(message_id = %message.id()))]
    pub fn build(
        snapshot: &StateSnapshot,
        message: &Message,
        location: MenuLocation,
        now: DateTime<Utc>,
    ) -> MenuContext {
        let collapsed_threads = snapshot.is_collapsed_threads_enabled();
        let aggregation_here = collapsed_threads && location.shows_thread_context();
        let mention_keys = snapshot.viewer_mention_keys();
        let thread =
            ThreadContextResolver::resolve(snapshot, message, aggregation_here, &mention_keys);

        let channel_is_archived = snapshot
            .channel(message.channel_id())
            .is_some_and(|channel| channel.is_archived());

        MenuContext {
            thread,
            channel_is_archived,
            can_edit: Self::can_edit(snapshot, message, channel_is_archived, now),
            can_delete: Self::can_delete(snapshot, message, channel_is_archived),
            is_collapsed_threads_enabled: collapsed_threads,
            viewer_id: snapshot.viewer().id(),
        }
    }

    /// The viewer may edit their own messages (admins may edit any),
    /// except system messages, messages in archived channels, and
    /// messages past the configured edit time limit.
    fn can_edit(
        snapshot: &StateSnapshot,
        message: &Message,
        channel_is_archived: bool,
        now: DateTime<Utc>,
    ) -> bool {
        if message.is_system() || channel_is_archived {
            return false;
        }

        let viewer = snapshot.viewer();
        let own = viewer.id() == message.author_id();
        if !own && !viewer.roles().is_admin() {
            return false;
        }

        match snapshot.config().post_edit_time_limit {
            None => true,
            Some(limit) => {
                now.signed_duration_since(message.created_at()).num_seconds() < limit
            }
        }
    }

    fn can_delete(snapshot: &StateSnapshot, message: &Message, channel_is_archived: bool) -> bool {
        if message.is_system() || channel_is_archived {
            return false;
        }
        let viewer = snapshot.viewer();
        viewer.id() == message.author_id() || viewer.roles().is_admin()
    }
}
