use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::entities::{ChannelChunk, ChannelId, Message, MessageId};
use crate::domain::snapshot::StateSnapshot;

/// Inputs selecting the visible window of a channel's message list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowQuery {
    /// Channel whose messages are being viewed.
    pub channel_id: ChannelId,
    /// Message to center the window on (e.g. a permalink target).
    pub focus_message_id: Option<MessageId>,
    /// Unread boundary: creation time of the oldest unread message.
    pub unread_boundary: Option<DateTime<Utc>>,
    /// Whether an unread channel opens scrolled to the bottom instead of
    /// at the unread boundary.
    pub start_from_bottom_on_unread: bool,
}

impl WindowQuery {
    /// A query with no focus or unread boundary: newest messages win.
    #[must_use]
    pub fn recent(channel_id: impl Into<ChannelId>) -> Self {
        Self {
            channel_id: channel_id.into(),
            focus_message_id: None,
            unread_boundary: None,
            start_from_bottom_on_unread: false,
        }
    }

    /// Sets the focused message.
    #[must_use]
    pub fn with_focus(mut self, message_id: impl Into<MessageId>) -> Self {
        self.focus_message_id = Some(message_id.into());
        self
    }

    /// Sets the unread boundary.
    #[must_use]
    pub const fn with_unread_boundary(mut self, boundary: DateTime<Utc>) -> Self {
        self.unread_boundary = Some(boundary);
        self
    }

    /// Sets the bottom-anchored-on-unread behavior.
    #[must_use]
    pub const fn starting_from_bottom(mut self, start_from_bottom: bool) -> Self {
        self.start_from_bottom_on_unread = start_from_bottom;
        self
    }
}

/// The selected visible window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSelection {
    /// Message ids to render, ascending by creation time. Empty when no
    /// chunk matched.
    pub message_ids: Vec<MessageId>,
    /// Whether the window abuts the newest known message.
    pub at_newest: bool,
    /// Whether the window reaches the start of the channel's history.
    pub at_oldest: bool,
    /// Whether the "new messages" separator would be misleading and must
    /// be hidden: the view is bottom-anchored and the window does not
    /// include the unread boundary.
    pub suppress_new_separator: bool,
    /// Whether the channel has never had a chunk list cached; callers use
    /// this to trigger an initial fetch.
    pub is_first_load: bool,
    /// Creation time of the newest resolvable message in the window.
    pub latest_created_at: Option<DateTime<Utc>>,
    /// Time the viewer last viewed the channel, echoed from read state.
    pub last_viewed_at: Option<DateTime<Utc>>,
}

/// Selects the contiguous window of message ids to render for a channel.
pub struct VisibleWindowSelector;

impl VisibleWindowSelector {
    /// Computes the visible window for `query`.
    ///
    /// Selection precedence, first matching rule wins:
    /// 1. a resolvable focused message together with a set unread boundary
    ///    selects the chunk containing the focus;
    /// 2. a set unread boundary with a top-anchored view selects the chunk
    ///    covering the boundary;
    /// 3. otherwise the newest chunk.
    ///
    /// Total over incomplete data: an unmatched rule or missing chunk
    /// yields an empty window with both boundary flags false.
    #[must_use]
    #[instrument(level = "trace", skip(snapshot), fields(channel_id = %query.channel_id))]
    pub fn select(snapshot: &StateSnapshot, query: &WindowQuery) -> WindowSelection {
        let channel_id = query.channel_id;

        let chunk = if let Some(focus) = query.focus_message_id
            && snapshot.message(focus).is_some()
            && query.unread_boundary.is_some()
        {
            snapshot.chunk_around(focus, channel_id)
        } else if let Some(boundary) = query.unread_boundary
            && !query.start_from_bottom_on_unread
        {
            Self::unread_chunk(snapshot, channel_id, boundary)
        } else {
            snapshot.recent_chunk(channel_id)
        };

        let includes_boundary = chunk
            .is_some_and(|c| Self::includes_boundary(snapshot, c, query.unread_boundary));
        let suppress_new_separator = query.start_from_bottom_on_unread && !includes_boundary;

        let message_ids = chunk.map(|c| c.order().to_vec()).unwrap_or_default();
        let latest_created_at = message_ids
            .iter()
            .rev()
            .find_map(|id| snapshot.message(*id))
            .map(Message::created_at);

        WindowSelection {
            message_ids,
            at_newest: chunk.is_some_and(ChannelChunk::is_at_newest),
            at_oldest: chunk.is_some_and(ChannelChunk::is_at_oldest),
            suppress_new_separator,
            is_first_load: snapshot.is_first_load(channel_id),
            latest_created_at,
            last_viewed_at: snapshot.last_viewed_at(channel_id),
        }
    }

    /// The chunk covering the unread boundary. The newest chunk wins when
    /// it reaches back to the boundary; otherwise the first cached chunk
    /// whose time span contains it.
    fn unread_chunk(
        snapshot: &StateSnapshot,
        channel_id: ChannelId,
        boundary: DateTime<Utc>,
    ) -> Option<&ChannelChunk> {
        if let Some(recent) = snapshot.recent_chunk(channel_id)
            && Self::includes_boundary(snapshot, recent, Some(boundary))
        {
            return Some(recent);
        }

        snapshot
            .chunks_in_channel(channel_id)?
            .iter()
            .find(|chunk| Self::spans_boundary(snapshot, chunk, boundary))
    }

    /// A chunk includes the unread boundary when its oldest resolvable
    /// message was created at or before it. Unset boundaries and empty or
    /// unresolvable chunks are never included.
    fn includes_boundary(
        snapshot: &StateSnapshot,
        chunk: &ChannelChunk,
        boundary: Option<DateTime<Utc>>,
    ) -> bool {
        let Some(boundary) = boundary else {
            return false;
        };
        chunk
            .oldest_id()
            .and_then(|id| snapshot.message(id))
            .is_some_and(|oldest| oldest.created_at() <= boundary)
    }

    /// Whether the chunk's time span contains the boundary.
    fn spans_boundary(
        snapshot: &StateSnapshot,
        chunk: &ChannelChunk,
        boundary: DateTime<Utc>,
    ) -> bool {
        let oldest_before = chunk
            .oldest_id()
            .and_then(|id| snapshot.message(id))
            .is_some_and(|oldest| oldest.created_at() <= boundary);
        if !oldest_before {
            return false;
        }
        chunk.is_at_newest()
            || chunk
                .newest_id()
                .and_then(|id| snapshot.message(id))
                .is_some_and(|newest| newest.created_at() >= boundary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ChannelChunk, Message, ReadState, UserProfile};
    use test_case::test_case;

    fn ts(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(seconds, 0).unwrap()
    }

    /// Channel 100 with messages 1..=5 created at t=10,20,30,40,50 and
    /// chunks [1,2,3] (oldest) and [4,5] (newest).
    fn snapshot() -> StateSnapshot {
        let mut snap = StateSnapshot::new(UserProfile::new(7_u64, "alice"));
        for n in 1..=5_u64 {
            #[allow(clippy::cast_possible_wrap)]
            let created = ts(n as i64 * 10);
            snap.put_message(Message::new(n, 100_u64, 9_u64, format!("m{n}"), created));
        }
        snap.set_chunks(
            100_u64,
            vec![
                ChannelChunk::new(vec![MessageId(1), MessageId(2), MessageId(3)]).at_oldest(),
                ChannelChunk::new(vec![MessageId(4), MessageId(5)]).at_newest(),
            ],
        );
        snap
    }

    #[test]
    fn test_recent_chunk_selected_by_default() {
        let snap = snapshot();
        let selection = VisibleWindowSelector::select(&snap, &WindowQuery::recent(100_u64));

        assert_eq!(selection.message_ids, vec![MessageId(4), MessageId(5)]);
        assert!(selection.at_newest);
        assert!(!selection.at_oldest);
        assert!(!selection.is_first_load);
        assert_eq!(selection.latest_created_at, Some(ts(50)));
    }

    #[test]
    fn test_focus_rule_wins_over_unread_rule() {
        let snap = snapshot();
        let query = WindowQuery::recent(100_u64)
            .with_focus(2_u64)
            .with_unread_boundary(ts(45));
        let selection = VisibleWindowSelector::select(&snap, &query);

        assert_eq!(
            selection.message_ids,
            vec![MessageId(1), MessageId(2), MessageId(3)]
        );
        assert!(selection.at_oldest);
        assert!(!selection.at_newest);
    }

    #[test]
    fn test_focus_without_unread_boundary_falls_back_to_recent() {
        let snap = snapshot();
        let query = WindowQuery::recent(100_u64).with_focus(2_u64);
        let selection = VisibleWindowSelector::select(&snap, &query);

        assert_eq!(selection.message_ids, vec![MessageId(4), MessageId(5)]);
    }

    #[test]
    fn test_unresolvable_focus_falls_back() {
        let snap = snapshot();
        let query = WindowQuery::recent(100_u64)
            .with_focus(999_u64)
            .with_unread_boundary(ts(25));
        let selection = VisibleWindowSelector::select(&snap, &query);

        // Unread rule applies instead: boundary t=25 falls in [1,2,3].
        assert_eq!(
            selection.message_ids,
            vec![MessageId(1), MessageId(2), MessageId(3)]
        );
    }

    #[test]
    fn test_unread_rule_selects_covering_chunk() {
        let snap = snapshot();
        let query = WindowQuery::recent(100_u64).with_unread_boundary(ts(25));
        let selection = VisibleWindowSelector::select(&snap, &query);

        assert_eq!(
            selection.message_ids,
            vec![MessageId(1), MessageId(2), MessageId(3)]
        );
        assert!(!selection.suppress_new_separator);
    }

    #[test]
    fn test_unread_rule_prefers_recent_chunk_reaching_boundary() {
        let snap = snapshot();
        // Boundary t=45 sits inside the newest chunk's span.
        let query = WindowQuery::recent(100_u64).with_unread_boundary(ts(45));
        let selection = VisibleWindowSelector::select(&snap, &query);

        assert_eq!(selection.message_ids, vec![MessageId(4), MessageId(5)]);
        assert!(selection.at_newest);
    }

    #[test]
    fn test_bottom_anchored_unread_skips_unread_rule() {
        let snap = snapshot();
        let query = WindowQuery::recent(100_u64)
            .with_unread_boundary(ts(25))
            .starting_from_bottom(true);
        let selection = VisibleWindowSelector::select(&snap, &query);

        assert_eq!(selection.message_ids, vec![MessageId(4), MessageId(5)]);
        // The window excludes the boundary, so the separator would mislead.
        assert!(selection.suppress_new_separator);
    }

    #[test]
    fn test_bottom_anchored_window_including_boundary_keeps_separator() {
        let snap = snapshot();
        let query = WindowQuery::recent(100_u64)
            .with_unread_boundary(ts(45))
            .starting_from_bottom(true);
        let selection = VisibleWindowSelector::select(&snap, &query);

        assert_eq!(selection.message_ids, vec![MessageId(4), MessageId(5)]);
        assert!(!selection.suppress_new_separator);
    }

    #[test]
    fn test_no_chunks_yields_empty_window() {
        let snap = StateSnapshot::new(UserProfile::new(7_u64, "alice"));
        let selection = VisibleWindowSelector::select(&snap, &WindowQuery::recent(100_u64));

        assert!(selection.message_ids.is_empty());
        assert!(!selection.at_newest);
        assert!(!selection.at_oldest);
        assert!(selection.is_first_load);
        assert_eq!(selection.latest_created_at, None);
    }

    #[test]
    fn test_loaded_empty_channel_is_not_first_load() {
        let mut snap = StateSnapshot::new(UserProfile::new(7_u64, "alice"));
        snap.set_chunks(100_u64, Vec::new());
        let selection = VisibleWindowSelector::select(&snap, &WindowQuery::recent(100_u64));

        assert!(selection.message_ids.is_empty());
        assert!(!selection.is_first_load);
    }

    #[test]
    fn test_selector_is_idempotent() {
        let snap = snapshot();
        let query = WindowQuery::recent(100_u64)
            .with_unread_boundary(ts(25))
            .starting_from_bottom(true);

        let first = VisibleWindowSelector::select(&snap, &query);
        let second = VisibleWindowSelector::select(&snap, &query);
        assert_eq!(first, second);
    }

    #[test]
    fn test_last_viewed_at_echoed_from_read_state() {
        let mut snap = snapshot();
        snap.put_read_state(ReadState::new(ChannelId(100), Some(ts(35))));
        let selection = VisibleWindowSelector::select(&snap, &WindowQuery::recent(100_u64));

        assert_eq!(selection.last_viewed_at, Some(ts(35)));
    }

    #[test_case(true ; "bottom_anchored")]
    #[test_case(false ; "top_anchored")]
    fn test_no_boundary_never_includes(start_from_bottom: bool) {
        let snap = snapshot();
        let query = WindowQuery::recent(100_u64).starting_from_bottom(start_from_bottom);
        let selection = VisibleWindowSelector::select(&snap, &query);

        // With no unread boundary the separator is suppressed exactly for
        // bottom-anchored views.
        assert_eq!(selection.suppress_new_separator, start_from_bottom);
    }

    #[test]
    fn test_boundary_newer_than_everything_selects_recent() {
        let snap = snapshot();
        let query = WindowQuery::recent(100_u64).with_unread_boundary(ts(999));
        let selection = VisibleWindowSelector::select(&snap, &query);

        assert_eq!(selection.message_ids, vec![MessageId(4), MessageId(5)]);
    }

    #[test]
    fn test_boundary_older_than_cached_history_yields_empty_window() {
        let snap = snapshot();
        let query = WindowQuery::recent(100_u64).with_unread_boundary(ts(1));
        let selection = VisibleWindowSelector::select(&snap, &query);

        // No chunk reaches back to t=1, so no chunk covers the boundary.
        assert!(selection.message_ids.is_empty());
        assert!(!selection.at_newest);
        assert!(!selection.at_oldest);
    }
}
