//! Renderable rows for a message list window.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::MessageId;
use crate::domain::snapshot::StateSnapshot;

/// One row of a rendered message list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListRow {
    /// A message row.
    Message(MessageId),
    /// Separator starting a new calendar day (UTC).
    DateLine(NaiveDate),
    /// The "new messages" separator.
    NewMessagesLine,
}

/// Turns a window of message ids into renderable rows.
pub struct RowBuilder;

impl RowBuilder {
    /// Builds the row list for `ids` (ascending creation order).
    ///
    /// A [`ListRow::DateLine`] precedes the first message of each calendar
    /// day. When `indicate_new_messages` is set and a last-viewed time is
    /// known, a single [`ListRow::NewMessagesLine`] precedes the oldest
    /// message created after it that the viewer did not author.
    /// Unresolvable ids are skipped.
    #[must_use]
    pub fn build_rows(
        snapshot: &StateSnapshot,
        ids: &[MessageId],
        last_viewed_at: Option<DateTime<Utc>>,
        indicate_new_messages: bool,
    ) -> Vec<ListRow> {
        let viewer_id = snapshot.viewer().id();
        let mut rows = Vec::with_capacity(ids.len() + 2);
        let mut current_date: Option<NaiveDate> = None;
        let mut separator_placed = false;

        for id in ids {
            let Some(message) = snapshot.message(*id) else {
                continue;
            };

            let date = message.created_at().date_naive();
            if current_date != Some(date) {
                rows.push(ListRow::DateLine(date));
                current_date = Some(date);
            }

            if indicate_new_messages
                && !separator_placed
                && let Some(seen) = last_viewed_at
                && message.created_at() > seen
                && message.author_id() != viewer_id
            {
                rows.push(ListRow::NewMessagesLine);
                separator_placed = true;
            }

            rows.push(ListRow::Message(*id));
        }

        rows
    }
}
