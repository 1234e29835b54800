//! Channel view use case.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{ChannelId, MessageId, UserId};
use crate::domain::intents::Intent;
use crate::domain::ports::IntentSink;
use crate::domain::services::{VisibleWindowSelector, WindowQuery, WindowSelection};
use crate::domain::snapshot::StateSnapshot;

/// Opens channel views and forwards the side effects the pure selector
/// only reports: the initial fetch on first load, and read-marker updates.
#[derive(Clone)]
pub struct ChannelViewUseCase {
    sink: Arc<dyn IntentSink>,
}

impl ChannelViewUseCase {
    /// Creates a new channel view use case.
    #[must_use]
    pub const fn new(sink: Arc<dyn IntentSink>) -> Self {
        Self { sink }
    }

    /// Selects the visible window and triggers a fetch of the newest
    /// messages when the channel has never been loaded.
    #[must_use]
    pub fn open(&self, snapshot: &StateSnapshot, query: &WindowQuery) -> WindowSelection {
        let selection = VisibleWindowSelector::select(snapshot, query);

        if selection.is_first_load {
            debug!(channel_id = %query.channel_id, "first load, requesting newest messages");
            self.sink.dispatch(Intent::LoadNewestMessages {
                channel_id: query.channel_id,
            });
        }

        selection
    }

    /// Records that the viewer is looking at the channel and marks it read.
    pub fn viewed(&self, channel_id: impl Into<ChannelId>) {
        let channel_id = channel_id.into();
        self.sink.dispatch(Intent::MarkChannelViewed { channel_id });
        self.sink.dispatch(Intent::MarkChannelRead { channel_id });
    }

    /// Starts or stops following a thread on behalf of the viewer.
    pub fn set_thread_follow(
        &self,
        viewer_id: impl Into<UserId>,
        thread_id: impl Into<MessageId>,
        following: bool,
    ) {
        self.sink.dispatch(Intent::FollowThread {
            viewer_id: viewer_id.into(),
            thread_id: thread_id.into(),
            following,
        });
    }
}
