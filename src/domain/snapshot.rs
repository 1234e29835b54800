//! Immutable view of the application state store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::config::ClientConfig;
use super::entities::{
    Channel, ChannelChunk, ChannelId, MentionKey, Message, MessageId, MessageThread, ReadState,
    UserProfile,
};

/// A queryable snapshot of the state owned by the host application.
///
/// The host store mutates the snapshot through the `put_*`/`set_*` methods
/// between render passes; the resolvers and selectors in this crate only
/// read it. Every mutation bumps [`StateSnapshot::version`], which
/// memoizing callers use as a cache key.
///
/// All queries are total: missing data yields `None` or a documented
/// default, never an error.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    version: u64,
    config: ClientConfig,
    viewer: UserProfile,
    collapsed_threads_preference: Option<bool>,
    messages: HashMap<MessageId, Message>,
    channels: HashMap<ChannelId, Channel>,
    threads: HashMap<MessageId, MessageThread>,
    // Key present with an empty vec means "loaded, nothing cached";
    // key absent means the channel was never loaded at all.
    chunks: HashMap<ChannelId, Vec<ChannelChunk>>,
    read_states: HashMap<ChannelId, ReadState>,
}

impl StateSnapshot {
    /// Creates an empty snapshot for the given viewer.
    #[must_use]
    pub fn new(viewer: UserProfile) -> Self {
        Self {
            version: 0,
            config: ClientConfig::default(),
            viewer,
            collapsed_threads_preference: None,
            messages: HashMap::new(),
            channels: HashMap::new(),
            threads: HashMap::new(),
            chunks: HashMap::new(),
            read_states: HashMap::new(),
        }
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Monotonic counter bumped on every mutation.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Replaces the client configuration.
    pub fn set_config(&mut self, config: ClientConfig) {
        self.config = config;
        self.touch();
    }

    /// Sets the viewer's thread-aggregation preference.
    pub fn set_collapsed_threads_preference(&mut self, preference: Option<bool>) {
        self.collapsed_threads_preference = preference;
        self.touch();
    }

    /// Inserts or replaces a message.
    pub fn put_message(&mut self, message: Message) {
        self.messages.insert(message.id(), message);
        self.touch();
    }

    /// Inserts or replaces a channel.
    pub fn put_channel(&mut self, channel: Channel) {
        self.channels.insert(channel.id(), channel);
        self.touch();
    }

    /// Inserts or replaces a thread aggregation record.
    pub fn put_thread(&mut self, thread: MessageThread) {
        self.threads.insert(thread.id, thread);
        self.touch();
    }

    /// Inserts or replaces a channel's read state.
    pub fn put_read_state(&mut self, read_state: ReadState) {
        self.read_states.insert(read_state.channel_id, read_state);
        self.touch();
    }

    /// Replaces the cached chunk list for a channel. An empty list still
    /// marks the channel as loaded.
    pub fn set_chunks(&mut self, channel_id: impl Into<ChannelId>, chunks: Vec<ChannelChunk>) {
        self.chunks.insert(channel_id.into(), chunks);
        self.touch();
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.get(&id)
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(&id)
    }

    /// The thread aggregation record rooted at `root_id`, if loaded.
    #[must_use]
    pub fn thread(&self, root_id: MessageId) -> Option<&MessageThread> {
        self.threads.get(&root_id)
    }

    /// The thread record for a root message, synthesizing one from the
    /// root's own counters when no record is loaded.
    #[must_use]
    pub fn thread_or_synthetic(&self, root: &Message) -> MessageThread {
        self.threads
            .get(&root.id())
            .cloned()
            .unwrap_or_else(|| MessageThread::synthetic(root))
    }

    /// The cached chunk list for a channel; `None` means never loaded.
    #[must_use]
    pub fn chunks_in_channel(&self, channel_id: ChannelId) -> Option<&[ChannelChunk]> {
        self.chunks.get(&channel_id).map(Vec::as_slice)
    }

    /// True when no chunk list was ever cached for the channel.
    #[must_use]
    pub fn is_first_load(&self, channel_id: ChannelId) -> bool {
        !self.chunks.contains_key(&channel_id)
    }

    /// The chunk abutting the newest known message of the channel.
    #[must_use]
    pub fn recent_chunk(&self, channel_id: ChannelId) -> Option<&ChannelChunk> {
        self.chunks_in_channel(channel_id)?
            .iter()
            .find(|chunk| chunk.is_at_newest())
    }

    /// The chunk containing the given message in the given channel.
    #[must_use]
    pub fn chunk_around(
        &self,
        message_id: MessageId,
        channel_id: ChannelId,
    ) -> Option<&ChannelChunk> {
        self.chunks_in_channel(channel_id)?
            .iter()
            .find(|chunk| chunk.contains(message_id))
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn read_state(&self, channel_id: ChannelId) -> Option<&ReadState> {
        self.read_states.get(&channel_id)
    }

    /// Time the viewer last viewed the channel, if known.
    #[must_use]
    pub fn last_viewed_at(&self, channel_id: ChannelId) -> Option<DateTime<Utc>> {
        self.read_states
            .get(&channel_id)
            .and_then(|state| state.last_viewed_at)
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn viewer(&self) -> &UserProfile {
        &self.viewer
    }

    /// The viewer's derived mention trigger set.
    #[must_use]
    pub fn viewer_mention_keys(&self) -> Vec<MentionKey> {
        self.viewer.mention_keys()
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether thread aggregation is enabled for the viewer, combining the
    /// server setting with the viewer preference.
    #[must_use]
    pub fn is_collapsed_threads_enabled(&self) -> bool {
        self.config
            .collapsed_threads_enabled(self.collapsed_threads_preference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::CollapsedThreadsSetting;
    use crate::domain::entities::ChannelKind;

    fn snapshot() -> StateSnapshot {
        StateSnapshot::new(UserProfile::new(7_u64, "alice"))
    }

    #[test]
    fn test_version_bumps_on_mutation() {
        let mut snap = snapshot();
        let before = snap.version();
        snap.put_message(Message::new(1_u64, 100_u64, 7_u64, "hi", Utc::now()));
        assert!(snap.version() > before);
    }

    #[test]
    fn test_first_load_requires_absent_key() {
        let mut snap = snapshot();
        assert!(snap.is_first_load(ChannelId(100)));

        snap.set_chunks(100_u64, Vec::new());
        assert!(snap.is_first_load(ChannelId(200)));
        assert!(!snap.is_first_load(ChannelId(100)));
    }

    #[test]
    fn test_recent_chunk_lookup() {
        let mut snap = snapshot();
        snap.set_chunks(
            100_u64,
            vec![
                ChannelChunk::new(vec![MessageId(1), MessageId(2)]).at_oldest(),
                ChannelChunk::new(vec![MessageId(4), MessageId(5)]).at_newest(),
            ],
        );

        let recent = snap.recent_chunk(ChannelId(100)).unwrap();
        assert_eq!(recent.order(), &[MessageId(4), MessageId(5)]);
        assert!(snap.recent_chunk(ChannelId(999)).is_none());
    }

    #[test]
    fn test_chunk_around_message() {
        let mut snap = snapshot();
        snap.set_chunks(
            100_u64,
            vec![
                ChannelChunk::new(vec![MessageId(1), MessageId(2)]),
                ChannelChunk::new(vec![MessageId(4), MessageId(5)]).at_newest(),
            ],
        );

        let chunk = snap.chunk_around(MessageId(2), ChannelId(100)).unwrap();
        assert!(chunk.contains(MessageId(1)));
        assert!(snap.chunk_around(MessageId(9), ChannelId(100)).is_none());
    }

    #[test]
    fn test_thread_or_synthetic_prefers_loaded_record() {
        let mut snap = snapshot();
        let root = Message::new(1_u64, 100_u64, 7_u64, "root", Utc::now()).with_reply_count(2);
        snap.put_message(root.clone());
        snap.put_thread(MessageThread::new(1_u64, 5, true));

        let thread = snap.thread_or_synthetic(&root);
        assert_eq!(thread.reply_count, 5);
        assert!(thread.is_following);
    }

    #[test]
    fn test_thread_or_synthetic_falls_back() {
        let snap = snapshot();
        let root = Message::new(1_u64, 100_u64, 7_u64, "root", Utc::now()).with_reply_count(2);

        let thread = snap.thread_or_synthetic(&root);
        assert_eq!(thread.reply_count, 2);
        assert!(!thread.is_following);
    }

    #[test]
    fn test_collapsed_threads_combines_config_and_preference() {
        let mut snap = snapshot();
        assert!(!snap.is_collapsed_threads_enabled());

        snap.set_config(ClientConfig {
            collapsed_threads: CollapsedThreadsSetting::DefaultOn,
            ..ClientConfig::default()
        });
        assert!(snap.is_collapsed_threads_enabled());

        snap.set_collapsed_threads_preference(Some(false));
        assert!(!snap.is_collapsed_threads_enabled());
    }

    #[test]
    fn test_channel_lookup() {
        let mut snap = snapshot();
        snap.put_channel(Channel::new(100_u64, "town-square", ChannelKind::Open));
        assert!(snap.channel(ChannelId(100)).is_some());
        assert!(snap.channel(ChannelId(999)).is_none());
    }
}
