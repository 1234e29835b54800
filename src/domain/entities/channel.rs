//! Channel entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

impl ChannelId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChannelId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<&str> for ChannelId {
    fn from(value: &str) -> Self {
        Self(value.parse().unwrap_or(0))
    }
}

/// Unique identifier for a team (workspace of channels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u64);

impl TeamId {
    /// Returns the underlying u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TeamId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Public channel anyone on the team can join.
    #[default]
    Open,
    /// Invite-only channel.
    Private,
    /// One-to-one direct message channel.
    Direct,
    /// Multi-party direct message channel.
    Group,
}

impl ChannelKind {
    /// Returns true for the two direct-message variants.
    #[must_use]
    pub const fn is_direct(self) -> bool {
        matches!(self, Self::Direct | Self::Group)
    }
}

/// Channel entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Channel {
    id: ChannelId,
    name: String,
    display_name: String,
    kind: ChannelKind,
    #[serde(default)]
    team_id: Option<TeamId>,
    #[serde(default)]
    archived_at: Option<DateTime<Utc>>,
}

#[allow(missing_docs)]
impl Channel {
    #[must_use]
    pub fn new(id: impl Into<ChannelId>, name: impl Into<String>, kind: ChannelKind) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            display_name: name.clone(),
            name,
            kind,
            team_id: None,
            archived_at: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn with_team(mut self, team_id: impl Into<TeamId>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    #[must_use]
    pub const fn with_archived_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.archived_at = Some(timestamp);
        self
    }

    #[must_use]
    pub const fn id(&self) -> ChannelId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub const fn kind(&self) -> ChannelKind {
        self.kind
    }

    #[must_use]
    pub const fn team_id(&self) -> Option<TeamId> {
        self.team_id
    }

    #[must_use]
    pub const fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    /// An archived channel keeps its history but accepts no new activity.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_creation() {
        let channel = Channel::new(100_u64, "town-square", ChannelKind::Open)
            .with_display_name("Town Square");

        assert_eq!(channel.id().as_u64(), 100);
        assert_eq!(channel.name(), "town-square");
        assert_eq!(channel.display_name(), "Town Square");
        assert!(!channel.is_archived());
    }

    #[test]
    fn test_channel_archived() {
        let channel =
            Channel::new(100_u64, "old-project", ChannelKind::Private).with_archived_at(Utc::now());
        assert!(channel.is_archived());
    }

    #[test]
    fn test_channel_kind_is_direct() {
        assert!(ChannelKind::Direct.is_direct());
        assert!(ChannelKind::Group.is_direct());
        assert!(!ChannelKind::Open.is_direct());
    }
}
