//! User profile entity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.parse().unwrap_or(0))
    }
}

bitflags::bitflags! {
    /// Parsed role set of a user.
    ///
    /// The wire form is a space-separated role string
    /// (e.g. `"system_user system_admin"`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct UserRoles: u8 {
        const SYSTEM_USER = 1 << 0;
        const SYSTEM_ADMIN = 1 << 1;
        const SYSTEM_GUEST = 1 << 2;
        const BOT = 1 << 3;
    }
}

impl UserRoles {
    /// Parses a space-separated role string. Unknown roles are ignored.
    #[must_use]
    pub fn from_role_string(roles: &str) -> Self {
        let mut parsed = Self::empty();
        for role in roles.split_whitespace() {
            match role {
                "system_user" => parsed |= Self::SYSTEM_USER,
                "system_admin" => parsed |= Self::SYSTEM_ADMIN,
                "system_guest" => parsed |= Self::SYSTEM_GUEST,
                "bot" => parsed |= Self::BOT,
                _ => {}
            }
        }
        parsed
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        self.contains(Self::SYSTEM_ADMIN)
    }
}

/// Notification level for desktop and push notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    /// Inherit the server default.
    #[default]
    Default,
    /// Notify on every message.
    All,
    /// Notify on mentions only.
    Mention,
    /// Never notify.
    None,
}

/// Per-user notification properties.
///
/// `mention_keys` is stored in its wire form, a comma-separated list of
/// custom trigger words; [`UserProfile::mention_keys`] derives the full
/// trigger set from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyProps {
    #[serde(default)]
    pub desktop: NotifyLevel,
    #[serde(default)]
    pub push: NotifyLevel,
    #[serde(default)]
    pub mention_keys: String,
    /// Whether the user's first name acts as a mention trigger.
    #[serde(default)]
    pub first_name_trigger: bool,
    /// Whether channel-wide mentions (`@channel`, `@all`, `@here`) apply.
    #[serde(default = "default_true")]
    pub channel_trigger: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for NotifyProps {
    fn default() -> Self {
        Self {
            desktop: NotifyLevel::Default,
            push: NotifyLevel::Default,
            mention_keys: String::new(),
            first_name_trigger: false,
            channel_trigger: true,
        }
    }
}

/// A token whose presence in message text denotes an at-mention of a
/// specific viewer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MentionKey {
    key: String,
    case_sensitive: bool,
}

impl MentionKey {
    /// Creates a case-insensitive key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            case_sensitive: false,
        }
    }

    /// Creates a case-sensitive key.
    #[must_use]
    pub fn case_sensitive(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            case_sensitive: true,
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

/// User profile entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct UserProfile {
    id: UserId,
    username: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    nickname: String,
    #[serde(default)]
    bot: bool,
    #[serde(default)]
    roles: UserRoles,
    #[serde(default)]
    notify_props: NotifyProps,
}

#[allow(missing_docs)]
impl UserProfile {
    #[must_use]
    pub fn new(id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            nickname: String::new(),
            bot: false,
            roles: UserRoles::SYSTEM_USER,
            notify_props: NotifyProps::default(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }

    #[must_use]
    pub const fn with_bot(mut self, bot: bool) -> Self {
        self.bot = bot;
        self
    }

    #[must_use]
    pub const fn with_roles(mut self, roles: UserRoles) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn with_notify_props(mut self, notify_props: NotifyProps) -> Self {
        self.notify_props = notify_props;
        self
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub const fn is_bot(&self) -> bool {
        self.bot
    }

    #[must_use]
    pub const fn roles(&self) -> UserRoles {
        self.roles
    }

    #[must_use]
    pub const fn notify_props(&self) -> &NotifyProps {
        &self.notify_props
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        if !self.nickname.is_empty() {
            self.nickname.clone()
        } else if !self.first_name.is_empty() || !self.last_name.is_empty() {
            format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string()
        } else {
            self.username.clone()
        }
    }

    /// Derives the full mention trigger set for this user: the custom
    /// comma-separated keys, the first name (case-sensitive) when enabled,
    /// the channel-wide triggers when enabled, and always `@username`.
    #[must_use]
    pub fn mention_keys(&self) -> Vec<MentionKey> {
        let mut keys = Vec::new();

        for raw in self.notify_props.mention_keys.split(',') {
            if !raw.is_empty() {
                keys.push(MentionKey::new(raw));
            }
        }

        if self.notify_props.first_name_trigger && !self.first_name.is_empty() {
            keys.push(MentionKey::case_sensitive(self.first_name.clone()));
        }

        if self.notify_props.channel_trigger {
            keys.push(MentionKey::new("@channel"));
            keys.push(MentionKey::new("@all"));
            keys.push(MentionKey::new("@here"));
        }

        let username_key = format!("@{}", self.username);
        if !keys.iter().any(|k| k.key() == username_key) {
            keys.push(MentionKey::new(username_key));
        }

        keys
    }
}
