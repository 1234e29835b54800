//! Client configuration values.

use serde::{Deserialize, Serialize};

/// Server-side switch for thread aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapsedThreadsSetting {
    /// Thread aggregation is unavailable.
    Disabled,
    /// Available, off unless the viewer opts in.
    #[default]
    DefaultOff,
    /// Available, on unless the viewer opts out.
    DefaultOn,
    /// Forced on for everyone.
    AlwaysOn,
}

/// Client configuration, as provided by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Thread aggregation availability.
    #[serde(default)]
    pub collapsed_threads: CollapsedThreadsSetting,
    /// Seconds after creation during which a message stays editable.
    /// `None` means no limit.
    #[serde(default)]
    pub post_edit_time_limit: Option<i64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            collapsed_threads: CollapsedThreadsSetting::DefaultOff,
            post_edit_time_limit: None,
        }
    }
}

impl ClientConfig {
    /// Resolves whether thread aggregation is enabled for a viewer with
    /// the given preference.
    #[must_use]
    pub fn collapsed_threads_enabled(&self, viewer_preference: Option<bool>) -> bool {
        match self.collapsed_threads {
            CollapsedThreadsSetting::Disabled => false,
            CollapsedThreadsSetting::AlwaysOn => true,
            CollapsedThreadsSetting::DefaultOff => viewer_preference.unwrap_or(false),
            CollapsedThreadsSetting::DefaultOn => viewer_preference.unwrap_or(true),
        }
    }
}
