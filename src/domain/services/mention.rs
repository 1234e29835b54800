use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::MentionKey;

/// At-mention extraction and trigger matching.
pub struct MentionMatcher;

impl MentionMatcher {
    /// Extracts every at-mention token from message text, '@' included.
    #[must_use]
    pub fn at_mentions(text: &str) -> Vec<&str> {
        // Matches "@handle" not preceded by a word character, so
        // "name@host" is not a mention.
        static AT_MENTION_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"(?i)\B@[a-z0-9.\-_:]+").unwrap());

        if !text.contains('@') {
            return Vec::new();
        }

        AT_MENTION_RE
            .find_iter(text)
            .map(|m| m.as_str())
            .collect()
    }

    /// Whether any extracted mention token matches one of the viewer's
    /// mention keys. Keys without a leading '@' cannot match an at-mention
    /// token; matching is case-insensitive unless the key says otherwise.
    #[must_use]
    pub fn matches_mention_keys(tokens: &[&str], keys: &[MentionKey]) -> bool {
        keys.iter().any(|key| {
            if !key.key().starts_with('@') {
                return false;
            }
            if key.is_case_sensitive() {
                tokens.iter().any(|token| *token == key.key())
            } else {
                tokens
                    .iter()
                    .any(|token| token.eq_ignore_ascii_case(key.key()))
            }
        })
    }

    /// Whether the given text at-mentions a viewer with the given keys.
    #[must_use]
    pub fn text_mentions_viewer(text: &str, keys: &[MentionKey]) -> bool {
        let tokens = Self::at_mentions(text);
        if tokens.is_empty() {
            return false;
        }
        Self::matches_mention_keys(&tokens, keys)
    }
}
