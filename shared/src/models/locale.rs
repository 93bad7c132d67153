//! Locale Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported UI locales, used as the first path segment (`/en/...`, `/vi/...`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Vi,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Vi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Vi => "vi",
        }
    }

    /// Split a locale-prefixed path into its locale and the remainder.
    ///
    /// `/en/manage/orders` → `(En, "/manage/orders")`, `/vi` → `(Vi, "")`.
    /// Returns `None` when the first segment is not a supported locale.
    pub fn strip_prefix(path: &str) -> Option<(Locale, &str)> {
        let trimmed = path.strip_prefix('/')?;
        let (segment, rest) = match trimmed.find('/') {
            Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
            None => (trimmed, ""),
        };
        let locale = segment.parse().ok()?;
        Some((locale, rest))
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "vi" => Ok(Self::Vi),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_prefix_splits_locale_and_rest() {
        assert_eq!(
            Locale::strip_prefix("/en/manage/orders"),
            Some((Locale::En, "/manage/orders"))
        );
        assert_eq!(Locale::strip_prefix("/vi"), Some((Locale::Vi, "")));
        assert_eq!(Locale::strip_prefix("/vi/"), Some((Locale::Vi, "/")));
    }

    #[test]
    fn strip_prefix_rejects_unknown_segments() {
        assert_eq!(Locale::strip_prefix("/fr/login"), None);
        assert_eq!(Locale::strip_prefix("/english/login"), None);
        assert_eq!(Locale::strip_prefix("/"), None);
        assert_eq!(Locale::strip_prefix("en/login"), None);
    }
}
