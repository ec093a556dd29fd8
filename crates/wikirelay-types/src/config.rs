//! Feed configuration schema.
//!
//! All structs support both `snake_case` and `camelCase` field names in
//! JSON via `#[serde(alias)]`. Unknown fields are silently ignored for
//! forward compatibility. Embed styling is keyed by [`StyleKind`], an
//! explicit enum lookup rather than stringly-typed config keys.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FeedError, Result};

/// Shared default function: returns `true`.
fn default_true() -> bool {
    true
}

/// Which embed style to apply to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    /// Administrative log entries.
    Log,

    /// Edits that grew the page.
    EditAdd,

    /// Edits that shrank the page.
    EditRemove,

    /// Edits that left the size unchanged.
    EditNeutral,
}

/// Color and icon for one notification branch.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmbedStyle {
    /// 24-bit RGB color of the embed stripe.
    #[serde(default)]
    pub color: u32,

    /// Author icon URL. Empty means no icon.
    #[serde(default)]
    pub icon: String,
}

impl EmbedStyle {
    fn new(color: u32) -> Self {
        Self {
            color,
            icon: String::new(),
        }
    }
}

fn default_log_style() -> EmbedStyle {
    EmbedStyle::new(0x3366cc)
}
fn default_add_style() -> EmbedStyle {
    EmbedStyle::new(0x00af89)
}
fn default_remove_style() -> EmbedStyle {
    EmbedStyle::new(0xdd3333)
}
fn default_neutral_style() -> EmbedStyle {
    EmbedStyle::new(0xa2a9b1)
}

/// Root configuration for the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Discord webhook endpoint the dispatcher delivers payloads to.
    #[serde(default, alias = "webhookUrl")]
    pub webhook_url: String,

    /// Whether log-entry parameters are rendered as embed fields.
    #[serde(default = "default_true", alias = "showLogParameters")]
    pub show_log_parameters: bool,

    /// Style for log entries.
    #[serde(default = "default_log_style")]
    pub log: EmbedStyle,

    /// Style for size-increasing edits.
    #[serde(default = "default_add_style", alias = "editAdd")]
    pub edit_add: EmbedStyle,

    /// Style for size-decreasing edits.
    #[serde(default = "default_remove_style", alias = "editRemove")]
    pub edit_remove: EmbedStyle,

    /// Style for size-neutral edits.
    #[serde(default = "default_neutral_style", alias = "editNeutral")]
    pub edit_neutral: EmbedStyle,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            show_log_parameters: true,
            log: default_log_style(),
            edit_add: default_add_style(),
            edit_remove: default_remove_style(),
            edit_neutral: default_neutral_style(),
        }
    }
}

impl FeedConfig {
    /// Look up the style for a notification branch.
    pub fn style(&self, kind: StyleKind) -> &EmbedStyle {
        match kind {
            StyleKind::Log => &self.log,
            StyleKind::EditAdd => &self.edit_add,
            StyleKind::EditRemove => &self.edit_remove,
            StyleKind::EditNeutral => &self.edit_neutral,
        }
    }

    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic validation beyond what serde checks.
    pub fn validate(&self) -> Result<()> {
        if self.webhook_url.is_empty() {
            return Err(FeedError::ConfigInvalid {
                reason: "webhook_url must be set".into(),
            });
        }
        for (name, style) in [
            ("log", &self.log),
            ("edit_add", &self.edit_add),
            ("edit_remove", &self.edit_remove),
            ("edit_neutral", &self.edit_neutral),
        ] {
            if style.color > 0xFF_FFFF {
                return Err(FeedError::ConfigInvalid {
                    reason: format!(
                        "{name} color {:#08x} exceeds 24 bits",
                        style.color
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid_styles() {
        let config = FeedConfig::default();
        assert!(config.show_log_parameters);
        assert_eq!(config.style(StyleKind::Log).color, 0x3366cc);
        assert_eq!(config.style(StyleKind::EditAdd).color, 0x00af89);
        assert_eq!(config.style(StyleKind::EditRemove).color, 0xdd3333);
        assert_eq!(config.style(StyleKind::EditNeutral).color, 0xa2a9b1);
    }

    #[test]
    fn deserialize_camel_case_aliases() {
        let json = r#"{
            "webhookUrl": "https://discord.com/api/webhooks/1/abc",
            "showLogParameters": false,
            "editAdd": {"color": 65280, "icon": "https://img.example/plus.png"}
        }"#;
        let config: FeedConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.webhook_url, "https://discord.com/api/webhooks/1/abc");
        assert!(!config.show_log_parameters);
        assert_eq!(config.edit_add.color, 65280);
        assert_eq!(config.edit_add.icon, "https://img.example/plus.png");
        // Untouched sections keep their defaults.
        assert_eq!(config.edit_remove.color, 0xdd3333);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"webhook_url": "https://h.example/x", "future_knob": 1}"#;
        let config: FeedConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.webhook_url, "https://h.example/x");
    }

    #[test]
    fn validate_rejects_missing_webhook() {
        let config = FeedConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("webhook_url"));
    }

    #[test]
    fn validate_rejects_oversized_color() {
        let config = FeedConfig {
            webhook_url: "https://h.example/x".into(),
            edit_add: EmbedStyle::new(0x1_000_000),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("24 bits"));
    }

    #[test]
    fn load_round_trips_through_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"webhook_url": "https://discord.com/api/webhooks/1/abc"}}"#
        )
        .unwrap();
        let config = FeedConfig::load(file.path()).unwrap();
        assert_eq!(config.webhook_url, "https://discord.com/api/webhooks/1/abc");
        assert!(config.show_log_parameters);
    }

    #[test]
    fn load_surfaces_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = FeedConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, FeedError::Json(_)));
    }
}
