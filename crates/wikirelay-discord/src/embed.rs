//! Discord webhook payload value objects.
//!
//! [`Embed`], [`EmbedField`], and [`WebhookPayload`] serialize to the
//! Discord webhook JSON schema with filtered output: a key is omitted
//! when its value is the type's zero value (empty string, `false`,
//! unset option, empty list). The one deliberate exception is
//! [`WebhookPayload::content`], which is always emitted -- some webhook
//! consumers need the key present to distinguish "no text" from
//! "field absent".

use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// One name/value pair rendered inside an embed.
///
/// Fields render in the order they were added to the embed. `inline`
/// hints that the field may share a row with its neighbors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    /// Field label.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Field body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,

    /// Render side-by-side with adjacent inline fields. Omitted from
    /// the serialized form when `false`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub inline: bool,
}

impl EmbedField {
    /// Create a block-level field.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }

    /// Set the inline rendering hint.
    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }
}

/// Embed author line: name, optional link, optional icon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    /// Displayed author text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Link target of the author text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// Small icon shown before the author text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon_url: String,
}

/// Embed footer line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    /// Footer text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
}

/// A richly formatted message block within a webhook payload.
///
/// Constructed in a chained style; every setter consumes and returns
/// the embed:
///
/// ```
/// use wikirelay_discord::embed::{Embed, EmbedField};
///
/// let embed = Embed::new()
///     .color(0x00af89)
///     .description("something happened")
///     .field(EmbedField::new("Target", "Foo").inline(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    /// Author line (name, link, icon).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,

    /// 24-bit RGB stripe color. `None` leaves the platform default;
    /// `Some(0)` is a real color (black), not "absent".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,

    /// Markdown body. At most one per embed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Footer line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,

    /// Ordered fields; insertion order is render order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    /// Create an embed with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the author name.
    pub fn author(mut self, name: impl Into<String>) -> Self {
        self.author.get_or_insert_with(EmbedAuthor::default).name = name.into();
        self
    }

    /// Set the author link target.
    pub fn author_url(mut self, url: impl Into<String>) -> Self {
        self.author.get_or_insert_with(EmbedAuthor::default).url = url.into();
        self
    }

    /// Set the author icon URL. An empty string is dropped at
    /// serialization.
    pub fn author_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.author.get_or_insert_with(EmbedAuthor::default).icon_url = icon_url.into();
        self
    }

    /// Set the stripe color.
    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the markdown body.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the footer text.
    pub fn footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }

    /// Append a field. Fields render in insertion order.
    pub fn field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }
}

/// Top-level webhook payload: optional plain-text content plus an
/// ordered list of embeds.
///
/// Constructed fresh per event and immediately serialized; nothing is
/// retained across events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Plain-text message body. Always serialized, `null` when unset.
    #[serde(default)]
    pub content: Option<String>,

    /// Embeds, in order. The key is omitted entirely when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl WebhookPayload {
    /// Create a payload with no content and no embeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or explicitly null out) the plain-text content.
    pub fn content(mut self, content: Option<String>) -> Self {
        self.content = content;
        self
    }

    /// Append an embed.
    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }
}
