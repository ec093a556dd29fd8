//! Wiki markup to Discord-markdown conversion.
//!
//! Change summaries arrive as lightweight wiki markup (`'''bold'''`,
//! `''italic''`, `[[internal links]]`, `[external links]`). Discord
//! renders standard Markdown, so the converter rewrites those forms
//! and leaves everything it does not recognize untouched -- malformed
//! markup degrades to literal text, never an error.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use wikirelay_types::event::title_path;

static INTERNAL_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]|]+)(?:\|([^\[\]]*))?\]\]").unwrap());

static EXTERNAL_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(https?://[^\s\]]+)(?:\s+([^\]]+))?\]").unwrap());

static BOLD_ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'''''(.+?)'''''").unwrap());

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'''(.+?)'''").unwrap());

static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"''(.+?)''").unwrap());

/// Convert wiki markup into Discord-compatible Markdown.
///
/// Internal links resolve against `server_url`. Returns an empty
/// string for empty input; whitespace-only results collapse to empty.
pub fn wikitext_to_markdown(server_url: &str, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let base = server_url.trim_end_matches('/');

    let text = INTERNAL_LINK.replace_all(text, |caps: &Captures| {
        let target = caps.get(1).map_or("", |m| m.as_str()).trim();
        let label = caps
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(target);
        format!("[{label}]({base}/wiki/{})", title_path(target))
    });

    let text = EXTERNAL_LINK.replace_all(&text, |caps: &Captures| {
        let url = caps.get(1).map_or("", |m| m.as_str());
        match caps.get(2) {
            Some(label) => format!("[{}]({url})", label.as_str().trim()),
            None => url.to_string(),
        }
    });

    let text = BOLD_ITALIC.replace_all(&text, "***$1***");
    let text = BOLD.replace_all(&text, "**$1**");
    let text = ITALIC.replace_all(&text, "*$1*");

    text.trim().to_owned()
}

/// Markdown link from a user's display name to their user page.
pub fn user_link(server_url: &str, user: &str) -> String {
    format!(
        "[{user}]({}/wiki/{})",
        server_url.trim_end_matches('/'),
        title_path(&format!("User:{user}"))
    )
}

/// Wrap text in a fenced code block for verbatim display.
pub fn code_block(text: &str) -> String {
    format!("```\n{text}\n```")
}
