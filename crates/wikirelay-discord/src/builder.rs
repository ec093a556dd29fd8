//! Payload construction: one recent-change record in, one webhook
//! payload out.
//!
//! [`payload_for_change`] is a pure function of the event record and
//! the feed configuration. It performs no I/O, holds no state across
//! calls, and never fails on well-formed input -- missing optional
//! attributes render as empty segments.

use chrono::{DateTime, Utc};
use tracing::debug;

use wikirelay_types::event::title_path;
use wikirelay_types::{ChangeKind, EmbedStyle, FeedConfig, LogParams, RecentChange, StyleKind};

use crate::embed::{Embed, EmbedField, WebhookPayload};
use crate::markdown::{code_block, user_link, wikitext_to_markdown};

/// Byte deltas larger than this (in absolute value) render in bold.
const BOLD_DIFF_THRESHOLD: i64 = 500;

/// Build the webhook payload for one recent-change record.
///
/// Always produces exactly one embed and a `null` content field; all
/// message text lives in the embed. Unrecognized change kinds produce
/// an embed with nothing set.
pub fn payload_for_change(rc: &RecentChange, config: &FeedConfig) -> WebhookPayload {
    let embed = match rc.kind {
        ChangeKind::Log => log_embed(rc, config),
        ChangeKind::Edit | ChangeKind::New => edit_embed(rc, config),
        ChangeKind::Other => {
            debug!(title = %rc.title, "unrecognized change kind, emitting empty embed");
            Embed::new()
        }
    };

    WebhookPayload::new().content(None).embed(embed)
}

/// Author, color, icon, and footer shared by both real branches.
fn base_embed(rc: &RecentChange, style: &EmbedStyle) -> Embed {
    Embed::new()
        .color(style.color)
        .author(rc.title.as_str())
        .author_url(rc.page_url())
        .author_icon_url(style.icon.as_str())
        .footer_text(footer_timestamp(rc.timestamp))
}

fn log_embed(rc: &RecentChange, config: &FeedConfig) -> Embed {
    let style = config.style(StyleKind::Log);

    let id_segment = rc.log_id.map(|id| id.to_string()).unwrap_or_default();
    let log_url = special_url(&rc.server_url, &format!("Special:Redirect/logid/{id_segment}"));

    let log_type = rc.log_type.as_deref().unwrap_or("");
    let log_action = rc.log_action.as_deref().unwrap_or("");
    // A "delete/delete" log collapses to "(delete)" instead of
    // repeating itself.
    let action_text = if log_type == log_action {
        log_type.to_string()
    } else {
        format!("{log_type} . . {log_action}")
    };

    let mut description = format!(
        "([log]({log_url})) . . ({action_text}) . . {}",
        user_link(&rc.server_url, &rc.user)
    );
    let comment = rc.effective_comment();
    if !comment.is_empty() {
        description.push_str(&format!(
            " . . (*{}*)",
            wikitext_to_markdown(&rc.server_url, comment)
        ));
    }

    debug!(title = %rc.title, log_type, log_action, "built log embed");

    let embed = base_embed(rc, style).description(description);
    if config.show_log_parameters {
        with_log_parameter_fields(embed, rc)
    } else {
        embed
    }
}

fn edit_embed(rc: &RecentChange, config: &FeedConfig) -> Embed {
    let revision = rc.revision.unwrap_or_default();
    let diff = rc.byte_diff();
    let style_kind = if diff > 0 {
        StyleKind::EditAdd
    } else if diff < 0 {
        StyleKind::EditRemove
    } else {
        StyleKind::EditNeutral
    };
    let style = config.style(style_kind);

    // Revision id 0 is not a valid id; treat it like an absent old
    // revision (a page creation).
    let old_segment = revision
        .old
        .filter(|&id| id != 0)
        .map(|id| id.to_string())
        .unwrap_or_default();
    let new_segment = revision.new.map(|id| id.to_string()).unwrap_or_default();
    let diff_url = special_url(
        &rc.server_url,
        &format!("Special:Diff/{old_segment}/{new_segment}"),
    );
    let hist_url = special_url(
        &rc.server_url,
        &format!("Special:PageHistory/{}", title_path(&rc.title)),
    );

    let diff_label = if old_segment.is_empty() { "**new**" } else { "diff" };
    let diff_text = byte_diff_text(diff);

    let mut description = format!(
        "([{diff_label}]({diff_url}) | [hist]({hist_url})) . . ({diff_text}) . . {}",
        user_link(&rc.server_url, &rc.user)
    );
    let comment = rc.effective_comment();
    if !comment.is_empty() {
        let summary = wikitext_to_markdown(&rc.server_url, comment);
        let summary = if summary.is_empty() {
            "No summary.".to_string()
        } else {
            summary
        };
        description.push_str(&format!(" . . (*{summary}*)"));
    }

    debug!(title = %rc.title, byte_diff = diff, "built edit embed");

    base_embed(rc, style).description(description)
}

/// Render the signed byte delta: explicit `+` for growth, bold when
/// the magnitude passes the threshold (strictly greater).
fn byte_diff_text(diff: i64) -> String {
    let signed = if diff > 0 {
        format!("+{diff}")
    } else {
        diff.to_string()
    };
    if diff.abs() > BOLD_DIFF_THRESHOLD {
        format!("**{signed}**")
    } else {
        signed
    }
}

/// Append the parameter fields for a log entry, dispatching on the
/// normalized parameter shape. Move logs get their own two-field
/// rendering regardless of shape.
fn with_log_parameter_fields(embed: Embed, rc: &RecentChange) -> Embed {
    let params = rc.log_params.as_ref().and_then(LogParams::from_raw);

    if rc.log_type.as_deref() == Some("move") {
        let target = params.as_ref().and_then(|p| p.get("target")).unwrap_or("");
        let noredir = params.as_ref().and_then(|p| p.get("noredir")).unwrap_or("");
        let redirect = if param_is_falsy(noredir) { "Yes" } else { "No" };
        return embed
            .field(EmbedField::new("Target", code_block(target)).inline(true))
            .field(EmbedField::new("Redirect?", code_block(redirect)).inline(true));
    }

    match params {
        Some(LogParams::List(values)) => embed.field(
            EmbedField::new("Parameters", code_block(&values.join("\n"))).inline(true),
        ),
        Some(params @ LogParams::Map(_)) => embed.field(
            EmbedField::new("Parameters", code_block(&params.pretty_json())).inline(true),
        ),
        Some(LogParams::Scalar(value)) => {
            embed.field(EmbedField::new("Parameters", code_block(&value)).inline(true))
        }
        None => embed,
    }
}

/// Whether a parameter value counts as "no": empty or literal zero.
fn param_is_falsy(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == "0"
}

/// URL of a page under the wiki's article path.
fn special_url(server_url: &str, target: &str) -> String {
    format!("{}/wiki/{}", server_url.trim_end_matches('/'), target)
}

/// Footer timestamp: long human-readable date and 12-hour time.
fn footer_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%A, %B %-d, %Y %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn byte_diff_text_signs_and_bold() {
        assert_eq!(byte_diff_text(20), "+20");
        assert_eq!(byte_diff_text(0), "0");
        assert_eq!(byte_diff_text(-42), "-42");
        assert_eq!(byte_diff_text(500), "+500");
        assert_eq!(byte_diff_text(-500), "-500");
        assert_eq!(byte_diff_text(501), "**+501**");
        assert_eq!(byte_diff_text(-600), "**-600**");
    }

    #[test]
    fn param_falsy_values() {
        assert!(param_is_falsy(""));
        assert!(param_is_falsy("0"));
        assert!(param_is_falsy(" 0 "));
        assert!(!param_is_falsy("1"));
        assert!(!param_is_falsy("yes"));
    }

    #[test]
    fn special_url_joins_cleanly() {
        assert_eq!(
            special_url("https://wiki.example.org/", "Special:Diff/1/2"),
            "https://wiki.example.org/wiki/Special:Diff/1/2"
        );
    }

    #[test]
    fn footer_timestamp_format() {
        let noon = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(footer_timestamp(noon), "Monday, January 1, 2024 12:00 PM");

        let morning = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 0).unwrap();
        assert_eq!(footer_timestamp(morning), "Saturday, March 9, 2024 7:05 AM");
    }
}
