//! Recent-change event types.
//!
//! [`RecentChange`] models one record from the wiki's recent-changes
//! JSON stream: an edit, a page creation, or an administrative log
//! entry. [`LogParams`] is the normalized form of the free-shape
//! `log_params` blob that log entries carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind discriminator of a recent-change record (the `type` field on
/// the wire). Unrecognized kinds deserialize to [`ChangeKind::Other`]
/// rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// An edit to an existing page.
    Edit,

    /// A page creation.
    New,

    /// An administrative log entry (delete, move, block, ...).
    Log,

    /// Anything else (categorize, external, future kinds).
    #[serde(other)]
    Other,
}

/// Old/new revision id pair. `old` is absent for page creations.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RevisionIds {
    /// Revision id before the change.
    #[serde(default)]
    pub old: Option<u64>,

    /// Revision id after the change.
    #[serde(default)]
    pub new: Option<u64>,
}

/// Old/new page size pair, in bytes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ByteLengths {
    /// Page size before the change.
    #[serde(default)]
    pub old: Option<u64>,

    /// Page size after the change.
    #[serde(default)]
    pub new: Option<u64>,
}

/// One recent-change record from the wiki's event stream.
///
/// Carries the common attributes plus the edit-only (`revision`,
/// `length`) and log-only (`log_*`) extras. All optional attributes
/// default to absent so partial records still parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentChange {
    /// Record kind (`type` on the wire).
    #[serde(rename = "type")]
    pub kind: ChangeKind,

    /// Prefixed page title (e.g. `"Talk:Main Page"`).
    pub title: String,

    /// Numeric namespace id of the page.
    #[serde(default)]
    pub namespace: i64,

    /// Display name of the acting user.
    pub user: String,

    /// Free-text change summary. May be absent or empty.
    #[serde(default)]
    pub comment: Option<String>,

    /// Server-rendered action comment, used as a fallback when
    /// `comment` is empty.
    #[serde(default)]
    pub log_action_comment: Option<String>,

    /// When the change happened (epoch seconds on the wire).
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,

    /// Origin of the wiki (e.g. `"https://wiki.example.org"`), used to
    /// derive page, diff, and log URLs.
    pub server_url: String,

    /// Revision ids. Present for edits and page creations.
    #[serde(default)]
    pub revision: Option<RevisionIds>,

    /// Page sizes in bytes. Present for edits and page creations.
    #[serde(default)]
    pub length: Option<ByteLengths>,

    /// Log entry id. Present for log records.
    #[serde(default)]
    pub log_id: Option<u64>,

    /// Log type (e.g. `"delete"`, `"move"`).
    #[serde(default)]
    pub log_type: Option<String>,

    /// Log action / subtype (e.g. `"delete"`, `"move_redir"`).
    #[serde(default)]
    pub log_action: Option<String>,

    /// Raw log parameters: an object, array, scalar, or absent.
    /// Normalize with [`LogParams::from_raw`].
    #[serde(default)]
    pub log_params: Option<Value>,
}

impl RecentChange {
    /// Full URL of the changed page.
    pub fn page_url(&self) -> String {
        format!(
            "{}/wiki/{}",
            self.server_url.trim_end_matches('/'),
            title_path(&self.title)
        )
    }

    /// The change summary to display: `comment` when non-empty,
    /// otherwise the server-rendered action comment, otherwise `""`.
    pub fn effective_comment(&self) -> &str {
        match self.comment.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => self.log_action_comment.as_deref().unwrap_or(""),
        }
    }

    /// Signed size difference in bytes, with missing lengths counted
    /// as zero.
    pub fn byte_diff(&self) -> i64 {
        let lengths = self.length.unwrap_or_default();
        lengths.new.unwrap_or(0) as i64 - lengths.old.unwrap_or(0) as i64
    }
}

/// Encode a page title as a URL path segment the way the wiki does:
/// spaces become underscores, and everything outside a small safe set
/// is percent-encoded. `/`, `:` and `#` pass through so subpages,
/// namespaces, and section anchors keep their shape.
pub fn title_path(title: &str) -> String {
    let underscored = title.replace(' ', "_");
    let mut out = String::with_capacity(underscored.len());
    for byte in underscored.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(byte as char),
            b'-' | b'_' | b'.' | b'~' | b'/' | b':' | b'#' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

// ── Log parameters ──────────────────────────────────────────────────────

/// Normalized log parameters.
///
/// The raw `log_params` value is dynamically shaped: log types attach
/// positional lists, named mappings (with keys like `"4::target"`), or
/// bare scalars. Normalization strips the positional key prefixes,
/// stringifies nested values as compact JSON, and classifies the result
/// so rendering can dispatch exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogParams {
    /// A single scalar parameter.
    Scalar(String),

    /// A dense, zero-indexed positional list.
    List(Vec<String>),

    /// A named mapping, in source order.
    Map(Vec<(String, String)>),
}

impl LogParams {
    /// Normalize a raw `log_params` value.
    ///
    /// Returns `None` for `null` and for empty objects/arrays; those
    /// render no parameter field. An object whose normalized keys form
    /// the dense run `"0".."n-1"` collapses to [`LogParams::List`].
    pub fn from_raw(raw: &Value) -> Option<LogParams> {
        match raw {
            Value::Null => None,
            Value::Object(map) => {
                if map.is_empty() {
                    return None;
                }
                let entries: Vec<(String, String)> = map
                    .iter()
                    .map(|(key, value)| (strip_positional_prefix(key), stringify(value)))
                    .collect();
                if is_dense_list(&entries) {
                    Some(LogParams::List(
                        entries.into_iter().map(|(_, value)| value).collect(),
                    ))
                } else {
                    Some(LogParams::Map(entries))
                }
            }
            Value::Array(items) => {
                if items.is_empty() {
                    None
                } else {
                    Some(LogParams::List(items.iter().map(stringify).collect()))
                }
            }
            Value::String(s) => Some(LogParams::Scalar(s.clone())),
            Value::Number(n) => Some(LogParams::Scalar(n.to_string())),
            Value::Bool(b) => Some(LogParams::Scalar(b.to_string())),
        }
    }

    /// Look up a named parameter. Only [`LogParams::Map`] can match.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            LogParams::Map(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Pretty-printed JSON dump of a mapping, preserving source order.
    /// Lists and scalars dump as their compact forms.
    pub fn pretty_json(&self) -> String {
        match self {
            LogParams::Map(entries) => {
                let mut map = serde_json::Map::new();
                for (key, value) in entries {
                    map.insert(key.clone(), Value::String(value.clone()));
                }
                serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_default()
            }
            LogParams::List(values) => {
                serde_json::to_string(&values).unwrap_or_default()
            }
            LogParams::Scalar(value) => value.clone(),
        }
    }
}

/// Strip a positional key prefix: `"4::target"` -> `"target"`.
/// Keys without a digits-then-colons prefix pass through unchanged.
fn strip_positional_prefix(key: &str) -> String {
    let digits = key.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return key.to_string();
    }
    let rest = &key[digits..];
    let colons = rest.bytes().take_while(|&b| b == b':').count();
    if colons == 0 {
        return key.to_string();
    }
    rest[colons..].to_string()
}

/// Render a parameter value as a display string: scalars verbatim,
/// nested structures as compact JSON, `null` as empty.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string(value).unwrap_or_default()
        }
        other => other.to_string(),
    }
}

/// Whether the normalized entries form a dense zero-indexed run of
/// positional keys (`"0"`, `"1"`, ... in order).
fn is_dense_list(entries: &[(String, String)]) -> bool {
    entries
        .iter()
        .enumerate()
        .all(|(index, (key, _))| key == &index.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_edit_record() {
        let json = r#"{
            "type": "edit",
            "title": "Main Page",
            "namespace": 0,
            "user": "ExampleUser",
            "comment": "fix typo",
            "timestamp": 1704110400,
            "server_url": "https://wiki.example.org",
            "revision": {"old": 100, "new": 101},
            "length": {"old": 100, "new": 120}
        }"#;
        let rc: RecentChange = serde_json::from_str(json).unwrap();
        assert_eq!(rc.kind, ChangeKind::Edit);
        assert_eq!(rc.title, "Main Page");
        assert_eq!(rc.user, "ExampleUser");
        assert_eq!(rc.byte_diff(), 20);
        assert_eq!(rc.effective_comment(), "fix typo");
    }

    #[test]
    fn deserialize_log_record() {
        let json = r#"{
            "type": "log",
            "title": "Old Name",
            "namespace": 0,
            "user": "Admin",
            "timestamp": 1704110400,
            "server_url": "https://wiki.example.org",
            "log_id": 9917,
            "log_type": "move",
            "log_action": "move",
            "log_params": {"4::target": "New Name", "5::noredir": "0"}
        }"#;
        let rc: RecentChange = serde_json::from_str(json).unwrap();
        assert_eq!(rc.kind, ChangeKind::Log);
        assert_eq!(rc.log_id, Some(9917));
        assert_eq!(rc.log_type.as_deref(), Some("move"));
        assert!(rc.log_params.is_some());
    }

    #[test]
    fn unknown_kind_parses_as_other() {
        let json = r#"{
            "type": "categorize",
            "title": "Category:Stubs",
            "user": "Bot",
            "timestamp": 1704110400,
            "server_url": "https://wiki.example.org"
        }"#;
        let rc: RecentChange = serde_json::from_str(json).unwrap();
        assert_eq!(rc.kind, ChangeKind::Other);
    }

    #[test]
    fn page_url_encodes_title() {
        let rc = RecentChange {
            kind: ChangeKind::Edit,
            title: "Rust (programming language)".into(),
            namespace: 0,
            user: "U".into(),
            comment: None,
            log_action_comment: None,
            timestamp: Utc::now(),
            server_url: "https://wiki.example.org/".into(),
            revision: None,
            length: None,
            log_id: None,
            log_type: None,
            log_action: None,
            log_params: None,
        };
        assert_eq!(
            rc.page_url(),
            "https://wiki.example.org/wiki/Rust_%28programming_language%29"
        );
    }

    #[test]
    fn effective_comment_falls_back_to_action_comment() {
        let mut rc: RecentChange = serde_json::from_value(json!({
            "type": "log",
            "title": "Page",
            "user": "Admin",
            "timestamp": 1704110400,
            "server_url": "https://wiki.example.org",
            "comment": "",
            "log_action_comment": "deleted page"
        }))
        .unwrap();
        assert_eq!(rc.effective_comment(), "deleted page");

        rc.comment = Some("own summary".into());
        assert_eq!(rc.effective_comment(), "own summary");

        rc.comment = None;
        rc.log_action_comment = None;
        assert_eq!(rc.effective_comment(), "");
    }

    #[test]
    fn byte_diff_missing_lengths_count_as_zero() {
        let rc: RecentChange = serde_json::from_value(json!({
            "type": "new",
            "title": "Page",
            "user": "U",
            "timestamp": 1704110400,
            "server_url": "https://wiki.example.org",
            "length": {"new": 512}
        }))
        .unwrap();
        assert_eq!(rc.byte_diff(), 512);

        let rc: RecentChange = serde_json::from_value(json!({
            "type": "edit",
            "title": "Page",
            "user": "U",
            "timestamp": 1704110400,
            "server_url": "https://wiki.example.org"
        }))
        .unwrap();
        assert_eq!(rc.byte_diff(), 0);
    }

    #[test]
    fn title_path_spaces_and_specials() {
        assert_eq!(title_path("Main Page"), "Main_Page");
        assert_eq!(title_path("Talk:Main Page"), "Talk:Main_Page");
        assert_eq!(title_path("A/B#Section"), "A/B#Section");
        assert_eq!(title_path("50% done?"), "50%25_done%3F");
    }

    #[test]
    fn log_params_named_map_strips_prefixes() {
        let raw = json!({"4::target": "New Name", "5::noredir": "0"});
        let params = LogParams::from_raw(&raw).unwrap();
        assert_eq!(params.get("target"), Some("New Name"));
        assert_eq!(params.get("noredir"), Some("0"));
        assert!(matches!(params, LogParams::Map(_)));
    }

    #[test]
    fn log_params_array_is_list() {
        let raw = json!(["a", "b"]);
        let params = LogParams::from_raw(&raw).unwrap();
        assert_eq!(params, LogParams::List(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn log_params_dense_object_collapses_to_list() {
        let raw = json!({"0": "first", "1": "second"});
        let params = LogParams::from_raw(&raw).unwrap();
        assert_eq!(
            params,
            LogParams::List(vec!["first".into(), "second".into()])
        );
    }

    #[test]
    fn log_params_sparse_object_stays_map() {
        let raw = json!({"0": "first", "2": "third"});
        let params = LogParams::from_raw(&raw).unwrap();
        assert!(matches!(params, LogParams::Map(_)));
    }

    #[test]
    fn log_params_scalar_and_empty() {
        assert_eq!(
            LogParams::from_raw(&json!("blob")),
            Some(LogParams::Scalar("blob".into()))
        );
        assert_eq!(
            LogParams::from_raw(&json!(30)),
            Some(LogParams::Scalar("30".into()))
        );
        assert_eq!(LogParams::from_raw(&json!({})), None);
        assert_eq!(LogParams::from_raw(&json!([])), None);
        assert_eq!(LogParams::from_raw(&Value::Null), None);
    }

    #[test]
    fn log_params_nested_values_become_compact_json() {
        let raw = json!({"durations": ["1 day", "3 days"]});
        let params = LogParams::from_raw(&raw).unwrap();
        assert_eq!(params.get("durations"), Some(r#"["1 day","3 days"]"#));
    }

    #[test]
    fn log_params_pretty_json_preserves_order() {
        let raw = json!({"zulu": "1", "alpha": "2"});
        let params = LogParams::from_raw(&raw).unwrap();
        let pretty = params.pretty_json();
        let zulu = pretty.find("zulu").unwrap();
        let alpha = pretty.find("alpha").unwrap();
        assert!(zulu < alpha, "source order lost: {pretty}");
    }

    #[test]
    fn strip_prefix_edge_cases() {
        assert_eq!(strip_positional_prefix("4::target"), "target");
        assert_eq!(strip_positional_prefix("10:once"), "once");
        assert_eq!(strip_positional_prefix("target"), "target");
        assert_eq!(strip_positional_prefix("4target"), "4target");
        assert_eq!(strip_positional_prefix("0"), "0");
    }
}
