//! Parsing of the `hyprctl clients -j` snapshot into an ordered window list.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// A single managed window, as reported by Hyprland at startup.
///
/// `address` is Hyprland's opaque unique identifier; `focus_order` is the
/// `focusHistoryID`, where lower values mean more recently focused.
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub focus_order: i64,
    pub workspace: String,
    pub class: String,
    pub title: String,
    pub address: String,
}

impl WindowRecord {
    /// Label shown in the switcher list: `"<focus_order>: <class> - <title>"`,
    /// falling back to the address when class and title are both blank.
    pub fn label(&self) -> String {
        let label = format!("{}: {} - {}", self.focus_order, self.class, self.title);
        let trimmed = label.trim();
        if self.class.is_empty() && self.title.is_empty() {
            self.address.clone()
        } else {
            trimmed.to_string()
        }
    }
}

/// Errors for snapshots that are not a well-formed JSON array.
///
/// Callers are expected to log these and proceed with an empty window list
/// rather than abort.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("window snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("window snapshot is not a JSON array")]
    NotAnArray,
}

#[derive(Debug, Default, Deserialize)]
struct RawWorkspace {
    #[serde(default)]
    name: String,
}

/// Subset of the JSON object returned per client by `hyprctl clients -j`.
///
/// Every field is lenient: missing or wrongly-typed values fall back to the
/// same defaults Hyprland-adjacent tooling assumes (`-1` for the focus id,
/// empty strings otherwise), so a single odd client never poisons the list.
#[derive(Debug, Deserialize)]
struct RawClient {
    #[serde(
        rename = "focusHistoryID",
        default = "missing_focus_id",
        deserialize_with = "lenient_i64"
    )]
    focus_history_id: i64,
    #[serde(default)]
    workspace: RawWorkspace,
    #[serde(default)]
    class: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    address: String,
}

fn missing_focus_id() -> i64 {
    -1
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_i64().unwrap_or(-1))
}

/// Parse the raw `hyprctl clients -j` output into an ordered window list.
///
/// Clients with a negative `focusHistoryID` (unmanaged/special windows) are
/// excluded. The result is stable-sorted ascending by focus id, so index 0
/// is the most recently used window and ties keep their source order.
pub fn parse_clients(raw: &str) -> Result<Vec<WindowRecord>, SnapshotError> {
    let doc: Value = serde_json::from_str(raw)?;
    let items = doc.as_array().ok_or(SnapshotError::NotAnArray)?;

    let mut records: Vec<WindowRecord> = items
        .iter()
        // Non-object elements deserialize to all-defaults and are filtered
        // out below.
        .filter_map(|item| serde_json::from_value::<RawClient>(item.clone()).ok())
        .filter(|client| client.focus_history_id >= 0)
        .map(|client| {
            debug!(
                "adding {} (workspace: {}, class: {}, focusHistoryID: {})",
                client.address, client.workspace.name, client.class, client.focus_history_id
            );
            WindowRecord {
                focus_order: client.focus_history_id,
                workspace: client.workspace.name,
                class: client.class,
                title: client.title,
                address: client.address,
            }
        })
        .collect();

    records.sort_by_key(|record| record.focus_order);

    Ok(records)
}
