//! Wire models for the Emby REST API
//!
//! Every field is optional: the server omits fields freely depending on the
//! client type and the item kind, and unknown fields are ignored. Identifier
//! fields accept both strings and numbers since Emby is not consistent about
//! them (`InternalDeviceId` is numeric, `Id` is a string).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Fallback device label when a session reports neither a device nor a client name
pub const DEFAULT_DEVICE_NAME: &str = "Emby Client";

/// A live playback context reported by the server for one connected device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Session {
    /// Session id, used as the target of playback commands
    #[serde(deserialize_with = "nonzero_id")]
    pub id: Option<String>,
    #[serde(deserialize_with = "nonzero_id")]
    pub internal_device_id: Option<String>,
    pub device_name: Option<String>,
    pub client: Option<String>,
    pub user_name: Option<String>,
    pub play_state: Option<PlayState>,
    pub now_playing_item: Option<NowPlayingItem>,
}

/// Play/pause flags of a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PlayState {
    pub is_paused: Option<bool>,
    pub is_playing: Option<bool>,
}

/// The item a session is currently playing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NowPlayingItem {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Media metadata from the latest-items endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Item {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    /// Item kind, e.g. `Movie`, `Episode`, `Series`
    #[serde(rename = "Type")]
    pub item_type: Option<String>,
    pub premiere_date: Option<String>,
    pub collection_type: Option<String>,
    pub date_created: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    pub parent_id: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    pub series_id: Option<String>,
    pub parent_index_number: Option<i64>,
    pub primary_image_aspect_ratio: Option<f64>,
}

impl Session {
    /// Identifier under which this session is indexed
    ///
    /// The first present, non-empty value of `InternalDeviceId`, `Id` and
    /// `DeviceName`, in that order. `None` means the session cannot be
    /// tracked across polls.
    pub fn client_id(&self) -> Option<&str> {
        [&self.internal_device_id, &self.id, &self.device_name]
            .into_iter()
            .find_map(|field| non_empty(field))
    }

    /// Session id usable as a command target
    pub fn session_id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    /// Human readable name, `"{user} - {device}"`
    ///
    /// Leading and trailing spaces and dashes are trimmed, so a session with
    /// no user name is shown as just the device.
    pub fn display_name(&self) -> String {
        let user = self.user_name.as_deref().unwrap_or("");
        let device = non_empty(&self.device_name)
            .or_else(|| non_empty(&self.client))
            .unwrap_or(DEFAULT_DEVICE_NAME);

        format!("{} - {}", user, device)
            .trim_matches(|c| c == ' ' || c == '-')
            .to_string()
    }

    pub fn is_paused(&self) -> bool {
        self.play_state
            .as_ref()
            .and_then(|p| p.is_paused)
            .unwrap_or(false)
    }

    pub fn is_playing(&self) -> bool {
        self.play_state
            .as_ref()
            .and_then(|p| p.is_playing)
            .unwrap_or(false)
    }

    /// Name of the item being played, empty when nothing is playing
    pub fn now_playing_title(&self) -> &str {
        self.now_playing_item
            .as_ref()
            .and_then(|item| item.name.as_deref())
            .unwrap_or("")
    }
}

impl Item {
    /// Whether this item's `Type` equals `category` exactly
    pub fn is_type(&self, category: &str) -> bool {
        self.item_type.as_deref() == Some(category)
    }
}

/// Build the primary-image URL for an item
pub fn artwork_url(base_url: &str, item_id: &str, api_key: &str) -> String {
    format!(
        "{}/Items/{}/Images/Primary?api_key={}",
        base_url.trim_end_matches('/'),
        item_id,
        api_key
    )
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Accept string or numeric identifiers; anything else counts as absent
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(lenient_value(value))
}

fn lenient_value(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Like [`lenient_id`], but a numeric `0` also counts as absent
fn nonzero_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        other => lenient_value(other),
    })
}
