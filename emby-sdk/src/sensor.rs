//! Latest-item sensor for one media category

use async_trait::async_trait;
use emby_api::{EmbyClient, Item};
use emby_state::LatestItemsCoordinator;
use serde::Serialize;

use crate::capability::Pollable;

/// State reported when no item of the category is cached
pub const NO_ITEM_STATE: &str = "None";

const UNKNOWN_LIBRARY: &str = "Unknown";

/// Details of the most recent item of a category
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LatestItemAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl LatestItemAttributes {
    /// True when there was no item to describe
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Sensor exposing the newest item of one category, e.g. `Movie`
#[derive(Clone)]
pub struct LatestMediaSensor {
    category: String,
    name: String,
    unique_id: String,
    coordinator: LatestItemsCoordinator,
    client: EmbyClient,
}

impl LatestMediaSensor {
    pub fn new(category: impl Into<String>, coordinator: LatestItemsCoordinator, client: EmbyClient) -> Self {
        let category = category.into();
        Self {
            name: format!("Emby Latest {}s", category),
            unique_id: format!("emby_latest_{}", category.to_lowercase()),
            category,
            coordinator,
            client,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// First cached item whose type matches this sensor's category
    pub fn latest_item(&self) -> Option<Item> {
        self.coordinator
            .get_cached()
            .and_then(|latest| latest.first_of_type(&self.category).cloned())
    }

    /// Name of the latest item, or `"None"`
    pub fn state(&self) -> String {
        self.latest_item()
            .and_then(|item| item.name)
            .unwrap_or_else(|| NO_ITEM_STATE.to_string())
    }

    pub fn attributes(&self) -> LatestItemAttributes {
        let Some(item) = self.latest_item() else {
            return LatestItemAttributes::default();
        };

        LatestItemAttributes {
            poster_url: item.id.as_deref().map(|id| self.client.artwork_url(id)),
            release_date: item.premiere_date,
            item_type: item.item_type,
            library: Some(item.collection_type.unwrap_or_else(|| UNKNOWN_LIBRARY.to_string())),
        }
    }
}

impl std::fmt::Debug for LatestMediaSensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatestMediaSensor")
            .field("category", &self.category)
            .field("state", &self.state())
            .finish()
    }
}

#[async_trait]
impl Pollable for LatestMediaSensor {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn update(&self) {
        self.coordinator.request_refresh().await;
    }
}
