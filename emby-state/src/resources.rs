//! The two resources polled from the server

use async_trait::async_trait;
use emby_api::{ApiError, EmbyClient};
use tracing::debug;

use crate::coordinator::Resource;
use crate::model::{LatestItems, SessionIndex};

/// Live sessions, indexed by client identifier
#[derive(Debug, Clone)]
pub struct SessionsResource {
    client: EmbyClient,
}

impl SessionsResource {
    pub fn new(client: EmbyClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &EmbyClient {
        &self.client
    }
}

#[async_trait]
impl Resource for SessionsResource {
    type Snapshot = SessionIndex;

    async fn fetch(&self) -> Result<SessionIndex, ApiError> {
        let sessions = self.client.get_sessions().await?;
        debug!(count = sessions.len(), "Fetched sessions");
        Ok(SessionIndex::from_sessions(sessions))
    }
}

/// Most recently added items for one user
#[derive(Debug, Clone)]
pub struct LatestItemsResource {
    client: EmbyClient,
    user_id: String,
}

impl LatestItemsResource {
    pub fn new(client: EmbyClient, user_id: impl Into<String>) -> Self {
        Self {
            client,
            user_id: user_id.into(),
        }
    }

    pub fn client(&self) -> &EmbyClient {
        &self.client
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

#[async_trait]
impl Resource for LatestItemsResource {
    type Snapshot = LatestItems;

    async fn fetch(&self) -> Result<LatestItems, ApiError> {
        let items = self.client.get_latest_items(&self.user_id).await?;
        debug!(count = items.len(), user_id = %self.user_id, "Fetched recent items");
        Ok(LatestItems::new(items))
    }
}

/// Coordinator over live sessions
pub type SessionsCoordinator = crate::Coordinator<SessionsResource>;

/// Coordinator over latest items
pub type LatestItemsCoordinator = crate::Coordinator<LatestItemsResource>;
