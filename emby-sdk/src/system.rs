//! EmbySystem - Main entry point for the SDK

use parking_lot::Mutex;
use tracing::{info, warn};

use emby_api::EmbyClient;
use emby_state::{
    Coordinator, LatestItemsCoordinator, LatestItemsResource, PollingTask, SessionsCoordinator,
    SessionsResource,
};

use crate::{EmbyConfig, LatestMediaSensor, MediaPlayer, SdkError};

/// One connection to an Emby server with its players and sensors
///
/// Owns the HTTP connection shared by both coordinators and every handle.
/// The connection is closed by [`EmbySystem::shutdown`], or when the system
/// is dropped; handles cloned out of it stop working at that point.
///
/// # Example
///
/// ```rust,ignore
/// use emby_sdk::{EmbyConfig, EmbySystem};
///
/// let system = EmbySystem::connect(EmbyConfig::from_env()?).await?;
/// system.start_polling();
///
/// for player in system.players() {
///     println!("{}: {}", player.client_id(), player.state());
/// }
///
/// system.shutdown().await?;
/// ```
pub struct EmbySystem {
    config: EmbyConfig,

    client: EmbyClient,

    sessions: SessionsCoordinator,

    latest_items: LatestItemsCoordinator,

    /// One player per session present at connect time
    players: Vec<MediaPlayer>,

    /// One sensor per configured category
    sensors: Vec<LatestMediaSensor>,

    polling: Mutex<Vec<PollingTask>>,
}

impl EmbySystem {
    /// Connect to the server described by `config`
    ///
    /// Validates the config, loads both resources once and creates the
    /// handles. Fails if either initial load fails.
    pub async fn connect(config: EmbyConfig) -> Result<Self, SdkError> {
        config.validate()?;

        let client = EmbyClient::new(&config.base_url(), &config.api_key)?;

        let sessions = Coordinator::new(
            SessionsResource::new(client.clone()),
            config.sessions_coordinator(),
        )?;
        let latest_items = Coordinator::new(
            LatestItemsResource::new(client.clone(), config.user_id.clone()),
            config.latest_items_coordinator(),
        )?;

        let (index, _) = match tokio::try_join!(sessions.first_refresh(), latest_items.first_refresh()) {
            Ok(loaded) => loaded,
            Err(e) => {
                client.close();
                return Err(e.into());
            }
        };

        let players: Vec<MediaPlayer> = index
            .client_ids()
            .map(|client_id| MediaPlayer::new(client_id, sessions.clone(), client.clone()))
            .collect();

        let sensors: Vec<LatestMediaSensor> = config
            .latest_categories
            .iter()
            .map(|category| LatestMediaSensor::new(category.clone(), latest_items.clone(), client.clone()))
            .collect();

        info!(
            server = %client.base_url(),
            players = players.len(),
            sensors = sensors.len(),
            "Connected to Emby"
        );

        Ok(Self {
            config,
            client,
            sessions,
            latest_items,
            players,
            sensors,
            polling: Mutex::new(Vec::new()),
        })
    }

    pub fn config(&self) -> &EmbyConfig {
        &self.config
    }

    pub fn client(&self) -> &EmbyClient {
        &self.client
    }

    pub fn sessions(&self) -> &SessionsCoordinator {
        &self.sessions
    }

    pub fn latest_items(&self) -> &LatestItemsCoordinator {
        &self.latest_items
    }

    pub fn players(&self) -> &[MediaPlayer] {
        &self.players
    }

    /// Get player by client id
    pub fn player(&self, client_id: &str) -> Result<&MediaPlayer, SdkError> {
        self.players
            .iter()
            .find(|p| p.client_id() == client_id)
            .ok_or_else(|| SdkError::PlayerNotFound(client_id.to_string()))
    }

    pub fn sensors(&self) -> &[LatestMediaSensor] {
        &self.sensors
    }

    /// Get sensor by category, e.g. `"Movie"`
    pub fn sensor(&self, category: &str) -> Result<&LatestMediaSensor, SdkError> {
        self.sensors
            .iter()
            .find(|s| s.category() == category)
            .ok_or_else(|| SdkError::SensorNotFound(category.to_string()))
    }

    /// Start background polling of both coordinators
    ///
    /// Does nothing if polling is already running.
    pub fn start_polling(&self) {
        let mut polling = self.polling.lock();
        if !polling.is_empty() {
            return;
        }

        polling.push(PollingTask::start(self.sessions.clone()));
        polling.push(PollingTask::start(self.latest_items.clone()));
    }

    pub fn is_polling(&self) -> bool {
        self.polling.lock().iter().any(PollingTask::is_running)
    }

    /// Stop polling and close the connection
    ///
    /// All polling tasks are stopped even if one of them fails to shut down;
    /// the first failure is returned.
    pub async fn shutdown(self) -> Result<(), SdkError> {
        let tasks = std::mem::take(&mut *self.polling.lock());

        let mut first_error = None;
        for task in tasks {
            if let Err(e) = task.shutdown().await {
                warn!(error = %e, "Polling task did not shut down cleanly");
                first_error.get_or_insert(e);
            }
        }

        self.client.close();
        info!(server = %self.client.base_url(), "Disconnected from Emby");

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

// Polling tasks stop when their handles drop; the connection is closed here
impl Drop for EmbySystem {
    fn drop(&mut self) {
        self.client.close();
    }
}

impl std::fmt::Debug for EmbySystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbySystem")
            .field("server", &self.client.base_url())
            .field("players", &self.players.len())
            .field("sensors", &self.sensors.len())
            .finish()
    }
}
