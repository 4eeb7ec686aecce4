//! Player handle for one Emby client device
//!
//! A [`MediaPlayer`] reads its session from the sessions coordinator cache on
//! every access, so it always reflects the most recent successful poll.
//! Playback commands go straight to the server and do not wait for a poll.

use async_trait::async_trait;
use emby_api::{ApiError, EmbyClient, PlaybackCommand, Session};
use emby_state::{PlaybackState, SessionsCoordinator};
use tracing::{debug, warn};

use crate::capability::{Controllable, PlayerFeature, Pollable};

const FEATURES: &[PlayerFeature] = &[PlayerFeature::Pause, PlayerFeature::Stop, PlayerFeature::Play];

/// Result of a playback command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The server accepted the command
    Sent,
    /// The cached session has no id; nothing was sent
    NoSession,
    /// The request failed or the server rejected it
    Failed,
}

/// Player surface for one client device
#[derive(Clone)]
pub struct MediaPlayer {
    client_id: String,
    name: String,
    unique_id: String,
    coordinator: SessionsCoordinator,
    client: EmbyClient,
}

impl MediaPlayer {
    /// Create a player for `client_id`
    ///
    /// The display name is taken from the session as it is cached right now
    /// and does not change afterwards.
    pub fn new(client_id: impl Into<String>, coordinator: SessionsCoordinator, client: EmbyClient) -> Self {
        let client_id = client_id.into();
        let name = coordinator
            .get_cached()
            .and_then(|index| index.get(&client_id).map(Session::display_name))
            .unwrap_or_else(|| Session::default().display_name());

        Self {
            unique_id: format!("emby_{}", client_id),
            client_id,
            name,
            coordinator,
            client,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Run `f` against this player's cached session
    ///
    /// `None` when nothing is cached yet or the device has no session in the
    /// latest snapshot.
    pub fn with_session<T>(&self, f: impl FnOnce(Option<&Session>) -> T) -> T {
        let snapshot = self.coordinator.get_cached();
        f(snapshot.as_deref().and_then(|index| index.get(&self.client_id)))
    }

    pub fn state(&self) -> PlaybackState {
        self.with_session(PlaybackState::from_session)
    }

    /// Title of the item being played, empty when idle
    pub fn media_title(&self) -> String {
        self.with_session(|s| s.map(|s| s.now_playing_title().to_string()).unwrap_or_default())
    }

    /// Artwork of the item being played
    pub fn media_image_url(&self) -> Option<String> {
        let item_id = self.with_session(|s| {
            s.and_then(|s| s.now_playing_item.as_ref())
                .and_then(|item| item.id.clone())
        })?;
        Some(self.client.artwork_url(&item_id))
    }

    /// Send a playback command to this player's session
    ///
    /// Not retried. Without a session id this is a no-op that logs a warning.
    pub async fn send_command(&self, command: PlaybackCommand) -> CommandOutcome {
        let session_id = self.with_session(|s| s.and_then(Session::session_id).map(str::to_string));
        let Some(session_id) = session_id else {
            warn!(
                player = %self.name,
                "No session ID found for client; cannot send command"
            );
            return CommandOutcome::NoSession;
        };

        match self.client.send_command(&session_id, command).await {
            Ok(()) => {
                debug!(player = %self.name, %command, "Command sent");
                CommandOutcome::Sent
            }
            Err(ApiError::CommandRejected { command, status }) => {
                warn!(player = %self.name, "Command {} failed with status {}", command, status);
                CommandOutcome::Failed
            }
            Err(e) => {
                warn!(player = %self.name, %command, error = %e, "Command could not be sent");
                CommandOutcome::Failed
            }
        }
    }
}

impl std::fmt::Debug for MediaPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaPlayer")
            .field("client_id", &self.client_id)
            .field("name", &self.name)
            .field("state", &self.state())
            .finish()
    }
}

#[async_trait]
impl Pollable for MediaPlayer {
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

#[async_trait]
impl Controllable for MediaPlayer {
    async fn pause(&self) {
        self.send_command(PlaybackCommand::Pause).await;
    }

    async fn play(&self) {
        self.send_command(PlaybackCommand::Unpause).await;
    }

    async fn stop(&self) {
        self.send_command(PlaybackCommand::Stop).await;
    }

    fn supported_features(&self) -> &'static [PlayerFeature] {
        FEATURES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emby_state::{Coordinator, CoordinatorConfig, SessionsResource};
    use mockito::Server;
    use std::time::Duration;

    async fn player_for(server: &Server, client_id: &str) -> MediaPlayer {
        let client = EmbyClient::new(&server.url(), "key").unwrap();
        let coordinator = Coordinator::new(
            SessionsResource::new(client.clone()),
            CoordinatorConfig::sessions().with_min_refresh_interval(Duration::ZERO),
        )
        .unwrap();

        coordinator.first_refresh().await.unwrap();
        MediaPlayer::new(client_id, coordinator, client)
    }

    #[tokio::test]
    async fn test_playing_session_without_item() {
        let mut server = Server::new_async().await;
        let body = r#"[{"Id":"1","UserName":"bob","PlayState":{"IsPlaying":true}}]"#;
        server
            .mock("GET", "/emby/Sessions")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let player = player_for(&server, "1").await;

        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(player.media_title(), "");
        assert_eq!(player.media_image_url(), None);
        assert_eq!(player.name(), "bob - Emby Client");
        assert_eq!(player.unique_id(), "emby_1");
    }

    #[tokio::test]
    async fn test_now_playing_artwork() {
        let mut server = Server::new_async().await;
        let body = r#"[{"Id":"s1","InternalDeviceId":5,"DeviceName":"TV",
            "PlayState":{"IsPaused":true,"IsPlaying":true},
            "NowPlayingItem":{"Id":"99","Name":"Alien"}}]"#;
        server
            .mock("GET", "/emby/Sessions")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let player = player_for(&server, "5").await;

        assert_eq!(player.state(), PlaybackState::Paused);
        assert_eq!(player.media_title(), "Alien");
        assert_eq!(
            player.media_image_url().unwrap(),
            format!("{}/Items/99/Images/Primary?api_key=key", server.url())
        );
    }

    #[tokio::test]
    async fn test_unknown_client_is_idle() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/emby/Sessions")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let player = player_for(&server, "gone").await;

        assert_eq!(player.state(), PlaybackState::Idle);
        assert_eq!(player.media_title(), "");
        assert_eq!(player.name(), "Emby Client");
    }

    #[test]
    fn test_supported_features() {
        assert_eq!(FEATURES.len(), 3);
        assert!(FEATURES.contains(&PlayerFeature::Pause));
    }
}
