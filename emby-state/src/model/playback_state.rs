//! Playback state classification

use emby_api::Session;
use serde::{Deserialize, Serialize};

/// Playback state of a session, as shown on a player surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
    /// Nothing playing, or the session is gone
    #[default]
    Idle,
}

impl PlaybackState {
    /// Classify a session's play state
    ///
    /// Paused wins over playing, since Emby keeps `IsPlaying` set while a
    /// stream is paused. A missing session is idle.
    pub fn from_session(session: Option<&Session>) -> Self {
        match session {
            Some(s) if s.is_paused() => PlaybackState::Paused,
            Some(s) if s.is_playing() => PlaybackState::Playing,
            _ => PlaybackState::Idle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Idle => "idle",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
