//! Capabilities exposed by presentation handles
//!
//! Players and sensors are plain structs; what a host can do with them is
//! expressed through these traits instead of a shared base type.

use async_trait::async_trait;

/// Something backed by a polled coordinator
#[async_trait]
pub trait Pollable: Send + Sync {
    /// Stable identifier, unique across all handles of a system
    fn unique_id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Ask the backing coordinator for a refresh
    ///
    /// Debounced and deduplicated by the coordinator; never fails.
    async fn update(&self);
}

/// Playback control surface
///
/// Commands are fire-and-forget: failures are logged, not returned.
#[async_trait]
pub trait Controllable: Send + Sync {
    async fn pause(&self);

    async fn play(&self);

    async fn stop(&self);

    fn supported_features(&self) -> &'static [PlayerFeature];
}

/// Features a player surface supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerFeature {
    Pause,
    Stop,
    Play,
}
