//! # Emby SDK - polled players and latest-item sensors
//!
//! Connects to an Emby server, keeps its sessions and recently added items
//! cached through periodic polling, and exposes them as handles:
//!
//! ```rust,no_run
//! use emby_sdk::{Controllable, EmbyConfig, EmbySystem, Pollable};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), emby_sdk::SdkError> {
//!     let config = EmbyConfig::new("192.168.1.20", 8096, "api-key", "user-id");
//!     let system = EmbySystem::connect(config).await?;
//!     system.start_polling();
//!
//!     for player in system.players() {
//!         println!("{} is {}: {}", player.name(), player.state(), player.media_title());
//!     }
//!
//!     let movies = system.sensor("Movie")?;
//!     println!("{}: {}", movies.name(), movies.state());
//!
//!     if let Some(player) = system.players().first() {
//!         player.pause().await;
//!     }
//!
//!     system.shutdown().await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! emby-sdk (players, sensors, EmbySystem)
//!     ↓
//! emby-state (coordinators, polling, snapshots)
//!     ↓
//! emby-api (typed Emby operations)
//!     ↓
//! http-client (shared connection)
//! ```
//!
//! Reads never touch the network: players and sensors look at the last good
//! snapshot. Playback commands go to the server immediately.

pub use capability::{Controllable, PlayerFeature, Pollable};
pub use config::EmbyConfig;
pub use error::SdkError;
pub use media_player::{CommandOutcome, MediaPlayer};
pub use sensor::{LatestItemAttributes, LatestMediaSensor};
pub use system::EmbySystem;

// Re-export commonly used types from the lower layers
pub use emby_api::{Item, PlaybackCommand, Session};
pub use emby_state::{logging, PlaybackState};

pub mod config;

mod capability;
mod error;
mod media_player;
mod sensor;
mod system;
