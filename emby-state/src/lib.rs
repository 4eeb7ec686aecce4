//! Emby poll-and-cache state
//!
//! Keeps periodically refreshed, read-only snapshots of server resources.
//!
//! # Architecture
//!
//! ```text
//! PollingTask ──refresh()──▶ Coordinator ──fetch()──▶ Resource ──▶ emby-api
//!                                 │
//! consumers ◀──get_cached()───────┘
//! ```
//!
//! A coordinator never lets a failed fetch reach its consumers: the last
//! good snapshot stays cached and the failure is logged and recorded.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use emby_api::EmbyClient;
//! use emby_state::{Coordinator, CoordinatorConfig, PollingTask, SessionsResource};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = EmbyClient::new("http://192.168.1.20:8096", "api-key")?;
//! let sessions = Coordinator::new(SessionsResource::new(client), CoordinatorConfig::sessions())?;
//! sessions.first_refresh().await?;
//!
//! let task = PollingTask::start(sessions.clone());
//! if let Some(index) = sessions.get_cached() {
//!     for (client_id, session) in index.iter() {
//!         println!("{}: {}", client_id, session.display_name());
//!     }
//! }
//! task.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod model;
pub mod polling;
pub mod resources;

pub use config::CoordinatorConfig;
pub use coordinator::{Coordinator, Resource};
pub use error::{Result, StateError};
pub use model::{LatestItems, PlaybackState, SessionIndex};
pub use polling::{PollingTask, PollingTaskStats};
pub use resources::{
    LatestItemsCoordinator, LatestItemsResource, SessionsCoordinator, SessionsResource,
};
