//! High-level Emby API for sessions, latest items and playback control
//!
//! This crate provides a small, type-safe layer over the Emby REST API. It
//! uses the private `http-client` crate for the actual requests.
//!
//! Only three operations are modelled:
//!
//! - `GET /emby/Sessions`: live playback sessions
//! - `GET /emby/Users/{userId}/Items/Latest`: recently added items
//! - `POST /emby/Sessions/{sessionId}/Command`: Pause, Unpause, Stop
//!
//! ```rust,no_run
//! use emby_api::EmbyClient;
//!
//! # async fn run() -> emby_api::Result<()> {
//! let client = EmbyClient::new("http://192.168.1.20:8096", "api-key")?;
//! let latest = client.get_latest_items("user-id").await?;
//! if let Some(movie) = latest.iter().find(|item| item.is_type("Movie")) {
//!     println!("{:?}", movie.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod operation;
pub mod operations;

pub use client::EmbyClient;
pub use error::{ApiError, Result};
pub use models::{artwork_url, Item, NowPlayingItem, PlayState, Session};
pub use operation::{EmbyOperation, Method, ResponseBody};
pub use operations::PlaybackCommand;

pub use http_client::{HttpClient, HttpError};
