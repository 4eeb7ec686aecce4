//! Snapshot and state types served by the coordinators

mod latest_items;
mod playback_state;
mod session_index;

pub use latest_items::LatestItems;
pub use playback_state::PlaybackState;
pub use session_index::SessionIndex;
