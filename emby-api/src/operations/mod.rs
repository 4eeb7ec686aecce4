//! Emby API operations organized by resource
//!
//! Each operation is a stateless description of one REST call. Operations
//! under `sessions` target `/emby/Sessions`, operations under `users` target
//! per-user libraries.

pub mod sessions;
pub mod users;

pub use sessions::{GetSessionsOperation, PlaybackCommand, SendPlaystateCommandOperation};
pub use users::GetLatestItemsOperation;
