//! Session operations

mod get_sessions;
mod send_command;

pub use get_sessions::{GetSessionsOperation, GetSessionsRequest};
pub use send_command::{PlaybackCommand, SendPlaystateCommandOperation, SendPlaystateCommandRequest};
