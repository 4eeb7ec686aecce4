//! Playstate command operation (Pause, Unpause, Stop)

use std::fmt;

use crate::operation::{EmbyOperation, Method, ResponseBody};
use crate::{ApiError, Result};

/// Status the server returns when it accepted a command
const COMMAND_ACCEPTED: u16 = 204;

/// Playback commands a session can receive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackCommand {
    Pause,
    Unpause,
    Stop,
}

impl PlaybackCommand {
    /// Name used in the `Command` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackCommand::Pause => "Pause",
            PlaybackCommand::Unpause => "Unpause",
            PlaybackCommand::Stop => "Stop",
        }
    }
}

impl fmt::Display for PlaybackCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Send a playback command to a session
pub struct SendPlaystateCommandOperation;

/// Request for the playstate command operation
#[derive(Debug, Clone)]
pub struct SendPlaystateCommandRequest {
    pub session_id: String,
    pub command: PlaybackCommand,
}

impl EmbyOperation for SendPlaystateCommandOperation {
    type Request = SendPlaystateCommandRequest;
    type Response = ();

    const METHOD: Method = Method::Post;
    const NAME: &'static str = "SendPlaystateCommand";

    fn path(request: &Self::Request) -> String {
        format!(
            "/emby/Sessions/{}/Command",
            urlencoding::encode(&request.session_id)
        )
    }

    fn query(request: &Self::Request) -> Vec<(&'static str, String)> {
        vec![("Command", request.command.as_str().to_string())]
    }

    fn validate(request: &Self::Request) -> Result<()> {
        if request.session_id.is_empty() {
            return Err(ApiError::InvalidParameter(
                "session_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn parse_response(request: &Self::Request, body: ResponseBody) -> Result<Self::Response> {
        match body {
            ResponseBody::Status(COMMAND_ACCEPTED) => Ok(()),
            ResponseBody::Status(status) => Err(ApiError::CommandRejected {
                command: request.command.as_str(),
                status,
            }),
            ResponseBody::Json(_) => Err(ApiError::ParseError(
                "Unexpected body for command response".to_string(),
            )),
        }
    }
}
