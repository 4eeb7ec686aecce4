//! GetSessions operation

use crate::models::Session;
use crate::operation::{EmbyOperation, Method, ResponseBody};
use crate::{ApiError, Result};

/// List all live sessions on the server
pub struct GetSessionsOperation;

/// Request for GetSessions operation
#[derive(Debug, Clone, Default)]
pub struct GetSessionsRequest;

impl EmbyOperation for GetSessionsOperation {
    type Request = GetSessionsRequest;
    type Response = Vec<Session>;

    const METHOD: Method = Method::Get;
    const NAME: &'static str = "GetSessions";

    fn path(_request: &Self::Request) -> String {
        "/emby/Sessions".to_string()
    }

    fn parse_response(_request: &Self::Request, body: ResponseBody) -> Result<Self::Response> {
        match body {
            ResponseBody::Json(value) if value.is_array() => Ok(serde_json::from_value(value)?),
            ResponseBody::Json(_) => Err(ApiError::ParseError(
                "Expected an array of sessions".to_string(),
            )),
            ResponseBody::Status(status) => Err(ApiError::HttpStatus(status)),
        }
    }
}
