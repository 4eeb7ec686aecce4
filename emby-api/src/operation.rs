use serde_json::Value;

use crate::error::Result;

/// HTTP method used by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// What the transport hands back to an operation for parsing
///
/// GET operations receive the decoded JSON body (the transport already
/// rejected non-200 statuses). POST operations receive the bare status code,
/// since the command endpoint signals success with 204 and no body.
#[derive(Debug, Clone)]
pub enum ResponseBody {
    Json(Value),
    Status(u16),
}

/// Base trait for all Emby API operations
///
/// An operation is a stateless description of one REST call: where it goes,
/// which query parameters it carries, and how its response is turned into a
/// typed value. [`EmbyClient::execute`](crate::EmbyClient::execute) does the
/// actual I/O.
pub trait EmbyOperation {
    /// The request type for this operation
    type Request;

    /// The response type for this operation
    type Response;

    /// HTTP method for this operation
    const METHOD: Method;

    /// Short name used in logs
    const NAME: &'static str;

    /// Request path, relative to the server base URL
    fn path(request: &Self::Request) -> String;

    /// Query parameters
    fn query(_request: &Self::Request) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Check the request before anything goes over the wire
    fn validate(_request: &Self::Request) -> Result<()> {
        Ok(())
    }

    /// Parse the transport response into the typed response
    fn parse_response(request: &Self::Request, body: ResponseBody) -> Result<Self::Response>;
}
