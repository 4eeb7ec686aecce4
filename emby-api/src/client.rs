use http_client::HttpClient;
use tracing::debug;

use crate::models::{self, Item, Session};
use crate::operation::{EmbyOperation, Method, ResponseBody};
use crate::operations::sessions::{GetSessionsRequest, SendPlaystateCommandRequest};
use crate::operations::users::GetLatestItemsRequest;
use crate::operations::{
    GetLatestItemsOperation, GetSessionsOperation, PlaybackCommand, SendPlaystateCommandOperation,
};
use crate::Result;

/// A client for executing Emby operations against a server
///
/// This client bridges the stateless operation definitions and the actual
/// HTTP requests. It wraps one owned [`HttpClient`]; clones share that
/// connection, so polling and command dispatch go through the same pool.
///
/// ```rust,no_run
/// use emby_api::{EmbyClient, PlaybackCommand};
///
/// # async fn run() -> emby_api::Result<()> {
/// let client = EmbyClient::new("http://192.168.1.20:8096", "api-key")?;
/// for session in client.get_sessions().await? {
///     if let Some(id) = session.session_id() {
///         client.send_command(id, PlaybackCommand::Pause).await?;
///     }
/// }
/// client.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EmbyClient {
    http: HttpClient,
}

impl EmbyClient {
    /// Create a client with its own connection to `base_url`
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(base_url, api_key)?,
        })
    }

    /// Create a client on top of an existing connection
    pub fn with_http_client(http: HttpClient) -> Self {
        Self { http }
    }

    /// Execute an Emby operation
    ///
    /// Validates the request, sends it with the operation's method, and hands
    /// the result to the operation's parser.
    pub async fn execute<Op: EmbyOperation>(&self, request: &Op::Request) -> Result<Op::Response> {
        Op::validate(request)?;

        let path = Op::path(request);
        let query = Op::query(request);
        debug!(operation = Op::NAME, path = %path, "Executing operation");

        let body = match Op::METHOD {
            Method::Get => ResponseBody::Json(self.http.get_json(&path, &query).await?),
            Method::Post => ResponseBody::Status(self.http.post(&path, &query).await?),
        };

        Op::parse_response(request, body)
    }

    /// Fetch all live sessions
    pub async fn get_sessions(&self) -> Result<Vec<Session>> {
        self.execute::<GetSessionsOperation>(&GetSessionsRequest).await
    }

    /// Fetch the most recently added items for a user
    pub async fn get_latest_items(&self, user_id: &str) -> Result<Vec<Item>> {
        self.execute::<GetLatestItemsOperation>(&GetLatestItemsRequest::new(user_id))
            .await
    }

    /// Send a playback command to a session
    ///
    /// Succeeds only when the server answers 204.
    pub async fn send_command(&self, session_id: &str, command: PlaybackCommand) -> Result<()> {
        let request = SendPlaystateCommandRequest {
            session_id: session_id.to_string(),
            command,
        };
        self.execute::<SendPlaystateCommandOperation>(&request).await
    }

    /// Primary-image URL for an item on this server
    pub fn artwork_url(&self, item_id: &str) -> String {
        models::artwork_url(self.http.base_url(), item_id, self.http.api_key())
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn api_key(&self) -> &str {
        self.http.api_key()
    }

    /// The underlying connection
    pub fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// Close the shared connection for every clone of this client
    pub fn close(&self) {
        self.http.close();
    }

    pub fn is_closed(&self) -> bool {
        self.http.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artwork_url_uses_connection_settings() {
        let client = EmbyClient::new("http://10.0.0.5:8096", "secret").unwrap();
        assert_eq!(
            client.artwork_url("abc"),
            "http://10.0.0.5:8096/Items/abc/Images/Primary?api_key=secret"
        );
    }

    #[test]
    fn test_close_is_shared_between_clones() {
        let client = EmbyClient::new("http://10.0.0.5:8096", "secret").unwrap();
        let clone = client.clone();
        client.close();
        assert!(clone.is_closed());
    }
}
