//! Private HTTP client for media server communication
//!
//! This crate provides a minimal, owned HTTP connection to an Emby server.
//! Every request carries the `X-Emby-Token` header, and the connection can be
//! closed explicitly by its owner. Clones share the same underlying
//! connection pool, so one client is created per server and handed to every
//! collaborator that needs it.

mod error;

pub use error::HttpError;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Header used by Emby to authenticate API requests
pub const TOKEN_HEADER: &str = "X-Emby-Token";

/// A minimal HTTP client for Emby REST communication
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// `None` once closed
    http: RwLock<Option<reqwest::Client>>,
    base_url: String,
    api_key: String,
}

impl HttpClient {
    /// Create a new client for the server at `base_url` (e.g. `http://10.0.0.5:8096`)
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, HttpError> {
        Url::parse(base_url)?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| HttpError::Network(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(Inner {
                http: RwLock::new(Some(http)),
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key: api_key.to_string(),
            }),
        })
    }

    /// Base URL of the server, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// API key sent with every request
    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    /// Send a GET request and decode the JSON body
    ///
    /// Any status other than 200 is returned as [`HttpError::Status`].
    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, HttpError> {
        let http = self.connection()?;

        let url = self.url_for(path);
        debug!(url = %url, "GET");

        let response = http
            .get(&url)
            .header(TOKEN_HEADER, &self.inner.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(HttpError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| HttpError::Parse(e.to_string()))
    }

    /// Send a POST request without a body and return the status code
    ///
    /// Interpreting the status is left to the caller, since different
    /// endpoints signal success differently.
    pub async fn post(&self, path: &str, query: &[(&str, String)]) -> Result<u16, HttpError> {
        let http = self.connection()?;

        let url = self.url_for(path);
        debug!(url = %url, "POST");

        let response = http
            .post(&url)
            .header(TOKEN_HEADER, &self.inner.api_key)
            .query(query)
            .send()
            .await?;

        Ok(response.status().as_u16())
    }

    /// Close the connection
    ///
    /// Every clone observes the close and drops its handle on the connection
    /// pool. Requests issued afterwards fail with [`HttpError::Closed`]
    /// without touching the network. Requests already in flight run to
    /// completion; the pool is released when the last of them finishes.
    pub fn close(&self) {
        if self.inner.http.write().take().is_some() {
            debug!(base_url = %self.inner.base_url, "HTTP client closed");
        }
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.inner.http.read().is_none()
    }

    fn connection(&self) -> Result<reqwest::Client, HttpError> {
        self.inner.http.read().clone().ok_or(HttpError::Closed)
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new("http://127.0.0.1:8096/", "secret").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8096");
        assert_eq!(client.api_key(), "secret");
        assert!(!client.is_closed());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpClient::new("not a url", "secret");
        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_for_joins_paths() {
        let client = HttpClient::new("http://host:8096", "k").unwrap();
        assert_eq!(client.url_for("/emby/Sessions"), "http://host:8096/emby/Sessions");
        assert_eq!(client.url_for("emby/Sessions"), "http://host:8096/emby/Sessions");
    }

    #[tokio::test]
    async fn test_get_json_sends_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/emby/Sessions")
            .match_header(TOKEN_HEADER, "secret")
            .with_status(200)
            .with_body(r#"[{"Id":"1"}]"#)
            .create_async()
            .await;

        let client = HttpClient::new(&server.url(), "secret").unwrap();
        let value = client.get_json("/emby/Sessions", &[]).await.unwrap();

        assert_eq!(value[0]["Id"], "1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_json_passes_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/items")
            .match_query(Matcher::UrlEncoded("Limit".into(), "10".into()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = HttpClient::new(&server.url(), "k").unwrap();
        let value = client
            .get_json("/items", &[("Limit", "10".to_string())])
            .await
            .unwrap();

        assert!(value.as_array().unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_json_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/emby/Sessions")
            .with_status(401)
            .create_async()
            .await;

        let client = HttpClient::new(&server.url(), "wrong").unwrap();
        let result = client.get_json("/emby/Sessions", &[]).await;

        assert!(matches!(result, Err(HttpError::Status(401))));
    }

    #[tokio::test]
    async fn test_get_json_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/emby/Sessions")
            .with_status(200)
            .with_body("<html>nope</html>")
            .create_async()
            .await;

        let client = HttpClient::new(&server.url(), "k").unwrap();
        let result = client.get_json("/emby/Sessions", &[]).await;

        assert!(matches!(result, Err(HttpError::Parse(_))));
    }

    #[tokio::test]
    async fn test_post_returns_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/emby/Sessions/abc/Command")
            .match_query(Matcher::UrlEncoded("Command".into(), "Pause".into()))
            .with_status(204)
            .create_async()
            .await;

        let client = HttpClient::new(&server.url(), "k").unwrap();
        let status = client
            .post("/emby/Sessions/abc/Command", &[("Command", "Pause".to_string())])
            .await
            .unwrap();

        assert_eq!(status, 204);
    }

    #[tokio::test]
    async fn test_closed_client_makes_no_requests() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/emby/Sessions")
            .expect(0)
            .create_async()
            .await;

        let client = HttpClient::new(&server.url(), "k").unwrap();
        let clone = client.clone();
        client.close();

        assert!(clone.is_closed());
        let result = clone.get_json("/emby/Sessions", &[]).await;
        assert!(matches!(result, Err(HttpError::Closed)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_close_releases_connection_pool() {
        let client = HttpClient::new("http://127.0.0.1:8096", "k").unwrap();
        assert!(client.connection().is_ok());

        client.clone().close();
        client.close();

        assert!(client.inner.http.read().is_none());
        assert!(matches!(client.connection(), Err(HttpError::Closed)));
        let post = client.post("/emby/Sessions/abc/Command", &[]).await;
        assert!(matches!(post, Err(HttpError::Closed)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) is almost never listening locally
        let client = HttpClient::new("http://127.0.0.1:9", "k").unwrap();
        let result = client.get_json("/emby/Sessions", &[]).await;
        assert!(matches!(result, Err(HttpError::Network(_))));
    }
}
