//! HTTP/1 session over TCP.
//!
//! Built on the hyper-util legacy client so the connection pool and
//! keep-alive handling come from hyper rather than from this crate.

use std::time::Duration;

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::session::{AuthSettings, SessionClient};
use crate::ClientError;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Header carrying the token, as expected by the platform's API.
const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// [`SessionClient`] backed by a pooled hyper client.
///
/// Paths are appended to `base_url` verbatim, so `base_url` must not end
/// with `/` (a trailing one is stripped on construction).
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client<HttpConnector, Full<Bytes>>,
    base_url: String,
    auth: AuthSettings,
    timeout: Duration,
}

impl HttpSession {
    /// Create a session for the API at `base_url`.
    ///
    /// # Arguments
    /// - `base_url`: scheme and authority of the functions API, e.g. `http://laos:10001`
    /// - `auth`: identity endpoint and token
    #[must_use]
    pub fn new(base_url: impl Into<String>, auth: AuthSettings) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            base_url,
            auth,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Create a session from loaded configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_url.clone(), config.auth.clone()).with_timeout(config.timeout)
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and decode the JSON response.
    ///
    /// # Errors
    /// Returns [`ClientError::Timeout`] when the timeout elapses, the
    /// status-mapped variant for non-2xx responses, and
    /// [`ClientError::Decode`] for a 2xx body that is not JSON.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let token = self.auth.token()?;
        let url = format!("{}{path}", self.base_url);
        let uri: Uri = url
            .parse()
            .map_err(|e| ClientError::Transport(format!("invalid URL {url}: {e}")))?;

        let body_bytes = match body {
            Some(json) => Bytes::from(serde_json::to_vec(json).map_err(ClientError::Encode)?),
            None => Bytes::new(),
        };

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(uri)
            .header("Accept", "application/json")
            .header(AUTH_TOKEN_HEADER, token);

        if body.is_some() {
            builder = builder.header("Content-Type", "application/json");
        }

        let req = builder
            .body(Full::new(body_bytes))
            .map_err(|e| ClientError::Transport(format!("build request: {e}")))?;

        let exchange = async {
            let resp = self
                .client
                .request(req)
                .await
                .map_err(|e| ClientError::Transport(format!("send request to {path}: {e}")))?;
            let status = resp.status();
            let bytes = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| ClientError::Transport(format!("read response body: {e}")))?
                .to_bytes();
            Ok::<_, ClientError>((status, bytes))
        };

        let (status, bytes) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| ClientError::Timeout { path: path.to_owned(), timeout: self.timeout })??;

        tracing::debug!(%method, path, status = status.as_u16(), "functions API response");

        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).trim().to_owned();
            return Err(ClientError::from_status(status.as_u16(), path, text));
        }

        decode_body(path, &bytes)
    }
}

/// Decode a successful response body; blank bodies become `null`.
fn decode_body(path: &str, bytes: &[u8]) -> Result<Value, ClientError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes)
        .map_err(|source| ClientError::Decode { path: path.to_owned(), source })
}

#[async_trait]
impl SessionClient for HttpSession {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::DELETE, path, None).await
    }

    async fn get_token(&self) -> Result<String, ClientError> {
        self.auth.token().map(str::to_owned)
    }

    fn auth_url(&self) -> &str {
        self.auth.auth_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> AuthSettings {
        AuthSettings::new("http://keystone:5000/v3", "tok")
    }

    #[test]
    fn base_url_trailing_slashes_are_stripped() {
        let session = HttpSession::new("http://laos:10001//", auth());
        assert_eq!(session.base_url(), "http://laos:10001");
    }

    #[test]
    fn decode_body_blank_is_null() {
        assert!(matches!(decode_body("/x", b""), Ok(Value::Null)));
        assert!(matches!(decode_body("/x", b"  \n"), Ok(Value::Null)));
    }

    #[test]
    fn decode_body_invalid_json_is_decode_error() {
        let result = decode_body("/v1/p/apps/a/routes", b"<html>");
        match result {
            Err(ClientError::Decode { path, .. }) => assert_eq!(path, "/v1/p/apps/a/routes"),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn session_exposes_auth_url_and_token() {
        let session = HttpSession::new("http://laos:10001", auth());
        assert_eq!(session.auth_url(), "http://keystone:5000/v3");
        assert!(matches!(session.get_token().await.as_deref(), Ok("tok")));
    }

    #[tokio::test]
    async fn request_without_token_fails_before_connecting() {
        let session =
            HttpSession::new("http://127.0.0.1:9", AuthSettings::new("http://keystone", ""));
        let result = session.get("/v1/p/apps/a/routes").await;
        assert!(matches!(result, Err(ClientError::Unauthorized(_))));
    }
}
