//! Authenticated session abstraction.
//!
//! Route operations never talk HTTP directly; they go through a
//! [`SessionClient`], which owns the transport, credentials, and error
//! mapping.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::ClientError;

/// Authenticated JSON-over-HTTP session against the functions API.
///
/// Each call takes a path relative to the session's base URL and yields the
/// decoded response body. An empty body decodes to [`Value::Null`].
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// `GET path`.
    ///
    /// # Errors
    /// Returns [`ClientError::NotFound`], [`ClientError::Unauthorized`] and
    /// friends on non-2xx responses, [`ClientError::Decode`] on invalid JSON.
    async fn get(&self, path: &str) -> Result<Value, ClientError>;

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    /// Same as [`SessionClient::get`].
    async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError>;

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    /// Same as [`SessionClient::get`].
    async fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError>;

    /// `DELETE path`.
    ///
    /// # Errors
    /// Same as [`SessionClient::get`].
    async fn delete(&self, path: &str) -> Result<Value, ClientError>;

    /// Resolve the bearer token used by this session.
    ///
    /// # Errors
    /// Returns [`ClientError::Unauthorized`] if no token can be obtained.
    async fn get_token(&self) -> Result<String, ClientError>;

    /// Identity endpoint the session authenticates against.
    fn auth_url(&self) -> &str;
}

#[async_trait]
impl<T: SessionClient + ?Sized> SessionClient for Arc<T> {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        (**self).get(path).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        (**self).post(path, body).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        (**self).put(path, body).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        (**self).delete(path).await
    }

    async fn get_token(&self) -> Result<String, ClientError> {
        (**self).get_token().await
    }

    fn auth_url(&self) -> &str {
        (**self).auth_url()
    }
}

/// Identity endpoint plus a pre-issued token.
#[derive(Clone)]
pub struct AuthSettings {
    auth_url: String,
    token: String,
}

impl AuthSettings {
    /// Create settings from an identity endpoint and a token.
    pub fn new(auth_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self { auth_url: auth_url.into(), token: token.into() }
    }

    /// Identity endpoint URL.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// The token, or [`ClientError::Unauthorized`] if it is empty.
    ///
    /// # Errors
    /// Returns [`ClientError::Unauthorized`] for an empty token.
    pub fn token(&self) -> Result<&str, ClientError> {
        if self.token.is_empty() {
            return Err(ClientError::Unauthorized("no token configured".to_owned()));
        }
        Ok(&self.token)
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("auth_url", &self.auth_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
