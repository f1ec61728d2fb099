//! Error types for the client crate.

use std::time::Duration;

use laos_core::CoreError;

/// Errors surfaced by route operations.
///
/// Transport variants are produced by the session and passed through
/// untouched. [`ClientError::Encode`] and [`ClientError::DataFormat`] are
/// raised locally while preparing or dispatching a call.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The server rejected the credentials (HTTP 401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The credentials lack permission for the resource (HTTP 403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The service is temporarily unable to handle the request (HTTP 503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Any other non-2xx response.
    #[error("HTTP {status} from {path}: {body}")]
    Service { status: u16, path: String, body: String },

    /// No response arrived within the session's request timeout.
    #[error("request to {path} timed out after {timeout:?}")]
    Timeout { path: String, timeout: Duration },

    /// Connection, handshake, or request construction failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// A request body could not be encoded as JSON.
    #[error("cannot encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body is not valid JSON.
    #[error("invalid JSON from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A route document could not be interpreted locally.
    #[error("data format error: {0}")]
    DataFormat(#[from] CoreError),

    /// No project id was given and no default could be resolved.
    #[error("no project id given and no default project configured")]
    MissingProject,

    /// Client configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns `true` for [`ClientError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Map an HTTP error status to its variant.
    pub(crate) fn from_status(status: u16, path: &str, body: String) -> Self {
        let detail = if body.is_empty() { path.to_owned() } else { format!("{path}: {body}") };
        match status {
            401 => Self::Unauthorized(detail),
            403 => Self::Forbidden(detail),
            404 => Self::NotFound(detail),
            503 => Self::ServiceUnavailable(detail),
            _ => Self::Service { status, path: path.to_owned(), body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_maps_known_codes() {
        assert!(matches!(
            ClientError::from_status(401, "/v1/p/apps", String::new()),
            ClientError::Unauthorized(_)
        ));
        assert!(matches!(
            ClientError::from_status(403, "/v1/p/apps", String::new()),
            ClientError::Forbidden(_)
        ));
        assert!(ClientError::from_status(404, "/v1/p/apps", String::new()).is_not_found());
        assert!(matches!(
            ClientError::from_status(503, "/v1/p/apps", String::new()),
            ClientError::ServiceUnavailable(_)
        ));
    }

    #[test]
    fn from_status_keeps_unknown_codes_with_body() {
        let err = ClientError::from_status(500, "/r/app/hello", "boom".to_owned());
        match err {
            ClientError::Service { status, path, body } => {
                assert_eq!(status, 500);
                assert_eq!(path, "/r/app/hello");
                assert_eq!(body, "boom");
            }
            other => panic!("expected Service, got {other:?}"),
        }
    }

    #[test]
    fn data_format_wraps_core_error() {
        let err = ClientError::from(CoreError::MissingVisibility);
        assert!(matches!(err, ClientError::DataFormat(CoreError::MissingVisibility)));
        assert!(err.to_string().starts_with("data format error"));
    }
}
