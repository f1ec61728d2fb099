//! Error types for the command-line front end.

use laos_client::{ClientError, CoreError};

/// Errors that end a `laos` invocation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CliError {
    /// The arguments do not form a valid command.
    #[error("{0}")]
    Usage(String),

    /// A value on the command line is not well-formed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The routes API call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A JSON argument or the output could not be processed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_display_transparently() {
        let err = CliError::from(ClientError::NotFound("/v1/p/apps/a/routes/x".to_owned()));
        assert_eq!(err.to_string(), "not found: /v1/p/apps/a/routes/x");
    }

    #[test]
    fn usage_display_is_the_message() {
        let err = CliError::usage("missing <app>");
        assert_eq!(err.to_string(), "missing <app>");
    }
}
