//! Client configuration loaded from the environment.

use std::time::Duration;

use laos_core::ProjectId;

use crate::http::DEFAULT_REQUEST_TIMEOUT;
use crate::session::AuthSettings;
use crate::ClientError;

/// Base URL of the functions API.
pub const API_URL_VAR: &str = "LAOS_API_URL";
/// Identity endpoint handed to executions as `OS_AUTH_URL`.
pub const AUTH_URL_VAR: &str = "OS_AUTH_URL";
/// Bearer token.
pub const TOKEN_VAR: &str = "OS_TOKEN";
/// Default project for calls that omit one.
pub const PROJECT_ID_VAR: &str = "OS_PROJECT_ID";
/// Per-request timeout in seconds.
pub const TIMEOUT_VAR: &str = "LAOS_TIMEOUT_SECS";

/// Everything needed to build an [`crate::HttpSession`] and a default project.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the functions API.
    pub api_url: String,
    /// Identity endpoint and token.
    pub auth: AuthSettings,
    /// Default project, if configured.
    pub project_id: Option<ProjectId>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] naming the variable that is missing or
    /// invalid.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`ClientError::Config`] naming the variable that is missing or
    /// invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).filter(|v| !v.trim().is_empty()).ok_or_else(|| {
                ClientError::Config(format!("{name} environment variable is required"))
            })
        };

        let api_url = required(API_URL_VAR)?;
        if !api_url.starts_with("http://") {
            return Err(ClientError::Config(format!(
                "{API_URL_VAR} must be an http:// URL, got '{api_url}'"
            )));
        }
        let auth_url = required(AUTH_URL_VAR)?;
        let token = required(TOKEN_VAR)?;

        let project_id = lookup(PROJECT_ID_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(ProjectId::from);

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    ClientError::Config(format!(
                        "{TIMEOUT_VAR} must be a whole number of seconds: {e}"
                    ))
                })?;
                if secs == 0 {
                    return Err(ClientError::Config(format!(
                        "{TIMEOUT_VAR} must be greater than zero"
                    )));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self { api_url, auth: AuthSettings::new(auth_url, token), project_id, timeout })
    }

    /// Log the effective configuration. The token is never logged.
    pub fn log_startup(&self) {
        tracing::info!(
            api_url = %self.api_url,
            auth_url = %self.auth.auth_url(),
            project_id = self.project_id.as_ref().map_or("<none>", ProjectId::as_str),
            timeout_secs = self.timeout.as_secs(),
            "functions client configured"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |name| vars.get(name).cloned()
    }

    fn required_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            (API_URL_VAR, "http://laos:10001"),
            (AUTH_URL_VAR, "http://keystone:5000/v3"),
            (TOKEN_VAR, "tok"),
        ]
    }

    #[test]
    fn config_with_required_vars_uses_defaults() {
        let config = match ClientConfig::from_lookup(lookup_from(&required_vars())) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.api_url, "http://laos:10001");
        assert_eq!(config.auth.auth_url(), "http://keystone:5000/v3");
        assert!(config.project_id.is_none());
        assert_eq!(config.timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn config_with_all_vars() {
        let mut vars = required_vars();
        vars.push((PROJECT_ID_VAR, "proj-1"));
        vars.push((TIMEOUT_VAR, "5"));
        let config = match ClientConfig::from_lookup(lookup_from(&vars)) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.project_id, Some(ProjectId::new("proj-1")));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn config_missing_token_names_variable() {
        let vars: Vec<_> = required_vars().into_iter().filter(|(k, _)| *k != TOKEN_VAR).collect();
        let err = match ClientConfig::from_lookup(lookup_from(&vars)) {
            Ok(_) => panic!("missing token must fail"),
            Err(e) => e,
        };
        assert!(err.to_string().contains(TOKEN_VAR), "error must name {TOKEN_VAR}: {err}");
    }

    #[test]
    fn config_rejects_non_http_url() {
        let mut vars = required_vars();
        vars[0] = (API_URL_VAR, "https://laos:10001");
        assert!(matches!(
            ClientConfig::from_lookup(lookup_from(&vars)),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn config_rejects_bad_timeout() {
        for bad in ["abc", "0", "-3"] {
            let mut vars = required_vars();
            vars.push((TIMEOUT_VAR, bad));
            let result = ClientConfig::from_lookup(lookup_from(&vars));
            assert!(
                matches!(result, Err(ClientError::Config(ref msg)) if msg.contains(TIMEOUT_VAR)),
                "timeout '{bad}' must be rejected"
            );
        }
    }
}
