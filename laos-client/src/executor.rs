//! Route execution dispatch.
//!
//! Execution goes to one of two endpoints depending on route visibility:
//! public routes through `/r/{app}{path}`, private ones through
//! `/v1/r/{app}{path}`. Visibility is read from the server on every call,
//! which costs one extra round trip but never acts on a stale flag.

use serde_json::{Map, Value};

use laos_core::{AppName, ProjectId, RoutePath, Visibility};

use crate::paths;
use crate::project::ProjectResolver;
use crate::routes::Routes;
use crate::session::SessionClient;
use crate::ClientError;

/// Payload key carrying the identity endpoint.
pub const AUTH_URL_KEY: &str = "OS_AUTH_URL";

/// Payload key carrying the bearer token.
pub const TOKEN_KEY: &str = "OS_TOKEN";

/// Invocation path for a route of the given visibility.
#[must_use]
pub fn execution_path(visibility: Visibility, app: &AppName, path: &RoutePath) -> String {
    match visibility {
        Visibility::Public => paths::public_execution(app, path),
        Visibility::Private => paths::private_execution(app, path),
    }
}

/// Add `OS_AUTH_URL` and `OS_TOKEN` to an execution payload.
///
/// Existing keys with other names are kept. Existing keys with these two
/// names are replaced and returned.
pub fn inject_auth_properties(
    data: &mut Map<String, Value>,
    auth_url: &str,
    token: String,
) -> Vec<String> {
    let mut replaced = Vec::new();
    for (key, value) in [(AUTH_URL_KEY, Value::from(auth_url)), (TOKEN_KEY, Value::from(token))] {
        if data.insert(key.to_owned(), value).is_some() {
            replaced.push(key.to_owned());
        }
    }
    replaced
}

impl<S: SessionClient, R: ProjectResolver> Routes<S, R> {
    /// Execute a route and return its decoded response unmodified.
    ///
    /// The route is fetched first to learn its current visibility. When
    /// `supply_auth_properties` is set, the session's identity endpoint and
    /// a freshly resolved token are merged into `data` so the function can
    /// call back into the platform.
    ///
    /// The response shape depends on the route's execution type: sync
    /// routes return the function result, async routes an acknowledgement.
    ///
    /// # Errors
    /// Returns [`ClientError::NotFound`] if the route does not exist.
    /// Returns [`ClientError::DataFormat`] if `is_public` is missing or not
    /// boolean-like.
    /// Propagates session errors from the lookup and the invocation unchanged.
    pub async fn execute(
        &self,
        project: Option<&ProjectId>,
        app: &AppName,
        path: &RoutePath,
        supply_auth_properties: bool,
        mut data: Map<String, Value>,
    ) -> Result<Value, ClientError> {
        let project = self.project(project)?;
        let route = self.show(Some(&project), app, path).await?;
        let visibility = Visibility::from_route_document(&route)?;
        let url = execution_path(visibility, app, path);

        if supply_auth_properties {
            let token = self.session().get_token().await?;
            let replaced = inject_auth_properties(&mut data, self.session().auth_url(), token);
            if !replaced.is_empty() {
                tracing::warn!(?replaced, "auth properties replaced caller-supplied keys");
            }
        }

        tracing::info!(
            project = %project,
            app = %app,
            path = %path,
            %visibility,
            supply_auth_properties,
            "executing route"
        );

        self.session().post(&url, &Value::Object(data)).await
    }
}
