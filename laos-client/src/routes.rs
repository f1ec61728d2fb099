//! Route administration: create, list, show, update, delete.

use serde::Serialize;
use serde_json::{Map, Value};

use laos_core::{AppName, NewRoute, ProjectId, RoutePath};

use crate::paths;
use crate::project::{NoDefaultProject, ProjectResolver};
use crate::session::SessionClient;
use crate::ClientError;

/// Routes API bound to a session and a default-project resolver.
///
/// Every operation takes `project: Option<&ProjectId>`; `None` is resolved
/// through the resolver before the path is built. Responses are returned as
/// decoded JSON exactly as the server sent them. Nothing is cached.
///
/// # Cancel Safety
/// All methods are cancel safe. No state is held between calls.
pub struct Routes<S, R = NoDefaultProject> {
    session: S,
    resolver: R,
}

impl<S: SessionClient> Routes<S> {
    /// Create a routes API that requires an explicit project on every call.
    #[must_use]
    pub fn new(session: S) -> Self {
        Self { session, resolver: NoDefaultProject }
    }
}

impl<S: SessionClient, R: ProjectResolver> Routes<S, R> {
    /// Create a routes API with a default-project resolver.
    #[must_use]
    pub fn with_resolver(session: S, resolver: R) -> Self {
        Self { session, resolver }
    }

    /// The underlying session.
    #[must_use]
    pub fn session(&self) -> &S {
        &self.session
    }

    pub(crate) fn project(&self, explicit: Option<&ProjectId>) -> Result<ProjectId, ClientError> {
        self.resolver.resolve(explicit)
    }

    /// Create a route in `app`.
    ///
    /// Sends one `POST` with a `{"route": {...}}` body in which unset
    /// optional fields carry their defaults and `is_public` is a string.
    ///
    /// # Errors
    /// Returns [`ClientError::MissingProject`] if no project can be resolved.
    /// Propagates session errors unchanged.
    pub async fn create(
        &self,
        project: Option<&ProjectId>,
        app: &AppName,
        route: &NewRoute,
    ) -> Result<Value, ClientError> {
        let project = self.project(project)?;
        let body = encode_body(&route.body())?;
        let collection = paths::routes_collection(&project, app);
        let created = self.session.post(&collection, &body).await?;
        tracing::info!(project = %project, app = %app, path = %route.path(), "route created");
        Ok(created)
    }

    /// List the routes of `app`.
    ///
    /// # Errors
    /// Returns [`ClientError::MissingProject`] if no project can be resolved.
    /// Propagates session errors unchanged.
    pub async fn list(
        &self,
        project: Option<&ProjectId>,
        app: &AppName,
    ) -> Result<Value, ClientError> {
        let project = self.project(project)?;
        self.session.get(&paths::routes_collection(&project, app)).await
    }

    /// Fetch one route.
    ///
    /// # Errors
    /// Returns [`ClientError::NotFound`] if the route does not exist.
    /// Returns [`ClientError::MissingProject`] if no project can be resolved.
    pub async fn show(
        &self,
        project: Option<&ProjectId>,
        app: &AppName,
        path: &RoutePath,
    ) -> Result<Value, ClientError> {
        let project = self.project(project)?;
        self.session.get(&paths::route(&project, app, path)).await
    }

    /// Overlay `fields` onto a route.
    ///
    /// The map is sent as the `PUT` body without any schema check; callers
    /// are responsible for supplying valid route fields.
    ///
    /// # Errors
    /// Returns [`ClientError::NotFound`] if the route does not exist.
    /// Returns [`ClientError::MissingProject`] if no project can be resolved.
    pub async fn update(
        &self,
        project: Option<&ProjectId>,
        app: &AppName,
        path: &RoutePath,
        fields: Map<String, Value>,
    ) -> Result<Value, ClientError> {
        let project = self.project(project)?;
        let body = Value::Object(fields);
        self.session.put(&paths::route(&project, app, path), &body).await
    }

    /// Delete a route and return whatever body the server sends back.
    ///
    /// Deleting an already deleted route is reported as the server decides,
    /// typically [`ClientError::NotFound`].
    ///
    /// # Errors
    /// Returns [`ClientError::MissingProject`] if no project can be resolved.
    /// Propagates session errors unchanged.
    pub async fn delete(
        &self,
        project: Option<&ProjectId>,
        app: &AppName,
        path: &RoutePath,
    ) -> Result<Value, ClientError> {
        let project = self.project(project)?;
        let deleted = self.session.delete(&paths::route(&project, app, path)).await?;
        tracing::info!(project = %project, app = %app, path = %path, "route deleted");
        Ok(deleted)
    }
}

fn encode_body<T: Serialize>(body: &T) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(ClientError::Encode)
}
