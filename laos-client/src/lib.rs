//! Client for application routes on the LAOS functions platform.
//!
//! Formats create, list, show, update, delete, and execute requests against
//! the routes REST API and hands them to a [`SessionClient`]. Responses come
//! back as decoded JSON, untouched.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod paths;
pub mod project;
pub mod routes;
pub mod session;

#[cfg(test)]
pub(crate) mod mock;

pub use config::ClientConfig;
pub use error::ClientError;
pub use executor::{execution_path, inject_auth_properties, AUTH_URL_KEY, TOKEN_KEY};
pub use http::HttpSession;
pub use project::{EnvProject, NoDefaultProject, ProjectResolver};
pub use routes::Routes;
pub use session::{AuthSettings, SessionClient};

pub use laos_core::{
    AppName, CoreError, ExecutionType, NewRoute, ProjectId, Route, RoutePath, Visibility,
};
