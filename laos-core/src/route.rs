use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreError;
use crate::id::RoutePath;
use crate::visibility::{bool_string, route_body, Visibility};

/// Memory allocated to a route when none is given, in MB.
pub const DEFAULT_MEMORY_MB: u32 = 128;

/// Execution time frame of a route when none is given, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u32 = 30;

/// Concurrent requests per container when none is given.
pub const DEFAULT_MAX_CONCURRENCY: u32 = 1;

/// How the platform runs a route's container.
///
/// `sync` and `async` are the types the platform documents. Any other value
/// is carried verbatim in [`ExecutionType::Other`] so the server stays the
/// judge of what it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExecutionType {
    /// The caller blocks until the function returns its result.
    Sync,
    /// The caller receives an acknowledgement and the call runs detached.
    Async,
    /// A type string this client has no name for.
    Other(String),
}

impl ExecutionType {
    /// The wire form of the type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sync => "sync",
            Self::Async => "async",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ExecutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ExecutionType {
    fn from(raw: String) -> Self {
        if raw.eq_ignore_ascii_case("sync") {
            Self::Sync
        } else if raw.eq_ignore_ascii_case("async") {
            Self::Async
        } else {
            Self::Other(raw)
        }
    }
}

impl From<&str> for ExecutionType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl FromStr for ExecutionType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Serialize for ExecutionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExecutionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Parameters for creating a route.
///
/// Optional fields left unset fall back to the platform defaults when the
/// request body is built. A numeric option of `0` counts as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoute {
    execution_type: ExecutionType,
    path: RoutePath,
    image: String,
    is_public: bool,
    memory: Option<u32>,
    timeout: Option<u32>,
    max_concurrency: Option<u32>,
    config: BTreeMap<String, String>,
}

impl NewRoute {
    /// Create a private route with default resources.
    ///
    /// # Arguments
    /// - `execution_type`: sync, async, or any type the server accepts
    /// - `path`: route path within the app
    /// - `image`: container image reference, passed through unchecked
    #[must_use]
    pub fn new(execution_type: ExecutionType, path: RoutePath, image: impl Into<String>) -> Self {
        Self {
            execution_type,
            path,
            image: image.into(),
            is_public: false,
            memory: None,
            timeout: None,
            max_concurrency: None,
            config: BTreeMap::new(),
        }
    }

    /// Make the route reachable without project-scoped authentication.
    #[must_use]
    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Memory to allocate, in MB.
    #[must_use]
    pub fn memory(mut self, memory_mb: u32) -> Self {
        self.memory = Some(memory_mb);
        self
    }

    /// Execution time frame, in seconds.
    #[must_use]
    pub fn timeout(mut self, timeout_secs: u32) -> Self {
        self.timeout = Some(timeout_secs);
        self
    }

    /// Concurrent requests a container serves before it is recycled.
    #[must_use]
    pub fn max_concurrency(mut self, max_concurrency: u32) -> Self {
        self.max_concurrency = Some(max_concurrency);
        self
    }

    /// Replace the whole config map.
    #[must_use]
    pub fn config(mut self, config: BTreeMap<String, String>) -> Self {
        self.config = config;
        self
    }

    /// Add one config entry, replacing any previous value for `key`.
    #[must_use]
    pub fn config_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// The route path this request creates.
    #[must_use]
    pub fn path(&self) -> &RoutePath {
        &self.path
    }

    /// Build the `{"route": {...}}` request body with defaults applied.
    #[must_use]
    pub fn body(&self) -> CreateRouteBody<'_> {
        CreateRouteBody {
            route: RouteSpec {
                execution_type: &self.execution_type,
                path: &self.path,
                image: &self.image,
                memory: or_default(self.memory, DEFAULT_MEMORY_MB),
                timeout: or_default(self.timeout, DEFAULT_TIMEOUT_SECS),
                max_concurrency: or_default(self.max_concurrency, DEFAULT_MAX_CONCURRENCY),
                is_public: self.is_public,
                config: &self.config,
            },
        }
    }
}

fn or_default(value: Option<u32>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => v,
        _ => default,
    }
}

/// Wire body of a route creation request.
#[derive(Debug, Serialize)]
pub struct CreateRouteBody<'a> {
    /// The route definition.
    pub route: RouteSpec<'a>,
}

/// Route definition as sent on create, all defaults resolved.
#[derive(Debug, Serialize)]
pub struct RouteSpec<'a> {
    #[serde(rename = "type")]
    pub execution_type: &'a ExecutionType,
    pub path: &'a RoutePath,
    pub image: &'a str,
    pub memory: u32,
    pub timeout: u32,
    pub max_concurrency: u32,
    #[serde(with = "bool_string")]
    pub is_public: bool,
    pub config: &'a BTreeMap<String, String>,
}

/// A route as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Owning project, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Owning app, when the server includes it.
    #[serde(default, alias = "app", skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    /// Route path within the app.
    pub path: String,
    /// Invocation type, as the server reports it.
    #[serde(rename = "type")]
    pub execution_type: ExecutionType,
    /// Container image reference.
    pub image: String,
    /// Whether the route is publicly invokable.
    #[serde(with = "bool_string")]
    pub is_public: bool,
    /// Memory in MB.
    #[serde(default = "default_memory")]
    pub memory: u32,
    /// Timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u32,
    /// Maximum concurrent requests per container.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: u32,
    /// Environment passed to the container.
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

fn default_memory() -> u32 {
    DEFAULT_MEMORY_MB
}

fn default_timeout() -> u32 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_concurrency() -> u32 {
    DEFAULT_MAX_CONCURRENCY
}

impl Route {
    /// Decode a route from a server response.
    ///
    /// Accepts the bare route object as well as a `{"route": {...}}` envelope.
    ///
    /// # Errors
    /// Returns [`CoreError::MalformedRoute`] when required fields are missing
    /// or carry the wrong type.
    pub fn from_response(document: &Value) -> Result<Self, CoreError> {
        Ok(Self::deserialize(route_body(document))?)
    }

    /// Decode every route in a list response.
    ///
    /// Accepts a bare array or a `{"routes": [...]}` envelope.
    ///
    /// # Errors
    /// Returns [`CoreError::MalformedRouteList`] for any other shape and
    /// [`CoreError::MalformedRoute`] if any element fails to decode.
    pub fn list_from_response(document: &Value) -> Result<Vec<Self>, CoreError> {
        let items = match document {
            Value::Array(items) => items,
            Value::Object(fields) => match fields.get("routes") {
                Some(Value::Array(items)) => items,
                Some(other) => {
                    return Err(CoreError::MalformedRouteList {
                        found: format!("'routes' holding {}", json_kind(other)),
                    })
                }
                None => {
                    return Err(CoreError::MalformedRouteList {
                        found: "an object without 'routes'".to_owned(),
                    })
                }
            },
            other => {
                return Err(CoreError::MalformedRouteList { found: json_kind(other).to_owned() })
            }
        };
        items.iter().map(Self::from_response).collect()
    }

    /// Visibility derived from `is_public`.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        Visibility::from(self.is_public)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
