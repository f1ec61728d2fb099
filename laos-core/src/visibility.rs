//! Route visibility and its string-encoded wire form.
//!
//! The platform stores `is_public` as the lowercase string `"true"` or
//! `"false"`, never as a JSON boolean. Route documents must be decoded
//! through [`parse_is_public`] before any branching on visibility.

use std::fmt;

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

use crate::error::CoreError;

/// Whether a route is reachable without project-scoped authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Invoked through `/r/{app}{path}`.
    Public,
    /// Invoked through `/v1/r/{app}{path}` with an authenticated session.
    Private,
}

impl Visibility {
    /// Reads the visibility of a route document returned by the server.
    ///
    /// The field is looked up on the document itself first and then inside a
    /// `{"route": {...}}` envelope.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingVisibility`] when neither location has the
    /// field, or [`CoreError::InvalidVisibility`] when it is not boolean-like.
    pub fn from_route_document(document: &Value) -> Result<Self, CoreError> {
        parse_is_public(route_body(document).get("is_public")).map(Self::from)
    }

    /// Returns `true` for [`Visibility::Public`].
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

impl From<bool> for Visibility {
    fn from(is_public: bool) -> Self {
        if is_public {
            Self::Public
        } else {
            Self::Private
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Private => f.write_str("private"),
        }
    }
}

/// The route object inside a server document.
///
/// A document that carries `is_public` itself is the route; otherwise a
/// `{"route": {...}}` envelope is unwrapped when present.
#[must_use]
pub fn route_body(document: &Value) -> &Value {
    if document.get("is_public").is_some() {
        return document;
    }
    match document.get("route") {
        Some(route @ Value::Object(_)) => route,
        _ => document,
    }
}

/// Parses a raw `is_public` value.
///
/// Accepts the strings `"true"` and `"false"` (surrounding whitespace is
/// ignored) and, for servers that already send native booleans, JSON `true`
/// and `false`.
///
/// # Errors
/// Returns [`CoreError::MissingVisibility`] for an absent or `null` value and
/// [`CoreError::InvalidVisibility`] for anything else that is not boolean-like.
pub fn parse_is_public(raw: Option<&Value>) -> Result<bool, CoreError> {
    match raw {
        None | Some(Value::Null) => Err(CoreError::MissingVisibility),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(Value::String(s)) => match s.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(CoreError::InvalidVisibility { value: format!("{s:?}") }),
        },
        Some(other) => Err(CoreError::InvalidVisibility { value: other.to_string() }),
    }
}

/// Lowercase string form of a boolean as sent on the wire.
#[must_use]
pub fn encode_is_public(is_public: bool) -> &'static str {
    if is_public {
        "true"
    } else {
        "false"
    }
}

/// Serde adapter for `bool` fields carried as `"true"` / `"false"` strings.
pub mod bool_string {
    use super::{encode_is_public, parse_is_public, Deserialize, Deserializer, Serializer, Value};

    /// Serializes `value` as `"true"` or `"false"`.
    ///
    /// # Errors
    /// Propagates serializer errors.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(encode_is_public(*value))
    }

    /// Deserializes a boolean-like string (or native boolean).
    ///
    /// # Errors
    /// Fails when the value is missing, `null`, or not boolean-like.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        parse_is_public(Some(&raw)).map_err(serde::de::Error::custom)
    }
}
