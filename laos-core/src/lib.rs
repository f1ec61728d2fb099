//! Core types for the LAOS functions platform client.
//!
//! Defines routes, their creation parameters, identifiers, and the
//! string-encoded visibility flag used on the wire.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod id;
pub mod route;
pub mod visibility;

pub use error::CoreError;
pub use id::{AppName, ProjectId, RoutePath};
pub use route::{
    CreateRouteBody, ExecutionType, NewRoute, Route, RouteSpec, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_MEMORY_MB, DEFAULT_TIMEOUT_SECS,
};
pub use visibility::{parse_is_public, Visibility};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_values() {
        assert_eq!(DEFAULT_MEMORY_MB, 128);
        assert_eq!(DEFAULT_TIMEOUT_SECS, 30);
        assert_eq!(DEFAULT_MAX_CONCURRENCY, 1);
    }

    #[test]
    fn core_error_display_includes_offending_value() {
        let err = CoreError::InvalidVisibility { value: "\"maybe\"".to_owned() };
        assert!(err.to_string().contains("maybe"), "Display must include the value");

        let err = CoreError::MalformedRouteList { found: "a string".to_owned() };
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn visibility_display_is_lowercase() {
        assert_eq!(Visibility::Public.to_string(), "public");
        assert_eq!(Visibility::Private.to_string(), "private");
        assert_eq!(Visibility::from(true), Visibility::Public);
    }
}
