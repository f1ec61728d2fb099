/// Errors produced by the `laos-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A route path did not satisfy the path rules.
    #[error("invalid route path '{path}': {reason}")]
    InvalidRoutePath { path: String, reason: String },

    /// A list response was neither an array nor a `{"routes": [...]}` object.
    #[error("malformed route list: expected an array of routes, found {found}")]
    MalformedRouteList { found: String },

    /// The route document carries no `is_public` field.
    #[error("route document has no 'is_public' field")]
    MissingVisibility,

    /// The `is_public` field is present but is not a boolean-like string.
    #[error("invalid 'is_public' value {value}: expected \"true\" or \"false\"")]
    InvalidVisibility { value: String },

    /// A route document could not be decoded into a [`crate::Route`].
    #[error("malformed route document: {0}")]
    MalformedRoute(#[from] serde_json::Error),
}
