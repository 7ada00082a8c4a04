use std::fmt;

/// Result alias used across the router.
pub type Result<T> = std::result::Result<T, RouterError>;

/// Errors raised while registering, compiling or resolving routes.
///
/// Every variant is terminal: nothing here is transient, so callers should
/// surface the error rather than retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A route with the same signature already claims one of the methods
    ///
    /// Raised by `add` when `overwrite` was not requested.
    RouteExists {
        /// Pattern text of the conflicting route
        path: String,
        /// Methods that overlap with the existing registration
        methods: Vec<String>,
    },
    /// A dynamic segment is malformed or names an unregistered type
    ParamNameError {
        /// The offending segment as written in the pattern
        segment: String,
        /// Human readable reason
        reason: String,
    },
    /// No compiled route consumes the whole path
    NotFound {
        /// The path that was resolved
        path: String,
    },
    /// The path matched a route but the method is not registered on it
    NoMethod {
        /// The path that was resolved
        path: String,
        /// The requested method
        method: String,
        /// Methods registered on the matched route (sorted)
        allowed: Vec<String>,
    },
    /// `finalize` found two compiled leaves it cannot tell apart
    Configuration(String),
    /// The router was used in a way it does not support
    InvalidUsage(String),
    /// Registration attempted on a finalized router
    Finalized,
    /// Resolution attempted before `finalize`
    NotFinalized,
}

impl RouterError {
    /// `true` for the resolution misses a dispatcher maps to 404 / 405.
    #[must_use]
    pub fn is_miss(&self) -> bool {
        matches!(self, RouterError::NotFound { .. } | RouterError::NoMethod { .. })
    }

    pub(crate) fn param(segment: &str, reason: impl Into<String>) -> Self {
        RouterError::ParamNameError {
            segment: segment.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(path: &str) -> Self {
        RouterError::NotFound {
            path: path.to_string(),
        }
    }
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::RouteExists { path, methods } => {
                write!(f, "Route already registered: {} [{}]", path, methods.join(","))
            }
            RouterError::ParamNameError { segment, reason } => {
                write!(f, "Invalid parameter declaration '{}': {}", segment, reason)
            }
            RouterError::NotFound { path } => write!(f, "Not Found: {}", path),
            RouterError::NoMethod {
                path,
                method,
                allowed,
            } => write!(
                f,
                "Method '{}' not found on {} (allowed: {})",
                method,
                path,
                allowed.join(",")
            ),
            RouterError::Configuration(msg) => write!(f, "Router configuration error: {}", msg),
            RouterError::InvalidUsage(msg) => write!(f, "Invalid usage: {}", msg),
            RouterError::Finalized => {
                write!(f, "Router is finalized; call reopen() before adding routes")
            }
            RouterError::NotFinalized => {
                write!(f, "Router has not been finalized; call finalize() first")
            }
        }
    }
}

impl std::error::Error for RouterError {}
