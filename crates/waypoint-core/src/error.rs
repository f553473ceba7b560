//! Routing error type.
//!
//! Every failure mode is modeled as a single `(code, message)` pair carried
//! on the request [`Context`](crate::Context); there is no exception
//! hierarchy. The pipeline checks the slot once after it completes, and
//! nothing here is fatal to the process.

use std::fmt;

/// Code for "no routes exist at all".
pub const CODE_ROUTE_NOT_REGISTERED: i32 = 100;
/// Code for "no trie path matched the request path".
pub const CODE_PATH_NOT_MATCHED: i32 = 101;
/// Code for "path matched, method did not".
pub const CODE_METHOD_NOT_ALLOWED: i32 = 102;

/// A terminal routing or handler error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: i32,
    message: String,
}

impl Error {
    /// Create an error with an application-defined code.
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The error reported when dispatching against an empty router.
    #[must_use]
    pub fn route_not_registered() -> Self {
        Self::new(CODE_ROUTE_NOT_REGISTERED, "route not registered.")
    }

    /// The error reported when no trie path matches.
    #[must_use]
    pub fn path_not_matched() -> Self {
        Self::new(CODE_PATH_NOT_MATCHED, "route not matched.")
    }

    /// The error reported when the path matched but the method did not.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::new(CODE_METHOD_NOT_ALLOWED, "method not allowed.")
    }

    /// Get the numeric code.
    #[must_use]
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
