//! Registration-time error types.
//!
//! Configuration failures are surfaced immediately to the caller during the
//! setup phase and never deferred to request time. Request-time failures
//! (unmatched route, unsupported method, handler faults) are not errors in
//! this sense at all: the dispatcher converts them into structured failure
//! outcomes, see [`crate::dispatcher`].

use thiserror::Error;

/// A failure while wiring up the dispatcher: a bad route pattern, a
/// serializer that does not satisfy the format contract, or a handler
/// registered without any method operations.
///
/// Each variant carries a stable setup-error code via [`code`](Self::code),
/// usable in structured error bodies and operator tooling.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The route template (including any inline regex fragments) did not
    /// compile into a matcher.
    #[error("invalid route pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The full anchored pattern that was handed to the regex engine.
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A response format failed the capability probe at registration.
    #[error("response format `{media_type}` does not satisfy the serializer contract: {reason}")]
    InvalidFormat {
        media_type: String,
        reason: &'static str,
    },

    /// A handler was registered with an empty operation table. A route that
    /// can never answer any method is a wiring bug, not a 405 waiting to
    /// happen.
    #[error("handler `{handler}` exposes no method operations")]
    NoOperations { handler: String },
}

impl ConfigurationError {
    /// Stable error code for this configuration failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ConfigurationError::InvalidPattern { .. } => "0054",
            ConfigurationError::InvalidFormat { .. } => "0003",
            ConfigurationError::NoOperations { .. } => "0053",
        }
    }
}
