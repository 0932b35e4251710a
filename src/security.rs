//! Authentication providers.
//!
//! The dispatcher never makes authentication decisions itself; handlers ask
//! the configured [`AuthProvider`] through the request context
//! ([`RequestContext::is_authenticated`](crate::context::RequestContext::is_authenticated))
//! and decide what to do with the answer. The provider's challenge header
//! value, when non-empty, is attached to every finalized response so `401`
//! flows carry a `WWW-Authenticate` challenge.

use crate::context::RequestContext;

/// Pluggable yes/no authentication decision.
pub trait AuthProvider: Send + Sync {
    /// Whether the request is authenticated.
    fn is_authenticated(&self, ctx: &RequestContext<'_>) -> bool;

    /// Value for the `WWW-Authenticate` response header. Empty means no
    /// challenge is emitted.
    fn authorization_header_value(&self) -> String {
        String::new()
    }
}

/// Provider that accepts every request and emits no challenge. Useful for
/// public APIs and as the registration-phase placeholder in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl AuthProvider for NoAuth {
    fn is_authenticated(&self, _ctx: &RequestContext<'_>) -> bool {
        true
    }
}

/// Provider that compares a request header against a fixed token.
#[derive(Debug, Clone)]
pub struct StaticTokenAuth {
    header_name: String,
    token: String,
}

impl StaticTokenAuth {
    /// Create a provider expecting `token` in the `header_name` request
    /// header.
    #[must_use]
    pub fn new(header_name: impl Into<String>, token: impl Into<String>) -> Self {
        StaticTokenAuth {
            header_name: header_name.into(),
            token: token.into(),
        }
    }
}

impl AuthProvider for StaticTokenAuth {
    fn is_authenticated(&self, ctx: &RequestContext<'_>) -> bool {
        ctx.get_header(&self.header_name) == Some(self.token.as_str())
    }

    fn authorization_header_value(&self) -> String {
        format!("Token header=\"{}\"", self.header_name)
    }
}
