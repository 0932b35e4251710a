//! Per-request state passed to handlers.
//!
//! A [`RequestContext`] is built by the dispatcher for exactly one request
//! and never shared or reused. It carries the raw request data plus handles
//! to the format registry and authentication provider, so handlers can pin
//! a response format or check the authentication outcome without touching
//! the dispatcher itself.

use crate::format::{FormatRegistry, ResponseFormat};
use crate::security::AuthProvider;
use http::Method;
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum inline headers before heap allocation. Most requests carry well
/// under sixteen headers.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated header storage for the request path.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// The raw incoming request as handed to the dispatcher by the transport
/// layer.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Request path, query string excluded.
    pub path: String,
    /// Raw request headers.
    pub headers: HeaderVec,
    /// Raw request body, if any.
    pub body: Option<String>,
}

impl Request {
    /// Create a request with no headers and no body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Request {
            method,
            path: path.into(),
            headers: HeaderVec::new(),
            body: None,
        }
    }

    /// Add a header (builder style).
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    /// Set the body (builder style).
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Mutable per-request state owned by one dispatch invocation.
pub struct RequestContext<'a> {
    /// HTTP method of the request.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Raw request headers.
    pub headers: HeaderVec,
    /// Raw request body, if any.
    pub body: Option<String>,
    formats: &'a FormatRegistry,
    auth: Option<&'a dyn AuthProvider>,
    selected_format: Option<Arc<dyn ResponseFormat>>,
}

impl<'a> RequestContext<'a> {
    pub(crate) fn new(
        request: Request,
        formats: &'a FormatRegistry,
        auth: Option<&'a dyn AuthProvider>,
    ) -> Self {
        RequestContext {
            method: request.method,
            path: request.path,
            headers: request.headers,
            body: request.body,
            formats,
            auth,
            selected_format: None,
        }
    }

    /// Look up a request header by name (case-insensitive per RFC 7230).
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The format registry for this deployment.
    #[must_use]
    pub fn formats(&self) -> &FormatRegistry {
        self.formats
    }

    /// Pin the response format by extension, bypassing Accept negotiation.
    ///
    /// Returns whether the extension is served by a registered format.
    /// On a miss the previously pinned format (if any) is kept, so handlers
    /// can express a priority list by calling this from least to most
    /// preferred:
    ///
    /// ```ignore
    /// ctx.select_format_by_extension("json"); // baseline
    /// ctx.select_format_by_extension("rss");  // unregistered: no effect
    /// ```
    pub fn select_format_by_extension(&mut self, extension: &str) -> bool {
        match self.formats.lookup_by_extension(extension) {
            Some(format) => {
                self.selected_format = Some(format);
                true
            }
            None => false,
        }
    }

    /// The format pinned by the handler, if any.
    #[must_use]
    pub fn selected_format(&self) -> Option<Arc<dyn ResponseFormat>> {
        self.selected_format.clone()
    }

    /// Whether the configured authentication provider accepts this request.
    /// `false` when no provider is configured.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some_and(|a| a.is_authenticated(self))
    }

    /// The provider's authorization challenge header value, or `""` when no
    /// provider is configured.
    #[must_use]
    pub fn authorization_header_value(&self) -> String {
        self.auth
            .map(AuthProvider::authorization_header_value)
            .unwrap_or_default()
    }
}
