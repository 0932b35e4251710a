//! Handler contract: the operation table.
//!
//! A [`RouteHandler`] declares the URL pattern it serves and one operation
//! closure per supported HTTP method. Method support is the presence of a
//! key in the table; the dispatcher turns an absent key into a
//! `405 Method Not Allowed`, so there is no "unsupported" sentinel to
//! implement and nothing is probed at dispatch time.
//!
//! ```
//! use restgate::{HandlerFailure, HandlerSuccess, RouteHandler};
//! use serde_json::json;
//!
//! let handler = RouteHandler::new("/sample/a/1/b/2")
//!     .get(|_ctx| {
//!         Ok(HandlerSuccess::ok(
//!             json!({"success": {"message": "Hello World!! from GET"}}),
//!         ))
//!     })
//!     .post(|ctx| {
//!         if !ctx.is_authenticated() {
//!             return Err(HandlerFailure::unauthenticated());
//!         }
//!         Ok(HandlerSuccess::ok(
//!             json!({"success": {"message": "Your data was POST'ed"}}),
//!         ))
//!     });
//! assert!(handler.supports(&http::Method::GET));
//! assert!(!handler.supports(&http::Method::DELETE));
//! ```

use crate::context::RequestContext;
use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A handler operation: invoked with the per-request context, returns a
/// success payload or signals a structured failure.
pub type Operation = Box<dyn Fn(&mut RequestContext<'_>) -> HandlerResult + Send + Sync>;

/// What a handler operation produces.
pub type HandlerResult = Result<HandlerSuccess, HandlerFailure>;

/// A successful handler result: status, extra headers, and the body value
/// to be encoded by the resolved response format.
#[derive(Debug, Clone)]
pub struct HandlerSuccess {
    /// HTTP status code.
    pub status: u16,
    /// Headers the handler wants on the response, merged in after the
    /// negotiated `Content-Type`.
    pub headers: Vec<(String, String)>,
    /// Body value, opaque to the dispatcher.
    pub body: Value,
}

impl HandlerSuccess {
    /// A `200 OK` result with the given body.
    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self::with_status(200, body)
    }

    /// A result with an explicit status.
    #[must_use]
    pub fn with_status(status: u16, body: Value) -> Self {
        HandlerSuccess {
            status,
            headers: Vec::new(),
            body,
        }
    }

    /// Add a response header (builder style).
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A structured domain failure signaled by a handler. Passed through the
/// dispatcher unchanged: the status and code end up in the error body
/// exactly as given.
#[derive(Debug, Clone)]
pub struct HandlerFailure {
    /// HTTP status code.
    pub status: u16,
    /// Application error code, e.g. `"1003"`.
    pub code: String,
    /// Human-readable message for the error body.
    pub message: String,
}

impl HandlerFailure {
    /// A failure with the given status, code, and message.
    #[must_use]
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        HandlerFailure {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// The stock `401` failure for an unauthenticated request.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::new(401, "1003", "The request is not Authenticated")
    }
}

/// A registered route handler: URL pattern plus the operation table.
#[derive(Default)]
pub struct RouteHandler {
    pattern: String,
    operations: HashMap<Method, Operation>,
}

impl RouteHandler {
    /// Declare a handler for the given URL pattern. Pattern segments may
    /// carry inline regex fragments, e.g. `/items/(\d+)`.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        RouteHandler {
            pattern: pattern.into(),
            operations: HashMap::new(),
        }
    }

    /// The declared URL pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Register an operation for an arbitrary method. A second registration
    /// for the same method replaces the first.
    #[must_use]
    pub fn operation<F>(mut self, method: Method, op: F) -> Self
    where
        F: Fn(&mut RequestContext<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.operations.insert(method, Box::new(op));
        self
    }

    /// Register a `GET` operation.
    #[must_use]
    pub fn get<F>(self, op: F) -> Self
    where
        F: Fn(&mut RequestContext<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.operation(Method::GET, op)
    }

    /// Register a `POST` operation.
    #[must_use]
    pub fn post<F>(self, op: F) -> Self
    where
        F: Fn(&mut RequestContext<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.operation(Method::POST, op)
    }

    /// Register a `PUT` operation.
    #[must_use]
    pub fn put<F>(self, op: F) -> Self
    where
        F: Fn(&mut RequestContext<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.operation(Method::PUT, op)
    }

    /// Register a `DELETE` operation.
    #[must_use]
    pub fn delete<F>(self, op: F) -> Self
    where
        F: Fn(&mut RequestContext<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.operation(Method::DELETE, op)
    }

    /// Register a `PATCH` operation.
    #[must_use]
    pub fn patch<F>(self, op: F) -> Self
    where
        F: Fn(&mut RequestContext<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.operation(Method::PATCH, op)
    }

    /// Whether an operation is registered for `method`.
    #[must_use]
    pub fn supports(&self, method: &Method) -> bool {
        self.operations.contains_key(method)
    }

    pub(crate) fn operation_for(&self, method: &Method) -> Option<&Operation> {
        self.operations.get(method)
    }

    pub(crate) fn has_operations(&self) -> bool {
        !self.operations.is_empty()
    }
}

impl fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteHandler")
            .field("pattern", &self.pattern)
            .field("methods", &self.operations.keys().collect::<Vec<_>>())
            .finish()
    }
}
