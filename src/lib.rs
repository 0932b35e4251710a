//! # restgate
//!
//! **restgate** is a minimal, synchronous HTTP request dispatcher core:
//! given an incoming path and method it selects a registered handler,
//! negotiates a response serialization format against the client's `Accept`
//! preferences, invokes the handler, and converts any failure into a
//! structured error response.
//!
//! ## Architecture
//!
//! The library is organized into a handful of modules, leaf-first:
//!
//! - **[`router`]** - Route pattern compilation and first-match-wins path
//!   resolution using anchored, case-insensitive regex matchers
//! - **[`format`]** - The serializer contract and the format registry with
//!   its irrevocable JSON baseline
//! - **[`negotiation`]** - RFC 2616 weighted `Accept` header parsing and
//!   best-match selection
//! - **[`dispatcher`]** - The per-request pipeline tying the pieces
//!   together and collapsing every failure into a structured outcome
//! - **[`handler`]** - The operation-table handler contract
//! - **[`context`]** - Per-request state handed to handlers
//! - **[`security`]** - The pluggable authentication decision
//! - **[`config`]** - Deployment settings (mount point, error URL base)
//!
//! ## Request handling flow
//!
//! ```text
//! request ──▶ Router::resolve(path) ──▶ handler id
//!                 │ no match: 404 / "1001"
//!                 ▼
//!          operation table lookup by method
//!                 │ no operation: 405 / "1002"
//!                 ▼
//!          operation(&mut RequestContext)
//!                 │ panic: 500 / "0000"   structured failure: pass-through
//!                 ▼
//!          finalize: pinned format → Accept negotiation → JSON baseline,
//!          encode body, attach Content-Type + handler + global headers
//! ```
//!
//! The dispatcher performs no I/O; sending the finalized [`Response`] is
//! the transport layer's job, and the core is synchronous with no internal
//! parallelism.
//!
//! ## Quick start
//!
//! ```
//! use restgate::{
//!     Dispatcher, DispatcherConfig, HandlerSuccess, Request, RouteHandler,
//! };
//! use http::Method;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), restgate::ConfigurationError> {
//! let mut dispatcher = Dispatcher::new(DispatcherConfig::default());
//! dispatcher.register_handler(
//!     "greeting",
//!     RouteHandler::new("/greeting")
//!         .get(|_ctx| Ok(HandlerSuccess::ok(json!({"message": "hello"})))),
//! )?;
//!
//! let response = dispatcher.dispatch(Request::new(Method::GET, "/greeting"));
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body, r#"{"message":"hello"}"#);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod handler;
pub mod negotiation;
pub mod response;
pub mod router;
pub mod security;

pub use config::DispatcherConfig;
pub use context::{HeaderVec, Request, RequestContext, MAX_INLINE_HEADERS};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::ConfigurationError;
pub use format::{FormatRegistry, JsonFormat, ResponseFormat, XmlFormat};
pub use handler::{HandlerFailure, HandlerResult, HandlerSuccess, RouteHandler};
pub use negotiation::AcceptPreference;
pub use response::Response;
pub use router::Router;
pub use security::{AuthProvider, NoAuth, StaticTokenAuth};
