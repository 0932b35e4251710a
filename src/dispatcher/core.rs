use crate::config::DispatcherConfig;
use crate::context::{Request, RequestContext};
use crate::error::ConfigurationError;
use crate::format::{FormatRegistry, ResponseFormat};
use crate::handler::RouteHandler;
use crate::negotiation;
use crate::response::Response;
use crate::router::Router;
use crate::security::AuthProvider;
use serde_json::{json, Value};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The terminal result of handling one request, produced exactly once per
/// dispatch: either a success payload or a structured failure, both still
/// carrying the un-encoded body value.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// The handler produced a result.
    Success {
        status: u16,
        headers: Vec<(String, String)>,
        body: Value,
    },
    /// Dispatch failed: no route, unsupported method, a handler-signaled
    /// domain failure, or a caught handler fault.
    Failure {
        status: u16,
        code: String,
        message: String,
        url: String,
    },
}

impl DispatchOutcome {
    /// HTTP status of this outcome.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            DispatchOutcome::Success { status, .. } | DispatchOutcome::Failure { status, .. } => {
                *status
            }
        }
    }

    /// The application error code, when this outcome is a failure.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            DispatchOutcome::Success { .. } => None,
            DispatchOutcome::Failure { code, .. } => Some(code),
        }
    }
}

/// Orchestrates one request: route resolution, method lookup, handler
/// invocation, and response finalization.
///
/// All registration happens before serving (`&mut self`); dispatch itself
/// takes `&self`, so the borrow checker enforces the
/// registration-complete-before-serve discipline.
pub struct Dispatcher {
    router: Router,
    handlers: HashMap<String, RouteHandler>,
    formats: FormatRegistry,
    auth: Option<Box<dyn AuthProvider>>,
    global_headers: Vec<(String, String)>,
    config: DispatcherConfig,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatcherConfig::default())
    }
}

impl Dispatcher {
    /// Create a dispatcher with an empty routing table and the JSON-seeded
    /// format registry.
    #[must_use]
    pub fn new(config: DispatcherConfig) -> Self {
        Dispatcher {
            router: Router::new(config.base_path.clone()),
            handlers: HashMap::new(),
            formats: FormatRegistry::new(),
            auth: None,
            global_headers: Vec::new(),
            config,
        }
    }

    /// Register a response format. Setup-time failure only; see
    /// [`FormatRegistry::register`].
    pub fn register_format(
        &mut self,
        format: Arc<dyn ResponseFormat>,
    ) -> Result<(), ConfigurationError> {
        self.formats.register(format)
    }

    /// Register a handler under an identifier, adding its pattern to the
    /// routing table.
    ///
    /// Fails with [`ConfigurationError`] when the handler exposes no method
    /// operations or its pattern does not compile. Re-registering an
    /// identifier replaces the previous handler and its route.
    pub fn register_handler(
        &mut self,
        handler_id: &str,
        handler: RouteHandler,
    ) -> Result<(), ConfigurationError> {
        if !handler.has_operations() {
            return Err(ConfigurationError::NoOperations {
                handler: handler_id.to_string(),
            });
        }

        self.router.register(handler.pattern(), handler_id)?;

        if self.handlers.insert(handler_id.to_string(), handler).is_some() {
            warn!(handler = %handler_id, "Replaced existing handler");
        } else {
            info!(
                handler = %handler_id,
                total_handlers = self.handlers.len(),
                "Handler registered"
            );
        }
        Ok(())
    }

    /// Set the authentication provider consulted by handlers through the
    /// request context.
    pub fn set_auth_provider(&mut self, provider: Box<dyn AuthProvider>) {
        self.auth = Some(provider);
    }

    /// Add a process-wide header merged into every finalized response.
    pub fn add_global_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.global_headers.push((name.into(), value.into()));
    }

    /// The routing table.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// The format registry.
    #[must_use]
    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    /// Run one request through the pipeline and produce the finalized
    /// response. Never panics and never returns an error: every failure
    /// mode collapses into an encoded error body with a matching status.
    #[must_use]
    pub fn dispatch(&self, request: Request) -> Response {
        let mut ctx = RequestContext::new(request, &self.formats, self.auth.as_deref());
        let outcome = self.run(&mut ctx);
        self.finalize(&ctx, outcome)
    }

    /// The Received → Routed → MethodChecked → Invoked part of the
    /// pipeline. Always produces an outcome; `finalize` handles the rest.
    fn run(&self, ctx: &mut RequestContext<'_>) -> DispatchOutcome {
        // Received → Routed
        let handler_id = match self.router.resolve(&ctx.path) {
            Some(id) => id.to_string(),
            None => {
                return self.failure(404, "1001", "The requested resource was not found");
            }
        };

        let handler = match self.handlers.get(&handler_id) {
            Some(handler) => handler,
            None => {
                // Router entries are only created through register_handler,
                // so this table cannot miss; a miss means the tables were
                // mutated out of band.
                error!(handler = %handler_id, "Handler not found for matched route");
                return self.failure(404, "1001", "The requested resource was not found");
            }
        };

        // Routed → MethodChecked
        let operation = match handler.operation_for(&ctx.method) {
            Some(op) => op,
            None => {
                debug!(
                    handler = %handler_id,
                    method = %ctx.method,
                    "Method not supported by handler"
                );
                return self.failure(405, "1002", "The requested HTTP method is not supported");
            }
        };

        info!(
            handler = %handler_id,
            method = %ctx.method,
            path = %ctx.path,
            "Request dispatched to handler"
        );

        // MethodChecked → Invoked
        match panic::catch_unwind(AssertUnwindSafe(|| operation(ctx))) {
            Ok(Ok(success)) => DispatchOutcome::Success {
                status: success.status,
                headers: success.headers,
                body: success.body,
            },
            Ok(Err(failure)) => {
                // Handler-signaled domain failure: passed through unchanged.
                debug!(
                    handler = %handler_id,
                    status = failure.status,
                    code = %failure.code,
                    "Handler signaled failure"
                );
                let url = self.config.error_url(&failure.code);
                DispatchOutcome::Failure {
                    status: failure.status,
                    code: failure.code,
                    message: failure.message,
                    url,
                }
            }
            Err(fault) => {
                let message = fault_message(fault);
                error!(
                    handler = %handler_id,
                    method = %ctx.method,
                    path = %ctx.path,
                    fault = %message,
                    "Handler panicked"
                );
                self.failure(500, "0000", &message)
            }
        }
    }

    /// Invoked → Finalized: resolve the response format, encode the body,
    /// and attach headers in layering order (negotiated `Content-Type`,
    /// handler headers, global headers, authentication challenge).
    fn finalize(&self, ctx: &RequestContext<'_>, outcome: DispatchOutcome) -> Response {
        let format = ctx
            .selected_format()
            .or_else(|| {
                let header = ctx.get_header("accept")?;
                negotiation::best_match(&negotiation::parse(header), &self.formats)
            })
            .unwrap_or_else(|| self.formats.default_format());

        let (status, handler_headers, body) = match outcome {
            DispatchOutcome::Success {
                status,
                headers,
                body,
            } => (status, headers, body),
            DispatchOutcome::Failure {
                status,
                code,
                message,
                url,
            } => {
                let body = json!({
                    "error": {
                        "errorCode": code,
                        "errorMessage": message,
                        "errorURL": url,
                    }
                });
                (status, Vec::new(), body)
            }
        };

        let mut response = Response::new(status);
        response.set_header("Content-Type", format.content_type());
        for (name, value) in handler_headers {
            response.set_header(&name, value);
        }
        for (name, value) in &self.global_headers {
            response.set_header(name, value.clone());
        }
        let challenge = ctx.authorization_header_value();
        if !challenge.is_empty() {
            response.set_header("WWW-Authenticate", challenge);
        }
        response.body = format.encode(&body);

        debug!(
            status = response.status,
            content_type = %format.content_type(),
            "Response finalized"
        );
        response
    }

    fn failure(&self, status: u16, code: &str, message: &str) -> DispatchOutcome {
        DispatchOutcome::Failure {
            status,
            code: code.to_string(),
            message: message.to_string(),
            url: self.config.error_url(code),
        }
    }
}

/// Best-effort description of a caught handler fault.
fn fault_message(fault: Box<dyn Any + Send>) -> String {
    if let Some(msg) = fault.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = fault.downcast_ref::<String>() {
        msg.clone()
    } else {
        "handler raised a non-string fault".to_string()
    }
}
