use super::pattern::{self, CompiledMatcher};
use crate::error::ConfigurationError;
use tracing::{debug, info, warn};

/// One registered route: a compiled matcher paired with the identifier of
/// the handler that serves it. Entries live for the router's lifetime or
/// until the same handler identifier is re-registered.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    matcher: CompiledMatcher,
    handler_id: String,
}

impl RouteEntry {
    /// Identifier of the handler serving this route.
    #[must_use]
    pub fn handler_id(&self) -> &str {
        &self.handler_id
    }

    /// The compiled matcher for this route.
    #[must_use]
    pub fn matcher(&self) -> &CompiledMatcher {
        &self.matcher
    }
}

/// Resolves an incoming path to a handler identifier.
///
/// Routes are tested in registration order and the first match wins, so
/// registration order is a priority order: overlapping patterns are a
/// deliberate configuration choice, and an earlier broad pattern silently
/// shadows a later narrow one.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<RouteEntry>,
    base_path: String,
}

impl Router {
    /// Create an empty router mounted at `base_path`.
    #[must_use]
    pub fn new(base_path: impl Into<String>) -> Self {
        Router {
            routes: Vec::new(),
            base_path: base_path.into(),
        }
    }

    /// The mount-point prefix compiled into every registered pattern.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Register a route pattern for a handler identifier.
    ///
    /// The pattern is compiled with the router's base path; a malformed
    /// pattern is rejected here, never at match time. Re-registering an
    /// already-known handler identifier replaces its prior entry (the new
    /// entry goes to the tail of the priority order).
    pub fn register(&mut self, template: &str, handler_id: &str) -> Result<(), ConfigurationError> {
        let matcher = pattern::compile(template, &self.base_path)?;

        if let Some(pos) = self.routes.iter().position(|e| e.handler_id == handler_id) {
            self.routes.remove(pos);
            warn!(
                handler = %handler_id,
                pattern = %template,
                "Replacing existing route registration"
            );
        }

        info!(
            handler = %handler_id,
            pattern = %matcher.as_str(),
            routes = self.routes.len() + 1,
            "Route registered"
        );

        self.routes.push(RouteEntry {
            matcher,
            handler_id: handler_id.to_string(),
        });
        Ok(())
    }

    /// Resolve a path to the handler identifier of the first matching
    /// route, or `None` when nothing matches.
    ///
    /// At most one trailing `/` is stripped before matching, so
    /// `/sample/a/1/` and `/sample/a/1` resolve identically while
    /// `/sample/a/1//` does not.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&str> {
        let path = path.strip_suffix('/').unwrap_or(path);

        debug!(path = %path, routes = self.routes.len(), "Route match attempt");

        for entry in &self.routes {
            if entry.matcher.is_match(path) {
                debug!(
                    path = %path,
                    handler = %entry.handler_id,
                    pattern = %entry.matcher.as_str(),
                    "Route matched"
                );
                return Some(&entry.handler_id);
            }
        }

        warn!(path = %path, "No route matched");
        None
    }

    /// Registered routes in priority order.
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
