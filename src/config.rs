//! Dispatcher configuration.
//!
//! Configuration is explicit: a [`DispatcherConfig`] value is built by the
//! caller (or loaded from the environment) and handed to
//! [`Dispatcher::new`](crate::dispatcher::Dispatcher::new). There is no
//! process-wide state.
//!
//! ## Environment variables
//!
//! - `RESTGATE_BASE_PATH`: the deployment mount point prepended to every
//!   route pattern (e.g. `/api/v1`). Default: empty (mounted at the root).
//! - `RESTGATE_ERROR_URL_BASE`: base URL for error reference pages; the
//!   error code is appended to form the `errorURL` field of structured
//!   error bodies. Default: `https://errors.restgate.dev/`.

use serde::{Deserialize, Serialize};
use std::env;

/// Deployment-level settings for one dispatcher instance.
///
/// Deserializable so deployments can keep it in a larger config file;
/// unset fields fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Mount-point prefix compiled into every route pattern.
    pub base_path: String,
    /// Base URL for the `errorURL` field of structured error bodies.
    pub error_url_base: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        DispatcherConfig {
            base_path: String::new(),
            error_url_base: "https://errors.restgate.dev/".to_string(),
        }
    }
}

impl DispatcherConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = DispatcherConfig::default();
        DispatcherConfig {
            base_path: env::var("RESTGATE_BASE_PATH").unwrap_or(defaults.base_path),
            error_url_base: env::var("RESTGATE_ERROR_URL_BASE").unwrap_or(defaults.error_url_base),
        }
    }

    /// Full reference URL for an error code.
    #[must_use]
    pub fn error_url(&self, code: &str) -> String {
        format!("{}{}", self.error_url_base, code)
    }
}
