//! Response formats and the format registry.
//!
//! A [`ResponseFormat`] turns a structured body value into a wire string for
//! one content format and declares the media type and file extension it
//! serves. The [`FormatRegistry`] holds every format a deployment supports
//! and answers the two lookups the dispatcher needs: by extension (a handler
//! pinning an output format) and by media type (Accept-header negotiation).
//!
//! The registry seeds itself with the JSON baseline before any caller
//! registration. That first entry is the irrevocable default: even a
//! misconfigured deployment can always render an error body.

mod json;
mod xml;

pub use json::JsonFormat;
pub use xml::XmlFormat;

use crate::error::ConfigurationError;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Contract for one response serialization format.
pub trait ResponseFormat: Send + Sync {
    /// File extension identifying this format, e.g. `"json"`.
    fn extension(&self) -> &str;

    /// Media type emitted as the `Content-Type` header, e.g.
    /// `"application/json"`.
    fn content_type(&self) -> &str;

    /// Encode a structured body value into the wire string.
    fn encode(&self, body: &Value) -> String;
}

/// One registered format: the serializer plus the keys it is looked up by.
#[derive(Clone)]
pub struct FormatDescriptor {
    format: Arc<dyn ResponseFormat>,
    media_type: String,
    extension: String,
}

impl FormatDescriptor {
    /// Media type this descriptor answers for.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Extension this descriptor answers for.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl fmt::Debug for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatDescriptor")
            .field("media_type", &self.media_type)
            .field("extension", &self.extension)
            .finish()
    }
}

/// Ordered registry of supported response formats.
///
/// Lookup keys shadow: a later registration for an already-known extension
/// or media type wins, but earlier registrations are retained, and the
/// first-ever entry (the JSON baseline) stays the default forever.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    formats: Vec<FormatDescriptor>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a registry pre-seeded with the JSON baseline format.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = FormatRegistry {
            formats: Vec::new(),
        };
        // The baseline cannot fail its own capability probe.
        let json: Arc<dyn ResponseFormat> = Arc::new(JsonFormat);
        registry.formats.push(FormatDescriptor {
            media_type: json.content_type().to_string(),
            extension: json.extension().to_string(),
            format: json,
        });
        registry
    }

    /// Register a response format.
    ///
    /// The capability probe runs here, at setup time: a format declaring an
    /// empty extension or a media type without a `/` is rejected with a
    /// [`ConfigurationError`] instead of failing requests later.
    pub fn register(&mut self, format: Arc<dyn ResponseFormat>) -> Result<(), ConfigurationError> {
        let media_type = format.content_type().to_string();
        let extension = format.extension().to_string();

        if extension.is_empty() {
            return Err(ConfigurationError::InvalidFormat {
                media_type,
                reason: "empty extension",
            });
        }
        if !media_type.contains('/') {
            return Err(ConfigurationError::InvalidFormat {
                media_type,
                reason: "media type is not of the form type/subtype",
            });
        }

        debug!(
            media_type = %media_type,
            extension = %extension,
            registered = self.formats.len() + 1,
            "Response format registered"
        );

        self.formats.push(FormatDescriptor {
            format,
            media_type,
            extension,
        });
        Ok(())
    }

    /// Find the format serving a file extension. Later registrations shadow
    /// earlier ones.
    #[must_use]
    pub fn lookup_by_extension(&self, extension: &str) -> Option<Arc<dyn ResponseFormat>> {
        self.formats
            .iter()
            .rev()
            .find(|d| d.extension == extension)
            .map(|d| Arc::clone(&d.format))
    }

    /// Find the format serving a media type (exact match). Later
    /// registrations shadow earlier ones.
    #[must_use]
    pub fn lookup_by_media_type(&self, media_type: &str) -> Option<Arc<dyn ResponseFormat>> {
        self.formats
            .iter()
            .rev()
            .find(|d| d.media_type == media_type)
            .map(|d| Arc::clone(&d.format))
    }

    /// The first-ever registered format: the seeded JSON baseline unless a
    /// caller constructed the registry differently. Never absent.
    #[must_use]
    pub fn default_format(&self) -> Arc<dyn ResponseFormat> {
        // new() seeds the baseline before any caller registration.
        Arc::clone(&self.formats[0].format)
    }

    /// All registered descriptors in registration order, duplicates
    /// included.
    #[must_use]
    pub fn descriptors(&self) -> &[FormatDescriptor] {
        &self.formats
    }
}
