//! Finalized response representation.
//!
//! A [`Response`] is what [`dispatch`](crate::dispatcher::Dispatcher::dispatch)
//! hands back to the caller: status, headers, and a body already encoded by
//! the negotiated response format. Sending it over a socket is the
//! transport layer's job, not this crate's.

/// HTTP reason phrase for a status code.
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        409 => "Conflict",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "OK",
    }
}

/// A finalized response: status, headers, and the encoded body string.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in emission order.
    pub headers: Vec<(String, String)>,
    /// Body already encoded by the resolved response format.
    pub body: String,
}

impl Response {
    /// Create an empty response with the given status.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Response {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Reason phrase matching [`Self::status`].
    #[must_use]
    pub fn reason(&self) -> &'static str {
        status_reason(self.status)
    }

    /// Add or replace a header. Names compare case-insensitively per
    /// RFC 7230, so a handler-set `content-type` replaces the negotiated
    /// `Content-Type` rather than duplicating it.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    /// Look up a header by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
