//! HTTP response builder and encoding.

use std::collections::HashMap;
use serde::Serialize;

use crate::codec::error::Error;

/// An HTTP response under construction.
///
/// Defaults to `200 OK` with no headers and an empty body. Header name case
/// is preserved as set. `Content-Type` and `Content-Length` are finalized at
/// encode time, not here: a default `text/plain` is emitted when no content
/// type was set, and `Content-Length` is always computed from the body,
/// discarding any caller-supplied value.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The reason phrase sent alongside the status code.
    pub reason: String,
    /// The response headers, names mapped to their value sequences.
    pub headers: HashMap<String, Vec<String>>,
    /// The response body.
    pub body: String,
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResponse {
    /// Create a `200 OK` response with no headers and an empty body.
    pub fn new() -> Self {
        Self {
            status: 200,
            reason: "OK".to_string(),
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    /// The canned `404 Not Found` response.
    pub fn not_found() -> Self {
        Self::new().with_status(404, "Not Found").with_body("Not Found")
    }

    /// The canned `405 Method Not Allowed` response.
    pub fn method_not_allowed() -> Self {
        Self::new()
            .with_status(405, "Method Not Allowed")
            .with_body("Method Not Allowed")
    }

    /// Set the status code and reason phrase.
    pub fn with_status(mut self, status: u16, reason: impl Into<String>) -> Self {
        self.status = status;
        self.reason = reason.into();
        self
    }

    /// Add or replace a single-valued header.
    pub fn with_header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_header_values(name, vec![value.into()])
    }

    /// Add or replace a header carrying an ordered value sequence.
    pub fn with_header_values(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.headers.insert(name.into(), values);
        self
    }

    /// Set the content type.
    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        self.with_header("Content-Type", content_type)
    }

    /// Set the response body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Serialize the given value to JSON and set it as the response body,
    /// with `Content-Type: application/json`.
    pub fn with_json<T: Serialize>(self, value: &T) -> Result<Self, Error> {
        let json = serde_json::to_string(value)?;
        Ok(self
            .with_content_type("application/json")
            .with_body(json))
    }

    /// Encode the response to its wire form.
    ///
    /// Encoding does not mutate the response, so encoding twice yields
    /// byte-identical output. No trailing CRLF follows the body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        let status_line = format!("HTTP/1.1 {} {}\r\n", self.status, self.reason);
        bytes.extend_from_slice(status_line.as_bytes());

        let mut has_content_type = false;
        for (name, values) in &self.headers {
            if name.eq_ignore_ascii_case("Content-Length") {
                // Recomputed from the body below.
                continue;
            }
            if name.eq_ignore_ascii_case("Content-Type") {
                has_content_type = true;
            }
            let header_line = format!("{name}: {values}\r\n", values = values.join(", "));
            bytes.extend_from_slice(header_line.as_bytes());
        }

        if !has_content_type {
            bytes.extend_from_slice(b"Content-Type: text/plain\r\n");
        }
        let content_length = format!("Content-Length: {}\r\n", self.body.len());
        bytes.extend_from_slice(content_length.as_bytes());

        // Blank line separating headers from body
        bytes.extend_from_slice(b"\r\n");

        bytes.extend_from_slice(self.body.as_bytes());

        bytes
    }
}
