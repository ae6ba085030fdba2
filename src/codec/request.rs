//! HTTP request decoding and representation.

use std::collections::HashMap;
use serde::de::DeserializeOwned;

use crate::codec::error::Error;

const CRLF: &str = "\r\n";

static NO_VALUES: &[String] = &[];

/// A decoded HTTP/1.1 request.
///
/// Header names are lower-cased during decoding so lookups are
/// case-insensitive. Each name maps to the ordered value sequence obtained
/// by splitting the raw header value on `", "`; a header name seen a second
/// time overwrites the first entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method token, uppercase by convention.
    pub method: String,
    /// The raw request target, including any query component.
    pub path: String,
    /// The HTTP version token, expected to be `HTTP/1.1`.
    pub version: String,
    /// Lower-cased header names mapped to their value sequences.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw body following the header block.
    pub body: String,
    /// Base directory handed through from the server configuration.
    ///
    /// The core never interprets this value; it exists so file-serving
    /// handlers can resolve paths without reaching for global state.
    pub directory: Option<String>,
}

impl HttpRequest {
    /// Create a request with the given method and target, version `HTTP/1.1`,
    /// no headers and an empty body.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            version: "HTTP/1.1".to_string(),
            ..Self::default()
        }
    }

    /// Add a single-valued header. The name is lower-cased on insertion to
    /// keep the headers mapping consistent with decoded requests.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), vec![value.into()]);
        self
    }

    /// Add a header carrying an ordered value sequence.
    pub fn with_header_values(mut self, name: &str, values: Vec<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), values);
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header as its comma-joined value string (case-insensitive).
    ///
    /// Returns an empty string when the header is absent.
    pub fn header(&self, name: &str) -> String {
        self.header_values(name).join(", ")
    }

    /// Get a header's value sequence (case-insensitive).
    ///
    /// Absence of a header is an empty slice, never an error.
    pub fn header_values(&self, name: &str) -> &[String] {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(NO_VALUES)
    }

    /// Check if a header exists (case-insensitive).
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_ascii_lowercase())
    }

    /// Parse the request body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let value = serde_json::from_str(&self.body)?;
        Ok(value)
    }

    /// Check if the request declares a JSON body.
    pub fn is_json(&self) -> bool {
        self.header("Content-Type").starts_with("application/json")
    }

    /// Serialize the request back to its wire form.
    ///
    /// The layout mirrors [`HttpResponse::to_bytes`]: request line, one line
    /// per header with its values comma-joined, a blank line, then the body
    /// with no trailing CRLF. A request encoded this way decodes back via
    /// [`parse_request`].
    ///
    /// [`HttpResponse::to_bytes`]: crate::codec::HttpResponse::to_bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();

        let request_line = format!("{} {} {}{CRLF}", self.method, self.path, self.version);
        bytes.extend_from_slice(request_line.as_bytes());

        for (name, values) in &self.headers {
            let header_line = format!("{name}: {values}{CRLF}", values = values.join(", "));
            bytes.extend_from_slice(header_line.as_bytes());
        }

        bytes.extend_from_slice(CRLF.as_bytes());
        bytes.extend_from_slice(self.body.as_bytes());

        bytes
    }
}

/// Parse an HTTP request from a byte slice.
///
/// The input must contain one complete request: a request line, zero or more
/// header lines, the blank separator line and the remainder as body.
///
/// The codec does not validate the method or version tokens and does not
/// require a `Host` header; an unknown method decodes successfully and is
/// rejected later by the router.
///
/// # Examples
///
/// ```
/// use wirehttp::parse_request;
///
/// let request_bytes = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
/// let request = parse_request(request_bytes).unwrap();
///
/// assert_eq!(request.method, "GET");
/// assert_eq!(request.path, "/index.html");
/// assert_eq!(request.version, "HTTP/1.1");
/// assert_eq!(request.header("Host"), "example.com");
/// ```
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    let text = std::str::from_utf8(input).map_err(|_| Error::InvalidEncoding)?;

    // One split on the first double-CRLF: header block on the left, body on
    // the right. Requests split across reads are out of scope, so a missing
    // separator is malformed input rather than "read more".
    let (head, body) = text
        .split_once("\r\n\r\n")
        .ok_or(Error::MissingSeparator)?;

    let mut lines = head.split(CRLF);
    let request_line = lines.next().unwrap_or_default();

    let mut tokens = request_line.split(' ');
    let (method, path, version) = match (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    {
        (Some(method), Some(path), Some(version), None) => (method, path, version),
        _ => return Err(Error::MalformedRequestLine(request_line.to_string())),
    };

    let mut headers: HashMap<String, Vec<String>> = HashMap::new();
    for line in lines {
        let (name, value) = line
            .split_once(": ")
            .ok_or_else(|| Error::InvalidHeaderLine(line.to_string()))?;
        let values = value.split(", ").map(str::to_string).collect();
        // A repeated header name overwrites the previous entry.
        headers.insert(name.to_ascii_lowercase(), values);
    }

    Ok(HttpRequest {
        method: method.to_string(),
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body: body.to_string(),
        directory: None,
    })
}
