//! Error types for the wire codec.

use thiserror::Error;

/// Errors that can occur while decoding a raw request.
///
/// Every decode error is fatal to the connection that produced the bytes:
/// the dispatcher closes the socket without sending a diagnostic response.
#[derive(Debug, Error)]
pub enum Error {
    /// The byte stream never separates its header block from the body.
    #[error("Missing header/body separator")]
    MissingSeparator,

    /// The request line does not split into method, target and version.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// A header line does not contain the `": "` name/value separator.
    #[error("Invalid header line: {0}")]
    InvalidHeaderLine(String),

    /// The request bytes are not valid UTF-8.
    #[error("Request is not valid UTF-8")]
    InvalidEncoding,

    /// Error parsing or producing a JSON body.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
