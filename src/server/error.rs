//! Error types for the connection dispatcher.

use thiserror::Error;

use crate::codec::Error as CodecError;

/// Errors that terminate a connection.
///
/// Both variants are fatal to the connection they occur on and to nothing
/// else. Routing misses are not errors here: they are answered in-band with
/// the canned 404/405 responses and the connection stays open.
#[derive(Debug, Error)]
pub enum Error {
    /// The request bytes could not be decoded. The connection is closed
    /// without sending a response.
    #[error("Malformed request: {0}")]
    ParseError(#[from] CodecError),

    /// I/O error reading from or writing to the socket.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
