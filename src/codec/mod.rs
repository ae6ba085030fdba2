//! Wire codec for the textual HTTP/1.1 representation.
//!
//! This module is pure data transformation: it decodes a byte buffer into an
//! [`HttpRequest`] and encodes an [`HttpResponse`] (or a request) back into
//! bytes. It performs no I/O and never logs.

mod request;
mod response;
mod error;

// Re-export public items
pub use request::{HttpRequest, parse_request};
pub use response::HttpResponse;
pub use error::Error;
