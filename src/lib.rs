//! A minimal HTTP/1.1 wire-protocol engine.
//!
//! This library decodes raw request bytes into structured requests, matches
//! them against a table of path-pattern routes with `{name}` placeholders,
//! and encodes handler responses back onto the wire. It aims for a small,
//! predictable RFC 7230 subset rather than full protocol coverage.
//!
//! # Features
//!
//! - Decode HTTP/1.1 requests from byte slices; methods are plain tokens,
//!   so unknown methods are a routing concern, not a parse error
//! - Case-insensitive header lookup over ordered, comma-split value
//!   sequences
//! - Path-pattern routing with positional parameter capture, first match
//!   wins, anchored start-to-end
//! - Response builder with deterministic `Content-Type`/`Content-Length`
//!   defaulting at encode time
//! - Async server with per-connection tasks, a connection limit and
//!   graceful shutdown
//! - JSON body helpers on both request and response
//!
//! # Examples
//!
//! ## Decoding a request
//!
//! ```
//! use wirehttp::parse_request;
//!
//! let request_bytes = b"GET /echo/abc HTTP/1.1\r\nHost: example.com\r\n\r\n";
//!
//! match parse_request(request_bytes) {
//!     Ok(request) => {
//!         println!("Method: {}", request.method);
//!         println!("Path: {}", request.path);
//!         println!("Host: {}", request.header("Host"));
//!     }
//!     Err(err) => {
//!         println!("Error parsing request: {}", err);
//!     }
//! }
//! ```
//!
//! ## Routing
//!
//! ```
//! use wirehttp::Router;
//!
//! let mut router = Router::new();
//! router.register("GET", "/echo/{message}", "echo handler");
//! router.register("GET", "/", "index handler");
//!
//! let found = router.route("GET", "/echo/hi").unwrap();
//! assert_eq!(*found.handler, "echo handler");
//! assert_eq!(found.params, vec!["hi".to_string()]);
//! ```
//!
//! ## Building a response
//!
//! ```
//! use wirehttp::HttpResponse;
//!
//! let bytes = HttpResponse::new().with_body("abc").to_bytes();
//!
//! assert_eq!(
//!     bytes,
//!     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc"
//! );
//! ```
//!
//! See the `demos` directory for complete examples, including a static-file
//! server.

// Export the wire codec module
pub mod codec;

// Export the router module
pub mod router;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use codec::{parse_request, Error as CodecError, HttpRequest, HttpResponse};
pub use router::{RouteError, RouteMatch, Router};
pub use server::{Error as ServerError, HandlerFn, HttpServer, PathParams, ServerConfig};
