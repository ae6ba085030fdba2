//! The contract between the dispatcher and its handlers.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::codec::{HttpRequest, HttpResponse};

/// Captured path parameters, one per placeholder, in pattern order.
pub type PathParams = Vec<String>;

/// Type alias for a boxed future resolving to the handler's response.
pub type HandlerFuture = Pin<Box<dyn Future<Output = HttpResponse> + Send>>;

/// Type alias for a routed request handler.
///
/// A handler always resolves to a response; there is no failure channel
/// through this boundary. Anything that can go wrong inside a handler must
/// be absorbed and expressed as a response, e.g. a 404 for a missing file.
pub type HandlerFn = Arc<dyn Fn(HttpRequest, PathParams) -> HandlerFuture + Send + Sync>;
