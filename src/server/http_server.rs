//! HTTP server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::signal;
use log::{info, warn, error};

use crate::codec::{parse_request, HttpRequest, HttpResponse};
use crate::router::{RouteError, Router};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::{HandlerFn, HandlerFuture, PathParams};

/// An HTTP server.
///
/// Routes are registered through [`HttpServer::route`] before [`start`]
/// consumes the server; from then on the table is read-only and shared by
/// reference across all connection tasks.
///
/// [`start`]: HttpServer::start
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The route table.
    pub router: Router<HandlerFn>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            router: Router::new(),
        }
    }

    /// Register a handler for a method and path pattern.
    ///
    /// The pattern is compiled immediately; see [`Router::register`] for the
    /// pattern grammar. Handlers receive the decoded request and the
    /// captured path parameters and always resolve to a response.
    pub fn route<F, Fut>(&mut self, method: impl Into<String>, pattern: &str, handler: F)
    where
        F: Fn(HttpRequest, PathParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HttpResponse> + Send + 'static,
    {
        let handler: HandlerFn =
            Arc::new(move |req: HttpRequest, params: PathParams| -> HandlerFuture {
                Box::pin(handler(req, params))
            });
        self.router.register(method, pattern, handler);
    }

    /// Display the server banner and registered endpoints.
    fn display_server_info(&self) {
        let banner = include_str!("../banner.txt");
        info!("\n{banner}");

        info!("Registered endpoints:");
        for (method, pattern) in self.router.routes() {
            info!("  {method} {pattern}");
        }
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: Arc<mpsc::Sender<()>>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Hand a freshly accepted connection to its own task.
    async fn handle_new_connection(
        mut socket: TcpStream,
        addr: SocketAddr,
        semaphore: Arc<Semaphore>,
        router: Arc<Router<HandlerFn>>,
        config: Arc<ServerConfig>,
        tasks: &mut JoinSet<()>,
    ) {
        // Try to acquire a permit from the semaphore
        let permit = match semaphore.try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let response = HttpResponse::new()
                    .with_status(503, "Service Unavailable")
                    .with_body("Server is at capacity, please try again later");
                let _ = socket.write_all(&response.to_bytes()).await;
                return;
            }
        };

        tasks.spawn(async move {
            // The permit is dropped when the task completes, releasing the
            // semaphore slot.
            let _permit = permit;

            // A connection failure terminates this task and nothing else.
            if let Err(e) = Self::handle_connection(&mut socket, router, config).await {
                error!("Error handling connection from {addr}: {e}");
            }
        });
    }

    /// Handle accept-loop errors.
    async fn handle_connection_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        // If there's a critical error, signal to break the loop
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        // For other errors, wait a bit before retrying
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let _ = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        info!("Server shutdown complete");
    }

    /// Start the server and listen for incoming connections.
    ///
    /// The accept loop's only blocking point is the next connection (or the
    /// shutdown signal); each connection runs on its own task and never
    /// holds up the accept loop.
    pub async fn start(self) -> Result<(), Error> {
        // Display server information
        self.display_server_info();

        // Set up the TCP listener
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);

        // The route table is read-only from here on and shared by reference.
        let router = Arc::new(self.router);
        let config = Arc::new(self.config);

        // Create a semaphore to limit concurrent connections
        let semaphore = Arc::new(Semaphore::new(config.max_connections));

        // Create a channel for shutdown signaling
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let shutdown_tx = Arc::new(shutdown_tx);

        // Use JoinSet to keep track of all spawned tasks
        let mut tasks = JoinSet::new();

        // Set up a Ctrl+C handler for graceful shutdown
        Self::setup_ctrl_c_handler(shutdown_tx.clone(), &mut tasks);

        loop {
            tokio::select! {
                // Check for shutdown signal
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                // Accept new connections
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(
                                socket,
                                addr,
                                semaphore.clone(),
                                router.clone(),
                                config.clone(),
                                &mut tasks,
                            ).await;
                        },
                        Err(e) => {
                            if Self::handle_connection_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        // Perform graceful shutdown
        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Drive a single connection until the peer closes or a fatal error
    /// occurs.
    ///
    /// Each read is assumed to carry one complete request. Decoding errors
    /// are fatal and answered with silence: the connection is closed without
    /// a diagnostic response. Routing misses are recoverable: the canned 405
    /// or 404 is written and the connection keeps serving requests.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        router: Arc<Router<HandlerFn>>,
        config: Arc<ServerConfig>,
    ) -> Result<(), Error> {
        let mut buf = vec![0; config.read_buffer_size];

        loop {
            // Read data from the socket
            let n = socket.read(&mut buf).await?;
            if n == 0 {
                return Ok(()); // Peer closed cleanly
            }

            let mut request = parse_request(&buf[..n])?;
            request.directory = config.directory.clone();

            let response = match router.route(&request.method, &request.path) {
                Ok(found) => {
                    let handler = Arc::clone(found.handler);
                    let params = found.params;
                    handler(request, params).await
                }
                Err(RouteError::MethodNotAllowed) => HttpResponse::method_not_allowed(),
                Err(RouteError::RouteNotFound) => HttpResponse::not_found(),
            };

            // Send the response
            socket.write_all(&response.to_bytes()).await?;
        }
    }
}
