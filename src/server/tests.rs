//! Tests for the connection dispatcher.

#[cfg(test)]
mod server_tests {
    use std::collections::VecDeque;
    use std::io;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::task::{Context, Poll};
    use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

    use crate::codec::HttpResponse;
    use crate::server::{Error, HttpServer, ServerConfig};

    // Mock TcpStream for testing. Each queued chunk is handed out by one
    // read, so a queue with several chunks exercises the multi-request
    // connection loop; an exhausted queue reads as peer close.
    struct MockTcpStream {
        reads: VecDeque<Vec<u8>>,
        write_data: Vec<u8>,
    }

    impl MockTcpStream {
        fn new(reads: Vec<&[u8]>) -> Self {
            Self {
                reads: reads.into_iter().map(<[u8]>::to_vec).collect(),
                write_data: Vec::new(),
            }
        }

        fn written_data(&self) -> &[u8] {
            &self.write_data
        }
    }

    impl AsyncRead for MockTcpStream {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let this = self.get_mut();
            if let Some(chunk) = this.reads.pop_front() {
                buf.put_slice(&chunk);
            }
            Poll::Ready(Ok(()))
        }
    }

    impl AsyncWrite for MockTcpStream {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            let this = self.get_mut();
            this.write_data.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn echo_server() -> HttpServer {
        let mut server = HttpServer::new(ServerConfig::default());
        server.route("GET", "/echo/{str}", |_req, params| async move {
            HttpResponse::new().with_body(params.into_iter().next().unwrap_or_default())
        });
        server.route("GET", "/", |_req, _params| async { HttpResponse::new() });
        server
    }

    async fn drive(server: HttpServer, stream: &mut MockTcpStream) -> Result<(), Error> {
        HttpServer::handle_connection(
            stream,
            Arc::new(server.router),
            Arc::new(server.config),
        )
        .await
    }

    #[tokio::test]
    async fn test_server_creation() {
        let config = ServerConfig {
            addr: "127.0.0.1:8080".parse().unwrap(),
            max_connections: 100,
            read_buffer_size: 4096,
            directory: Some("/srv/files".to_string()),
        };

        let server = HttpServer::new(config.clone());
        assert_eq!(server.config.addr, config.addr);
        assert_eq!(server.config.max_connections, config.max_connections);
        assert_eq!(server.config.read_buffer_size, config.read_buffer_size);
        assert_eq!(server.config.directory, config.directory);
        assert!(server.router.is_empty());
    }

    #[tokio::test]
    async fn test_route_registration() {
        let server = echo_server();
        assert_eq!(server.router.len(), 2);
    }

    #[tokio::test]
    async fn test_echo_scenario_byte_exact() {
        let mut stream =
            MockTcpStream::new(vec![b"GET /echo/abc HTTP/1.1\r\nHost: x\r\n\r\n"]);

        let result = drive(echo_server(), &mut stream).await;
        assert!(result.is_ok());

        assert_eq!(
            stream.written_data(),
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc"
        );
    }

    #[tokio::test]
    async fn test_unregistered_method_gets_canned_405() {
        // No DELETE routes anywhere in the table.
        let mut stream = MockTcpStream::new(vec![b"DELETE / HTTP/1.1\r\n\r\n"]);

        let result = drive(echo_server(), &mut stream).await;
        assert!(result.is_ok());

        let response = String::from_utf8_lossy(stream.written_data());
        assert!(response.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
        assert!(response.ends_with("\r\n\r\nMethod Not Allowed"));
    }

    #[tokio::test]
    async fn test_unknown_path_gets_canned_404() {
        let mut stream = MockTcpStream::new(vec![b"GET /nope HTTP/1.1\r\nHost: x\r\n\r\n"]);

        let result = drive(echo_server(), &mut stream).await;
        assert!(result.is_ok());

        let response = String::from_utf8_lossy(stream.written_data());
        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(response.ends_with("\r\n\r\nNot Found"));
    }

    #[tokio::test]
    async fn test_malformed_request_closes_without_response() {
        let mut stream = MockTcpStream::new(vec![b"not an http request"]);

        let result = drive(echo_server(), &mut stream).await;
        assert!(matches!(result.unwrap_err(), Error::ParseError(_)));

        // Malformed input gets no diagnostic, the connection just closes.
        assert!(stream.written_data().is_empty());
    }

    #[tokio::test]
    async fn test_multiple_requests_on_one_connection() {
        let mut stream = MockTcpStream::new(vec![
            b"GET /echo/one HTTP/1.1\r\nHost: x\r\n\r\n",
            b"GET /echo/two HTTP/1.1\r\nHost: x\r\n\r\n",
        ]);

        let result = drive(echo_server(), &mut stream).await;
        assert!(result.is_ok());

        let response = String::from_utf8_lossy(stream.written_data());
        assert_eq!(response.matches("HTTP/1.1 200 OK\r\n").count(), 2);
        assert!(response.contains("\r\n\r\none"));
        assert!(response.ends_with("\r\n\r\ntwo"));
    }

    #[tokio::test]
    async fn test_connection_stays_open_after_routing_miss() {
        let mut stream = MockTcpStream::new(vec![
            b"GET /nope HTTP/1.1\r\nHost: x\r\n\r\n",
            b"GET / HTTP/1.1\r\nHost: x\r\n\r\n",
        ]);

        let result = drive(echo_server(), &mut stream).await;
        assert!(result.is_ok());

        let response = String::from_utf8_lossy(stream.written_data());
        assert!(response.contains("HTTP/1.1 404 Not Found\r\n"));
        assert!(response.contains("HTTP/1.1 200 OK\r\n"));
    }

    #[tokio::test]
    async fn test_handler_reads_request_headers() {
        let mut server = HttpServer::new(ServerConfig::default());
        server.route("GET", "/user-agent", |req, _params| async move {
            HttpResponse::new().with_body(req.header("User-Agent"))
        });

        let mut stream = MockTcpStream::new(vec![
            b"GET /user-agent HTTP/1.1\r\nHost: x\r\nUser-Agent: foo/1.0\r\n\r\n",
        ]);

        let result = drive(server, &mut stream).await;
        assert!(result.is_ok());

        let response = String::from_utf8_lossy(stream.written_data());
        assert!(response.ends_with("\r\n\r\nfoo/1.0"));
        assert!(response.contains("Content-Length: 7\r\n"));
    }

    #[tokio::test]
    async fn test_directory_is_threaded_through_requests() {
        let config = ServerConfig {
            directory: Some("/srv/files".to_string()),
            ..ServerConfig::default()
        };
        let mut server = HttpServer::new(config);
        server.route("GET", "/where", |req, _params| async move {
            HttpResponse::new().with_body(req.directory.unwrap_or_default())
        });

        let mut stream = MockTcpStream::new(vec![b"GET /where HTTP/1.1\r\nHost: x\r\n\r\n"]);

        let result = drive(server, &mut stream).await;
        assert!(result.is_ok());

        let response = String::from_utf8_lossy(stream.written_data());
        assert!(response.ends_with("\r\n\r\n/srv/files"));
    }

    #[tokio::test]
    async fn test_handler_receives_all_captured_params() {
        let mut server = HttpServer::new(ServerConfig::default());
        server.route("GET", "/files/{dir}/{name}", |_req, params| async move {
            HttpResponse::new().with_body(params.join("+"))
        });

        let mut stream =
            MockTcpStream::new(vec![b"GET /files/docs/readme HTTP/1.1\r\nHost: x\r\n\r\n"]);

        let result = drive(server, &mut stream).await;
        assert!(result.is_ok());

        let response = String::from_utf8_lossy(stream.written_data());
        assert!(response.ends_with("\r\n\r\ndocs+readme"));
    }
}
