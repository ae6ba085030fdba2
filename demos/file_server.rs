//! A small file-serving HTTP server built on the wirehttp engine.
//!
//! Routes:
//! - `GET /` — empty 200
//! - `GET /echo/{str}` — echoes the captured path segment
//! - `GET /user-agent` — reflects the request's User-Agent header
//! - `GET /files/{filename}` — serves a file from `--directory`
//! - `GET /health` — JSON health probe
//!
//! Run with: `cargo run --example file_server -- --directory /tmp --port 4221`

use clap::Parser;
use serde::Serialize;
use wirehttp::{HttpResponse, HttpServer, ServerConfig};

#[derive(Parser, Debug)]
#[command(about = "Minimal file-serving HTTP server")]
struct Args {
    /// Host to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 4221)]
    port: u16,

    /// Base directory for the /files/{filename} route.
    #[arg(long)]
    directory: Option<String>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let config = ServerConfig {
        addr: format!("{}:{}", args.host, args.port).parse()?,
        directory: args.directory,
        ..ServerConfig::default()
    };

    let mut server = HttpServer::new(config);

    server.route("GET", "/", |_req, _params| async { HttpResponse::new() });

    server.route("GET", "/echo/{str}", |_req, params| async move {
        HttpResponse::new().with_body(params.into_iter().next().unwrap_or_default())
    });

    server.route("GET", "/user-agent", |req, _params| async move {
        HttpResponse::new().with_body(req.header("User-Agent"))
    });

    server.route("GET", "/files/{filename}", |req, params| async move {
        let Some(directory) = req.directory else {
            return HttpResponse::not_found();
        };
        let filename = params.into_iter().next().unwrap_or_default();

        match tokio::fs::read_to_string(format!("{directory}/{filename}")).await {
            Ok(contents) => HttpResponse::new()
                .with_content_type("application/octet-stream")
                .with_body(contents),
            Err(_) => HttpResponse::not_found(),
        }
    });

    server.route("GET", "/health", |_req, _params| async {
        HttpResponse::new()
            .with_json(&Health { status: "ok" })
            .unwrap_or_else(|_| HttpResponse::new().with_status(500, "Internal Server Error"))
    });

    server.start().await?;

    Ok(())
}
