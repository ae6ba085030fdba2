//! A simple example demonstrating how to use the wirehttp codec to parse HTTP requests.

use wirehttp::parse_request;

fn main() {
    // Example HTTP request
    let request_bytes =
        b"GET /index.html HTTP/1.1\r\nHost: example.com\r\nAccept: text/html, application/json\r\n\r\n";

    // Parse the request
    match parse_request(request_bytes) {
        Ok(request) => {
            println!("Successfully parsed HTTP request:");
            println!("Method: {}", request.method);
            println!("Path: {}", request.path);
            println!("Version: {}", request.version);
            println!("Headers:");
            for (name, values) in &request.headers {
                println!("  {}: {}", name, values.join(", "));
            }
        }
        Err(err) => {
            println!("Error parsing request: {}", err);
        }
    }

    // Example with a request missing its header/body separator
    let invalid_request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n";

    match parse_request(invalid_request) {
        Ok(_) => {
            println!("\nUnexpectedly parsed invalid request!");
        }
        Err(err) => {
            println!("\nExpected error parsing invalid request: {}", err);
        }
    }
}
