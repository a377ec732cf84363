use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

pub mod api;
pub mod routes;
pub mod static_files;

/// One request per connection; anything past this many bytes is ignored.
const MAX_REQUEST_BYTES: usize = 16_384;

pub fn run_server(bind_addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    println!("highnoon server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        let mut stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                eprintln!("connection failed: {err}");
                continue;
            }
        };
        if let Err(err) = handle_connection(&mut stream) {
            eprintln!("request error: {err}");
        }
    }
    Ok(())
}

fn handle_connection(stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buffer = [0_u8; MAX_REQUEST_BYTES];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let (method, path, body) = parse_request(&request);
    let response = routes::route_request(method, path, body).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()
}

/// Split one buffered request into method, path, and body. A request line
/// that does not parse falls back to `GET /`, which the router answers
/// with the page.
fn parse_request(request: &str) -> (&str, &str, &str) {
    let request_line = request.lines().next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("GET");
    let path = parts.next().unwrap_or("/");
    let body = request
        .split("\r\n\r\n")
        .nth(1)
        .or_else(|| request.split("\n\n").nth(1))
        .unwrap_or("");
    (method, path, body)
}
