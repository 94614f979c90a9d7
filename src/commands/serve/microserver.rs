//! Blocking HTTP/1.1 framing for the recommendation service
//!
//! One request per connection, no keep-alive. Chunked bodies are refused
//! and body-carrying methods must send Content-Length. Headers are capped at
//! 32 KiB and bodies at 1 MiB.

use std::io::{Read, Write};

const MAX_HEADER_SIZE: usize = 32 * 1024;

/// Largest accepted request body
pub const MAX_BODY_SIZE: usize = 1_048_576;

#[derive(Debug)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Why a request could not be read
#[derive(Debug, PartialEq, Eq)]
pub enum RequestError {
    /// Malformed request, answer 400
    BadRequest(String),
    /// Body over the cap, answer 413
    TooLarge,
}

impl RequestError {
    fn bad(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Read one request from `stream`
///
/// `None` means the peer closed before sending anything. `Some(Err)` carries
/// the status the caller should answer with.
pub fn read_request(stream: &mut impl Read) -> Option<Result<HttpRequest, RequestError>> {
    let head = match read_head(stream) {
        Ok(Some(head)) => head,
        Ok(None) => return None,
        Err(e) => return Some(Err(e)),
    };
    Some(parse_request(&head, stream))
}

/// Bytes up to and including the blank line, or `None` on a clean close
fn read_head(stream: &mut impl Read) -> Result<Option<Vec<u8>>, RequestError> {
    let mut head = Vec::with_capacity(4096);
    let mut byte = [0u8; 1];

    while !head.ends_with(b"\r\n\r\n") {
        match stream.read(&mut byte) {
            Ok(0) | Err(_) if head.is_empty() => return Ok(None),
            Ok(0) => return Err(RequestError::bad("Connection closed mid-request")),
            Ok(_) => head.push(byte[0]),
            Err(e) => return Err(RequestError::bad(format!("Read error: {}", e))),
        }
        if head.len() > MAX_HEADER_SIZE {
            return Err(RequestError::bad("Headers too large"));
        }
    }
    Ok(Some(head))
}

fn parse_request(head: &[u8], stream: &mut impl Read) -> Result<HttpRequest, RequestError> {
    let mut headers = [httparse::EMPTY_HEADER; 64];
    let mut req = httparse::Request::new(&mut headers);

    match req.parse(head) {
        Ok(httparse::Status::Complete(_)) => {}
        Ok(httparse::Status::Partial) => return Err(RequestError::bad("Incomplete HTTP request")),
        Err(e) => return Err(RequestError::bad(format!("HTTP parse error: {}", e))),
    }

    let method = req.method.unwrap_or("").to_string();
    let path = req.path.unwrap_or("/").to_string();

    let mut content_length = None;
    for h in req.headers.iter() {
        let value = String::from_utf8_lossy(h.value);
        if h.name.eq_ignore_ascii_case("Transfer-Encoding")
            && value.to_ascii_lowercase().contains("chunked")
        {
            return Err(RequestError::bad("Chunked transfer encoding not supported"));
        }
        if h.name.eq_ignore_ascii_case("Content-Length") {
            content_length = value.trim().parse::<usize>().ok();
        }
    }

    let body = if matches!(method.as_str(), "POST" | "PUT" | "PATCH") {
        let len = content_length.ok_or_else(|| RequestError::bad("POST requires Content-Length"))?;
        read_body(stream, len)?
    } else {
        Vec::new()
    };

    Ok(HttpRequest { method, path, body })
}

fn read_body(stream: &mut impl Read, len: usize) -> Result<Vec<u8>, RequestError> {
    if len > MAX_BODY_SIZE {
        return Err(RequestError::TooLarge);
    }

    let mut body = Vec::with_capacity(len);
    stream
        .take(len as u64)
        .read_to_end(&mut body)
        .map_err(|e| RequestError::bad(format!("Read error: {}", e)))?;
    if body.len() < len {
        return Err(RequestError::bad("Body shorter than Content-Length"));
    }
    Ok(body)
}

/// Write `response` with `Connection: close`; write errors mean the client left
pub fn write_response(stream: &mut impl Write, response: &HttpResponse) {
    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        response.status,
        reason(response.status),
        response.body.len()
    );
    for (name, value) in &response.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str("\r\n");

    let _ = stream
        .write_all(head.as_bytes())
        .and_then(|()| stream.write_all(&response.body))
        .and_then(|()| stream.flush());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_get_request() {
        let raw = b"GET /health HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let mut stream = Cursor::new(raw.to_vec());
        let req = read_request(&mut stream).unwrap().unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/health");
        assert!(req.body.is_empty());
    }

    #[test]
    fn test_parse_post_with_body() {
        let body = r#"{"skills":["Python","SQL"]}"#;
        let raw = format!(
            "POST /api/recommend HTTP/1.1\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        let mut stream = Cursor::new(raw.into_bytes());
        let req = read_request(&mut stream).unwrap().unwrap();
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/api/recommend");
        assert_eq!(String::from_utf8_lossy(&req.body), body);
    }

    #[test]
    fn test_reject_chunked() {
        let raw = b"POST /api/recommend HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n";
        let mut stream = Cursor::new(raw.to_vec());
        match read_request(&mut stream).unwrap() {
            Err(RequestError::BadRequest(msg)) => assert!(msg.contains("Chunked")),
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_post_requires_content_length() {
        let raw = b"POST /api/recommend HTTP/1.1\r\nHost: localhost\r\n\r\n";
        let mut stream = Cursor::new(raw.to_vec());
        match read_request(&mut stream).unwrap() {
            Err(RequestError::BadRequest(msg)) => assert!(msg.contains("Content-Length")),
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_body_rejected() {
        let raw = format!(
            "POST /api/recommend HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
            MAX_BODY_SIZE + 1
        );
        let mut stream = Cursor::new(raw.into_bytes());
        assert_eq!(
            read_request(&mut stream).unwrap().unwrap_err(),
            RequestError::TooLarge
        );
    }

    #[test]
    fn test_write_response() {
        let resp = HttpResponse {
            status: 200,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: b"{}".to_vec(),
        };
        let mut buf = Vec::new();
        write_response(&mut buf, &resp);
        let output = String::from_utf8_lossy(&buf);
        assert!(output.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(output.contains("Content-Length: 2\r\n"));
        assert!(output.contains("Connection: close\r\n"));
        assert!(output.contains("Content-Type: application/json\r\n"));
        assert!(output.ends_with("{}"));
    }

    #[test]
    fn test_empty_stream_returns_none() {
        let mut stream = Cursor::new(Vec::<u8>::new());
        assert!(read_request(&mut stream).is_none());
    }

    #[test]
    fn test_headers_too_large() {
        let huge_header = format!(
            "GET / HTTP/1.1\r\nX-Big: {}\r\n\r\n",
            "A".repeat(MAX_HEADER_SIZE)
        );
        let mut stream = Cursor::new(huge_header.into_bytes());
        match read_request(&mut stream).unwrap() {
            Err(RequestError::BadRequest(msg)) => assert!(msg.contains("too large")),
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_body_rejected() {
        let raw = b"POST /api/recommend HTTP/1.1\r\nContent-Length: 40\r\n\r\n{\"skills\":[]}";
        let mut stream = Cursor::new(raw.to_vec());
        match read_request(&mut stream).unwrap() {
            Err(RequestError::BadRequest(msg)) => assert!(msg.contains("shorter")),
            other => panic!("expected bad request, got {:?}", other),
        }
    }
}
