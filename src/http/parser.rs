use crate::http::request::{Method, Request};
use std::collections::HashMap;

#[derive(Debug)]
pub enum ParseError {
    InvalidRequest,
    InvalidHeader,
    Incomplete,
}

/// Parses one HTTP request from the front of `buf`.
///
/// The server reads no request bodies, so a request ends at the blank line
/// terminating its headers. A single leading CRLF is tolerated and skipped:
/// some clients leave one behind after a previous exchange on the same
/// connection. Returns the parsed request and the number of bytes consumed,
/// or `Incomplete` when more data is needed.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    // At most one stray blank line before the request line.
    let skip = if buf.starts_with(b"\r\n") { 2 } else { 0 };
    let buf = &buf[skip..];

    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    let header_bytes = &buf[..headers_end];

    let headers_str =
        std::str::from_utf8(header_bytes).map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line: exactly three space-separated tokens.
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let parts: Vec<&str> = request_line.split(' ').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(ParseError::InvalidRequest);
    }
    let (method, path, version) = (parts[0], parts[1], parts[2]);

    // Header lines: split at the first colon, trim both sides, lowercase
    // the name so lookups are case-insensitive.
    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;

        headers.insert(
            key.trim().to_ascii_lowercase(),
            value.trim().to_string(),
        );
    }

    let request = Request {
        method: Method::from_token(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
    };

    Ok((request, skip + headers_end + 4))
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
