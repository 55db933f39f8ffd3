use std::collections::HashMap;

/// HTTP request methods.
///
/// The server serves GET and HEAD. Every other method is parsed and carried
/// verbatim so the 501 response can name it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    Get,
    /// HEAD - Like GET but without the response body
    Head,
    /// Any other method token, kept as received
    Other(String),
}

impl Method {
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Other(s) => s,
        }
    }
}

/// A parsed HTTP request.
///
/// Immutable once constructed by the parser. Header names are normalized to
/// lowercase at insert time; `header()` normalizes again at lookup time, so
/// lookups are case-insensitive without any map trickery.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, HEAD, or anything else verbatim)
    pub method: Method,
    /// The request path as received, before validation
    pub path: String,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    /// Request headers, keys lowercased
    pub headers: HashMap<String, String>,
}

impl Request {
    /// Retrieves a header value by name, case-insensitively.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Determines whether the connection should remain open after the
    /// response.
    ///
    /// True unless the client sent an explicit `Connection: close`, or spoke
    /// HTTP/1.0 without asking for keep-alive.
    pub fn keep_alive(&self) -> bool {
        match self.header("Connection") {
            Some(v) if v.eq_ignore_ascii_case("close") => false,
            Some(v) if v.eq_ignore_ascii_case("keep-alive") => true,
            _ => self.version != "HTTP/1.0",
        }
    }

    /// Absolute reference for this request, built from the `Host` header.
    ///
    /// Used in log lines and error bodies only; resolution never consults
    /// the host. Falls back to the bare path when the URL cannot be formed.
    pub fn absolute_url(&self) -> String {
        let host = self.header("Host").unwrap_or("localhost");
        match url::Url::parse(&format!("http://{}{}", host, self.path)) {
            Ok(u) => u.to_string(),
            Err(_) => self.path.clone(),
        }
    }
}
