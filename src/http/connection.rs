use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::{Buf, BytesMut};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::http::mime::ContentTypes;
use crate::http::parser::{parse_http_request, ParseError};
use crate::http::request::{Method, Request};
use crate::http::response::{ResponseWriter, StatusCode, WriteError};
use crate::store::{PathError, PathResolver, ResourceStore};

/// Shared, read-only collaborators every connection consults. Built once
/// before serving begins and never mutated, so concurrent reads need no
/// locking.
pub struct Services {
    pub store: Arc<dyn ResourceStore>,
    pub resolver: PathResolver,
    pub content_types: ContentTypes,
    pub idle_timeout: Duration,
}

enum ReadOutcome {
    Request(Request),
    /// Peer closed between requests; nothing to answer.
    Eof,
    /// Framing cannot be trusted; the connection is dropped without a
    /// response.
    Malformed(ParseError),
}

/// Drives one accepted socket through repeated request-response exchanges
/// until keep-alive ends, the idle timeout fires, or the peer hangs up.
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    buffer: BytesMut,
    services: Arc<Services>,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr, services: Arc<Services>) -> Self {
        Self {
            stream,
            peer,
            buffer: BytesMut::with_capacity(4096),
            services,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let outcome = match timeout(self.services.idle_timeout, self.read_request()).await
            {
                Ok(outcome) => outcome?,
                Err(_) => {
                    tracing::debug!(peer = %self.peer, "Idle timeout, closing connection");
                    return Ok(());
                }
            };

            let request = match outcome {
                ReadOutcome::Request(r) => r,
                ReadOutcome::Eof => return Ok(()),
                ReadOutcome::Malformed(e) => {
                    tracing::debug!(peer = %self.peer, error = ?e, "Malformed request, dropping connection");
                    return Ok(());
                }
            };

            let keep_alive = self
                .respond(&request)
                .await
                .map_err(|e| anyhow::anyhow!("response write error: {:?}", e))?;

            if !keep_alive {
                return Ok(());
            }
        }
    }

    /// Accumulates socket reads until the buffer parses as one request.
    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(ReadOutcome::Request(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => return Ok(ReadOutcome::Malformed(e)),
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                return Ok(if self.buffer.is_empty() {
                    ReadOutcome::Eof
                } else {
                    ReadOutcome::Malformed(ParseError::Incomplete)
                });
            }
        }
    }

    /// Writes the response for one request. Returns whether the connection
    /// may be reused.
    async fn respond(&mut self, request: &Request) -> Result<bool, WriteError> {
        // Only GET and HEAD are served. Anything else left its request body
        // (if any) unread, so the connection cannot be reused safely.
        if let Method::Other(name) = &request.method {
            tracing::info!(peer = %self.peer, method = %name, status = 501, "Method not implemented");

            let body = error_page(
                "501 Not Implemented",
                &format!("Method {} is not supported.", name),
            );
            let mut writer = ResponseWriter::new(&mut self.stream, StatusCode::NotImplemented, false);
            writer.header("Allow", "GET, HEAD")?;
            writer.header("Content-Type", "text/html")?;
            writer.header("Connection", "close")?;
            writer.write_body(body.as_bytes()).await?;
            return Ok(false);
        }

        let head = request.method == Method::Head;
        let keep_alive = request.keep_alive();
        let connection_value = if keep_alive { "keep-alive" } else { "close" };

        let path = match self.services.resolver.resolve(&request.path) {
            Ok(path) => path,
            Err(PathError::Traversal) => {
                let url = request.absolute_url();
                tracing::warn!(peer = %self.peer, path = %request.path, status = 400, "Path traversal rejected");

                let body = error_page("400 Bad Request", &format!("Illegal path: {}", url));
                let mut writer =
                    ResponseWriter::new(&mut self.stream, StatusCode::BadRequest, head);
                writer.header("Content-Type", "text/html")?;
                writer.header("Connection", connection_value)?;
                writer.write_body(body.as_bytes()).await?;
                return Ok(keep_alive);
            }
        };

        let resource = match self.services.store.lookup(&path) {
            Some(r) => r,
            None => {
                let url = request.absolute_url();
                tracing::info!(peer = %self.peer, path = %path, status = 404, "Resource not found");

                let body = error_page("404 Not Found", &format!("Not found: {}", url));
                let mut writer =
                    ResponseWriter::new(&mut self.stream, StatusCode::NotFound, head);
                writer.header("Content-Type", "text/html")?;
                writer.header("Connection", connection_value)?;
                writer.write_body(body.as_bytes()).await?;
                return Ok(keep_alive);
            }
        };

        let meta = &resource.metadata;

        // Conditional GET: an exact If-None-Match hit skips the body.
        if request.header("If-None-Match") == Some(meta.etag.as_str()) {
            tracing::info!(peer = %self.peer, method = %request.method.as_str(), path = %path, status = 304, "Request served");

            let mut writer = ResponseWriter::new(&mut self.stream, StatusCode::NotModified, head);
            writer.header("ETag", &meta.etag)?;
            writer.header("Connection", connection_value)?;
            writer.close().await?;
            return Ok(keep_alive);
        }

        tracing::info!(peer = %self.peer, method = %request.method.as_str(), path = %path, status = 200, "Request served");

        let (content_type, content_encoding) = self.services.content_types.resolve(&path);

        let mut writer = ResponseWriter::new(&mut self.stream, StatusCode::Ok, head);
        writer.header("ETag", &meta.etag)?;
        writer.header("Last-Modified", &httpdate::fmt_http_date(meta.modified))?;
        // Served content may change between server runs, so caches must
        // revalidate every time.
        writer.header("Cache-Control", "no-store, no-cache, must-revalidate")?;
        writer.header("Expires", "0")?;
        writer.header("Content-Type", content_type)?;
        if let Some(encoding) = content_encoding {
            writer.header("Content-Encoding", encoding)?;
        }
        writer.header("Connection", connection_value)?;
        writer.write_body(resource.reader).await?;

        Ok(keep_alive)
    }
}

fn error_page(title: &str, detail: &str) -> String {
    format!(
        "<html><head><title>{title}</title></head>\
         <body><h1>{title}</h1><p>{detail}</p></body></html>\n"
    )
}
