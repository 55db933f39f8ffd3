use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Bytes read ahead from a body source to decide between fixed-length and
/// chunked framing. Also the chunk size for chunked bodies, so memory stays
/// bounded by one probe buffer regardless of resource size.
pub const PROBE_SIZE: usize = 1024 * 1024;

const SERVER_NAME: &str = "docserve/0.1";

/// HTTP status codes emitted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 304 Not Modified
    NotModified,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotModified => 304,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::NotImplemented => 501,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotModified => "Not Modified",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

/// Where a response stands in its lifecycle. Strictly one-directional:
/// Header → Body → Done, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    /// Status line buffered, headers may still be added
    Header,
    /// Headers sent, body bytes in flight
    Body,
    /// Response complete, no further writes permitted
    Done,
}

#[derive(Debug)]
pub enum WriteError {
    /// The caller broke the Header → Body → Done contract. A programming
    /// error, never surfaced to the client.
    IllegalState {
        op: &'static str,
        state: ResponseState,
    },
    Io(std::io::Error),
}

impl From<std::io::Error> for WriteError {
    fn from(e: std::io::Error) -> Self {
        WriteError::Io(e)
    }
}

/// Streams one HTTP response onto a transport.
///
/// The status line and headers are buffered until the body framing decision
/// is made; `write_body` or `close` then flushes everything in order. The
/// writer borrows the transport and never closes it: connection lifetime
/// belongs to the connection loop so the socket can be reused under
/// keep-alive.
pub struct ResponseWriter<'a, W> {
    stream: &'a mut W,
    state: ResponseState,
    head: bool,
    buf: Vec<u8>,
}

impl<'a, W: AsyncWrite + Unpin> ResponseWriter<'a, W> {
    /// Starts a response. `head` suppresses body bytes while keeping the
    /// framing headers a GET would have produced.
    pub fn new(stream: &'a mut W, status: StatusCode, head: bool) -> Self {
        let mut buf = Vec::with_capacity(256);
        buf.extend_from_slice(
            format!(
                "HTTP/1.1 {} {}\r\n",
                status.as_u16(),
                status.reason_phrase()
            )
            .as_bytes(),
        );
        buf.extend_from_slice(format!("Server: {}\r\n", SERVER_NAME).as_bytes());

        Self {
            stream,
            state: ResponseState::Header,
            head,
            buf,
        }
    }

    pub fn state(&self) -> ResponseState {
        self.state
    }

    /// Adds a header line. Legal only before the body framing decision.
    pub fn header(&mut self, name: &str, value: &str) -> Result<(), WriteError> {
        if self.state != ResponseState::Header {
            return Err(WriteError::IllegalState {
                op: "header",
                state: self.state,
            });
        }
        self.buf.extend_from_slice(name.as_bytes());
        self.buf.extend_from_slice(b": ");
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
        Ok(())
    }

    /// Ends the header block and streams the body from `source`.
    ///
    /// Reads up to one probe buffer first. A short fill means the source is
    /// exhausted and the total length is known, so the body goes out as a
    /// single `Content-Length` block. Otherwise the length is not cheaply
    /// known and the body is chunked, one probe-sized chunk at a time, ending
    /// with the zero-length terminator.
    pub async fn write_body<R: AsyncRead + Unpin>(
        &mut self,
        mut source: R,
    ) -> Result<(), WriteError> {
        if self.state != ResponseState::Header {
            return Err(WriteError::IllegalState {
                op: "write_body",
                state: self.state,
            });
        }

        let mut probe = vec![0u8; PROBE_SIZE];
        let filled = fill_buf(&mut source, &mut probe).await?;

        if filled < PROBE_SIZE {
            self.header("Content-Length", &filled.to_string())?;
            self.buf.extend_from_slice(b"\r\n");
            self.state = ResponseState::Body;

            self.stream.write_all(&self.buf).await?;
            if !self.head {
                self.stream.write_all(&probe[..filled]).await?;
            }
        } else {
            self.header("Transfer-Encoding", "chunked")?;
            self.buf.extend_from_slice(b"\r\n");
            self.state = ResponseState::Body;

            self.stream.write_all(&self.buf).await?;
            if !self.head {
                self.write_chunk(&probe[..filled]).await?;
                loop {
                    let n = fill_buf(&mut source, &mut probe).await?;
                    if n == 0 {
                        break;
                    }
                    self.write_chunk(&probe[..n]).await?;
                }
                self.stream.write_all(b"0\r\n\r\n").await?;
            }
        }

        self.stream.flush().await?;
        self.state = ResponseState::Done;
        Ok(())
    }

    /// Completes the response. From Header this is an implicit empty body:
    /// the blank line goes out with no framing header and no bytes (the 304
    /// path). Never closes the transport, only flushes.
    pub async fn close(&mut self) -> Result<(), WriteError> {
        if self.state == ResponseState::Header {
            self.buf.extend_from_slice(b"\r\n");
            self.stream.write_all(&self.buf).await?;
            self.state = ResponseState::Done;
        }
        self.stream.flush().await?;
        Ok(())
    }

    async fn write_chunk(&mut self, data: &[u8]) -> Result<(), WriteError> {
        self.stream
            .write_all(format!("{:x}\r\n", data.len()).as_bytes())
            .await?;
        self.stream.write_all(data).await?;
        self.stream.write_all(b"\r\n").await?;
        Ok(())
    }
}

/// Reads from `source` until `buf` is full or the source is exhausted.
async fn fill_buf<R: AsyncRead + Unpin>(
    source: &mut R,
    buf: &mut [u8],
) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = source.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
