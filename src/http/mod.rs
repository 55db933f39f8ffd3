//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 subset the server speaks: GET and
//! HEAD over keep-alive connections, with no request bodies.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection handler driving the
//!   request-response loop
//! - **`parser`**: parses incoming requests from byte buffers
//! - **`request`**: immutable HTTP request representation
//! - **`response`**: response writer state machine and body framing
//! - **`mime`**: content type and content encoding detection from file names
//!
//! # Connection lifecycle
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← Resolve path, stream response
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close / idle timeout → Closed
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
