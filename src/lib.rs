//! docserve - Minimal HTTP/1.1 static resource server
//!
//! Core library: hand-rolled HTTP/1.1 over raw sockets serving a fixed,
//! read-only resource namespace.

pub mod config;
pub mod http;
pub mod server;
pub mod store;
