//! Listening socket ownership and server lifecycle.

pub mod listener;

pub use listener::{Server, ShutdownHandle};
