//! Network Module
//!
//! TCP transport for a single client connection.
//!
//! ## Model
//! - One socket, exclusively owned
//! - Strict request-then-reply, one command in flight
//! - Blocking reads; no timeout unless configured

mod connection;

pub use connection::Connection;
