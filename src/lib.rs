//! # redpie
//!
//! A minimal synchronous client for the RESP2 wire protocol:
//! - Frame encoder turning a command and its arguments into one request buffer
//! - Streaming reply decoder for status, error, integer, bulk and multi-bulk replies
//! - Thin command layer (GET/SET/HSET/HGET/HKEYS/HGETALL/...) over one TCP socket
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Client                                  │
//! │          (command methods, reply conversion)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Connection                                │
//! │        (one TCP socket, one request in flight)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Encoder   │          │   Decoder   │
//!   │   (Frame)   │          │   (Reply)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RedpieError, Result};
pub use config::Config;
pub use client::Client;
pub use protocol::{Frame, Reply};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of redpie
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
