//! Error types for redpie
//!
//! Provides a unified error type for all client operations.

use thiserror::Error;

/// Result type alias using RedpieError
pub type Result<T> = std::result::Result<T, RedpieError>;

/// Unified error type for redpie operations
#[derive(Debug, Error)]
pub enum RedpieError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Connection refused, reset, or closed mid-read.
    /// The connection is in an undefined state afterwards.
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// The byte stream no longer frames as RESP
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    /// The server answered with an error reply
    #[error("Server error: {0}")]
    Server(String),

    #[error("Unexpected reply to {command}: {reply}")]
    UnexpectedReply { command: String, reply: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RedpieError {
    /// True for errors raised by the underlying socket
    pub fn is_transport(&self) -> bool {
        matches!(self, RedpieError::Transport(_))
    }

    /// True for framing violations
    pub fn is_protocol(&self) -> bool {
        matches!(self, RedpieError::Protocol(_))
    }
}
