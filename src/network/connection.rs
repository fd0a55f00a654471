//! Connection Handler
//!
//! Owns the socket and runs one request/reply exchange at a time.

use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::config::Config;
use crate::error::{RedpieError, Result};
use crate::protocol::{read_reply, write_frame, Frame, Reply};

/// A single connection to the server
pub struct Connection {
    /// TCP stream reader (buffered so line reads avoid a syscall per byte)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered so each frame goes out in one write)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Connect to the server named by the config
    pub fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        let addr = config.addr();
        tracing::debug!("Connecting to {}", addr);

        let stream = TcpStream::connect(&addr).map_err(|e| {
            tracing::warn!("Failed to connect to {}: {}", addr, e);
            RedpieError::Transport(e)
        })?;
        stream.set_nodelay(config.nodelay)?;

        let mut connection = Self::from_stream(stream)?;
        connection.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)?;

        tracing::debug!("Connected to {}", connection.peer_addr);
        Ok(connection)
    }

    /// Wrap an already connected stream
    ///
    /// Sets up buffered I/O over two handles to the same socket.
    pub fn from_stream(stream: TcpStream) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Configure connection timeouts, 0 leaves the socket blocking
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_stream = self.reader.get_ref();
        let write_stream = self.writer.get_ref();

        if read_ms > 0 {
            read_stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            write_stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Send a frame and wait for its reply
    ///
    /// On a transport or protocol error the stream position is unknown and
    /// the connection should be dropped.
    pub fn request(&mut self, frame: &Frame) -> Result<Reply> {
        tracing::trace!(
            "Sending {} with {} argument(s) to {}",
            frame.command(),
            frame.arguments().len(),
            self.peer_addr
        );

        self.send(frame)?;
        let reply = self.receive()?;

        tracing::trace!("Received {} reply from {}", reply.kind(), self.peer_addr);
        Ok(reply)
    }

    /// Write one frame to the socket
    pub fn send(&mut self, frame: &Frame) -> Result<()> {
        write_frame(&mut self.writer, frame).inspect_err(|e| self.log_failure("writing", e))
    }

    /// Read one reply from the socket
    pub fn receive(&mut self) -> Result<Reply> {
        read_reply(&mut self.reader).inspect_err(|e| self.log_failure("reading", e))
    }

    /// Close both directions of the socket
    pub fn shutdown(self) -> Result<()> {
        match self.writer.get_ref().shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // Server already hung up (e.g. after QUIT)
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    fn log_failure(&self, action: &str, error: &RedpieError) {
        match error {
            RedpieError::Transport(io_err) => match io_err.kind() {
                ErrorKind::UnexpectedEof
                | ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::BrokenPipe => {
                    tracing::debug!("Server {} closed the connection: {}", self.peer_addr, io_err);
                }
                ErrorKind::WouldBlock | ErrorKind::TimedOut => {
                    tracing::debug!("Timed out {} {}", action, self.peer_addr);
                }
                _ => tracing::warn!("Error {} {}: {}", action, self.peer_addr, error),
            },
            _ => tracing::warn!("Error {} {}: {}", action, self.peer_addr, error),
        }
    }
}
