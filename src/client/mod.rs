//! Client Module
//!
//! Command methods on top of a single [`Connection`].
//!
//! Every method builds a [`Frame`], runs one exchange and converts the reply:
//!
//! | Command | Reply | Returns |
//! |---------|-------|---------|
//! | SET, SELECT, SAVE, FLUSHDB, QUIT | status | `String` |
//! | GET, HGET | bulk | `Option<String>` |
//! | HSET, DBSIZE | integer | `i64` |
//! | HKEYS | array | `Vec<String>` |
//! | HGETALL | array | `HashMap<String, String>` |

mod convert;

pub use convert::{expect_bulk, expect_integer, expect_list, expect_pairs, expect_status};

use std::collections::HashMap;
use std::fmt::Display;

use crate::config::Config;
use crate::error::Result;
use crate::network::Connection;
use crate::protocol::{Frame, Reply};

/// Synchronous client
///
/// All commands take `&mut self`: one command is in flight at a time and the
/// client cannot be shared between threads without external locking.
pub struct Client {
    connection: Connection,
}

impl Client {
    /// Connect using the given config
    pub fn connect(config: &Config) -> Result<Self> {
        Ok(Self::from_connection(Connection::connect(config)?))
    }

    /// Connect to `host:port` with default socket settings
    pub fn open(host: impl Into<String>, port: u16) -> Result<Self> {
        let config = Config::builder().host(host).port(port).build();
        Self::connect(&config)
    }

    /// Use an existing connection
    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    /// Run an arbitrary command and return the raw reply
    ///
    /// Error replies are returned as [`Reply::Error`], not raised.
    pub fn execute<I, A>(&mut self, command: &str, args: I) -> Result<Reply>
    where
        I: IntoIterator<Item = A>,
        A: Display,
    {
        let frame = Frame::new(command)?.args(args);
        self.connection.request(&frame)
    }

    // =========================================================================
    // String commands
    // =========================================================================

    /// Set `key` to `value`
    pub fn set(&mut self, key: impl Display, value: impl Display) -> Result<String> {
        let frame = Frame::new("SET")?.arg(key).arg(value);
        expect_status("SET", self.connection.request(&frame)?)
    }

    /// Value of `key`, `None` when it does not exist
    pub fn get(&mut self, key: impl Display) -> Result<Option<String>> {
        let frame = Frame::new("GET")?.arg(key);
        expect_bulk("GET", self.connection.request(&frame)?)
    }

    // =========================================================================
    // Hash commands
    // =========================================================================

    /// Set `field` in the hash at `key`
    ///
    /// Returns 1 if the field is new, 0 if an existing value was updated.
    pub fn hset(
        &mut self,
        key: impl Display,
        field: impl Display,
        value: impl Display,
    ) -> Result<i64> {
        let frame = Frame::new("HSET")?.arg(key).arg(field).arg(value);
        expect_integer("HSET", self.connection.request(&frame)?)
    }

    /// Value of `field` in the hash at `key`
    pub fn hget(&mut self, key: impl Display, field: impl Display) -> Result<Option<String>> {
        let frame = Frame::new("HGET")?.arg(key).arg(field);
        expect_bulk("HGET", self.connection.request(&frame)?)
    }

    /// Field names of the hash at `key`, empty when the key does not exist
    pub fn hkeys(&mut self, key: impl Display) -> Result<Vec<String>> {
        let frame = Frame::new("HKEYS")?.arg(key);
        expect_list("HKEYS", self.connection.request(&frame)?)
    }

    /// All fields and values of the hash at `key`
    pub fn hgetall(&mut self, key: impl Display) -> Result<HashMap<String, String>> {
        let frame = Frame::new("HGETALL")?.arg(key);
        expect_pairs("HGETALL", self.connection.request(&frame)?)
    }

    // =========================================================================
    // Server commands
    // =========================================================================

    /// Switch to the database with the given zero-based index
    pub fn select(&mut self, index: u32) -> Result<String> {
        let frame = Frame::new("SELECT")?.arg(index);
        expect_status("SELECT", self.connection.request(&frame)?)
    }

    /// Synchronously save the dataset to disk
    pub fn save(&mut self) -> Result<String> {
        let frame = Frame::new("SAVE")?;
        expect_status("SAVE", self.connection.request(&frame)?)
    }

    /// Remove all keys from the current database
    pub fn flushdb(&mut self) -> Result<String> {
        let frame = Frame::new("FLUSHDB")?;
        expect_status("FLUSHDB", self.connection.request(&frame)?)
    }

    /// Number of keys in the current database
    pub fn dbsize(&mut self) -> Result<i64> {
        let frame = Frame::new("DBSIZE")?;
        expect_integer("DBSIZE", self.connection.request(&frame)?)
    }

    /// Ask the server to close the connection
    ///
    /// Consumes the client; the socket is shut down once the reply arrives.
    pub fn quit(mut self) -> Result<String> {
        let frame = Frame::new("QUIT")?;
        let status = expect_status("QUIT", self.connection.request(&frame)?)?;
        self.connection.shutdown()?;
        tracing::debug!("Connection closed by QUIT");
        Ok(status)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        self.connection.peer_addr()
    }
}
