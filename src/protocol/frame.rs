//! Command frame definitions
//!
//! A command name plus its arguments, already rendered to text.

use std::fmt::Display;

use crate::error::{RedpieError, Result};

/// A request frame: the command name followed by its arguments
///
/// Built with [`Frame::new`] and [`Frame::arg`]; encoding borrows the frame,
/// so a frame never changes once it has been put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// parts[0] is the command name
    parts: Vec<String>,
}

impl Frame {
    /// Start a frame for the given command name
    pub fn new(command: impl Into<String>) -> Result<Self> {
        let command = command.into();
        if command.is_empty() {
            return Err(RedpieError::Protocol(
                "command name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            parts: vec![command],
        })
    }

    /// Append an argument, rendered through its `Display` impl
    pub fn arg(mut self, value: impl Display) -> Self {
        self.parts.push(value.to_string());
        self
    }

    /// Append every argument from an iterator
    pub fn args<I, A>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Display,
    {
        self.parts.extend(values.into_iter().map(|v| v.to_string()));
        self
    }

    /// The command name
    pub fn command(&self) -> &str {
        &self.parts[0]
    }

    /// The arguments, in order, without the command name
    pub fn arguments(&self) -> &[String] {
        &self.parts[1..]
    }

    /// Number of wire elements (command name included)
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Always false: a frame carries at least its command name
    pub fn is_empty(&self) -> bool {
        false
    }

    pub(crate) fn parts(&self) -> &[String] {
        &self.parts
    }
}
