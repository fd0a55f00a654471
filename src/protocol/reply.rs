//! Reply definitions
//!
//! Represents decoded server replies.

use std::fmt;

/// Reply type tags (first byte of every reply)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReplyTag {
    Status = b'+',
    Error = b'-',
    Integer = b':',
    Bulk = b'$',
    Array = b'*',
}

impl ReplyTag {
    /// Map a leading byte to its tag, `None` for anything unknown
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'+' => Some(ReplyTag::Status),
            b'-' => Some(ReplyTag::Error),
            b':' => Some(ReplyTag::Integer),
            b'$' => Some(ReplyTag::Bulk),
            b'*' => Some(ReplyTag::Array),
            _ => None,
        }
    }
}

/// A decoded reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Acknowledgement line, e.g. "OK"
    Status(String),

    /// Error line reported by the server. Data, not a failure, at this level.
    Error(String),

    /// Signed integer
    Integer(i64),

    /// Bulk string, `None` when the server sent length -1
    Bulk(Option<String>),

    /// Multi-bulk of bulk strings, `None` when the server sent count -1
    Array(Option<Vec<String>>),
}

impl Reply {
    /// Create a STATUS reply
    pub fn status(text: impl Into<String>) -> Self {
        Reply::Status(text.into())
    }

    /// Create an ERROR reply
    pub fn error(text: impl Into<String>) -> Self {
        Reply::Error(text.into())
    }

    /// Create a present BULK reply
    pub fn bulk(text: impl Into<String>) -> Self {
        Reply::Bulk(Some(text.into()))
    }

    /// The tag this reply is framed with
    pub fn tag(&self) -> ReplyTag {
        match self {
            Reply::Status(_) => ReplyTag::Status,
            Reply::Error(_) => ReplyTag::Error,
            Reply::Integer(_) => ReplyTag::Integer,
            Reply::Bulk(_) => ReplyTag::Bulk,
            Reply::Array(_) => ReplyTag::Array,
        }
    }

    /// Short name of the reply shape, for logs and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Status(_) => "status",
            Reply::Error(_) => "error",
            Reply::Integer(_) => "integer",
            Reply::Bulk(_) => "bulk",
            Reply::Array(_) => "array",
        }
    }

    /// True for a nil bulk string or a nil array
    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Bulk(None) | Reply::Array(None))
    }
}

/// Renders replies the way redis-cli prints them
impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Status(text) => write!(f, "{}", text),
            Reply::Error(text) => write!(f, "(error) {}", text),
            Reply::Integer(n) => write!(f, "(integer) {}", n),
            Reply::Bulk(None) | Reply::Array(None) => write!(f, "(nil)"),
            Reply::Bulk(Some(text)) => write!(f, "{:?}", text),
            Reply::Array(Some(items)) if items.is_empty() => write!(f, "(empty array)"),
            Reply::Array(Some(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {:?}", i + 1, item)?;
                }
                Ok(())
            }
        }
    }
}
