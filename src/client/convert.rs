//! Reply conversions
//!
//! Maps a decoded [`Reply`] onto the return type a command documents.
//! Error replies become [`RedpieError::Server`]; any other shape that does not
//! fit the command becomes [`RedpieError::UnexpectedReply`].

use std::collections::HashMap;

use crate::error::{RedpieError, Result};
use crate::protocol::Reply;

/// Status reply text, e.g. "OK"
pub fn expect_status(command: &str, reply: Reply) -> Result<String> {
    match reply {
        Reply::Status(text) => Ok(text),
        other => Err(mismatch(command, other)),
    }
}

/// Integer reply
pub fn expect_integer(command: &str, reply: Reply) -> Result<i64> {
    match reply {
        Reply::Integer(n) => Ok(n),
        other => Err(mismatch(command, other)),
    }
}

/// Bulk reply; nil becomes `None`, distinct from an empty string
pub fn expect_bulk(command: &str, reply: Reply) -> Result<Option<String>> {
    match reply {
        Reply::Bulk(value) => Ok(value),
        other => Err(mismatch(command, other)),
    }
}

/// Multi-bulk reply; nil becomes an empty list
pub fn expect_list(command: &str, reply: Reply) -> Result<Vec<String>> {
    match reply {
        Reply::Array(items) => Ok(items.unwrap_or_default()),
        other => Err(mismatch(command, other)),
    }
}

/// Multi-bulk of alternating field/value elements, folded into a map
///
/// A repeated field keeps its last value. Anything but an array fails, so a
/// caller never sees a partially built map.
pub fn expect_pairs(command: &str, reply: Reply) -> Result<HashMap<String, String>> {
    let items = expect_list(command, reply)?;

    if items.len() % 2 != 0 {
        return Err(RedpieError::Protocol(format!(
            "{} returned an odd number of elements: {}",
            command,
            items.len()
        )));
    }

    let mut map = HashMap::with_capacity(items.len() / 2);
    let mut iter = items.into_iter();
    while let (Some(field), Some(value)) = (iter.next(), iter.next()) {
        map.insert(field, value);
    }
    Ok(map)
}

fn mismatch(command: &str, reply: Reply) -> RedpieError {
    match reply {
        Reply::Error(message) => {
            tracing::debug!("{} failed on the server: {}", command, message);
            RedpieError::Server(message)
        }
        other => RedpieError::UnexpectedReply {
            command: command.to_string(),
            reply: other.kind().to_string(),
        },
    }
}
