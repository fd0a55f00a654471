//! Protocol codec
//!
//! Encoding of request frames and decoding of replies.
//!
//! ## Wire Format
//!
//! ### Request (Frame) Format
//! ```text
//! ┌──────────┬───────────────────┬───────────────────┬─────┐
//! │ *<N>\r\n │ $<len>\r\n<cmd>\r\n │ $<len>\r\n<arg>\r\n │ ... │
//! └──────────┴───────────────────┴───────────────────┴─────┘
//! ```
//!
//! ### Reply Format
//! ```text
//! ┌─────────┬──────────────────────────────────────────┐
//! │ Tag (1) │ Line, or length line + payload + \r\n    │
//! └─────────┴──────────────────────────────────────────┘
//! ```

use std::fmt::Display;
use std::io::{self, BufRead, Cursor, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{RedpieError, Result};
use super::{Frame, Reply, ReplyTag};

/// Line terminator used everywhere on the wire
pub const CRLF: &[u8] = b"\r\n";

/// Largest bulk payload accepted from the server (512 MB)
pub const MAX_BULK_LEN: i64 = 512 * 1024 * 1024;

/// Largest multi-bulk element count accepted from the server
pub const MAX_ARRAY_LEN: i64 = u32::MAX as i64;

/// Upper bound on up-front allocation for array replies
const ARRAY_PREALLOC_LIMIT: usize = 1024;

/// Upper bound on up-front allocation for bulk payloads (64 KB)
const BULK_PREALLOC_LIMIT: usize = 64 * 1024;

// =============================================================================
// Frame Encoding
// =============================================================================

/// Encode a command and its arguments
///
/// Format: `*<N>\r\n` then `$<len>\r\n<bytes>\r\n` per element
pub fn encode<I, A>(command: &str, args: I) -> Result<Bytes>
where
    I: IntoIterator<Item = A>,
    A: Display,
{
    let frame = Frame::new(command)?.args(args);
    Ok(encode_frame(&frame))
}

/// Encode a frame into one contiguous buffer
pub fn encode_frame(frame: &Frame) -> Bytes {
    let parts = frame.parts();

    // Each element costs its payload plus a `$`, up to 20 digits and two CRLFs
    let capacity = 24 + parts.iter().map(|p| p.len() + 25).sum::<usize>();
    let mut message = BytesMut::with_capacity(capacity);

    put_header(&mut message, b'*', parts.len());
    for part in parts {
        // String::len is the UTF-8 byte length, not the char count
        put_header(&mut message, b'$', part.len());
        message.put_slice(part.as_bytes());
        message.put_slice(CRLF);
    }

    message.freeze()
}

/// Write `<prefix><n>\r\n`
fn put_header(buf: &mut BytesMut, prefix: u8, n: usize) {
    buf.put_u8(prefix);
    buf.put_slice(n.to_string().as_bytes());
    buf.put_slice(CRLF);
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Decode a reply from an in-memory buffer
pub fn decode_reply(bytes: &[u8]) -> Result<Reply> {
    let mut cursor = Cursor::new(bytes);
    read_reply(&mut cursor)
}

/// Read exactly one reply from a stream
///
/// Blocks until the reply is complete or the stream fails. Nothing past the
/// end of the current reply is consumed.
pub fn read_reply<R: BufRead>(reader: &mut R) -> Result<Reply> {
    let tag_byte = read_byte(reader)?;

    let tag = ReplyTag::from_byte(tag_byte).ok_or_else(|| {
        RedpieError::Protocol(format!("Unknown reply tag: 0x{:02x}", tag_byte))
    })?;

    match tag {
        ReplyTag::Status => Ok(Reply::Status(read_ascii_line(reader)?)),
        ReplyTag::Error => Ok(Reply::Error(read_ascii_line(reader)?)),
        ReplyTag::Integer => {
            let line = read_line(reader)?;
            Ok(Reply::Integer(parse_integer(&line, "integer reply")?))
        }
        ReplyTag::Bulk => {
            let line = read_line(reader)?;
            let length = parse_integer(&line, "bulk length")?;
            if length == -1 {
                return Ok(Reply::Bulk(None));
            }
            let length = checked_length(length, MAX_BULK_LEN, "bulk length")?;
            Ok(Reply::Bulk(Some(read_bulk_payload(reader, length)?)))
        }
        ReplyTag::Array => {
            let line = read_line(reader)?;
            let count = parse_integer(&line, "array length")?;
            if count == -1 {
                return Ok(Reply::Array(None));
            }
            let count = checked_length(count, MAX_ARRAY_LEN, "array length")?;

            let mut items = Vec::with_capacity(count.min(ARRAY_PREALLOC_LIMIT));
            for _ in 0..count {
                items.push(read_array_element(reader)?);
            }
            Ok(Reply::Array(Some(items)))
        }
    }
}

/// Read one bulk-string element of a multi-bulk reply
///
/// Only `$`-tagged elements are supported; nested arrays and nil elements are
/// rejected.
fn read_array_element<R: BufRead>(reader: &mut R) -> Result<String> {
    let line = read_line(reader)?;

    match line.split_first() {
        Some((&b'$', digits)) => {
            let length = parse_integer(digits, "array element length")?;
            let length = checked_length(length, MAX_BULK_LEN, "array element length")?;
            read_bulk_payload(reader, length)
        }
        Some((&other, _)) => Err(RedpieError::Protocol(format!(
            "Unsupported array element tag: 0x{:02x}",
            other
        ))),
        None => Err(RedpieError::Protocol(
            "Empty array element header".to_string(),
        )),
    }
}

/// Read `length` payload bytes as UTF-8, then the trailing CRLF
fn read_bulk_payload<R: BufRead>(reader: &mut R, length: usize) -> Result<String> {
    // Grow with the bytes that actually arrive, not the declared length
    let mut payload = Vec::with_capacity(length.min(BULK_PREALLOC_LIMIT));
    let received = reader.by_ref().take(length as u64).read_to_end(&mut payload)?;
    if received < length {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "connection closed after {} of {} bulk payload bytes",
                received, length
            ),
        )
        .into());
    }

    let mut terminator = [0u8; 2];
    reader.read_exact(&mut terminator)?;
    if &terminator[..] != CRLF {
        return Err(RedpieError::Protocol(format!(
            "Bulk payload of {} bytes not terminated by CRLF",
            length
        )));
    }

    String::from_utf8(payload)
        .map_err(|e| RedpieError::Protocol(format!("Bulk payload is not UTF-8: {}", e)))
}

// =============================================================================
// Line-level helpers
// =============================================================================

fn read_byte<R: BufRead>(reader: &mut R) -> Result<u8> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    Ok(byte[0])
}

/// Read up to the next `\r`, then consume the `\n` after it
///
/// Returns the line without its terminator.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut line = Vec::new();
    reader.read_until(b'\r', &mut line)?;

    if line.pop() != Some(b'\r') {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed in the middle of a line",
        )
        .into());
    }

    let lf = read_byte(reader)?;
    if lf != b'\n' {
        return Err(RedpieError::Protocol(format!(
            "Expected LF after CR, got 0x{:02x}",
            lf
        )));
    }

    Ok(line)
}

fn read_ascii_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let line = read_line(reader)?;
    if !line.is_ascii() {
        return Err(RedpieError::Protocol(
            "Single-line reply is not ASCII".to_string(),
        ));
    }
    // ASCII is always valid UTF-8
    String::from_utf8(line)
        .map_err(|e| RedpieError::Protocol(format!("Single-line reply: {}", e)))
}

/// Parse a signed decimal field
fn parse_integer(digits: &[u8], what: &str) -> Result<i64> {
    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            RedpieError::Protocol(format!(
                "Invalid {}: {:?}",
                what,
                String::from_utf8_lossy(digits)
            ))
        })
}

/// Validate a declared length against `0..=max`
fn checked_length(value: i64, max: i64, what: &str) -> Result<usize> {
    if value < 0 {
        return Err(RedpieError::Protocol(format!("Negative {}: {}", what, value)));
    }
    if value > max {
        return Err(RedpieError::Protocol(format!(
            "{} too large: {} (max {})",
            what, value, max
        )));
    }
    Ok(value as usize)
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a frame to a stream in a single write, then flush
pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> Result<()> {
    let bytes = encode_frame(frame);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
