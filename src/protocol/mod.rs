//! Protocol Module
//!
//! Defines the RESP2 subset spoken between client and server.
//!
//! ## Request Format
//! ```text
//! *<N>\r\n
//! $<len0>\r\n<command>\r\n
//! $<len1>\r\n<arg1>\r\n
//! ...
//! ```
//! N is 1 + the argument count. Lengths are UTF-8 byte counts.
//!
//! ### Reply Tags
//! - `+`: STATUS   - single ASCII line
//! - `-`: ERROR    - single ASCII line
//! - `:`: INTEGER  - signed decimal line
//! - `$`: BULK     - length line + payload + CRLF, length -1 = nil
//! - `*`: ARRAY    - count line + `count` bulk strings, count -1 = nil

mod frame;
mod reply;
mod codec;

pub use frame::Frame;
pub use reply::{Reply, ReplyTag};
pub use codec::{
    encode, encode_frame, decode_reply, read_reply, write_frame, CRLF, MAX_ARRAY_LEN,
    MAX_BULK_LEN,
};
