//! Frame Encoding Tests
//!
//! Tests for turning commands and arguments into request bytes.

use redpie::protocol::{encode, encode_frame, write_frame, Frame};

// =============================================================================
// Wire Format Verification Tests
// =============================================================================

#[test]
fn test_encode_set() {
    let encoded = encode("SET", ["name", "alice"]).unwrap();
    assert_eq!(
        &encoded[..],
        b"*3\r\n$3\r\nSET\r\n$4\r\nname\r\n$5\r\nalice\r\n"
    );
}

#[test]
fn test_encode_no_arguments() {
    let encoded = encode("SAVE", Vec::<String>::new()).unwrap();
    assert_eq!(&encoded[..], b"*1\r\n$4\r\nSAVE\r\n");
}

#[test]
fn test_encode_numeric_arguments() {
    let encoded = encode("SELECT", [3]).unwrap();
    assert_eq!(&encoded[..], b"*2\r\n$6\r\nSELECT\r\n$1\r\n3\r\n");

    let encoded = encode("SET", [-42i64, 1234567890]).unwrap();
    assert_eq!(
        &encoded[..],
        b"*3\r\n$3\r\nSET\r\n$3\r\n-42\r\n$10\r\n1234567890\r\n"
    );
}

#[test]
fn test_encode_mixed_arguments_with_builder() {
    let frame = Frame::new("HSET").unwrap().arg("user:1").arg("age").arg(37);
    assert_eq!(
        &encode_frame(&frame)[..],
        b"*4\r\n$4\r\nHSET\r\n$6\r\nuser:1\r\n$3\r\nage\r\n$2\r\n37\r\n"
    );
}

// =============================================================================
// Byte Length Tests
// =============================================================================

#[test]
fn test_multibyte_argument_uses_byte_length() {
    let encoded = encode("GET", ["é"]).unwrap();
    assert_eq!(&encoded[..], "*2\r\n$3\r\nGET\r\n$2\r\né\r\n".as_bytes());
}

#[test]
fn test_multibyte_command_and_argument() {
    // "日本" is 2 chars, 6 bytes; "🦀" is 1 char, 4 bytes
    let encoded = encode("日本", ["🦀"]).unwrap();
    assert_eq!(
        &encoded[..],
        "*2\r\n$6\r\n日本\r\n$4\r\n🦀\r\n".as_bytes()
    );
}

#[test]
fn test_empty_argument() {
    let encoded = encode("SET", ["key", ""]).unwrap();
    assert_eq!(&encoded[..], b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$0\r\n\r\n");
}

#[test]
fn test_argument_containing_crlf_is_length_delimited() {
    let encoded = encode("SET", ["k", "a\r\nb"]).unwrap();
    assert_eq!(&encoded[..], b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$4\r\na\r\nb\r\n");
}

// =============================================================================
// Frame Construction Tests
// =============================================================================

#[test]
fn test_empty_command_rejected() {
    let result = Frame::new("");
    assert!(result.is_err());
    assert!(result.unwrap_err().is_protocol());

    assert!(encode("", ["x"]).is_err());
}

#[test]
fn test_frame_accessors() {
    let frame = Frame::new("HGET").unwrap().args(["h", "f"]);

    assert_eq!(frame.command(), "HGET");
    assert_eq!(frame.arguments(), &["h".to_string(), "f".to_string()]);
    assert_eq!(frame.len(), 3);
    assert!(!frame.is_empty());
}

#[test]
fn test_frame_encoding_is_repeatable() {
    let frame = Frame::new("GET").unwrap().arg("k");
    assert_eq!(encode_frame(&frame), encode_frame(&frame));
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_write_frame_to_buffer() {
    let frame = Frame::new("GET").unwrap().arg("name");

    let mut buffer = Vec::new();
    write_frame(&mut buffer, &frame).unwrap();

    assert_eq!(buffer, b"*2\r\n$3\r\nGET\r\n$4\r\nname\r\n");
}

#[test]
fn test_write_multiple_frames() {
    let frames = vec![
        Frame::new("SET").unwrap().arg("a").arg(1),
        Frame::new("GET").unwrap().arg("a"),
    ];

    let mut buffer = Vec::new();
    for frame in &frames {
        write_frame(&mut buffer, frame).unwrap();
    }

    let expected: Vec<u8> = frames.iter().flat_map(|f| encode_frame(f).to_vec()).collect();
    assert_eq!(buffer, expected);
}
