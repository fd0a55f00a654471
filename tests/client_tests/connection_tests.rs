//! Tests for Connection and Config
//!
//! These tests verify:
//! - Config defaults, builder and validation
//! - Transport failures surface as transport errors
//! - A raw connection runs one exchange per request

#[path = "../common/mod.rs"]
mod common;

use std::net::{TcpListener, TcpStream};

use common::{spawn_server, spawn_truncating_server, Exchange};
use redpie::network::Connection;
use redpie::{Client, Config, Frame, RedpieError, Reply};

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 6379);
    assert_eq!(config.read_timeout_ms, 0);
    assert_eq!(config.write_timeout_ms, 0);
    assert!(config.nodelay);
    assert_eq!(config.addr(), "localhost:6379");
}

#[test]
fn test_config_builder() {
    let config = Config::builder()
        .host("10.0.0.5")
        .port(7000)
        .read_timeout_ms(250)
        .write_timeout_ms(500)
        .nodelay(false)
        .build();

    assert_eq!(config.addr(), "10.0.0.5:7000");
    assert_eq!(config.read_timeout_ms, 250);
    assert_eq!(config.write_timeout_ms, 500);
    assert!(!config.nodelay);
}

#[test]
fn test_config_validation() {
    assert!(Config::default().validate().is_ok());

    let empty_host = Config::builder().host("").build();
    assert!(matches!(empty_host.validate(), Err(RedpieError::Config(_))));

    let zero_port = Config::builder().port(0).build();
    assert!(matches!(zero_port.validate(), Err(RedpieError::Config(_))));
}

#[test]
fn test_connect_rejects_invalid_config() {
    let config = Config::builder().host("").build();
    assert!(matches!(
        Connection::connect(&config),
        Err(RedpieError::Config(_))
    ));
}

// =============================================================================
// Transport Error Tests
// =============================================================================

#[test]
fn test_connection_refused() {
    // Grab a free port, then release it so nothing is listening
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = Client::open("127.0.0.1", port);
    assert!(result.is_err());
    assert!(result.err().unwrap().is_transport());
}

#[test]
fn test_server_closes_mid_reply() {
    let request = b"*2\r\n$3\r\nGET\r\n$1\r\nk\r\n";
    let (port, server) = spawn_truncating_server(request.len(), b"$10\r\nhal");

    let mut client = Client::open("127.0.0.1", port).unwrap();
    let err = client.get("k").unwrap_err();
    assert!(err.is_transport());

    server.join().unwrap();
}

#[test]
fn test_server_closes_without_reply() {
    let request = b"*1\r\n$4\r\nSAVE\r\n";
    let (port, server) = spawn_truncating_server(request.len(), b"");

    let mut client = Client::open("127.0.0.1", port).unwrap();
    assert!(client.save().unwrap_err().is_transport());

    server.join().unwrap();
}

#[test]
fn test_read_timeout() {
    // Server accepts but never answers
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let config = Config::builder()
        .host("127.0.0.1")
        .port(port)
        .read_timeout_ms(50)
        .build();
    let mut client = Client::connect(&config).unwrap();
    let _accepted = listener.accept().unwrap();

    assert!(client.get("k").unwrap_err().is_transport());
}

// =============================================================================
// Raw Connection Tests
// =============================================================================

#[test]
fn test_connection_from_stream() {
    let (port, server) = spawn_server(vec![
        Exchange::new(b"*1\r\n$4\r\nPING\r\n", b"+PONG\r\n"),
        Exchange::new(b"*2\r\n$3\r\nGET\r\n$1\r\na\r\n", b"$1\r\n1\r\n"),
    ]);

    let stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
    let mut connection = Connection::from_stream(stream).unwrap();
    assert!(connection.peer_addr().starts_with("127.0.0.1:"));

    let ping = Frame::new("PING").unwrap();
    assert_eq!(connection.request(&ping).unwrap(), Reply::status("PONG"));

    let get = Frame::new("GET").unwrap().arg("a");
    connection.send(&get).unwrap();
    assert_eq!(connection.receive().unwrap(), Reply::bulk("1"));

    connection.shutdown().unwrap();
    assert_eq!(server.join().unwrap().len(), 2);
}
