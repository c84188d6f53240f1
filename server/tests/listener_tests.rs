use std::{
    io::Write,
    net::TcpStream,
    thread,
    time::Duration,
};

use server::{ErrorKind, ReadLimits, Server};

fn send(addr: std::net::SocketAddr, bytes: &[u8]) {
    let mut client = TcpStream::connect(addr).unwrap();
    client.write_all(bytes).unwrap();
}

#[test]
fn test_server_reads_one_request_per_connection() {
    shared::init_test_logging();

    let server = Server::bind("127.0.0.1:0", ReadLimits::default()).unwrap();
    let addr = server.local_addr().unwrap();

    let client = thread::spawn(move || {
        send(addr, b"GET /first HTTP/1.0\r\nHost: x\r\n\r\n");
        send(addr, b"POST /second HTTP/1.0\r\nContent-Length: 5\r\n\r\nhello");
        send(addr, b"POST /third HTTP/1.0\r\nContent-Length: 5\r\n\r\nhel");
    });

    let mut results = Vec::new();
    server
        .serve_n(3, |_, result| results.push(result))
        .unwrap();
    client.join().unwrap();

    assert_eq!(results.len(), 3);

    let first = results[0].as_ref().unwrap();
    assert_eq!(first.method(), "GET");
    assert_eq!(first.target(), "/first");
    assert_eq!(first.header("Host"), Some("x"));

    let second = results[1].as_ref().unwrap();
    assert_eq!(second.target(), "/second");
    assert_eq!(second.body(), b"hello");

    let third = results[2].as_ref().unwrap_err();
    assert_eq!(third.kind(), ErrorKind::ConnectionClosedEarly);
}

#[test]
fn test_server_applies_read_timeout() {
    let limits = ReadLimits::default().with_read_timeout(Some(Duration::from_millis(50)));
    let server = Server::bind("127.0.0.1:0", limits).unwrap();
    let addr = server.local_addr().unwrap();

    let client = thread::spawn(move || {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(b"GET /slow HTTP/1.0\r\n").unwrap();
        // hold the connection open past the deadline
        thread::sleep(Duration::from_millis(500));
    });

    let mut results = Vec::new();
    server
        .serve_n(1, |_, result| results.push(result))
        .unwrap();
    client.join().unwrap();

    let err = results[0].as_ref().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TimedOut);
}

#[test]
fn test_server_uses_configured_buffer_size() {
    let limits = ReadLimits::default().with_buffer_capacity(7);
    let server = Server::bind("127.0.0.1:0", limits).unwrap();
    let addr = server.local_addr().unwrap();

    let client = thread::spawn(move || TcpStream::connect(addr).unwrap());

    let (conn, _) = server.accept().unwrap();
    assert_eq!(conn.capacity(), 7);
    drop(client.join().unwrap());
}
