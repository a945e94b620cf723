//! Tests for the stream and datagram transports.

use std::{
    io::{BufRead, BufReader, Read},
    net::{Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, UdpSocket},
    sync::mpsc,
    thread,
    time::Duration,
};

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::{
    client::Client,
    error::{ClientError, DeliveryError},
    transport::Transport,
};

use super::{
    SocketConfig, SocketKind, SocketTransport,
    serialise::{datagram_line, encode_line},
    transport::datagram_target,
};

#[fixture]
fn tcp_listener() -> TcpListener {
    TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener")
}

#[fixture]
fn udp_peer() -> UdpSocket {
    let socket = UdpSocket::bind(("127.0.0.1", 0)).expect("bind ephemeral udp socket");
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .expect("set read timeout");
    socket
}

fn spawn_line_server(listener: TcpListener, lines: usize) -> (SocketAddr, mpsc::Receiver<String>) {
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream);
        for _ in 0..lines {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read line");
            tx.send(line).expect("forward line");
        }
    });
    (addr, rx)
}

fn stream_config(addr: SocketAddr) -> SocketConfig {
    SocketConfig::default().with_address(addr.ip().to_string(), addr.port())
}

fn recv_line(rx: &mpsc::Receiver<String>) -> String {
    rx.recv_timeout(Duration::from_secs(2))
        .expect("line received")
}

#[rstest]
fn stream_sends_one_newline_terminated_line(tcp_listener: TcpListener) {
    let (addr, rx) = spawn_line_server(tcp_listener, 1);
    let transport = SocketTransport::connect(&stream_config(addr)).expect("connect");
    let mut client = Client::new(transport);
    client.pageview("http://x", None).expect("pageview sent");

    let line = recv_line(&rx);
    assert!(line.ends_with('\n'));
    assert_eq!(line.matches('\n').count(), 1);
    let decoded: Value = serde_json::from_str(line.trim_end()).expect("line is JSON");
    assert_eq!(decoded, json!({"_type": "_pageview", "url": "http://x"}));
}

#[rstest]
fn stream_keeps_events_in_order(tcp_listener: TcpListener) {
    let (addr, rx) = spawn_line_server(tcp_listener, 2);
    let mut client = Client::new(SocketTransport::connect(&stream_config(addr)).expect("connect"));
    client.incr("hits", 1).expect("first");
    client.decr("hits", 1).expect("second");

    let first: Value = serde_json::from_str(&recv_line(&rx)).expect("first line");
    let second: Value = serde_json::from_str(&recv_line(&rx)).expect("second line");
    assert_eq!(first["_type"], json!("_incr"));
    assert_eq!(second["_type"], json!("_decr"));
}

#[rstest]
fn stream_connect_refused_is_delivery_error(tcp_listener: TcpListener) {
    let addr = tcp_listener.local_addr().expect("listener has address");
    drop(tcp_listener);
    let err = SocketTransport::connect(&stream_config(addr)).expect_err("nobody listening");
    assert!(matches!(err, DeliveryError::Io(_)));
}

#[rstest]
fn stream_write_after_peer_close_fails(tcp_listener: TcpListener) {
    let addr = tcp_listener.local_addr().expect("listener has address");
    let (closed_tx, closed_rx) = mpsc::channel();
    thread::spawn(move || {
        let (stream, _) = tcp_listener.accept().expect("accept connection");
        drop(stream);
        closed_tx.send(()).expect("signal close");
    });
    let mut client = Client::new(SocketTransport::connect(&stream_config(addr)).expect("connect"));
    closed_rx
        .recv_timeout(Duration::from_secs(2))
        .expect("peer closed");

    // The first write after a close may still be buffered locally; a reset
    // surfaces on a later one.
    let failed = (0..50).any(|_| {
        thread::sleep(Duration::from_millis(10));
        client.pageview("http://x", None).is_err()
    });
    assert!(failed, "writes to a closed peer must eventually fail");
}

#[rstest]
fn datagram_sends_one_line_per_event(udp_peer: UdpSocket) {
    let addr = udp_peer.local_addr().expect("peer address");
    let config = stream_config(addr).with_kind(SocketKind::Datagram);
    let mut client = Client::new(SocketTransport::connect(&config).expect("open udp"));
    client.set_name("Ada", "s1").expect("datagram sent");

    let mut buf = [0u8; 1024];
    let len = udp_peer.recv(&mut buf).expect("datagram received");
    let text = std::str::from_utf8(&buf[..len]).expect("utf-8 payload");
    assert!(text.ends_with('\n'));
    let decoded: Value = serde_json::from_str(text.trim_end()).expect("datagram is JSON");
    assert_eq!(
        decoded,
        json!({"_type": "_set_name", "name": "Ada", "_session": "s1"})
    );
}

#[rstest]
fn datagram_to_absent_collector_reports_success(udp_peer: UdpSocket) {
    let addr = udp_peer.local_addr().expect("peer address");
    drop(udp_peer);
    let config = stream_config(addr).with_kind(SocketKind::Datagram);
    let mut client = Client::new(SocketTransport::connect(&config).expect("open udp"));
    for _ in 0..3 {
        client
            .pageview("http://x", None)
            .expect("datagram loss is not observable");
    }
}

#[rstest]
fn oversized_datagram_is_rejected(udp_peer: UdpSocket) {
    let addr = udp_peer.local_addr().expect("peer address");
    let mut config = stream_config(addr).with_kind(SocketKind::Datagram);
    config.max_datagram_size = 16;
    let mut client = Client::new(SocketTransport::connect(&config).expect("open udp"));
    let err = client
        .pageview("http://example.com/a/long/path", None)
        .expect_err("payload exceeds limit");
    assert!(matches!(
        err,
        ClientError::Delivery(DeliveryError::PayloadTooLarge { limit: 16, .. })
    ));
}

#[rstest]
#[case(SocketKind::Stream, "stream")]
#[case(SocketKind::Datagram, "datagram")]
fn label_follows_kind(
    udp_peer: UdpSocket,
    tcp_listener: TcpListener,
    #[case] kind: SocketKind,
    #[case] label: &str,
) {
    let addr = match kind {
        SocketKind::Stream => tcp_listener.local_addr(),
        SocketKind::Datagram => udp_peer.local_addr(),
    }
    .expect("peer address");
    let transport =
        SocketTransport::connect(&stream_config(addr).with_kind(kind)).expect("connect");
    assert_eq!(transport.label(), label);
    assert_eq!(transport.kind(), kind);
}

#[rstest]
fn stalled_write_takes_stream_out_of_service(tcp_listener: TcpListener) {
    let addr = tcp_listener.local_addr().expect("listener has address");
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let (bytes_tx, bytes_rx) = mpsc::channel();
    thread::spawn(move || {
        let (mut stream, _) = tcp_listener.accept().expect("accept connection");
        // Stop reading until the client is done so its send buffer fills.
        let _ = release_rx.recv();
        let mut received = Vec::new();
        stream.read_to_end(&mut received).expect("drain connection");
        bytes_tx.send(received).expect("forward bytes");
    });

    let mut config = stream_config(addr);
    config.write_timeout = Duration::from_millis(200);
    let mut client = Client::new(SocketTransport::connect(&config).expect("connect"));
    let url = format!("http://{}", "a".repeat(1 << 20));
    let failed = (0..64).any(|_| client.pageview(&url, None).is_err());
    assert!(failed, "a peer that never reads must stall the stream");
    assert!(client.transport().is_poisoned());

    let err = client
        .pageview("http://after", None)
        .expect_err("poisoned stream rejects further events");
    assert!(matches!(err, ClientError::Delivery(DeliveryError::Io(_))));

    drop(client);
    release_tx.send(()).expect("release reader");
    let received = bytes_rx
        .recv_timeout(Duration::from_secs(10))
        .expect("bytes received");
    let text = String::from_utf8_lossy(&received);
    let mut segments: Vec<&str> = text.split('\n').collect();
    // Whatever follows the last newline is the fragment left by the stall.
    segments.pop();
    for segment in segments {
        let decoded: Value = serde_json::from_str(segment).expect("each full line is JSON");
        assert_eq!(decoded["_type"], json!("_pageview"));
    }
    assert!(!text.contains("http://after"));
}

#[rstest]
fn datagram_target_prefers_ipv4() {
    let v6: SocketAddr = (Ipv6Addr::LOCALHOST, 2323).into();
    let v4: SocketAddr = (Ipv4Addr::LOCALHOST, 2323).into();
    assert_eq!(datagram_target(&[v6, v4]), Some(v4));
}

#[rstest]
fn datagram_target_falls_back_to_ipv6() {
    let v6: SocketAddr = (Ipv6Addr::LOCALHOST, 2323).into();
    assert_eq!(datagram_target(&[v6]), Some(v6));
    assert_eq!(datagram_target(&[]), None);
}

#[rstest]
fn encode_line_appends_single_newline() {
    assert_eq!(encode_line(r#"{"a":1}"#), b"{\"a\":1}\n".to_vec());
}

#[rstest]
#[case(7, true)]
#[case(6, false)]
fn datagram_line_enforces_limit(#[case] limit: usize, #[case] fits: bool) {
    assert_eq!(datagram_line("abcdef", limit).is_some(), fits);
}
