// crates/limit-server/tests/tcp_roundtrip.rs
use std::time::Duration;

use limit_server::config::Config;
use limit_server::server;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

async fn start_server(config: Config) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    tokio::spawn(server::serve(listener, config));
    addr
}

async fn connect(addr: &str) -> (Lines<BufReader<OwnedReadHalf>>, OwnedWriteHalf) {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (read, write) = stream.into_split();
    (BufReader::new(read).lines(), write)
}

async fn send(write: &mut OwnedWriteHalf, line: &str) {
    write.write_all(format!("{}\n", line).as_bytes()).await.unwrap();
}

async fn next(lines: &mut Lines<BufReader<OwnedReadHalf>>) -> String {
    timeout(Duration::from_secs(5), lines.next_line())
        .await
        .expect("timed out waiting for a line")
        .unwrap()
        .expect("connection closed")
}

#[tokio::test]
async fn order_entry_and_ticks_over_tcp() {
    let config = Config {
        halted_products: vec!["HALT".to_string()],
        ..Config::default()
    };
    let addr = start_server(config).await;

    let (mut trader_in, mut trader_out) = connect(&addr).await;
    let (mut feed_in, mut feed_out) = connect(&addr).await;

    send(&mut trader_out, "N, B, IBM, 1000, 100.0").await;
    assert_eq!(next(&mut trader_in).await, "A, 1, B, IBM, 1000, 100");

    send(&mut trader_out, "N, sell, HALT, 5, 10").await;
    assert_eq!(next(&mut trader_in).await, "A, 2, S, HALT, 5, 10");

    // Unfavorable tick: nothing is sent, the order is still open.
    send(&mut feed_out, "P, IBM, 101.0").await;
    send(&mut trader_out, "Q, IBM").await;
    assert_eq!(next(&mut trader_in).await, "O, 1, B, IBM, 1000, 100");

    send(&mut feed_out, "P, IBM, 99.0").await;
    let expected = "X, 1, B, IBM, 1000, 100, 99";
    assert_eq!(next(&mut trader_in).await, expected);
    assert_eq!(next(&mut feed_in).await, expected);

    send(&mut feed_out, "P, HALT, 12").await;
    let expected = "F, 2, S, HALT, 5, 10, execution rejected: HALT is halted";
    assert_eq!(next(&mut trader_in).await, expected);
    assert_eq!(next(&mut feed_in).await, expected);

    // A malformed line is answered on the same connection only.
    send(&mut feed_out, "P, IBM").await;
    assert_eq!(next(&mut feed_in).await, "E, 'P' expects 3 fields  got 2");

    send(&mut trader_out, "N, B, IBM, 0, 1").await;
    assert_eq!(next(&mut trader_in).await, "R, quantity must be positive");
}

#[tokio::test]
async fn connections_over_the_limit_are_dropped() {
    let config = Config {
        max_clients: 1,
        ..Config::default()
    };
    let addr = start_server(config).await;

    let (mut first_in, mut first_out) = connect(&addr).await;
    send(&mut first_out, "N, B, IBM, 1, 1").await;
    assert_eq!(next(&mut first_in).await, "A, 1, B, IBM, 1, 1");

    let (mut second_in, _second_out) = connect(&addr).await;
    let line = timeout(Duration::from_secs(5), second_in.next_line())
        .await
        .expect("timed out waiting for close");
    assert!(matches!(line, Ok(None) | Err(_)));
}
