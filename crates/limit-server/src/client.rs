// crates/limit-server/src/client.rs

//! Per-connection I/O.
//!
//! Each client speaks the CSV line protocol: order entries, price ticks
//! and queries in, acks and execution events out. A malformed line gets
//! an `E` reply and the connection stays open.

use anyhow::Result;
use limit_protocol::{format_output, parse_input_line, OutputMessage};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

use crate::types::{AgentRequest, AgentTx, ClientId, ClientRegistry, OutboundRx, OutboundTx};

/// Run the client I/O loop for a single connection.
pub async fn run_client(
    client_id: ClientId,
    stream: TcpStream,
    agent_tx: AgentTx,
    out_tx: OutboundTx,
    out_rx: OutboundRx,
    clients: ClientRegistry,
) -> Result<()> {
    let (read_stream, write_stream) = stream.into_split();

    // Writer task: consume OutputMessages and write lines.
    let writer_handle = tokio::spawn(run_writer(client_id, write_stream, out_rx));

    let result = run_reader(client_id, read_stream, agent_tx, out_tx).await;

    // Remove client from registry; dropping its sender ends the writer.
    {
        let mut guard = clients.write().await;
        guard.remove(&client_id);
    }
    let _ = writer_handle.await;

    result
}

async fn run_reader(
    client_id: ClientId,
    read_stream: OwnedReadHalf,
    agent_tx: AgentTx,
    out_tx: OutboundTx,
) -> Result<()> {
    let mut lines = BufReader::new(read_stream).lines();

    while let Some(line) = lines.next_line().await? {
        match parse_input_line(&line) {
            Ok(Some(cmd)) => {
                tracing::debug!(client = client_id.0, ?cmd, "command");

                if agent_tx.send(AgentRequest { client_id, cmd }).is_err() {
                    tracing::warn!("agent channel closed");
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(client = client_id.0, %err, line = line.trim(), "invalid line");
                let _ = out_tx.send(OutputMessage::Error {
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(())
}

async fn run_writer(client_id: ClientId, mut write_stream: OwnedWriteHalf, mut out_rx: OutboundRx) {
    while let Some(msg) = out_rx.recv().await {
        if let Err(e) = write_line(&mut write_stream, &msg).await {
            tracing::warn!(client = client_id.0, error = %e, "write failed");
            break;
        }
    }
}

async fn write_line(stream: &mut OwnedWriteHalf, msg: &OutputMessage) -> std::io::Result<()> {
    let data = format!("{}\n", format_output(msg));

    stream.write_all(data.as_bytes()).await?;
    stream.flush().await
}
