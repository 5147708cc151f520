use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;

use limit_protocol::parse_input_line;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Where to connect: env override or default.
    let addr = env::var("LIMIT_CLIENT_ADDR").unwrap_or_else(|_| "127.0.0.1:9100".to_string());

    println!("Connecting to {}...", addr);
    let stream = TcpStream::connect(&addr).await?;
    let (read_half, mut write_half) = stream.into_split();
    let mut replies = BufReader::new(read_half).lines();
    println!("Connected.");
    println!("Type CSV commands like:");
    println!("  N, B, IBM, 1000, 100.0   (buy 1000 IBM at or below 100)");
    println!("  P, IBM, 99.0             (price tick)");
    println!("  Q, IBM                   (list pending orders)");
    println!("Type 'quit' or 'exit' to leave.\n");

    let stdin = io::stdin();

    loop {
        print!(">> ");
        io::stdout().flush()?;

        let mut line = String::new();
        let n = stdin.read_line(&mut line)?;
        if n == 0 {
            println!("\nEOF on stdin, exiting client.");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            println!("Exiting client.");
            break;
        }

        // Catch typos locally; the server would answer with an `E` line anyway.
        if let Err(e) = parse_input_line(trimmed) {
            eprintln!("Not sent: {}", e);
            continue;
        }

        write_half.write_all(format!("{}\n", trimmed).as_bytes()).await?;

        // Print everything that arrives shortly after, including events
        // triggered by other clients' ticks.
        loop {
            match timeout(Duration::from_millis(100), replies.next_line()).await {
                Ok(Ok(Some(reply))) => println!("<< {}", reply),
                Ok(Ok(None)) => {
                    println!("Server closed the connection.");
                    return Ok(());
                }
                Ok(Err(e)) => {
                    eprintln!("Read error: {:?}", e);
                    return Ok(());
                }
                // Timed out waiting for the next line → assume we're done for this command.
                Err(_) => break,
            }
        }
    }

    Ok(())
}
