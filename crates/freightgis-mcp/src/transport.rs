//! Newline-delimited JSON-RPC transport and the server loop.

use std::io;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::{
    stdin, stdout, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin,
    Stdout,
};
use tokio::select;
use tokio::signal;

use crate::protocol::{handle_message, parse_error_response};
use crate::server::McpServerState;

/// Install a stderr-only subscriber so stdout carries nothing but protocol frames.
///
/// An explicit `log_level` wins over `RUST_LOG`; the fallback is `info`.
pub fn configure_tracing(log_level: Option<&str>) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = if let Some(level) = log_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("tracing subscriber already installed")?;

    Ok(())
}

/// Line-oriented message transport over any async reader/writer pair.
pub struct MessageTransport<R, W> {
    reader: R,
    writer: W,
}

/// The transport used by the server binary.
pub type StdioTransport = MessageTransport<BufReader<Stdin>, Stdout>;

impl StdioTransport {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(stdin()), stdout())
    }
}

impl<R, W> MessageTransport<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Next non-blank line with surrounding whitespace removed, or `None` at EOF.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf).await.context("stdin read failed")? == 0 {
                return Ok(None);
            }
            let message = buf.trim();
            if !message.is_empty() {
                return Ok(Some(message.to_owned()));
            }
        }
    }

    /// Write `message` as a single line and flush.
    pub async fn write_message(&mut self, message: &Value) -> Result<()> {
        let mut frame = serde_json::to_vec(message)?;
        frame.push(b'\n');
        self.writer.write_all(&frame).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// True when the peer closed its end of the output stream.
fn is_disconnect(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
}

/// Run the server loop: read messages from the transport and respond on it.
///
/// Returns when the reader hits EOF, the client disconnects, or Ctrl-C is
/// received.
pub async fn run_server_loop<R, W>(
    transport: &mut MessageTransport<R, W>,
    server: &McpServerState,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    server
        .initialize()
        .await
        .context("server state failed to initialize")?;

    tracing::info!("MCP server initialized, waiting for requests...");

    loop {
        select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Ctrl-C received, stopping");
                break;
            }

            line = transport.read_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        tracing::info!("Client closed stdin");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("Reading from client failed: {:#}", e);
                        return Err(e);
                    }
                };

                let response = match serde_json::from_str::<Value>(&line) {
                    Ok(message) => handle_message(server, message),
                    Err(e) => {
                        tracing::warn!("Discarding malformed message: {}", e);
                        Some(parse_error_response(&e.to_string()))
                    }
                };

                if let Some(response) = response {
                    if let Err(e) = transport.write_message(&response).await {
                        if is_disconnect(&e) {
                            tracing::info!("Client went away (broken pipe)");
                            break;
                        }
                        return Err(e);
                    }
                }
            }
        }
    }

    tracing::info!("Server loop finished");
    Ok(())
}
