//! Newline-delimited JSON-RPC over standard I/O

use crate::{
    RequestHandler, Transport, TransportError,
    batch::{JsonRpcMessage, create_error_response, process_message},
    validation::{decode_line, extract_id_from_malformed, validate_message_string},
};
use async_trait::async_trait;
use echo_scaffolder_protocol::{Error, Response};
use serde_json::Value;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tracing::{debug, error, info, warn};

/// Configuration for stdio transport
#[derive(Debug, Clone)]
pub struct StdioConfig {
    /// Longest accepted line in bytes (default: 10MB); longer lines are
    /// rejected after reading at most this much of them
    pub max_message_size: usize,
    /// Enforce framing rules on incoming and outgoing lines
    pub validate_messages: bool,
}

impl Default for StdioConfig {
    fn default() -> Self {
        Self {
            max_message_size: 10 * 1024 * 1024,
            validate_messages: true,
        }
    }
}

/// Standard I/O transport
///
/// - one message per line, no embedded newlines
/// - lines must be valid UTF-8
/// - arrays are treated as JSON-RPC batches
/// - error responses keep the request id whenever it can be recovered
pub struct StdioTransport {
    running: Arc<AtomicBool>,
    config: StdioConfig,
}

impl StdioTransport {
    /// Create a new stdio transport with default configuration
    pub fn new() -> Self {
        Self::with_config(StdioConfig::default())
    }

    /// Create a new stdio transport with custom configuration
    pub fn with_config(config: StdioConfig) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            config,
        }
    }

    pub fn config(&self) -> &StdioConfig {
        &self.config
    }

    /// Serve messages from `reader` until EOF, writing responses to `writer`
    ///
    /// A failure while handling one line is logged and the loop moves on;
    /// only read and write errors on the streams end the session.
    pub async fn serve<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
        handler: &RequestHandler,
    ) -> Result<(), TransportError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        self.running.store(true, Ordering::Relaxed);
        let mut buffer = Vec::new();

        // Two extra bytes for a CRLF terminator.
        let read_limit = (self.config.max_message_size as u64).saturating_add(2);

        while self.running.load(Ordering::Relaxed) {
            buffer.clear();

            let read = (&mut reader)
                .take(read_limit)
                .read_until(b'\n', &mut buffer)
                .await
                .map_err(|e| TransportError::Connection(format!("Stdin read error: {e}")))?;
            if read == 0 {
                debug!("EOF reached, stopping stdio transport");
                break;
            }

            if read as u64 == read_limit && buffer.last() != Some(&b'\n') {
                self.reject_oversized(&mut reader, &mut writer, &buffer).await?;
                continue;
            }

            let line = match decode_line(&buffer) {
                Ok(line) => line.trim_end_matches(['\n', '\r']),
                Err(e) => {
                    warn!("Dropping undecodable line: {}", e);
                    let response =
                        create_error_response(Error::parse_error(e.to_string()), Value::Null);
                    self.send_response(&mut writer, &response).await?;
                    continue;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            if let Err(e) = self.process_line(line, handler, &mut writer).await {
                match e {
                    TransportError::Connection(_) => return Err(e),
                    TransportError::Protocol(_) => error!("Failed to process line: {}", e),
                }
            }
        }

        self.running.store(false, Ordering::Relaxed);
        info!("Stdio transport stopped");
        Ok(())
    }

    /// Answer a line longer than the limit and skip the rest of it
    ///
    /// Only the first bytes of the line are ever held in memory; the id is
    /// recovered from them when it appears early enough.
    async fn reject_oversized<R, W>(
        &self,
        reader: &mut R,
        writer: &mut W,
        prefix: &[u8],
    ) -> Result<(), TransportError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let max = self.config.max_message_size;
        warn!(max_message_size = max, "Dropping oversized message");

        skip_line(reader)
            .await
            .map_err(|e| TransportError::Connection(format!("Stdin read error: {e}")))?;

        let response = create_error_response(
            Error::invalid_request(format!(
                "Message validation failed: message exceeds {max} bytes"
            )),
            extract_id_from_malformed(&String::from_utf8_lossy(prefix)),
        );
        self.send_response(writer, &response).await
    }

    /// Process a single line of input
    async fn process_line<W>(
        &self,
        line: &str,
        handler: &RequestHandler,
        writer: &mut W,
    ) -> Result<(), TransportError>
    where
        W: AsyncWrite + Unpin,
    {
        if self.config.validate_messages {
            if let Err(e) = validate_message_string(line, Some(self.config.max_message_size)) {
                warn!("Message validation failed: {}", e);
                let response = create_error_response(
                    Error::invalid_request(format!("Message validation failed: {e}")),
                    extract_id_from_malformed(line),
                );
                return self.send_response(writer, &response).await;
            }
        }

        debug!("Processing message: {}", line);

        let message = match JsonRpcMessage::parse(line) {
            Ok(message) => message,
            Err(e) => {
                warn!("Failed to parse JSON: {}", e);
                let response = create_error_response(
                    Error::parse_error(format!("Invalid JSON: {e}")),
                    extract_id_from_malformed(line),
                );
                return self.send_response(writer, &response).await;
            }
        };

        let reply = process_message(message, handler)
            .await
            .map_err(|e| TransportError::Protocol(format!("Failed to serialize response: {e}")))?;

        match reply {
            Some(reply) => {
                let json = reply.to_json().map_err(|e| {
                    TransportError::Protocol(format!("Failed to serialize response: {e}"))
                })?;
                self.send_line(writer, &json).await
            }
            None => {
                debug!("No response needed for message");
                Ok(())
            }
        }
    }

    async fn send_response<W>(&self, writer: &mut W, response: &Response) -> Result<(), TransportError>
    where
        W: AsyncWrite + Unpin,
    {
        let json = serde_json::to_string(response)
            .map_err(|e| TransportError::Protocol(format!("Failed to serialize response: {e}")))?;

        self.send_line(writer, &json).await
    }

    /// Write one line and flush
    ///
    /// The size limit only applies to incoming messages.
    async fn send_line<W>(&self, writer: &mut W, line: &str) -> Result<(), TransportError>
    where
        W: AsyncWrite + Unpin,
    {
        if self.config.validate_messages {
            validate_message_string(line, None).map_err(|e| {
                TransportError::Protocol(format!("Outgoing message validation failed: {e}"))
            })?;
        }

        debug!("Sending response: {}", line);

        writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| TransportError::Connection(format!("Failed to write to stdout: {e}")))?;
        writer
            .write_all(b"\n")
            .await
            .map_err(|e| TransportError::Connection(format!("Failed to write to stdout: {e}")))?;
        writer
            .flush()
            .await
            .map_err(|e| TransportError::Connection(format!("Failed to flush stdout: {e}")))?;

        Ok(())
    }
}

/// Consume input up to and including the next newline, or to EOF
async fn skip_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(());
        }

        match available.iter().position(|&b| b == b'\n') {
            Some(end) => {
                reader.consume(end + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for StdioTransport {
    async fn start(&mut self, handler: RequestHandler) -> Result<(), TransportError> {
        info!(
            max_message_size = self.config.max_message_size,
            validate_messages = self.config.validate_messages,
            "Starting stdio transport"
        );

        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer, &handler).await
    }

    async fn stop(&mut self) -> Result<(), TransportError> {
        info!("Stopping stdio transport");
        self.running.store(false, Ordering::Relaxed);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), TransportError> {
        if self.running.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(TransportError::Connection(
                "Transport not running".to_string(),
            ))
        }
    }
}
