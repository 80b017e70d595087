use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

use crate::foundation::core::CanvasId;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::ipc::address::{DEFAULT_SOCKET_DIR, SocketAddress, SocketResolver};
use crate::ipc::protocol::{Command, ReplyKind, decode_reply, encode_frame};

/// Default bound on one fetch exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Upper bound on one inbound frame. Longer frames are cut and fail to decode.
pub(crate) const MAX_FRAME_BYTES: u64 = 16 * 1024 * 1024;

/// Client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientOpts {
    /// Directory canvas sockets live in.
    pub socket_dir: PathBuf,
    /// Bound on a whole fetch exchange (connect, write, wait for reply).
    pub timeout: Duration,
}

impl Default for ClientOpts {
    fn default() -> Self {
        Self {
            socket_dir: PathBuf::from(DEFAULT_SOCKET_DIR),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Performs one command/reply exchange per call against a running canvas.
///
/// Every call opens a fresh connection, writes exactly one command and closes the connection
/// once the exchange is settled. There is no retry at this layer.
#[derive(Clone, Debug)]
pub struct CanvasClient {
    resolver: SocketResolver,
    timeout: Duration,
}

impl Default for CanvasClient {
    fn default() -> Self {
        Self::new(ClientOpts::default())
    }
}

enum Inbound {
    Frame(Vec<u8>),
    Closed,
}

impl CanvasClient {
    /// Build a client from options.
    pub fn new(opts: ClientOpts) -> Self {
        Self {
            resolver: SocketResolver::new(opts.socket_dir),
            timeout: opts.timeout,
        }
    }

    /// Replace the fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolver used to locate canvas sockets.
    pub fn resolver(&self) -> &SocketResolver {
        &self.resolver
    }

    /// Fetch timeout in effect.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send a configuration patch without waiting for a reply.
    ///
    /// Whatever the canvas writes back is ignored; only a failure to connect or to write the
    /// command is reported.
    pub async fn send_update(&self, id: &CanvasId, config: Value) -> CanvasResult<()> {
        let addr = self.resolver.resolve(id);
        let frame = encode_frame(&Command::Update { config })?;

        let mut stream = connect(&addr).await?;
        stream
            .write_all(&frame)
            .await
            .map_err(|e| io_failure(&addr, "write update", &e))?;
        // Peer may already be gone; the command was delivered either way.
        let _ = stream.shutdown().await;

        tracing::debug!(canvas = %id, socket = %addr, "sent update");
        Ok(())
    }

    /// Current selection of the canvas, or `None` when it has nothing to report.
    pub async fn fetch_selection(&self, id: &CanvasId) -> CanvasResult<Option<Value>> {
        self.fetch(id, Command::GetSelection, ReplyKind::Selection)
            .await
    }

    /// Current content of the canvas, or `None` when it has nothing to report.
    pub async fn fetch_content(&self, id: &CanvasId) -> CanvasResult<Option<Value>> {
        self.fetch(id, Command::GetContent, ReplyKind::Content).await
    }

    /// Send `command` and wait for a reply of kind `expected`.
    ///
    /// Settles exactly once, on the first of:
    ///
    /// - a reply frame: its payload if the kind matches, `None` otherwise (including frames
    ///   that fail to decode)
    /// - the canvas closing the connection without data: `None`
    /// - the timeout: [`CanvasError::Timeout`], the connection is dropped
    ///
    /// Failing to connect, or an IO error mid-exchange, is a [`CanvasError::Connection`].
    pub async fn fetch(
        &self,
        id: &CanvasId,
        command: Command,
        expected: ReplyKind,
    ) -> CanvasResult<Option<Value>> {
        let addr = self.resolver.resolve(id);
        let frame = encode_frame(&command)?;

        let exchange = async {
            let mut stream = connect(&addr).await?;
            stream
                .write_all(&frame)
                .await
                .map_err(|e| io_failure(&addr, "write command", &e))?;
            let inbound = read_first_frame(&mut stream, &addr).await?;
            let _ = stream.shutdown().await;
            Ok::<_, CanvasError>(inbound)
        };

        let inbound = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(res) => res?,
            Err(_) => {
                tracing::debug!(canvas = %id, socket = %addr, timeout_ms = self.timeout.as_millis() as u64, "fetch timed out");
                return Err(CanvasError::Timeout(self.timeout));
            }
        };

        match inbound {
            Inbound::Closed => {
                tracing::debug!(canvas = %id, "canvas closed without reply");
                Ok(None)
            }
            Inbound::Frame(bytes) => match decode_reply(&bytes) {
                Ok(reply) => Ok(reply.into_payload(expected)),
                Err(e) => {
                    tracing::debug!(canvas = %id, error = %e, "discarding undecodable reply");
                    Ok(None)
                }
            },
        }
    }
}

async fn connect(addr: &SocketAddress) -> CanvasResult<UnixStream> {
    UnixStream::connect(addr.path())
        .await
        .map_err(|e| io_failure(addr, "connect", &e))
}

async fn read_first_frame(stream: &mut UnixStream, addr: &SocketAddress) -> CanvasResult<Inbound> {
    let mut reader = BufReader::new(stream.take(MAX_FRAME_BYTES));
    let mut buf = Vec::new();
    let n = reader
        .read_until(b'\n', &mut buf)
        .await
        .map_err(|e| io_failure(addr, "read reply", &e))?;
    if n == 0 {
        return Ok(Inbound::Closed);
    }
    Ok(Inbound::Frame(buf))
}

fn io_failure(addr: &SocketAddress, op: &str, err: &std::io::Error) -> CanvasError {
    CanvasError::connection(format!("{op} '{addr}': {err}"))
}

#[cfg(test)]
#[path = "../../tests/unit/ipc/client.rs"]
mod tests;
