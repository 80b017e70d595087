use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

use crate::foundation::core::CanvasId;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::ipc::address::{SocketAddress, SocketResolver};
use crate::ipc::client::{DEFAULT_TIMEOUT, MAX_FRAME_BYTES};
use crate::ipc::protocol::{Command, Reply, decode_command, encode_frame};

/// Live canvas state as seen by the control protocol.
pub trait CanvasHandler {
    /// Apply a configuration patch to the live state.
    fn apply_update(&mut self, config: Value);

    /// Current selection. `None` closes the connection without a reply.
    fn selection(&self) -> Option<Value>;

    /// Current content. `None` closes the connection without a reply.
    fn content(&self) -> Option<Value>;
}

/// Control socket of one canvas.
///
/// Serves connections one after another: each connection carries one command and gets at most
/// one reply before it is closed. A peer that does not send its command within the read timeout
/// is dropped. The socket file is removed when the server is dropped.
#[derive(Debug)]
pub struct CanvasServer {
    listener: UnixListener,
    address: SocketAddress,
    read_timeout: Duration,
}

impl CanvasServer {
    /// Bind the address `resolver` derives for `id`, replacing a stale socket file.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(resolver: &SocketResolver, id: &CanvasId) -> CanvasResult<Self> {
        let address = resolver.resolve(id);
        let path = address.path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| {
                CanvasError::connection(format!("create socket dir '{}': {e}", dir.display()))
            })?;
        }
        if path.exists() {
            std::fs::remove_file(path).map_err(|e| {
                CanvasError::connection(format!("remove stale socket '{address}': {e}"))
            })?;
        }
        let listener = UnixListener::bind(path)
            .map_err(|e| CanvasError::connection(format!("bind '{address}': {e}")))?;
        tracing::debug!(canvas = %id, socket = %address, "canvas listening");
        Ok(Self {
            listener,
            address,
            read_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replace the bound on waiting for a connection's command frame.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Address this server is listening on.
    pub fn address(&self) -> &SocketAddress {
        &self.address
    }

    /// Serve connections until accepting fails.
    ///
    /// Errors on individual connections are logged and do not stop the loop.
    pub async fn serve<H: CanvasHandler>(&self, handler: &mut H) -> CanvasResult<()> {
        loop {
            self.serve_one(handler).await?;
        }
    }

    /// Accept and fully handle exactly one connection.
    pub async fn serve_one<H: CanvasHandler>(&self, handler: &mut H) -> CanvasResult<()> {
        let (stream, _) = self
            .listener
            .accept()
            .await
            .map_err(|e| CanvasError::connection(format!("accept on '{}': {e}", self.address)))?;
        if let Err(e) = handle_connection(stream, handler, self.read_timeout).await {
            tracing::warn!(socket = %self.address, error = %e, "canvas connection failed");
        }
        Ok(())
    }
}

impl Drop for CanvasServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(self.address.path());
    }
}

async fn handle_connection<H: CanvasHandler>(
    mut stream: UnixStream,
    handler: &mut H,
    read_timeout: Duration,
) -> CanvasResult<()> {
    let mut line = Vec::new();
    let mut reader = BufReader::new((&mut stream).take(MAX_FRAME_BYTES));
    let read = tokio::time::timeout(read_timeout, reader.read_until(b'\n', &mut line)).await;
    drop(reader);
    let n = match read {
        Ok(read) => read.map_err(|e| CanvasError::connection(format!("read command: {e}")))?,
        Err(_) => {
            tracing::warn!(
                timeout_ms = read_timeout.as_millis() as u64,
                "dropping connection that sent no command"
            );
            let _ = stream.shutdown().await;
            return Ok(());
        }
    };
    if n == 0 {
        return Ok(());
    }

    let command = match decode_command(&line) {
        Ok(cmd) => cmd,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring undecodable command");
            let _ = stream.shutdown().await;
            return Ok(());
        }
    };

    let reply = match command {
        Command::Update { config } => {
            handler.apply_update(config);
            None
        }
        Command::GetSelection => handler.selection().map(|data| Reply::Selection { data }),
        Command::GetContent => handler.content().map(|data| Reply::Content { data }),
    };

    if let Some(reply) = reply {
        stream
            .write_all(&encode_frame(&reply)?)
            .await
            .map_err(|e| CanvasError::connection(format!("write reply: {e}")))?;
    }
    let _ = stream.shutdown().await;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/ipc/server.rs"]
mod tests;
