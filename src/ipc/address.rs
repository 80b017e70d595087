use std::path::{Path, PathBuf};

use crate::foundation::core::CanvasId;

/// Directory canvases create their control sockets in unless configured otherwise.
pub const DEFAULT_SOCKET_DIR: &str = "/tmp";

/// Filesystem address of one canvas's control socket.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SocketAddress(PathBuf);

impl SocketAddress {
    /// Path of the unix socket.
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for SocketAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Maps canvas ids to socket addresses.
///
/// Client and server must use the same resolver configuration so both sides agree on the address
/// without any other coordination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocketResolver {
    dir: PathBuf,
}

impl Default for SocketResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SOCKET_DIR)
    }
}

impl SocketResolver {
    /// Resolver rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Socket directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/canvas-<id>.sock`. Pure: performs no IO and does not check for a listener.
    pub fn resolve(&self, id: &CanvasId) -> SocketAddress {
        SocketAddress(self.dir.join(format!("canvas-{id}.sock")))
    }
}

/// Resolve `id` against [`DEFAULT_SOCKET_DIR`].
pub fn resolve(id: &CanvasId) -> SocketAddress {
    SocketResolver::default().resolve(id)
}

#[cfg(test)]
#[path = "../../tests/unit/ipc/address.rs"]
mod tests;
