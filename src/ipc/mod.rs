//! Canvas control protocol over unix domain sockets.
//!
//! One connection carries one newline-terminated JSON command and at most one reply.

/// Canvas id to socket path mapping.
pub mod address;
/// Client side: send updates, fetch selection/content.
pub mod client;
/// Wire schema and frame codec.
pub mod protocol;
/// Reference canvas-side server.
pub mod server;
