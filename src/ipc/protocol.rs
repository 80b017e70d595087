//! Wire schema for the canvas control protocol.
//!
//! Frames are newline-delimited UTF-8 JSON objects tagged by `type`. Each connection carries at
//! most one [`Command`] from the client and at most one [`Reply`] from the canvas.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::error::{CanvasError, CanvasResult};

/// Client-to-canvas message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    /// Patch the canvas configuration.
    Update {
        /// Configuration patch; applied by the canvas, not interpreted here.
        config: Value,
    },
    /// Ask for the current selection.
    GetSelection,
    /// Ask for the current content.
    GetContent,
}

/// Canvas-to-client message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Reply {
    /// Answer to [`Command::GetSelection`].
    Selection {
        /// Selection payload, `null` when nothing is selected.
        #[serde(default)]
        data: Value,
    },
    /// Answer to [`Command::GetContent`].
    Content {
        /// Content payload.
        #[serde(default)]
        data: Value,
    },
    /// Bare acknowledgement.
    Ack,
    /// Any other `type`. Tolerated and treated as a non-matching reply.
    #[serde(other)]
    Unrecognized,
}

/// Reply kind a fetch is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// [`Reply::Selection`].
    Selection,
    /// [`Reply::Content`].
    Content,
}

impl Reply {
    /// Payload when this reply is of kind `expected`, otherwise `None`.
    ///
    /// An explicit JSON `null` payload also maps to `None`.
    pub fn into_payload(self, expected: ReplyKind) -> Option<Value> {
        let data = match (self, expected) {
            (Self::Selection { data }, ReplyKind::Selection) => data,
            (Self::Content { data }, ReplyKind::Content) => data,
            _ => return None,
        };
        (!data.is_null()).then_some(data)
    }
}

/// Serialize `msg` as a single newline-terminated frame.
pub fn encode_frame<T: Serialize>(msg: &T) -> CanvasResult<Vec<u8>> {
    let mut out = serde_json::to_vec(msg).map_err(|e| CanvasError::serde(e.to_string()))?;
    out.push(b'\n');
    Ok(out)
}

/// Decode one inbound reply frame. Trailing newline and surrounding whitespace are ignored.
pub fn decode_reply(frame: &[u8]) -> CanvasResult<Reply> {
    decode_frame(frame)
}

/// Decode one inbound command frame.
pub fn decode_command(frame: &[u8]) -> CanvasResult<Command> {
    decode_frame(frame)
}

fn decode_frame<T: serde::de::DeserializeOwned>(frame: &[u8]) -> CanvasResult<T> {
    let text = std::str::from_utf8(frame)
        .map_err(|e| CanvasError::serde(format!("frame is not utf-8: {e}")))?;
    let text = text.trim();
    if text.is_empty() {
        return Err(CanvasError::serde("empty frame"));
    }
    serde_json::from_str(text).map_err(|e| CanvasError::serde(e.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/ipc/protocol.rs"]
mod tests;
