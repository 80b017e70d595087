use std::time::Duration;

/// Convenience result type used across termcanvas.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Top-level error taxonomy for the control protocol and the render pipeline.
#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    /// Invalid caller-provided data (ids, dimensions, component props).
    #[error("validation error: {0}")]
    Validation(String),

    /// The canvas socket could not be opened, or failed mid-exchange.
    #[error("connection error: {0}")]
    Connection(String),

    /// No reply and no clean close within the bound.
    #[error("timed out after {}ms waiting for canvas reply", .0.as_millis())]
    Timeout(Duration),

    /// The layout engine or rasterizer rejected the input.
    #[error("render error: {0}")]
    Render(String),

    /// The font asset could not be loaded. Sticky for the process lifetime.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// Errors when serializing or deserializing wire frames and JSON inputs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanvasError {
    /// Build a [`CanvasError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CanvasError::Connection`] value.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Build a [`CanvasError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CanvasError::FontLoad`] value.
    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    /// Build a [`CanvasError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for [`CanvasError::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// `true` for [`CanvasError::Connection`].
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
