use std::path::Path;

use crate::foundation::error::{CanvasError, CanvasResult};

/// Identifier of a running canvas instance.
///
/// Stable for the lifetime of the canvas and used to derive its socket address. Ids are opaque
/// strings, but must be non-empty and must not contain `/` or NUL so the derived address stays
/// inside the socket directory.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanvasId(String);

impl CanvasId {
    /// Create a validated canvas id.
    pub fn new(id: impl Into<String>) -> CanvasResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(CanvasError::validation("canvas id must be non-empty"));
        }
        if id.contains('/') || id.contains('\0') {
            return Err(CanvasError::validation(format!(
                "canvas id \"{}\" must not contain '/' or NUL",
                id.escape_debug()
            )));
        }
        Ok(Self(id))
    }

    /// Borrow the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CanvasId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CanvasId {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Encoded image format produced by the render pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// SVG document (UTF-8 text).
    Svg,
    /// PNG image (binary).
    #[default]
    Png,
}

impl OutputFormat {
    /// Pick a format from an output path: `.svg` selects SVG, anything else PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Svg,
            _ => Self::Png,
        }
    }

    /// Lowercase name, as used in CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
