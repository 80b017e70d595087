use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde_json::Value;

use crate::foundation::core::OutputFormat;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::layout::element::Element;
use crate::layout::engine::LayoutEngine;
use crate::render::font::FontCache;
use crate::render::raster::{Rasterizer, ResvgRasterizer};

/// One render: an element tree, the canvas size and the output format.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    tree: Element,
    width: u32,
    height: u32,
    format: OutputFormat,
}

impl RenderRequest {
    /// Validated request. Both dimensions must be positive.
    pub fn new(tree: Element, width: u32, height: u32, format: OutputFormat) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::validation(format!(
                "render size must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            tree,
            width,
            height,
            format,
        })
    }

    /// Same request with a different output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Element tree to lay out.
    pub fn tree(&self) -> &Element {
        &self.tree
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Requested output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Layout, then rasterize when PNG is requested.
///
/// Holds nothing between calls except a handle to the font cache.
pub struct RenderPipeline<R: Rasterizer = ResvgRasterizer> {
    fonts: Arc<FontCache>,
    rasterizer: R,
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new(FontCache::global())
    }
}

impl RenderPipeline {
    /// Pipeline drawing text from `fonts`.
    pub fn new(fonts: Arc<FontCache>) -> Self {
        Self::with_rasterizer(fonts, ResvgRasterizer)
    }
}

impl<R: Rasterizer> RenderPipeline<R> {
    /// Pipeline with a custom rasterizer.
    pub fn with_rasterizer(fonts: Arc<FontCache>, rasterizer: R) -> Self {
        Self { fonts, rasterizer }
    }

    /// Rasterizer used for PNG output.
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Render `req` to SVG or PNG bytes.
    #[tracing::instrument(skip(self, req), fields(width = req.width, height = req.height, format = req.format.as_str()))]
    pub fn render_to_bytes(&self, req: &RenderRequest) -> CanvasResult<Vec<u8>> {
        let font = self.fonts.get()?;
        let doc = LayoutEngine::new(&font).layout(&req.tree, req.width, req.height)?;
        match req.format {
            OutputFormat::Svg => Ok(doc.into_bytes()),
            OutputFormat::Png => self.rasterizer.rasterize(&doc, req.width, &font),
        }
    }

    /// Render to `path`, choosing the format from its extension.
    ///
    /// The file is replaced atomically; on failure `path` is left untouched.
    #[tracing::instrument(skip(self, req), fields(path = %path.display()))]
    pub fn render_to_file(&self, req: &RenderRequest, path: &Path) -> CanvasResult<OutputFormat> {
        let format = OutputFormat::from_path(path);
        let req = req.clone().with_format(format);
        let bytes = self.render_to_bytes(&req)?;
        write_atomic(path, &bytes)?;
        tracing::debug!(bytes = bytes.len(), "render written");
        Ok(format)
    }

    /// Render a JSON element tree.
    pub fn render_json(
        &self,
        tree: Value,
        width: u32,
        height: u32,
        format: OutputFormat,
    ) -> CanvasResult<Vec<u8>> {
        let req = RenderRequest::new(Element::from_json(tree)?, width, height, format)?;
        self.render_to_bytes(&req)
    }
}

/// Mode for newly created output files, before the umask. Overwrites keep the old mode.
#[cfg(unix)]
const OUTPUT_FILE_MODE: u32 = 0o644;

fn write_atomic(path: &Path, bytes: &[u8]) -> CanvasResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".termcanvas-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(OUTPUT_FILE_MODE));
    }
    let mut tmp = builder
        .tempfile_in(dir)
        .with_context(|| format!("create temp file in '{}'", dir.display()))?;
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .with_context(|| format!("copy permissions of '{}'", path.display()))?;
    }
    tmp.write_all(bytes)
        .with_context(|| format!("write '{}'", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("persist '{}'", path.display()))?;
    Ok(())
}

/// [`RenderPipeline::render_to_bytes`] on the process-wide font cache.
pub fn render_to_bytes(req: &RenderRequest) -> CanvasResult<Vec<u8>> {
    RenderPipeline::default().render_to_bytes(req)
}

/// [`RenderPipeline::render_to_file`] on the process-wide font cache.
pub fn render_to_file(req: &RenderRequest, path: &Path) -> CanvasResult<OutputFormat> {
    RenderPipeline::default().render_to_file(req, path)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
