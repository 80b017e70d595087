use std::io::Cursor;

use crate::foundation::error::{CanvasError, CanvasResult};
use crate::layout::svg::VectorDocument;
use crate::render::font::FontAsset;

/// Largest raster edge accepted, in pixels.
const MAX_DIM: u32 = 16_384;

/// Turns a vector document into PNG bytes.
pub trait Rasterizer {
    /// Rasterize `doc` scaled so its width equals `fit_width` pixels; height follows the aspect
    /// ratio. Text draws with `font` only.
    fn rasterize(&self, doc: &VectorDocument, fit_width: u32, font: &FontAsset)
    -> CanvasResult<Vec<u8>>;
}

/// usvg + resvg backed [`Rasterizer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ResvgRasterizer;

impl Rasterizer for ResvgRasterizer {
    fn rasterize(
        &self,
        doc: &VectorDocument,
        fit_width: u32,
        font: &FontAsset,
    ) -> CanvasResult<Vec<u8>> {
        let opts = usvg::Options {
            fontdb: font.fontdb(),
            font_resolver: single_face_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(doc.as_str(), &opts)
            .map_err(|e| CanvasError::render(format!("parse vector document: {e}")))?;

        let (width, height, scale) = raster_size(tree.size(), fit_width)?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| CanvasError::render("failed to allocate raster pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let mut rgba = Vec::with_capacity(pixmap.data().len());
        for px in pixmap.pixels() {
            let c = px.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        encode_png(width, height, rgba)
    }
}

/// Pixel size and uniform scale for fitting `size` to `fit_width`.
fn raster_size(size: usvg::Size, fit_width: u32) -> CanvasResult<(u32, u32, f32)> {
    if fit_width == 0 || fit_width > MAX_DIM {
        return Err(CanvasError::render(format!(
            "raster width {fit_width} out of range 1..={MAX_DIM}"
        )));
    }
    let scale = fit_width as f32 / size.width();
    let height = (size.height() * scale).ceil().max(1.0);
    if !height.is_finite() || height > MAX_DIM as f32 {
        return Err(CanvasError::render(format!(
            "raster size too large: {fit_width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((fit_width, height as u32, scale))
}

fn encode_png(width: u32, height: u32, rgba: Vec<u8>) -> CanvasResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| CanvasError::render("pixel buffer does not match raster size"))?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| CanvasError::render(format!("encode png: {e}")))?;
    Ok(out)
}

/// Every text run resolves to the single face in the document's font database.
fn single_face_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|_font, fontdb| fontdb.faces().next().map(|f| f.id)),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
