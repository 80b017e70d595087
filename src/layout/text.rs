use crate::foundation::error::{CanvasError, CanvasResult};
use crate::layout::style::TextStyle;
use crate::render::font::FontAsset;

/// One shaped line of a text run, relative to the run's content box.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ShapedLine {
    /// Line text without trailing whitespace or line breaks.
    pub(crate) text: String,
    /// Baseline offset from the top of the content box.
    pub(crate) baseline: f32,
    /// Advance width of the line, trailing whitespace excluded.
    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) advance: f32,
}

/// Parley contexts bound to the one cached font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<[u8; 4]>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font` with a fresh font context.
    pub(crate) fn new(font: &FontAsset) -> CanvasResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.data().to_vec()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CanvasError::render(format!(
                "font \"{}\" registered no families for text shaping",
                font.name()
            ))
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CanvasError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    fn build(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width_px: Option<f32>,
    ) -> parley::Layout<[u8; 4]> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.font_size));

        let mut layout: parley::Layout<[u8; 4]> = builder.build(text);
        layout.break_all_lines(max_width_px);
        if let Some(w) = max_width_px {
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        }
        layout
    }

    /// Size of `text` wrapped to `max_width_px` (unbounded when `None`).
    ///
    /// The width is rounded up to whole pixels so re-breaking at the measured width never wraps
    /// a line that fit during measurement.
    pub(crate) fn measure(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width_px: Option<f32>,
    ) -> (f32, f32) {
        let layout = self.build(text, style, max_width_px);
        let mut w = 0.0f32;
        let mut h = 0.0f32;
        for line in layout.lines() {
            let m = line.metrics();
            w = w.max(m.advance - m.trailing_whitespace);
            h += m.ascent + m.descent + m.leading;
        }
        (w.ceil(), h.ceil())
    }

    /// Break `text` into lines for a content box of `width_px`.
    pub(crate) fn shape_lines(
        &mut self,
        text: &str,
        style: &TextStyle,
        width_px: f32,
    ) -> Vec<ShapedLine> {
        let layout = self.build(text, style, Some(width_px.max(0.0)));
        let mut out = Vec::new();
        let mut top = 0.0f32;
        for line in layout.lines() {
            let m = line.metrics();
            let baseline = top + m.leading * 0.5 + m.ascent;
            top += m.ascent + m.descent + m.leading;

            let range = line.text_range();
            let slice = text.get(range).unwrap_or_default().trim_end();
            if slice.is_empty() {
                continue;
            }
            out.push(ShapedLine {
                text: slice.to_owned(),
                baseline,
                advance: m.advance - m.trailing_whitespace,
            });
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
