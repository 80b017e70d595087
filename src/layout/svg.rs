use std::fmt::Write as _;

use crate::foundation::color::Color;

/// Serialized vector document produced by the layout engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorDocument {
    svg: String,
    width: u32,
    height: u32,
}

impl VectorDocument {
    /// Declared document width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Declared document height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// SVG markup.
    pub fn as_str(&self) -> &str {
        &self.svg
    }

    /// SVG markup as UTF-8 bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.svg.into_bytes()
    }
}

/// Geometry of one painted rectangle.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RectPaint {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) w: f32,
    pub(crate) h: f32,
    pub(crate) radius: f32,
}

/// Append-only SVG markup builder with fixed number formatting.
pub(crate) struct SvgWriter {
    out: String,
    width: u32,
    height: u32,
}

impl SvgWriter {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let mut out = String::with_capacity(1024);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        Self { out, width, height }
    }

    pub(crate) fn open_group(&mut self, opacity: f32) {
        let _ = write!(self.out, r#"<g opacity="{}">"#, num(opacity));
    }

    pub(crate) fn close_group(&mut self) {
        self.out.push_str("</g>");
    }

    pub(crate) fn fill_rect(&mut self, r: RectPaint, fill: Color) {
        if fill.is_transparent() || r.w <= 0.0 || r.h <= 0.0 {
            return;
        }
        self.rect_open(r);
        let _ = write!(self.out, r#" fill="{}""#, fill.to_hex_rgb());
        if fill.a != 255 {
            let _ = write!(self.out, r#" fill-opacity="{}""#, num(fill.alpha_f32()));
        }
        self.out.push_str("/>");
    }

    /// Border drawn inside the box: the stroke is centered on a rect inset by half its width.
    pub(crate) fn stroke_rect(&mut self, r: RectPaint, width: f32, stroke: Color) {
        if stroke.is_transparent() || width <= 0.0 {
            return;
        }
        let half = width * 0.5;
        let inset = RectPaint {
            x: r.x + half,
            y: r.y + half,
            w: (r.w - width).max(0.0),
            h: (r.h - width).max(0.0),
            radius: (r.radius - half).max(0.0),
        };
        self.rect_open(inset);
        let _ = write!(
            self.out,
            r#" fill="none" stroke="{}" stroke-width="{}""#,
            stroke.to_hex_rgb(),
            num(width)
        );
        if stroke.a != 255 {
            let _ = write!(self.out, r#" stroke-opacity="{}""#, num(stroke.alpha_f32()));
        }
        self.out.push_str("/>");
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn text(
        &mut self,
        x: f32,
        baseline: f32,
        family: &str,
        size: f32,
        weight: u16,
        fill: Color,
        content: &str,
    ) {
        if fill.is_transparent() {
            return;
        }
        let _ = write!(
            self.out,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{weight}" fill="{}""#,
            num(x),
            num(baseline),
            escape(family),
            num(size),
            fill.to_hex_rgb()
        );
        if fill.a != 255 {
            let _ = write!(self.out, r#" fill-opacity="{}""#, num(fill.alpha_f32()));
        }
        let _ = write!(self.out, r#" xml:space="preserve">{}</text>"#, escape(content));
    }

    fn rect_open(&mut self, r: RectPaint) {
        let _ = write!(
            self.out,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            num(r.x),
            num(r.y),
            num(r.w),
            num(r.h)
        );
        let radius = r.radius.min(r.w * 0.5).min(r.h * 0.5);
        if radius > 0.0 {
            let _ = write!(self.out, r#" rx="{}""#, num(radius));
        }
    }

    pub(crate) fn finish(mut self) -> VectorDocument {
        self.out.push_str("</svg>");
        VectorDocument {
            svg: self.out,
            width: self.width,
            height: self.height,
        }
    }
}

/// Two-decimal formatting with trailing zeros stripped; `-0` prints as `0`.
pub(crate) fn num(v: f32) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    let mut s = format!("{rounded:.2}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_owned();
    }
    s
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/svg.rs"]
mod tests;
