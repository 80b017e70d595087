use taffy::prelude::{AvailableSpace, NodeId, Rect, Size};
use taffy::style::{Dimension, LengthPercentage, LengthPercentageAuto};

use crate::foundation::color::Color;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::layout::element::Element;
use crate::layout::style::{
    AlignItems, Display, FlexDirection, JustifyContent, Style, TextStyle,
};
use crate::layout::svg::{RectPaint, SvgWriter, VectorDocument};
use crate::layout::text::TextLayoutEngine;
use crate::render::font::FontAsset;

/// Fill for image placeholders without a background.
const PLACEHOLDER_FILL: Color = Color::rgb(0xd4, 0xd4, 0xd8);

#[derive(Debug, Clone, Copy)]
struct LayoutNodeCtx {
    node: usize,
}

/// Flattened element with its resolved inherited attributes.
struct FlatNode<'a> {
    element: &'a Element,
    text: TextStyle,
    taffy: NodeId,
    children: Vec<usize>,
}

/// Turns an element tree into a vector document: flexbox box layout through Taffy, text
/// measurement and line breaking through Parley, then SVG emission.
///
/// Identical trees, sizes and font bytes produce byte-identical documents.
pub struct LayoutEngine<'f> {
    font: &'f FontAsset,
}

impl<'f> LayoutEngine<'f> {
    /// Engine shaping text with `font`.
    pub fn new(font: &'f FontAsset) -> Self {
        Self { font }
    }

    /// Lay out `root` on a `width x height` canvas.
    #[tracing::instrument(skip(self, root))]
    pub fn layout(&self, root: &Element, width: u32, height: u32) -> CanvasResult<VectorDocument> {
        if width == 0 || height == 0 {
            return Err(CanvasError::validation("canvas width/height must be > 0"));
        }
        root.validate()?;

        let mut text_engine = if root.contains_text() {
            Some(TextLayoutEngine::new(self.font)?)
        } else {
            None
        };

        let mut taffy = taffy::TaffyTree::<LayoutNodeCtx>::new();
        let mut nodes = Vec::<FlatNode<'_>>::new();
        let child = build_subtree(&mut taffy, &mut nodes, root, TextStyle::default())
            .map_err(taffy_err)?;

        let canvas_style = taffy::style::Style {
            display: taffy::style::Display::Flex,
            size: Size {
                width: Dimension::length(width as f32),
                height: Dimension::length(height as f32),
            },
            ..taffy::style::Style::default()
        };
        let children: Vec<NodeId> = child.into_iter().map(|i| nodes[i].taffy).collect();
        let canvas = taffy
            .new_with_children(canvas_style, &children)
            .map_err(taffy_err)?;

        let available = Size {
            width: AvailableSpace::Definite(width as f32),
            height: AvailableSpace::Definite(height as f32),
        };
        taffy
            .compute_layout_with_measure(
                canvas,
                available,
                |known_dimensions, available_space, _node_id, node_context, _style| {
                    let (Some(ctx), Some(engine)) = (node_context, text_engine.as_mut()) else {
                        return known_dimensions.unwrap_or(Size::ZERO);
                    };
                    let node = &nodes[ctx.node];
                    let Element::Text { content, .. } = node.element else {
                        return known_dimensions.unwrap_or(Size::ZERO);
                    };
                    if let Size {
                        width: Some(w),
                        height: Some(h),
                    } = known_dimensions
                    {
                        return Size {
                            width: w,
                            height: h,
                        };
                    }
                    let max_width = known_dimensions.width.or(match available_space.width {
                        AvailableSpace::Definite(w) => Some(w),
                        AvailableSpace::MinContent => Some(0.0),
                        AvailableSpace::MaxContent => None,
                    });
                    let (w, h) = engine.measure(content, &node.text, max_width);
                    Size {
                        width: known_dimensions.width.unwrap_or(w),
                        height: known_dimensions.height.unwrap_or(h),
                    }
                },
            )
            .map_err(taffy_err)?;

        let mut painter = Painter {
            svg: SvgWriter::new(width, height),
            taffy: &taffy,
            nodes: &nodes,
            text: text_engine.as_mut(),
            family: self.font.family(),
        };
        if let Some(root_idx) = child {
            painter.paint(root_idx, 0.0, 0.0)?;
        }
        Ok(painter.svg.finish())
    }
}

fn build_subtree<'a>(
    taffy: &mut taffy::TaffyTree<LayoutNodeCtx>,
    nodes: &mut Vec<FlatNode<'a>>,
    element: &'a Element,
    inherited: TextStyle,
) -> Result<Option<usize>, taffy::TaffyError> {
    let style = element.style();
    if style.display == Display::None {
        return Ok(None);
    }
    let text = inherited.inherit(style);

    let mut children = Vec::new();
    for child in element.children() {
        if let Some(idx) = build_subtree(taffy, nodes, child, text)? {
            children.push(idx);
        }
    }

    let idx = nodes.len();
    let taffy_style = to_taffy_style(style);
    let taffy_id = match element {
        Element::Text { .. } => {
            taffy.new_leaf_with_context(taffy_style, LayoutNodeCtx { node: idx })?
        }
        Element::Image { .. } => taffy.new_leaf(taffy_style)?,
        Element::Box { .. } => {
            let ids: Vec<NodeId> = children.iter().map(|&c| nodes[c].taffy).collect();
            taffy.new_with_children(taffy_style, &ids)?
        }
    };
    nodes.push(FlatNode {
        element,
        text,
        taffy: taffy_id,
        children,
    });
    Ok(Some(idx))
}

fn to_taffy_style(style: &Style) -> taffy::style::Style {
    let flex_direction = match style.flex_direction {
        FlexDirection::Row => taffy::style::FlexDirection::Row,
        FlexDirection::Column => taffy::style::FlexDirection::Column,
    };
    let justify_content = style.justify_content.map(|j| match j {
        JustifyContent::FlexStart => taffy::style::JustifyContent::FlexStart,
        JustifyContent::Center => taffy::style::JustifyContent::Center,
        JustifyContent::FlexEnd => taffy::style::JustifyContent::FlexEnd,
        JustifyContent::SpaceBetween => taffy::style::JustifyContent::SpaceBetween,
        JustifyContent::SpaceAround => taffy::style::JustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly => taffy::style::JustifyContent::SpaceEvenly,
    });
    let align_items = style.align_items.map(|a| match a {
        AlignItems::Stretch => taffy::style::AlignItems::Stretch,
        AlignItems::FlexStart => taffy::style::AlignItems::FlexStart,
        AlignItems::Center => taffy::style::AlignItems::Center,
        AlignItems::FlexEnd => taffy::style::AlignItems::FlexEnd,
    });
    let dim = |v: Option<f32>| v.map_or(Dimension::auto(), Dimension::length);

    taffy::style::Style {
        display: taffy::style::Display::Flex,
        flex_direction,
        justify_content,
        align_items,
        gap: Size {
            width: LengthPercentage::length(style.gap),
            height: LengthPercentage::length(style.gap),
        },
        padding: Rect {
            left: LengthPercentage::length(style.padding.left),
            right: LengthPercentage::length(style.padding.right),
            top: LengthPercentage::length(style.padding.top),
            bottom: LengthPercentage::length(style.padding.bottom),
        },
        margin: Rect {
            left: LengthPercentageAuto::length(style.margin.left),
            right: LengthPercentageAuto::length(style.margin.right),
            top: LengthPercentageAuto::length(style.margin.top),
            bottom: LengthPercentageAuto::length(style.margin.bottom),
        },
        border: Rect {
            left: LengthPercentage::length(style.border_width),
            right: LengthPercentage::length(style.border_width),
            top: LengthPercentage::length(style.border_width),
            bottom: LengthPercentage::length(style.border_width),
        },
        size: Size {
            width: dim(style.width),
            height: dim(style.height),
        },
        flex_grow: style.flex_grow,
        flex_shrink: style.flex_shrink.unwrap_or(1.0),
        ..taffy::style::Style::default()
    }
}

fn taffy_err(e: taffy::TaffyError) -> CanvasError {
    CanvasError::render(format!("layout failed: {e}"))
}

struct Painter<'a, 'n> {
    svg: SvgWriter,
    taffy: &'a taffy::TaffyTree<LayoutNodeCtx>,
    nodes: &'a [FlatNode<'n>],
    text: Option<&'a mut TextLayoutEngine>,
    family: &'a str,
}

impl Painter<'_, '_> {
    /// Paint node `idx` whose parent border box starts at `(ox, oy)`.
    fn paint(&mut self, idx: usize, ox: f32, oy: f32) -> CanvasResult<()> {
        let nodes = self.nodes;
        let node = &nodes[idx];
        let layout = self.taffy.layout(node.taffy).map_err(taffy_err)?;
        let x = ox + layout.location.x;
        let y = oy + layout.location.y;
        let (w, h) = (layout.size.width, layout.size.height);
        let style = node.element.style();

        let opacity = style.opacity.filter(|o| *o < 1.0);
        if let Some(o) = opacity {
            self.svg.open_group(o);
        }

        let rect = RectPaint {
            x,
            y,
            w,
            h,
            radius: style.border_radius,
        };
        match (node.element, style.background) {
            (_, Some(bg)) => self.svg.fill_rect(rect, bg),
            (Element::Image { .. }, None) => self.svg.fill_rect(rect, PLACEHOLDER_FILL),
            _ => {}
        }
        if let Some(border) = style.border_color {
            self.svg.stroke_rect(rect, style.border_width, border);
        }

        if let Element::Text { content, .. } = node.element {
            let inset_x = style.border_width + style.padding.left;
            let inset_y = style.border_width + style.padding.top;
            let content_w =
                (w - inset_x - style.border_width - style.padding.right).max(0.0);
            let engine = self.text.as_deref_mut().ok_or_else(|| {
                CanvasError::render("text node laid out without a text engine")
            })?;
            for line in engine.shape_lines(content, &node.text, content_w) {
                self.svg.text(
                    x + inset_x,
                    y + inset_y + line.baseline,
                    self.family,
                    node.text.font_size,
                    node.text.font_weight,
                    node.text.color,
                    &line.text,
                );
            }
        }

        for &child in &node.children {
            self.paint(child, x, y)?;
        }

        if opacity.is_some() {
            self.svg.close_group();
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
