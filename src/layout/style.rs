use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{CanvasError, CanvasResult};

/// Font size used when no ancestor sets one.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;
/// Font weight used when no ancestor sets one.
pub const DEFAULT_FONT_WEIGHT: u16 = 400;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Whether a node takes part in layout.
pub enum Display {
    /// Flex container (the only layout model).
    #[default]
    Flex,
    /// Removed from layout and painting.
    None,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Main axis of a flex container.
pub enum FlexDirection {
    /// Children flow left to right.
    #[default]
    Row,
    /// Children flow top to bottom.
    Column,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
/// Distribution of children along the main axis.
pub enum JustifyContent {
    /// Pack at the start.
    #[serde(alias = "start")]
    FlexStart,
    /// Pack around the center.
    Center,
    /// Pack at the end.
    #[serde(alias = "end")]
    FlexEnd,
    /// First and last child on the edges, equal space between.
    SpaceBetween,
    /// Equal space around every child.
    SpaceAround,
    /// Equal space between and around children.
    SpaceEvenly,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
/// Placement of children along the cross axis.
pub enum AlignItems {
    /// Fill the cross axis.
    Stretch,
    /// Align to the cross start.
    #[serde(alias = "start")]
    FlexStart,
    /// Center on the cross axis.
    Center,
    /// Align to the cross end.
    #[serde(alias = "end")]
    FlexEnd,
}

/// Per-edge lengths in pixels.
///
/// Deserializes from a single number (all edges) or an object with any of
/// `top`/`right`/`bottom`/`left` (missing edges are zero).
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq)]
pub struct Edges {
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
    /// Left edge.
    pub left: f32,
}

impl Edges {
    /// Same length on every edge.
    pub const fn all(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// `vertical` on top/bottom, `horizontal` on left/right.
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    fn iter(self) -> [(&'static str, f32); 4] {
        [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ]
    }
}

impl<'de> Deserialize<'de> for Edges {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct PerEdge {
            #[serde(default)]
            top: f32,
            #[serde(default)]
            right: f32,
            #[serde(default)]
            bottom: f32,
            #[serde(default)]
            left: f32,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Uniform(f32),
            PerEdge(PerEdge),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Uniform(v) => Self::all(v),
            Repr::PerEdge(e) => Self {
                top: e.top,
                right: e.right,
                bottom: e.bottom,
                left: e.left,
            },
        })
    }
}

/// Strongly typed style attributes of one element.
///
/// `color`, `font_size` and `font_weight` inherit from the parent when unset; every other
/// attribute applies to the element alone.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Style {
    /// Participation in layout.
    pub display: Display,
    /// Main axis for children.
    pub flex_direction: FlexDirection,
    /// Main-axis distribution; `flex-start` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<JustifyContent>,
    /// Cross-axis placement; `stretch` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<AlignItems>,
    /// Space between children along both axes.
    pub gap: f32,
    /// Inner spacing.
    pub padding: Edges,
    /// Outer spacing.
    pub margin: Edges,
    /// Fixed border-box width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Fixed border-box height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// Share of free main-axis space.
    pub flex_grow: f32,
    /// Shrink factor under overflow; `1` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_shrink: Option<f32>,
    /// Box fill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    /// Text color (inherited).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Text size in pixels (inherited).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// CSS font weight, 100..=900 in steps of 100 (inherited).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    /// Border thickness on every edge.
    pub border_width: f32,
    /// Border color; the border is not painted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    /// Corner radius.
    pub border_radius: f32,
    /// Opacity of the element and its subtree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl Style {
    /// Set [`Style::flex_direction`].
    pub fn direction(mut self, v: FlexDirection) -> Self {
        self.flex_direction = v;
        self
    }

    /// Set [`Style::justify_content`].
    pub fn justify(mut self, v: JustifyContent) -> Self {
        self.justify_content = Some(v);
        self
    }

    /// Set [`Style::align_items`].
    pub fn align(mut self, v: AlignItems) -> Self {
        self.align_items = Some(v);
        self
    }

    /// Set [`Style::gap`].
    pub fn gap(mut self, v: f32) -> Self {
        self.gap = v;
        self
    }

    /// Set [`Style::padding`].
    pub fn padding(mut self, v: Edges) -> Self {
        self.padding = v;
        self
    }

    /// Set [`Style::margin`].
    pub fn margin(mut self, v: Edges) -> Self {
        self.margin = v;
        self
    }

    /// Set [`Style::width`].
    pub fn width(mut self, v: f32) -> Self {
        self.width = Some(v);
        self
    }

    /// Set [`Style::height`].
    pub fn height(mut self, v: f32) -> Self {
        self.height = Some(v);
        self
    }

    /// Set [`Style::background`].
    pub fn background(mut self, v: Color) -> Self {
        self.background = Some(v);
        self
    }

    /// Set [`Style::color`].
    pub fn color(mut self, v: Color) -> Self {
        self.color = Some(v);
        self
    }

    /// Set [`Style::font_size`].
    pub fn font_size(mut self, v: f32) -> Self {
        self.font_size = Some(v);
        self
    }

    /// Set [`Style::font_weight`].
    pub fn font_weight(mut self, v: u16) -> Self {
        self.font_weight = Some(v);
        self
    }

    /// Set a solid border.
    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border_width = width;
        self.border_color = Some(color);
        self
    }

    /// Set [`Style::border_radius`].
    pub fn radius(mut self, v: f32) -> Self {
        self.border_radius = v;
        self
    }

    /// Set [`Style::opacity`].
    pub fn opacity(mut self, v: f32) -> Self {
        self.opacity = Some(v);
        self
    }

    /// Reject values the layout engine cannot resolve.
    pub fn validate(&self) -> CanvasResult<()> {
        fn non_negative(name: &str, v: f32) -> CanvasResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(CanvasError::render(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
            Ok(())
        }

        non_negative("gap", self.gap)?;
        non_negative("flexGrow", self.flex_grow)?;
        non_negative("borderWidth", self.border_width)?;
        non_negative("borderRadius", self.border_radius)?;
        for (edge, v) in self.padding.iter() {
            non_negative(&format!("padding.{edge}"), v)?;
        }
        for (edge, v) in self.margin.iter() {
            if !v.is_finite() {
                return Err(CanvasError::render(format!("margin.{edge} must be finite")));
            }
        }
        if let Some(v) = self.width {
            non_negative("width", v)?;
        }
        if let Some(v) = self.height {
            non_negative("height", v)?;
        }
        if let Some(v) = self.flex_shrink {
            non_negative("flexShrink", v)?;
        }
        if let Some(v) = self.font_size
            && (!v.is_finite() || v <= 0.0)
        {
            return Err(CanvasError::render(format!(
                "fontSize must be finite and > 0 (got {v})"
            )));
        }
        if let Some(w) = self.font_weight
            && (!(100..=900).contains(&w) || w % 100 != 0)
        {
            return Err(CanvasError::render(format!(
                "unsupported fontWeight {w} (expected 100..=900 in steps of 100)"
            )));
        }
        if let Some(v) = self.opacity
            && !(0.0..=1.0).contains(&v)
        {
            return Err(CanvasError::render(format!(
                "opacity must be within 0..=1 (got {v})"
            )));
        }
        Ok(())
    }
}

/// Text attributes after inheritance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Fill color.
    pub color: Color,
    /// Size in pixels.
    pub font_size: f32,
    /// CSS weight.
    pub font_weight: u16,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            font_size: DEFAULT_FONT_SIZE,
            font_weight: DEFAULT_FONT_WEIGHT,
        }
    }
}

impl TextStyle {
    /// Apply the inheritable attributes `style` sets on top of `self`.
    pub fn inherit(self, style: &Style) -> Self {
        Self {
            color: style.color.unwrap_or(self.color),
            font_size: style.font_size.unwrap_or(self.font_size),
            font_weight: style.font_weight.unwrap_or(self.font_weight),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/style.rs"]
mod tests;
