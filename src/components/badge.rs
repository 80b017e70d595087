use serde::Deserialize;

use crate::foundation::color::Color;
use crate::layout::element::Element;
use crate::layout::style::{AlignItems, Edges, FlexDirection, JustifyContent, Style};

/// Gap between badges in a group unless told otherwise.
pub const DEFAULT_BADGE_GAP: f32 = 8.0;

/// Badge color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    /// Neutral dark gray.
    #[default]
    Default,
    /// Green.
    Success,
    /// Amber.
    Warning,
    /// Red.
    Error,
    /// Blue.
    Info,
    /// Unfilled with a gray border.
    Outline,
}

impl BadgeVariant {
    /// `(background, text, border)`.
    fn colors(self) -> (Color, Color, Option<Color>) {
        match self {
            Self::Default => (Color::rgb(0x27, 0x27, 0x2a), Color::rgb(0xfa, 0xfa, 0xfa), None),
            Self::Success => (Color::rgb(0x16, 0x65, 0x34), Color::rgb(0xbb, 0xf7, 0xd0), None),
            Self::Warning => (Color::rgb(0x85, 0x4d, 0x0e), Color::rgb(0xfe, 0xf0, 0x8a), None),
            Self::Error => (Color::rgb(0x99, 0x1b, 0x1b), Color::rgb(0xfe, 0xca, 0xca), None),
            Self::Info => (Color::rgb(0x1e, 0x40, 0xaf), Color::rgb(0xbf, 0xdb, 0xfe), None),
            Self::Outline => (
                Color::TRANSPARENT,
                Color::rgb(0xa1, 0xa1, 0xaa),
                Some(Color::rgb(0x3f, 0x3f, 0x46)),
            ),
        }
    }
}

/// Badge size step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeSize {
    /// 11px text.
    Sm,
    /// 12px text.
    #[default]
    Md,
    /// 14px text.
    Lg,
}

impl BadgeSize {
    /// `(font_size, padding_x, padding_y, radius)`.
    fn metrics(self) -> (f32, f32, f32, f32) {
        match self {
            Self::Sm => (11.0, 6.0, 2.0, 4.0),
            Self::Md => (12.0, 10.0, 4.0, 6.0),
            Self::Lg => (14.0, 12.0, 6.0, 8.0),
        }
    }
}

/// Small rounded label.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Badge {
    /// Label text.
    #[serde(alias = "children")]
    pub text: String,
    /// Color scheme.
    #[serde(default)]
    pub variant: BadgeVariant,
    /// Size step.
    #[serde(default)]
    pub size: BadgeSize,
}

impl Badge {
    /// Medium badge with `text`.
    pub fn new(text: impl Into<String>, variant: BadgeVariant) -> Self {
        Self {
            text: text.into(),
            variant,
            size: BadgeSize::default(),
        }
    }

    /// Set the size step.
    pub fn size(mut self, size: BadgeSize) -> Self {
        self.size = size;
        self
    }

    /// Element tree for this badge.
    pub fn element(&self) -> Element {
        let (bg, fg, border) = self.variant.colors();
        let (font_size, px, py, radius) = self.size.metrics();
        let mut style = Style::default()
            .align(AlignItems::Center)
            .justify(JustifyContent::Center)
            .background(bg)
            .color(fg)
            .font_size(font_size)
            .font_weight(500)
            .padding(Edges::symmetric(py, px))
            .radius(radius);
        if let Some(border) = border {
            style = style.border(1.0, border);
        }
        Element::boxed(style, [Element::text(Style::default(), self.text.clone())])
    }
}

/// Badges laid out in a row.
pub fn badge_group<'a>(badges: impl IntoIterator<Item = &'a Badge>, gap: f32) -> Element {
    Element::boxed(
        Style::default().direction(FlexDirection::Row).gap(gap),
        badges.into_iter().map(Badge::element),
    )
}

/// Badges shown when a showcase is requested without any.
pub fn default_showcase_badges() -> Vec<Badge> {
    vec![
        Badge::new("Success", BadgeVariant::Success),
        Badge::new("Warning", BadgeVariant::Warning),
        Badge::new("Error", BadgeVariant::Error),
    ]
}

/// A badge group on a dark padded panel.
pub fn badge_showcase(badges: &[Badge]) -> Element {
    Element::boxed(
        Style::default()
            .padding(Edges::all(24.0))
            .background(Color::rgb(0x1a, 0x1a, 0x1a))
            .gap(DEFAULT_BADGE_GAP),
        [badge_group(badges, DEFAULT_BADGE_GAP)],
    )
}

#[cfg(test)]
#[path = "../../tests/unit/components/badge.rs"]
mod tests;
