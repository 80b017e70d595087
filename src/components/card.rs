use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::foundation::color::Color;
use crate::layout::element::Element;
use crate::layout::style::{AlignItems, Edges, FlexDirection, JustifyContent, Style};

/// Default card padding in pixels.
pub const DEFAULT_CARD_PADDING: f32 = 24.0;

/// Card color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardVariant {
    /// Dark gray panel.
    #[default]
    Default,
    /// Near-black panel.
    Dark,
    /// White panel with dark text.
    Light,
}

struct CardPalette {
    bg: Color,
    border: Color,
    text: Color,
    muted: Color,
}

impl CardVariant {
    fn palette(self) -> CardPalette {
        match self {
            Self::Default => CardPalette {
                bg: Color::rgb(0x1a, 0x1a, 0x1a),
                border: Color::rgb(0x33, 0x33, 0x33),
                text: Color::WHITE,
                muted: Color::rgb(0xa0, 0xa0, 0xa0),
            },
            Self::Dark => CardPalette {
                bg: Color::rgb(0x0a, 0x0a, 0x0a),
                border: Color::rgb(0x22, 0x22, 0x22),
                text: Color::WHITE,
                muted: Color::rgb(0x88, 0x88, 0x88),
            },
            Self::Light => CardPalette {
                bg: Color::WHITE,
                border: Color::rgb(0xe5, 0xe5, 0xe5),
                text: Color::rgb(0x0a, 0x0a, 0x0a),
                muted: Color::rgb(0x66, 0x66, 0x66),
            },
        }
    }
}

/// Label/value line inside a card.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CardRow {
    /// Left-hand, muted text.
    pub label: String,
    /// Strings and numbers are both accepted.
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
}

impl CardRow {
    /// Row showing `label` and `value`.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Titled panel with an optional description and label/value rows.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Card {
    /// Large heading.
    pub title: Option<String>,
    /// Muted line under the title.
    pub description: Option<String>,
    /// Color scheme.
    pub variant: CardVariant,
    /// Fixed width; sized to content when `None`.
    pub width: Option<f32>,
    /// Inner padding on all sides.
    pub padding: f32,
    /// Label/value rows under the header.
    pub rows: Vec<CardRow>,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            variant: CardVariant::Default,
            width: None,
            padding: DEFAULT_CARD_PADDING,
            rows: Vec::new(),
        }
    }
}

impl Card {
    /// Card with a title and default styling.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn description(mut self, v: impl Into<String>) -> Self {
        self.description = Some(v.into());
        self
    }

    /// Set the color scheme.
    pub fn variant(mut self, v: CardVariant) -> Self {
        self.variant = v;
        self
    }

    /// Append a row.
    pub fn row(mut self, row: CardRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Element tree for this card.
    pub fn element(&self) -> Element {
        let palette = self.variant.palette();
        let mut container = Style::default()
            .direction(FlexDirection::Column)
            .padding(Edges::all(self.padding))
            .radius(12.0)
            .background(palette.bg)
            .border(1.0, palette.border)
            .color(palette.text);
        if let Some(w) = self.width {
            container = container.width(w);
        }

        let mut children = Vec::new();
        if let Some(title) = &self.title {
            let gap_below = if self.description.is_some() { 8.0 } else { 16.0 };
            children.push(Element::text(
                Style::default()
                    .font_size(24.0)
                    .font_weight(600)
                    .color(palette.text)
                    .margin(Edges {
                        bottom: gap_below,
                        ..Edges::default()
                    }),
                title.clone(),
            ));
        }
        if let Some(description) = &self.description {
            children.push(Element::text(
                Style::default()
                    .font_size(14.0)
                    .color(palette.muted)
                    .margin(Edges {
                        bottom: 16.0,
                        ..Edges::default()
                    }),
                description.clone(),
            ));
        }
        if !self.rows.is_empty() {
            children.push(Element::boxed(
                Style::default().direction(FlexDirection::Column).gap(8.0),
                self.rows.iter().map(|row| row_element(row, &palette)),
            ));
        }
        Element::boxed(container, children)
    }
}

fn row_element(row: &CardRow, palette: &CardPalette) -> Element {
    Element::boxed(
        Style::default()
            .justify(JustifyContent::SpaceBetween)
            .align(AlignItems::Center),
        [
            Element::text(
                Style::default().color(palette.muted).font_size(14.0),
                row.label.clone(),
            ),
            Element::text(
                Style::default()
                    .color(palette.text)
                    .font_size(14.0)
                    .font_weight(500),
                row.value.clone(),
            ),
        ],
    )
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/components/card.rs"]
mod tests;
