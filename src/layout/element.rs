use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::error::{CanvasError, CanvasResult};
use crate::layout::style::Style;

/// Node of the declarative UI tree consumed by the render pipeline.
///
/// The set of node kinds is closed: anything a caller wants to draw is composed from boxes,
/// text runs and image placeholders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum Element {
    /// Flex container.
    Box {
        /// Box style.
        #[serde(default)]
        style: Style,
        /// Children in paint order.
        #[serde(default)]
        children: Vec<Element>,
    },
    /// Box holding one run of text.
    Text {
        /// Box and text style.
        #[serde(default)]
        style: Style,
        /// Text content; wraps at word boundaries to the available width.
        content: String,
    },
    /// Sized placeholder for an image. Paints its background (or a neutral fill).
    Image {
        /// Box style; `width` and `height` are required.
        #[serde(default)]
        style: Style,
    },
}

impl Element {
    /// Container with `children`.
    pub fn boxed(style: Style, children: impl IntoIterator<Item = Element>) -> Self {
        Self::Box {
            style,
            children: children.into_iter().collect(),
        }
    }

    /// Text run.
    pub fn text(style: Style, content: impl Into<String>) -> Self {
        Self::Text {
            style,
            content: content.into(),
        }
    }

    /// Image placeholder of a fixed size.
    pub fn image(style: Style, width: f32, height: f32) -> Self {
        Self::Image {
            style: style.width(width).height(height),
        }
    }

    /// Parse the JSON form (`{"type": "box" | "text" | "image", ...}`).
    ///
    /// Trees that do not resolve to these primitives are rejected as render errors.
    pub fn from_json(value: Value) -> CanvasResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| CanvasError::render(format!("unsupported element tree: {e}")))
    }

    /// Style of this node.
    pub fn style(&self) -> &Style {
        match self {
            Self::Box { style, .. } | Self::Text { style, .. } | Self::Image { style } => style,
        }
    }

    /// Children (empty for leaves).
    pub fn children(&self) -> &[Element] {
        match self {
            Self::Box { children, .. } => children,
            Self::Text { .. } | Self::Image { .. } => &[],
        }
    }

    /// `true` when this node or a descendant holds text.
    pub fn contains_text(&self) -> bool {
        match self {
            Self::Text { .. } => true,
            Self::Box { children, .. } => children.iter().any(Self::contains_text),
            Self::Image { .. } => false,
        }
    }

    /// Check every style in the subtree, plus kind-specific requirements.
    pub fn validate(&self) -> CanvasResult<()> {
        self.style().validate()?;
        match self {
            Self::Box { children, .. } => children.iter().try_for_each(Self::validate),
            Self::Text { .. } => Ok(()),
            Self::Image { style } => {
                if style.width.is_none() || style.height.is_none() {
                    return Err(CanvasError::render(
                        "image placeholder needs an explicit width and height",
                    ));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/element.rs"]
mod tests;
