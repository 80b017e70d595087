//! Ready-made element trees: cards and badges.

/// Badges and badge groups.
pub mod badge;
/// Cards with label/value rows.
pub mod card;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::foundation::error::{CanvasError, CanvasResult};
use crate::layout::element::Element;

use self::badge::{Badge, badge_showcase, default_showcase_badges};
use self::card::Card;

/// Named component the CLI can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component {
    /// [`Card`].
    Card,
    /// A single [`Badge`].
    Badge,
    /// Badge group on a dark panel.
    Badges,
}

impl Component {
    /// Every component, in CLI listing order.
    pub const ALL: [Component; 3] = [Self::Card, Self::Badge, Self::Badges];

    /// Name used on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Badge => "badge",
            Self::Badges => "badges",
        }
    }

    /// Build the element tree from a JSON props object.
    pub fn build(self, props: Value) -> CanvasResult<Element> {
        match self {
            Self::Card => Ok(parse_props::<Card>(self, props)?.element()),
            Self::Badge => Ok(parse_props::<Badge>(self, props)?.element()),
            Self::Badges => {
                let props = parse_props::<ShowcaseProps>(self, props)?;
                let badges = props.badges.unwrap_or_else(default_showcase_badges);
                Ok(badge_showcase(&badges))
            }
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Component {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CanvasError::validation(format!(
                    "unknown component '{s}' (available: card, badge, badges)"
                ))
            })
    }
}

#[derive(Deserialize)]
struct ShowcaseProps {
    #[serde(default)]
    badges: Option<Vec<Badge>>,
}

fn parse_props<T: DeserializeOwned>(component: Component, props: Value) -> CanvasResult<T> {
    serde_json::from_value(props)
        .map_err(|e| CanvasError::validation(format!("invalid {component} props: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/components/component.rs"]
mod tests;
