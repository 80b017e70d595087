//! Element tree to vector document: Taffy flexbox layout, Parley text shaping, SVG output.

pub(crate) mod element;
pub(crate) mod engine;
pub(crate) mod style;
pub(crate) mod svg;
pub(crate) mod text;
