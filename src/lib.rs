//! termcanvas: control plane for long-running terminal canvases, plus a render pipeline that
//! turns declarative box/text trees into SVG or PNG.
//!
//! - [`CanvasClient`] sends updates to a canvas and fetches its selection or content over a
//!   per-canvas unix socket; [`CanvasServer`] is the matching canvas-side endpoint.
//! - [`RenderPipeline`] lays out an [`Element`] tree with the cached font and encodes it.
//! - [`components`] builds ready-made cards and badges.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod layout;

/// Ready-made cards and badges.
pub mod components;
/// Canvas control protocol.
#[cfg(unix)]
pub mod ipc;
/// Font cache, rasterizer and render pipeline.
pub mod render;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{CanvasId, OutputFormat};
pub use crate::foundation::error::{CanvasError, CanvasResult};

pub use crate::layout::element::Element;
pub use crate::layout::engine::LayoutEngine;
pub use crate::layout::style::{
    AlignItems, DEFAULT_FONT_SIZE, DEFAULT_FONT_WEIGHT, Display, Edges, FlexDirection,
    JustifyContent, Style, TextStyle,
};
pub use crate::layout::svg::VectorDocument;

pub use crate::components::Component;
pub use crate::components::badge::{Badge, BadgeSize, BadgeVariant, badge_group};
pub use crate::components::card::{Card, CardRow, CardVariant};

#[cfg(unix)]
pub use crate::ipc::address::{DEFAULT_SOCKET_DIR, SocketAddress, SocketResolver, resolve};
#[cfg(unix)]
pub use crate::ipc::client::{CanvasClient, ClientOpts, DEFAULT_TIMEOUT};
#[cfg(unix)]
pub use crate::ipc::protocol::{Command, Reply, ReplyKind};
#[cfg(unix)]
pub use crate::ipc::server::{CanvasHandler, CanvasServer};

pub use crate::render::font::{FontAsset, FontCache, FontSource, get_font};
pub use crate::render::pipeline::{RenderPipeline, RenderRequest, render_to_bytes, render_to_file};
pub use crate::render::raster::{Rasterizer, ResvgRasterizer};
