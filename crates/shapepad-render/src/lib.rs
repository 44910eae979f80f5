//! Shapepad Render Library
//!
//! Renderer abstraction and implementations for shapepad.
//! The app window uses Vello; the markup and raster renderers need no GPU.

mod markup;
mod raster;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use markup::MarkupRenderer;
pub use raster::{RasterRenderer, encode_png};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
