//! Shapepad Application
//!
//! The application shell providing windowing, input routing,
//! and integration of all components.

mod app;
mod event_handler;
mod export;
mod ui;

pub use app::{App, AppConfig};
pub use event_handler::EventHandler;
pub use export::{Exporter, Snapshot, file_stem};
pub use ui::{UiAction, UiState, render_ui};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
