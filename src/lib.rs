//! Warp Field - perspective star field with a warp-drive transition
//!
//! The core (star simulation, renderer lifecycle, frame scheduling seam,
//! warp ramp) is platform-agnostic. With `--features wasm` on wasm32 it is
//! hosted in the browser:
//! - `WarpField`: raw Canvas 2D component driven by `requestAnimationFrame`
//! - `start_demo`: egui landing page with the star field as background

pub mod config;
pub mod error;
pub mod renderer;
pub mod scheduler;
pub mod starfield;
pub mod surface;
pub mod time;
pub mod warp;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod app;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod theme;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod web;

pub use config::{Config, StarfieldConfig, WarpConfig};
pub use error::{Error, Result};
pub use renderer::{RenderParams, Renderer};
pub use scheduler::{FrameScheduler, ManualScheduler};
pub use starfield::{background_shade, star_count, Star, Starfield};
pub use surface::{DrawOp, Nebula, Point, RecordingSurface, Size, Surface};
pub use warp::{WarpPhase, WarpTransition};

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use app::{start_demo, WarpApp};
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use web::WarpField;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();
}
