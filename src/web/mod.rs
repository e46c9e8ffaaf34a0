//! Browser host: Canvas 2D surface, `requestAnimationFrame` scheduling and
//! the `WarpField` component exported to JS

mod canvas;
mod host;
mod raf;

pub use canvas::CanvasSurface;
pub use host::WarpField;
pub use raf::{FrameCallback, RafScheduler};

use web_sys::Window;

/// `prefers-reduced-motion: reduce`, read once at mount
pub fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}
