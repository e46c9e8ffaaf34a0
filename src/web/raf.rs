//! `requestAnimationFrame` scheduler

use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::scheduler::FrameScheduler;

/// Refresh callback invoked with the frame timestamp in milliseconds
pub type FrameCallback = Closure<dyn FnMut(f64)>;

/// Schedules one animation frame at a time. The JS closure is retained here
/// for the scheduler's whole life so a pending frame never calls a freed
/// function.
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(?e, "requestAnimationFrame failed");
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            warn!(?e, "cancelAnimationFrame failed");
        }
    }
}
