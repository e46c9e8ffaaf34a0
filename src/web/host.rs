//! JS-facing star field component
//!
//! ```js
//! const field = new WarpField("starfield", 2.0, 1.0, 0.0);
//! field.update_speed(120);
//! field.update_progress(0.4);
//! field.teardown(); // on unmount
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::canvas::CanvasSurface;
use super::prefers_reduced_motion;
use super::raf::RafScheduler;
use crate::config::{Config, StarfieldConfig};
use crate::error::{Error, Result};
use crate::renderer::{RenderParams, Renderer};
use crate::time::now_millis;

type CanvasRenderer = Renderer<CanvasSurface, RafScheduler>;

/// Filled once mounting succeeds. Callbacks only hold a `Weak` to it.
type Slot = Rc<RefCell<Option<CanvasRenderer>>>;

/// Animated star field bound to a `<canvas>`.
///
/// If the canvas or its 2d context cannot be acquired the component stays
/// inert: every method is a no-op and nothing is drawn.
#[wasm_bindgen]
pub struct WarpField {
    slot: Slot,
    window: Option<Window>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl WarpField {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        density: Option<f64>,
        speed: Option<f64>,
        progress: Option<f64>,
    ) -> WarpField {
        let mut config = StarfieldConfig::default();
        if let Some(d) = density.filter(|d| d.is_finite() && *d > 0.0) {
            config.density = d;
        }
        let defaults = RenderParams::default();
        let params = RenderParams {
            speed: speed.unwrap_or(defaults.speed),
            progress: progress.unwrap_or(defaults.progress),
        };
        Self::mount_or_inert(canvas_id, &config, params)
    }

    /// Mount with a JSON config (see `Config`). Throws on an invalid config.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(canvas_id: &str, config_json: &str) -> std::result::Result<WarpField, JsValue> {
        let config = Config::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let params = RenderParams {
            speed: config.warp.start_speed,
            progress: 0.0,
        };
        Ok(Self::mount_or_inert(canvas_id, &config.starfield, params))
    }

    pub fn update_speed(&self, speed: f64) {
        if let Some(r) = self.slot.borrow_mut().as_mut() {
            r.update_speed(speed);
        }
    }

    pub fn update_progress(&self, progress: f64) {
        if let Some(r) = self.slot.borrow_mut().as_mut() {
            r.update_progress(progress);
        }
    }

    pub fn resize(&self) {
        if let Some(r) = self.slot.borrow_mut().as_mut() {
            r.resize();
        }
    }

    /// Cancel the animation loop and detach the resize listener
    pub fn teardown(&mut self) {
        if let Some(r) = self.slot.borrow_mut().as_mut() {
            r.teardown();
        }
        if let (Some(window), Some(cb)) = (self.window.as_ref(), self.on_resize.take()) {
            if let Err(e) = window
                .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
            {
                warn!(?e, "Failed to detach resize listener");
            }
        }
    }

    /// Whether an animation frame is scheduled
    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.slot
            .borrow()
            .as_ref()
            .map(|r| r.is_running())
            .unwrap_or(false)
    }

    #[wasm_bindgen(getter)]
    pub fn star_count(&self) -> usize {
        self.slot
            .borrow()
            .as_ref()
            .map(|r| r.field().len())
            .unwrap_or(0)
    }
}

impl WarpField {
    fn inert() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
            window: None,
            on_resize: None,
        }
    }

    fn mount_or_inert(canvas_id: &str, config: &StarfieldConfig, params: RenderParams) -> Self {
        match Self::mount(canvas_id, config, params) {
            Ok(field) => field,
            Err(e) => {
                warn!(error = %e, canvas_id, "Star field disabled");
                Self::inert()
            }
        }
    }

    fn mount(canvas_id: &str, config: &StarfieldConfig, params: RenderParams) -> Result<Self> {
        let window = web_sys::window().ok_or(Error::SurfaceUnavailable("no window"))?;
        let surface = CanvasSurface::from_element_id(&window, canvas_id)?;
        let reduced_motion = prefers_reduced_motion(&window);

        let slot: Slot = Rc::new(RefCell::new(None));

        let weak = Rc::downgrade(&slot);
        let on_frame = Closure::wrap(Box::new(move |now: f64| {
            with_renderer(&weak, |r| {
                r.on_frame(now);
            });
        }) as Box<dyn FnMut(f64)>);

        let scheduler = RafScheduler::new(window.clone(), on_frame);
        let renderer = Renderer::mount(
            surface,
            scheduler,
            config,
            params,
            reduced_motion,
            now_millis(),
        );
        *slot.borrow_mut() = Some(renderer);

        let weak = Rc::downgrade(&slot);
        let on_resize = Closure::wrap(Box::new(move || {
            with_renderer(&weak, |r| r.resize());
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        info!(canvas_id, reduced_motion, "Star field attached");
        Ok(Self {
            slot,
            window: Some(window),
            on_resize: Some(on_resize),
        })
    }
}

impl Drop for WarpField {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn with_renderer(weak: &Weak<RefCell<Option<CanvasRenderer>>>, f: impl FnOnce(&mut CanvasRenderer)) {
    let Some(slot) = weak.upgrade() else {
        return;
    };
    // a JS caller re-entering mid-frame would double borrow; skip that frame
    let Ok(mut guard) = slot.try_borrow_mut() else {
        return;
    };
    if let Some(r) = guard.as_mut() {
        f(r);
    }
}
