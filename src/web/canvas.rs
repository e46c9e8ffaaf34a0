//! Canvas 2D drawing surface

use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::error::{Error, Result};
use crate::surface::{Nebula, Point, Size, Surface};

/// Surface backed by a `<canvas>` sized to the browser window
pub struct CanvasSurface {
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Size,
}

impl CanvasSurface {
    pub fn from_element_id(window: &Window, id: &str) -> Result<Self> {
        let canvas = window
            .document()
            .ok_or(Error::SurfaceUnavailable("no document"))?
            .get_element_by_id(id)
            .ok_or(Error::SurfaceUnavailable("no canvas element"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::SurfaceUnavailable("element is not a canvas"))?;
        Self::from_canvas(window.clone(), canvas)
    }

    pub fn from_canvas(window: Window, canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(Error::SurfaceUnavailable("2d context unsupported"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::SurfaceUnavailable("2d context has unexpected type"))?;
        Ok(Self {
            window,
            canvas,
            ctx,
            size: Size::default(),
        })
    }

    fn window_size(&self) -> Size {
        let read = |v: std::result::Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0)
        };
        Size::new(read(self.window.inner_width()), read(self.window.inner_height()))
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn fit_to_host(&mut self) -> Size {
        let host = self.window_size();
        let (w, h) = (host.width as u32, host.height as u32);
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.size = Size::new(w as f64, h as f64);
        self.size
    }

    fn fill_background(&mut self, shade: u8) {
        self.ctx
            .set_fill_style_str(&format!("rgb({}, {}, {})", shade, shade, shade));
        self.ctx.fill_rect(0.0, 0.0, self.size.width, self.size.height);
    }

    fn fill_nebula(&mut self, nebula: &Nebula) {
        let Point { x, y } = nebula.center;
        // a zero-width surface gives a zero radius, which the canvas rejects
        let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, nebula.radius) else {
            return;
        };
        let _ = gradient.add_color_stop(0.0, &format!("rgba(255,255,255,{})", nebula.inner_alpha));
        let _ = gradient.add_color_stop(1.0, "rgba(0,0,0,0)");

        let _ = self.ctx.set_global_composite_operation("lighter");
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, self.size.width, self.size.height);
        let _ = self.ctx.set_global_composite_operation("source-over");
    }

    fn stroke_trail(&mut self, from: Point, to: Point, width: f64, alpha: f64) {
        self.ctx
            .set_stroke_style_str(&format!("rgba(255,255,255,{})", alpha));
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }

    fn fill_star(&mut self, center: Point, radius: f64, alpha: f64) {
        self.ctx
            .set_fill_style_str(&format!("rgba(255,255,255,{})", alpha));
        self.ctx.begin_path();
        let _ = self.ctx.arc(center.x, center.y, radius, 0.0, TAU);
        self.ctx.fill();
    }
}
