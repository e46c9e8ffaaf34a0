//! Landing page demo
//!
//! The star field fills the screen behind a hero block. "Try Demo" engages
//! the warp ramp; the hero fades out as speed builds and the sky whites out
//! over the final third of the ramp.

mod header;
mod shapes;

pub use shapes::ShapeSurface;

use eframe::egui;
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::Config;
use crate::renderer::{RenderParams, Renderer};
use crate::scheduler::ManualScheduler;
use crate::theme::{colors, minimal_visuals};
use crate::time::{now_millis, FrameRate};
use crate::warp::WarpTransition;
use crate::web::prefers_reduced_motion;

/// Launch the demo on the `<canvas>` with id `canvas_id`.
/// `config_json` is an optional `Config` document.
#[wasm_bindgen]
pub fn start_demo(canvas_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => Config::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => Config::default(),
    };

    let canvas = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(canvas_id))
        .ok_or_else(|| JsValue::from_str("no canvas element"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("not a canvas element"))?;

    wasm_bindgen_futures::spawn_local(async move {
        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |cc| Ok(Box::new(WarpApp::new(cc, config)))),
            )
            .await;
        if let Err(e) = result {
            error!(?e, "Failed to start eframe");
        }
    });
    Ok(())
}

pub struct WarpApp {
    pub(crate) renderer: Renderer<ShapeSurface, ManualScheduler>,
    warp: WarpTransition,
    pub(crate) fps_counter: FrameRate,
}

impl WarpApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        cc.egui_ctx.set_visuals(minimal_visuals());

        let warp = WarpTransition::new(&config.warp);
        let reduced_motion = web_sys::window()
            .map(|w| prefers_reduced_motion(&w))
            .unwrap_or(false);

        // screen_rect is a placeholder until the first frame; the first
        // update picks up the real one and populates the field
        let surface = ShapeSurface::new(egui::Rect::ZERO);
        let renderer = Renderer::mount(
            surface,
            ManualScheduler::new(),
            &config.starfield,
            RenderParams {
                speed: warp.speed(),
                progress: 0.0,
            },
            reduced_motion,
            now_millis(),
        );
        info!(reduced_motion, "Demo started");

        Self {
            renderer,
            warp,
            fps_counter: FrameRate::default(),
        }
    }

    fn render_hero(&mut self, ui: &mut egui::Ui) {
        let warp_progress = self.warp.warp_progress(self.warp.speed()) as f32;
        // fade out fast once the ramp starts
        let opacity = if self.warp.is_warping() || self.warp.has_arrived() {
            (1.0 - warp_progress * 4.0).max(0.0)
        } else {
            1.0
        };

        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);

            if self.warp.has_arrived() {
                ui.label(egui::RichText::new("Warp complete").size(28.0).strong());
                ui.add_space(16.0);
                if ui.button(egui::RichText::new("Back").size(16.0)).clicked() {
                    self.warp.reset();
                }
                return;
            }

            ui.set_opacity(opacity);
            ui.label(
                egui::RichText::new("Exoplanet Classification")
                    .size(44.0)
                    .strong()
                    .color(colors::TEXT_PRIMARY),
            );
            ui.label(
                egui::RichText::new("Powered by Machine Learning")
                    .size(44.0)
                    .strong()
                    .color(colors::ACCENT),
            );
            ui.add_space(12.0);
            ui.label(
                egui::RichText::new("Classify NASA Kepler exoplanet candidates.")
                    .size(18.0)
                    .color(colors::TEXT_SECONDARY),
            );
            ui.add_space(24.0);

            let label = if self.warp.is_warping() {
                "Engaging Warp Drive..."
            } else {
                "Try Demo  →"
            };
            let button = egui::Button::new(egui::RichText::new(label).size(18.0))
                .min_size(egui::vec2(200.0, 48.0));
            if ui.add_enabled(!self.warp.is_warping(), button).clicked() {
                self.warp.engage(now_millis() / 1000.0);
            }
        });
    }
}

impl eframe::App for WarpApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.renderer.is_reduced_motion() || self.warp.is_warping() {
            ctx.request_repaint();
        }

        if self.renderer.surface_mut().set_host_rect(ctx.screen_rect()) {
            self.renderer.resize();
        }

        let now = now_millis();
        let speed = self.warp.speed_at(now / 1000.0);
        self.renderer.update_speed(speed);
        self.renderer.update_progress(self.warp.background_progress(speed));
        self.renderer.on_frame(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY))
            .show(ctx, |ui| {
                ui.painter()
                    .extend(self.renderer.surface().shapes().iter().cloned());
                self.render_header(ui);
                self.render_hero(ui);
            });
    }
}
