//! Stats line with frame rate, star count and current warp speed

use eframe::egui;
use crate::theme::colors;
use crate::time::now_millis;
use super::WarpApp;

impl WarpApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        self.fps_counter.tick(now_millis());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            let stats = format!(
                "{:.0} fps / {} stars / speed {:.1}",
                self.fps_counter.fps(),
                self.renderer.field().len(),
                self.renderer.field().speed(),
            );
            ui.label(egui::RichText::new(stats).color(colors::TEXT_MUTED).small());
        });
    }
}
