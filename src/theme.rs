//! Black & white landing page theme

use egui::Color32;

pub mod colors {
    use super::Color32;

    pub const BG_PRIMARY: Color32 = Color32::from_rgb(0, 0, 0);           // #000000 - deep space
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(12, 12, 12);       // #0C0C0C - button rest

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 255, 255);   // #FFFFFF - headline
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(180, 180, 180); // #B4B4B4 - body copy
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(90, 90, 90);        // #5A5A5A - stats line

    pub const ACCENT: Color32 = Color32::from_rgb(96, 165, 250);          // #60A5FA - tagline blue

    /// Button outline, white at 60%
    pub const BORDER: Color32 = Color32::from_rgba_premultiplied(153, 153, 153, 153);
}

/// Dark visuals with transparent panels so the star field shows through
pub fn minimal_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = Color32::TRANSPARENT;
    visuals.window_fill = BG_PRIMARY;
    visuals.extreme_bg_color = BG_PRIMARY;

    visuals.override_text_color = Some(TEXT_PRIMARY);

    visuals.widgets.inactive.bg_fill = BG_ELEVATED;
    visuals.widgets.inactive.weak_bg_fill = BG_ELEVATED;
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, BORDER);
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);

    // Hover inverts: white fill, black label
    visuals.widgets.hovered.bg_fill = TEXT_PRIMARY;
    visuals.widgets.hovered.weak_bg_fill = TEXT_PRIMARY;
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, BG_PRIMARY);

    visuals.widgets.active.bg_fill = TEXT_SECONDARY;
    visuals.widgets.active.weak_bg_fill = TEXT_SECONDARY;
    visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, BG_PRIMARY);

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
