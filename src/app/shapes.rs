//! egui shape surface
//!
//! Collects the frame as `egui::Shape`s. egui rebuilds the screen every
//! update, so the last painted frame is kept and re-submitted until the
//! next background fill starts a new one.

use std::f32::consts::TAU;

use egui::{Color32, Mesh, Pos2, Rect, Shape, Stroke};

use crate::surface::{Nebula, Point, Size, Surface};

/// Segments in the nebula's triangle fan
const NEBULA_SEGMENTS: u32 = 48;

pub struct ShapeSurface {
    host: Rect,
    rect: Rect,
    shapes: Vec<Shape>,
}

impl ShapeSurface {
    pub fn new(host: Rect) -> Self {
        Self {
            host,
            rect: host,
            shapes: Vec::new(),
        }
    }

    /// Record the current screen rect; true if it differs from the drawn one
    pub fn set_host_rect(&mut self, host: Rect) -> bool {
        self.host = host;
        host != self.rect
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn pos(&self, p: Point) -> Pos2 {
        Pos2::new(self.rect.min.x + p.x as f32, self.rect.min.y + p.y as f32)
    }
}

fn white(alpha: f64) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(255, 255, 255, a)
}

impl Surface for ShapeSurface {
    fn size(&self) -> Size {
        Size::new(self.rect.width() as f64, self.rect.height() as f64)
    }

    fn fit_to_host(&mut self) -> Size {
        self.rect = self.host;
        self.size()
    }

    fn fill_background(&mut self, shade: u8) {
        self.shapes.clear();
        self.shapes
            .push(Shape::rect_filled(self.rect, 0.0, Color32::from_gray(shade)));
    }

    // No additive blending in egui: the glow is alpha-blended instead
    fn fill_nebula(&mut self, nebula: &Nebula) {
        if nebula.radius <= 0.0 {
            return;
        }
        let center = self.pos(nebula.center);
        let radius = nebula.radius as f32;

        let mut mesh = Mesh::default();
        mesh.colored_vertex(center, white(nebula.inner_alpha));
        for i in 0..NEBULA_SEGMENTS {
            let angle = i as f32 / NEBULA_SEGMENTS as f32 * TAU;
            let rim = center + egui::vec2(angle.cos(), angle.sin()) * radius;
            mesh.colored_vertex(rim, Color32::TRANSPARENT);
        }
        for i in 0..NEBULA_SEGMENTS {
            mesh.add_triangle(0, 1 + i, 1 + (i + 1) % NEBULA_SEGMENTS);
        }
        self.shapes.push(Shape::mesh(mesh));
    }

    fn stroke_trail(&mut self, from: Point, to: Point, width: f64, alpha: f64) {
        let (a, b) = (self.pos(from), self.pos(to));
        self.shapes
            .push(Shape::line_segment([a, b], Stroke::new(width as f32, white(alpha))));
    }

    fn fill_star(&mut self, center: Point, radius: f64, alpha: f64) {
        let c = self.pos(center);
        self.shapes
            .push(Shape::circle_filled(c, radius as f32, white(alpha)));
    }
}
