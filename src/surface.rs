//! Drawing surface abstraction
//!
//! The star field only ever paints four things: a grey background, the
//! nebula glow, a white trail segment and a white disc. Hosts implement
//! `Surface` over whatever they draw with (Canvas 2D, egui shapes, or the
//! in-memory `RecordingSurface` used by tests and the CLI).

/// Surface dimensions in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a point lies on the visible surface (edges inclusive)
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Screen-space point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Soft radial glow painted over the background with additive blending.
/// White at `inner_alpha` in the centre, fully transparent at `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nebula {
    pub center: Point,
    pub radius: f64,
    pub inner_alpha: f64,
}

impl Nebula {
    pub const INNER_ALPHA: f64 = 0.06;

    /// The fixed glow placement for a surface of the given size
    pub fn for_size(size: Size) -> Self {
        let c = size.center();
        Self {
            center: Point::new(c.x * 0.4, c.y * 0.6),
            radius: size.width * 0.9,
            inner_alpha: Self::INNER_ALPHA,
        }
    }
}

pub trait Surface {
    /// Current drawing size
    fn size(&self) -> Size;

    /// Re-read the host dimensions and resize the backing store
    fn fit_to_host(&mut self) -> Size {
        self.size()
    }

    /// Fill the whole surface with `rgb(shade, shade, shade)`
    fn fill_background(&mut self, shade: u8);

    fn fill_nebula(&mut self, nebula: &Nebula);

    /// White motion streak from the previous to the current projected point
    fn stroke_trail(&mut self, from: Point, to: Point, width: f64, alpha: f64);

    /// White filled disc
    fn fill_star(&mut self, center: Point, radius: f64, alpha: f64);
}

/// A single recorded draw call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Background(u8),
    Nebula(Nebula),
    Trail { from: Point, to: Point, width: f64, alpha: f64 },
    Star { center: Point, radius: f64, alpha: f64 },
}

/// In-memory surface that records every draw call
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Size,
    host_size: Size,
    ops: Vec<DrawOp>,
    mutations: u64,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            host_size: size,
            ops: Vec::new(),
            mutations: 0,
        }
    }

    /// Simulate the host container changing size; picked up by `fit_to_host`
    pub fn set_host_size(&mut self, size: Size) {
        self.host_size = size;
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drain recorded ops, keeping the mutation counter
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Total draw calls since creation
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    /// Number of background fills since creation, i.e. paints
    pub fn paints(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Background(_)))
            .count()
    }

    fn record(&mut self, op: DrawOp) {
        self.mutations += 1;
        self.ops.push(op);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn fit_to_host(&mut self) -> Size {
        self.size = self.host_size;
        self.size
    }

    fn fill_background(&mut self, shade: u8) {
        self.record(DrawOp::Background(shade));
    }

    fn fill_nebula(&mut self, nebula: &Nebula) {
        self.record(DrawOp::Nebula(*nebula));
    }

    fn stroke_trail(&mut self, from: Point, to: Point, width: f64, alpha: f64) {
        self.record(DrawOp::Trail { from, to, width, alpha });
    }

    fn fill_star(&mut self, center: Point, radius: f64, alpha: f64) {
        self.record(DrawOp::Star { center, radius, alpha });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_edge_inclusive() {
        let size = Size::new(100.0, 50.0);
        assert!(size.contains(Point::new(0.0, 0.0)));
        assert!(size.contains(Point::new(100.0, 50.0)));
        assert!(!size.contains(Point::new(100.1, 10.0)));
        assert!(!size.contains(Point::new(10.0, -0.1)));
        assert!(!size.contains(Point::new(f64::INFINITY, 10.0)));
        assert!(!size.contains(Point::new(f64::NAN, 10.0)));
    }

    #[test]
    fn nebula_sits_upper_left_of_center() {
        let nebula = Nebula::for_size(Size::new(1000.0, 800.0));
        assert_eq!(nebula.center, Point::new(200.0, 240.0));
        assert_eq!(nebula.radius, 900.0);
        assert_eq!(nebula.inner_alpha, 0.06);
    }

    #[test]
    fn recording_surface_counts_mutations_across_drains() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        surface.fill_background(0);
        surface.fill_star(Point::new(1.0, 1.0), 0.5, 0.9);
        assert_eq!(surface.take_ops().len(), 2);
        surface.fill_background(3);
        assert_eq!(surface.ops().len(), 1);
        assert_eq!(surface.mutations(), 3);
    }

    #[test]
    fn fit_to_host_adopts_host_size() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        surface.set_host_size(Size::new(20.0, 5.0));
        assert_eq!(surface.size(), Size::new(10.0, 10.0));
        assert_eq!(surface.fit_to_host(), Size::new(20.0, 5.0));
        assert_eq!(surface.size(), Size::new(20.0, 5.0));
    }
}
