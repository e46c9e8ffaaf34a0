//! Star field simulation and per-frame paint

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::debug;

use super::star::{project, Star};
use crate::config::StarfieldConfig;
use crate::surface::{Nebula, Size, Surface};

/// Depth advance per second at speed 1.0 (60 fps baseline)
const FRAME_RATE_BASELINE: f64 = 60.0;

/// Stars at or below this depth have passed the viewer
const NEAR_PLANE: f64 = 1.0;

/// Number of stars for a surface of `size` at `density`:
/// `min(max, floor(area / 10000 * density * 3))`
pub fn star_count(size: Size, density: f64, max: usize) -> usize {
    let raw = (size.area() / 10_000.0 * density * 3.0).floor();
    if !(raw.is_finite() && raw > 0.0) {
        return 0;
    }
    (raw as usize).min(max)
}

/// Grey level of the background fill for a transition progress
pub fn background_shade(progress: f64) -> u8 {
    let p = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    lerp(0.0, 255.0, p).round() as u8
}

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// The particle set plus the externally driven `speed` and `progress`
pub struct Starfield {
    size: Size,
    density: f64,
    max_stars: usize,
    focal_length: f64,
    max_frame_dt: f64,
    stars: Vec<Star>,
    speed: f64,
    progress: f64,
    rng: SmallRng,
}

impl Starfield {
    /// Create and populate a field. Seeded from `config.seed` when present.
    pub fn new(config: &StarfieldConfig, size: Size) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config, size, rng)
    }

    pub fn with_rng(config: &StarfieldConfig, size: Size, rng: SmallRng) -> Self {
        let mut field = Self {
            size,
            density: config.density,
            max_stars: config.max_stars,
            focal_length: config.focal_length,
            max_frame_dt: config.max_frame_dt,
            stars: Vec::new(),
            speed: 1.0,
            progress: 0.0,
            rng,
        };
        field.populate();
        field
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[cfg(test)]
    pub(crate) fn stars_mut(&mut self) -> &mut [Star] {
        &mut self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Latest value wins; non-finite input is ignored
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() {
            self.speed = speed;
        }
    }

    /// Latest value wins, clamped to `[0, 1]`; non-finite input is ignored
    pub fn set_progress(&mut self, progress: f64) {
        if progress.is_finite() {
            self.progress = progress.clamp(0.0, 1.0);
        }
    }

    /// Adopt new dimensions and throw away all star history
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.populate();
    }

    fn populate(&mut self) {
        let total = star_count(self.size, self.density, self.max_stars);
        let size = self.size;
        let rng = &mut self.rng;
        self.stars = (0..total).map(|_| Star::random(rng, size)).collect();
        debug!(
            stars = total,
            width = size.width,
            height = size.height,
            "Populated star field"
        );
    }

    fn paint_backdrop<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_background(background_shade(self.progress));
        surface.fill_nebula(&Nebula::for_size(self.size));
    }

    /// Advance every star by `dt` seconds and paint the frame.
    ///
    /// `t` is seconds since the loop started and only drives the twinkle.
    pub fn step<S: Surface + ?Sized>(&mut self, dt: f64, t: f64, surface: &mut S) {
        let dt = if dt.is_finite() { dt.clamp(0.0, self.max_frame_dt) } else { 0.0 };
        self.paint_backdrop(surface);

        let size = self.size;
        let center = size.center();
        let k = self.focal_length;
        let advance = if self.speed > 0.0 {
            self.speed * dt * FRAME_RATE_BASELINE
        } else {
            0.0
        };

        let rng = &mut self.rng;
        for star in self.stars.iter_mut() {
            star.z -= advance;
            if star.z <= NEAR_PLANE {
                star.recycle(rng, size);
            }

            let current = project(star.x, star.y, star.z, k, center);
            let previous = project(star.x, star.y, star.previous_depth(), k, center);
            star.pz = star.z;

            if !size.contains(current) {
                continue;
            }

            let tw = star.twinkle(t);
            let px = ((1.0 - star.z / size.width) * 3.2 * (0.3 + 0.7 * tw)).max(0.4);

            surface.stroke_trail(previous, current, px * 0.9, 0.18 + 0.55 * tw);
            surface.fill_star(current, px * 0.55, 0.35 + 0.6 * tw);
        }
    }

    /// One motionless paint for reduced-motion users: fixed brightness, no
    /// trails, no twinkle. Star state is left untouched.
    pub fn paint_static<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.paint_backdrop(surface);

        let size = self.size;
        let center = size.center();
        for star in &self.stars {
            if star.z <= NEAR_PLANE {
                continue;
            }
            let p = project(star.x, star.y, star.z, self.focal_length, center);
            if !size.contains(p) {
                continue;
            }
            let px = ((1.0 - star.z / size.width) * 2.2).max(0.4);
            surface.fill_star(p, px * 0.5, 0.6);
        }
    }
}
