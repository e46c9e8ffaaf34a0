//! Single star in the simulated 3D field and the perspective projection

use rand::Rng;
use std::f64::consts::TAU;

use crate::surface::{Point, Size};

/// One point of light.
///
/// `x`/`y` are lateral offsets around the viewport centre, `z` is the depth
/// in front of the viewer. `pz` holds last frame's depth so the trail can be
/// drawn from where the star was to where it is now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub pz: f64,
    /// Twinkle phase in radians, decorrelates neighbouring stars
    pub twinkle_offset: f64,
}

impl Star {
    /// A fresh star anywhere in the signed viewport range, depth in `[0, width)`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, size: Size) -> Self {
        Self {
            x: signed(rng, size.width),
            y: signed(rng, size.height),
            z: rng.gen::<f64>() * size.width,
            pz: 0.0,
            twinkle_offset: rng.gen::<f64>() * TAU,
        }
    }

    /// Send a star that passed the viewer back to the far plane. On a
    /// surface at most one unit wide the far plane is already at or behind
    /// the near plane, so the star lands on `z = width` and is recycled
    /// again every tick.
    pub fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R, size: Size) {
        self.x = signed(rng, size.width);
        self.y = signed(rng, size.height);
        self.z = size.width;
        self.pz = self.z;
        self.twinkle_offset = rng.gen::<f64>() * TAU;
    }

    /// Depth the trail starts from. A star that has never been stepped has
    /// no history, so its trail collapses onto the current point.
    pub fn previous_depth(&self) -> f64 {
        if self.pz > 0.0 {
            self.pz
        } else {
            self.z
        }
    }

    /// Brightness oscillation in `[0, 1]` at `t` seconds
    pub fn twinkle(&self, t: f64) -> f64 {
        0.5 + 0.5 * (2.0 * t + self.twinkle_offset).sin()
    }
}

fn signed<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> f64 {
    (rng.gen::<f64>() * 2.0 - 1.0) * extent
}

/// Project a lateral offset at `depth` onto the screen
pub fn project(x: f64, y: f64, depth: f64, focal_length: f64, center: Point) -> Point {
    Point::new(
        (x / depth) * focal_length + center.x,
        (y / depth) * focal_length + center.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn random_stars_stay_in_signed_range() {
        let mut rng = SmallRng::seed_from_u64(1);
        let size = Size::new(640.0, 480.0);
        for _ in 0..1000 {
            let s = Star::random(&mut rng, size);
            assert!(s.x.abs() <= 640.0);
            assert!(s.y.abs() <= 480.0);
            assert!((0.0..640.0).contains(&s.z));
            assert!((0.0..TAU).contains(&s.twinkle_offset));
            assert_eq!(s.pz, 0.0);
        }
    }

    #[test]
    fn narrow_surface_recycles_onto_its_width() {
        let mut rng = SmallRng::seed_from_u64(3);
        let size = Size::new(1.0, 40_000.0);
        let mut s = Star::random(&mut rng, size);
        for _ in 0..3 {
            s.recycle(&mut rng, size);
            assert_eq!(s.z, 1.0);
            assert_eq!(s.pz, 1.0);
        }
    }

    #[test]
    fn recycle_resets_to_far_plane() {
        let mut rng = SmallRng::seed_from_u64(2);
        let size = Size::new(300.0, 200.0);
        let mut s = Star::random(&mut rng, size);
        s.z = 0.5;
        s.recycle(&mut rng, size);
        assert_eq!(s.z, 300.0);
        assert_eq!(s.pz, 300.0);
        assert!(s.x.abs() <= 300.0 && s.y.abs() <= 200.0);
    }

    #[test]
    fn previous_depth_falls_back_to_current() {
        let s = Star { x: 1.0, y: 1.0, z: 40.0, pz: 0.0, twinkle_offset: 0.0 };
        assert_eq!(s.previous_depth(), 40.0);
        let s = Star { pz: 42.0, ..s };
        assert_eq!(s.previous_depth(), 42.0);
    }

    #[test]
    fn twinkle_is_unit_range() {
        let s = Star { x: 0.0, y: 0.0, z: 1.0, pz: 0.0, twinkle_offset: 1.3 };
        for i in 0..200 {
            let tw = s.twinkle(i as f64 * 0.037);
            assert!((0.0..=1.0).contains(&tw));
        }
    }

    #[test]
    fn projection_scales_by_focal_over_depth() {
        let center = Point::new(400.0, 300.0);
        assert_eq!(project(0.0, 0.0, 10.0, 200.0, center), center);
        let p = project(100.0, -50.0, 200.0, 200.0, center);
        assert_eq!(p, Point::new(500.0, 250.0));
        // closer stars spread further from the centre
        let near = project(100.0, 0.0, 50.0, 200.0, center);
        assert!(near.x > p.x);
    }
}
