//! Perspective star field with warp streaks
//!
//! Stars fly toward the viewer, leave motion trails whose length grows with
//! speed, twinkle individually and are recycled to the far plane once they
//! pass the camera, so the count never changes between resizes.

mod field;
mod star;

pub use field::{background_shade, star_count, Starfield};
pub use star::{project, Star};
