//! Mounted star field component
//!
//! Ties a `Starfield` to a drawing surface and a frame scheduler and owns
//! the frame handle, so a host only has to forward refresh callbacks,
//! parameter changes, resizes and the final teardown.

use tracing::{debug, info};

use crate::config::StarfieldConfig;
use crate::scheduler::FrameScheduler;
use crate::starfield::Starfield;
use crate::surface::Surface;

/// Caller-driven inputs at mount time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParams {
    pub speed: f64,
    pub progress: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            progress: 0.0,
        }
    }
}

pub struct Renderer<S: Surface, F: FrameScheduler> {
    surface: S,
    scheduler: F,
    field: Starfield,
    reduced_motion: bool,
    /// Handle of the frame we are waiting on; cancelled on teardown
    pending: Option<F::Handle>,
    started_at_ms: f64,
    last_ms: f64,
    frames: u64,
    torn_down: bool,
}

impl<S: Surface, F: FrameScheduler> Renderer<S, F> {
    /// Size the surface to its host, populate the field and either start the
    /// frame loop or, with `reduced_motion`, paint once and stop there.
    pub fn mount(
        mut surface: S,
        scheduler: F,
        config: &StarfieldConfig,
        params: RenderParams,
        reduced_motion: bool,
        now_ms: f64,
    ) -> Self {
        let size = surface.fit_to_host();
        let mut field = Starfield::new(config, size);
        field.set_speed(params.speed);
        field.set_progress(params.progress);

        info!(
            stars = field.len(),
            width = size.width,
            height = size.height,
            reduced_motion,
            "Mounting star field"
        );

        let mut renderer = Self {
            surface,
            scheduler,
            field,
            reduced_motion,
            pending: None,
            started_at_ms: now_ms,
            last_ms: now_ms,
            frames: 0,
            torn_down: false,
        };

        if reduced_motion {
            renderer.field.paint_static(&mut renderer.surface);
        } else {
            renderer.pending = renderer.scheduler.request_frame();
        }
        renderer
    }

    pub fn update_speed(&mut self, speed: f64) {
        if !self.torn_down {
            self.field.set_speed(speed);
        }
    }

    pub fn update_progress(&mut self, progress: f64) {
        if !self.torn_down {
            self.field.set_progress(progress);
        }
    }

    /// Re-read the host size and repopulate the field
    pub fn resize(&mut self) {
        if self.torn_down {
            return;
        }
        let size = self.surface.fit_to_host();
        debug!(width = size.width, height = size.height, "Resizing star field");
        self.field.resize(size);
        if self.reduced_motion {
            self.field.paint_static(&mut self.surface);
        }
    }

    /// Refresh callback. Runs one tick if a frame was requested and the
    /// renderer is still live; returns whether anything was painted.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        if self.torn_down || self.pending.take().is_none() {
            return false;
        }

        let dt = (now_ms - self.last_ms) / 1000.0;
        self.last_ms = now_ms;
        let t = (now_ms - self.started_at_ms) / 1000.0;

        self.field.step(dt, t, &mut self.surface);
        self.frames += 1;

        self.pending = self.scheduler.request_frame();
        true
    }

    /// Cancel the pending frame and go inert. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        info!(frames = self.frames, "Star field torn down");
    }

    /// Whether a frame is scheduled
    pub fn is_running(&self) -> bool {
        !self.torn_down && self.pending.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn is_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Frames painted by the loop (the reduced-motion paint is not counted)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &Starfield {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }
}

impl<S: Surface, F: FrameScheduler> Drop for Renderer<S, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::surface::{DrawOp, RecordingSurface, Size};

    type TestRenderer = Renderer<RecordingSurface, ManualScheduler>;

    fn config() -> StarfieldConfig {
        StarfieldConfig {
            seed: Some(9),
            ..StarfieldConfig::default()
        }
    }

    fn mount(reduced_motion: bool) -> TestRenderer {
        Renderer::mount(
            RecordingSurface::new(Size::new(800.0, 600.0)),
            ManualScheduler::new(),
            &config(),
            RenderParams::default(),
            reduced_motion,
            0.0,
        )
    }

    #[test]
    fn mount_schedules_first_frame_without_painting() {
        let r = mount(false);
        assert!(r.is_running());
        assert_eq!(r.scheduler().requested(), 1);
        assert_eq!(r.surface().mutations(), 0);
        assert_eq!(r.field().len(), 288);
    }

    #[test]
    fn each_frame_paints_and_reschedules() {
        let mut r = mount(false);
        for i in 1..=5 {
            assert!(r.on_frame(i as f64 * 16.0));
        }
        assert_eq!(r.frames(), 5);
        assert_eq!(r.surface().paints(), 5);
        assert_eq!(r.scheduler().requested(), 6);
        assert!(r.is_running());
    }

    #[test]
    fn reduced_motion_paints_exactly_once() {
        let mut r = mount(true);
        assert_eq!(r.surface().paints(), 1);
        assert_eq!(r.scheduler().requested(), 0);
        assert!(!r.is_running());

        let after_mount = r.surface().mutations();
        for i in 1..100 {
            assert!(!r.on_frame(i as f64 * 16.0));
        }
        r.update_speed(300.0);
        r.update_progress(1.0);
        assert_eq!(r.surface().mutations(), after_mount);
        assert!(r
            .surface()
            .ops()
            .iter()
            .all(|op| !matches!(op, DrawOp::Trail { .. })));
    }

    #[test]
    fn reduced_motion_repaints_on_resize() {
        let mut r = mount(true);
        r.surface_mut().set_host_size(Size::new(400.0, 300.0));
        r.resize();
        assert_eq!(r.surface().paints(), 2);
        assert_eq!(r.field().len(), 72);
        assert!(!r.is_running());
    }

    #[test]
    fn teardown_mid_animation_stops_all_mutation() {
        let mut r = mount(false);
        r.on_frame(16.0);
        r.on_frame(32.0);
        r.teardown();
        assert!(!r.is_running());
        assert_eq!(r.scheduler().cancelled(), 1);
        assert!(!r.scheduler().is_pending());

        let frozen = r.surface().mutations();
        for i in 3..200 {
            assert!(!r.on_frame(i as f64 * 16.0));
        }
        r.resize();
        assert_eq!(r.surface().mutations(), frozen);
        assert_eq!(r.frames(), 2);
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut r = mount(false);
        r.teardown();
        r.teardown();
        assert_eq!(r.scheduler().cancelled(), 1);
        assert!(r.is_torn_down());
    }

    #[test]
    fn parameters_are_last_write_wins() {
        let mut r = mount(false);
        r.update_speed(3.0);
        r.update_speed(120.0);
        r.update_progress(0.2);
        r.update_progress(0.9);
        assert_eq!(r.field().speed(), 120.0);
        assert_eq!(r.field().progress(), 0.9);

        r.on_frame(16.0);
        assert_eq!(r.surface().ops()[0], DrawOp::Background(230));
    }

    #[test]
    fn stall_does_not_jump_stars() {
        let mut r = mount(false);
        r.update_speed(4.0);
        r.on_frame(16.0);
        let before: Vec<f64> = r.field().stars().iter().map(|s| s.z).collect();

        // ten seconds without a refresh
        r.on_frame(10_016.0);
        let limit = 4.0 * 0.05 * 60.0;
        for (s, z0) in r.field().stars().iter().zip(before) {
            if s.z == 800.0 {
                continue;
            }
            assert!(z0 - s.z <= limit + 1e-9);
        }
    }

    #[test]
    fn resize_picks_up_host_size() {
        let mut r = mount(false);
        r.surface_mut().set_host_size(Size::new(1000.0, 1000.0));
        r.resize();
        assert_eq!(r.field().size(), Size::new(1000.0, 1000.0));
        assert_eq!(r.field().len(), 600);
        r.resize();
        assert_eq!(r.field().len(), 600);
        assert!(r.is_running());
    }

    #[test]
    fn mount_unsized_then_populate_on_first_resize() {
        let mut r = Renderer::mount(
            RecordingSurface::new(Size::new(0.0, 0.0)),
            ManualScheduler::new(),
            &config(),
            RenderParams::default(),
            false,
            0.0,
        );
        assert!(r.field().is_empty());
        r.surface_mut().set_host_size(Size::new(1000.0, 1000.0));
        r.resize();
        assert_eq!(r.field().len(), 600);
        assert!(r.on_frame(16.0));
        assert!(r.surface().ops().len() > 2);
    }

    #[test]
    fn zero_area_still_paints_backdrop() {
        let mut r = Renderer::mount(
            RecordingSurface::new(Size::new(0.0, 0.0)),
            ManualScheduler::new(),
            &config(),
            RenderParams::default(),
            false,
            0.0,
        );
        assert!(r.field().is_empty());
        assert!(r.on_frame(16.0));
        assert_eq!(r.surface().ops().len(), 2);
    }
}
