//! Per-refresh frame scheduling
//!
//! The renderer asks its scheduler for one frame at a time and keeps the
//! returned handle so teardown can cancel it. In the browser this is
//! `requestAnimationFrame`; tests, the CLI and the egui demo drive frames
//! themselves through `ManualScheduler`.

pub trait FrameScheduler {
    type Handle;

    /// Ask the host to call back on its next refresh. `None` means the host
    /// refused and no frame will come.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Scheduler for hosts that pump frames explicitly
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<u64>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a requested frame is waiting to be delivered
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Total frames requested so far
    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        self.next_id += 1;
        self.requested += 1;
        self.pending = Some(self.next_id);
        self.pending
    }

    fn cancel_frame(&mut self, handle: u64) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_then_cancel() {
        let mut s = ManualScheduler::new();
        assert!(!s.is_pending());
        let h = s.request_frame().unwrap();
        assert!(s.is_pending());
        s.cancel_frame(h);
        assert!(!s.is_pending());
        assert_eq!(s.requested(), 1);
        assert_eq!(s.cancelled(), 1);
    }

    #[test]
    fn stale_handle_does_not_cancel_newer_frame() {
        let mut s = ManualScheduler::new();
        let old = s.request_frame().unwrap();
        let _new = s.request_frame().unwrap();
        s.cancel_frame(old);
        assert!(s.is_pending());
        assert_eq!(s.cancelled(), 0);
    }
}
