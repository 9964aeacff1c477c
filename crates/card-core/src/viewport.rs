//! Drawable surface size and debounced resize tracking.

use std::time::Duration;

/// Size of the drawable area in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    #[inline]
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Backing-store size for a canvas of this CSS size at the given ratio.
    pub fn backing_size(&self, pixel_ratio: f32) -> (u32, u32) {
        let w = (self.width * pixel_ratio).floor().max(1.0) as u32;
        let h = (self.height * pixel_ratio).floor().max(1.0) as u32;
        (w, h)
    }
}

/// Debounces resize notifications: the latest size is committed only once no
/// further notification arrived for `delay`.
#[derive(Clone, Debug)]
pub struct ViewportTracker {
    current: Viewport,
    pending: Option<(Viewport, Duration)>,
    delay: Duration,
}

impl ViewportTracker {
    pub fn new(initial: Viewport, delay: Duration) -> Self {
        Self {
            current: initial,
            pending: None,
            delay,
        }
    }

    pub fn current(&self) -> Viewport {
        self.current
    }

    /// Record a resize observed at scene time `now`; restarts the debounce.
    pub fn notify(&mut self, size: Viewport, now: Duration) {
        self.pending = Some((size, now + self.delay));
    }

    /// Commit a pending size whose debounce expired. Returns the new size only
    /// when it differs from the current one.
    pub fn poll(&mut self, now: Duration) -> Option<Viewport> {
        let (size, due) = self.pending?;
        if now < due {
            return None;
        }
        self.pending = None;
        if size == self.current {
            return None;
        }
        self.current = size;
        Some(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_commits_only_latest_after_quiet_period() {
        let ms = Duration::from_millis;
        let mut t = ViewportTracker::new(Viewport::new(800.0, 600.0), ms(100));
        t.notify(Viewport::new(700.0, 600.0), ms(0));
        t.notify(Viewport::new(640.0, 480.0), ms(50));
        assert_eq!(t.poll(ms(120)), None);
        assert_eq!(t.poll(ms(150)), Some(Viewport::new(640.0, 480.0)));
        assert_eq!(t.poll(ms(500)), None);
        assert_eq!(t.current(), Viewport::new(640.0, 480.0));
    }

    #[test]
    fn unchanged_size_is_not_reported() {
        let ms = Duration::from_millis;
        let mut t = ViewportTracker::new(Viewport::new(800.0, 600.0), ms(100));
        t.notify(Viewport::new(800.0, 600.0), ms(0));
        assert_eq!(t.poll(ms(200)), None);
    }

    #[test]
    fn backing_size_never_zero() {
        assert_eq!(Viewport::new(0.0, 0.0).backing_size(2.0), (1, 1));
        assert_eq!(Viewport::new(400.0, 300.0).backing_size(1.5), (600, 450));
    }
}
