//! Frame clock
//!
//! Turns the host's frame timestamps (milliseconds, as handed to a
//! request-animation-frame callback) into a bounded delta in seconds.

/// Tracks the previous frame timestamp and clamps each delta
#[derive(Debug, Clone)]
pub struct FrameClock {
    prev_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            prev_ms: None,
            max_dt,
        }
    }

    /// Advance to `now_ms` and return the delta since the previous frame.
    ///
    /// The first frame after construction or [`reset`](Self::reset) yields
    /// zero. Timestamps that go backwards also yield zero, and non-finite
    /// ones are ignored. The result never exceeds `max_dt`, so a
    /// backgrounded tab cannot inject one huge step.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.prev_ms {
            Some(prev) => ((now_ms - prev) / 1000.0) as f32,
            None => 0.0,
        };
        self.prev_ms = Some(now_ms);
        bound_dt(dt, self.max_dt)
    }

    /// Forget the previous timestamp
    pub fn reset(&mut self) {
        self.prev_ms = None;
    }
}

/// Clamp a frame delta to `[0, max_dt]`. NaN becomes 0.
#[inline]
pub fn bound_dt(dt: f32, max_dt: f32) -> f32 {
    // `f32::max` returns the other operand for NaN, unlike `clamp`
    dt.max(0.0).min(max_dt)
}
