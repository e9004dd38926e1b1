//! Frame timing.

/// Frame timing snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the platform started.
    pub elapsed: f64,

    /// Seconds since the previous tick. The first tick measures from zero.
    pub delta: f64,

    /// Monotonic frame counter, starting at zero.
    pub frame_index: u64,
}

/// Turns the platform's elapsed time into [`FrameTime`] snapshots.
///
/// The clock never runs backwards: a sample earlier than the previous one is clamped to it.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: f64,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock to `elapsed` and returns a new [`FrameTime`].
    pub fn tick(&mut self, elapsed: f64) -> FrameTime {
        let elapsed = elapsed.max(self.last);
        let time = FrameTime {
            elapsed,
            delta: elapsed - self.last,
            frame_index: self.frame_index,
        };

        self.last = elapsed;
        self.frame_index = self.frame_index.wrapping_add(1);
        time
    }
}

/// Gray level of the animated color at time `t`: `sin(t) / 2 + 0.5`, always in `[0, 1]`.
pub fn pulse_intensity(t: f64) -> f32 {
    ((t.sin() / 2.0) + 0.5).clamp(0.0, 1.0) as f32
}
