//! Capture schedule generation and consumption.
//!
//! A [`CaptureSchedule`] holds the playback offsets (in seconds) at which a
//! representative frame should be captured. It is generated once per video,
//! before any frame is read, and is consumed front to back through an index
//! cursor as targets are satisfied.

/// Ordered capture targets plus a cursor marking how many are satisfied.
///
/// Targets are ascending and never reordered. Every target before the
/// cursor has been consumed; [`peek`](CaptureSchedule::peek) always returns
/// the earliest outstanding one.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSchedule {
    targets: Vec<f64>,
    cursor: usize,
}

impl CaptureSchedule {
    /// Build the schedule for a clip of `frame_count` frames at `native_fps`.
    ///
    /// The sampling rate is capped at `native_fps`. Targets start at zero
    /// and are produced by repeatedly adding `1 / rate` while the running
    /// value stays strictly below `frame_count / native_fps`. The running
    /// sum accumulates floating-point drift, which matches how frames are
    /// later matched against the targets.
    ///
    /// Non-positive or non-finite rates produce an empty schedule.
    ///
    /// # Example
    ///
    /// ```
    /// use framesift::CaptureSchedule;
    ///
    /// let schedule = CaptureSchedule::generate(10, 10.0, 5.0);
    /// assert_eq!(schedule.len(), 5);
    /// assert_eq!(schedule.peek(), Some(0.0));
    /// ```
    pub fn generate(frame_count: u64, native_fps: f64, sampling_rate: f64) -> Self {
        let rate = effective_rate(native_fps, sampling_rate);
        if !(native_fps.is_finite() && native_fps > 0.0) || !(rate.is_finite() && rate > 0.0) {
            return Self::from_targets(Vec::new());
        }

        let clip_duration = frame_count as f64 / native_fps;
        let step = 1.0 / rate;

        let mut targets = Vec::new();
        let mut target = 0.0;
        while target < clip_duration {
            targets.push(target);
            target += step;
        }

        log::debug!(
            "Generated {} capture targets (clip {clip_duration:.3}s, rate {rate})",
            targets.len()
        );

        Self::from_targets(targets)
    }

    /// Wrap an already ordered list of targets.
    pub fn from_targets(targets: Vec<f64>) -> Self {
        Self { targets, cursor: 0 }
    }

    /// The earliest outstanding target, if any remain.
    pub fn peek(&self) -> Option<f64> {
        self.targets.get(self.cursor).copied()
    }

    /// Consume the earliest outstanding target.
    ///
    /// Popping an exhausted schedule does nothing and returns `None`.
    pub fn pop(&mut self) -> Option<f64> {
        let target = self.peek()?;
        self.cursor += 1;
        Some(target)
    }

    /// Outstanding targets, earliest first.
    pub fn remaining(&self) -> &[f64] {
        &self.targets[self.cursor..]
    }

    /// Every target the schedule was built with, consumed or not.
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Number of targets already consumed.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Total number of targets, consumed or not.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// `true` if the schedule was built without any targets.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// `true` once every target has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.targets.len()
    }
}

/// Sampling rate actually used: never more than the source frame rate.
pub fn effective_rate(native_fps: f64, sampling_rate: f64) -> f64 {
    native_fps.min(sampling_rate)
}
