//! Progress reporting.
//!
//! The frame selector notifies a [`ProgressCallback`] once per frame it
//! reads. Callbacks observe the run; they cannot stop it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framesift::{FrameSelector, ProgressCallback, ProgressInfo, SamplingConfig};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("{pct:.1}% read, {} written", info.frames_written);
//!         }
//!     }
//! }
//!
//! let config = SamplingConfig::new().with_progress(Arc::new(PrintProgress));
//! let selector = FrameSelector::new(config, "run_".to_string());
//! selector.process_video("input.mp4")?;
//! # Ok::<(), framesift::FrameSiftError>(())
//! ```

use std::time::{Duration, Instant};

/// A snapshot of selection progress for one video.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Frames read so far.
    pub current: u64,
    /// Frames expected, if the container reports a count.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time since the video was opened.
    pub elapsed: Duration,
    /// Playback offset of the frame just read.
    pub current_timestamp: Duration,
    /// Frames written to disk so far.
    pub frames_written: u64,
}

/// Trait for receiving progress updates during frame selection.
///
/// Implementations must be [`Send`] and [`Sync`] so a configuration can be
/// shared across the videos of a batch.
pub trait ProgressCallback: Send + Sync {
    /// Called after every frame read.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all notifications. Used when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Builds [`ProgressInfo`] snapshots for one video.
pub(crate) struct ProgressTracker {
    total: Option<u64>,
    start: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(total: Option<u64>) -> Self {
        Self {
            total: total.filter(|&count| count > 0),
            start: Instant::now(),
        }
    }

    pub(crate) fn snapshot(&self, current: u64, offset: f64, frames_written: u64) -> ProgressInfo {
        let percentage = self
            .total
            .map(|total| ((current as f64 / total as f64) * 100.0).min(100.0) as f32);
        ProgressInfo {
            current,
            total: self.total,
            percentage,
            elapsed: self.start.elapsed(),
            current_timestamp: Duration::try_from_secs_f64(offset).unwrap_or_default(),
            frames_written,
        }
    }
}
