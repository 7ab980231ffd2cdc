//! Sampling configuration.
//!
//! [`SamplingConfig`] is a builder that carries the sampling rate, blur
//! threshold, naming conventions and an optional progress callback into a
//! [`FrameSelector`](crate::FrameSelector). It replaces process-wide
//! constants: every selector gets its own copy at construction.
//!
//! # Example
//!
//! ```
//! use framesift::SamplingConfig;
//!
//! let config = SamplingConfig::new()
//!     .with_saving_frames_per_second(2.0)
//!     .with_blur_threshold(750.0);
//! assert_eq!(config.saving_frames_per_second(), 2.0);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::error::FrameSiftError;
use crate::progress::{NoOpProgress, ProgressCallback};

/// Default number of frames to capture per second of video.
pub const DEFAULT_SAVING_FRAMES_PER_SECOND: f64 = 5.0;

/// Default keep/discard cutoff. Frames scoring at or below it are written.
pub const DEFAULT_BLUR_THRESHOLD: f64 = 1000.0;

/// Default suffix appended to the video path (minus extension) to name the
/// output directory.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-opencv";

/// Default image extension for written frames.
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Default extension of the videos picked up by a batch run.
pub const DEFAULT_VIDEO_EXTENSION: &str = "mp4";

/// Settings for one frame-selection run.
#[derive(Clone)]
pub struct SamplingConfig {
    pub(crate) saving_frames_per_second: f64,
    pub(crate) blur_threshold: f64,
    pub(crate) output_suffix: String,
    pub(crate) image_extension: String,
    pub(crate) video_extension: String,
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl Debug for SamplingConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SamplingConfig")
            .field("saving_frames_per_second", &self.saving_frames_per_second)
            .field("blur_threshold", &self.blur_threshold)
            .field("output_suffix", &self.output_suffix)
            .field("image_extension", &self.image_extension)
            .field("video_extension", &self.video_extension)
            .finish_non_exhaustive()
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SamplingConfig {
    /// Create a configuration with the default rate, threshold and names.
    pub fn new() -> Self {
        Self {
            saving_frames_per_second: DEFAULT_SAVING_FRAMES_PER_SECOND,
            blur_threshold: DEFAULT_BLUR_THRESHOLD,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            video_extension: DEFAULT_VIDEO_EXTENSION.to_string(),
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Set the target sampling rate. It is capped at each video's native
    /// frame rate when the schedule is built.
    #[must_use]
    pub fn with_saving_frames_per_second(mut self, rate: f64) -> Self {
        self.saving_frames_per_second = rate;
        self
    }

    /// Set the keep/discard cutoff.
    #[must_use]
    pub fn with_blur_threshold(mut self, threshold: f64) -> Self {
        self.blur_threshold = threshold;
        self
    }

    /// Set the suffix used to derive output directory names.
    #[must_use]
    pub fn with_output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    /// Set the image extension (and therefore the encoder) of written frames.
    /// A leading dot is ignored.
    #[must_use]
    pub fn with_image_extension(mut self, extension: impl Into<String>) -> Self {
        self.image_extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Set the video extension matched by batch runs. A leading dot is ignored.
    #[must_use]
    pub fn with_video_extension(mut self, extension: impl Into<String>) -> Self {
        self.video_extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Target sampling rate in frames per second.
    pub fn saving_frames_per_second(&self) -> f64 {
        self.saving_frames_per_second
    }

    /// Keep/discard cutoff.
    pub fn blur_threshold(&self) -> f64 {
        self.blur_threshold
    }

    /// Output directory suffix.
    pub fn output_suffix(&self) -> &str {
        &self.output_suffix
    }

    /// Extension of written frames, without a dot.
    pub fn image_extension(&self) -> &str {
        &self.image_extension
    }

    /// Extension of batch input videos, without a dot.
    pub fn video_extension(&self) -> &str {
        &self.video_extension
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`FrameSiftError::InvalidConfig`] for a non-positive or
    /// non-finite sampling rate, a NaN threshold, or an empty extension.
    pub fn validate(&self) -> Result<(), FrameSiftError> {
        if !(self.saving_frames_per_second.is_finite() && self.saving_frames_per_second > 0.0) {
            return Err(FrameSiftError::InvalidConfig(format!(
                "sampling rate must be a positive number, got {}",
                self.saving_frames_per_second
            )));
        }
        if self.blur_threshold.is_nan() {
            return Err(FrameSiftError::InvalidConfig(
                "blur threshold must not be NaN".to_string(),
            ));
        }
        if self.image_extension.is_empty() {
            return Err(FrameSiftError::InvalidConfig(
                "image extension must not be empty".to_string(),
            ));
        }
        if self.video_extension.is_empty() {
            return Err(FrameSiftError::InvalidConfig(
                "video extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
