//! Video metadata.
//!
//! [`VideoMetadata`] is read once when a video is opened and cached for the
//! lifetime of the handle. The frame selector only needs the frame rate and
//! frame count; the rest is reported in logs.

/// Metadata for the selected video stream.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (may be approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Total number of frames, as recorded by the container or estimated
    /// from duration and frame rate.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
}

impl VideoMetadata {
    /// Clip length in seconds, derived as `frame_count / frames_per_second`.
    ///
    /// Returns `0.0` when the frame rate is unknown.
    pub fn clip_duration(&self) -> f64 {
        if self.frames_per_second > 0.0 {
            self.frame_count as f64 / self.frames_per_second
        } else {
            0.0
        }
    }
}
