//! # framesift
//!
//! Sample still frames from videos at a fixed rate and keep them by blur
//! score.
//!
//! For each video, `framesift` builds a schedule of capture timestamps
//! (`0, 1/rate, 2/rate, …`), walks the decoded frame stream once, takes the
//! first frame that reaches each timestamp, scores its sharpness as the mean
//! Sobel gradient magnitude, and writes it as an image when the score is at
//! or below the configured threshold. Frames land in a folder next to the
//! video, named after the run and the frame's playback offset.
//!
//! Decoding is done by FFmpeg via
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next); images are written
//! with the [`image`](https://crates.io/crates/image) crate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use framesift::{FrameSelector, SamplingConfig, run_label_now};
//!
//! let config = SamplingConfig::new()
//!     .with_saving_frames_per_second(5.0)
//!     .with_blur_threshold(1000.0);
//! let selector = FrameSelector::new(config, run_label_now("run_"));
//!
//! // Writes into `clips/sample-opencv/`.
//! let report = selector.process_video("clips/sample.mp4")?;
//! println!("{} frame(s) kept", report.frames_written.len());
//! # Ok::<(), framesift::FrameSiftError>(())
//! ```
//!
//! ## Whole directories
//!
//! ```no_run
//! use std::path::Path;
//!
//! use framesift::{FrameSelector, SamplingConfig, process_directory, run_label_now};
//!
//! let selector = FrameSelector::new(SamplingConfig::new(), run_label_now("run_"));
//! let batch = process_directory(Path::new("clips"), &selector, |video| {
//!     println!("{}", video.display());
//! })?;
//! println!("{} frame(s) kept", batch.frames_written());
//! # Ok::<(), framesift::FrameSiftError>(())
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod batch;
pub mod blur;
pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod label;
pub mod metadata;
pub mod progress;
pub mod schedule;
pub mod selector;
pub mod source;
pub mod timestamp;
pub mod video;

pub use batch::{BatchReport, find_videos, process_directory};
pub use blur::{blur_score, luma_blur_score, sobel_gradients};
pub use config::{
    DEFAULT_BLUR_THRESHOLD, DEFAULT_IMAGE_EXTENSION, DEFAULT_OUTPUT_SUFFIX,
    DEFAULT_SAVING_FRAMES_PER_SECOND, DEFAULT_VIDEO_EXTENSION, SamplingConfig,
};
pub use error::FrameSiftError;
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use label::{DEFAULT_LABEL_PREFIX, run_label, run_label_now};
pub use metadata::VideoMetadata;
pub use progress::{ProgressCallback, ProgressInfo};
pub use schedule::{CaptureSchedule, effective_rate};
pub use selector::{FrameSelector, SelectionReport};
pub use source::FrameSource;
pub use timestamp::format_duration;
pub use video::VideoFile;
