//! The frame-selection driver.
//!
//! [`FrameSelector`] walks a frame stream once. For every capture target in
//! the [`CaptureSchedule`] it takes the first frame whose playback offset
//! reaches the target, scores it, and writes it when the score is at or
//! below the configured blur threshold. Exactly one target is consumed per
//! crossing, written or not. Once the schedule is exhausted the remaining
//! frames are left unread.
//!
//! # Example
//!
//! ```no_run
//! use framesift::{FrameSelector, SamplingConfig, run_label_now};
//!
//! let selector = FrameSelector::new(SamplingConfig::new(), run_label_now("run_"));
//! let report = selector.process_video("clips/sample.mp4")?;
//! println!("wrote {} frame(s)", report.frames_written.len());
//! # Ok::<(), framesift::FrameSiftError>(())
//! ```

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    blur::blur_score,
    config::SamplingConfig,
    error::FrameSiftError,
    progress::ProgressTracker,
    schedule::CaptureSchedule,
    source::FrameSource,
    timestamp::format_duration,
    video::VideoFile,
};

/// Outcome of selecting frames from one video.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionReport {
    /// Directory the frames were written into.
    pub output_dir: PathBuf,
    /// Frames pulled from the source, including the one that found the
    /// schedule exhausted.
    pub frames_read: u64,
    /// Number of capture targets generated for the video.
    pub scheduled: usize,
    /// Files written, in playback order.
    pub frames_written: Vec<PathBuf>,
    /// Frames that reached a target but scored above the threshold.
    pub frames_discarded: u64,
    /// Targets still outstanding when the stream ended.
    pub remaining_targets: Vec<f64>,
}

/// Drives schedule → read → score → write for one video at a time.
#[derive(Debug, Clone)]
pub struct FrameSelector {
    config: SamplingConfig,
    run_label: String,
}

impl FrameSelector {
    /// Create a selector. `run_label` prefixes every file it writes.
    pub fn new(config: SamplingConfig, run_label: impl Into<String>) -> Self {
        Self {
            config,
            run_label: run_label.into(),
        }
    }

    /// The configuration this selector was built with.
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// The run label shared by every file this selector writes.
    pub fn run_label(&self) -> &str {
        &self.run_label
    }

    /// Directory that receives the frames of `video_path`: the path with
    /// its extension stripped and the configured suffix appended.
    pub fn output_dir_for(&self, video_path: &Path) -> PathBuf {
        let mut name: OsString = video_path.with_extension("").into_os_string();
        name.push(&self.config.output_suffix);
        PathBuf::from(name)
    }

    /// File name for a frame at `frame_duration` seconds.
    pub fn frame_file_name(&self, frame_duration: f64) -> String {
        format!(
            "{}frame{}.{}",
            self.run_label,
            format_duration(frame_duration),
            self.config.image_extension
        )
    }

    /// Create the output directory for `video_path`, open the video, and
    /// select frames from it.
    ///
    /// A video FFmpeg cannot open, or one without a video stream, is treated
    /// as an empty stream: a warning is logged and the report lists zero
    /// frames. The output directory is created either way.
    ///
    /// # Errors
    ///
    /// Directory creation, decode and image write failures are returned
    /// unchanged.
    pub fn process_video<P: AsRef<Path>>(
        &self,
        video_path: P,
    ) -> Result<SelectionReport, FrameSiftError> {
        let video_path = video_path.as_ref();
        let output_dir = self.output_dir_for(video_path);
        fs::create_dir_all(&output_dir).map_err(|source| FrameSiftError::OutputDirectory {
            path: output_dir.clone(),
            source,
        })?;

        let mut video = match VideoFile::open(video_path) {
            Ok(video) => video,
            Err(error @ (FrameSiftError::FileOpen { .. } | FrameSiftError::NoVideoStream)) => {
                log::warn!("Nothing read from {}: {error}", video_path.display());
                return Ok(SelectionReport {
                    output_dir,
                    ..SelectionReport::default()
                });
            }
            Err(error) => return Err(error),
        };

        self.select(&mut video, &output_dir)
    }

    /// Run the selection loop over `source`, writing into `output_dir`.
    ///
    /// `output_dir` must already exist.
    ///
    /// # Errors
    ///
    /// Propagates read errors from `source` and image write errors.
    pub fn select<S: FrameSource>(
        &self,
        mut source: S,
        output_dir: &Path,
    ) -> Result<SelectionReport, FrameSiftError> {
        self.config.validate()?;

        let native_fps = source.metadata().frames_per_second;
        let frame_count = source.metadata().frame_count;
        let mut schedule = CaptureSchedule::generate(
            frame_count,
            native_fps,
            self.config.saving_frames_per_second,
        );
        let tracker = ProgressTracker::new(Some(frame_count));

        let mut report = SelectionReport {
            output_dir: output_dir.to_path_buf(),
            scheduled: schedule.len(),
            ..SelectionReport::default()
        };

        let mut count: u64 = 0;
        while let Some(frame) = source.read_frame()? {
            report.frames_read += 1;
            let frame_duration = count as f64 / native_fps;
            self.config.progress.on_progress(&tracker.snapshot(
                report.frames_read,
                frame_duration,
                report.frames_written.len() as u64,
            ));

            let Some(target) = schedule.peek() else {
                log::debug!("Schedule exhausted at frame {count}");
                break;
            };

            if frame_duration >= target {
                let score = blur_score(&frame);
                if score <= self.config.blur_threshold {
                    let path = output_dir.join(self.frame_file_name(frame_duration));
                    frame.save(&path)?;
                    log::debug!(
                        "Kept frame {count} ({frame_duration:.3}s, score {score:.2}) -> {}",
                        path.display()
                    );
                    report.frames_written.push(path);
                } else {
                    log::debug!(
                        "Discarded frame {count} ({frame_duration:.3}s, score {score:.2})"
                    );
                    report.frames_discarded += 1;
                }
                schedule.pop();
            }

            count += 1;
        }

        report.remaining_targets = schedule.remaining().to_vec();
        log::info!(
            "{}: read {} frame(s), wrote {}, discarded {}, {} target(s) left",
            output_dir.display(),
            report.frames_read,
            report.frames_written.len(),
            report.frames_discarded,
            report.remaining_targets.len()
        );

        Ok(report)
    }
}
