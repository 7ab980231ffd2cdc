//! Directory batches.
//!
//! A batch processes every video directly inside a directory, one after the
//! other, with a single selector (and therefore a single run label). The
//! first error aborts the rest of the batch.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::FrameSiftError,
    selector::{FrameSelector, SelectionReport},
};

/// Outcome of a batch run, in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Each processed video and what was selected from it.
    pub videos: Vec<(PathBuf, SelectionReport)>,
}

impl BatchReport {
    /// Total frames written across all videos.
    pub fn frames_written(&self) -> usize {
        self.videos
            .iter()
            .map(|(_, report)| report.frames_written.len())
            .sum()
    }
}

/// List regular files directly in `dir` whose name ends in `.<extension>`,
/// compared case-insensitively. Order follows the directory listing and is
/// not guaranteed to be stable.
///
/// # Errors
///
/// Returns [`FrameSiftError::IoError`] if the directory cannot be read.
pub fn find_videos(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, FrameSiftError> {
    let suffix = format!(".{}", extension.trim_start_matches('.')).to_lowercase();
    let mut videos = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.ends_with(&suffix) {
            videos.push(entry.path());
        }
    }

    log::debug!("Found {} video(s) in {}", videos.len(), dir.display());
    Ok(videos)
}

/// Process every matching video in `dir` with `selector`.
///
/// `on_video` is called with each path just before it is processed.
///
/// # Errors
///
/// Stops at and returns the first error; videos after it are not touched.
pub fn process_directory<F>(
    dir: &Path,
    selector: &FrameSelector,
    mut on_video: F,
) -> Result<BatchReport, FrameSiftError>
where
    F: FnMut(&Path),
{
    let mut batch = BatchReport::default();

    for video in find_videos(dir, selector.config().video_extension())? {
        on_video(&video);
        let report = selector.process_video(&video)?;
        batch.videos.push((video, report));
    }

    log::info!(
        "Processed {} video(s) in {}, wrote {} frame(s)",
        batch.videos.len(),
        dir.display(),
        batch.frames_written()
    );
    Ok(batch)
}
