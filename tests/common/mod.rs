//! Shared helpers for integration tests: an in-memory frame source and
//! synthetic frames with known blur scores.

#![allow(dead_code)]

use std::collections::VecDeque;

use framesift::{FrameSiftError, FrameSource, VideoMetadata};
use image::{DynamicImage, Rgb, RgbImage};

pub const WIDTH: u32 = 400;
pub const HEIGHT: u32 = 8;

/// Frames served from memory, in order, with an optional injected failure.
pub struct MemorySource {
    metadata: VideoMetadata,
    frames: VecDeque<DynamicImage>,
    pub reads: usize,
    fail_on_read: Option<usize>,
}

impl MemorySource {
    pub fn new(frames: Vec<DynamicImage>, frames_per_second: f64, frame_count: u64) -> Self {
        Self {
            metadata: VideoMetadata {
                width: WIDTH,
                height: HEIGHT,
                frames_per_second,
                frame_count,
                codec: "synthetic".to_string(),
            },
            frames: frames.into(),
            reads: 0,
            fail_on_read: None,
        }
    }

    /// Make the `read`-th call (1-based) fail with a decode error.
    pub fn failing_on(mut self, read: usize) -> Self {
        self.fail_on_read = Some(read);
        self
    }
}

impl FrameSource for MemorySource {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn read_frame(&mut self) -> Result<Option<DynamicImage>, FrameSiftError> {
        let Some(frame) = self.frames.pop_front() else {
            return Ok(None);
        };
        self.reads += 1;
        if self.fail_on_read == Some(self.reads) {
            return Err(FrameSiftError::VideoDecodeError(format!(
                "synthetic failure on read {}",
                self.reads
            )));
        }
        Ok(Some(frame))
    }
}

/// A uniform grey frame: blur score 0.
pub fn flat_frame(value: u8) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([value; 3])))
}

/// Two-pixel black/white vertical stripes: blur score just above 1000.
pub fn striped_frame() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(WIDTH, HEIGHT, |x, _| {
        if x % 4 >= 2 { Rgb([255; 3]) } else { Rgb([0; 3]) }
    }))
}

/// `count` flat frames.
pub fn flat_frames(count: usize) -> Vec<DynamicImage> {
    (0..count).map(|index| flat_frame((index * 10) as u8)).collect()
}

/// File names inside `dir`, sorted.
pub fn file_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read output dir")
        .map(|entry| entry.expect("bad entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
