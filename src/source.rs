//! The frame-source seam.
//!
//! The selector does not care where frames come from, only that they arrive
//! in order, one per call, with an end-of-stream signal. [`VideoFile`]
//! (FFmpeg) is the production implementation; tests feed synthetic frames.
//!
//! [`VideoFile`]: crate::VideoFile

use image::DynamicImage;

use crate::{error::FrameSiftError, metadata::VideoMetadata};

/// A sequential reader of decoded frames.
pub trait FrameSource {
    /// Metadata of the stream being read. Must be available before the
    /// first [`read_frame`](FrameSource::read_frame) call.
    fn metadata(&self) -> &VideoMetadata;

    /// Decode and return the next frame.
    ///
    /// Returns `Ok(None)` at end of stream. After that, further calls keep
    /// returning `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Any decode or conversion failure. The selector does not retry.
    fn read_frame(&mut self) -> Result<Option<DynamicImage>, FrameSiftError>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn metadata(&self) -> &VideoMetadata {
        (**self).metadata()
    }

    fn read_frame(&mut self) -> Result<Option<DynamicImage>, FrameSiftError> {
        (**self).read_frame()
    }
}
