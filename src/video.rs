//! FFmpeg-backed sequential frame reader.
//!
//! [`VideoFile`] opens a video, caches its [`VideoMetadata`], and decodes
//! frames strictly in order as RGB8 [`image::DynamicImage`] values. There is
//! no seeking: the selector walks the stream once from the start.
//!
//! The handle owns the demuxer, decoder and scaler. All of them are released
//! when the handle is dropped.
//!
//! # Example
//!
//! ```no_run
//! use framesift::{FrameSource, VideoFile};
//!
//! let mut video = VideoFile::open("input.mp4")?;
//! println!("{} fps", video.metadata().frames_per_second);
//! while let Some(frame) = video.read_frame()? {
//!     println!("{}x{}", frame.width(), frame.height());
//! }
//! # Ok::<(), framesift::FrameSiftError>(())
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::{error::FrameSiftError, metadata::VideoMetadata, source::FrameSource};

/// An open video file, read front to back.
pub struct VideoFile {
    input_context: Input,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    video_stream_index: usize,
    metadata: VideoMetadata,
    decoded_frame: VideoFrame,
    rgb_frame: VideoFrame,
    eof_sent: bool,
    finished: bool,
    file_path: PathBuf,
}

impl Debug for VideoFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoFile")
            .field("file_path", &self.file_path)
            .field("metadata", &self.metadata)
            .field("video_stream_index", &self.video_stream_index)
            .field("eof_sent", &self.eof_sent)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl VideoFile {
    /// Open a video file and prepare its best video stream for decoding.
    ///
    /// # Errors
    ///
    /// - [`FrameSiftError::FileOpen`] if FFmpeg cannot open or probe the file.
    /// - [`FrameSiftError::NoVideoStream`] if the file has no video stream.
    /// - [`FrameSiftError::FfmpegError`] if the decoder or scaler cannot be
    ///   created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FrameSiftError> {
        let file_path = path.as_ref().to_path_buf();
        log::debug!("Opening video file: {}", file_path.display());

        ffmpeg_next::init().map_err(|error| FrameSiftError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&file_path).map_err(|error| FrameSiftError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let container_duration = input_context.duration();

        let (video_stream_index, decoder, frames_per_second, recorded_frames) = {
            let stream = input_context
                .streams()
                .best(Type::Video)
                .ok_or(FrameSiftError::NoVideoStream)?;

            let frames_per_second = rational_to_f64(stream.avg_frame_rate())
                .or_else(|| rational_to_f64(stream.rate()))
                .unwrap_or(0.0);

            let decoder_context = CodecContext::from_parameters(stream.parameters())?;
            let decoder = decoder_context.decoder().video()?;

            (stream.index(), decoder, frames_per_second, stream.frames())
        };

        // Containers that do not record a frame count get an estimate from
        // the container duration (AV_TIME_BASE, microseconds).
        let frame_count = if recorded_frames > 0 {
            recorded_frames as u64
        } else if container_duration > 0 && frames_per_second > 0.0 {
            (container_duration as f64 / 1_000_000.0 * frames_per_second) as u64
        } else {
            0
        };

        let width = decoder.width();
        let height = decoder.height();
        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let scaler = ScalingContext::get(
            decoder.format(),
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )?;

        let metadata = VideoMetadata {
            width,
            height,
            frames_per_second,
            frame_count,
            codec,
        };
        log::debug!("Video metadata for {}: {metadata:?}", file_path.display());

        Ok(Self {
            input_context,
            decoder,
            scaler,
            video_stream_index,
            metadata,
            decoded_frame: VideoFrame::empty(),
            rgb_frame: VideoFrame::empty(),
            eof_sent: false,
            finished: false,
            file_path,
        })
    }

    /// Path the handle was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn convert_current_frame(&mut self) -> Result<DynamicImage, FrameSiftError> {
        self.scaler.run(&self.decoded_frame, &mut self.rgb_frame)?;

        let width = self.rgb_frame.width();
        let height = self.rgb_frame.height();
        let buffer = frame_to_rgb_buffer(&self.rgb_frame, width, height);
        let image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            FrameSiftError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })?;

        Ok(DynamicImage::ImageRgb8(image))
    }
}

impl FrameSource for VideoFile {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn read_frame(&mut self) -> Result<Option<DynamicImage>, FrameSiftError> {
        if self.finished {
            return Ok(None);
        }

        loop {
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                return self.convert_current_frame().map(Some);
            }

            if self.eof_sent {
                self.finished = true;
                return Ok(None);
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    if packet.stream() == self.video_stream_index {
                        self.decoder.send_packet(&packet)?;
                    }
                }
                Err(FfmpegError::Eof) => {
                    self.decoder.send_eof()?;
                    self.eof_sent = true;
                }
                Err(error) => {
                    // A demuxer that cannot make progress ends the stream
                    // rather than spinning on the same read.
                    log::warn!(
                        "Stopping read of {} after demuxer error: {error}",
                        self.file_path.display()
                    );
                    self.decoder.send_eof()?;
                    self.eof_sent = true;
                }
            }
        }
    }
}

impl Drop for VideoFile {
    fn drop(&mut self) {
        log::debug!("Releasing video file: {}", self.file_path.display());
    }
}

fn rational_to_f64(rational: ffmpeg_next::Rational) -> Option<f64> {
    if rational.denominator() != 0 && rational.numerator() > 0 {
        Some(rational.numerator() as f64 / rational.denominator() as f64)
    } else {
        None
    }
}

/// Copy the RGB24 plane of `video_frame` into a tightly packed buffer,
/// dropping any per-row stride padding.
fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let row_bytes = width as usize * 3;
    let data = video_frame.data(0);

    if stride == row_bytes {
        data[..row_bytes * height as usize].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(row_bytes * height as usize);
        for row in 0..height as usize {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_bytes]);
        }
        buffer
    }
}
