//! FFmpeg-backed reader and end-to-end tests.
//!
//! Tests require fixture files from `tests/fixtures/generate_fixtures.sh`
//! and return early when they are missing.

use std::{fs, path::Path};

use framesift::{FrameSelector, FrameSiftError, FrameSource, SamplingConfig, VideoFile};

fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_video.mp4"
}

fn test_pattern_path() -> &'static str {
    "tests/fixtures/test_pattern.mp4"
}

#[test]
fn open_nonexistent_file() {
    let result = VideoFile::open("this_file_does_not_exist.mp4");

    let error = result.expect_err("Expected open to fail");
    assert!(matches!(error, FrameSiftError::FileOpen { .. }));
    assert!(
        error.to_string().contains("Failed to open video file"),
        "Error message should mention file open failure: {error}",
    );
}

#[test]
fn open_invalid_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    fs::write(&invalid_file_path, b"this is not a media file")
        .expect("Failed to write invalid file");

    assert!(VideoFile::open(&invalid_file_path).is_err());
}

#[test]
fn metadata_of_sample_video() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let video = VideoFile::open(path).expect("Failed to open fixture");
    let metadata = video.metadata();
    assert_eq!(metadata.width, 64);
    assert_eq!(metadata.height, 48);
    assert!((metadata.frames_per_second - 10.0).abs() < 1e-6);
    assert_eq!(metadata.frame_count, 10);
    assert!((metadata.clip_duration() - 1.0).abs() < 1e-6);
}

#[test]
fn reads_every_frame_then_signals_end() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut video = VideoFile::open(path).expect("Failed to open fixture");
    let mut frames = 0;
    while let Some(frame) = video.read_frame().expect("Decode error") {
        assert_eq!((frame.width(), frame.height()), (64, 48));
        frames += 1;
    }
    assert_eq!(frames, 10);
    assert!(video.read_frame().expect("Read after end").is_none());
}

#[test]
fn sample_video_keeps_five_frames() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let workspace = tempfile::tempdir().expect("Failed to create temp dir");
    let video_path = workspace.path().join("sample.mp4");
    fs::copy(path, &video_path).expect("Failed to copy fixture");

    let selector = FrameSelector::new(SamplingConfig::new(), "run_1");
    let report = selector.process_video(&video_path).expect("Selection failed");

    assert_eq!(report.output_dir, workspace.path().join("sample-opencv"));
    assert_eq!(report.scheduled, 5);
    assert_eq!(report.frames_written.len(), 5);
    for written in &report.frames_written {
        assert!(written.exists());
        let image = image::open(written).expect("Written frame is not an image");
        assert_eq!((image.width(), image.height()), (64, 48));
    }
}

#[test]
fn test_pattern_samples_at_configured_rate() {
    let path = test_pattern_path();
    if !Path::new(path).exists() {
        return;
    }

    let workspace = tempfile::tempdir().expect("Failed to create temp dir");
    let config = SamplingConfig::new()
        .with_saving_frames_per_second(2.0)
        .with_blur_threshold(f64::INFINITY);
    let selector = FrameSelector::new(config, "tp");

    let mut video = VideoFile::open(path).expect("Failed to open fixture");
    let report = selector
        .select(&mut video, workspace.path())
        .expect("Selection failed");

    assert_eq!(report.scheduled, 10);
    assert_eq!(report.frames_written.len(), 10);
    assert!(report.remaining_targets.is_empty());
}
