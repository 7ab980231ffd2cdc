//! Frame selector integration tests over synthetic in-memory sources.

mod common;

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use common::{MemorySource, file_names, flat_frames, striped_frame};
use framesift::{
    FrameSelector, FrameSiftError, ProgressCallback, ProgressInfo, SamplingConfig, blur_score,
};

fn selector(label: &str) -> FrameSelector {
    FrameSelector::new(SamplingConfig::new(), label)
}

// ── schedule matching ──────────────────────────────────────────────

#[test]
fn ten_frames_at_ten_fps_keep_five() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let source = MemorySource::new(flat_frames(10), 10.0, 10);

    let report = selector("run_1")
        .select(source, output.path())
        .expect("Selection failed");

    assert_eq!(report.scheduled, 5);
    assert_eq!(report.frames_written.len(), 5);
    assert_eq!(report.frames_discarded, 0);
    assert!(report.remaining_targets.is_empty());

    // The fourth target accumulates to 0.6000000000000001, so frame 6
    // (0.6s) falls short of it and frame 7 is taken instead.
    assert_eq!(
        file_names(output.path()),
        vec![
            "run_1frame0-00-00.00.jpg",
            "run_1frame0-00-00.20.jpg",
            "run_1frame0-00-00.40.jpg",
            "run_1frame0-00-00.70.jpg",
            "run_1frame0-00-00.80.jpg",
        ]
    );
}

#[test]
fn written_paths_are_in_playback_order() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let source = MemorySource::new(flat_frames(10), 10.0, 10);

    let report = selector("a").select(source, output.path()).expect("Selection failed");

    for path in &report.frames_written {
        assert_eq!(path.parent(), Some(output.path()));
        assert!(path.exists(), "{} missing", path.display());
    }
    let names: Vec<_> = report
        .frames_written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn sampling_rate_above_native_takes_every_frame() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let config = SamplingConfig::new().with_saving_frames_per_second(60.0);
    let source = MemorySource::new(flat_frames(4), 4.0, 4);

    let report = FrameSelector::new(config, "x")
        .select(source, output.path())
        .expect("Selection failed");

    assert_eq!(report.scheduled, 4);
    assert_eq!(report.frames_written.len(), 4);
}

// ── keep/discard polarity ──────────────────────────────────────────

#[test]
fn frames_above_threshold_are_discarded_but_consume_a_target() {
    assert!(blur_score(&striped_frame()) > 1000.0);

    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let mut frames = flat_frames(10);
    frames[2] = striped_frame();
    frames[7] = striped_frame();
    let source = MemorySource::new(frames, 10.0, 10);

    let report = selector("s").select(source, output.path()).expect("Selection failed");

    assert_eq!(report.frames_written.len(), 3);
    assert_eq!(report.frames_discarded, 2);
    assert!(report.remaining_targets.is_empty());
    assert_eq!(
        file_names(output.path()),
        vec![
            "sframe0-00-00.00.jpg",
            "sframe0-00-00.40.jpg",
            "sframe0-00-00.80.jpg",
        ]
    );
}

#[test]
fn score_equal_to_threshold_is_kept() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let config = SamplingConfig::new().with_blur_threshold(0.0);
    let source = MemorySource::new(flat_frames(10), 10.0, 10);

    let report = FrameSelector::new(config, "eq")
        .select(source, output.path())
        .expect("Selection failed");

    assert_eq!(report.frames_written.len(), 5);
}

#[test]
fn nothing_qualifies_below_zero_threshold() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let config = SamplingConfig::new().with_blur_threshold(-1.0);
    let source = MemorySource::new(flat_frames(10), 10.0, 10);

    let report = FrameSelector::new(config, "none")
        .select(source, output.path())
        .expect("Selection failed");

    assert!(report.frames_written.is_empty());
    assert_eq!(report.frames_discarded, 5);
    assert!(file_names(output.path()).is_empty());
}

// ── termination ────────────────────────────────────────────────────

#[test]
fn exhausted_schedule_stops_reading() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    // Twenty frames available, but the container only claims ten.
    let mut source = MemorySource::new(flat_frames(20), 10.0, 10);

    let report = selector("e")
        .select(&mut source, output.path())
        .expect("Selection failed");

    assert_eq!(report.frames_written.len(), 5);
    assert_eq!(report.frames_read, 10);
    assert_eq!(source.reads, 10);
}

#[test]
fn short_stream_leaves_targets_outstanding() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let source = MemorySource::new(flat_frames(3), 10.0, 10);

    let report = selector("short")
        .select(source, output.path())
        .expect("Short stream should not be an error");

    assert_eq!(report.frames_read, 3);
    assert_eq!(report.frames_written.len(), 2);
    assert_eq!(report.remaining_targets.len(), 3);
    assert!((report.remaining_targets[0] - 0.4).abs() < 1e-9);
}

#[test]
fn empty_stream_writes_nothing() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let source = MemorySource::new(Vec::new(), 25.0, 50);

    let report = selector("empty")
        .select(source, output.path())
        .expect("Empty stream should not be an error");

    assert_eq!(report.frames_read, 0);
    assert!(report.frames_written.is_empty());
    assert_eq!(report.remaining_targets.len(), report.scheduled);
}

#[test]
fn unknown_frame_rate_reads_one_frame_and_stops() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let mut source = MemorySource::new(flat_frames(5), 0.0, 0);

    let report = selector("zero")
        .select(&mut source, output.path())
        .expect("Selection failed");

    assert_eq!(report.scheduled, 0);
    assert_eq!(source.reads, 1);
    assert!(report.frames_written.is_empty());
}

// ── errors ─────────────────────────────────────────────────────────

#[test]
fn read_errors_propagate() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let source = MemorySource::new(flat_frames(10), 10.0, 10).failing_on(4);

    let result = selector("err").select(source, output.path());

    assert!(matches!(result, Err(FrameSiftError::VideoDecodeError(_))));
    // Frames before the failure were already written.
    assert_eq!(file_names(output.path()).len(), 2);
}

#[test]
fn write_errors_propagate() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = output.path().join("does-not-exist");
    let source = MemorySource::new(flat_frames(10), 10.0, 10);

    let result = selector("w").select(source, &missing);

    assert!(result.is_err());
}

#[test]
fn invalid_config_is_rejected_before_reading() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let config = SamplingConfig::new().with_saving_frames_per_second(0.0);
    let mut source = MemorySource::new(flat_frames(10), 10.0, 10);

    let result = FrameSelector::new(config, "bad").select(&mut source, output.path());

    assert!(matches!(result, Err(FrameSiftError::InvalidConfig(_))));
    assert_eq!(source.reads, 0);
}

// ── labels & progress ──────────────────────────────────────────────

#[test]
fn runs_with_different_labels_do_not_collide() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");

    let first = selector("run_101")
        .select(MemorySource::new(flat_frames(10), 10.0, 10), output.path())
        .expect("Selection failed");
    let second = selector("run_102")
        .select(MemorySource::new(flat_frames(10), 10.0, 10), output.path())
        .expect("Selection failed");

    assert_eq!(file_names(output.path()).len(), 10);
    for (a, b) in first.frames_written.iter().zip(&second.frames_written) {
        let a = a.file_name().unwrap().to_string_lossy().into_owned();
        let b = b.file_name().unwrap().to_string_lossy().into_owned();
        assert_ne!(a, b);
        assert_eq!(a.trim_start_matches("run_101"), b.trim_start_matches("run_102"));
    }
}

struct CountingProgress {
    calls: AtomicU64,
    last_written: AtomicU64,
}

impl ProgressCallback for CountingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_written.store(info.frames_written, Ordering::SeqCst);
        assert_eq!(info.total, Some(10));
    }
}

#[test]
fn progress_is_reported_per_frame_read() {
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let progress = Arc::new(CountingProgress {
        calls: AtomicU64::new(0),
        last_written: AtomicU64::new(0),
    });
    let config = SamplingConfig::new().with_progress(progress.clone());
    let source = MemorySource::new(flat_frames(10), 10.0, 10);

    let report = FrameSelector::new(config, "p")
        .select(source, output.path())
        .expect("Selection failed");

    assert_eq!(progress.calls.load(Ordering::SeqCst), report.frames_read);
    assert_eq!(progress.last_written.load(Ordering::SeqCst), 5);
}
