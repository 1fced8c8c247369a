// SPDX-License-Identifier: MPL-2.0

//! Snapshot and recording through a session

mod common;

use common::harness;
use selfie_camera::QuickFilter;
use selfie_camera::backends::virtual_camera::EBML_MAGIC;
use selfie_camera::errors::{AppError, CameraError, RecordingError};
use std::time::Duration;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[tokio::test]
async fn test_snapshot_downloads_png() {
    let mut h = harness();
    h.app.open_camera().await.unwrap();
    h.app.apply_quick_filter(QuickFilter::Pink);

    let path = h.app.take_snapshot().await.unwrap();

    let files = h.downloads.files();
    assert_eq!(files.len(), 1);
    let (filename, mime, data) = &files[0];
    assert!(filename.starts_with("selfie_"));
    assert!(filename.ends_with(".png"));
    assert_eq!(filename.len(), "selfie_YYYYMMDD_HHMMSS.png".len());
    assert_eq!(mime, "image/png");
    assert_eq!(&data[..8], &PNG_SIGNATURE);
    assert!(path.ends_with(filename));

    let decoded = image::load_from_memory(data).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));
    assert_eq!(
        h.notifier.toasts().last().map(String::as_str),
        Some("Photo saved")
    );
}

#[tokio::test]
async fn test_snapshot_requires_camera() {
    let mut h = harness();

    let err = h.app.take_snapshot().await.unwrap_err();

    assert_eq!(err, AppError::Camera(CameraError::NoActiveStream));
    assert!(h.downloads.files().is_empty());
    assert_eq!(h.notifier.toasts().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_recording_requires_camera() {
    let mut h = harness();

    let err = h.app.start_recording().unwrap_err();

    assert_eq!(err, AppError::Camera(CameraError::NoActiveStream));
    assert!(!h.app.is_recording());
    assert!(h.notifier.timer_labels().is_empty());
    assert_eq!(h.notifier.toasts(), vec!["Camera error: Camera is not open"]);
}

#[tokio::test(start_paused = true)]
async fn test_second_start_is_rejected() {
    let mut h = harness();
    h.app.open_camera().await.unwrap();
    h.app.start_recording().unwrap();

    let err = h.app.start_recording().unwrap_err();

    assert_eq!(err, AppError::Recording(RecordingError::AlreadyRecording));
    assert!(h.app.is_recording());
    assert_eq!(
        h.notifier.toasts().last().map(String::as_str),
        Some("Recording error: Recording already in progress")
    );
}

#[tokio::test(start_paused = true)]
async fn test_stop_while_idle_is_rejected() {
    let mut h = harness();

    let err = h.app.stop_recording().await.unwrap_err();

    assert_eq!(err, AppError::Recording(RecordingError::NotRecording));
    assert_eq!(
        h.notifier.toasts(),
        vec!["Recording error: No recording in progress"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_recording_downloads_clip() {
    let mut h = harness();
    h.app.open_camera().await.unwrap();

    h.app.start_recording().unwrap();
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(h.app.recording_elapsed_secs(), 2);
    h.app.stop_recording().await.unwrap();

    assert!(!h.app.is_recording());
    let files = h.downloads.files();
    assert_eq!(files.len(), 1);
    let (filename, mime, data) = &files[0];
    assert!(filename.starts_with("recording_"));
    assert!(filename.ends_with("_2s.webm"));
    assert_eq!(mime, "video/webm");
    assert_eq!(&data[..4], &EBML_MAGIC);

    assert_eq!(
        h.notifier.timer_labels(),
        vec![
            Some("00:00".to_string()),
            Some("00:01".to_string()),
            Some("00:02".to_string()),
            None,
        ]
    );
    assert_eq!(
        h.notifier.toasts()[1..],
        ["Recording started".to_string(), "Saved 2s recording".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn test_toggle_recording() {
    let mut h = harness();
    h.app.open_camera().await.unwrap();

    assert_eq!(h.app.toggle_recording().await.unwrap(), None);
    tokio::time::sleep(Duration::from_millis(1200)).await;
    let path = h.app.toggle_recording().await.unwrap().unwrap();

    assert!(path.to_string_lossy().ends_with("_1s.webm"));
    assert!(!h.app.is_recording());
}

#[tokio::test(start_paused = true)]
async fn test_closing_camera_saves_recording() {
    let mut h = harness();
    h.app.open_camera().await.unwrap();
    h.app.start_recording().unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert!(h.app.close_camera().await);

    assert!(!h.app.is_recording());
    assert_eq!(h.downloads.files().len(), 1);
    assert_eq!(
        h.app.start_recording().unwrap_err(),
        AppError::Camera(CameraError::NoActiveStream)
    );
}
