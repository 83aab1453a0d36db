/*
 * Copyright 2025 CallMedia Contributors
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Integration tests for permission-gated capture stream lifecycle.

#![cfg(not(target_arch = "wasm32"))]

mod common;

use callmedia_client::{CallType, DeviceKind, MediaEvent, TrackKind};
use common::*;
use std::cell::RefCell;
use std::rc::Rc;

#[tokio::test]
async fn denied_permission_yields_none_and_an_event() {
    let h = harness();
    h.gate.denied.borrow_mut().push(DeviceKind::AudioInput);
    let mut rx = h.client.subscribe();

    let denied = Rc::new(RefCell::new(Vec::new()));
    let denied_clone = Rc::clone(&denied);
    h.client
        .streams()
        .set_on_denied(Rc::new(move |kind| denied_clone.borrow_mut().push(kind)));

    let stream = h.client.acquire_stream(CallType::Audio).await;

    assert!(stream.is_none());
    assert!(!h.client.streams().is_granted());
    assert!(
        h.capture.acquired.borrow().is_empty(),
        "no acquisition without permission"
    );
    assert_eq!(*denied.borrow(), vec!["audioinput".to_string()]);
    let events = drain(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, MediaEvent::PermissionDenied(kind) if kind == "audioinput")));
}

#[tokio::test]
async fn granted_acquisition_returns_a_stream() {
    let h = harness();
    let mut rx = h.client.subscribe();

    let granted = Rc::new(RefCell::new(0));
    let granted_clone = Rc::clone(&granted);
    h.client
        .streams()
        .set_on_granted(Rc::new(move || *granted_clone.borrow_mut() += 1));

    let stream = h.client.acquire_stream(CallType::Audio).await;

    assert!(stream.is_some());
    assert!(h.client.streams().is_granted());
    assert_eq!(*granted.borrow(), 1);
    assert_eq!(h.capture.acquired.borrow().len(), 1);
    assert!(h.capture.acquired.borrow()[0].audio.is_some());
    assert!(h.capture.acquired.borrow()[0].video.is_none());

    let events = drain(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, MediaEvent::PermissionGranted)));
    assert!(events.iter().any(
        |e| matches!(e, MediaEvent::StreamAcquired { call_type } if *call_type == CallType::Audio)
    ));
}

#[tokio::test]
async fn permission_round_runs_once_per_client() {
    let h = harness();

    h.client.acquire_stream(CallType::Audio).await;
    h.client.acquire_stream(CallType::Audio).await;

    assert_eq!(
        h.gate.requests.borrow().as_slice(),
        [DeviceKind::AudioInput],
        "a granted round is not repeated"
    );
}

#[tokio::test]
async fn video_calls_request_both_device_classes() {
    let h = harness();

    h.client.acquire_stream(CallType::AudioVideo).await;

    assert_eq!(
        h.gate.requests.borrow().as_slice(),
        [DeviceKind::AudioInput, DeviceKind::VideoInput]
    );
}

#[tokio::test]
async fn missing_camera_prompts_and_falls_back_to_audio_only() {
    let h = harness();
    h.capture.no_camera.set(true);
    let mut rx = h.client.subscribe();

    let stream = h.client.acquire_stream(CallType::AudioVideo).await;

    assert!(stream.is_some(), "the call proceeds without video");
    let attempts = h.capture.acquired.borrow();
    assert_eq!(attempts.len(), 2);
    assert!(attempts[0].video.is_some(), "first attempt wanted the camera");
    assert!(attempts[1].video.is_none(), "retry is audio-only");

    let events = drain(&mut rx);
    assert!(
        events.iter().any(|e| matches!(e, MediaEvent::Modal(_))),
        "the no-camera prompt was published"
    );
    assert!(events.iter().any(
        |e| matches!(e, MediaEvent::StreamAcquired { call_type } if *call_type == CallType::Audio)
    ));
}

#[tokio::test]
async fn rejected_capture_is_absorbed() {
    let h = harness();
    h.capture.reject.set(true);

    let stream = h.client.acquire_stream(CallType::Audio).await;

    assert!(stream.is_none());
    assert!(h.client.streams().active().is_none());
}

#[tokio::test]
async fn release_stops_the_active_stream() {
    let h = harness();
    let mut rx = h.client.subscribe();

    h.client.acquire_stream(CallType::Audio).await.expect("stream");
    h.client.release_stream();

    assert!(h.capture.streams.borrow()[0].stopped.get());
    assert!(h.client.streams().active().is_none());
    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(e, MediaEvent::StreamReleased)));

    // Releasing again is safe and publishes nothing new.
    h.client.release_stream();
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn a_new_acquisition_stops_the_previous_stream() {
    let h = harness();

    h.client.acquire_stream(CallType::Audio).await.expect("first");
    h.client.acquire_stream(CallType::Audio).await.expect("second");

    let streams = h.capture.streams.borrow();
    assert!(streams[0].stopped.get(), "replaced stream is stopped");
    assert!(!streams[1].stopped.get());
    assert_eq!(
        h.client.streams().active().expect("active").id(),
        streams[1].id
    );
}

#[tokio::test]
async fn track_toggling_reaches_the_active_stream() {
    let h = harness();

    h.client.acquire_stream(CallType::Audio).await.expect("stream");
    h.client.set_track_enabled(TrackKind::Audio, false);

    assert!(!h.capture.streams.borrow()[0].audio_enabled.get());

    h.client.set_track_enabled(TrackKind::Audio, true);
    assert!(h.capture.streams.borrow()[0].audio_enabled.get());
}

#[tokio::test]
async fn request_access_completes_in_the_background() {
    let h = harness();
    let mut rx = h.client.subscribe();

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            h.client.streams().request_access(CallType::Audio);
            assert!(!h.client.streams().is_granted(), "returns before the round");
            flush().await;
        })
        .await;

    assert!(h.client.streams().is_granted());
    let events = drain(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, MediaEvent::PermissionGranted)));
}

#[tokio::test]
async fn screen_share_skips_the_permission_gate() {
    let h = harness();

    let stream = h.client.acquire_stream(CallType::ScreenShare).await;

    assert!(stream.is_some());
    assert!(h.gate.requests.borrow().is_empty());
    assert!(h.capture.acquired.borrow()[0].audio.is_none());
}
