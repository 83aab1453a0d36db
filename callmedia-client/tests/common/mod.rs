//! Shared fake collaborators for the integration tests.

#![allow(dead_code)]

use callmedia_client::*;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Yield to the cooperative scheduler so spawned local tasks complete.
pub async fn flush() {
    for _ in 0..3 {
        tokio::task::yield_now().await;
    }
}

pub fn drain(rx: &mut async_broadcast::Receiver<MediaEvent>) -> Vec<MediaEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn device(id: &str, kind: DeviceKind) -> DeviceInfo {
    DeviceInfo {
        device_id: id.to_string(),
        label: format!("{kind} {id}"),
        kind,
        group_id: None,
    }
}

// === Capability probe ===

pub struct FakeProbe {
    pub supported: Cell<bool>,
    pub calls: Cell<usize>,
}

impl Default for FakeProbe {
    fn default() -> Self {
        Self {
            supported: Cell::new(true),
            calls: Cell::new(0),
        }
    }
}

impl CapabilityProbe for FakeProbe {
    fn supports_media_devices(&self) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.supported.get()
    }
}

// === Permission gate ===

#[derive(Default)]
pub struct FakeGate {
    pub denied: RefCell<Vec<DeviceKind>>,
    pub requests: RefCell<Vec<DeviceKind>>,
}

impl PermissionGate for FakeGate {
    fn request(&self, kind: DeviceKind) -> LocalBoxFuture<'static, PermissionStatus> {
        self.requests.borrow_mut().push(kind);
        let denied = self.denied.borrow().contains(&kind);
        async move {
            if denied {
                PermissionStatus::Denied
            } else {
                PermissionStatus::Granted
            }
        }
        .boxed_local()
    }
}

// === Device catalog ===

#[derive(Default)]
pub struct FakeCatalog {
    pub devices: RefCell<Vec<DeviceInfo>>,
    pub enumerations: Cell<usize>,
}

impl DeviceCatalog for FakeCatalog {
    fn enumerate(&self) -> LocalBoxFuture<'static, anyhow::Result<Vec<DeviceInfo>>> {
        self.enumerations.set(self.enumerations.get() + 1);
        let devices = self.devices.borrow().clone();
        async move { Ok(devices) }.boxed_local()
    }
}

// === Capture source and streams ===

pub struct FakeStream {
    pub id: String,
    pub stopped: Cell<bool>,
    pub audio_enabled: Cell<bool>,
    pub video_enabled: Cell<bool>,
}

impl FakeStream {
    fn new(id: String) -> Self {
        Self {
            id,
            stopped: Cell::new(false),
            audio_enabled: Cell::new(true),
            video_enabled: Cell::new(true),
        }
    }
}

impl CaptureStream for FakeStream {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn set_track_enabled(&self, kind: TrackKind, enabled: bool) {
        match kind {
            TrackKind::Audio => self.audio_enabled.set(enabled),
            TrackKind::Video => self.video_enabled.set(enabled),
        }
    }

    fn stop(&self) {
        self.stopped.set(true);
    }
}

#[derive(Default)]
pub struct FakeCapture {
    /// When set, any request that wants video fails with a missing camera.
    pub no_camera: Cell<bool>,
    /// When set, every request is rejected outright.
    pub reject: Cell<bool>,
    pub acquired: RefCell<Vec<StreamConstraints>>,
    pub streams: RefCell<Vec<Rc<FakeStream>>>,
    next_id: Cell<u32>,
}

impl CaptureSource for FakeCapture {
    fn acquire(
        &self,
        constraints: &StreamConstraints,
    ) -> LocalBoxFuture<'static, Result<Rc<dyn CaptureStream>, CaptureError>> {
        self.acquired.borrow_mut().push(constraints.clone());
        if self.reject.get() {
            return async { Err(CaptureError::Rejected("capture disabled".into())) }.boxed_local();
        }
        if self.no_camera.get() && constraints.video.is_some() {
            return async { Err(CaptureError::NoDevice(DeviceKind::VideoInput)) }.boxed_local();
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let stream = Rc::new(FakeStream::new(format!("stream-{id}")));
        self.streams.borrow_mut().push(Rc::clone(&stream));
        let stream: Rc<dyn CaptureStream> = stream;
        async move { Ok(stream) }.boxed_local()
    }
}

// === Playback binder ===

#[derive(Default)]
pub struct FakeBinder {
    pub bindings: RefCell<Vec<(String, String)>>,
    pub unbound: RefCell<Vec<String>>,
    pub sink_devices: RefCell<Vec<(String, String)>>,
}

impl PlaybackBinder for FakeBinder {
    fn bind(&self, sink_id: &str, stream: Rc<dyn CaptureStream>) -> anyhow::Result<()> {
        self.bindings
            .borrow_mut()
            .push((sink_id.to_string(), stream.id()));
        Ok(())
    }

    fn unbind(&self, sink_id: &str) {
        self.unbound.borrow_mut().push(sink_id.to_string());
    }

    fn set_sink_device(&self, sink_id: &str, device_id: &str) -> anyhow::Result<()> {
        self.sink_devices
            .borrow_mut()
            .push((sink_id.to_string(), device_id.to_string()));
        Ok(())
    }
}

// === Audio processing ===

pub struct FakeAudioContext {
    pub state: Cell<AudioContextState>,
    pub close_calls: Cell<usize>,
    completion: RefCell<Option<oneshot::Receiver<()>>>,
}

impl AudioProcessingContext for FakeAudioContext {
    fn state(&self) -> AudioContextState {
        self.state.get()
    }

    fn close(&self) -> LocalBoxFuture<'static, ()> {
        self.close_calls.set(self.close_calls.get() + 1);
        self.state.set(AudioContextState::Closed);
        let completion = self.completion.borrow_mut().take();
        async move {
            if let Some(rx) = completion {
                let _ = rx.await;
            }
        }
        .boxed_local()
    }
}

pub struct FakeAudioApi {
    pub processing: Cell<bool>,
    pub stream_source: Cell<bool>,
    pub fail_create: Cell<bool>,
    pub created: RefCell<Vec<Rc<FakeAudioContext>>>,
    /// Attached to the next created context; its `close()` future resolves
    /// only once the paired sender fires.
    pub pending_completion: RefCell<Option<oneshot::Receiver<()>>>,
}

impl Default for FakeAudioApi {
    fn default() -> Self {
        Self {
            processing: Cell::new(true),
            stream_source: Cell::new(true),
            fail_create: Cell::new(false),
            created: RefCell::new(Vec::new()),
            pending_completion: RefCell::new(None),
        }
    }
}

impl FakeAudioApi {
    /// Make the next created context's close wait on the returned sender.
    pub fn defer_next_close(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.pending_completion.borrow_mut() = Some(rx);
        tx
    }
}

impl PlatformAudioApi for FakeAudioApi {
    fn supports_processing(&self) -> bool {
        self.processing.get()
    }

    fn supports_stream_source(&self) -> bool {
        self.stream_source.get()
    }

    fn create_context(&self) -> anyhow::Result<Rc<dyn AudioProcessingContext>> {
        if self.fail_create.get() {
            anyhow::bail!("context construction failed");
        }
        let context = Rc::new(FakeAudioContext {
            state: Cell::new(AudioContextState::Running),
            close_calls: Cell::new(0),
            completion: RefCell::new(self.pending_completion.borrow_mut().take()),
        });
        self.created.borrow_mut().push(Rc::clone(&context));
        Ok(context)
    }
}

// === Harness ===

pub struct TestHarness {
    pub probe: Rc<FakeProbe>,
    pub gate: Rc<FakeGate>,
    pub catalog: Rc<FakeCatalog>,
    pub capture: Rc<FakeCapture>,
    pub binder: Rc<FakeBinder>,
    pub audio: Rc<FakeAudioApi>,
    pub client: MediaClient,
}

pub fn harness() -> TestHarness {
    let probe = Rc::new(FakeProbe::default());
    let gate = Rc::new(FakeGate::default());
    let catalog = Rc::new(FakeCatalog::default());
    let capture = Rc::new(FakeCapture::default());
    let binder = Rc::new(FakeBinder::default());
    let audio = Rc::new(FakeAudioApi::default());
    let client = MediaClient::new(MediaClientOptions {
        permission_gate: Some(gate.clone()),
        capability_probe: probe.clone(),
        device_catalog: catalog.clone(),
        capture_source: capture.clone(),
        playback_binder: binder.clone(),
        audio_api: audio.clone(),
    })
    .expect("client construction");
    TestHarness {
        probe,
        gate,
        catalog,
        capture,
        binder,
        audio,
        client,
    }
}
