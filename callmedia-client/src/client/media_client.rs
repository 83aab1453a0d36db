use crate::audio::{AudioContextManager, AudioProcessingContext, PlatformAudioApi};
use crate::capabilities::CapabilityProbe;
use crate::constraints::ConstraintsHandler;
use crate::event_bus::EventBus;
use crate::events::{MediaEvent, ModalContent};
use crate::media_devices::{DeviceCatalog, DevicesHandler};
use crate::playback::{ElementHandler, PlaybackBinder};
use crate::streams::{CaptureSource, CaptureStream, PermissionGate, StreamHandler};
use anyhow::{bail, Result};
use callmedia_types::{CallType, StreamConstraints, TrackKind};
use log::info;
use std::rc::{Rc, Weak};

/// Options struct for constructing a client via [MediaClient::new(options)][MediaClient::new]
pub struct MediaClientOptions {
    /// Grants or denies capture permission. Mandatory: capture streams cannot
    /// be requested without it, so construction fails when it is absent.
    pub permission_gate: Option<Rc<dyn PermissionGate>>,

    /// Answers environment capability checks.
    pub capability_probe: Rc<dyn CapabilityProbe>,

    /// Enumerates the attached media devices.
    pub device_catalog: Rc<dyn DeviceCatalog>,

    /// Acquires capture streams from the platform.
    pub capture_source: Rc<dyn CaptureSource>,

    /// Binds streams to platform playback sinks.
    pub playback_binder: Rc<dyn PlaybackBinder>,

    /// Constructs audio processing contexts.
    pub audio_api: Rc<dyn PlatformAudioApi>,
}

pub(crate) struct ClientInner {
    pub(crate) constraints: ConstraintsHandler,
    pub(crate) devices: DevicesHandler,
    pub(crate) elements: ElementHandler,
    pub(crate) streams: StreamHandler,
    pub(crate) audio: AudioContextManager,
    pub(crate) bus: EventBus,
    pub(crate) probe: Rc<dyn CapabilityProbe>,
}

impl ClientInner {
    pub(crate) fn notify_no_capture_device(&self) {
        info!("Showing the no-camera acknowledgment prompt");
        self.bus
            .publish(MediaEvent::Modal(ModalContent::no_capture_device()));
    }
}

/// Top-level media resource coordinator for a call client.
///
/// Construct once per session via [`new(options)`][Self::new]. The client
/// wires the four media handlers together (each holding a non-owning
/// back-reference for cross-handler lookups) and owns the shared audio
/// processing context. Call-control logic asks it for capture resources and
/// subscribes to [`MediaEvent`]s for everything user-facing; the client holds
/// no capture or playback state of its own beyond the audio context slot.
///
/// Cloning is cheap and yields a handle to the same client.
#[derive(Clone)]
pub struct MediaClient {
    inner: Rc<ClientInner>,
}

impl PartialEq for MediaClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for MediaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaClient").finish_non_exhaustive()
    }
}

impl MediaClient {
    /// Constructor for the client struct.
    ///
    /// Fails when the mandatory permission gate is missing: a client without
    /// one could never acquire a capture stream, so it refuses to half-start.
    pub fn new(options: MediaClientOptions) -> Result<Self> {
        let Some(gate) = options.permission_gate else {
            bail!("a permission gate is required: capture streams cannot be requested without one");
        };
        let bus = EventBus::new();
        let inner = Rc::new_cyclic(|weak: &Weak<ClientInner>| ClientInner {
            constraints: ConstraintsHandler::new(weak.clone()),
            devices: DevicesHandler::new(weak.clone(), options.device_catalog, bus.clone()),
            elements: ElementHandler::new(options.playback_binder),
            streams: StreamHandler::new(weak.clone(), gate, options.capture_source, bus.clone()),
            audio: AudioContextManager::new(options.audio_api, bus.clone()),
            bus,
            probe: options.capability_probe,
        });
        Ok(Self { inner })
    }

    /// Extended check for media device support of the host environment.
    ///
    /// Recomputed from the capability probe on every call, never cached.
    pub fn supports_media_devices(&self) -> bool {
        self.inner.probe.supports_media_devices()
    }

    /// The shared audio processing context, created on first demand and
    /// reused while running. `None` means audio analysis is unavailable here.
    pub fn audio_context(&self) -> Option<Rc<dyn AudioProcessingContext>> {
        self.inner.audio.get_or_create()
    }

    /// Request asynchronous teardown of the shared audio processing context.
    /// Safe to call at any time, including when no context exists.
    pub fn close_audio_context(&self) {
        self.inner.audio.close();
    }

    /// Publish the acknowledgment prompt shown when no usable camera exists.
    ///
    /// Fire-and-forget: exactly one [`MediaEvent::Modal`] event goes out and
    /// the UI layer owns rendering and dismissal.
    pub fn notify_no_capture_device(&self) {
        self.inner.notify_no_capture_device();
    }

    /// Subscribe to media events. Each receiver independently sees every
    /// event published after subscribing.
    pub fn subscribe(&self) -> async_broadcast::Receiver<MediaEvent> {
        self.inner.bus.subscribe()
    }

    // The handlers are constructed and wired once, at client construction;
    // these accessors expose them for direct use.

    pub fn constraints(&self) -> &ConstraintsHandler {
        &self.inner.constraints
    }

    pub fn devices(&self) -> &DevicesHandler {
        &self.inner.devices
    }

    pub fn playback(&self) -> &ElementHandler {
        &self.inner.elements
    }

    pub fn streams(&self) -> &StreamHandler {
        &self.inner.streams
    }

    // Thin forwards for the common flows; each passes straight through to
    // the handler that owns the state.

    pub fn build_constraints(&self, call_type: CallType) -> StreamConstraints {
        self.inner.constraints.build(call_type)
    }

    pub fn load_devices(&self) {
        self.inner.devices.load();
    }

    pub async fn acquire_stream(&self, call_type: CallType) -> Option<Rc<dyn CaptureStream>> {
        self.inner.streams.acquire(call_type).await
    }

    pub fn release_stream(&self) {
        self.inner.streams.release();
    }

    pub fn set_track_enabled(&self, kind: TrackKind, enabled: bool) {
        self.inner.streams.set_track_enabled(kind, enabled);
    }

    pub fn bind_playback(&self, sink_id: &str, stream: Rc<dyn CaptureStream>) -> Result<()> {
        self.inner.elements.bind_stream(sink_id, stream)
    }

    pub fn unbind_playback(&self, sink_id: &str) {
        self.inner.elements.unbind_stream(sink_id);
    }
}
