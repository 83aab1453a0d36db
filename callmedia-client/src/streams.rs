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
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

use crate::client::ClientInner;
use crate::error::CaptureError;
use crate::event_bus::EventBus;
use crate::events::MediaEvent;
use crate::platform;
use callmedia_types::{CallType, DeviceKind, PermissionStatus, StreamConstraints, TrackKind};
use futures::future::LocalBoxFuture;
use log::{error, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Asks the user (or an embedding policy layer) for capture permission.
pub trait PermissionGate {
    fn request(&self, kind: DeviceKind) -> LocalBoxFuture<'static, PermissionStatus>;
}

/// Acquires capture streams from the platform.
pub trait CaptureSource {
    fn acquire(
        &self,
        constraints: &StreamConstraints,
    ) -> LocalBoxFuture<'static, Result<Rc<dyn CaptureStream>, CaptureError>>;
}

/// An acquired capture stream, treated as opaque by everything above the
/// platform layer.
pub trait CaptureStream {
    fn id(&self) -> String;

    /// Enable or disable all tracks of one kind without releasing the stream.
    fn set_track_enabled(&self, kind: TrackKind, enabled: bool);

    /// Stop every track and release the underlying capture resources.
    fn stop(&self);
}

/// Permission-gated capture stream lifecycle.
///
/// Owns the active local stream; the client itself holds no capture state.
/// Permission outcomes surface through the event bus and the
/// `on_granted`/`on_denied` callbacks; acquisition failures are absorbed and
/// recovered locally, never returned to call-control logic as errors.
pub struct StreamHandler {
    client: Weak<ClientInner>,
    gate: Rc<dyn PermissionGate>,
    source: Rc<dyn CaptureSource>,
    bus: EventBus,
    granted: Cell<bool>,
    active: RefCell<Option<Rc<dyn CaptureStream>>>,
    on_granted: RefCell<Rc<dyn Fn()>>,
    on_denied: RefCell<Rc<dyn Fn(String)>>,
}

impl StreamHandler {
    pub(crate) fn new(
        client: Weak<ClientInner>,
        gate: Rc<dyn PermissionGate>,
        source: Rc<dyn CaptureSource>,
        bus: EventBus,
    ) -> Self {
        Self {
            client,
            gate,
            source,
            bus,
            granted: Cell::new(false),
            active: RefCell::new(None),
            on_granted: RefCell::new(Rc::new(|| {})),
            on_denied: RefCell::new(Rc::new(|_| {})),
        }
    }

    /// True once a permission round has fully succeeded.
    pub fn is_granted(&self) -> bool {
        self.granted.get()
    }

    /// Set the callback for when permission is granted
    pub fn set_on_granted(&self, callback: Rc<dyn Fn()>) {
        *self.on_granted.borrow_mut() = callback;
    }

    /// Set the callback for when permission is denied
    pub fn set_on_denied(&self, callback: Rc<dyn Fn(String)>) {
        *self.on_denied.borrow_mut() = callback;
    }

    /// Request capture permission for a call profile without acquiring a
    /// stream.
    ///
    /// Returns immediately; the outcome arrives through the event bus
    /// (`PermissionGranted` / `PermissionDenied`) and the callbacks.
    pub fn request_access(&self, call_type: CallType) {
        let client = self.client.clone();
        platform::spawn(async move {
            let Some(inner) = client.upgrade() else {
                return;
            };
            inner.streams.ensure_access(call_type).await;
        });
    }

    async fn ensure_access(&self, call_type: CallType) -> bool {
        let kinds = kinds_for(call_type);
        if kinds.is_empty() || self.granted.get() {
            return true;
        }
        for kind in kinds {
            if self.gate.request(kind).await == PermissionStatus::Denied {
                warn!("Capture permission denied for {kind}");
                self.bus
                    .publish(MediaEvent::PermissionDenied(kind.to_string()));
                let on_denied = self.on_denied.borrow().clone();
                on_denied(kind.to_string());
                return false;
            }
        }
        self.granted.set(true);
        self.bus.publish(MediaEvent::PermissionGranted);
        let on_granted = self.on_granted.borrow().clone();
        on_granted();
        true
    }

    /// Acquire a capture stream for `call_type`, replacing any active one.
    ///
    /// Failures are absorbed: a denied permission or an unusable platform
    /// surfaces through the event bus (and, for a missing camera, the
    /// no-camera acknowledgment prompt plus an audio-only retry), and the
    /// caller gets `None`.
    pub async fn acquire(&self, call_type: CallType) -> Option<Rc<dyn CaptureStream>> {
        if !self.ensure_access(call_type).await {
            return None;
        }
        let inner = self.client.upgrade()?;
        let constraints = inner.constraints.build(call_type);
        match self.source.acquire(&constraints).await {
            Ok(stream) => Some(self.install(stream, call_type)),
            Err(CaptureError::NoDevice(DeviceKind::VideoInput))
                if call_type == CallType::AudioVideo =>
            {
                warn!("No camera available, falling back to audio-only capture");
                inner.notify_no_capture_device();
                let audio_only = inner.constraints.build(CallType::Audio);
                match self.source.acquire(&audio_only).await {
                    Ok(stream) => Some(self.install(stream, CallType::Audio)),
                    Err(e) => {
                        error!("Audio-only fallback failed: {e}");
                        None
                    }
                }
            }
            Err(e) => {
                error!("Failed to acquire capture stream: {e}");
                None
            }
        }
    }

    fn install(&self, stream: Rc<dyn CaptureStream>, call_type: CallType) -> Rc<dyn CaptureStream> {
        if let Some(previous) = self.active.borrow_mut().replace(Rc::clone(&stream)) {
            previous.stop();
        }
        info!("Acquired capture stream {}", stream.id());
        self.bus.publish(MediaEvent::StreamAcquired { call_type });
        stream
    }

    /// Stop and drop the active stream. Safe to call when nothing is active.
    pub fn release(&self) {
        if let Some(stream) = self.active.borrow_mut().take() {
            stream.stop();
            info!("Released capture stream {}", stream.id());
            self.bus.publish(MediaEvent::StreamReleased);
        }
    }

    /// The active capture stream, if one is held.
    pub fn active(&self) -> Option<Rc<dyn CaptureStream>> {
        self.active.borrow().as_ref().map(Rc::clone)
    }

    /// Mute or unmute the active stream's tracks of one kind. No-op without
    /// an active stream.
    pub fn set_track_enabled(&self, kind: TrackKind, enabled: bool) {
        if let Some(stream) = self.active.borrow().as_ref() {
            stream.set_track_enabled(kind, enabled);
        }
    }
}

/// The device classes a call profile needs permission for. Screen capture is
/// consent-prompted by the platform surface picker itself, not by the gate.
fn kinds_for(call_type: CallType) -> Vec<DeviceKind> {
    match call_type {
        CallType::Audio => vec![DeviceKind::AudioInput],
        CallType::AudioVideo => vec![DeviceKind::AudioInput, DeviceKind::VideoInput],
        CallType::ScreenShare => Vec::new(),
    }
}
