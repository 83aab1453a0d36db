use crate::client::ClientInner;
use crate::event_bus::EventBus;
use crate::events::MediaEvent;
use crate::platform;
use callmedia_types::{DeviceInfo, DeviceKind};
use futures::future::LocalBoxFuture;
use log::{error, info};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Source of truth for which devices are attached.
///
/// `enumerate` is finite and restartable: every call performs a fresh
/// enumeration, so repeated loads observe hot-plugged or removed devices.
pub trait DeviceCatalog {
    fn enumerate(&self) -> LocalBoxFuture<'static, anyhow::Result<Vec<DeviceInfo>>>;
}

/// A "smart" list of the known devices of one kind, used by [`DevicesHandler`].
///
/// The list keeps track of a currently selected device, supporting selection
/// and a callback that is triggered when a selection is made.
pub struct DevicePicker {
    kind: DeviceKind,
    bus: EventBus,
    devices: RefCell<Vec<DeviceInfo>>,
    selected: RefCell<Option<String>>,
    on_selected: RefCell<Rc<dyn Fn(String)>>,
}

impl DevicePicker {
    fn new(kind: DeviceKind, bus: EventBus) -> Self {
        Self {
            kind,
            bus,
            devices: RefCell::new(Vec::new()),
            selected: RefCell::new(None),
            on_selected: RefCell::new(Rc::new(|_| {})),
        }
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Replace the callback triggered as `callback(device_id)` whenever a
    /// valid selection is made.
    pub fn set_on_selected(&self, callback: Rc<dyn Fn(String)>) {
        *self.on_selected.borrow_mut() = callback;
    }

    /// The devices currently known for this kind.
    pub fn devices(&self) -> Vec<DeviceInfo> {
        self.devices.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.borrow().is_empty()
    }

    /// The explicitly selected device id, if any.
    pub fn selection(&self) -> Option<String> {
        self.selected.borrow().clone()
    }

    /// The `device_id` of the currently selected device, falling back to the
    /// first known device, or `""` when there are none.
    pub fn selected(&self) -> String {
        if let Some(selected) = self.selected.borrow().as_ref() {
            return selected.clone();
        }
        match self.devices.borrow().first() {
            Some(device) => device.device_id.clone(),
            None => String::new(),
        }
    }

    /// Select a device by id.
    ///
    /// Triggers `on_selected(device_id)` and publishes a
    /// [`MediaEvent::DeviceSelected`] event. Does nothing when the id is not
    /// in [`devices()`](Self::devices).
    pub fn select(&self, device_id: &str) {
        let known = self
            .devices
            .borrow()
            .iter()
            .any(|device| device.device_id == device_id);
        if !known {
            return;
        }
        *self.selected.borrow_mut() = Some(device_id.to_string());
        self.bus.publish(MediaEvent::DeviceSelected {
            kind: self.kind,
            device_id: device_id.to_string(),
        });
        let callback = self.on_selected.borrow().clone();
        callback(device_id.to_string());
    }

    fn replace(&self, devices: Vec<DeviceInfo>) {
        {
            // A selection that did not survive re-enumeration is dropped.
            let mut selected = self.selected.borrow_mut();
            if let Some(id) = selected.as_ref() {
                if !devices.iter().any(|device| &device.device_id == id) {
                    *selected = None;
                }
            }
        }
        *self.devices.borrow_mut() = devices;
    }

    fn select_first_if_unset(&self) {
        if self.selection().is_some() {
            return;
        }
        let first = self
            .devices
            .borrow()
            .first()
            .map(|device| device.device_id.clone());
        if let Some(device_id) = first {
            self.select(&device_id);
        }
    }
}

/// Queries the catalog for the currently attached input and output devices
/// and maintains a current selection for each kind.
///
/// With the one exception of
/// [`select_audio_output`](Self::select_audio_output), which re-targets bound
/// playback sinks, the handler does not push selections anywhere on its own.
/// The embedding app reads selections from the pickers (typically from their
/// `on_selected` callbacks) and passes them where they are needed.
pub struct DevicesHandler {
    client: Weak<ClientInner>,
    catalog: Rc<dyn DeviceCatalog>,
    bus: EventBus,

    /// The known microphone devices. `pub` for access, "read-only" by convention.
    pub audio_inputs: DevicePicker,

    /// The known speaker devices.
    pub audio_outputs: DevicePicker,

    /// The known camera devices.
    pub video_inputs: DevicePicker,

    on_loaded: RefCell<Rc<dyn Fn()>>,
}

impl DevicesHandler {
    pub(crate) fn new(
        client: Weak<ClientInner>,
        catalog: Rc<dyn DeviceCatalog>,
        bus: EventBus,
    ) -> Self {
        Self {
            client,
            catalog,
            audio_inputs: DevicePicker::new(DeviceKind::AudioInput, bus.clone()),
            audio_outputs: DevicePicker::new(DeviceKind::AudioOutput, bus.clone()),
            video_inputs: DevicePicker::new(DeviceKind::VideoInput, bus.clone()),
            bus,
            on_loaded: RefCell::new(Rc::new(|| {})),
        }
    }

    /// Replace the callback triggered as `callback(())` after a
    /// [`load()`](Self::load) completes.
    pub fn set_on_loaded(&self, callback: Rc<dyn Fn()>) {
        *self.on_loaded.borrow_mut() = callback;
    }

    /// Query the catalog and repopulate the pickers.
    ///
    /// This is an asynchronous operation; once the lists are in place the
    /// `on_loaded` callback fires and a [`MediaEvent::DevicesLoaded`] event is
    /// published. The first device of each kind is then selected wherever no
    /// valid selection exists yet, triggering the pickers' `on_selected`
    /// callbacks. Calling `load` again re-enumerates from scratch.
    pub fn load(&self) {
        let enumerate = self.catalog.enumerate();
        let client = self.client.clone();
        let bus = self.bus.clone();
        platform::spawn(async move {
            let devices = match enumerate.await {
                Ok(devices) => devices,
                Err(e) => {
                    error!("Device enumeration failed: {e}");
                    return;
                }
            };
            let Some(inner) = client.upgrade() else {
                return;
            };
            let handler = &inner.devices;
            for picker in [
                &handler.audio_inputs,
                &handler.audio_outputs,
                &handler.video_inputs,
            ] {
                let devices_of_kind = devices
                    .iter()
                    .filter(|device| device.kind == picker.kind)
                    .cloned()
                    .collect();
                picker.replace(devices_of_kind);
            }
            info!("Loaded {} media devices", devices.len());
            bus.publish(MediaEvent::DevicesLoaded);
            let on_loaded = handler.on_loaded.borrow().clone();
            on_loaded();
            for picker in [
                &handler.audio_inputs,
                &handler.audio_outputs,
                &handler.video_inputs,
            ] {
                picker.select_first_if_unset();
            }
        });
    }

    /// Select the playback (speaker) device and re-target every bound
    /// playback sink to it.
    pub fn select_audio_output(&self, device_id: &str) {
        self.audio_outputs.select(device_id);
        if let Some(inner) = self.client.upgrade() {
            inner.elements.set_output_device(device_id);
        }
    }

    /// True when at least one camera is attached.
    pub fn has_camera(&self) -> bool {
        !self.video_inputs.is_empty()
    }
}
