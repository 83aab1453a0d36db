//! This crate provides the media-resource layer of a callmedia client: it
//! manages the lifecycle of shared capture and playback resources used by
//! voice/video calls, mediates access to platform media-capability checks,
//! and coordinates the four media handlers (constraints, devices, playback
//! elements, and stream lifecycle).
//!
//! The crate makes no assumptions about the UI, the transport, or the
//! concrete platform: permission prompting, device enumeration, capture
//! acquisition, playback binding and the audio processing graph are consumed
//! through capability traits supplied at construction. User-facing outcomes
//! (permission results, the no-camera prompt) are published on an event bus
//! rather than surfaced as errors.
//!
//! # Outline of usage
//!
//! For more detailed documentation see the doc for each struct.
//!
//! ## Client creation:
//! ```ignore
//! let options = MediaClientOptions {...}; // the six platform collaborators
//! let client = MediaClient::new(options)?;
//!
//! let mut events = client.subscribe();
//! ```
//!
//! ## Capture stream lifecycle:
//! ```ignore
//! client.load_devices();
//! let stream = client.acquire_stream(CallType::AudioVideo).await;
//! client.set_track_enabled(TrackKind::Audio, false); // mute
//! client.release_stream();
//! ```
//!
//! ## Shared audio processing context:
//! ```ignore
//! if let Some(context) = client.audio_context() {
//!     // feed it to an analyser; repeated calls return the same context
//! }
//! client.close_audio_context(); // async teardown, slot cleared on completion
//! ```

mod audio;
mod capabilities;
mod client;
mod constants;
mod constraints;
mod error;
mod event_bus;
mod events;
mod l10n;
mod media_devices;
mod platform;
mod playback;
mod streams;

pub use audio::{AudioContextManager, AudioContextState, AudioProcessingContext, PlatformAudioApi};
pub use capabilities::CapabilityProbe;
pub use client::{MediaClient, MediaClientOptions};
pub use constraints::ConstraintsHandler;
pub use error::CaptureError;
pub use event_bus::EventBus;
pub use events::{MediaEvent, ModalContent};
pub use media_devices::{DeviceCatalog, DevicePicker, DevicesHandler};
pub use playback::{ElementHandler, PlaybackBinder};
pub use streams::{CaptureSource, CaptureStream, PermissionGate, StreamHandler};

pub use callmedia_types::{
    AudioConstraints, CallType, DeviceInfo, DeviceKind, PermissionStatus, StreamConstraints,
    TrackKind, VideoConstraints,
};
