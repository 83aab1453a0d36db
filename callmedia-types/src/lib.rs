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

//! Shared vocabulary types for the callmedia client stack: device classes,
//! device descriptors, call profiles and capture-constraint descriptors.
//!
//! These types cross the boundary between the media client and its embedding
//! application (and, serialized, any non-Rust frontend), so everything here
//! is plain data with `serde` derives and no behavior beyond small helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classes of media device the client distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    AudioInput,
    AudioOutput,
    VideoInput,
}

impl DeviceKind {
    /// The platform spelling of this kind (matches `MediaDeviceInfo.kind`).
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::AudioInput => "audioinput",
            DeviceKind::AudioOutput => "audiooutput",
            DeviceKind::VideoInput => "videoinput",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single enumerated device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_id: String,
    /// Human-readable label; may be empty before capture permission is
    /// granted, depending on the platform.
    pub label: String,
    pub kind: DeviceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// The media profile of a call, used to derive capture constraints and the
/// set of permissions a call needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallType {
    Audio,
    AudioVideo,
    ScreenShare,
}

impl CallType {
    /// True when this profile captures camera video.
    pub fn wants_camera(&self) -> bool {
        matches!(self, CallType::AudioVideo)
    }

    /// True when this profile captures microphone audio.
    pub fn wants_microphone(&self) -> bool {
        matches!(self, CallType::Audio | CallType::AudioVideo)
    }
}

/// Track classes within an acquired stream, for per-kind mute toggling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Audio,
    Video,
}

/// Outcome of a capture permission request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Capture-constraint descriptor handed to the platform capture API.
///
/// A `None` side means "do not capture this kind at all", not "capture with
/// defaults".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioConstraints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoConstraints>,
}

/// Audio-side capture constraints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConstraints {
    /// Preferred input device; `None` lets the platform pick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    pub echo_cancellation: bool,
    pub noise_suppression: bool,
    pub auto_gain_control: bool,
    pub sample_rate: u32,
    pub channel_count: u32,
}

/// Video-side capture constraints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConstraints {
    /// Preferred input device; `None` lets the platform pick (always `None`
    /// for screen capture).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
}
