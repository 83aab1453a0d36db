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

//! Framework-agnostic event types for the media client.
//!
//! These events are published on the client's event bus and can be consumed
//! by any frontend layer; nothing user-facing is ever raised as an error
//! toward call-control logic.

use crate::constants::NO_CAMERA_HELP_URL;
use crate::l10n;
use callmedia_types::{CallType, DeviceKind};
use serde::Serialize;

/// Events emitted by the media client that UI layers can subscribe to.
#[derive(Clone, Debug)]
pub enum MediaEvent {
    // === Permission events ===
    /// Capture permission was granted for the requested device classes.
    PermissionGranted,

    /// Capture permission was denied; carries the device kind that failed.
    PermissionDenied(String),

    // === Device events ===
    /// Device enumeration finished and the pickers are populated.
    DevicesLoaded,

    /// A device was selected (explicitly or as the post-load default).
    DeviceSelected {
        kind: DeviceKind,
        device_id: String,
    },

    // === Stream events ===
    /// A capture stream was acquired.
    StreamAcquired { call_type: CallType },

    /// The active capture stream was released.
    StreamReleased,

    // === Audio context events ===
    /// Teardown of the shared audio processing context completed.
    AudioContextClosed,

    // === UI prompts ===
    /// A user-facing acknowledgment prompt. The UI layer owns rendering and
    /// dismissal; publishing never blocks.
    Modal(ModalContent),
}

/// Payload of an acknowledgment prompt.
///
/// The message body is HTML-safe and has all named placeholders resolved
/// before the event is published, so subscribers can render it directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalContent {
    pub title: String,
    pub html_message: String,
    pub help_url: String,
}

impl ModalContent {
    /// Content for the prompt shown when no usable camera is present.
    pub fn no_capture_device() -> Self {
        let anchor = format!(
            "<a href=\"{NO_CAMERA_HELP_URL}\" target=\"_blank\" rel=\"noopener noreferrer\">"
        );
        let html_message = l10n::resolve(
            l10n::text(l10n::StringId::ModalNoCameraMessage),
            &[("br", "<br>"), ("helpLink", &anchor), ("/helpLink", "</a>")],
        );
        Self {
            title: l10n::text(l10n::StringId::ModalNoCameraTitle).to_string(),
            html_message,
            help_url: NO_CAMERA_HELP_URL.to_string(),
        }
    }
}
