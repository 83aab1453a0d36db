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
use crate::constants::{
    AUDIO_CHANNELS, AUDIO_SAMPLE_RATE, SCREEN_HEIGHT, SCREEN_WIDTH, VIDEO_FRAME_RATE,
    VIDEO_HEIGHT, VIDEO_WIDTH,
};
use callmedia_types::{AudioConstraints, CallType, StreamConstraints, VideoConstraints};
use std::rc::Weak;

/// Builds capture-constraint descriptors for a call profile.
///
/// Device preferences come from the devices handler's current selections,
/// looked up at build time, so a device switch is picked up by the next
/// acquisition without re-wiring anything.
pub struct ConstraintsHandler {
    client: Weak<ClientInner>,
}

impl ConstraintsHandler {
    pub(crate) fn new(client: Weak<ClientInner>) -> Self {
        Self { client }
    }

    pub fn build(&self, call_type: CallType) -> StreamConstraints {
        let (microphone, camera) = self.selected_inputs();
        match call_type {
            CallType::Audio => StreamConstraints {
                audio: Some(audio_constraints(microphone)),
                video: None,
            },
            CallType::AudioVideo => StreamConstraints {
                audio: Some(audio_constraints(microphone)),
                video: Some(VideoConstraints {
                    device_id: camera,
                    width: VIDEO_WIDTH,
                    height: VIDEO_HEIGHT,
                    frame_rate: VIDEO_FRAME_RATE,
                }),
            },
            // Screen capture: the platform picks the surface, no device
            // preference applies.
            CallType::ScreenShare => StreamConstraints {
                audio: None,
                video: Some(VideoConstraints {
                    device_id: None,
                    width: SCREEN_WIDTH,
                    height: SCREEN_HEIGHT,
                    frame_rate: VIDEO_FRAME_RATE,
                }),
            },
        }
    }

    fn selected_inputs(&self) -> (Option<String>, Option<String>) {
        match self.client.upgrade() {
            Some(inner) => (
                non_empty(inner.devices.audio_inputs.selected()),
                non_empty(inner.devices.video_inputs.selected()),
            ),
            None => (None, None),
        }
    }
}

fn audio_constraints(device_id: Option<String>) -> AudioConstraints {
    AudioConstraints {
        device_id,
        echo_cancellation: true,
        noise_suppression: true,
        auto_gain_control: true,
        sample_rate: AUDIO_SAMPLE_RATE,
        channel_count: AUDIO_CHANNELS,
    }
}

fn non_empty(device_id: String) -> Option<String> {
    if device_id.is_empty() {
        None
    } else {
        Some(device_id)
    }
}
