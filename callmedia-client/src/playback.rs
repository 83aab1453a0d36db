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

use crate::streams::CaptureStream;
use log::warn;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Binds media streams to platform playback sinks (audio/video elements).
pub trait PlaybackBinder {
    fn bind(&self, sink_id: &str, stream: Rc<dyn CaptureStream>) -> anyhow::Result<()>;

    fn unbind(&self, sink_id: &str);

    /// Route a sink's audio output to the given device.
    fn set_sink_device(&self, sink_id: &str, device_id: &str) -> anyhow::Result<()>;
}

/// Tracks which playback sinks have a stream attached and keeps their output
/// routing in sync with the selected speaker.
pub struct ElementHandler {
    binder: Rc<dyn PlaybackBinder>,
    // sink id -> id of the stream bound to it
    bound: RefCell<HashMap<String, String>>,
}

impl ElementHandler {
    pub(crate) fn new(binder: Rc<dyn PlaybackBinder>) -> Self {
        Self {
            binder,
            bound: RefCell::new(HashMap::new()),
        }
    }

    /// Attach `stream` to the playback sink identified by `sink_id`.
    pub fn bind_stream(&self, sink_id: &str, stream: Rc<dyn CaptureStream>) -> anyhow::Result<()> {
        let stream_id = stream.id();
        self.binder.bind(sink_id, stream)?;
        self.bound
            .borrow_mut()
            .insert(sink_id.to_string(), stream_id);
        Ok(())
    }

    /// Detach whatever is bound to `sink_id`. Safe to call for an unknown sink.
    pub fn unbind_stream(&self, sink_id: &str) {
        if self.bound.borrow_mut().remove(sink_id).is_some() {
            self.binder.unbind(sink_id);
        }
    }

    /// Re-target every bound sink to the playback device `device_id`.
    ///
    /// A sink that refuses the switch keeps its previous routing; the failure
    /// is logged and the remaining sinks are still updated.
    pub fn set_output_device(&self, device_id: &str) {
        for sink_id in self.bound.borrow().keys() {
            if let Err(e) = self.binder.set_sink_device(sink_id, device_id) {
                warn!("Failed to switch playback sink {sink_id} to {device_id}: {e}");
            }
        }
    }

    /// The sinks that currently have a stream attached.
    pub fn bound_sinks(&self) -> Vec<String> {
        self.bound.borrow().keys().cloned().collect()
    }
}
