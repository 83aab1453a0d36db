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

use super::{AudioContextState, AudioProcessingContext, PlatformAudioApi};
use crate::event_bus::EventBus;
use crate::events::MediaEvent;
use crate::platform;
use log::{error, info};
use std::cell::RefCell;
use std::rc::Rc;

/// Single point of truth for the shared audio-processing context.
///
/// At most one live context is held at a time, per manager instance.
/// [`get_or_create`](Self::get_or_create) hands the running context to every
/// caller; [`close`](Self::close) tears it down asynchronously and empties
/// the slot once the platform confirms teardown.
///
/// The slot is only ever touched from the single event-loop thread, so no
/// locking is involved. A `close()` whose completion has not fired yet,
/// followed by a new `get_or_create()`, may build a second context before the
/// first finishes tearing down; the replaced instance is dropped once its
/// teardown completes and is never handed out again.
pub struct AudioContextManager {
    api: Rc<dyn PlatformAudioApi>,
    bus: EventBus,
    slot: Rc<RefCell<Option<Rc<dyn AudioProcessingContext>>>>,
}

impl AudioContextManager {
    /// Normally constructed by [`MediaClient`](crate::MediaClient), which
    /// owns exactly one manager.
    pub fn new(api: Rc<dyn PlatformAudioApi>, bus: EventBus) -> Self {
        Self {
            api,
            bus,
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// Returns the shared context, creating it on first demand.
    ///
    /// A held context is reused while it is `Running`; anything else (no
    /// context yet, suspended, closing) causes a fresh construction attempt.
    /// `None` means audio analysis is unavailable on this platform; callers
    /// degrade (for example by disabling level visualization) rather than
    /// treating it as fatal.
    pub fn get_or_create(&self) -> Option<Rc<dyn AudioProcessingContext>> {
        if let Some(context) = self.slot.borrow().as_ref() {
            if context.state() == AudioContextState::Running {
                info!("Reusing existing audio processing context");
                return Some(Rc::clone(context));
            }
        }

        if !self.api.supports_processing() || !self.api.supports_stream_source() {
            error!("Audio analysis cannot run: the platform audio processing API is unavailable");
            return None;
        }

        match self.api.create_context() {
            Ok(context) => {
                info!("Initialized a new audio processing context");
                *self.slot.borrow_mut() = Some(Rc::clone(&context));
                Some(context)
            }
            Err(e) => {
                error!("Failed to initialize an audio processing context: {e}");
                None
            }
        }
    }

    /// Request teardown of the held context.
    ///
    /// No-op unless a running context is held, so calling this repeatedly or
    /// on an empty slot is always safe. The request is fire-and-forget: the
    /// slot is emptied when the platform reports completion, and only if it
    /// still holds the instance being closed, so a replacement created in the
    /// meantime stays untouched.
    pub fn close(&self) {
        let context = match self.slot.borrow().as_ref() {
            Some(context) if context.state() == AudioContextState::Running => Rc::clone(context),
            _ => return,
        };

        let slot = Rc::clone(&self.slot);
        let bus = self.bus.clone();
        platform::spawn(async move {
            context.close().await;
            info!("Closed audio processing context");
            {
                let mut held = slot.borrow_mut();
                if held
                    .as_ref()
                    .is_some_and(|current| Rc::ptr_eq(current, &context))
                {
                    *held = None;
                }
            }
            bus.publish(MediaEvent::AudioContextClosed);
        });
    }

    /// True while a context occupies the slot, regardless of its state.
    pub fn is_held(&self) -> bool {
        self.slot.borrow().is_some()
    }
}
