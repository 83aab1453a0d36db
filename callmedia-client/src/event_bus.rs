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

//! MPMC (multi-producer, multi-consumer) broadcast bus for media events.
//!
//! Each [`MediaClient`](crate::MediaClient) owns one bus; the handlers
//! publish into it and any number of subscribers receive every event
//! independently. The bus is an explicitly constructed value, never a
//! process-wide channel, so independent clients (and tests) cannot observe
//! each other's events.

use crate::events::MediaEvent;
use async_broadcast::{broadcast, InactiveReceiver, Receiver, Sender};

/// Capacity of the event bus channel
const EVENT_BUS_CAPACITY: usize = 256;

/// Broadcast bus for [`MediaEvent`]s. Cloning shares the underlying channel.
#[derive(Clone)]
pub struct EventBus {
    sender: Sender<MediaEvent>,
    // Keeps the channel open while no subscriber is active.
    _keepalive: InactiveReceiver<MediaEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (mut sender, receiver) = broadcast(EVENT_BUS_CAPACITY);
        sender.set_overflow(true);
        Self {
            sender,
            _keepalive: receiver.deactivate(),
        }
    }

    /// Publish an event to all subscribers.
    ///
    /// Non-blocking. If the channel is full, the oldest event is dropped to
    /// make room (overflow behavior).
    pub fn publish(&self, event: MediaEvent) {
        let _ = self.sender.try_broadcast(event);
    }

    /// Subscribe to events. Each receiver independently sees every event
    /// published after the subscription was created.
    pub fn subscribe(&self) -> Receiver<MediaEvent> {
        self.sender.new_receiver()
    }

    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
