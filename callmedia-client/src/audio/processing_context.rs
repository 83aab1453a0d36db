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

use futures::future::LocalBoxFuture;
use std::rc::Rc;

/// Lifecycle states of an audio processing context.
///
/// `Suspended`, `Running` and `Closed` mirror the states a platform audio
/// graph reports; `Uninitialized` covers a context that was constructed but
/// never started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioContextState {
    Uninitialized,
    Suspended,
    Running,
    Closed,
}

/// A live audio-processing graph root, held by [`AudioContextManager`].
///
/// [`AudioContextManager`]: super::AudioContextManager
pub trait AudioProcessingContext {
    fn state(&self) -> AudioContextState;

    /// Request teardown of the graph.
    ///
    /// Teardown is asynchronous; the returned future resolves once the
    /// platform has released the underlying resources. A context is never
    /// closed twice.
    fn close(&self) -> LocalBoxFuture<'static, ()>;
}

/// Capability-gated constructor for audio processing contexts.
///
/// The manager only attempts construction when the platform can both build a
/// context and derive a stream source from one; either check failing means
/// audio analysis is unavailable and callers degrade.
pub trait PlatformAudioApi {
    /// True when the platform can construct a processing context.
    fn supports_processing(&self) -> bool;

    /// True when a capture stream can be fed into a context as a source node.
    fn supports_stream_source(&self) -> bool;

    fn create_context(&self) -> anyhow::Result<Rc<dyn AudioProcessingContext>>;
}
