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

//! # Shared audio processing context
//!
//! One expensive platform audio graph is shared by every component that needs
//! audio analysis:
//!
//! ```text
//! AudioContextManager
//! ├── slot: at most one live AudioProcessingContext
//! ├── get_or_create() → reuse while Running, build on demand
//! └── close() → async teardown, slot emptied on completion
//! ```

mod context_manager;
mod processing_context;

pub use context_manager::AudioContextManager;
pub use processing_context::{AudioContextState, AudioProcessingContext, PlatformAudioApi};
