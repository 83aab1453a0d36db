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

//! Platform abstraction for the media client.
//!
//! The client is single-threaded and cooperative; the one primitive it needs
//! from the platform is `spawn(future)`, which schedules a `!Send` future
//! onto the surrounding event loop (deferred device loads, permission rounds,
//! audio-context teardown).
//!
//! The correct implementation is selected at compile time via
//! `cfg(target_arch = "wasm32")`.

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::*;
#[cfg(target_arch = "wasm32")]
pub use web::*;
