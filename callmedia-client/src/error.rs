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

use callmedia_types::DeviceKind;
use thiserror::Error as ThisError;

/// Failures a [`CaptureSource`](crate::CaptureSource) acquisition can report.
///
/// These never reach call-control logic: the stream handler absorbs them,
/// logging the failure and recovering locally (for a missing camera, by
/// prompting the user and retrying audio-only).
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CaptureError {
    /// No device of the required class is attached or visible.
    #[error("no {0} device available")]
    NoDevice(DeviceKind),

    /// The platform rejected the capture request.
    #[error("capture request rejected: {0}")]
    Rejected(String),
}
