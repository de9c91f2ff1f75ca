//! SysEx control protocol for the Expert Sleepers ES-9 USB audio interface.
//!
//! The ES-9 exposes its DSP settings (routing, mixer crosspoints, EQ, DC
//! offsets and more) over MIDI System-Exclusive messages prefixed with
//! [`SYSEX_HEADER`]. This crate is the I/O-free codec for that protocol:
//!
//! - **`input`**: decodes device reports (configuration dump, mix dump,
//!   usage, sample rate, version, text messages) into snapshot types.
//! - **`output`**: builds every host-to-device command with range checks.
//! - **`routes`**: the device's route-code tables for routing sources and
//!   destinations.
//! - **`diagnostics`**: the injected sink that receives recoverable
//!   anomalies such as unknown route codes.
//!
//! MIDI transport (opening ports, adding the `F0`/`F7` framing, retries) is
//! left to the caller.
//!
//! ## Wire format
//!
//! Values wider than seven bits travel as byte triplets packed
//! `(b0 << 14) | (b1 << 7) | b2`; see [`es9_sysex_common`].
//!
//! | Direction | Frame |
//! |-----------|-------|
//! | host → device | `00 21 27 19 <type> <payload>` |
//! | device → host | `00 21 27 19 <type> <payload>` |

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]
#![deny(static_mut_refs)]

pub mod diagnostics;
pub mod ids;
pub mod input;
pub mod output;
pub mod routes;
pub mod snapshot;
pub mod types;

pub use diagnostics::*;
pub use ids::*;
pub use input::*;
pub use output::*;
pub use routes::*;
pub use snapshot::*;
pub use types::*;

use es9_sysex_common::SysexCommonError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Es9Error {
    #[error("{report} truncated: expected at least {expected}, got {actual}")]
    Truncated {
        report: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{report} has wrong length: expected {expected}, got {actual}")]
    InvalidLength {
        report: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid filter type tag: {0}")]
    InvalidFilterType(u32),

    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Channel {channel:?} has no {direction} route code")]
    ChannelNotRoutable {
        channel: Channel,
        direction: RouteDirection,
    },

    #[error("Channel {0:?} is not a physical output")]
    NotAnOutput(Channel),

    #[error("Report text is not ASCII")]
    InvalidText,

    #[error("Unknown report message type: 0x{0:02X}")]
    UnknownMessageType(u8),

    #[error("Frame does not start with the ES-9 SysEx header")]
    InvalidHeader,

    #[error("SysEx codec error: {0}")]
    Sysex(#[from] SysexCommonError),
}

pub type Es9Result<T> = Result<T, Es9Error>;
