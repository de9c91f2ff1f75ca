//! Route-code tables
//!
//! The DSP identifies routing sources ("input" codes) and destinations
//! ("output" codes) by 7-bit route codes. The forward tables below are the
//! device's own assignments; both lookup directions are derived from them
//! during constant evaluation, and a table that maps two channels to one
//! code (or one channel to two codes) fails the build.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticSink, TracingDiagnostics};
use crate::types::{CHANNEL_COUNT, Channel};
use crate::{Es9Error, Es9Result};

/// Which route table a code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteDirection {
    /// Routing source (signal fed into a DSP block).
    Input,
    /// Routing destination (where a DSP block output goes).
    Output,
}

impl fmt::Display for RouteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// Channels usable as routing sources and their codes.
pub const INPUT_ROUTE_CODES: [(Channel, u8); 62] = [
    (Channel::Input1, 0x78),
    (Channel::Input2, 0x79),
    (Channel::Input3, 0x76),
    (Channel::Input4, 0x75),
    (Channel::Input5, 0x74),
    (Channel::Input6, 0x7B),
    (Channel::Input7, 0x7A),
    (Channel::Input8, 0x77),
    (Channel::Input9, 0x73),
    (Channel::Input10, 0x72),
    (Channel::Input11, 0x7D),
    (Channel::Input12, 0x7C),
    (Channel::Input13, 0x7E),
    (Channel::Input14, 0x7F),
    (Channel::Bus1, 0x60),
    (Channel::Bus2, 0x61),
    (Channel::Bus3, 0x62),
    (Channel::Bus4, 0x63),
    (Channel::Bus5, 0x64),
    (Channel::Bus6, 0x65),
    (Channel::Bus7, 0x66),
    (Channel::Bus8, 0x67),
    (Channel::Bus9, 0x68),
    (Channel::Bus10, 0x69),
    (Channel::Bus11, 0x6A),
    (Channel::Bus12, 0x6B),
    (Channel::Bus13, 0x6C),
    (Channel::Bus14, 0x6D),
    (Channel::Bus15, 0x6E),
    (Channel::Bus16, 0x6F),
    (Channel::Usb1, 0x00),
    (Channel::Usb2, 0x01),
    (Channel::Usb3, 0x02),
    (Channel::Usb4, 0x03),
    (Channel::Usb5, 0x04),
    (Channel::Usb6, 0x05),
    (Channel::Usb7, 0x06),
    (Channel::Usb8, 0x07),
    (Channel::Usb9, 0x10),
    (Channel::Usb10, 0x11),
    (Channel::Usb11, 0x12),
    (Channel::Usb12, 0x13),
    (Channel::Usb13, 0x14),
    (Channel::Usb14, 0x15),
    (Channel::Usb15, 0x16),
    (Channel::Usb16, 0x17),
    (Channel::Mix1, 0x20),
    (Channel::Mix2, 0x21),
    (Channel::Mix3, 0x22),
    (Channel::Mix4, 0x23),
    (Channel::Mix5, 0x24),
    (Channel::Mix6, 0x25),
    (Channel::Mix7, 0x26),
    (Channel::Mix8, 0x27),
    (Channel::Mix11, 0x32),
    (Channel::Mix12, 0x33),
    (Channel::Mix13, 0x34),
    (Channel::Mix14, 0x35),
    (Channel::Mix15, 0x36),
    (Channel::Mix16, 0x37),
    (Channel::SpdifL, 0x30),
    (Channel::SpdifR, 0x31),
];

/// Channels usable as routing destinations and their codes.
pub const OUTPUT_ROUTE_CODES: [(Channel, u8); 30] = [
    (Channel::MainOutL, 0x06),
    (Channel::MainOutR, 0x07),
    (Channel::PhonesL, 0x0C),
    (Channel::PhonesR, 0x0D),
    (Channel::Es5L, 0x0E),
    (Channel::Es5R, 0x0F),
    (Channel::Output1, 0x08),
    (Channel::Output2, 0x09),
    (Channel::Output3, 0x04),
    (Channel::Output4, 0x05),
    (Channel::Output5, 0x02),
    (Channel::Output6, 0x03),
    (Channel::Output7, 0x0B),
    (Channel::Output8, 0x0A),
    (Channel::Bus1, 0x10),
    (Channel::Bus2, 0x11),
    (Channel::Bus3, 0x12),
    (Channel::Bus4, 0x13),
    (Channel::Bus5, 0x14),
    (Channel::Bus6, 0x15),
    (Channel::Bus7, 0x16),
    (Channel::Bus8, 0x17),
    (Channel::Bus9, 0x18),
    (Channel::Bus10, 0x19),
    (Channel::Bus11, 0x1A),
    (Channel::Bus12, 0x1B),
    (Channel::Bus13, 0x1C),
    (Channel::Bus14, 0x1D),
    (Channel::Bus15, 0x1E),
    (Channel::Bus16, 0x1F),
];

const CODE_SPACE: usize = 128;

#[expect(
    clippy::indexing_slicing,
    reason = "const evaluation; an out-of-bounds index fails the build"
)]
const fn is_bijective(table: &[(Channel, u8)]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let (channel, code) = table[i];
        if code as usize >= CODE_SPACE || matches!(channel, Channel::Unspecified) {
            return false;
        }
        let mut j = i + 1;
        while j < table.len() {
            let (other_channel, other_code) = table[j];
            if code == other_code || channel as u8 == other_channel as u8 {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

#[expect(
    clippy::indexing_slicing,
    reason = "const evaluation; codes are checked to be 7-bit first"
)]
const fn invert(table: &[(Channel, u8)]) -> [Channel; CODE_SPACE] {
    let mut by_code = [Channel::Unspecified; CODE_SPACE];
    let mut i = 0;
    while i < table.len() {
        let (channel, code) = table[i];
        by_code[code as usize] = channel;
        i += 1;
    }
    by_code
}

#[expect(
    clippy::indexing_slicing,
    reason = "const evaluation; every discriminant is below CHANNEL_COUNT"
)]
const fn forward(table: &[(Channel, u8)]) -> [Option<u8>; CHANNEL_COUNT] {
    let mut by_channel = [None; CHANNEL_COUNT];
    let mut i = 0;
    while i < table.len() {
        let (channel, code) = table[i];
        by_channel[channel as usize] = Some(code);
        i += 1;
    }
    by_channel
}

const _: () = assert!(is_bijective(&INPUT_ROUTE_CODES), "input route table is not bijective");
const _: () = assert!(is_bijective(&OUTPUT_ROUTE_CODES), "output route table is not bijective");

static INPUT_BY_CODE: [Channel; CODE_SPACE] = invert(&INPUT_ROUTE_CODES);
static OUTPUT_BY_CODE: [Channel; CODE_SPACE] = invert(&OUTPUT_ROUTE_CODES);
static INPUT_BY_CHANNEL: [Option<u8>; CHANNEL_COUNT] = forward(&INPUT_ROUTE_CODES);
static OUTPUT_BY_CHANNEL: [Option<u8>; CHANNEL_COUNT] = forward(&OUTPUT_ROUTE_CODES);

fn lookup_code(
    by_channel: &[Option<u8>; CHANNEL_COUNT],
    channel: Channel,
    direction: RouteDirection,
) -> Es9Result<u8> {
    by_channel
        .get(channel.index())
        .copied()
        .flatten()
        .ok_or(Es9Error::ChannelNotRoutable { channel, direction })
}

fn lookup_channel(
    by_code: &[Channel; CODE_SPACE],
    code: u32,
    direction: RouteDirection,
    sink: &dyn DiagnosticSink,
) -> Channel {
    let channel = usize::try_from(code)
        .ok()
        .and_then(|index| by_code.get(index))
        .copied()
        .unwrap_or_default();
    if channel == Channel::Unspecified {
        sink.unknown_route_code(direction, code);
    }
    channel
}

/// Route code of `channel` as a routing source.
///
/// # Errors
///
/// Returns [`Es9Error::ChannelNotRoutable`] if the channel cannot feed a
/// DSP block (for example a physical output).
pub fn channel_to_input_code(channel: Channel) -> Es9Result<u8> {
    lookup_code(&INPUT_BY_CHANNEL, channel, RouteDirection::Input)
}

/// Route code of `channel` as a routing destination.
///
/// # Errors
///
/// Returns [`Es9Error::ChannelNotRoutable`] if the channel cannot receive a
/// DSP block output.
pub fn channel_to_output_code(channel: Channel) -> Es9Result<u8> {
    lookup_code(&OUTPUT_BY_CHANNEL, channel, RouteDirection::Output)
}

/// Channel for a source route code, logging unknown codes via `tracing`.
pub fn code_to_channel_input(code: u32) -> Channel {
    code_to_channel_input_with(code, &TracingDiagnostics)
}

/// Channel for a destination route code, logging unknown codes via `tracing`.
pub fn code_to_channel_output(code: u32) -> Channel {
    code_to_channel_output_with(code, &TracingDiagnostics)
}

/// Channel for a source route code.
///
/// An unknown code is reported to `sink` and yields
/// [`Channel::Unspecified`]; this never fails.
pub fn code_to_channel_input_with(code: u32, sink: &dyn DiagnosticSink) -> Channel {
    lookup_channel(&INPUT_BY_CODE, code, RouteDirection::Input, sink)
}

/// Channel for a destination route code.
///
/// An unknown code is reported to `sink` and yields
/// [`Channel::Unspecified`]; this never fails.
pub fn code_to_channel_output_with(code: u32, sink: &dyn DiagnosticSink) -> Channel {
    lookup_channel(&OUTPUT_BY_CODE, code, RouteDirection::Output, sink)
}

pub fn is_input_routable(channel: Channel) -> bool {
    channel_to_input_code(channel).is_ok()
}

pub fn is_output_routable(channel: Channel) -> bool {
    channel_to_output_code(channel).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostic, RecordingDiagnostics};

    #[test]
    fn test_known_codes() -> Result<(), Es9Error> {
        assert_eq!(channel_to_input_code(Channel::Input1)?, 0x78);
        assert_eq!(channel_to_input_code(Channel::Mix11)?, 0x32);
        assert_eq!(channel_to_output_code(Channel::Output3)?, 0x04);
        assert_eq!(channel_to_output_code(Channel::Bus16)?, 0x1F);
        Ok(())
    }

    #[test]
    fn test_buses_route_both_ways_with_different_codes() -> Result<(), Es9Error> {
        for bus in Channel::BUSES {
            assert!(is_input_routable(bus) && is_output_routable(bus));
            assert_ne!(channel_to_input_code(bus)?, channel_to_output_code(bus)?);
        }
        Ok(())
    }

    #[test]
    fn test_unroutable_channels() {
        assert_eq!(
            channel_to_input_code(Channel::Output1),
            Err(Es9Error::ChannelNotRoutable {
                channel: Channel::Output1,
                direction: RouteDirection::Input
            })
        );
        assert!(channel_to_output_code(Channel::Usb1).is_err());
        assert!(!is_input_routable(Channel::Unspecified));
        assert!(!is_output_routable(Channel::Unspecified));
    }

    #[test]
    fn test_unknown_code_reports_and_returns_sentinel() {
        let sink = RecordingDiagnostics::new();
        assert_eq!(code_to_channel_input_with(0x50, &sink), Channel::Unspecified);
        assert_eq!(code_to_channel_output_with(0x1000, &sink), Channel::Unspecified);
        assert_eq!(
            sink.entries(),
            vec![
                Diagnostic::UnknownRouteCode {
                    direction: RouteDirection::Input,
                    code: 0x50
                },
                Diagnostic::UnknownRouteCode {
                    direction: RouteDirection::Output,
                    code: 0x1000
                },
            ]
        );
    }

    #[test]
    fn test_known_code_reports_nothing() {
        let sink = RecordingDiagnostics::new();
        assert_eq!(code_to_channel_output_with(0x0A, &sink), Channel::Output8);
        assert!(sink.is_empty());
    }
}
