//! Device report parsing for the ES-9
//!
//! Every parser takes the payload that follows the header and message-type
//! byte, and either returns a complete snapshot or an error. Unknown route
//! codes are the one recoverable anomaly: they are reported to a
//! [`DiagnosticSink`] and decode to [`Channel::Unspecified`].

use es9_sysex_common::{WordReader, byte_range, decode_14_7, pack_word, word_to_i16};
use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticSink, TracingDiagnostics};
use crate::ids::config_layout as layout;
use crate::ids::{
    CONFIG_DUMP_PREAMBLE_LEN, FILTER_SLOTS_PER_MIX, MIX_COUNT, MIX_DUMP_CROSSPOINT_BYTES,
    MIX_DUMP_LEN, ROUTES_PER_BLOCK, SAMPLE_RATE_REPORT_LEN, SYSEX_HEADER, USAGE_REPORT_LEN,
    VERSION_STRING_LEN, message_types,
};
use crate::routes::{code_to_channel_input_with, code_to_channel_output_with};
use crate::snapshot::{
    Configuration, CrosspointMatrix, FilterSlot, HighPassFilters, MidiChannels, MixConfiguration,
    MixerLinks, Options, RoutingConfiguration, Usage, VirtualMix,
};
use crate::types::{Channel, decode_filter_word};
use crate::{Es9Error, Es9Result};

/// Usage values are fixed point with this denominator.
const USAGE_SCALE: f32 = 4096.0;

/// The sample rate report counts in units of 4 Hz.
const SAMPLE_RATE_UNIT_HZ: u32 = 4;

/// Parse a configuration-dump word area, logging unknown route codes via
/// `tracing`.
///
/// # Errors
///
/// See [`parse_configuration_dump_with`].
pub fn parse_configuration_dump(payload: &[u8]) -> Es9Result<Configuration> {
    parse_configuration_dump_with(payload, &TracingDiagnostics)
}

/// Parse a configuration-dump word area.
///
/// `payload` starts at the first word; the report's 2-byte preamble must
/// already be stripped (the [`Report::parse`] dispatcher does this).
///
/// # Errors
///
/// - [`Es9Error::Truncated`] if the payload holds fewer than
///   [`layout::WORD_COUNT`] words. No partial result is returned.
/// - [`Es9Error::InvalidFilterType`] if any EQ slot carries an unknown type.
pub fn parse_configuration_dump_with(
    payload: &[u8],
    sink: &dyn DiagnosticSink,
) -> Es9Result<Configuration> {
    let reader = WordReader::from_bytes(payload);
    if reader.len() < layout::WORD_COUNT {
        return Err(Es9Error::Truncated {
            report: "configuration dump",
            expected: layout::WORD_COUNT,
            actual: reader.len(),
        });
    }

    let version = reader.word(layout::VERSION)?;
    let high_pass_filters = HighPassFilters::from_bits(reader.word(layout::HIGH_PASS_FILTERS)?);
    let routing = read_routing(&reader, sink)?;
    let crosspoints = read_crosspoints(&reader, layout::CROSSPOINTS)?;
    let options = Options::from_bits(reader.word(layout::OPTIONS)?);

    let links_low = reader.word(layout::LINKS_LOW)?;
    let links_high = reader.word(layout::LINKS_HIGH)?;
    let links = MixerLinks::from_bits((links_high << 16) | links_low);

    let midi_channels = MidiChannels::from_word(reader.word(layout::MIDI_CHANNELS)?);

    let mut dc_offsets = [0i16; 8];
    for (offset, &word) in dc_offsets
        .iter_mut()
        .zip(reader.words(layout::DC_OFFSETS, 8)?)
    {
        *offset = word_to_i16(word);
    }

    let filters = read_filters(&reader)?;

    let smoothing_bits = reader.word(layout::SMOOTHING)?;
    let smoothing = std::array::from_fn(|mix| (smoothing_bits >> mix) & 0x01 != 0);

    Ok(Configuration {
        version,
        high_pass_filters,
        routing,
        crosspoints,
        options,
        links,
        midi_channels,
        dc_offsets,
        filters,
        smoothing,
    })
}

fn read_routing(
    reader: &WordReader,
    sink: &dyn DiagnosticSink,
) -> Es9Result<RoutingConfiguration> {
    let mut routing = RoutingConfiguration::default();
    for (block, (inputs, outputs)) in routing
        .inputs
        .iter_mut()
        .zip(routing.outputs.iter_mut())
        .enumerate()
    {
        let base = block * ROUTES_PER_BLOCK;
        let input_codes = reader.words(layout::INPUT_ROUTING + base, ROUTES_PER_BLOCK)?;
        for (slot, &code) in inputs.iter_mut().zip(input_codes) {
            *slot = code_to_channel_input_with(code, sink);
        }
        let output_codes = reader.words(layout::OUTPUT_ROUTING + base, ROUTES_PER_BLOCK)?;
        for (slot, &code) in outputs.iter_mut().zip(output_codes) {
            *slot = code_to_channel_output_with(code, sink);
        }
    }
    Ok(routing)
}

/// Read both mixers' crosspoints: 16 consecutive mix rows of 8 inputs.
fn read_crosspoints(reader: &WordReader, start: usize) -> Es9Result<[CrosspointMatrix; 2]> {
    let mut matrices = [CrosspointMatrix::default(); 2];
    for (mixer, matrix) in matrices.iter_mut().enumerate() {
        for (output, row) in matrix.levels.iter_mut().enumerate() {
            let mix = mixer * 8 + output;
            row.copy_from_slice(reader.words(start + mix * 8, 8)?);
        }
    }
    Ok(matrices)
}

fn read_filters(reader: &WordReader) -> Es9Result<[[FilterSlot; FILTER_SLOTS_PER_MIX]; MIX_COUNT]> {
    let mut filters = [[FilterSlot::default(); FILTER_SLOTS_PER_MIX]; MIX_COUNT];
    for (mix, slots) in filters.iter_mut().enumerate() {
        for (index, slot) in slots.iter_mut().enumerate() {
            let base = layout::FILTERS + (mix * FILTER_SLOTS_PER_MIX + index) * 4;
            let (filter_type, enabled) = decode_filter_word(reader.word(base)?)?;
            *slot = FilterSlot {
                enabled,
                filter_type,
                frequency_code: reader.word(base + 1)?,
                q_code: reader.word(base + 2)?,
                gain: word_to_i16(reader.word(base + 3)?),
            };
        }
    }
    Ok(filters)
}

/// Parse a mix dump.
///
/// The first [`MIX_DUMP_CROSSPOINT_BYTES`] bytes are packed words holding
/// both crosspoint matrices. The 16 virtual-mix records that follow are
/// plain bytes, two per mix.
///
/// # Errors
///
/// Returns [`Es9Error::Truncated`] if the payload is shorter than
/// [`MIX_DUMP_LEN`].
pub fn parse_mix_dump(payload: &[u8]) -> Es9Result<MixConfiguration> {
    if payload.len() < MIX_DUMP_LEN {
        return Err(Es9Error::Truncated {
            report: "mix dump",
            expected: MIX_DUMP_LEN,
            actual: payload.len(),
        });
    }

    let reader = WordReader::from_bytes(byte_range(payload, 0, MIX_DUMP_CROSSPOINT_BYTES)?);
    let crosspoints = read_crosspoints(&reader, 0)?;

    let mut virtual_mixes = [VirtualMix::default(); MIX_COUNT];
    let pairs = byte_range(payload, MIX_DUMP_CROSSPOINT_BYTES, MIX_COUNT * 2)?;
    for (virtual_mix, pair) in virtual_mixes.iter_mut().zip(pairs.chunks_exact(2)) {
        if let [vmix, vpan] = *pair {
            *virtual_mix = VirtualMix { vmix, vpan };
        }
    }

    Ok(MixConfiguration {
        crosspoints,
        virtual_mixes,
    })
}

fn ascii_text(payload: &[u8]) -> Es9Result<String> {
    if !payload.is_ascii() {
        return Err(Es9Error::InvalidText);
    }
    Ok(payload.iter().copied().map(char::from).collect())
}

/// Parse a free-text report.
///
/// # Errors
///
/// [`Es9Error::Truncated`] for an empty payload, [`Es9Error::InvalidText`]
/// for non-ASCII bytes.
pub fn parse_message_report(payload: &[u8]) -> Es9Result<String> {
    if payload.is_empty() {
        return Err(Es9Error::Truncated {
            report: "message report",
            expected: 1,
            actual: 0,
        });
    }
    ascii_text(payload)
}

/// Parse the 6-character firmware version string.
///
/// # Errors
///
/// [`Es9Error::InvalidLength`] unless the payload is exactly 6 bytes,
/// [`Es9Error::InvalidText`] for non-ASCII bytes.
pub fn parse_version_string(payload: &[u8]) -> Es9Result<String> {
    expect_len("version string", payload, VERSION_STRING_LEN)?;
    ascii_text(payload)
}

/// Parse the DSP usage report: four `hi << 7 | lo` pairs scaled by 1/4096.
///
/// # Errors
///
/// [`Es9Error::InvalidLength`] unless the payload is exactly 8 bytes.
pub fn parse_usage(payload: &[u8]) -> Es9Result<Usage> {
    expect_len("usage report", payload, USAGE_REPORT_LEN)?;
    let mut usage = Usage::default();
    for (block, pair) in usage.blocks.iter_mut().zip(payload.chunks_exact(2)) {
        if let [hi, lo] = *pair {
            *block = f32::from(decode_14_7(hi, lo)) / USAGE_SCALE;
        }
    }
    Ok(usage)
}

/// Parse the sample rate report into Hz.
///
/// # Errors
///
/// [`Es9Error::InvalidLength`] unless the payload is exactly 3 bytes.
pub fn parse_sample_rate(payload: &[u8]) -> Es9Result<u32> {
    expect_len("sample rate report", payload, SAMPLE_RATE_REPORT_LEN)?;
    match *payload {
        [b0, b1, b2] => Ok(pack_word(b0, b1, b2) * SAMPLE_RATE_UNIT_HZ),
        _ => Err(Es9Error::InvalidLength {
            report: "sample rate report",
            expected: SAMPLE_RATE_REPORT_LEN,
            actual: payload.len(),
        }),
    }
}

fn expect_len(report: &'static str, payload: &[u8], expected: usize) -> Es9Result<()> {
    if payload.len() != expected {
        return Err(Es9Error::InvalidLength {
            report,
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

/// Split a SysEx body into its message type and payload.
///
/// A leading `F0` and trailing `F7` are stripped if present.
///
/// # Errors
///
/// [`Es9Error::InvalidHeader`] if the body does not start with
/// [`SYSEX_HEADER`], [`Es9Error::Truncated`] if the type byte is missing.
pub fn split_frame(frame: &[u8]) -> Es9Result<(u8, &[u8])> {
    let body = frame.strip_prefix(&[0xF0]).unwrap_or(frame);
    let body = body.strip_suffix(&[0xF7]).unwrap_or(body);
    let rest = body
        .strip_prefix(&SYSEX_HEADER)
        .ok_or(Es9Error::InvalidHeader)?;
    match rest.split_first() {
        Some((&message_type, payload)) => Ok((message_type, payload)),
        None => Err(Es9Error::Truncated {
            report: "sysex frame",
            expected: SYSEX_HEADER.len() + 1,
            actual: body.len(),
        }),
    }
}

/// Any report the device sends to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Report {
    ConfigurationDump(Box<Configuration>),
    Mix(Box<MixConfiguration>),
    Usage(Usage),
    SampleRate(u32),
    Message(String),
}

impl Report {
    /// Decode a report by message type.
    ///
    /// # Errors
    ///
    /// [`Es9Error::UnknownMessageType`] for a type that is not a device
    /// report, otherwise whatever the specific parser returns.
    pub fn parse(message_type: u8, payload: &[u8], sink: &dyn DiagnosticSink) -> Es9Result<Self> {
        match message_type {
            message_types::REPORT_CONFIGURATION_DUMP => {
                let words = payload.get(CONFIG_DUMP_PREAMBLE_LEN..).unwrap_or(&[]);
                parse_configuration_dump_with(words, sink)
                    .map(|config| Self::ConfigurationDump(Box::new(config)))
            }
            message_types::REPORT_MIX => parse_mix_dump(payload).map(|mix| Self::Mix(Box::new(mix))),
            message_types::REPORT_USAGE => parse_usage(payload).map(Self::Usage),
            message_types::REPORT_SAMPLE_RATE => parse_sample_rate(payload).map(Self::SampleRate),
            message_types::REPORT_MESSAGE => parse_message_report(payload).map(Self::Message),
            other => Err(Es9Error::UnknownMessageType(other)),
        }
    }

    /// Decode a whole SysEx body, see [`split_frame`].
    ///
    /// # Errors
    ///
    /// Any error of [`split_frame`] or [`Report::parse`].
    pub fn from_frame(frame: &[u8], sink: &dyn DiagnosticSink) -> Es9Result<Self> {
        let (message_type, payload) = split_frame(frame)?;
        Self::parse(message_type, payload, sink)
    }

    pub fn message_type(&self) -> u8 {
        match self {
            Self::ConfigurationDump(_) => message_types::REPORT_CONFIGURATION_DUMP,
            Self::Mix(_) => message_types::REPORT_MIX,
            Self::Usage(_) => message_types::REPORT_USAGE,
            Self::SampleRate(_) => message_types::REPORT_SAMPLE_RATE,
            Self::Message(_) => message_types::REPORT_MESSAGE,
        }
    }
}

/// Channels in `routing` that decoded to [`Channel::Unspecified`].
pub fn unspecified_routes(routing: &RoutingConfiguration) -> usize {
    routing
        .inputs
        .iter()
        .chain(routing.outputs.iter())
        .flatten()
        .filter(|&&channel| channel == Channel::Unspecified)
        .count()
}
