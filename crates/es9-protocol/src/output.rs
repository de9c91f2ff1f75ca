//! Host-to-device command encoding for the ES-9
//!
//! Each builder validates its arguments, then lays out
//! `00 21 27 19 <type> <payload>`. Out-of-range arguments are rejected, never
//! clamped. The SysEx `F0`/`F7` framing is added by the transport.

use es9_sysex_common::{FULL_TOP_MASK, PayloadBuilder, SIGNED_16_TOP_MASK};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::ids::{
    DC_OFFSET_LIMIT, FILTER_SLOTS_PER_MIX, MIDI_CHANNEL_MAX, MIX_COUNT, MIX_LEVEL_MAX,
    ROUTES_PER_BLOCK, SYSEX_HEADER, message_types,
};
use crate::routes::{channel_to_input_code, channel_to_output_code};
use crate::snapshot::{FilterSlot, HighPassFilters, MidiChannels, Options};
use crate::types::{Channel, FILTER_CODE_MAX, MixerLink, SaveSlot, encode_filter_byte};
use crate::{Es9Error, Es9Result};

/// Number of DSP blocks addressable by the routing commands.
pub const DSP_BLOCK_COUNT: u8 = 4;

/// Mixer inputs addressable by the set-mix command.
pub const MIX_INPUT_COUNT: u8 = 8;

const MIX_INDEX_MAX: i64 = MIX_COUNT as i64 - 1;
const FILTER_SLOT_MAX: i64 = FILTER_SLOTS_PER_MIX as i64 - 1;

/// An encoded command, header and message type included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    message_type: u8,
    data: Vec<u8>,
}

impl Message {
    fn new(message_type: u8, payload: &[u8]) -> Self {
        let mut data = Vec::with_capacity(SYSEX_HEADER.len() + 1 + payload.len());
        data.extend_from_slice(&SYSEX_HEADER);
        data.push(message_type);
        data.extend_from_slice(payload);

        let message = Self { message_type, data };
        trace!(
            message_type = message.message_type,
            bytes = %message.to_hex(),
            "encoded ES-9 message"
        );
        message
    }

    pub fn message_type(&self) -> u8 {
        self.message_type
    }

    /// Header, message type and payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes after the message type.
    pub fn payload(&self) -> &[u8] {
        self.data.get(SYSEX_HEADER.len() + 1..).unwrap_or(&[])
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Space-separated upper-case hex of [`Message::data`].
    pub fn to_hex(&self) -> String {
        self.data
            .iter()
            .map(|byte| format!("{byte:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Es9Result<()> {
    if value < min || value > max {
        return Err(Es9Error::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Upload one chunk of a configuration dump.
///
/// # Errors
///
/// Returns [`Es9Error::Sysex`] if `chunk` or any data byte is not 7-bit.
pub fn build_apply_configuration_dump(chunk: u8, data: &[u8]) -> Es9Result<Message> {
    let mut payload = PayloadBuilder::with_capacity(1 + data.len());
    payload.write_u8(chunk)?.write_bytes(data)?;
    Ok(Message::new(
        message_types::APPLY_CONFIGURATION_DUMP,
        payload.as_slice(),
    ))
}

pub fn build_request_version_string() -> Message {
    Message::new(message_types::REQUEST_VERSION_STRING, &[])
}

pub fn build_request_configuration_dump() -> Message {
    Message::new(message_types::REQUEST_CONFIGURATION_DUMP, &[])
}

/// Store the current settings in `slot`.
pub fn build_request_save(slot: SaveSlot) -> Message {
    Message::new(message_types::REQUEST_SAVE, &[slot as u8])
}

/// Reload the settings stored in `slot`.
pub fn build_request_restore(slot: SaveSlot) -> Message {
    Message::new(message_types::REQUEST_RESTORE, &[slot as u8])
}

pub fn build_request_reset() -> Message {
    Message::new(message_types::REQUEST_RESET, &[])
}

pub fn build_request_mix() -> Message {
    Message::new(message_types::REQUEST_MIX, &[])
}

pub fn build_request_usage() -> Message {
    Message::new(message_types::REQUEST_USAGE, &[])
}

pub fn build_request_sample_rate() -> Message {
    Message::new(message_types::REQUEST_SAMPLE_RATE, &[])
}

pub fn build_set_high_pass_filters(filters: &HighPassFilters) -> Message {
    Message::new(message_types::SET_HPF, &[filters.bits()])
}

pub fn build_set_options(options: &Options) -> Message {
    Message::new(message_types::SET_OPTIONS, &[options.bits()])
}

pub fn build_set_link(link: MixerLink, enabled: bool) -> Message {
    Message::new(message_types::SET_LINKS, &[link.code(), u8::from(enabled)])
}

/// # Errors
///
/// Returns [`Es9Error::OutOfRange`] if either channel exceeds 16.
pub fn build_set_midi_channels(channels: &MidiChannels) -> Es9Result<Message> {
    let max = i64::from(MIDI_CHANNEL_MAX);
    check_range("usb midi channel", i64::from(channels.usb), 0, max)?;
    check_range("din midi channel", i64::from(channels.din), 0, max)?;
    Ok(Message::new(
        message_types::SET_MIDI_CHANNELS,
        &[channels.usb, channels.din],
    ))
}

/// Set the DC offset of a physical output.
///
/// The channel byte on the wire is the zero-based output index.
///
/// # Errors
///
/// [`Es9Error::NotAnOutput`] unless `channel` is one of outputs 1-8,
/// [`Es9Error::OutOfRange`] if `|offset| > 3176`.
pub fn build_set_dc_offset(channel: Channel, offset: i16) -> Es9Result<Message> {
    let index = channel.output_index().ok_or(Es9Error::NotAnOutput(channel))?;
    let limit = i64::from(DC_OFFSET_LIMIT);
    check_range("dc offset", i64::from(offset), -limit, limit)?;

    let mut payload = PayloadBuilder::with_capacity(4);
    payload
        .write_u8(index)?
        .write_14_7_7(i32::from(offset), SIGNED_16_TOP_MASK);
    Ok(Message::new(message_types::SET_DC_OFFSET, payload.as_slice()))
}

/// Configure EQ slot `slot` (0-3) of mix `mix` (0-15).
///
/// # Errors
///
/// [`Es9Error::OutOfRange`] for an index outside its range or a frequency /
/// Q code above 32767.
pub fn build_set_filter(mix: u8, slot: u8, filter: &FilterSlot) -> Es9Result<Message> {
    check_range("mix", i64::from(mix), 0, MIX_INDEX_MAX)?;
    check_range("filter slot", i64::from(slot), 0, FILTER_SLOT_MAX)?;
    let code_max = i64::from(FILTER_CODE_MAX);
    check_range("filter frequency", i64::from(filter.frequency_code), 0, code_max)?;
    check_range("filter q", i64::from(filter.q_code), 0, code_max)?;

    let frequency = i32::try_from(filter.frequency_code).unwrap_or(i32::MAX);
    let q = i32::try_from(filter.q_code).unwrap_or(i32::MAX);

    let mut payload = PayloadBuilder::with_capacity(12);
    payload
        .write_u8(mix)?
        .write_u8(slot)?
        .write_u8(encode_filter_byte(filter.filter_type, filter.enabled))?
        .write_14_7_7(frequency, SIGNED_16_TOP_MASK)
        .write_14_7_7(q, SIGNED_16_TOP_MASK)
        .write_14_7_7(i32::from(filter.gain), SIGNED_16_TOP_MASK);
    Ok(Message::new(message_types::SET_FILTER, payload.as_slice()))
}

/// # Errors
///
/// Returns [`Es9Error::OutOfRange`] if `mix` exceeds 15.
pub fn build_set_smoothing(mix: u8, enabled: bool) -> Es9Result<Message> {
    check_range("mix", i64::from(mix), 0, MIX_INDEX_MAX)?;
    Ok(Message::new(
        message_types::SET_SMOOTHING,
        &[mix, u8::from(enabled)],
    ))
}

fn encode_routing(
    base: u8,
    block: u8,
    routing: &[Channel; ROUTES_PER_BLOCK],
    code_of: fn(Channel) -> Es9Result<u8>,
) -> Es9Result<Message> {
    check_range("dsp block", i64::from(block), 0, i64::from(DSP_BLOCK_COUNT) - 1)?;
    let mut payload = PayloadBuilder::with_capacity(ROUTES_PER_BLOCK);
    for &channel in routing {
        payload.write_u8(code_of(channel)?)?;
    }
    Ok(Message::new(base + block, payload.as_slice()))
}

/// Set the eight sources of DSP block `block` (0-3).
///
/// # Errors
///
/// [`Es9Error::OutOfRange`] for a bad block, [`Es9Error::ChannelNotRoutable`]
/// for a channel that cannot be a routing source.
pub fn build_set_inputs(block: u8, routing: &[Channel; ROUTES_PER_BLOCK]) -> Es9Result<Message> {
    encode_routing(message_types::SET_INPUTS, block, routing, channel_to_input_code)
}

/// Set the eight destinations of DSP block `block` (0-3).
///
/// # Errors
///
/// [`Es9Error::OutOfRange`] for a bad block, [`Es9Error::ChannelNotRoutable`]
/// for a channel that cannot be a routing destination.
pub fn build_set_outputs(block: u8, routing: &[Channel; ROUTES_PER_BLOCK]) -> Es9Result<Message> {
    encode_routing(message_types::SET_OUTPUTS, block, routing, channel_to_output_code)
}

/// Set one crosspoint level of mix `mix` (0-15).
///
/// # Errors
///
/// Returns [`Es9Error::OutOfRange`] for a bad mix or input index, or a
/// level above 32768.
pub fn build_set_mix(mix: u8, input: u8, level: u32) -> Es9Result<Message> {
    check_range("mix", i64::from(mix), 0, MIX_INDEX_MAX)?;
    check_range("mix input", i64::from(input), 0, i64::from(MIX_INPUT_COUNT) - 1)?;
    check_range("mix level", i64::from(level), 0, i64::from(MIX_LEVEL_MAX))?;

    let level = i32::try_from(level).unwrap_or(i32::MAX);
    let mut payload = PayloadBuilder::with_capacity(4);
    payload.write_u8(input)?.write_14_7_7(level, FULL_TOP_MASK);
    Ok(Message::new(message_types::SET_MIX + mix, payload.as_slice()))
}

/// A host-to-device command as data.
///
/// Useful for queuing or for accepting commands over a serialized
/// interface; [`Command::encode`] runs the matching builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    ApplyConfigurationDump { chunk: u8, data: Vec<u8> },
    RequestVersionString,
    RequestConfigurationDump,
    RequestSave { slot: SaveSlot },
    RequestRestore { slot: SaveSlot },
    RequestReset,
    RequestMix,
    RequestUsage,
    RequestSampleRate,
    SetHighPassFilters(HighPassFilters),
    SetOptions(Options),
    SetLink { link: MixerLink, enabled: bool },
    SetMidiChannels(MidiChannels),
    SetDcOffset { channel: Channel, offset: i16 },
    SetFilter { mix: u8, slot: u8, filter: FilterSlot },
    SetSmoothing { mix: u8, enabled: bool },
    SetInputs { block: u8, routing: [Channel; ROUTES_PER_BLOCK] },
    SetOutputs { block: u8, routing: [Channel; ROUTES_PER_BLOCK] },
    SetMix { mix: u8, input: u8, level: u32 },
}

impl Command {
    /// # Errors
    ///
    /// Whatever the corresponding `build_*` function returns.
    pub fn encode(&self) -> Es9Result<Message> {
        match self {
            Self::ApplyConfigurationDump { chunk, data } => {
                build_apply_configuration_dump(*chunk, data)
            }
            Self::RequestVersionString => Ok(build_request_version_string()),
            Self::RequestConfigurationDump => Ok(build_request_configuration_dump()),
            Self::RequestSave { slot } => Ok(build_request_save(*slot)),
            Self::RequestRestore { slot } => Ok(build_request_restore(*slot)),
            Self::RequestReset => Ok(build_request_reset()),
            Self::RequestMix => Ok(build_request_mix()),
            Self::RequestUsage => Ok(build_request_usage()),
            Self::RequestSampleRate => Ok(build_request_sample_rate()),
            Self::SetHighPassFilters(filters) => Ok(build_set_high_pass_filters(filters)),
            Self::SetOptions(options) => Ok(build_set_options(options)),
            Self::SetLink { link, enabled } => Ok(build_set_link(*link, *enabled)),
            Self::SetMidiChannels(channels) => build_set_midi_channels(channels),
            Self::SetDcOffset { channel, offset } => build_set_dc_offset(*channel, *offset),
            Self::SetFilter { mix, slot, filter } => build_set_filter(*mix, *slot, filter),
            Self::SetSmoothing { mix, enabled } => build_set_smoothing(*mix, *enabled),
            Self::SetInputs { block, routing } => build_set_inputs(*block, routing),
            Self::SetOutputs { block, routing } => build_set_outputs(*block, routing),
            Self::SetMix { mix, input, level } => build_set_mix(*mix, *input, *level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FilterType;

    #[test]
    fn test_envelope() {
        let msg = build_request_configuration_dump();
        assert_eq!(msg.data(), &[0x00, 0x21, 0x27, 0x19, 0x23]);
        assert_eq!(msg.message_type(), 0x23);
        assert!(msg.payload().is_empty());
        assert_eq!(msg.to_hex(), "00 21 27 19 23");
    }

    #[test]
    fn test_set_mix_full_scale() -> Result<(), Es9Error> {
        let msg = build_set_mix(0, 0, 32768)?;
        assert_eq!(msg.message_type(), 0x60);
        assert_eq!(msg.payload(), &[0x00, 0x02, 0x00, 0x00]);

        let msg = build_set_mix(15, 7, 1)?;
        assert_eq!(msg.message_type(), 0x6F);
        assert_eq!(msg.payload(), &[0x07, 0x00, 0x00, 0x01]);
        Ok(())
    }

    #[test]
    fn test_set_mix_rejects_out_of_range() {
        assert!(matches!(
            build_set_mix(16, 0, 0),
            Err(Es9Error::OutOfRange { field: "mix", .. })
        ));
        assert!(matches!(
            build_set_mix(0, 8, 0),
            Err(Es9Error::OutOfRange { field: "mix input", .. })
        ));
        assert_eq!(
            build_set_mix(0, 0, 32769),
            Err(Es9Error::OutOfRange {
                field: "mix level",
                value: 32769,
                min: 0,
                max: 32768
            })
        );
    }

    #[test]
    fn test_set_dc_offset() -> Result<(), Es9Error> {
        let msg = build_set_dc_offset(Channel::Output3, -3176)?;
        assert_eq!(msg.message_type(), 0x36);
        assert_eq!(msg.payload(), &[0x02, 0x03, 0x67, 0x18]);

        assert_eq!(
            build_set_dc_offset(Channel::MainOutL, 0),
            Err(Es9Error::NotAnOutput(Channel::MainOutL))
        );
        assert!(build_set_dc_offset(Channel::Output1, 3177).is_err());
        Ok(())
    }

    #[test]
    fn test_set_filter_layout() -> Result<(), Es9Error> {
        let filter = FilterSlot {
            enabled: true,
            filter_type: FilterType::Peak,
            frequency_code: 16384,
            q_code: 0x7F,
            gain: -1,
        };
        let msg = build_set_filter(3, 2, &filter)?;
        assert_eq!(
            msg.payload(),
            &[0x03, 0x02, 0x0D, 0x01, 0x00, 0x00, 0x00, 0x00, 0x7F, 0x03, 0x7F, 0x7F]
        );

        let too_high = FilterSlot {
            frequency_code: 32768,
            ..filter
        };
        assert!(build_set_filter(0, 0, &too_high).is_err());
        assert!(build_set_filter(0, 4, &filter).is_err());
        Ok(())
    }

    #[test]
    fn test_set_inputs_resolves_codes() -> Result<(), Es9Error> {
        let routing = [
            Channel::Input1,
            Channel::Input2,
            Channel::Bus4,
            Channel::Usb9,
            Channel::Mix11,
            Channel::SpdifL,
            Channel::SpdifR,
            Channel::Input14,
        ];
        let msg = build_set_inputs(2, &routing)?;
        assert_eq!(msg.message_type(), 0x42);
        assert_eq!(msg.payload(), &[0x78, 0x79, 0x63, 0x10, 0x32, 0x30, 0x31, 0x7F]);

        assert!(build_set_inputs(4, &routing).is_err());
        assert!(matches!(
            build_set_outputs(0, &routing),
            Err(Es9Error::ChannelNotRoutable { channel: Channel::Input1, .. })
        ));
        Ok(())
    }

    #[test]
    fn test_command_encode_matches_builder() -> Result<(), Es9Error> {
        let cmd = Command::SetLink {
            link: MixerLink::Usb1_2,
            enabled: true,
        };
        assert_eq!(cmd.encode()?, build_set_link(MixerLink::Usb1_2, true));
        assert_eq!(cmd.encode()?.payload(), &[0x10, 0x01]);
        Ok(())
    }
}
