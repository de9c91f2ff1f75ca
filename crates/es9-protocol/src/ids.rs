//! Protocol identifiers and payload layout for the ES-9
//!
//! Every ES-9 SysEx body starts with the Expert Sleepers manufacturer ID
//! (`00 21 27`) followed by the ES-9 device byte `0x19`. The byte after the
//! header selects the message type.

/// Manufacturer ID plus ES-9 device byte.
pub const SYSEX_HEADER: [u8; 4] = [0x00, 0x21, 0x27, 0x19];

/// Message-type bytes.
pub mod message_types {
    // host -> device
    pub const APPLY_CONFIGURATION_DUMP: u8 = 0x09;
    pub const REQUEST_VERSION_STRING: u8 = 0x22;
    pub const REQUEST_CONFIGURATION_DUMP: u8 = 0x23;
    pub const REQUEST_SAVE: u8 = 0x24;
    pub const REQUEST_RESTORE: u8 = 0x25;
    pub const REQUEST_RESET: u8 = 0x26;
    pub const REQUEST_MIX: u8 = 0x2A;
    pub const REQUEST_USAGE: u8 = 0x2B;
    pub const REQUEST_SAMPLE_RATE: u8 = 0x2C;
    pub const SET_HPF: u8 = 0x31;
    pub const SET_OPTIONS: u8 = 0x32;
    pub const SET_LINKS: u8 = 0x33;
    /// Reserved for virtual-mix settings; no payload layout is defined.
    pub const SET_VIRTUAL_MIX: u8 = 0x34;
    pub const SET_MIDI_CHANNELS: u8 = 0x35;
    pub const SET_DC_OFFSET: u8 = 0x36;
    pub const SET_FILTER: u8 = 0x39;
    pub const SET_SMOOTHING: u8 = 0x3A;
    /// Base; the DSP block index is added.
    pub const SET_INPUTS: u8 = 0x40;
    /// Base; the DSP block index is added.
    pub const SET_OUTPUTS: u8 = 0x50;
    /// Base; the mix index is added.
    pub const SET_MIX: u8 = 0x60;

    // device -> host
    pub const REPORT_CONFIGURATION_DUMP: u8 = 0x08;
    pub const REPORT_MIX: u8 = 0x11;
    pub const REPORT_USAGE: u8 = 0x12;
    pub const REPORT_SAMPLE_RATE: u8 = 0x14;
    /// Shares its value with [`SET_OPTIONS`]; direction disambiguates.
    pub const REPORT_MESSAGE: u8 = 0x32;
}

/// Bytes preceding the word area of a configuration-dump report.
pub const CONFIG_DUMP_PREAMBLE_LEN: usize = 2;

/// Word offsets inside the configuration-dump word area.
pub mod config_layout {
    pub const VERSION: usize = 0;
    pub const HIGH_PASS_FILTERS: usize = 1;
    /// 4 DSP blocks x 8 input route codes.
    pub const INPUT_ROUTING: usize = 2;
    /// 4 DSP blocks x 8 output route codes.
    pub const OUTPUT_ROUTING: usize = 34;
    /// 2 mixers x 8 outputs x 8 inputs.
    pub const CROSSPOINTS: usize = 66;
    pub const OPTIONS: usize = 450;
    pub const LINKS_LOW: usize = 451;
    pub const LINKS_HIGH: usize = 452;
    pub const MIDI_CHANNELS: usize = 453;
    pub const DC_OFFSETS: usize = 454;
    /// 16 mixes x 4 slots x (type, freq, Q, gain).
    pub const FILTERS: usize = 462;
    pub const SMOOTHING: usize = 718;

    /// Minimum word count of a complete dump.
    pub const WORD_COUNT: usize = SMOOTHING + 1;
}

/// Bytes of packed crosspoint words at the start of a mix dump.
pub const MIX_DUMP_CROSSPOINT_BYTES: usize = 384;

/// Minimum byte length of a mix dump (crosspoints + 16 vmix/vpan pairs).
pub const MIX_DUMP_LEN: usize = MIX_DUMP_CROSSPOINT_BYTES + 16 * 2;

/// Exact payload length of the version string report.
pub const VERSION_STRING_LEN: usize = 6;
/// Exact payload length of the usage report.
pub const USAGE_REPORT_LEN: usize = 8;
/// Exact payload length of the sample rate report.
pub const SAMPLE_RATE_REPORT_LEN: usize = 3;

/// Routing slots per DSP block.
pub const ROUTES_PER_BLOCK: usize = 8;
/// Number of addressable mixes for EQ and smoothing.
pub const MIX_COUNT: usize = 16;
/// EQ slots per mix.
pub const FILTER_SLOTS_PER_MIX: usize = 4;
/// Largest mix level (unity gain).
pub const MIX_LEVEL_MAX: u32 = 32_768;
/// Largest DC offset magnitude.
pub const DC_OFFSET_LIMIT: i16 = 3_176;
/// Largest MIDI channel number; 0 disables the port.
pub const MIDI_CHANNEL_MAX: u8 = 16;
