//! ES-9 logical channels, filter types, mixer links and unit conversions.

use serde::{Deserialize, Serialize};

use crate::{Es9Error, Es9Result};

/// Logical routing endpoint on the ES-9.
///
/// Whether a channel can be used as a routing source or destination is
/// decided by the route tables in [`crate::routes`], not by the variant
/// group. Mixer outputs 9 and 10 have no route code on the device and are
/// therefore absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Channel {
    /// Route code that could not be resolved.
    #[default]
    Unspecified,

    Input1,
    Input2,
    Input3,
    Input4,
    Input5,
    Input6,
    Input7,
    Input8,
    Input9,
    Input10,
    Input11,
    Input12,
    Input13,
    Input14,

    Bus1,
    Bus2,
    Bus3,
    Bus4,
    Bus5,
    Bus6,
    Bus7,
    Bus8,
    Bus9,
    Bus10,
    Bus11,
    Bus12,
    Bus13,
    Bus14,
    Bus15,
    Bus16,

    Usb1,
    Usb2,
    Usb3,
    Usb4,
    Usb5,
    Usb6,
    Usb7,
    Usb8,
    Usb9,
    Usb10,
    Usb11,
    Usb12,
    Usb13,
    Usb14,
    Usb15,
    Usb16,

    Mix1,
    Mix2,
    Mix3,
    Mix4,
    Mix5,
    Mix6,
    Mix7,
    Mix8,
    Mix11,
    Mix12,
    Mix13,
    Mix14,
    Mix15,
    Mix16,

    SpdifL,
    SpdifR,

    Output1,
    Output2,
    Output3,
    Output4,
    Output5,
    Output6,
    Output7,
    Output8,

    MainOutL,
    MainOutR,
    PhonesL,
    PhonesR,
    /// ES-5 expander pair (auxiliary output).
    Es5L,
    Es5R,
}

/// Number of [`Channel`] variants, sentinel included.
pub const CHANNEL_COUNT: usize = Channel::ALL.len();

impl Channel {
    /// Every channel, in discriminant order.
    pub const ALL: [Channel; 77] = [
        Channel::Unspecified,
        Channel::Input1,
        Channel::Input2,
        Channel::Input3,
        Channel::Input4,
        Channel::Input5,
        Channel::Input6,
        Channel::Input7,
        Channel::Input8,
        Channel::Input9,
        Channel::Input10,
        Channel::Input11,
        Channel::Input12,
        Channel::Input13,
        Channel::Input14,
        Channel::Bus1,
        Channel::Bus2,
        Channel::Bus3,
        Channel::Bus4,
        Channel::Bus5,
        Channel::Bus6,
        Channel::Bus7,
        Channel::Bus8,
        Channel::Bus9,
        Channel::Bus10,
        Channel::Bus11,
        Channel::Bus12,
        Channel::Bus13,
        Channel::Bus14,
        Channel::Bus15,
        Channel::Bus16,
        Channel::Usb1,
        Channel::Usb2,
        Channel::Usb3,
        Channel::Usb4,
        Channel::Usb5,
        Channel::Usb6,
        Channel::Usb7,
        Channel::Usb8,
        Channel::Usb9,
        Channel::Usb10,
        Channel::Usb11,
        Channel::Usb12,
        Channel::Usb13,
        Channel::Usb14,
        Channel::Usb15,
        Channel::Usb16,
        Channel::Mix1,
        Channel::Mix2,
        Channel::Mix3,
        Channel::Mix4,
        Channel::Mix5,
        Channel::Mix6,
        Channel::Mix7,
        Channel::Mix8,
        Channel::Mix11,
        Channel::Mix12,
        Channel::Mix13,
        Channel::Mix14,
        Channel::Mix15,
        Channel::Mix16,
        Channel::SpdifL,
        Channel::SpdifR,
        Channel::Output1,
        Channel::Output2,
        Channel::Output3,
        Channel::Output4,
        Channel::Output5,
        Channel::Output6,
        Channel::Output7,
        Channel::Output8,
        Channel::MainOutL,
        Channel::MainOutR,
        Channel::PhonesL,
        Channel::PhonesR,
        Channel::Es5L,
        Channel::Es5R,
    ];

    /// Physical analog inputs 1–14.
    pub const INPUTS: [Channel; 14] = [
        Channel::Input1,
        Channel::Input2,
        Channel::Input3,
        Channel::Input4,
        Channel::Input5,
        Channel::Input6,
        Channel::Input7,
        Channel::Input8,
        Channel::Input9,
        Channel::Input10,
        Channel::Input11,
        Channel::Input12,
        Channel::Input13,
        Channel::Input14,
    ];

    /// Internal buses 1–16.
    pub const BUSES: [Channel; 16] = [
        Channel::Bus1,
        Channel::Bus2,
        Channel::Bus3,
        Channel::Bus4,
        Channel::Bus5,
        Channel::Bus6,
        Channel::Bus7,
        Channel::Bus8,
        Channel::Bus9,
        Channel::Bus10,
        Channel::Bus11,
        Channel::Bus12,
        Channel::Bus13,
        Channel::Bus14,
        Channel::Bus15,
        Channel::Bus16,
    ];

    /// USB audio channels 1–16.
    pub const USB: [Channel; 16] = [
        Channel::Usb1,
        Channel::Usb2,
        Channel::Usb3,
        Channel::Usb4,
        Channel::Usb5,
        Channel::Usb6,
        Channel::Usb7,
        Channel::Usb8,
        Channel::Usb9,
        Channel::Usb10,
        Channel::Usb11,
        Channel::Usb12,
        Channel::Usb13,
        Channel::Usb14,
        Channel::Usb15,
        Channel::Usb16,
    ];

    /// Physical analog outputs 1–8.
    pub const OUTPUTS: [Channel; 8] = [
        Channel::Output1,
        Channel::Output2,
        Channel::Output3,
        Channel::Output4,
        Channel::Output5,
        Channel::Output6,
        Channel::Output7,
        Channel::Output8,
    ];

    /// Discriminant, usable as a dense table index.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// `true` for the physical inputs 1–14.
    pub fn is_input(self) -> bool {
        Self::INPUTS.contains(&self)
    }

    /// `true` for the physical outputs 1–8.
    pub fn is_output(self) -> bool {
        Self::OUTPUTS.contains(&self)
    }

    /// Zero-based position among the physical outputs, if this is one.
    pub fn output_index(self) -> Option<u8> {
        Self::OUTPUTS
            .iter()
            .position(|&c| c == self)
            .and_then(|i| u8::try_from(i).ok())
    }
}

/// EQ filter shape stored in bits 1..3 of a filter-slot word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum FilterType {
    #[default]
    LowPass1stOrder = 0,
    HighPass1stOrder = 1,
    LowPass2ndOrder = 2,
    HighPass2ndOrder = 3,
    LowShelf = 4,
    HighShelf = 5,
    Peak = 6,
    InvertPhase = 7,
}

impl FilterType {
    /// Decode a filter-type tag, rejecting values outside `0..=7`.
    ///
    /// # Errors
    ///
    /// Returns [`Es9Error::InvalidFilterType`] for an unknown tag.
    pub fn from_tag(tag: u32) -> Es9Result<Self> {
        match tag {
            0 => Ok(Self::LowPass1stOrder),
            1 => Ok(Self::HighPass1stOrder),
            2 => Ok(Self::LowPass2ndOrder),
            3 => Ok(Self::HighPass2ndOrder),
            4 => Ok(Self::LowShelf),
            5 => Ok(Self::HighShelf),
            6 => Ok(Self::Peak),
            7 => Ok(Self::InvertPhase),
            other => Err(Es9Error::InvalidFilterType(other)),
        }
    }

    pub const fn tag(self) -> u8 {
        self as u8
    }
}

/// Split a filter-slot storage word into its type and enable flag.
///
/// Layout: `(filter_type << 1) | enabled`.
///
/// # Errors
///
/// Returns [`Es9Error::InvalidFilterType`] if the type tag is unknown.
pub fn decode_filter_word(word: u32) -> Es9Result<(FilterType, bool)> {
    let filter_type = FilterType::from_tag(word >> 1)?;
    Ok((filter_type, word & 0x01 != 0))
}

/// Pack a filter type and enable flag into the storage byte.
pub fn encode_filter_byte(filter_type: FilterType, enabled: bool) -> u8 {
    (filter_type.tag() << 1) | u8::from(enabled)
}

/// Lower bound of the EQ frequency range in Hz.
pub const FILTER_FREQUENCY_MIN_HZ: f64 = 10.0;
/// Upper bound of the EQ frequency range in Hz.
pub const FILTER_FREQUENCY_MAX_HZ: f64 = 22_000.0;
/// Lower bound of the EQ Q range.
pub const FILTER_Q_MIN: f64 = 0.1;
/// Upper bound of the EQ Q range.
pub const FILTER_Q_MAX: f64 = 18.0;
/// Largest raw frequency / Q code.
pub const FILTER_CODE_MAX: u32 = 32_767;

/// Convert a raw frequency code to Hz (logarithmic, 10 Hz – 22 kHz).
pub fn filter_frequency_hz(code: u32) -> f64 {
    let mult = (FILTER_FREQUENCY_MAX_HZ / FILTER_FREQUENCY_MIN_HZ).ln() / f64::from(FILTER_CODE_MAX);
    FILTER_FREQUENCY_MIN_HZ * (mult * f64::from(code)).exp()
}

/// Convert a raw Q code to a Q factor (logarithmic, 0.1 – 18.0).
pub fn filter_q_factor(code: u32) -> f64 {
    let mult = (FILTER_Q_MAX / FILTER_Q_MIN).ln() / f64::from(FILTER_CODE_MAX);
    FILTER_Q_MIN * (mult * f64::from(code)).exp()
}

/// Stereo link between two adjacent mixer channels.
///
/// The discriminant is both the bit position in the configuration-dump link
/// bitmask and the link code sent by the set-link command. Bit 7 is unused;
/// each group of links starts on a byte boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MixerLink {
    Input1_2 = 0x00,
    Input3_4 = 0x01,
    Input5_6 = 0x02,
    Input7_8 = 0x03,
    Input9_10 = 0x04,
    Input11_12 = 0x05,
    Input13_14 = 0x06,

    Bus1_2 = 0x08,
    Bus3_4 = 0x09,
    Bus5_6 = 0x0A,
    Bus7_8 = 0x0B,
    Bus9_10 = 0x0C,
    Bus11_12 = 0x0D,
    Bus13_14 = 0x0E,
    Bus15_16 = 0x0F,

    Usb1_2 = 0x10,
    Usb3_4 = 0x11,
    Usb5_6 = 0x12,
    Usb7_8 = 0x13,
    Usb9_10 = 0x14,
    Usb11_12 = 0x15,
    Usb13_14 = 0x16,
    Usb15_16 = 0x17,

    Mix1_2 = 0x18,
    Mix3_4 = 0x19,
    Mix5_6 = 0x1A,
    Mix7_8 = 0x1B,
    Mix9_10 = 0x1C,
    Mix11_12 = 0x1D,
    Mix13_14 = 0x1E,
    Mix15_16 = 0x1F,
}

impl MixerLink {
    pub const ALL: [MixerLink; 31] = [
        MixerLink::Input1_2,
        MixerLink::Input3_4,
        MixerLink::Input5_6,
        MixerLink::Input7_8,
        MixerLink::Input9_10,
        MixerLink::Input11_12,
        MixerLink::Input13_14,
        MixerLink::Bus1_2,
        MixerLink::Bus3_4,
        MixerLink::Bus5_6,
        MixerLink::Bus7_8,
        MixerLink::Bus9_10,
        MixerLink::Bus11_12,
        MixerLink::Bus13_14,
        MixerLink::Bus15_16,
        MixerLink::Usb1_2,
        MixerLink::Usb3_4,
        MixerLink::Usb5_6,
        MixerLink::Usb7_8,
        MixerLink::Usb9_10,
        MixerLink::Usb11_12,
        MixerLink::Usb13_14,
        MixerLink::Usb15_16,
        MixerLink::Mix1_2,
        MixerLink::Mix3_4,
        MixerLink::Mix5_6,
        MixerLink::Mix7_8,
        MixerLink::Mix9_10,
        MixerLink::Mix11_12,
        MixerLink::Mix13_14,
        MixerLink::Mix15_16,
    ];

    /// Wire code, equal to the bit position in the link bitmask.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn mask(self) -> u32 {
        1 << (self as u32)
    }
}

/// Preset storage slot targeted by save / restore requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SaveSlot {
    Standalone = 0,
    Hosted = 1,
}
