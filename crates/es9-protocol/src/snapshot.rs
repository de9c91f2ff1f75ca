//! Decoded device state
//!
//! Plain data types produced by the parsers in [`crate::input`] and consumed
//! by the command builders in [`crate::output`]. All of them serialize with
//! serde so a host application can hand them to its own data contract.

use serde::{Deserialize, Serialize};

use crate::ids::{FILTER_SLOTS_PER_MIX, MIX_COUNT, ROUTES_PER_BLOCK};
use crate::types::{Channel, FilterType, MixerLink};

/// Number of input pairs with a switchable high-pass filter.
pub const HPF_PAIR_COUNT: usize = 7;

/// DC-blocking high-pass filter state per physical input pair (1-2 .. 13-14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighPassFilters {
    pub enabled: [bool; HPF_PAIR_COUNT],
}

impl HighPassFilters {
    /// Decode the 7-bit pair mask; bit `i` is pair `2i+1 / 2i+2`.
    pub fn from_bits(bits: u32) -> Self {
        Self {
            enabled: std::array::from_fn(|i| (bits >> i) & 0x01 != 0),
        }
    }

    pub fn bits(&self) -> u8 {
        self.enabled
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .fold(0u8, |acc, (i, _)| acc | (1 << i))
    }
}

/// Routing of the four DSP blocks.
///
/// `inputs[block][slot]` is the source feeding slot `slot` of `block`,
/// `outputs[block][slot]` the destination of its output `slot`. Blocks 0-1
/// are the USB channels, 2-3 the two mixers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutingConfiguration {
    pub inputs: [[Channel; ROUTES_PER_BLOCK]; 4],
    pub outputs: [[Channel; ROUTES_PER_BLOCK]; 4],
}

/// 8x8 mixer crosspoint levels, `levels[output][input]`, 0 ..= 32768.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrosspointMatrix {
    pub levels: [[u32; 8]; 8],
}

impl CrosspointMatrix {
    pub fn level(&self, output: usize, input: usize) -> Option<u32> {
        self.levels.get(output)?.get(input).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub use_spdif: bool,
    pub use_midi_through: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            use_spdif: true,
            use_midi_through: false,
        }
    }
}

impl Options {
    /// Decode the options word. The S/PDIF flag is inverted on the wire.
    pub fn from_bits(bits: u32) -> Self {
        Self {
            use_spdif: bits & 0x01 == 0,
            use_midi_through: bits & 0x02 != 0,
        }
    }

    pub fn bits(&self) -> u8 {
        u8::from(!self.use_spdif) | (u8::from(self.use_midi_through) << 1)
    }
}

/// Stereo-link flags of the mixer channel pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MixerLinks {
    /// Physical input pairs 1-2 .. 13-14.
    pub input: [bool; 7],
    pub bus: [bool; 8],
    pub usb: [bool; 8],
    pub mix: [bool; 8],
}

impl MixerLinks {
    /// Decode the combined 32-bit link mask (`high << 16 | low`).
    pub fn from_bits(bits: u32) -> Self {
        let bit = |n: usize| (bits >> n) & 0x01 != 0;
        Self {
            input: std::array::from_fn(bit),
            bus: std::array::from_fn(|i| bit(8 + i)),
            usb: std::array::from_fn(|i| bit(16 + i)),
            mix: std::array::from_fn(|i| bit(24 + i)),
        }
    }

    pub fn bits(&self) -> u32 {
        MixerLink::ALL
            .iter()
            .filter(|&&link| self.is_linked(link))
            .fold(0, |acc, link| acc | link.mask())
    }

    pub fn is_linked(&self, link: MixerLink) -> bool {
        let code = usize::from(link.code());
        let group = match code >> 3 {
            0 => self.input.as_slice(),
            1 => self.bus.as_slice(),
            2 => self.usb.as_slice(),
            _ => self.mix.as_slice(),
        };
        group.get(code & 0x07).copied().unwrap_or(false)
    }
}

/// MIDI receive channels, 1 ..= 16, or 0 for off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MidiChannels {
    pub usb: u8,
    pub din: u8,
}

impl MidiChannels {
    /// Decode the channel word: USB in bits 8..15, DIN in bits 0..7.
    pub fn from_word(word: u32) -> Self {
        Self {
            usb: ((word >> 8) & 0xFF) as u8,
            din: (word & 0xFF) as u8,
        }
    }
}

/// One EQ slot. Frequency and Q are raw device codes; see
/// [`crate::types::filter_frequency_hz`] and [`crate::types::filter_q_factor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSlot {
    pub enabled: bool,
    pub filter_type: FilterType,
    pub frequency_code: u32,
    pub q_code: u32,
    pub gain: i16,
}

impl FilterSlot {
    pub fn frequency_hz(&self) -> f64 {
        crate::types::filter_frequency_hz(self.frequency_code)
    }

    pub fn q_factor(&self) -> f64 {
        crate::types::filter_q_factor(self.q_code)
    }
}

/// Full device configuration as reported by a configuration dump.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Configuration {
    pub version: u32,
    pub high_pass_filters: HighPassFilters,
    pub routing: RoutingConfiguration,
    /// Mixer 1 and mixer 2.
    pub crosspoints: [CrosspointMatrix; 2],
    pub options: Options,
    pub links: MixerLinks,
    pub midi_channels: MidiChannels,
    /// DC offsets of physical outputs 1-8.
    pub dc_offsets: [i16; 8],
    /// `filters[mix][slot]`.
    pub filters: [[FilterSlot; FILTER_SLOTS_PER_MIX]; MIX_COUNT],
    pub smoothing: [bool; MIX_COUNT],
}

impl Configuration {
    pub fn filter(&self, mix: usize, slot: usize) -> Option<&FilterSlot> {
        self.filters.get(mix)?.get(slot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VirtualMix {
    pub vmix: u8,
    pub vpan: u8,
}

/// Mixer state as reported by a mix dump.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MixConfiguration {
    pub crosspoints: [CrosspointMatrix; 2],
    pub virtual_mixes: [VirtualMix; MIX_COUNT],
}

/// DSP load of the four processing blocks, as fractions of capacity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Usage {
    pub blocks: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hpf_bits() {
        let hpf = HighPassFilters::from_bits(0x15);
        assert_eq!(
            hpf.enabled,
            [true, false, true, false, true, false, false]
        );
        assert_eq!(hpf.bits(), 0x15);
        assert_eq!(HighPassFilters::from_bits(0xFF).bits(), 0x7F);
    }

    #[test]
    fn test_options_spdif_is_inverted() {
        assert_eq!(
            Options::from_bits(0),
            Options {
                use_spdif: true,
                use_midi_through: false
            }
        );
        let opts = Options::from_bits(0x03);
        assert!(!opts.use_spdif);
        assert!(opts.use_midi_through);
        assert_eq!(opts.bits(), 0x03);
    }

    #[test]
    fn test_links_skip_bit_seven() {
        let links = MixerLinks::from_bits(0x80);
        assert_eq!(links, MixerLinks::default());

        let links = MixerLinks::from_bits(0x8000_0141);
        assert!(links.is_linked(MixerLink::Input1_2));
        assert!(links.is_linked(MixerLink::Input13_14));
        assert!(links.is_linked(MixerLink::Bus1_2));
        assert!(links.is_linked(MixerLink::Mix15_16));
        assert!(!links.is_linked(MixerLink::Usb1_2));
        assert_eq!(links.bits(), 0x8000_0141);
    }

    #[test]
    fn test_midi_channels_word() {
        assert_eq!(
            MidiChannels::from_word(0x0A03),
            MidiChannels { usb: 10, din: 3 }
        );
    }
}
