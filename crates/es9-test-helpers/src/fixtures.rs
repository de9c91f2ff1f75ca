//! Synthetic device reports.
//!
//! The builders here lay out payloads from raw words and bytes, without
//! going through the protocol crate, so parse tests compare against an
//! independent description of the wire format.

use es9_sysex_common::{FULL_TOP_MASK, encode_14_7_7};

/// Words in a complete configuration dump.
pub const CONFIG_DUMP_WORDS: usize = 719;

const HPF: usize = 1;
const INPUT_ROUTING: usize = 2;
const OUTPUT_ROUTING: usize = 34;
const CROSSPOINTS: usize = 66;
const OPTIONS: usize = 450;
const LINKS_LOW: usize = 451;
const LINKS_HIGH: usize = 452;
const MIDI_CHANNELS: usize = 453;
const DC_OFFSETS: usize = 454;
const FILTERS: usize = 462;
const SMOOTHING: usize = 718;

/// Encode words with the full 7/7/7 split.
pub fn encode_words(words: &[u32]) -> Vec<u8> {
    words
        .iter()
        .flat_map(|&w| encode_14_7_7(i32::try_from(w).unwrap_or(i32::MAX), FULL_TOP_MASK))
        .collect()
}

/// Two's-complement bit pattern of `value` in 16 bits.
pub fn i16_word(value: i16) -> u32 {
    u32::from(u16::from_ne_bytes(value.to_ne_bytes()))
}

#[track_caller]
fn set(words: &mut [u32], index: usize, value: u32) {
    let len = words.len();
    match words.get_mut(index) {
        Some(slot) => *slot = value,
        None => panic!("fixture word {index} out of range ({len} words)"),
    }
}

/// Builder for a configuration-dump word area.
///
/// Starts from all-zero words; every setter addresses the documented word
/// offset directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDumpFixture {
    words: Vec<u32>,
}

impl Default for ConfigDumpFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDumpFixture {
    pub fn new() -> Self {
        Self {
            words: vec![0; CONFIG_DUMP_WORDS],
        }
    }

    /// Every routing slot set to a code known to the device.
    ///
    /// Sources are USB 1 (`0x00`), destinations main out L (`0x06`).
    pub fn with_valid_routes() -> Self {
        let mut fixture = Self::new();
        for block in 0..4 {
            for slot in 0..8 {
                fixture = fixture
                    .input_route(block, slot, 0x00)
                    .output_route(block, slot, 0x06);
            }
        }
        fixture
    }

    #[track_caller]
    pub fn word(mut self, index: usize, value: u32) -> Self {
        set(&mut self.words, index, value);
        self
    }

    pub fn version(self, version: u32) -> Self {
        self.word(0, version)
    }

    pub fn hpf(self, bits: u32) -> Self {
        self.word(HPF, bits)
    }

    pub fn input_route(self, block: usize, slot: usize, code: u32) -> Self {
        self.word(INPUT_ROUTING + block * 8 + slot, code)
    }

    pub fn output_route(self, block: usize, slot: usize, code: u32) -> Self {
        self.word(OUTPUT_ROUTING + block * 8 + slot, code)
    }

    /// `mix` 0-7 is mixer 1, 8-15 mixer 2.
    pub fn crosspoint(self, mix: usize, input: usize, level: u32) -> Self {
        self.word(CROSSPOINTS + mix * 8 + input, level)
    }

    pub fn options(self, bits: u32) -> Self {
        self.word(OPTIONS, bits)
    }

    /// Split a 32-bit link mask over its low and high words.
    pub fn links(self, bits: u32) -> Self {
        self.word(LINKS_LOW, bits & 0xFFFF)
            .word(LINKS_HIGH, bits >> 16)
    }

    pub fn midi_channels(self, usb: u8, din: u8) -> Self {
        self.word(MIDI_CHANNELS, (u32::from(usb) << 8) | u32::from(din))
    }

    /// `output` is zero-based.
    pub fn dc_offset(self, output: usize, offset: i16) -> Self {
        self.word(DC_OFFSETS + output, i16_word(offset))
    }

    /// Raw filter slot: `type_word` is `(type << 1) | enabled`.
    pub fn filter(
        self,
        mix: usize,
        slot: usize,
        type_word: u32,
        frequency_code: u32,
        q_code: u32,
        gain: i16,
    ) -> Self {
        let base = FILTERS + (mix * 4 + slot) * 4;
        self.word(base, type_word)
            .word(base + 1, frequency_code)
            .word(base + 2, q_code)
            .word(base + 3, i16_word(gain))
    }

    pub fn smoothing(self, bits: u32) -> Self {
        self.word(SMOOTHING, bits)
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Word area only, as handed to the configuration-dump parser.
    pub fn to_payload(&self) -> Vec<u8> {
        encode_words(&self.words)
    }

    /// Report payload: 2-byte preamble followed by the word area.
    pub fn to_report_payload(&self) -> Vec<u8> {
        let mut payload = vec![0x00, 0x00];
        payload.extend(self.to_payload());
        payload
    }
}

/// Builder for a mix-dump payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixDumpFixture {
    crosspoints: [u32; 128],
    virtual_mixes: [(u8, u8); 16],
}

impl Default for MixDumpFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl MixDumpFixture {
    pub fn new() -> Self {
        Self {
            crosspoints: [0; 128],
            virtual_mixes: [(0, 0); 16],
        }
    }

    /// `mix` 0-7 is mixer 1, 8-15 mixer 2.
    #[track_caller]
    pub fn crosspoint(mut self, mix: usize, input: usize, level: u32) -> Self {
        set(&mut self.crosspoints, mix * 8 + input, level);
        self
    }

    #[track_caller]
    pub fn virtual_mix(mut self, mix: usize, vmix: u8, vpan: u8) -> Self {
        match self.virtual_mixes.get_mut(mix) {
            Some(entry) => *entry = (vmix, vpan),
            None => panic!("virtual mix {mix} out of range"),
        }
        self
    }

    pub fn to_payload(&self) -> Vec<u8> {
        let mut payload = encode_words(&self.crosspoints);
        for &(vmix, vpan) in &self.virtual_mixes {
            payload.push(vmix);
            payload.push(vpan);
        }
        payload
    }
}
