//! Property-based tests for command encoding.

use es9_protocol::{
    Channel, FilterSlot, FilterType, MidiChannels, SYSEX_HEADER, build_set_dc_offset,
    build_set_filter, build_set_midi_channels, build_set_mix, message_types,
};
use es9_sysex_common::{is_seven_bit, pack_word, word_to_i16};
use es9_test_helpers::must;
use proptest::prelude::*;

fn filter_type() -> impl Strategy<Value = FilterType> {
    (0u32..8).prop_map(|tag| FilterType::from_tag(tag).unwrap_or_default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Valid mix levels encode as input byte + a triplet that packs back to
    /// the level, and every byte is 7-bit clean.
    #[test]
    fn prop_set_mix_recovers_level(mix in 0u8..16, input in 0u8..8, level in 0u32..=32768) {
        let msg = must(build_set_mix(mix, input, level));
        prop_assert_eq!(msg.message_type(), message_types::SET_MIX + mix);
        prop_assert!(msg.data().starts_with(&SYSEX_HEADER));
        prop_assert!(msg.data().iter().all(|&b| is_seven_bit(b)));
        match *msg.payload() {
            [i, b0, b1, b2] => {
                prop_assert_eq!(i, input);
                prop_assert_eq!(pack_word(b0, b1, b2), level);
            }
            ref other => prop_assert!(false, "unexpected payload {other:?}"),
        }
    }

    #[test]
    fn prop_set_mix_rejects_level_above_unity(level in 32769u32..=u32::MAX) {
        prop_assert!(build_set_mix(0, 0, level).is_err());
    }

    /// DC offsets in range survive the signed split.
    #[test]
    fn prop_dc_offset_recovers_value(output in 0usize..8, offset in -3176i16..=3176) {
        let channel = Channel::OUTPUTS[output];
        let msg = must(build_set_dc_offset(channel, offset));
        match *msg.payload() {
            [index, b0, b1, b2] => {
                prop_assert_eq!(usize::from(index), output);
                prop_assert_eq!(word_to_i16(pack_word(b0, b1, b2)), offset);
            }
            ref other => prop_assert!(false, "unexpected payload {other:?}"),
        }
    }

    #[test]
    fn prop_dc_offset_rejects_out_of_range(offset in prop_oneof![i16::MIN..-3176, 3177i16..=i16::MAX]) {
        prop_assert!(build_set_dc_offset(Channel::Output1, offset).is_err());
    }

    /// Filter frequency, Q and gain each come back from their triplets.
    #[test]
    fn prop_filter_fields_recover(
        mix in 0u8..16,
        slot in 0u8..4,
        filter_type in filter_type(),
        enabled in any::<bool>(),
        frequency_code in 0u32..=32767,
        q_code in 0u32..=32767,
        gain in any::<i16>(),
    ) {
        let filter = FilterSlot { enabled, filter_type, frequency_code, q_code, gain };
        let msg = must(build_set_filter(mix, slot, &filter));
        let payload = msg.payload();
        prop_assert_eq!(payload.len(), 12);
        prop_assert!(payload.iter().all(|&b| is_seven_bit(b)));
        prop_assert_eq!(payload[0], mix);
        prop_assert_eq!(payload[1], slot);
        prop_assert_eq!(payload[2], (filter_type.tag() << 1) | u8::from(enabled));
        prop_assert_eq!(pack_word(payload[3], payload[4], payload[5]), frequency_code);
        prop_assert_eq!(pack_word(payload[6], payload[7], payload[8]), q_code);
        prop_assert_eq!(word_to_i16(pack_word(payload[9], payload[10], payload[11])), gain);
    }

    #[test]
    fn prop_midi_channels(usb in 0u8..=32, din in 0u8..=32) {
        let result = build_set_midi_channels(&MidiChannels { usb, din });
        prop_assert_eq!(result.is_ok(), usb <= 16 && din <= 16);
        if let Ok(msg) = result {
            prop_assert_eq!(msg.payload(), &[usb, din][..]);
        }
    }
}
