//! Property-based tests for configuration-dump field placement.

use es9_protocol::{FilterSlot, FilterType, RecordingDiagnostics, parse_configuration_dump_with};
use es9_test_helpers::prelude::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A filter written to one (mix, slot) decodes there and nowhere else.
    #[test]
    fn prop_filter_lands_in_its_own_slot(
        mix in 0usize..16,
        slot in 0usize..4,
        tag in 0u32..8,
        enabled in any::<bool>(),
        frequency_code in 1u32..=32767,
        q_code in 0u32..=32767,
        gain in any::<i16>(),
    ) {
        let fixture = ConfigDumpFixture::with_valid_routes().filter(
            mix,
            slot,
            (tag << 1) | u32::from(enabled),
            frequency_code,
            q_code,
            gain,
        );
        let sink = RecordingDiagnostics::new();
        let config = must(parse_configuration_dump_with(&fixture.to_payload(), &sink));

        let written = FilterSlot {
            enabled,
            filter_type: must(FilterType::from_tag(tag)),
            frequency_code,
            q_code,
            gain,
        };
        for (m, slots) in config.filters.iter().enumerate() {
            for (s, filter) in slots.iter().enumerate() {
                if (m, s) == (mix, slot) {
                    prop_assert_eq!(*filter, written);
                } else {
                    prop_assert_eq!(*filter, FilterSlot::default(), "mix {} slot {}", m, s);
                }
            }
        }
    }

    /// Each DC offset word belongs to exactly one output.
    #[test]
    fn prop_dc_offset_lands_on_its_output(output in 0usize..8, offset in -3176i16..=3176) {
        prop_assume!(offset != 0);
        let fixture = ConfigDumpFixture::with_valid_routes().dc_offset(output, offset);
        let config = must(parse_configuration_dump_with(&fixture.to_payload(), &RecordingDiagnostics::new()));
        for (index, &value) in config.dc_offsets.iter().enumerate() {
            prop_assert_eq!(value, if index == output { offset } else { 0 });
        }
    }
}
