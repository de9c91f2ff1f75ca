//! Mix-dump parsing: packed crosspoint words followed by raw byte pairs.

use es9_protocol::{
    Es9Error, MixConfiguration, RecordingDiagnostics, Report, VirtualMix, message_types,
    parse_mix_dump,
};
use es9_test_helpers::prelude::*;

#[test]
fn crosspoints_and_virtual_mixes() -> TestResult {
    let mut fixture = MixDumpFixture::new()
        .crosspoint(0, 0, 32768)
        .crosspoint(7, 7, 1)
        .crosspoint(8, 0, 0x1234)
        .crosspoint(15, 7, 16384);
    for mix in 0..16u8 {
        fixture = fixture.virtual_mix(usize::from(mix), mix, 0x7F - mix);
    }

    let mix = parse_mix_dump(&fixture.to_payload())?;
    assert_eq!(mix.crosspoints[0].levels[0][0], 32768);
    assert_eq!(mix.crosspoints[0].levels[7][7], 1);
    assert_eq!(mix.crosspoints[1].levels[0][0], 0x1234);
    assert_eq!(mix.crosspoints[1].levels[7][7], 16384);
    assert_eq!(mix.crosspoints[0].level(3, 3), Some(0));

    for (i, vm) in mix.virtual_mixes.iter().enumerate() {
        let i = i as u8;
        assert_eq!(*vm, VirtualMix { vmix: i, vpan: 0x7F - i });
    }
    Ok(())
}

/// The virtual-mix section is addressed in bytes from offset 384, not as
/// words: byte 384 is mix 1's vmix, byte 385 its vpan.
#[test]
fn virtual_mix_offsets_are_bytes() -> TestResult {
    let mut payload = vec![0u8; 416];
    payload[384] = 0x11;
    payload[385] = 0x22;
    payload[414] = 0x33;
    payload[415] = 0x44;

    let mix = parse_mix_dump(&payload)?;
    assert_eq!(mix.virtual_mixes[0], VirtualMix { vmix: 0x11, vpan: 0x22 });
    assert_eq!(mix.virtual_mixes[15], VirtualMix { vmix: 0x33, vpan: 0x44 });
    assert_eq!(mix.crosspoints, MixConfiguration::default().crosspoints);
    Ok(())
}

#[test]
fn last_crosspoint_word_ends_at_byte_383() -> TestResult {
    let mut payload = vec![0u8; 416];
    payload[381] = 0x02;
    let mix = parse_mix_dump(&payload)?;
    assert_eq!(mix.crosspoints[1].levels[7][7], 32768);
    assert_eq!(mix.virtual_mixes[0], VirtualMix::default());
    Ok(())
}

#[test]
fn short_payload_is_truncated() {
    let payload = MixDumpFixture::new().to_payload();
    assert_eq!(
        parse_mix_dump(&payload[..415]),
        Err(Es9Error::Truncated {
            report: "mix dump",
            expected: 416,
            actual: 415
        })
    );
}

#[test]
fn extra_trailing_bytes_are_ignored() -> TestResult {
    let mut payload = MixDumpFixture::new().virtual_mix(15, 5, 6).to_payload();
    payload.extend_from_slice(&[0x7F; 5]);
    let mix = parse_mix_dump(&payload)?;
    assert_eq!(mix.virtual_mixes[15], VirtualMix { vmix: 5, vpan: 6 });
    Ok(())
}

#[test]
fn dispatched_as_mix_report() -> TestResult {
    let payload = MixDumpFixture::new().crosspoint(2, 1, 99).to_payload();
    let sink = RecordingDiagnostics::new();
    match Report::parse(message_types::REPORT_MIX, &payload, &sink)? {
        Report::Mix(mix) => assert_eq!(mix.crosspoints[0].levels[2][1], 99),
        other => return Err(format!("unexpected report {other:?}").into()),
    }
    Ok(())
}
