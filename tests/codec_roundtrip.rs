//! End-to-end packet codec tests
//!
//! Builds packets through the public API, mutates them, and checks that
//! encode/decode preserves every field and that the channel directory stays
//! complete across mutations.

use anyhow::{Context, Result, ensure};
use proptest::prelude::*;
use stationpack::{
    Channel, ChannelType, CodecConfig, Framing, NumericPayload, Packet, PacketError, PayloadKind,
};

const START_MICROS: i64 = 1_637_680_001_000_000;

fn station_packet() -> Result<Packet> {
    let mut packet = Packet::new();
    packet.identity.api = 1000;
    packet.identity.station_id = "1637610021".into();
    packet.identity.uuid = "a1b2c3".into();
    packet.device.make = "samsung".into();
    packet.device.battery_level_percent = 54.0;
    packet.servers.acquisition_server = "wss://acquisition.example.org".into();
    packet.timestamps.app_file_start_epoch_microseconds_utc = START_MICROS;

    let microphone =
        Channel::evenly_sampled("mic", vec![ChannelType::Microphone], 80.0, START_MICROS)?
            .with_payload(
                NumericPayload::Int32(vec![3, -1, 4, -1, 5, -9, 2, 6]),
                PayloadKind::Int32,
            )?;
    packet.add_channel(microphone).context("adding microphone")?;

    let mut accelerometer = Channel::unevenly_sampled(
        "accelerometer",
        accelerometer_axes(),
        vec![START_MICROS, START_MICROS + 20_000, START_MICROS + 41_000],
    )?;
    accelerometer.set_interleaved_payload(
        &[
            NumericPayload::Float32(vec![0.01, 0.02, 0.03]),
            NumericPayload::Float32(vec![-0.1, -0.1, -0.2]),
            NumericPayload::Float32(vec![9.81, 9.80, 9.82]),
        ],
        PayloadKind::Float32,
        true,
    )?;
    packet.add_channel(accelerometer).context("adding accelerometer")?;

    Ok(packet)
}

fn accelerometer_axes() -> Vec<ChannelType> {
    vec![ChannelType::AccelerometerX, ChannelType::AccelerometerY, ChannelType::AccelerometerZ]
}

#[test]
fn test_round_trip_after_mutations() -> Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    let mut packet = station_packet()?;

    // swap the accelerometer for an evenly sampled one and drop the microphone
    let replacement =
        Channel::evenly_sampled("accelerometer 50hz", accelerometer_axes(), 50.0, START_MICROS)?
            .with_payload(
                NumericPayload::Float64(vec![0.0, 0.1, 9.8, 0.0, 0.2, 9.7]),
                PayloadKind::Float64,
            )?;
    packet.edit_channel(ChannelType::AccelerometerY, replacement)?;
    let removed = packet.delete_channel(ChannelType::Microphone)?;
    ensure!(removed.sensor_name == "mic", "deleted the wrong channel: {}", removed.sensor_name);

    ensure!(
        packet.unevenly_sampled_channels().is_empty(),
        "accelerometer should have moved collections"
    );
    ensure!(!packet.has_channel(ChannelType::Microphone), "microphone should be gone");

    for framing in [Framing::Compressed, Framing::Uncompressed] {
        let bytes = packet.encode(framing)?;
        let decoded =
            Packet::decode(&bytes, framing).with_context(|| format!("decoding {framing:?}"))?;
        ensure!(decoded == packet, "{framing:?} round trip changed the packet");
    }

    let accel = packet.channel(ChannelType::AccelerometerZ).context("accelerometer present")?;
    assert_eq!(
        accel.get_payload(ChannelType::AccelerometerZ),
        NumericPayload::Float64(vec![9.8, 9.7])
    );
    assert_eq!(accel.value_mean(ChannelType::AccelerometerY), Some(0.15000000000000002));

    Ok(())
}

#[test]
fn test_statistics_survive_round_trip() -> Result<()> {
    let packet = station_packet()?;
    let bytes = packet.encode(Framing::Compressed)?;
    let decoded = Packet::decode(&bytes, Framing::Compressed)?;

    let mic = decoded.channel(ChannelType::Microphone).context("microphone present")?;
    assert_eq!(mic.value_mean(ChannelType::Microphone), Some(1.125));
    assert_eq!(mic.value_median(ChannelType::Microphone), Some(2.5));

    let accel = decoded.channel(ChannelType::AccelerometerX).context("accelerometer present")?;
    let uneven = accel.sampling().as_unevenly().context("accelerometer is unevenly sampled")?;
    assert_eq!(uneven.sample_interval_mean(), 20_500.0);
    assert_eq!(uneven.sample_interval_median(), 20_500.0);
    assert_eq!(uneven.sample_interval_std(), 500.0);

    Ok(())
}

#[test]
fn test_nan_sentinels_round_trip() -> Result<()> {
    let mut packet = station_packet()?;
    let light = Channel::unevenly_sampled("light", vec![ChannelType::Light], vec![START_MICROS])?
        .with_payload(NumericPayload::Int64(vec![7]), PayloadKind::Int64)?;
    packet.add_channel(light)?;
    let quiet = Channel::evenly_sampled("quiet", vec![ChannelType::Infrared], 10.0, START_MICROS)?
        .with_payload(NumericPayload::Int32(vec![]), PayloadKind::Int32)?;
    packet.add_channel(quiet)?;

    let light = packet.channel(ChannelType::Light).context("light present")?;
    let uneven = light.sampling().as_unevenly().context("light is unevenly sampled")?;
    ensure!(uneven.sample_interval_mean().is_nan(), "single fix has no interval");

    for framing in [Framing::Compressed, Framing::Uncompressed] {
        let decoded = Packet::decode(&packet.encode(framing)?, framing)?;
        ensure!(decoded == packet, "{framing:?} round trip changed a NaN-bearing packet");
    }
    Ok(())
}

#[test]
fn test_conflicting_add_leaves_packet_untouched() -> Result<()> {
    let mut packet = station_packet()?;
    let before = packet.clone();

    let duplicate =
        Channel::evenly_sampled("accel x", vec![ChannelType::AccelerometerX], 100.0, 0)?;
    let result = packet.add_channel(duplicate);
    ensure!(
        matches!(
            result,
            Err(PacketError::ChannelConflict { channel_type: ChannelType::AccelerometerX })
        ),
        "expected a conflict, got {result:?}"
    );
    ensure!(packet == before, "failed add must not mutate the packet");
    Ok(())
}

#[test]
fn test_decode_with_config_limits_and_coercion() -> Result<()> {
    let packet = station_packet()?;
    let bytes = packet.encode(Framing::Compressed)?;

    let config = CodecConfig::from_yaml("coerce_integer_payloads: true")?;
    let decoded = Packet::decode_with(&bytes, Framing::Compressed, &config)?;
    let mic = decoded.channel(ChannelType::Microphone).context("microphone present")?;
    assert_eq!(mic.payload_kind(), Some(PayloadKind::Int32));
    assert_eq!(
        mic.get_payload_with(&config, ChannelType::Microphone).kind(),
        PayloadKind::Float64
    );

    // a coerced read must not change what the packet encodes to
    let redecoded = Packet::decode(&decoded.encode(Framing::Compressed)?, Framing::Compressed)?;
    let mic = redecoded.channel(ChannelType::Microphone).context("microphone present")?;
    assert_eq!(mic.payload_kind(), Some(PayloadKind::Int32));
    ensure!(redecoded == packet, "coerced decode then encode changed the packet");

    let tight = CodecConfig { max_decompressed_len: 8, ..CodecConfig::default() };
    let result = Packet::decode_with(&bytes, Framing::Compressed, &tight);
    ensure!(
        matches!(result, Err(PacketError::Decode { .. })),
        "oversized frame should be rejected"
    );
    Ok(())
}

#[test]
fn test_framing_selected_by_path() -> Result<()> {
    let packet = station_packet()?;
    let framing = Framing::from_path("1637610021_1637680001000.rdvxz");
    let bytes = packet.encode(framing)?;
    ensure!(
        u32::from_be_bytes(bytes[..4].try_into()?) as usize == packet.encoded_len(),
        "compressed header must hold the message length"
    );
    Ok(())
}

#[derive(Debug, Clone)]
struct ChannelSeed {
    width: usize,
    evenly_sampled: bool,
    has_payload: bool,
    kind: PayloadKind,
    values: Vec<f64>,
    sample_rate_hz: f64,
    start: i64,
}

prop_compose! {
    fn arb_channel_seed()(
        width in 1..=3usize,
        evenly_sampled in any::<bool>(),
        has_payload in prop::bool::weighted(0.8),
        kind in prop::sample::select(PayloadKind::ALL.to_vec()),
        values in prop::collection::vec(-1.0e4f64..1.0e4, 0..60),
        sample_rate_hz in 0.5f64..48_000.0,
        start in 0i64..2_000_000_000_000_000
    ) -> ChannelSeed {
        ChannelSeed { width, evenly_sampled, has_payload, kind, values, sample_rate_hz, start }
    }
}

/// Zero or one samples per type leave `NaN` statistics behind, which the
/// round trip must still treat as equal.
fn build_channel(seed: &ChannelSeed, channel_types: Vec<ChannelType>) -> Channel {
    let samples = seed.values.len() / seed.width;
    let values = NumericPayload::Float64(seed.values[..samples * seed.width].to_vec());

    let channel = if seed.evenly_sampled {
        Channel::evenly_sampled("generated", channel_types, seed.sample_rate_hz, seed.start)
            .unwrap()
    } else {
        let timestamps = (0..samples as i64).map(|i| seed.start + i * 1_000 + i * i).collect();
        Channel::unevenly_sampled("generated", channel_types, timestamps).unwrap()
    };
    if seed.has_payload { channel.with_payload(values, seed.kind).unwrap() } else { channel }
}

prop_compose! {
    fn arb_packet()(
        types in Just(ChannelType::ALL.to_vec()).prop_shuffle(),
        seeds in prop::collection::vec(arb_channel_seed(), 0..6),
        station_id in "[0-9]{10}",
        api in any::<u32>(),
        is_private in any::<bool>(),
        make in "[A-Za-z ]{0,16}",
        battery in 0.0f32..100.0,
        metadata in prop::collection::vec("[a-z]{1,8}", 0..4)
    ) -> Packet {
        let mut packet = Packet::new();
        packet.identity.station_id = station_id;
        packet.identity.api = api;
        packet.identity.is_private = is_private;
        packet.device.make = make;
        packet.device.battery_level_percent = battery;
        packet.metadata = metadata;

        let mut cursor = 0;
        for seed in &seeds {
            let channel_types = types[cursor..cursor + seed.width].to_vec();
            cursor += seed.width;
            packet.add_channel(build_channel(seed, channel_types)).unwrap();
        }
        packet
    }
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(packet in arb_packet()) {
        for framing in [Framing::Compressed, Framing::Uncompressed] {
            let bytes = packet.encode(framing).unwrap();
            let decoded = Packet::decode(&bytes, framing).unwrap();
            prop_assert_eq!(&decoded, &packet);
        }
    }

    #[test]
    fn prop_directory_is_complete(packet in arb_packet()) {
        for channel in packet.channels() {
            for channel_type in channel.channel_types() {
                prop_assert!(packet.has_channel(*channel_type));
                prop_assert_eq!(packet.channel(*channel_type), Some(channel));
            }
        }
        prop_assert!(packet.has_channels(&packet.channel_types()));
    }

    #[test]
    fn prop_add_rejects_existing_first_type(packet in arb_packet(), rate in 1.0f64..100.0) {
        for channel_type in packet.channel_types() {
            let mut mutated = packet.clone();
            let candidate = Channel::evenly_sampled("dup", vec![channel_type], rate, 0).unwrap();
            let is_conflict = matches!(
                mutated.add_channel(candidate),
                Err(PacketError::ChannelConflict { .. })
            );
            prop_assert!(is_conflict);
            prop_assert_eq!(&mutated, &packet);
        }
    }

    #[test]
    fn prop_delete_then_lookup_misses(packet in arb_packet()) {
        if let Some(first) = packet.channel_types().first().copied() {
            let mut mutated = packet.clone();
            let removed = mutated.delete_channel(first).unwrap();
            for channel_type in removed.channel_types() {
                prop_assert!(!mutated.has_channel(*channel_type));
            }
            prop_assert_eq!(mutated.channels().count(), packet.channels().count() - 1);
        }
    }
}
