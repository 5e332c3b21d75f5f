//! Test utilities for building sample channels and packets
//!
//! Shared by unit tests and benchmarks. Every builder returns populated,
//! non-empty payloads with finite cached statistics.

#![cfg(any(test, feature = "benchmark"))]

use crate::{Channel, ChannelType, NumericPayload, Packet, PayloadKind, Result};

/// First-sample timestamp used by the sample builders.
pub const SAMPLE_START_MICROS: i64 = 1_637_680_001_000_000;

/// A deterministic audio-like waveform of `len` samples in the range of a 16-bit ADC.
pub fn synthetic_waveform(len: usize) -> Vec<i32> {
    (0..len)
        .map(|i| ((i as f64 * 0.05).sin() * 16_000.0) as i32 + (i % 7) as i32)
        .collect()
}

/// An 800 Hz microphone channel carrying `samples` readings.
pub fn microphone_channel(samples: usize) -> Result<Channel> {
    let waveform = NumericPayload::Int32(synthetic_waveform(samples));
    Channel::evenly_sampled(
        "synthetic microphone",
        vec![ChannelType::Microphone],
        800.0,
        SAMPLE_START_MICROS,
    )?
    .with_payload(waveform, PayloadKind::Int32)
}

/// A 3-axis accelerometer channel carrying `samples` readings per axis.
pub fn accelerometer_channel(samples: usize) -> Result<Channel> {
    let axes: Vec<NumericPayload> = (0..3)
        .map(|axis| {
            NumericPayload::Float32(
                (0..samples).map(|i| (axis as f32) * 4.9 + (i as f32 * 0.01).cos()).collect(),
            )
        })
        .collect();

    let mut channel = Channel::evenly_sampled(
        "synthetic accelerometer",
        vec![ChannelType::AccelerometerX, ChannelType::AccelerometerY, ChannelType::AccelerometerZ],
        50.0,
        SAMPLE_START_MICROS,
    )?;
    channel.set_interleaved_payload(&axes, PayloadKind::Float32, true)?;
    Ok(channel)
}

/// A packet with one channel per sampling variant and populated descriptive fields.
///
/// Contents:
/// - MICROPHONE (evenly, `Int32`): `[-12, 0, 9, 31]`
/// - BAROMETER (evenly, `Float32`): three readings
/// - LATITUDE / LONGITUDE / ALTITUDE (unevenly, `Float64`): two fixes
pub fn sample_packet() -> Result<Packet> {
    let mut packet = Packet::new();
    packet.identity.api = 1000;
    packet.identity.uuid = "4b2c9f3a".into();
    packet.identity.station_id = "1637680001".into();
    packet.identity.authenticated_email = "station@example.org".into();
    packet.identity.is_private = true;
    packet.device.make = "Google".into();
    packet.device.model = "Pixel 4a".into();
    packet.device.os = "Android".into();
    packet.device.os_version = "12".into();
    packet.device.app_version = "3.1.4".into();
    packet.device.battery_level_percent = 87.5;
    packet.device.temperature_celsius = 31.25;
    packet.servers.acquisition_server = "wss://acquisition.example.org".into();
    packet.servers.time_synchronization_server = "wss://synch.example.org".into();
    packet.timestamps.app_file_start_epoch_microseconds_utc = SAMPLE_START_MICROS;
    packet.timestamps.app_file_start_machine = 88_123_456;
    packet.timestamps.server_epoch_microseconds_utc = SAMPLE_START_MICROS + 40_000_000;
    packet.metadata = vec!["deployment".into(), "kauai-north".into()];

    let microphone =
        Channel::evenly_sampled("mic", vec![ChannelType::Microphone], 80.0, SAMPLE_START_MICROS)?
            .with_payload(NumericPayload::Int32(vec![-12, 0, 9, 31]), PayloadKind::Int32)?
            .with_metadata(vec!["gain".into(), "1.0".into()]);
    packet.add_channel(microphone)?;

    let pressure = NumericPayload::Float32(vec![101.325, 101.33, 101.32]);
    let barometer =
        Channel::evenly_sampled("bmp280", vec![ChannelType::Barometer], 30.0, SAMPLE_START_MICROS)?
            .with_payload(pressure, PayloadKind::Float32)?;
    packet.add_channel(barometer)?;

    let mut location = Channel::unevenly_sampled(
        "gps",
        vec![ChannelType::Latitude, ChannelType::Longitude, ChannelType::Altitude],
        vec![SAMPLE_START_MICROS, SAMPLE_START_MICROS + 1_000_000],
    )?;
    location.set_interleaved_payload(
        &[
            NumericPayload::Float64(vec![22.2226, 22.2227]),
            NumericPayload::Float64(vec![-159.4055, -159.4054]),
            NumericPayload::Float64(vec![12.0, 12.5]),
        ],
        PayloadKind::Float64,
        true,
    )?;
    packet.add_channel(location)?;

    Ok(packet)
}
