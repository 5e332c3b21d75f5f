//! Conversion between [`Packet`] and its wire message.

use tracing::{trace, warn};

use super::schema::{
    BytePayload, EvenlySampledChannelMessage, Float32Payload, Float64Payload, Int32Payload,
    Int64Payload, PacketMessage, Payload, UInt32Payload, UInt64Payload,
    UnevenlySampledChannelMessage,
};
use crate::channel::{EvenSampling, Sampling, UnevenSampling};
use crate::packet::{DeviceInfo, PacketIdentity, PacketTimestamps, ServerInfo};
use crate::types::SummaryStats;
use crate::{Channel, ChannelType, NumericPayload, Packet, PacketError, Result};

impl From<&NumericPayload> for Payload {
    fn from(payload: &NumericPayload) -> Self {
        match payload {
            NumericPayload::Byte(values) => {
                Payload::BytePayload(BytePayload { values: values.clone() })
            }
            NumericPayload::UInt32(values) => {
                Payload::UInt32Payload(UInt32Payload { values: values.clone() })
            }
            NumericPayload::UInt64(values) => {
                Payload::UInt64Payload(UInt64Payload { values: values.clone() })
            }
            NumericPayload::Int32(values) => {
                Payload::Int32Payload(Int32Payload { values: values.clone() })
            }
            NumericPayload::Int64(values) => {
                Payload::Int64Payload(Int64Payload { values: values.clone() })
            }
            NumericPayload::Float32(values) => {
                Payload::Float32Payload(Float32Payload { values: values.clone() })
            }
            NumericPayload::Float64(values) => {
                Payload::Float64Payload(Float64Payload { values: values.clone() })
            }
        }
    }
}

impl From<Payload> for NumericPayload {
    fn from(payload: Payload) -> Self {
        match payload {
            Payload::BytePayload(p) => NumericPayload::Byte(p.values),
            Payload::UInt32Payload(p) => NumericPayload::UInt32(p.values),
            Payload::UInt64Payload(p) => NumericPayload::UInt64(p.values),
            Payload::Int32Payload(p) => NumericPayload::Int32(p.values),
            Payload::Int64Payload(p) => NumericPayload::Int64(p.values),
            Payload::Float32Payload(p) => NumericPayload::Float32(p.values),
            Payload::Float64Payload(p) => NumericPayload::Float64(p.values),
        }
    }
}

/// Build the wire message for a packet.
pub fn to_message(packet: &Packet) -> PacketMessage {
    let PacketIdentity {
        api,
        uuid,
        station_id,
        authenticated_email,
        authentication_token,
        messaging_token,
        is_backfilled,
        is_private,
        is_scrambled,
    } = packet.identity.clone();
    let DeviceInfo {
        make,
        model,
        os,
        os_version,
        app_version,
        battery_level_percent,
        temperature_celsius,
    } = packet.device.clone();
    let ServerInfo { acquisition_server, time_synchronization_server, authentication_server } =
        packet.servers.clone();
    let timestamps = packet.timestamps;

    // Each channel lands in the collection matching its own sampling variant.
    let mut evenly_sampled_channels = Vec::new();
    let mut unevenly_sampled_channels = Vec::new();
    for channel in packet.channels() {
        match channel.sampling() {
            Sampling::Evenly(sampling) => {
                evenly_sampled_channels.push(evenly_to_message(channel, sampling));
            }
            Sampling::Unevenly(sampling) => {
                unevenly_sampled_channels.push(unevenly_to_message(channel, sampling));
            }
        }
    }

    PacketMessage {
        api,
        uuid,
        station_id,
        authenticated_email,
        authentication_token,
        messaging_token,
        is_backfilled,
        is_private,
        is_scrambled,
        device_make: make,
        device_model: model,
        device_os: os,
        device_os_version: os_version,
        app_version,
        battery_level_percent,
        device_temperature_celsius: temperature_celsius,
        acquisition_server,
        time_synchronization_server,
        authentication_server,
        app_file_start_timestamp_epoch_microseconds_utc: timestamps
            .app_file_start_epoch_microseconds_utc,
        app_file_start_timestamp_machine: timestamps.app_file_start_machine,
        server_timestamp_epoch_microseconds_utc: timestamps.server_epoch_microseconds_utc,
        evenly_sampled_channels,
        unevenly_sampled_channels,
        metadata: packet.metadata.clone(),
    }
}

fn channel_type_codes(channel: &Channel) -> Vec<i32> {
    channel.channel_types().iter().map(|channel_type| i32::from(*channel_type)).collect()
}

fn evenly_to_message(channel: &Channel, sampling: &EvenSampling) -> EvenlySampledChannelMessage {
    EvenlySampledChannelMessage {
        sensor_name: channel.sensor_name.clone(),
        channel_types: channel_type_codes(channel),
        sample_rate_hz: sampling.sample_rate_hz(),
        first_sample_timestamp_epoch_microseconds_utc: sampling
            .first_sample_timestamp_epoch_microseconds_utc(),
        payload: channel.payload().map(Payload::from),
        value_means: channel.value_means().to_vec(),
        value_stds: channel.value_stds().to_vec(),
        value_medians: channel.value_medians().to_vec(),
        metadata: channel.metadata.clone(),
    }
}

fn unevenly_to_message(
    channel: &Channel,
    sampling: &UnevenSampling,
) -> UnevenlySampledChannelMessage {
    UnevenlySampledChannelMessage {
        sensor_name: channel.sensor_name.clone(),
        channel_types: channel_type_codes(channel),
        timestamps_microseconds_utc: sampling.timestamps_microseconds_utc().to_vec(),
        sample_interval_mean: sampling.sample_interval_mean(),
        sample_interval_std: sampling.sample_interval_std(),
        sample_interval_median: sampling.sample_interval_median(),
        payload: channel.payload().map(Payload::from),
        value_means: channel.value_means().to_vec(),
        value_stds: channel.value_stds().to_vec(),
        value_medians: channel.value_medians().to_vec(),
        metadata: channel.metadata.clone(),
    }
}

/// Build a packet from its wire message, validating every channel.
///
/// Payloads keep their wire kind, so re-encoding a decoded packet
/// reproduces the same message.
pub fn from_message(message: PacketMessage) -> Result<Packet> {
    let evenly_sampled = message
        .evenly_sampled_channels
        .into_iter()
        .map(evenly_from_message)
        .collect::<Result<Vec<_>>>()?;
    let unevenly_sampled = message
        .unevenly_sampled_channels
        .into_iter()
        .map(unevenly_from_message)
        .collect::<Result<Vec<_>>>()?;

    let mut packet = Packet::new();
    packet.identity = PacketIdentity {
        api: message.api,
        uuid: message.uuid,
        station_id: message.station_id,
        authenticated_email: message.authenticated_email,
        authentication_token: message.authentication_token,
        messaging_token: message.messaging_token,
        is_backfilled: message.is_backfilled,
        is_private: message.is_private,
        is_scrambled: message.is_scrambled,
    };
    packet.device = DeviceInfo {
        make: message.device_make,
        model: message.device_model,
        os: message.device_os,
        os_version: message.device_os_version,
        app_version: message.app_version,
        battery_level_percent: message.battery_level_percent,
        temperature_celsius: message.device_temperature_celsius,
    };
    packet.servers = ServerInfo {
        acquisition_server: message.acquisition_server,
        time_synchronization_server: message.time_synchronization_server,
        authentication_server: message.authentication_server,
    };
    packet.timestamps = PacketTimestamps {
        app_file_start_epoch_microseconds_utc: message
            .app_file_start_timestamp_epoch_microseconds_utc,
        app_file_start_machine: message.app_file_start_timestamp_machine,
        server_epoch_microseconds_utc: message.server_timestamp_epoch_microseconds_utc,
    };
    packet.metadata = message.metadata;

    Ok(packet.with_channels(evenly_sampled, unevenly_sampled))
}

fn evenly_from_message(message: EvenlySampledChannelMessage) -> Result<Channel> {
    let channel_types = decode_channel_types(&message.channel_types, &message.sensor_name)?;
    let sampling = Sampling::Evenly(EvenSampling::from_wire(
        message.sample_rate_hz,
        message.first_sample_timestamp_epoch_microseconds_utc,
    ));

    trace!(
        sensor_name = %message.sensor_name,
        n = channel_types.len(),
        "Decoding evenly sampled channel"
    );
    channel_from_parts(
        message.sensor_name,
        channel_types,
        message.payload,
        [message.value_means, message.value_stds, message.value_medians],
        message.metadata,
        sampling,
    )
}

fn unevenly_from_message(message: UnevenlySampledChannelMessage) -> Result<Channel> {
    let channel_types = decode_channel_types(&message.channel_types, &message.sensor_name)?;
    let sample_interval = SummaryStats {
        mean: message.sample_interval_mean,
        std: message.sample_interval_std,
        median: message.sample_interval_median,
    };
    let sampling = Sampling::Unevenly(UnevenSampling::from_wire(
        message.timestamps_microseconds_utc,
        sample_interval,
    ));

    trace!(
        sensor_name = %message.sensor_name,
        n = channel_types.len(),
        "Decoding unevenly sampled channel"
    );
    let channel = channel_from_parts(
        message.sensor_name,
        channel_types,
        message.payload,
        [message.value_means, message.value_stds, message.value_medians],
        message.metadata,
        sampling,
    )?;

    if let Some(uneven) = channel.sampling().as_unevenly() {
        let timestamps = uneven.timestamps_microseconds_utc().len();
        if channel.payload().is_some() && timestamps != channel.sample_count() {
            warn!(
                sensor_name = %channel.sensor_name,
                timestamps,
                samples = channel.sample_count(),
                "Timestamp count does not match sample count"
            );
        }
    }
    Ok(channel)
}

fn channel_from_parts(
    sensor_name: String,
    channel_types: Vec<ChannelType>,
    payload: Option<Payload>,
    value_stats: [Vec<f64>; 3],
    metadata: Vec<String>,
    sampling: Sampling,
) -> Result<Channel> {
    let payload = payload.map(NumericPayload::from);
    let context = format!("channel '{}'", sensor_name);
    Channel::from_wire_parts(sensor_name, channel_types, payload, value_stats, metadata, sampling)
        .map_err(|err| PacketError::decode(context, err.to_string()))
}

fn decode_channel_types(codes: &[i32], sensor_name: &str) -> Result<Vec<ChannelType>> {
    if codes.is_empty() {
        return Err(PacketError::decode(
            format!("channel '{}'", sensor_name),
            "no channel types declared",
        ));
    }

    codes
        .iter()
        .map(|code| {
            ChannelType::try_from(*code).map_err(|_| {
                PacketError::decode(
                    format!("channel '{}'", sensor_name),
                    format!("unknown channel type {}", code),
                )
            })
        })
        .collect()
}
