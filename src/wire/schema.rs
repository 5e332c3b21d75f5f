//! Wire messages
//!
//! Hand-written `prost` messages for the packet schema. Tag numbers are part
//! of the wire format and must never be reused.

use crate::ChannelType;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PacketMessage {
    #[prost(uint32, tag = "1")]
    pub api: u32,
    #[prost(string, tag = "2")]
    pub uuid: String,
    #[prost(string, tag = "3")]
    pub station_id: String,
    #[prost(string, tag = "4")]
    pub authenticated_email: String,
    #[prost(string, tag = "5")]
    pub authentication_token: String,
    #[prost(string, tag = "6")]
    pub messaging_token: String,
    #[prost(bool, tag = "7")]
    pub is_backfilled: bool,
    #[prost(bool, tag = "8")]
    pub is_private: bool,
    #[prost(bool, tag = "9")]
    pub is_scrambled: bool,
    #[prost(string, tag = "10")]
    pub device_make: String,
    #[prost(string, tag = "11")]
    pub device_model: String,
    #[prost(string, tag = "12")]
    pub device_os: String,
    #[prost(string, tag = "13")]
    pub device_os_version: String,
    #[prost(string, tag = "14")]
    pub app_version: String,
    #[prost(float, tag = "15")]
    pub battery_level_percent: f32,
    #[prost(float, tag = "16")]
    pub device_temperature_celsius: f32,
    #[prost(string, tag = "17")]
    pub acquisition_server: String,
    #[prost(string, tag = "18")]
    pub time_synchronization_server: String,
    #[prost(string, tag = "19")]
    pub authentication_server: String,
    #[prost(int64, tag = "20")]
    pub app_file_start_timestamp_epoch_microseconds_utc: i64,
    #[prost(int64, tag = "21")]
    pub app_file_start_timestamp_machine: i64,
    #[prost(int64, tag = "22")]
    pub server_timestamp_epoch_microseconds_utc: i64,
    #[prost(message, repeated, tag = "23")]
    pub evenly_sampled_channels: Vec<EvenlySampledChannelMessage>,
    #[prost(message, repeated, tag = "24")]
    pub unevenly_sampled_channels: Vec<UnevenlySampledChannelMessage>,
    #[prost(string, repeated, tag = "25")]
    pub metadata: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EvenlySampledChannelMessage {
    #[prost(string, tag = "1")]
    pub sensor_name: String,
    #[prost(enumeration = "ChannelType", repeated, tag = "2")]
    pub channel_types: Vec<i32>,
    #[prost(double, tag = "3")]
    pub sample_rate_hz: f64,
    #[prost(int64, tag = "4")]
    pub first_sample_timestamp_epoch_microseconds_utc: i64,
    #[prost(oneof = "Payload", tags = "5, 6, 7, 8, 9, 10, 11")]
    pub payload: Option<Payload>,
    #[prost(double, repeated, tag = "12")]
    pub value_means: Vec<f64>,
    #[prost(double, repeated, tag = "13")]
    pub value_stds: Vec<f64>,
    #[prost(double, repeated, tag = "14")]
    pub value_medians: Vec<f64>,
    #[prost(string, repeated, tag = "15")]
    pub metadata: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UnevenlySampledChannelMessage {
    #[prost(string, tag = "1")]
    pub sensor_name: String,
    #[prost(enumeration = "ChannelType", repeated, tag = "2")]
    pub channel_types: Vec<i32>,
    #[prost(int64, repeated, tag = "3")]
    pub timestamps_microseconds_utc: Vec<i64>,
    #[prost(double, tag = "4")]
    pub sample_interval_mean: f64,
    #[prost(oneof = "Payload", tags = "5, 6, 7, 8, 9, 10, 11")]
    pub payload: Option<Payload>,
    #[prost(double, repeated, tag = "12")]
    pub value_means: Vec<f64>,
    #[prost(double, repeated, tag = "13")]
    pub value_stds: Vec<f64>,
    #[prost(double, repeated, tag = "14")]
    pub value_medians: Vec<f64>,
    #[prost(string, repeated, tag = "15")]
    pub metadata: Vec<String>,
    #[prost(double, tag = "16")]
    pub sample_interval_std: f64,
    #[prost(double, tag = "17")]
    pub sample_interval_median: f64,
}

/// The one active numeric representation of a channel payload.
#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum Payload {
    #[prost(message, tag = "5")]
    BytePayload(BytePayload),
    #[prost(message, tag = "6")]
    UInt32Payload(UInt32Payload),
    #[prost(message, tag = "7")]
    UInt64Payload(UInt64Payload),
    #[prost(message, tag = "8")]
    Int32Payload(Int32Payload),
    #[prost(message, tag = "9")]
    Int64Payload(Int64Payload),
    #[prost(message, tag = "10")]
    Float32Payload(Float32Payload),
    #[prost(message, tag = "11")]
    Float64Payload(Float64Payload),
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BytePayload {
    #[prost(bytes = "vec", tag = "1")]
    pub values: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UInt32Payload {
    #[prost(uint32, repeated, tag = "1")]
    pub values: Vec<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UInt64Payload {
    #[prost(uint64, repeated, tag = "1")]
    pub values: Vec<u64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Int32Payload {
    #[prost(int32, repeated, tag = "1")]
    pub values: Vec<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Int64Payload {
    #[prost(int64, repeated, tag = "1")]
    pub values: Vec<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Float32Payload {
    #[prost(float, repeated, tag = "1")]
    pub values: Vec<f32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Float64Payload {
    #[prost(double, repeated, tag = "1")]
    pub values: Vec<f64>,
}
