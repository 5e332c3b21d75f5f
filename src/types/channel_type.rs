//! Channel type enumerants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical quantity carried by one interleave slot of a channel.
///
/// Discriminants are the stable wire enumerant values; they must never be
/// renumbered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    prost::Enumeration,
)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ChannelType {
    Microphone = 0,
    Barometer = 1,
    Latitude = 2,
    Longitude = 3,
    Speed = 4,
    Altitude = 5,
    #[serde(rename = "RESERVED_0")]
    Reserved0 = 6,
    #[serde(rename = "RESERVED_1")]
    Reserved1 = 7,
    #[serde(rename = "RESERVED_2")]
    Reserved2 = 8,
    TimeSynchronization = 9,
    Accuracy = 10,
    AccelerometerX = 11,
    AccelerometerY = 12,
    AccelerometerZ = 13,
    MagnetometerX = 14,
    MagnetometerY = 15,
    MagnetometerZ = 16,
    GyroscopeX = 17,
    GyroscopeY = 18,
    GyroscopeZ = 19,
    Other = 20,
    Light = 21,
    Image = 22,
    Infrared = 23,
}

impl ChannelType {
    /// Every enumerant in wire order.
    pub const ALL: [ChannelType; 24] = [
        ChannelType::Microphone,
        ChannelType::Barometer,
        ChannelType::Latitude,
        ChannelType::Longitude,
        ChannelType::Speed,
        ChannelType::Altitude,
        ChannelType::Reserved0,
        ChannelType::Reserved1,
        ChannelType::Reserved2,
        ChannelType::TimeSynchronization,
        ChannelType::Accuracy,
        ChannelType::AccelerometerX,
        ChannelType::AccelerometerY,
        ChannelType::AccelerometerZ,
        ChannelType::MagnetometerX,
        ChannelType::MagnetometerY,
        ChannelType::MagnetometerZ,
        ChannelType::GyroscopeX,
        ChannelType::GyroscopeY,
        ChannelType::GyroscopeZ,
        ChannelType::Other,
        ChannelType::Light,
        ChannelType::Image,
        ChannelType::Infrared,
    ];

    /// Upper-snake-case schema name, e.g. `ACCELEROMETER_X`.
    pub const fn name(&self) -> &'static str {
        match self {
            ChannelType::Microphone => "MICROPHONE",
            ChannelType::Barometer => "BAROMETER",
            ChannelType::Latitude => "LATITUDE",
            ChannelType::Longitude => "LONGITUDE",
            ChannelType::Speed => "SPEED",
            ChannelType::Altitude => "ALTITUDE",
            ChannelType::Reserved0 => "RESERVED_0",
            ChannelType::Reserved1 => "RESERVED_1",
            ChannelType::Reserved2 => "RESERVED_2",
            ChannelType::TimeSynchronization => "TIME_SYNCHRONIZATION",
            ChannelType::Accuracy => "ACCURACY",
            ChannelType::AccelerometerX => "ACCELEROMETER_X",
            ChannelType::AccelerometerY => "ACCELEROMETER_Y",
            ChannelType::AccelerometerZ => "ACCELEROMETER_Z",
            ChannelType::MagnetometerX => "MAGNETOMETER_X",
            ChannelType::MagnetometerY => "MAGNETOMETER_Y",
            ChannelType::MagnetometerZ => "MAGNETOMETER_Z",
            ChannelType::GyroscopeX => "GYROSCOPE_X",
            ChannelType::GyroscopeY => "GYROSCOPE_Y",
            ChannelType::GyroscopeZ => "GYROSCOPE_Z",
            ChannelType::Other => "OTHER",
            ChannelType::Light => "LIGHT",
            ChannelType::Image => "IMAGE",
            ChannelType::Infrared => "INFRARED",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChannelType {
    type Err = crate::PacketError;

    fn from_str(s: &str) -> crate::Result<Self> {
        ChannelType::ALL.iter().copied().find(|ty| ty.name().eq_ignore_ascii_case(s)).ok_or_else(
            || crate::PacketError::Config { details: format!("Unknown channel type '{}'", s) },
        )
    }
}
