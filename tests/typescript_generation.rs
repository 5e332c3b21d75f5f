//! TypeScript Generation Tests
//!
//! Validates that stationpack's descriptive types can be exported to
//! TypeScript when the tauri feature is enabled.

#[cfg(feature = "tauri")]
#[test]
fn test_core_types_implement_specta_type() {
    use specta::Type;

    fn assert_type<T: Type>() {}

    // Codec value types
    assert_type::<stationpack::ChannelType>();
    assert_type::<stationpack::PayloadKind>();
    assert_type::<stationpack::SummaryStats>();
    assert_type::<stationpack::SamplingKind>();
    assert_type::<stationpack::Framing>();
    assert_type::<stationpack::CodecConfig>();

    // Packet descriptive fields
    assert_type::<stationpack::PacketIdentity>();
    assert_type::<stationpack::DeviceInfo>();
    assert_type::<stationpack::ServerInfo>();
    assert_type::<stationpack::PacketTimestamps>();
}

#[cfg(not(feature = "tauri"))]
#[test]
fn test_tauri_feature_disabled() {
    // Types still compile without specta::Type
    let _ = stationpack::PayloadKind::Float64;
}
