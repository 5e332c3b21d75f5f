//! Benchmarks for the channel codec and packet framing
//!
//! Covers the hot paths of reading and writing station packets:
//! - Interleaving and deinterleaving multi-axis payloads
//! - Payload replacement with per-column statistics recompute
//! - Packet encode/decode in both framing modes
//!
//! Platform: Cross-platform (synthetic data, CI-safe)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use stationpack::test_utils::{
    accelerometer_channel, microphone_channel, sample_packet, synthetic_waveform,
};
use stationpack::types::{deinterleave, interleave};
use stationpack::{ChannelType, Framing, NumericPayload, Packet, PayloadKind};
use std::hint::black_box;

const SAMPLE_COUNTS: [usize; 3] = [800, 8_000, 48_000];

fn bench_interleave(c: &mut Criterion) {
    let mut group = c.benchmark_group("interleave");

    for samples in SAMPLE_COUNTS {
        let axes: Vec<Vec<i32>> = (0..3).map(|_| synthetic_waveform(samples)).collect();
        let flat = interleave(&axes).expect("equal-length axes");
        group.throughput(Throughput::Elements((samples * 3) as u64));

        group.bench_with_input(BenchmarkId::new("interleave_xyz", samples), &axes, |b, axes| {
            b.iter(|| black_box(interleave(black_box(axes)).expect("equal-length axes")))
        });

        group.bench_with_input(BenchmarkId::new("deinterleave_axis", samples), &flat, |b, flat| {
            b.iter(|| black_box(deinterleave(black_box(flat), 1, 3).expect("valid stride")))
        });
    }

    group.finish();
}

fn bench_set_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_payload");

    for samples in SAMPLE_COUNTS {
        let waveform = NumericPayload::Int32(synthetic_waveform(samples));
        let mut channel = microphone_channel(1).expect("valid microphone channel");
        group.throughput(Throughput::Elements(samples as u64));

        for recompute_stats in [true, false] {
            let name = if recompute_stats { "with_stats" } else { "without_stats" };
            group.bench_with_input(BenchmarkId::new(name, samples), &waveform, |b, waveform| {
                b.iter(|| {
                    let values = black_box(waveform.clone());
                    channel
                        .set_payload(values, PayloadKind::Int32, recompute_stats)
                        .expect("valid payload")
                })
            });
        }
    }

    group.finish();
}

fn bench_get_payload(c: &mut Criterion) {
    let accelerometer = accelerometer_channel(8_000).expect("valid accelerometer channel");

    c.bench_function("get_payload_single_axis", |b| {
        b.iter(|| black_box(accelerometer.get_payload(black_box(ChannelType::AccelerometerY))))
    });

    let zx = [ChannelType::AccelerometerZ, ChannelType::AccelerometerX];
    c.bench_function("get_multi_payload_zx", |b| {
        b.iter(|| {
            black_box(accelerometer.get_multi_payload(black_box(&zx)).expect("declared axes"))
        })
    });
}

fn bench_packet_codec(c: &mut Criterion) {
    let mut packet = sample_packet().expect("valid sample packet");
    let long_recording = microphone_channel(48_000).expect("valid microphone channel");
    packet.edit_channel(ChannelType::Microphone, long_recording).expect("microphone present");

    let mut group = c.benchmark_group("packet_codec");
    group.throughput(Throughput::Bytes(packet.encoded_len() as u64));

    for framing in [Framing::Compressed, Framing::Uncompressed] {
        let bytes = packet.encode(framing).expect("encodable packet");

        group.bench_function(BenchmarkId::new("encode", format!("{framing:?}")), |b| {
            b.iter(|| black_box(packet.encode(black_box(framing)).expect("encodable packet")))
        });

        group.bench_function(BenchmarkId::new("decode", format!("{framing:?}")), |b| {
            b.iter(|| {
                black_box(Packet::decode(black_box(&bytes), framing).expect("decodable packet"))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_interleave,
    bench_set_payload,
    bench_get_payload,
    bench_packet_codec
);
criterion_main!(benches);
