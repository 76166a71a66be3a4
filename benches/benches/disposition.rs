// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect};
use understory_gesture::{
    EventFlags, GestureEventData, GestureEventDataPacket, GestureEventDetails, GestureSource,
    GestureType, ToolType,
};
use understory_touch_disposition::{GestureHandlingState, TouchDispositionGestureFilter};

fn packet(source: GestureSource, time: u64, kinds: &[GestureType]) -> GestureEventDataPacket {
    let location = Point::new(time as f64, 0.0);
    let mut packet = GestureEventDataPacket::from_touch(source, time, location, location);
    for &kind in kinds {
        packet.push(GestureEventData::new(
            GestureEventDetails::new(kind),
            1,
            ToolType::Finger,
            time,
            location,
            location,
            1,
            Rect::from_center_size(location, (4.0, 4.0)),
            EventFlags::empty(),
        ));
    }
    packet
}

/// A tap down that turns into a scroll of `moves` updates and ends in a fling.
fn scroll_sequence(moves: usize) -> Vec<GestureEventDataPacket> {
    let mut packets = Vec::with_capacity(moves + 3);
    packets.push(packet(
        GestureSource::TouchSequenceStart,
        0,
        &[GestureType::GestureBegin, GestureType::TapDown],
    ));
    packets.push(packet(
        GestureSource::TouchMove,
        1,
        &[GestureType::ScrollBegin, GestureType::ScrollUpdate],
    ));
    for i in 0..moves {
        packets.push(packet(
            GestureSource::TouchMove,
            2 + i as u64,
            &[GestureType::ScrollUpdate],
        ));
    }
    packets.push(packet(
        GestureSource::TouchSequenceEnd,
        2 + moves as u64,
        &[GestureType::FlingStart, GestureType::GestureEnd],
    ));
    packets
}

fn bench_queue_then_ack(c: &mut Criterion) {
    let mut group = c.benchmark_group("disposition/queue_then_ack");

    for moves in [16usize, 256, 4_096] {
        let packets = scroll_sequence(moves);
        group.throughput(Throughput::Elements(packets.len() as u64));

        for consumed in [false, true] {
            let label = if consumed { "consumed" } else { "unconsumed" };
            group.bench_with_input(BenchmarkId::new(label, moves), &packets, |b, packets| {
                b.iter_batched(
                    || packets.clone(),
                    |packets| {
                        let mut forwarded = 0_usize;
                        let mut filter = TouchDispositionGestureFilter::new(
                            |_: &GestureEventData| forwarded += 1,
                        );
                        let count = packets.len();
                        for p in packets {
                            filter.on_gesture_packet(p).unwrap();
                        }
                        for _ in 0..count {
                            filter.on_touch_event_ack(consumed);
                        }
                        drop(filter);
                        black_box(forwarded);
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }

    group.finish();
}

fn bench_interleaved(c: &mut Criterion) {
    let mut group = c.benchmark_group("disposition/interleaved");

    // Each packet is acked as soon as it is queued, the common steady state.
    for moves in [256usize, 4_096] {
        let packets = scroll_sequence(moves);
        group.throughput(Throughput::Elements(packets.len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(moves), &packets, |b, packets| {
            b.iter_batched(
                || packets.clone(),
                |packets| {
                    let mut forwarded = 0_usize;
                    let mut filter =
                        TouchDispositionGestureFilter::new(|_: &GestureEventData| forwarded += 1);
                    for p in packets {
                        filter.on_gesture_packet(p).unwrap();
                        filter.on_touch_event_ack(false);
                    }
                    drop(filter);
                    black_box(forwarded);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_state_filter(c: &mut Criterion) {
    c.bench_function("disposition/state_filter_all_kinds", |b| {
        let mut state = GestureHandlingState::default();
        state.on_touch_event_ack(true, false);
        b.iter(|| {
            let mut dropped = 0_u32;
            for kind in GestureType::ALL {
                dropped += u32::from(state.filter(black_box(kind)));
            }
            black_box(dropped)
        });
    });
}

criterion_group!(
    benches,
    bench_queue_then_ack,
    bench_interleaved,
    bench_state_filter
);
criterion_main!(benches);
