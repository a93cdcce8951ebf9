// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Size;
use std::time::Duration;
use understory_swipe::{
    AnchoringMode, AnimationSequencer, Effect, GestureDelta, SwipeConfig, SwipeEvent, SwipeState,
};

fn hovered(config: &SwipeConfig) -> SwipeState {
    let mut state = SwipeState::new();
    state.apply(
        config,
        SwipeEvent::LayoutMeasured {
            content: Size::new(300.0, 44.0),
            container: Size::new(320.0, 44.0),
        },
    );
    state.apply(config, SwipeEvent::PointerEntered);
    state
}

fn bench_delta_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("swipe/delta_stream");

    // Back-and-forth deltas that never cross the threshold, so every event is applied.
    for len in [64usize, 1_024, 16_384] {
        let deltas: Vec<f64> = (0..len)
            .map(|i| if i % 2 == 0 { -7.5 } else { 5.0 })
            .collect();
        group.throughput(Throughput::Elements(len as u64));

        for anchoring in [AnchoringMode::GrowingPanel, AnchoringMode::SlidingPanel] {
            let config = SwipeConfig::default().with_anchoring(anchoring);
            let name = format!("{anchoring:?}");
            group.bench_with_input(BenchmarkId::new(name, len), &deltas, |b, deltas| {
                b.iter_batched(
                    || hovered(&config),
                    |mut state| {
                        for &dx in deltas {
                            black_box(
                                state.apply(&config, SwipeEvent::Delta(GestureDelta::changed(dx))),
                            );
                        }
                        black_box(state);
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

fn bench_commit_animation(c: &mut Criterion) {
    let mut group = c.benchmark_group("swipe/commit_animation");
    group.measurement_time(Duration::from_secs(3));

    let config = SwipeConfig::default().with_commit_duration(Duration::from_millis(250));
    group.bench_function("commit_and_sample_60hz", |b| {
        b.iter_batched(
            || hovered(&config),
            |mut state| {
                let mut sequencer = AnimationSequencer::new();
                let effects = state.apply(&config, SwipeEvent::Delta(GestureDelta::changed(-250.0)));
                for effect in effects {
                    if let Effect::StartAnimation(request) = effect {
                        sequencer.start(request).unwrap();
                    }
                }
                let mut now = Duration::ZERO;
                while let Some(frame) = sequencer.tick(now) {
                    black_box(&frame);
                    if frame.finished {
                        black_box(state.apply(&config, SwipeEvent::AnimationFinished(frame.id)));
                    }
                    now += Duration::from_micros(16_667);
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_delta_stream, bench_commit_animation);
criterion_main!(benches);
