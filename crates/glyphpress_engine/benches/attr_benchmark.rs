//! Benchmark for the per-frame attribute mapping hot path.
//!
//! TARGET: a 64-glyph heading mapped well under one frame budget
//!
//! Run with: cargo bench --package glyphpress_engine --bench attr_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use glyphpress_core::Vec2;
use glyphpress_engine::{AttributeMapper, AxisToggles};

/// Glyph count of a long heading.
const GLYPHS: usize = 64;

fn bench_attribute_mapping(c: &mut Criterion) {
    let mapper = AttributeMapper::new(AxisToggles::default());
    let pointer = Vec2::new(400.0, 40.0);
    let max_distance = 400.0;

    let centers: Vec<Vec2> = (0..GLYPHS)
        .map(|i| Vec2::new(i as f32 * 12.5, 40.0))
        .collect();

    let mut group = c.benchmark_group("attribute_mapping");
    group.throughput(Throughput::Elements(GLYPHS as u64));
    group.bench_function("map_frame_64_glyphs", |b| {
        b.iter(|| {
            for center in &centers {
                black_box(mapper.map(black_box(*center), pointer, max_distance));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_attribute_mapping);
criterion_main!(benches);
