//! Benchmarks for grid interaction hot paths.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sheetgrid::engine::SheetEngine;
use sheetgrid::navigation::Modifiers;
use sheetgrid::Coord;

/// Engine with a diagonal of 2x2 merges every 10 cells.
fn merged_engine(rows: u32, cols: u32) -> SheetEngine {
    let mut engine = SheetEngine::with_size(rows, cols).expect("Failed to build grid");
    let mut i = 0;
    while i + 1 < rows.min(cols) {
        engine
            .merge_cells([Coord::new(i, i), Coord::new(i + 1, i + 1)])
            .expect("Failed to merge");
        i += 10;
    }
    engine
}

/// Arrow-key walk across a grid full of merges
fn bench_arrow_walk(c: &mut Criterion) {
    let mut engine = merged_engine(1000, 200);
    engine.click(Coord::new(0, 0)).expect("Failed to click");

    c.bench_function("arrow_walk_1000", |b| {
        b.iter(|| {
            for key in ["ArrowDown", "ArrowRight", "ArrowUp", "ArrowLeft"] {
                for _ in 0..250 {
                    black_box(engine.key_command(black_box(key), Modifiers::NONE));
                }
            }
        })
    });
}

/// Ctrl+Arrow jumps between grid extremes
fn bench_extended_jump(c: &mut Criterion) {
    let mut engine = merged_engine(100_000, 100);
    engine.click(Coord::new(500, 50)).expect("Failed to click");

    c.bench_function("extended_jump", |b| {
        b.iter(|| {
            black_box(engine.key_command("ArrowDown", Modifiers::CTRL));
            black_box(engine.key_command("ArrowUp", Modifiers::CTRL));
        })
    });
}

/// Merge owner lookup for every cell of a large grid
fn bench_resolve(c: &mut Criterion) {
    let engine = merged_engine(500, 500);
    let cells = 500u64 * 500;

    let mut group = c.benchmark_group("resolve");
    group.throughput(Throughput::Elements(cells));
    group.bench_function("resolve_500x500", |b| {
        b.iter(|| {
            for row in 0..500 {
                for col in 0..500 {
                    black_box(engine.merges().resolve(Coord::new(row, col)));
                }
            }
        })
    });
    group.finish();
}

/// Range selection drag followed by a selected-set query
fn bench_range_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_select");

    for side in [10u32, 100, 300] {
        group.throughput(Throughput::Elements(u64::from(side) * u64::from(side)));
        group.bench_with_input(BenchmarkId::new("drag", side), &side, |b, &side| {
            let mut engine = SheetEngine::with_size(1000, 1000).expect("Failed to build grid");
            b.iter(|| {
                engine.pointer_down(Coord::new(0, 0)).expect("Failed to press");
                engine
                    .pointer_move_to_cell(Coord::new(side - 1, side - 1))
                    .expect("Failed to extend");
                engine.pointer_up();
                black_box(engine.selected().len())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_arrow_walk,
    bench_extended_jump,
    bench_resolve,
    bench_range_select,
);

criterion_main!(benches);
