//! Performance benchmarks for the bindings generator.
//!
//! Synthetic hosts of increasing size are run through each phase:
//! - Populate: reading the class database into entries
//! - Render: ordering and rendering every file in memory
//! - Generate: rendering and writing into a temporary directory
//!
//! ## Profiling with Puffin
//!
//! Run with the `profile-with-puffin` feature to collect scope timings:
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;

use julia_bindgen::{BindingsGenerator, GeneratorConfig, JsonClassDb, NoDocs};

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

#[cfg(feature = "profile-with-puffin")]
fn end_profiling_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}

#[cfg(not(feature = "profile-with-puffin"))]
fn end_profiling_frame() {}

const SIZES: [usize; 3] = [50, 200, 800];

/// A host of `count` classes, each inheriting from one of the previous
/// eight, with methods that reference enums and classes of its neighbours.
fn synthetic_host(count: usize) -> Value {
    let mut classes = vec![json!({ "name": "Object" })];

    for i in 0..count {
        let name = format!("Class{i}");
        let parent = if i == 0 {
            "Object".to_string()
        } else {
            format!("Class{}", i.saturating_sub(1 + i % 8))
        };
        let neighbour = format!("Class{}", (i * 7 + 3) % count);

        classes.push(json!({
            "name": name,
            "parent": parent,
            "instantiable": true,
            "properties": [
                { "name": format!("value_{i}"), "type": "int",
                  "getter": format!("get_value_{i}"), "setter": format!("set_value_{i}") }
            ],
            "methods": [
                { "name": format!("get_value_{i}"), "return": { "type": "int" }, "return_meta": "int32" },
                { "name": format!("set_value_{i}"),
                  "arguments": [ { "name": "value", "type": "int" } ], "argument_meta": ["int32"] },
                { "name": "get_mode",
                  "return": { "type": "int", "usage": "CLASS_IS_ENUM", "class_name": format!("{name}.Mode") } },
                { "name": "get_neighbour", "return": { "type": "object", "class_name": neighbour } },
                { "name": "move_to",
                  "arguments": [
                      { "name": "position", "type": "vector2" },
                      { "name": "speed", "type": "float" }
                  ],
                  "default_arguments": [ { "type": "float", "value": 1.5 } ] },
                { "name": "_process", "flags": "VIRTUAL" }
            ],
            "constants": [
                { "name": "MODE_IDLE", "value": 0 },
                { "name": "MODE_RUN", "value": 1 },
                { "name": "MODE_DEFAULT", "value": 0 },
                { "name": "LIMIT", "value": i }
            ],
            "enums": [ { "name": "Mode", "constants": ["MODE_IDLE", "MODE_RUN", "MODE_DEFAULT"] } ]
        }));
    }

    json!({
        "classes": classes,
        "global_constants": [
            { "name": "SIDE_LEFT", "value": 0, "enum": "Side" },
            { "name": "SIDE_TOP", "value": 1, "enum": "Side" },
            { "name": "MAX_THINGS", "value": 64 }
        ]
    })
}

fn initialized(db: &JsonClassDb) -> BindingsGenerator {
    let mut generator = BindingsGenerator::new(GeneratorConfig::default());
    generator.initialize(db, &NoDocs);
    generator
}

fn populate_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("populate");

    for size in SIZES {
        let Ok(db) = JsonClassDb::from_value(synthetic_host(size)) else {
            continue;
        };
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &db, |b, db| {
            b.iter(|| {
                let generator = initialized(black_box(db));
                end_profiling_frame();
                generator
            });
        });
    }

    group.finish();
}

fn render_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("render");

    for size in SIZES {
        let Ok(db) = JsonClassDb::from_value(synthetic_host(size)) else {
            continue;
        };
        let generator = initialized(&db);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &generator, |b, generator| {
            b.iter(|| {
                let rendered = black_box(generator).render();
                end_profiling_frame();
                rendered
            });
        });
    }

    group.finish();
}

fn generate_benchmarks(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("generate");
    group.sample_size(20);

    let Ok(dir) = tempfile::TempDir::new() else {
        return;
    };
    for size in SIZES {
        let Ok(db) = JsonClassDb::from_value(synthetic_host(size)) else {
            continue;
        };
        let generator = initialized(&db);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &generator, |b, generator| {
            b.iter(|| {
                let summary = generator.generate_sources(black_box(dir.path()));
                end_profiling_frame();
                summary
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    populate_benchmarks,
    render_benchmarks,
    generate_benchmarks
);
criterion_main!(benches);
