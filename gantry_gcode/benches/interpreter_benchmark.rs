//! Interpreter hot-path benchmark.
//!
//! Measures:
//! - `normalize()` on a zero-padded command
//! - `Interpreter::parse()` on a typical move
//! - Full `process_line()` into the target store

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

use gantry_common::motion::target::TargetStore;
use gantry_common::motion::units::LeadScrew;
use gantry_gcode::handlers::register_motion_handlers;
use gantry_gcode::{FailurePolicy, Interpreter, normalize};

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_g01", |b| b.iter(|| normalize(black_box("g01"))));
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_g1_xy", |b| {
        b.iter(|| Interpreter::parse(black_box("G1 X123.456 Y-78.9 F3000")))
    });
}

fn bench_process_line(c: &mut Criterion) {
    let targets = Arc::new(TargetStore::new(LeadScrew::new(8.0).unwrap()));
    let mut interp = Interpreter::new(FailurePolicy::Strict);
    register_motion_handlers(&mut interp, targets).unwrap();

    c.bench_function("process_line_g1", |b| {
        b.iter(|| interp.process_line(black_box("G1 X123.456 Y-78.9")).unwrap())
    });
}

criterion_group!(benches, bench_normalize, bench_parse, bench_process_line);
criterion_main!(benches);
