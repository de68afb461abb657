//! Benchmark of one full recovery pass on the simulation board.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use sumo_common::config::RobotConfig;
use sumo_control::{AvoidanceStrategy, BoundaryScanner, MotorDrive};
use sumo_hal::board::Board;
use sumo_hal::drivers::simulation::SimBoard;

fn bench_recovery_pass(c: &mut Criterion) {
    let config = RobotConfig {
        poll_interval_ms: 0,
        ..Default::default()
    };
    let mut board = SimBoard::new();
    let handle = board.handle();
    let drive = MotorDrive::new(&mut board, &config.pins).unwrap();
    let scanner = BoundaryScanner::new(&mut board, &config).unwrap();
    let mut strategy = AvoidanceStrategy::new(drive, scanner, board.pacer(), &config);

    handle.set_level(config.pins.boundary_front, true);

    c.bench_function("recovery_pass", |b| {
        b.iter(|| {
            black_box(strategy.step());
            handle.drain_journal();
        })
    });
}

criterion_group!(benches, bench_recovery_pass);
criterion_main!(benches);
