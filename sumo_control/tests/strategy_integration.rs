//! End-to-end strategy tests over the simulation board.
//!
//! These exercise the whole stack — scanner, strategy, motor drive — and
//! assert on the board's event journal and virtual clock, not on mocks.

use std::time::Duration;

use sumo_common::config::RobotConfig;
use sumo_common::io::PinMap;
use sumo_control::{AvoidanceStrategy, BoundaryScanner, MotorDrive};
use sumo_hal::board::Board;
use sumo_hal::drivers::simulation::{SimBoard, SimEvent, SimHandle, TimedEvent};

fn tight_config() -> RobotConfig {
    RobotConfig {
        poll_interval_ms: 0,
        ..Default::default()
    }
}

fn build(config: &RobotConfig) -> (AvoidanceStrategy<MotorDrive, BoundaryScanner>, SimHandle) {
    let mut board = SimBoard::new();
    let handle = board.handle();
    let drive = MotorDrive::new(&mut board, &config.pins).unwrap();
    let scanner = BoundaryScanner::new(&mut board, config).unwrap();
    let strategy = AvoidanceStrategy::new(drive, scanner, board.pacer(), config);
    handle.drain_journal();
    (strategy, handle)
}

/// Motor state held across one blind pause.
#[derive(Debug, PartialEq, Eq)]
struct Held {
    right: bool,
    left: bool,
    duty: u8,
    hold: Duration,
}

/// Replay the journal and capture the motor state at every pause.
fn holds(journal: &[TimedEvent], pins: &PinMap) -> Vec<Held> {
    let (mut right, mut left, mut duty) = (false, false, 0u8);
    let mut out = Vec::new();
    for entry in journal {
        match entry.event {
            SimEvent::Write { pin, high } if pin == pins.motor_right => right = high,
            SimEvent::Write { pin, high } if pin == pins.motor_left => left = high,
            SimEvent::Duty { pin, duty: d } if pin == pins.motor_enable => duty = d,
            SimEvent::Pause { amount } => out.push(Held {
                right,
                left,
                duty,
                hold: amount,
            }),
            _ => {}
        }
    }
    out
}

#[test]
fn cruising_drives_both_wheels_forward() {
    let config = tight_config();
    let (mut strategy, handle) = build(&config);

    strategy.step();

    assert_eq!(handle.output_level(config.pins.motor_right), Some(true));
    assert_eq!(handle.output_level(config.pins.motor_left), Some(false));
    assert_eq!(handle.duty(config.pins.motor_enable), Some(255));
    // No blind holds while cruising.
    assert_eq!(handle.elapsed(), Duration::ZERO);
}

#[test]
fn front_hit_recovery_reaches_the_pins_in_order() {
    let config = tight_config();
    let (mut strategy, handle) = build(&config);
    handle.set_level(config.pins.boundary_front, true);

    strategy.step();

    let journal = handle.journal();
    let held = holds(&journal, &config.pins);
    assert_eq!(
        held,
        vec![
            // Pivot left: both direction lines low, full duty.
            Held { right: false, left: false, duty: 255, hold: Duration::from_millis(500) },
            // Back away.
            Held { right: false, left: true, duty: 255, hold: Duration::from_millis(500) },
            // Pivot right.
            Held { right: true, left: true, duty: 255, hold: Duration::from_millis(500) },
        ]
    );

    // Parked when the sequence ends, 1.5 s of blind holds on the clock.
    assert_eq!(handle.duty(config.pins.motor_enable), Some(0));
    assert_eq!(handle.elapsed(), Duration::from_millis(1500));
}

#[test]
fn recovery_then_clear_resumes_forward() {
    let config = tight_config();
    let (mut strategy, handle) = build(&config);

    handle.set_level(config.pins.boundary_front, true);
    strategy.step();
    handle.set_level(config.pins.boundary_front, false);
    handle.drain_journal();

    strategy.step();

    assert_eq!(handle.output_level(config.pins.motor_right), Some(true));
    assert_eq!(handle.output_level(config.pins.motor_left), Some(false));
    assert_eq!(handle.duty(config.pins.motor_enable), Some(255));
    assert_eq!(strategy.stats().iterations, 2);
    assert_eq!(strategy.stats().recoveries, 1);
}

#[test]
fn rear_contact_keeps_driving_forward() {
    let config = tight_config();
    let (mut strategy, handle) = build(&config);
    handle.set_level(config.pins.boundary_back, true);

    strategy.step();

    assert_eq!(handle.output_level(config.pins.motor_right), Some(true));
    assert_eq!(handle.duty(config.pins.motor_enable), Some(255));
    assert_eq!(handle.elapsed(), Duration::ZERO);
    assert_eq!(strategy.stats().recoveries, 0);
}

#[test]
fn stuck_front_sensor_loops_recovery_forever() {
    let config = tight_config();
    let (mut strategy, handle) = build(&config);
    handle.set_level(config.pins.boundary_front, true);

    for _ in 0..3 {
        strategy.step();
        handle.drain_journal();
    }

    // Accepted behavior: one full blind sequence per iteration, no fault.
    assert_eq!(strategy.stats().recoveries, 3);
    assert_eq!(handle.elapsed(), Duration::from_millis(3 * 1500));
}
