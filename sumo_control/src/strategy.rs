//! Boundary-avoidance strategy.
//!
//! A two-state machine — `Cruising` and `Recovering` — evaluated once per
//! loop iteration. The robot cruises forward until the front boundary
//! sensor trips, then runs a fixed, non-interruptible recovery sequence:
//! stop, pivot left, back away, pivot right, and resume. A rear-only
//! contact drives forward, away from the rear edge.
//!
//! A stuck sensor makes the robot loop recovery forever or cruise forever.
//! That is accepted behavior, not a fault — there is no error path out of
//! the strategy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use sumo_common::config::RobotConfig;
use sumo_common::motion::MotionCommand;
use sumo_common::sensing::BoundaryContact;
use sumo_hal::board::Pacer;
use tracing::{debug, info};

use crate::actuator::MotorActuator;
use crate::sensor::BoundarySensors;

/// Operating state of the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveState {
    /// Driving forward, watching the boundary sensors.
    #[default]
    Cruising,
    /// Executing the fixed recovery sequence.
    Recovering,
}

/// O(1) per-iteration counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyStats {
    /// Total loop iterations executed.
    pub iterations: u64,
    /// Recovery sequences run.
    pub recoveries: u64,
}

/// The perception-decision-action loop.
///
/// Owns all decision state. Sensors and actuator are injected at
/// construction; there is exactly one command in flight at any instant, and
/// every command is chosen from a snapshot taken the same iteration.
pub struct AvoidanceStrategy<D, S> {
    drive: D,
    sensors: S,
    pacer: Box<dyn Pacer>,
    turn_hold: Duration,
    reverse_hold: Duration,
    poll_interval: Duration,
    state: DriveState,
    stats: StrategyStats,
}

impl<D: MotorActuator, S: BoundarySensors> AvoidanceStrategy<D, S> {
    /// Build the strategy from its collaborators and the timing config.
    pub fn new(drive: D, sensors: S, pacer: Box<dyn Pacer>, config: &RobotConfig) -> Self {
        Self {
            drive,
            sensors,
            pacer,
            turn_hold: config.turn_hold(),
            reverse_hold: config.reverse_hold(),
            poll_interval: config.poll_interval(),
            state: DriveState::default(),
            stats: StrategyStats::default(),
        }
    }

    /// Current operating state.
    #[inline]
    pub const fn state(&self) -> DriveState {
        self.state
    }

    /// Iteration counters.
    #[inline]
    pub const fn stats(&self) -> StrategyStats {
        self.stats
    }

    /// One perception-decision-action iteration.
    pub fn step(&mut self) -> BoundaryContact {
        self.stats.iterations += 1;
        let contact = self.sensors.sample().classify();
        match contact {
            BoundaryContact::Clear => {
                self.drive.apply(MotionCommand::Forward);
                self.state = DriveState::Cruising;
            }
            BoundaryContact::BackHit => {
                debug!("rear boundary contact, driving clear");
                self.drive.apply(MotionCommand::Forward);
                self.state = DriveState::Cruising;
            }
            BoundaryContact::FrontHit => self.recover(contact),
        }
        contact
    }

    /// The fixed recovery sequence. Non-interruptible: the holds are blind —
    /// sensors are not consulted until the sequence completes.
    fn recover(&mut self, contact: BoundaryContact) {
        self.state = DriveState::Recovering;
        self.stats.recoveries += 1;
        debug!("front boundary contact, running recovery sequence");

        self.drive.apply(MotionCommand::Stop);
        self.drive.apply(MotionCommand::TurnLeft);
        self.pacer.pause(self.turn_hold);
        self.drive.apply(MotionCommand::Stop);

        // Re-test the classification taken at the top of the iteration —
        // deliberately not a fresh poll.
        if matches!(contact, BoundaryContact::FrontHit) {
            self.drive.apply(MotionCommand::Backward);
            self.pacer.pause(self.reverse_hold);
            self.drive.apply(MotionCommand::Stop);
            self.drive.apply(MotionCommand::TurnRight);
            self.pacer.pause(self.turn_hold);
            self.drive.apply(MotionCommand::Stop);
        }

        self.state = DriveState::Cruising;
    }

    /// Run until the flag clears, then park the drive.
    ///
    /// The flag is observed once per iteration — never mid-hold.
    pub fn run(&mut self, running: &AtomicBool) {
        info!("boundary-avoidance loop started");
        while running.load(Ordering::SeqCst) {
            self.step();
            if !self.poll_interval.is_zero() {
                self.pacer.pause(self.poll_interval);
            }
        }
        self.drive.apply(MotionCommand::Stop);
        info!(
            iterations = self.stats.iterations,
            recoveries = self.stats.recoveries,
            "boundary-avoidance loop stopped"
        );
    }
}
