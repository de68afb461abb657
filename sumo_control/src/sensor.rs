//! Sensor interface: boundary scanner and ultrasonic range finder.

use std::time::Duration;

use sumo_common::config::RobotConfig;
use sumo_common::consts::{TRIGGER_PULSE_US, TRIGGER_SETTLE_US};
use sumo_common::sensing::{over_boundary, SensorSnapshot};
use sumo_common::units::{echo_to_distance, Centimeters};
use sumo_hal::board::{Board, InputLine, OutputLine, Pacer};
use sumo_hal::error::HalError;
use tracing::{debug, warn};

/// Seam the strategy polls through.
pub trait BoundarySensors {
    /// Take a fresh snapshot of both boundary sensors. Non-blocking; a
    /// single read is authoritative for that instant.
    fn sample(&self) -> SensorSnapshot;
}

/// Both reflectance sensors behind one snapshot call.
///
/// An unreadable line classifies as "on surface" — the safe default that
/// favours continued cruising over an unwarranted recovery maneuver.
pub struct BoundaryScanner {
    front: Box<dyn InputLine>,
    back: Box<dyn InputLine>,
    front_threshold: u8,
    back_threshold: u8,
}

impl BoundaryScanner {
    /// Claim both boundary lines.
    pub fn new(board: &mut dyn Board, config: &RobotConfig) -> Result<Self, HalError> {
        Ok(Self {
            front: board.claim_input(config.pins.boundary_front)?,
            back: board.claim_input(config.pins.boundary_back)?,
            front_threshold: config.thresholds.front,
            back_threshold: config.thresholds.back,
        })
    }

    fn raw_level(line: &dyn InputLine, which: &'static str) -> u8 {
        match line.read() {
            Ok(high) => high as u8,
            Err(e) => {
                warn!(sensor = which, error = %e, "boundary read failed, assuming on surface");
                0
            }
        }
    }
}

impl BoundarySensors for BoundaryScanner {
    fn sample(&self) -> SensorSnapshot {
        let front_raw = Self::raw_level(self.front.as_ref(), "front");
        let back_raw = Self::raw_level(self.back.as_ref(), "back");
        SensorSnapshot {
            front_over_boundary: over_boundary(front_raw, self.front_threshold),
            back_over_boundary: over_boundary(back_raw, self.back_threshold),
        }
    }
}

/// Ultrasonic distance sensor with a bounded echo wait.
///
/// Not consulted by the boundary strategy; exposed for future extension and
/// surfaced once at startup as a diagnostic.
pub struct RangeFinder {
    trigger: Box<dyn OutputLine>,
    echo: Box<dyn InputLine>,
    pacer: Box<dyn Pacer>,
    timeout: Duration,
}

impl RangeFinder {
    /// Claim the trigger and echo lines.
    pub fn new(board: &mut dyn Board, config: &RobotConfig) -> Result<Self, HalError> {
        Ok(Self {
            trigger: board.claim_output(config.pins.range_trigger)?,
            echo: board.claim_input(config.pins.range_echo)?,
            pacer: board.pacer(),
            timeout: config.echo_timeout(),
        })
    }

    /// Fire a trigger pulse and measure the echo.
    ///
    /// `None` means no reading: the echo never arrived within the bound, or
    /// a line failed. Blocks for at most the settle + pulse + timeout.
    pub fn measure(&mut self) -> Option<Centimeters> {
        if let Err(e) = self.pulse_trigger() {
            warn!(error = %e, "trigger pulse failed");
            return None;
        }
        match self.echo.measure_pulse(true, self.timeout) {
            Ok(Some(width)) => Some(echo_to_distance(width)),
            Ok(None) => {
                debug!("echo wait timed out");
                None
            }
            Err(e) => {
                warn!(error = %e, "echo read failed");
                None
            }
        }
    }

    fn pulse_trigger(&mut self) -> Result<(), HalError> {
        self.trigger.write(false)?;
        self.pacer.pause(Duration::from_micros(TRIGGER_SETTLE_US));
        self.trigger.write(true)?;
        self.pacer.pause(Duration::from_micros(TRIGGER_PULSE_US));
        self.trigger.write(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumo_hal::drivers::simulation::{SimBoard, SimEvent, SimHandle};

    fn scanner_setup() -> (BoundaryScanner, SimHandle, RobotConfig) {
        let mut board = SimBoard::new();
        let handle = board.handle();
        let config = RobotConfig::default();
        let scanner = BoundaryScanner::new(&mut board, &config).unwrap();
        (scanner, handle, config)
    }

    #[test]
    fn clean_surface_reads_clear() {
        let (scanner, _handle, _config) = scanner_setup();
        let snap = scanner.sample();
        assert!(!snap.front_over_boundary);
        assert!(!snap.back_over_boundary);
    }

    #[test]
    fn front_level_crosses_threshold() {
        let (scanner, handle, config) = scanner_setup();
        handle.set_level(config.pins.boundary_front, true);
        let snap = scanner.sample();
        assert!(snap.front_over_boundary);
        assert!(!snap.back_over_boundary);
    }

    #[test]
    fn unreadable_sensor_defaults_to_surface() {
        let (scanner, handle, config) = scanner_setup();
        handle.set_level(config.pins.boundary_front, true);
        handle.fail_reads_on(config.pins.boundary_front);

        // Despite the high level, the failed read classifies as safe.
        let snap = scanner.sample();
        assert!(!snap.front_over_boundary);
    }

    #[test]
    fn raised_threshold_ignores_digital_high() {
        let mut board = SimBoard::new();
        let handle = board.handle();
        let mut config = RobotConfig::default();
        config.thresholds.front = 2;
        let scanner = BoundaryScanner::new(&mut board, &config).unwrap();

        handle.set_level(config.pins.boundary_front, true);
        assert!(!scanner.sample().front_over_boundary);
    }

    fn finder_setup() -> (RangeFinder, SimHandle, RobotConfig) {
        let mut board = SimBoard::new();
        let handle = board.handle();
        let config = RobotConfig::default();
        let finder = RangeFinder::new(&mut board, &config).unwrap();
        (finder, handle, config)
    }

    #[test]
    fn echo_converts_to_distance() {
        let (mut finder, handle, config) = finder_setup();
        handle.queue_echo(config.pins.range_echo, Duration::from_micros(580));

        let d = finder.measure().unwrap();
        assert_eq!(d.0, 580.0 * 0.034 / 2.0);
    }

    #[test]
    fn missing_echo_is_no_reading() {
        let (mut finder, handle, _config) = finder_setup();
        assert!(finder.measure().is_none());
        // The wait consumed the configured bound (plus the trigger train).
        assert!(handle.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn trigger_train_shape() {
        let (mut finder, handle, config) = finder_setup();
        handle.queue_echo(config.pins.range_echo, Duration::from_micros(100));
        finder.measure();

        let trig = config.pins.range_trigger;
        let events: Vec<_> = handle
            .journal()
            .into_iter()
            .map(|e| e.event)
            .collect();
        assert_eq!(
            events,
            vec![
                SimEvent::Write { pin: trig, high: false },
                SimEvent::Pause { amount: Duration::from_micros(2) },
                SimEvent::Write { pin: trig, high: true },
                SimEvent::Pause { amount: Duration::from_micros(10) },
                SimEvent::Write { pin: trig, high: false },
            ]
        );
    }

    #[test]
    fn broken_trigger_line_yields_none() {
        let (mut finder, handle, config) = finder_setup();
        handle.fail_writes_on(config.pins.range_trigger);
        handle.queue_echo(config.pins.range_echo, Duration::from_micros(100));
        assert!(finder.measure().is_none());
    }
}
