//! Actuator interface: motion commands onto the motor lines.

use sumo_common::io::PinMap;
use sumo_common::motion::{DriveSignals, MotionCommand};
use sumo_hal::board::{Board, OutputLine, PwmLine};
use sumo_hal::error::HalError;
use tracing::{trace, warn};

/// Seam the strategy drives through.
///
/// Infallible by design: hardware write failures are not observable above
/// this seam, so implementations log and continue.
pub trait MotorActuator {
    /// Apply a command, superseding the previous one entirely.
    fn apply(&mut self, command: MotionCommand);
}

/// Differential drive over two direction lines and one PWM enable line.
///
/// Write ordering invariant: when a command transition changes the direction
/// pair while the enable duty is nonzero, the duty is dropped to zero before
/// the direction lines change; direction lines always settle before the duty
/// rises again. No intermediate state can produce unintended motion.
pub struct MotorDrive {
    right: Box<dyn OutputLine>,
    left: Box<dyn OutputLine>,
    speed: Box<dyn PwmLine>,
    applied: DriveSignals,
}

impl MotorDrive {
    /// Claim the motor lines and park the drive in the stopped state.
    pub fn new(board: &mut dyn Board, pins: &PinMap) -> Result<Self, HalError> {
        let right = board.claim_output(pins.motor_right)?;
        let left = board.claim_output(pins.motor_left)?;
        let speed = board.claim_pwm(pins.motor_enable)?;
        let mut drive = Self {
            right,
            left,
            speed,
            applied: MotionCommand::Stop.signals(),
        };
        drive.write_signals(MotionCommand::Stop.signals());
        Ok(drive)
    }

    fn write_signals(&mut self, next: DriveSignals) {
        if let Err(e) = self.right.write(next.right_high) {
            warn!(error = %e, "right direction write failed");
        }
        if let Err(e) = self.left.write(next.left_high) {
            warn!(error = %e, "left direction write failed");
        }
        if let Err(e) = self.speed.set_duty(next.duty) {
            warn!(error = %e, "speed write failed");
        }
        self.applied = next;
    }
}

impl MotorActuator for MotorDrive {
    fn apply(&mut self, command: MotionCommand) {
        let next = command.signals();
        if next.direction_differs(&self.applied) && self.applied.duty > 0 {
            // Kill the drive before the direction pair flips.
            if let Err(e) = self.speed.set_duty(0) {
                warn!(error = %e, "speed write failed");
            }
            self.applied.duty = 0;
        }
        self.write_signals(next);
        trace!(?command, "motor command applied");
    }
}
