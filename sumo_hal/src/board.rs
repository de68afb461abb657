//! Board trait and claimed line handles.
//!
//! A board configures pins on claim and hands out owned handles; a claimed
//! pin cannot be claimed again. All line operations are blocking and run to
//! completion — there is no asynchronous suspension anywhere in the system.

use std::time::Duration;

use sumo_common::io::PinId;

use crate::error::HalError;

/// Owned handle to a digital input line.
pub trait InputLine {
    /// Sample the line. A single read is authoritative for that instant.
    fn read(&self) -> Result<bool, HalError>;

    /// Wait for a pulse at `level` and measure its width.
    ///
    /// Blocks until the pulse completes or `timeout` elapses; `Ok(None)`
    /// means no complete pulse arrived in time. The wait is always bounded.
    fn measure_pulse(&self, level: bool, timeout: Duration) -> Result<Option<Duration>, HalError>;
}

/// Owned handle to a digital output line.
pub trait OutputLine {
    /// Drive the line high or low.
    fn write(&mut self, high: bool) -> Result<(), HalError>;
}

/// Owned handle to a PWM-capable output line.
pub trait PwmLine {
    /// Set the duty level (0 = off, 255 = full).
    fn set_duty(&mut self, duty: u8) -> Result<(), HalError>;

    /// Start a square-wave tone at the given frequency.
    fn start_tone(&mut self, freq_hz: u16) -> Result<(), HalError>;

    /// Silence the line.
    fn stop_tone(&mut self) -> Result<(), HalError>;
}

/// Blocking time source.
///
/// Wall-clock on hardware; a virtual clock in simulation so timed holds are
/// observable without real elapsed time.
pub trait Pacer {
    /// Block for the given amount of time.
    fn pause(&self, amount: Duration);
}

/// Pluggable hardware backend.
///
/// Object-safe so boards can be produced by the [`registry`](crate::registry)
/// and passed around as `Box<dyn Board>`.
pub trait Board {
    /// Driver's unique identifier (e.g. "simulation", "raspi").
    fn name(&self) -> &'static str;

    /// Claim a pin as a digital input.
    fn claim_input(&mut self, pin: PinId) -> Result<Box<dyn InputLine>, HalError>;

    /// Claim a pin as a digital output.
    fn claim_output(&mut self, pin: PinId) -> Result<Box<dyn OutputLine>, HalError>;

    /// Claim a pin as a PWM output.
    fn claim_pwm(&mut self, pin: PinId) -> Result<Box<dyn PwmLine>, HalError>;

    /// The board's time source.
    fn pacer(&self) -> Box<dyn Pacer>;
}

/// Wall-clock pacer backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallPacer;

impl Pacer for WallPacer {
    fn pause(&self, amount: Duration) {
        std::thread::sleep(amount);
    }
}
