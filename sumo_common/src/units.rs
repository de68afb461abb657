//! Distance units and ultrasonic echo-time conversion.

use core::fmt;
use std::time::Duration;

/// Speed of sound used for echo conversion [cm/µs].
pub const SPEED_OF_SOUND_CM_PER_US: f64 = 0.034;

/// Distance in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Centimeters(pub f64);

impl fmt::Display for Centimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} cm", self.0)
    }
}

/// Convert a round-trip echo time to the one-way distance.
///
/// `distance = echo_µs * 0.034 / 2` — half the path because the pulse
/// travels out and back.
#[inline]
pub fn echo_to_distance(echo: Duration) -> Centimeters {
    Centimeters(echo.as_micros() as f64 * SPEED_OF_SOUND_CM_PER_US / 2.0)
}
