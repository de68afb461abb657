//! Logical pin roles.
//!
//! `PinRole` names every hardware line the robot uses by function rather
//! than pin number. The strategy and interfaces resolve lines by role;
//! only the [`PinMap`](super::PinMap) knows the board-level numbering.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Functional role of a hardware line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinRole {
    /// Right motor direction line (digital out).
    MotorRight,
    /// Left motor direction line (digital out).
    MotorLeft,
    /// Motor speed / enable line (PWM out).
    MotorEnable,
    /// Ultrasonic trigger line (digital out).
    RangeTrigger,
    /// Ultrasonic echo line (digital in).
    RangeEcho,
    /// Front boundary reflectance sensor (digital in).
    BoundaryFront,
    /// Back boundary reflectance sensor (digital in).
    BoundaryBack,
    /// Piezo buzzer line (PWM out).
    Buzzer,
}

impl PinRole {
    /// All roles, in claiming order. Every role must be mapped exactly once.
    pub const ALL: [Self; 8] = [
        Self::MotorRight,
        Self::MotorLeft,
        Self::MotorEnable,
        Self::RangeTrigger,
        Self::RangeEcho,
        Self::BoundaryFront,
        Self::BoundaryBack,
        Self::Buzzer,
    ];

    /// Returns true for roles the board must configure as inputs.
    #[inline]
    pub const fn is_input(self) -> bool {
        matches!(self, Self::RangeEcho | Self::BoundaryFront | Self::BoundaryBack)
    }
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MotorRight => "motor_right",
            Self::MotorLeft => "motor_left",
            Self::MotorEnable => "motor_enable",
            Self::RangeTrigger => "range_trigger",
            Self::RangeEcho => "range_echo",
            Self::BoundaryFront => "boundary_front",
            Self::BoundaryBack => "boundary_back",
            Self::Buzzer => "buzzer",
        };
        write!(f, "{s}")
    }
}

impl FromStr for PinRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "motor_right" => Ok(Self::MotorRight),
            "motor_left" => Ok(Self::MotorLeft),
            "motor_enable" => Ok(Self::MotorEnable),
            "range_trigger" => Ok(Self::RangeTrigger),
            "range_echo" => Ok(Self::RangeEcho),
            "boundary_front" => Ok(Self::BoundaryFront),
            "boundary_back" => Ok(Self::BoundaryBack),
            "buzzer" => Ok(Self::Buzzer),
            _ => Err(format!("unknown PinRole: {s:?}")),
        }
    }
}
