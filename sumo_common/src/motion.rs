//! Motion commands and their direction-signal encoding.
//!
//! A `MotionCommand` is issued, not stored: the actuator applies it and the
//! previous command is superseded entirely. The encoding table matches the
//! drive electronics: two direction lines plus one PWM enable.

use crate::consts::FULL_SPEED_DUTY;

/// Drive command for the differential motor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionCommand {
    /// Both wheels forward, full speed.
    Forward,
    /// Both wheels backward, full speed.
    Backward,
    /// Pivot left, full speed.
    TurnLeft,
    /// Pivot right, full speed.
    TurnRight,
    /// No motion; enable duty zero.
    Stop,
}

/// Raw signal triple one command maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveSignals {
    /// Level of the right direction line.
    pub right_high: bool,
    /// Level of the left direction line.
    pub left_high: bool,
    /// PWM duty on the enable line.
    pub duty: u8,
}

impl DriveSignals {
    /// True when the direction pair differs from `other`, regardless of duty.
    #[inline]
    pub const fn direction_differs(&self, other: &Self) -> bool {
        self.right_high != other.right_high || self.left_high != other.left_high
    }
}

impl MotionCommand {
    /// Signal encoding for this command.
    #[inline]
    pub const fn signals(self) -> DriveSignals {
        match self {
            Self::Forward => DriveSignals {
                right_high: true,
                left_high: false,
                duty: FULL_SPEED_DUTY,
            },
            Self::Backward => DriveSignals {
                right_high: false,
                left_high: true,
                duty: FULL_SPEED_DUTY,
            },
            Self::TurnLeft => DriveSignals {
                right_high: false,
                left_high: false,
                duty: FULL_SPEED_DUTY,
            },
            Self::TurnRight => DriveSignals {
                right_high: true,
                left_high: true,
                duty: FULL_SPEED_DUTY,
            },
            Self::Stop => DriveSignals {
                right_high: false,
                left_high: false,
                duty: 0,
            },
        }
    }

    /// True for every command except `Stop`.
    #[inline]
    pub const fn is_moving(self) -> bool {
        !matches!(self, Self::Stop)
    }
}
