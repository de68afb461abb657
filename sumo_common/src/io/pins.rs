//! Role → pin assignment table.

use serde::{Deserialize, Serialize};

use super::role::PinRole;
use super::PinId;

/// Complete pin assignment for the robot.
///
/// One field per [`PinRole`]; the table is immutable once loaded. Defaults
/// match the stock wiring (Arduino Uno numbering, A0 = 14).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PinMap {
    /// Right motor direction line.
    pub motor_right: PinId,
    /// Left motor direction line.
    pub motor_left: PinId,
    /// Motor speed / enable line (PWM).
    pub motor_enable: PinId,
    /// Ultrasonic trigger line.
    pub range_trigger: PinId,
    /// Ultrasonic echo line.
    pub range_echo: PinId,
    /// Front boundary sensor line.
    pub boundary_front: PinId,
    /// Back boundary sensor line.
    pub boundary_back: PinId,
    /// Buzzer line (PWM).
    pub buzzer: PinId,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            motor_right: 3,
            motor_left: 5,
            motor_enable: 18,
            range_trigger: 7,
            range_echo: 8,
            boundary_front: 14,
            boundary_back: 15,
            buzzer: 19,
        }
    }
}

impl PinMap {
    /// Resolve a role to its assigned pin.
    #[inline]
    pub const fn pin(&self, role: PinRole) -> PinId {
        match role {
            PinRole::MotorRight => self.motor_right,
            PinRole::MotorLeft => self.motor_left,
            PinRole::MotorEnable => self.motor_enable,
            PinRole::RangeTrigger => self.range_trigger,
            PinRole::RangeEcho => self.range_echo,
            PinRole::BoundaryFront => self.boundary_front,
            PinRole::BoundaryBack => self.boundary_back,
            PinRole::Buzzer => self.buzzer,
        }
    }

    /// Check that no pin is assigned to two roles.
    pub fn validate(&self) -> Result<(), String> {
        for (i, a) in PinRole::ALL.iter().enumerate() {
            for b in &PinRole::ALL[i + 1..] {
                if self.pin(*a) == self.pin(*b) {
                    return Err(format!(
                        "pin {} assigned to both {a} and {b}",
                        self.pin(*a)
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_is_valid() {
        PinMap::default().validate().unwrap();
    }

    #[test]
    fn duplicate_pin_rejected() {
        let map = PinMap {
            boundary_back: 14, // collides with boundary_front
            ..Default::default()
        };
        let msg = map.validate().unwrap_err();
        assert!(msg.contains("pin 14"), "got: {msg}");
        assert!(msg.contains("boundary_front"), "got: {msg}");
    }

    #[test]
    fn every_role_resolves() {
        let map = PinMap::default();
        for role in PinRole::ALL {
            // Distinct defaults → each role resolves to its own pin.
            assert_eq!(
                PinRole::ALL.iter().filter(|r| map.pin(**r) == map.pin(role)).count(),
                1
            );
        }
    }
}
