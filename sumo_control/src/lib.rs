//! # Sumo Control Library
//!
//! Control logic for an autonomous two-wheeled sumo robot: boundary sensors
//! in, differential motor commands out, one startup chime. The strategy is
//! the only component with decision state; the interfaces are stateless
//! adapters over claimed HAL lines.
//!
//! Data flows one way:
//!
//! ```text
//! BoundaryScanner ──► AvoidanceStrategy ──► MotorDrive
//! ```

pub mod actuator;
pub mod chime;
pub mod sensor;
pub mod strategy;

pub use actuator::{MotorActuator, MotorDrive};
pub use chime::StartupChime;
pub use sensor::{BoundaryScanner, BoundarySensors, RangeFinder};
pub use strategy::{AvoidanceStrategy, DriveState};
