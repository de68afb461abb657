//! # Sumo HAL Library
//!
//! Board abstraction with a pluggable driver architecture.
//!
//! A [`board::Board`] hands out owned, claimed line handles — digital in,
//! digital out, PWM — plus a blocking [`board::Pacer`] time source. The
//! control crate builds its interfaces on claimed lines and never touches a
//! pin number after startup.
//!
//! # Module Structure
//!
//! - [`board`] - `Board` trait, line handles, `Pacer`
//! - [`error`] - `HalError`
//! - [`registry`] - Board factory registration
//! - [`drivers`] - Board implementations (simulation; `raspi` feature)

pub mod board;
pub mod drivers;
pub mod error;
pub mod registry;

pub use board::{Board, InputLine, OutputLine, Pacer, PwmLine, WallPacer};
pub use error::HalError;
pub use registry::{BoardFactory, BoardRegistry};
