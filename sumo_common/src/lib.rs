//! Sumo Common Library
//!
//! Shared vocabulary for all sumo-core workspace crates.
//!
//! # Module Structure
//!
//! - [`config`] - Robot configuration loading and validation
//! - [`consts`] - System-wide constants and defaults
//! - [`io`] - Pin roles and the logical-role → pin mapping
//! - [`motion`] - Motion commands and their direction-signal encoding
//! - [`sensing`] - Boundary-sensor snapshots and classification
//! - [`units`] - Distance units and echo-time conversion

pub mod config;
pub mod consts;
pub mod io;
pub mod motion;
pub mod sensing;
pub mod units;
