//! TOML configuration loader with validation.
//!
//! Loads the [`RobotConfig`] from a single TOML file. Every field has a
//! default matching the stock robot wiring and timings, so an empty file is
//! a valid configuration. Validates: pin uniqueness and nonzero recovery holds /
//! echo timeout.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{
    DEFAULT_BOUNDARY_THRESHOLD, DEFAULT_ECHO_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_REVERSE_HOLD_MS, DEFAULT_TURN_HOLD_MS,
};
use crate::io::PinMap;

// ─── Error Type ─────────────────────────────────────────────────────

/// Configuration loading/validation error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("config I/O error: {0}")]
    Io(String),
    /// TOML parse error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Semantic validation error.
    #[error("config validation: {0}")]
    Validation(String),
}

// ─── Config Sections ────────────────────────────────────────────────

/// Per-sensor "over boundary" thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// Front sensor threshold (raw level ≥ threshold ⇒ over boundary).
    pub front: u8,
    /// Back sensor threshold.
    pub back: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            front: DEFAULT_BOUNDARY_THRESHOLD,
            back: DEFAULT_BOUNDARY_THRESHOLD,
        }
    }
}

/// Fixed wall-clock holds of the recovery sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecoveryConfig {
    /// Hold for each turn leg [ms].
    pub turn_hold_ms: u64,
    /// Hold for the reverse leg [ms].
    pub reverse_hold_ms: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            turn_hold_ms: DEFAULT_TURN_HOLD_MS,
            reverse_hold_ms: DEFAULT_REVERSE_HOLD_MS,
        }
    }
}

/// Ultrasonic range-sensor tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RangeConfig {
    /// Bound on the echo wait [ms]; elapsed means "no reading".
    pub echo_timeout_ms: u64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            echo_timeout_ms: DEFAULT_ECHO_TIMEOUT_MS,
        }
    }
}

// ─── Robot Config ───────────────────────────────────────────────────

/// Complete validated robot configuration.
///
/// Loaded once at startup, never mutated, and passed by reference into the
/// interface constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RobotConfig {
    /// Board driver name (e.g. "simulation").
    pub driver: String,
    /// Pause between strategy iterations [ms]; 0 = tight loop.
    pub poll_interval_ms: u64,
    /// Role → pin assignment.
    pub pins: PinMap,
    /// Boundary classification thresholds.
    pub thresholds: Thresholds,
    /// Recovery-sequence holds.
    pub recovery: RecoveryConfig,
    /// Range-sensor tuning.
    pub range: RangeConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            driver: "simulation".to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            pins: PinMap::default(),
            thresholds: Thresholds::default(),
            recovery: RecoveryConfig::default(),
            range: RangeConfig::default(),
        }
    }
}

impl RobotConfig {
    /// Run all validation rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pins.validate().map_err(ConfigError::Validation)?;
        if self.driver.is_empty() {
            return Err(ConfigError::Validation("driver name is empty".into()));
        }
        if self.recovery.turn_hold_ms == 0 {
            return Err(ConfigError::Validation("recovery.turn_hold_ms must be > 0".into()));
        }
        if self.recovery.reverse_hold_ms == 0 {
            return Err(ConfigError::Validation(
                "recovery.reverse_hold_ms must be > 0".into(),
            ));
        }
        if self.range.echo_timeout_ms == 0 {
            return Err(ConfigError::Validation("range.echo_timeout_ms must be > 0".into()));
        }
        Ok(())
    }

    /// Turn-leg hold as a `Duration`.
    #[inline]
    pub const fn turn_hold(&self) -> Duration {
        Duration::from_millis(self.recovery.turn_hold_ms)
    }

    /// Reverse-leg hold as a `Duration`.
    #[inline]
    pub const fn reverse_hold(&self) -> Duration {
        Duration::from_millis(self.recovery.reverse_hold_ms)
    }

    /// Iteration pause as a `Duration` (zero = tight loop).
    #[inline]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Echo-wait bound as a `Duration`.
    #[inline]
    pub const fn echo_timeout(&self) -> Duration {
        Duration::from_millis(self.range.echo_timeout_ms)
    }
}

// ─── Loading Functions ──────────────────────────────────────────────

/// Load and validate the robot configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RobotConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("failed to read {}: {e}", path.display())))?;
    load_config_from_str(&raw)
}

/// Load config from a TOML string (also used by tests).
pub fn load_config_from_str(raw: &str) -> Result<RobotConfig, ConfigError> {
    let config: RobotConfig =
        toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
