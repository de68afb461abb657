//! HAL error types.

use sumo_common::io::PinId;
use thiserror::Error;

/// Error types for board operations.
#[derive(Debug, Clone, Error)]
pub enum HalError {
    /// Board initialization failed.
    #[error("board initialization failed: {0}")]
    InitFailed(String),

    /// Pin already claimed by another line.
    #[error("pin {0} is already claimed")]
    PinBusy(PinId),

    /// A line could not be sampled.
    #[error("read failed on pin {pin}: {reason}")]
    ReadFailed {
        /// Pin the read was attempted on.
        pin: PinId,
        /// Driver-specific failure description.
        reason: String,
    },

    /// A line could not be written.
    #[error("write failed on pin {pin}: {reason}")]
    WriteFailed {
        /// Pin the write was attempted on.
        pin: PinId,
        /// Driver-specific failure description.
        reason: String,
    },

    /// No board driver registered under the requested name.
    #[error("board driver not found: {0}")]
    BoardNotFound(String),
}
