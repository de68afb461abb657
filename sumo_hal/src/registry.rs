//! Board registry.
//!
//! Provides a `BoardRegistry` for registering and creating board drivers.
//! Constructor-injection only — no global state, testable in isolation.

use std::collections::HashMap;

use crate::board::Board;
use crate::error::HalError;

/// Factory function type for creating board instances.
pub type BoardFactory = fn() -> Result<Box<dyn Board>, HalError>;

/// Registry of available board drivers.
///
/// Constructed at startup, populated via `register()`, and consulted once
/// when the configured driver is instantiated.
pub struct BoardRegistry {
    factories: HashMap<&'static str, BoardFactory>,
}

impl BoardRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a board factory.
    ///
    /// # Panics
    /// Panics if a board with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: BoardFactory) {
        if self.factories.contains_key(name) {
            panic!("Board '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Create a board instance by name.
    ///
    /// # Errors
    /// Returns `HalError::BoardNotFound` if no board with the given name is
    /// registered; the message lists the registered names.
    pub fn create_board(&self, name: &str) -> Result<Box<dyn Board>, HalError> {
        let factory = self.factories.get(name).copied().ok_or_else(|| {
            let mut known = self.list_boards();
            known.sort_unstable();
            HalError::BoardNotFound(format!("{name} (registered: {})", known.join(", ")))
        })?;
        factory()
    }

    /// List all registered board names.
    pub fn list_boards(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl Default for BoardRegistry {
    fn default() -> Self {
        Self::new()
    }
}
