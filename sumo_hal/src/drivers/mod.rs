//! Board driver implementations.
//!
//! The simulation board is always available and is the backend every test
//! runs against. The Raspberry Pi board is compiled in with the `raspi`
//! feature.

pub mod simulation;

#[cfg(feature = "raspi")]
pub mod raspi;

use crate::registry::BoardRegistry;

/// Registry pre-populated with every driver compiled into this build.
pub fn default_registry() -> BoardRegistry {
    let mut registry = BoardRegistry::new();
    registry.register("simulation", simulation::create_board);
    #[cfg(feature = "raspi")]
    registry.register("raspi", raspi::create_board);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_simulation() {
        let registry = default_registry();
        assert!(registry.list_boards().contains(&"simulation"));
        let board = registry.create_board("simulation").unwrap();
        assert_eq!(board.name(), "simulation");
    }
}
