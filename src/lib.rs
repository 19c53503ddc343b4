//! Room Crawler - a top-down room-by-room action game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, enemy AI, rooms, transitions)
//! - `tuning`: Data-driven game balance
//! - `view`: Read-only draw/HUD data for the rendering layer
//! - `error`: Setup (configuration and layout) errors

pub mod error;
pub mod sim;
pub mod tuning;
pub mod view;

pub use error::SetupError;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (movement speeds are units per tick)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 500.0;
    pub const ARENA_HEIGHT: f32 = 500.0;

    /// Wall, door and floor cell size
    pub const TILE: f32 = 50.0;
    /// Tiles per arena edge (including the border ring)
    pub const TILES_PER_EDGE: u32 = (ARENA_WIDTH / TILE) as u32;
}

/// Convert seconds to whole simulation steps of `SIM_DT`
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs / consts::SIM_DT).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(0.3), 18);
        assert_eq!(secs_to_ticks(3.0), 180);
        assert_eq!(secs_to_ticks(-1.0), 0);
    }
}
