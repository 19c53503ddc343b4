//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ai;
pub mod boss;
pub mod collision;
pub mod entity;
pub mod geom;
pub mod layout;
pub mod room;
pub mod scene;
pub mod state;
pub mod tick;

pub use boss::{Boss, BossHit};
pub use entity::{AiState, Door, DoorGroup, Enemy, Hitbox, HitboxKind, Pickup, PickupKind, Player};
pub use geom::{Bounds, Direction, Rect, overlaps};
pub use layout::{BossSpawn, EnemySpawn, GameLayout, RoomTemplate};
pub use room::Room;
pub use scene::SceneController;
pub use state::{GameEvent, GamePhase, WorldState};
pub use tick::{TickInput, tick};
