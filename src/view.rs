//! Read-only view of the world for the rendering and UI layers
//!
//! Nothing here mutates the simulation. `draw_list` flattens the current room
//! into back-to-front rectangles ready to upload as an instance buffer;
//! `Hud` is what the text overlay shows.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use crate::sim::entity::{AiState, PickupKind};
use crate::sim::geom::Rect;
use crate::sim::state::{GamePhase, WorldState};

/// One filled rectangle, laid out for a GPU instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawRect {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl DrawRect {
    pub fn new(rect: &Rect, color: [f32; 4]) -> Self {
        Self {
            pos: rect.pos.to_array(),
            size: rect.size.to_array(),
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const FLOOR: [f32; 4] = [0.16, 0.14, 0.12, 1.0];
    pub const WALL: [f32; 4] = [0.35, 0.33, 0.38, 1.0];
    pub const DOOR_LOCKED: [f32; 4] = [0.55, 0.15, 0.12, 1.0];
    pub const DOOR_OPEN: [f32; 4] = [0.25, 0.6, 0.3, 1.0];
    pub const PLAYER: [f32; 4] = [0.2, 0.5, 0.95, 1.0];
    pub const PLAYER_HURT: [f32; 4] = [0.7, 0.75, 1.0, 1.0];
    pub const ENEMY: [f32; 4] = [0.85, 0.3, 0.2, 1.0];
    pub const ENEMY_CHASING: [f32; 4] = [1.0, 0.45, 0.1, 1.0];
    pub const MINION: [f32; 4] = [0.6, 0.2, 0.7, 1.0];
    pub const BOSS: [f32; 4] = [0.45, 0.05, 0.1, 1.0];
    pub const BOSS_SHIELDED: [f32; 4] = [0.55, 0.55, 0.9, 1.0];
    pub const BOSS_CORPSE: [f32; 4] = [0.25, 0.2, 0.2, 1.0];
    pub const GOLD: [f32; 4] = [0.95, 0.8, 0.2, 1.0];
    pub const FOOD: [f32; 4] = [0.4, 0.85, 0.35, 1.0];
    pub const WEAPON: [f32; 4] = [0.9, 0.9, 0.9, 0.9];
    pub const SHIELD: [f32; 4] = [0.5, 0.7, 1.0, 0.7];
    pub const SKILL: [f32; 4] = [1.0, 0.6, 1.0, 0.6];
}

/// Rectangles for the current room, back to front
pub fn draw_list(state: &WorldState) -> Vec<DrawRect> {
    let room = state.current_room();
    let player = &state.player;
    let mut out = Vec::with_capacity(
        room.floors.len() + room.walls.len() + room.doors.len() + room.enemies.len() + 8,
    );

    out.extend(room.floors.iter().map(|r| DrawRect::new(r, colors::FLOOR)));
    out.extend(room.walls.iter().map(|r| DrawRect::new(r, colors::WALL)));
    out.extend(room.doors.iter().map(|d| {
        let color = if d.locked {
            colors::DOOR_LOCKED
        } else {
            colors::DOOR_OPEN
        };
        DrawRect::new(&d.rect, color)
    }));

    for pickup in room.pickups.iter().filter(|p| p.active) {
        let color = match pickup.kind {
            PickupKind::Gold => colors::GOLD,
            PickupKind::Food => colors::FOOD,
        };
        out.push(DrawRect::new(&pickup.rect, color));
    }

    if let Some(boss) = &room.boss {
        let color = match (boss.alive, boss.shielded) {
            (false, _) => colors::BOSS_CORPSE,
            (true, true) => colors::BOSS_SHIELDED,
            (true, false) => colors::BOSS,
        };
        out.push(DrawRect::new(&boss.rect, color));
    }

    for enemy in room.enemies.iter().filter(|e| e.alive) {
        let color = if enemy.minion {
            colors::MINION
        } else if enemy.ai == AiState::Patrol {
            colors::ENEMY
        } else {
            colors::ENEMY_CHASING
        };
        out.push(DrawRect::new(&enemy.rect, color));
    }

    let body = if player.invulnerable_ticks > 0 {
        colors::PLAYER_HURT
    } else {
        colors::PLAYER
    };
    out.push(DrawRect::new(&player.rect, body));

    // Hitboxes only while their action window is open
    if player.attacking() {
        out.push(DrawRect::new(&player.weapon.rect, colors::WEAPON));
    }
    if player.blocking() {
        out.push(DrawRect::new(&player.shield.rect, colors::SHIELD));
    }
    if player.using_ability() {
        out.push(DrawRect::new(&player.skill.rect, colors::SKILL));
    }

    out
}

/// Raw bytes of a draw list for a vertex/instance buffer upload
pub fn as_bytes(rects: &[DrawRect]) -> &[u8] {
    bytemuck::cast_slice(rects)
}

/// Everything the text overlay shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    pub gold: i32,
    /// Boss health while a boss is alive in the current room
    pub boss_health: Option<i32>,
    /// Same, as a 0-1 fill for the health bar
    pub boss_bar: Option<f32>,
    pub room_name: String,
    pub room_index: usize,
    pub room_count: usize,
    pub phase: GamePhase,
    pub can_attack: bool,
    pub can_block: bool,
    pub can_use_ability: bool,
    /// Ticks until the special ability is ready again
    pub ability_cooldown: u32,
}

impl Hud {
    pub fn from_state(state: &WorldState) -> Self {
        let room = state.current_room();
        let player = &state.player;
        let boss = room.boss.as_ref().filter(|b| b.alive);
        Self {
            health: player.health.max(0),
            max_health: player.max_health,
            gold: player.gold,
            boss_health: boss.map(|b| b.health),
            boss_bar: boss.map(|b| b.health_fraction()),
            room_name: room.name.clone(),
            room_index: state.scenes.current_index(),
            room_count: state.scenes.room_count(),
            phase: state.phase,
            can_attack: player.can_attack(),
            can_block: player.can_block(),
            can_use_ability: player.can_use_ability(),
            ability_cooldown: player.skill.cooldown_remaining(),
        }
    }
}
