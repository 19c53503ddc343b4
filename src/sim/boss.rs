//! Boss entity and its fight phases
//!
//! Phases, driven once per tick while the boss room is current:
//! 1. First update: the fight starts and the first minion wave is summoned.
//! 2. While any minion lives the boss is shielded (immune to damage).
//! 3. Wave cleared: the boss is vulnerable for `boss_resummon_ticks`, then
//!    summons the next wave (larger once below half health).
//! 4. Dead: inert corpse (not solid) until removed `boss_corpse_ticks` later.

use glam::Vec2;

use super::entity::Enemy;
use super::geom::{Bounds, Direction, Rect};
use super::room::Room;
use super::state::GameEvent;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, TILE};
use crate::tuning::Tuning;

/// Outcome of a hit on the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossHit {
    /// Already dead
    Ignored,
    /// Minions alive, no damage taken
    Shielded,
    Damaged,
    Killed,
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub rect: Rect,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    /// Immune while any minion is alive
    pub shielded: bool,
    pub fight_started: bool,
    /// Countdown to the next wave while vulnerable (None while a wave lives)
    pub resummon_ticks: Option<u32>,
    /// Countdown to corpse removal
    pub corpse_ticks: u32,
    /// Boss gold has been dropped
    pub looted: bool,
}

impl Boss {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            rect: Rect::square(pos.x, pos.y, tuning.boss_size),
            health: tuning.boss_health,
            max_health: tuning.boss_health,
            alive: true,
            shielded: false,
            fight_started: false,
            resummon_ticks: None,
            corpse_ticks: tuning.boss_corpse_ticks,
            looted: false,
        }
    }

    pub fn take_damage(&mut self, amount: i32) -> BossHit {
        if !self.alive {
            return BossHit::Ignored;
        }
        if self.shielded {
            return BossHit::Shielded;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.health = 0;
            self.alive = false;
            self.shielded = false;
            self.resummon_ticks = None;
            return BossHit::Killed;
        }
        BossHit::Damaged
    }

    /// Health as a 0-1 fraction for the UI bar
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Advance the boss fight in `room` by one tick
pub fn update_boss(room: &mut Room, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let Some(boss) = room.boss.as_mut() else {
        return;
    };

    if !boss.alive {
        boss.corpse_ticks = boss.corpse_ticks.saturating_sub(1);
        if boss.corpse_ticks == 0 && boss.looted {
            log::debug!("Boss corpse removed from {}", room.name);
            room.boss = None;
        }
        return;
    }

    if !boss.fight_started {
        boss.fight_started = true;
        log::info!("Boss fight started in {}", room.name);
        events.push(GameEvent::BossFightStarted);
        summon_wave(room, tuning, events);
        return;
    }

    let minions_alive = room.enemies.iter().any(|e| e.minion && e.alive);
    if minions_alive {
        boss.shielded = true;
        return;
    }

    if boss.shielded {
        boss.shielded = false;
        log::debug!("Boss shield down");
        events.push(GameEvent::BossVulnerable);
    }

    let pending = boss.resummon_ticks;
    match pending {
        None => boss.resummon_ticks = Some(tuning.boss_resummon_ticks),
        Some(0) => summon_wave(room, tuning, events),
        Some(n) => boss.resummon_ticks = Some(n - 1),
    }
}

/// Spawn a minion wave around the boss and raise its shield
fn summon_wave(room: &mut Room, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let Some(boss) = room.boss.as_mut() else {
        return;
    };
    let count = tuning.boss_wave_size(boss.health, boss.max_health);
    let around = boss.rect;
    boss.shielded = count > 0;
    boss.resummon_ticks = None;

    // Left/right first, then above/below for the larger wave
    let sides = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
    let interior = Bounds::arena(ARENA_WIDTH, ARENA_HEIGHT).inset(TILE);
    for side in sides.iter().cycle().take(count as usize) {
        let pos = minion_position(&around, *side, tuning);
        let id = room.next_id();
        let mut minion = Enemy::minion(id, pos, *side, tuning);
        interior.clamp(&mut minion.rect);
        minion.anchor = minion.rect.pos;
        room.enemies.push(minion);
    }

    log::info!("Boss summoned {} minions", count);
    events.push(GameEvent::MinionsSummoned { count });
}

/// Top-left of a minion placed beside the boss on `side`
fn minion_position(boss: &Rect, side: Direction, tuning: &Tuning) -> Vec2 {
    let size = tuning.enemy_size;
    let gap = tuning.bounce_gap;
    let c = boss.center();
    match side {
        Direction::Left => Vec2::new(boss.left() - size - gap, c.y - size / 2.0),
        Direction::Right => Vec2::new(boss.right() + gap, c.y - size / 2.0),
        Direction::Up => Vec2::new(c.x - size / 2.0, boss.top() - size - gap),
        Direction::Down => Vec2::new(c.x - size / 2.0, boss.bottom() + gap),
    }
}
