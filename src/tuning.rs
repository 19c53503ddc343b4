//! Gameplay balance
//!
//! Every number the simulation uses lives here so a run can be re-tuned from a
//! JSON file without recompiling. Speeds and distances are units per tick.

use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::secs_to_ticks;

/// Shape and timing of one player hitbox (weapon, shield or skill)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitboxTuning {
    /// Damage per hit (0 = push only)
    pub damage: i32,
    /// Knockback applied to the struck target
    pub knockback: f32,
    /// Extent along the facing axis
    pub reach: f32,
    /// Extent across the facing axis
    pub span: f32,
    /// Ticks the hitbox stays live after activation
    pub active_ticks: u32,
    /// Ticks before the action can be triggered again
    pub cooldown_ticks: u32,
}

/// Game balance values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub player_max_health: i32,
    /// Contact-damage immunity after being hit (0 = re-hit every tick)
    pub invulnerable_ticks: u32,

    // === Enemies ===
    pub enemy_size: f32,
    pub enemy_speed: f32,
    pub enemy_health: i32,
    pub sight_range: f32,
    pub walk_range: f32,
    /// Distance below which an enemy stops to attack (0 = never)
    pub attack_range: f32,
    /// Per-tick probability of an unprovoked direction change while patrolling
    pub wander_chance: f64,
    /// Clearance left between an enemy and the obstacle it bounced off
    pub bounce_gap: f32,
    pub contact_damage: i32,
    pub contact_knockback: f32,
    /// Knocked-back entities stay this far inside the arena edge
    pub knockback_margin: f32,

    // === Player actions ===
    pub weapon: HitboxTuning,
    pub shield: HitboxTuning,
    pub skill: HitboxTuning,

    // === Loot ===
    pub gold_value: i32,
    pub food_value: i32,
    pub food_drop_chance: f64,

    // === Boss ===
    pub boss_size: f32,
    pub boss_health: i32,
    /// Minions per wave while the boss is at or above half health
    pub boss_wave_small: u32,
    /// Minions per wave once the boss is below half health
    pub boss_wave_large: u32,
    pub boss_resummon_ticks: u32,
    pub boss_corpse_ticks: u32,
    pub boss_gold_value: i32,

    // === Rooms ===
    /// Gap between a door and the player after passing through it
    pub door_entry_gap: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // Player
            player_size: 30.0,
            player_speed: 10.0,
            player_max_health: 100,
            invulnerable_ticks: secs_to_ticks(0.5),

            // Enemies
            enemy_size: 40.0,
            enemy_speed: 0.6,
            enemy_health: 10,
            sight_range: 150.0,
            walk_range: 400.0,
            attack_range: 0.0,
            wander_chance: 1.0 / 300.0,
            bounce_gap: 5.0,
            contact_damage: 5,
            contact_knockback: 50.0,
            knockback_margin: 50.0,

            // Actions
            weapon: HitboxTuning {
                damage: 5,
                knockback: 30.0,
                reach: 30.0,
                span: 15.0,
                active_ticks: secs_to_ticks(0.3),
                cooldown_ticks: secs_to_ticks(0.4),
            },
            shield: HitboxTuning {
                damage: 0,
                knockback: 20.0,
                reach: 15.0,
                span: 30.0,
                active_ticks: secs_to_ticks(0.5),
                cooldown_ticks: secs_to_ticks(0.6),
            },
            skill: HitboxTuning {
                damage: 10,
                knockback: 80.0,
                reach: 60.0,
                span: 60.0,
                active_ticks: secs_to_ticks(0.4),
                cooldown_ticks: secs_to_ticks(3.0),
            },

            // Loot
            gold_value: 20,
            food_value: 20,
            food_drop_chance: 0.25,

            // Boss
            boss_size: 80.0,
            boss_health: 100,
            boss_wave_small: 2,
            boss_wave_large: 4,
            boss_resummon_ticks: secs_to_ticks(5.0),
            boss_corpse_ticks: secs_to_ticks(2.0),
            boss_gold_value: 100,

            // Rooms
            door_entry_gap: 5.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SetupError> {
        let positive = [
            ("player_size", self.player_size),
            ("player_speed", self.player_speed),
            ("enemy_size", self.enemy_size),
            ("walk_range", self.walk_range),
            ("boss_size", self.boss_size),
            ("weapon.reach", self.weapon.reach),
            ("weapon.span", self.weapon.span),
            ("shield.reach", self.shield.reach),
            ("shield.span", self.shield.span),
            ("skill.reach", self.skill.reach),
            ("skill.span", self.skill.span),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SetupError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        // Stationary enemies are allowed
        if !(self.enemy_speed >= 0.0) {
            return Err(SetupError::InvalidTuning(format!(
                "enemy_speed must not be negative, got {}",
                self.enemy_speed
            )));
        }

        for (name, p) in [
            ("wander_chance", self.wander_chance),
            ("food_drop_chance", self.food_drop_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SetupError::InvalidTuning(format!(
                    "{name} must be a probability, got {p}"
                )));
            }
        }

        if self.player_max_health <= 0 || self.enemy_health <= 0 || self.boss_health <= 0 {
            return Err(SetupError::InvalidTuning(
                "health values must be positive".to_string(),
            ));
        }

        if self.attack_range >= self.sight_range {
            log::warn!(
                "attack_range {} >= sight_range {}: enemies will never chase",
                self.attack_range,
                self.sight_range
            );
        }

        Ok(())
    }

    /// Minion count for a boss wave given the boss's current health
    pub fn boss_wave_size(&self, health: i32, max_health: i32) -> u32 {
        if health * 2 >= max_health {
            self.boss_wave_small
        } else {
            self.boss_wave_large
        }
    }
}
