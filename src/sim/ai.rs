//! Enemy AI - patrol/chase state machine
//!
//! State is picked fresh every tick from the distance between the enemy's
//! centre and the player's centre:
//!   - beyond `sight_range`  -> Patrol
//!   - below `attack_range`  -> Attack (holds position; 0 disables it)
//!   - otherwise             -> Chase
//!
//! The RNG is always passed in so runs replay exactly from a seed.

use rand::Rng;

use super::entity::{AiState, Enemy};
use super::geom::{Direction, Rect};
use crate::tuning::Tuning;

/// Choose a new leg direction uniformly (repeating the current one is allowed)
/// and re-anchor the patrol leg at the current position.
pub fn pick_direction<R: Rng + ?Sized>(enemy: &mut Enemy, rng: &mut R) {
    let dir = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
    enemy.set_direction(dir);
}

/// Evaluate the transition rule and switch state if needed
pub fn update_state(enemy: &mut Enemy, target: &Rect, tuning: &Tuning) -> AiState {
    let distance = enemy.rect.center().distance(target.center());
    let next = if distance > tuning.sight_range {
        AiState::Patrol
    } else if distance < tuning.attack_range {
        AiState::Attack
    } else {
        AiState::Chase
    };

    if next != enemy.ai {
        log::trace!("Enemy {} {:?} -> {:?} (d={:.1})", enemy.id, enemy.ai, next, distance);
        if next == AiState::Patrol {
            // Resume patrolling with a fresh leg from wherever the chase ended
            enemy.set_direction(enemy.facing);
        }
        enemy.ai = next;
    }
    next
}

/// Walk the current leg; turn when the walk range is used up, and sometimes
/// for no reason at all.
pub fn patrol<R: Rng + ?Sized>(enemy: &mut Enemy, tuning: &Tuning, rng: &mut R) {
    if enemy.leg_distance() + tuning.enemy_speed <= tuning.walk_range {
        enemy.rect.translate(enemy.facing, tuning.enemy_speed);
    } else {
        pick_direction(enemy, rng);
    }

    if rng.random_bool(tuning.wander_chance) {
        pick_direction(enemy, rng);
    }
}

/// Step straight toward the target's centre, never overshooting it
pub fn chase(enemy: &mut Enemy, target: &Rect, tuning: &Tuning) {
    let delta = target.center() - enemy.rect.center();
    let distance = delta.length();
    if distance <= 0.0 {
        return;
    }
    enemy.rect.pos += delta / distance * tuning.enemy_speed.min(distance);
    if let Some(dir) = Direction::dominant(delta) {
        enemy.facing = dir;
    }
}

/// Advance one enemy by one tick. Dead enemies do nothing.
pub fn step_enemy<R: Rng + ?Sized>(enemy: &mut Enemy, target: &Rect, tuning: &Tuning, rng: &mut R) {
    if !enemy.alive {
        return;
    }
    match update_state(enemy, target, tuning) {
        AiState::Patrol => patrol(enemy, tuning, rng),
        AiState::Chase => chase(enemy, target, tuning),
        AiState::Attack => {}
    }
}

/// Advance every enemy in a room (stable order for determinism)
pub fn step_enemies<R: Rng + ?Sized>(
    enemies: &mut [Enemy],
    target: &Rect,
    tuning: &Tuning,
    rng: &mut R,
) {
    for enemy in enemies.iter_mut() {
        step_enemy(enemy, target, tuning, rng);
    }
}
