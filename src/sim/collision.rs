//! Collision resolution passes
//!
//! Every pass is built on `geom::overlaps`. Responses:
//! - player vs solid (wall, locked door, live boss): push out along the
//!   player's heading only; no heading, no push
//! - player vs enemy: contact damage + knockback along the enemy's facing
//! - player vs pickup: consume
//! - player vs unlocked door: report it so the tick can change rooms
//! - hitbox vs enemy/boss: weapon and skill hit at most one target per
//!   activation; the shield only pushes
//! - enemy vs wall/door/enemy: bounce clear and turn

use rand::Rng;

use super::ai::pick_direction;
use super::boss::BossHit;
use super::entity::{Door, DoorGroup, Enemy, HitboxKind, Pickup, PickupKind, Player};
use super::geom::{Bounds, Direction, Rect, overlaps};
use super::room::Room;
use super::state::GameEvent;
use crate::tuning::Tuning;

/// Push the player out of walls, locked doors and a live boss
pub fn resolve_player_solids(player: &mut Player, room: &Room) {
    let Some(heading) = player.heading else {
        return;
    };

    let walls = room.walls.iter();
    let locked_doors = room.doors.iter().filter(|d| d.locked).map(|d| &d.rect);
    let boss = room.boss.iter().filter(|b| b.alive).map(|b| &b.rect);

    for solid in walls.chain(locked_doors).chain(boss) {
        if overlaps(&player.rect, solid) {
            player.rect.push_out(heading, solid);
        }
    }
}

/// Contact damage from live enemies
pub fn resolve_player_enemies(
    player: &mut Player,
    enemies: &[Enemy],
    tuning: &Tuning,
    arena: &Bounds,
    events: &mut Vec<GameEvent>,
) {
    let knockback_bounds = arena.inset(tuning.knockback_margin);
    for enemy in enemies.iter().filter(|e| e.alive) {
        if player.invulnerable_ticks > 0 {
            return;
        }
        if !overlaps(&player.rect, &enemy.rect) {
            continue;
        }
        player.take_damage(tuning.contact_damage);
        player
            .rect
            .knockback(enemy.facing, tuning.contact_knockback, &knockback_bounds);
        player.invulnerable_ticks = tuning.invulnerable_ticks;
        log::debug!(
            "Enemy {} hit player for {} (health {})",
            enemy.id,
            tuning.contact_damage,
            player.health
        );
        events.push(GameEvent::PlayerDamaged {
            amount: tuning.contact_damage,
            health: player.health,
        });
    }
}

/// Consume every active pickup the player touches
pub fn collect_pickups(player: &mut Player, pickups: &mut [Pickup], events: &mut Vec<GameEvent>) {
    for pickup in pickups.iter_mut().filter(|p| p.active) {
        if !overlaps(&player.rect, &pickup.rect) {
            continue;
        }
        pickup.active = false;
        match pickup.kind {
            PickupKind::Gold => player.gold += pickup.value,
            PickupKind::Food => player.heal(pickup.value),
        }
        log::debug!("Picked up {:?} ({})", pickup.kind, pickup.value);
        events.push(GameEvent::PickupCollected {
            kind: pickup.kind,
            value: pickup.value,
        });
    }
}

/// First unlocked door the player is standing in
pub fn find_open_door(player: &Player, doors: &[Door]) -> Option<DoorGroup> {
    doors
        .iter()
        .find(|d| !d.locked && overlaps(&player.rect, &d.rect))
        .map(|d| d.group)
}

/// Apply the player's live hitboxes to the room's enemies and boss
pub fn resolve_hitboxes(
    player: &mut Player,
    room: &mut Room,
    tuning: &Tuning,
    arena: &Bounds,
    events: &mut Vec<GameEvent>,
) {
    let facing = player.facing;
    let knockback_bounds = arena.inset(tuning.knockback_margin);

    for hitbox in player.hitboxes_mut() {
        if !hitbox.active {
            continue;
        }
        let stats = hitbox.stats;

        if hitbox.kind == HitboxKind::Shield {
            // Parry: push everything touching, no damage, stays up
            for enemy in room.enemies.iter_mut().filter(|e| e.alive) {
                if overlaps(&hitbox.rect, &enemy.rect) {
                    enemy.rect.knockback(facing, stats.knockback, &knockback_bounds);
                }
            }
            continue;
        }

        let struck = room
            .enemies
            .iter_mut()
            .find(|e| e.alive && overlaps(&hitbox.rect, &e.rect));
        if let Some(enemy) = struck {
            hitbox.active = false;
            let killed = enemy.take_damage(stats.damage);
            enemy.rect.knockback(facing, stats.knockback, &knockback_bounds);
            log::debug!(
                "{:?} hit enemy {} for {} (health {})",
                hitbox.kind,
                enemy.id,
                stats.damage,
                enemy.health
            );
            events.push(GameEvent::EnemyHit {
                id: enemy.id,
                damage: stats.damage,
            });
            if killed {
                events.push(GameEvent::EnemyKilled { id: enemy.id });
            }
            continue;
        }

        if let Some(boss) = room.boss.as_mut().filter(|b| b.alive)
            && overlaps(&hitbox.rect, &boss.rect)
        {
            hitbox.active = false;
            match boss.take_damage(stats.damage) {
                BossHit::Shielded => events.push(GameEvent::BossShielded),
                BossHit::Damaged => events.push(GameEvent::BossHit {
                    damage: stats.damage,
                    health: boss.health,
                }),
                BossHit::Killed => {
                    log::info!("Boss defeated in {}", room.name);
                    events.push(GameEvent::BossDefeated);
                }
                BossHit::Ignored => {}
            }
        }
    }
}

/// Bounce enemies off walls, doors and each other
pub fn resolve_enemy_obstacles<R: Rng + ?Sized>(
    room: &mut Room,
    tuning: &Tuning,
    rng: &mut R,
) {
    // Snapshot of live enemy bodies so one enemy's bounce does not feed into
    // another's check within the same pass
    let bodies: Vec<(u32, Rect)> = room
        .enemies
        .iter()
        .filter(|e| e.alive)
        .map(|e| (e.id, e.rect))
        .collect();

    let Room {
        walls,
        doors,
        enemies,
        ..
    } = room;

    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        let id = enemy.id;
        let others = bodies.iter().filter(|(other, _)| *other != id).map(|(_, r)| r);
        let obstacles = walls.iter().chain(doors.iter().map(|d| &d.rect)).chain(others);

        for obstacle in obstacles {
            if overlaps(&enemy.rect, obstacle) && bounce(enemy, obstacle, tuning.bounce_gap) {
                pick_direction(enemy, rng);
            }
        }
    }
}

/// Snap `gap` units clear of `obstacle` if moving into it along the facing
/// axis. Returns true when the enemy was moved.
fn bounce(enemy: &mut Enemy, obstacle: &Rect, gap: f32) -> bool {
    let r = &mut enemy.rect;
    match enemy.facing {
        Direction::Up if r.bottom() > obstacle.bottom() => r.pos.y = obstacle.bottom() + gap,
        Direction::Down if r.top() < obstacle.top() => r.pos.y = obstacle.top() - r.height() - gap,
        Direction::Left if r.right() > obstacle.right() => r.pos.x = obstacle.right() + gap,
        Direction::Right if r.left() < obstacle.left() => r.pos.x = obstacle.left() - r.width() - gap,
        _ => return false,
    }
    true
}

/// Keep every enemy inside the arena
pub fn clamp_enemies(enemies: &mut [Enemy], arena: &Bounds) {
    for enemy in enemies.iter_mut() {
        arena.clamp(&mut enemy.rect);
    }
}
