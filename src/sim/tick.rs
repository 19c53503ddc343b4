//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world deterministically. Passes run in a
//! fixed order: input, enemy AI, collisions, boss, room post-pass, then
//! defeat/transition/victory checks.

use super::ai::step_enemies;
use super::boss::update_boss;
use super::collision::{
    clamp_enemies, collect_pickups, find_open_door, resolve_enemy_obstacles, resolve_hitboxes,
    resolve_player_enemies, resolve_player_solids,
};
use super::geom::Direction;
use super::scene::entry_point;
use super::state::{GameEvent, GamePhase, WorldState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Movement direction held this tick
    pub direction: Option<Direction>,
    /// Swing the weapon
    pub attack: bool,
    /// Raise the shield
    pub block: bool,
    /// Special ability
    pub ability: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(state: &mut WorldState, input: &TickInput) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.scenes.finish_transition();

    let (was_cleared, cleared) = {
        let WorldState {
            tuning,
            arena,
            player,
            scenes,
            events,
            rng,
            ..
        } = state;

        player.tick_timers();
        if input.attack && player.can_attack() && player.weapon.trigger() {
            events.push(GameEvent::AttackPerformed);
        }
        if input.block && player.can_block() && player.shield.trigger() {
            events.push(GameEvent::BlockPerformed);
        }
        if input.ability && player.can_use_ability() && player.skill.trigger() {
            events.push(GameEvent::AbilityUsed);
        }

        player.heading = input.direction;
        if let Some(dir) = input.direction {
            player.facing = dir;
            player.rect.translate(dir, tuning.player_speed);
            arena.clamp(&mut player.rect);
        }

        let room = scenes.current_mut();
        let was_cleared = room.is_cleared();
        step_enemies(&mut room.enemies, &player.rect, tuning, rng);

        resolve_player_solids(player, room);
        player.place_hitboxes();
        resolve_player_enemies(player, &room.enemies, tuning, arena, events);
        collect_pickups(player, &mut room.pickups, events);
        resolve_hitboxes(player, room, tuning, arena, events);
        resolve_enemy_obstacles(room, tuning, rng);
        clamp_enemies(&mut room.enemies, arena);

        update_boss(room, tuning, events);
        room.compact(tuning, rng, events);
        room.refresh_doors();
        (was_cleared, room.is_cleared())
    };

    if cleared && !was_cleared {
        let index = state.scenes.current_index();
        log::info!("Room {} cleared", state.current_room().name);
        state.events.push(GameEvent::RoomCleared { index });
    }

    if state.player.is_defeated() {
        state.defeat();
        return;
    }

    if let Some(group) = find_open_door(&state.player, &state.current_room().doors)
        && let Some(index) = state.scenes.enter(group)
    {
        let size = state.player.rect.size;
        let gap = state.tuning.door_entry_gap;
        state.player.rect.pos = entry_point(state.current_room(), group.arrival(), size, gap, &state.arena);
        state.player.place_hitboxes();
        log::info!("Entered room {} ({})", index, state.current_room().name);
        state.events.push(GameEvent::RoomEntered { index });
    }

    if state.scenes.is_last() && state.current_room().is_cleared() {
        log::info!(
            "Victory after {} ticks with {} gold",
            state.time_ticks,
            state.player.gold
        );
        state.phase = GamePhase::Victory;
        state.events.push(GameEvent::Victory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::DoorGroup;
    use crate::sim::layout::{EnemySpawn, GameLayout, RoomTemplate};
    use crate::tuning::{HitboxTuning, Tuning};
    use glam::Vec2;

    fn template(name: &str, enemies: Vec<EnemySpawn>) -> RoomTemplate {
        RoomTemplate {
            name: name.to_string(),
            pillars: Vec::new(),
            enemies,
            boss: None,
            spawn: [235.0, 235.0],
            prev_doors: false,
            next_doors: false,
        }
    }

    fn spawn(x: f32, y: f32) -> EnemySpawn {
        EnemySpawn {
            x,
            y,
            facing: Direction::Left,
        }
    }

    /// Enemies that stand still, a weapon that does not push them away
    fn still_tuning() -> Tuning {
        Tuning {
            enemy_speed: 0.0,
            wander_chance: 0.0,
            food_drop_chance: 0.0,
            weapon: HitboxTuning {
                knockback: 0.0,
                ..Tuning::default().weapon
            },
            ..Tuning::default()
        }
    }

    fn run(state: &mut WorldState, input: TickInput, ticks: usize) {
        for _ in 0..ticks {
            tick(state, &input);
        }
    }

    const RIGHT: TickInput = TickInput {
        direction: Some(Direction::Right),
        attack: false,
        block: false,
        ability: false,
        pause: false,
    };

    #[test]
    fn test_movement_sets_facing_and_clamps() {
        let mut state = WorldState::new(1);
        tick(
            &mut state,
            &TickInput {
                direction: Some(Direction::Up),
                ..Default::default()
            },
        );
        assert_eq!(state.player.rect.pos, Vec2::new(235.0, 225.0));
        assert_eq!(state.player.facing, Direction::Up);

        // Standing still keeps facing and clears heading
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.facing, Direction::Up);
        assert_eq!(state.player.heading, None);
    }

    #[test]
    fn test_border_wall_stops_player() {
        let mut state = WorldState::new(1);
        run(
            &mut state,
            TickInput {
                direction: Some(Direction::Up),
                ..Default::default()
            },
            30,
        );
        assert_eq!(state.player.rect.top(), 50.0);
    }

    #[test]
    fn test_weapon_kills_enemy_and_drops_gold() {
        let layout = GameLayout {
            rooms: vec![template("yard", vec![spawn(270.0, 230.0)])],
        };
        let mut state = WorldState::with_config(3, still_tuning(), layout).unwrap();
        let swing = TickInput {
            attack: true,
            ..Default::default()
        };

        tick(&mut state, &swing);
        assert!(state.events.contains(&GameEvent::AttackPerformed));
        assert!(state.events.contains(&GameEvent::EnemyHit { id: 1, damage: 5 }));
        assert_eq!(state.current_room().enemies[0].health, 5);

        // Holding attack swings again once the cooldown is over
        let mut killed = false;
        for _ in 0..state.tuning.weapon.cooldown_ticks {
            tick(&mut state, &swing);
            killed |= state.events.contains(&GameEvent::EnemyKilled { id: 1 });
            if killed {
                break;
            }
        }
        assert!(killed);
        // A room without doors still reports being cleared
        assert!(state.events.contains(&GameEvent::RoomCleared { index: 0 }));
        assert!(state.events.contains(&GameEvent::Victory));

        let room = state.current_room();
        assert!(room.enemies.is_empty());
        assert!(room.doors.is_empty());
        assert_eq!(room.pickups.len(), 1);
        assert_eq!(room.pickups[0].value, 20);
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_doors_unlock_on_the_killing_tick() {
        let mut first = template("hall", vec![spawn(270.0, 230.0), spawn(100.0, 380.0), spawn(380.0, 100.0)]);
        first.next_doors = true;
        let mut last = template("end", Vec::new());
        last.prev_doors = true;
        let layout = GameLayout {
            rooms: vec![first, last],
        };
        let mut state = WorldState::with_config(3, still_tuning(), layout).unwrap();
        assert!(state.current_room().doors.iter().all(|d| d.locked));

        // Two already down, the third is one hit from death
        let room = state.current_room_mut();
        room.enemies[1].alive = false;
        room.enemies[2].alive = false;
        room.enemies[0].health = 5;

        tick(
            &mut state,
            &TickInput {
                attack: true,
                ..Default::default()
            },
        );
        let room = state.current_room();
        assert!(room.is_cleared());
        assert!(room.doors.iter().all(|d| !d.locked));
        assert!(state.events.contains(&GameEvent::RoomCleared { index: 0 }));
    }

    #[test]
    fn test_walk_through_next_door() {
        let mut state = WorldState::new(1);
        let mut entered = None;
        for _ in 0..30 {
            tick(&mut state, &RIGHT);
            if let Some(GameEvent::RoomEntered { index }) = state
                .events
                .iter()
                .find(|e| matches!(e, GameEvent::RoomEntered { .. }))
            {
                entered = Some(*index);
                break;
            }
        }
        assert_eq!(entered, Some(1));
        assert_eq!(state.player.rect.pos, Vec2::new(55.0, 235.0));
        assert!(state.scenes.is_transitioning());

        // Latch clears on the next tick, and one doorway does not skip rooms
        tick(&mut state, &RIGHT);
        assert!(!state.scenes.is_transitioning());
        assert_eq!(state.scenes.current_index(), 1);
    }

    #[test]
    fn test_locked_door_holds_player_in_room() {
        let mut state = WorldState::new(1);
        state.scenes.enter(DoorGroup::Next);
        state.player.rect.pos = Vec2::new(55.0, 235.0);
        run(
            &mut state,
            TickInput {
                direction: Some(Direction::Left),
                ..Default::default()
            },
            2,
        );
        assert_eq!(state.player.rect.left(), 50.0);
        assert_eq!(state.scenes.current_index(), 1);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut state = WorldState::new(1);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        run(&mut state, RIGHT, 5);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.rect.pos, Vec2::new(235.0, 235.0));

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_contact_damage_can_defeat_player() {
        let layout = GameLayout {
            rooms: vec![template("pit", vec![spawn(230.0, 230.0)])],
        };
        let mut state = WorldState::with_config(3, still_tuning(), layout).unwrap();
        state.player.health = 5;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Defeated);
        assert!(state.current_room().enemies.is_empty());
        assert!(state.events.contains(&GameEvent::PlayerDefeated));

        // Terminal: nothing moves any more
        let before = state.time_ticks;
        run(&mut state, RIGHT, 3);
        assert_eq!(state.time_ticks, before);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_block_refused_mid_swing() {
        let mut state = WorldState::new(1);
        tick(
            &mut state,
            &TickInput {
                attack: true,
                ..Default::default()
            },
        );
        tick(
            &mut state,
            &TickInput {
                block: true,
                ability: true,
                ..Default::default()
            },
        );
        assert!(!state.events.contains(&GameEvent::BlockPerformed));
        assert!(state.events.contains(&GameEvent::AbilityUsed));
        assert!(!state.player.blocking());
    }

    #[test]
    fn test_boss_shielded_until_minions_fall() {
        let mut throne = template("throne", Vec::new());
        throne.boss = Some(crate::sim::layout::BossSpawn { x: 210.0, y: 210.0 });
        throne.spawn = [55.0, 235.0];
        let layout = GameLayout {
            rooms: vec![throne],
        };
        let mut state = WorldState::with_config(3, still_tuning(), layout).unwrap();

        tick(&mut state, &TickInput::default());
        assert!(state.events.contains(&GameEvent::BossFightStarted));
        assert!(state.events.contains(&GameEvent::MinionsSummoned { count: 2 }));
        assert_eq!(state.current_room().enemies.len(), 2);

        tick(&mut state, &TickInput::default());
        let room = state.current_room_mut();
        let boss = room.boss.as_mut().unwrap();
        assert_eq!(boss.take_damage(50), crate::sim::boss::BossHit::Shielded);
        assert_eq!(boss.health, 100);

        for e in room.enemies.iter_mut() {
            e.alive = false;
        }
        tick(&mut state, &TickInput::default());
        assert!(state.events.contains(&GameEvent::BossVulnerable));
        let boss = state.current_room_mut().boss.as_mut().unwrap();
        boss.take_damage(50);
        assert_eq!(boss.health, 50);
        assert_ne!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_same_seed_same_run() {
        let script = |t: usize| TickInput {
            direction: Some(Direction::ALL[(t / 15) % 4]),
            attack: t % 20 == 0,
            block: t % 45 == 0,
            ability: t % 200 == 0,
            pause: false,
        };
        let mut a = WorldState::new(77);
        let mut b = WorldState::new(77);
        a.scenes.enter(DoorGroup::Next);
        b.scenes.enter(DoorGroup::Next);

        for t in 0..600 {
            tick(&mut a, &script(t));
            tick(&mut b, &script(t));
            assert_eq!(a.events, b.events);
        }
        assert_eq!(a.player.rect, b.player.rect);
        assert_eq!(a.player.health, b.player.health);
        let pa: Vec<_> = a.current_room().enemies.iter().map(|e| e.rect).collect();
        let pb: Vec<_> = b.current_room().enemies.iter().map(|e| e.rect).collect();
        assert_eq!(pa, pb);
    }
}
