//! A room: static obstacles plus the mutable roster of enemies, loot and boss.
//!
//! Entities are never removed while a pass is looking at them. Passes only
//! flip `alive`/`active` flags; `compact` drops the flagged entries (and
//! spawns loot for the dead) once all passes of the tick are done.

use glam::Vec2;
use rand::Rng;

use super::boss::Boss;
use super::entity::{Door, DoorGroup, Enemy, PICKUP_SIZE, Pickup, PickupKind};
use super::geom::Rect;
use super::state::GameEvent;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    /// Position in the room sequence
    pub index: usize,
    /// Where the player stands on a fresh start or replay of this room
    pub spawn: Vec2,
    pub walls: Vec<Rect>,
    pub floors: Vec<Rect>,
    pub doors: Vec<Door>,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub pickups: Vec<Pickup>,
    next_id: u32,
}

impl Room {
    pub fn new(name: impl Into<String>, index: usize, spawn: Vec2) -> Self {
        Self {
            name: name.into(),
            index,
            spawn,
            walls: Vec::new(),
            floors: Vec::new(),
            doors: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            pickups: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate an entity ID unique within this room
    pub fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn live_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn boss_alive(&self) -> bool {
        self.boss.as_ref().is_some_and(|b| b.alive)
    }

    /// No live enemies and no live boss
    pub fn is_cleared(&self) -> bool {
        self.live_enemy_count() == 0 && !self.boss_alive()
    }

    /// Re-derive every door's lock from the cleared predicate.
    /// Returns true when the doors just went from locked to unlocked.
    pub fn refresh_doors(&mut self) -> bool {
        let locked = !self.is_cleared();
        let was_locked = self.doors.iter().any(|d| d.locked);
        for door in &mut self.doors {
            door.locked = locked;
        }
        was_locked && !locked
    }

    pub fn doors_in(&self, group: DoorGroup) -> impl Iterator<Item = &Door> {
        self.doors.iter().filter(move |d| d.group == group)
    }

    /// Bounding box of a door group (None if the room has no such doors)
    pub fn door_group_bounds(&self, group: DoorGroup) -> Option<Rect> {
        self.doors_in(group)
            .map(|d| d.rect)
            .reduce(|acc, r| acc.union(&r))
    }

    /// Post-pass: drop dead enemies (dropping their loot), consumed pickups,
    /// and drop the boss's gold once it has died.
    pub fn compact<R: Rng + ?Sized>(
        &mut self,
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let mut drops: Vec<(Vec2, PickupKind, i32)> = Vec::new();

        self.enemies.retain(|enemy| {
            if enemy.alive {
                return true;
            }
            let center = enemy.rect.center();
            drops.push((center, PickupKind::Gold, tuning.gold_value));
            if !enemy.minion && rng.random_bool(tuning.food_drop_chance) {
                drops.push((
                    center + Vec2::new(PICKUP_SIZE, 0.0),
                    PickupKind::Food,
                    tuning.food_value,
                ));
            }
            false
        });

        if let Some(boss) = self.boss.as_mut()
            && !boss.alive
            && !boss.looted
        {
            boss.looted = true;
            drops.push((boss.rect.center(), PickupKind::Gold, tuning.boss_gold_value));
        }

        self.pickups.retain(|p| p.active);

        for (center, kind, value) in drops {
            let id = self.next_id();
            log::debug!("{} dropped {:?} ({})", self.name, kind, value);
            self.pickups.push(Pickup::new(id, center, kind, value));
            events.push(GameEvent::LootDropped { kind, value });
        }
    }
}
