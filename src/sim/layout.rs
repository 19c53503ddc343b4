//! Room layouts as data
//!
//! A `GameLayout` is an ordered list of `RoomTemplate`s. Templates only name
//! what is special about a room (pillar tiles, enemy spawns, boss, which door
//! groups exist); the border ring, floor and doors are generated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::entity::{Door, DoorGroup, Enemy};
use super::geom::{Bounds, Direction, Rect};
use super::room::Room;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, TILE, TILES_PER_EDGE};
use crate::error::SetupError;
use crate::tuning::Tuning;

/// Tile rows (left/right edges) replaced by doors
const DOOR_ROWS: [u32; 2] = [4, 5];

fn default_spawn() -> [f32; 2] {
    [235.0, 235.0]
}

fn default_facing() -> Direction {
    Direction::Down
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_facing")]
    pub facing: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossSpawn {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTemplate {
    pub name: String,
    /// Interior wall tiles as `[column, row]`
    #[serde(default)]
    pub pillars: Vec<[u32; 2]>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub boss: Option<BossSpawn>,
    /// Player position on a fresh start/replay of this room
    #[serde(default = "default_spawn")]
    pub spawn: [f32; 2],
    /// Doors on the left edge leading back
    #[serde(default)]
    pub prev_doors: bool,
    /// Doors on the right edge leading on
    #[serde(default)]
    pub next_doors: bool,
}

impl RoomTemplate {
    /// Build a fresh room (new enemy roster, doors unlocked until refreshed)
    pub fn build(&self, index: usize, tuning: &Tuning) -> Room {
        let mut room = Room::new(self.name.clone(), index, Vec2::from(self.spawn));
        let last = TILES_PER_EDGE - 1;

        // Border ring: top and bottom rows, then the side columns with gaps for doors
        for col in 0..TILES_PER_EDGE {
            room.walls.push(tile(col, 0));
            room.walls.push(tile(col, last));
        }
        for row in 1..last {
            let door_row = DOOR_ROWS.contains(&row);
            if door_row && self.prev_doors {
                room.doors.push(Door::new(tile(0, row), DoorGroup::Prev));
            } else {
                room.walls.push(tile(0, row));
            }
            if door_row && self.next_doors {
                room.doors.push(Door::new(tile(last, row), DoorGroup::Next));
            } else {
                room.walls.push(tile(last, row));
            }
        }

        for &[col, row] in &self.pillars {
            room.walls.push(tile(col, row));
        }

        for col in 1..last {
            for row in 1..last {
                room.floors.push(tile(col, row));
            }
        }

        for spawn in &self.enemies {
            let id = room.next_id();
            room.enemies
                .push(Enemy::new(id, Vec2::new(spawn.x, spawn.y), spawn.facing, tuning));
        }

        room.boss = self
            .boss
            .as_ref()
            .map(|b| Boss::new(Vec2::new(b.x, b.y), tuning));

        room.refresh_doors();
        room
    }
}

/// One wall/door/floor cell
fn tile(col: u32, row: u32) -> Rect {
    Rect::square(col as f32 * TILE, row as f32 * TILE, TILE)
}

/// The whole room sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLayout {
    pub rooms: Vec<RoomTemplate>,
}

impl Default for GameLayout {
    /// Start room, pillar room, corridor room, then the boss
    fn default() -> Self {
        let enemy = |x, y, facing| EnemySpawn { x, y, facing };
        Self {
            rooms: vec![
                RoomTemplate {
                    name: "entrance".to_string(),
                    pillars: Vec::new(),
                    enemies: Vec::new(),
                    boss: None,
                    spawn: default_spawn(),
                    prev_doors: false,
                    next_doors: true,
                },
                RoomTemplate {
                    name: "pillars".to_string(),
                    pillars: vec![[2, 2], [7, 2], [2, 7], [7, 7]],
                    enemies: vec![
                        enemy(300.0, 300.0, Direction::Up),
                        enemy(180.0, 380.0, Direction::Right),
                        enemy(250.0, 60.0, Direction::Left),
                    ],
                    boss: None,
                    spawn: default_spawn(),
                    prev_doors: true,
                    next_doors: true,
                },
                RoomTemplate {
                    name: "corridor".to_string(),
                    pillars: vec![
                        [3, 3],
                        [4, 3],
                        [5, 3],
                        [6, 3],
                        [3, 6],
                        [4, 6],
                        [5, 6],
                        [6, 6],
                    ],
                    enemies: vec![enemy(300.0, 250.0, Direction::Down)],
                    boss: None,
                    spawn: default_spawn(),
                    prev_doors: true,
                    next_doors: true,
                },
                RoomTemplate {
                    name: "throne".to_string(),
                    pillars: Vec::new(),
                    enemies: Vec::new(),
                    boss: Some(BossSpawn { x: 210.0, y: 210.0 }),
                    spawn: [55.0, 235.0],
                    prev_doors: true,
                    next_doors: false,
                },
            ],
        }
    }
}

impl GameLayout {
    /// Parse and validate a layout from JSON
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let layout: GameLayout = serde_json::from_str(json)?;
        layout.validate()?;
        log::info!("Loaded layout with {} rooms", layout.rooms.len());
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        let invalid = |msg: String| Err(SetupError::InvalidLayout(msg));
        let arena = Bounds::arena(ARENA_WIDTH, ARENA_HEIGHT);
        let count = self.rooms.len();

        if count == 0 {
            return invalid("layout has no rooms".to_string());
        }

        for (i, room) in self.rooms.iter().enumerate() {
            let name = &room.name;
            if i == 0 && room.prev_doors {
                return invalid(format!("first room '{name}' has doors leading back"));
            }
            if i + 1 == count && room.next_doors {
                return invalid(format!("last room '{name}' has doors leading on"));
            }
            if let Some(&[col, row]) = room
                .pillars
                .iter()
                .find(|[c, r]| *c >= TILES_PER_EDGE || *r >= TILES_PER_EDGE)
            {
                return invalid(format!("room '{name}' pillar [{col}, {row}] outside the grid"));
            }
            let spawn = Rect::new(room.spawn[0], room.spawn[1], 1.0, 1.0);
            if !arena.contains(&spawn) {
                return invalid(format!("room '{name}' player spawn outside the arena"));
            }
            for enemy in &room.enemies {
                if !arena.contains(&Rect::new(enemy.x, enemy.y, 1.0, 1.0)) {
                    return invalid(format!(
                        "room '{name}' enemy at ({}, {}) outside the arena",
                        enemy.x, enemy.y
                    ));
                }
            }
            if let Some(boss) = &room.boss
                && !arena.contains(&Rect::new(boss.x, boss.y, 1.0, 1.0))
            {
                return invalid(format!("room '{name}' boss outside the arena"));
            }
        }
        Ok(())
    }

    /// Build every room in order
    pub fn build_rooms(&self, tuning: &Tuning) -> Vec<Room> {
        self.rooms
            .iter()
            .enumerate()
            .map(|(i, t)| t.build(i, tuning))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        assert!(GameLayout::default().validate().is_ok());
    }

    #[test]
    fn test_start_room_has_no_prev_doors() {
        let tuning = Tuning::default();
        let room = GameLayout::default().rooms[0].build(0, &tuning);
        assert_eq!(room.doors_in(DoorGroup::Prev).count(), 0);
        assert_eq!(room.doors_in(DoorGroup::Next).count(), 2);
        // 10 top + 10 bottom + 8 left + 6 right
        assert_eq!(room.walls.len(), 34);
        assert_eq!(room.floors.len(), 64);
    }

    #[test]
    fn test_pillars_and_enemies_built() {
        let tuning = Tuning::default();
        let room = GameLayout::default().rooms[1].build(1, &tuning);
        assert!(room.walls.contains(&Rect::square(100.0, 100.0, 50.0)));
        assert_eq!(room.enemies.len(), 3);
        assert!(room.doors.iter().all(|d| d.locked));
        let ids: Vec<u32> = room.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_boss_room_locked_by_boss() {
        let tuning = Tuning::default();
        let room = GameLayout::default().rooms[3].build(3, &tuning);
        assert!(room.boss.is_some());
        assert!(room.enemies.is_empty());
        assert!(room.doors.iter().all(|d| d.locked));
    }

    #[test]
    fn test_json_round_trip_defaults() {
        let json = r#"{
            "rooms": [
                { "name": "a", "next_doors": true },
                { "name": "b", "prev_doors": true,
                  "pillars": [[3, 3]],
                  "enemies": [{ "x": 200, "y": 100, "facing": "left" }] }
            ]
        }"#;
        let layout = GameLayout::from_json(json).unwrap();
        assert_eq!(layout.rooms[0].spawn, [235.0, 235.0]);
        assert_eq!(layout.rooms[1].enemies[0].facing, Direction::Left);
        let rooms = layout.build_rooms(&Tuning::default());
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[1].index, 1);
    }

    #[test]
    fn test_rejects_dangling_doors() {
        let json = r#"{ "rooms": [ { "name": "only", "next_doors": true } ] }"#;
        assert!(matches!(
            GameLayout::from_json(json),
            Err(SetupError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_rejects_pillar_off_grid() {
        let json = r#"{ "rooms": [ { "name": "only", "pillars": [[12, 3]] } ] }"#;
        assert!(matches!(
            GameLayout::from_json(json),
            Err(SetupError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_rejects_empty_layout() {
        assert!(matches!(
            GameLayout::from_json(r#"{ "rooms": [] }"#),
            Err(SetupError::InvalidLayout(_))
        ));
    }
}
