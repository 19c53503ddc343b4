//! Room sequence and door transitions
//!
//! The controller owns every room and which one is current. Passing through an
//! unlocked door moves one step along the sequence; a latch stops a single
//! doorway overlap from skipping several rooms before the new room is loaded.

use glam::Vec2;

use super::entity::DoorGroup;
use super::geom::{Bounds, Rect};
use super::room::Room;

#[derive(Debug, Clone)]
pub struct SceneController {
    rooms: Vec<Room>,
    current: usize,
    /// Set by a transition, cleared when the next tick loads the new room
    transitioning: bool,
}

impl SceneController {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            rooms,
            current: 0,
            transitioning: false,
        }
    }

    pub fn current(&self) -> &Room {
        &self.rooms[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Room {
        &mut self.rooms[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.rooms.len()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Index a door group leads to from the current room
    fn target(&self, group: DoorGroup) -> Option<usize> {
        match group {
            DoorGroup::Next if !self.is_last() => Some(self.current + 1),
            DoorGroup::Prev if self.current > 0 => Some(self.current - 1),
            _ => None,
        }
    }

    /// Move through a door. Returns the new room index, or None while latched
    /// or when the door leads nowhere.
    pub fn enter(&mut self, group: DoorGroup) -> Option<usize> {
        if self.transitioning {
            return None;
        }
        let target = self.target(group)?;
        log::debug!(
            "Transition {:?}: {} -> {}",
            group,
            self.rooms[self.current].name,
            self.rooms[target].name
        );
        self.current = target;
        self.transitioning = true;
        self.current_mut().refresh_doors();
        Some(target)
    }

    /// Load the room entered last tick. Returns true if a transition completed.
    pub fn finish_transition(&mut self) -> bool {
        std::mem::replace(&mut self.transitioning, false)
    }

    /// Swap in a rebuilt copy of the current room
    pub fn replace_current(&mut self, room: Room) {
        self.rooms[self.current] = room;
        self.transitioning = false;
    }
}

/// Where a player of `size` should stand after arriving through `group` in
/// `room`: `gap` units inward from the door group, centred on it.
pub fn entry_point(room: &Room, group: DoorGroup, size: Vec2, gap: f32, arena: &Bounds) -> Vec2 {
    let Some(doors) = room.door_group_bounds(group) else {
        return room.spawn;
    };
    inside_of(&doors, size, gap, arena)
}

/// Position just inside `doors`, on the side facing the arena interior
fn inside_of(doors: &Rect, size: Vec2, gap: f32, arena: &Bounds) -> Vec2 {
    let c = doors.center();
    let to_left = doors.left() - arena.min.x;
    let to_right = arena.max.x - doors.right();
    let to_top = doors.top() - arena.min.y;
    let to_bottom = arena.max.y - doors.bottom();
    let nearest = to_left.min(to_right).min(to_top).min(to_bottom);

    if nearest == to_left {
        Vec2::new(doors.right() + gap, c.y - size.y / 2.0)
    } else if nearest == to_right {
        Vec2::new(doors.left() - gap - size.x, c.y - size.y / 2.0)
    } else if nearest == to_top {
        Vec2::new(c.x - size.x / 2.0, doors.bottom() + gap)
    } else {
        Vec2::new(c.x - size.x / 2.0, doors.top() - gap - size.y)
    }
}
