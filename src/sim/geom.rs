//! Axis-aligned rectangle geometry
//!
//! Everything in a room is a `Rect`. Collision is a single strict AABB test
//! (`overlaps`); touching edges do not collide. Movement happens along one
//! axis at a time, so responses are expressed per `Direction`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Cardinal movement/facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in screen coordinates (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Direction of the dominant axis of `delta` (None for a zero vector)
    pub fn dominant(delta: Vec2) -> Option<Self> {
        if delta == Vec2::ZERO {
            return None;
        }
        Some(if delta.x.abs() >= delta.y.abs() {
            if delta.x >= 0.0 { Direction::Right } else { Direction::Left }
        } else if delta.y >= 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// An axis-aligned rectangle: top-left position plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Square of side `side` at (x, y)
    pub fn square(x: f32, y: f32, side: f32) -> Self {
        Self::new(x, y, side, side)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict AABB overlap; shared edges are not a collision
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Move `dist` units along `dir`
    pub fn translate(&mut self, dir: Direction, dist: f32) {
        self.pos += dir.unit() * dist;
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let min = self.pos.min(other.pos);
        let max = (self.pos + self.size).max(other.pos + other.size);
        Rect { pos: min, size: max - min }
    }

    /// Place this rectangle flush against the side of `obstacle` it came from,
    /// given it was travelling along `heading`. Only the heading axis changes.
    pub fn push_out(&mut self, heading: Direction, obstacle: &Rect) {
        match heading {
            Direction::Up => self.pos.y = obstacle.bottom(),
            Direction::Down => self.pos.y = obstacle.top() - self.height(),
            Direction::Left => self.pos.x = obstacle.right(),
            Direction::Right => self.pos.x = obstacle.left() - self.width(),
        }
    }

    /// Forced displacement along `dir`, kept inside `bounds`
    pub fn knockback(&mut self, dir: Direction, force: f32, bounds: &Bounds) {
        self.translate(dir, force);
        bounds.clamp(self);
    }
}

/// Sole collision primitive used by every pass
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Axis-aligned region a rectangle must stay fully inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Whole arena `[0, width] x [0, height]`
    pub fn arena(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self::new(self.min + Vec2::splat(margin), self.max - Vec2::splat(margin))
    }

    /// Clamp each edge independently. A rectangle larger than the region is
    /// pinned to `min`.
    pub fn clamp(&self, rect: &mut Rect) {
        let hi = (self.max - rect.size).max(self.min);
        rect.pos = rect.pos.clamp(self.min, hi);
    }

    pub fn contains(&self, rect: &Rect) -> bool {
        rect.left() >= self.min.x
            && rect.top() >= self.min.y
            && rect.right() <= self.max.x
            && rect.bottom() <= self.max.y
    }
}
