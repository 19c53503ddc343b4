//! Entities: Player (with weapon/shield/skill hitboxes), Enemy, Pickup, Door.
//!
//! Every entity carries a `rect` for geometry plus its own data. Behaviour
//! differences are data (damage, knockback, sizes), so collision code matches
//! on entity kind instead of dispatching through traits.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::{Direction, Rect};
use crate::tuning::{HitboxTuning, Tuning};

/// Side length of dropped loot
pub const PICKUP_SIZE: f32 = 20.0;

/// Which player action a hitbox belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitboxKind {
    Weapon,
    Shield,
    Skill,
}

/// A hitbox that sits next to the player on its facing side while its
/// action window is open.
#[derive(Debug, Clone)]
pub struct Hitbox {
    pub kind: HitboxKind,
    pub rect: Rect,
    /// Eligible to register a hit. Cleared by a hit or when the window ends.
    pub active: bool,
    pub stats: HitboxTuning,
    /// Ticks left in the current action window
    window_ticks: u32,
    /// Ticks until the action may be triggered again
    cooldown_ticks: u32,
}

impl Hitbox {
    pub fn new(kind: HitboxKind, stats: HitboxTuning) -> Self {
        Self {
            kind,
            rect: Rect::new(0.0, 0.0, stats.span, stats.reach),
            active: false,
            stats,
            window_ticks: 0,
            cooldown_ticks: 0,
        }
    }

    /// Action may start (cooldown fully elapsed)
    pub fn ready(&self) -> bool {
        self.cooldown_ticks == 0
    }

    /// Action window open (attacking / blocking / using ability)
    pub fn in_window(&self) -> bool {
        self.window_ticks > 0
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_ticks
    }

    /// Start the action. Returns false while still cooling down.
    pub fn trigger(&mut self) -> bool {
        if !self.ready() {
            return false;
        }
        self.window_ticks = self.stats.active_ticks;
        self.cooldown_ticks = self.stats.cooldown_ticks.max(self.stats.active_ticks);
        self.active = self.window_ticks > 0;
        true
    }

    /// Count down one tick; the hitbox goes dead when its window closes
    pub fn tick_timers(&mut self) {
        self.window_ticks = self.window_ticks.saturating_sub(1);
        self.cooldown_ticks = self.cooldown_ticks.saturating_sub(1);
        if self.window_ticks == 0 {
            self.active = false;
        }
    }

    /// Drop all timers (used on reset)
    pub fn clear(&mut self) {
        self.window_ticks = 0;
        self.cooldown_ticks = 0;
        self.active = false;
    }

    /// Recompute the rectangle: adjacent to `owner` on the `facing` side,
    /// `reach` deep along the facing axis and `span` wide across it, centred.
    pub fn place(&mut self, owner: &Rect, facing: Direction) {
        let HitboxTuning { reach, span, .. } = self.stats;
        self.rect = match facing {
            Direction::Up => Rect::new(
                owner.center().x - span / 2.0,
                owner.top() - reach,
                span,
                reach,
            ),
            Direction::Down => Rect::new(owner.center().x - span / 2.0, owner.bottom(), span, reach),
            Direction::Left => Rect::new(
                owner.left() - reach,
                owner.center().y - span / 2.0,
                reach,
                span,
            ),
            Direction::Right => Rect::new(owner.right(), owner.center().y - span / 2.0, reach, span),
        };
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub health: i32,
    pub max_health: i32,
    pub gold: i32,
    /// Last direction moved; hitboxes and knockback of struck enemies use it
    pub facing: Direction,
    /// Direction moved this tick (None when standing still); push-out uses it
    pub heading: Option<Direction>,
    /// Ticks of remaining contact-damage immunity
    pub invulnerable_ticks: u32,
    pub weapon: Hitbox,
    pub shield: Hitbox,
    pub skill: Hitbox,
}

impl Player {
    pub fn new(spawn: Vec2, tuning: &Tuning) -> Self {
        let mut player = Self {
            rect: Rect::square(spawn.x, spawn.y, tuning.player_size),
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            gold: 0,
            facing: Direction::Right,
            heading: None,
            invulnerable_ticks: 0,
            weapon: Hitbox::new(HitboxKind::Weapon, tuning.weapon),
            shield: Hitbox::new(HitboxKind::Shield, tuning.shield),
            skill: Hitbox::new(HitboxKind::Skill, tuning.skill),
        };
        player.place_hitboxes();
        player
    }

    /// Full health at `spawn`, all actions reset. Gold is kept.
    pub fn reset(&mut self, spawn: Vec2) {
        self.rect.pos = spawn;
        self.health = self.max_health;
        self.heading = None;
        self.invulnerable_ticks = 0;
        for hitbox in self.hitboxes_mut() {
            hitbox.clear();
        }
        self.place_hitboxes();
    }

    pub fn attacking(&self) -> bool {
        self.weapon.in_window()
    }

    pub fn blocking(&self) -> bool {
        self.shield.in_window()
    }

    pub fn using_ability(&self) -> bool {
        self.skill.in_window()
    }

    pub fn can_attack(&self) -> bool {
        self.weapon.ready()
    }

    /// Blocking is not allowed mid-swing
    pub fn can_block(&self) -> bool {
        self.shield.ready() && !self.attacking()
    }

    pub fn can_use_ability(&self) -> bool {
        self.skill.ready()
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    /// Restore health, capped at max
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn hitboxes_mut(&mut self) -> [&mut Hitbox; 3] {
        [&mut self.weapon, &mut self.shield, &mut self.skill]
    }

    pub fn place_hitboxes(&mut self) {
        let (rect, facing) = (self.rect, self.facing);
        for hitbox in self.hitboxes_mut() {
            hitbox.place(&rect, facing);
        }
    }

    pub fn tick_timers(&mut self) {
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
        for hitbox in self.hitboxes_mut() {
            hitbox.tick_timers();
        }
    }
}

/// Enemy movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// Walk straight legs from an anchor point
    Patrol,
    /// Move directly toward the player
    Chase,
    /// Hold position next to the player
    Attack,
}

/// A room enemy (also used for boss minions)
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    pub alive: bool,
    pub health: i32,
    pub facing: Direction,
    pub ai: AiState,
    /// Position where the current patrol leg began
    pub anchor: Vec2,
    /// Summoned by a boss: shields it and never drops food
    pub minion: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, facing: Direction, tuning: &Tuning) -> Self {
        Self {
            id,
            rect: Rect::square(pos.x, pos.y, tuning.enemy_size),
            alive: true,
            health: tuning.enemy_health,
            facing,
            ai: AiState::Patrol,
            anchor: pos,
            minion: false,
        }
    }

    pub fn minion(id: u32, pos: Vec2, facing: Direction, tuning: &Tuning) -> Self {
        Self {
            minion: true,
            ..Self::new(id, pos, facing, tuning)
        }
    }

    /// Start a new leg in `dir` from the current position
    pub fn set_direction(&mut self, dir: Direction) {
        self.facing = dir;
        self.anchor = self.rect.pos;
    }

    /// Apply damage. Returns true if this hit killed the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Distance travelled from the anchor along the current facing axis
    pub fn leg_distance(&self) -> f32 {
        if self.facing.is_vertical() {
            (self.rect.pos.y - self.anchor.y).abs()
        } else {
            (self.rect.pos.x - self.anchor.x).abs()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickupKind {
    Gold,
    Food,
}

/// Dropped loot, consumed on player contact
#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: u32,
    pub rect: Rect,
    pub kind: PickupKind,
    pub value: i32,
    /// Cleared on consumption; removed from the room in the post-pass
    pub active: bool,
}

impl Pickup {
    /// Loot centred on `center`
    pub fn new(id: u32, center: Vec2, kind: PickupKind, value: i32) -> Self {
        let half = PICKUP_SIZE / 2.0;
        Self {
            id,
            rect: Rect::square(center.x - half, center.y - half, PICKUP_SIZE),
            kind,
            value,
            active: true,
        }
    }
}

/// Which neighbouring room a door leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorGroup {
    Prev,
    Next,
}

impl DoorGroup {
    /// The group a player arrives at after leaving through `self`
    pub fn arrival(self) -> Self {
        match self {
            DoorGroup::Prev => DoorGroup::Next,
            DoorGroup::Next => DoorGroup::Prev,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Door {
    pub rect: Rect,
    pub group: DoorGroup,
    /// Mirrors "room not cleared"; refreshed every tick
    pub locked: bool,
}

impl Door {
    pub fn new(rect: Rect, group: DoorGroup) -> Self {
        Self {
            rect,
            group,
            locked: false,
        }
    }
}
