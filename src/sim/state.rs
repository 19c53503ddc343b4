//! World state and core simulation types
//!
//! `WorldState` is the single owner of everything that changes during a run;
//! `tick` threads it through the collision, AI and room passes explicitly.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Player, PickupKind};
use super::geom::Bounds;
use super::layout::GameLayout;
use super::room::Room;
use super::scene::SceneController;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::error::SetupError;
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advancing
    Playing,
    /// Frozen until unpaused
    Paused,
    /// Player health reached zero
    Defeated,
    /// Last room cleared
    Victory,
}

/// Things that happened this tick, for the audio and UI layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerDamaged { amount: i32, health: i32 },
    AttackPerformed,
    BlockPerformed,
    AbilityUsed,
    EnemyHit { id: u32, damage: i32 },
    EnemyKilled { id: u32 },
    LootDropped { kind: PickupKind, value: i32 },
    PickupCollected { kind: PickupKind, value: i32 },
    BossFightStarted,
    MinionsSummoned { count: u32 },
    BossShielded,
    BossVulnerable,
    BossHit { damage: i32, health: i32 },
    BossDefeated,
    RoomEntered { index: usize },
    RoomCleared { index: usize },
    PlayerDefeated,
    Victory,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct WorldState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Templates the rooms are (re)built from
    pub layout: GameLayout,
    /// Playfield the player and enemies are clamped to
    pub arena: Bounds,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub scenes: SceneController,
    /// Events raised by the last tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl WorldState {
    /// New run on the default layout and tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default(), GameLayout::default())
    }

    /// New run on a custom layout and tuning. Both are validated first.
    pub fn with_config(seed: u64, tuning: Tuning, layout: GameLayout) -> Result<Self, SetupError> {
        tuning.validate()?;
        layout.validate()?;
        Ok(Self::build(seed, tuning, layout))
    }

    /// Caller guarantees `layout` has at least one room and `tuning` is valid
    fn build(seed: u64, tuning: Tuning, layout: GameLayout) -> Self {
        let scenes = SceneController::new(layout.build_rooms(&tuning));
        let player = Player::new(scenes.current().spawn, &tuning);
        Self {
            seed,
            tuning,
            layout,
            arena: Bounds::arena(ARENA_WIDTH, ARENA_HEIGHT),
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            scenes,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn current_room(&self) -> &Room {
        self.scenes.current()
    }

    pub fn current_room_mut(&mut self) -> &mut Room {
        self.scenes.current_mut()
    }

    /// Gameplay is live (not paused, not over)
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Rebuild every room and start over from the first one
    pub fn restart(&mut self) {
        log::info!("Restarting run (seed {})", self.seed);
        self.scenes = SceneController::new(self.layout.build_rooms(&self.tuning));
        self.player = Player::new(self.scenes.current().spawn, &self.tuning);
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.events.clear();
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    /// Rebuild only the current room and put the player back at its spawn
    /// with full health. Other rooms keep their state.
    pub fn replay_room(&mut self) {
        let index = self.scenes.current_index();
        let Some(template) = self.layout.rooms.get(index) else {
            return;
        };
        log::info!("Replaying room {}", template.name);
        let room = template.build(index, &self.tuning);
        let spawn = room.spawn;
        self.scenes.replace_current(room);
        self.player.reset(spawn);
        self.phase = GamePhase::Playing;
        self.events.clear();
    }

    /// Player death: the room's enemies are cleared and the run ends
    pub(crate) fn defeat(&mut self) {
        log::info!(
            "Player defeated in {} after {} ticks",
            self.current_room().name,
            self.time_ticks
        );
        let room = self.current_room_mut();
        room.enemies.clear();
        room.refresh_doors();
        self.phase = GamePhase::Defeated;
        self.events.push(GameEvent::PlayerDefeated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_starts_in_first_room() {
        let state = WorldState::new(1);
        assert_eq!(state.scenes.current_index(), 0);
        assert_eq!(state.player.rect.pos, state.current_room().spawn);
        assert_eq!(state.player.health, 100);
        assert!(state.is_running());
    }

    #[test]
    fn test_defeat_clears_room_enemies() {
        let mut state = WorldState::new(1);
        state.scenes.enter(crate::sim::entity::DoorGroup::Next);
        assert!(!state.current_room().enemies.is_empty());
        state.defeat();
        assert!(state.current_room().enemies.is_empty());
        assert!(state.current_room().doors.iter().all(|d| !d.locked));
        assert_eq!(state.phase, GamePhase::Defeated);
        assert_eq!(state.events, vec![GameEvent::PlayerDefeated]);
    }

    #[test]
    fn test_with_config_rejects_empty_layout() {
        let layout = GameLayout { rooms: Vec::new() };
        assert!(matches!(
            WorldState::with_config(1, Tuning::default(), layout),
            Err(SetupError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_with_config_rejects_bad_tuning() {
        let tuning = Tuning {
            wander_chance: 2.0,
            ..Tuning::default()
        };
        assert!(matches!(
            WorldState::with_config(1, tuning, GameLayout::default()),
            Err(SetupError::InvalidTuning(_))
        ));
    }

    #[test]
    fn test_replay_room_restores_enemies_and_health() {
        let mut state = WorldState::new(1);
        state.scenes.enter(crate::sim::entity::DoorGroup::Next);
        state.player.health = 3;
        state.player.gold = 40;
        state.defeat();

        state.replay_room();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.scenes.current_index(), 1);
        assert_eq!(state.current_room().enemies.len(), 3);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.gold, 40);
        assert_eq!(state.player.rect.pos, state.current_room().spawn);
    }

    #[test]
    fn test_restart_rebuilds_everything() {
        let mut state = WorldState::new(9);
        state.scenes.enter(crate::sim::entity::DoorGroup::Next);
        state.current_room_mut().enemies.clear();
        state.player.gold = 80;

        state.restart();
        assert_eq!(state.scenes.current_index(), 0);
        assert_eq!(state.scenes.rooms()[1].enemies.len(), 3);
        assert_eq!(state.player.gold, 0);
    }
}
