//! Room Crawler headless driver
//!
//! Runs the simulation with a simple autopilot for a fixed number of ticks and
//! logs what happens. Usage:
//!
//! ```text
//! room-crawler [--seed N] [--ticks N] [--tuning tuning.json] [--layout layout.json]
//! ```

use room_crawler::{
    SetupError, Tuning,
    sim::{Direction, DoorGroup, GameLayout, GamePhase, TickInput, WorldState, tick},
    view::Hud,
};

/// Command line options
#[derive(Debug)]
struct Options {
    seed: u64,
    ticks: u64,
    tuning: Option<String>,
    layout: Option<String>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Self {
        let mut opts = Self {
            seed: 12345,
            ticks: 60 * 60 * 3,
            tuning: None,
            layout: None,
        };
        while let Some(arg) = args.next() {
            let value = args.next();
            match (arg.as_str(), value) {
                ("--seed", Some(v)) => match v.parse() {
                    Ok(seed) => opts.seed = seed,
                    Err(_) => log::warn!("Ignoring bad seed '{v}'"),
                },
                ("--ticks", Some(v)) => match v.parse() {
                    Ok(ticks) => opts.ticks = ticks,
                    Err(_) => log::warn!("Ignoring bad tick count '{v}'"),
                },
                ("--tuning", Some(v)) => opts.tuning = Some(v),
                ("--layout", Some(v)) => opts.layout = Some(v),
                (other, _) => log::warn!("Ignoring argument '{other}'"),
            }
        }
        opts
    }
}

/// Demo player: fight whatever is alive, then walk to the next doors
fn autopilot(state: &WorldState) -> TickInput {
    let room = state.current_room();
    let player = &state.player;
    let me = player.rect.center();

    let nearest_enemy = room
        .enemies
        .iter()
        .filter(|e| e.alive)
        .map(|e| e.rect.center())
        .min_by(|a, b| {
            a.distance(me)
                .partial_cmp(&b.distance(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    let boss = room.boss.as_ref().filter(|b| b.alive).map(|b| b.rect.center());
    let doors = room
        .door_group_bounds(DoorGroup::Next)
        .map(|r| r.center());

    let Some(target) = nearest_enemy.or(boss).or(doors) else {
        return TickInput::default();
    };
    let delta = target - me;
    let fighting = nearest_enemy.is_some() || boss.is_some();
    let close = delta.length() < player.rect.width() + player.weapon.stats.reach + 10.0;

    TickInput {
        direction: if fighting && close {
            // Turn to face without walking into contact damage
            Direction::dominant(delta).filter(|d| *d != player.facing)
        } else {
            Direction::dominant(delta)
        },
        attack: fighting && close && player.can_attack(),
        block: fighting && close && !player.can_attack() && player.can_block(),
        ability: fighting && close && player.health < player.max_health / 2 && player.can_use_ability(),
        pause: false,
    }
}

fn load_config(opts: &Options) -> Result<(Tuning, GameLayout), SetupError> {
    let tuning = match &opts.tuning {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
        None => Tuning::default(),
    };
    let layout = match &opts.layout {
        Some(path) => GameLayout::from_json(&std::fs::read_to_string(path)?)?,
        None => GameLayout::default(),
    };
    Ok((tuning, layout))
}

fn main() -> Result<(), SetupError> {
    env_logger::init();
    log::info!("Room Crawler (native) starting...");

    let opts = Options::parse(std::env::args().skip(1));
    let (tuning, layout) = load_config(&opts)?;
    let mut state = WorldState::with_config(opts.seed, tuning, layout)?;
    log::info!("Game initialized with seed: {}", opts.seed);

    let mut replays = 0;
    for _ in 0..opts.ticks {
        let input = autopilot(&state);
        tick(&mut state, &input);
        for event in &state.events {
            log::debug!("t={} {:?}", state.time_ticks, event);
        }

        match state.phase {
            GamePhase::Victory => break,
            GamePhase::Defeated if replays < 3 => {
                replays += 1;
                state.replay_room();
            }
            GamePhase::Defeated => break,
            _ => {}
        }
    }

    let hud = Hud::from_state(&state);
    println!(
        "{:?} after {} ticks in room {}/{} '{}': health {}/{}, gold {}, replays {}",
        hud.phase,
        state.time_ticks,
        hud.room_index + 1,
        hud.room_count,
        hud.room_name,
        hud.health,
        hud.max_health,
        hud.gold,
        replays
    );
    Ok(())
}
