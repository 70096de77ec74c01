//! Game state and core simulation types
//!
//! Everything the simulation mutates during a frame lives in [`GameState`]:
//! no module-level state, and the only randomness is the seeded generator
//! owned by the state itself.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::spawn_enemies;
use super::map::generate_map;
use super::particles::{DEFAULT_MAX_PARTICLES, ParticleSystem};
use crate::consts::*;
use crate::{camera_offset, tiles_for_level};

/// One horizontal segment of the level map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Ground,
    Pit,
    /// Healing chest; becomes Ground once collected
    Chest,
}

/// Which way an entity is looking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Horizontal locomotion of the player.
///
/// Dashing owns horizontal velocity for its whole duration: movement input,
/// jumps and new dashes are ignored until it runs out.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Movement {
    #[default]
    Idle,
    Running,
    Dashing { remaining: f32 },
}

/// Attack sub-state, orthogonal to [`Movement`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AttackState {
    #[default]
    Ready,
    Swinging { remaining: f32 },
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// May dip below zero for the rest of a frame before the death check runs
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub facing: Facing,
    pub level: u32,
    pub xp: u32,
    pub xp_to_level: u32,
    pub movement: Movement,
    pub attack_state: AttackState,
    /// Standing on a floor tile (set by collision resolution)
    pub grounded: bool,
    /// Feet reached floor height over a pit
    pub falling: bool,
    pub dash_cooldown: f32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            health: PLAYER_START_HEALTH,
            max_health: PLAYER_START_HEALTH,
            attack: PLAYER_START_ATTACK,
            facing: Facing::Right,
            level: 1,
            xp: 0,
            xp_to_level: PLAYER_START_XP_TO_LEVEL,
            movement: Movement::Idle,
            attack_state: AttackState::Ready,
            grounded: false,
            falling: false,
            dash_cooldown: 0.0,
        }
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        matches!(self.movement, Movement::Dashing { .. })
    }

    #[inline]
    pub fn is_attacking(&self) -> bool {
        matches!(self.attack_state, AttackState::Swinging { .. })
    }

    /// Y coordinate of the player's feet
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// X coordinate used for tile lookups
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + 12.0
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    /// Faster but frailer; appears after level 3
    Fast,
}

/// A hostile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub kind: EnemyKind,
    /// Displayed level (spawn level with jitter, at least 1)
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub speed: f32,
    pub facing: Facing,
    /// False once killed; the record stays for the death frame
    pub alive: bool,
    pub attack_cooldown: f32,
    /// Already damaged by the player's current swing
    pub hit_this_swing: bool,
}

/// A floating text/marker effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel_y: f32,
    pub text: String,
    /// 0xRRGGBB
    pub color: u32,
    pub size: f32,
    /// Seconds remaining
    pub life: f32,
}

/// Aggregate statistics for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub kills: u32,
    /// Highest level reached this run
    pub max_level: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            kills: 0,
            max_level: 1,
        }
    }
}

/// Final stats handed to the boundary layer when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub kills: u32,
    pub max_level: u32,
    pub player_level: u32,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player died; the end-of-run notification fires when the timer runs out
    Dying { handoff_in: f32 },
    /// Run ended and has been reported
    GameOver,
}

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Slain,
    FellOut,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyHit { enemy_id: u32, damage: i32 },
    EnemyKilled { enemy_id: u32, xp: u32 },
    PlayerHurt { enemy_id: u32, damage: i32 },
    ChestOpened { tile: usize, healed: i32 },
    PlayerLeveled { level: u32 },
    LevelCleared { level: u32 },
    PlayerDied { cause: DeathCause },
    RunEnded(RunSummary),
}

/// Complete simulation context for one game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this run was started from
    pub seed: u64,
    pub rng: Pcg32,
    /// Current dungeon level (1-based)
    pub level: u32,
    pub map: Vec<Tile>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub particles: ParticleSystem,
    pub stats: Stats,
    pub phase: GamePhase,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Frames simulated this run
    pub frame: u64,
    camera_x: f32,
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_particle_limit(seed, DEFAULT_MAX_PARTICLES)
    }

    /// Create a new run with a custom particle cap
    pub fn with_particle_limit(seed: u64, max_particles: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let map = generate_map(&mut rng, tiles_for_level(1));
        let mut state = Self {
            seed,
            rng,
            level: 1,
            map,
            player: Player::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            enemies: Vec::new(),
            particles: ParticleSystem::new(max_particles),
            stats: Stats::default(),
            phase: GamePhase::Playing,
            events: Vec::new(),
            frame: 0,
            camera_x: 0.0,
            next_id: 1,
        };
        state.respawn_enemies();
        log::info!(
            "New run (seed {}): {} tiles, {} enemies",
            seed,
            state.map.len(),
            state.enemies.len()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the enemy roster with a fresh spawn pass over the current map
    pub fn respawn_enemies(&mut self) {
        self.enemies = spawn_enemies(&mut self.rng, &self.map, self.level, &mut self.next_id);
    }

    /// Horizontal world-to-view translation
    #[inline]
    pub fn camera_x(&self) -> f32 {
        self.camera_x
    }

    /// Recompute the camera from the player's position
    pub fn update_camera(&mut self) {
        self.camera_x = camera_offset(self.player.pos.x);
    }

    /// World X past which the level counts as cleared
    #[inline]
    pub fn level_exit_x(&self) -> f32 {
        self.map.len() as f32 * TILE_WIDTH - LEVEL_EXIT_MARGIN
    }

    /// Tile under a world X coordinate (None past either end)
    pub fn tile_at(&self, x: f32) -> Option<Tile> {
        if x < 0.0 {
            return None;
        }
        self.map.get(crate::tile_index_at(x)).copied()
    }

    pub fn is_over(&self) -> bool {
        !matches!(self.phase, GamePhase::Playing)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            kills: self.stats.kills,
            max_level: self.stats.max_level,
            player_level: self.player.level,
        }
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
