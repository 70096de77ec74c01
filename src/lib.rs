//! Rogue Run - A side-scrolling roguelike action game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (map generation, physics, combat, leveling)
//! - `settings`: Session configuration and key bindings
//! - `records`: Best runs of the current process

pub mod records;
pub mod settings;
pub mod sim;

pub use records::RunRecords;
pub use settings::{Action, Settings};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 720.0;
    pub const GAME_HEIGHT: f32 = 400.0;

    /// Tile dimensions (tile top is the floor)
    pub const TILE_WIDTH: f32 = 48.0;
    pub const TILE_HEIGHT: f32 = 40.0;
    /// Y coordinate of the walkable floor
    pub const FLOOR_Y: f32 = GAME_HEIGHT - TILE_HEIGHT;

    /// Nominal frame delta used on the first frame (seconds)
    pub const DEFAULT_DT: f32 = 0.017;
    /// Largest frame delta the simulation will integrate (seconds)
    pub const MAX_DT: f32 = 0.045;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 28.0;
    pub const PLAYER_HEIGHT: f32 = 36.0;
    pub const PLAYER_SPAWN_X: f32 = 60.0;
    pub const PLAYER_SPAWN_Y: f32 = GAME_HEIGHT - 80.0;
    pub const PLAYER_SPEED: f32 = 148.0;
    pub const PLAYER_JUMP_POWER: f32 = 265.0;
    pub const PLAYER_GRAVITY: f32 = 520.0;
    pub const PLAYER_START_HEALTH: i32 = 40;
    pub const PLAYER_START_ATTACK: i32 = 7;
    pub const PLAYER_START_XP_TO_LEVEL: u32 = 32;
    /// Max health (and health) gained per player level
    pub const LEVEL_UP_HEALTH: i32 = 8;
    /// Player below this Y is considered off-world and dies
    pub const OFF_WORLD_Y: f32 = GAME_HEIGHT + 100.0;

    /// Dash tuning
    pub const DASH_DURATION: f32 = 0.16;
    pub const DASH_SPEED: f32 = 340.0;
    pub const DASH_COOLDOWN: f32 = 0.65;

    /// Attack swing duration (seconds)
    pub const ATTACK_DURATION: f32 = 0.22;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 26.0;
    pub const ENEMY_HEIGHT: f32 = 32.0;
    pub const ENEMY_SPAWN_Y: f32 = GAME_HEIGHT - 56.0;
    pub const ENEMY_GRAVITY: f32 = 500.0;
    /// Horizontal distance within which enemies chase the player
    pub const AGGRO_RADIUS: f32 = 120.0;
    /// First tile index eligible for enemy spawns
    pub const ENEMY_SPAWN_START_TILE: usize = 4;

    /// Camera keeps the player this far from the left edge
    pub const CAMERA_LEAD: f32 = 120.0;

    /// Map lengths
    pub const FIRST_LEVEL_TILES: usize = 34;
    pub const LEVEL_TILES_BASE: usize = 34;
    pub const LEVEL_TILES_PER_LEVEL: usize = 2;
    /// Player must pass `tiles * TILE_WIDTH - LEVEL_EXIT_MARGIN` to clear a level
    pub const LEVEL_EXIT_MARGIN: f32 = 60.0;

    /// Game over when the player sinks this far below the playfield
    pub const FALL_OUT_MARGIN: f32 = 30.0;
    /// Delay between death and the end-of-run notification (seconds)
    pub const GAME_OVER_DELAY: f32 = 0.6;
}

/// Number of tiles in the map for a given level
#[inline]
pub fn tiles_for_level(level: u32) -> usize {
    if level <= 1 {
        consts::FIRST_LEVEL_TILES
    } else {
        consts::LEVEL_TILES_BASE + consts::LEVEL_TILES_PER_LEVEL * level as usize
    }
}

/// Index of the tile containing world X coordinate `x`
#[inline]
pub fn tile_index_at(x: f32) -> usize {
    (x / consts::TILE_WIDTH).floor().max(0.0) as usize
}

/// Camera scroll offset that keeps the player in view
#[inline]
pub fn camera_offset(player_x: f32) -> f32 {
    (player_x - consts::CAMERA_LEAD).max(0.0)
}
