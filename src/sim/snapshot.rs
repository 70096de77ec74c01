//! Read-only per-frame view of the simulation for the rendering layer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EnemyKind, Facing, GamePhase, GameState, Movement, Tile};
use crate::consts::*;

/// One visible map tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub index: usize,
    /// World X of the tile's left edge
    pub x: f32,
    pub tile: Tile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub movement: Movement,
    pub attacking: bool,
    pub dashing: bool,
    pub grounded: bool,
    pub falling: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EnemyKind,
    pub level: u32,
    pub facing: Facing,
    pub health_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub text: String,
    pub color: u32,
    pub size: f32,
    pub opacity: f32,
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    /// Clamped to [0, 1]
    pub health_fraction: f32,
    pub xp_fraction: f32,
    pub player_level: u32,
    pub kills: u32,
    pub dungeon_level: u32,
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub frame: u64,
    pub phase: GamePhase,
    pub camera_x: f32,
    pub tiles: Vec<TileView>,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub particles: Vec<ParticleView>,
    pub hud: Hud,
}

/// Range of tile indices visible for a camera offset (one tile of slack each side)
pub fn visible_tile_range(camera_x: f32, tile_count: usize) -> std::ops::Range<usize> {
    let start = ((camera_x / TILE_WIDTH).floor() as i64 - 1).max(0) as usize;
    let end = ((((camera_x + GAME_WIDTH) / TILE_WIDTH).ceil() as i64 + 1).max(0) as usize)
        .min(tile_count);
    start.min(end)..end
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let camera_x = state.camera_x();
        let tiles = visible_tile_range(camera_x, state.map.len())
            .map(|index| TileView {
                index,
                x: index as f32 * TILE_WIDTH,
                tile: state.map[index],
            })
            .collect();

        let p = &state.player;
        let player = PlayerView {
            pos: p.pos,
            size: p.size,
            facing: p.facing,
            movement: p.movement,
            attacking: p.is_attacking(),
            dashing: p.is_dashing(),
            grounded: p.grounded,
            falling: p.falling,
        };

        let enemies = state
            .enemies
            .iter()
            .filter(|e| e.alive)
            .map(|e| EnemyView {
                id: e.id,
                pos: e.pos,
                size: e.size,
                kind: e.kind,
                level: e.level,
                facing: e.facing,
                health_fraction: e.health_fraction(),
            })
            .collect();

        let particles = state
            .particles
            .iter()
            .map(|pt| ParticleView {
                pos: pt.pos,
                text: pt.text.clone(),
                color: pt.color,
                size: pt.size,
                opacity: pt.opacity(),
            })
            .collect();

        let hud = Hud {
            health: p.health.max(0),
            max_health: p.max_health,
            health_fraction: p.health_fraction(),
            xp_fraction: p.xp_fraction(),
            player_level: p.level,
            kills: state.stats.kills,
            dungeon_level: state.level,
        };

        Self {
            frame: state.frame,
            phase: state.phase,
            camera_x,
            tiles,
            player,
            enemies,
            particles,
            hud,
        }
    }
}
