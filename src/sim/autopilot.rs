//! Idle/demo mode: derives input from the current state so the game plays itself

use super::state::{GameState, Tile};
use super::tick::TickInput;
use crate::consts::*;
use crate::tile_index_at;

/// How far ahead of the player's center to look for pits
const PIT_LOOKAHEAD: f32 = 40.0;
/// Swing when an enemy is within this horizontal distance
const ATTACK_RANGE: f32 = 34.0;
/// Only dash when no enemy is this close
const DASH_CLEARANCE: f32 = 180.0;

/// Choose the input for this frame
pub fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let center = player.center_x();

    let pit_ahead = [center, center + PIT_LOOKAHEAD]
        .iter()
        .any(|x| state.map.get(tile_index_at(*x)) == Some(&Tile::Pit));

    let nearest_enemy = state
        .enemies
        .iter()
        .filter(|e| e.alive)
        .map(|e| (e.pos.x - player.pos.x).abs())
        .fold(f32::INFINITY, f32::min);

    // Dash only over a clear run of ground
    let ground_ahead = (1..=3).all(|i| {
        state.map.get(tile_index_at(center) + i).is_none_or(|t| *t != Tile::Pit)
    });

    TickInput {
        left: false,
        right: true,
        jump: player.grounded && pit_ahead,
        attack: nearest_enemy < ATTACK_RANGE,
        dash: player.grounded
            && ground_ahead
            && nearest_enemy > DASH_CLEARANCE
            && player.dash_cooldown <= 0.0
            && player.pos.y + player.size.y >= FLOOR_Y,
    }
}
