//! Per-frame simulation step
//!
//! Advances one frame in a fixed order: player, enemies, collisions,
//! particles, camera, then the terminal checks (death before level clear).

use super::collision::{self, spawn_player_particle};
use super::map::generate_map;
use super::particles::COLOR_LEVEL_UP;
use super::state::{DeathCause, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::tiles_for_level;

/// Logical input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump (only honoured while grounded)
    pub jump: bool,
    pub attack: bool,
    pub dash: bool,
}

/// Clamp a frame delta into the range the physics can integrate.
///
/// Missing, non-finite or non-positive deltas fall back to the nominal frame.
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        DEFAULT_DT
    } else {
        dt.min(MAX_DT)
    }
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::GameOver => return,
        GamePhase::Dying { handoff_in } => {
            let handoff_in = handoff_in - dt;
            if handoff_in <= 0.0 {
                let summary = state.summary();
                state.phase = GamePhase::GameOver;
                state.events.push(GameEvent::RunEnded(summary));
                log::info!(
                    "Run over: {} kills, max level {}",
                    summary.kills,
                    summary.max_level
                );
            } else {
                state.phase = GamePhase::Dying { handoff_in };
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.frame += 1;

    state.player.update(input, dt);
    let player_x = state.player.pos.x;
    for enemy in &mut state.enemies {
        enemy.update(player_x, dt);
    }

    collision::resolve(state);
    state.particles.advance(dt);
    state.update_camera();

    if let Some(cause) = death_cause(state) {
        state.phase = GamePhase::Dying {
            handoff_in: GAME_OVER_DELAY,
        };
        state.events.push(GameEvent::PlayerDied { cause });
        log::info!(
            "Player died ({:?}) on level {} at frame {}",
            cause,
            state.level,
            state.frame
        );
        return;
    }

    if state.player.pos.x > state.level_exit_x() {
        advance_level(state);
    }
}

fn death_cause(state: &GameState) -> Option<DeathCause> {
    if state.player.pos.y > GAME_HEIGHT + FALL_OUT_MARGIN {
        Some(DeathCause::FellOut)
    } else if state.player.health <= 0 {
        Some(DeathCause::Slain)
    } else {
        None
    }
}

/// Move to the next level: longer map, new roster, level-scaled heal
pub fn advance_level(state: &mut GameState) {
    let cleared = state.level;
    state.level += 1;
    state.stats.max_level = state.stats.max_level.max(state.level);

    state.map = generate_map(&mut state.rng, tiles_for_level(state.level));
    state.player.pos.x = PLAYER_SPAWN_X;
    state.update_camera();
    state.respawn_enemies();
    state.player.heal(level_heal(state.level));

    spawn_player_particle(
        &mut state.particles,
        &mut state.rng,
        &state.player,
        "LEVEL UP!",
        COLOR_LEVEL_UP,
        36.0,
    );
    state.events.push(GameEvent::LevelCleared { level: cleared });
    log::info!(
        "Level {} cleared -> level {}: {} tiles, {} enemies",
        cleared,
        state.level,
        state.map.len(),
        state.enemies.len()
    );
}

/// Health restored on entering `level`
#[inline]
pub fn level_heal(level: u32) -> i32 {
    15 + 2 * level as i32
}
