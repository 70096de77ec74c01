//! Per-frame collision and combat resolution
//!
//! Runs once per frame after every entity has moved, always in this order:
//! ground/pit contact, chest pickup, then the player/enemy combat exchange.

use glam::Vec2;
use rand::Rng;

use super::particles::{COLOR_DEATH, COLOR_ENEMY_HIT, COLOR_HEAL, COLOR_PLAYER_HIT, ParticleSystem};
use super::state::{Enemy, GameEvent, GameState, Player, Tile};
use crate::consts::*;
use crate::tile_index_at;

/// Feet must be below this Y to open a chest
pub const CHEST_PICKUP_Y: f32 = GAME_HEIGHT - 70.0;
/// Chest heal range (inclusive low, exclusive high)
pub const CHEST_HEAL_MIN: i32 = 10;
pub const CHEST_HEAL_MAX: i32 = 20;

/// Player swing reach: |dx| and |dy| must both be under these
const PLAYER_REACH_X: f32 = 32.0;
const PLAYER_REACH_Y: f32 = 30.0;
/// Enemy contact reach (tighter, offset toward the player's leading edge)
const ENEMY_REACH_X: f32 = 28.0;
const ENEMY_REACH_Y: f32 = 26.0;
/// Enemy attack cooldown window after landing a hit (seconds)
const ENEMY_COOLDOWN_MIN: f32 = 0.6;
const ENEMY_COOLDOWN_JITTER: f32 = 0.4;

/// Resolve all contacts for the current frame
pub fn resolve(state: &mut GameState) {
    resolve_ground(state);
    resolve_chest(state);
    resolve_combat(state);
}

fn resolve_ground(state: &mut GameState) {
    // Out-of-map counts as solid ground
    let tile = state.tile_at(state.player.center_x()).unwrap_or(Tile::Ground);
    let player = &mut state.player;

    if player.bottom() >= FLOOR_Y {
        if tile == Tile::Pit {
            player.falling = true;
            player.grounded = false;
        } else {
            player.pos.y = FLOOR_Y - player.size.y;
            player.vel.y = 0.0;
            player.grounded = true;
            player.falling = false;
        }
    } else {
        player.grounded = false;
    }
}

fn resolve_chest(state: &mut GameState) {
    let idx = tile_index_at(state.player.center_x());
    if state.tile_at(state.player.center_x()) != Some(Tile::Chest)
        || state.player.bottom() <= CHEST_PICKUP_Y
    {
        return;
    }

    state.map[idx] = Tile::Ground;
    let amount = state.rng.random_range(CHEST_HEAL_MIN..CHEST_HEAL_MAX);
    let before = state.player.health;
    state.player.heal(amount);
    let healed = state.player.health - before;

    spawn_player_particle(
        &mut state.particles,
        &mut state.rng,
        &state.player,
        "+HP",
        COLOR_HEAL,
        22.0,
    );
    state.events.push(GameEvent::ChestOpened { tile: idx, healed });
    log::debug!("Chest at tile {} healed {} (rolled {})", idx, healed, amount);
}

fn resolve_combat(state: &mut GameState) {
    let GameState {
        rng,
        level,
        player,
        enemies,
        particles,
        stats,
        events,
        ..
    } = state;

    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        if player.is_attacking() && player_reaches(player, enemy) && !enemy.hit_this_swing {
            enemy.hit_this_swing = true;
            enemy.health -= player.attack;
            particles.spawn(
                rng,
                Vec2::new(enemy.pos.x + 14.0, enemy.pos.y),
                format!("-{}", player.attack),
                COLOR_ENEMY_HIT,
                18.0,
            );
            events.push(GameEvent::EnemyHit {
                enemy_id: enemy.id,
                damage: player.attack,
            });

            if enemy.health <= 0 {
                enemy.alive = false;
                stats.kills += 1;
                let xp = kill_xp(enemy, *level);
                let levels = player.gain_xp(xp);
                particles.spawn(
                    rng,
                    Vec2::new(enemy.pos.x + 14.0, enemy.pos.y - 12.0),
                    "✖",
                    COLOR_DEATH,
                    25.0,
                );
                events.push(GameEvent::EnemyKilled {
                    enemy_id: enemy.id,
                    xp,
                });
                for reached in (player.level - levels + 1)..=player.level {
                    events.push(GameEvent::PlayerLeveled { level: reached });
                }
                log::debug!("Enemy {} killed, +{} xp (kills: {})", enemy.id, xp, stats.kills);
            }
        }

        if enemy.alive && enemy_reaches(player, enemy) && enemy.attack_cooldown <= 0.0 {
            player.health -= enemy.attack;
            enemy.attack_cooldown =
                ENEMY_COOLDOWN_MIN + rng.random::<f32>() * ENEMY_COOLDOWN_JITTER;
            spawn_player_particle(
                particles,
                rng,
                player,
                format!("-{}", enemy.attack),
                COLOR_PLAYER_HIT,
                18.0,
            );
            events.push(GameEvent::PlayerHurt {
                enemy_id: enemy.id,
                damage: enemy.attack,
            });
            log::trace!("Enemy {} hit player for {}", enemy.id, enemy.attack);
        }
    }

    // The latch only resets between swings, never during one
    if !player.is_attacking() {
        for enemy in enemies.iter_mut() {
            enemy.hit_this_swing = false;
        }
    }
}

/// XP granted for a kill on the given dungeon level
#[inline]
pub fn kill_xp(enemy: &Enemy, level: u32) -> u32 {
    (enemy.max_health.max(0) as u32) * 2 + level * 3
}

#[inline]
fn player_reaches(player: &Player, enemy: &Enemy) -> bool {
    ((player.pos.x + 14.0) - (enemy.pos.x + 14.0)).abs() < PLAYER_REACH_X
        && (player.pos.y - enemy.pos.y).abs() < PLAYER_REACH_Y
}

#[inline]
fn enemy_reaches(player: &Player, enemy: &Enemy) -> bool {
    ((player.pos.x + 10.0) - (enemy.pos.x + 14.0)).abs() < ENEMY_REACH_X
        && (player.pos.y - enemy.pos.y).abs() < ENEMY_REACH_Y
}

/// Where player-attached particles appear
#[inline]
fn particle_anchor(player: &Player) -> Vec2 {
    Vec2::new(player.pos.x + 12.0, player.pos.y - 10.0)
}

/// Spawn a particle above the player
pub(crate) fn spawn_player_particle(
    particles: &mut ParticleSystem,
    rng: &mut impl Rng,
    player: &Player,
    text: impl Into<String>,
    color: u32,
    size: f32,
) {
    particles.spawn(rng, particle_anchor(player), text, color, size);
}
