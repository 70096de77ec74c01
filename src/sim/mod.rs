//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame deltas only (clamped)
//! - Seeded RNG owned by the game state
//! - Stable update order: player, enemies, collisions, particles, camera
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod enemy;
pub mod map;
pub mod particles;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use enemy::spawn_enemies;
pub use map::generate_map;
pub use particles::ParticleSystem;
pub use session::{FrameClock, Simulation};
pub use snapshot::RenderSnapshot;
pub use state::{
    AttackState, DeathCause, Enemy, EnemyKind, Facing, GameEvent, GamePhase, GameState, Movement,
    Particle, Player, RunSummary, Stats, Tile,
};
pub use tick::{TickInput, advance_level, clamp_dt, tick};
