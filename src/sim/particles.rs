//! Floating text particles (damage numbers, pickups, level-ups)
//!
//! Purely presentational, but spawned from gameplay code and advanced with
//! the rest of the simulation so they stay in sync with the frame clock.

use glam::Vec2;
use rand::Rng;

use super::state::Particle;

/// Maximum live particles
pub const DEFAULT_MAX_PARTICLES: usize = 256;
/// Lifetime of a new particle (seconds)
pub const PARTICLE_LIFETIME: f32 = 0.9;
/// Glyph size used when none is given
pub const DEFAULT_PARTICLE_SIZE: f32 = 16.0;
/// Upward launch speed and its random extra
const RISE_SPEED: f32 = 28.0;
const RISE_JITTER: f32 = 8.0;
/// Downward drift acceleration
const DRIFT: f32 = 28.0;

/// Particle colors (0xRRGGBB)
pub const COLOR_HEAL: u32 = 0x5dee44;
pub const COLOR_ENEMY_HIT: u32 = 0xff6060;
pub const COLOR_PLAYER_HIT: u32 = 0xe02727;
pub const COLOR_DEATH: u32 = 0xffffff;
pub const COLOR_LEVEL_UP: u32 = 0xffe066;

/// Pool of live particles
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max: usize,
}

impl ParticleSystem {
    pub fn new(max: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max.min(DEFAULT_MAX_PARTICLES)),
            max,
        }
    }

    /// Spawn a particle. Dropped silently when the pool is full.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        pos: Vec2,
        text: impl Into<String>,
        color: u32,
        size: f32,
    ) {
        if self.particles.len() >= self.max {
            log::trace!("Particle pool full, dropping particle");
            return;
        }
        let jitter: f32 = rng.random();
        self.particles.push(Particle {
            pos,
            vel_y: -RISE_SPEED - jitter * RISE_JITTER,
            text: text.into(),
            color,
            size,
            life: PARTICLE_LIFETIME,
        });
    }

    /// Discard expired particles, then move the survivors
    pub fn advance(&mut self, dt: f32) {
        self.particles.retain(|p| p.life > 0.0);
        for p in &mut self.particles {
            p.pos.y += p.vel_y * dt;
            p.vel_y += DRIFT * dt;
            p.life -= dt;
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

impl Particle {
    /// Render opacity derived from remaining life
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}
