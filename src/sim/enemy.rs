//! Enemy spawning and AI

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyKind, Facing, Tile};
use crate::consts::*;

/// Base spawn chance per eligible ground tile
pub const SPAWN_CHANCE_BASE: f32 = 0.25;
/// Extra spawn chance per level
pub const SPAWN_CHANCE_PER_LEVEL: f32 = 0.02;
/// Chance a spawn is Fast, once fast enemies are unlocked
pub const FAST_CHANCE: f32 = 0.25;
/// Fast enemies only appear after this level
pub const FAST_MIN_LEVEL: u32 = 3;
/// Horizontal jitter of a spawn within its tile
const SPAWN_OFFSET: f32 = 16.0;
const SPAWN_JITTER: f32 = 12.0;

impl EnemyKind {
    pub fn speed(self, level: u32) -> f32 {
        let l = level as f32;
        match self {
            EnemyKind::Basic => 45.0 + l * 2.0,
            EnemyKind::Fast => 75.0 + l * 3.0,
        }
    }

    pub fn max_health(self, level: u32) -> i32 {
        let l = level as i32;
        match self {
            EnemyKind::Basic => 26 + l * 4,
            EnemyKind::Fast => 18 + l * 3,
        }
    }

    pub fn attack(self, level: u32) -> i32 {
        let l = level as i32;
        match self {
            EnemyKind::Basic => 6 + l,
            EnemyKind::Fast => 4 + l,
        }
    }
}

impl Enemy {
    /// Create an enemy for the given dungeon level.
    ///
    /// Stats scale with `level`; the displayed level gets a small jitter.
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        id: u32,
        pos: Vec2,
        kind: EnemyKind,
        level: u32,
    ) -> Self {
        let jitter: u32 = rng.random_range(0..2);
        let max_health = kind.max_health(level);
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            kind,
            level: (level + jitter).saturating_sub(1).max(1),
            health: max_health,
            max_health,
            attack: kind.attack(level),
            speed: kind.speed(level),
            facing: Facing::Right,
            alive: true,
            attack_cooldown: 0.0,
            hit_this_swing: false,
        }
    }

    /// Chase the player when in range and settle onto the floor.
    ///
    /// Enemies ignore the tile map entirely: they never fall into pits.
    pub fn update(&mut self, player_x: f32, dt: f32) {
        if !self.alive {
            return;
        }

        let dx = player_x - self.pos.x;
        self.facing = if dx > 0.0 { Facing::Right } else { Facing::Left };
        self.vel.x = if dx.abs() < AGGRO_RADIUS {
            direction(dx) * self.speed
        } else {
            0.0
        };
        self.pos.x += self.vel.x * dt;
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);

        if self.pos.y + self.size.y < FLOOR_Y {
            self.vel.y += ENEMY_GRAVITY * dt;
            self.pos.y += self.vel.y * dt;
        } else {
            self.pos.y = FLOOR_Y - self.size.y;
            self.vel.y = 0.0;
        }
    }

    /// Fraction of health remaining, clamped to [0, 1]
    pub fn health_fraction(&self) -> f32 {
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// -1, 0 or 1; zero stays zero
#[inline]
fn direction(dx: f32) -> f32 {
    if dx > 0.0 {
        1.0
    } else if dx < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Roll a fresh enemy roster for a map
pub fn spawn_enemies<R: Rng + ?Sized>(
    rng: &mut R,
    map: &[Tile],
    level: u32,
    next_id: &mut u32,
) -> Vec<Enemy> {
    let chance = SPAWN_CHANCE_BASE + SPAWN_CHANCE_PER_LEVEL * level as f32;
    let mut enemies = Vec::new();

    for (i, tile) in map.iter().enumerate().skip(ENEMY_SPAWN_START_TILE) {
        if *tile != Tile::Ground || rng.random::<f32>() >= chance {
            continue;
        }
        let x = i as f32 * TILE_WIDTH + SPAWN_OFFSET + rng.random::<f32>() * SPAWN_JITTER;
        let kind = if level > FAST_MIN_LEVEL && rng.random::<f32>() < FAST_CHANCE {
            EnemyKind::Fast
        } else {
            EnemyKind::Basic
        };
        let id = *next_id;
        *next_id += 1;
        enemies.push(Enemy::new(rng, id, Vec2::new(x, ENEMY_SPAWN_Y), kind, level));
    }

    log::debug!(
        "Spawned {} enemies for level {} ({} fast)",
        enemies.len(),
        level,
        enemies.iter().filter(|e| e.kind == EnemyKind::Fast).count()
    );
    enemies
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 0.017;

    fn basic_at(x: f32) -> Enemy {
        let mut rng = Pcg32::seed_from_u64(0);
        Enemy::new(&mut rng, 1, Vec2::new(x, FLOOR_Y - ENEMY_HEIGHT), EnemyKind::Basic, 1)
    }

    #[test]
    fn test_stat_formulas() {
        assert_eq!(EnemyKind::Basic.max_health(1), 30);
        assert_eq!(EnemyKind::Basic.attack(1), 7);
        assert_eq!(EnemyKind::Basic.speed(1), 47.0);
        assert_eq!(EnemyKind::Fast.max_health(4), 30);
        assert_eq!(EnemyKind::Fast.attack(4), 8);
        assert_eq!(EnemyKind::Fast.speed(4), 87.0);
    }

    #[test]
    fn test_level_jitter_floor() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            let e = Enemy::new(&mut rng, 1, Vec2::ZERO, EnemyKind::Basic, 1);
            assert_eq!(e.level, 1);
            let e = Enemy::new(&mut rng, 2, Vec2::ZERO, EnemyKind::Basic, 5);
            assert!(e.level == 4 || e.level == 5);
        }
    }

    #[test]
    fn test_chases_player_in_range() {
        let mut e = basic_at(200.0);
        e.update(150.0, DT);
        assert_eq!(e.vel.x, -e.speed);
        assert_eq!(e.facing, Facing::Left);
        assert!(e.pos.x < 200.0);

        let mut e = basic_at(200.0);
        e.update(300.0, DT);
        assert_eq!(e.vel.x, e.speed);
        assert_eq!(e.facing, Facing::Right);
    }

    #[test]
    fn test_holds_position_out_of_range() {
        let mut e = basic_at(200.0);
        e.update(200.0 + AGGRO_RADIUS, DT);
        assert_eq!(e.vel.x, 0.0);
        assert_eq!(e.pos.x, 200.0);
    }

    #[test]
    fn test_cooldown_decays_regardless_of_distance() {
        let mut e = basic_at(200.0);
        e.attack_cooldown = 0.5;
        e.update(5000.0, 0.1);
        assert!((e.attack_cooldown - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_dead_enemy_is_inert() {
        let mut e = basic_at(200.0);
        e.alive = false;
        e.attack_cooldown = 0.5;
        e.update(150.0, DT);
        assert_eq!(e.pos.x, 200.0);
        assert_eq!(e.attack_cooldown, 0.5);
    }

    #[test]
    fn test_settles_on_floor() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut e = Enemy::new(&mut rng, 1, Vec2::new(0.0, ENEMY_SPAWN_Y), EnemyKind::Basic, 1);
        e.update(1000.0, DT);
        assert_eq!(e.pos.y + e.size.y, FLOOR_Y);

        let mut e = Enemy::new(&mut rng, 2, Vec2::new(0.0, 100.0), EnemyKind::Basic, 1);
        e.update(1000.0, DT);
        assert!(e.vel.y > 0.0);
        assert!(e.pos.y > 100.0);
    }

    #[test]
    fn test_spawn_only_on_ground_past_start() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut map = vec![Tile::Ground; 400];
        for i in (10..400).step_by(3) {
            map[i] = Tile::Pit;
        }
        let mut next_id = 1;
        let enemies = spawn_enemies(&mut rng, &map, 1, &mut next_id);
        assert!(!enemies.is_empty());
        for e in &enemies {
            let tile = crate::tile_index_at(e.pos.x);
            assert!(tile >= ENEMY_SPAWN_START_TILE);
            assert_eq!(map[tile], Tile::Ground);
            assert_eq!(e.kind, EnemyKind::Basic);
            assert!(e.alive);
        }
        assert_eq!(next_id as usize, enemies.len() + 1);
    }

    #[test]
    fn test_fast_enemies_after_level_three() {
        let map = vec![Tile::Ground; 400];
        let mut next_id = 1;
        let low = spawn_enemies(&mut Pcg32::seed_from_u64(4), &map, 3, &mut next_id);
        assert!(low.iter().all(|e| e.kind == EnemyKind::Basic));
        let high = spawn_enemies(&mut Pcg32::seed_from_u64(4), &map, 4, &mut next_id);
        assert!(high.iter().any(|e| e.kind == EnemyKind::Fast));
    }
}
