//! Player controller: input handling, physics integration, leveling

use super::state::{AttackState, Facing, Movement, Player};
use super::tick::TickInput;
use crate::consts::*;

impl Player {
    /// Advance the player by one frame
    pub fn update(&mut self, input: &TickInput, dt: f32) {
        self.update_movement(input, dt);
        self.dash_cooldown = (self.dash_cooldown - dt).max(0.0);
        self.update_attack(input, dt);

        // Gravity and integration
        self.vel.y += PLAYER_GRAVITY * dt;
        self.pos.y += self.vel.y * dt;
        self.pos.x = (self.pos.x + self.vel.x * dt).max(0.0);

        if self.pos.y > OFF_WORLD_Y {
            self.health = 0;
        }
    }

    fn update_movement(&mut self, input: &TickInput, dt: f32) {
        if let Movement::Dashing { remaining } = self.movement {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.movement = Movement::Idle;
                self.vel.x = 0.0;
            } else {
                self.movement = Movement::Dashing { remaining };
            }
            return;
        }

        if input.left {
            self.vel.x = -PLAYER_SPEED;
            self.facing = Facing::Left;
            self.movement = Movement::Running;
        } else if input.right {
            self.vel.x = PLAYER_SPEED;
            self.facing = Facing::Right;
            self.movement = Movement::Running;
        } else {
            self.vel.x = 0.0;
            self.movement = Movement::Idle;
        }

        if input.jump && self.grounded {
            self.vel.y = -PLAYER_JUMP_POWER;
            self.grounded = false;
        }

        if input.dash && self.dash_cooldown <= 0.0 {
            self.movement = Movement::Dashing {
                remaining: DASH_DURATION,
            };
            self.vel.x = self.facing.sign() * DASH_SPEED;
            self.dash_cooldown = DASH_COOLDOWN;
        }
    }

    fn update_attack(&mut self, input: &TickInput, dt: f32) {
        if input.attack && self.attack_state == AttackState::Ready {
            self.attack_state = AttackState::Swinging {
                remaining: ATTACK_DURATION,
            };
        }
        if let AttackState::Swinging { remaining } = self.attack_state {
            let remaining = remaining - dt;
            self.attack_state = if remaining <= 0.0 {
                AttackState::Ready
            } else {
                AttackState::Swinging { remaining }
            };
        }
    }

    /// Add experience, applying every level-up it pays for.
    ///
    /// Returns the number of levels gained. Afterwards `xp < xp_to_level`.
    pub fn gain_xp(&mut self, amount: u32) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        let mut gained = 0;
        while self.xp >= self.xp_to_level {
            self.xp -= self.xp_to_level;
            self.level += 1;
            self.max_health = self.max_health.saturating_add(LEVEL_UP_HEALTH);
            self.health = self.health.saturating_add(LEVEL_UP_HEALTH);
            self.attack = scale_attack(self.attack);
            self.xp_to_level = next_xp_threshold(self.xp_to_level);
            gained += 1;
        }
        if gained > 0 {
            log::debug!(
                "Player reached level {} (atk {}, hp {}/{}, next at {})",
                self.level,
                self.attack,
                self.health,
                self.max_health,
                self.xp_to_level
            );
        }
        gained
    }

    /// Heal without exceeding max health
    pub fn heal(&mut self, amount: i32) {
        self.health = self.max_health.min(self.health.saturating_add(amount));
    }

    /// Fraction of health remaining, clamped to [0, 1]
    pub fn health_fraction(&self) -> f32 {
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    /// Progress toward the next level in [0, 1)
    pub fn xp_fraction(&self) -> f32 {
        self.xp as f32 / self.xp_to_level as f32
    }
}

/// Attack after a level-up: floor(attack * 1.12) + 1
fn scale_attack(attack: i32) -> i32 {
    let scaled = attack as i64 * 112 / 100 + 1;
    scaled.min(i32::MAX as i64) as i32
}

/// XP needed for the following level: floor(threshold * 1.15) + 18
fn next_xp_threshold(threshold: u32) -> u32 {
    let next = threshold as u64 * 115 / 100 + 18;
    next.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.017;

    fn grounded_player() -> Player {
        let mut p = Player::new(100.0, FLOOR_Y - PLAYER_HEIGHT);
        p.grounded = true;
        p
    }

    #[test]
    fn test_run_sets_velocity_and_facing() {
        let mut p = grounded_player();
        p.update(
            &TickInput {
                left: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(p.vel.x, -PLAYER_SPEED);
        assert_eq!(p.facing, Facing::Left);
        assert_eq!(p.movement, Movement::Running);

        p.update(&TickInput::default(), DT);
        assert_eq!(p.vel.x, 0.0);
        assert_eq!(p.movement, Movement::Idle);
        assert_eq!(p.facing, Facing::Left);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut p = grounded_player();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        p.update(&jump, DT);
        assert!(!p.grounded);
        assert!(p.vel.y < 0.0);

        let vy = p.vel.y;
        p.update(&jump, DT);
        // No second impulse, just gravity
        assert!((p.vel.y - (vy + PLAYER_GRAVITY * DT)).abs() < 1e-3);
    }

    #[test]
    fn test_dash_locks_velocity_for_duration() {
        let mut p = grounded_player();
        let input = TickInput {
            dash: true,
            left: true,
            ..Default::default()
        };
        p.update(&input, DT);
        assert!(p.is_dashing());
        assert_eq!(p.vel.x, -DASH_SPEED);

        let mut dash_frames = 1;
        // Holding the opposite direction changes nothing while dashing
        let steer = TickInput {
            dash: true,
            right: true,
            ..Default::default()
        };
        while p.is_dashing() {
            assert_eq!(p.vel.x, -DASH_SPEED);
            assert_eq!(p.facing, Facing::Left);
            p.update(&steer, DT);
            dash_frames += 1;
        }
        assert_eq!(p.vel.x, 0.0);
        // Ends on the first frame where the timer reaches zero
        assert_eq!(dash_frames, (DASH_DURATION / DT).ceil() as usize + 1);
    }

    #[test]
    fn test_dash_respects_cooldown_when_held() {
        let mut p = grounded_player();
        let held = TickInput {
            dash: true,
            ..Default::default()
        };
        let mut triggers = Vec::new();
        for frame in 0..120 {
            let was_dashing = p.is_dashing();
            p.update(&held, DT);
            if !was_dashing && p.is_dashing() {
                triggers.push(frame);
            }
        }
        assert!(triggers.len() >= 2);
        for pair in triggers.windows(2) {
            let gap = (pair[1] - pair[0]) as f32 * DT;
            assert!(gap >= DASH_COOLDOWN - 1e-4, "dash re-triggered after {gap}s");
        }
    }

    #[test]
    fn test_no_jump_while_dashing() {
        let mut p = grounded_player();
        p.update(
            &TickInput {
                dash: true,
                ..Default::default()
            },
            DT,
        );
        p.grounded = true;
        p.vel.y = 0.0;
        p.update(
            &TickInput {
                jump: true,
                ..Default::default()
            },
            DT,
        );
        assert!(p.grounded);
        assert!(p.vel.y > 0.0);
    }

    #[test]
    fn test_attack_swing_and_rearm() {
        let mut p = grounded_player();
        let attack = TickInput {
            attack: true,
            right: true,
            ..Default::default()
        };
        p.update(&attack, DT);
        assert!(p.is_attacking());
        // Attacking does not block movement
        assert_eq!(p.vel.x, PLAYER_SPEED);

        let mut frames = 1;
        while p.is_attacking() {
            p.update(&TickInput::default(), DT);
            frames += 1;
        }
        assert_eq!(frames, (ATTACK_DURATION / DT).ceil() as usize);

        p.update(&attack, DT);
        assert!(p.is_attacking());
    }

    #[test]
    fn test_gain_xp_single_level() {
        let mut p = grounded_player();
        assert_eq!(p.gain_xp(10), 0);
        assert_eq!(p.xp, 10);

        assert_eq!(p.gain_xp(30), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 8);
        assert_eq!(p.max_health, 48);
        assert_eq!(p.health, 48);
        assert_eq!(p.attack, 8); // floor(7 * 1.12) + 1
        assert_eq!(p.xp_to_level, 54); // floor(32 * 1.15) + 18
    }

    #[test]
    fn test_gain_xp_multiple_levels_in_one_call() {
        let mut p = grounded_player();
        // 32 + 54 + 80 = 166 covers three levels exactly
        assert_eq!(p.gain_xp(166), 3);
        assert_eq!(p.level, 4);
        assert_eq!(p.xp, 0);
        assert_eq!(p.xp_to_level, 110); // floor(80 * 1.15) + 18
        assert!(p.xp < p.xp_to_level);
    }

    #[test]
    fn test_gain_xp_huge_amount_terminates() {
        let mut p = grounded_player();
        p.gain_xp(u32::MAX);
        assert!(p.xp < p.xp_to_level);
        assert!(p.attack > PLAYER_START_ATTACK);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut p = grounded_player();
        p.health = 35;
        p.heal(19);
        assert_eq!(p.health, p.max_health);
        p.health = 10;
        p.heal(12);
        assert_eq!(p.health, 22);
    }

    #[test]
    fn test_falling_off_world_kills() {
        let mut p = Player::new(100.0, OFF_WORLD_Y + 1.0);
        p.update(&TickInput::default(), DT);
        assert_eq!(p.health, 0);
    }

    #[test]
    fn test_x_clamped_at_zero() {
        let mut p = Player::new(1.0, 100.0);
        p.update(
            &TickInput {
                left: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(p.pos.x, 0.0);
    }
}
