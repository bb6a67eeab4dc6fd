//! Platformer Player
//!
//! Body, lives, score and the three independent power timers.

use serde::{Serialize, Deserialize};

use crate::config::PlatformerConfig;
use crate::core::hash::StateHasher;
use crate::core::kinematics::{integrate, Body, HorizontalBounds, KinematicsParams, Support};
use crate::core::rect::Rect;
use crate::core::timer::FrameTimer;
use crate::core::vec2::Vec2;
use crate::game::input::{Action, InputFrame};

use super::world::PowerUpKind;

/// Power status shown on the HUD. Growth wins over invincibility, which
/// wins over shield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerStatus {
    None,
    Mushroom,
    Star,
    Shield,
}

/// Result of touching something harmful.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HurtOutcome {
    /// Invincible; nothing happened
    Ignored,
    /// The shield took the hit and is gone
    Absorbed,
    /// A life was lost
    LifeLost,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Bottom edge before this frame's movement (for landing and stomps)
    pub prev_bottom: f32,
    pub lives: u32,
    pub score: u32,
    pub coins: u32,
    pub invincible: FrameTimer,
    /// Growth from a mushroom
    pub powered: FrameTimer,
    pub shield: FrameTimer,
}

impl Player {
    /// A fresh player standing on the ground at `x`.
    pub fn new(x: f32, config: &PlatformerConfig) -> Self {
        let body = Body::new(Vec2::new(x, config.ground_y - config.player_size.y), config.player_size);
        Self {
            prev_bottom: body.bottom(),
            body,
            lives: config.starting_lives,
            score: 0,
            coins: 0,
            invincible: FrameTimer::IDLE,
            powered: FrameTimer::IDLE,
            shield: FrameTimer::IDLE,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    #[inline]
    pub fn is_powered(&self) -> bool {
        self.powered.is_active()
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible.is_active()
    }

    #[inline]
    pub fn has_shield(&self) -> bool {
        self.shield.is_active()
    }

    pub fn power_status(&self) -> PowerStatus {
        if self.is_powered() {
            PowerStatus::Mushroom
        } else if self.is_invincible() {
            PowerStatus::Star
        } else if self.has_shield() {
            PowerStatus::Shield
        } else {
            PowerStatus::None
        }
    }

    /// Apply held input. Returns whether a jump started.
    pub fn apply_input(&mut self, input: &InputFrame, config: &PlatformerConfig) -> bool {
        self.body.set_move_intent(input.move_direction(), config.player_speed);
        if input.is_held(Action::Jump) || input.is_held(Action::Up) {
            self.body.try_jump(config.jump_velocity)
        } else {
            false
        }
    }

    pub fn tick_timers(&mut self) {
        self.invincible.tick();
        self.powered.tick();
        self.shield.tick();
    }

    /// Move one frame. The player may leave the right edge of the screen
    /// (the camera follows) but never the left edge of the level.
    pub fn update(&mut self, config: &PlatformerConfig) {
        self.prev_bottom = self.body.bottom();
        integrate(&mut self.body, &player_params(config));
    }

    /// Lose a life unless protected.
    ///
    /// Invincibility ignores the hit. Otherwise, when `shieldable`, an
    /// active shield is consumed in place of the life. Either way the
    /// damage invincibility window starts.
    pub fn hurt(&mut self, shieldable: bool, config: &PlatformerConfig) -> HurtOutcome {
        if self.is_invincible() {
            return HurtOutcome::Ignored;
        }
        self.invincible.start(config.damage_invincibility);
        if shieldable && self.has_shield() {
            self.shield.clear();
            return HurtOutcome::Absorbed;
        }
        self.lives = self.lives.saturating_sub(1);
        HurtOutcome::LifeLost
    }

    /// Apply a collected power-up. Returns the score awarded.
    pub fn apply_powerup(&mut self, kind: PowerUpKind, config: &PlatformerConfig) -> u32 {
        let bonus = match kind {
            PowerUpKind::Mushroom => {
                self.powered.start(config.powerup_duration);
                config.scores.mushroom
            }
            PowerUpKind::Star => {
                self.invincible.start(config.powerup_duration);
                config.scores.star
            }
            PowerUpKind::Shield => {
                self.shield.start(config.powerup_duration);
                config.scores.shield
            }
        };
        self.score += bonus;
        bonus
    }

    /// Bounce off a stomped enemy.
    pub fn stomp(&mut self, config: &PlatformerConfig) -> u32 {
        self.body.velocity.y = config.stomp_bounce;
        self.body.on_ground = false;
        self.score += config.scores.stomp;
        config.scores.stomp
    }

    pub fn collect_coin(&mut self, config: &PlatformerConfig) {
        self.coins += 1;
        self.score += config.scores.coin;
    }

    /// Back to the ground line at `x`, at rest. Growth is lost.
    pub fn respawn(&mut self, x: f32, config: &PlatformerConfig) {
        self.body.position = Vec2::new(x, config.ground_y - self.body.size.y);
        self.body.velocity = Vec2::ZERO;
        self.body.on_ground = false;
        self.prev_bottom = self.body.bottom();
        self.powered.clear();
    }

    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_vec2(self.body.position);
        hasher.update_vec2(self.body.velocity);
        hasher.update_u8(self.body.facing as u8);
        hasher.update_bool(self.body.on_ground);
        hasher.update_u32(self.lives);
        hasher.update_u32(self.score);
        hasher.update_u32(self.coins);
        hasher.update_timer(self.invincible);
        hasher.update_timer(self.powered);
        hasher.update_timer(self.shield);
    }
}

fn player_params(config: &PlatformerConfig) -> KinematicsParams {
    KinematicsParams {
        gravity: config.gravity,
        max_fall_speed: config.max_fall_speed,
        support: Support::Platforms,
        bounds: HorizontalBounds::LeftOnly,
    }
}
