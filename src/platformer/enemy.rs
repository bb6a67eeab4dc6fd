//! Enemies
//!
//! Walkers (Goomba, Koopa) fall under gravity, land on platforms and turn
//! at the level edges. Flyers ignore gravity and bob around their spawn
//! height inside a narrower horizontal band.

use serde::{Serialize, Deserialize};

use crate::config::PlatformerConfig;
use crate::core::hash::StateHasher;
use crate::core::kinematics::{integrate, Body, HorizontalBounds, KinematicsParams, Support};
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;

/// Enemies left of this x are gone.
pub const CULL_LEFT_X: f32 = -50.0;

/// Enemy variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EnemyKind {
    Goomba = 0,
    Koopa = 1,
    Flying = 2,
}

impl EnemyKind {
    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Goomba => "goomba",
            EnemyKind::Koopa => "koopa",
            EnemyKind::Flying => "flying",
        }
    }

    #[inline]
    pub fn is_flying(self) -> bool {
        self == EnemyKind::Flying
    }
}

/// Horizontal speed per variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySpeeds {
    pub goomba: f32,
    pub koopa: f32,
    pub flying: f32,
}

impl Default for EnemySpeeds {
    fn default() -> Self {
        Self {
            goomba: 2.0,
            koopa: 3.0,
            flying: 4.0,
        }
    }
}

impl EnemySpeeds {
    #[inline]
    pub fn get(&self, kind: EnemyKind) -> f32 {
        match kind {
            EnemyKind::Goomba => self.goomba,
            EnemyKind::Koopa => self.koopa,
            EnemyKind::Flying => self.flying,
        }
    }
}

/// Where an enemy starts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    /// +1 walks right, -1 walks left
    pub direction: i8,
    pub kind: EnemyKind,
}

impl EnemySpawn {
    pub const fn new(x: f32, y: f32, direction: i8, kind: EnemyKind) -> Self {
        Self { x, y, direction, kind }
    }
}

/// A live enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Body,
    /// Flyers only: height the bob oscillates around
    pub base_y: f32,
    /// Flyers only: bob phase in radians
    pub bob_phase: f32,
}

impl Enemy {
    pub fn spawn(spawn: &EnemySpawn, config: &PlatformerConfig) -> Self {
        let mut body = Body::new(Vec2::new(spawn.x, spawn.y), config.enemy_size);
        let direction = spawn.direction.signum();
        body.facing = if direction == 0 { 1 } else { direction };
        body.velocity.x = f32::from(body.facing) * config.enemy_speeds.get(spawn.kind);

        Self {
            kind: spawn.kind,
            body,
            base_y: spawn.y,
            bob_phase: 0.0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    /// Move one frame.
    pub fn update(&mut self, config: &PlatformerConfig) {
        if self.kind.is_flying() {
            self.bob_phase += config.flying_bob_rate;
            self.body.position.x += self.body.velocity.x;
            self.body.position.y = self.base_y + config.flying_bob_amplitude * self.bob_phase.sin();
        } else {
            integrate(&mut self.body, &walker_params(config));
        }
    }

    /// Reverse direction at the edges of this variant's band.
    pub fn turn_at_bounds(&mut self, config: &PlatformerConfig) {
        let right = if self.kind.is_flying() {
            config.level_width - config.flying_turn_margin
        } else {
            config.level_width
        };

        let x = self.body.position.x;
        if x < 0.0 || x > right {
            self.body.velocity.x = -self.body.velocity.x;
            self.body.facing = -self.body.facing;
        }
    }

    /// Whether the enemy has left the world for good.
    pub fn is_out_of_world(&self, config: &PlatformerConfig, world_height: f32) -> bool {
        let x = self.body.position.x;
        x < CULL_LEFT_X
            || x > config.level_width + config.enemy_cull_margin
            || self.body.position.y > world_height
    }

    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.kind as u8);
        hasher.update_vec2(self.body.position);
        hasher.update_vec2(self.body.velocity);
        hasher.update_bool(self.body.on_ground);
        hasher.update_f32(self.bob_phase);
    }
}

/// Kinematics for anything that walks on platforms.
pub fn walker_params(config: &PlatformerConfig) -> KinematicsParams {
    KinematicsParams {
        gravity: config.gravity,
        max_fall_speed: config.max_fall_speed,
        support: Support::Platforms,
        bounds: HorizontalBounds::Open,
    }
}
