//! Hit Particles
//!
//! Decorative sparks thrown out when an attack lands. They never touch
//! fighters; they only fall and expire.

use serde::{Serialize, Deserialize};

use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;

/// Burst tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles per hit
    pub count: u32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Frames each particle lives
    pub lifetime: u32,
    pub gravity: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 8,
            min_speed: 2.0,
            max_speed: 5.0,
            lifetime: 20,
            gravity: 0.3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub lifetime: u32,
    pub max_lifetime: u32,
}

impl Particle {
    /// Move one frame. Returns `false` once the particle has expired.
    pub fn update(&mut self, gravity: f32) -> bool {
        self.position = self.position + self.velocity;
        self.velocity.y += gravity;
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime > 0
    }

    /// Remaining life in [0, 1], for fading.
    pub fn alpha(&self) -> f32 {
        if self.max_lifetime == 0 {
            0.0
        } else {
            self.lifetime as f32 / self.max_lifetime as f32
        }
    }
}

/// Spawn a burst at `origin` with random directions and speeds.
pub fn spawn_burst(rng: &mut DeterministicRng, origin: Vec2, config: &ParticleConfig, out: &mut Vec<Particle>) {
    out.reserve(config.count as usize);
    for _ in 0..config.count {
        let angle = rng.next_f32_range(0.0, 360.0);
        let speed = rng.next_f32_range(config.min_speed, config.max_speed);
        out.push(Particle {
            position: origin,
            velocity: Vec2::from_angle_degrees(angle).scale(speed),
            lifetime: config.lifetime,
            max_lifetime: config.lifetime,
        });
    }
}

/// Advance every particle and drop the expired ones.
pub fn update_particles(particles: &mut Vec<Particle>, gravity: f32) {
    particles.retain_mut(|p| p.update(gravity));
}
