//! Entity Kinematics
//!
//! Discrete per-frame integration shared by every movable actor:
//! gravity, velocity integration, ground clamping and horizontal bounds.
//!
//! Horizontal velocity is set directly by movement intent (no ramp);
//! this module only integrates it.

use serde::{Serialize, Deserialize};

use super::rect::Rect;
use super::vec2::Vec2;

/// What holds an actor up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Support {
    /// A flat ground line at this y. Actors whose bottom passes it snap back.
    GroundLine(f32),
    /// Support comes from platform collision resolved after integration.
    /// `on_ground` is cleared before integrating so that only a landing
    /// resolved this frame can set it again.
    Platforms,
}

/// Horizontal clamping rule.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum HorizontalBounds {
    /// Keep the whole box inside `[0, width]` (fixed arena).
    Viewport { width: f32 },
    /// Only the left edge is closed; the right side is open for scrolling.
    LeftOnly,
    /// No clamping at all.
    Open,
}

/// Per-world integration parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KinematicsParams {
    /// Added to vertical velocity every airborne frame.
    pub gravity: f32,
    /// Terminal downward speed.
    pub max_fall_speed: f32,
    pub support: Support,
    pub bounds: HorizontalBounds,
}

/// Position, velocity and box of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in world space
    pub position: Vec2,
    pub velocity: Vec2,
    /// Box width/height
    pub size: Vec2,
    /// +1 facing right, -1 facing left
    pub facing: i8,
    pub on_ground: bool,
}

impl Body {
    /// Create a resting body facing right.
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            facing: 1,
            on_ground: false,
        }
    }

    /// Bounding box in world space.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Set horizontal velocity from a movement intent in {-1, 0, +1}.
    ///
    /// A non-zero intent also turns the body to face that way.
    pub fn set_move_intent(&mut self, direction: i8, speed: f32) {
        if direction == 0 {
            self.velocity.x = 0.0;
        } else {
            let dir = direction.signum();
            self.velocity.x = f32::from(dir) * speed;
            self.facing = dir;
        }
    }

    /// Start a jump if standing on something. Returns whether it happened.
    pub fn try_jump(&mut self, jump_velocity: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.velocity.y = jump_velocity;
        self.on_ground = false;
        true
    }

    /// Snap the bottom edge onto a surface at `surface_y` and stop falling.
    #[inline]
    pub fn land_on(&mut self, surface_y: f32) {
        self.position.y = surface_y - self.size.y;
        self.velocity.y = 0.0;
        self.on_ground = true;
    }
}

/// Advance a body one frame.
///
/// Only position, velocity and `on_ground` are touched.
pub fn integrate(body: &mut Body, params: &KinematicsParams) {
    if params.support == Support::Platforms {
        body.on_ground = false;
    }

    if !body.on_ground {
        body.velocity.y = (body.velocity.y + params.gravity).min(params.max_fall_speed);
    }

    body.position = body.position + body.velocity;

    if let Support::GroundLine(ground_y) = params.support {
        if body.bottom() >= ground_y {
            body.land_on(ground_y);
        }
    }

    clamp_horizontal(body, params.bounds);
}

/// Apply a horizontal clamping rule.
pub fn clamp_horizontal(body: &mut Body, bounds: HorizontalBounds) {
    match bounds {
        HorizontalBounds::Viewport { width } => {
            let max_x = (width - body.size.x).max(0.0);
            body.position.x = body.position.x.clamp(0.0, max_x);
        }
        HorizontalBounds::LeftOnly => {
            if body.position.x < 0.0 {
                body.position.x = 0.0;
            }
        }
        HorizontalBounds::Open => {}
    }
}
