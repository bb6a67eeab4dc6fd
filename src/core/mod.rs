//! Core simulation primitives.
//!
//! Geometry, frame timers, shared kinematics, the deterministic RNG and
//! state hashing. Both games build on these.

pub mod vec2;
pub mod rect;
pub mod timer;
pub mod kinematics;
pub mod rng;
pub mod hash;

// Re-export core types
pub use vec2::Vec2;
pub use rect::Rect;
pub use timer::FrameTimer;
pub use kinematics::{Body, HorizontalBounds, KinematicsParams, Support, integrate};
pub use rng::DeterministicRng;
pub use hash::{StateHash, StateHasher, compute_state_hash};
