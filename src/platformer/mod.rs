//! Platformer
//!
//! Side-scrolling level with one-way platforms, enemies, coins, power-ups
//! and checkpoints.
//!
//! ## Module Structure
//!
//! - `player`: Player actor, lives, score and power timers
//! - `enemy`: Enemy variants and their movement
//! - `world`: Platforms, pickups, checkpoints and the built-in layout
//! - `collision`: Landing, contact and pickup detection
//! - `tick`: One frame of a level, and replay

pub mod collision;
pub mod enemy;
pub mod player;
pub mod tick;
pub mod world;

pub use enemy::{Enemy, EnemyKind};
pub use player::{Player, PowerStatus};
pub use tick::{Level, LevelPhase, LevelTickResult, ScoreReport};
pub use world::{LevelLayout, PlatformKind, PowerUpKind};
