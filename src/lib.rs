//! # Arcade Collection
//!
//! Per-frame simulation core for a two-game arcade collection: a
//! one-on-one fighting game and a side-scrolling platformer behind a
//! shared menu shell.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ARCADE COLLECTION                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Shared primitives                         │
//! │  ├── rect.rs     - Axis-aligned boxes                        │
//! │  ├── timer.rs    - Frame countdown timers                    │
//! │  ├── kinematics.rs - Gravity, ground snap, bounds            │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │  └── hash.rs     - State hashing for replay checks           │
//! │                                                              │
//! │  fight/          - Fighting game                             │
//! │  ├── character.rs- Roster and fighter state                  │
//! │  ├── combat.rs   - Hit resolution                            │
//! │  └── tick.rs     - Per-frame fight loop                      │
//! │                                                              │
//! │  platformer/     - Platformer                                │
//! │  ├── collision.rs- One-way platforms, stomps, pickups        │
//! │  └── tick.rs     - Per-frame level loop                      │
//! │                                                              │
//! │  game/           - Input, events, sound, camera, shell       │
//! │  persistence/    - High score files                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! A fight is a pure function of (config, roster picks, seed, inputs) and
//! a level of (config, layout, inputs). Rendering, sound and score files
//! sit outside the simulation and can never change its result.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod fight;
pub mod game;
pub mod persistence;
pub mod platformer;

// Re-export commonly used types
pub use config::{ArcadeConfig, ConfigError};
pub use core::{Rect, Vec2, FrameTimer, DeterministicRng};
pub use fight::{Fight, Roster, Side};
pub use game::{Action, GameEvent, InputFrame, InputSnapshot, Shell, SoundEffect};
pub use persistence::{HighScoreTable, ScoreStore};
pub use platformer::Level;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
