//! Fighting Game
//!
//! One-on-one fights between two roster picks in a fixed arena.
//!
//! ## Module Structure
//!
//! - `attack`: Attack table, hitboxes, damage formula
//! - `character`: Roster stats and the per-fighter state machine
//! - `combat`: Hit resolution and body separation
//! - `particle`: Hit spark bursts
//! - `tick`: One frame of a fight, and replay

pub mod attack;
pub mod character;
pub mod combat;
pub mod particle;
pub mod tick;

pub use attack::{AttackKind, AttackSpec, AttackTable};
pub use character::{Fighter, FighterReport, Roster, Side};
pub use tick::{Fight, FightPhase, FightTickResult};
