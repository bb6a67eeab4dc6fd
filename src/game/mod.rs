//! Shared Game Plumbing
//!
//! Everything both games use that is not physics.
//!
//! ## Module Structure
//!
//! - `input`: Action flags, per-frame snapshots, recordings
//! - `events`: Game events and their sound cues
//! - `sinks`: Sound output boundary
//! - `camera`: Scrolling viewport, parallax and culling
//! - `shell`: Menus and the screen state machine

pub mod camera;
pub mod events;
pub mod input;
pub mod shell;
pub mod sinks;

// Re-export key types
pub use camera::{Camera, CameraConfig};
pub use events::{GameEvent, GameEventData, SoundEffect};
pub use input::{Action, InputFrame, InputRecording, InputSampler, InputSnapshot};
pub use shell::{GameChoice, Screen, SessionOutcome, Shell};
pub use sinks::{SoundSink, LogSink, NullSink};
