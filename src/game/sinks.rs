//! Sound Output
//!
//! The simulation only names the cue it wants; a backend plays it.
//! Backend failures are logged and swallowed so they can never stall or
//! alter a frame.

use tracing::{debug, warn};

use super::events::{GameEvent, SoundEffect};

/// Sound backend errors.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The audio device is gone or never opened.
    #[error("audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The backend has no sample for this cue.
    #[error("no sample loaded for `{0}`")]
    MissingSample(&'static str),
}

/// Something that can play a sound cue.
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect) -> Result<(), SinkError>;
}

/// Play a cue, logging and dropping any failure.
pub fn play_best_effort<S: SoundSink + ?Sized>(sink: &mut S, effect: SoundEffect) {
    if let Err(e) = sink.play(effect) {
        warn!(sound = effect.name(), error = %e, "sound playback failed");
    }
}

/// Play the cue of every event that has one, in order.
pub fn dispatch_sounds<S: SoundSink + ?Sized>(sink: &mut S, events: &[GameEvent]) {
    for effect in events.iter().filter_map(GameEvent::sound) {
        play_best_effort(sink, effect);
    }
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _effect: SoundEffect) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes each cue to the debug log (headless runs).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, effect: SoundEffect) -> Result<(), SinkError> {
        debug!(sound = effect.name(), "play");
        Ok(())
    }
}

/// Keeps every cue it was asked to play.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub played: Vec<SoundEffect>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `effect` was played.
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|e| **e == effect).count()
    }
}

impl SoundSink for RecordingSink {
    fn play(&mut self, effect: SoundEffect) -> Result<(), SinkError> {
        self.played.push(effect);
        Ok(())
    }
}
