//! State Hashing
//!
//! SHA-256 digests of simulation state. Two runs fed the same recorded
//! inputs must produce the same digest every frame; replay checks and
//! the determinism tests compare these.

use sha2::{Sha256, Digest};

use super::rect::Rect;
use super::timer::FrameTimer;
use super::vec2::Vec2;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for game state.
///
/// Order of updates is significant.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Hasher for a fight in progress.
    pub fn for_fight() -> Self {
        Self::new(b"ARCADE_FIGHT_STATE_V1")
    }

    /// Hasher for a platformer level in progress.
    pub fn for_level() -> Self {
        Self::new(b"ARCADE_LEVEL_STATE_V1")
    }

    /// Hasher for a recorded input stream.
    pub fn for_inputs() -> Self {
        Self::new(b"ARCADE_INPUTS_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an `f32` by its exact bit pattern.
    #[inline]
    pub fn update_f32(&mut self, value: f32) {
        self.hasher.update(value.to_bits().to_le_bytes());
    }

    #[inline]
    pub fn update_vec2(&mut self, value: Vec2) {
        self.update_f32(value.x);
        self.update_f32(value.y);
    }

    #[inline]
    pub fn update_rect(&mut self, rect: &Rect) {
        self.update_f32(rect.x);
        self.update_f32(rect.y);
        self.update_f32(rect.w);
        self.update_f32(rect.h);
    }

    #[inline]
    pub fn update_timer(&mut self, timer: FrameTimer) {
        self.update_u32(timer.remaining());
    }

    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute a per-frame state hash.
///
/// `frame` and `seed` are always hashed first; the closure appends the
/// game-specific state.
pub fn compute_state_hash<F>(mut hasher: StateHasher, frame: u32, seed: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    hasher.update_u32(frame);
    hasher.update_u64(seed);

    add_state(&mut hasher);

    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
