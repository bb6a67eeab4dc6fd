//! Input Snapshots and Recordings
//!
//! Input is sampled once per frame into an immutable snapshot of held
//! actions. Every system reads the same snapshot during a frame.
//!
//! Recordings store only the frames where the held set changed and can
//! be replayed tick by tick.

use serde::{Serialize, Deserialize};

use crate::core::hash::{StateHash, StateHasher};

// =============================================================================
// ACTIONS
// =============================================================================

/// Logical actions, independent of physical keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    MoveLeft = 0,
    MoveRight = 1,
    /// Menu up
    Up = 2,
    /// Menu down
    Down = 3,
    Jump = 4,
    Punch = 5,
    Kick = 6,
    Special = 7,
    Block = 8,
    Confirm = 9,
    Cancel = 10,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Up,
        Action::Down,
        Action::Jump,
        Action::Punch,
        Action::Kick,
        Action::Special,
        Action::Block,
        Action::Confirm,
        Action::Cancel,
    ];

    #[inline]
    const fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

// =============================================================================
// INPUT FRAME
// =============================================================================

/// Held actions for one player in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFrame {
    held: u16,
}

impl InputFrame {
    /// Nothing held.
    pub const IDLE: Self = Self { held: 0 };

    /// Create a frame holding exactly `actions`.
    pub fn from_actions(actions: &[Action]) -> Self {
        let mut frame = Self::IDLE;
        for action in actions {
            frame.set(*action, true);
        }
        frame
    }

    /// Raw bitset.
    #[inline]
    pub fn bits(&self) -> u16 {
        self.held
    }

    #[inline]
    pub fn is_held(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }

    #[inline]
    pub fn set(&mut self, action: Action, held: bool) {
        if held {
            self.held |= action.bit();
        } else {
            self.held &= !action.bit();
        }
    }

    /// Builder-style [`set`](Self::set).
    #[inline]
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.held == 0
    }

    /// Horizontal intent: -1, 0 or +1.
    ///
    /// Holding both directions cancels out.
    #[inline]
    pub fn move_direction(&self) -> i8 {
        let left = self.is_held(Action::MoveLeft) as i8;
        let right = self.is_held(Action::MoveRight) as i8;
        right - left
    }

    /// Actions held now but not in `previous`.
    #[inline]
    pub fn pressed_since(&self, previous: &InputFrame) -> InputFrame {
        InputFrame { held: self.held & !previous.held }
    }
}

/// Held and just-pressed actions for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub held: InputFrame,
    pub pressed: InputFrame,
}

impl InputSnapshot {
    /// Build the snapshot for `current`, given last frame's held set.
    pub fn from_frames(previous: InputFrame, current: InputFrame) -> Self {
        Self {
            held: current,
            pressed: current.pressed_since(&previous),
        }
    }

    #[inline]
    pub fn is_held(&self, action: Action) -> bool {
        self.held.is_held(action)
    }

    #[inline]
    pub fn just_pressed(&self, action: Action) -> bool {
        self.pressed.is_held(action)
    }
}

/// Turns a stream of held frames into snapshots.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputSampler {
    previous: InputFrame,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot for this frame's held input.
    pub fn sample(&mut self, current: InputFrame) -> InputSnapshot {
        let snapshot = InputSnapshot::from_frames(self.previous, current);
        self.previous = current;
        snapshot
    }
}

// =============================================================================
// RECORDING
// =============================================================================

/// Recording encode/decode errors.
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error("failed to encode input recording: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode input recording: {0}")]
    Decode(#[source] bincode::Error),

    /// Deltas must start inside the recording and be strictly increasing.
    #[error("corrupt input recording: delta at frame {frame} out of order")]
    OutOfOrder { frame: u32 },
}

/// Input state beginning at a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    pub frame: u32,
    pub input: InputFrame,
}

/// One player's input for a whole session.
///
/// Only frames where the input changed are stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecording {
    /// Number of frames recorded
    frame_count: u32,

    /// Delta-compressed input data
    deltas: Vec<InputDelta>,

    /// Last recorded input (for delta comparison)
    #[serde(skip)]
    last: InputFrame,
}

impl InputRecording {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            deltas: Vec::with_capacity(256),
            last: InputFrame::IDLE,
        }
    }

    /// Record the next frame's input.
    pub fn record(&mut self, input: InputFrame) {
        if input != self.last {
            self.deltas.push(InputDelta { frame: self.frame_count, input });
            self.last = input;
        }
        self.frame_count += 1;
    }

    /// Input held at `frame`.
    ///
    /// Frames past the end repeat the last input.
    pub fn input_at(&self, frame: u32) -> InputFrame {
        let idx = self.deltas.partition_point(|d| d.frame <= frame);
        if idx == 0 {
            InputFrame::IDLE
        } else {
            self.deltas[idx - 1].input
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Iterate every recorded frame in order.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            frame: 0,
            delta_idx: 0,
            current: InputFrame::IDLE,
        }
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordingError> {
        bincode::serialize(self).map_err(RecordingError::Encode)
    }

    /// Decode and validate a recording.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordingError> {
        let mut recording: Self = bincode::deserialize(bytes).map_err(RecordingError::Decode)?;

        let mut next_allowed = 0u32;
        for delta in &recording.deltas {
            if delta.frame < next_allowed || delta.frame >= recording.frame_count {
                return Err(RecordingError::OutOfOrder { frame: delta.frame });
            }
            next_allowed = delta.frame + 1;
        }

        recording.last = recording.deltas.last().map_or(InputFrame::IDLE, |d| d.input);
        Ok(recording)
    }

    /// Digest of the recorded stream.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_inputs();
        hasher.update_u32(self.frame_count);
        for delta in &self.deltas {
            hasher.update_u32(delta.frame);
            hasher.update_bytes(&delta.input.bits().to_le_bytes());
        }
        hasher.finalize()
    }
}

/// Iterator for replaying inputs frame by frame.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    frame: u32,
    delta_idx: usize,
    current: InputFrame,
}

impl<'a> Iterator for ReplayIterator<'a> {
    type Item = (u32, InputFrame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.recording.frame_count {
            return None;
        }

        while let Some(delta) = self.recording.deltas.get(self.delta_idx) {
            if delta.frame <= self.frame {
                self.current = delta.input;
                self.delta_idx += 1;
            } else {
                break;
            }
        }

        let item = (self.frame, self.current);
        self.frame += 1;
        Some(item)
    }
}

// =============================================================================
// TESTS
// =============================================================================
