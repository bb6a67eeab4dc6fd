//! Game Events
//!
//! Everything observable that happened during a frame, in the order it
//! happened. Sound cues, HUD flashes and logs are all driven from this
//! stream; the simulation itself never reads it back.

use serde::{Serialize, Deserialize};

use crate::fight::attack::AttackKind;
use crate::fight::character::Side;
use crate::platformer::enemy::EnemyKind;
use crate::platformer::world::PowerUpKind;

/// Priority for event processing order.
///
/// Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Match or level outcome
    Terminal = 0,
    /// Hits, stomps, lost lives
    Damage = 1,
    /// Coins, power-ups, checkpoints
    Pickup = 2,
    /// Jumps, attack wind-ups, respawns
    Movement = 3,
    Other = 255,
}

/// Sound cues the simulation can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    Jump,
    Coin,
    PowerUp,
    Hit,
    Victory,
}

impl SoundEffect {
    /// Name used by sound backends.
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Coin => "coin",
            SoundEffect::PowerUp => "powerup",
            SoundEffect::Hit => "hit",
            SoundEffect::Victory => "victory",
        }
    }
}

/// Who jumped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Jumper {
    Fighter(Side),
    Player,
}

/// What cost the platformer player a life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HurtCause {
    Enemy(EnemyKind),
    Spike,
    Fall,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    Jumped {
        jumper: Jumper,
    },

    /// A fighter started an attack
    AttackStarted {
        side: Side,
        attack: AttackKind,
    },

    /// A fighter's attack connected
    AttackHit {
        attacker: Side,
        victim: Side,
        attack: AttackKind,
        /// `None` when the victim was still in hit-stun
        damage: Option<u32>,
        blocked: bool,
    },

    FightEnded {
        winner: Side,
    },

    CoinCollected {
        coins: u32,
        score: u32,
    },

    PowerUpCollected {
        kind: PowerUpKind,
        score: u32,
    },

    EnemyStomped {
        kind: EnemyKind,
        score: u32,
    },

    /// Player lost a life
    PlayerHurt {
        cause: HurtCause,
        lives_left: u32,
    },

    /// An active shield absorbed an enemy hit
    ShieldAbsorbed {
        kind: EnemyKind,
    },

    CheckpointReached {
        x: f32,
    },

    Respawned {
        x: f32,
    },

    LevelWon {
        score: u32,
    },

    LevelLost {
        score: u32,
    },
}

/// A game event with timing and priority.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame when event occurred
    pub frame: u32,

    /// Processing priority
    pub priority: EventPriority,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(frame: u32, priority: EventPriority, data: GameEventData) -> Self {
        Self { frame, priority, data }
    }

    pub fn jumped(frame: u32, jumper: Jumper) -> Self {
        Self::new(frame, EventPriority::Movement, GameEventData::Jumped { jumper })
    }

    pub fn attack_started(frame: u32, side: Side, attack: AttackKind) -> Self {
        Self::new(frame, EventPriority::Movement, GameEventData::AttackStarted { side, attack })
    }

    pub fn attack_hit(
        frame: u32,
        attacker: Side,
        attack: AttackKind,
        damage: Option<u32>,
        blocked: bool,
    ) -> Self {
        Self::new(
            frame,
            EventPriority::Damage,
            GameEventData::AttackHit {
                attacker,
                victim: attacker.opponent(),
                attack,
                damage,
                blocked,
            },
        )
    }

    pub fn fight_ended(frame: u32, winner: Side) -> Self {
        Self::new(frame, EventPriority::Terminal, GameEventData::FightEnded { winner })
    }

    pub fn coin_collected(frame: u32, coins: u32, score: u32) -> Self {
        Self::new(frame, EventPriority::Pickup, GameEventData::CoinCollected { coins, score })
    }

    pub fn powerup_collected(frame: u32, kind: PowerUpKind, score: u32) -> Self {
        Self::new(frame, EventPriority::Pickup, GameEventData::PowerUpCollected { kind, score })
    }

    pub fn enemy_stomped(frame: u32, kind: EnemyKind, score: u32) -> Self {
        Self::new(frame, EventPriority::Damage, GameEventData::EnemyStomped { kind, score })
    }

    pub fn player_hurt(frame: u32, cause: HurtCause, lives_left: u32) -> Self {
        Self::new(frame, EventPriority::Damage, GameEventData::PlayerHurt { cause, lives_left })
    }

    pub fn shield_absorbed(frame: u32, kind: EnemyKind) -> Self {
        Self::new(frame, EventPriority::Damage, GameEventData::ShieldAbsorbed { kind })
    }

    pub fn checkpoint_reached(frame: u32, x: f32) -> Self {
        Self::new(frame, EventPriority::Pickup, GameEventData::CheckpointReached { x })
    }

    pub fn respawned(frame: u32, x: f32) -> Self {
        Self::new(frame, EventPriority::Movement, GameEventData::Respawned { x })
    }

    pub fn level_won(frame: u32, score: u32) -> Self {
        Self::new(frame, EventPriority::Terminal, GameEventData::LevelWon { score })
    }

    pub fn level_lost(frame: u32, score: u32) -> Self {
        Self::new(frame, EventPriority::Terminal, GameEventData::LevelLost { score })
    }

    /// Sound cue for this event, if it has one.
    pub fn sound(&self) -> Option<SoundEffect> {
        match &self.data {
            GameEventData::Jumped { .. } => Some(SoundEffect::Jump),
            GameEventData::AttackHit { .. }
            | GameEventData::EnemyStomped { .. }
            | GameEventData::PlayerHurt { .. } => Some(SoundEffect::Hit),
            GameEventData::CoinCollected { .. } => Some(SoundEffect::Coin),
            GameEventData::PowerUpCollected { .. } => Some(SoundEffect::PowerUp),
            GameEventData::LevelWon { .. } => Some(SoundEffect::Victory),
            _ => None,
        }
    }
}

impl PartialEq for GameEvent {
    fn eq(&self, other: &Self) -> bool {
        self.frame == other.frame
            && self.priority == other.priority
            && self.data == other.data
    }
}

impl PartialOrd for GameEvent {
    /// Frame, then priority. Events sharing both keys but carrying
    /// different data are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match self
            .frame
            .cmp(&other.frame)
            .then(self.priority.cmp(&other.priority))
        {
            std::cmp::Ordering::Equal if self.data != other.data => None,
            ordering => Some(ordering),
        }
    }
}
