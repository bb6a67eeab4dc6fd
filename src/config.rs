//! Configuration
//!
//! Every tunable constant of both games in one serde-friendly tree.
//! [`ArcadeConfig::default`] reproduces the stock game; a JSON file may
//! override any subset of fields.

use std::path::Path;

use serde::{Serialize, Deserialize};
use tracing::info;

use crate::core::vec2::Vec2;
use crate::fight::attack::AttackTable;
use crate::fight::character::RosterTable;
use crate::fight::particle::ParticleConfig;
use crate::game::camera::CameraConfig;
use crate::platformer::enemy::EnemySpeeds;

/// Kyo's take-off velocity; the rest of the roster is relative to it.
pub const DEFAULT_BASE_JUMP: f32 = -15.0;

/// Environment variable naming an optional config file.
pub const CONFIG_ENV_VAR: &str = "ARCADE_CONFIG";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub screen: ScreenConfig,
    pub fight: FightConfig,
    pub platformer: PlatformerConfig,
    pub camera: CameraConfig,
    pub shell: ShellConfig,
}

/// Window and frame clock.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
    pub fps: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            fps: crate::TICK_RATE,
        }
    }
}

impl ScreenConfig {
    /// Whole frames in `seconds` of play at the configured rate.
    #[inline]
    pub fn frames_for(&self, seconds: u32) -> u32 {
        seconds.saturating_mul(self.fps)
    }
}

/// Fighting game tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FightConfig {
    /// Fighters stand with their feet on this line
    pub ground_y: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub fighter_size: Vec2,
    pub p1_spawn_x: f32,
    /// P2 spawns this far left of the right screen edge
    pub p2_spawn_inset: f32,
    pub max_energy: f32,
    /// Energy gained per idle frame
    pub energy_regen: f32,
    /// Fraction of damage a blocking fighter still takes
    pub block_reduction: f32,
    /// Frames a combo stays open after each attack
    pub combo_window: u32,
    pub hit_stun: u32,
    pub knockback_decay: f32,
    /// Knockback below this is zeroed
    pub knockback_cutoff: f32,
    pub roster: RosterTable,
    pub attacks: AttackTable,
    pub particles: ParticleConfig,
}

impl Default for FightConfig {
    fn default() -> Self {
        Self {
            ground_y: 650.0,
            gravity: 0.8,
            max_fall_speed: 15.0,
            fighter_size: Vec2::new(50.0, 100.0),
            p1_spawn_x: 200.0,
            p2_spawn_inset: 250.0,
            max_energy: 100.0,
            energy_regen: 0.5,
            block_reduction: 0.3,
            combo_window: 30,
            hit_stun: 10,
            knockback_decay: 0.9,
            knockback_cutoff: 0.1,
            roster: RosterTable::default(),
            attacks: AttackTable::default(),
            particles: ParticleConfig::default(),
        }
    }
}

/// Points awarded in the platformer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBonuses {
    pub coin: u32,
    pub stomp: u32,
    pub mushroom: u32,
    pub star: u32,
    pub shield: u32,
}

impl Default for ScoreBonuses {
    fn default() -> Self {
        Self {
            coin: 100,
            stomp: 200,
            mushroom: 500,
            star: 1000,
            shield: 250,
        }
    }
}

/// Platformer tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Top of the ground strip
    pub ground_y: f32,
    pub player_size: Vec2,
    pub player_speed: f32,
    pub jump_velocity: f32,
    pub starting_lives: u32,
    pub level_width: f32,
    /// Coins needed to win
    pub coin_target: u32,
    /// Invincibility after losing a life
    pub damage_invincibility: u32,
    /// Mushroom, star and shield duration
    pub powerup_duration: u32,
    pub stomp_bounce: f32,
    /// Respawn x when no checkpoint has been reached
    pub respawn_x: f32,
    pub enemy_size: Vec2,
    pub enemy_speeds: EnemySpeeds,
    /// Flying enemies turn this far short of the right edge
    pub flying_turn_margin: f32,
    pub flying_bob_amplitude: f32,
    pub flying_bob_rate: f32,
    /// Enemies further than this past the right edge are culled
    pub enemy_cull_margin: f32,
    pub coin_size: Vec2,
    pub powerup_size: Vec2,
    pub checkpoint_size: Vec2,
    pub scores: ScoreBonuses,
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            max_fall_speed: 15.0,
            ground_y: 650.0,
            player_size: Vec2::new(32.0, 48.0),
            player_speed: 4.0,
            jump_velocity: -12.0,
            starting_lives: 3,
            level_width: 2000.0,
            coin_target: 9,
            damage_invincibility: 120,
            powerup_duration: 300,
            stomp_bounce: -8.0,
            respawn_x: 50.0,
            enemy_size: Vec2::new(32.0, 24.0),
            enemy_speeds: EnemySpeeds::default(),
            flying_turn_margin: 100.0,
            flying_bob_amplitude: 8.0,
            flying_bob_rate: 0.1,
            enemy_cull_margin: 500.0,
            coin_size: Vec2::new(16.0, 16.0),
            powerup_size: Vec2::new(20.0, 20.0),
            checkpoint_size: Vec2::new(30.0, 100.0),
            scores: ScoreBonuses::default(),
        }
    }
}

/// Menu shell tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Frames a held menu direction waits before repeating
    pub menu_debounce: u32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self { menu_debounce: 9 }
    }
}

impl ArcadeConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        info!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    /// Load from `$ARCADE_CONFIG` if set, otherwise use defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason: "must be positive" })
            }
        }
        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value >= 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason: "must not be negative" })
            }
        }

        positive("screen.width", self.screen.width)?;
        positive("screen.height", self.screen.height)?;
        if self.screen.fps == 0 {
            return Err(ConfigError::Invalid { field: "screen.fps", reason: "must be positive" });
        }

        positive("fight.gravity", self.fight.gravity)?;
        positive("fight.max_fall_speed", self.fight.max_fall_speed)?;
        positive("fight.fighter_size.x", self.fight.fighter_size.x)?;
        positive("fight.fighter_size.y", self.fight.fighter_size.y)?;
        positive("fight.max_energy", self.fight.max_energy)?;
        non_negative("fight.energy_regen", self.fight.energy_regen)?;
        non_negative("fight.attacks.punch.energy_cost", self.fight.attacks.punch.energy_cost)?;
        non_negative("fight.attacks.kick.energy_cost", self.fight.attacks.kick.energy_cost)?;
        non_negative("fight.attacks.special.energy_cost", self.fight.attacks.special.energy_cost)?;
        if !(0.0..=1.0).contains(&self.fight.block_reduction) {
            return Err(ConfigError::Invalid {
                field: "fight.block_reduction",
                reason: "must be within [0, 1]",
            });
        }
        if !(0.0..1.0).contains(&self.fight.knockback_decay) {
            return Err(ConfigError::Invalid {
                field: "fight.knockback_decay",
                reason: "must be within [0, 1)",
            });
        }

        positive("platformer.gravity", self.platformer.gravity)?;
        positive("platformer.max_fall_speed", self.platformer.max_fall_speed)?;
        positive("platformer.player_size.x", self.platformer.player_size.x)?;
        positive("platformer.player_size.y", self.platformer.player_size.y)?;
        positive("platformer.level_width", self.platformer.level_width)?;
        if self.platformer.coin_target == 0 {
            return Err(ConfigError::Invalid {
                field: "platformer.coin_target",
                reason: "must be positive",
            });
        }

        Ok(())
    }
}
