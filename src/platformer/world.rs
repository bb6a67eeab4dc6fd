//! Level World
//!
//! Static geometry and pickups of a platformer level, plus the built-in
//! level layout.
//!
//! Platforms never change after a level is built. Coins, power-ups and
//! checkpoints are plain data; all interaction lives in `collision`.

use serde::{Serialize, Deserialize};

use crate::config::PlatformerConfig;
use crate::core::hash::StateHasher;
use crate::core::kinematics::{integrate, Body};
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;

use super::enemy::{walker_params, EnemyKind, EnemySpawn};

// =============================================================================
// PLATFORMS
// =============================================================================

/// Platform surface type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlatformKind {
    Normal = 0,
    /// Marks a bonus area; behaves like `Normal`
    CoinBonus = 1,
    /// Landing costs a life
    Spike = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Platform {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, kind: PlatformKind) -> Self {
        Self { rect: Rect::new(x, y, w, h), kind }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.top()
    }

    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_rect(&self.rect);
        hasher.update_u8(self.kind as u8);
    }
}

// =============================================================================
// PICKUPS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub rect: Rect,
}

impl Coin {
    pub fn new(position: Vec2, config: &PlatformerConfig) -> Self {
        Self { rect: Rect::from_pos_size(position, config.coin_size) }
    }
}

/// Power-up effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PowerUpKind {
    /// Timed growth
    Mushroom = 0,
    /// Timed invincibility
    Star = 1,
    /// Absorbs one enemy hit while it lasts
    Shield = 2,
}

impl PowerUpKind {
    pub fn name(self) -> &'static str {
        match self {
            PowerUpKind::Mushroom => "mushroom",
            PowerUpKind::Star => "star",
            PowerUpKind::Shield => "shield",
        }
    }
}

/// A power-up waiting to be collected. Falls onto platforms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub body: Body,
}

impl PowerUp {
    pub fn new(position: Vec2, kind: PowerUpKind, config: &PlatformerConfig) -> Self {
        Self { kind, body: Body::new(position, config.powerup_size) }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn update(&mut self, config: &PlatformerConfig) {
        integrate(&mut self.body, &walker_params(config));
    }
}

/// Respawn flag. The pole stands on `base` with its box centred on `base.x`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub base: Vec2,
    pub rect: Rect,
}

impl Checkpoint {
    pub fn new(x: f32, y: f32, config: &PlatformerConfig) -> Self {
        let size = config.checkpoint_size;
        Self {
            base: Vec2::new(x, y),
            rect: Rect::new(x - size.x / 2.0, y - size.y, size.x, size.y),
        }
    }

    /// Where the player respawns after reaching this flag.
    #[inline]
    pub fn respawn_x(&self) -> f32 {
        self.base.x
    }

    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_vec2(self.base);
        hasher.update_rect(&self.rect);
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Everything needed to build a fresh level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub powerups: Vec<PowerUp>,
    pub enemies: Vec<EnemySpawn>,
    pub checkpoints: Vec<Checkpoint>,
}

const NORMAL: PlatformKind = PlatformKind::Normal;

/// The built-in level.
pub fn level_one(config: &PlatformerConfig) -> LevelLayout {
    let ground_height = 50.0;
    let mut platforms = vec![Platform::new(0.0, config.ground_y, config.level_width, ground_height, NORMAL)];
    platforms.extend([
        Platform::new(150.0, 450.0, 150.0, 20.0, NORMAL),
        Platform::new(400.0, 380.0, 150.0, 20.0, NORMAL),
        Platform::new(650.0, 310.0, 150.0, 20.0, NORMAL),
        Platform::new(250.0, 300.0, 150.0, 20.0, PlatformKind::CoinBonus),
        Platform::new(800.0, 400.0, 150.0, 20.0, NORMAL),
        Platform::new(1000.0, 450.0, 150.0, 20.0, NORMAL),
        Platform::new(300.0, 550.0, 100.0, 20.0, PlatformKind::Spike),
        Platform::new(600.0, 200.0, 200.0, 20.0, NORMAL),
        Platform::new(1200.0, 420.0, 150.0, 20.0, NORMAL),
        Platform::new(1450.0, 380.0, 140.0, 20.0, NORMAL),
        Platform::new(1700.0, 340.0, 150.0, 20.0, PlatformKind::CoinBonus),
        Platform::new(1950.0, 400.0, 150.0, 20.0, NORMAL),
        Platform::new(1300.0, 300.0, 120.0, 20.0, NORMAL),
        Platform::new(1550.0, 250.0, 140.0, 20.0, NORMAL),
        Platform::new(1800.0, 280.0, 120.0, 20.0, NORMAL),
        Platform::new(1400.0, 150.0, 180.0, 20.0, NORMAL),
    ]);

    let coins = [
        (200.0, 400.0),
        (450.0, 330.0),
        (700.0, 260.0),
        (850.0, 350.0),
        (1050.0, 400.0),
        (1250.0, 370.0),
        (1500.0, 330.0),
        (1750.0, 290.0),
        (1450.0, 100.0),
        (800.0, 230.0),
        (1050.0, 390.0),
        (700.0, 100.0),
    ]
    .into_iter()
    .map(|(x, y)| Coin::new(Vec2::new(x, y), config))
    .collect();

    let powerups = vec![
        PowerUp::new(Vec2::new(320.0, 480.0), PowerUpKind::Mushroom, config),
        PowerUp::new(Vec2::new(1500.0, 200.0), PowerUpKind::Star, config),
        PowerUp::new(Vec2::new(700.0, 140.0), PowerUpKind::Shield, config),
    ];

    let enemies = vec![
        EnemySpawn::new(400.0, 340.0, 1, EnemyKind::Goomba),
        EnemySpawn::new(700.0, 270.0, -1, EnemyKind::Goomba),
        EnemySpawn::new(1000.0, 400.0, 1, EnemyKind::Koopa),
        EnemySpawn::new(1250.0, 370.0, 1, EnemyKind::Goomba),
        EnemySpawn::new(1400.0, 100.0, -1, EnemyKind::Flying),
        EnemySpawn::new(1800.0, 230.0, 1, EnemyKind::Koopa),
        EnemySpawn::new(300.0, 370.0, 1, EnemyKind::Goomba),
        EnemySpawn::new(600.0, 310.0, -1, EnemyKind::Goomba),
        EnemySpawn::new(850.0, 370.0, 1, EnemyKind::Goomba),
        EnemySpawn::new(400.0, 130.0, -1, EnemyKind::Goomba),
        EnemySpawn::new(800.0, 100.0, 1, EnemyKind::Goomba),
    ];

    let checkpoints = [500.0, 1000.0, 1500.0]
        .into_iter()
        .map(|x| Checkpoint::new(x, config.ground_y, config))
        .collect();

    LevelLayout { platforms, coins, powerups, enemies, checkpoints }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_contents() {
        let layout = level_one(&PlatformerConfig::default());

        // Ground plus 15 floating platforms
        assert_eq!(layout.platforms.len(), 16);
        assert_eq!(layout.platforms[0].rect, Rect::new(0.0, 650.0, 2000.0, 50.0));
        let count = |kind| layout.platforms.iter().filter(|p| p.kind == kind).count();
        assert_eq!(count(PlatformKind::Spike), 1);
        assert_eq!(count(PlatformKind::CoinBonus), 2);

        assert_eq!(layout.coins.len(), 12);
        assert_eq!(layout.powerups.len(), 3);
        assert_eq!(layout.enemies.len(), 11);
        assert_eq!(layout.checkpoints.len(), 3);
        assert_eq!(
            layout.enemies.iter().filter(|e| e.kind == EnemyKind::Flying).count(),
            1
        );
    }

    #[test]
    fn test_checkpoint_box() {
        let checkpoint = Checkpoint::new(500.0, 650.0, &PlatformerConfig::default());
        assert_eq!(checkpoint.rect, Rect::new(485.0, 550.0, 30.0, 100.0));
        assert_eq!(checkpoint.respawn_x(), 500.0);
    }

    #[test]
    fn test_powerup_falls() {
        let config = PlatformerConfig::default();
        let mut mushroom = PowerUp::new(Vec2::new(320.0, 480.0), PowerUpKind::Mushroom, &config);
        mushroom.update(&config);
        assert!(mushroom.body.position.y > 480.0);
        assert_eq!(mushroom.body.position.x, 320.0);
    }
}
