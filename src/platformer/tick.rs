//! Level Simulation Tick
//!
//! One frame of a platformer level:
//!
//! 1. apply input
//! 2. timers
//! 3. kinematics (player, enemies, power-ups)
//! 4. platform landing and spike damage
//! 5. enemy turns and culling
//! 6. player vs enemies
//! 7. coins, power-ups, checkpoints
//! 8. fall-out and respawn
//! 9. win / loss check
//! 10. camera
//!
//! Levels carry no randomness: a level is a pure function of
//! (config, layout, inputs).

use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::config::ArcadeConfig;
use crate::core::hash::{compute_state_hash, StateHash, StateHasher};
use crate::game::camera::Camera;
use crate::game::events::{GameEvent, HurtCause, Jumper};
use crate::game::input::{InputFrame, InputRecording};

use super::collision::{
    check_checkpoints, check_coin_pickups, check_enemy_contacts, check_powerup_pickups,
    land_on_platforms, remove_indices,
};
use super::enemy::Enemy;
use super::player::{HurtOutcome, Player, PowerStatus};
use super::world::{level_one, Checkpoint, Coin, LevelLayout, Platform, PlatformKind, PowerUp};

/// Level lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelPhase {
    Playing,
    /// Coin target met
    Won,
    /// Out of lives
    Lost,
}

/// HUD numbers for the platformer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScoreReport {
    pub score: u32,
    pub coins: u32,
    pub coin_target: u32,
    pub lives: u32,
    pub power: PowerStatus,
}

/// Result of a tick.
#[derive(Debug, Default)]
pub struct LevelTickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Set on the frame the level ends
    pub finished: Option<LevelPhase>,
}

/// Complete state of one level.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Level {
    pub frame: u32,
    pub phase: LevelPhase,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub powerups: Vec<PowerUp>,
    pub checkpoints: Vec<Checkpoint>,
    /// Respawn anchor; `None` until a checkpoint is touched
    pub last_checkpoint_x: Option<f32>,
    pub camera: Camera,
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl Level {
    /// Build a level from a layout.
    pub fn new(layout: LevelLayout, config: &ArcadeConfig) -> Self {
        let pf = &config.platformer;
        let player = Player::new(pf.respawn_x, pf);
        let camera = Camera::follow(
            player.body.position.x,
            config.screen.width,
            pf.level_width,
            &config.camera,
        );
        let enemies = layout.enemies.iter().map(|spawn| Enemy::spawn(spawn, pf)).collect();

        info!(
            platforms = layout.platforms.len(),
            coins = layout.coins.len(),
            enemies = layout.enemies.len(),
            "level started"
        );

        Self {
            frame: 0,
            phase: LevelPhase::Playing,
            player,
            platforms: layout.platforms,
            enemies,
            coins: layout.coins,
            powerups: layout.powerups,
            checkpoints: layout.checkpoints,
            last_checkpoint_x: None,
            camera,
            pending_events: Vec::new(),
        }
    }

    /// A fresh copy of the built-in level.
    pub fn level_one(config: &ArcadeConfig) -> Self {
        Self::new(level_one(&config.platformer), config)
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.phase == LevelPhase::Won
    }

    #[inline]
    pub fn is_lost(&self) -> bool {
        self.phase == LevelPhase::Lost
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase != LevelPhase::Playing
    }

    /// Where the player comes back after falling out.
    pub fn respawn_x(&self, config: &ArcadeConfig) -> f32 {
        self.last_checkpoint_x.unwrap_or(config.platformer.respawn_x)
    }

    pub fn score_report(&self, config: &ArcadeConfig) -> ScoreReport {
        ScoreReport {
            score: self.player.score,
            coins: self.player.coins,
            coin_target: config.platformer.coin_target,
            lives: self.player.lives,
            power: self.player.power_status(),
        }
    }

    /// Enemies the renderer should draw this frame.
    pub fn visible_enemies<'a>(&'a self, config: &'a ArcadeConfig) -> impl Iterator<Item = &'a Enemy> + 'a {
        self.enemies
            .iter()
            .filter(move |enemy| self.camera.is_visible(&enemy.rect(), &config.camera))
    }

    /// Digest of the full simulation state.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(StateHasher::for_level(), self.frame, 0, |hasher| {
            hasher.update_u32(self.platforms.len() as u32);
            for platform in &self.platforms {
                platform.hash_into(hasher);
            }
            hasher.update_u32(self.checkpoints.len() as u32);
            for checkpoint in &self.checkpoints {
                checkpoint.hash_into(hasher);
            }

            self.player.hash_into(hasher);

            hasher.update_u32(self.enemies.len() as u32);
            for enemy in &self.enemies {
                enemy.hash_into(hasher);
            }

            hasher.update_u32(self.coins.len() as u32);
            for coin in &self.coins {
                hasher.update_rect(&coin.rect);
            }

            hasher.update_u32(self.powerups.len() as u32);
            for powerup in &self.powerups {
                hasher.update_u8(powerup.kind as u8);
                hasher.update_vec2(powerup.body.position);
                hasher.update_vec2(powerup.body.velocity);
            }

            match self.last_checkpoint_x {
                Some(x) => {
                    hasher.update_bool(true);
                    hasher.update_f32(x);
                }
                None => hasher.update_bool(false),
            }
            hasher.update_u8(self.phase as u8);
            hasher.update_f32(self.camera.x);
        })
    }

    fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Lose a life and record it. Returns whether a life was actually lost.
    fn hurt_player(&mut self, cause: HurtCause, config: &ArcadeConfig) -> bool {
        let shieldable = matches!(cause, HurtCause::Enemy(_));
        let frame = self.frame;
        match self.player.hurt(shieldable, &config.platformer) {
            HurtOutcome::Ignored => false,
            HurtOutcome::Absorbed => {
                if let HurtCause::Enemy(kind) = cause {
                    self.push_event(GameEvent::shield_absorbed(frame, kind));
                }
                debug!(frame, ?cause, "shield absorbed hit");
                false
            }
            HurtOutcome::LifeLost => {
                let lives = self.player.lives;
                self.push_event(GameEvent::player_hurt(frame, cause, lives));
                debug!(frame, ?cause, lives, "player hurt");
                true
            }
        }
    }
}

/// Run one simulation tick. A finished level does not advance.
pub fn tick(level: &mut Level, input: &InputFrame, config: &ArcadeConfig) -> LevelTickResult {
    let mut result = LevelTickResult::default();
    if level.is_finished() {
        return result;
    }

    let pf = &config.platformer;
    level.frame += 1;
    let frame = level.frame;

    // 1. Input
    if level.player.apply_input(input, pf) {
        level.push_event(GameEvent::jumped(frame, Jumper::Player));
    }

    // 2. Timers
    level.player.tick_timers();

    // 3. Kinematics
    level.player.update(pf);
    let enemy_prev_bottoms: Vec<f32> = level
        .enemies
        .iter_mut()
        .map(|enemy| {
            let prev = enemy.body.bottom();
            enemy.update(pf);
            prev
        })
        .collect();
    let powerup_prev_bottoms: Vec<f32> = level
        .powerups
        .iter_mut()
        .map(|powerup| {
            let prev = powerup.body.bottom();
            powerup.update(pf);
            prev
        })
        .collect();

    // 4. Landing
    let player_descending = level.player.body.velocity.y > 0.0;
    let landed = land_on_platforms(&mut level.player.body, level.player.prev_bottom, &level.platforms);
    if landed == Some(PlatformKind::Spike) {
        level.hurt_player(HurtCause::Spike, config);
    }
    for (enemy, prev) in level.enemies.iter_mut().zip(enemy_prev_bottoms) {
        if !enemy.kind.is_flying() {
            land_on_platforms(&mut enemy.body, prev, &level.platforms);
        }
    }
    for (powerup, prev) in level.powerups.iter_mut().zip(powerup_prev_bottoms) {
        land_on_platforms(&mut powerup.body, prev, &level.platforms);
    }

    // 5. Enemy turns and culling
    let world_height = config.screen.height;
    let mut culled = Vec::new();
    for (i, enemy) in level.enemies.iter_mut().enumerate() {
        if enemy.is_out_of_world(pf, world_height) {
            culled.push(i);
        } else {
            enemy.turn_at_bounds(pf);
        }
    }
    remove_indices(&mut level.enemies, &culled);
    level.powerups.retain(|p| p.body.position.y <= world_height);

    // 6. Player vs enemies
    let contacts = check_enemy_contacts(&level.player, player_descending, &level.enemies);
    let mut stomped = Vec::new();
    for contact in &contacts {
        if contact.stomp {
            let bonus = level.player.stomp(pf);
            stomped.push(contact.index);
            let score = level.player.score;
            level.push_event(GameEvent::enemy_stomped(frame, contact.kind, score));
            debug!(frame, kind = contact.kind.name(), bonus, "enemy stomped");
        } else {
            level.hurt_player(HurtCause::Enemy(contact.kind), config);
        }
    }
    remove_indices(&mut level.enemies, &stomped);

    // 7. Pickups
    let player_rect = level.player.rect();
    let coins = check_coin_pickups(&player_rect, &level.coins);
    for _ in &coins {
        level.player.collect_coin(pf);
        let (count, score) = (level.player.coins, level.player.score);
        level.push_event(GameEvent::coin_collected(frame, count, score));
    }
    remove_indices(&mut level.coins, &coins);

    let powerups = check_powerup_pickups(&player_rect, &level.powerups);
    for &i in &powerups {
        let kind = level.powerups[i].kind;
        level.player.apply_powerup(kind, pf);
        let score = level.player.score;
        level.push_event(GameEvent::powerup_collected(frame, kind, score));
        debug!(frame, kind = kind.name(), "power-up collected");
    }
    remove_indices(&mut level.powerups, &powerups);

    if let Some(x) = check_checkpoints(&player_rect, &level.checkpoints) {
        if level.last_checkpoint_x != Some(x) {
            level.last_checkpoint_x = Some(x);
            level.push_event(GameEvent::checkpoint_reached(frame, x));
            debug!(frame, x, "checkpoint reached");
        }
    }

    // 8. Fall-out
    if level.player.body.position.y > world_height {
        level.player.lives = level.player.lives.saturating_sub(1);
        let lives = level.player.lives;
        level.push_event(GameEvent::player_hurt(frame, HurtCause::Fall, lives));

        let x = level.respawn_x(config);
        level.player.respawn(x, pf);
        level.push_event(GameEvent::respawned(frame, x));
        debug!(frame, x, lives, "player respawned");
    }

    // 9. Terminal check (a win on the same frame as the last life counts)
    let score = level.player.score;
    if level.player.coins >= pf.coin_target {
        level.phase = LevelPhase::Won;
        level.push_event(GameEvent::level_won(frame, score));
        info!(frame, score, "level won");
        result.finished = Some(LevelPhase::Won);
    } else if level.player.lives == 0 {
        level.phase = LevelPhase::Lost;
        level.push_event(GameEvent::level_lost(frame, score));
        info!(frame, score, "level lost");
        result.finished = Some(LevelPhase::Lost);
    }

    // 10. Camera
    level.camera = Camera::follow(
        level.player.body.position.x,
        config.screen.width,
        pf.level_width,
        &config.camera,
    );

    result.events = level.take_events();
    result
}

/// Replay a level from a recording. Stops early if the level ends.
pub fn replay_level(initial: Level, recording: &InputRecording, config: &ArcadeConfig) -> (Level, Vec<GameEvent>) {
    let mut level = initial;
    let mut all_events = Vec::new();

    for (_, input) in recording.replay_iter() {
        let result = tick(&mut level, &input, config);
        all_events.extend(result.events);
        if result.finished.is_some() {
            break;
        }
    }

    (level, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::events::{GameEventData, SoundEffect};
    use crate::game::input::Action;
    use crate::game::sinks::{dispatch_sounds, RecordingSink};
    use crate::platformer::enemy::{EnemyKind, EnemySpawn};
    use crate::platformer::world::PowerUpKind;

    /// Flat ground and nothing else.
    fn empty_layout(config: &ArcadeConfig) -> LevelLayout {
        LevelLayout {
            platforms: vec![Platform::new(
                0.0,
                config.platformer.ground_y,
                config.platformer.level_width,
                50.0,
                PlatformKind::Normal,
            )],
            coins: Vec::new(),
            powerups: Vec::new(),
            enemies: Vec::new(),
            checkpoints: Vec::new(),
        }
    }

    fn idle() -> InputFrame {
        InputFrame::IDLE
    }

    #[test]
    fn test_player_settles_on_ground() {
        let config = ArcadeConfig::default();
        let mut level = Level::new(empty_layout(&config), &config);
        for _ in 0..10 {
            tick(&mut level, &idle(), &config);
        }
        assert_eq!(level.player.body.bottom(), 650.0);
        assert!(level.player.body.on_ground);
        assert_eq!(level.player.lives, 3);
    }

    #[test]
    fn test_spike_costs_one_life_then_invincible() {
        let config = ArcadeConfig::default();
        let mut layout = empty_layout(&config);
        layout.platforms.push(Platform::new(300.0, 550.0, 100.0, 20.0, PlatformKind::Spike));
        let mut level = Level::new(layout, &config);
        level.player.body.position = Vec2::new(320.0, 480.0);

        let mut hurt_frames = 0;
        for _ in 0..15 {
            let result = tick(&mut level, &idle(), &config);
            hurt_frames += result
                .events
                .iter()
                .filter(|e| matches!(e.data, GameEventData::PlayerHurt { cause: HurtCause::Spike, .. }))
                .count();
        }
        assert_eq!(level.player.lives, 2);
        assert_eq!(hurt_frames, 1);
        assert!(level.player.is_invincible());

        // Standing on the spike for the rest of the window costs nothing
        for _ in 0..100 {
            tick(&mut level, &idle(), &config);
        }
        assert_eq!(level.player.lives, 2);
    }

    #[test]
    fn test_spike_ignores_shield() {
        let config = ArcadeConfig::default();
        let mut layout = empty_layout(&config);
        layout.platforms.push(Platform::new(300.0, 550.0, 100.0, 20.0, PlatformKind::Spike));
        let mut level = Level::new(layout, &config);
        level.player.body.position = Vec2::new(320.0, 480.0);
        level.player.shield.start(300);

        for _ in 0..15 {
            tick(&mut level, &idle(), &config);
        }
        assert_eq!(level.player.lives, 2);
        assert!(level.player.has_shield());
    }

    #[test]
    fn test_coin_pickup_is_idempotent() {
        let config = ArcadeConfig::default();
        let mut layout = empty_layout(&config);
        layout.coins.push(Coin::new(Vec2::new(60.0, 620.0), &config.platformer));
        let mut level = Level::new(layout, &config);

        let result = tick(&mut level, &idle(), &config);
        assert_eq!(level.player.coins, 1);
        assert_eq!(level.player.score, 100);
        assert!(level.coins.is_empty());
        assert!(result
            .events
            .iter()
            .any(|e| e.data == GameEventData::CoinCollected { coins: 1, score: 100 }));

        for _ in 0..30 {
            tick(&mut level, &idle(), &config);
        }
        assert_eq!(level.player.coins, 1);
        assert_eq!(level.player.score, 100);
    }

    #[test]
    fn test_ninth_coin_wins_once() {
        let config = ArcadeConfig::default();
        let mut layout = empty_layout(&config);
        layout.coins.push(Coin::new(Vec2::new(60.0, 620.0), &config.platformer));
        let mut level = Level::new(layout, &config);
        level.player.coins = 8;

        let mut sink = RecordingSink::new();
        let result = tick(&mut level, &idle(), &config);
        dispatch_sounds(&mut sink, &result.events);

        assert!(level.is_won());
        assert_eq!(result.finished, Some(LevelPhase::Won));
        assert_eq!(sink.count(SoundEffect::Victory), 1);

        // Won is terminal: no further frames, no further victory
        for _ in 0..10 {
            let result = tick(&mut level, &idle(), &config);
            dispatch_sounds(&mut sink, &result.events);
        }
        assert_eq!(sink.count(SoundEffect::Victory), 1);
    }

    #[test]
    fn test_fall_out_respawns_at_start() {
        let config = ArcadeConfig::default();
        let mut layout = empty_layout(&config);
        layout.platforms.clear();
        let mut level = Level::new(layout, &config);

        let mut respawned = None;
        for _ in 0..200 {
            let result = tick(&mut level, &idle(), &config);
            if let Some(event) = result
                .events
                .iter()
                .find(|e| matches!(e.data, GameEventData::Respawned { .. }))
            {
                respawned = Some(event.data.clone());
                break;
            }
        }

        assert_eq!(respawned, Some(GameEventData::Respawned { x: 50.0 }));
        assert_eq!(level.player.lives, 2);
        assert_eq!(level.player.body.position.x, 50.0);
        assert_eq!(level.player.body.bottom(), 650.0);
    }

    #[test]
    fn test_fall_out_respawns_at_checkpoint() {
        let config = ArcadeConfig::default();
        let mut layout = empty_layout(&config);
        layout.checkpoints.push(Checkpoint::new(500.0, 650.0, &config.platformer));
        let mut level = Level::new(layout, &config);
        level.player.body.position.x = 490.0;

        let result = tick(&mut level, &idle(), &config);
        assert_eq!(level.last_checkpoint_x, Some(500.0));
        assert!(result
            .events
            .iter()
            .any(|e| e.data == GameEventData::CheckpointReached { x: 500.0 }));

        // Drop the player below the world
        level.player.body.position = Vec2::new(900.0, 790.0);
        level.player.body.velocity.y = 15.0;
        tick(&mut level, &idle(), &config);

        assert_eq!(level.player.lives, 2);
        assert_eq!(level.player.body.position.x, 500.0);
    }

    #[test]
    fn test_last_fall_loses_level() {
        let config = ArcadeConfig::default();
        let mut level = Level::new(empty_layout(&config), &config);
        level.player.lives = 1;
        level.player.body.position = Vec2::new(900.0, 790.0);
        level.player.body.velocity.y = 15.0;
        level.platforms.clear();

        let result = tick(&mut level, &idle(), &config);
        assert!(level.is_lost());
        assert_eq!(result.finished, Some(LevelPhase::Lost));
    }

    #[test]
    fn test_stomp_and_enemy_hit() {
        let config = ArcadeConfig::default();
        let mut layout = empty_layout(&config);
        layout.enemies.push(EnemySpawn::new(200.0, 626.0, 1, EnemyKind::Goomba));
        let mut level = Level::new(layout, &config);

        // Drop onto the goomba from above
        level.player.body.position = Vec2::new(205.0, 560.0);
        level.player.body.velocity.y = 4.0;
        let mut stomped = false;
        for _ in 0..5 {
            let result = tick(&mut level, &idle(), &config);
            stomped |= result
                .events
                .iter()
                .any(|e| matches!(e.data, GameEventData::EnemyStomped { kind: EnemyKind::Goomba, .. }));
            if stomped {
                break;
            }
        }
        assert!(stomped);
        assert!(level.enemies.is_empty());
        assert_eq!(level.player.score, 200);
        assert_eq!(level.player.body.velocity.y, -8.0);
        assert_eq!(level.player.lives, 3);
    }

    #[test]
    fn test_stomp_on_the_landing_frame() {
        let config = ArcadeConfig::default();
        let mut layout = empty_layout(&config);
        layout.enemies.push(EnemySpawn::new(200.0, 626.0, 1, EnemyKind::Goomba));
        let mut level = Level::new(layout, &config);

        // Bottom at 636, above the goomba's centre (638); this frame's fall
        // reaches the ground, which zeroes the velocity before contacts run
        level.player.body.position = Vec2::new(205.0, 588.0);
        level.player.body.velocity.y = 14.5;
        level.player.body.on_ground = false;

        let result = tick(&mut level, &idle(), &config);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::EnemyStomped { kind: EnemyKind::Goomba, .. })));
        assert!(level.enemies.is_empty());
        assert_eq!(level.player.lives, 3);
        assert_eq!(level.player.score, 200);
        assert_eq!(level.player.body.velocity.y, -8.0);
    }

    #[test]
    fn test_walking_into_enemy_hurts() {
        let config = ArcadeConfig::default();
        let mut layout = empty_layout(&config);
        layout.enemies.push(EnemySpawn::new(100.0, 626.0, -1, EnemyKind::Goomba));
        let mut level = Level::new(layout, &config);

        let mut hurt = 0;
        for _ in 0..60 {
            let result = tick(&mut level, &idle(), &config);
            hurt += result
                .events
                .iter()
                .filter(|e| matches!(e.data, GameEventData::PlayerHurt { .. }))
                .count();
        }
        assert_eq!(hurt, 1);
        assert_eq!(level.player.lives, 2);
        assert_eq!(level.enemies.len(), 1);
    }

    #[test]
    fn test_shield_absorbs_enemy_hit() {
        let config = ArcadeConfig::default();
        let mut layout = empty_layout(&config);
        layout.enemies.push(EnemySpawn::new(100.0, 626.0, -1, EnemyKind::Goomba));
        let mut level = Level::new(layout, &config);
        level.player.shield.start(300);

        let mut absorbed = 0;
        for _ in 0..60 {
            let result = tick(&mut level, &idle(), &config);
            absorbed += result
                .events
                .iter()
                .filter(|e| matches!(e.data, GameEventData::ShieldAbsorbed { .. }))
                .count();
        }
        assert_eq!(absorbed, 1);
        assert_eq!(level.player.lives, 3);
        assert!(!level.player.has_shield());
    }

    #[test]
    fn test_powerup_pickup() {
        let config = ArcadeConfig::default();
        let mut layout = empty_layout(&config);
        layout
            .powerups
            .push(PowerUp::new(Vec2::new(60.0, 630.0), PowerUpKind::Star, &config.platformer));
        let mut level = Level::new(layout, &config);

        let result = tick(&mut level, &idle(), &config);
        assert!(level.powerups.is_empty());
        assert!(level.player.is_invincible());
        assert_eq!(level.player.score, 1000);
        assert_eq!(level.score_report(&config).power, PowerStatus::Star);
        assert_eq!(
            result.events.iter().filter_map(GameEvent::sound).collect::<Vec<_>>(),
            vec![SoundEffect::PowerUp]
        );
    }

    #[test]
    fn test_camera_follows_player() {
        let config = ArcadeConfig::default();
        let mut level = Level::new(empty_layout(&config), &config);
        assert_eq!(level.camera.x, 0.0);

        level.player.body.position.x = 1000.0;
        tick(&mut level, &idle(), &config);
        assert!((level.camera.x - 600.0).abs() < 1e-3);

        level.player.body.position.x = 1990.0;
        tick(&mut level, &idle(), &config);
        assert_eq!(level.camera.x, 800.0);
    }

    #[test]
    fn test_level_one_replay_matches() {
        let config = ArcadeConfig::default();
        let mut live = Level::level_one(&config);
        let mut recording = InputRecording::new();

        for f in 0..900u32 {
            let mut input = InputFrame::IDLE.with(Action::MoveRight);
            if f % 40 < 12 {
                input = input.with(Action::Jump);
            }
            recording.record(input);
            if tick(&mut live, &input, &config).finished.is_some() {
                break;
            }
        }

        let (replayed, _) = replay_level(Level::level_one(&config), &recording, &config);
        assert_eq!(replayed.frame, live.frame);
        assert_eq!(replayed.compute_hash(), live.compute_hash());

        let report = replayed.score_report(&config);
        assert_eq!(report.coin_target, 9);
        assert!(report.lives <= 3);
    }

    #[test]
    fn test_hash_covers_static_geometry() {
        let config = ArcadeConfig::default();
        let plain = Level::new(empty_layout(&config), &config);

        let mut spiked = empty_layout(&config);
        spiked.platforms.push(Platform::new(300.0, 550.0, 100.0, 20.0, PlatformKind::Spike));
        let spiked = Level::new(spiked, &config);

        let mut normal = empty_layout(&config);
        normal.platforms.push(Platform::new(300.0, 550.0, 100.0, 20.0, PlatformKind::Normal));
        let normal = Level::new(normal, &config);

        let mut flagged = empty_layout(&config);
        flagged.checkpoints.push(Checkpoint::new(900.0, config.platformer.ground_y, &config.platformer));
        let flagged = Level::new(flagged, &config);

        assert_eq!(plain.compute_hash(), Level::new(empty_layout(&config), &config).compute_hash());
        assert_ne!(plain.compute_hash(), spiked.compute_hash());
        assert_ne!(spiked.compute_hash(), normal.compute_hash());
        assert_ne!(plain.compute_hash(), flagged.compute_hash());
    }

    #[test]
    fn test_visible_enemies_follow_camera() {
        let config = ArcadeConfig::default();
        let mut layout = empty_layout(&config);
        layout.enemies.push(EnemySpawn::new(500.0, 626.0, -1, EnemyKind::Goomba));
        layout.enemies.push(EnemySpawn::new(1900.0, 626.0, -1, EnemyKind::Goomba));
        let mut level = Level::new(layout, &config);

        // Camera at 0: only the near enemy is in view
        assert_eq!(level.visible_enemies(&config).count(), 1);

        // Far right: camera at 800, the near enemy is well off the left edge
        level.player.body.position.x = 1990.0;
        tick(&mut level, &idle(), &config);
        let visible: Vec<f32> = level.visible_enemies(&config).map(|e| e.body.position.x).collect();
        assert_eq!(visible.len(), 1);
        assert!(visible[0] > 1800.0);
    }
}
