//! Arcade Collection
//!
//! Headless driver: plays a scripted fight and a scripted platformer run,
//! checks that replaying the recorded inputs reproduces the same final
//! state, and records the platformer score.

use anyhow::{bail, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use arcade::{
    VERSION,
    config::ArcadeConfig,
    fight::{
        character::{Roster, Side},
        tick::{tick as fight_tick, replay_fight, Fight},
    },
    game::{
        events::GameEventData,
        input::{Action, InputFrame, InputRecording},
        shell::GameChoice,
        sinks::{dispatch_sounds, LogSink},
    },
    persistence::ScoreStore,
    platformer::tick::{tick as level_tick, replay_level, Level},
};

/// Longest scripted session, in seconds of play.
const DEMO_SECONDS: u32 = 120;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Arcade Collection v{}", VERSION);

    let config = ArcadeConfig::from_env()?;
    info!("Tick Rate: {} Hz", config.screen.fps);

    demo_fight(&config)?;
    demo_level(&config)?;
    Ok(())
}

/// Scripted fighter input: close in, then cycle through the moves.
fn scripted_fighter(frame: u32, side: Side) -> InputFrame {
    let toward = match side {
        Side::P1 => Action::MoveRight,
        Side::P2 => Action::MoveLeft,
    };
    let offset = side.index() as u32 * 7;
    match (frame + offset) % 90 {
        0..=29 => InputFrame::IDLE.with(toward),
        30..=34 => InputFrame::IDLE.with(Action::Punch),
        45..=49 => InputFrame::IDLE.with(Action::Kick),
        60..=69 => InputFrame::IDLE.with(Action::Block),
        75 => InputFrame::IDLE.with(Action::Special),
        80 => InputFrame::IDLE.with(Action::Jump),
        _ => InputFrame::IDLE,
    }
}

fn demo_fight(config: &ArcadeConfig) -> Result<()> {
    info!("=== Starting Demo Fight ===");

    let seed = 12345u64;
    let (p1, p2) = (Roster::Kyo, Roster::Iori);
    let mut fight = Fight::new(p1, p2, seed, config);
    let mut recordings = [InputRecording::new(), InputRecording::new()];
    let mut sink = LogSink;
    let mut hits = 0usize;

    for frame in 0..config.screen.frames_for(DEMO_SECONDS) {
        let inputs = [scripted_fighter(frame, Side::P1), scripted_fighter(frame, Side::P2)];
        recordings[0].record(inputs[0]);
        recordings[1].record(inputs[1]);

        let result = fight_tick(&mut fight, &inputs, config);
        dispatch_sounds(&mut sink, &result.events);
        hits += result
            .events
            .iter()
            .filter(|e| matches!(e.data, GameEventData::AttackHit { damage: Some(_), .. }))
            .count();

        if result.winner.is_some() {
            break;
        }
    }

    info!("=== Fight Results ===");
    for report in fight.fighters.iter().map(|f| f.report()) {
        info!(
            "{}: {}/{} health, {:.1} energy",
            report.name, report.health, report.max_health, report.energy
        );
    }
    match fight.winner() {
        Some(side) => info!("Winner: {} after {} frames", fight.fighter(side).roster.name(), fight.frame),
        None => info!("No knockout after {} frames", fight.frame),
    }
    info!("Damaging hits: {}", hits);
    info!("Fight lasted {:.1}s", fight.frame as f32 / config.screen.fps as f32);

    let hash = fight.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    info!("=== Verifying Fight Replay ===");
    let bytes = recordings[0].to_bytes()?.len() + recordings[1].to_bytes()?.len();
    info!("Recorded {} frames in {} bytes", recordings[0].frame_count(), bytes);

    let (replayed, _) = replay_fight(Fight::new(p1, p2, seed, config), &recordings, config);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash {
        bail!("fight replay diverged at frame {}", replayed.frame);
    }
    info!("DETERMINISM VERIFIED: Hashes match!");
    Ok(())
}

/// Scripted platformer input: run right, hopping every half second.
fn scripted_runner(frame: u32) -> InputFrame {
    let input = InputFrame::IDLE.with(Action::MoveRight);
    if frame % 30 < 8 {
        input.with(Action::Jump)
    } else {
        input
    }
}

fn demo_level(config: &ArcadeConfig) -> Result<()> {
    info!("=== Starting Demo Level ===");

    let mut level = Level::level_one(config);
    let mut recording = InputRecording::new();
    let mut sink = LogSink;

    for frame in 0..config.screen.frames_for(DEMO_SECONDS) {
        let input = scripted_runner(frame);
        recording.record(input);

        let result = level_tick(&mut level, &input, config);
        dispatch_sounds(&mut sink, &result.events);

        for event in &result.events {
            match &event.data {
                GameEventData::CheckpointReached { x } => info!("Checkpoint at x={}", x),
                GameEventData::PlayerHurt { cause, lives_left } => {
                    info!("Hurt by {:?}, {} lives left", cause, lives_left)
                }
                _ => {}
            }
        }

        if result.finished.is_some() {
            break;
        }
    }

    let report = level.score_report(config);
    info!("=== Level Results ===");
    info!(
        "Score {} | Coins {}/{} | Lives {} | Power {:?} | Phase {:?}",
        report.score, report.coins, report.coin_target, report.lives, report.power, level.phase
    );
    info!(
        "Camera at x={:.0}, {} of {} enemies on screen",
        level.camera.x,
        level.visible_enemies(config).count(),
        level.enemies.len()
    );

    let hash = level.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    let (replayed, _) = replay_level(Level::level_one(config), &recording, config);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));
    if hash != replay_hash {
        bail!("level replay diverged at frame {}", replayed.frame);
    }
    info!("DETERMINISM VERIFIED: Hashes match!");

    let store = ScoreStore::default();
    match store.record_best_effort(GameChoice::Platformer.key(), "Player", report.score) {
        Some(rank) => info!("New high score! Rank #{}", rank),
        None => info!("Score did not make the table"),
    }
    Ok(())
}
