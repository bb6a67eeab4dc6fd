//! Fight Simulation Tick
//!
//! One frame of a one-on-one fight:
//!
//! 1. apply both fighters' inputs
//! 2. kinematics, timers and energy
//! 3. combat resolution
//! 4. body separation
//! 5. particles
//! 6. knockout check
//!
//! A fight is a pure function of (config, roster picks, seed, inputs).

use serde::{Serialize, Deserialize};
use tracing::info;

use crate::config::ArcadeConfig;
use crate::core::hash::{compute_state_hash, StateHash, StateHasher};
use crate::core::kinematics::{HorizontalBounds, KinematicsParams, Support};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::Vec2;
use crate::game::events::{GameEvent, Jumper};
use crate::game::input::{InputFrame, InputRecording};

use super::character::{Fighter, Roster, Side};
use super::combat::{resolve_attacks, separate};
use super::particle::{spawn_burst, update_particles, Particle};

/// Fight lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightPhase {
    Fighting,
    /// Terminal until the shell starts a new fight
    Over { winner: Side },
}

/// Result of a tick.
#[derive(Debug, Default)]
pub struct FightTickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Set on the frame the fight ends
    pub winner: Option<Side>,
}

/// Complete state of one fight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fight {
    /// Frames simulated so far
    pub frame: u32,
    pub seed: u64,
    /// Indexed by [`Side::index`]
    pub fighters: [Fighter; 2],
    pub particles: Vec<Particle>,
    pub phase: FightPhase,
    rng: DeterministicRng,
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

/// Kinematics of the fixed arena.
pub fn arena_params(config: &ArcadeConfig) -> KinematicsParams {
    KinematicsParams {
        gravity: config.fight.gravity,
        max_fall_speed: config.fight.max_fall_speed,
        support: Support::GroundLine(config.fight.ground_y),
        bounds: HorizontalBounds::Viewport { width: config.screen.width },
    }
}

impl Fight {
    /// Start a fight between two roster picks.
    pub fn new(p1: Roster, p2: Roster, seed: u64, config: &ArcadeConfig) -> Self {
        let fight = &config.fight;
        let p2_x = config.screen.width - fight.p2_spawn_inset;
        info!(p1 = p1.name(), p2 = p2.name(), seed, "fight started");

        Self {
            frame: 0,
            seed,
            fighters: [
                Fighter::new(p1, Side::P1, fight.p1_spawn_x, fight),
                Fighter::new(p2, Side::P2, p2_x, fight),
            ],
            particles: Vec::new(),
            phase: FightPhase::Fighting,
            rng: DeterministicRng::new(seed),
            pending_events: Vec::new(),
        }
    }

    #[inline]
    pub fn fighter(&self, side: Side) -> &Fighter {
        &self.fighters[side.index()]
    }

    #[inline]
    pub fn fighter_mut(&mut self, side: Side) -> &mut Fighter {
        &mut self.fighters[side.index()]
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            FightPhase::Over { winner } => Some(winner),
            FightPhase::Fighting => None,
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Live sparks as `(position, alpha)` for the renderer.
    pub fn particle_sprites(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        self.particles.iter().map(|p| (p.position, p.alpha()))
    }

    /// Digest of the full simulation state.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(StateHasher::for_fight(), self.frame, self.seed, |hasher| {
            for fighter in &self.fighters {
                fighter.hash_into(hasher);
            }

            hasher.update_u32(self.particles.len() as u32);
            for particle in &self.particles {
                hasher.update_vec2(particle.position);
                hasher.update_vec2(particle.velocity);
                hasher.update_u32(particle.lifetime);
            }

            let [s0, s1] = self.rng.state();
            hasher.update_u64(s0);
            hasher.update_u64(s1);

            match self.phase {
                FightPhase::Fighting => hasher.update_u8(0),
                FightPhase::Over { winner } => {
                    hasher.update_u8(1);
                    hasher.update_u8(winner as u8);
                }
            }
        })
    }

    fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

/// Run one simulation tick.
///
/// `inputs` is indexed by [`Side::index`]. A finished fight does not
/// advance.
pub fn tick(fight: &mut Fight, inputs: &[InputFrame; 2], config: &ArcadeConfig) -> FightTickResult {
    let mut result = FightTickResult::default();
    if fight.is_over() {
        return result;
    }

    fight.frame += 1;
    let frame = fight.frame;

    // 1. Inputs
    for side in [Side::P1, Side::P2] {
        let outcome = fight.fighters[side.index()].apply_input(&inputs[side.index()], &config.fight);
        if outcome.jumped {
            fight.push_event(GameEvent::jumped(frame, Jumper::Fighter(side)));
        }
        if let Some(attack) = outcome.attack {
            fight.push_event(GameEvent::attack_started(frame, side, attack));
        }
    }

    // 2. Kinematics, timers, energy
    let params = arena_params(config);
    for fighter in fight.fighters.iter_mut() {
        fighter.update(&params, &config.fight);
    }

    // 3. Combat
    let hits = resolve_attacks(&mut fight.fighters, &config.fight);
    for hit in &hits {
        fight.push_event(GameEvent::attack_hit(frame, hit.attacker, hit.attack, hit.damage, hit.blocked));
        spawn_burst(&mut fight.rng, hit.impact, &config.fight.particles, &mut fight.particles);
    }

    // 4. Separation
    separate(&mut fight.fighters, params.bounds);

    // 5. Particles
    update_particles(&mut fight.particles, config.fight.particles.gravity);

    // 6. Knockout (P1 is checked first, so a double KO goes to P2)
    let winner = if fight.fighter(Side::P1).is_defeated() {
        Some(Side::P2)
    } else if fight.fighter(Side::P2).is_defeated() {
        Some(Side::P1)
    } else {
        None
    };

    if let Some(winner) = winner {
        fight.phase = FightPhase::Over { winner };
        fight.push_event(GameEvent::fight_ended(frame, winner));
        info!(
            frame,
            winner = fight.fighter(winner).roster.name(),
            "fight over"
        );
        result.winner = Some(winner);
    }

    result.events = fight.take_events();
    result
}

/// Replay a fight from both players' recordings.
///
/// Stops early if the fight ends. Frames past the end of a shorter
/// recording repeat its last input.
pub fn replay_fight(
    initial: Fight,
    recordings: &[InputRecording; 2],
    config: &ArcadeConfig,
) -> (Fight, Vec<GameEvent>) {
    let mut fight = initial;
    let mut all_events = Vec::new();
    let frames = recordings[0].frame_count().max(recordings[1].frame_count());

    for f in 0..frames {
        let inputs = [recordings[0].input_at(f), recordings[1].input_at(f)];
        let result = tick(&mut fight, &inputs, config);
        all_events.extend(result.events);
        if result.winner.is_some() {
            break;
        }
    }

    (fight, all_events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::GameEventData;
    use crate::game::input::Action;
    use crate::fight::attack::AttackKind;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    fn idle() -> [InputFrame; 2] {
        [InputFrame::IDLE, InputFrame::IDLE]
    }

    fn walk_together(fight: &mut Fight, config: &ArcadeConfig) {
        let inputs = [
            InputFrame::IDLE.with(Action::MoveRight),
            InputFrame::IDLE.with(Action::MoveLeft),
        ];
        while fight.fighter(Side::P2).rect().left() - fight.fighter(Side::P1).rect().right() > 30.0 {
            tick(fight, &inputs, config);
        }
        tick(fight, &idle(), config);
    }

    #[test]
    fn test_spawn_positions() {
        let config = ArcadeConfig::default();
        let fight = Fight::new(Roster::Kyo, Roster::Iori, 1, &config);
        assert_eq!(fight.fighter(Side::P1).body.position.x, 200.0);
        assert_eq!(fight.fighter(Side::P2).body.position.x, 950.0);
        assert!(!fight.is_over());
    }

    #[test]
    fn test_tick_determinism() {
        let config = ArcadeConfig::default();
        let mut a = Fight::new(Roster::Mai, Roster::Ryo, 77, &config);
        let mut b = Fight::new(Roster::Mai, Roster::Ryo, 77, &config);

        let inputs = [
            InputFrame::from_actions(&[Action::MoveRight, Action::Punch]),
            InputFrame::from_actions(&[Action::MoveLeft, Action::Kick]),
        ];
        for _ in 0..300 {
            tick(&mut a, &inputs, &config);
            tick(&mut b, &inputs, &config);
        }

        assert_eq!(a.frame, b.frame);
        assert_eq!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_hit_produces_sound_event_and_particles() {
        let config = ArcadeConfig::default();
        let mut fight = Fight::new(Roster::Kyo, Roster::Kyo, 5, &config);
        walk_together(&mut fight, &config);

        let result = tick(&mut fight, &[InputFrame::IDLE.with(Action::Punch), InputFrame::IDLE], &config);

        assert!(result.events.iter().any(|e| matches!(
            e.data,
            GameEventData::AttackStarted { side: Side::P1, attack: AttackKind::Punch }
        )));
        let hit = result
            .events
            .iter()
            .find(|e| matches!(e.data, GameEventData::AttackHit { .. }))
            .expect("punch should connect");
        assert_eq!(hit.sound(), Some(crate::game::events::SoundEffect::Hit));

        // Spawned 8 and already advanced one frame
        assert_eq!(fight.particles.len(), 8);
        assert_eq!(fight.fighter(Side::P2).health, 95);
        assert!(fight.particle_sprites().all(|(_, alpha)| (alpha - 0.95).abs() < 1e-6));

        // Sparks fade as they age
        tick(&mut fight, &idle(), &config);
        assert!(fight.particle_sprites().all(|(_, alpha)| (alpha - 0.9).abs() < 1e-6));
    }

    #[test]
    fn test_knockout_ends_fight() {
        let config = ArcadeConfig::default();
        let mut fight = Fight::new(Roster::Kyo, Roster::Mai, 9, &config);
        walk_together(&mut fight, &config);
        fight.fighter_mut(Side::P2).health = 3;

        let result = tick(&mut fight, &[InputFrame::IDLE.with(Action::Punch), InputFrame::IDLE], &config);
        assert_eq!(result.winner, Some(Side::P1));
        assert_eq!(fight.winner(), Some(Side::P1));
        assert!(result
            .events
            .iter()
            .any(|e| e.data == GameEventData::FightEnded { winner: Side::P1 }));

        // Finished fights do not advance
        let frame = fight.frame;
        let after = tick(&mut fight, &idle(), &config);
        assert!(after.events.is_empty());
        assert_eq!(fight.frame, frame);
    }

    #[test]
    fn test_double_knockout_goes_to_p2() {
        let config = ArcadeConfig::default();
        let mut fight = Fight::new(Roster::Kyo, Roster::Kyo, 9, &config);
        fight.fighter_mut(Side::P1).health = 0;
        fight.fighter_mut(Side::P2).health = 0;

        let result = tick(&mut fight, &idle(), &config);
        assert_eq!(result.winner, Some(Side::P2));
    }

    #[test]
    fn test_jump_event() {
        let config = ArcadeConfig::default();
        let mut fight = Fight::new(Roster::Kyo, Roster::Kyo, 1, &config);
        let result = tick(&mut fight, &[InputFrame::IDLE.with(Action::Jump), InputFrame::IDLE], &config);
        assert!(result
            .events
            .iter()
            .any(|e| e.data == GameEventData::Jumped { jumper: Jumper::Fighter(Side::P1) }));
        assert!(!fight.fighter(Side::P1).body.on_ground);
    }

    #[test]
    fn test_fighters_never_overlap_after_tick() {
        let config = ArcadeConfig::default();
        let mut fight = Fight::new(Roster::Ryo, Roster::Mai, 3, &config);
        let inputs = [
            InputFrame::IDLE.with(Action::MoveRight),
            InputFrame::IDLE.with(Action::MoveLeft),
        ];
        for _ in 0..200 {
            tick(&mut fight, &inputs, &config);
            let a = fight.fighter(Side::P1).rect();
            let b = fight.fighter(Side::P2).rect();
            assert!(!a.intersects(&b) || a.overlap_x(&b) < 1e-3);
        }
    }

    #[test]
    fn test_replay_matches_live_fight() {
        let config = ArcadeConfig::default();
        let mut live = Fight::new(Roster::Iori, Roster::Kyo, 4242, &config);
        let mut recordings = [InputRecording::new(), InputRecording::new()];
        let mut rng = StdRng::seed_from_u64(0xA11CE);

        for _ in 0..600 {
            let mut inputs = [InputFrame::IDLE; 2];
            for input in inputs.iter_mut() {
                for action in [
                    Action::MoveLeft,
                    Action::MoveRight,
                    Action::Jump,
                    Action::Punch,
                    Action::Kick,
                    Action::Special,
                    Action::Block,
                ] {
                    input.set(action, rng.gen_bool(0.2));
                }
            }
            recordings[0].record(inputs[0]);
            recordings[1].record(inputs[1]);
            let result = tick(&mut live, &inputs, &config);
            if result.winner.is_some() {
                break;
            }

            for fighter in &live.fighters {
                assert!(fighter.health <= fighter.max_health);
                assert!(fighter.energy >= 0.0 && fighter.energy <= fighter.max_energy);
            }
        }

        let fresh = Fight::new(Roster::Iori, Roster::Kyo, 4242, &config);
        let (replayed, _) = replay_fight(fresh, &recordings, &config);
        assert_eq!(replayed.frame, live.frame);
        assert_eq!(replayed.compute_hash(), live.compute_hash());
    }
}
