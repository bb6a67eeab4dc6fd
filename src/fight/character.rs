//! Fighters
//!
//! The roster is a closed set with a static stat table. A [`Fighter`] is one
//! roster pick placed in the arena: its body, health and energy, and the
//! timers that drive attacks, combos and hit-stun.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::config::FightConfig;
use crate::core::hash::StateHasher;
use crate::core::kinematics::{integrate, Body, KinematicsParams};
use crate::core::rect::Rect;
use crate::core::timer::FrameTimer;
use crate::core::vec2::Vec2;
use crate::game::input::{Action, InputFrame};

use super::attack::{hitbox, AttackKind, AttackTable, ComboEffect};

// =============================================================================
// ROSTER
// =============================================================================

/// Selectable characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Roster {
    Kyo = 0,
    Iori = 1,
    Mai = 2,
    Ryo = 3,
}

impl Roster {
    /// Selection order on the character screen.
    pub const ALL: [Roster; 4] = [Roster::Kyo, Roster::Iori, Roster::Mai, Roster::Ryo];

    pub fn name(self) -> &'static str {
        match self {
            Roster::Kyo => "Kyo",
            Roster::Iori => "Iori",
            Roster::Mai => "Mai",
            Roster::Ryo => "Ryo",
        }
    }

    /// Roster entry at a (wrapping) cursor position.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Base stats of one roster entry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterStats {
    pub max_health: u32,
    /// Walk speed (pixels per frame)
    pub speed: f32,
    /// Upward take-off velocity (negative y)
    pub jump_velocity: f32,
}

/// Stat table for the whole roster.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterTable {
    pub kyo: FighterStats,
    pub iori: FighterStats,
    pub mai: FighterStats,
    pub ryo: FighterStats,
}

impl RosterTable {
    /// Build the stock table around a base jump velocity.
    pub fn with_base_jump(base_jump: f32) -> Self {
        Self {
            kyo: FighterStats { max_health: 100, speed: 5.0, jump_velocity: base_jump },
            iori: FighterStats { max_health: 95, speed: 5.5, jump_velocity: base_jump - 1.0 },
            mai: FighterStats { max_health: 85, speed: 6.0, jump_velocity: base_jump + 1.0 },
            ryo: FighterStats { max_health: 110, speed: 4.5, jump_velocity: base_jump - 0.5 },
        }
    }

    #[inline]
    pub fn get(&self, roster: Roster) -> &FighterStats {
        match roster {
            Roster::Kyo => &self.kyo,
            Roster::Iori => &self.iori,
            Roster::Mai => &self.mai,
            Roster::Ryo => &self.ryo,
        }
    }
}

impl Default for RosterTable {
    fn default() -> Self {
        Self::with_base_jump(crate::config::DEFAULT_BASE_JUMP)
    }
}

// =============================================================================
// FIGHTER
// =============================================================================

/// Which side of the screen a fighter started on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    P1 = 0,
    P2 = 1,
}

impl Side {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// What a fighter's input did this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputOutcome {
    pub jumped: bool,
    pub attack: Option<AttackKind>,
}

/// One fighter in the arena.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fighter {
    pub roster: Roster,
    pub side: Side,
    pub body: Body,

    pub health: u32,
    pub max_health: u32,
    pub energy: f32,
    pub max_energy: f32,
    pub speed: f32,
    pub jump_velocity: f32,

    pub is_blocking: bool,
    /// At most one attack is live at a time
    pub current_attack: Option<AttackKind>,
    pub attack_cooldown: FrameTimer,
    pub combo_count: u32,
    pub combo_timer: FrameTimer,
    /// While active the fighter takes no damage
    pub hit_stun: FrameTimer,
    /// Horizontal impulse, decays every frame
    pub knockback: f32,
}

impl Fighter {
    /// Place a roster pick standing on the ground at `x`.
    ///
    /// P1 faces right, P2 faces left.
    pub fn new(roster: Roster, side: Side, x: f32, config: &FightConfig) -> Self {
        let stats = config.roster.get(roster);
        let size = config.fighter_size;
        let mut body = Body::new(Vec2::new(x, config.ground_y - size.y), size);
        body.on_ground = true;
        body.facing = match side {
            Side::P1 => 1,
            Side::P2 => -1,
        };

        Self {
            roster,
            side,
            body,
            health: stats.max_health,
            max_health: stats.max_health,
            energy: config.max_energy,
            max_energy: config.max_energy,
            speed: stats.speed,
            jump_velocity: stats.jump_velocity,
            is_blocking: false,
            current_attack: None,
            attack_cooldown: FrameTimer::IDLE,
            combo_count: 0,
            combo_timer: FrameTimer::IDLE,
            hit_stun: FrameTimer::IDLE,
            knockback: 0.0,
        }
    }

    /// Bounding box in arena space.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Apply one frame of held input.
    ///
    /// Movement, then jump, then punch/kick/special in that order, then
    /// block. Blocking overrides movement for the frame. Actions that are
    /// not allowed right now are ignored.
    pub fn apply_input(&mut self, input: &InputFrame, config: &FightConfig) -> InputOutcome {
        let mut outcome = InputOutcome::default();

        self.body.set_move_intent(input.move_direction(), self.speed);

        if input.is_held(Action::Jump) {
            outcome.jumped = self.try_jump();
        }

        for (action, kind) in [
            (Action::Punch, AttackKind::Punch),
            (Action::Kick, AttackKind::Kick),
            (Action::Special, AttackKind::Special),
        ] {
            if input.is_held(action) && self.try_attack(kind, config) {
                outcome.attack = Some(kind);
            }
        }

        if input.is_held(Action::Block) {
            self.is_blocking = true;
            self.body.velocity.x = 0.0;
        } else {
            self.is_blocking = false;
        }

        outcome
    }

    /// Jump if grounded and not recovering from an attack.
    pub fn try_jump(&mut self) -> bool {
        if self.attack_cooldown.is_active() {
            return false;
        }
        self.body.try_jump(self.jump_velocity)
    }

    /// Start an attack if the cooldown is clear and energy covers the cost.
    pub fn try_attack(&mut self, kind: AttackKind, config: &FightConfig) -> bool {
        let spec = config.attacks.get(kind);
        if self.attack_cooldown.is_active() || self.energy < spec.energy_cost {
            return false;
        }

        self.current_attack = Some(kind);
        self.attack_cooldown.start(spec.cooldown);
        self.energy = (self.energy - spec.energy_cost).clamp(0.0, self.max_energy);

        match spec.combo {
            ComboEffect::Extend => {
                self.combo_count += 1;
                self.combo_timer.start(config.combo_window);
            }
            ComboEffect::Reset => {
                self.combo_count = 0;
                self.combo_timer.clear();
            }
        }

        debug!(side = ?self.side, attack = kind.name(), energy = self.energy, "attack started");
        true
    }

    /// Receive a hit. Returns the damage actually taken.
    ///
    /// Ignored entirely while in hit-stun.
    pub fn take_hit(&mut self, damage: u32, knockback: f32, hit_stun: u32) -> Option<u32> {
        if self.hit_stun.is_active() {
            return None;
        }
        self.health = self.health.saturating_sub(damage);
        self.hit_stun.start(hit_stun);
        self.knockback = knockback;
        Some(damage)
    }

    /// Advance physics, timers and energy by one frame.
    pub fn update(&mut self, params: &KinematicsParams, config: &FightConfig) {
        if self.knockback != 0.0 {
            self.body.position.x += self.knockback;
            self.knockback *= config.knockback_decay;
            if self.knockback.abs() < config.knockback_cutoff {
                self.knockback = 0.0;
            }
        }

        integrate(&mut self.body, params);

        if self.attack_cooldown.tick() {
            self.current_attack = None;
        }
        if self.combo_timer.tick() {
            self.combo_count = 0;
        }
        self.hit_stun.tick();

        if !self.is_blocking && self.current_attack.is_none() {
            self.energy = (self.energy + config.energy_regen).min(self.max_energy);
        }
    }

    /// Hitbox of the live attack, if any.
    pub fn attack_rect(&self, attacks: &AttackTable) -> Option<Rect> {
        self.current_attack
            .map(|kind| hitbox(self.rect(), self.body.facing, attacks.get(kind)))
    }

    /// HUD view of this fighter.
    pub fn report(&self) -> FighterReport {
        FighterReport {
            name: self.roster.name(),
            health: self.health,
            max_health: self.max_health,
            energy: self.energy,
            max_energy: self.max_energy,
            combo_count: self.combo_count,
        }
    }

    /// Hash this fighter's state.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.roster as u8);
        hasher.update_u8(self.side as u8);
        hasher.update_vec2(self.body.position);
        hasher.update_vec2(self.body.velocity);
        hasher.update_u8(self.body.facing as u8);
        hasher.update_bool(self.body.on_ground);
        hasher.update_u32(self.health);
        hasher.update_f32(self.energy);
        hasher.update_bool(self.is_blocking);
        hasher.update_u8(self.current_attack.map_or(u8::MAX, |k| k as u8));
        hasher.update_timer(self.attack_cooldown);
        hasher.update_u32(self.combo_count);
        hasher.update_timer(self.combo_timer);
        hasher.update_timer(self.hit_stun);
        hasher.update_f32(self.knockback);
    }
}

/// Read-only numbers for a fight HUD.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FighterReport {
    pub name: &'static str,
    pub health: u32,
    pub max_health: u32,
    pub energy: f32,
    pub max_energy: f32,
    pub combo_count: u32,
}
