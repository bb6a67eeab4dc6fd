//! Combat Resolver
//!
//! Per-frame hit detection between the two fighters, damage and knockback
//! application, and body separation.
//!
//! Hits are collected against the pre-hit state of both fighters, then
//! applied. Knockback only changes velocity, so the order between the two
//! sides does not matter.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::config::FightConfig;
use crate::core::kinematics::{clamp_horizontal, HorizontalBounds};
use crate::core::vec2::Vec2;

use super::attack::{compute_damage, AttackKind};
use super::character::{Fighter, Side};

/// An attack that connected this frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub attacker: Side,
    pub victim: Side,
    pub attack: AttackKind,
    /// Damage taken; `None` when the victim was still in hit-stun
    pub damage: Option<u32>,
    pub blocked: bool,
    /// Victim's centre at the moment of impact
    pub impact: Vec2,
}

/// A pending hit, detected before any mutation.
struct PendingHit {
    attacker: Side,
    attack: AttackKind,
    damage: u32,
    knockback: f32,
}

/// Check both live attacks and apply the ones that connect.
pub fn resolve_attacks(fighters: &mut [Fighter; 2], config: &FightConfig) -> Vec<Hit> {
    // Collect hits first
    let mut pending: Vec<PendingHit> = Vec::with_capacity(2);
    for side in [Side::P1, Side::P2] {
        let attacker = &fighters[side.index()];
        let victim = &fighters[side.opponent().index()];

        let Some(kind) = attacker.current_attack else {
            continue;
        };
        let Some(hitbox) = attacker.attack_rect(&config.attacks) else {
            continue;
        };
        if !hitbox.intersects(&victim.rect()) {
            continue;
        }

        let spec = config.attacks.get(kind);
        pending.push(PendingHit {
            attacker: side,
            attack: kind,
            damage: compute_damage(spec, attacker.combo_count, victim.is_blocking, config.block_reduction),
            knockback: f32::from(attacker.body.facing) * spec.knockback,
        });
    }

    // Then apply them
    let mut hits = Vec::with_capacity(pending.len());
    for hit in pending {
        let victim_side = hit.attacker.opponent();
        let victim = &mut fighters[victim_side.index()];
        let blocked = victim.is_blocking;
        let damage = victim.take_hit(hit.damage, hit.knockback, config.hit_stun);
        let impact = victim.body.center();

        fighters[hit.attacker.index()].current_attack = None;

        debug!(
            attacker = ?hit.attacker,
            attack = hit.attack.name(),
            ?damage,
            blocked,
            "attack connected"
        );

        hits.push(Hit {
            attacker: hit.attacker,
            victim: victim_side,
            attack: hit.attack,
            damage,
            blocked,
            impact,
        });
    }

    hits
}

/// Push overlapping fighters apart by half the overlap each.
///
/// Returns whether they were overlapping.
pub fn separate(fighters: &mut [Fighter; 2], bounds: HorizontalBounds) -> bool {
    let a = fighters[0].rect();
    let b = fighters[1].rect();
    if !a.intersects(&b) {
        return false;
    }

    let half = a.overlap_x(&b) * 0.5;
    let (left, right) = if a.x <= b.x { (0, 1) } else { (1, 0) };
    fighters[left].body.position.x -= half;
    fighters[right].body.position.x += half;

    for fighter in fighters.iter_mut() {
        clamp_horizontal(&mut fighter.body, bounds);
    }
    true
}
