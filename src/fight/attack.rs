//! Attack Table
//!
//! Punch, kick and special: their reach, damage, cooldown, energy cost and
//! knockback, plus the hitbox geometry and damage formula shared by both
//! fighters.

use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;

/// Hitboxes skip this many pixels at the top and bottom of the fighter box.
pub const HITBOX_VERTICAL_INSET: f32 = 20.0;

/// Per-step combo damage bonus.
pub const COMBO_BONUS_PER_HIT: f64 = 0.1;

/// The three attacks every fighter can throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AttackKind {
    Punch = 0,
    Kick = 1,
    Special = 2,
}

impl AttackKind {
    /// All attacks, in table order.
    pub const ALL: [AttackKind; 3] = [AttackKind::Punch, AttackKind::Kick, AttackKind::Special];

    pub fn name(self) -> &'static str {
        match self {
            AttackKind::Punch => "punch",
            AttackKind::Kick => "kick",
            AttackKind::Special => "special",
        }
    }
}

/// How starting an attack affects the combo counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComboEffect {
    /// Count +1 and (re)open the combo window.
    Extend,
    /// Drop the count to zero.
    Reset,
}

/// Tuning for one attack.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackSpec {
    /// Hitbox width
    pub range: f32,
    /// Gap between the fighter's front edge and the hitbox
    pub extra_offset: f32,
    /// Base damage before combo and block modifiers
    pub damage: u32,
    /// Frames before another attack (or a jump) is allowed
    pub cooldown: u32,
    pub energy_cost: f32,
    /// Knockback magnitude, applied away from the attacker
    pub knockback: f32,
    pub combo: ComboEffect,
}

/// Attack tuning for all three attacks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackTable {
    pub punch: AttackSpec,
    pub kick: AttackSpec,
    pub special: AttackSpec,
}

impl Default for AttackTable {
    fn default() -> Self {
        Self {
            punch: AttackSpec {
                range: 60.0,
                extra_offset: 0.0,
                damage: 5,
                cooldown: 15,
                energy_cost: 10.0,
                knockback: 2.0,
                combo: ComboEffect::Extend,
            },
            kick: AttackSpec {
                range: 80.0,
                extra_offset: 10.0,
                damage: 8,
                cooldown: 20,
                energy_cost: 15.0,
                knockback: 3.0,
                combo: ComboEffect::Extend,
            },
            special: AttackSpec {
                range: 120.0,
                extra_offset: 20.0,
                damage: 20,
                cooldown: 40,
                energy_cost: 40.0,
                knockback: 5.0,
                combo: ComboEffect::Reset,
            },
        }
    }
}

impl AttackTable {
    /// Look up the tuning for an attack.
    #[inline]
    pub fn get(&self, kind: AttackKind) -> &AttackSpec {
        match kind {
            AttackKind::Punch => &self.punch,
            AttackKind::Kick => &self.kick,
            AttackKind::Special => &self.special,
        }
    }
}

/// Hitbox of an attack thrown by a fighter occupying `body`.
///
/// The box sits in front of the fighter (on its facing side), separated
/// from the body by the attack's extra offset.
pub fn hitbox(body: Rect, facing: i8, spec: &AttackSpec) -> Rect {
    let x = if facing < 0 {
        body.left() - spec.extra_offset - spec.range
    } else {
        body.right() + spec.extra_offset
    };
    Rect::new(
        x,
        body.y + HITBOX_VERTICAL_INSET,
        spec.range,
        (body.h - 2.0 * HITBOX_VERTICAL_INSET).max(0.0),
    )
}

/// Damage dealt by an attack.
///
/// A combo of two or more scales base damage by `1 + 0.1 * combo`;
/// a blocking victim then takes only `block_reduction` of that. Each step
/// truncates to whole points.
pub fn compute_damage(spec: &AttackSpec, combo_count: u32, blocking: bool, block_reduction: f32) -> u32 {
    let mut damage = spec.damage;

    if combo_count > 1 {
        let multiplier = 1.0 + f64::from(combo_count) * COMBO_BONUS_PER_HIT;
        damage = (f64::from(damage) * multiplier) as u32;
    }

    if blocking {
        damage = (f64::from(damage) * f64::from(block_reduction)) as u32;
    }

    damage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_ordering() {
        let table = AttackTable::default();
        assert!(table.punch.damage < table.kick.damage);
        assert!(table.kick.damage < table.special.damage);
        assert!(table.punch.range < table.kick.range);
        assert!(table.kick.range < table.special.range);
    }

    #[test]
    fn test_hitbox_faces_forward() {
        let table = AttackTable::default();
        let body = Rect::new(200.0, 550.0, 50.0, 100.0);

        let right = hitbox(body, 1, &table.kick);
        assert_eq!(right, Rect::new(260.0, 570.0, 80.0, 60.0));

        let left = hitbox(body, -1, &table.kick);
        assert_eq!(left, Rect::new(110.0, 570.0, 80.0, 60.0));
        assert_eq!(left.right(), body.left() - table.kick.extra_offset);
    }

    #[test]
    fn test_punch_hitbox_touches_body() {
        let table = AttackTable::default();
        let body = Rect::new(0.0, 0.0, 50.0, 100.0);
        let hb = hitbox(body, 1, &table.punch);
        assert_eq!(hb.left(), body.right());
        assert_eq!(hb.w, 60.0);
    }

    #[test]
    fn test_plain_damage() {
        let table = AttackTable::default();
        assert_eq!(compute_damage(&table.punch, 0, false, 0.3), 5);
        assert_eq!(compute_damage(&table.punch, 1, false, 0.3), 5);
        assert_eq!(compute_damage(&table.special, 0, false, 0.3), 20);
    }

    #[test]
    fn test_combo_damage() {
        let table = AttackTable::default();
        // 5 * 1.2 = 6
        assert_eq!(compute_damage(&table.punch, 2, false, 0.3), 6);
        // 8 * 1.3 = 10.4 -> 10
        assert_eq!(compute_damage(&table.kick, 3, false, 0.3), 10);
        // 20 * 1.5 = 30
        assert_eq!(compute_damage(&table.special, 5, false, 0.3), 30);
    }

    #[test]
    fn test_block_damage() {
        let table = AttackTable::default();
        // 5 * 0.3 = 1.5 -> 1
        assert_eq!(compute_damage(&table.punch, 0, true, 0.3), 1);
        // 20 * 0.3 = 6
        assert_eq!(compute_damage(&table.special, 0, true, 0.3), 6);
        // Combo applies before block: 8 * 1.2 = 9.6 -> 9, 9 * 0.3 = 2.7 -> 2
        assert_eq!(compute_damage(&table.kick, 2, true, 0.3), 2);
    }

    #[test]
    fn test_special_resets_combo() {
        let table = AttackTable::default();
        assert_eq!(table.special.combo, ComboEffect::Reset);
        assert_eq!(table.punch.combo, ComboEffect::Extend);
        assert_eq!(table.kick.combo, ComboEffect::Extend);
    }
}
