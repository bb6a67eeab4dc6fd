//! Platform Physics & Collision
//!
//! One-way platform landing, player-vs-enemy contact, pickups and
//! checkpoints.
//!
//! Detection functions only read state and return what they found; the
//! level tick applies the results after each pass, so no collection is
//! modified while it is being walked.

use crate::core::kinematics::Body;
use crate::core::rect::Rect;

use super::enemy::{Enemy, EnemyKind};
use super::player::Player;
use super::world::{Checkpoint, Coin, Platform, PlatformKind, PowerUp};

/// Land a falling body on any platform it dropped onto this frame.
///
/// A platform only catches a body that is moving down, overlaps it, and
/// whose bottom was at or above the platform top before moving. Upward
/// and sideways approaches pass straight through.
///
/// Returns the kind of surface landed on; a spike anywhere under the body
/// wins over a safe surface.
pub fn land_on_platforms(body: &mut Body, prev_bottom: f32, platforms: &[Platform]) -> Option<PlatformKind> {
    if body.velocity.y <= 0.0 {
        return None;
    }

    let mut landed = None;
    for platform in platforms {
        if prev_bottom > platform.top() || !body.rect().intersects(&platform.rect) {
            continue;
        }
        body.land_on(platform.top());
        if landed != Some(PlatformKind::Spike) {
            landed = Some(platform.kind);
        }
    }
    landed
}

/// A player touching an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyContact {
    pub index: usize,
    pub kind: EnemyKind,
    /// Landed on top: the enemy is defeated
    pub stomp: bool,
}

/// Find every enemy the player is touching, in list order.
///
/// A contact is a stomp when the player was `descending` into this frame's
/// landing pass and its bottom was above the enemy's vertical centre before
/// this frame's movement. Landing zeroes the velocity, so callers sample
/// `descending` before it.
pub fn check_enemy_contacts(player: &Player, descending: bool, enemies: &[Enemy]) -> Vec<EnemyContact> {
    let rect = player.rect();

    enemies
        .iter()
        .enumerate()
        .filter(|(_, enemy)| rect.intersects(&enemy.rect()))
        .map(|(index, enemy)| EnemyContact {
            index,
            kind: enemy.kind,
            stomp: descending && player.prev_bottom < enemy.rect().center().y,
        })
        .collect()
}

/// Indices of coins overlapping `rect`.
pub fn check_coin_pickups(rect: &Rect, coins: &[Coin]) -> Vec<usize> {
    coins
        .iter()
        .enumerate()
        .filter(|(_, coin)| rect.intersects(&coin.rect))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of power-ups overlapping `rect`.
pub fn check_powerup_pickups(rect: &Rect, powerups: &[PowerUp]) -> Vec<usize> {
    powerups
        .iter()
        .enumerate()
        .filter(|(_, powerup)| rect.intersects(&powerup.rect()))
        .map(|(i, _)| i)
        .collect()
}

/// Respawn x of the last checkpoint overlapping `rect`, if any.
pub fn check_checkpoints(rect: &Rect, checkpoints: &[Checkpoint]) -> Option<f32> {
    checkpoints
        .iter()
        .filter(|checkpoint| rect.intersects(&checkpoint.rect))
        .last()
        .map(Checkpoint::respawn_x)
}

/// Remove the items at `indices` (ascending, no duplicates).
pub fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) {
    for &index in indices.iter().rev() {
        if index < items.len() {
            items.remove(index);
        }
    }
}
