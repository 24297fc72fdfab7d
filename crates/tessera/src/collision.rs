//! # Collision: Rectangle Overlap and Tag Dispatch
//!
//! Every collidable entity carries a [`ColliderTag`] and a pixel rectangle.
//! The manager tests every ordered pair of colliders each frame with
//! [`check_rect_collision`] and maps the pair of tags to an [`Outcome`] with
//! [`outcome`]. The outcome only describes which events to enqueue; the
//! collision pass never mutates entities itself.
//!
//! ## Dispatch Table
//!
//! ```text
//!  tag a                 tag b                  outcome
//!  ───────────────────── ────────────────────── ──────────────────────────
//!  PLAYER                PROJECTILE             PlayerHit(a, b)
//!  ENEMY                 FRIENDLY_PROJECTILE    KillEnemy(a), Destroy(b)
//!  anything else                                nothing
//! ```
//!
//! The pass visits ordered pairs, so each unordered overlapping pair is seen
//! twice and the table only needs the one orientation.

use serde::{Deserialize, Serialize};

use crate::math::Rect;

/// Inclusive-edge axis-aligned overlap test.
///
/// Rectangles that merely touch along an edge or at a corner count as
/// colliding.
pub fn check_rect_collision(a: &Rect, b: &Rect) -> bool {
    a.x + a.w >= b.x && b.x + b.w >= a.x && a.y + a.h >= b.y && b.y + b.h >= a.y
}

/// What kind of thing a collider represents. The numeric values are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ColliderTag {
    #[default]
    None = 0,
    Player = 1,
    Enemy = 2,
    Projectile = 3,
    FriendlyProjectile = 4,
    LevelComplete = 5,
}

impl ColliderTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ColliderTag::None => "NONE",
            ColliderTag::Player => "PLAYER",
            ColliderTag::Enemy => "ENEMY",
            ColliderTag::Projectile => "PROJECTILE",
            ColliderTag::FriendlyProjectile => "FRIENDLY_PROJECTILE",
            ColliderTag::LevelComplete => "LEVEL_COMPLETE",
        }
    }
}

/// The reaction to an overlapping (a, b) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Nothing,
    /// The first entity is the player, hit by the second, an enemy
    /// projectile that is consumed.
    PlayerHit,
    /// The first entity is an enemy killed by the second, a friendly
    /// projectile that is consumed.
    EnemyKilled,
}

/// Total dispatch over ordered tag pairs.
pub fn outcome(a: ColliderTag, b: ColliderTag) -> Outcome {
    match (a, b) {
        (ColliderTag::Player, ColliderTag::Projectile) => Outcome::PlayerHit,
        (ColliderTag::Enemy, ColliderTag::FriendlyProjectile) => Outcome::EnemyKilled,
        _ => Outcome::Nothing,
    }
}
