//! # Events: Deferred Cross-Entity Notifications
//!
//! Components and the collision pass never reach into other entities. They
//! append an [`Event`] to the [`EventQueue`], and the
//! [`EntityManager`](crate::ecs::EntityManager) applies it at the start of the
//! next update.
//!
//! ```text
//!  frame N                                  frame N+1
//!  ───────────────────────────────────────  ─────────────────────────────
//!  drain ─► update ─► collide ─► render     drain ─► update ─► ...
//!             │          │                    ▲
//!             └──────────┴── queue.add(e) ────┘
//! ```
//!
//! The drain takes the whole queue before dispatching, so anything a handler
//! enqueues lands in a fresh queue and waits for the following frame.

use std::collections::VecDeque;

use crate::components::sprite::AnimationKind;
use crate::ecs::EntityId;
use crate::math::Vec2;

/// A notification addressed to one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Switch the target's sprite to another animation row.
    SwitchAnimation { entity: EntityId, animation: AnimationKind },
    /// The target wants to fire a projectile.
    PlayerShoot { entity: EntityId },
    /// Set the target's velocity.
    PlayerMove { entity: EntityId, velocity: Vec2 },
    /// Zero the target's velocity.
    PlayerStop { entity: EntityId },
    /// The target (the player) was hit by `projectile`, which is consumed.
    PlayerHitByEnemyProjectile { entity: EntityId, projectile: EntityId },
    /// Remove the target from the world.
    DestroyEntity { entity: EntityId },
    /// The target (an enemy) was killed.
    KillEnemy { entity: EntityId },
}

impl Event {
    /// The entity this event is addressed to.
    pub fn target(&self) -> EntityId {
        match *self {
            Event::SwitchAnimation { entity, .. }
            | Event::PlayerShoot { entity }
            | Event::PlayerMove { entity, .. }
            | Event::PlayerStop { entity }
            | Event::PlayerHitByEnemyProjectile { entity, .. }
            | Event::DestroyEntity { entity }
            | Event::KillEnemy { entity } => entity,
        }
    }

    /// Short name for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Event::SwitchAnimation { .. } => "SwitchAnimation",
            Event::PlayerShoot { .. } => "PlayerShoot",
            Event::PlayerMove { .. } => "PlayerMove",
            Event::PlayerStop { .. } => "PlayerStop",
            Event::PlayerHitByEnemyProjectile { .. } => "PlayerHitByEnemyProjectile",
            Event::DestroyEntity { .. } => "DestroyEntity",
            Event::KillEnemy { .. } => "KillEnemy",
        }
    }
}

/// FIFO of pending events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event. Never fails.
    pub fn add(&mut self, event: Event) {
        log::trace!("Event queued: {:?}", event);
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Pending events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Take every pending event, leaving the queue empty.
    pub fn take(&mut self) -> VecDeque<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut q = EventQueue::new();
        q.add(Event::PlayerShoot { entity: EntityId(1) });
        q.add(Event::DestroyEntity { entity: EntityId(2) });
        q.add(Event::KillEnemy { entity: EntityId(3) });

        let targets: Vec<_> = q.iter().map(Event::target).collect();
        assert_eq!(targets, vec![EntityId(1), EntityId(2), EntityId(3)]);

        let drained = q.take();
        assert_eq!(drained.len(), 3);
        assert!(q.is_empty());
    }

    #[test]
    fn events_added_after_take_stay_queued() {
        let mut q = EventQueue::new();
        q.add(Event::PlayerStop { entity: EntityId(0) });
        let batch = q.take();
        q.add(Event::PlayerStop { entity: EntityId(1) });
        assert_eq!(batch.len(), 1);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn target_and_name() {
        let e = Event::PlayerMove {
            entity: EntityId(9),
            velocity: Vec2::new(1.0, 0.0),
        };
        assert_eq!(e.target(), EntityId(9));
        assert_eq!(e.kind_name(), "PlayerMove");
    }
}
