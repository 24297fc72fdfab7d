//! Self-destruct after a fixed time.

use crate::ecs::component::{Component, UpdateContext};

#[derive(Debug, Clone)]
pub struct LifeTimer {
    duration_ms: u32,
    elapsed_ms: u32,
}

impl LifeTimer {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            elapsed_ms: 0,
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn expired(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

impl Component for LifeTimer {
    fn name(&self) -> &'static str {
        "LifeTimer"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>, dt: f32) {
        // Rounded up so a tiny dt still makes progress.
        let step = (dt.max(0.0) * 1000.0).ceil() as u32;
        self.elapsed_ms = self.elapsed_ms.saturating_add(step);
        if self.expired() {
            ctx.destroy_owner();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetRegistry;
    use crate::ecs::component::FrameEnv;
    use crate::ecs::{Entity, EntityId, Layer};
    use crate::event::EventQueue;
    use crate::input::InputState;
    use crate::stage::Stage;

    #[test]
    fn expires_after_duration() {
        let stage = Stage::default();
        let input = InputState::new();
        let mut events = EventQueue::new();
        let mut e = Entity::new(EntityId(3), "boom", Layer::Projectile);
        e.add_component(LifeTimer::new(50), &AssetRegistry::new(), &stage);

        for _ in 0..3 {
            let mut env = FrameEnv {
                events: &mut events,
                input: &input,
                stage: &stage,
                elapsed_ms: 0,
            };
            e.update(0.0161, &mut env);
        }
        // 17 ms per step: 51 after three steps.
        assert_eq!(e.get_component::<LifeTimer>().unwrap().elapsed_ms(), 51);
        assert!(!e.is_active());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn still_alive_before_duration() {
        let t = LifeTimer::new(1000);
        assert!(!t.expired());
        assert!(LifeTimer::new(0).expired());
    }
}
