//! Keyboard-driven player control.
//!
//! The controller never touches its owner's transform or sprite. It polls
//! the [`InputSource`](crate::input::InputSource) and emits events, which
//! the manager applies on the next drain:
//!
//! - a movement key held → `SwitchAnimation` (when the heading changes) and
//!   `PlayerMove` with the normalised direction × the stage's player speed
//! - the last movement key released → `PlayerStop`
//! - the shoot key pressed → `PlayerShoot`

use super::AnimationKind;
use crate::ecs::component::{Component, UpdateContext};
use crate::event::Event;
use crate::input::KeyCode;
use crate::math::Vec2;

#[derive(Debug, Clone)]
pub struct KeyboardControl {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub shoot: KeyCode,
    facing: AnimationKind,
    moving: bool,
}

impl KeyboardControl {
    /// Arrow keys to move, space to shoot.
    pub fn new() -> Self {
        Self::with_keys(
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
            KeyCode::Space,
        )
    }

    pub fn with_keys(up: KeyCode, down: KeyCode, left: KeyCode, right: KeyCode, shoot: KeyCode) -> Self {
        Self {
            up,
            down,
            left,
            right,
            shoot,
            facing: AnimationKind::Down,
            moving: false,
        }
    }

    /// Direction of the last movement. Projectiles fly this way.
    pub fn facing(&self) -> AnimationKind {
        self.facing
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }
}

impl Default for KeyboardControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Horizontal movement wins the facing when moving diagonally.
fn heading(dir: Vec2) -> AnimationKind {
    if dir.x > 0.0 {
        AnimationKind::Right
    } else if dir.x < 0.0 {
        AnimationKind::Left
    } else if dir.y < 0.0 {
        AnimationKind::Up
    } else {
        AnimationKind::Down
    }
}

impl Component for KeyboardControl {
    fn name(&self) -> &'static str {
        "KeyboardControl"
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>, _dt: f32) {
        let owner = ctx.owner;
        let mut dir = Vec2::ZERO;
        if ctx.input.is_down(self.up) {
            dir.y -= 1.0;
        }
        if ctx.input.is_down(self.down) {
            dir.y += 1.0;
        }
        if ctx.input.is_down(self.left) {
            dir.x -= 1.0;
        }
        if ctx.input.is_down(self.right) {
            dir.x += 1.0;
        }

        if dir != Vec2::ZERO {
            let facing = heading(dir);
            if facing != self.facing || !self.moving {
                self.facing = facing;
                ctx.emit(Event::SwitchAnimation {
                    entity: owner,
                    animation: facing,
                });
            }
            self.moving = true;
            ctx.emit(Event::PlayerMove {
                entity: owner,
                velocity: dir.normalize() * ctx.stage.player_speed,
            });
        } else if self.moving {
            // Released, or opposite keys cancelling out.
            self.moving = false;
            ctx.emit(Event::PlayerStop { entity: owner });
        }

        if ctx.input.was_pressed(self.shoot) {
            ctx.emit(Event::PlayerShoot { entity: owner });
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

    fn step(e: &mut Entity, input: &InputState, stage: &Stage) -> Vec<Event> {
        let mut events = EventQueue::new();
        let mut env = FrameEnv {
            events: &mut events,
            input,
            stage,
            elapsed_ms: 0,
        };
        e.update(0.016, &mut env);
        events.take().into_iter().collect()
    }

    fn player() -> Entity {
        let mut e = Entity::new(EntityId(1), "player", Layer::Player);
        e.add_component(KeyboardControl::new(), &AssetRegistry::new(), &Stage::default());
        e
    }

    #[test]
    fn move_emits_animation_then_velocity() {
        let stage = Stage::default();
        let mut input = InputState::new();
        let mut e = player();

        input.press(KeyCode::ArrowRight);
        let events = step(&mut e, &input, &stage);
        assert_eq!(
            events,
            vec![
                Event::SwitchAnimation {
                    entity: EntityId(1),
                    animation: AnimationKind::Right
                },
                Event::PlayerMove {
                    entity: EntityId(1),
                    velocity: Vec2::new(400.0, 0.0)
                },
            ]
        );

        // Still holding: no new animation switch.
        input.clear_just();
        let events = step(&mut e, &input, &stage);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::PlayerMove { .. }));
    }

    #[test]
    fn diagonal_is_normalised() {
        let stage = Stage::default();
        let mut input = InputState::new();
        let mut e = player();
        input.press(KeyCode::ArrowUp);
        input.press(KeyCode::ArrowLeft);

        let events = step(&mut e, &input, &stage);
        let Some(Event::PlayerMove { velocity, .. }) = events.last().copied() else {
            panic!("expected a move, got {events:?}");
        };
        assert!((velocity.length() - 400.0).abs() < 1e-3);
        assert_eq!(e.get_component::<KeyboardControl>().unwrap().facing(), AnimationKind::Left);
    }

    #[test]
    fn release_emits_stop_once() {
        let stage = Stage::default();
        let mut input = InputState::new();
        let mut e = player();

        input.press(KeyCode::ArrowDown);
        step(&mut e, &input, &stage);
        input.clear_just();

        input.release(KeyCode::ArrowDown);
        let events = step(&mut e, &input, &stage);
        assert_eq!(events, vec![Event::PlayerStop { entity: EntityId(1) }]);

        input.clear_just();
        assert!(step(&mut e, &input, &stage).is_empty());
    }

    #[test]
    fn shoot_on_press_only() {
        let stage = Stage::default();
        let mut input = InputState::new();
        let mut e = player();

        input.press(KeyCode::Space);
        assert_eq!(
            step(&mut e, &input, &stage),
            vec![Event::PlayerShoot { entity: EntityId(1) }]
        );
        input.clear_just();
        assert!(step(&mut e, &input, &stage).is_empty());
    }
}
