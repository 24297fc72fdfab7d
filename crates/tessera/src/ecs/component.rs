//! # Components: Behaviour Attached to Entities
//!
//! Every component implements [`Component`]: a name plus optional
//! `initialize`, `update`, and `render` hooks. The set of component kinds is
//! closed, so instead of boxing trait objects and downcasting through
//! `TypeId`, an entity stores [`AnyComponent`], a plain enum with one variant
//! per kind, and [`ComponentKind`] indexes a fixed-size lookup table.
//!
//! ## Contexts
//!
//! Hooks receive a context instead of a pointer back to their entity:
//!
//! ```text
//!  InitContext                        UpdateContext
//!  ─────────────────────────────      ─────────────────────────────────
//!  owner, owner_name                  owner, owner_name
//!  siblings  (other components)       siblings  (other components)
//!  assets    (texture/font lookup)    events    (queue for next drain)
//!  stage     (camera, map, speed)     input, stage, elapsed_ms
//! ```
//!
//! `siblings` borrows every component of the owner except the one running,
//! so a sprite can read its transform while the transform itself is safely
//! out of reach.

use std::fmt;

use super::entity::EntityId;
use crate::asset::AssetProvider;
use crate::components::{
    Collider, KeyboardControl, LifeTimer, ProjectileEmitter, Sprite, TextLabel, Tile, Transform,
};
use crate::event::{Event, EventQueue};
use crate::input::InputSource;
use crate::render::Renderer;
use crate::stage::Stage;

/// Behaviour hooks shared by every component kind.
pub trait Component: fmt::Debug {
    /// Human-readable kind name, used in logs.
    fn name(&self) -> &'static str;

    /// Called once, right after the component is attached.
    fn initialize(&mut self, _ctx: &mut InitContext<'_>) {}

    /// Called once per frame while the owner is active.
    fn update(&mut self, _ctx: &mut UpdateContext<'_>, _dt: f32) {}

    /// Called once per frame while the owner is active, in layer order.
    fn render(&self, _renderer: &mut dyn Renderer) {}
}

/// A concrete component type with a fixed [`ComponentKind`].
pub trait ComponentType: Component + Sized + 'static {
    const KIND: ComponentKind;

    fn from_any(any: &AnyComponent) -> Option<&Self>;
    fn from_any_mut(any: &mut AnyComponent) -> Option<&mut Self>;
    fn into_any(self) -> AnyComponent;
}

/// Generate `ComponentKind`, `AnyComponent`, and the `ComponentType` impls
/// from one list so the three can't drift apart.
macro_rules! component_kinds {
    ($($kind:ident),* $(,)?) => {
        /// Discriminant of a component type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ComponentKind {
            $($kind),*
        }

        impl ComponentKind {
            pub const ALL: &'static [ComponentKind] = &[$(ComponentKind::$kind),*];
            pub const COUNT: usize = Self::ALL.len();

            pub fn index(self) -> usize {
                self as usize
            }
        }

        /// Storage for any one component.
        #[derive(Debug)]
        pub enum AnyComponent {
            $($kind($kind)),*
        }

        impl AnyComponent {
            pub fn kind(&self) -> ComponentKind {
                match self {
                    $(AnyComponent::$kind(_) => ComponentKind::$kind),*
                }
            }

            pub fn as_component(&self) -> &dyn Component {
                match self {
                    $(AnyComponent::$kind(c) => c),*
                }
            }

            pub fn as_component_mut(&mut self) -> &mut dyn Component {
                match self {
                    $(AnyComponent::$kind(c) => c),*
                }
            }
        }

        $(
            impl ComponentType for $kind {
                const KIND: ComponentKind = ComponentKind::$kind;

                fn from_any(any: &AnyComponent) -> Option<&Self> {
                    match any {
                        AnyComponent::$kind(c) => Some(c),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn from_any_mut(any: &mut AnyComponent) -> Option<&mut Self> {
                    match any {
                        AnyComponent::$kind(c) => Some(c),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn into_any(self) -> AnyComponent {
                    AnyComponent::$kind(self)
                }
            }
        )*
    };
}

component_kinds!(
    Transform,
    Sprite,
    KeyboardControl,
    Collider,
    LifeTimer,
    ProjectileEmitter,
    TextLabel,
    Tile,
);

// ── Siblings ─────────────────────────────────────────────────────────

/// The owner's other components, as seen from the one currently running.
pub struct Siblings<'a> {
    before: &'a mut [AnyComponent],
    after: &'a mut [AnyComponent],
    current: usize,
    index: &'a [Option<usize>; ComponentKind::COUNT],
}

impl<'a> Siblings<'a> {
    pub(crate) fn new(
        before: &'a mut [AnyComponent],
        after: &'a mut [AnyComponent],
        current: usize,
        index: &'a [Option<usize>; ComponentKind::COUNT],
    ) -> Self {
        Self {
            before,
            after,
            current,
            index,
        }
    }

    fn slot(&self, kind: ComponentKind) -> Option<usize> {
        self.index[kind.index()].filter(|&s| s != self.current)
    }

    /// The owner's indexed component of kind `T`, unless that is the caller.
    pub fn get<T: ComponentType>(&self) -> Option<&T> {
        let slot = self.slot(T::KIND)?;
        let any = if slot < self.current {
            self.before.get(slot)?
        } else {
            self.after.get(slot - self.current - 1)?
        };
        T::from_any(any)
    }

    pub fn get_mut<T: ComponentType>(&mut self) -> Option<&mut T> {
        let slot = self.slot(T::KIND)?;
        let any = if slot < self.current {
            self.before.get_mut(slot)?
        } else {
            self.after.get_mut(slot - self.current - 1)?
        };
        T::from_any_mut(any)
    }

    pub fn has<T: ComponentType>(&self) -> bool {
        self.slot(T::KIND).is_some()
    }
}

// ── Contexts ─────────────────────────────────────────────────────────

/// Handed to [`Component::initialize`].
pub struct InitContext<'a> {
    pub owner: EntityId,
    pub owner_name: &'a str,
    pub siblings: Siblings<'a>,
    pub assets: &'a dyn AssetProvider,
    pub stage: &'a Stage,
}

/// Handed to [`Component::update`].
pub struct UpdateContext<'a> {
    pub owner: EntityId,
    pub owner_name: &'a str,
    pub siblings: Siblings<'a>,
    pub events: &'a mut EventQueue,
    pub input: &'a dyn InputSource,
    pub stage: &'a Stage,
    /// Simulation time since the manager was created, in milliseconds.
    pub elapsed_ms: u64,
    pub(crate) destroy_requested: bool,
}

impl UpdateContext<'_> {
    /// Queue an event for the next drain.
    pub fn emit(&mut self, event: Event) {
        self.events.add(event);
    }

    /// Deactivate the owner after this frame's component updates.
    pub fn destroy_owner(&mut self) {
        self.destroy_requested = true;
    }
}

/// Per-frame state the manager lends to every entity update.
pub(crate) struct FrameEnv<'a> {
    pub events: &'a mut EventQueue,
    pub input: &'a dyn InputSource,
    pub stage: &'a Stage,
    pub elapsed_ms: u64,
}
