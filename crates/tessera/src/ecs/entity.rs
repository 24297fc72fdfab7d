//! # Entity: Named Container of Components
//!
//! An [`Entity`] is an id, a short name, a render layer, an active flag, and
//! an ordered list of components. Entities are created by
//! [`EntityManager::add_entity`](super::EntityManager::add_entity) and removed
//! by [`EntityManager::destroy_entity`](super::EntityManager::destroy_entity);
//! nothing else constructs or drops them.
//!
//! ## Storage
//!
//! ```text
//! Entity
//!   components: [Transform, Sprite, Collider, Sprite]   attachment order
//!   index:      Transform ─► 0                          one slot per kind
//!               Sprite    ─► 3   (last registration wins)
//!               Collider  ─► 2
//! ```
//!
//! `update` and `render` walk the list in attachment order, so both `Sprite`
//! instances above run. `get`/`has` go through the kind index and only see
//! the most recently attached one.
//!
//! ## IDs
//!
//! [`EntityId`]s come from a single counter in the manager. They are never
//! reused, so a stale id can only ever miss; it can't alias a newer entity.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::component::{
    AnyComponent, ComponentKind, ComponentType, FrameEnv, InitContext, Siblings, UpdateContext,
};
use crate::asset::AssetProvider;
use crate::event::{Event, EventQueue};
use crate::render::Renderer;
use crate::stage::Stage;

/// Name given to every map tile entity. Tiles are skipped by per-entity
/// collision queries.
pub const TILE_NAME: &str = "Tile";

/// Unique, monotonically increasing entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Render/update layer. Lower layers draw first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Layer {
    Tilemap = 0,
    Vegetation = 1,
    Enemy = 2,
    Obstacle = 3,
    Player = 4,
    Projectile = 5,
    Ui = 6,
}

impl Layer {
    pub const COUNT: usize = 7;

    /// Every layer, in draw order.
    pub const ALL: [Layer; Layer::COUNT] = [
        Layer::Tilemap,
        Layer::Vegetation,
        Layer::Enemy,
        Layer::Obstacle,
        Layer::Player,
        Layer::Projectile,
        Layer::Ui,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Tilemap => "TILEMAP",
            Layer::Vegetation => "VEGETATION",
            Layer::Enemy => "ENEMY",
            Layer::Obstacle => "OBSTACLE",
            Layer::Player => "PLAYER",
            Layer::Projectile => "PROJECTILE",
            Layer::Ui => "UI",
        }
    }
}

/// Bounded entity name.
///
/// Longer names are cut at the last char boundary that fits; empty names are
/// replaced with a placeholder. Both cases are logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityName(String);

impl EntityName {
    pub const CAPACITY: usize = 32;
    pub const PLACEHOLDER: &'static str = "unnamed";

    pub fn new(name: &str) -> Self {
        if name.is_empty() {
            log::error!("Entity created with an empty name, using \"{}\"", Self::PLACEHOLDER);
            return Self(Self::PLACEHOLDER.to_string());
        }
        if name.len() <= Self::CAPACITY {
            return Self(name.to_string());
        }
        let mut end = Self::CAPACITY;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        log::warn!(
            "Entity name \"{}\" exceeds {} bytes, truncated to \"{}\"",
            name,
            Self::CAPACITY,
            &name[..end]
        );
        Self(name[..end].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A game object.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    name: EntityName,
    layer: Layer,
    active: bool,
    components: Vec<AnyComponent>,
    /// Kind → position in `components` of the latest instance of that kind.
    index: [Option<usize>; ComponentKind::COUNT],
}

impl Entity {
    pub(crate) fn new(id: EntityId, name: &str, layer: Layer) -> Self {
        Self {
            id,
            name: EntityName::new(name),
            layer,
            active: true,
            components: Vec::new(),
            index: [None; ComponentKind::COUNT],
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Names of every attached component, in attachment order.
    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.as_component().name()).collect()
    }

    // ── Components ───────────────────────────────────────────────────

    /// Attach a component, register it under its kind, and initialize it.
    ///
    /// Initialization runs after registration, so the new component can look
    /// up every sibling attached before it. Attaching a second component of
    /// the same kind keeps both in the list but points the kind index at the
    /// new one.
    pub fn add_component<T: ComponentType>(
        &mut self,
        component: T,
        assets: &dyn AssetProvider,
        stage: &Stage,
    ) -> &mut T {
        let slot = self.components.len();
        if self.index[T::KIND.index()].is_some() {
            log::debug!(
                "Entity '{}' {} already has a {:?}; the new one replaces it in lookups",
                self.name,
                self.id,
                T::KIND
            );
        }
        self.components.push(component.into_any());
        self.index[T::KIND.index()] = Some(slot);

        let (before, rest) = self.components.split_at_mut(slot);
        let Some((current, after)) = rest.split_first_mut() else {
            unreachable!("component slot {slot} was just pushed");
        };
        let mut ctx = InitContext {
            owner: self.id,
            owner_name: self.name.as_str(),
            siblings: Siblings::new(before, after, slot, &self.index),
            assets,
            stage,
        };
        current.as_component_mut().initialize(&mut ctx);

        match T::from_any_mut(&mut self.components[slot]) {
            Some(c) => c,
            None => unreachable!("slot {slot} holds a {:?}", T::KIND),
        }
    }

    /// The most recently attached component of kind `T`, if any.
    pub fn get_component<T: ComponentType>(&self) -> Option<&T> {
        let slot = self.index[T::KIND.index()]?;
        T::from_any(self.components.get(slot)?)
    }

    /// Mutable variant of [`get_component`](Self::get_component).
    pub fn get_component_mut<T: ComponentType>(&mut self) -> Option<&mut T> {
        let slot = self.index[T::KIND.index()]?;
        T::from_any_mut(self.components.get_mut(slot)?)
    }

    pub fn has_component<T: ComponentType>(&self) -> bool {
        self.index[T::KIND.index()].is_some()
    }

    // ── Frame ────────────────────────────────────────────────────────

    /// Update every component in attachment order.
    ///
    /// A component may ask for its owner to be destroyed; the request is
    /// honoured once every component has run.
    pub(crate) fn update(&mut self, dt: f32, env: &mut FrameEnv<'_>) {
        let mut destroy = false;
        for slot in 0..self.components.len() {
            let (before, rest) = self.components.split_at_mut(slot);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };
            let mut ctx = UpdateContext {
                owner: self.id,
                owner_name: self.name.as_str(),
                siblings: Siblings::new(before, after, slot, &self.index),
                events: &mut *env.events,
                input: env.input,
                stage: env.stage,
                elapsed_ms: env.elapsed_ms,
                destroy_requested: false,
            };
            current.as_component_mut().update(&mut ctx, dt);
            destroy |= ctx.destroy_requested;
        }
        if destroy {
            self.destroy(env.events);
        }
    }

    /// Render every component in attachment order.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for component in &self.components {
            component.as_component().render(renderer);
        }
    }

    /// Deactivate the entity and ask the manager to remove it.
    ///
    /// Only the first call does anything; it returns `true` when it did.
    pub fn destroy(&mut self, events: &mut EventQueue) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        log::debug!("Entity '{}' {} deactivated", self.name, self.id);
        events.add(Event::DestroyEntity { entity: self.id });
        true
    }
}
