//! # EntityManager: Owner of Every Live Entity
//!
//! The manager owns the entities, the indices used to find them, the event
//! queue, the asset registry, and the stage. It's the single source of truth
//! for the game world.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ EntityManager                                           │
//! │                                                         │
//! │  entities: Vec<Entity>          dense, unstable order   │
//! │  by_id:    EntityId ─► position in `entities`           │
//! │  by_name:  name ─► [EntityId]   names are not unique    │
//! │  by_layer: [Vec<EntityId>; 7]   insertion order         │
//! │                                                         │
//! │  events, assets, stage, player                          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity is in all four structures or in none of them.
//! [`destroy_entity`](EntityManager::destroy_entity) swap-removes from
//! `entities`, so it patches the `by_id` entry of whichever entity was moved
//! into the freed slot.
//!
//! ## Frame
//!
//! ```text
//! update(dt):
//!   1. drain   take the queue, apply each event (may spawn / destroy)
//!   2. update  every active entity, attachment order within each
//!   3. collide every ordered pair of active colliders; enqueue only
//! render():
//!   layers TILEMAP..UI, each in insertion order, active entities only
//! ```
//!
//! Events produced in steps 2 and 3, and by handlers during step 1, are
//! applied at the next frame's drain.

use std::collections::HashMap;

use super::component::{ComponentType, FrameEnv};
use super::entity::{Entity, EntityId, Layer, TILE_NAME};
use crate::asset::AssetRegistry;
use crate::collision::{ColliderTag, Outcome, check_rect_collision, outcome};
use crate::components::{Collider, KeyboardControl, LifeTimer, ProjectileEmitter, Sprite, Transform};
use crate::event::{Event, EventQueue};
use crate::input::InputSource;
use crate::math::{Rect, Vec2};
use crate::render::Renderer;
use crate::stage::Stage;

/// Per-frame counters, reset at the start of every update.
#[cfg(feature = "diagnostics")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub spawned: u32,
    pub despawned: u32,
    pub events_drained: u32,
}

/// Owns every entity and runs the frame.
pub struct EntityManager {
    entities: Vec<Entity>,
    by_id: HashMap<EntityId, usize>,
    by_name: HashMap<String, Vec<EntityId>>,
    by_layer: [Vec<EntityId>; Layer::COUNT],
    next_id: u32,
    player: Option<EntityId>,
    events: EventQueue,
    assets: AssetRegistry,
    stage: Stage,
    /// Simulation time in seconds.
    elapsed: f64,
    player_hits: u32,
    enemies_killed: u32,
    #[cfg(feature = "diagnostics")]
    stats: FrameStats,
}

impl EntityManager {
    pub fn new() -> Self {
        Self::with_stage(Stage::default())
    }

    pub fn with_stage(stage: Stage) -> Self {
        Self {
            entities: Vec::new(),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
            by_layer: std::array::from_fn(|_| Vec::new()),
            next_id: 0,
            player: None,
            events: EventQueue::new(),
            assets: AssetRegistry::new(),
            stage,
            elapsed: 0.0,
            player_hits: 0,
            enemies_killed: 0,
            #[cfg(feature = "diagnostics")]
            stats: FrameStats::default(),
        }
    }

    // ── Shared State ─────────────────────────────────────────────────

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetRegistry {
        &mut self.assets
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn set_player(&mut self, id: EntityId) {
        if !self.by_id.contains_key(&id) {
            log::warn!("set_player: entity {} does not exist", id);
            return;
        }
        self.player = Some(id);
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    /// Enemy projectile hits taken by the player so far.
    pub fn player_hits(&self) -> u32 {
        self.player_hits
    }

    pub fn enemies_killed(&self) -> u32 {
        self.enemies_killed
    }

    #[cfg(feature = "diagnostics")]
    pub fn frame_stats(&self) -> FrameStats {
        self.stats
    }

    // ── Creation ─────────────────────────────────────────────────────

    /// Create an entity with no components and register it in every index.
    pub fn add_entity(&mut self, name: &str, layer: Layer) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let entity = Entity::new(id, name, layer);
        self.by_name.entry(entity.name().to_string()).or_default().push(id);
        self.by_layer[layer.index()].push(id);
        self.by_id.insert(id, self.entities.len());
        log::debug!("Spawned '{}' {} on {}", entity.name(), id, layer.as_str());
        self.entities.push(entity);

        #[cfg(feature = "diagnostics")]
        {
            self.stats.spawned += 1;
        }
        id
    }

    /// Start building an entity with chained components.
    pub fn spawn(&mut self, name: &str, layer: Layer) -> EntityBuilder<'_> {
        let id = self.add_entity(name, layer);
        EntityBuilder { manager: self, id }
    }

    /// Attach a component to an existing entity. Returns `None` (and logs) if
    /// the entity doesn't exist.
    pub fn add_component<T: ComponentType>(&mut self, id: EntityId, component: T) -> Option<&mut T> {
        let Some(slot) = self.slot(id) else {
            log::warn!("add_component: entity {} does not exist", id);
            return None;
        };
        let entity = &mut self.entities[slot];
        Some(entity.add_component(component, &self.assets, &self.stage))
    }

    // ── Lookup ───────────────────────────────────────────────────────

    /// Position of an entity in `entities`, active or not.
    fn slot(&self, id: EntityId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    fn live(&self, id: EntityId) -> Option<&Entity> {
        let entity = &self.entities[self.slot(id)?];
        entity.is_active().then_some(entity)
    }

    fn live_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = self.slot(id)?;
        let entity = &mut self.entities[slot];
        if entity.is_active() { Some(entity) } else { None }
    }

    /// Look up an active entity by id.
    pub fn get_by_id(&self, id: EntityId) -> Option<&Entity> {
        let found = self.live(id);
        if found.is_none() {
            log::warn!("No active entity with id {}", id);
        }
        found
    }

    pub fn get_by_id_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let found = self.live_mut(id);
        if found.is_none() {
            log::warn!("No active entity with id {}", id);
        }
        found
    }

    /// The first active entity created with `name`.
    pub fn get_by_name(&self, name: &str) -> Option<&Entity> {
        let found = self
            .by_name
            .get(name)
            .and_then(|ids| ids.iter().find_map(|&id| self.live(id)));
        if found.is_none() {
            log::warn!("No active entity named \"{}\"", name);
        }
        found
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.live(id).is_some()
    }

    /// A component of an active entity.
    pub fn component<T: ComponentType>(&self, id: EntityId) -> Option<&T> {
        self.live(id)?.get_component::<T>()
    }

    pub fn component_mut<T: ComponentType>(&mut self, id: EntityId) -> Option<&mut T> {
        self.live_mut(id)?.get_component_mut::<T>()
    }

    /// Number of entities, including deactivated ones awaiting removal.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Every entity, in storage order. The order changes on removal.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Ids on one layer, in creation order.
    pub fn entities_in_layer(&self, layer: Layer) -> &[EntityId] {
        &self.by_layer[layer.index()]
    }

    /// Log every entity and its components at info level.
    pub fn log_entities(&self) {
        log::info!("{} entities:", self.entities.len());
        for e in &self.entities {
            log::info!(
                "  {} '{}' {}{} [{}]",
                e.id(),
                e.name(),
                e.layer().as_str(),
                if e.is_active() { "" } else { " (inactive)" },
                e.component_names().join(", ")
            );
        }
    }

    // ── Destruction ──────────────────────────────────────────────────

    /// Deactivate an entity and queue its removal for the next drain.
    pub fn request_destroy(&mut self, id: EntityId) -> bool {
        let Some(slot) = self.slot(id) else {
            log::warn!("request_destroy: entity {} does not exist", id);
            return false;
        };
        self.entities[slot].destroy(&mut self.events)
    }

    /// Remove an entity from every index and drop it.
    ///
    /// Missing index entries are logged as errors and skipped; the remaining
    /// removals still happen. Returns `false` if the id is unknown.
    pub fn destroy_entity(&mut self, id: EntityId) -> bool {
        let Some(slot) = self.slot(id) else {
            log::warn!("destroy_entity: entity {} does not exist", id);
            return false;
        };
        let name = self.entities[slot].name().to_string();
        let layer = self.entities[slot].layer();

        match self.by_name.get_mut(&name) {
            Some(ids) => {
                match ids.iter().position(|&e| e == id) {
                    Some(i) => {
                        ids.remove(i);
                    }
                    None => log::error!("Entity {} missing from name index \"{}\"", id, name),
                }
                if ids.is_empty() {
                    self.by_name.remove(&name);
                }
            }
            None => log::error!("Name index has no entry \"{}\" for entity {}", name, id),
        }

        let bucket = &mut self.by_layer[layer.index()];
        match bucket.iter().position(|&e| e == id) {
            Some(i) => {
                bucket.remove(i);
            }
            None => log::error!("Entity {} missing from layer {}", id, layer.as_str()),
        }

        self.by_id.remove(&id);
        let removed = self.entities.swap_remove(slot);
        if let Some(moved) = self.entities.get(slot) {
            self.by_id.insert(moved.id(), slot);
        }
        if self.player == Some(id) {
            log::info!("Player entity {} destroyed", id);
            self.player = None;
        }
        log::debug!("Removed '{}' {}", removed.name(), id);

        #[cfg(feature = "diagnostics")]
        {
            self.stats.despawned += 1;
        }
        true
    }

    /// Remove every entity and pending event. Ids keep counting up.
    pub fn clear(&mut self) {
        log::info!("Clearing {} entities", self.entities.len());
        #[cfg(feature = "diagnostics")]
        {
            self.stats.despawned += self.entities.len() as u32;
        }
        self.entities.clear();
        self.by_id.clear();
        self.by_name.clear();
        for bucket in &mut self.by_layer {
            bucket.clear();
        }
        self.events.clear();
        self.player = None;
        self.player_hits = 0;
        self.enemies_killed = 0;
    }

    // ── Frame ────────────────────────────────────────────────────────

    /// Drain events, update every active entity, then run the collision pass.
    pub fn update(&mut self, dt: f32, input: &dyn InputSource) {
        #[cfg(feature = "diagnostics")]
        {
            self.stats = FrameStats::default();
        }
        self.elapsed += f64::from(dt);

        self.drain_events();

        let mut env = FrameEnv {
            events: &mut self.events,
            input,
            stage: &self.stage,
            elapsed_ms: (self.elapsed * 1000.0) as u64,
        };
        for entity in self.entities.iter_mut().filter(|e| e.is_active()) {
            entity.update(dt, &mut env);
        }

        self.check_collisions();
    }

    /// Draw active entities layer by layer.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for layer in Layer::ALL {
            for &id in &self.by_layer[layer.index()] {
                if let Some(entity) = self.live(id) {
                    entity.render(renderer);
                }
            }
        }
    }

    fn drain_events(&mut self) {
        let batch = self.events.take();
        #[cfg(feature = "diagnostics")]
        {
            self.stats.events_drained += batch.len() as u32;
        }
        for event in batch {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: Event) {
        log::trace!("Handling {:?}", event);
        match event {
            Event::SwitchAnimation { entity, animation } => {
                if let Some(sprite) = self.component_mut::<Sprite>(entity) {
                    sprite.play(animation);
                }
            }
            Event::PlayerMove { entity, velocity } => self.set_velocity(entity, velocity),
            Event::PlayerStop { entity } => self.set_velocity(entity, Vec2::ZERO),
            Event::PlayerShoot { entity } => self.spawn_projectile(entity),
            Event::PlayerHitByEnemyProjectile { entity, projectile } => self.hit_player(entity, projectile),
            Event::DestroyEntity { entity } => {
                self.destroy_entity(entity);
            }
            Event::KillEnemy { entity } => self.kill_enemy(entity),
        }
    }

    /// Count a hit and consume the projectile. A projectile already consumed
    /// earlier in the drain costs nothing.
    fn hit_player(&mut self, player: EntityId, projectile: EntityId) {
        if !self.destroy_entity(projectile) {
            log::debug!("Hit on {} by {} ignored: projectile already gone", player, projectile);
            return;
        }
        self.player_hits += 1;
        log::info!("Player {} hit by enemy projectile {} ({} hits)", player, projectile, self.player_hits);
    }

    fn set_velocity(&mut self, id: EntityId, velocity: Vec2) {
        match self.component_mut::<Transform>(id) {
            Some(t) => t.velocity = velocity,
            None => log::debug!("Velocity change for {} ignored: no active transform", id),
        }
    }

    /// Fire the stage's projectile template from the shooter's centre in the
    /// direction it faces.
    fn spawn_projectile(&mut self, shooter: EntityId) {
        let Some(origin) = self.component::<Transform>(shooter).map(Transform::center) else {
            log::warn!("Entity {} tried to shoot without an active transform", shooter);
            return;
        };
        let angle = self
            .component::<KeyboardControl>(shooter)
            .map(|k| k.facing().angle_degrees())
            .unwrap_or(0.0);

        let tpl = self.stage.projectile.clone();
        let size = Vec2::new(tpl.width, tpl.height) * tpl.scale;
        self.spawn("projectile", Layer::Projectile)
            .with(Transform::new(origin - size * 0.5, Vec2::ZERO, tpl.width, tpl.height, tpl.scale).unclamped())
            .with(Sprite::new(&tpl.texture))
            .with(Collider::new(ColliderTag::FriendlyProjectile))
            .with(ProjectileEmitter::new(tpl.speed, angle, tpl.range, false));
    }

    /// Replace an enemy with the explosion template (if any) and count the kill.
    fn kill_enemy(&mut self, enemy: EntityId) {
        let Some(center) = self
            .slot(enemy)
            .and_then(|s| self.entities[s].get_component::<Transform>())
            .map(Transform::center)
        else {
            log::debug!("KillEnemy for {} ignored: already gone", enemy);
            return;
        };
        if let Some(tpl) = self.stage.explosion.clone() {
            let size = Vec2::new(tpl.width, tpl.height) * tpl.scale;
            self.spawn("explosion", Layer::Projectile)
                .with(Transform::new(center - size * 0.5, Vec2::ZERO, tpl.width, tpl.height, tpl.scale).unclamped())
                .with(Sprite::animated(&tpl.texture, tpl.frames, tpl.frame_ms, false))
                .with(LifeTimer::new(tpl.duration_ms));
        }
        if self.destroy_entity(enemy) {
            self.enemies_killed += 1;
            log::info!("Enemy {} killed ({} total)", enemy, self.enemies_killed);
        }
    }

    // ── Collision ────────────────────────────────────────────────────

    fn colliders(&self) -> Vec<(EntityId, ColliderTag, Rect)> {
        self.entities
            .iter()
            .filter(|e| e.is_active())
            .filter_map(|e| e.get_component::<Collider>().map(|c| (e.id(), c.tag, c.rect())))
            .collect()
    }

    /// Test every ordered pair of active colliders and enqueue the outcomes.
    ///
    /// Self-pairs are visited too; no tag pairs with itself to produce an
    /// outcome. Entity state is not touched.
    pub fn check_collisions(&mut self) {
        let colliders = self.colliders();
        for &(a, tag_a, rect_a) in &colliders {
            for &(b, tag_b, rect_b) in &colliders {
                if !check_rect_collision(&rect_a, &rect_b) {
                    continue;
                }
                match outcome(tag_a, tag_b) {
                    Outcome::PlayerHit => {
                        self.events.add(Event::PlayerHitByEnemyProjectile { entity: a, projectile: b });
                    }
                    Outcome::EnemyKilled => {
                        self.events.add(Event::KillEnemy { entity: a });
                        self.events.add(Event::DestroyEntity { entity: b });
                    }
                    Outcome::Nothing => {}
                }
            }
        }
    }

    /// Tag of the first active collider overlapping `id`'s, ignoring `id`
    /// itself and map tiles. `ColliderTag::None` when nothing overlaps.
    pub fn check_entity_collisions(&self, id: EntityId) -> ColliderTag {
        let Some(mine) = self.component::<Collider>(id).map(Collider::rect) else {
            return ColliderTag::None;
        };
        self.entities
            .iter()
            .filter(|e| e.is_active() && e.id() != id && e.name() != TILE_NAME)
            .filter_map(|e| e.get_component::<Collider>())
            .find(|c| check_rect_collision(&mine, &c.rect()))
            .map(|c| c.tag)
            .unwrap_or(ColliderTag::None)
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Chained component attachment for a freshly spawned entity.
pub struct EntityBuilder<'m> {
    manager: &'m mut EntityManager,
    id: EntityId,
}

impl EntityBuilder<'_> {
    pub fn with<T: ComponentType>(self, component: T) -> Self {
        self.manager.add_component(self.id, component);
        self
    }

    /// Make this entity the manager's player.
    pub fn as_player(self) -> Self {
        self.manager.set_player(self.id);
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use crate::render::{DrawCommand, DrawList};
    use crate::stage::ExplosionTemplate;

    fn collider_entity(m: &mut EntityManager, name: &str, layer: Layer, tag: ColliderTag, at: Vec2) -> EntityId {
        m.spawn(name, layer)
            .with(Transform::at(at, 10.0, 10.0))
            .with(Collider::new(tag))
            .id()
    }

    fn assert_indices_coherent(m: &EntityManager) {
        assert_eq!(m.by_id.len(), m.entities.len());
        for (i, e) in m.entities.iter().enumerate() {
            assert_eq!(m.by_id[&e.id()], i);
            assert!(m.by_name[e.name()].contains(&e.id()));
            assert!(m.by_layer[e.layer().index()].contains(&e.id()));
        }
        let layered: usize = m.by_layer.iter().map(Vec::len).sum();
        let named: usize = m.by_name.values().map(Vec::len).sum();
        assert_eq!(layered, m.entities.len());
        assert_eq!(named, m.entities.len());
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut m = EntityManager::new();
        let a = m.add_entity("a", Layer::Enemy);
        let b = m.add_entity("b", Layer::Enemy);
        m.destroy_entity(a);
        let c = m.add_entity("a", Layer::Enemy);
        assert!(a < b && b < c);
        assert_ne!(a, c);
    }

    #[test]
    fn indices_stay_coherent_through_churn() {
        let mut m = EntityManager::new();
        let ids: Vec<_> = (0..8)
            .map(|i| m.add_entity(if i % 2 == 0 { "even" } else { "odd" }, Layer::ALL[i % Layer::COUNT]))
            .collect();
        assert_indices_coherent(&m);

        m.destroy_entity(ids[0]);
        m.destroy_entity(ids[5]);
        m.destroy_entity(ids[3]);
        assert_indices_coherent(&m);

        for &id in &[ids[0], ids[3], ids[5]] {
            assert!(m.get_by_id(id).is_none());
        }
        for &id in &[ids[1], ids[2], ids[4], ids[6], ids[7]] {
            assert_eq!(m.get_by_id(id).unwrap().id(), id);
        }
        assert_eq!(m.get_by_name("even").unwrap().id(), ids[2]);
        assert!(!m.destroy_entity(ids[0]));
    }

    #[test]
    fn destroy_survives_missing_layer_entry() {
        let mut m = EntityManager::new();
        let keep = m.add_entity("rock", Layer::Obstacle);
        let lost = m.add_entity("rock", Layer::Obstacle);
        m.by_layer[Layer::Obstacle.index()].retain(|&id| id != lost);

        assert!(m.destroy_entity(lost));
        assert!(m.get_by_id(lost).is_none());
        assert_eq!(m.by_name["rock"], vec![keep]);
        assert_eq!(m.entities_in_layer(Layer::Obstacle), &[keep][..]);
        assert_indices_coherent(&m);
    }

    #[test]
    fn destroy_survives_missing_name_entry() {
        let mut m = EntityManager::new();
        let keep = m.add_entity("tree", Layer::Vegetation);
        let lost = m.add_entity("bush", Layer::Vegetation);
        m.by_name.remove("bush");

        assert!(m.destroy_entity(lost));
        assert!(m.get_by_id(lost).is_none());
        assert!(!m.by_name.contains_key("bush"));
        assert_eq!(m.entities_in_layer(Layer::Vegetation), &[keep][..]);
        assert_indices_coherent(&m);
    }

    #[test]
    fn empty_name_gets_placeholder() {
        let mut m = EntityManager::new();
        let id = m.add_entity("", Layer::Ui);
        assert_eq!(m.get_by_id(id).unwrap().name(), "unnamed");
        assert!(m.get_by_name("unnamed").is_some());
    }

    #[test]
    fn drain_consumes_every_event() {
        let mut m = EntityManager::new();
        let input = InputState::new();
        let id = m.spawn("mover", Layer::Enemy).with(Transform::at(Vec2::ZERO, 1.0, 1.0)).id();
        let shell = m.add_entity("shell", Layer::Projectile);

        m.events_mut().add(Event::PlayerMove { entity: id, velocity: Vec2::new(10.0, 0.0) });
        m.events_mut().add(Event::PlayerHitByEnemyProjectile { entity: id, projectile: shell });
        m.update(0.5, &input);

        assert!(m.events().is_empty());
        assert_eq!(m.player_hits(), 1);
        assert!(m.get_by_id(shell).is_none());
        let t = m.component::<Transform>(id).unwrap();
        assert_eq!(t.velocity, Vec2::new(10.0, 0.0));
        assert_eq!(t.position, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn handler_spawned_entities_update_in_same_frame() {
        let mut m = EntityManager::new();
        let input = InputState::new();
        let shooter = m.spawn("shooter", Layer::Player).with(Transform::at(Vec2::new(100.0, 100.0), 10.0, 10.0)).id();
        m.stage_mut().projectile.speed = 100.0;

        m.events_mut().add(Event::PlayerShoot { entity: shooter });
        m.update(0.1, &input);

        let shot = m.get_by_name("projectile").unwrap();
        let t = shot.get_component::<Transform>().unwrap();
        // Fired right (no keyboard control) from the centre, then moved 10 px.
        assert!((t.position.x - (105.0 - 2.0 + 10.0)).abs() < 1e-3);
        assert!(shot.has_component::<ProjectileEmitter>());
        assert_eq!(shot.get_component::<Collider>().unwrap().tag, ColliderTag::FriendlyProjectile);
        assert_eq!(shot.layer(), Layer::Projectile);
    }

    #[test]
    fn destroy_request_is_idempotent_and_deferred() {
        let mut m = EntityManager::new();
        let input = InputState::new();
        let id = m.add_entity("doomed", Layer::Enemy);

        assert!(m.request_destroy(id));
        assert!(!m.request_destroy(id));
        assert_eq!(m.events().len(), 1);
        assert!(!m.is_alive(id));
        assert_eq!(m.entity_count(), 1);

        m.update(0.016, &input);
        assert_eq!(m.entity_count(), 0);
        assert_indices_coherent(&m);
    }

    #[test]
    fn player_hit_by_projectile() {
        let mut m = EntityManager::new();
        let input = InputState::new();
        let player = collider_entity(&mut m, "player", Layer::Player, ColliderTag::Player, Vec2::ZERO);
        let bullet = collider_entity(&mut m, "bullet", Layer::Projectile, ColliderTag::Projectile, Vec2::new(5.0, 5.0));

        m.update(0.0, &input);
        let queued: Vec<_> = m.events().iter().copied().collect();
        assert_eq!(
            queued,
            vec![Event::PlayerHitByEnemyProjectile { entity: player, projectile: bullet }]
        );
    }

    #[test]
    fn projectile_lingering_on_player_costs_one_hit() {
        let mut m = EntityManager::new();
        let input = InputState::new();
        collider_entity(&mut m, "player", Layer::Player, ColliderTag::Player, Vec2::ZERO);
        let bullet = collider_entity(&mut m, "bullet", Layer::Projectile, ColliderTag::Projectile, Vec2::new(5.0, 5.0));

        for _ in 0..5 {
            m.update(0.0, &input);
        }
        assert_eq!(m.player_hits(), 1);
        assert!(m.get_by_id(bullet).is_none());
        assert!(m.events().is_empty());
    }

    /// The overlap is found by the first update's collision pass and applied
    /// by the second update's drain.
    #[test]
    fn enemy_killed_by_friendly_projectile_on_next_update() {
        let mut m = EntityManager::new();
        let input = InputState::new();
        let enemy = collider_entity(&mut m, "enemy", Layer::Enemy, ColliderTag::Enemy, Vec2::ZERO);
        let shot = collider_entity(&mut m, "shot", Layer::Projectile, ColliderTag::FriendlyProjectile, Vec2::new(10.0, 0.0));

        m.update(0.0, &input);
        let queued: Vec<_> = m.events().iter().copied().collect();
        assert_eq!(
            queued,
            vec![Event::KillEnemy { entity: enemy }, Event::DestroyEntity { entity: shot }]
        );

        m.update(0.0, &input);
        assert!(m.get_by_id(enemy).is_none());
        assert!(m.get_by_id(shot).is_none());
        assert_eq!(m.entity_count(), 0);
        assert_eq!(m.enemies_killed(), 1);
        assert!(m.events().is_empty());
    }

    #[test]
    fn kill_spawns_explosion_that_expires() {
        let mut m = EntityManager::new();
        let input = InputState::new();
        m.stage_mut().explosion = Some(ExplosionTemplate {
            duration_ms: 100,
            ..ExplosionTemplate::default()
        });
        let enemy = collider_entity(&mut m, "enemy", Layer::Enemy, ColliderTag::Enemy, Vec2::ZERO);

        m.events_mut().add(Event::KillEnemy { entity: enemy });
        m.update(0.05, &input);
        assert!(!m.is_alive(enemy));
        let boom = m.get_by_name("explosion").unwrap().id();

        m.update(0.06, &input);
        assert!(!m.is_alive(boom));
        m.update(0.0, &input);
        assert_eq!(m.entity_count(), 0);
    }

    #[test]
    fn entity_collision_skips_self_and_tiles() {
        let mut m = EntityManager::new();
        let player = collider_entity(&mut m, "player", Layer::Player, ColliderTag::Player, Vec2::ZERO);
        collider_entity(&mut m, TILE_NAME, Layer::Tilemap, ColliderTag::Enemy, Vec2::ZERO);
        assert_eq!(m.check_entity_collisions(player), ColliderTag::None);

        collider_entity(&mut m, "exit", Layer::Obstacle, ColliderTag::LevelComplete, Vec2::new(10.0, 10.0));
        assert_eq!(m.check_entity_collisions(player), ColliderTag::LevelComplete);
    }

    #[test]
    fn render_walks_layers_in_order() {
        let mut m = EntityManager::new();
        for (name, layer) in [("ui", Layer::Ui), ("tile", Layer::Tilemap), ("hero", Layer::Player), ("bush", Layer::Vegetation)] {
            m.assets_mut().add_texture(name, format!("{name}.png"), 8, 8);
            m.spawn(name, layer)
                .with(Transform::at(Vec2::ZERO, 8.0, 8.0))
                .with(Sprite::new(name));
        }
        let hidden = m.get_by_name("bush").unwrap().id();
        m.spawn("late-tile", Layer::Tilemap)
            .with(Transform::at(Vec2::ZERO, 8.0, 8.0))
            .with(Sprite::new("tile"));
        m.request_destroy(hidden);

        let mut list = DrawList::new();
        m.render(&mut list);
        let textures: Vec<_> = list
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::Texture { texture, .. } => m.assets().texture_info(*texture).unwrap().id.clone(),
                DrawCommand::Text { .. } => unreachable!(),
            })
            .collect();
        assert_eq!(textures, vec!["tile", "tile", "hero", "ui"]);
    }

    #[test]
    fn clear_keeps_counting_ids() {
        let mut m = EntityManager::new();
        let a = m.add_entity("a", Layer::Enemy);
        m.set_player(a);
        m.clear();
        assert_eq!(m.entity_count(), 0);
        assert_eq!(m.player(), None);
        let b = m.add_entity("b", Layer::Enemy);
        assert!(b > a);
    }

    #[cfg(feature = "diagnostics")]
    #[test]
    fn frame_stats_count_churn() {
        let mut m = EntityManager::new();
        let input = InputState::new();
        let id = m.add_entity("x", Layer::Enemy);
        m.request_destroy(id);
        m.update(0.0, &input);
        let stats = m.frame_stats();
        assert_eq!(stats.despawned, 1);
        assert_eq!(stats.events_drained, 1);
        assert_eq!(stats.spawned, 0);
    }
}
