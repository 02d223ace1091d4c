use crate::api::types::{EntityId, GameEvent};
use crate::components::entity::Entity;
use crate::core::contacts::ContactQueue;
use crate::core::scene::Scene;
use crate::extensions::tween::TweenState;
use crate::input::queue::InputQueue;
use crate::systems::rng::Rng;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsWorld;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of game events handed to the host per frame (default: 32).
    pub max_events: usize,
    /// Seed for `EngineContext::rng`.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_events: 32,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step of game logic. Tweens and contact detection for the
    /// step have already run when this is called.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub tweens: TweenState,
    pub rng: Rng,
    /// Contact begins waiting for the game. Drained by the game, never cleared by the engine.
    pub contacts: ContactQueue,
    pub events: Vec<GameEvent>,
    /// Entity whose transform the host uses as the view.
    pub camera: Option<EntityId>,
    time: f32,
    dt: f32,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_seed(GameConfig::default().seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            scene: Scene::new(),
            tweens: TweenState::new(),
            rng: Rng::new(seed),
            contacts: ContactQueue::new(),
            events: Vec::new(),
            camera: None,
            time: 0.0,
            dt: 0.0,
            next_id: 1,
            #[cfg(feature = "physics")]
            physics: PhysicsWorld::new(),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Simulated seconds since the context was created.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Length of the current fixed step.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn set_camera(&mut self, id: EntityId) {
        self.camera = Some(id);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (events).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Add an entity to the scene. An entity with a collider also gets a
    /// kinematic contact body placed at its world transform.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.scene.spawn(entity);

        #[cfg(feature = "physics")]
        {
            let transform = self.scene.world_transform(id);
            if let (Some(t), Some(entity)) = (transform, self.scene.get_mut(id)) {
                if let Some(collider) = &entity.collider {
                    entity.body = Some(self.physics.create_body(id, collider, t.pos, t.rotation));
                }
            }
        }

        id
    }

    /// Remove an entity, cleaning up its contact body if present.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.scene.despawn(id)?;
        self.release(&entity);
        Some(entity)
    }

    /// Remove every descendant of `parent`, keeping the parent itself.
    /// Returns how many entities were removed.
    pub fn despawn_children(&mut self, parent: EntityId) -> usize {
        let mut removed = 0;
        for child in self.scene.children_of(parent) {
            removed += self.despawn_children(child);
            if self.despawn(child).is_some() {
                removed += 1;
            }
        }
        removed
    }

    #[cfg(feature = "physics")]
    fn release(&mut self, entity: &Entity) {
        if let Some(body) = &entity.body {
            self.physics.remove_body(body);
        }
    }

    #[cfg(not(feature = "physics"))]
    fn release(&mut self, _entity: &Entity) {}

    /// Engine half of a fixed step, run before `Game::update`:
    /// advance the clock, run tweens, then detect contact begins.
    pub fn begin_step(&mut self, dt: f32) {
        self.time += dt;
        self.dt = dt;

        self.tweens.tick(dt, &mut self.scene);
        for entity in self.tweens.drain_despawned() {
            self.release(&entity);
        }

        #[cfg(feature = "physics")]
        self.detect_contacts(dt);
    }

    /// Move every contact body to its entity's world transform and step Rapier.
    #[cfg(feature = "physics")]
    fn detect_contacts(&mut self, dt: f32) {
        for entity in self.scene.iter() {
            let Some(body) = &entity.body else { continue };
            if let Some(t) = self.scene.world_transform(entity.id) {
                self.physics.set_kinematic_position(body, t.pos, t.rotation);
            }
        }
        self.physics.set_dt(dt);
        self.physics.step_into(&mut self.contacts);
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::tween::{Tween, TweenChain};
    use glam::Vec2;

    #[test]
    fn ids_are_unique() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn begin_step_advances_clock_and_tweens() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.spawn(Entity::new(id));
        ctx.tweens.add(id, Tween::rotate_to(1.0, 0.5));

        ctx.begin_step(0.25);
        assert!((ctx.time() - 0.25).abs() < 1e-6);
        assert_eq!(ctx.dt(), 0.25);
        assert!((ctx.scene.get(id).unwrap().rotation - 0.5).abs() < 1e-4);
    }

    #[test]
    fn despawn_children_keeps_parent() {
        let mut ctx = EngineContext::new();
        let layer = ctx.next_id();
        ctx.spawn(Entity::new(layer).with_tag("carLayer"));
        for _ in 0..3 {
            let id = ctx.next_id();
            ctx.spawn(Entity::new(id).with_tag("car").with_parent(layer));
        }

        assert_eq!(ctx.despawn_children(layer), 3);
        assert_eq!(ctx.scene.len(), 1);
        assert!(ctx.scene.contains(layer));
    }

    #[test]
    fn tween_despawn_removes_entity_during_step() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.spawn(Entity::new(id));
        ctx.tweens.add(
            id,
            TweenChain::sequence(vec![Tween::move_by(Vec2::new(0.0, -1.0), 0.1), Tween::despawn()]),
        );

        ctx.begin_step(0.05);
        assert!(ctx.scene.contains(id));
        ctx.begin_step(0.05);
        assert!(!ctx.scene.contains(id));
    }

    #[test]
    fn clear_frame_data_keeps_contacts() {
        use crate::core::contacts::ContactEvent;

        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent::new(1.0));
        ctx.contacts.push(ContactEvent::new(EntityId(1), EntityId(2)));
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
        assert_eq!(ctx.contacts.len(), 1);
    }
}
