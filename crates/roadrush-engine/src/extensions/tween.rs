// extensions/tween.rs
//
// Tween system: fire-and-forget animations keyed by EntityId.
// Runs on the simulation clock; never blocks the game update.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(id, Tween::rotate_to(0.5, 0.4));
//   tweens.add(id, TweenChain::sequence(vec![
//       Tween::scale_to(20.0, 0.3),
//       Tween::scale_to(1.0, 0.6),
//   ]).with_on_complete(RECOVERED));
//   tweens.tick(dt, &mut scene);
//   for event in tweens.drain_completed() { ... }

use std::collections::BTreeMap;
use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::scene::Scene;

/// Slack when comparing accumulated step time against a duration,
/// so n steps of `dt` finish a tween lasting exactly `n * dt`.
const COMPLETION_EPSILON: f64 = 1e-5;

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// What a tween does to its entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    /// Animate `pos.x` from its value at start to `to`.
    PositionX { to: f32 },
    /// Shift `pos` by `delta` over the duration. Applied incrementally, so
    /// the entity may be repositioned by other code while it runs.
    MoveBy { delta: Vec2 },
    /// Animate `rotation` from its value at start to `to`.
    Rotation { to: f32 },
    /// Animate uniform `scale` from its value at start to `to`.
    Scale { to: f32 },
    /// Do nothing for the duration.
    Wait,
    /// Remove the entity from the scene.
    Despawn,
}

impl TweenTarget {
    fn current(&self, entity: &Entity) -> f32 {
        match self {
            TweenTarget::PositionX { .. } => entity.pos.x,
            TweenTarget::Rotation { .. } => entity.rotation,
            TweenTarget::Scale { .. } => entity.scale.x,
            TweenTarget::MoveBy { .. } | TweenTarget::Wait | TweenTarget::Despawn => 0.0,
        }
    }
}

/// What happens when the last step of a chain completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// Stop and remove the chain.
    #[default]
    Once,
    /// Restart from the first step.
    Forever,
}

/// A single animation step.
#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    /// Duration in seconds.
    pub duration: f32,
    /// Seconds run so far. Kept in f64 so long tweens stay frame-exact.
    elapsed: f64,
    /// Start value, captured on the first tick.
    from: Option<f32>,
    /// Progress already applied (MoveBy only).
    applied: f32,
}

impl Tween {
    fn with_target(target: TweenTarget, duration: f32) -> Self {
        Self {
            target,
            duration: duration.max(0.0),
            elapsed: 0.0,
            from: None,
            applied: 0.0,
        }
    }

    pub fn move_x_to(to: f32, duration: f32) -> Self {
        Self::with_target(TweenTarget::PositionX { to }, duration)
    }

    pub fn move_by(delta: Vec2, duration: f32) -> Self {
        Self::with_target(TweenTarget::MoveBy { delta }, duration)
    }

    pub fn rotate_to(to: f32, duration: f32) -> Self {
        Self::with_target(TweenTarget::Rotation { to }, duration)
    }

    pub fn scale_to(to: f32, duration: f32) -> Self {
        Self::with_target(TweenTarget::Scale { to }, duration)
    }

    pub fn wait(duration: f32) -> Self {
        Self::with_target(TweenTarget::Wait, duration)
    }

    pub fn despawn() -> Self {
        Self::with_target(TweenTarget::Despawn, 0.0)
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
        self.from = None;
        self.applied = 0.0;
    }

    /// Advance by `dt` and apply to the entity.
    /// Returns the unused part of `dt` once the step is complete.
    fn advance(&mut self, dt: f32, entity: &mut Entity) -> Option<f32> {
        if self.from.is_none() {
            self.from = Some(self.target.current(entity));
        }
        let from = self.from.unwrap_or_default();

        let duration = self.duration as f64;
        self.elapsed += dt as f64;
        let done = self.elapsed + COMPLETION_EPSILON >= duration;
        let k = if done { 1.0 } else { (self.elapsed / duration) as f32 };

        match self.target {
            TweenTarget::PositionX { to } => entity.pos.x = lerp(from, to, k),
            TweenTarget::Rotation { to } => entity.rotation = lerp(from, to, k),
            TweenTarget::Scale { to } => entity.scale = Vec2::splat(lerp(from, to, k)),
            TweenTarget::MoveBy { delta } => {
                entity.pos += delta * (k - self.applied);
                self.applied = k;
            }
            TweenTarget::Wait | TweenTarget::Despawn => {}
        }

        done.then(|| (self.elapsed - duration).max(0.0) as f32)
    }
}

/// Steps run one after another on the same entity.
#[derive(Debug, Clone)]
pub struct TweenChain {
    steps: Vec<Tween>,
    current: usize,
    pub loop_mode: TweenLoop,
    /// Event ID queued when the chain completes (never for `Forever`).
    pub on_complete: Option<u32>,
}

enum ChainStatus {
    Running,
    Done { despawned: Option<Entity> },
    /// The entity disappeared under the chain.
    Orphaned,
}

impl TweenChain {
    pub fn sequence(steps: Vec<Tween>) -> Self {
        Self {
            steps,
            current: 0,
            loop_mode: TweenLoop::Once,
            on_complete: None,
        }
    }

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn with_on_complete(mut self, event_id: u32) -> Self {
        self.on_complete = Some(event_id);
        self
    }

    /// Sum of all step durations.
    pub fn duration(&self) -> f32 {
        self.steps.iter().map(|s| s.duration).sum()
    }

    fn restart(&mut self) {
        self.current = 0;
        for step in &mut self.steps {
            step.reset();
        }
    }

    fn advance(&mut self, dt: f32, entity_id: EntityId, scene: &mut Scene) -> ChainStatus {
        let mut remaining = dt;
        loop {
            let Some(step) = self.steps.get_mut(self.current) else {
                return ChainStatus::Done { despawned: None };
            };

            if step.target == TweenTarget::Despawn {
                return match scene.despawn(entity_id) {
                    Some(entity) => ChainStatus::Done { despawned: Some(entity) },
                    None => ChainStatus::Orphaned,
                };
            }

            let Some(entity) = scene.get_mut(entity_id) else {
                return ChainStatus::Orphaned;
            };

            let Some(leftover) = step.advance(remaining, entity) else {
                return ChainStatus::Running;
            };
            remaining = leftover;
            self.current += 1;

            if self.current == self.steps.len() {
                match self.loop_mode {
                    TweenLoop::Once => return ChainStatus::Done { despawned: None },
                    TweenLoop::Forever => {
                        self.restart();
                        // A zero-length cycle runs once per tick
                        if remaining <= 0.0 || self.duration() <= 0.0 {
                            return ChainStatus::Running;
                        }
                    }
                }
            }
        }
    }
}

impl From<Tween> for TweenChain {
    fn from(tween: Tween) -> Self {
        TweenChain::sequence(vec![tween])
    }
}

/// Handle to a running chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TweenId(pub u32);

/// Manages all running tweens. Chains advance in the order they were added.
#[derive(Debug, Default)]
pub struct TweenState {
    chains: BTreeMap<TweenId, (EntityId, TweenChain)>,
    next_id: u32,
    completed_events: Vec<u32>,
    despawned: Vec<Entity>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween or chain on an entity. Returns a handle for later control.
    pub fn add(&mut self, entity: EntityId, chain: impl Into<TweenChain>) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.chains.insert(id, (entity, chain.into()));
        id
    }

    /// Stop every chain running on an entity.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.chains.retain(|_, (e, _)| *e != entity);
    }

    /// Advance all chains and apply them to the scene.
    /// Returns the number of chains that finished this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut finished = Vec::new();

        for (&id, (entity_id, chain)) in self.chains.iter_mut() {
            match chain.advance(dt, *entity_id, scene) {
                ChainStatus::Running => {}
                ChainStatus::Done { despawned } => {
                    if let Some(event_id) = chain.on_complete {
                        self.completed_events.push(event_id);
                    }
                    if let Some(entity) = despawned {
                        self.despawned.push(entity);
                    }
                    finished.push(id);
                }
                ChainStatus::Orphaned => finished.push(id),
            }
        }

        let count = finished.len();
        for id in finished {
            self.chains.remove(&id);
        }
        count
    }

    /// Drain completion events queued by finished chains.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    /// Drain entities removed by `Despawn` steps.
    pub fn drain_despawned(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.despawned)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn scene_with(entity: Entity) -> Scene {
        let mut scene = Scene::new();
        scene.spawn(entity);
        scene
    }

    #[test]
    fn rotate_to_starts_from_current_value() {
        let id = EntityId(1);
        let mut scene = scene_with(Entity::new(id).with_rotation(1.0));
        let mut tweens = TweenState::new();
        tweens.add(id, Tween::rotate_to(0.0, 1.0));

        tweens.tick(0.5, &mut scene);
        assert!((scene.get(id).unwrap().rotation - 0.5).abs() < 1e-4);

        tweens.tick(0.5, &mut scene);
        assert_eq!(scene.get(id).unwrap().rotation, 0.0);
        assert!(tweens.is_empty());
    }

    #[test]
    fn sequence_carries_leftover_time() {
        let id = EntityId(1);
        let mut scene = scene_with(Entity::new(id));
        let mut tweens = TweenState::new();
        tweens.add(
            id,
            TweenChain::sequence(vec![Tween::move_x_to(100.0, 1.0), Tween::move_x_to(0.0, 1.0)]),
        );

        tweens.tick(1.5, &mut scene);
        assert!((scene.get(id).unwrap().pos.x - 50.0).abs() < 1e-3);
        assert_eq!(tweens.len(), 1);
    }

    #[test]
    fn second_step_captures_start_when_it_begins() {
        let id = EntityId(1);
        let mut scene = scene_with(Entity::new(id));
        let mut tweens = TweenState::new();
        tweens.add(
            id,
            TweenChain::sequence(vec![Tween::scale_to(20.0, 0.3), Tween::scale_to(1.0, 0.6)]),
        );

        for _ in 0..18 {
            tweens.tick(DT, &mut scene);
        }
        assert!((scene.get(id).unwrap().scale.x - 20.0).abs() < 1e-3);

        for _ in 0..18 {
            tweens.tick(DT, &mut scene);
        }
        // Halfway back down from 20 to 1
        assert!((scene.get(id).unwrap().scale.x - 10.5).abs() < 1e-2);
    }

    #[test]
    fn completion_event_fires_after_full_duration() {
        let id = EntityId(1);
        let mut scene = scene_with(Entity::new(id));
        let mut tweens = TweenState::new();
        tweens.add(
            id,
            TweenChain::sequence(vec![Tween::scale_to(20.0, 0.3), Tween::scale_to(1.0, 0.6)])
                .with_on_complete(7),
        );

        for _ in 0..53 {
            tweens.tick(DT, &mut scene);
        }
        assert_eq!(tweens.drain_completed().count(), 0);

        tweens.tick(DT, &mut scene);
        assert_eq!(tweens.drain_completed().collect::<Vec<_>>(), vec![7]);
        assert_eq!(scene.get(id).unwrap().scale, Vec2::ONE);
    }

    #[test]
    fn forever_move_by_survives_external_repositioning() {
        let id = EntityId(1);
        let mut scene = scene_with(Entity::new(id));
        let mut tweens = TweenState::new();
        tweens.add(
            id,
            TweenChain::from(Tween::move_by(Vec2::new(0.0, -100.0), 1.0)).with_loop(TweenLoop::Forever),
        );

        for _ in 0..4 {
            tweens.tick(0.25, &mut scene);
        }
        assert!((scene.get(id).unwrap().pos.y + 100.0).abs() < 1e-3);

        scene.get_mut(id).unwrap().pos.y += 1000.0;
        for _ in 0..6 {
            tweens.tick(0.25, &mut scene);
        }
        assert!((scene.get(id).unwrap().pos.y - 750.0).abs() < 1e-3);
        assert_eq!(tweens.len(), 1);
    }

    #[test]
    fn despawn_step_removes_entity() {
        let id = EntityId(1);
        let mut scene = scene_with(Entity::new(id).with_tag("car"));
        let mut tweens = TweenState::new();
        tweens.add(
            id,
            TweenChain::sequence(vec![Tween::move_by(Vec2::new(0.0, -10.0), 0.5), Tween::despawn()]),
        );

        tweens.tick(0.25, &mut scene);
        assert!(scene.contains(id));
        tweens.tick(0.25, &mut scene);
        assert!(!scene.contains(id));

        let gone = tweens.drain_despawned();
        assert_eq!(gone.len(), 1);
        assert!((gone[0].pos.y + 10.0).abs() < 1e-4);
        assert!(tweens.is_empty());
    }

    #[test]
    fn orphaned_chain_is_dropped_silently() {
        let id = EntityId(1);
        let mut scene = scene_with(Entity::new(id));
        let mut tweens = TweenState::new();
        tweens.add(id, TweenChain::from(Tween::wait(1.0)).with_on_complete(3));

        scene.despawn(id);
        tweens.tick(DT, &mut scene);
        assert!(tweens.is_empty());
        assert_eq!(tweens.drain_completed().count(), 0);
    }

    #[test]
    fn remove_entity_tweens() {
        let mut tweens = TweenState::new();
        let id = EntityId(1);
        tweens.add(id, Tween::rotate_to(1.0, 1.0));
        tweens.add(id, Tween::move_x_to(1.0, 1.0));
        tweens.add(EntityId(2), Tween::wait(1.0));
        assert_eq!(tweens.len(), 3);

        tweens.remove_entity(id);
        assert_eq!(tweens.len(), 1);

        // The survivor still runs to completion
        let mut scene = scene_with(Entity::new(EntityId(2)));
        tweens.tick(1.0, &mut scene);
        assert!(tweens.is_empty());
    }
}
