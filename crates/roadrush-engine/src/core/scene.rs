use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Deepest parent chain resolved by the world-transform walk.
const MAX_DEPTH: usize = 32;

/// Resolved transform of an entity in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub pos: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl WorldTransform {
    pub const IDENTITY: Self = Self {
        pos: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    fn of(entity: &Entity) -> Self {
        Self {
            pos: entity.pos,
            rotation: entity.rotation,
            scale: entity.scale,
        }
    }

    /// Compose a child's local transform onto this (parent) transform.
    pub fn then(&self, local: WorldTransform) -> WorldTransform {
        WorldTransform {
            pos: self.pos + Vec2::from_angle(self.rotation).rotate(local.pos * self.scale),
            rotation: self.rotation + local.rotation,
            scale: self.scale * local.scale,
        }
    }

    /// Map a world-space point into this transform's local space.
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        Vec2::from_angle(-self.rotation).rotate(point - self.pos) / self.scale
    }
}

/// Simple entity storage using a flat Vec.
/// Designed for small entity counts (a track, a player, a few dozen cars).
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    /// Spawn order of the remaining entities is preserved.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.is(tag))
    }

    /// Whether the entity exists and carries the tag.
    pub fn has_tag(&self, id: EntityId, tag: &str) -> bool {
        self.get(id).is_some_and(|e| e.is(tag))
    }

    /// Direct children of an entity, in spawn order.
    pub fn children_of(&self, parent: EntityId) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.parent == Some(parent))
            .map(|e| e.id)
            .collect()
    }

    /// World transform of an entity, composed through its parent chain.
    /// A dangling parent link ends the chain.
    pub fn world_transform(&self, id: EntityId) -> Option<WorldTransform> {
        let entity = self.get(id)?;
        let mut chain = vec![WorldTransform::of(entity)];
        let mut next = entity.parent;
        while let Some(parent_id) = next {
            if chain.len() >= MAX_DEPTH {
                break;
            }
            match self.get(parent_id) {
                Some(parent) => {
                    chain.push(WorldTransform::of(parent));
                    next = parent.parent;
                }
                None => break,
            }
        }
        Some(
            chain
                .into_iter()
                .rev()
                .fold(WorldTransform::IDENTITY, |acc, local| acc.then(local)),
        )
    }

    pub fn world_position(&self, id: EntityId) -> Option<Vec2> {
        self.world_transform(id).map(|t| t.pos)
    }

    /// First tilemap entity with `tag` whose grid covers the world point.
    pub fn tilemap_at(&self, point: Vec2, tag: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.active && e.is(tag))
            .find(|e| {
                let Some(tilemap) = &e.tilemap else { return false };
                self.world_transform(e.id)
                    .is_some_and(|t| tilemap.contains(t.to_local(point)))
            })
            .map(|e| e.id)
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
