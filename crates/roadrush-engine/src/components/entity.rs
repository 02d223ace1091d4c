use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::collider::Collider;
use crate::components::sprite::SpriteComponent;
use crate::components::tilemap::TilemapComponent;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsBody;

/// Fat Entity: a single struct with optional components.
/// Plays the role of a scene-graph node: `tag` is the node name and
/// `parent` makes `pos`/`rotation`/`scale` local to another entity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Node name, used for tag lookups ("car", "oil", "road", ...).
    pub tag: String,
    /// Whether this entity is active (inactive entities are not extracted for rendering).
    pub active: bool,
    /// Parent entity. Transforms are relative to it when set.
    pub parent: Option<EntityId>,
    /// Position, local to the parent.
    pub pos: Vec2,
    /// Rotation in radians, local to the parent.
    pub rotation: f32,
    /// Scale multiplier, local to the parent.
    pub scale: Vec2,
    pub sprite: Option<SpriteComponent>,
    pub tilemap: Option<TilemapComponent>,
    /// Contact shape. Only detects overlaps, never moves the entity.
    pub collider: Option<Collider>,
    /// Rapier handles, filled in when the entity is spawned through `EngineContext`.
    #[cfg(feature = "physics")]
    pub body: Option<PhysicsBody>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            parent: None,
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            sprite: None,
            tilemap: None,
            collider: None,
            #[cfg(feature = "physics")]
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_tilemap(mut self, tilemap: TilemapComponent) -> Self {
        self.tilemap = Some(tilemap);
        self
    }

    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Whether this entity carries the given tag.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }
}
