use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::game::EngineContext;
use crate::components::collider::Collider;
use crate::components::entity::Entity;
use crate::components::sprite::SpriteComponent;
use crate::components::tilemap::TilemapComponent;
use crate::core::bindings::Bindings;

/// Scene manifest describing the named node graph of a level.
/// Loaded from a JSON file bundled with the game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneManifest {
    /// Nodes in creation order. A parent must be listed before its children.
    pub nodes: Vec<NodeDescriptor>,
}

/// Describes a single node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Node name. Becomes the entity tag and the binding name.
    pub name: String,
    /// Name of the parent node, if any.
    #[serde(default)]
    pub parent: Option<String>,
    /// Position, local to the parent.
    #[serde(default)]
    pub position: [f32; 2],
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_scale")]
    pub scale: [f32; 2],
    #[serde(default)]
    pub sprite: Option<SpriteDescriptor>,
    #[serde(default)]
    pub tilemap: Option<TilemapDescriptor>,
    #[serde(default)]
    pub collider: Option<ColliderDescriptor>,
}

/// Describes the image drawn for a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    pub name: String,
    pub size: [f32; 2],
}

/// Describes a tile grid, top row first (see `TilemapComponent::from_rows`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilemapDescriptor {
    pub tile_size: f32,
    pub rows: Vec<String>,
}

/// Contact shape of a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColliderDescriptor {
    pub layer: ColliderLayer,
    /// Box size. Defaults to the sprite size.
    #[serde(default)]
    pub size: Option<[f32; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColliderLayer {
    Actor,
    Hazard,
}

fn default_scale() -> [f32; 2] {
    [1.0, 1.0]
}

impl NodeDescriptor {
    fn collider(&self) -> Option<Collider> {
        let desc = self.collider.as_ref()?;
        let size = desc
            .size
            .or_else(|| self.sprite.as_ref().map(|s| s.size))
            .map(Vec2::from)?;
        Some(match desc.layer {
            ColliderLayer::Actor => Collider::actor(size),
            ColliderLayer::Hazard => Collider::hazard(size),
        })
    }

    fn to_entity(&self, ctx: &mut EngineContext) -> Entity {
        let mut entity = Entity::new(ctx.next_id())
            .with_tag(self.name.as_str())
            .with_pos(Vec2::from(self.position))
            .with_rotation(self.rotation)
            .with_scale(Vec2::from(self.scale));
        if let Some(sprite) = &self.sprite {
            entity = entity.with_sprite(SpriteComponent::new(sprite.name.as_str(), Vec2::from(sprite.size)));
        }
        if let Some(tilemap) = &self.tilemap {
            entity = entity.with_tilemap(TilemapComponent::from_rows(&tilemap.rows, tilemap.tile_size));
        }
        if self.collider.is_some() {
            match self.collider() {
                Some(collider) => entity = entity.with_collider(collider),
                None => log::warn!("node '{}': collider has no size and no sprite, skipped", self.name),
            }
        }
        entity
    }
}

impl SceneManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Spawn every node into the context's scene and bind its name.
    /// A node whose parent is unknown is skipped, along with its subtree.
    pub fn instantiate(&self, ctx: &mut EngineContext) -> Bindings {
        let mut bindings = Bindings::new();
        for node in &self.nodes {
            let parent = match &node.parent {
                Some(name) => match bindings.get(name) {
                    Some(id) => Some(id),
                    None => {
                        log::warn!("node '{}': unknown parent '{}', skipped", node.name, name);
                        continue;
                    }
                },
                None => None,
            };

            let mut entity = node.to_entity(ctx);
            entity.parent = parent;
            let id = ctx.spawn(entity);
            bindings.bind(node.name.as_str(), id);
        }
        log::debug!("scene manifest: {} nodes instantiated", ctx.scene.len());
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: &str = r#"{
        "nodes": [
            { "name": "camera", "position": [0, 400] },
            { "name": "trackSection1" },
            { "name": "road", "parent": "trackSection1", "position": [0, 50],
              "tilemap": { "tile_size": 50, "rows": [".##.", ".##."] } },
            { "name": "oil", "parent": "trackSection1", "position": [-20, 30],
              "sprite": { "name": "oil", "size": [40, 40] },
              "collider": { "layer": "hazard" } },
            { "name": "player", "position": [0, 400] },
            { "name": "hero", "parent": "player",
              "sprite": { "name": "car_player", "size": [90, 180] },
              "collider": { "layer": "actor", "size": [80, 170] } }
        ]
    }"#;

    #[test]
    fn parse_and_instantiate() {
        let manifest = SceneManifest::from_json(TRACK).unwrap();
        assert_eq!(manifest.nodes.len(), 6);

        let mut ctx = EngineContext::new();
        let bindings = manifest.instantiate(&mut ctx);
        assert_eq!(ctx.scene.len(), 6);

        let section = bindings.get("trackSection1").unwrap();
        let road = bindings.get("road").unwrap();
        assert_eq!(ctx.scene.get(road).unwrap().parent, Some(section));
        assert_eq!(ctx.scene.get(road).unwrap().tilemap.as_ref().unwrap().tile_count(), 4);

        let hero = ctx.scene.get(bindings.get("hero").unwrap()).unwrap();
        assert_eq!(hero.collider, Some(Collider::actor(Vec2::new(80.0, 170.0))));
        assert_eq!(hero.scale, Vec2::ONE);

        // Oil collider falls back to the sprite size
        let oil = ctx.scene.get(bindings.get("oil").unwrap()).unwrap();
        assert_eq!(oil.collider, Some(Collider::hazard(Vec2::new(40.0, 40.0))));
    }

    #[test]
    fn unknown_parent_skips_node() {
        let json = r#"{ "nodes": [
            { "name": "orphan", "parent": "nowhere" },
            { "name": "root" }
        ] }"#;
        let mut ctx = EngineContext::new();
        let bindings = SceneManifest::from_json(json).unwrap().instantiate(&mut ctx);
        assert!(bindings.get("orphan").is_none());
        assert!(bindings.get("root").is_some());
        assert_eq!(ctx.scene.len(), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SceneManifest::from_json("{ \"nodes\": [ { } ] }").is_err());
        assert!(SceneManifest::from_json("not json").is_err());
    }
}
