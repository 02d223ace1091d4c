use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from the scene.
/// Every active entity with a sprite or a tilemap becomes one instance
/// carrying its world transform. The camera entity, if any, fills `camera`.
pub fn build_render_buffer(scene: &Scene, camera: Option<EntityId>, buffer: &mut RenderBuffer) {
    buffer.clear();

    for entity in scene.iter() {
        if !entity.active || (entity.sprite.is_none() && entity.tilemap.is_none()) {
            continue;
        }
        let Some(t) = scene.world_transform(entity.id) else {
            continue;
        };
        buffer.push(RenderInstance {
            id: entity.id.0 as f32,
            x: t.pos.x,
            y: t.pos.y,
            rotation: t.rotation,
            scale_x: t.scale.x,
            scale_y: t.scale.y,
        });
    }

    if let Some(t) = camera.and_then(|id| scene.world_transform(id)) {
        buffer.camera = [t.pos.x, t.pos.y, t.rotation];
    }
}
