//! Collision response: leaving the road, hitting oil, hitting a car.

use roadrush_engine::EngineContext;

use crate::config::RaceConfig;
use crate::crash;
use crate::player;
use crate::state::{RaceState, CAR_TAG, OIL_TAG, ROAD_TAG};

/// Whether the player stands on a painted road tile.
/// `None` when there is no road grid under the player at all.
pub fn on_road(state: &RaceState, ctx: &EngineContext) -> Option<bool> {
    let pos = ctx.scene.world_position(state.handles.player?)?;
    let road_id = ctx.scene.tilemap_at(pos, ROAD_TAG)?;
    let transform = ctx.scene.world_transform(road_id)?;
    let tilemap = ctx.scene.get(road_id)?.tilemap.as_ref()?;

    let on_tile = tilemap
        .grid_cell(transform.to_local(pos))
        .and_then(|(column, row)| tilemap.tile_at(column, row))
        .is_some();
    Some(on_tile)
}

/// Crash when the player drives off the painted road.
pub fn check_boundary(state: &mut RaceState, ctx: &mut EngineContext, config: &RaceConfig) {
    if state.invincible {
        return;
    }
    if on_road(state, ctx) == Some(false) {
        log::debug!("off road");
        crash::trigger(state, ctx, config);
    }
}

/// React to every contact that began since the last step.
/// Oil flips the heading, a car crashes. Both are ignored while invincible.
pub fn resolve_contacts(state: &mut RaceState, ctx: &mut EngineContext, config: &RaceConfig) {
    for contact in ctx.contacts.drain() {
        if state.invincible {
            continue;
        }
        let tagged = |tag: &str| {
            ctx.scene.has_tag(contact.entity_a, tag) || ctx.scene.has_tag(contact.entity_b, tag)
        };
        let (oil, car) = (tagged(OIL_TAG), tagged(CAR_TAG));

        if oil {
            player::toggle_heading(state, ctx, config);
        }
        if car {
            crash::trigger(state, ctx, config);
        }
    }
}
