//! Opponent traffic: one car every 0.5 to 1.5 seconds, driving down the
//! screen until it is removed off the bottom.

use glam::Vec2;
use roadrush_engine::{
    Collider, EngineContext, Entity, EntityId, GameEvent, SpriteComponent, Tween, TweenChain,
};

use crate::config::RaceConfig;
use crate::events;
use crate::state::{RaceState, CAR_TAG};

/// Count the spawn timer down and spawn a car when it runs out.
pub fn update(state: &mut RaceState, ctx: &mut EngineContext, config: &RaceConfig, dt: f32) {
    if !config.spawn.enabled {
        return;
    }
    state.spawn_timer -= dt;
    if state.spawn_timer >= 0.0 {
        return;
    }

    if let Some(layer) = state.handles.car_layer {
        spawn_car(ctx, config, layer);
    }

    let [low, high] = config.spawn.delay_ms;
    state.spawn_timer = ctx.rng.range(low, high) as f32 / 1000.0;
}

/// Sprite name for a car, e.g. `car_red_3`.
fn car_sprite(ctx: &mut EngineContext, config: &RaceConfig) -> String {
    let colour = ctx
        .rng
        .pick(&config.spawn.colours)
        .map(String::as_str)
        .unwrap_or("black");
    let model = ctx.rng.range(1, config.spawn.models.max(1) + 1);
    format!("car_{}_{}", colour, model)
}

/// Put a car at the top of the car layer and send it down the track.
pub fn spawn_car(ctx: &mut EngineContext, config: &RaceConfig, layer: EntityId) -> EntityId {
    let spawn = &config.spawn;
    let [low, high] = spawn.x_range;
    let x = ctx.rng.range(low, high) as f32;
    let size = Vec2::from(spawn.car_size);
    let sprite = car_sprite(ctx, config);

    let id = ctx.next_id();
    ctx.spawn(
        Entity::new(id)
            .with_tag(CAR_TAG)
            .with_parent(layer)
            .with_pos(Vec2::new(x, spawn.height))
            .with_sprite(SpriteComponent::new(sprite.as_str(), size))
            .with_collider(Collider::hazard(size)),
    );
    ctx.tweens.add(
        id,
        TweenChain::sequence(vec![
            Tween::move_by(Vec2::new(0.0, -spawn.travel_distance), config.travel_duration()),
            Tween::despawn(),
        ]),
    );

    log::debug!("spawned {} at x={}", sprite, x);
    ctx.emit_event(GameEvent::new(events::CAR_SPAWNED).with_a(x));
    id
}
