//! Crash sequence: the car spins back to the centre line, the traffic is
//! cleared, and the player is invincible until the hero car has bounced
//! back to normal size.

use roadrush_engine::{EngineContext, GameEvent, Tween, TweenChain};

use crate::config::RaceConfig;
use crate::events;
use crate::player::{self, Heading};
use crate::state::RaceState;

/// Start the crash sequence. Does nothing while already invincible.
pub fn trigger(state: &mut RaceState, ctx: &mut EngineContext, config: &RaceConfig) {
    if state.invincible {
        return;
    }
    log::info!("crash at t={:.2}s", ctx.time());

    player::set_heading(state, ctx, config, Heading::None);
    state.invincible = true;
    ctx.emit_event(GameEvent::new(events::CRASH));

    let crash = &config.crash;
    let handles = &state.handles;

    if let Some(camera) = handles.camera {
        ctx.tweens.remove_entity(camera);
        ctx.tweens.add(camera, Tween::rotate_to(0.0, crash.camera_duration));
    }

    if let Some(player) = handles.player {
        ctx.tweens.remove_entity(player);
        ctx.tweens.add(
            player,
            TweenChain::sequence(vec![
                Tween::move_x_to(0.0, crash.center_duration),
                Tween::rotate_to(0.0, crash.derotate_duration),
            ]),
        );
    }

    if let Some(layer) = handles.car_layer {
        let cleared = ctx.despawn_children(layer);
        log::debug!("cleared {} cars", cleared);
    }

    let recovery = match handles.hero {
        Some(hero) => {
            ctx.tweens.remove_entity(hero);
            Some((
                hero,
                TweenChain::sequence(vec![
                    Tween::scale_to(crash.scale_up, crash.scale_up_duration),
                    Tween::scale_to(1.0, crash.scale_down_duration),
                ]),
            ))
        }
        // Nothing to animate, but invincibility must still run out
        None => handles
            .player
            .map(|player| (player, TweenChain::from(Tween::wait(crash.recovery_duration())))),
    };

    match recovery {
        Some((id, chain)) => {
            ctx.tweens.add(id, chain.with_on_complete(events::RECOVERY_DONE));
        }
        None => {
            log::warn!("no hero or player to animate, crash ends immediately");
            finish(state, ctx);
        }
    }
}

/// End of the crash sequence: control and collisions come back.
pub fn finish(state: &mut RaceState, ctx: &mut EngineContext) {
    if !state.invincible {
        return;
    }
    state.invincible = false;
    log::info!("recovered at t={:.2}s", ctx.time());
    ctx.emit_event(GameEvent::new(events::RECOVERED));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawner;
    use crate::state::RaceHandles;
    use glam::Vec2;
    use roadrush_engine::Entity;

    const DT: f32 = 1.0 / 60.0;

    fn setup(with_hero: bool) -> (RaceState, EngineContext, RaceConfig) {
        let config = RaceConfig::default();
        let mut ctx = EngineContext::new();
        let mut handles = RaceHandles::default();

        let camera = ctx.next_id();
        ctx.spawn(Entity::new(camera).with_tag("camera").with_rotation(-0.25));
        handles.camera = Some(camera);

        let player = ctx.next_id();
        ctx.spawn(
            Entity::new(player)
                .with_tag("player")
                .with_pos(Vec2::new(-120.0, 400.0))
                .with_rotation(0.5),
        );
        handles.player = Some(player);

        if with_hero {
            let hero = ctx.next_id();
            ctx.spawn(Entity::new(hero).with_tag("hero").with_parent(player));
            handles.hero = Some(hero);
        }

        let layer = ctx.next_id();
        ctx.spawn(Entity::new(layer).with_tag("carLayer"));
        handles.car_layer = Some(layer);

        let mut state = RaceState::new(handles, &config);
        state.heading = Heading::Left;
        (state, ctx, config)
    }

    /// Step the engine and apply recovery the way the game update does.
    fn step(state: &mut RaceState, ctx: &mut EngineContext) {
        ctx.begin_step(DT);
        let done: Vec<u32> = ctx.tweens.drain_completed().collect();
        if done.contains(&events::RECOVERY_DONE) {
            finish(state, ctx);
        }
    }

    #[test]
    fn crash_clears_traffic_and_heading() {
        let (mut state, mut ctx, config) = setup(true);
        let layer = state.handles.car_layer.unwrap();
        for _ in 0..3 {
            spawner::spawn_car(&mut ctx, &config, layer);
        }
        ctx.clear_frame_data();

        trigger(&mut state, &mut ctx, &config);

        assert!(state.invincible);
        assert_eq!(state.heading, Heading::None);
        assert!(ctx.scene.children_of(layer).is_empty());
        assert!(ctx.events.contains(&GameEvent::new(events::CRASH)));
        assert!(ctx.events.contains(&GameEvent::new(events::HEADING).with_a(0.0)));
    }

    #[test]
    fn player_is_recentred_then_straightened() {
        let (mut state, mut ctx, config) = setup(true);
        let player = state.handles.player.unwrap();
        trigger(&mut state, &mut ctx, &config);

        for _ in 0..6 {
            step(&mut state, &mut ctx);
        }
        let p = ctx.scene.get(player).unwrap();
        assert!(p.pos.x.abs() < 1e-3);
        assert!((p.rotation - 0.5).abs() < 1e-4, "derotation starts after centring");

        for _ in 0..6 {
            step(&mut state, &mut ctx);
        }
        let p = ctx.scene.get(player).unwrap();
        assert!(p.rotation.abs() < 1e-4);
        let camera = ctx.scene.get(state.handles.camera.unwrap()).unwrap();
        assert!(camera.rotation.abs() < 0.25);
    }

    #[test]
    fn invincible_for_recovery_duration() {
        let (mut state, mut ctx, config) = setup(true);
        let hero = state.handles.hero.unwrap();
        trigger(&mut state, &mut ctx, &config);

        for _ in 0..18 {
            step(&mut state, &mut ctx);
        }
        assert!((ctx.scene.get(hero).unwrap().scale.x - 20.0).abs() < 1e-3);

        for _ in 18..53 {
            step(&mut state, &mut ctx);
            assert!(state.invincible);
        }
        step(&mut state, &mut ctx);
        assert!(!state.invincible);
        assert_eq!(ctx.scene.get(hero).unwrap().scale, Vec2::ONE);
        assert!(ctx.events.contains(&GameEvent::new(events::RECOVERED)));
    }

    #[test]
    fn crash_while_invincible_is_ignored() {
        let (mut state, mut ctx, config) = setup(true);
        trigger(&mut state, &mut ctx, &config);
        let tweens = ctx.tweens.len();
        ctx.clear_frame_data();

        trigger(&mut state, &mut ctx, &config);
        assert_eq!(ctx.tweens.len(), tweens);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn missing_hero_still_recovers() {
        let (mut state, mut ctx, config) = setup(false);
        trigger(&mut state, &mut ctx, &config);
        for _ in 0..53 {
            step(&mut state, &mut ctx);
        }
        assert!(state.invincible);
        step(&mut state, &mut ctx);
        assert!(!state.invincible);
    }
}
