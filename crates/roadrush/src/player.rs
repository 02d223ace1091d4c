//! Player steering: heading, toggle on tap, sideways drift.

use roadrush_engine::{EngineContext, GameEvent, Tween};

use crate::config::RaceConfig;
use crate::events;
use crate::state::RaceState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heading {
    Left,
    Right,
    #[default]
    None,
}

impl Heading {
    /// Sign sent to the host: -1 left, 0 none, 1 right.
    pub fn sign(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
            Heading::None => 0.0,
        }
    }

    /// Left goes right; right and none go left.
    pub fn toggled(self) -> Heading {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right | Heading::None => Heading::Left,
        }
    }
}

/// Change heading. Steering animations only start when the heading
/// actually changes; setting the current heading again does nothing.
pub fn set_heading(state: &mut RaceState, ctx: &mut EngineContext, config: &RaceConfig, heading: Heading) {
    if state.heading == heading {
        return;
    }
    state.heading = heading;
    log::debug!("heading {:?}", heading);
    ctx.emit_event(GameEvent::new(events::HEADING).with_a(heading.sign()));

    let steering = &config.steering;
    let (player_angle, camera_angle) = match heading {
        Heading::Left => (steering.player_angle, -steering.camera_angle),
        Heading::Right => (-steering.player_angle, steering.camera_angle),
        Heading::None => return,
    };

    if let Some(player) = state.handles.player {
        ctx.tweens.remove_entity(player);
        ctx.tweens.add(player, Tween::rotate_to(player_angle, steering.duration));
    }
    if let Some(camera) = state.handles.camera {
        ctx.tweens.remove_entity(camera);
        ctx.tweens.add(camera, Tween::rotate_to(camera_angle, steering.duration));
    }
}

/// Flip between left and right. Ignored while invincible.
pub fn toggle_heading(state: &mut RaceState, ctx: &mut EngineContext, config: &RaceConfig) {
    if state.invincible {
        return;
    }
    let next = state.heading.toggled();
    set_heading(state, ctx, config, next);
}

/// Drift the player sideways by the distance the track covered this step.
/// Positive rotation drifts toward negative x.
pub fn steer(state: &RaceState, ctx: &mut EngineContext, config: &RaceConfig, dt: f32) {
    let Some(player) = state.handles.player.and_then(|id| ctx.scene.get_mut(id)) else {
        return;
    };
    let distance = dt * config.scroll_speed();
    player.pos.x -= player.rotation.sin() * distance * config.lateral_factor;
}
