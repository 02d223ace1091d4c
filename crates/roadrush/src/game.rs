//! RoadRush: endless top-down driving. Tap to swing between left and right,
//! dodge traffic, stay off the oil and on the asphalt.

use roadrush_engine::api::game::GameConfig;
use roadrush_engine::input::queue::InputQueue;
use roadrush_engine::{EngineContext, Game, SceneManifest};

use crate::collision;
use crate::config::RaceConfig;
use crate::crash;
use crate::events;
use crate::player;
use crate::spawner;
use crate::state::{RaceHandles, RaceState};
use crate::track;

const WORLD_W: f32 = 1536.0;
const WORLD_H: f32 = 2048.0;

/// Scene graph shipped with the game.
const TRACK_JSON: &str = include_str!("../assets/track.json");
/// Tunables shipped with the game.
const RACE_JSON: &str = include_str!("../assets/race.json");

pub struct RoadRush {
    config: RaceConfig,
    manifest: SceneManifest,
    state: RaceState,
}

impl RoadRush {
    pub fn new() -> Self {
        Self::with_scene(Self::bundled_config(), Self::bundled_manifest())
    }

    pub fn with_scene(config: RaceConfig, manifest: SceneManifest) -> Self {
        Self {
            state: RaceState::new(RaceHandles::default(), &config),
            config,
            manifest,
        }
    }

    /// The bundled track. Empty if it fails to parse.
    pub fn bundled_manifest() -> SceneManifest {
        SceneManifest::from_json(TRACK_JSON).unwrap_or_else(|err| {
            log::error!("bundled track.json is invalid: {}", err);
            SceneManifest::default()
        })
    }

    /// The bundled tunables. Defaults if they fail to parse.
    pub fn bundled_config() -> RaceConfig {
        RaceConfig::from_json(RACE_JSON).unwrap_or_else(|err| {
            log::error!("bundled race.json is invalid: {}", err);
            RaceConfig::default()
        })
    }

    pub fn state(&self) -> &RaceState {
        &self.state
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// Handle tween completions from the engine step.
    fn finish_animations(&mut self, ctx: &mut EngineContext) {
        let done: Vec<u32> = ctx.tweens.drain_completed().collect();
        if done.contains(&events::RECOVERY_DONE) {
            crash::finish(&mut self.state, ctx);
        }
    }
}

impl Default for RoadRush {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for RoadRush {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            world_width: WORLD_W,
            world_height: WORLD_H,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let bindings = self.manifest.instantiate(ctx);
        let handles = RaceHandles::resolve(&bindings, &self.config);
        if let Some(camera) = handles.camera {
            ctx.set_camera(camera);
        }
        self.state = RaceState::new(handles, &self.config);

        track::start(&self.state, ctx, &self.config);
        log::info!(
            "race ready: {} entities, {} track segments",
            ctx.scene.len(),
            self.state.handles.segments.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if self.state.handles.player.is_none() {
            return;
        }
        let dt = ctx.dt();

        self.finish_animations(ctx);

        for _ in 0..input.taps() {
            player::toggle_heading(&mut self.state, ctx, &self.config);
        }

        player::steer(&self.state, ctx, &self.config, dt);
        spawner::update(&mut self.state, ctx, &self.config, dt);
        collision::check_boundary(&mut self.state, ctx, &self.config);
        collision::resolve_contacts(&mut self.state, ctx, &self.config);
        track::wrap(&self.state, ctx, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Heading;
    use roadrush_engine::InputEvent;

    const DT: f32 = 1.0 / 60.0;

    fn started(config: RaceConfig) -> (RoadRush, EngineContext) {
        let mut game = RoadRush::with_scene(config, RoadRush::bundled_manifest());
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        (game, ctx)
    }

    fn step(game: &mut RoadRush, ctx: &mut EngineContext, input: &InputQueue) {
        ctx.begin_step(DT);
        game.update(ctx, input);
    }

    #[test]
    fn bundled_track_binds_every_node() {
        let (game, ctx) = started(RaceConfig::default());
        let handles = &game.state().handles;
        assert!(handles.camera.is_some());
        assert!(handles.player.is_some());
        assert!(handles.hero.is_some());
        assert!(handles.car_layer.is_some());
        assert_eq!(handles.segments.len(), 4);
        assert_eq!(ctx.camera, handles.camera);
        // One repeating scroll per segment
        assert_eq!(ctx.tweens.len(), 4);
    }

    #[test]
    fn bundled_config_is_the_shipped_tuning() {
        assert_eq!(RoadRush::bundled_config(), RaceConfig::default());
        assert_eq!(RoadRush::new().config(), &RaceConfig::default());
    }

    #[test]
    fn player_starts_on_the_road() {
        let (game, ctx) = started(RaceConfig::default());
        assert_eq!(collision::on_road(game.state(), &ctx), Some(true));
    }

    #[test]
    fn tap_toggles_heading() {
        let (mut game, mut ctx) = started(RaceConfig::default());
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        step(&mut game, &mut ctx, &input);
        assert_eq!(game.state().heading, Heading::Left);

        input.drain();
        step(&mut game, &mut ctx, &input);
        assert_eq!(game.state().heading, Heading::Left);
    }

    #[test]
    fn traffic_appears_after_initial_delay() {
        let (mut game, mut ctx) = started(RaceConfig::default());
        let input = InputQueue::new();
        for _ in 0..(60 * 3) {
            step(&mut game, &mut ctx, &input);
        }
        let layer = game.state().handles.car_layer.unwrap();
        assert!(!ctx.scene.children_of(layer).is_empty());
    }

    #[test]
    fn missing_player_makes_update_a_no_op() {
        let mut manifest = RoadRush::bundled_manifest();
        manifest.nodes.retain(|n| n.name != "player" && n.parent.as_deref() != Some("player"));
        let mut game = RoadRush::with_scene(RaceConfig::default(), manifest);
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);

        let input = InputQueue::new();
        for _ in 0..(60 * 3) {
            step(&mut game, &mut ctx, &input);
        }
        assert!(ctx.events.is_empty());
        assert_eq!(game.state().spawn_timer, 2.0);
    }

    #[test]
    fn empty_manifest_still_runs() {
        let mut game = RoadRush::with_scene(RaceConfig::default(), SceneManifest::default());
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        step(&mut game, &mut ctx, &InputQueue::new());
        assert!(ctx.scene.is_empty());
    }
}
