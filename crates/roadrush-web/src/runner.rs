use roadrush_engine::{
    EngineContext, EntityId, FixedTimestep, Game, GameConfig, GameEvent,
    InputEvent, InputQueue, RenderBuffer,
};
use roadrush_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            timestep: FixedTimestep::new(config.fixed_dt),
            ctx: EngineContext::with_seed(config.seed),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
            game,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_render_buffer();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: as many fixed steps as the frame time covers,
    /// then rebuild the render buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.ctx.begin_step(self.timestep.dt());
            self.game.update(&mut self.ctx, &self.input);
            // Each tap is seen by exactly one step
            self.input.drain();
        }

        if self.ctx.events.len() > self.config.max_events {
            log::warn!(
                "{} game events this frame, host reads only {}",
                self.ctx.events.len(),
                self.config.max_events
            );
        }

        self.rebuild_render_buffer();
    }

    fn rebuild_render_buffer(&mut self) {
        build_render_buffer(&self.ctx.scene, self.ctx.camera, &mut self.render_buffer);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    /// Events emitted during the last tick, capped at `max_events`.
    pub fn game_events(&self) -> &[GameEvent] {
        let len = self.ctx.events.len().min(self.config.max_events);
        &self.ctx.events[..len]
    }

    /// Sprite name of an entity, for the host to resolve instance IDs.
    pub fn sprite_name(&self, id: u32) -> Option<String> {
        self.ctx
            .scene
            .get(EntityId(id))
            .and_then(|e| e.sprite.as_ref())
            .map(|s| s.name.clone())
    }

    // ---- Pointer accessors for zero-copy reads from wasm memory ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        GameEvent::as_floats(self.game_events()).as_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.game_events().len() as u32
    }

    pub fn camera_x(&self) -> f32 {
        self.render_buffer.camera[0]
    }

    pub fn camera_y(&self) -> f32 {
        self.render_buffer.camera[1]
    }

    pub fn camera_rotation(&self) -> f32 {
        self.render_buffer.camera[2]
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}
