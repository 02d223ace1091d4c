pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::collider::{Collider, ContactLayer};
pub use components::entity::Entity;
pub use components::sprite::SpriteComponent;
pub use components::tilemap::{TilemapComponent, Tile};
pub use core::bindings::Bindings;
pub use core::contacts::{ContactEvent, ContactQueue};
pub use core::scene::{Scene, WorldTransform};
pub use core::time::FixedTimestep;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue, KEY_SPACE};
pub use assets::manifest::SceneManifest;
pub use systems::rng::Rng;

#[cfg(feature = "physics")]
pub use core::physics::{PhysicsWorld, PhysicsBody};

// Extensions: opt-in animation support
pub use extensions::{TweenState, Tween, TweenChain, TweenId, TweenTarget, TweenLoop};
