use wasm_bindgen::prelude::*;
use roadrush_engine::*;

pub mod collision;
pub mod config;
pub mod crash;
pub mod events;
pub mod game;
pub mod player;
pub mod spawner;
pub mod state;
pub mod track;

pub use config::RaceConfig;
pub use game::RoadRush;
pub use player::Heading;
pub use state::{RaceHandles, RaceState};

roadrush_web::export_game!(RoadRush, "roadrush");
