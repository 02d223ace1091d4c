use roadrush_engine::{Bindings, EntityId};

use crate::config::RaceConfig;
use crate::player::Heading;

pub const CAMERA: &str = "camera";
pub const PLAYER: &str = "player";
pub const CAR_LAYER: &str = "carLayer";
pub const HERO: &str = "hero";
const NODES: &[&str] = &[CAMERA, PLAYER, CAR_LAYER, HERO];

/// Entity tags the race logic reacts to.
pub const CAR_TAG: &str = "car";
pub const OIL_TAG: &str = "oil";
pub const ROAD_TAG: &str = "road";

/// Entities the race needs, resolved once from the scene bindings.
#[derive(Debug, Clone, Default)]
pub struct RaceHandles {
    pub camera: Option<EntityId>,
    pub player: Option<EntityId>,
    pub car_layer: Option<EntityId>,
    pub hero: Option<EntityId>,
    /// Track segments in index order. Missing names are left out.
    pub segments: Vec<EntityId>,
}

impl RaceHandles {
    pub fn resolve(bindings: &Bindings, config: &RaceConfig) -> Self {
        let missing: Vec<&str> = bindings
            .missing(NODES)
            .into_iter()
            .chain(bindings.missing(&config.segment_names))
            .collect();
        if !missing.is_empty() {
            log::warn!("scene is missing nodes: {}", missing.join(", "));
        }

        Self {
            camera: bindings.get(CAMERA),
            player: bindings.get(PLAYER),
            car_layer: bindings.get(CAR_LAYER),
            hero: bindings.get(HERO),
            segments: bindings.resolve_all(&config.segment_names),
        }
    }
}

/// Everything the race mutates between steps.
#[derive(Debug, Clone, Default)]
pub struct RaceState {
    pub handles: RaceHandles,
    pub heading: Heading,
    /// True from a crash until its recovery animation ends.
    pub invincible: bool,
    /// Seconds until the next car spawns.
    pub spawn_timer: f32,
}

impl RaceState {
    pub fn new(handles: RaceHandles, config: &RaceConfig) -> Self {
        Self {
            handles,
            heading: Heading::None,
            invincible: false,
            spawn_timer: config.spawn.initial_delay,
        }
    }
}
