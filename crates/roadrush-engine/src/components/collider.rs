use glam::Vec2;

/// Which side of a contact an entity is on.
/// Only actor-versus-hazard overlaps are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactLayer {
    /// The thing being protected (the player car).
    Actor,
    /// Anything the actor can run into (opponents, oil).
    #[default]
    Hazard,
}

/// Axis-aligned box used for contact detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub half_extents: Vec2,
    pub layer: ContactLayer,
}

impl Collider {
    pub fn actor(size: Vec2) -> Self {
        Self {
            half_extents: size / 2.0,
            layer: ContactLayer::Actor,
        }
    }

    pub fn hazard(size: Vec2) -> Self {
        Self {
            half_extents: size / 2.0,
            layer: ContactLayer::Hazard,
        }
    }

    /// Whether a contact between the two layers should be reported.
    pub fn reports(a: ContactLayer, b: ContactLayer) -> bool {
        a != b
    }
}
