use glam::Vec2;

/// Sprite component: names the image the host draws for an entity.
/// Textures are owned by the host; the core only needs the name and size.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Image name, e.g. "car_red_3".
    pub name: String,
    /// Unscaled size in world units. Collision shapes are derived from it.
    pub size: Vec2,
}

impl SpriteComponent {
    pub fn new(name: impl Into<String>, size: Vec2) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Half extents of the sprite's frame.
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }
}
