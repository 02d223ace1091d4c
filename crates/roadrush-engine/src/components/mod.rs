pub mod collider;
pub mod entity;
pub mod sprite;
pub mod tilemap;
