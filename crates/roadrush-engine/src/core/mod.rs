pub mod bindings;
pub mod contacts;
#[cfg(feature = "physics")]
pub mod physics;
pub mod scene;
pub mod time;
