use bytemuck::{Pod, Zeroable};

/// Per-instance transform data handed to the host renderer.
/// Must match the host protocol: 6 floats = 24 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Entity ID, so the host can look up the sprite it loaded for it.
    pub id: f32,
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    /// Rotation in radians, world space.
    pub rotation: f32,
    /// World-space scale multiplier.
    pub scale_x: f32,
    pub scale_y: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing every drawable instance plus the camera.
pub struct RenderBuffer {
    /// Instances in scene spawn order (parents before children).
    pub instances: Vec<RenderInstance>,
    /// Camera `[x, y, rotation]` in world space.
    pub camera: [f32; 3],
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(128),
            camera: [0.0; 3],
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.camera = [0.0; 3];
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for zero-copy reads from wasm memory.
    pub fn instances_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<RenderInstance, f32>(&self.instances).as_ptr()
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_6_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
        assert_eq!(RenderInstance::FLOATS, 6);
    }

    #[test]
    fn render_buffer_push_and_count() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance::default());
        buf.push(RenderInstance::default());
        assert_eq!(buf.instance_count(), 2);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }
}
