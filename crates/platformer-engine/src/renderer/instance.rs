use bytemuck::{Pod, Zeroable};

use crate::api::types::EntityId;

/// Per-object frame snapshot read by the canvas renderer and debug overlays.
/// Must match the TypeScript reader: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ObjectInstance {
    /// Top-left x in canvas pixels.
    pub x: f32,
    /// Top-left y in canvas pixels (y down).
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity in px/frame (0 for objects without a behavior).
    pub vx: f32,
    /// Vertical velocity in px/frame.
    pub vy: f32,
    /// 1.0 when grounded this frame, else 0.0.
    pub grounded: f32,
    /// 1.0 when the object carries a platformer behavior, else 0.0.
    pub simulated: f32,
}

impl ObjectInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Snapshot of every tracked object, in registration order.
/// `ids()[i]` names the object in `instances()[i]`.
pub struct SnapshotBuffer {
    instances: Vec<ObjectInstance>,
    ids: Vec<EntityId>,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.ids.clear();
    }

    pub fn push(&mut self, id: EntityId, instance: ObjectInstance) {
        self.ids.push(id);
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[ObjectInstance] {
        &self.instances
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Flat float view of the instance data.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for reads from WASM memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for SnapshotBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<ObjectInstance>(), 32);
        assert_eq!(ObjectInstance::STRIDE_BYTES, 32);
    }

    #[test]
    fn float_view_matches_field_order() {
        let mut buf = SnapshotBuffer::new();
        buf.push(
            EntityId::from("a"),
            ObjectInstance { x: 1.0, y: 2.0, width: 3.0, height: 4.0, vx: 5.0, vy: 6.0, grounded: 1.0, simulated: 1.0 },
        );
        buf.push(EntityId::from("b"), ObjectInstance::default());
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.as_floats().len(), 16);
        assert_eq!(&buf.as_floats()[..8], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 1.0, 1.0]);
        assert_eq!(buf.ids()[1], EntityId::from("b"));
    }
}
