use crate::core::scene::TrackedObject;
use crate::renderer::instance::{ObjectInstance, SnapshotBuffer};

/// Rebuild the snapshot buffer from the tracked objects.
/// Hidden objects are still written; the renderer decides what to draw.
pub fn build_snapshot<'a>(objects: impl Iterator<Item = &'a TrackedObject>, buffer: &mut SnapshotBuffer) {
    buffer.clear();

    for tracked in objects {
        let object = &tracked.object;
        let (velocity, grounded) = match &tracked.behavior {
            Some(b) => (b.velocity(), b.is_on_ground()),
            None => (glam::Vec2::ZERO, false),
        };

        buffer.push(
            object.id.clone(),
            ObjectInstance {
                x: object.x,
                y: object.y,
                width: object.width,
                height: object.height,
                vx: velocity.x,
                vy: velocity.y,
                grounded: if grounded { 1.0 } else { 0.0 },
                simulated: if tracked.behavior.is_some() { 1.0 } else { 0.0 },
            },
        );
    }
}
