use crate::api::types::EntityId;
use crate::components::object::GameObject;
use crate::core::behavior::PlatformerBehavior;

/// An object tracked by the engine, plus its behavior when it carries a
/// `platformer` descriptor.
#[derive(Debug, Clone)]
pub struct TrackedObject {
    pub object: GameObject,
    pub behavior: Option<PlatformerBehavior>,
}

impl TrackedObject {
    pub fn new(object: GameObject, behavior: Option<PlatformerBehavior>) -> Self {
        Self { object, behavior }
    }

    pub fn id(&self) -> &EntityId {
        &self.object.id
    }

    /// Static-flagged objects and objects without a behavior are solid for
    /// every behavior in the frame.
    pub fn is_collider(&self) -> bool {
        self.object.is_static() || self.behavior.is_none()
    }
}

/// Object storage using a flat Vec in registration order.
/// Designed for editor-scale object counts (tens to hundreds).
///
/// Order matters: colliders are resolved in this order, so replacing an
/// object keeps its slot and removing one keeps the others in place.
pub struct Scene {
    objects: Vec<TrackedObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::with_capacity(64),
        }
    }

    /// Create a scene with a specific object capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: Vec::with_capacity(capacity),
        }
    }

    /// Insert an object, replacing (in place) any existing entry with the
    /// same id. Returns the replaced entry.
    pub fn insert(&mut self, tracked: TrackedObject) -> Option<TrackedObject> {
        match self.index_of(tracked.id().as_str()) {
            Some(idx) => Some(std::mem::replace(&mut self.objects[idx], tracked)),
            None => {
                self.objects.push(tracked);
                None
            }
        }
    }

    /// Remove an object by id. Returns the removed entry if found.
    pub fn remove(&mut self, id: &str) -> Option<TrackedObject> {
        self.index_of(id).map(|idx| self.objects.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&TrackedObject> {
        self.objects.iter().find(|t| t.id().as_str() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut TrackedObject> {
        self.objects.iter_mut().find(|t| t.id().as_str() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TrackedObject> {
        self.objects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.objects.iter().position(|t| t.id().as_str() == id)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
