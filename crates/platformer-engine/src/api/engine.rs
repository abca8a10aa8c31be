use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::Result;
use crate::components::object::{BehaviorDescriptor, GameObject};
use crate::components::properties::PlatformerProperties;
use crate::core::behavior::{FrameContext, PlatformerBehavior};
use crate::core::collision::Aabb;
use crate::core::scene::{Scene, TrackedObject};
use crate::core::time::{Clock, FrameTimer, SystemClock};
use crate::input::keys::{ControlFrame, KeyBindings};
use crate::project::document::ProjectScene;

/// Engine configuration, provided by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Baseline tuning for platformer objects. A descriptor's property bag
    /// overrides individual fields.
    pub default_properties: PlatformerProperties,
    /// Initial object capacity (default: 64).
    pub capacity: usize,
    /// Key bindings used by hosts that drive the engine from a keyboard.
    pub key_bindings: KeyBindings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_properties: PlatformerProperties::default(),
            capacity: 64,
            key_bindings: KeyBindings::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a JSON string. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Registry of simulated objects.
///
/// Tracks every object the host registers. Objects with a `platformer`
/// descriptor get a [`PlatformerBehavior`]; every other object (and any
/// object flagged static) is a solid collider for the behaviors.
pub struct PlatformerEngine {
    config: EngineConfig,
    scene: Scene,
    timer: FrameTimer,
    clock: Box<dyn Clock>,
}

impl PlatformerEngine {
    /// Engine with default configuration on the native system clock.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.capacity),
            config,
            timer: FrameTimer::new(),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the wall clock used for jump timing.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -- Registration --

    /// Register an object, replacing any existing entry with the same id.
    ///
    /// A behavior is created only if the object carries a `platformer`
    /// descriptor. `properties` overrides the descriptor's property bag.
    pub fn add_game_object(&mut self, mut object: GameObject, properties: Option<PlatformerProperties>) {
        sanitize(&mut object);
        let behavior = object.platformer().map(|descriptor| {
            let properties = match properties {
                Some(explicit) => explicit.sanitized(),
                None => self.properties_for(descriptor),
            };
            PlatformerBehavior::new(properties)
        });

        log::debug!(
            "add object {} (platformer: {}, static: {})",
            object.id,
            behavior.is_some(),
            object.is_static()
        );
        self.scene.insert(TrackedObject::new(object, behavior));
    }

    /// Deregister an object and drop its behavior. Unknown ids are ignored.
    pub fn remove_game_object(&mut self, id: &str) -> Option<GameObject> {
        let removed = self.scene.remove(id)?;
        log::debug!("remove object {}", id);
        Some(removed.object)
    }

    /// Replace an object's stored snapshot.
    ///
    /// The behavior follows the descriptor list: created if `platformer` was
    /// added, dropped if it was removed, and otherwise kept as-is so velocity
    /// and jump state survive edits made mid-flight.
    pub fn update_object(&mut self, mut object: GameObject) {
        sanitize(&mut object);
        let properties = object.platformer().map(|d| self.properties_for(d));

        let Some(tracked) = self.scene.get_mut(object.id.as_str()) else {
            self.scene.insert(TrackedObject::new(object, properties.map(PlatformerBehavior::new)));
            return;
        };

        match (properties, tracked.behavior.is_some()) {
            (Some(properties), false) => {
                log::debug!("object {} gained a platformer behavior", object.id);
                tracked.behavior = Some(PlatformerBehavior::new(properties));
            }
            (None, true) => {
                log::debug!("object {} lost its platformer behavior", object.id);
                tracked.behavior = None;
            }
            _ => {}
        }
        tracked.object = object;
    }

    /// Register every object of a project, in document order.
    pub fn load_scene(&mut self, scene: &ProjectScene) {
        for object in &scene.objects {
            self.add_game_object(object.clone(), None);
        }
        log::info!("loaded {} objects from project {:?}", scene.objects.len(), scene.name);
    }

    // -- Simulation --

    /// Advance every behavior by one frame.
    ///
    /// `timestamp` is the animation-frame time in milliseconds. Colliders are
    /// captured once from the pre-update positions, so behaviors never see
    /// each other's movement within a frame.
    pub fn update(&mut self, timestamp: f64, jump_held: bool) {
        let frame = FrameContext {
            delta_time: self.timer.tick(timestamp),
            now_ms: self.clock.now_ms(),
            jump_held,
        };

        let mut colliders = Vec::new();
        let mut owners = Vec::new();
        for (index, tracked) in self.scene.iter().enumerate() {
            if tracked.is_collider() {
                colliders.push(tracked.object.bounds());
                owners.push(index);
            }
        }

        for (index, tracked) in self.scene.iter_mut().enumerate() {
            let Some(behavior) = tracked.behavior.as_mut() else {
                continue;
            };

            let mut body = tracked.object.bounds();
            // A static platformer object is in the collider list too; it
            // must not collide with its own snapshot.
            match owners.binary_search(&index) {
                Ok(slot) => {
                    let others: Vec<Aabb> = colliders
                        .iter()
                        .enumerate()
                        .filter(|&(i, _)| i != slot)
                        .map(|(_, c)| *c)
                        .collect();
                    behavior.update(&mut body, &frame, &others);
                }
                Err(_) => behavior.update(&mut body, &frame, &colliders),
            }

            tracked.object.x = body.pos.x;
            tracked.object.y = body.pos.y;
        }
    }

    /// Forward held actions to every platformer object, the way the editor
    /// preview maps the keyboard onto all controllable objects at once.
    pub fn apply_controls(&mut self, controls: &ControlFrame) {
        let now = self.clock.now_ms();
        for behavior in self.scene.iter_mut().filter_map(|t| t.behavior.as_mut()) {
            if controls.left {
                behavior.move_left();
            }
            if controls.right {
                behavior.move_right();
            }
            if controls.jump {
                behavior.jump(now);
            }
        }
    }

    // -- Commands (no-ops for objects without a behavior) --

    pub fn move_left(&mut self, id: &str) {
        if let Some(behavior) = self.behavior_mut(id) {
            behavior.move_left();
        }
    }

    pub fn move_right(&mut self, id: &str) {
        if let Some(behavior) = self.behavior_mut(id) {
            behavior.move_right();
        }
    }

    pub fn jump(&mut self, id: &str) {
        let now = self.clock.now_ms();
        if let Some(behavior) = self.behavior_mut(id) {
            behavior.jump(now);
        }
    }

    // -- Queries --

    pub fn object_velocity(&self, id: &str) -> Option<Vec2> {
        self.behavior(id).map(|b| b.velocity())
    }

    pub fn is_object_on_ground(&self, id: &str) -> bool {
        self.behavior(id).is_some_and(|b| b.is_on_ground())
    }

    pub fn object(&self, id: &str) -> Option<&GameObject> {
        self.scene.get(id).map(|t| &t.object)
    }

    pub fn behavior(&self, id: &str) -> Option<&PlatformerBehavior> {
        self.scene.get(id).and_then(|t| t.behavior.as_ref())
    }

    fn behavior_mut(&mut self, id: &str) -> Option<&mut PlatformerBehavior> {
        self.scene.get_mut(id).and_then(|t| t.behavior.as_mut())
    }

    /// Tracked objects in registration order.
    pub fn objects(&self) -> impl Iterator<Item = &TrackedObject> {
        self.scene.iter()
    }

    pub fn len(&self) -> usize {
        self.scene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scene.is_empty()
    }

    /// Drop every object and behavior and forget the frame baseline.
    pub fn reset(&mut self) {
        self.scene.clear();
        self.timer.reset();
        log::debug!("engine reset");
    }

    fn properties_for(&self, descriptor: &BehaviorDescriptor) -> PlatformerProperties {
        self.config
            .default_properties
            .with_bag(&descriptor.properties)
            .sanitized()
    }
}

impl Default for PlatformerEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize(object: &mut GameObject) {
    if object.sanitize_geometry() {
        log::warn!("object {} has non-finite geometry, replaced with 0", object.id);
    }
}
