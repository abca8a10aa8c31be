pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod project;

// Re-export key types at crate root for convenience
pub use api::engine::{EngineConfig, PlatformerEngine};
pub use api::error::{EngineError, Result};
pub use api::types::EntityId;
pub use components::object::{BehaviorDescriptor, BehaviorType, GameObject, ObjectKind, PhysicsSettings};
pub use components::properties::PlatformerProperties;
pub use crate::core::behavior::{FrameContext, MotionState, PlatformerBehavior};
pub use crate::core::collision::{resolve_overlap, Aabb, Contact};
pub use crate::core::scene::{Scene, TrackedObject};
pub use crate::core::time::{Clock, FrameTimer, ManualClock, SystemClock};
pub use input::keys::{Action, ControlFrame, KeyBindings, KeyState};
pub use input::queue::{InputEvent, InputQueue};
pub use project::document::{ProjectScene, Resolution, SceneSettings};
pub use renderer::instance::{ObjectInstance, SnapshotBuffer};
pub use systems::snapshot::build_snapshot;
