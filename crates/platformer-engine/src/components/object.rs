use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::api::types::EntityId;
use crate::core::collision::Aabb;

/// Visual kind of an editor object. The simulation only cares about the
/// bounding box, so the kind is carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Rectangle,
    Circle,
    Text,
    Image,
    Triangle,
    Box,
    Model,
    Light,
    Sound,
    #[serde(other)]
    Other,
}

/// Type tag of an attached behavior descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorType {
    Platformer,
    Physics,
    Draggable,
    Tween,
    Pathfinding,
    Timer,
    State,
    Custom,
    #[serde(other)]
    Unknown,
}

/// A behavior attached to an object in the editor, with its free-form
/// property bag (string | number | boolean | null values).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorDescriptor {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BehaviorType,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl BehaviorDescriptor {
    pub fn new(kind: BehaviorType) -> Self {
        Self {
            id: String::new(),
            kind,
            properties: Map::new(),
            enabled: true,
        }
    }

    /// Shorthand for an empty `platformer` descriptor.
    pub fn platformer() -> Self {
        Self::new(BehaviorType::Platformer)
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Physics flags set in the editor's inspector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restitution: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction: Option<f32>,
    #[serde(default)]
    pub is_static: bool,
}

/// An object as the editor stores it in a project.
///
/// Position is the top-left corner in canvas pixels, y down. Missing or null
/// geometry deserializes to zero so a malformed object can never feed NaN
/// into the collision math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameObject {
    pub id: EntityId,
    #[serde(rename = "type", default)]
    pub kind: ObjectKind,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub x: f32,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub y: f32,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub width: f32,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub height: f32,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub rotation: f32,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physics: Option<PhysicsSettings>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub behaviors: Vec<BehaviorDescriptor>,
}

impl GameObject {
    /// Create a zero-sized rectangle at the origin.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            kind: ObjectKind::Rectangle,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            z_index: 0,
            visible: true,
            physics: None,
            behaviors: Vec::new(),
        }
    }

    /// Parse a single object from the editor's JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.physics.get_or_insert_with(PhysicsSettings::default).is_static = is_static;
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorDescriptor) -> Self {
        self.behaviors.push(behavior);
        self
    }

    // -- Queries --

    /// The first `platformer` descriptor, if any.
    pub fn platformer(&self) -> Option<&BehaviorDescriptor> {
        self.behaviors.iter().find(|b| b.kind == BehaviorType::Platformer)
    }

    pub fn has_platformer(&self) -> bool {
        self.platformer().is_some()
    }

    pub fn is_static(&self) -> bool {
        self.physics.as_ref().is_some_and(|p| p.is_static)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    /// Replace non-finite geometry with zero. Returns true if anything changed.
    pub fn sanitize_geometry(&mut self) -> bool {
        let mut changed = false;
        for value in [&mut self.x, &mut self.y, &mut self.width, &mut self.height] {
            if !value.is_finite() {
                *value = 0.0;
                changed = true;
            }
        }
        changed
    }
}

fn default_true() -> bool {
    true
}

fn number_or_zero<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_editor_object() {
        let json = r##"{
            "id": "hero",
            "type": "rectangle",
            "x": 100, "y": 50, "width": 32, "height": 48,
            "color": "#ff0000",
            "rotation": 0, "zIndex": 2, "locked": false, "visible": true,
            "behaviors": [
                { "id": "b1", "type": "platformer", "properties": { "gravity": 0.7 }, "enabled": true }
            ]
        }"##;
        let obj = GameObject::from_json(json).unwrap();
        assert_eq!(obj.id, EntityId::from("hero"));
        assert_eq!(obj.bounds(), Aabb::new(100.0, 50.0, 32.0, 48.0));
        assert_eq!(obj.z_index, 2);
        assert!(obj.has_platformer());
        assert!(!obj.is_static());
        let bag = &obj.platformer().unwrap().properties;
        assert_eq!(bag["gravity"], 0.7);
    }

    #[test]
    fn missing_and_null_geometry_defaults_to_zero() {
        let obj = GameObject::from_json(r#"{ "id": "ghost", "x": 5, "width": null }"#).unwrap();
        assert_eq!(obj.bounds(), Aabb::new(5.0, 0.0, 0.0, 0.0));
        assert!(obj.visible);
        assert_eq!(obj.kind, ObjectKind::Rectangle);
    }

    #[test]
    fn unknown_tags_degrade_to_catch_all() {
        let obj = GameObject::from_json(
            r#"{ "id": "a", "type": "hologram", "behaviors": [{ "type": "teleport" }] }"#,
        )
        .unwrap();
        assert_eq!(obj.kind, ObjectKind::Other);
        assert_eq!(obj.behaviors[0].kind, BehaviorType::Unknown);
        assert!(obj.behaviors[0].enabled);
        assert!(!obj.has_platformer());
    }

    #[test]
    fn static_flag_from_physics_settings() {
        let obj = GameObject::from_json(
            r#"{ "id": "floor", "physics": { "isStatic": true, "mass": 1 } }"#,
        )
        .unwrap();
        assert!(obj.is_static());
        assert!(GameObject::new("wall").with_static(true).is_static());
    }

    #[test]
    fn sanitize_replaces_nan_geometry() {
        let mut obj = GameObject::new("broken").with_pos(1.0, f32::NAN).with_size(f32::INFINITY, 4.0);
        assert!(obj.sanitize_geometry());
        assert_eq!(obj.bounds(), Aabb::new(1.0, 0.0, 0.0, 4.0));
        assert!(!obj.sanitize_geometry());
    }
}
