use serde::{Deserialize, Serialize};

use crate::components::object::GameObject;

/// The slice of an editor project the preview needs: its objects and the
/// canvas resolution. Everything else in the document (scripts, assets,
/// variables, cloud metadata) is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectScene {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub objects: Vec<GameObject>,
    #[serde(default)]
    pub settings: SceneSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSettings {
    #[serde(default)]
    pub resolution: Resolution,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: f32,
    pub height: f32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl ProjectScene {
    /// Parse a project document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
