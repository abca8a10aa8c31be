use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::error::{EngineError, Result};

/// Tuning for one platformer-controlled object.
///
/// Magnitudes are per-frame, not per-second: gravity is added to the vertical
/// velocity once per `update()`, and velocities are added to the position
/// once per `update()`. Timing windows are wall-clock milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformerProperties {
    /// Downward acceleration in px/frame² (non-negative).
    pub gravity: f32,
    /// Vertical velocity set on a granted jump. Negative is upward.
    pub jump_force: f32,
    /// Horizontal speed cap on the ground, in px/frame.
    pub move_speed: f32,
    /// Horizontal velocity multiplier applied each grounded frame (0–1).
    pub ground_friction: f32,
    /// Fraction of `move_speed` reachable while airborne (0–1).
    pub air_control: f32,
    /// Clamp on downward velocity.
    pub max_fall_speed: f32,
    /// Total jumps available before touching ground again (at least 1).
    pub max_jumps: u32,
    /// Grace window after landing during which a jump is still honored.
    pub coyote_time: f32,
    /// Window before landing during which a press is remembered.
    pub jump_buffer_time: f32,
}

impl Default for PlatformerProperties {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_force: -10.0,
            move_speed: 5.0,
            ground_friction: 0.8,
            air_control: 0.5,
            max_fall_speed: 15.0,
            max_jumps: 2,
            coyote_time: 150.0,
            jump_buffer_time: 150.0,
        }
    }
}

impl PlatformerProperties {
    /// Override fields from an editor property bag.
    ///
    /// Keys are the editor's camelCase names. Numbers and numeric strings are
    /// accepted; missing or null keys keep the current value; anything else is
    /// ignored with a warning. Unknown keys are ignored silently since the bag
    /// is shared with editor-only settings.
    pub fn with_bag(mut self, bag: &Map<String, Value>) -> Self {
        let fields: [(&str, &mut f32); 8] = [
            ("gravity", &mut self.gravity),
            ("jumpForce", &mut self.jump_force),
            ("moveSpeed", &mut self.move_speed),
            ("groundFriction", &mut self.ground_friction),
            ("airControl", &mut self.air_control),
            ("maxFallSpeed", &mut self.max_fall_speed),
            ("coyoteTime", &mut self.coyote_time),
            ("jumpBufferTime", &mut self.jump_buffer_time),
        ];
        for (key, slot) in fields {
            if let Some(value) = read_number(bag, key) {
                *slot = value;
            }
        }

        if let Some(jumps) = read_number(bag, "maxJumps") {
            if jumps >= 1.0 {
                self.max_jumps = jumps as u32;
            } else {
                log::warn!("platformer property maxJumps={} is below 1, keeping {}", jumps, self.max_jumps);
            }
        }
        self
    }

    /// Check the invariants: every field finite, gravity non-negative, at
    /// least one jump.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(EngineError::InvalidProperty {
                    name,
                    reason: "must be a finite number",
                });
            }
        }
        if self.gravity < 0.0 {
            return Err(EngineError::InvalidProperty {
                name: "gravity",
                reason: "must not be negative",
            });
        }
        if self.max_jumps < 1 {
            return Err(EngineError::InvalidProperty {
                name: "maxJumps",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Copy with every field that breaks an invariant reset to its default.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let finite = |value: f32, fallback: f32, name: &str| {
            if value.is_finite() {
                value
            } else {
                log::warn!("platformer property {} is not finite, using {}", name, fallback);
                fallback
            }
        };

        let mut gravity = finite(self.gravity, defaults.gravity, "gravity");
        if gravity < 0.0 {
            log::warn!("platformer property gravity={} is negative, using {}", gravity, defaults.gravity);
            gravity = defaults.gravity;
        }

        let mut max_jumps = self.max_jumps;
        if max_jumps < 1 {
            log::warn!("platformer property maxJumps={} is below 1, using 1", max_jumps);
            max_jumps = 1;
        }

        Self {
            gravity,
            jump_force: finite(self.jump_force, defaults.jump_force, "jumpForce"),
            move_speed: finite(self.move_speed, defaults.move_speed, "moveSpeed"),
            ground_friction: finite(self.ground_friction, defaults.ground_friction, "groundFriction"),
            air_control: finite(self.air_control, defaults.air_control, "airControl"),
            max_fall_speed: finite(self.max_fall_speed, defaults.max_fall_speed, "maxFallSpeed"),
            max_jumps,
            coyote_time: finite(self.coyote_time, defaults.coyote_time, "coyoteTime"),
            jump_buffer_time: finite(self.jump_buffer_time, defaults.jump_buffer_time, "jumpBufferTime"),
        }
    }

    fn float_fields(&self) -> [(&'static str, f32); 8] {
        [
            ("gravity", self.gravity),
            ("jumpForce", self.jump_force),
            ("moveSpeed", self.move_speed),
            ("groundFriction", self.ground_friction),
            ("airControl", self.air_control),
            ("maxFallSpeed", self.max_fall_speed),
            ("coyoteTime", self.coyote_time),
            ("jumpBufferTime", self.jump_buffer_time),
        ]
    }
}

/// Read a finite number from the bag. The editor's inspector may store numeric
/// fields as strings, so those are parsed too.
fn read_number(bag: &Map<String, Value>, key: &str) -> Option<f32> {
    let parsed = match bag.get(key)? {
        Value::Null => return None,
        Value::Number(n) => n.as_f64().map(|v| v as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    };
    match parsed {
        Some(value) if value.is_finite() => Some(value),
        _ => {
            log::warn!("platformer property {} has an unusable value, ignoring it", key);
            None
        }
    }
}
