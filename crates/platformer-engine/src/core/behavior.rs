//! Platformer behavior: the per-object motion and collision kernel.
//!
//! Each `update()` runs four stages in a fixed order:
//!
//! 1. gravity (skipped while grounded), with a heavier fall and a heavier
//!    rise when the jump input is released early
//! 2. horizontal friction and speed clamp
//! 3. collision push-out against the frame's colliders, which is the only
//!    place `grounded` can become true
//! 4. integration of the velocity into the body position
//!
//! All magnitudes are per-frame. `delta_time` is carried in [`FrameContext`]
//! but not applied, so the feel depends on the host's frame rate. The
//! constants are tuned for a 60 Hz animation-frame loop.

use glam::Vec2;

use crate::components::properties::PlatformerProperties;
use crate::core::collision::{resolve_overlap, Aabb, Contact};

/// Extra gravity share applied while falling (total = 1.5 × gravity).
pub const FALL_MULTIPLIER: f32 = 1.5;

/// Extra gravity share applied while rising without the jump input held
/// (total = 2 × gravity), which cuts the jump short.
pub const LOW_JUMP_MULTIPLIER: f32 = 2.0;

/// Acceleration rate of `move_left`/`move_right` while airborne.
pub const AIR_ACCELERATION: f32 = 0.7;

/// Horizontal speeds below this snap to zero.
pub const VELOCITY_EPSILON: f32 = 0.1;

/// Inputs shared by every behavior for one simulation frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous frame. Not applied to the integration.
    pub delta_time: f32,
    /// Wall-clock milliseconds, used for the coyote window.
    pub now_ms: f64,
    /// Whether the jump input is currently held down.
    pub jump_held: bool,
}

/// Coarse motion state, derived from the runtime flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Grounded,
    /// Left the ground without jumping and still inside the coyote window.
    Coyote,
    /// Rising or falling after a granted jump.
    Jumping,
    Falling,
}

#[derive(Debug, Clone)]
pub struct PlatformerBehavior {
    properties: PlatformerProperties,
    velocity: Vec2,
    grounded: bool,
    jumps_left: u32,
    last_grounded_ms: Option<f64>,
    last_jump_pressed_ms: Option<f64>,
    jumping: bool,
}

impl PlatformerBehavior {
    pub fn new(properties: PlatformerProperties) -> Self {
        Self {
            properties,
            velocity: Vec2::ZERO,
            grounded: false,
            jumps_left: 0,
            last_grounded_ms: None,
            last_jump_pressed_ms: None,
            jumping: false,
        }
    }

    pub fn properties(&self) -> &PlatformerProperties {
        &self.properties
    }

    /// Advance one frame, moving `body` in place.
    pub fn update(&mut self, body: &mut Aabb, frame: &FrameContext, colliders: &[Aabb]) {
        self.apply_gravity(frame.jump_held);
        self.apply_horizontal();
        self.resolve_collisions(body, colliders, frame.now_ms);
        body.pos += self.velocity;
    }

    fn apply_gravity(&mut self, jump_held: bool) {
        if self.grounded {
            return;
        }

        let gravity = self.properties.gravity;
        self.velocity.y += gravity;
        if self.velocity.y > 0.0 {
            self.velocity.y += gravity * (FALL_MULTIPLIER - 1.0);
        } else if self.velocity.y < 0.0 && !jump_held {
            self.velocity.y += gravity * (LOW_JUMP_MULTIPLIER - 1.0);
        }
        self.velocity.y = self.velocity.y.min(self.properties.max_fall_speed);
    }

    fn apply_horizontal(&mut self) {
        let (friction, control) = if self.grounded {
            (self.properties.ground_friction, 1.0)
        } else {
            (1.0, self.properties.air_control)
        };

        self.velocity.x *= friction;
        if self.velocity.x.abs() < VELOCITY_EPSILON {
            self.velocity.x = 0.0;
        }

        if self.velocity.x != 0.0 {
            let max_speed = self.properties.move_speed * control;
            self.velocity.x = self.velocity.x.abs().min(max_speed) * self.velocity.x.signum();
        }
    }

    /// Colliders are resolved one at a time in list order against the body's
    /// current position. With several simultaneous overlaps the last push
    /// wins, which can jitter in tight corners.
    fn resolve_collisions(&mut self, body: &mut Aabb, colliders: &[Aabb], now_ms: f64) {
        self.grounded = false;

        for collider in colliders {
            let Some(contact) = resolve_overlap(body, collider) else {
                continue;
            };

            if contact.is_horizontal() {
                self.velocity.x = 0.0;
                continue;
            }

            self.velocity.y = 0.0;
            if contact == Contact::Top && !self.grounded {
                self.land(now_ms);
            }
        }
    }

    fn land(&mut self, now_ms: f64) {
        self.grounded = true;
        self.jumps_left = self.properties.max_jumps.saturating_sub(1);
        self.last_grounded_ms = Some(now_ms);
        self.jumping = false;
    }

    pub fn move_left(&mut self) {
        let speed = self.properties.move_speed;
        self.velocity.x = (self.velocity.x - speed * self.acceleration()).max(-speed);
    }

    pub fn move_right(&mut self) {
        let speed = self.properties.move_speed;
        self.velocity.x = (self.velocity.x + speed * self.acceleration()).min(speed);
    }

    fn acceleration(&self) -> f32 {
        if self.grounded {
            1.0
        } else {
            AIR_ACCELERATION
        }
    }

    /// Try to start a jump. Returns whether it was granted.
    ///
    /// The press time is recorded either way. A jump needs ground contact, the
    /// coyote window, or a spare air jump, and is refused while a previous
    /// jump is still in flight. Only air jumps spend `jumps_left`.
    pub fn jump(&mut self, now_ms: f64) -> bool {
        self.last_jump_pressed_ms = Some(now_ms);

        let coyote = self.in_coyote_window(now_ms);
        if !(self.grounded || coyote || self.jumps_left > 0) || self.jumping {
            return false;
        }

        self.velocity.y = self.properties.jump_force;
        self.jumping = true;
        if !self.grounded && !coyote {
            self.jumps_left = self.jumps_left.saturating_sub(1);
        }
        self.grounded = false;
        true
    }

    fn in_coyote_window(&self, now_ms: f64) -> bool {
        self.last_grounded_ms
            .is_some_and(|t| now_ms - t < f64::from(self.properties.coyote_time))
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_on_ground(&self) -> bool {
        self.grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn jumps_left(&self) -> u32 {
        self.jumps_left
    }

    pub fn last_grounded_ms(&self) -> Option<f64> {
        self.last_grounded_ms
    }

    /// Time of the most recent jump press, granted or not.
    // TODO: consult this on landing to fire jumps pressed within jump_buffer_time
    // once the preview's intended buffering behavior is confirmed.
    pub fn last_jump_pressed_ms(&self) -> Option<f64> {
        self.last_jump_pressed_ms
    }

    pub fn motion_state(&self, now_ms: f64) -> MotionState {
        if self.grounded {
            MotionState::Grounded
        } else if self.jumping {
            MotionState::Jumping
        } else if self.in_coyote_window(now_ms) {
            MotionState::Coyote
        } else {
            MotionState::Falling
        }
    }
}

impl Default for PlatformerBehavior {
    fn default() -> Self {
        Self::new(PlatformerProperties::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: f64 = 1_000.0;

    fn frame(now_ms: f64) -> FrameContext {
        FrameContext {
            delta_time: 1.0 / 60.0,
            now_ms,
            jump_held: false,
        }
    }

    fn ground() -> Aabb {
        Aabb::new(0.0, 100.0, 200.0, 20.0)
    }

    /// Drop a 10×10 body from just above the ground until it lands at `now`.
    fn landed(properties: PlatformerProperties, now: f64) -> (PlatformerBehavior, Aabb) {
        let mut behavior = PlatformerBehavior::new(properties);
        let mut body = Aabb::new(50.0, 89.0, 10.0, 10.0);
        let colliders = [ground()];
        for _ in 0..3 {
            behavior.update(&mut body, &frame(now), &colliders);
        }
        assert!(behavior.is_on_ground());
        (behavior, body)
    }

    #[test]
    fn free_fall_trace_with_fall_multiplier_and_clamp() {
        let mut behavior = PlatformerBehavior::default();
        let mut body = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let mut expected_y = 0.0;

        for n in 1..=24 {
            behavior.update(&mut body, &frame(T0), &[]);
            // 0.5 base + 0.25 fall bonus per frame, clamped at 15.
            let expected_vy = (0.75 * n as f32).min(15.0);
            expected_y += expected_vy;
            assert_eq!(behavior.velocity().y, expected_vy, "frame {}", n);
            assert_eq!(body.pos.y, expected_y, "frame {}", n);
        }
        assert_eq!(behavior.velocity().y, 15.0);
        assert!(!behavior.is_on_ground());
    }

    #[test]
    fn releasing_jump_early_doubles_rising_gravity() {
        let mut held = PlatformerBehavior::default();
        let mut released = PlatformerBehavior::default();
        held.velocity.y = -10.0;
        released.velocity.y = -10.0;

        let mut body = Aabb::new(0.0, 0.0, 10.0, 10.0);
        held.update(&mut body, &FrameContext { jump_held: true, ..frame(T0) }, &[]);
        released.update(&mut body, &frame(T0), &[]);

        assert_eq!(held.velocity().y, -9.5);
        assert_eq!(released.velocity().y, -9.0);
    }

    #[test]
    fn held_jump_arc_peaks_with_no_multiplier() {
        let (mut behavior, mut body) = landed(PlatformerProperties::default(), T0);
        assert!(behavior.jump(T0));
        let held = FrameContext { jump_held: true, ..frame(T0) };
        let mut expected_y = body.pos.y;

        // Rising with the input held: plain gravity only.
        for n in 1..=20 {
            behavior.update(&mut body, &held, &[]);
            let expected_vy = -10.0 + 0.5 * n as f32;
            expected_y += expected_vy;
            assert_eq!(behavior.velocity().y, expected_vy, "frame {}", n);
            assert_eq!(body.pos.y, expected_y, "frame {}", n);
        }
        // Frame 20 lands exactly on vy == 0: neither multiplier applied.
        assert_eq!(behavior.velocity().y, 0.0);

        behavior.update(&mut body, &held, &[]);
        assert_eq!(behavior.velocity().y, 0.75);
        behavior.update(&mut body, &held, &[]);
        assert_eq!(behavior.velocity().y, 1.5);
        assert!(behavior.is_jumping());
    }

    #[test]
    fn released_jump_arc_peaks_early() {
        let (mut behavior, mut body) = landed(PlatformerProperties::default(), T0);
        assert!(behavior.jump(T0));

        for n in 1..=10 {
            behavior.update(&mut body, &frame(T0), &[]);
            assert_eq!(behavior.velocity().y, -10.0 + n as f32, "frame {}", n);
        }
        assert_eq!(behavior.velocity().y, 0.0);

        behavior.update(&mut body, &frame(T0), &[]);
        assert_eq!(behavior.velocity().y, 0.75);
    }

    #[test]
    fn landing_grounds_and_refills_jumps() {
        let mut behavior = PlatformerBehavior::default();
        let mut body = Aabb::new(50.0, 89.0, 10.0, 10.0);
        let colliders = [ground()];

        behavior.update(&mut body, &frame(T0), &colliders);
        behavior.update(&mut body, &frame(T0), &colliders);
        assert!(!behavior.is_on_ground());
        assert_eq!(behavior.jumps_left(), 0);

        behavior.update(&mut body, &frame(T0), &colliders);
        assert!(behavior.is_on_ground());
        assert_eq!(behavior.velocity().y, 0.0);
        assert_eq!(behavior.jumps_left(), 1);
        assert_eq!(behavior.last_grounded_ms(), Some(T0));
        assert_eq!(body.pos.y, 90.0);
        assert_eq!(behavior.motion_state(T0), MotionState::Grounded);
    }

    #[test]
    fn resting_body_loses_contact_on_the_next_frame() {
        let (mut behavior, mut body) = landed(PlatformerProperties::default(), T0);
        behavior.update(&mut body, &frame(T0 + 16.0), &[ground()]);
        // Sitting exactly on the top edge is not an overlap.
        assert!(!behavior.is_on_ground());
        assert_eq!(body.pos.y, 90.0);
        assert_eq!(behavior.motion_state(T0 + 16.0), MotionState::Coyote);
    }

    #[test]
    fn grounded_jump_applies_force_immediately() {
        let (mut behavior, _) = landed(PlatformerProperties::default(), T0);
        assert!(behavior.jump(T0 + 5.0));
        assert_eq!(behavior.velocity().y, -10.0);
        assert!(!behavior.is_on_ground());
        assert!(behavior.is_jumping());
        // Ground jumps do not spend the air budget.
        assert_eq!(behavior.jumps_left(), 1);
        assert_eq!(behavior.motion_state(T0 + 5.0), MotionState::Jumping);
    }

    #[test]
    fn no_retrigger_while_jump_in_flight() {
        let (mut behavior, mut body) = landed(PlatformerProperties::default(), T0);
        assert!(behavior.jump(T0));
        behavior.update(&mut body, &FrameContext { jump_held: true, ..frame(T0 + 16.0) }, &[]);
        let vy = behavior.velocity().y;

        assert!(!behavior.jump(T0 + 32.0));
        assert_eq!(behavior.velocity().y, vy);
        assert_eq!(behavior.last_jump_pressed_ms(), Some(T0 + 32.0));
    }

    #[test]
    fn coyote_window_grants_until_it_expires() {
        let single = PlatformerProperties { max_jumps: 1, ..Default::default() };

        let (mut inside, mut body) = landed(single, T0);
        inside.update(&mut body, &frame(T0 + 16.0), &[]);
        assert!(!inside.is_on_ground());
        assert!(inside.jump(T0 + 149.0));
        assert_eq!(inside.velocity().y, -10.0);
        assert_eq!(inside.jumps_left(), 0);

        let (mut outside, mut body) = landed(single, T0);
        outside.update(&mut body, &frame(T0 + 16.0), &[]);
        let vy = outside.velocity().y;
        assert!(!outside.jump(T0 + 151.0));
        assert_eq!(outside.velocity().y, vy);
        assert_eq!(outside.motion_state(T0 + 151.0), MotionState::Falling);
    }

    #[test]
    fn air_jump_spends_budget_once() {
        let (mut behavior, mut body) = landed(PlatformerProperties::default(), T0);
        // Walk off: one frame without support, then wait out the coyote window.
        behavior.update(&mut body, &frame(T0 + 16.0), &[]);
        let late = T0 + 400.0;

        assert!(behavior.jump(late));
        assert_eq!(behavior.jumps_left(), 0);
        assert_eq!(behavior.velocity().y, -10.0);

        behavior.update(&mut body, &frame(late + 16.0), &[]);
        let vy = behavior.velocity().y;
        assert!(!behavior.jump(late + 32.0));
        assert_eq!(behavior.velocity().y, vy);

        // Even with the in-flight guard lifted the budget is exhausted.
        behavior.jumping = false;
        assert!(!behavior.jump(late + 48.0));
        assert_eq!(behavior.velocity().y, vy);
        assert_eq!(behavior.jumps_left(), 0);
    }

    #[test]
    fn fresh_behavior_cannot_jump_in_midair() {
        let mut behavior = PlatformerBehavior::default();
        assert!(!behavior.jump(0.0));
        assert_eq!(behavior.velocity(), Vec2::ZERO);
        assert_eq!(behavior.motion_state(0.0), MotionState::Falling);
    }

    #[test]
    fn grounded_speed_never_exceeds_move_speed() {
        let (mut behavior, mut body) = landed(PlatformerProperties::default(), T0);
        for _ in 0..10 {
            behavior.move_right();
            assert!(behavior.velocity().x <= 5.0);
        }
        assert_eq!(behavior.velocity().x, 5.0);

        for i in 0..30 {
            behavior.move_right();
            behavior.update(&mut body, &frame(T0 + i as f64 * 16.0), &[ground()]);
            assert!(behavior.velocity().x <= 5.0, "frame {}", i);
        }
    }

    #[test]
    fn airborne_speed_clamped_to_air_control() {
        let mut behavior = PlatformerBehavior::default();
        let mut body = Aabb::new(0.0, 0.0, 10.0, 10.0);

        behavior.move_right();
        assert!((behavior.velocity().x - 3.5).abs() < 1e-6);

        for _ in 0..20 {
            behavior.move_right();
            behavior.move_right();
            behavior.update(&mut body, &frame(T0), &[]);
            assert_eq!(behavior.velocity().x, 2.5);
        }

        for _ in 0..5 {
            behavior.move_left();
        }
        behavior.update(&mut body, &frame(T0), &[]);
        assert_eq!(behavior.velocity().x, -2.5);
    }

    #[test]
    fn ground_friction_decays_and_snaps_to_zero() {
        let (mut behavior, mut body) = landed(PlatformerProperties::default(), T0);
        behavior.velocity.x = 5.0;
        behavior.update(&mut body, &frame(T0), &[ground()]);
        assert!((behavior.velocity().x - 4.0).abs() < 1e-6);

        let mut drifting = PlatformerBehavior::default();
        drifting.velocity.x = 0.09;
        drifting.update(&mut Aabb::new(0.0, 0.0, 1.0, 1.0), &frame(T0), &[]);
        assert_eq!(drifting.velocity().x, 0.0);
    }

    #[test]
    fn wall_contact_stops_horizontal_motion() {
        let mut behavior = PlatformerBehavior::default();
        behavior.velocity.x = 2.5;
        let mut body = Aabb::new(85.0, 50.0, 10.0, 10.0);
        let wall = [Aabb::new(100.0, 0.0, 20.0, 200.0)];

        for _ in 0..4 {
            behavior.update(&mut body, &frame(T0), &wall);
        }
        assert_eq!(behavior.velocity().x, 0.0);
        assert_eq!(body.pos.x, 90.0);
        assert!(!behavior.is_on_ground());
    }

    #[test]
    fn ceiling_hit_stops_rise_without_grounding() {
        let mut behavior = PlatformerBehavior::default();
        behavior.velocity.y = -3.0;
        let mut body = Aabb::new(50.0, 21.0, 10.0, 10.0);
        let ceiling = [Aabb::new(0.0, 0.0, 200.0, 20.0)];
        let held = FrameContext { jump_held: true, ..frame(T0) };

        behavior.update(&mut body, &held, &ceiling);
        assert_eq!(body.pos.y, 18.5);
        behavior.update(&mut body, &held, &ceiling);

        assert_eq!(body.pos.y, 20.0);
        assert_eq!(behavior.velocity().y, 0.0);
        assert!(!behavior.is_on_ground());
        assert_eq!(behavior.last_grounded_ms(), None);
    }

    #[test]
    fn integration_ignores_delta_time() {
        let mut slow = PlatformerBehavior::default();
        let mut fast = PlatformerBehavior::default();
        let mut a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let mut b = a;
        slow.update(&mut a, &FrameContext { delta_time: 0.1, ..frame(T0) }, &[]);
        fast.update(&mut b, &FrameContext { delta_time: 0.001, ..frame(T0) }, &[]);
        assert_eq!(a, b);
        assert_eq!(slow.velocity(), fast.velocity());
    }

    #[test]
    fn velocity_is_a_copy() {
        let mut behavior = PlatformerBehavior::default();
        let mut v = behavior.velocity();
        v.x = 99.0;
        assert_eq!(behavior.velocity().x, 0.0);
        behavior.move_left();
        assert_eq!(v.x, 99.0);
    }
}
