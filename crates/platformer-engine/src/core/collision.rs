//! Axis-aligned bounding boxes and minimum-penetration push-out.
//!
//! Coordinates are screen-space: `pos` is the top-left corner and y grows
//! downward, so "above" means a smaller y.

use glam::Vec2;

/// Axis-aligned box anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

/// Which side of a collider the body ended up on after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Pushed out past the collider's left edge.
    Left,
    /// Pushed out past the collider's right edge.
    Right,
    /// Snapped onto the collider's top face (standing on it).
    Top,
    /// Snapped below the collider's bottom face (ceiling hit).
    Bottom,
}

impl Contact {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Contact::Left | Contact::Right)
    }
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Half-open overlap test on both axes. Boxes that merely touch along an
    /// edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Penetration depth on each axis: the shorter of the two push-out
    /// distances along that axis. Only meaningful when the boxes overlap.
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        Vec2::new(
            (self.right() - other.left()).min(other.right() - self.left()),
            (self.bottom() - other.top()).min(other.bottom() - self.top()),
        )
    }
}

/// Push `body` out of `collider` along the axis of least penetration.
///
/// Returns `None` when the boxes do not overlap. Exact ties between the two
/// axes resolve vertically.
pub fn resolve_overlap(body: &mut Aabb, collider: &Aabb) -> Option<Contact> {
    if !body.overlaps(collider) {
        return None;
    }

    let depth = body.penetration(collider);
    let contact = if depth.x < depth.y {
        if body.left() < collider.left() {
            body.pos.x = collider.left() - body.size.x;
            Contact::Left
        } else {
            body.pos.x = collider.right();
            Contact::Right
        }
    } else if body.top() < collider.top() {
        body.pos.y = collider.top() - body.size.y;
        Contact::Top
    } else {
        body.pos.y = collider.bottom();
        Contact::Bottom
    };
    Some(contact)
}
