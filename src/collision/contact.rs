use crate::math::Vec2;
use crate::objects::{BodyId, ColliderHandle};

/// Narrow-phase result for two overlapping shapes, seen from the first one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit contact normal, pointing from the first shape towards the second.
    pub normal: Vec2,
    /// Smallest displacement that moves the first shape out of the second.
    pub minimum_translation: Vec2,
    pub first_contains_second: bool,
    pub second_contains_first: bool,
}

impl Contact {
    /// Penetration depth along the normal.
    pub fn depth(&self) -> f64 {
        self.minimum_translation.magnitude()
    }

    /// The same contact seen from the second shape.
    pub fn mirrored(&self) -> Contact {
        Contact {
            normal: -self.normal,
            minimum_translation: -self.minimum_translation,
            first_contains_second: self.second_contains_first,
            second_contains_first: self.first_contains_second,
        }
    }
}

/// A confirmed collision between two registered colliders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub first: ColliderHandle,
    pub second: ColliderHandle,
    pub contact: Contact,
}

impl Collision {
    /// Swaps the colliders and mirrors the contact.
    pub fn mirrored(&self) -> Collision {
        Collision { first: self.second, second: self.first, contact: self.contact.mirrored() }
    }
}

/// Notification delivered to one body for one collision during a tick.
/// `collision.first` always belongs to `body`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub body: BodyId,
    pub collision: Collision,
}

impl CollisionEvent {
    /// True when the other collider lies "below" this body relative to
    /// `gravity`, i.e. this body is standing on it.
    pub fn is_ground_contact(&self, gravity: Vec2, groundedness: f64) -> bool {
        let down = gravity.normalize();
        down != Vec2::ZERO && self.collision.contact.normal.dot(down) >= groundedness
    }
}

/// Where a ray meets a single collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayIntersection {
    pub point: Vec2,
    /// Surface normal at `point`, facing the ray.
    pub normal: Vec2,
    /// Distance from the ray origin.
    pub distance: f64,
}

/// Nearest collider hit by a world raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub collider: ColliderHandle,
    pub point: Vec2,
    pub normal: Vec2,
    pub distance: f64,
}

impl RaycastHit {
    pub fn new(collider: ColliderHandle, intersection: RayIntersection) -> Self {
        RaycastHit {
            collider,
            point: intersection.point,
            normal: intersection.normal,
            distance: intersection.distance,
        }
    }
}
