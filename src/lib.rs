//! Two-dimensional collision detection and lightweight physics response.
//!
//! Colliders are tested with the separating axis theorem, indexed in a
//! uniform spatial grid and resolved by a pluggable [`CollisionResolver`].

pub mod collision;
pub mod common;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod resolution;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{BoundingArea, Collision, CollisionEvent, Contact, GridSettings, RaycastHit, SpatialGrid};
pub use common::{LayerTable, Layers, PhysicsMaterial};
pub use error::{PhysicsError, Result};
pub use math::{Transform, Vec2};
pub use objects::{BodyId, BodyKind, ColliderHandle, Mobility, PhysicsBody};
pub use resolution::{CollisionResolver, DefaultCollisionResolver, Resolution, ResolutionContext};
pub use shapes::{Circle, Collider, LineSegment, Polygon, Ray, Shape};
pub use world::{PhysicsSettings, PhysicsWorld, PhysicsWorldBuilder};
