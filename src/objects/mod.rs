pub mod handle;
pub mod physics_body;

pub use handle::{BodyId, ColliderHandle};
pub use physics_body::{BodyKind, Mobility, PhysicsBody};
