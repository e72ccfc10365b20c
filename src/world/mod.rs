pub mod physics_world;
pub mod settings;

pub use physics_world::{PhysicsWorld, PhysicsWorldBuilder};
pub use settings::PhysicsSettings;
