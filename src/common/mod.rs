pub mod layers;
pub mod material;

pub use layers::{LayerTable, Layers};
pub use material::PhysicsMaterial;
