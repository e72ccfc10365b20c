pub mod bounding_area;
pub mod contact;
pub mod projection;
pub mod spatial_grid;

pub use bounding_area::BoundingArea;
pub use contact::{Collision, CollisionEvent, Contact, RayIntersection, RaycastHit};
pub use projection::Projection;
pub use spatial_grid::{GridSettings, SpatialGrid, MAX_GRID_CELLS};
