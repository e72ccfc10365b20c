pub mod transform;
pub mod vec2;

pub use transform::Transform;
pub use vec2::Vec2;

/// Tolerance used for every geometric boundary decision: overlap depth,
/// strict containment and segment-parameter slack for raycasts.
pub const EPSILON: f64 = 1e-6;
