pub mod circle;
pub mod collider;
pub mod line_segment;
pub mod polygon;

pub use circle::Circle;
pub use collider::{Collider, WorldGeometry};
pub use line_segment::{LineSegment, Ray, SegmentIntersection};
pub use polygon::Polygon;

/// Local-space geometry of a collider. Rectangles are polygons.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Line(LineSegment),
    Polygon(Polygon),
}
