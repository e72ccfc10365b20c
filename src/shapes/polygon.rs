use crate::math::{Vec2, EPSILON};

/// A convex polygon defined by its vertices in body-local space.
///
/// Vertices may be authored in either winding order; world geometry is
/// always re-derived in clockwise order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
}

impl Polygon {
    /// Creates a polygon from its vertices. Fewer than three distinct
    /// vertices yields a degenerate (inert) polygon rather than an error.
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Polygon { vertices }
    }

    /// Axis-aligned rectangle of the given size centered on the local origin.
    pub fn rectangle(width: f64, height: f64) -> Self {
        let half = Vec2::new(width.abs() * 0.5, height.abs() * 0.5);
        Self::from_bounds(-half, half)
    }

    /// Axis-aligned rectangle spanning `min` to `max`.
    pub fn from_bounds(min: Vec2, max: Vec2) -> Self {
        let (min, max) = (min.min(max), min.max(max));
        Polygon::new(vec![
            Vec2::new(min.x, max.y),
            Vec2::new(max.x, max.y),
            Vec2::new(max.x, min.y),
            Vec2::new(min.x, min.y),
        ])
    }

    /// Signed area using the Shoelace formula: positive for counter-clockwise
    /// vertices, negative for clockwise.
    pub fn signed_area(vertices: &[Vec2]) -> f64 {
        let n = vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            area += vertices[i].cross(vertices[(i + 1) % n]);
        }
        area / 2.0
    }

    /// Area-weighted centroid of `vertices`. Collinear or tiny polygons fall
    /// back to the vertex average.
    pub(crate) fn centroid_of(vertices: &[Vec2]) -> Vec2 {
        let n = vertices.len();
        if n == 0 {
            return Vec2::ZERO;
        }

        let mut centroid = Vec2::ZERO;
        let mut signed_area_sum = 0.0;
        let origin = vertices[0];
        for i in 1..n.saturating_sub(1) {
            let v2 = vertices[i];
            let v3 = vertices[i + 1];
            let triangle_area = (v2 - origin).cross(v3 - origin) / 2.0;
            signed_area_sum += triangle_area;
            centroid += (origin + v2 + v3) / 3.0 * triangle_area;
        }

        if signed_area_sum.abs() < EPSILON * EPSILON {
            let sum = vertices.iter().fold(Vec2::ZERO, |acc, &v| acc + v);
            sum / n as f64
        } else {
            centroid / signed_area_sum
        }
    }

    /// Returns `vertices` reordered clockwise, with consecutive duplicates removed.
    pub fn clockwise(vertices: &[Vec2]) -> Vec<Vec2> {
        let mut points: Vec<Vec2> = Vec::with_capacity(vertices.len());
        for &v in vertices {
            if points.last().map_or(true, |last| !last.approx_eq(v, EPSILON)) {
                points.push(v);
            }
        }
        while points.len() > 1 && points[0].approx_eq(points[points.len() - 1], EPSILON) {
            points.pop();
        }
        if Self::signed_area(&points) > 0.0 {
            points.reverse();
        }
        points
    }

    /// Outward normals for clockwise `points`, skipping zero-length edges.
    pub fn edge_normals(points: &[Vec2]) -> Vec<Vec2> {
        let n = points.len();
        let mut normals = Vec::with_capacity(n);
        for i in 0..n {
            let edge = points[(i + 1) % n] - points[i];
            if edge.is_near_zero() {
                continue;
            }
            normals.push(edge.perpendicular().normalize());
        }
        normals
    }
}
