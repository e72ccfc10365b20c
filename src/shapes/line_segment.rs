use crate::collision::BoundingArea;
use crate::math::{Vec2, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
}

/// Where two segments cross, with the parameter along each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentIntersection {
    pub point: Vec2,
    /// Parameter along the first segment, clamped to `[0, 1]`.
    pub t: f64,
    /// Parameter along the second segment, clamped to `[0, 1]`.
    pub u: f64,
}

impl LineSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn length_squared(&self) -> f64 {
        self.start.distance_squared(self.end)
    }

    /// Returns the (unnormalized) direction from `start` to `end`.
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }

    pub fn is_degenerate(&self) -> bool {
        self.length_squared() < EPSILON * EPSILON
    }

    pub fn bounding_area(&self) -> BoundingArea {
        BoundingArea::new(self.start, self.end)
    }

    /// Intersects two segments. Parameters up to `EPSILON` outside either
    /// segment still count, so grazing hits at shared vertices are not lost.
    /// Parallel segments never intersect here.
    pub fn intersection(&self, other: &LineSegment) -> Option<SegmentIntersection> {
        let r = self.direction();
        let s = other.direction();
        let denominator = r.cross(s);
        if denominator.abs() < EPSILON * EPSILON {
            return None;
        }

        let delta = other.start - self.start;
        let t = delta.cross(s) / denominator;
        let u = delta.cross(r) / denominator;

        let t_slack = EPSILON / r.magnitude().max(EPSILON);
        let u_slack = EPSILON / s.magnitude().max(EPSILON);
        let within = |value: f64, slack: f64| value >= -slack && value <= 1.0 + slack;
        if !within(t, t_slack) || !within(u, u_slack) {
            return None;
        }

        let t = t.clamp(0.0, 1.0);
        Some(SegmentIntersection { point: self.start + r * t, t, u: u.clamp(0.0, 1.0) })
    }
}

/// A finite ray cast into the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    /// Unit direction.
    pub direction: Vec2,
    pub max_distance: f64,
}

impl Ray {
    /// Creates a ray; `None` for a zero direction or a non-positive/non-finite distance.
    pub fn new(origin: Vec2, direction: Vec2, max_distance: f64) -> Option<Self> {
        let direction = direction.normalize();
        if direction == Vec2::ZERO || !origin.is_finite() || !(max_distance > 0.0) || !max_distance.is_finite() {
            return None;
        }
        Some(Self { origin, direction, max_distance })
    }

    pub fn end(&self) -> Vec2 {
        self.origin + self.direction * self.max_distance
    }

    pub fn to_segment(&self) -> LineSegment {
        LineSegment::new(self.origin, self.end())
    }

    pub fn bounding_area(&self) -> BoundingArea {
        self.to_segment().bounding_area()
    }

    pub fn point_at(&self, distance: f64) -> Vec2 {
        self.origin + self.direction * distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const TOLERANCE: f64 = 1e-10;

    #[test]
    fn test_line_segment_metrics() {
        let line = LineSegment::new(Vec2::new(1.0, 2.0), Vec2::new(4.0, 6.0));
        assert!((line.length() - 5.0).abs() < TOLERANCE);
        assert!((line.length_squared() - 25.0).abs() < TOLERANCE);
        assert_eq!(line.direction(), Vec2::new(3.0, 4.0));
        assert_eq!(line.midpoint(), Vec2::new(2.5, 4.0));
    }

    #[test]
    fn test_intersection_crossing() {
        let a = LineSegment::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        let b = LineSegment::new(Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0));
        let hit = a.intersection(&b).unwrap();
        assert!(hit.point.approx_eq(Vec2::ZERO, TOLERANCE));
        assert!((hit.t - 0.5).abs() < TOLERANCE);
        assert!((hit.u - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_intersection_misses_and_parallel() {
        let a = LineSegment::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        let short = LineSegment::new(Vec2::new(0.0, 0.5), Vec2::new(0.0, 1.0));
        let parallel = LineSegment::new(Vec2::new(-1.0, 1.0), Vec2::new(1.0, 1.0));
        assert!(a.intersection(&short).is_none());
        assert!(a.intersection(&parallel).is_none());
    }

    #[test]
    fn test_intersection_tolerates_grazing_endpoint() {
        let a = LineSegment::new(Vec2::new(0.0, 1.0), Vec2::new(0.0, -1.0));
        let b = LineSegment::new(Vec2::new(1e-9, 0.0), Vec2::new(1.0, 0.0));
        assert!(a.intersection(&b).is_some());
    }

    #[test]
    fn test_ray_new_rejects_degenerate() {
        assert!(Ray::new(Vec2::ZERO, Vec2::ZERO, 1.0).is_none());
        assert!(Ray::new(Vec2::ZERO, Vec2::UP, 0.0).is_none());
        assert!(Ray::new(Vec2::ZERO, Vec2::UP, f64::NAN).is_none());

        let ray = Ray::new(Vec2::ZERO, Vec2::new(0.0, 3.0), 2.0).unwrap();
        assert_eq!(ray.direction, Vec2::UP);
        assert_eq!(ray.end(), Vec2::new(0.0, 2.0));
    }
}
