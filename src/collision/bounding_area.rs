use crate::math::Vec2;

/// An axis-aligned bounding area defined by its minimum and maximum corners.
///
/// Comparisons are inclusive: the broad phase may over-report, the narrow
/// phase decides whether touching shapes actually collide.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingArea {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingArea {
    /// The area that contains and overlaps nothing.
    pub const EMPTY: BoundingArea = BoundingArea {
        min: Vec2 { x: f64::INFINITY, y: f64::INFINITY },
        max: Vec2 { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY },
    };

    /// Creates a bounding area, reordering the corners if needed.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates the smallest area enclosing `points`, or `EMPTY` for no points.
    pub fn from_points(points: &[Vec2]) -> Self {
        points.iter().fold(Self::EMPTY, |area, &p| area.including(p))
    }

    /// True for `EMPTY`, inverted corners, or non-finite corners.
    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y)
            || !self.min.is_finite()
            || !self.max.is_finite()
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max.x - self.min.x }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() { 0.0 } else { self.max.y - self.min.y }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        !self.is_empty()
            && point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Checks if this area overlaps (or touches) another one.
    pub fn overlaps(&self, other: &BoundingArea) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let x_overlap = self.max.x >= other.min.x && self.min.x <= other.max.x;
        let y_overlap = self.max.y >= other.min.y && self.min.y <= other.max.y;
        x_overlap && y_overlap
    }

    /// Returns the area grown to include `point`.
    pub fn including(&self, point: Vec2) -> Self {
        if self.is_empty() {
            return Self { min: point, max: point };
        }
        Self { min: self.min.min(point), max: self.max.max(point) }
    }
}

impl Default for BoundingArea {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_corners() {
        let area = BoundingArea::new(Vec2::new(2.0, -1.0), Vec2::new(-2.0, 3.0));
        assert_eq!(area.min, Vec2::new(-2.0, -1.0));
        assert_eq!(area.max, Vec2::new(2.0, 3.0));
        assert!((area.width() - 4.0).abs() < 1e-12);
        assert!((area.height() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_contains_and_overlaps_nothing() {
        let empty = BoundingArea::EMPTY;
        let unit = BoundingArea::new(Vec2::ZERO, Vec2::ONE);
        assert!(empty.is_empty());
        assert!(!empty.contains(Vec2::ZERO));
        assert!(!empty.overlaps(&unit));
        assert!(!unit.overlaps(&empty));
        assert_eq!(BoundingArea::from_points(&[]), BoundingArea::EMPTY);
    }

    #[test]
    fn test_overlaps_is_inclusive() {
        let a = BoundingArea::new(Vec2::ZERO, Vec2::ONE);
        let touching = BoundingArea::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        let apart = BoundingArea::new(Vec2::new(1.5, 0.0), Vec2::new(2.0, 1.0));
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
        assert!(a.contains(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_from_points() {
        let area = BoundingArea::from_points(&[
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 4.0),
            Vec2::new(3.0, 0.0),
        ]);
        assert_eq!(area, BoundingArea::new(Vec2::new(-1.0, 0.0), Vec2::new(3.0, 4.0)));
        assert!(area.including(Vec2::new(5.0, 5.0)).contains(Vec2::new(4.0, 4.5)));
    }
}
