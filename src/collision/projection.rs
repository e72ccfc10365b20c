//! Intervals produced by projecting a shape onto a separating axis.

use crate::math::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub min: f64,
    pub max: f64,
}

impl Projection {
    pub fn new(a: f64, b: f64) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Builds the interval covering every value, or `None` when empty.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self { min: v, max: v }),
            Some(p) => Some(Self { min: p.min.min(v), max: p.max.max(v) }),
        })
    }

    /// Distance this interval must travel towards `-axis` to stop overlapping `other`.
    pub fn push_back(&self, other: &Projection) -> f64 {
        self.max - other.min
    }

    /// Distance this interval must travel towards `+axis` to stop overlapping `other`.
    pub fn push_forward(&self, other: &Projection) -> f64 {
        other.max - self.min
    }

    /// Overlap with strictly positive depth. Touching intervals do not overlap.
    pub fn overlaps(&self, other: &Projection) -> bool {
        self.push_back(other) > EPSILON && self.push_forward(other) > EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_is_not_overlapping() {
        let a = Projection::new(0.0, 1.0);
        let b = Projection::new(1.0, 2.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_partial_overlap() {
        let a = Projection::new(-0.5, 0.5);
        let b = Projection::new(0.0, 1.0);
        assert!(a.overlaps(&b));
        assert!((a.push_back(&b) - 0.5).abs() < 1e-12);
        assert!((a.push_forward(&b) - 1.5).abs() < 1e-12);
        assert!((b.push_forward(&a) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_contained_interval_pushes_out_the_short_way() {
        let outer = Projection::new(0.0, 10.0);
        let inner = Projection::new(2.0, 3.0);
        assert!(outer.overlaps(&inner));
        // Moving `outer` forward by 3 leaves it touching `inner`.
        assert!((outer.push_forward(&inner) - 3.0).abs() < 1e-12);
        assert!((outer.push_back(&inner) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_values() {
        assert_eq!(Projection::from_values(Vec::new()), None);
        let p = Projection::from_values([3.0, -1.0, 2.0]).unwrap();
        assert_eq!(p, Projection::new(-1.0, 3.0));
    }
}
