use crate::math::EPSILON;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    /// Creates a circle. Negative radii are stored as their magnitude;
    /// a zero radius makes the circle inert.
    pub fn new(radius: f64) -> Self {
        Self { radius: radius.abs() }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.radius > EPSILON) || !self.radius.is_finite()
    }
}
