use super::vec2::Vec2;

/// World-space placement of a body: scale, then rotation, then translation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec2,
    /// Angle in radians, counter-clockwise.
    pub rotation: f64,
    pub scale: Vec2,
}

impl Transform {
    pub fn new(position: Vec2, rotation: f64, scale: Vec2) -> Self {
        Self { position, rotation, scale }
    }

    /// Creates an identity transform (no translation, no rotation, unit scale).
    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0, Vec2::ONE)
    }

    /// Translation-only transform.
    pub fn from_position(position: Vec2) -> Self {
        Self { position, ..Self::identity() }
    }

    /// Maps a local point to world space.
    pub fn apply(self, point: Vec2) -> Vec2 {
        self.apply_vector(point) + self.position
    }

    /// Maps a local direction/offset to world space (no translation).
    pub fn apply_vector(self, vector: Vec2) -> Vec2 {
        vector.scale(self.scale).rotate(self.rotation)
    }

    /// Largest absolute scale component, used to scale radii.
    pub fn uniform_scale(self) -> f64 {
        self.scale.x.abs().max(self.scale.y.abs())
    }

    pub fn is_finite(self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
