//! Defines physical material properties.

use crate::error::{PhysicsError, Result};

/// Surface properties that shape the collision response of a body or collider.
///
/// Coefficients are only set through [`PhysicsMaterial::new`] or the
/// constants. Deserialization runs the same check.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMaterial"))]
pub struct PhysicsMaterial {
    /// Bounce coefficient. 0 = no bounce, 1 = perfectly elastic.
    bounce: f64,
    /// Friction coefficient, 0 or greater.
    friction: f64,
}

/// Unchecked wire form of a material.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMaterial {
    bounce: f64,
    friction: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMaterial> for PhysicsMaterial {
    type Error = PhysicsError;

    fn try_from(raw: RawMaterial) -> Result<Self> {
        PhysicsMaterial::new(raw.bounce, raw.friction)
    }
}

impl PhysicsMaterial {
    /// No bounce, no friction.
    pub const FRICTIONLESS: PhysicsMaterial = PhysicsMaterial { bounce: 0.0, friction: 0.0 };

    /// Creates a validated material.
    ///
    /// # Arguments
    /// * `bounce` - Fraction of the approach speed returned on impact, in `[0, 1]`.
    /// * `friction` - Friction coefficient, finite and non-negative.
    ///
    /// # Errors
    /// `InvalidMaterial` when either coefficient is out of range.
    pub fn new(bounce: f64, friction: f64) -> Result<Self> {
        let valid_bounce = (0.0..=1.0).contains(&bounce);
        let valid_friction = friction.is_finite() && friction >= 0.0;
        if !valid_bounce || !valid_friction {
            return Err(PhysicsError::InvalidMaterial { bounce, friction });
        }
        Ok(Self { bounce, friction })
    }

    /// Bounce coefficient in `[0, 1]`.
    pub fn bounce(&self) -> f64 {
        self.bounce
    }

    /// Friction coefficient, never negative.
    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// Bounce used for a contact between two materials: the less bouncy one wins.
    pub fn combined_bounce(&self, other: &PhysicsMaterial) -> f64 {
        self.bounce.min(other.bounce)
    }

    /// Friction used for a contact between two materials (geometric mean).
    pub fn combined_friction(&self, other: &PhysicsMaterial) -> f64 {
        (self.friction * other.friction).sqrt()
    }
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        PhysicsMaterial { bounce: 0.0, friction: 0.5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_validation() {
        assert!(PhysicsMaterial::new(0.5, 0.3).is_ok());
        assert!(matches!(
            PhysicsMaterial::new(1.5, 0.3),
            Err(PhysicsError::InvalidMaterial { .. })
        ));
        assert!(PhysicsMaterial::new(-0.1, 0.3).is_err());
        assert!(PhysicsMaterial::new(0.5, -1.0).is_err());
        assert!(PhysicsMaterial::new(f64::NAN, 0.0).is_err());
        assert!(PhysicsMaterial::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_combined_coefficients() {
        let rubber = PhysicsMaterial::new(0.8, 0.9).unwrap();
        let ice = PhysicsMaterial::new(0.1, 0.1).unwrap();
        assert!((rubber.combined_bounce(&ice) - 0.1).abs() < 1e-12);
        assert!((rubber.combined_friction(&ice) - 0.3).abs() < 1e-12);
        assert_eq!(rubber.combined_friction(&PhysicsMaterial::FRICTIONLESS), 0.0);
    }

    #[test]
    fn test_rejected_material_leaves_no_value() {
        let err = PhysicsMaterial::new(5.0, 0.0).unwrap_err();
        assert_eq!(err, PhysicsError::InvalidMaterial { bounce: 5.0, friction: 0.0 });

        let material = PhysicsMaterial::new(1.0, 0.0).unwrap();
        assert_eq!(material.bounce(), 1.0);
        assert_eq!(material.friction(), 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_and_validation() {
        let rubber = PhysicsMaterial::new(0.8, 0.9).unwrap();
        let json = serde_json::to_string(&rubber).unwrap();
        assert_eq!(serde_json::from_str::<PhysicsMaterial>(&json).unwrap(), rubber);

        let too_bouncy = serde_json::from_str::<PhysicsMaterial>(r#"{"bounce":5.0,"friction":0.0}"#);
        assert!(too_bouncy.is_err());
    }
}
