use crate::collision::GridSettings;
use crate::error::{PhysicsError, Result};
use crate::math::Vec2;

/// Tunables shared by the world and its collision resolver.
///
/// Every setter validates its argument, so a `PhysicsSettings` built through
/// them is always usable. Deserialized values should go through
/// [`PhysicsSettings::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicsSettings {
    gravity: Vec2,
    groundedness: f64,
    stickiness: f64,
    minimum_post_bounce_magnitude: f64,
    minimum_post_friction_magnitude: f64,
    deceleration_rate: f64,
    time_step: f64,
    grid: GridSettings,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        PhysicsSettings {
            gravity: Vec2::new(0.0, -9.8),
            groundedness: 0.7,
            stickiness: 0.05,
            minimum_post_bounce_magnitude: 0.1,
            minimum_post_friction_magnitude: 0.01,
            deceleration_rate: 10.0,
            time_step: 1.0 / 60.0,
            grid: GridSettings::default(),
        }
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidSetting { name, value })
    }
}

impl PhysicsSettings {
    /// Acceleration applied to kinematic bodies, in units per second squared.
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Minimum alignment between a contact normal and gravity for the
    /// contact to count as ground.
    pub fn groundedness(&self) -> f64 {
        self.groundedness
    }

    /// Approach speeds below this produce no bounce.
    pub fn stickiness(&self) -> f64 {
        self.stickiness
    }

    /// Bounce speeds below this are zeroed.
    pub fn minimum_post_bounce_magnitude(&self) -> f64 {
        self.minimum_post_bounce_magnitude
    }

    /// Tangential speeds below this snap to zero after friction.
    pub fn minimum_post_friction_magnitude(&self) -> f64 {
        self.minimum_post_friction_magnitude
    }

    /// Tangential speed removed per second per unit of combined friction.
    pub fn deceleration_rate(&self) -> f64 {
        self.deceleration_rate
    }

    /// Seconds simulated by one call to `step`.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Broad-phase grid used by worlds built from these settings.
    pub fn grid(&self) -> GridSettings {
        self.grid
    }

    /// Both components must be finite.
    pub fn set_gravity(&mut self, gravity: Vec2) -> Result<()> {
        if !gravity.is_finite() {
            let value = if gravity.x.is_finite() { gravity.y } else { gravity.x };
            return Err(PhysicsError::InvalidSetting { name: "gravity", value });
        }
        self.gravity = gravity;
        Ok(())
    }

    /// Must lie in `[0, 1]`.
    pub fn set_groundedness(&mut self, groundedness: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&groundedness) {
            return Err(PhysicsError::InvalidSetting { name: "groundedness", value: groundedness });
        }
        self.groundedness = groundedness;
        Ok(())
    }

    pub fn set_stickiness(&mut self, stickiness: f64) -> Result<()> {
        self.stickiness = non_negative("stickiness", stickiness)?;
        Ok(())
    }

    pub fn set_minimum_post_bounce_magnitude(&mut self, magnitude: f64) -> Result<()> {
        self.minimum_post_bounce_magnitude = non_negative("minimum_post_bounce_magnitude", magnitude)?;
        Ok(())
    }

    pub fn set_minimum_post_friction_magnitude(&mut self, magnitude: f64) -> Result<()> {
        self.minimum_post_friction_magnitude = non_negative("minimum_post_friction_magnitude", magnitude)?;
        Ok(())
    }

    pub fn set_deceleration_rate(&mut self, rate: f64) -> Result<()> {
        self.deceleration_rate = non_negative("deceleration_rate", rate)?;
        Ok(())
    }

    /// Must be finite and strictly positive.
    ///
    /// # Errors
    /// `InvalidTimeStep` otherwise. Every other setter reports `InvalidSetting`.
    pub fn set_time_step(&mut self, time_step: f64) -> Result<()> {
        if !(time_step.is_finite() && time_step > 0.0) {
            return Err(PhysicsError::InvalidTimeStep(time_step));
        }
        self.time_step = time_step;
        Ok(())
    }

    /// Grid settings only take effect when a world is built.
    ///
    /// # Errors
    /// `InvalidCellSize` when the cell size is not positive, or when the
    /// bounds would need more than [`MAX_GRID_CELLS`](crate::collision::MAX_GRID_CELLS) cells.
    pub fn set_grid(&mut self, grid: GridSettings) -> Result<()> {
        grid.dimensions()?;
        self.grid = grid;
        Ok(())
    }

    /// Re-checks every field through its setter.
    pub fn validate(&self) -> Result<()> {
        let mut checked = PhysicsSettings::default();
        checked.set_gravity(self.gravity)?;
        checked.set_groundedness(self.groundedness)?;
        checked.set_stickiness(self.stickiness)?;
        checked.set_minimum_post_bounce_magnitude(self.minimum_post_bounce_magnitude)?;
        checked.set_minimum_post_friction_magnitude(self.minimum_post_friction_magnitude)?;
        checked.set_deceleration_rate(self.deceleration_rate)?;
        checked.set_time_step(self.time_step)?;
        checked.set_grid(self.grid)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PhysicsSettings::default();
        assert_eq!(settings.gravity(), Vec2::new(0.0, -9.8));
        assert_eq!(settings.groundedness(), 0.7);
        assert_eq!(settings.stickiness(), 0.05);
        assert_eq!(settings.minimum_post_bounce_magnitude(), 0.1);
        assert_eq!(settings.minimum_post_friction_magnitude(), 0.01);
        assert_eq!(settings.deceleration_rate(), 10.0);
        assert!((settings.time_step() - 1.0 / 60.0).abs() < 1e-12);
        assert_eq!(settings.grid().cell_size, 8.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_time_step() {
        let mut settings = PhysicsSettings::default();
        assert_eq!(settings.set_time_step(0.0), Err(PhysicsError::InvalidTimeStep(0.0)));
        assert!(settings.set_time_step(-1.0).is_err());
        assert!(settings.set_time_step(f64::NAN).is_err());
        assert!((settings.time_step() - 1.0 / 60.0).abs() < 1e-12);
        assert!(settings.set_time_step(0.01).is_ok());
        assert_eq!(settings.time_step(), 0.01);
    }

    #[test]
    fn test_rejects_out_of_range_settings() {
        let mut settings = PhysicsSettings::default();
        assert_eq!(
            settings.set_groundedness(1.5),
            Err(PhysicsError::InvalidSetting { name: "groundedness", value: 1.5 })
        );
        assert!(settings.set_stickiness(-0.1).is_err());
        assert!(settings.set_deceleration_rate(f64::INFINITY).is_err());
        assert!(settings.set_minimum_post_bounce_magnitude(-1.0).is_err());
        assert!(settings.set_minimum_post_friction_magnitude(f64::NAN).is_err());
        assert!(settings.set_gravity(Vec2::new(f64::NAN, 0.0)).is_err());
        assert_eq!(settings, PhysicsSettings::default());
    }

    #[test]
    fn test_rejects_bad_cell_size() {
        let mut settings = PhysicsSettings::default();
        let grid = GridSettings { cell_size: 0.0, ..GridSettings::default() };
        assert_eq!(settings.set_grid(grid), Err(PhysicsError::InvalidCellSize(0.0)));
    }

    #[test]
    fn test_rejects_cell_size_that_overflows_grid() {
        let mut settings = PhysicsSettings::default();
        let grid = GridSettings { cell_size: 1e-7, ..GridSettings::default() };
        assert_eq!(settings.set_grid(grid), Err(PhysicsError::InvalidCellSize(1e-7)));
        assert_eq!(settings.grid(), GridSettings::default());

        let settings = PhysicsSettings { grid, ..PhysicsSettings::default() };
        assert_eq!(settings.validate(), Err(PhysicsError::InvalidCellSize(1e-7)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_then_validate() {
        let mut settings = PhysicsSettings::default();
        settings.set_gravity(Vec2::new(0.0, -20.0)).unwrap();
        settings.set_time_step(0.02).unwrap();
        let json = serde_json::to_string(&settings).unwrap();
        let restored: PhysicsSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, settings);
        assert!(restored.validate().is_ok());

        let tampered = json.replace("0.02", "-1.0");
        let restored: PhysicsSettings = serde_json::from_str(&tampered).unwrap();
        assert_eq!(restored.validate(), Err(PhysicsError::InvalidTimeStep(-1.0)));
    }

    #[test]
    fn test_validate_catches_direct_construction() {
        let settings = PhysicsSettings { time_step: -0.5, ..PhysicsSettings::default() };
        assert_eq!(settings.validate(), Err(PhysicsError::InvalidTimeStep(-0.5)));
    }
}
