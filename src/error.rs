//! Error type for configuration and world-management failures.
//!
//! Degenerate geometry is never reported here: malformed shapes are treated
//! as inert by the narrow phase.

use thiserror::Error;

use crate::objects::{BodyId, ColliderHandle};

/// Errors raised by the physics world and its configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// Time step must be finite and strictly positive.
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f64),
    /// A tunable setting received a value outside its domain.
    #[error("invalid value for setting `{name}`: {value}")]
    InvalidSetting {
        /// Setting name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Material coefficients out of range.
    #[error("invalid material: bounce {bounce} must be in [0, 1], friction {friction} must be >= 0")]
    InvalidMaterial {
        /// Rejected bounce coefficient.
        bounce: f64,
        /// Rejected friction coefficient.
        friction: f64,
    },
    /// Spatial grid cell size must be finite, strictly positive, and large
    /// enough to keep the grid within `MAX_GRID_CELLS`.
    #[error("invalid grid cell size: {0}")]
    InvalidCellSize(f64),
    /// A dynamic body was added to a world that has no collision resolver.
    #[error("body {0} needs a collision resolver but the world was built without one")]
    MissingResolver(BodyId),
    /// No body with this id is registered.
    #[error("unknown body: {0}")]
    UnknownBody(BodyId),
    /// No collider with this handle is registered.
    #[error("unknown collider: {0}")]
    UnknownCollider(ColliderHandle),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PhysicsError>;
