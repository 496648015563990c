//! Error types for physics operations.

use thiserror::Error;

/// Errors that can occur while constructing bodies or stepping a world.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// A non-static body was given a non-positive or non-finite mass.
    #[error("invalid mass: {reason}")]
    InvalidMass {
        /// Description of what's wrong.
        reason: String,
    },

    /// A vector too short to normalize was passed where a direction is needed.
    #[error("degenerate vector: length {length} below epsilon")]
    DegenerateVector {
        /// Length of the offending vector.
        length: f64,
    },

    /// A body handle that was never issued, or whose body was removed.
    #[error("invalid body handle: {0}")]
    InvalidHandle(usize),

    /// Invalid timestep.
    #[error("invalid timestep: {0} (must be positive and finite)")]
    InvalidTimestep(f64),

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// Simulation diverged (`NaN` or `Inf` detected in body state).
    #[error("simulation diverged: {reason}")]
    Diverged {
        /// Description of what went wrong.
        reason: String,
    },
}

impl PhysicsError {
    /// Create an invalid mass error.
    #[must_use]
    pub fn invalid_mass(reason: impl Into<String>) -> Self {
        Self::InvalidMass {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a diverged error.
    #[must_use]
    pub fn diverged(reason: impl Into<String>) -> Self {
        Self::Diverged {
            reason: reason.into(),
        }
    }

    /// Check if this is a divergence error.
    #[must_use]
    pub fn is_diverged(&self) -> bool {
        matches!(self, Self::Diverged { .. })
    }

    /// Check if this is a degenerate-vector error.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateVector { .. })
    }
}
