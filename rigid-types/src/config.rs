//! World configuration: gravity, material defaults, solver settings.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Global parameters for a simulation world.
///
/// The defaults reproduce the bouncing-spheres demo setup: Earth gravity
/// (Z-up), fairly bouncy restitution, light friction, ten solver passes,
/// a 60 Hz fixed tick.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    /// Gravity acceleration vector (m/s²).
    pub gravity: Vector3<f64>,
    /// Default coefficient of restitution for contacts, in `[0, 1]`.
    pub restitution: f64,
    /// Default coefficient of friction for contacts, `>= 0`.
    pub friction: f64,
    /// Number of velocity-resolution passes per step, `>= 1`.
    pub solver_iterations: usize,
    /// Fixed timestep the host is expected to step with (seconds).
    ///
    /// Informational: `step` takes its own `dt` and never clamps it.
    pub timestep: f64,
    /// Fraction of remaining penetration corrected per step, in `(0, 1]`.
    ///
    /// Deliberately below 1: full correction in one step overshoots and
    /// oscillates on stacked contacts.
    pub correction_fraction: f64,
    /// Penetration tolerance left unresolved to avoid correction jitter.
    pub slop: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vector3::new(0.0, 0.0, -9.81),
            restitution: 0.7,
            friction: 0.3,
            solver_iterations: 10,
            timestep: 1.0 / 60.0,
            correction_fraction: 0.3,
            slop: 0.01,
        }
    }
}

impl WorldConfig {
    /// Create a config with the given timestep and defaults otherwise.
    #[must_use]
    pub fn with_timestep(timestep: f64) -> Self {
        Self {
            timestep,
            ..Default::default()
        }
    }

    /// Set the gravity vector.
    #[must_use]
    pub fn gravity(mut self, gravity: Vector3<f64>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Disable gravity.
    #[must_use]
    pub fn zero_gravity(mut self) -> Self {
        self.gravity = Vector3::zeros();
        self
    }

    /// Set the default contact material coefficients.
    #[must_use]
    pub fn materials(mut self, restitution: f64, friction: f64) -> Self {
        self.restitution = restitution;
        self.friction = friction;
        self
    }

    /// Set the number of solver iterations.
    #[must_use]
    pub fn iterations(mut self, solver_iterations: usize) -> Self {
        self.solver_iterations = solver_iterations;
        self
    }

    /// Set the positional-correction tuning.
    #[must_use]
    pub fn correction(mut self, fraction: f64, slop: f64) -> Self {
        self.correction_fraction = fraction;
        self.slop = slop;
        self
    }

    /// Tick frequency in Hz implied by the configured timestep.
    #[must_use]
    pub fn frequency(&self) -> f64 {
        1.0 / self.timestep
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidTimestep`] or
    /// [`PhysicsError::InvalidConfig`] describing the first violated bound.
    ///
    /// [`PhysicsError::InvalidTimestep`]: crate::PhysicsError::InvalidTimestep
    /// [`PhysicsError::InvalidConfig`]: crate::PhysicsError::InvalidConfig
    pub fn validate(&self) -> crate::Result<()> {
        use crate::PhysicsError;

        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(PhysicsError::InvalidTimestep(self.timestep));
        }
        if !self.gravity.iter().all(|x| x.is_finite()) {
            return Err(PhysicsError::invalid_config("gravity must be finite"));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(PhysicsError::invalid_config(
                "restitution must be between 0 and 1",
            ));
        }
        if !(self.friction >= 0.0 && self.friction.is_finite()) {
            return Err(PhysicsError::invalid_config(
                "friction must be non-negative and finite",
            ));
        }
        if self.solver_iterations == 0 {
            return Err(PhysicsError::invalid_config(
                "solver_iterations must be at least 1",
            ));
        }
        if !(self.correction_fraction > 0.0 && self.correction_fraction <= 1.0) {
            return Err(PhysicsError::invalid_config(
                "correction_fraction must be in (0, 1]",
            ));
        }
        if !(self.slop > 0.0 && self.slop.is_finite()) {
            return Err(PhysicsError::invalid_config(
                "slop must be positive and finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.gravity.z, -9.81, epsilon = 1e-12);
        assert_relative_eq!(config.frequency(), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_builder() {
        let config = WorldConfig::with_timestep(0.01)
            .zero_gravity()
            .materials(1.0, 0.0)
            .iterations(4)
            .correction(0.2, 0.005);

        assert!(config.validate().is_ok());
        assert_relative_eq!(config.gravity.norm(), 0.0);
        assert_eq!(config.solver_iterations, 4);
        assert_relative_eq!(config.slop, 0.005);
    }

    #[test]
    fn test_validation_bounds() {
        assert!(WorldConfig::with_timestep(0.0).validate().is_err());
        assert!(WorldConfig::with_timestep(f64::NAN).validate().is_err());

        let mut config = WorldConfig::default();
        config.restitution = 1.5;
        assert!(config.validate().is_err());

        config.restitution = 0.5;
        config.friction = -0.1;
        assert!(config.validate().is_err());

        config.friction = 0.5;
        config.solver_iterations = 0;
        assert!(config.validate().is_err());

        config.solver_iterations = 1;
        config.correction_fraction = 0.0;
        assert!(config.validate().is_err());

        config.correction_fraction = 1.0;
        config.slop = 0.0;
        assert!(config.validate().is_err());
    }
}
