//! Configuration for the Tessella SOM engine.

use crate::error::{Result, TessellaError};
use serde::{Deserialize, Serialize};

/// Self-Organizing Map configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SomConfig {
    /// Number of grid rows (the `m` dimension).
    /// Default: 8.
    pub rows: usize,

    /// Number of grid columns (the `n` dimension).
    /// Default: 8.
    pub cols: usize,

    /// Dimensionality of the weight vectors; every training or query
    /// vector must have exactly this length.
    /// Default: 16.
    pub weight_dim: usize,

    /// Number of training iterations the decay schedule is sized for.
    /// Default: 42.
    pub iterations: usize,

    /// Initial learning rate (alpha).
    /// Default: 0.3.
    pub initial_learning_rate: f64,

    /// Initial neighborhood radius (sigma).
    /// Default: `None`, meaning `max(rows, cols) / 2`.
    pub initial_radius: Option<f64>,

    /// Random seed for reproducible weight initialization.
    /// Default: None (seeded from entropy).
    pub seed: Option<u64>,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            weight_dim: 16,
            iterations: 42,
            initial_learning_rate: 0.3,
            initial_radius: None,
            seed: None,
        }
    }
}

impl SomConfig {
    /// Returns the total number of neurons in the SOM.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns the effective initial neighborhood radius.
    ///
    /// Falls back to half the larger grid dimension when no explicit
    /// radius is configured.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.initial_radius
            .unwrap_or_else(|| self.rows.max(self.cols) as f64 / 2.0)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(TessellaError::Config(format!(
                "Grid dimensions must be positive, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.weight_dim == 0 {
            return Err(TessellaError::Config(
                "Weight dimensionality must be positive".to_string(),
            ));
        }
        if !self.initial_learning_rate.is_finite() || self.initial_learning_rate <= 0.0 {
            return Err(TessellaError::Config(format!(
                "Initial learning rate must be a positive finite number, got {}",
                self.initial_learning_rate
            )));
        }
        let radius = self.radius();
        if !radius.is_finite() || radius <= 0.0 {
            return Err(TessellaError::Config(format!(
                "Initial radius must be a positive finite number, got {radius}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SomConfig::default();
        assert_eq!(config.iterations, 42);
        assert!((config.initial_learning_rate - 0.3).abs() < 1e-12);
        assert_eq!(config.total_neurons(), 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_radius_defaults_to_half_max_dimension() {
        let config = SomConfig {
            rows: 4,
            cols: 10,
            ..Default::default()
        };
        assert!((config.radius() - 5.0).abs() < 1e-12);

        let explicit = SomConfig {
            initial_radius: Some(2.5),
            ..Default::default()
        };
        assert!((explicit.radius() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let config = SomConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SomConfig {
            weight_dim: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_hyperparameters() {
        let config = SomConfig {
            initial_learning_rate: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SomConfig {
            initial_radius: Some(f64::NAN),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
