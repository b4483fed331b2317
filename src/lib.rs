//! # Tessella - Self-Organizing Map Engine
//!
//! Tessella is a 2-D Self-Organizing Map (SOM): an unsupervised
//! competitive-learning algorithm that maps high-dimensional input vectors
//! onto a fixed grid of prototype vectors while preserving topological
//! relationships between them.
//!
//! ## Overview
//!
//! The map is an `m x n` lattice of neurons, each carrying a weight vector
//! of the input dimensionality. Training makes one sequential pass over the
//! input vectors: for each input, the Best Matching Unit (BMU) is found by
//! Euclidean distance, and every neuron is pulled toward the input, scaled
//! by a Gaussian over its grid distance to the BMU and by a linearly
//! decaying learning rate. After training, input vectors can be mapped to
//! the `(row, col)` position of their nearest prototype.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tessella::{Som, SomConfig, WeightInit};
//!
//! let config = SomConfig {
//!     rows: 8,
//!     cols: 8,
//!     weight_dim: 3,
//!     iterations: 400,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut som = Som::new(&config, WeightInit::Random)?;
//! som.train(&colors)?;
//!
//! let locations = som.map_vects(&colors)?;
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - Grid geometry and hyperparameters
//! - [`som`] - The map, BMU search, training, and inference
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod som;

// Re-export commonly used types
pub use config::SomConfig;
pub use error::{Result, TessellaError};
pub use som::{CentroidGrid, Neuron, Som, SomMap, WeightInit, MIN_DECAY};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of training iterations the decay schedule is sized for.
pub const DEFAULT_ITERATIONS: usize = 42;

/// Default initial learning rate.
pub const DEFAULT_LEARNING_RATE: f64 = 0.3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_defaults_match_config() {
        let config = SomConfig::default();
        assert_eq!(config.iterations, DEFAULT_ITERATIONS);
        assert!((config.initial_learning_rate - DEFAULT_LEARNING_RATE).abs() < 1e-12);
    }
}
