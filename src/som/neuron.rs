//! Neuron representation for the Self-Organizing Map.

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// A neuron in the Self-Organizing Map.
///
/// Each neuron has a fixed position on the 2D grid and a weight vector
/// (its prototype) that is pulled toward the inputs during training.
#[derive(Debug, Clone)]
pub struct Neuron {
    /// Row position on the grid.
    pub row: usize,
    /// Column position on the grid.
    pub col: usize,
    /// Weight vector representing the neuron's learned prototype.
    pub weights: Vec<f64>,
}

impl Neuron {
    /// Creates a new neuron with weights drawn from the standard normal
    /// distribution.
    pub fn new_random<R: Rng>(row: usize, col: usize, weight_dim: usize, rng: &mut R) -> Self {
        let normal = Normal::new(0.0, 1.0).unwrap();
        let weights: Vec<f64> = (0..weight_dim).map(|_| normal.sample(rng)).collect();

        Self { row, col, weights }
    }

    /// Creates a new neuron with the given weights.
    pub fn new_with_weights(row: usize, col: usize, weights: Vec<f64>) -> Self {
        Self { row, col, weights }
    }

    /// Computes the Euclidean distance between this neuron's weights and
    /// an input vector.
    pub fn distance(&self, input: &[f64]) -> f64 {
        self.distance_squared(input).sqrt()
    }

    /// Computes the squared Euclidean distance (faster, avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, input: &[f64]) -> f64 {
        debug_assert_eq!(
            self.weights.len(),
            input.len(),
            "Weight and input dimensions must match"
        );

        self.weights
            .iter()
            .zip(input.iter())
            .map(|(w, i)| (w - i).powi(2))
            .sum()
    }

    /// Computes the squared grid distance to another neuron.
    #[inline]
    pub fn grid_distance_squared(&self, other: &Neuron) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        dr * dr + dc * dc
    }

    /// Pulls the neuron's weights toward an input vector.
    ///
    /// `learning_rate` is the decayed learning rate for this iteration and
    /// `neighborhood` the Gaussian influence of the BMU (0.0 to 1.0); their
    /// product scales every component of the move.
    pub fn update_weights(&mut self, input: &[f64], learning_rate: f64, neighborhood: f64) {
        let rate = learning_rate * neighborhood;

        for (w, i) in self.weights.iter_mut().zip(input.iter()) {
            *w += rate * (i - *w);
        }
    }
}
