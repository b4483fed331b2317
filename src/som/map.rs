//! The SOM grid: neuron storage, BMU search, and the weight update step.

use crate::config::SomConfig;
use crate::error::{Result, TessellaError};
use crate::som::Neuron;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Weight initialization strategy for a new map.
#[derive(Debug, Clone)]
pub enum WeightInit {
    /// Draw every weight component from the standard normal distribution,
    /// seeded from `SomConfig::seed` when set.
    Random,
    /// Use a caller-supplied weight matrix of shape `(rows * cols, weight_dim)`,
    /// e.g. to resume training from an earlier run. The shape is validated.
    Matrix(Vec<Vec<f64>>),
}

/// A Self-Organizing Map grid.
///
/// The map is a `rows x cols` lattice of neurons in row-major order: neuron
/// `k` sits at grid position `(k / cols, k % cols)`, so the index increases
/// column-fast. Grid positions never change after construction; only the
/// weight vectors move.
#[derive(Debug, Clone)]
pub struct SomMap {
    /// Number of grid rows.
    pub rows: usize,
    /// Number of grid columns.
    pub cols: usize,
    /// Weight vector dimensionality.
    pub weight_dim: usize,
    /// The neurons in the grid (row-major order).
    pub neurons: Vec<Neuron>,
}

impl SomMap {
    /// Creates a new map with the given weight initialization.
    pub fn new(config: &SomConfig, init: WeightInit) -> Result<Self> {
        config.validate()?;

        let rows = config.rows;
        let cols = config.cols;
        let weight_dim = config.weight_dim;
        let total = rows * cols;

        let neurons = match init {
            WeightInit::Random => {
                let mut rng = match config.seed {
                    Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                    None => ChaCha8Rng::from_entropy(),
                };

                (0..total)
                    .map(|i| Neuron::new_random(i / cols, i % cols, weight_dim, &mut rng))
                    .collect()
            }
            WeightInit::Matrix(matrix) => {
                if matrix.len() != total {
                    return Err(TessellaError::ShapeMismatch {
                        expected: total,
                        actual: matrix.len(),
                    });
                }
                matrix
                    .into_iter()
                    .enumerate()
                    .map(|(i, weights)| {
                        if weights.len() != weight_dim {
                            return Err(TessellaError::ShapeMismatch {
                                expected: weight_dim,
                                actual: weights.len(),
                            });
                        }
                        Ok(Neuron::new_with_weights(i / cols, i % cols, weights))
                    })
                    .collect::<Result<Vec<_>>>()?
            }
        };

        Ok(Self {
            rows,
            cols,
            weight_dim,
            neurons,
        })
    }

    /// Returns the total number of neurons.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.neurons.len()
    }

    /// Gets a neuron by its 1D index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Neuron> {
        self.neurons.get(index)
    }

    /// Gets a neuron by its 2D position.
    #[inline]
    pub fn get_at(&self, row: usize, col: usize) -> Option<&Neuron> {
        if row < self.rows && col < self.cols {
            Some(&self.neurons[row * self.cols + col])
        } else {
            None
        }
    }

    /// Converts a 1D neuron index to 2D grid coordinates.
    #[inline]
    pub fn index_to_coords(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Converts 2D grid coordinates to a 1D neuron index.
    #[inline]
    pub fn coords_to_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Returns the `(row, col)` grid positions of all neurons in index order.
    pub fn locations(&self) -> Vec<(usize, usize)> {
        self.neurons.iter().map(|n| (n.row, n.col)).collect()
    }

    /// Returns the current weight matrix as `rows * cols` vectors of
    /// `weight_dim` values, in neuron index order.
    pub fn weights_matrix(&self) -> Vec<Vec<f64>> {
        self.neurons.iter().map(|n| n.weights.clone()).collect()
    }

    /// Finds the Best Matching Unit (BMU) for an input vector.
    ///
    /// The BMU is the neuron whose weight vector is closest to the input by
    /// Euclidean distance. Ties go to the lowest neuron index. Returns the
    /// index of the BMU.
    pub fn find_bmu(&self, input: &[f64]) -> Result<usize> {
        self.check_input(input)?;

        let mut best_idx = 0;
        let mut best_dist = f64::INFINITY;
        for (i, neuron) in self.neurons.iter().enumerate() {
            let dist = neuron.distance_squared(input);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        Ok(best_idx)
    }

    /// Finds the Best Matching Unit (BMU) in parallel.
    ///
    /// More efficient for large maps. Produces the same result as
    /// [`find_bmu`](Self::find_bmu): ties still go to the lowest index.
    pub fn find_bmu_parallel(&self, input: &[f64]) -> Result<usize> {
        self.check_input(input)?;

        let (bmu_idx, _) = self
            .neurons
            .par_iter()
            .enumerate()
            .map(|(i, n)| (i, n.distance_squared(input)))
            .min_by(|(ia, da), (ib, db)| da.partial_cmp(db).unwrap().then(ia.cmp(ib)))
            .unwrap();

        Ok(bmu_idx)
    }

    /// Applies one weight update step for a single input vector.
    ///
    /// Every neuron is pulled toward the input, scaled by `learning_rate`
    /// and by a Gaussian over its squared grid distance to the BMU:
    /// `exp(-d2 / sigma^2)`. The BMU position is captured before any
    /// neuron is written, so the whole step sees one consistent state.
    pub fn update(&mut self, input: &[f64], bmu_idx: usize, learning_rate: f64, sigma: f64) {
        let bmu = self.neurons[bmu_idx].clone();
        let sigma_sq = sigma * sigma;

        for neuron in &mut self.neurons {
            let grid_dist_sq = bmu.grid_distance_squared(neuron);
            let neighborhood = (-grid_dist_sq / sigma_sq).exp();
            neuron.update_weights(input, learning_rate, neighborhood);
        }
    }

    #[inline]
    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.weight_dim {
            return Err(TessellaError::ShapeMismatch {
                expected: self.weight_dim,
                actual: input.len(),
            });
        }
        Ok(())
    }
}
