//! Online SOM training and post-training inference.
//!
//! Training is a single strictly sequential pass over the input sequence:
//! each step's BMU search depends on the weights written by the previous
//! step, so only the work *within* a step may run in parallel.

use crate::config::SomConfig;
use crate::error::{Result, TessellaError};
use crate::som::{SomMap, WeightInit};
use log::info;
use rayon::prelude::*;

/// Floor for the linear decay factor.
///
/// The raw schedule `1 - t / iterations` reaches zero at `t == iterations`
/// and goes negative past it, which would zero out the neighborhood radius
/// (dividing by zero in the Gaussian) and then flip the update direction.
/// Clamping here keeps late steps well-defined: they still run, with a
/// vanishingly small learning rate and a near-point neighborhood.
pub const MIN_DECAY: f64 = 1e-4;

/// The trained prototype vectors regrouped by grid row, each row holding
/// its neurons' weight vectors in column order.
pub type CentroidGrid = Vec<Vec<Vec<f64>>>;

/// Training state of the engine.
#[derive(Debug, Clone)]
enum TrainState {
    Untrained,
    Trained { centroids: CentroidGrid },
}

/// A 2-D Self-Organizing Map engine.
///
/// Owns the grid, the hyperparameters, and the training state. Built via
/// [`Som::new`], trained with one [`Som::train`] pass, then queried with
/// [`Som::map_vects`].
#[derive(Debug, Clone)]
pub struct Som {
    map: SomMap,
    alpha: f64,
    sigma: f64,
    iterations: usize,
    state: TrainState,
}

impl Som {
    /// Creates a new engine from a configuration and a weight
    /// initialization strategy.
    pub fn new(config: &SomConfig, init: WeightInit) -> Result<Self> {
        let map = SomMap::new(config, init)?;

        Ok(Self {
            map,
            alpha: config.initial_learning_rate,
            sigma: config.radius(),
            iterations: config.iterations,
            state: TrainState::Untrained,
        })
    }

    /// Returns the underlying grid.
    #[inline]
    pub fn grid(&self) -> &SomMap {
        &self.map
    }

    /// Returns the total number of neurons.
    #[inline]
    pub fn total_neurons(&self) -> usize {
        self.map.total_neurons()
    }

    /// Returns the `(row, col)` grid positions of all neurons in index order.
    pub fn locations(&self) -> Vec<(usize, usize)> {
        self.map.locations()
    }

    /// Returns the current weight matrix as `rows * cols` vectors of
    /// `weight_dim` values, in neuron index order.
    pub fn weights_matrix(&self) -> Vec<Vec<f64>> {
        self.map.weights_matrix()
    }

    /// Whether at least one training pass has completed.
    #[inline]
    pub fn is_trained(&self) -> bool {
        matches!(self.state, TrainState::Trained { .. })
    }

    /// Computes the decay factor at iteration `t` (1-based).
    ///
    /// Linear from just under 1.0 down to the [`MIN_DECAY`] floor; steps
    /// past `iterations` stay at the floor.
    #[inline]
    fn decay(&self, t: usize) -> f64 {
        (1.0 - t as f64 / self.iterations as f64).max(MIN_DECAY)
    }

    /// Computes the learning rate at iteration `t` (1-based).
    #[inline]
    pub fn learning_rate(&self, t: usize) -> f64 {
        self.alpha * self.decay(t)
    }

    /// Computes the neighborhood radius at iteration `t` (1-based).
    #[inline]
    pub fn radius(&self, t: usize) -> f64 {
        self.sigma * self.decay(t)
    }

    /// Applies one training step for a single input vector.
    fn step(&mut self, input: &[f64], t: usize) -> Result<()> {
        let bmu_idx = self.map.find_bmu(input)?;
        self.map
            .update(input, bmu_idx, self.learning_rate(t), self.radius(t));
        Ok(())
    }

    /// Trains the SOM with one pass over an ordered sequence of input
    /// vectors.
    ///
    /// Iteration indices are assigned `1, 2, 3, ...` in sequence order and
    /// are not capped at the configured iteration count; a longer sequence
    /// keeps training at the decay floor. Exactly one pass is made —
    /// callers wanting multiple epochs pass a repeated sequence.
    ///
    /// All input lengths are validated before any weight is touched.
    /// On success the centroid grid is cached, the engine becomes trained,
    /// and the final weight matrix is returned.
    pub fn train(&mut self, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if inputs.is_empty() {
            return Err(TessellaError::EmptyInput(
                "No training vectors provided".to_string(),
            ));
        }
        for input in inputs {
            if input.len() != self.map.weight_dim {
                return Err(TessellaError::ShapeMismatch {
                    expected: self.map.weight_dim,
                    actual: input.len(),
                });
            }
        }

        info!(
            "Training SOM: {} inputs, {}x{} grid, {} dim",
            inputs.len(),
            self.map.rows,
            self.map.cols,
            self.map.weight_dim
        );

        for (i, input) in inputs.iter().enumerate() {
            let t = i + 1;
            self.step(input, t)?;

            if t % 10_000 == 0 {
                info!(
                    "Iteration {}/{}: lr={:.4}, radius={:.2}",
                    t,
                    self.iterations,
                    self.learning_rate(t),
                    self.radius(t)
                );
            }
        }

        let mut centroids: CentroidGrid = (0..self.map.rows)
            .map(|_| Vec::with_capacity(self.map.cols))
            .collect();
        for neuron in &self.map.neurons {
            centroids[neuron.row].push(neuron.weights.clone());
        }
        self.state = TrainState::Trained { centroids };

        info!("SOM training completed");
        Ok(self.map.weights_matrix())
    }

    /// Maps each input vector to the grid position of its nearest neuron.
    ///
    /// Requires a completed [`train`](Self::train) pass. Queries are
    /// independent and run in parallel; results keep the input order, and
    /// distance ties go to the lowest neuron index. Read-only: the weights
    /// stay exactly as training left them.
    pub fn map_vects(&self, inputs: &[Vec<f64>]) -> Result<Vec<(usize, usize)>> {
        if !self.is_trained() {
            return Err(TessellaError::NotTrained);
        }

        inputs
            .par_iter()
            .map(|input| {
                let bmu_idx = self.map.find_bmu(input)?;
                Ok(self.map.index_to_coords(bmu_idx))
            })
            .collect()
    }

    /// Returns the cached centroid grid: trained weight vectors grouped by
    /// grid row, in column order.
    pub fn centroids(&self) -> Result<&CentroidGrid> {
        match &self.state {
            TrainState::Trained { centroids } => Ok(centroids),
            TrainState::Untrained => Err(TessellaError::NotTrained),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SomConfig {
        SomConfig {
            rows: 2,
            cols: 3,
            weight_dim: 2,
            iterations: 4,
            seed: Some(42),
            ..Default::default()
        }
    }

    fn zero_matrix(total: usize, dim: usize) -> Vec<Vec<f64>> {
        vec![vec![0.0; dim]; total]
    }

    #[test]
    fn test_decay_schedule() {
        let som = Som::new(&test_config(), WeightInit::Random).unwrap();

        // alpha = 0.3, sigma = max(2, 3) / 2 = 1.5, iterations = 4.
        assert!((som.learning_rate(1) - 0.3 * 0.75).abs() < 1e-12);
        assert!((som.radius(1) - 1.5 * 0.75).abs() < 1e-12);
        assert!((som.learning_rate(2) - 0.3 * 0.5).abs() < 1e-12);
        assert!(som.learning_rate(2) < som.learning_rate(1));
    }

    #[test]
    fn test_decay_clamps_at_floor() {
        let som = Som::new(&test_config(), WeightInit::Random).unwrap();

        // At t == iterations the raw schedule hits zero; past it, negative.
        assert!((som.learning_rate(4) - 0.3 * MIN_DECAY).abs() < 1e-12);
        assert!((som.learning_rate(100) - 0.3 * MIN_DECAY).abs() < 1e-12);
        assert!(som.radius(100) > 0.0);
    }

    #[test]
    fn test_train_sets_trained_state() {
        let mut som = Som::new(&test_config(), WeightInit::Random).unwrap();
        assert!(!som.is_trained());

        let weights = som.train(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        assert!(som.is_trained());
        assert_eq!(weights.len(), 6);
        assert!(weights.iter().all(|w| w.len() == 2));
    }

    #[test]
    fn test_train_rejects_empty_input() {
        let mut som = Som::new(&test_config(), WeightInit::Random).unwrap();
        let err = som.train(&[]).unwrap_err();
        assert!(matches!(err, TessellaError::EmptyInput(_)));
        assert!(!som.is_trained());
    }

    #[test]
    fn test_train_rejects_wrong_dimension_before_updating() {
        let mut som = Som::new(&test_config(), WeightInit::Random).unwrap();
        let before = som.weights_matrix();

        let err = som
            .train(&[vec![1.0, 0.0], vec![1.0, 0.0, 0.0]])
            .unwrap_err();
        assert!(matches!(
            err,
            TessellaError::ShapeMismatch {
                expected: 2,
                actual: 3
            }
        ));
        // The bad vector was caught up front, so nothing moved.
        assert_eq!(som.weights_matrix(), before);
        assert!(!som.is_trained());
    }

    #[test]
    fn test_map_vects_requires_training() {
        let som = Som::new(&test_config(), WeightInit::Random).unwrap();
        let err = som.map_vects(&[vec![0.0, 0.0]]).unwrap_err();
        assert!(matches!(err, TessellaError::NotTrained));

        let err = som.centroids().unwrap_err();
        assert!(matches!(err, TessellaError::NotTrained));
    }

    #[test]
    fn test_centroid_grid_groups_by_row() {
        let mut som = Som::new(&test_config(), WeightInit::Random).unwrap();
        som.train(&[vec![1.0, 0.0]]).unwrap();

        let weights = som.weights_matrix();
        let centroids = som.centroids().unwrap();

        assert_eq!(centroids.len(), 2);
        for (r, row) in centroids.iter().enumerate() {
            assert_eq!(row.len(), 3);
            for (c, centroid) in row.iter().enumerate() {
                assert_eq!(centroid, &weights[r * 3 + c]);
            }
        }
    }

    #[test]
    fn test_locations_are_fixed_by_training() {
        let mut som = Som::new(&test_config(), WeightInit::Random).unwrap();
        let expected = vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)];
        assert_eq!(som.locations(), expected);

        som.train(&[vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]])
            .unwrap();
        assert_eq!(som.locations(), expected);
    }

    #[test]
    fn test_training_past_iteration_count_does_not_crash() {
        let mut som = Som::new(&test_config(), WeightInit::Random).unwrap();

        // 10 inputs against iterations = 4: the last 7 steps run at the
        // decay floor.
        let inputs: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64, 0.0]).collect();
        let weights = som.train(&inputs).unwrap();
        assert_eq!(weights.len(), 6);
        assert!(weights.iter().flatten().all(|w| w.is_finite()));
    }

    #[test]
    fn test_step_pulls_bmu_towards_input() {
        let config = test_config();
        let mut matrix = zero_matrix(6, 2);
        matrix[4] = vec![5.0, 5.0];
        let mut som = Som::new(&config, WeightInit::Matrix(matrix)).unwrap();

        let input = vec![6.0, 6.0];
        let before = {
            let n = som.grid().get(4).unwrap();
            n.distance(&input)
        };
        som.train(&[input.clone()]).unwrap();
        let after = som.grid().get(4).unwrap().distance(&input);

        assert!(after < before);
    }
}
