//! Self-Organizing Map (SOM) engine.
//!
//! The engine is split across three layers:
//!
//! - **Neurons**: grid position plus prototype vector (neuron.rs)
//! - **Grid**: row-major neuron storage, BMU search, update step (map.rs)
//! - **Training**: decay schedule, sequential training pass, inference (training.rs)

mod map;
mod neuron;
pub mod training;

pub use map::{SomMap, WeightInit};
pub use neuron::Neuron;
pub use training::{CentroidGrid, Som, MIN_DECAY};
