pub mod math;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod model;
pub mod data;
pub mod metrics;
pub mod config;
pub mod rng;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::{dense::Layer, kind::LayerKind};
pub use model::{model::Model, spec::ModelSpec, epoch_stats::EpochStats};
pub use data::{dataset::Dataset, split::{train_test_split, Split}, scaler::{Scaler, MinMaxScaler, StandardScaler}};
pub use metrics::Accuracy;
pub use config::{RunConfig, ScalerKind};
pub use error::{Error, Result};
