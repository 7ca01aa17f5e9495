pub mod epoch_stats;
pub mod model;
pub mod spec;

pub use epoch_stats::EpochStats;
pub use model::{argmax, Model};
pub use spec::{LayerSpec, ModelSpec};
