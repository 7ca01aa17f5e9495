use serde::{Serialize, Deserialize};

use crate::data::scaler::{MinMaxScaler, Scaler, StandardScaler};

/// Which feature scaler a run applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalerKind {
    MinMax,
    Standard,
    None,
}

impl ScalerKind {
    pub fn build(&self) -> Option<Box<dyn Scaler>> {
        match self {
            ScalerKind::MinMax => Some(Box::new(MinMaxScaler::new())),
            ScalerKind::Standard => Some(Box::new(StandardScaler::new())),
            ScalerKind::None => None,
        }
    }
}

/// Settings for one end-to-end run of the binary.
///
/// `Default` carries the built-in constants; the CLI overrides individual fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Dataset name; the file read is `<dataset>.txt`.
    pub dataset: String,
    pub learning_rate: f64,
    pub epochs: usize,
    pub train_ratio: f64,
    pub shuffle: bool,
    /// 0 means a non-deterministic seed.
    pub seed: u64,
    /// Width of the default Sigmoid hidden layer.
    pub hidden: usize,
    pub scaler: ScalerKind,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            dataset: "iris".to_string(),
            learning_rate: 0.01,
            epochs: 40,
            train_ratio: 0.8,
            shuffle: true,
            seed: 0,
            hidden: 128,
            scaler: ScalerKind::MinMax,
        }
    }
}

impl RunConfig {
    pub fn dataset_path(&self) -> String {
        format!("{}.txt", self.dataset)
    }
}
