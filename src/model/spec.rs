use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::layers::kind::LayerKind;

/// One layer in a model specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub kind: LayerKind,
    pub size: usize,
}

/// A serializable description of a network architecture plus the learning
/// rate it trains with.
///
/// Only the shape is stored; weights are drawn fresh by `Model::init_params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub learning_rate: f64,
    /// Ordered list of layers (input → output).
    pub layers: Vec<LayerSpec>,
}

impl ModelSpec {
    /// `Input(n_features) → Sigmoid(hidden) → Output(n_classes)`.
    pub fn single_hidden(n_features: usize, hidden: usize, n_classes: usize, learning_rate: f64) -> ModelSpec {
        ModelSpec {
            learning_rate,
            layers: vec![
                LayerSpec { kind: LayerKind::Input, size: n_features },
                LayerSpec { kind: LayerKind::Sigmoid, size: hidden },
                LayerSpec { kind: LayerKind::Output, size: n_classes },
            ],
        }
    }

    /// Checks the layer sequence: at least two layers, `Input` first and
    /// nowhere else, no zero-width layer, positive learning rate.
    pub fn validate(&self) -> Result<()> {
        if self.layers.len() < 2 {
            return Err(Error::Spec(format!(
                "need at least 2 layers, got {}", self.layers.len()
            )));
        }
        if self.layers[0].kind != LayerKind::Input {
            return Err(Error::Spec(format!(
                "first layer must be Input, got {}", self.layers[0].kind
            )));
        }
        if let Some(i) = self.layers.iter().skip(1).position(|l| l.kind == LayerKind::Input) {
            return Err(Error::Spec(format!("layer {} is Input; only the first layer may be", i + 1)));
        }
        if let Some(i) = self.layers.iter().position(|l| l.size == 0) {
            return Err(Error::Spec(format!("layer {i} has size 0")));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(Error::Spec(format!(
                "learning rate must be positive, got {}", self.learning_rate
            )));
        }
        Ok(())
    }

    /// Overwrites the first and last layer widths so the spec fits a dataset.
    pub fn fit_to_data(&mut self, n_features: usize, n_classes: usize) {
        if let Some(first) = self.layers.first_mut() {
            first.size = n_features;
        }
        if let Some(last) = self.layers.last_mut() {
            last.size = n_classes;
        }
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `ModelSpec` from a JSON file and validates it.
    pub fn load_json(path: &str) -> Result<ModelSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: ModelSpec = serde_json::from_reader(reader)?;
        spec.validate()?;
        Ok(spec)
    }
}
