use std::fmt;

use serde::{Serialize, Deserialize};

use crate::activation::ActivationFunction;

/// The role a layer plays in the network.
///
/// `Input` and `Output` are both linear; they differ only in position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Input,
    Output,
    ReLU,
    Sigmoid,
}

impl LayerKind {
    pub fn activation(&self) -> ActivationFunction {
        match self {
            LayerKind::Input | LayerKind::Output => ActivationFunction::Identity,
            LayerKind::ReLU => ActivationFunction::ReLU,
            LayerKind::Sigmoid => ActivationFunction::Sigmoid,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Input => "Input",
            LayerKind::Output => "Output",
            LayerKind::ReLU => "ReLU",
            LayerKind::Sigmoid => "Sigmoid",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
