use serde::{Serialize, Deserialize};

/// Element-wise nonlinearity applied to a layer's pre-activation vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationFunction {
    Identity,
    ReLU,
    Sigmoid,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Derivative evaluated at the pre-activation `x`.
    ///
    /// ReLU counts `x == 0` as the active side.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::ReLU => if x >= 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
        }
    }
}
