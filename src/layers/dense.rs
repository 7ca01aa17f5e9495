use crate::{layers::kind::LayerKind, math::matrix::{vec_mul, Matrix}};

/// What the last `forward` left behind for `backward`.
#[derive(Debug, Clone, Default)]
pub enum LayerState {
    #[default]
    Unprimed,
    Primed {
        /// Input that fed the last forward call.
        pre_g: Vec<f64>,
        /// Pre-activation `pre_g × W`.
        h: Vec<f64>,
    },
}

/// One stage of the network.
///
/// A layer does not own its weights: `forward`/`backward` borrow the incoming
/// matrix (`pre_size × size`) from the model.
#[derive(Debug)]
pub struct Layer{
    pub kind: LayerKind,
    pub size: usize,
    /// Width of the previous layer; 0 for the input layer.
    pub pre_size: usize,
    state: LayerState,
}

impl Layer {
    pub fn new(kind: LayerKind, size: usize, pre_size: usize) -> Layer {
        Layer {
            kind,
            size,
            pre_size,
            state: LayerState::Unprimed,
        }
    }

    pub fn is_primed(&self) -> bool {
        matches!(self.state, LayerState::Primed { .. })
    }

    pub fn state(&self) -> &LayerState {
        &self.state
    }

    pub fn forward(&mut self, input: &[f64], weights: &Matrix) -> Vec<f64> {
        assert_eq!(weights.rows, input.len(), "weight height must match input length");

        let h = vec_mul(input, weights);
        assert_eq!(h.len(), self.size, "weight width must match layer size");

        let activation = self.kind.activation();
        let g = h.iter().map(|&x| activation.function(x)).collect();
        self.state = LayerState::Primed { pre_g: input.to_vec(), h };
        g
    }

    /// Propagates `next_error` one layer down and applies the SGD step to
    /// `weights` in place. Returns the error for the previous layer
    /// (length `pre_size`).
    ///
    /// The returned error is `next_error × Wᵀ`, using the raw incoming error
    /// rather than the local gradient `eps`.
    ///
    /// # Panics
    /// If called without a preceding `forward`, or on shape mismatch.
    pub fn backward(&mut self, next_error: &[f64], weights: &mut Matrix, lr: f64) -> Vec<f64> {
        assert_eq!(next_error.len(), self.size, "error length must match layer size");
        assert!(
            weights.rows == self.pre_size && weights.cols == self.size,
            "weights are {}x{}, expected {}x{}",
            weights.rows, weights.cols, self.pre_size, self.size
        );

        let (pre_g, h) = match std::mem::take(&mut self.state) {
            LayerState::Primed { pre_g, h } => (pre_g, h),
            LayerState::Unprimed => panic!("{} layer: backward called before forward", self.kind),
        };

        let activation = self.kind.activation();
        let eps: Vec<f64> = next_error.iter().zip(h.iter())
            .map(|(e, &x)| e * activation.derivative(x))
            .collect();

        let e = weights.mul_vec(next_error);

        for (row, &g) in weights.data.iter_mut().zip(pre_g.iter()) {
            for (w, d) in row.iter_mut().zip(eps.iter()) {
                *w -= lr * g * d;
            }
        }

        e
    }
}
