use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use crate::error::Result;
use crate::layers::{kind::LayerKind, dense::Layer};
use crate::loss::sse::SseLoss;
use crate::math::matrix::Matrix;
use crate::model::epoch_stats::EpochStats;
use crate::model::spec::ModelSpec;

/// A feed-forward network trained by online SGD.
///
/// `weights[i]` connects `layers[i]` to `layers[i + 1]` and has shape
/// `layers[i].size × layers[i + 1].size`. The model owns every weight matrix;
/// layers only borrow theirs for the duration of a call.
#[derive(Debug)]
pub struct Model {
    layers: Vec<Layer>,
    weights: Vec<Matrix>,
    learning_rate: f64,
}

impl Model {
    pub fn new(learning_rate: f64) -> Model {
        Model { layers: Vec::new(), weights: Vec::new(), learning_rate }
    }

    /// Builds a model from a validated spec. Weights start at zero; call
    /// `init_params` before training.
    pub fn from_spec(spec: &ModelSpec) -> Result<Model> {
        spec.validate()?;
        let mut model = Model::new(spec.learning_rate);
        for layer in &spec.layers {
            model.add(layer.kind, layer.size);
        }
        Ok(model)
    }

    /// Appends a layer, plus a zero weight matrix linking it to the previous one.
    ///
    /// # Panics
    /// If the first layer is not `Input`, or a later one is.
    pub fn add(&mut self, kind: LayerKind, size: usize) {
        let pre_size = match self.layers.last() {
            None => {
                assert_eq!(kind, LayerKind::Input, "the first layer must be Input");
                0
            }
            Some(prev) => {
                assert_ne!(kind, LayerKind::Input, "only the first layer may be Input");
                self.weights.push(Matrix::zeros(prev.size, size));
                prev.size
            }
        };
        debug!(kind = %kind, size, pre_size, "added layer");
        self.layers.push(Layer::new(kind, size, pre_size));
    }

    /// Draws every weight independently from N(0, 1).
    pub fn init_params<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for w in &mut self.weights {
            w.fill_standard_normal(rng);
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut [Matrix] {
        &mut self.weights
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Online SGD: each row of `x` is forwarded, its error against the
    /// matching one-hot row of `y` is back-propagated, and the weights are
    /// updated before the next row is seen. Rows are visited in order.
    ///
    /// Logs `Epoch: <i>, Loss: <avg>` once per epoch and returns the same
    /// numbers as `EpochStats`.
    ///
    /// # Panics
    /// On empty or mismatched data, `epochs == 0`, fewer than two layers, or
    /// widths that do not match the input/output layers.
    pub fn train(&mut self, x: &Matrix, y: &Matrix, epochs: usize) -> Vec<EpochStats> {
        assert!(x.rows == y.rows && y.rows >= 1, "need matching, non-empty X and Y");
        assert!(epochs >= 1, "epochs must be at least 1");
        assert!(self.layers.len() >= 2, "model needs at least an input and an output layer");
        assert_eq!(x.cols, self.layers[0].size, "X width must match the input layer");
        assert_eq!(y.cols, self.output_size(), "Y width must match the output layer");

        let mut history = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            let t_start = Instant::now();
            let mut total_loss = 0.0;

            for (input, expected) in x.data.iter().zip(y.data.iter()) {
                let output = self.forward(input);
                total_loss += SseLoss::loss(&output, expected);
                self.backward(SseLoss::derivative(&output, expected));
            }

            let train_loss = total_loss / y.rows as f64;
            info!("Epoch: {}, Loss: {}", epoch, train_loss);

            history.push(EpochStats {
                epoch,
                total_epochs: epochs,
                train_loss,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            });
        }

        history
    }

    /// Class index (argmax of the output layer) for every row of `x`.
    /// Ties go to the lowest index.
    pub fn predict(&mut self, x: &Matrix) -> Vec<usize> {
        x.data.iter()
            .map(|row| argmax(&self.forward(row)))
            .collect()
    }

    /// "Model Overview" listing of each layer's kind and width.
    pub fn overview(&self) -> String {
        let mut out = String::from("Model Overview: ");
        for layer in &self.layers {
            out.push_str(&format!("\n- {}: {}", layer.kind, layer.size));
        }
        out
    }

    fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size)
    }

    fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        assert_eq!(input.len(), self.layers[0].size, "input width must match the input layer");
        let mut current = input.to_vec();
        for (layer, w) in self.layers.iter_mut().skip(1).zip(self.weights.iter()) {
            current = layer.forward(&current, w);
        }
        current
    }

    fn backward(&mut self, output_error: Vec<f64>) {
        let mut e = output_error;
        for i in (1..self.layers.len()).rev() {
            e = self.layers[i].backward(&e, &mut self.weights[i - 1], self.learning_rate);
        }
    }
}

/// Index of the maximum element; the first one wins on ties.
pub fn argmax(v: &[f64]) -> usize {
    let mut best = 0;
    for (i, &x) in v.iter().enumerate() {
        if x > v[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn xor_model(seed: u64) -> Model {
        let mut model = Model::new(0.1);
        model.add(LayerKind::Input, 2);
        model.add(LayerKind::Sigmoid, 4);
        model.add(LayerKind::Output, 2);
        model.init_params(&mut StdRng::seed_from_u64(seed));
        model
    }

    #[test]
    fn add_builds_weight_shapes() {
        let model = xor_model(1);
        assert_eq!(model.layers().len(), 3);
        assert_eq!(model.layers()[0].pre_size, 0);
        let shapes: Vec<_> = model.weights().iter().map(|w| (w.rows, w.cols)).collect();
        assert_eq!(shapes, vec![(2, 4), (4, 2)]);
        assert_eq!(model.layers()[2].pre_size, 4);
    }

    #[test]
    #[should_panic(expected = "first layer must be Input")]
    fn first_layer_must_be_input() {
        let mut model = Model::new(0.1);
        model.add(LayerKind::Sigmoid, 2);
    }

    #[test]
    #[should_panic(expected = "only the first layer may be Input")]
    fn input_only_once() {
        let mut model = Model::new(0.1);
        model.add(LayerKind::Input, 2);
        model.add(LayerKind::Input, 2);
    }

    #[test]
    fn argmax_prefers_first_of_ties() {
        assert_eq!(argmax(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(argmax(&[0.1, 0.7, 0.7]), 1);
        assert_eq!(argmax(&[-2.0, -1.0]), 1);
    }

    #[test]
    fn zero_weights_predict_first_class() {
        let mut model = Model::new(0.1);
        model.add(LayerKind::Input, 3);
        model.add(LayerKind::Output, 4);
        assert_eq!(model.predict(&Matrix::zeros(2, 3)), vec![0, 0]);
    }

    #[test]
    fn single_layer_update_is_plain_gradient_step() {
        let mut model = Model::new(0.5);
        model.add(LayerKind::Input, 2);
        model.add(LayerKind::Output, 1);
        model.weights_mut()[0] = Matrix::from_data(vec![vec![1.0], vec![-1.0]]);

        let x = Matrix::from_data(vec![vec![1.0, 2.0]]);
        let y = Matrix::from_data(vec![vec![0.0]]);
        let stats = model.train(&x, &y, 1);

        // g = -1, e = -1, loss = 0.5; w -= 0.5 * x * e
        assert_eq!(stats[0].train_loss, 0.5);
        assert_eq!(model.weights()[0].data, vec![vec![1.5], vec![0.0]]);
    }

    #[test]
    fn repeated_sample_converges() {
        let mut model = xor_model(3);
        let x = Matrix::from_data(vec![vec![0.5, -1.0]]);
        let y = Matrix::from_data(vec![vec![0.0, 1.0]]);
        let stats = model.train(&x, &y, 300);

        let first = stats.first().unwrap().train_loss;
        let last = stats.last().unwrap().train_loss;
        assert!(last < first * 0.1, "loss went from {first} to {last}");
        assert_eq!(model.predict(&x), vec![1]);
    }

    #[test]
    fn stats_cover_every_epoch() {
        let mut model = xor_model(5);
        let x = Matrix::from_data(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let y = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let stats = model.train(&x, &y, 3);
        let epochs: Vec<_> = stats.iter().map(|s| s.epoch).collect();
        assert_eq!(epochs, vec![0, 1, 2]);
        assert!(stats.iter().all(|s| s.total_epochs == 3 && s.train_loss.is_finite()));
    }

    #[test]
    #[should_panic(expected = "Y width must match the output layer")]
    fn train_rejects_wrong_target_width() {
        let mut model = xor_model(1);
        model.train(&Matrix::zeros(2, 2), &Matrix::zeros(2, 3), 1);
    }

    #[test]
    fn overview_lists_layers() {
        let model = xor_model(1);
        assert_eq!(model.overview(), "Model Overview: \n- Input: 2\n- Sigmoid: 4\n- Output: 2");
    }

    #[test]
    fn from_spec_matches_manual_build() {
        let spec = ModelSpec::single_hidden(4, 6, 3, 0.02);
        let model = Model::from_spec(&spec).unwrap();
        assert_eq!(model.learning_rate(), 0.02);
        assert_eq!(model.weights()[1].rows, 6);
        assert_eq!(model.weights()[1].cols, 3);
    }
}
