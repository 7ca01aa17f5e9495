use crate::math::matrix::dot;

/// Half sum of squared error, `½·Σ(g - y)²`.
pub struct SseLoss;

impl SseLoss {
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let e = SseLoss::derivative(predicted, expected);
        dot(&e, &e) / 2.0
    }

    /// Per-output gradient: predicted - expected
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        assert_eq!(predicted.len(), expected.len(), "prediction and target lengths differ");
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| a - b)
            .collect()
    }
}
