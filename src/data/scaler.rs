//! Per-column feature scaling.

use tracing::debug;

use crate::math::matrix::Matrix;

/// Column-wise rescaling fitted on one matrix and applied to others.
pub trait Scaler {
    /// Derives per-column statistics from `data`, replacing any earlier fit.
    fn fit(&mut self, data: &Matrix);

    /// Rescales `data` in place.
    ///
    /// # Panics
    /// If called before `fit`, or if the column count differs from the fit.
    fn transform(&self, data: &mut Matrix);

    fn fit_transform(&mut self, data: &mut Matrix) {
        self.fit(data);
        self.transform(data);
    }
}

/// Zero columns would divide by zero; they are left unscaled instead.
fn nonzero(d: f64) -> f64 {
    if d == 0.0 { 1.0 } else { d }
}

/// Per-column statistics of a fitted scaler, checked against `data`'s width.
fn fitted<'a>(stats: &'a Option<(Vec<f64>, Vec<f64>)>, data: &Matrix) -> (&'a [f64], &'a [f64]) {
    let Some((a, b)) = stats else { panic!("scaler used before fit") };
    assert_eq!(a.len(), data.cols, "column count differs from the fitted data");
    (a, b)
}

/// Standardization: `(x - mean) / std_dev`, population std-dev.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    /// (mean, std_dev) per column.
    stats: Option<(Vec<f64>, Vec<f64>)>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mean(&self) -> Option<&[f64]> {
        self.stats.as_ref().map(|(m, _)| m.as_slice())
    }

    pub fn std_dev(&self) -> Option<&[f64]> {
        self.stats.as_ref().map(|(_, s)| s.as_slice())
    }
}

impl Scaler for StandardScaler {
    fn fit(&mut self, data: &Matrix) {
        assert!(data.rows > 0, "cannot fit a scaler on an empty matrix");
        let n = data.rows as f64;

        let mut mean = vec![0.0; data.cols];
        for row in &data.data {
            for (m, x) in mean.iter_mut().zip(row.iter()) {
                *m += x;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut var = vec![0.0; data.cols];
        for row in &data.data {
            for ((v, x), m) in var.iter_mut().zip(row.iter()).zip(mean.iter()) {
                *v += (x - m) * (x - m);
            }
        }
        let std_dev = var.into_iter().map(|v| (v / n).sqrt()).collect();

        debug!(columns = data.cols, rows = data.rows, "fitted standard scaler");
        self.stats = Some((mean, std_dev));
    }

    fn transform(&self, data: &mut Matrix) {
        let (mean, std_dev) = fitted(&self.stats, data);
        for row in &mut data.data {
            for ((x, m), s) in row.iter_mut().zip(mean.iter()).zip(std_dev.iter()) {
                *x = (*x - m) / nonzero(*s);
            }
        }
    }
}

/// Min-max scaling to `[0, 1]`: `(x - min) / (max - min)`.
#[derive(Debug, Clone, Default)]
pub struct MinMaxScaler {
    /// (min, max) per column.
    stats: Option<(Vec<f64>, Vec<f64>)>,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(&self) -> Option<&[f64]> {
        self.stats.as_ref().map(|(lo, _)| lo.as_slice())
    }

    pub fn max(&self) -> Option<&[f64]> {
        self.stats.as_ref().map(|(_, hi)| hi.as_slice())
    }
}

impl Scaler for MinMaxScaler {
    fn fit(&mut self, data: &Matrix) {
        assert!(data.rows > 0, "cannot fit a scaler on an empty matrix");
        let mut lo = vec![f64::INFINITY; data.cols];
        let mut hi = vec![f64::NEG_INFINITY; data.cols];
        for row in &data.data {
            for (j, &x) in row.iter().enumerate() {
                lo[j] = lo[j].min(x);
                hi[j] = hi[j].max(x);
            }
        }
        debug!(columns = data.cols, rows = data.rows, "fitted min-max scaler");
        self.stats = Some((lo, hi));
    }

    fn transform(&self, data: &mut Matrix) {
        let (lo, hi) = fitted(&self.stats, data);
        for row in &mut data.data {
            for ((x, l), h) in row.iter_mut().zip(lo.iter()).zip(hi.iter()) {
                *x = (*x - l) / nonzero(h - l);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Matrix {
        Matrix::from_data(vec![
            vec![1.0, 10.0, 5.0],
            vec![3.0, -10.0, 5.0],
            vec![2.0, 0.0, 5.0],
        ])
    }

    #[test]
    fn min_max_maps_extremes_to_unit_interval() {
        let mut m = data();
        let mut scaler = MinMaxScaler::new();
        scaler.fit_transform(&mut m);
        assert_eq!(m.data, vec![
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.5, 0.5, 0.0],
        ]);
        assert_eq!(scaler.min().unwrap(), &[1.0, -10.0, 5.0]);
    }

    #[test]
    fn standard_scaler_centers_columns() {
        let mut m = data();
        let mut scaler = StandardScaler::new();
        scaler.fit_transform(&mut m);
        for j in 0..2 {
            let mean: f64 = m.data.iter().map(|r| r[j]).sum::<f64>() / 3.0;
            let var: f64 = m.data.iter().map(|r| r[j] * r[j]).sum::<f64>() / 3.0;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
        assert!(m.data.iter().all(|r| r[2] == 0.0));
        assert_eq!(scaler.mean().unwrap()[0], 2.0);
    }

    #[test]
    fn refit_replaces_statistics() {
        let mut scaler = MinMaxScaler::new();
        scaler.fit(&data());
        scaler.fit(&Matrix::from_data(vec![vec![0.0, 0.0, 0.0], vec![4.0, 2.0, 1.0]]));
        assert_eq!(scaler.min().unwrap(), &[0.0, 0.0, 0.0]);
        assert_eq!(scaler.max().unwrap(), &[4.0, 2.0, 1.0]);

        let mut test = Matrix::from_data(vec![vec![2.0, 1.0, 0.5]]);
        scaler.transform(&mut test);
        assert_eq!(test.data, vec![vec![0.5, 0.5, 0.5]]);
    }

    #[test]
    #[should_panic(expected = "scaler used before fit")]
    fn transform_before_fit_panics() {
        MinMaxScaler::new().transform(&mut data());
    }

    #[test]
    #[should_panic(expected = "column count differs")]
    fn transform_checks_width() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&data());
        scaler.transform(&mut Matrix::zeros(1, 2));
    }
}
