use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::data::dataset::Dataset;
use crate::math::matrix::Matrix;

/// Result of `train_test_split`.
#[derive(Debug, Clone)]
pub struct Split {
    pub x_train: Matrix,
    /// One-hot targets, width `max(label) + 1` over the whole dataset.
    pub y_train: Matrix,
    pub x_test: Matrix,
    pub y_test: Vec<usize>,
}

/// One-hot encodes `labels` into a `labels.len() × n_classes` matrix.
pub fn one_hot(labels: &[usize], n_classes: usize) -> Matrix {
    let mut res = Matrix::zeros(labels.len(), n_classes);
    for (row, &label) in res.data.iter_mut().zip(labels.iter()) {
        row[label] = 1.0;
    }
    res
}

/// Splits `dataset` into train and test parts.
///
/// The first `floor(len * train_size)` samples (after an optional shuffle with
/// `rng`) go to training, the rest to test.
///
/// # Panics
/// If `train_size` is not strictly between 0 and 1, or the dataset is empty.
pub fn train_test_split<R: Rng + ?Sized>(
    dataset: &Dataset,
    train_size: f64,
    shuffle: bool,
    rng: &mut R,
) -> Split {
    assert!(train_size > 0.0 && train_size < 1.0, "train_size must be in (0, 1), got {train_size}");
    assert!(!dataset.is_empty(), "cannot split an empty dataset");

    let mut indices: Vec<usize> = (0..dataset.len()).collect();
    if shuffle {
        indices.shuffle(rng);
    }

    let n_train = (dataset.len() as f64 * train_size) as usize;
    let (train_idx, test_idx) = indices.split_at(n_train);

    let rows = |idx: &[usize]| {
        let mut m = Matrix::zeros(idx.len(), dataset.features.cols);
        for (row, &i) in m.data.iter_mut().zip(idx.iter()) {
            row.copy_from_slice(&dataset.features[i]);
        }
        m
    };
    let labels = |idx: &[usize]| -> Vec<usize> { idx.iter().map(|&i| dataset.labels[i]).collect() };

    debug!(train = train_idx.len(), test = test_idx.len(), shuffle, "split dataset");

    Split {
        x_train: rows(train_idx),
        y_train: one_hot(&labels(train_idx), dataset.n_classes()),
        x_test: rows(test_idx),
        y_test: labels(test_idx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dataset(n: usize) -> Dataset {
        let features = Matrix::from_data((0..n).map(|i| vec![i as f64, -(i as f64)]).collect());
        let labels = (0..n).map(|i| i % 3).collect();
        Dataset::new(features, labels)
    }

    #[test]
    fn unshuffled_split_keeps_order() {
        let ds = dataset(10);
        let split = train_test_split(&ds, 0.8, false, &mut StdRng::seed_from_u64(1));
        assert_eq!(split.x_train.rows, 8);
        assert_eq!(split.x_test.rows, 2);
        assert_eq!(split.x_test[0], [8.0, -8.0]);
        assert_eq!(split.y_test, vec![2, 0]);
        assert_eq!(split.y_train.cols, 3);
        assert_eq!(split.y_train[4], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn shuffled_split_is_seeded_permutation() {
        let ds = dataset(20);
        let a = train_test_split(&ds, 0.5, true, &mut StdRng::seed_from_u64(9));
        let b = train_test_split(&ds, 0.5, true, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.x_train, b.x_train);
        assert_eq!(a.y_test, b.y_test);

        let mut seen: Vec<usize> = a.x_train.data.iter().chain(a.x_test.data.iter())
            .map(|row| row[0] as usize)
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());

        for (x, y) in a.x_train.data.iter().zip(a.y_train.data.iter()) {
            assert_eq!(y[(x[0] as usize) % 3], 1.0);
            assert_eq!(y.iter().sum::<f64>(), 1.0);
        }
    }

    #[test]
    #[should_panic(expected = "train_size must be in (0, 1)")]
    fn rejects_ratio_out_of_range() {
        train_test_split(&dataset(4), 1.0, false, &mut StdRng::seed_from_u64(1));
    }

    #[test]
    fn one_hot_rows() {
        assert_eq!(one_hot(&[1, 0], 2).data, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    }
}
