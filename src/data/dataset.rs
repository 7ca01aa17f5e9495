//! Whitespace-delimited dataset loading.
//!
//! Format:
//! - one sample per non-empty line, values separated by any whitespace
//! - every column but the last is a feature
//! - the last column is a non-negative integer class label
//! - all rows have the same number of columns

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Features plus a parallel vector of class labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: Matrix,
    pub labels: Vec<usize>,
}

impl Dataset {
    pub fn new(features: Matrix, labels: Vec<usize>) -> Dataset {
        assert_eq!(features.rows, labels.len(), "one label per feature row");
        Dataset { features, labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `max(label) + 1`.
    pub fn n_classes(&self) -> usize {
        self.labels.iter().max().map_or(0, |&m| m + 1)
    }

    /// Reads a dataset file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Dataset::parse(&text)?;
        debug!(
            path = %path.display(),
            rows = dataset.len(),
            features = dataset.features.cols,
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Parses dataset text. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Dataset> {
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut labels = Vec::new();
        let mut width = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let values = parse_row(line, line_no)?;
            if values.is_empty() {
                continue;
            }

            match width {
                None => {
                    if values.len() < 2 {
                        return Err(Error::TooFewColumns(values.len()));
                    }
                    width = Some(values.len());
                }
                Some(expected) if expected != values.len() => {
                    return Err(Error::Ragged { line: line_no, expected, found: values.len() });
                }
                Some(_) => {}
            }

            let (features, label) = values.split_at(values.len() - 1);
            labels.push(parse_label(label[0], line_no)?);
            rows.push(features.to_vec());
        }

        if rows.is_empty() {
            return Err(Error::Empty);
        }

        Ok(Dataset::new(Matrix::from_data(rows), labels))
    }
}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<f64>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| Error::Parse {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Largest class index a dataset may use; targets are one-hot rows of
/// `max(label) + 1` columns.
const MAX_LABEL: f64 = u16::MAX as f64;

fn parse_label(value: f64, line_no: usize) -> Result<usize> {
    if (0.0..=MAX_LABEL).contains(&value) && value.fract() == 0.0 {
        Ok(value as usize)
    } else {
        Err(Error::Label { line: line_no, value })
    }
}
