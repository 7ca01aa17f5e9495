use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Serialize, Deserialize};
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

use crate::error::{Error, Result};

/// Dense row-major `rows × cols` grid of `f64`.
///
/// Every row holds exactly `cols` values. Shape mismatches in the operators
/// below are caller bugs and panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Zero-filled `n × n` matrix.
    pub fn square(n: usize) -> Matrix {
        Matrix::zeros(n, n)
    }

    pub fn identity(n: usize) -> Matrix {
        let mut res = Matrix::square(n);
        for i in 0..n {
            res.data[i][i] = 1.0;
        }
        res
    }

    /// Builds a matrix from rows. Panics if the rows are ragged.
    ///
    /// An empty `data` gives a `0 × 0` matrix.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let cols = data.first().map_or(0, |row| row.len());
        for (i, row) in data.iter().enumerate() {
            if row.len() != cols {
                panic!("Row {} has {} elements, expected {}", i, row.len(), cols);
            }
        }
        Matrix {
            rows: data.len(),
            cols,
            data
        }
    }

    pub fn height(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    /// Overwrites every entry with an independent draw from N(0, 1).
    pub fn fill_standard_normal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in &mut self.data {
            for x in row.iter_mut() {
                *x = rng.sample(StandardNormal);
            }
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect()
        }
    }

    /// Matrix × column vector. `v.len()` must equal `cols`.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        if self.cols != v.len() {
            panic!("Vector of length {} cannot multiply a {}x{} matrix", v.len(), self.rows, self.cols)
        }
        self.data.iter().map(|row| dot(row, v)).collect()
    }

    /// Raises a square matrix to the `t`-th power by repeated squaring.
    ///
    /// `pow(0)` is the identity.
    pub fn pow(&self, mut t: u64) -> Matrix {
        assert!(self.is_square(), "pow requires a square matrix, got {}x{}", self.rows, self.cols);

        let mut res = Matrix::identity(self.rows);
        let mut base = self.clone();
        while t > 0 {
            if t & 1 == 1 {
                res *= &base;
            }
            t >>= 1;
            if t > 0 {
                base = &base * &base;
            }
        }
        res
    }

    /// Determinant by row reduction to upper-triangular form.
    ///
    /// Every nonzero entry under the pivot is cleared by swapping it into the
    /// pivot row and subtracting a multiple of the new pivot row from the old
    /// one; each swap flips the sign.
    pub fn determinant(&self) -> f64 {
        assert!(self.is_square(), "determinant requires a square matrix, got {}x{}", self.rows, self.cols);

        let n = self.rows;
        let mut b = self.data.clone();
        let mut res = 1.0;
        let mut flip = false;

        for i in 0..n {
            for j in (i + 1)..n {
                if b[j][i] != 0.0 {
                    b.swap(i, j);
                    flip = !flip;
                    let d = b[j][i] / b[i][i];
                    for k in i..n {
                        b[j][k] -= b[i][k] * d;
                    }
                    b[j][i] = 0.0;
                }
            }
            if b[i][i] == 0.0 {
                return 0.0;
            }
            res *= b[i][i];
        }

        if flip { -res } else { res }
    }

    /// Gauss-Jordan inverse.
    ///
    /// A zero pivot is replaced by the largest-magnitude entry below it; if
    /// there is none the matrix is singular.
    pub fn inverse(&self) -> Result<Matrix> {
        assert!(self.is_square(), "inverse requires a square matrix, got {}x{}", self.rows, self.cols);

        let n = self.rows;
        let mut c = self.data.clone();
        let mut b = Matrix::identity(n).data;

        for i in 0..n {
            if c[i][i] == 0.0 {
                let pivot = ((i + 1)..n)
                    .filter(|&j| c[j][i] != 0.0)
                    .max_by(|&x, &y| c[x][i].abs().total_cmp(&c[y][i].abs()))
                    .ok_or(Error::Singular)?;
                c.swap(i, pivot);
                b.swap(i, pivot);
            }

            let d = 1.0 / c[i][i];
            for k in 0..n {
                c[i][k] *= d;
                b[i][k] *= d;
            }

            for j in 0..n {
                let v = c[j][i];
                if j == i || v == 0.0 {
                    continue;
                }
                for k in 0..n {
                    c[j][k] -= c[i][k] * v;
                    b[j][k] -= b[i][k] * v;
                }
            }
        }

        Ok(Matrix::from_data(b))
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Index<usize> for Matrix {
    type Output = [f64];

    fn index(&self, i: usize) -> &Self::Output {
        &self.data[i]
    }
}

impl IndexMut<usize> for Matrix {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.data[i]
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        for i in 0..self.rows {
            for j in 0..self.cols {
                self.data[i][j] += rhs.data[i][j];
            }
        }
    }
}

impl SubAssign<&Matrix> for Matrix {
    fn sub_assign(&mut self, rhs: &Matrix) {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        for i in 0..self.rows {
            for j in 0..self.cols {
                self.data[i][j] -= rhs.data[i][j];
            }
        }
    }
}

impl MulAssign<&Matrix> for Matrix {
    fn mul_assign(&mut self, rhs: &Matrix) {
        *self = &*self * rhs;
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        let mut res = self.clone();
        res += rhs;
        res
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut res = self.clone();
        res -= rhs;
        res
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                let a = self.data[i][j];
                for k in 0..rhs.cols {
                    res.data[i][k] += a * rhs.data[j][k];
                }
            }
        }

        res
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += &rhs;
        self
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= &rhs;
        self
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

/// Row vector × matrix. `v.len()` must equal `m.rows`; the result has `m.cols` entries.
pub fn vec_mul(v: &[f64], m: &Matrix) -> Vec<f64> {
    if v.len() != m.rows {
        panic!("Vector of length {} cannot multiply a {}x{} matrix", v.len(), m.rows, m.cols)
    }
    let mut res = vec![0.0; m.cols];
    for (x, row) in v.iter().zip(m.data.iter()) {
        for (r, w) in res.iter_mut().zip(row.iter()) {
            *r += x * w;
        }
    }
    res
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "dot product of vectors with different lengths");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
