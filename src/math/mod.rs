pub mod matrix;

pub use matrix::{dot, vec_mul, Matrix};
