pub mod dense;
pub mod kind;

pub use dense::{Layer, LayerState};
pub use kind::LayerKind;
