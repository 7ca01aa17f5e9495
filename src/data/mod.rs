pub mod dataset;
pub mod scaler;
pub mod split;

pub use dataset::Dataset;
pub use scaler::{MinMaxScaler, Scaler, StandardScaler};
pub use split::{one_hot, train_test_split, Split};
