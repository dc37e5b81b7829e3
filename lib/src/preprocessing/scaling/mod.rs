//! Scaling transformers for feature normalization.
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`MaxAbsScaler`] | Divide each column by its maximum absolute value |

pub mod maxabs;

pub use maxabs::{FittedMaxAbsScaler, MaxAbsScaler};
