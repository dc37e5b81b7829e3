//! Benchmark utilities for dslr.
//!
//! Synthetic, deterministic classification data so benchmark runs do not
//! depend on dataset files.

use dslr::backend::{Backend, Tensor2D};

/// `n_classes` clusters of `per_class` rows in `n_features` dimensions.
///
/// Class `c` is centered on `+1` in feature `c % n_features` and `-1` elsewhere;
/// rows are spread around the center by a fixed pseudo-random offset.
/// Returns the feature matrix and the matching one-hot label matrix.
pub fn clustered<B: Backend>(
    n_classes: usize,
    per_class: usize,
    n_features: usize,
) -> (Tensor2D<B>, Tensor2D<B>) {
    let rows = n_classes * per_class;
    let mut x = Vec::with_capacity(rows * n_features);
    let mut y = vec![0.0; rows * n_classes];
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;

    for c in 0..n_classes {
        for i in 0..per_class {
            for j in 0..n_features {
                // xorshift
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                let jitter = (state % 1000) as f64 / 1000.0 - 0.5;
                let center = if j == c % n_features { 1.0 } else { -1.0 };
                x.push(center + jitter);
            }
            y[(c * per_class + i) * n_classes + c] = 1.0;
        }
    }

    (
        Tensor2D::new(x, rows, n_features),
        Tensor2D::new(y, rows, n_classes),
    )
}
