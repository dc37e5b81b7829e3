//! Logistic activation.

/// Numerically stable logistic function `σ(z) = 1 / (1 + e^(-z))`.
///
/// Branches on the sign of `z` so the exponential never overflows: for negative
/// inputs the equivalent form `e^z / (1 + e^z)` is used. The result always lies
/// in `[0, 1]` and approaches 0 or 1 without producing NaN for large `|z|`.
///
/// # Example
/// ```
/// use dslr::activation::sigmoid;
///
/// assert_eq!(sigmoid(0.0), 0.5);
/// assert!(sigmoid(1000.0) <= 1.0);
/// assert!(sigmoid(-1000.0) >= 0.0);
/// ```
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
