//! Execution policy for the per-class training loop.

use rayon::prelude::*;

/// Whether parallel execution is allowed.
///
/// Passed to the One-vs-Rest classifier, which trains one unit per class either
/// on the current rayon pool or on the calling thread. The pool itself is set
/// up by the caller (see [`run_with_threads`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism {
    #[default]
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if the rayon pool has multiple threads)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Maps `f` over `iter`, keeping input order in the output.
    #[inline]
    pub fn maybe_par_map<T, R, I, F>(self, iter: I, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> R + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

/// Runs `f` inside a rayon pool sized by `n_threads`.
///
/// - `0` = the global pool
/// - `1` = sequential, no pool
/// - `n > 1` = a dedicated pool of exactly `n` threads
pub fn run_with_threads<T: Send>(
    n_threads: usize,
    f: impl FnOnce(Parallelism) -> T + Send,
) -> Result<T, rayon::ThreadPoolBuildError> {
    match n_threads {
        0 | 1 => Ok(f(Parallelism::from_threads(n_threads))),
        n => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            Ok(pool.install(|| f(Parallelism::Parallel)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_threads() {
        assert_eq!(Parallelism::from_threads(1), Parallelism::Sequential);
        assert_eq!(Parallelism::from_threads(4), Parallelism::Parallel);
    }

    #[test]
    fn test_maybe_par_map_preserves_order() {
        let seq = Parallelism::Sequential.maybe_par_map(0..64usize, |i| i * i);
        let par = Parallelism::Parallel.maybe_par_map(0..64usize, |i| i * i);
        assert_eq!(seq, par);
        assert_eq!(seq[7], 49);
    }

    #[test]
    fn test_run_with_threads_sequential() {
        let out = run_with_threads(1, |p| p).unwrap();
        assert_eq!(out, Parallelism::Sequential);
    }

    #[test]
    fn test_run_with_threads_pool() {
        let (par, threads) = run_with_threads(2, |p| (p, rayon::current_num_threads())).unwrap();
        assert!(par.is_parallel());
        assert_eq!(threads, 2);
    }
}
