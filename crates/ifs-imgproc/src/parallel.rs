use rayon::prelude::*;
use thiserror::Error;

use ifs_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how row-wise operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Apply a function to every row of the image with the given strategy.
///
/// The closure receives the row index and the row values (`width * C` of them) and returns
/// a count; the sum of the counts over all rows is returned.
///
/// # Errors
///
/// Returns an error if a fixed thread pool is requested with zero threads or cannot be built.
pub fn for_each_row<T, const C: usize>(
    dst: &mut Image<T, C>,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) -> usize + Send + Sync,
) -> Result<usize, ParallelError>
where
    T: Send,
{
    let stride = dst.row_stride();
    let rows = dst.as_slice_mut();

    let total: usize = match strategy {
        ExecutionStrategy::Serial => rows
            .chunks_exact_mut(stride)
            .enumerate()
            .map(|(y, row)| f(y, row))
            .sum(),
        ExecutionStrategy::ParallelRows => rows
            .par_chunks_exact_mut(stride)
            .enumerate()
            .map(|(y, row)| f(y, row))
            .sum(),
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                rows.par_chunks_exact_mut(stride)
                    .enumerate()
                    .map(|(y, row)| f(y, row))
                    .sum()
            })
        }
    };

    Ok(total)
}
