use rayon::prelude::*;
use thiserror::Error;

use linemorph_image::Image;

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

/// Controls how the per-pixel loops are executed.
///
/// Every strategy produces the same output; only the scheduling differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Fill every pixel of `dst` from a function of its `(x, y)` position.
///
/// # Arguments
///
/// * `dst` - The output image; its rows are the unit of work.
/// * `strategy` - How rows are scheduled.
/// * `f` - Called once per pixel with the column, the row and the pixel channels.
///
/// # Errors
///
/// Fails only when [`ExecutionStrategy::Fixed`] cannot build its pool.
pub fn par_iter_rows_indexed<T, const C: usize>(
    dst: &mut Image<T, C>,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) -> Result<(), ParallelError>
where
    T: Send,
{
    let cols = dst.cols();
    if cols == 0 || dst.rows() == 0 {
        return Ok(());
    }

    let row_op = |(y, dst_row): (usize, &mut [T])| {
        dst_row
            .chunks_exact_mut(C)
            .enumerate()
            .for_each(|(x, dst_pixel)| f(x, y, dst_pixel));
    };

    let dst_slice = dst.as_slice_mut();

    match strategy {
        ExecutionStrategy::Serial => {
            dst_slice
                .chunks_exact_mut(C * cols)
                .enumerate()
                .for_each(row_op);
        }
        ExecutionStrategy::ParallelRows => {
            dst_slice
                .par_chunks_exact_mut(C * cols)
                .enumerate()
                .for_each(row_op);
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst_slice
                    .par_chunks_exact_mut(C * cols)
                    .enumerate()
                    .for_each(row_op);
            });
        }
    }
    Ok(())
}
