use rayon::prelude::*;
use thiserror::Error;

use facewarp_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The chunk size for AutoRows must be valid.
    #[error("chunk size must be > 0 for AutoRows strategy")]
    InvalidRowStride(usize),

    /// Input and output sizes do not match.
    #[error("source and destination slices must have the same length")]
    SizeMismatch,
}

/// Controls how parallel operations are executed.
///
/// Whatever the strategy, results are always produced in input order, so the
/// output of an operation does not depend on the strategy nor on the number of
/// threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process every element in parallel.
    ///
    /// For the face warp an element is one triangle.
    #[default]
    ParallelElements,

    /// Use the global Rayon thread pool to process chunks of elements in parallel.
    ///
    /// For images the chunk size is usually the row stride (width * channels).
    AutoRows(usize),

    /// Run sequentially on the current thread.
    ///
    /// Useful for small inputs, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Apply a function to each pixel of three images with the same layout in parallel.
///
/// The rows of `src1`, `src2` and `dst` are visited in parallel, pixels in a row
/// sequentially.
pub fn par_iter_rows_two<T1, T2, T3, const C: usize>(
    src1: &Image<T1, C>,
    src2: &Image<T2, C>,
    dst: &mut Image<T3, C>,
    f: impl Fn(&[T1], &[T2], &mut [T3]) + Send + Sync,
) where
    T1: Sync,
    T2: Sync,
    T3: Send,
{
    let stride = C * src1.cols().max(1);
    src1.as_slice()
        .par_chunks_exact(stride)
        .zip(src2.as_slice().par_chunks_exact(stride))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(stride))
        .for_each(|((src1_row, src2_row), dst_row)| {
            src1_row
                .chunks_exact(C)
                .zip(src2_row.chunks_exact(C))
                .zip(dst_row.chunks_exact_mut(C))
                .for_each(|((src1_pixel, src2_pixel), dst_pixel)| {
                    f(src1_pixel, src2_pixel, dst_pixel);
                });
        });
}

/// Trait to execute operations on a slice with a given strategy.
pub trait ExecuteExt<T> {
    /// Execute an operation on the slice with the given strategy.
    ///
    /// # Arguments
    ///
    /// * `strategy` - The execution strategy.
    /// * `dst` - The destination slice.
    /// * `op` - The operation to perform on each (source, destination) element pair.
    ///
    /// # Returns
    ///
    /// A result indicating success or failure.
    fn execute_with<U, F>(
        &self,
        strategy: ExecutionStrategy,
        dst: &mut [U],
        op: F,
    ) -> Result<(), ParallelError>
    where
        U: Send,
        F: Fn((&T, &mut U)) + Sync + Send;

    /// Map every element of the slice with the given strategy.
    ///
    /// # Arguments
    ///
    /// * `strategy` - The execution strategy.
    /// * `op` - The operation producing one output per element.
    ///
    /// # Returns
    ///
    /// The outputs, in the order of the input elements.
    fn map_with<R, F>(&self, strategy: ExecutionStrategy, op: F) -> Result<Vec<R>, ParallelError>
    where
        R: Send,
        F: Fn(&T) -> R + Sync + Send;
}

fn fixed_pool(n: usize) -> Result<rayon::ThreadPool, ParallelError> {
    if n == 0 {
        return Err(ParallelError::InvalidThreadCount(n));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build()
        .map_err(|e| ParallelError::BuildError(e.to_string()))
}

impl<T: Sync + Send> ExecuteExt<T> for &[T] {
    fn execute_with<U, F>(
        &self,
        strategy: ExecutionStrategy,
        dst: &mut [U],
        op: F,
    ) -> Result<(), ParallelError>
    where
        U: Send,
        F: Fn((&T, &mut U)) + Sync + Send,
    {
        if self.len() != dst.len() {
            return Err(ParallelError::SizeMismatch);
        }

        match strategy {
            ExecutionStrategy::Serial => {
                self.iter().zip(dst.iter_mut()).for_each(op);
            }
            ExecutionStrategy::ParallelElements => {
                self.par_iter().zip(dst.par_iter_mut()).for_each(op);
            }
            ExecutionStrategy::AutoRows(stride) => {
                if stride == 0 {
                    return Err(ParallelError::InvalidRowStride(stride));
                }
                self.par_chunks(stride)
                    .zip(dst.par_chunks_mut(stride))
                    .for_each(|(src_row, dst_row)| {
                        src_row.iter().zip(dst_row.iter_mut()).for_each(&op);
                    });
            }
            ExecutionStrategy::Fixed(n) => {
                fixed_pool(n)?.install(|| {
                    self.par_iter().zip(dst.par_iter_mut()).for_each(op);
                });
            }
        }
        Ok(())
    }

    fn map_with<R, F>(&self, strategy: ExecutionStrategy, op: F) -> Result<Vec<R>, ParallelError>
    where
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        // one output slot per input element
        let mut out: Vec<Option<R>> = self.iter().map(|_| None).collect();
        self.execute_with(strategy, &mut out, |(item, slot)| *slot = Some(op(item)))?;
        Ok(out.into_iter().flatten().collect())
    }
}
