//! Compatibility layer for rayon/sequential execution.
//!
//! When the `parallel` feature is enabled, this re-exports rayon's parallel
//! iterators. When disabled (e.g., for WASM hosts), it provides sequential
//! fallbacks for the API surface the operator core uses.

#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    /// Sequential stand-in for `rayon::prelude::ParallelSliceMut`.
    ///
    /// `par_chunks_mut()` resolves to `chunks_mut()`, so the rest of the
    /// chain (`.enumerate()`, `.for_each()`) uses the standard `Iterator`
    /// methods.
    pub trait ParallelSliceMut<T> {
        fn par_chunks_mut(&mut self, chunk_size: usize) -> std::slice::ChunksMut<'_, T>;
    }

    impl<T> ParallelSliceMut<T> for [T] {
        fn par_chunks_mut(&mut self, chunk_size: usize) -> std::slice::ChunksMut<'_, T> {
            self.chunks_mut(chunk_size)
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;
