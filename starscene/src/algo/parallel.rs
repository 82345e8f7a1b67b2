//! Parallel processing utilities for source batches
//!
//! This module provides order-preserving chunked parallel maps with
//! deterministic per-item seeding, so results do not depend on how work is
//! split across threads.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Random generator dedicated to one item of a batch
///
/// All items share the key derived from `seed` and each reads its own
/// ChaCha stream selected by `index`. The draws for item `i` are therefore
/// the same whether the batch is processed sequentially or in any chunking.
///
/// # Arguments
/// * `seed` - Base seed of the run
/// * `index` - Position of the item in the batch
pub fn item_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

/// Map contiguous chunks of a slice in parallel, keeping chunk order
///
/// Each chunk is handed to `processor` together with the index of its first
/// element in `items`. Segment results come back in the same order as the
/// chunks, ready to be concatenated.
///
/// # Arguments
/// * `items` - The slice to process
/// * `chunk_size` - Number of items per chunk, must be non-zero
/// * `processor` - Closure producing one segment per chunk
///
/// # Type Parameters
/// * `F` - Closure taking the chunk offset and the chunk
///
/// # Returns
/// One segment per chunk, in slice order
pub fn map_chunks_in_parallel<T, S, F>(items: &[T], chunk_size: usize, processor: F) -> Vec<S>
where
    T: Sync,
    S: Send,
    F: Fn(usize, &[T]) -> S + Send + Sync,
{
    items
        .par_chunks(chunk_size)
        .enumerate()
        .map(|(chunk_idx, chunk)| processor(chunk_idx * chunk_size, chunk))
        .collect()
}
