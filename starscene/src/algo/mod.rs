//! Algorithms shared by the pipeline stages

pub mod parallel;

pub use parallel::{item_rng, map_chunks_in_parallel};
