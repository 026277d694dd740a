//! # Rayon Utilities

mod parallel_tokenizer;

pub use parallel_tokenizer::ParallelTokenizer;
