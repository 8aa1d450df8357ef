//! Utility functions

pub mod boyer_moore;

pub use boyer_moore::{BoyerMoore, find_bytes};
