//! Command implementations.

pub mod tangle;

pub use tangle::{tangle, TangleOptions, TangleReport};
