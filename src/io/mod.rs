//! I/O operations for reading documents and writing output files.

mod file_cache;
mod transaction;

pub use file_cache::{FileCache, RealFileCache, VirtualFS};
pub use transaction::{Action, Transaction, WriteAction, WriteOutcome, WriteReport};
