//! Core model types for lmt.

mod block_name;
mod code_block;
mod code_line;
mod expand;
mod finalize;
mod registry;

pub use block_name::BlockName;
pub use code_block::CodeBlock;
pub use code_line::CodeLine;
pub use expand::{expand, expand_into, CycleDetector};
pub use finalize::finalize;
pub use registry::{BlockRegistry, WriteMode};
