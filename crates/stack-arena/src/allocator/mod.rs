//! Allocator traits and the stack arena
//!
//! ## Modules
//! - `traits` - `Allocator` and `MemoryUsage`, the seams arenas plug into
//! - `stack` - `StackArena` with LIFO frees, markers and scoped frames

pub mod stack;
pub mod traits;

pub use stack::{Alignment, StackArena, StackFrame, StackMarker, SupportedAlignment};
pub use traits::{Allocator, MemoryUsage};
