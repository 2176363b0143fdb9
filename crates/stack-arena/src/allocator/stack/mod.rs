//! A fixed-capacity stack allocator over an inline buffer.
//!
//! ## Modules
//! - `allocator` - `StackArena` with LIFO semantics
//! - `buffer` - Inline buffer aligned through `SupportedAlignment`
//! - `frame` - RAII helper for automatic stack restoration
//! - `marker` - Position markers for scoped deallocation
pub mod allocator;
pub mod buffer;
pub mod frame;
pub mod marker;
pub use allocator::StackArena;
pub use buffer::{Alignment, SupportedAlignment};
pub use frame::StackFrame;
pub use marker::StackMarker;
