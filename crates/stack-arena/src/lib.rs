//! # stack-arena
//!
//! A fixed-capacity stack (bump) allocator backed by an inline buffer.
//!
//! [`StackArena<N, A>`](StackArena) owns `N` bytes aligned to `A` and a
//! single cursor. It serves short-lived, LIFO-ordered allocations without
//! touching the global heap: scratch buffers, per-frame state, per-request
//! working memory.
//!
//! - Allocation bumps the cursor; every size is rounded up to `A`
//! - Freeing only reclaims the most recent allocation
//! - The whole arena rewinds to a [`StackMarker`] or to empty in O(1)
//!
//! ## Quick Start
//!
//! ```rust
//! use stack_arena::prelude::*;
//!
//! let mut arena = StackArena::<256, 8>::new();
//!
//! {
//!     let frame = arena.frame();
//!     let line = frame.alloc_copy(b"HTTP/1.1 200 OK")?;
//!     line[0] = b'h';
//!     assert_eq!(frame.used(), 16);
//! } // frame rewinds here
//!
//! assert!(arena.is_empty());
//! # Ok::<(), ArenaError>(())
//! ```
//!
//! ## Features
//!
//! - `logging` (default): structured events through `tracing`
//!
//! ## Architecture
//!
//! - Error handling via the [`error`] module; exhaustion is an in-band `Err`
//! - Alignment arithmetic in [`utils`]
//! - The [`Allocator`](allocator::Allocator) seam for dispatching raw
//!   allocations across several arenas

#![cfg_attr(docsrs, feature(doc_cfg))]
// The arena hands out raw regions of its own buffer; every unsafe block
// carries a SAFETY comment.
#![allow(unsafe_code)]
#![warn(rust_2018_idioms)]

// Error types
pub mod error;

// Core modules
pub mod allocator;
pub mod utils;

pub use crate::allocator::{StackArena, StackFrame, StackMarker};
pub use crate::error::{ArenaError, ArenaResult};
pub use crate::utils::DEFAULT_ALIGN;

// Public API exports
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::allocator::{Allocator, MemoryUsage};
    pub use crate::allocator::{StackArena, StackFrame, StackMarker};
    pub use crate::error::{ArenaError, ArenaResult};
}
