//! Allocator traits
//!
//! - `Allocator`: raw allocation/deallocation by [`Layout`], dyn-compatible so
//!   several arenas can sit behind one `&dyn Allocator` facade
//! - `MemoryUsage`: occupancy reporting
//!
//! # Safety
//!
//! `Allocator` is an unsafe trait. Implementors promise that every pointer
//! returned from `allocate` is valid for `layout.size()` bytes, aligned to
//! `layout.align()`, and not handed out again until it is released.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::ArenaResult;

/// Allocator trait working on raw pointers
///
/// # Safety Requirements
///
/// Implementors must ensure that:
/// - Returned pointers are valid for reads and writes of `layout.size()` bytes
/// - Memory is properly aligned according to the layout
/// - A region is never handed out twice while it is live
/// - `deallocate` tolerates pointers the allocator does not own
pub unsafe trait Allocator {
    /// Allocates memory with the given layout
    ///
    /// # Safety
    /// - Memory content is uninitialized and must be initialized before use
    /// - The returned pointer must not outlive the allocator
    ///
    /// # Errors
    /// - Returns error if memory cannot be allocated
    /// - Returns error if the layout cannot be honoured
    unsafe fn allocate(&self, layout: Layout) -> ArenaResult<NonNull<[u8]>>;

    /// Releases memory at the given pointer with the specified layout
    ///
    /// Pointers not owned by this allocator are ignored.
    ///
    /// # Safety
    /// - If `ptr` is owned by this allocator, `layout` must match the
    ///   original allocation
    /// - After this call the region must not be used again
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

// SAFETY: Forwards every call to the referenced allocator.
// - Contracts are preserved through delegation
// - No additional unsafe operations introduced
unsafe impl<T: ?Sized + Allocator> Allocator for &T {
    unsafe fn allocate(&self, layout: Layout) -> ArenaResult<NonNull<[u8]>> {
        // SAFETY: Caller upholds the `allocate` contract for `T`.
        unsafe { (**self).allocate(layout) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Caller upholds the `deallocate` contract for `T`.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

/// Memory occupancy reporting
pub trait MemoryUsage {
    /// Bytes currently handed out, including alignment padding
    fn used_memory(&self) -> usize;

    /// Bytes still available, if the allocator is bounded
    fn available_memory(&self) -> Option<usize>;

    /// Total bytes managed, if the allocator is bounded
    fn total_memory(&self) -> Option<usize> {
        self.available_memory()
            .map(|available| available + self.used_memory())
    }

    /// Occupancy as a percentage of the total
    fn usage_percent(&self) -> Option<f64> {
        match self.total_memory() {
            Some(0) | None => None,
            Some(total) => Some(self.used_memory() as f64 / total as f64 * 100.0),
        }
    }
}
