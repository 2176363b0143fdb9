//! Main stack arena implementation
//!
//! # Safety
//!
//! This module implements a single-threaded LIFO arena over an inline buffer:
//! - Buffer wrapped in `UnsafeCell` so disjoint regions can be handed out
//!   through `&self`
//! - `Cell` cursor, which also makes the arena `!Sync`
//! - Deallocations only reclaim space for the most recent allocation
//! - Markers rewind the cursor in bulk
//!
//! ## Invariants
//!
//! - The buffer starts at an `A`-aligned address
//! - `cursor` is a multiple of `A` and never exceeds `N`
//! - Every returned region lies in `[start, start + N]` and is `A`-aligned
//! - Regions below the cursor are never handed out twice: the cursor only
//!   moves down through `&mut self` (no borrowed slice can be alive) or
//!   through `deallocate`, whose caller gives the region up

use core::alloc::Layout;
use core::cell::Cell;
use core::fmt;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};
use core::slice;

#[cfg(feature = "logging")]
use tracing::trace;

use super::buffer::{AlignedBuffer, Alignment, SupportedAlignment};
use super::{StackFrame, StackMarker};
use crate::allocator::{Allocator, MemoryUsage};
use crate::error::{ArenaError, ArenaResult};
use crate::utils::{DEFAULT_ALIGN, checked_align_up, is_aligned};

/// Fixed-capacity stack allocator over an inline buffer of `N` bytes
///
/// Allocations bump a cursor forward. Every request is rounded up to a
/// multiple of `A`, so every returned pointer is `A`-aligned. Space comes
/// back in three ways: freeing the most recent allocation, rewinding to a
/// [`StackMarker`], or resetting the whole arena.
///
/// # Memory Layout
/// ```text
/// [start]----[alloc1]----[alloc2]----[alloc3]----[cursor]----[free]----[end]
///             <------ allocated ------>                 <-- available -->
/// ```
///
/// Frees must happen in reverse order: alloc3, then alloc2, then alloc1.
/// Out-of-order frees are accepted and ignored; that space stays in use until
/// the next rewind.
///
/// # Examples
///
/// ```rust
/// use stack_arena::StackArena;
///
/// let mut arena = StackArena::<64, 8>::new();
///
/// let header = arena.alloc_copy(b"GET ").unwrap();
/// assert_eq!(header, b"GET ");
/// assert_eq!(arena.used(), 8);
///
/// let marker = arena.mark();
/// arena.alloc_bytes(24).unwrap();
/// assert_eq!(arena.used(), 32);
///
/// arena.reset_to_marker(marker);
/// assert_eq!(arena.used(), 8);
/// ```
///
/// The arena borrows out its interior, so it cannot be moved while any slice
/// it returned is alive, and rewinds need `&mut self`:
///
/// ```compile_fail
/// use stack_arena::StackArena;
///
/// let mut arena = StackArena::<64, 8>::new();
/// let bytes = arena.alloc_copy(b"scratch").unwrap();
/// arena.reset();
/// bytes[0] = b'S';
/// ```
///
/// Requested alignments above `A` are rejected at compile time:
///
/// ```compile_fail
/// use stack_arena::StackArena;
///
/// let arena = StackArena::<64, 8>::new();
/// let _ = arena.allocate::<16>(8);
/// ```
pub struct StackArena<const N: usize, const A: usize = DEFAULT_ALIGN>
where
    Alignment<A>: SupportedAlignment,
{
    buffer: AlignedBuffer<N, A>,

    /// Offset of the next free byte
    cursor: Cell<usize>,
}

impl<const N: usize, const A: usize> StackArena<N, A>
where
    Alignment<A>: SupportedAlignment,
{
    /// Creates an empty arena
    pub const fn new() -> Self {
        Self {
            buffer: AlignedBuffer::new(),
            cursor: Cell::new(0),
        }
    }

    /// Returns the total capacity of the arena
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns the alignment of every block the arena hands out
    #[inline]
    pub const fn alignment(&self) -> usize {
        A
    }

    /// Returns the bytes currently handed out, padding included
    #[inline]
    pub fn used(&self) -> usize {
        self.cursor.get()
    }

    /// Returns the amount of memory available for allocation
    #[inline]
    pub fn available(&self) -> usize {
        N - self.cursor.get()
    }

    /// Returns true if nothing is allocated
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor.get() == 0
    }

    /// Returns true if only zero-size allocations can still succeed
    #[inline]
    pub fn is_full(&self) -> bool {
        self.cursor.get() == N
    }

    /// Returns true if `ptr` lies in the buffer, one-past-the-end included
    #[inline]
    pub fn contains(&self, ptr: *const u8) -> bool {
        self.offset_of(ptr.addr()).is_some()
    }

    /// Allocates `n` bytes aligned to at least `REQ_ALIGN`
    ///
    /// The request is rounded up to a multiple of `A`. On success the
    /// returned pointer marks the start of an uninitialised region; a
    /// zero-size request returns the current cursor and consumes nothing.
    ///
    /// `REQ_ALIGN` must be a power of two no larger than `A`; anything else
    /// fails to compile.
    ///
    /// # Errors
    /// Returns [`ArenaError::Exhausted`] if the padded size does not fit in
    /// the remaining space. The cursor is left unchanged.
    pub fn allocate<const REQ_ALIGN: usize>(&self, n: usize) -> ArenaResult<NonNull<u8>> {
        const {
            assert!(
                REQ_ALIGN.is_power_of_two(),
                "requested alignment must be a power of two"
            );
            assert!(
                REQ_ALIGN <= A,
                "requested alignment exceeds the arena alignment"
            );
        }
        self.bump(n)
    }

    /// Allocates `n` uninitialised bytes borrowed from the arena
    ///
    /// # Errors
    /// Returns [`ArenaError::Exhausted`] if the request does not fit.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_bytes(&self, n: usize) -> ArenaResult<&mut [MaybeUninit<u8>]> {
        let ptr = self.bump(n)?;
        // SAFETY: Creating a slice over a freshly bumped region.
        // - bump reserved [ptr, ptr + align_up(n)) inside the buffer
        // - The region sits above every live allocation, so nothing else
        //   references it
        // - The slice borrows `self`, so the arena outlives it and cannot be
        //   rewound (that needs `&mut self`) while it is alive
        Ok(unsafe { slice::from_raw_parts_mut(ptr.as_ptr().cast::<MaybeUninit<u8>>(), n) })
    }

    /// Copies `src` into the arena and returns the copy
    ///
    /// # Errors
    /// Returns [`ArenaError::Exhausted`] if `src` does not fit.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_copy(&self, src: &[u8]) -> ArenaResult<&mut [u8]> {
        let dst = self.alloc_bytes(src.len())?.as_mut_ptr().cast::<u8>();
        // SAFETY: Initialising the fresh region and reborrowing it as bytes.
        // - dst is valid for src.len() bytes (just allocated)
        // - The fresh region cannot overlap src, which is borrowed elsewhere
        // - All src.len() bytes are initialised before the slice is formed
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), dst, src.len());
            Ok(slice::from_raw_parts_mut(dst, src.len()))
        }
    }

    /// Releases the allocation at `ptr` if it is the most recent one
    ///
    /// Pointers outside the buffer are ignored, as are frees of anything but
    /// the top block: only `ptr + align_up(n) == cursor` moves the cursor.
    ///
    /// # Safety
    /// - If `ptr` is the top block, the caller must not use it again, nor any
    ///   slice derived from it
    pub unsafe fn deallocate(&self, ptr: NonNull<u8>, n: usize) {
        let Some(offset) = self.offset_of(ptr.as_ptr().addr()) else {
            return;
        };
        let Some(padded) = checked_align_up(n, A) else {
            return;
        };

        if offset.checked_add(padded) == Some(self.cursor.get()) {
            self.cursor.set(offset);

            #[cfg(feature = "logging")]
            trace!(offset, size = padded, "popped top allocation");
        }
    }

    /// Creates a marker at the current stack position
    ///
    /// This marker can be used later to restore the stack to this position,
    /// effectively releasing all allocations made after this point.
    #[inline]
    pub fn mark(&self) -> StackMarker {
        StackMarker {
            position: self.buffer.start_addr() + self.cursor.get(),
        }
    }

    /// Restores the stack to a previous marker position
    ///
    /// # Errors
    /// - [`ArenaError::MarkerOutOfRange`] if the marker is outside the buffer
    /// - [`ArenaError::MisalignedMarker`] if it is off the `A` grid
    ///
    /// The cursor is unchanged on error.
    pub fn try_reset_to_marker(&mut self, marker: StackMarker) -> ArenaResult<()> {
        let Some(offset) = self.offset_of(marker.position) else {
            let start = self.buffer.start_addr();
            return Err(ArenaError::marker_out_of_range(
                marker.position,
                start,
                start + N,
            ));
        };
        if !is_aligned(marker.position, A) {
            return Err(ArenaError::misaligned_marker(marker.position, A));
        }

        self.cursor.set(offset);
        Ok(())
    }

    /// Restores the stack to a previous marker position
    ///
    /// An invalid marker leaves the cursor untouched and writes a diagnostic
    /// to stderr. Use [`try_reset_to_marker`](Self::try_reset_to_marker) to
    /// handle the failure in code instead.
    pub fn reset_to_marker(&mut self, marker: StackMarker) {
        if let Err(error) = self.try_reset_to_marker(marker) {
            eprintln!(
                "stack-arena: cannot reset to marker: {error} (cursor kept at {} bytes)",
                self.used()
            );
        }
    }

    /// Rewinds the arena to empty
    pub fn reset(&mut self) {
        #[cfg(feature = "logging")]
        trace!(released = self.used(), capacity = N, "stack arena reset");

        *self.cursor.get_mut() = 0;
    }

    /// Opens a scope that rewinds to the current position when dropped
    pub fn frame(&mut self) -> StackFrame<'_, N, A> {
        StackFrame::new(self)
    }

    /// Bumps the cursor by `n` rounded up to `A`
    fn bump(&self, n: usize) -> ArenaResult<NonNull<u8>> {
        let cursor = self.cursor.get();
        let available = N - cursor;

        let padded = match checked_align_up(n, A) {
            Some(padded) if padded <= available => padded,
            Some(padded) => return Err(ArenaError::exhausted(padded, available)),
            None => return Err(ArenaError::exhausted(n, available)),
        };

        self.cursor.set(cursor + padded);

        // SAFETY: cursor <= N, so the result stays inside the buffer or one
        // past its end, which is a valid address for a zero-size request.
        Ok(unsafe { self.buffer.start().add(cursor) })
    }

    /// Offset of `addr` in the buffer, accepting the one-past-the-end address
    #[inline]
    fn offset_of(&self, addr: usize) -> Option<usize> {
        let offset = addr.checked_sub(self.buffer.start_addr())?;
        (offset <= N).then_some(offset)
    }
}

impl<const N: usize, const A: usize> Default for StackArena<N, A>
where
    Alignment<A>: SupportedAlignment,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, const A: usize> fmt::Debug for StackArena<N, A>
where
    Alignment<A>: SupportedAlignment,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackArena")
            .field("capacity", &N)
            .field("alignment", &A)
            .field("used", &self.used())
            .finish_non_exhaustive()
    }
}

impl<const N: usize, const A: usize> MemoryUsage for StackArena<N, A>
where
    Alignment<A>: SupportedAlignment,
{
    fn used_memory(&self) -> usize {
        self.used()
    }

    fn available_memory(&self) -> Option<usize> {
        Some(self.available())
    }

    fn total_memory(&self) -> Option<usize> {
        Some(N)
    }
}

// SAFETY: StackArena implements Allocator with stack discipline.
// - allocate returns A-aligned, non-overlapping regions inside the buffer
// - Layouts stricter than A are rejected instead of misaligned
// - deallocate ignores foreign pointers and only pops the top block
unsafe impl<const N: usize, const A: usize> Allocator for StackArena<N, A>
where
    Alignment<A>: SupportedAlignment,
{
    unsafe fn allocate(&self, layout: Layout) -> ArenaResult<NonNull<[u8]>> {
        if layout.align() > A {
            return Err(ArenaError::alignment_too_strict(layout, A));
        }

        let ptr = self.bump(layout.size())?;
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: Forwarding the caller's contract to the inherent LIFO free.
        unsafe { Self::deallocate(self, ptr, layout.size()) }
    }
}
