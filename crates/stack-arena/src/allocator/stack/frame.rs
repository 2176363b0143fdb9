//! RAII-based stack frame for automatic restoration

use core::ops::{Deref, DerefMut};

use super::buffer::{Alignment, SupportedAlignment};
use super::{StackArena, StackMarker};

/// RAII helper for stack-based scoped allocation
///
/// Captures the arena position on creation and rewinds to it when dropped,
/// releasing everything allocated through the frame. The frame borrows the
/// arena mutably, so slices handed out inside the frame cannot outlive it.
///
/// Frames nest: call [`StackArena::frame`] through the guard to open an
/// inner scope.
pub struct StackFrame<'a, const N: usize, const A: usize>
where
    Alignment<A>: SupportedAlignment,
{
    arena: &'a mut StackArena<N, A>,
    marker: StackMarker,
}

impl<'a, const N: usize, const A: usize> StackFrame<'a, N, A>
where
    Alignment<A>: SupportedAlignment,
{
    /// Creates a new stack frame that will restore to the current position
    /// when dropped
    pub fn new(arena: &'a mut StackArena<N, A>) -> Self {
        let marker = arena.mark();
        Self { arena, marker }
    }

    /// Position this frame restores to
    pub fn marker(&self) -> StackMarker {
        self.marker
    }

    /// Manually restore and consume this frame
    pub fn restore(self) {
        // Drop will handle the restoration
        drop(self);
    }
}

impl<const N: usize, const A: usize> Deref for StackFrame<'_, N, A>
where
    Alignment<A>: SupportedAlignment,
{
    type Target = StackArena<N, A>;

    fn deref(&self) -> &Self::Target {
        self.arena
    }
}

impl<const N: usize, const A: usize> DerefMut for StackFrame<'_, N, A>
where
    Alignment<A>: SupportedAlignment,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.arena
    }
}

impl<const N: usize, const A: usize> Drop for StackFrame<'_, N, A>
where
    Alignment<A>: SupportedAlignment,
{
    fn drop(&mut self) {
        // The marker came from this arena, so this only fails if the arena
        // was swapped out through `DerefMut`; nothing to report from drop.
        let _ = self.arena.try_reset_to_marker(self.marker);
    }
}
