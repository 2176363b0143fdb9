//! Stack marker for position tracking

/// Marker representing a position in a stack arena
///
/// Can be used to reset the arena to this position, releasing all
/// allocations made after the marker was created. A marker is only meaningful
/// for the arena that produced it; the arena rejects markers that fall outside
/// its buffer or off its alignment grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StackMarker {
    pub(super) position: usize,
}

impl StackMarker {
    /// Builds a marker from the start of a block returned by the arena
    ///
    /// Resetting to such a marker releases that block and everything
    /// allocated after it.
    #[inline]
    pub fn from_ptr(ptr: *const u8) -> Self {
        Self {
            position: ptr.addr(),
        }
    }

    /// Address captured by this marker
    #[inline]
    pub const fn position(self) -> usize {
        self.position
    }
}
