//! Alignment arithmetic shared by the arena and its traits.
//!
//! Every helper assumes a power-of-two alignment; this is checked with
//! `debug_assert!` only, since arena alignments are fixed at the type level.

/// Largest natural alignment among the primitive scalar types.
///
/// This is the Rust counterpart of C's `alignof(max_align_t)` and the default
/// alignment of a [`StackArena`](crate::StackArena).
pub const DEFAULT_ALIGN: usize = max_scalar_align();

const fn max_scalar_align() -> usize {
    let candidates = [
        align_of::<u64>(),
        align_of::<u128>(),
        align_of::<f64>(),
        align_of::<usize>(),
        align_of::<*const ()>(),
    ];

    let mut max = 1;
    let mut i = 0;
    while i < candidates.len() {
        if candidates[i] > max {
            max = candidates[i];
        }
        i += 1;
    }
    max
}

/// Aligns a value up to the nearest multiple of alignment
///
/// # Examples
/// ```
/// use stack_arena::utils::align_up;
///
/// assert_eq!(align_up(1, 8), 8);
/// assert_eq!(align_up(8, 8), 8);
/// assert_eq!(align_up(0, 8), 0);
/// ```
#[inline]
pub const fn align_up(value: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    (value + alignment - 1) & !(alignment - 1)
}

/// Like [`align_up`], but returns `None` instead of overflowing
///
/// # Examples
/// ```
/// use stack_arena::utils::checked_align_up;
///
/// assert_eq!(checked_align_up(13, 8), Some(16));
/// assert_eq!(checked_align_up(usize::MAX, 8), None);
/// ```
#[inline]
pub const fn checked_align_up(value: usize, alignment: usize) -> Option<usize> {
    debug_assert!(alignment.is_power_of_two());
    match value.checked_add(alignment - 1) {
        Some(bumped) => Some(bumped & !(alignment - 1)),
        None => None,
    }
}

/// Checks if a value is aligned to the specified alignment
///
/// # Examples
/// ```
/// use stack_arena::utils::is_aligned;
///
/// assert!(is_aligned(16, 8));
/// assert!(!is_aligned(12, 8));
/// ```
#[inline]
pub const fn is_aligned(value: usize, alignment: usize) -> bool {
    debug_assert!(alignment.is_power_of_two());
    value & (alignment - 1) == 0
}

/// Checks if a pointer is aligned to the specified alignment
#[inline]
pub fn is_aligned_ptr<T>(ptr: *const T, alignment: usize) -> bool {
    is_aligned(ptr.addr(), alignment)
}
