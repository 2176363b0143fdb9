//! Property tests for the stack arena.
//!
//! Uses proptest to check the arena's bookkeeping against a simple model:
//! - `used()` equals the sum of padded sizes of successful allocations
//! - Returned regions are aligned and never overlap
//! - Rewinds (reset, markers, LIFO frees) restore earlier states exactly
//! - Out-of-order and foreign frees never move the cursor

use std::ptr::NonNull;

use proptest::prelude::*;
use stack_arena::StackArena;
use stack_arena::utils::{align_up, is_aligned_ptr};

const CAPACITY: usize = 1024;
const ALIGN: usize = 8;

type Arena = StackArena<CAPACITY, ALIGN>;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_size() -> impl Strategy<Value = usize> {
    prop_oneof![
        3 => 0usize..=64,
        1 => 65usize..=400,
    ]
}

fn arb_sizes() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(arb_size(), 0..40)
}

/// Allocates every size in turn, returning the successful regions
fn allocate_all(arena: &Arena, sizes: &[usize]) -> Vec<(NonNull<u8>, usize)> {
    sizes
        .iter()
        .filter_map(|&size| arena.allocate::<ALIGN>(size).ok().map(|ptr| (ptr, size)))
        .collect()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn used_is_sum_of_padded_sizes(sizes in arb_sizes()) {
        let arena = Arena::new();
        let regions = allocate_all(&arena, &sizes);

        let expected: usize = regions.iter().map(|&(_, size)| align_up(size, ALIGN)).sum();
        prop_assert_eq!(arena.used(), expected);
        prop_assert!(arena.used() <= CAPACITY);
        prop_assert_eq!(arena.used() % ALIGN, 0);
    }

    #[test]
    fn regions_are_aligned_and_disjoint(sizes in arb_sizes()) {
        let arena = Arena::new();
        let regions = allocate_all(&arena, &sizes);

        for &(ptr, _) in &regions {
            prop_assert!(is_aligned_ptr(ptr.as_ptr(), ALIGN));
            prop_assert!(arena.contains(ptr.as_ptr()));
        }

        for (i, &(a, a_size)) in regions.iter().enumerate() {
            for &(b, b_size) in &regions[i + 1..] {
                let (a_start, b_start) = (a.as_ptr().addr(), b.as_ptr().addr());
                let a_end = a_start + align_up(a_size, ALIGN);
                let b_end = b_start + align_up(b_size, ALIGN);
                prop_assert!(a_end <= b_start || b_end <= a_start);
            }
        }
    }

    #[test]
    fn reset_empties_the_arena(sizes in arb_sizes(), next in 0usize..=CAPACITY) {
        let mut arena = Arena::new();
        allocate_all(&arena, &sizes);

        arena.reset();
        prop_assert_eq!(arena.used(), 0);
        prop_assert!(arena.allocate::<ALIGN>(next).is_ok());
    }

    #[test]
    fn marker_restores_usage(before in arb_sizes(), after in arb_sizes()) {
        let mut arena = Arena::new();
        allocate_all(&arena, &before);

        let used = arena.used();
        let marker = arena.mark();
        allocate_all(&arena, &after);

        arena.reset_to_marker(marker);
        prop_assert_eq!(arena.used(), used);
    }

    #[test]
    fn allocation_succeeds_iff_it_fits(sizes in arb_sizes(), n in 0usize..=CAPACITY + 64) {
        let arena = Arena::new();
        allocate_all(&arena, &sizes);

        let used = arena.used();
        let fits = align_up(n, ALIGN) <= CAPACITY - used;
        let result = arena.allocate::<ALIGN>(n);

        prop_assert_eq!(result.is_ok(), fits);
        if !fits {
            prop_assert_eq!(arena.used(), used);
        }
    }

    #[test]
    fn lifo_free_restores_and_reuses(sizes in arb_sizes(), n in arb_size()) {
        let arena = Arena::new();
        allocate_all(&arena, &sizes);
        let used = arena.used();

        if let Ok(ptr) = arena.allocate::<ALIGN>(n) {
            unsafe { arena.deallocate(ptr, n) };
            prop_assert_eq!(arena.used(), used);
            prop_assert_eq!(arena.allocate::<ALIGN>(n).ok(), Some(ptr));
        }
    }

    #[test]
    fn non_top_free_is_ignored(n1 in arb_size(), n2 in 1usize..=64) {
        let arena = Arena::new();
        let p1 = arena.allocate::<ALIGN>(n1);
        let p2 = arena.allocate::<ALIGN>(n2);
        prop_assume!(p1.is_ok() && p2.is_ok());

        let used = arena.used();
        if let Ok(p1) = p1 {
            unsafe { arena.deallocate(p1, n1) };
        }
        prop_assert_eq!(arena.used(), used);
    }

    #[test]
    fn foreign_free_is_ignored(sizes in arb_sizes(), n in arb_size()) {
        let arena = Arena::new();
        let other = Arena::new();
        allocate_all(&arena, &sizes);
        let used = arena.used();

        if let Ok(foreign) = other.allocate::<ALIGN>(n) {
            unsafe { arena.deallocate(foreign, n) };
        }
        prop_assert_eq!(arena.used(), used);
    }
}
