//! Inline byte buffer with a type-level alignment
//!
//! `#[repr(align)]` only takes literals, so each supported alignment gets a
//! zero-sized marker type. An empty array of that marker in front of the
//! bytes raises the alignment of the whole buffer without using any space.

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::ptr::NonNull;

/// Type-level carrier for an arena alignment
///
/// Only alignments that implement [`SupportedAlignment`] can parameterise a
/// [`StackArena`](super::StackArena).
#[derive(Debug, Clone, Copy)]
pub struct Alignment<const A: usize>;

mod private {
    pub trait Sealed {}
}

/// Power-of-two alignments from 1 to 4096 bytes
///
/// This trait is sealed and cannot be implemented outside this crate.
pub trait SupportedAlignment: private::Sealed {
    /// Zero-sized type whose alignment is the carried value
    type Aligner: Copy;
}

macro_rules! supported_alignments {
    ($($align:tt => $aligner:ident),* $(,)?) => {
        $(
            #[doc(hidden)]
            #[derive(Debug, Clone, Copy)]
            #[repr(align($align))]
            pub struct $aligner;

            impl private::Sealed for Alignment<$align> {}

            impl SupportedAlignment for Alignment<$align> {
                type Aligner = $aligner;
            }
        )*
    };
}

supported_alignments! {
    1 => Align1,
    2 => Align2,
    4 => Align4,
    8 => Align8,
    16 => Align16,
    32 => Align32,
    64 => Align64,
    128 => Align128,
    256 => Align256,
    512 => Align512,
    1024 => Align1024,
    2048 => Align2048,
    4096 => Align4096,
}

#[repr(C)]
struct Bytes<const N: usize, const A: usize>
where
    Alignment<A>: SupportedAlignment,
{
    _align: [<Alignment<A> as SupportedAlignment>::Aligner; 0],
    bytes: [MaybeUninit<u8>; N],
}

/// `N` uninitialised bytes starting at an `A`-aligned address
///
/// Interior mutability lets disjoint regions be written through `&self`;
/// keeping those regions disjoint is the owner's job.
pub(crate) struct AlignedBuffer<const N: usize, const A: usize>
where
    Alignment<A>: SupportedAlignment,
{
    cell: UnsafeCell<Bytes<N, A>>,
}

impl<const N: usize, const A: usize> AlignedBuffer<N, A>
where
    Alignment<A>: SupportedAlignment,
{
    pub(crate) const fn new() -> Self {
        Self {
            cell: UnsafeCell::new(Bytes {
                _align: [],
                bytes: [MaybeUninit::uninit(); N],
            }),
        }
    }

    /// Pointer to the first byte
    #[inline]
    pub(crate) fn start(&self) -> NonNull<u8> {
        // SAFETY: UnsafeCell::get on a live field is never null. `Bytes` is
        // repr(C) and its first field is zero-sized, so the bytes start at
        // offset 0.
        unsafe { NonNull::new_unchecked(self.cell.get().cast::<u8>()) }
    }

    /// Address of the first byte
    #[inline]
    pub(crate) fn start_addr(&self) -> usize {
        self.start().as_ptr().addr()
    }
}
