//! Index width of a map: entry positions and cached key hashes share it.

use core::fmt;

mod private {
    pub trait Sealed {}
}

/// Unsigned integer used for entry positions and cached key hashes.
///
/// The all-ones value is reserved as the "unused bucket" sentinel, and a map
/// never holds more than `MAX / 2` entries so that its bucket table (kept at
/// twice the entry count) stays addressable.
pub trait MapIndex: Copy + Eq + fmt::Debug + private::Sealed + 'static {
    /// Sentinel marking an unused bucket.
    const UNUSED: Self;
    /// Largest number of entries a map with this index width may hold.
    const CAPACITY: usize;

    /// Truncates a 64-bit hash to this width.
    fn from_hash(hash: u64) -> Self;
    /// Converts an entry position. Callers keep `i < CAPACITY`.
    fn from_usize(i: usize) -> Self;
    fn to_usize(self) -> usize;
}

macro_rules! impl_map_index {
    ($($t:ty),*) => {$(
        impl private::Sealed for $t {}

        impl MapIndex for $t {
            const UNUSED: Self = <$t>::MAX;
            const CAPACITY: usize = if (<$t>::MAX / 2) as u128 > usize::MAX as u128 {
                usize::MAX
            } else {
                (<$t>::MAX / 2) as usize
            };

            #[inline]
            fn from_hash(hash: u64) -> Self {
                hash as $t
            }

            #[inline]
            fn from_usize(i: usize) -> Self {
                debug_assert!(i <= Self::CAPACITY);
                i as $t
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    )*};
}

impl_map_index!(u8, u16, u32, u64, usize);
