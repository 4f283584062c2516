//! ordered-string-map: a string-keyed map with O(1) expected lookup, O(1)
//! access by insertion position and iteration in insertion order.
//!
//! Internal Design:
//!
//! Summary
//! - Two structures owned by one map:
//!   - Entry log: `Vec<Entry>` of (key, cached key hash, value), append-only
//!     until `clear`. Defines iteration order and positional indices.
//!   - Bucket table: power-of-two array of entry positions with an
//!     all-ones "unused" sentinel. Defines lookup by key.
//! - Lookup hashes the key, then probes from `hash & mask` with steps of
//!   1, 2, 3, ... until it meets a matching entry or an unused bucket.
//! - Insertion appends to the log and records the new position in the
//!   unused bucket the probe stopped at.
//!
//! Constraints
//! - Load factor stays at or below 1/2: before each insertion the table
//!   doubles (starting at `2^MIN_BUCKETS_LOG2`) if `len + 1 > buckets / 2`.
//!   A probe therefore always terminates.
//! - The check runs before the key is probed, so the bucket found by the
//!   probe is still valid when the entry is appended.
//! - Growth replays the log in order with the cached hashes; keys are never
//!   rehashed.
//! - The index type `I` bounds the map to `I::MAX / 2` entries. Past that,
//!   `insert` returns `InsertError::Full` and leaves the map unchanged.
//! - Keys are insert-if-absent. A duplicate returns `Ok(false)`; values are
//!   updated in place through `get_mut` or `IndexMut`.
//!
//! Notes and non-goals
//! - Single-threaded: no internal locking. Shared reads are fine; mutation
//!   needs `&mut`, which the borrow checker already enforces.
//! - No removal, no replacement of existing values, no ordering other than
//!   insertion order.
//! - Keys are stored in `SmallString<16>`, so short keys need no heap
//!   allocation of their own.
//! - `str_split` is a standalone tokenizer; the map does not depend on it.

mod bucket_table;
mod entry;
mod error;
mod index;
mod ordered_string_map;
#[cfg(test)]
mod ordered_string_map_proptest;
pub mod small_string;
pub mod str_split;

// Public surface
pub use entry::Entry;
pub use error::InsertError;
pub use index::MapIndex;
pub use ordered_string_map::{Iter, IterMut, OrderedStringMap, DEFAULT_MIN_BUCKETS_LOG2};
pub use small_string::SmallString;

/// Default hasher for keys.
pub use hashbrown::hash_map::DefaultHashBuilder;
