//! OrderedStringMap: public container over the entry log and bucket table.

use crate::bucket_table::{BucketTable, Probe};
use crate::entry::Entry;
use crate::error::InsertError;
use crate::index::MapIndex;
use core::fmt;
use core::hash::BuildHasher;
use core::ops::{Index, IndexMut};
use hashbrown::hash_map::DefaultHashBuilder;
use log::{debug, warn};

/// Default log2 of the smallest allocated bucket table (64 buckets).
pub const DEFAULT_MIN_BUCKETS_LOG2: u32 = 6;

/// Insertion-ordered map from strings to `V`.
///
/// - `I` is the width of entry positions and cached hashes; it bounds the
///   map to `I::CAPACITY` entries.
/// - `S` hashes keys. The 64-bit result is truncated to `I`.
/// - `MIN_BUCKETS_LOG2` sizes the first bucket allocation and the table
///   kept by `clear`.
///
/// Keys are insert-if-absent: `insert` never overwrites. To update a value,
/// look it up and mutate it through `get_mut` or `IndexMut`.
pub struct OrderedStringMap<
    V,
    I = u32,
    S = DefaultHashBuilder,
    const MIN_BUCKETS_LOG2: u32 = DEFAULT_MIN_BUCKETS_LOG2,
> {
    hasher: S,
    buckets: BucketTable<I>,
    entries: Vec<Entry<V, I>>,
}

impl<V> OrderedStringMap<V> {
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<V> Default for OrderedStringMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, I, S, const MIN_BUCKETS_LOG2: u32> OrderedStringMap<V, I, S, MIN_BUCKETS_LOG2>
where
    I: MapIndex,
    S: BuildHasher,
{
    const MIN_BUCKETS: usize = {
        assert!(
            MIN_BUCKETS_LOG2 >= 1 && MIN_BUCKETS_LOG2 < usize::BITS,
            "MIN_BUCKETS_LOG2 must leave room for an unused bucket"
        );
        1 << MIN_BUCKETS_LOG2
    };

    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            buckets: BucketTable::new(),
            entries: Vec::new(),
        }
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// The hash cached in an entry for `key`.
    #[inline]
    pub fn hash_key(&self, key: &str) -> I {
        I::from_hash(self.hasher.hash_one(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current bucket table size; 0 until the first insertion.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Maximum number of entries this map can hold.
    pub fn capacity_limit(&self) -> usize {
        I::CAPACITY
    }

    /// Position of `key` in insertion order, or `None` if absent.
    pub fn find(&self, key: &str) -> Option<usize> {
        if !self.buckets.is_allocated() {
            return None;
        }
        match self
            .buckets
            .probe(&self.entries, key, self.hash_key(key))
        {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) => None,
        }
    }

    pub fn find_entry(&self, key: &str) -> Option<&Entry<V, I>> {
        self.find(key).map(|i| &self.entries[i])
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(|i| self.entries[i].value())
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let i = self.find(key)?;
        Some(self.entries[i].value_mut())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// 1 if `key` is present, else 0.
    pub fn count(&self, key: &str) -> usize {
        usize::from(self.contains_key(key))
    }

    /// Key and value at insertion position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&str, &V)> {
        self.entries.get(index).map(Entry::pair)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<(&str, &mut V)> {
        self.entries.get_mut(index).map(Entry::pair_mut)
    }

    /// The entry log, in insertion order.
    pub fn entries(&self) -> &[Entry<V, I>] {
        &self.entries
    }

    /// Inserts `key` if absent. Returns `Ok(false)` and leaves the map
    /// untouched when the key already exists.
    pub fn insert(&mut self, key: &str, value: V) -> Result<bool, InsertError> {
        self.insert_with(key, || value)
    }

    /// Like `insert`, but only builds the value when it will be stored.
    pub fn insert_with<F>(&mut self, key: &str, make_value: F) -> Result<bool, InsertError>
    where
        F: FnOnce() -> V,
    {
        if self.entries.len() == I::CAPACITY {
            warn!(
                "ordered string map full at {} entries, rejecting key {:?}",
                I::CAPACITY,
                key
            );
            return Err(InsertError::Full {
                capacity: I::CAPACITY,
            });
        }

        // Grow before probing: a rehash would invalidate the vacant bucket.
        if self.entries.len() + 1 > self.buckets.len() / 2 {
            self.grow();
        }

        let key_hash = self.hash_key(key);
        match self.buckets.probe(&self.entries, key, key_hash) {
            Probe::Found(_) => Ok(false),
            Probe::Vacant(bucket) => {
                let index = self.entries.len();
                self.entries.push(Entry::new(key, key_hash, make_value()));
                self.buckets.occupy(bucket, index);
                Ok(true)
            }
        }
    }

    fn grow(&mut self) {
        let old = self.buckets.len();
        let new = (2 * old).max(Self::MIN_BUCKETS);
        debug!(
            "growing bucket table from {} to {} buckets ({} entries)",
            old,
            new,
            self.entries.len()
        );
        self.buckets.rehash(&self.entries, new);
        self.entries.reserve(self.entries.len());
    }

    /// Removes every entry. An allocated bucket table shrinks back to its
    /// minimum size; storage is retained.
    pub fn clear(&mut self) {
        if self.buckets.is_allocated() {
            debug!(
                "clearing {} entries, resetting bucket table to {} buckets",
                self.entries.len(),
                Self::MIN_BUCKETS
            );
            self.buckets.reset(Self::MIN_BUCKETS);
        }
        self.entries.clear();
    }

    pub fn iter(&self) -> Iter<'_, V, I> {
        Iter {
            it: self.entries.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V, I> {
        IterMut {
            it: self.entries.iter_mut(),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator + '_ {
        self.entries.iter().map(Entry::key)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.entries.iter().map(Entry::value)
    }

    pub fn values_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator + '_ {
        self.entries.iter_mut().map(Entry::value_mut)
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let buckets = self.buckets.len();
        if buckets == 0 {
            assert!(self.entries.is_empty());
            return;
        }
        assert!(buckets.is_power_of_two());
        assert!(buckets >= 2 * self.entries.len());
        assert_eq!(self.buckets.used(), self.entries.len());
        for (i, e) in self.entries.iter().enumerate() {
            assert_eq!(e.key_hash(), self.hash_key(e.key()));
            assert_eq!(
                self.buckets.probe(&self.entries, e.key(), e.key_hash()),
                Probe::Found(i)
            );
        }
    }
}

/// Positional access; panics if `index >= len()`.
impl<V, I, S, const MIN_BUCKETS_LOG2: u32> Index<usize>
    for OrderedStringMap<V, I, S, MIN_BUCKETS_LOG2>
where
    I: MapIndex,
{
    type Output = V;

    fn index(&self, index: usize) -> &V {
        self.entries[index].value()
    }
}

impl<V, I, S, const MIN_BUCKETS_LOG2: u32> IndexMut<usize>
    for OrderedStringMap<V, I, S, MIN_BUCKETS_LOG2>
where
    I: MapIndex,
{
    fn index_mut(&mut self, index: usize) -> &mut V {
        self.entries[index].value_mut()
    }
}

impl<V, I, S, const MIN_BUCKETS_LOG2: u32> fmt::Debug for OrderedStringMap<V, I, S, MIN_BUCKETS_LOG2>
where
    V: fmt::Debug,
    I: MapIndex,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(Entry::pair)).finish()
    }
}

/// Iterator over `(key, value)` in insertion order.
pub struct Iter<'a, V, I> {
    it: core::slice::Iter<'a, Entry<V, I>>,
}

impl<'a, V, I: MapIndex> Iterator for Iter<'a, V, I> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(Entry::pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, V, I: MapIndex> DoubleEndedIterator for Iter<'a, V, I> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.next_back().map(Entry::pair)
    }
}

impl<'a, V, I: MapIndex> ExactSizeIterator for Iter<'a, V, I> {}

/// Iterator over `(key, &mut value)` in insertion order.
pub struct IterMut<'a, V, I> {
    it: core::slice::IterMut<'a, Entry<V, I>>,
}

impl<'a, V, I: MapIndex> Iterator for IterMut<'a, V, I> {
    type Item = (&'a str, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(Entry::pair_mut)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, V, I: MapIndex> DoubleEndedIterator for IterMut<'a, V, I> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.next_back().map(Entry::pair_mut)
    }
}

impl<'a, V, I: MapIndex> ExactSizeIterator for IterMut<'a, V, I> {}

impl<'a, V, I, S, const MIN_BUCKETS_LOG2: u32> IntoIterator
    for &'a OrderedStringMap<V, I, S, MIN_BUCKETS_LOG2>
where
    I: MapIndex,
    S: BuildHasher,
{
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V, I, S, const MIN_BUCKETS_LOG2: u32> IntoIterator
    for &'a mut OrderedStringMap<V, I, S, MIN_BUCKETS_LOG2>
where
    I: MapIndex,
    S: BuildHasher,
{
    type Item = (&'a str, &'a mut V);
    type IntoIter = IterMut<'a, V, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
