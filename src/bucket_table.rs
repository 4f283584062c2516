//! Open-addressing index over the entry log.
//!
//! Buckets hold entry positions, never keys. A lookup starts at
//! `hash & mask` and advances by 1, 2, 3, ... slots (triangular numbers),
//! which visits every slot of a power-of-two table. The owner keeps the
//! table at most half full, so every probe ends at an unused bucket.

use crate::entry::Entry;
use crate::index::MapIndex;

#[derive(Clone, Copy, Debug)]
struct Bucket<I> {
    entry_index: I,
}

impl<I: MapIndex> Bucket<I> {
    const UNUSED: Self = Bucket {
        entry_index: I::UNUSED,
    };

    #[inline]
    fn is_used(&self) -> bool {
        self.entry_index != I::UNUSED
    }
}

/// Outcome of probing for a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Probe {
    /// A used bucket whose entry matches; carries the entry position.
    Found(usize),
    /// First unused bucket on the probe path.
    Vacant(usize),
}

#[derive(Clone, Debug)]
pub(crate) struct BucketTable<I> {
    buckets: Vec<Bucket<I>>,
}

impl<I: MapIndex> BucketTable<I> {
    pub(crate) const fn new() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub(crate) fn is_allocated(&self) -> bool {
        !self.buckets.is_empty()
    }

    /// Probes for `key`. The table must be allocated.
    pub(crate) fn probe<V>(&self, entries: &[Entry<V, I>], key: &str, key_hash: I) -> Probe {
        debug_assert!(self.is_allocated());
        let mask = self.buckets.len() - 1;
        let mut pos = key_hash.to_usize() & mask;
        let mut step = 0;
        loop {
            let bucket = self.buckets[pos];
            if !bucket.is_used() {
                return Probe::Vacant(pos);
            }
            let index = bucket.entry_index.to_usize();
            if entries[index].matches(key, key_hash) {
                return Probe::Found(index);
            }
            step += 1;
            pos = (pos + step) & mask;
        }
    }

    /// Stores `entry_index` in the bucket returned by `Probe::Vacant`.
    #[inline]
    pub(crate) fn occupy(&mut self, bucket: usize, entry_index: usize) {
        debug_assert!(!self.buckets[bucket].is_used());
        self.buckets[bucket].entry_index = I::from_usize(entry_index);
    }

    /// Rebuilds the table with `bucket_count` slots, replaying `entries` in
    /// log order with their cached hashes. A no-op if the size is unchanged.
    pub(crate) fn rehash<V>(&mut self, entries: &[Entry<V, I>], bucket_count: usize) {
        debug_assert!(bucket_count.is_power_of_two());
        debug_assert!(bucket_count >= 2 * entries.len());
        if self.buckets.len() == bucket_count {
            return;
        }

        self.buckets.clear();
        self.buckets.resize(bucket_count, Bucket::UNUSED);

        let mask = bucket_count - 1;
        for (index, entry) in entries.iter().enumerate() {
            let mut pos = entry.key_hash().to_usize() & mask;
            let mut step = 0;
            while self.buckets[pos].is_used() {
                step += 1;
                pos = (pos + step) & mask;
            }
            self.buckets[pos].entry_index = I::from_usize(index);
        }
    }

    /// Shrinks to `bucket_count` slots, all unused, keeping the allocation.
    pub(crate) fn reset(&mut self, bucket_count: usize) {
        debug_assert!(bucket_count.is_power_of_two());
        self.buckets.clear();
        self.buckets.resize(bucket_count, Bucket::UNUSED);
    }

    #[cfg(test)]
    pub(crate) fn used(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_used()).count()
    }
}
