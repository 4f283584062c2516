//! Records of the entry log.

use crate::index::MapIndex;
use crate::small_string::SmallString;

/// One key/value record, owned by the map's entry log.
///
/// Key and hash are fixed once the entry is appended; the value can be
/// mutated in place.
#[derive(Clone, Debug)]
pub struct Entry<V, I = u32> {
    key: SmallString<16>,
    key_hash: I,
    value: V,
}

impl<V, I: MapIndex> Entry<V, I> {
    pub(crate) fn new(key: &str, key_hash: I, value: V) -> Self {
        Self {
            key: SmallString::from(key),
            key_hash,
            value,
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Hash computed when the entry was inserted; reused on every rehash.
    #[inline]
    pub fn key_hash(&self) -> I {
        self.key_hash
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    #[inline]
    pub(crate) fn matches(&self, key: &str, key_hash: I) -> bool {
        self.key_hash == key_hash && self.key.as_str() == key
    }

    pub(crate) fn pair(&self) -> (&str, &V) {
        (self.key.as_str(), &self.value)
    }

    pub(crate) fn pair_mut(&mut self) -> (&str, &mut V) {
        (self.key.as_str(), &mut self.value)
    }
}
