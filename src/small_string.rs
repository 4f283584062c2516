//! Owned string that keeps short contents inline.
//!
//! Map keys are usually short identifiers; storing up to `N` bytes in the
//! value itself means inserting such a key allocates nothing. Longer strings
//! fall back to a boxed `str`.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Deref;

#[derive(Clone)]
enum Repr<const N: usize> {
    Inline { len: u8, buf: [u8; N] },
    Heap(Box<str>),
}

/// Owned UTF-8 string with inline storage for up to `N` bytes.
#[derive(Clone)]
pub struct SmallString<const N: usize = 16> {
    repr: Repr<N>,
}

impl<const N: usize> SmallString<N> {
    /// Largest byte length stored inline.
    pub const INLINE_CAPACITY: usize = if N > u8::MAX as usize {
        u8::MAX as usize
    } else {
        N
    };

    pub fn new() -> Self {
        Self {
            repr: Repr::Inline {
                len: 0,
                buf: [0; N],
            },
        }
    }

    pub fn as_str(&self) -> &str {
        match &self.repr {
            Repr::Inline { len, buf } => {
                // SAFETY: `buf[..len]` is a byte-for-byte copy of a `&str`
                // made in `From<&str>`, so it is valid UTF-8.
                unsafe { core::str::from_utf8_unchecked(&buf[..*len as usize]) }
            }
            Repr::Heap(s) => s,
        }
    }

    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the contents live in the value rather than on the heap.
    pub fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline { .. })
    }
}

impl<const N: usize> Default for SmallString<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> From<&str> for SmallString<N> {
    fn from(s: &str) -> Self {
        let bytes = s.as_bytes();
        if bytes.len() <= Self::INLINE_CAPACITY {
            let mut buf = [0; N];
            buf[..bytes.len()].copy_from_slice(bytes);
            Self {
                repr: Repr::Inline {
                    len: bytes.len() as u8,
                    buf,
                },
            }
        } else {
            Self {
                repr: Repr::Heap(s.into()),
            }
        }
    }
}

impl<const N: usize> From<String> for SmallString<N> {
    fn from(s: String) -> Self {
        if s.len() <= Self::INLINE_CAPACITY {
            Self::from(s.as_str())
        } else {
            Self {
                repr: Repr::Heap(s.into_boxed_str()),
            }
        }
    }
}

impl<const N: usize> Deref for SmallString<N> {
    type Target = str;
    #[inline]
    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> AsRef<str> for SmallString<N> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> Borrow<str> for SmallString<N> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> PartialEq for SmallString<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const N: usize> Eq for SmallString<N> {}

impl<const N: usize> PartialEq<str> for SmallString<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for SmallString<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

// Must agree with `str`'s Hash so `Borrow<str>` lookups work.
impl<const N: usize> Hash for SmallString<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl<const N: usize> fmt::Debug for SmallString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for SmallString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}
