//! 1-based vertex indices.

use std::fmt;
use std::num::NonZeroU32;

/// A 1-based index into a mesh's vertex and normal lists.
///
/// Index 1 is the first vertex. Zero is not representable.
///
/// # Example
///
/// ```
/// use mesh_types::VertexIndex;
///
/// let first = VertexIndex::from_zero_based(0).unwrap();
/// assert_eq!(first.get(), 1);
/// assert_eq!(first.to_zero_based(), 0);
/// assert_eq!(first.to_string(), "1");
///
/// assert!(VertexIndex::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexIndex(NonZeroU32);

impl VertexIndex {
    /// The first vertex.
    pub const MIN: Self = Self(NonZeroU32::MIN);

    /// Wrap a 1-based index. Returns `None` for 0.
    #[must_use]
    pub const fn new(one_based: u32) -> Option<Self> {
        match NonZeroU32::new(one_based) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Re-base a 0-based index. Returns `None` if `index + 1` overflows.
    #[must_use]
    pub const fn from_zero_based(index: u32) -> Option<Self> {
        match NonZeroU32::MIN.checked_add(index) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// The 1-based value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// The equivalent 0-based position, for slice access.
    #[must_use]
    pub const fn to_zero_based(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Display for VertexIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
