//! Index types for triangulation elements.
//!
//! This module provides type-safe index wrappers for points, half-edges, and triangles.
//! The indices are generic over the underlying integer type so that a triangulation can
//! be stored compactly (u16 for small meshes, u32 for typical meshes, u64 for massive meshes).
//!
//! Half-edge storage uses a reserved sentinel value for "no twin". The sentinel never
//! leaves the crate: accessors translate it to `None`.

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// Trait for types that can be used as mesh indices.
///
/// This trait is implemented for `u16`, `u32`, and `u64`, allowing users to choose
/// the appropriate index size for their triangulation.
pub trait MeshIndex:
    Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static
{
    /// The maximum valid index value.
    const MAX: Self;

    /// Storage sentinel for an absent index.
    const INVALID: Self;

    /// Convert from usize, returning `None` if the value does not fit.
    fn try_from_usize(v: usize) -> Option<Self>;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Convert from usize. Values too large for this index type map to the
    /// sentinel, which every accessor rejects as out of range.
    #[inline]
    fn from_usize(v: usize) -> Self {
        Self::try_from_usize(v).unwrap_or(Self::INVALID)
    }

    /// Check if this is a valid (non-sentinel) index.
    #[inline]
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! impl_mesh_index {
    ($t:ty) => {
        impl MeshIndex for $t {
            const MAX: Self = <$t>::MAX - 1;
            const INVALID: Self = <$t>::MAX;

            #[inline]
            fn try_from_usize(v: usize) -> Option<Self> {
                <$t>::try_from(v).ok().filter(|&i| i <= Self::MAX)
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }
        }
    };
}

impl_mesh_index!(u16);
impl_mesh_index!(u32);
impl_mesh_index!(u64);

/// A type-safe point index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct PointId<I: MeshIndex = u32>(I);

/// A type-safe half-edge index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId<I: MeshIndex = u32>(I);

/// A type-safe triangle index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TriangleId<I: MeshIndex = u32>(I);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create a new index from a raw value.
            ///
            /// A value that does not fit `I` yields an id that no triangulation
            /// contains, so queries with it fail with an out-of-range error. Use
            /// [`Self::try_new`] to detect that case up front.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// Create a new index, or `None` if the value does not fit `I`.
            #[inline]
            pub fn try_new(index: usize) -> Option<Self> {
                I::try_from_usize(index).map(Self)
            }

            /// Storage sentinel.
            #[inline]
            pub(crate) fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// Get the raw value of the underlying type.
            #[inline]
            pub fn raw(self) -> I {
                self.0
            }

            #[inline]
            pub(crate) fn is_valid(self) -> bool {
                self.0.is_valid()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.index())
                } else {
                    write!(f, "{}(NONE)", $display)
                }
            }
        }

        impl<I: MeshIndex> Display for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.index())
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(PointId, "P");
impl_index_type!(HalfEdgeId, "HE");
impl_index_type!(TriangleId, "T");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_id() {
        let p: PointId = PointId::new(42);
        assert_eq!(p.index(), 42);
        assert!(p.is_valid());

        let none: PointId = PointId::invalid();
        assert!(!none.is_valid());
    }

    #[test]
    fn test_type_safety() {
        // These are different types and cannot be mixed
        let p: PointId = PointId::new(0);
        let he: HalfEdgeId = HalfEdgeId::new(0);
        let t: TriangleId = TriangleId::new(0);

        assert_eq!(p.index(), he.index());
        assert_eq!(he.index(), t.index());
    }

    #[test]
    fn test_try_from_usize() {
        assert_eq!(u16::try_from_usize(1000), Some(1000));
        assert_eq!(u16::try_from_usize(u16::MAX as usize), None);
        assert_eq!(u16::try_from_usize(70_000), None);
        assert_eq!(u64::try_from_usize(70_000), Some(70_000));
    }

    #[test]
    fn test_oversized_id() {
        let he = HalfEdgeId::<u16>::new(70_000);
        assert!(!he.is_valid());
        assert_eq!(HalfEdgeId::<u16>::try_new(70_000), None);
        assert_eq!(HalfEdgeId::<u16>::try_new(7), Some(HalfEdgeId::new(7)));
        assert_eq!(PointId::<u32>::try_new(70_000).map(PointId::index), Some(70_000));
    }

    #[test]
    fn test_debug_format() {
        let he: HalfEdgeId = HalfEdgeId::new(42);
        assert_eq!(format!("{:?}", he), "HE(42)");
        assert_eq!(format!("{}", he), "42");

        let none: HalfEdgeId = HalfEdgeId::invalid();
        assert_eq!(format!("{:?}", none), "HE(NONE)");
    }
}
