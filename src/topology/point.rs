//! `VertexId`, `EdgeId`, `FaceId`: strong, zero-cost handles for mesh entities
//!
//! Every element of a polygon mesh is addressed by a dense index, the same
//! index a host editor shows for it. Each kind gets its own newtype so a face
//! index can never be passed where an edge index is expected.
//!
//! This module provides:
//! - Transparent `u32` newtypes with the same size and alignment as `u32`.
//! - Constructors and accessors, plus `index()` for slice lookups.
//! - Implementations of common traits (`Debug`, `Display`, ordering,
//!   hashing, serde) so ids can be used in maps, sets, and printed easily.

use std::fmt;

macro_rules! mesh_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates a new id from its raw index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            /// Returns the raw `u32` value of this id.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Returns the id as a slice index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        /// Prints the numeric index without any wrapper text.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(raw: u32) -> Self {
                $name(raw)
            }
        }
    };
}

mesh_id!(
    /// Handle of a mesh vertex.
    VertexId
);
mesh_id!(
    /// Handle of a mesh edge.
    EdgeId
);
mesh_id!(
    /// Handle of a mesh face (polygon).
    FaceId
);

/// Converts a dense index into a `u32`-backed id.
///
/// Meshes are limited to `u32::MAX` entities of each kind; builders check the
/// count before they start handing out ids.
#[inline]
pub(crate) fn id_from_index<T: From<u32>>(index: usize) -> T {
    debug_assert!(index <= u32::MAX as usize);
    T::from(index as u32)
}
