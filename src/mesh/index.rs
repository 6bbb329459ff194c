//! Index types for cell elements.
//!
//! Vertices, faces and directed edges are addressed by small `u32` wrappers.
//! A directed edge id also encodes its position inside the four-record
//! rotation group it belongs to, which makes `rot`, `sym` and `inv_rot`
//! plain index arithmetic.

use std::fmt::{self, Debug};

const INVALID: u32 = u32::MAX;

/// A type-safe vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId(u32);

/// A type-safe face index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId(u32);

/// A type-safe directed edge index.
///
/// The raw value is `4 * quad + slot`: the four directed edges of one
/// undirected edge (the edge, its dual, its reverse and the reverse of its
/// dual) occupy four consecutive slots.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId(u32);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create a new index from a raw value.
            ///
            /// # Panics
            /// Panics in debug builds if the value does not fit in a `u32`.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index < INVALID as usize, "index {} too large", index);
                Self(index as u32)
            }

            /// Create an invalid/null index.
            #[inline]
            pub fn invalid() -> Self {
                Self(INVALID)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Check if this is a valid (non-null) index.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0 != INVALID
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.index())
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl From<usize> for $name {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(VertexId, "V");
impl_index_type!(FaceId, "F");
impl_index_type!(EdgeId, "E");

impl EdgeId {
    /// Build the id of record `slot` (0..4) of rotation group `quad`.
    #[inline]
    pub fn from_parts(quad: usize, slot: usize) -> Self {
        debug_assert!(slot < 4);
        Self::new(quad * 4 + slot)
    }

    /// The rotation group (undirected edge unit) this edge belongs to.
    #[inline]
    pub fn quad(self) -> usize {
        self.index() >> 2
    }

    /// Position of this edge within its rotation group.
    #[inline]
    pub fn slot(self) -> usize {
        self.index() & 3
    }

    #[inline]
    fn rotated(self, k: u32) -> Self {
        Self((self.0 & !3) | (self.0.wrapping_add(k) & 3))
    }

    /// The dual edge, rotated 90° counterclockwise. It runs from the right
    /// element of this edge to the left one.
    #[inline]
    pub fn rot(self) -> Self {
        self.rotated(1)
    }

    /// The same undirected edge traversed in the opposite direction.
    #[inline]
    pub fn sym(self) -> Self {
        self.rotated(2)
    }

    /// The dual edge rotated 90° clockwise (`rot` applied three times).
    #[inline]
    pub fn inv_rot(self) -> Self {
        self.rotated(3)
    }
}

/// A vertex or a face.
///
/// A vertex of the primal graph is a face of the dual graph and vice versa,
/// so every directed edge has an origin, destination, left and right that
/// are each one of these. Split and rejoin are written once against this
/// type and serve both graphs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FaceVertex {
    /// A vertex of the primal graph.
    Vertex(VertexId),
    /// A face of the primal graph.
    Face(FaceId),
}

impl FaceVertex {
    /// The vertex, if this is one.
    #[inline]
    pub fn as_vertex(self) -> Option<VertexId> {
        match self {
            FaceVertex::Vertex(v) => Some(v),
            FaceVertex::Face(_) => None,
        }
    }

    /// The face, if this is one.
    #[inline]
    pub fn as_face(self) -> Option<FaceId> {
        match self {
            FaceVertex::Face(f) => Some(f),
            FaceVertex::Vertex(_) => None,
        }
    }

    /// Whether this is a vertex.
    #[inline]
    pub fn is_vertex(self) -> bool {
        matches!(self, FaceVertex::Vertex(_))
    }

    /// Whether `self` and `other` are both vertices or both faces.
    #[inline]
    pub fn same_kind(self, other: FaceVertex) -> bool {
        self.is_vertex() == other.is_vertex()
    }
}

impl From<VertexId> for FaceVertex {
    fn from(v: VertexId) -> Self {
        FaceVertex::Vertex(v)
    }
}

impl From<FaceId> for FaceVertex {
    fn from(f: FaceId) -> Self {
        FaceVertex::Face(f)
    }
}
