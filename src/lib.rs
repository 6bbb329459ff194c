//! # Casson
//!
//! A topological mesh kernel for editing closed surfaces.
//!
//! Casson stores a closed orientable surface as a quad-edge cell: a graph
//! embedded on the surface together with its dual. Vertices and faces are
//! interchangeable through the dual, so one pair of edits (split and rejoin)
//! both grows vertices into edges and subdivides faces.
//!
//! ## Features
//!
//! - **Quad-edge data structure**: O(1) traversal of vertex and face rings
//! - **Euler operators**: make/kill vertex and face edges, all invertible
//! - **OBJ I/O**: load and save polygon surfaces
//! - **Traversal agents**: objects that travel around face boundaries
//!
//! ## Quick Start
//!
//! ```
//! use casson::prelude::*;
//!
//! // Start from the tetrahedron
//! let mut cell = Cell::primitive();
//!
//! // Split vertex 0 between faces 1 and 2
//! let v0 = VertexId::new(0);
//! let e = cell
//!     .make_vertex_edge(v0, FaceId::new(1), FaceId::new(2))
//!     .unwrap()
//!     .unwrap();
//!
//! // Undo it
//! let new = cell.dest_vertex(e).unwrap();
//! cell.kill_vertex_edge(new, FaceId::new(1), FaceId::new(2)).unwrap();
//! assert_eq!(cell.num_vertices(), 4);
//! ```
//!
//! ## Cell Traversal
//!
//! ```
//! use casson::prelude::*;
//!
//! let cell = Cell::primitive();
//!
//! // Edges leaving a vertex, counterclockwise
//! let v = VertexId::new(0);
//! for e in cell.ring(v.into()) {
//!     println!("{:?} -> {:?}", e, cell.dest_vertex(e));
//! }
//!
//! // Corners of a face
//! let f = FaceId::new(0);
//! let corners: Vec<_> = cell.face_vertices(f).collect();
//! assert_eq!(corners.len(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod io;
pub mod mesh;
pub mod traverse;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use casson::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, to_face_loops, Cell, EdgeId, FaceId, FaceVertex, VertexId,
    };
    pub use crate::traverse::{SimulationState, Traverser, TraverserOptions};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_tetrahedron() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];

        let faces: Vec<[usize; 3]> = vec![
            [0, 2, 1], // bottom
            [0, 1, 3], // front
            [1, 2, 3], // right
            [2, 0, 3], // left
        ];

        let cell = build_from_polygons(&vertices, &faces).unwrap();

        assert_eq!(cell.num_vertices(), 4);
        assert_eq!(cell.num_faces(), 4);
        assert_eq!(cell.num_edges(), 6);
        assert!(cell.is_valid());

        for v in cell.vertex_ids() {
            assert_eq!(cell.valence(v.into()), 3, "vertex {:?} should have degree 3", v);
        }
    }

    #[test]
    fn test_grow_and_shrink() {
        let mut cell = Cell::primitive();
        let mut made = Vec::new();

        for f in [0, 1, 2, 3].map(FaceId::new) {
            let bound = cell.bound_edges(f);
            let a = cell.orig_vertex(bound[0]).unwrap();
            let c = cell.dest_vertex(bound[1]).unwrap();
            let e = cell.make_face_edge(f, a, c).unwrap();
            made.push((cell.right_face(e).unwrap(), a, c));
        }
        assert_eq!(cell.num_faces(), 8);
        assert_eq!(cell.euler_characteristic(), 2);

        for (f, a, c) in made.into_iter().rev() {
            cell.kill_face_edge(f, a, c).unwrap();
        }
        assert_eq!(cell.num_faces(), 4);
        assert_eq!(cell.num_edges(), 6);
        assert!(cell.is_valid());
    }
}
