//! Core cell data structures.
//!
//! This module provides the quad-edge cell representation and the edits that
//! change its topology.
//!
//! # Overview
//!
//! The primary type is [`Cell`], a closed orientable surface stored as a
//! quad-edge structure. Every undirected edge is kept as four directed
//! records: the edge, its dual, its reverse and the reverse of its dual. The
//! same records therefore describe the primal graph (vertices joined by
//! edges) and its dual (faces joined across edges), and every adjacency
//! query is O(1).
//!
//! # Index Types
//!
//! Cell elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`FaceId`] - Identifies a face
//! - [`EdgeId`] - Identifies a directed edge record
//! - [`FaceVertex`] - Either of the first two
//!
//! # Construction
//!
//! Cells start from the tetrahedron or from face-vertex lists:
//!
//! ```
//! use casson::mesh::{build_from_polygons, Cell};
//! use nalgebra::Point3;
//!
//! let tetra = Cell::primitive();
//!
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//! let faces: Vec<Vec<usize>> = vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![2, 0, 3]];
//! let cell = build_from_polygons(&positions, &faces).unwrap();
//!
//! assert_eq!(cell.num_edges(), tetra.num_edges());
//! ```
//!
//! # Editing
//!
//! [`Cell::make_vertex_edge`] and [`Cell::make_face_edge`] grow the cell by
//! one edge; [`Cell::kill_vertex_edge`] and [`Cell::kill_face_edge`] undo
//! them. All four keep the Euler characteristic at 2.

mod builder;
mod cell;
mod index;
mod quadedge;
mod topology;

pub use builder::{build_from_polygons, to_face_loops};
pub use cell::{Cell, Face, FaceLoopIter, RingIter, Vertex};
pub use index::{EdgeId, FaceId, FaceVertex, VertexId};
pub use quadedge::{CollisionFade, EdgeData, Record};
