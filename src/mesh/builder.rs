//! Cell construction utilities.
//!
//! This module builds quad-edge cells from face-vertex lists, as found in
//! mesh file formats, and provides the tetrahedron every editing session
//! starts from.

use std::collections::{HashMap, HashSet};

use nalgebra::Point3;

use super::cell::Cell;
use super::index::{EdgeId, FaceId, FaceVertex, VertexId};
use crate::error::{MeshError, Result};

impl Cell {
    /// The smallest closed cell: a tetrahedron with 4 vertices, 6 edges and
    /// 4 triangular faces, every face wound counterclockwise seen from
    /// outside.
    ///
    /// # Example
    /// ```
    /// use casson::mesh::Cell;
    ///
    /// let cell = Cell::primitive();
    /// assert_eq!(cell.num_vertices(), 4);
    /// assert_eq!(cell.num_edges(), 6);
    /// assert_eq!(cell.num_faces(), 4);
    /// assert!(cell.is_valid());
    /// ```
    pub fn primitive() -> Self {
        let mut cell = Cell::with_capacity(4, 6, 4);

        let v = [
            cell.add_vertex(Point3::new(0.0, 0.0, 40.0)),
            cell.add_vertex(Point3::new(30.0, 0.0, 0.0)),
            cell.add_vertex(Point3::new(-20.0, -20.0, 0.0)),
            cell.add_vertex(Point3::new(-20.0, 20.0, 0.0)),
        ];
        let f = [
            cell.new_face(),
            cell.new_face(),
            cell.new_face(),
            cell.new_face(),
        ];

        // (orig, dest, left, right)
        let wiring = [
            (0, 1, 1, 2),
            (0, 2, 2, 3),
            (0, 3, 3, 1),
            (1, 2, 0, 2),
            (2, 3, 0, 3),
            (3, 1, 0, 1),
        ];
        let mut e = [EdgeId::invalid(); 6];
        for (slot, &(o, d, l, r)) in e.iter_mut().zip(wiring.iter()) {
            *slot = cell.new_edge();
            cell.connect_edge(*slot, v[o], v[d], f[l], f[r]);
        }

        link_face_loop(&mut cell, f[0], &[e[3], e[4], e[5]]);
        link_face_loop(&mut cell, f[1], &[e[0], e[5].sym(), e[2].sym()]);
        link_face_loop(&mut cell, f[2], &[e[1], e[3].sym(), e[0].sym()]);
        link_face_loop(&mut cell, f[3], &[e[2], e[4].sym(), e[1].sym()]);

        for (&vertex, head) in v.iter().zip([e[0], e[3], e[4], e[5]]) {
            cell.link_head(vertex.into(), head);
        }

        cell
    }
}

/// Wire the `onext` links of one face boundary, given counterclockwise with
/// the face on the left of every edge, and make the face point at it.
///
/// For consecutive edges `p`, `e`: `e` follows `sym(p)` around their shared
/// vertex, and `inv_rot(e)` follows `inv_rot(p)` around the face.
fn link_face_loop(cell: &mut Cell, face: FaceId, boundary: &[EdgeId]) {
    let n = boundary.len();
    for i in 0..n {
        let p = boundary[(i + n - 1) % n];
        let e = boundary[i];
        cell.set_onext(e, p.sym());
        cell.set_onext(p.inv_rot(), e.inv_rot());
    }
    if let Some(&first) = boundary.first() {
        cell.link_head(face.into(), first.inv_rot());
    }
}

/// Build a cell from vertex positions and polygon faces.
///
/// Every face is a loop of vertex indices listed counterclockwise seen from
/// outside. The input must describe a closed, consistently oriented
/// 2-manifold; violations that can be detected cheaply are reported as
/// errors instead of producing a corrupt cell.
///
/// # Arguments
/// * `positions` - List of vertex positions
/// * `faces` - List of faces, each a loop of at least 3 vertex indices
///
/// # Example
/// ```
/// use casson::mesh::build_from_polygons;
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
///     Point3::new(0.5, 0.5, 1.0),
/// ];
/// let faces: Vec<[usize; 3]> = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
///
/// let cell = build_from_polygons(&positions, &faces).unwrap();
/// assert_eq!(cell.num_edges(), 6);
/// assert_eq!(cell.euler_characteristic(), 2);
/// ```
pub fn build_from_polygons<F: AsRef<[usize]>>(
    positions: &[Point3<f64>],
    faces: &[F],
) -> Result<Cell> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    // Validate loops
    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        if face.len() < 3 {
            return Err(MeshError::DegenerateFace { face: fi });
        }
        for (i, &vi) in face.iter().enumerate() {
            if vi >= positions.len() {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
            if vi == face[(i + 1) % face.len()] {
                return Err(MeshError::DegenerateFace { face: fi });
            }
        }
    }

    // Every directed edge once, and its reverse present
    let mut directed: HashSet<(usize, usize)> = HashSet::new();
    let mut out_degree = vec![0usize; positions.len()];
    for face in faces {
        for (a, b) in loop_pairs(face.as_ref()) {
            if !directed.insert((a, b)) {
                return Err(MeshError::NonManifoldEdge { v0: a, v1: b });
            }
            out_degree[a] += 1;
        }
    }
    for &(a, b) in &directed {
        if !directed.contains(&(b, a)) {
            return Err(MeshError::NonManifold {
                details: format!("edge ({}, {}) has only one incident face", a, b),
            });
        }
    }
    if let Some(unused) = out_degree.iter().position(|&d| d == 0) {
        return Err(MeshError::NonManifold {
            details: format!("vertex {} is not used by any face", unused),
        });
    }

    let mut cell = Cell::with_capacity(positions.len(), directed.len() / 2, faces.len());
    let vertex_ids: Vec<VertexId> = positions.iter().map(|&p| cell.add_vertex(p)).collect();

    // Catalog of directed edges keyed by (origin, destination)
    let mut catalog: HashMap<(usize, usize), EdgeId> = HashMap::with_capacity(directed.len());
    let mut loops: Vec<(FaceId, Vec<EdgeId>)> = Vec::with_capacity(faces.len());

    for face in faces {
        let face_id = cell.new_face();
        let mut boundary = Vec::with_capacity(face.as_ref().len());

        for (a, b) in loop_pairs(face.as_ref()) {
            let e = match catalog.get(&(b, a)) {
                Some(&twin) => twin.sym(),
                None => {
                    let e = cell.new_edge();
                    cell.set_origin(e, vertex_ids[a].into());
                    cell.set_origin(e.sym(), vertex_ids[b].into());
                    e
                }
            };
            cell.set_origin(e.inv_rot(), face_id.into());
            catalog.insert((a, b), e);
            boundary.push(e);
        }

        loops.push((face_id, boundary));
    }

    for (face_id, boundary) in &loops {
        link_face_loop(&mut cell, *face_id, boundary);
        for &e in boundary {
            if let Some(FaceVertex::Vertex(v)) = cell.orig(e) {
                cell.link_head(v.into(), e);
            }
        }
    }

    // A vertex whose faces form more than one fan has a short ring
    for (i, &v) in vertex_ids.iter().enumerate() {
        if cell.valence(v.into()) != out_degree[i] {
            return Err(MeshError::NonManifold {
                details: format!("faces around vertex {} do not form a single fan", i),
            });
        }
    }

    log::info!(
        "built cell: {} vertices, {} edges, {} faces",
        cell.num_vertices(),
        cell.num_edges(),
        cell.num_faces()
    );

    Ok(cell)
}

/// Consecutive `(from, to)` index pairs around a closed loop.
fn loop_pairs(face: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    face.iter()
        .zip(face.iter().cycle().skip(1))
        .map(|(&a, &b)| (a, b))
}

/// Convert a cell back to a face-vertex representation.
///
/// Live vertices are renumbered densely in id order. Returns
/// `(positions, faces)` with every face listed counterclockwise.
pub fn to_face_loops(cell: &Cell) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let mut dense: HashMap<VertexId, usize> = HashMap::with_capacity(cell.num_vertices());
    let mut positions = Vec::with_capacity(cell.num_vertices());
    for (id, vertex) in cell.vertices() {
        dense.insert(id, positions.len());
        positions.push(vertex.position);
    }

    let faces = cell
        .face_ids()
        .map(|f| cell.face_vertices(f).filter_map(|v| dense.get(&v).copied()).collect())
        .collect();

    (positions, faces)
}
