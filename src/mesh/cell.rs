//! The cell: a closed quad-edge surface.
//!
//! A [`Cell`] owns three arenas (vertices, quads and faces) and is the only
//! place elements are created or destroyed. Removed elements leave a
//! tombstone behind; their ids are never handed out again.

use nalgebra::Point3;

use super::index::{EdgeId, FaceId, FaceVertex, VertexId};
use super::quadedge::Quad;
use crate::error::{MeshError, Result};

/// A vertex of the cell.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// One edge leaving this vertex. Every other edge leaving it is reached
    /// by repeated `onext`.
    pub(crate) edge_list_head: EdgeId,
}

impl Vertex {
    /// Create a new unlinked vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            edge_list_head: EdgeId::invalid(),
        }
    }
}

/// A face of the cell.
#[derive(Debug, Clone, Default)]
pub struct Face {
    /// One dual edge leaving this face. Its `rot` is a boundary edge with
    /// the face on its left.
    pub(crate) edge_list_head: EdgeId,
}

/// A quad-edge cell: a graph embedded on a closed orientable surface
/// together with its dual.
///
/// The arenas only grow. Every removed vertex, edge or face leaves an empty
/// slot behind, so whole-cell scans (`edge_ids`, `two_way_count`,
/// `is_valid`) cost time proportional to every element ever created, not
/// just the live ones.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub(crate) vertices: Vec<Option<Vertex>>,
    pub(crate) quads: Vec<Option<Quad>>,
    pub(crate) faces: Vec<Option<Face>>,
    live_vertices: usize,
    live_edges: usize,
    live_faces: usize,
}

impl Cell {
    /// Create a new empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_edges: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            quads: Vec::with_capacity(num_edges),
            faces: Vec::with_capacity(num_faces),
            ..Self::default()
        }
    }

    // ==================== Counts ====================

    /// Number of live vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.live_vertices
    }

    /// Number of live undirected edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.live_edges
    }

    /// Number of live faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.live_faces
    }

    /// `|V| - |E| + |F|`, 2 for a sphere.
    pub fn euler_characteristic(&self) -> i64 {
        self.live_vertices as i64 - self.live_edges as i64 + self.live_faces as i64
    }

    // ==================== Element access ====================

    /// Whether `v` names a live vertex.
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        matches!(self.vertices.get(v.index()), Some(Some(_)))
    }

    /// Whether `f` names a live face.
    pub fn contains_face(&self, f: FaceId) -> bool {
        matches!(self.faces.get(f.index()), Some(Some(_)))
    }

    /// Whether `e` is one of the directed edges of a live quad.
    pub fn contains_edge(&self, e: EdgeId) -> bool {
        matches!(self.quads.get(e.quad()), Some(Some(_)))
    }

    /// Whether `fv` names a live vertex or face.
    pub fn contains(&self, fv: FaceVertex) -> bool {
        match fv {
            FaceVertex::Vertex(v) => self.contains_vertex(v),
            FaceVertex::Face(f) => self.contains_face(f),
        }
    }

    /// Get a vertex by ID.
    ///
    /// # Panics
    /// Panics if the vertex was removed.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        match self.vertices.get(id.index()).and_then(Option::as_ref) {
            Some(v) => v,
            None => panic!("{:?} is not a live vertex of this cell", id),
        }
    }

    /// Get a mutable vertex by ID.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        match self.vertices.get_mut(id.index()).and_then(Option::as_mut) {
            Some(v) => v,
            None => panic!("{:?} is not a live vertex of this cell", id),
        }
    }

    /// Get a face by ID.
    ///
    /// # Panics
    /// Panics if the face was removed.
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        match self.faces.get(id.index()).and_then(Option::as_ref) {
            Some(f) => f,
            None => panic!("{:?} is not a live face of this cell", id),
        }
    }

    #[inline]
    fn face_mut(&mut self, id: FaceId) -> &mut Face {
        match self.faces.get_mut(id.index()).and_then(Option::as_mut) {
            Some(f) => f,
            None => panic!("{:?} is not a live face of this cell", id),
        }
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    // ==================== Factories ====================

    /// Add an unlinked vertex at the origin.
    pub fn new_vertex(&mut self) -> VertexId {
        self.add_vertex(Point3::origin())
    }

    /// Add an unlinked vertex at `position`.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Some(Vertex::new(position)));
        self.live_vertices += 1;
        id
    }

    /// Add an unlinked face.
    pub fn new_face(&mut self) -> FaceId {
        let id = FaceId::new(self.faces.len());
        self.faces.push(Some(Face::default()));
        self.live_faces += 1;
        id
    }

    /// Allocate a quad with no origins and no `onext` links and return its
    /// first directed edge. No vertex or face is touched.
    pub fn new_edge(&mut self) -> EdgeId {
        let e = EdgeId::from_parts(self.quads.len(), 0);
        self.quads.push(Some(Quad::default()));
        self.live_edges += 1;
        e
    }

    /// Set the origins of all four records of `e`'s quad at once.
    ///
    /// `onext` links are not touched; this is raw wiring for constructors and
    /// tests, not a topology-preserving edit.
    pub fn connect_edge(
        &mut self,
        e: EdgeId,
        orig: impl Into<FaceVertex>,
        dest: impl Into<FaceVertex>,
        left: impl Into<FaceVertex>,
        right: impl Into<FaceVertex>,
    ) {
        self.set_origin(e, orig.into());
        self.set_origin(e.sym(), dest.into());
        self.set_origin(e.inv_rot(), left.into());
        self.set_origin(e.rot(), right.into());
    }

    pub(crate) fn remove_vertex(&mut self, v: VertexId) {
        if let Some(slot) = self.vertices.get_mut(v.index()) {
            if slot.take().is_some() {
                self.live_vertices -= 1;
            }
        }
    }

    pub(crate) fn remove_face(&mut self, f: FaceId) {
        if let Some(slot) = self.faces.get_mut(f.index()) {
            if slot.take().is_some() {
                self.live_faces -= 1;
            }
        }
    }

    pub(crate) fn remove(&mut self, fv: FaceVertex) {
        match fv {
            FaceVertex::Vertex(v) => self.remove_vertex(v),
            FaceVertex::Face(f) => self.remove_face(f),
        }
    }

    pub(crate) fn remove_edge(&mut self, e: EdgeId) {
        if let Some(slot) = self.quads.get_mut(e.quad()) {
            if slot.take().is_some() {
                self.live_edges -= 1;
            }
        }
    }

    // ==================== Edge list heads ====================

    /// The designated edge leaving `fv`, invalid if it has none yet.
    pub fn edge_list_head(&self, fv: FaceVertex) -> EdgeId {
        match fv {
            FaceVertex::Vertex(v) => self.vertex(v).edge_list_head,
            FaceVertex::Face(f) => self.face(f).edge_list_head,
        }
    }

    /// Make `e` the designated edge of `fv`.
    ///
    /// Fails with [`MeshError::InvalidEdgeReference`] and changes nothing if
    /// `e` does not leave `fv`.
    pub fn set_edge_list_head(&mut self, fv: FaceVertex, e: EdgeId) -> Result<()> {
        if !self.contains_edge(e) || self.orig(e) != Some(fv) {
            return Err(MeshError::InvalidEdgeReference { owner: fv, edge: e });
        }
        self.link_head(fv, e);
        Ok(())
    }

    pub(crate) fn link_head(&mut self, fv: FaceVertex, e: EdgeId) {
        debug_assert_eq!(self.orig(e), Some(fv));
        match fv {
            FaceVertex::Vertex(v) => self.vertex_mut(v).edge_list_head = e,
            FaceVertex::Face(f) => self.face_mut(f).edge_list_head = e,
        }
    }

    // ==================== Iteration ====================

    /// Iterate over live vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_some())
            .map(|(i, _)| VertexId::new(i))
    }

    /// Iterate over live vertices with their IDs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (VertexId::new(i), v)))
    }

    /// Iterate over live face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_some())
            .map(|(i, _)| FaceId::new(i))
    }

    /// Iterate over one directed edge per live undirected edge: the one whose
    /// origin is a vertex.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.quads
            .iter()
            .enumerate()
            .filter(|(_, q)| q.is_some())
            .map(move |(i, _)| self.primal(EdgeId::from_parts(i, 0)))
    }

    /// The directed edge of `e`'s quad that runs between vertices in the
    /// same direction as `e` or its dual.
    pub fn primal(&self, e: EdgeId) -> EdgeId {
        match self.orig(e) {
            Some(FaceVertex::Face(_)) => e.rot(),
            _ => e,
        }
    }

    /// Iterate over the edges leaving `fv`, counterclockwise from its head.
    pub fn ring(&self, fv: FaceVertex) -> RingIter<'_> {
        RingIter::new(self, self.edge_list_head(fv))
    }

    /// Number of edges leaving a vertex, or bounding a face.
    pub fn valence(&self, fv: FaceVertex) -> usize {
        self.ring(fv).count()
    }

    /// Iterate over the boundary of `f` counterclockwise. Every edge has `f`
    /// on its left.
    pub fn face_edges(&self, f: FaceId) -> FaceLoopIter<'_> {
        let head = self.face(f).edge_list_head;
        let start = if head.is_valid() { head.rot() } else { head };
        FaceLoopIter::new(self, start)
    }

    /// The boundary edges of `f` in counterclockwise order, starting at the
    /// `rot` of its edge list head.
    pub fn bound_edges(&self, f: FaceId) -> Vec<EdgeId> {
        self.face_edges(f).collect()
    }

    /// Vertices around `f` in counterclockwise order.
    pub fn face_vertices(&self, f: FaceId) -> impl Iterator<Item = VertexId> + '_ {
        self.face_edges(f).filter_map(move |e| self.orig_vertex(e))
    }

    /// Positions of the vertices around `f`.
    pub fn face_positions(&self, f: FaceId) -> Vec<Point3<f64>> {
        self.face_vertices(f).map(|v| *self.position(v)).collect()
    }

    /// Average of the positions around `f`.
    pub fn face_center(&self, f: FaceId) -> Point3<f64> {
        let positions = self.face_positions(f);
        if positions.is_empty() {
            return Point3::origin();
        }
        let sum = positions
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / positions.len() as f64)
    }

    /// Endpoint positions of a primal edge.
    pub fn edge_endpoints(&self, e: EdgeId) -> Option<(Point3<f64>, Point3<f64>)> {
        let a = self.orig_vertex(e)?;
        let b = self.dest_vertex(e)?;
        Some((*self.position(a), *self.position(b)))
    }

    // ==================== Validation ====================

    /// Check that the cell is a consistent quad-edge structure.
    ///
    /// Every live record has an origin and a live `onext` with the same
    /// origin, `onext` is a permutation whose cycles sweep faces in order
    /// (`right(onext(e)) == left(e)`), and every head leaves its owner and
    /// its ring holds exactly the edges leaving that owner.
    pub fn is_valid(&self) -> bool {
        let mut ring_sizes: std::collections::HashMap<FaceVertex, usize> =
            std::collections::HashMap::new();
        let mut seen = vec![false; self.quads.len() * 4];

        for (qi, quad) in self.quads.iter().enumerate() {
            if quad.is_none() {
                continue;
            }
            for slot in 0..4 {
                let e = EdgeId::from_parts(qi, slot);
                let Some(origin) = self.orig(e) else {
                    return false;
                };
                if !self.contains(origin) {
                    return false;
                }
                let next = self.onext(e);
                if !self.contains_edge(next) || self.orig(next) != Some(origin) {
                    return false;
                }
                if self.right(next) != self.left(e) {
                    return false;
                }
                if std::mem::replace(&mut seen[next.index()], true) {
                    return false;
                }
                *ring_sizes.entry(origin).or_insert(0) += 1;
            }
        }

        let owners = self
            .vertex_ids()
            .map(FaceVertex::Vertex)
            .chain(self.face_ids().map(FaceVertex::Face));
        for fv in owners {
            let head = self.edge_list_head(fv);
            if !self.contains_edge(head) || self.orig(head) != Some(fv) {
                return false;
            }
            let expected = ring_sizes.get(&fv).copied().unwrap_or(0);
            let mut len = 0;
            for e in self.ring(fv) {
                len += 1;
                if len > expected || self.orig(e) != Some(fv) {
                    return false;
                }
            }
            if len != expected {
                return false;
            }
        }

        true
    }
}

/// Iterator over the `onext` ring starting at one edge.
pub struct RingIter<'a> {
    cell: &'a Cell,
    start: EdgeId,
    current: EdgeId,
    done: bool,
}

impl<'a> RingIter<'a> {
    fn new(cell: &'a Cell, start: EdgeId) -> Self {
        Self {
            cell,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl Iterator for RingIter<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.cell.onext(self.current);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

/// Iterator over the `lnext` loop around a face.
pub struct FaceLoopIter<'a> {
    cell: &'a Cell,
    start: EdgeId,
    current: EdgeId,
    done: bool,
}

impl<'a> FaceLoopIter<'a> {
    fn new(cell: &'a Cell, start: EdgeId) -> Self {
        Self {
            cell,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl Iterator for FaceLoopIter<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.cell.lnext(self.current);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}
