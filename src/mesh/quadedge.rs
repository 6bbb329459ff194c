//! Quad-edge records and traversal.
//!
//! Every undirected edge of the cell is stored as one [`Quad`]: four
//! rotation records for the edge, its dual, its reverse and the reverse of
//! its dual. A record stores only its origin and `onext`, the next directed
//! edge counterclockwise around that origin. Destination, left and right are
//! read off the other records of the same quad, so they can never disagree
//! with the origins.
//!
//! ```text
//!            left
//!             ^
//!             | inv_rot
//!   orig ---------> dest
//!             | rot
//!             v ... points from right to left
//!           right
//! ```
//!
//! The eight traversal operators are fixed compositions of `rot` and
//! `onext` and never search.

use super::cell::Cell;
use super::index::{EdgeId, FaceId, FaceVertex, VertexId};

/// One of the four records of a quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// The vertex or face this directed edge leaves. `None` until linked.
    pub origin: Option<FaceVertex>,

    /// The next directed edge counterclockwise around `origin`.
    pub onext: EdgeId,
}

impl Record {
    /// Create an unlinked record.
    pub fn new() -> Self {
        Self {
            origin: None,
            onext: EdgeId::invalid(),
        }
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient collision state an interaction layer attaches to an edge.
///
/// The kernel stores it and never reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionFade {
    /// Phase of the last collision, `-1.0` when none is active.
    pub phase: f64,
    /// Fade velocity.
    pub velocity: f64,
}

impl Default for CollisionFade {
    fn default() -> Self {
        Self {
            phase: -1.0,
            velocity: 0.0,
        }
    }
}

/// Mutable per-edge state owned by collaborators.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeData {
    /// Whether the edge is doubled ("two-way").
    pub two_way: bool,
    /// Collision fade values.
    pub collision: CollisionFade,
}

/// The four rotation records of one undirected edge, plus its edge data.
#[derive(Debug, Clone, Default)]
pub struct Quad {
    /// Records indexed by [`EdgeId::slot`].
    pub records: [Record; 4],
    /// Collaborator state shared by all four directed edges.
    pub data: EdgeData,
}

impl Cell {
    // ==================== Records ====================

    #[inline]
    pub(crate) fn quad(&self, e: EdgeId) -> &Quad {
        match self.quads.get(e.quad()).and_then(Option::as_ref) {
            Some(q) => q,
            None => panic!("{:?} does not belong to a live edge of this cell", e),
        }
    }

    #[inline]
    pub(crate) fn quad_mut(&mut self, e: EdgeId) -> &mut Quad {
        match self.quads.get_mut(e.quad()).and_then(Option::as_mut) {
            Some(q) => q,
            None => panic!("{:?} does not belong to a live edge of this cell", e),
        }
    }

    /// Get the record behind a directed edge.
    ///
    /// # Panics
    /// Panics if the edge was removed or never existed.
    #[inline]
    pub fn record(&self, e: EdgeId) -> &Record {
        &self.quad(e).records[e.slot()]
    }

    #[inline]
    pub(crate) fn set_origin(&mut self, e: EdgeId, origin: FaceVertex) {
        self.quad_mut(e).records[e.slot()].origin = Some(origin);
    }

    #[inline]
    pub(crate) fn set_onext(&mut self, e: EdgeId, next: EdgeId) {
        self.quad_mut(e).records[e.slot()].onext = next;
    }

    // ==================== Endpoints ====================

    /// The origin of `e`.
    #[inline]
    pub fn orig(&self, e: EdgeId) -> Option<FaceVertex> {
        self.record(e).origin
    }

    /// The destination of `e`, the origin of `sym(e)`.
    #[inline]
    pub fn dest(&self, e: EdgeId) -> Option<FaceVertex> {
        self.record(e.sym()).origin
    }

    /// The element to the left of `e`, the origin of `inv_rot(e)`.
    #[inline]
    pub fn left(&self, e: EdgeId) -> Option<FaceVertex> {
        self.record(e.inv_rot()).origin
    }

    /// The element to the right of `e`, the origin of `rot(e)`.
    #[inline]
    pub fn right(&self, e: EdgeId) -> Option<FaceVertex> {
        self.record(e.rot()).origin
    }

    /// The origin of `e` if it is a vertex.
    #[inline]
    pub fn orig_vertex(&self, e: EdgeId) -> Option<VertexId> {
        self.orig(e).and_then(FaceVertex::as_vertex)
    }

    /// The destination of `e` if it is a vertex.
    #[inline]
    pub fn dest_vertex(&self, e: EdgeId) -> Option<VertexId> {
        self.dest(e).and_then(FaceVertex::as_vertex)
    }

    /// The left of `e` if it is a face.
    #[inline]
    pub fn left_face(&self, e: EdgeId) -> Option<FaceId> {
        self.left(e).and_then(FaceVertex::as_face)
    }

    /// The right of `e` if it is a face.
    #[inline]
    pub fn right_face(&self, e: EdgeId) -> Option<FaceId> {
        self.right(e).and_then(FaceVertex::as_face)
    }

    // ==================== Traversal ====================

    /// Next edge counterclockwise around the origin.
    #[inline]
    pub fn onext(&self, e: EdgeId) -> EdgeId {
        self.record(e).onext
    }

    /// Next edge clockwise around the origin.
    #[inline]
    pub fn oprev(&self, e: EdgeId) -> EdgeId {
        self.onext(e.rot()).rot()
    }

    /// Next edge counterclockwise around the destination, pointing into it.
    #[inline]
    pub fn dnext(&self, e: EdgeId) -> EdgeId {
        self.onext(e.sym()).sym()
    }

    /// Next edge clockwise around the destination, pointing into it.
    #[inline]
    pub fn dprev(&self, e: EdgeId) -> EdgeId {
        self.onext(e.inv_rot()).inv_rot()
    }

    /// Next edge counterclockwise around the left face.
    #[inline]
    pub fn lnext(&self, e: EdgeId) -> EdgeId {
        self.onext(e.inv_rot()).rot()
    }

    /// Previous edge counterclockwise around the left face.
    #[inline]
    pub fn lprev(&self, e: EdgeId) -> EdgeId {
        self.onext(e).sym()
    }

    /// Next edge counterclockwise around the right face.
    #[inline]
    pub fn rnext(&self, e: EdgeId) -> EdgeId {
        self.onext(e.rot()).inv_rot()
    }

    /// Previous edge counterclockwise around the right face.
    #[inline]
    pub fn rprev(&self, e: EdgeId) -> EdgeId {
        self.onext(e.sym())
    }

    // ==================== Edge data ====================

    /// Collaborator state of the undirected edge `e` belongs to.
    #[inline]
    pub fn edge_data(&self, e: EdgeId) -> &EdgeData {
        &self.quad(e).data
    }

    /// Mutable collaborator state of the undirected edge `e` belongs to.
    #[inline]
    pub fn edge_data_mut(&mut self, e: EdgeId) -> &mut EdgeData {
        &mut self.quad_mut(e).data
    }

    /// Whether the edge is marked two-way.
    pub fn two_way(&self, e: EdgeId) -> bool {
        self.edge_data(e).two_way
    }

    /// Mark or unmark the edge as two-way.
    pub fn set_two_way(&mut self, e: EdgeId, two_way: bool) {
        self.edge_data_mut(e).two_way = two_way;
    }

    /// Collision fade values of the edge.
    pub fn collision(&self, e: EdgeId) -> CollisionFade {
        self.edge_data(e).collision
    }

    /// Replace the collision fade values of the edge.
    pub fn set_collision(&mut self, e: EdgeId, collision: CollisionFade) {
        self.edge_data_mut(e).collision = collision;
    }

    /// Number of edges currently marked two-way.
    pub fn two_way_count(&self) -> usize {
        self.quads
            .iter()
            .flatten()
            .filter(|q| q.data.two_way)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operators_on_tetrahedron() {
        let cell = Cell::primitive();
        for e in cell.edge_ids() {
            for d in [e, e.rot(), e.sym(), e.inv_rot()] {
                assert_eq!(cell.oprev(cell.onext(d)), d);
                assert_eq!(cell.lprev(cell.lnext(d)), d);
                assert_eq!(cell.rprev(cell.rnext(d)), d);
                assert_eq!(cell.dprev(cell.dnext(d)), d);

                assert_eq!(cell.orig(cell.onext(d)), cell.orig(d));
                assert_eq!(cell.left(cell.lnext(d)), cell.left(d));
                assert_eq!(cell.right(cell.rnext(d)), cell.right(d));
                assert_eq!(cell.dest(cell.dnext(d)), cell.dest(d));
                assert_eq!(cell.right(cell.onext(d)), cell.left(d));
            }
        }
    }

    #[test]
    fn test_endpoints_of_companions() {
        let cell = Cell::primitive();
        let e = cell.edge_ids().next().unwrap();
        assert_eq!(cell.dest(e), cell.orig(e.sym()));
        assert_eq!(cell.left(e), cell.right(e.sym()));
        assert_eq!(cell.orig(e.rot()), cell.right(e));
        assert_eq!(cell.dest(e.rot()), cell.left(e));
        assert!(cell.orig_vertex(e).is_some());
        assert!(cell.left_face(e).is_some());
        assert!(cell.right_face(e.rot()).is_none());
    }

    #[test]
    fn test_edge_data_shared_by_companions() {
        let mut cell = Cell::primitive();
        let e = cell.edge_ids().next().unwrap();
        assert!(!cell.two_way(e));
        assert_eq!(cell.collision(e), CollisionFade::default());

        cell.set_two_way(e.sym(), true);
        assert!(cell.two_way(e));
        assert!(cell.two_way(e.rot()));
        assert_eq!(cell.two_way_count(), 1);

        let fade = CollisionFade {
            phase: 0.25,
            velocity: 0.1,
        };
        cell.set_collision(e.inv_rot(), fade);
        assert_eq!(cell.collision(e), fade);
    }

    #[test]
    #[should_panic]
    fn test_stale_edge_panics() {
        let cell = Cell::new();
        cell.onext(EdgeId::new(0));
    }
}
