//! Topology editing: splitting and rejoining vertices and faces.
//!
//! There are two primitive edits. [`Cell::split_face_vertex`] divides one
//! vertex (or face) into two joined by a new edge, and
//! [`Cell::rejoin_face_vertex`] is its exact inverse. Both are written once
//! against [`FaceVertex`], so the same code splits a vertex in the primal
//! graph and subdivides a face through the dual.
//!
//! Both edits check every precondition before touching the cell. A rejected
//! edit returns [`MeshError::InvalidTopologyOperation`] and leaves the cell
//! exactly as it was.
//!
//! The four wrappers pick the moved edges for the caller:
//!
//! | wrapper | edit | counts |
//! |---|---|---|
//! | [`Cell::make_vertex_edge`] | split a vertex | +1 vertex, +1 edge |
//! | [`Cell::kill_vertex_edge`] | rejoin a vertex | -1 vertex, -1 edge |
//! | [`Cell::make_face_edge`] | split a face | +1 face, +1 edge |
//! | [`Cell::kill_face_edge`] | rejoin a face | -1 face, -1 edge |
//!
//! Rejoining can leave two-sided faces (digons) or degree-two vertices behind.
//! Both are valid cells.

use super::cell::Cell;
use super::index::{EdgeId, FaceId, FaceVertex, VertexId};
use crate::error::{MeshError, Result};

/// The ring neighbours of a validated split.
#[derive(Debug, Clone, Copy)]
struct SplitFrame {
    first: EdgeId,
    last: EdgeId,
    bot_left: EdgeId,
    bot_right: EdgeId,
}

impl Cell {
    /// Split `old` into `old` and `new`, joined by a new edge `e` with
    /// `orig(e) == old`, `dest(e) == new`, `left(e) == left` and
    /// `right(e) == right`.
    ///
    /// `moved` is the counterclockwise run of edges leaving `old` that move
    /// to `new`. It starts with the edge bordering `right` and ends with the
    /// edge bordering `left`, and may not be the whole ring of `old`. `new`
    /// must be a freshly created element of the same kind as `old`.
    ///
    /// Returns `e`.
    pub fn split_face_vertex(
        &mut self,
        old: FaceVertex,
        new: FaceVertex,
        left: FaceVertex,
        right: FaceVertex,
        moved: &[EdgeId],
    ) -> Result<EdgeId> {
        if !self.contains(new) || !new.same_kind(old) || new == old {
            return Err(MeshError::topology(format!(
                "{:?} cannot receive edges split off {:?}",
                new, old
            )));
        }
        if self.edge_list_head(new).is_valid() {
            return Err(MeshError::topology(format!(
                "{:?} already has edges",
                new
            )));
        }
        let frame = self.check_split(old, left, right, moved)?;
        Ok(self.commit_split(old, new, left, right, moved, frame))
    }

    fn check_split(
        &self,
        old: FaceVertex,
        left: FaceVertex,
        right: FaceVertex,
        moved: &[EdgeId],
    ) -> Result<SplitFrame> {
        let (Some(&first), Some(&last)) = (moved.first(), moved.last()) else {
            return Err(MeshError::topology("no edges to move"));
        };
        if !self.contains(old) {
            return Err(MeshError::topology(format!("{:?} is not live", old)));
        }
        for &e in moved {
            if !self.contains_edge(e) || self.orig(e) != Some(old) {
                return Err(MeshError::topology(format!(
                    "{:?} does not leave {:?}",
                    e, old
                )));
            }
        }
        for pair in moved.windows(2) {
            if self.onext(pair[0]) != pair[1] {
                return Err(MeshError::topology(format!(
                    "{:?} does not follow {:?} around {:?}",
                    pair[1], pair[0], old
                )));
            }
        }

        let bot_left = self.onext(last);
        let bot_right = self.oprev(first);
        if moved.contains(&bot_left) || moved.contains(&bot_right) {
            return Err(MeshError::topology(format!(
                "cannot move every edge of {:?}",
                old
            )));
        }
        if self.right(bot_left) != Some(left) {
            return Err(MeshError::topology(format!(
                "last moved edge {:?} does not border {:?}",
                last, left
            )));
        }
        if self.left(bot_right) != Some(right) {
            return Err(MeshError::topology(format!(
                "first moved edge {:?} does not border {:?}",
                first, right
            )));
        }

        Ok(SplitFrame {
            first,
            last,
            bot_left,
            bot_right,
        })
    }

    fn commit_split(
        &mut self,
        old: FaceVertex,
        new: FaceVertex,
        left: FaceVertex,
        right: FaceVertex,
        moved: &[EdgeId],
        frame: SplitFrame,
    ) -> EdgeId {
        let SplitFrame {
            first,
            last,
            bot_left,
            bot_right,
        } = frame;

        for &m in moved {
            self.set_origin(m, new);
        }

        let e = self.new_edge();
        self.connect_edge(e, old, new, left, right);
        self.link_head(old, e);
        self.link_head(new, e.sym());

        self.set_onext(bot_right, e);
        self.set_onext(e, bot_left);
        self.set_onext(last, e.sym());
        self.set_onext(e.sym(), first);

        self.set_onext(first.rot(), e.rot());
        self.set_onext(e.rot(), bot_right.inv_rot());
        self.set_onext(bot_left.rot(), e.inv_rot());
        self.set_onext(e.inv_rot(), last.inv_rot());

        e
    }

    /// Merge `del` back into `old`, removing the edge that joins them.
    ///
    /// `moved` is the counterclockwise run of every edge leaving `del` except
    /// the one leading back to `old`; it starts with the edge bordering
    /// `right` and ends with the edge bordering `left`. This undoes
    /// [`split_face_vertex`](Self::split_face_vertex) called with the same
    /// `left`, `right` and `moved`.
    pub fn rejoin_face_vertex(
        &mut self,
        old: FaceVertex,
        del: FaceVertex,
        left: FaceVertex,
        right: FaceVertex,
        moved: &[EdgeId],
    ) -> Result<()> {
        let (Some(&first), Some(&last)) = (moved.first(), moved.last()) else {
            return Err(MeshError::topology("no edges to move"));
        };
        if !self.contains(old) || !self.contains(del) || old == del {
            return Err(MeshError::topology(format!(
                "cannot merge {:?} into {:?}",
                del, old
            )));
        }
        for &e in moved {
            if !self.contains_edge(e) || self.orig(e) != Some(del) {
                return Err(MeshError::topology(format!(
                    "{:?} does not leave {:?}",
                    e, del
                )));
            }
        }
        for pair in moved.windows(2) {
            if self.onext(pair[0]) != pair[1] {
                return Err(MeshError::topology(format!(
                    "{:?} does not follow {:?} around {:?}",
                    pair[1], pair[0], del
                )));
            }
        }

        let del_e = self.oprev(first).sym();
        if self.orig(del_e) != Some(old) {
            return Err(MeshError::topology(format!(
                "no edge joins {:?} to {:?} before {:?}",
                old, del, first
            )));
        }
        if moved.contains(&del_e.sym())
            || self.onext(last) != del_e.sym()
            || self.onext(del_e.sym()) != first
        {
            return Err(MeshError::topology(format!(
                "moved edges are not the rest of the ring of {:?}",
                del
            )));
        }

        let bot_left = self.onext(del_e);
        let bot_right = self.oprev(del_e);
        if bot_left == del_e {
            return Err(MeshError::topology(format!(
                "{:?} would be left without edges",
                old
            )));
        }
        if self.right(bot_left) != Some(left) {
            return Err(MeshError::topology(format!(
                "{:?} does not border {:?}",
                bot_left, left
            )));
        }
        if self.left(bot_right) != Some(right) {
            return Err(MeshError::topology(format!(
                "{:?} does not border {:?}",
                bot_right, right
            )));
        }

        for &m in moved {
            self.set_origin(m, old);
        }
        self.link_head(old, first);

        self.set_onext(bot_right, first);
        self.set_onext(last, bot_left);
        self.set_onext(first.rot(), bot_right.inv_rot());
        self.set_onext(bot_left.rot(), last.inv_rot());

        if self.edge_list_head(left) == del_e.inv_rot() {
            self.link_head(left, last.inv_rot());
        }
        if self.edge_list_head(right) == del_e.rot() {
            self.link_head(right, bot_right.inv_rot());
        }

        self.remove_edge(del_e);
        self.remove(del);
        Ok(())
    }

    /// The run of edges leaving `fv` that starts at the first edge (from the
    /// head) bordering `right` and ends at the next edge bordering `left`.
    fn find_move_edges(
        &self,
        fv: FaceVertex,
        left: FaceVertex,
        right: FaceVertex,
    ) -> Option<Vec<EdgeId>> {
        let head = self.edge_list_head(fv);
        if !head.is_valid() {
            return None;
        }

        let mut start = head;
        while self.right(start) != Some(right) {
            start = self.onext(start);
            if start == head {
                return None;
            }
        }

        let mut moved = Vec::new();
        let mut t = start;
        loop {
            moved.push(t);
            if self.left(t) == Some(left) {
                return Some(moved);
            }
            t = self.onext(t);
            if t == start {
                return None;
            }
        }
    }

    /// Split vertex `v` along the edges between faces `right` and `left`
    /// (counterclockwise), creating a new vertex at the same position and the
    /// edge `v -> new` with `left` on its left.
    ///
    /// The new vertex starts at `v`'s position, so the edge has zero length
    /// until a caller moves one of its endpoints.
    ///
    /// Returns `Ok(None)` and leaves the cell untouched when `v` has no such
    /// run of edges.
    ///
    /// # Example
    ///
    /// ```
    /// use casson::mesh::{Cell, FaceId, VertexId};
    ///
    /// let mut cell = Cell::primitive();
    /// let v0 = VertexId::new(0);
    /// let e = cell
    ///     .make_vertex_edge(v0, FaceId::new(1), FaceId::new(2))
    ///     .unwrap()
    ///     .unwrap();
    ///
    /// assert_eq!(cell.orig_vertex(e), Some(v0));
    /// assert_eq!(cell.num_vertices(), 5);
    /// assert_eq!(cell.euler_characteristic(), 2);
    /// ```
    pub fn make_vertex_edge(
        &mut self,
        v: VertexId,
        left: FaceId,
        right: FaceId,
    ) -> Result<Option<EdgeId>> {
        let (old, left, right) = (v.into(), left.into(), right.into());
        let Some(moved) = self.find_move_edges(old, left, right) else {
            log::debug!("no edges of {:?} run from {:?} to {:?}", v, right, left);
            return Ok(None);
        };
        let frame = self.check_split(old, left, right, &moved)?;

        let position = *self.position(v);
        let new = self.add_vertex(position);
        let e = self.commit_split(old, new.into(), left, right, &moved, frame);
        log::debug!("split {:?} into {:?} along {:?}", v, new, e);
        Ok(Some(e))
    }

    /// Remove vertex `v` by contracting the edge that joins it to the rest of
    /// the run between faces `right` and `left`.
    ///
    /// Undoes [`make_vertex_edge`](Self::make_vertex_edge) when called as
    /// `kill_vertex_edge(dest(e), left, right)`.
    pub fn kill_vertex_edge(&mut self, v: VertexId, left: FaceId, right: FaceId) -> Result<()> {
        let (del, left, right) = (v.into(), left.into(), right.into());
        let moved = self.find_move_edges(del, left, right).ok_or_else(|| {
            MeshError::topology(format!(
                "no edges of {:?} run from {:?} to {:?}",
                v, right, left
            ))
        })?;
        let (old, del_e) = self.merge_target(&moved)?;
        self.rejoin_face_vertex(old, del, left, right, &moved)?;
        log::debug!("merged {:?} into {:?}, removing {:?}", v, old, del_e);
        Ok(())
    }

    /// Subdivide face `f` with a new edge from vertex `orig` to vertex `dest`.
    ///
    /// The boundary of `f` running counterclockwise from `orig` to `dest`
    /// goes to a new face. The returned edge runs `orig -> dest` with `f` on
    /// its left and the new face on its right. Creating a two-sided face is
    /// allowed.
    pub fn make_face_edge(&mut self, f: FaceId, orig: VertexId, dest: VertexId) -> Result<EdgeId> {
        let (old, left, right) = (f.into(), dest.into(), orig.into());
        let moved = self.find_move_edges(old, left, right).ok_or_else(|| {
            MeshError::topology(format!(
                "{:?} has no boundary from {:?} to {:?}",
                f, orig, dest
            ))
        })?;
        let frame = self.check_split(old, left, right, &moved)?;

        let new = self.new_face();
        let e = self.commit_split(old, new.into(), left, right, &moved, frame);
        log::debug!("split {:?} into {:?} along {:?}", f, new, e.rot());
        Ok(e.rot())
    }

    /// Remove face `f` by deleting the `orig -> dest` edge that separates it
    /// from its neighbour, which absorbs its boundary.
    ///
    /// Undoes [`make_face_edge`](Self::make_face_edge) when called as
    /// `kill_face_edge(right_face(e), orig, dest)`.
    pub fn kill_face_edge(&mut self, f: FaceId, orig: VertexId, dest: VertexId) -> Result<()> {
        let (del, left, right) = (f.into(), dest.into(), orig.into());
        let moved = self.find_move_edges(del, left, right).ok_or_else(|| {
            MeshError::topology(format!(
                "{:?} has no boundary from {:?} to {:?}",
                f, orig, dest
            ))
        })?;
        let (old, del_e) = self.merge_target(&moved)?;
        self.rejoin_face_vertex(old, del, left, right, &moved)?;
        log::debug!("merged {:?} into {:?}, removing {:?}", f, old, del_e);
        Ok(())
    }

    /// The element a run will be merged into, and the edge leading to it.
    fn merge_target(&self, moved: &[EdgeId]) -> Result<(FaceVertex, EdgeId)> {
        let last = moved
            .last()
            .copied()
            .ok_or_else(|| MeshError::topology("no edges to move"))?;
        let del_e = self.onext(last).sym();
        let old = self
            .orig(del_e)
            .ok_or_else(|| MeshError::topology(format!("{:?} is not linked", del_e)))?;
        Ok((old, del_e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_polygons;
    use nalgebra::Point3;

    type Snapshot = Vec<(EdgeId, EdgeId, Option<FaceVertex>)>;

    fn snapshot(cell: &Cell) -> Snapshot {
        let mut records = Vec::new();
        for e in cell.edge_ids() {
            for d in [e, e.rot(), e.sym(), e.inv_rot()] {
                records.push((d, cell.onext(d), cell.orig(d)));
            }
        }
        records
    }

    fn counts(cell: &Cell) -> (usize, usize, usize) {
        (cell.num_vertices(), cell.num_edges(), cell.num_faces())
    }

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn f(i: usize) -> FaceId {
        FaceId::new(i)
    }

    #[test]
    fn test_vertex_split_on_tetrahedron() {
        let mut cell = Cell::primitive();
        let e = cell.make_vertex_edge(v(0), f(1), f(2)).unwrap().unwrap();

        assert_eq!(cell.orig_vertex(e), Some(v(0)));
        assert_eq!(cell.left_face(e), Some(f(1)));
        assert_eq!(cell.right_face(e), Some(f(2)));
        assert_eq!(counts(&cell), (5, 7, 4));
        assert_eq!(cell.euler_characteristic(), 2);
        assert!(cell.is_valid());

        let new = cell.dest_vertex(e).unwrap();
        assert_eq!(cell.position(new), cell.position(v(0)));
        assert_eq!(cell.valence(new.into()), 2);
        assert_eq!(cell.valence(v(0).into()), 3);
        assert_eq!(cell.valence(f(1).into()), 4);
        assert_eq!(cell.valence(f(2).into()), 4);
    }

    #[test]
    fn test_invalid_vertex_split_returns_none() {
        let mut cell = Cell::primitive();
        let before = snapshot(&cell);

        // v0 does not touch f0.
        let result = cell.make_vertex_edge(v(0), f(0), f(1)).unwrap();

        assert!(result.is_none());
        assert_eq!(counts(&cell), (4, 6, 4));
        assert_eq!(snapshot(&cell), before);
    }

    #[test]
    fn test_vertex_round_trip() {
        let mut cell = Cell::primitive();
        let before = snapshot(&cell);

        let e = cell.make_vertex_edge(v(0), f(1), f(2)).unwrap().unwrap();
        let new = cell.dest_vertex(e).unwrap();
        cell.kill_vertex_edge(new, f(1), f(2)).unwrap();

        assert_eq!(counts(&cell), (4, 6, 4));
        assert!(!cell.contains_vertex(new));
        assert!(!cell.contains_edge(e));
        assert_eq!(snapshot(&cell), before);
        assert!(cell.is_valid());
    }

    #[test]
    fn test_face_split_on_tetrahedron() {
        let mut cell = Cell::primitive();
        let bound = cell.bound_edges(f(0));
        let a = cell.orig_vertex(bound[0]).unwrap();
        let c = cell.dest_vertex(bound[1]).unwrap();

        let e = cell.make_face_edge(f(0), a, c).unwrap();

        assert_eq!(cell.orig_vertex(e), Some(a));
        assert_eq!(cell.dest_vertex(e), Some(c));
        assert_eq!(cell.left_face(e), Some(f(0)));
        let new = cell.right_face(e).unwrap();
        assert_eq!(counts(&cell), (4, 7, 5));
        assert_eq!(cell.euler_characteristic(), 2);
        assert!(cell.is_valid());

        // The two-edge path a -> b -> c moved to the new face.
        assert_eq!(cell.bound_edges(new).len(), 3);
        assert_eq!(cell.bound_edges(f(0)).len(), 2);
        assert_eq!(cell.valence(a.into()), 4);
        assert_eq!(cell.valence(c.into()), 4);
    }

    #[test]
    fn test_face_round_trip() {
        let mut cell = Cell::primitive();
        let before = snapshot(&cell);
        let bound = cell.bound_edges(f(2));
        let a = cell.orig_vertex(bound[0]).unwrap();
        let c = cell.dest_vertex(bound[1]).unwrap();

        let e = cell.make_face_edge(f(2), a, c).unwrap();
        let new = cell.right_face(e).unwrap();
        cell.kill_face_edge(new, a, c).unwrap();

        assert_eq!(counts(&cell), (4, 6, 4));
        assert!(!cell.contains_face(new));
        assert_eq!(snapshot(&cell), before);
        assert!(cell.is_valid());
    }

    #[test]
    fn test_digon_allowed() {
        let mut cell = Cell::primitive();
        let bound = cell.bound_edges(f(3));
        let a = cell.orig_vertex(bound[0]).unwrap();
        let b = cell.dest_vertex(bound[0]).unwrap();

        let e = cell.make_face_edge(f(3), a, b).unwrap();
        let digon = cell.right_face(e).unwrap();

        assert_eq!(cell.valence(digon.into()), 2);
        assert_eq!(cell.bound_edges(f(3)).len(), 3);
        assert_eq!(cell.euler_characteristic(), 2);
        assert!(cell.is_valid());
    }

    #[test]
    fn test_euler_preserved_over_edits() {
        let mut cell = Cell::primitive();

        for round in 0..12 {
            let vertices: Vec<_> = cell.vertex_ids().collect();
            let vertex = vertices[round % vertices.len()];
            let head = cell.edge_list_head(vertex.into());
            let left = cell.left_face(head).unwrap();
            let right = cell.right_face(head).unwrap();
            let e = cell.make_vertex_edge(vertex, left, right).unwrap();
            assert!(e.is_some());

            let faces: Vec<_> = cell.face_ids().collect();
            let face = faces[(round * 7) % faces.len()];
            let bound = cell.bound_edges(face);
            if bound.len() >= 3 {
                let a = cell.orig_vertex(bound[0]).unwrap();
                let c = cell.dest_vertex(bound[1]).unwrap();
                cell.make_face_edge(face, a, c).unwrap();
            }

            assert_eq!(cell.euler_characteristic(), 2);
            assert!(cell.is_valid());
        }
    }

    #[test]
    fn test_failed_split_leaves_cell_unchanged() {
        let mut cell = Cell::primitive();
        let before = snapshot(&cell);
        let old: FaceVertex = v(0).into();
        let ring: Vec<_> = cell.ring(old).collect();
        let new: FaceVertex = cell.new_vertex().into();
        let (f1, f2): (FaceVertex, FaceVertex) = (f(1).into(), f(2).into());

        // Whole ring.
        assert!(cell.split_face_vertex(old, new, f1, f2, &ring).is_err());
        // Empty run.
        assert!(cell.split_face_vertex(old, new, f1, f2, &[]).is_err());
        // Edge that does not leave v0.
        let foreign = cell.edge_list_head(v(1).into());
        assert!(cell.split_face_vertex(old, new, f1, f2, &[foreign]).is_err());
        // Wrong kind for the new element.
        let face: FaceVertex = f(0).into();
        assert!(cell.split_face_vertex(old, face, f1, f2, &ring[..1]).is_err());
        // Faces swapped.
        let head = cell.edge_list_head(old);
        let (l, r) = (cell.left(head).unwrap(), cell.right(head).unwrap());
        assert!(cell.split_face_vertex(old, new, r, l, &[head]).is_err());

        assert_eq!(snapshot(&cell), before);
        assert_eq!(counts(&cell), (5, 6, 4));

        assert!(cell.split_face_vertex(old, new, l, r, &[head]).is_ok());
        assert!(cell.edge_list_head(new).is_valid());
    }

    #[test]
    fn test_failed_rejoin_leaves_cell_unchanged() {
        let mut cell = Cell::primitive();
        let e = cell.make_vertex_edge(v(0), f(1), f(2)).unwrap().unwrap();
        let new = cell.dest_vertex(e).unwrap();
        let before = snapshot(&cell);

        // new is a degree-two vertex between f1 and f2, not f0.
        assert!(cell.kill_vertex_edge(new, f(0), f(2)).is_err());

        let moved: Vec<_> = cell.ring(new.into()).filter(|&m| m != e.sym()).collect();
        let (f1, f2): (FaceVertex, FaceVertex) = (f(1).into(), f(2).into());
        assert!(cell
            .rejoin_face_vertex(v(0).into(), new.into(), f2, f1, &moved)
            .is_err());
        assert!(cell
            .rejoin_face_vertex(v(1).into(), new.into(), f1, f2, &moved)
            .is_err());

        assert_eq!(snapshot(&cell), before);
        assert_eq!(counts(&cell), (5, 7, 4));

        cell.rejoin_face_vertex(v(0).into(), new.into(), f1, f2, &moved)
            .unwrap();
        assert_eq!(counts(&cell), (4, 6, 4));
        assert!(cell.is_valid());
    }

    #[test]
    fn test_kill_face_edge_heals_heads() {
        let mut cell = Cell::primitive();
        let bound = cell.bound_edges(f(1));
        let a = cell.orig_vertex(bound[0]).unwrap();
        let c = cell.dest_vertex(bound[1]).unwrap();
        let e = cell.make_face_edge(f(1), a, c).unwrap();
        let new = cell.right_face(e).unwrap();

        // Point the endpoints at the edge about to be removed.
        cell.set_edge_list_head(a.into(), e).unwrap();
        cell.set_edge_list_head(c.into(), e.sym()).unwrap();
        cell.kill_face_edge(new, a, c).unwrap();

        assert!(cell.is_valid());
        assert_eq!(cell.valence(a.into()), 3);
        assert_eq!(cell.valence(c.into()), 3);
    }

    fn cube() -> Cell {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces: Vec<[usize; 4]> = vec![
            [0, 3, 2, 1],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [2, 3, 7, 6],
            [0, 4, 7, 3],
            [1, 2, 6, 5],
        ];
        build_from_polygons(&positions, &faces).unwrap()
    }

    #[test]
    fn test_vertex_round_trip_on_cube() {
        let cube = cube();
        let before = snapshot(&cube);
        let faces: Vec<_> = cube.face_ids().collect();
        let mut splits = 0;
        let mut multi_edge_runs = 0;

        for vertex in cube.vertex_ids() {
            for &left in &faces {
                for &right in &faces {
                    let mut cell = cube.clone();
                    if let Ok(Some(e)) = cell.make_vertex_edge(vertex, left, right) {
                        assert!(cell.is_valid());
                        assert_eq!(cell.euler_characteristic(), 2);
                        assert_eq!(counts(&cell), (9, 13, 6));

                        let new = cell.dest_vertex(e).unwrap();
                        assert_eq!(cell.position(new), cell.position(vertex));
                        if cell.valence(new.into()) > 2 {
                            multi_edge_runs += 1;
                        }
                        cell.kill_vertex_edge(new, left, right).unwrap();
                        splits += 1;
                    }
                    assert_eq!(snapshot(&cell), before);
                    assert_eq!(counts(&cell), (8, 12, 6));
                    assert!(cell.is_valid());
                }
            }
        }

        // Every ordered pair of distinct faces around each corner.
        assert_eq!(splits, 48);
        assert_eq!(multi_edge_runs, 24);
    }

    #[test]
    fn test_face_round_trip_on_cube() {
        let cube = cube();
        let before = snapshot(&cube);
        let vertices: Vec<_> = cube.vertex_ids().collect();
        let mut splits = 0;
        let mut multi_edge_runs = 0;

        for face in cube.face_ids() {
            for &a in &vertices {
                for &c in &vertices {
                    let mut cell = cube.clone();
                    if let Ok(e) = cell.make_face_edge(face, a, c) {
                        assert!(cell.is_valid());
                        assert_eq!(cell.euler_characteristic(), 2);
                        assert_eq!(counts(&cell), (8, 13, 7));
                        assert_eq!(cell.orig_vertex(e), Some(a));
                        assert_eq!(cell.dest_vertex(e), Some(c));

                        let new = cell.right_face(e).unwrap();
                        let sides = cell.bound_edges(new).len();
                        assert_eq!(sides + cell.bound_edges(face).len(), 6);
                        if sides > 2 {
                            multi_edge_runs += 1;
                        }
                        cell.kill_face_edge(new, a, c).unwrap();
                        splits += 1;
                    }
                    assert_eq!(snapshot(&cell), before);
                    assert_eq!(counts(&cell), (8, 12, 6));
                    assert!(cell.is_valid());
                }
            }
        }

        // Every ordered pair of distinct corners of each quad.
        assert_eq!(splits, 72);
        assert_eq!(multi_edge_runs, 48);
    }
}
