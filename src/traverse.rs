//! Agents that travel around the boundary of a face.
//!
//! A [`Traverser`] is bound to one face and keeps a phase in `[0, 1)`: the
//! fraction of the face boundary already travelled. The boundary is
//! snapshotted when the traverser is created, so later edits to the cell do
//! not move it onto another face; spawn a new traverser after editing.
//!
//! # Example
//!
//! ```
//! use casson::mesh::Cell;
//! use casson::traverse::{spawn_traversers, SimulationState, TraverserOptions};
//!
//! let cell = Cell::primitive();
//! let mut traversers = spawn_traversers(&cell, &TraverserOptions::default()).unwrap();
//! assert_eq!(traversers.len(), 4);
//!
//! for t in &mut traversers {
//!     t.update(SimulationState::Playing);
//!     let p = t.position(&cell).unwrap();
//!     assert!(p.coords.norm() > 0.0);
//! }
//! ```

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{Cell, EdgeId, FaceId};

/// Options for creating traversers.
#[derive(Debug, Clone)]
pub struct TraverserOptions {
    /// Starting phase, wrapped into `[0, 1)`.
    pub phase: f64,

    /// Boundary fractions travelled per step, split evenly over the edges.
    /// Negative values travel clockwise.
    pub velocity: f64,
}

impl Default for TraverserOptions {
    fn default() -> Self {
        Self {
            phase: 0.5,
            velocity: 0.005,
        }
    }
}

impl TraverserOptions {
    /// Create options with the specified starting phase.
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Create options with the specified velocity.
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Check that both values are finite.
    pub fn validate(&self) -> Result<()> {
        if !self.phase.is_finite() {
            return Err(MeshError::invalid_param("phase", self.phase, "must be finite"));
        }
        if !self.velocity.is_finite() {
            return Err(MeshError::invalid_param(
                "velocity",
                self.velocity,
                "must be finite",
            ));
        }
        Ok(())
    }
}

/// Whether the simulation is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationState {
    /// Traversers move on every update.
    Playing,
    /// Traversers hold their phase.
    #[default]
    Paused,
}

/// Map a boundary phase to an edge index and the fraction travelled along
/// that edge.
///
/// A phase that rounds up to the full boundary is clamped onto the last edge.
/// A boundary without edges maps everything to `(0, 0.0)`.
///
/// ```
/// use casson::traverse::phase_to_edge;
///
/// assert_eq!(phase_to_edge(0.5, 3), (1, 0.5));
/// ```
pub fn phase_to_edge(phase: f64, count: usize) -> (usize, f64) {
    if count == 0 {
        return (0, 0.0);
    }
    let scaled = phase * count as f64;
    let index = (scaled.floor().max(0.0) as usize).min(count - 1);
    (index, scaled - index as f64)
}

/// An agent moving around one face.
#[derive(Debug, Clone)]
pub struct Traverser {
    face: FaceId,
    boundary: Vec<EdgeId>,
    phase: f64,
    velocity: f64,
}

impl Traverser {
    /// Create a traverser on `face`, starting from the `rot` of its head.
    pub fn new(cell: &Cell, face: FaceId, options: &TraverserOptions) -> Result<Self> {
        options.validate()?;
        let boundary = cell.bound_edges(face);
        if boundary.is_empty() {
            return Err(MeshError::InvalidState(format!("{:?} has no boundary", face)));
        }

        let mut traverser = Self {
            face,
            boundary,
            phase: 0.0,
            velocity: options.velocity,
        };
        traverser.set_phase(options.phase);
        Ok(traverser)
    }

    /// Create a traverser on the face to the left of `edge`, with the
    /// boundary starting at `edge`.
    pub fn on_edge(cell: &Cell, edge: EdgeId, options: &TraverserOptions) -> Result<Self> {
        let face = cell
            .left_face(edge)
            .ok_or_else(|| MeshError::InvalidState(format!("{:?} has no face on its left", edge)))?;
        let mut traverser = Self::new(cell, face, options)?;
        if let Some(start) = traverser.boundary.iter().position(|&e| e == edge) {
            traverser.boundary.rotate_left(start);
        }
        Ok(traverser)
    }

    /// The face being travelled.
    pub fn face(&self) -> FaceId {
        self.face
    }

    /// The boundary snapshot, counterclockwise.
    pub fn boundary(&self) -> &[EdgeId] {
        &self.boundary
    }

    /// Current phase in `[0, 1)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Velocity in boundary fractions per step.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Change the velocity. Non-finite values are ignored.
    pub fn set_velocity(&mut self, velocity: f64) {
        if velocity.is_finite() {
            self.velocity = velocity;
        }
    }

    /// Set the phase, wrapping it into `[0, 1)`. Non-finite values are
    /// ignored.
    pub fn set_phase(&mut self, phase: f64) {
        if !phase.is_finite() {
            return;
        }
        let wrapped = phase - phase.floor();
        // -1e-17 wraps to 1.0 in floating point
        self.phase = if wrapped >= 1.0 { 0.0 } else { wrapped };
    }

    /// Move the phase by `delta`, wrapping around the boundary.
    pub fn shift_phase(&mut self, delta: f64) {
        self.set_phase(self.phase + delta);
    }

    /// The edge the traverser is on and how far along it it is.
    pub fn locate(&self) -> (EdgeId, f64) {
        let (index, t) = phase_to_edge(self.phase, self.boundary.len());
        (self.boundary[index], t)
    }

    /// The edge the traverser is on.
    pub fn current_edge(&self) -> EdgeId {
        self.locate().0
    }

    /// Interpolated position along the current edge.
    pub fn position(&self, cell: &Cell) -> Result<Point3<f64>> {
        let (edge, t) = self.locate();
        let (a, b) = cell.edge_endpoints(edge).ok_or_else(|| {
            MeshError::InvalidState(format!("{:?} does not join two vertices", edge))
        })?;
        Ok(a + (b - a) * t)
    }

    /// Advance one step. Paused traversers do not move.
    pub fn update(&mut self, state: SimulationState) {
        if state == SimulationState::Playing {
            self.shift_phase(self.velocity / self.boundary.len() as f64);
        }
    }
}

/// Create one traverser per face of the cell.
pub fn spawn_traversers(cell: &Cell, options: &TraverserOptions) -> Result<Vec<Traverser>> {
    cell.face_ids()
        .map(|f| Traverser::new(cell, f, options))
        .collect()
}
