//! Error types for casson.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

use crate::mesh::{EdgeId, FaceVertex};

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during cell construction, editing and I/O.
#[derive(Error, Debug)]
pub enum MeshError {
    /// An edge list head was assigned an edge that does not leave its owner.
    #[error("edge {edge:?} does not originate at {owner:?}")]
    InvalidEdgeReference {
        /// The vertex or face whose head was being set.
        owner: FaceVertex,
        /// The rejected edge.
        edge: EdgeId,
    },

    /// The arguments of a split or rejoin describe an impossible edit.
    /// The cell is left unchanged.
    #[error("invalid topology operation: {0}")]
    InvalidTopologyOperation(String),

    /// The input has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three corners or repeats a vertex in a row.
    #[error("face {face} is degenerate")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// The same directed edge appears in two faces, so the input is either
    /// inconsistently wound or has an edge shared by more than two faces.
    #[error("directed edge ({v0}, {v1}) is used by more than one face")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// The input is not a closed 2-manifold.
    #[error("mesh has non-manifold topology: {details}")]
    NonManifold {
        /// Description of the non-manifold condition.
        details: String,
    },

    /// A line of a text mesh file could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid cell state for the requested operation.
    #[error("invalid mesh state: {0}")]
    InvalidState(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create an invalid topology operation error.
    pub(crate) fn topology<S: Into<String>>(message: S) -> Self {
        MeshError::InvalidTopologyOperation(message.into())
    }
}
