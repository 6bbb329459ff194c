//! Cell file I/O.
//!
//! This module provides functions for loading and saving cells.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Wavefront OBJ | `.obj` | ✓ | ✓ | `v` and `f` records only |
//!
//! # Usage
//!
//! The easiest way to load and save cells is using the automatic format
//! detection:
//!
//! ```no_run
//! use casson::io::{load, save};
//!
//! // Load with automatic format detection
//! let cell = load("planet.obj").unwrap();
//!
//! // Save with automatic format detection
//! save(&cell, "output.obj").unwrap();
//! ```
//!
//! You can also use format-specific functions:
//!
//! ```no_run
//! use casson::io::obj;
//!
//! let cell = obj::load("planet.obj").unwrap();
//! obj::save(&cell, "output.obj").unwrap();
//! ```

pub mod obj;

use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::Cell;

/// Supported cell file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn detect(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a cell from a file with automatic format detection.
///
/// The format is determined by the file extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Cell> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Obj => obj::load(path),
    }
}

/// Save a cell to a file with automatic format detection.
///
/// The format is determined by the file extension.
pub fn save<P: AsRef<Path>>(cell: &Cell, path: P) -> Result<()> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Obj => obj::save(cell, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_extension("OBJ"), Some(Format::Obj));
        assert_eq!(Format::from_path("planet.obj"), Some(Format::Obj));
        assert_eq!(Format::from_path("planet.stl"), None);
        assert_eq!(Format::from_path("planet"), None);
    }

    #[test]
    fn test_unsupported_format() {
        let result = load("planet.stl");
        assert!(matches!(
            result,
            Err(MeshError::UnsupportedFormat { ref extension }) if extension == "stl"
        ));

        let result = save(&Cell::primitive(), "planet");
        assert!(matches!(result, Err(MeshError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("casson-io-{}.obj", std::process::id()));
        let cell = Cell::primitive();

        save(&cell, &path).unwrap();
        let loaded = load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.num_vertices(), 4);
        assert_eq!(loaded.num_edges(), 6);
        assert_eq!(loaded.num_faces(), 4);
    }
}
