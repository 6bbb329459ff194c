//! Wavefront OBJ format support.
//!
//! Only the records a closed polygon surface needs are read: `v x y z`
//! vertex positions and `f i j k ...` faces with 1-based indices listed
//! counterclockwise. Face tokens of the form `i/t/n` use the leading vertex
//! index. Every other record (comments, normals, texture coordinates,
//! groups) is skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_polygons, to_face_loops, Cell};

/// Parse OBJ text into vertex positions and 0-based face loops.
///
/// # Example
///
/// ```
/// use casson::io::obj;
///
/// let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
/// let (positions, faces) = obj::parse(text).unwrap();
/// assert_eq!(positions.len(), 3);
/// assert_eq!(faces, vec![vec![0, 1, 2]]);
/// ```
pub fn parse(text: &str) -> Result<(Vec<Point3<f64>>, Vec<Vec<usize>>)> {
    let mut positions = Vec::new();
    let mut faces = Vec::new();

    for (i, line) in text.lines().enumerate() {
        parse_line(line, i + 1, &mut positions, &mut faces)?;
    }

    Ok((positions, faces))
}

fn parse_line(
    line: &str,
    number: usize,
    positions: &mut Vec<Point3<f64>>,
    faces: &mut Vec<Vec<usize>>,
) -> Result<()> {
    let mut tokens = line.split_whitespace();
    match tokens.next() {
        Some("v") => {
            let mut coords = [0.0f64; 3];
            for c in coords.iter_mut() {
                let token = tokens
                    .next()
                    .ok_or_else(|| parse_error(number, "vertex needs 3 coordinates"))?;
                *c = token
                    .parse()
                    .map_err(|_| parse_error(number, format!("invalid coordinate '{}'", token)))?;
            }
            positions.push(Point3::new(coords[0], coords[1], coords[2]));
        }
        Some("f") => {
            let face = tokens
                .map(|token| parse_index(token, number))
                .collect::<Result<Vec<_>>>()?;
            faces.push(face);
        }
        _ => {}
    }
    Ok(())
}

/// The 0-based vertex index of a face token `i`, `i/t` or `i/t/n`.
fn parse_index(token: &str, number: usize) -> Result<usize> {
    let head = token.split('/').next().unwrap_or(token);
    match head.parse::<usize>() {
        Ok(0) => Err(parse_error(number, "vertex indices start at 1")),
        Ok(index) => Ok(index - 1),
        Err(_) => Err(parse_error(
            number,
            format!("invalid vertex index '{}'", token),
        )),
    }
}

fn parse_error<S: Into<String>>(line: usize, message: S) -> MeshError {
    MeshError::Parse {
        line,
        message: message.into(),
    }
}

/// Read a cell from OBJ data.
pub fn read<R: Read>(reader: R) -> Result<Cell> {
    let mut positions = Vec::new();
    let mut faces = Vec::new();

    for (i, line) in BufReader::new(reader).lines().enumerate() {
        parse_line(&line?, i + 1, &mut positions, &mut faces)?;
    }

    build_from_polygons(&positions, &faces)
}

/// Load a cell from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use casson::io::obj;
///
/// let cell = obj::load("planet.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Cell> {
    let path = path.as_ref();
    let cell = read(File::open(path)?)?;
    log::info!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        cell.num_vertices(),
        cell.num_faces()
    );
    Ok(cell)
}

/// Write a cell as OBJ.
pub fn write<W: Write>(cell: &Cell, mut writer: W) -> Result<()> {
    let (positions, faces) = to_face_loops(cell);

    for p in &positions {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for face in &faces {
        write!(writer, "f")?;
        for &i in face {
            write!(writer, " {}", i + 1)?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save a cell to an OBJ file.
pub fn save<P: AsRef<Path>>(cell: &Cell, path: P) -> Result<()> {
    let file = File::create(path)?;
    write(cell, BufWriter::new(file))
}
