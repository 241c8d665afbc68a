//! Plain-text triangulation format (`.tri`).
//!
//! One record per line, `#` starts a comment:
//!
//! ```text
//! # points
//! v 0 0
//! v 1 0
//! v 1 1
//! # triangle corners (start point of half-edges 3t, 3t+1, 3t+2)
//! t 0 1 2
//! # twins of half-edges 3t, 3t+1, 3t+2; -1 marks a boundary half-edge
//! h -1 -1 -1
//! ```
//!
//! The `t` and `h` lines are the engine's `triangles` and `halfedges` arrays split
//! into groups of three; their order defines the triangle ids.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point2;

use crate::error::{MeshError, Result};
use crate::mesh::{HalfEdgeId, MeshIndex, Triangulation};

/// Load a triangulation from a `.tri` file.
///
/// # Example
///
/// ```no_run
/// use dualmesh::io::tri;
/// use dualmesh::mesh::Triangulation;
///
/// let tri: Triangulation = tri::load("points.tri").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<Triangulation<I>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    parse(BufReader::new(file), path)
}

/// Read a triangulation from any buffered reader.
pub fn read<R: BufRead, I: MeshIndex>(reader: R) -> Result<Triangulation<I>> {
    parse(reader, Path::new("<reader>"))
}

fn parse<R: BufRead, I: MeshIndex>(reader: R, path: &Path) -> Result<Triangulation<I>> {
    let mut points = Vec::new();
    let mut triangles = Vec::new();
    let mut halfedges = Vec::new();

    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = n + 1;
        let err = |message: String| MeshError::LoadError {
            path: path.to_path_buf(),
            line: line_no,
            message,
        };

        let content = line.split('#').next().unwrap_or("").trim();
        let mut tokens = content.split_whitespace();
        let Some(tag) = tokens.next() else {
            continue;
        };
        let fields: Vec<&str> = tokens.collect();

        match tag {
            "v" => {
                let [x, y] = parse_fields::<f64, 2>(&fields).map_err(err)?;
                points.push(Point2::new(x, y));
            }
            "t" => {
                let corners = parse_fields::<usize, 3>(&fields).map_err(err)?;
                triangles.extend(corners);
            }
            "h" => {
                let twins = parse_fields::<i64, 3>(&fields).map_err(err)?;
                halfedges.extend(twins.iter().map(|&h| usize::try_from(h).ok()));
            }
            other => return Err(err(format!("unknown record type '{}'", other))),
        }
    }

    log::debug!(
        "parsed {}: {} points, {} corners, {} twins",
        path.display(),
        points.len(),
        triangles.len(),
        halfedges.len()
    );

    Triangulation::new(points, triangles, halfedges).map_err(|e| match e {
        MeshError::ArrayShape { details } => MeshError::LoadError {
            path: path.to_path_buf(),
            line: 0,
            message: details,
        },
        other => other,
    })
}

fn parse_fields<T, const N: usize>(fields: &[&str]) -> std::result::Result<[T; N], String>
where
    T: std::str::FromStr + Default + Copy,
{
    if fields.len() != N {
        return Err(format!("expected {} values, found {}", N, fields.len()));
    }
    let mut out = [T::default(); N];
    for (slot, field) in out.iter_mut().zip(fields) {
        *slot = field
            .parse()
            .map_err(|_| format!("invalid number '{}'", field))?;
    }
    Ok(out)
}

/// Save a triangulation to a `.tri` file.
pub fn save<P: AsRef<Path>, I: MeshIndex>(tri: &Triangulation<I>, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write(tri, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a triangulation to any writer.
pub fn write<W: Write, I: MeshIndex>(tri: &Triangulation<I>, writer: &mut W) -> Result<()> {
    writeln!(writer, "# {} points, {} triangles", tri.num_points(), tri.num_triangles())?;
    for p in tri.points() {
        writeln!(writer, "v {} {}", p.x, p.y)?;
    }
    for t in tri.triangle_ids() {
        let [a, b, c] = tri.points_of_triangle(t)?;
        writeln!(writer, "t {} {} {}", a, b, c)?;
    }
    for t in tri.triangle_ids() {
        let mut twins = [-1i64; 3];
        for (slot, e) in twins.iter_mut().zip(tri.halfedges_of_triangle(t)?) {
            if let Some(twin) = tri.twin(e)? {
                *slot = twin_value(twin);
            }
        }
        writeln!(writer, "h {} {} {}", twins[0], twins[1], twins[2])?;
    }
    Ok(())
}

fn twin_value<I: MeshIndex>(twin: HalfEdgeId<I>) -> i64 {
    i64::try_from(twin.index()).unwrap_or(i64::MAX)
}
