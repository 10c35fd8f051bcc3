use crate::error::{MeshError, Result};
use crate::mesh::dcel::{DCEL, Face, HalfEdge, Vertex};
use crate::mesh::polygon::PolygonMesh;
use crate::mesh::{FaceId, HalfEdgeId, Point, VertexId};
use std::fs;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Upper bound on what a header count may reserve up front. Larger inputs grow as
/// their records arrive, and a header that overstates them ends in `UnexpectedEof`.
const PREALLOCATION_LIMIT: usize = 4096;

/// Numbered, non-blank input lines split into integers.
struct Records<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> Records<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Next non-blank line as integers, with its 1-based line number.
    fn next_record(&mut self, expected: &str) -> Result<(usize, Vec<i64>)> {
        loop {
            let Some(line) = self.lines.next() else {
                return Err(MeshError::UnexpectedEof {
                    expected: expected.to_string(),
                });
            };
            let line = line?;
            self.line_number += 1;

            // Skip empty lines
            if line.trim().is_empty() {
                continue;
            }

            let values = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<i64>().map_err(|_| MeshError::Parse {
                        line: self.line_number,
                        message: format!("`{token}` is not an integer"),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            return Ok((self.line_number, values));
        }
    }

    /// Next record that must hold exactly `N` integers.
    fn next_fixed<const N: usize>(&mut self, expected: &str) -> Result<(usize, [i64; N])> {
        let (line, values) = self.next_record(expected)?;
        let arity = values.len();
        let values: [i64; N] = values.try_into().map_err(|_| MeshError::Parse {
            line,
            message: format!("{expected} needs {N} integers, found {arity}"),
        })?;
        Ok((line, values))
    }

    fn remaining_records(&mut self) -> usize {
        self.lines
            .by_ref()
            .map_while(|line| line.ok())
            .filter(|line| !line.trim().is_empty())
            .count()
    }
}

fn count(value: i64, line: usize, what: &str) -> Result<usize> {
    usize::try_from(value).map_err(|_| MeshError::Parse {
        line,
        message: format!("{what} count must not be negative, found {value}"),
    })
}

/// Turns a 1-based reference into a 0-based position, rejecting anything out of range.
fn index(value: i64, count: usize, kind: &'static str, line: usize) -> Result<usize> {
    match usize::try_from(value) {
        Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
        _ => Err(MeshError::IndexOutOfRange {
            line,
            kind,
            index: value,
            count,
        }),
    }
}

/// Reads the polygon-list format: `n f`, `n` lines of `x y`, then `f` lines of
/// 1-based vertex indices.
pub fn read_polygon_mesh<R: BufRead>(reader: R) -> Result<PolygonMesh> {
    let mut records = Records::new(reader);

    let (line, [n, f]) = records.next_fixed::<2>("header `n f`")?;
    let n = count(n, line, "vertex")?;
    let f = count(f, line, "face")?;

    let mut vertices = Vec::with_capacity(n.min(PREALLOCATION_LIMIT));
    for i in 1..=n {
        let (_, [x, y]) = records.next_fixed::<2>(&format!("vertex {i}"))?;
        vertices.push(Point::new(x, y));
    }

    let mut faces = Vec::with_capacity(f.min(PREALLOCATION_LIMIT));
    for i in 1..=f {
        let (line, values) = records.next_record(&format!("face {i}"))?;
        if values.len() < 3 {
            return Err(MeshError::Parse {
                line,
                message: format!(
                    "face {i} has {} vertices, at least 3 are required",
                    values.len()
                ),
            });
        }
        let face = values
            .into_iter()
            .map(|v| index(v, n, "vertex", line).map(VertexId))
            .collect::<Result<Vec<_>>>()?;
        faces.push(face);
    }

    let trailing = records.remaining_records();
    if trailing > 0 {
        log::debug!("ignoring {trailing} trailing lines after the last face");
    }
    log::info!("read polygon mesh: {n} vertices, {f} faces");

    PolygonMesh::new(vertices, faces)
}

/// Reads the DCEL format: `v a f`, `v` lines of `x y e`, `f` lines of `e`, then `2a`
/// lines of `origin twin face next prev`. All references are 1-based; a vertex edge
/// of `0` means the vertex has no incident half-edge.
pub fn read_dcel<R: BufRead>(reader: R) -> Result<DCEL> {
    let mut records = Records::new(reader);

    let (line, [v, a, f]) = records.next_fixed::<3>("header `v a f`")?;
    let nv = count(v, line, "vertex")?;
    let a = count(a, line, "edge")?;
    let nf = count(f, line, "face")?;
    let ne = a.checked_mul(2).ok_or_else(|| MeshError::Parse {
        line,
        message: format!("edge count {a} is too large"),
    })?;

    let mut vertices = Vec::with_capacity(nv.min(PREALLOCATION_LIMIT));
    for i in 1..=nv {
        let (line, [x, y, e]) = records.next_fixed::<3>(&format!("vertex {i}"))?;
        let edge = match e {
            0 => None,
            e => Some(HalfEdgeId(index(e, ne, "half-edge", line)?)),
        };
        vertices.push(Vertex {
            pos: Point::new(x, y),
            edge,
        });
    }

    let mut faces = Vec::with_capacity(nf.min(PREALLOCATION_LIMIT));
    for i in 1..=nf {
        let (line, [e]) = records.next_fixed::<1>(&format!("face {i}"))?;
        faces.push(Face {
            edge: HalfEdgeId(index(e, ne, "half-edge", line)?),
        });
    }

    let mut half_edges = Vec::with_capacity(ne.min(PREALLOCATION_LIMIT));
    for i in 1..=ne {
        let (line, [origin, twin, face, next, prev]) =
            records.next_fixed::<5>(&format!("half-edge {i}"))?;
        half_edges.push(HalfEdge {
            origin: VertexId(index(origin, nv, "vertex", line)?),
            twin: HalfEdgeId(index(twin, ne, "half-edge", line)?),
            face: FaceId(index(face, nf, "face", line)?),
            next: HalfEdgeId(index(next, ne, "half-edge", line)?),
            prev: HalfEdgeId(index(prev, ne, "half-edge", line)?),
        });
    }

    let trailing = records.remaining_records();
    if trailing > 0 {
        log::debug!("ignoring {trailing} trailing lines after the last half-edge");
    }
    log::info!("read DCEL: {nv} vertices, {ne} half-edges, {nf} faces");

    DCEL::new(vertices, half_edges, faces)
}

pub fn load_polygon_mesh(path: impl AsRef<Path>) -> Result<PolygonMesh> {
    let file = fs::File::open(path)?;
    read_polygon_mesh(BufReader::new(file))
}

pub fn load_dcel(path: impl AsRef<Path>) -> Result<DCEL> {
    let file = fs::File::open(path)?;
    read_dcel(BufReader::new(file))
}
