use crate::error::{MeshError, Result};
use crate::mesh::polygon::PolygonMesh;
use crate::mesh::{FaceId, HalfEdgeId, Point, VertexId};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Point,
    pub edge: Option<HalfEdgeId>, // Одно из исходящих полурёбер
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub edge: HalfEdgeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    pub origin: VertexId, // Начальная вершина
    pub twin: HalfEdgeId, // Парное полуребро
    pub face: FaceId,     // Принадлежащая грань
    pub next: HalfEdgeId, // Следующее полуребро грани
    pub prev: HalfEdgeId, // Предыдущее полуребро грани
}

/// Doubly-connected edge list. Every id stored inside refers to an existing entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DCEL {
    vertices: Vec<Vertex>,
    half_edges: Vec<HalfEdge>,
    faces: Vec<Face>,
}

impl DCEL {
    /// Checks every reference against the entity counts before accepting the records.
    /// The half-edge count must be even, since the text header stores twin pairs.
    pub fn new(vertices: Vec<Vertex>, half_edges: Vec<HalfEdge>, faces: Vec<Face>) -> Result<Self> {
        let (nv, ne, nf) = (vertices.len(), half_edges.len(), faces.len());
        if ne % 2 != 0 {
            return Err(MeshError::OddHalfEdgeCount { count: ne });
        }
        let dangling = |owner: String, kind: &'static str, index: usize, count: usize| {
            MeshError::DanglingReference {
                owner,
                kind,
                index: index + 1,
                count,
            }
        };

        for (i, v) in vertices.iter().enumerate() {
            if let Some(e) = v.edge.filter(|e| e.index() >= ne) {
                return Err(dangling(format!("vertex {}", i + 1), "half-edge", e.index(), ne));
            }
        }
        for (i, f) in faces.iter().enumerate() {
            if f.edge.index() >= ne {
                return Err(dangling(format!("face {}", i + 1), "half-edge", f.edge.index(), ne));
            }
        }
        for (i, he) in half_edges.iter().enumerate() {
            let owner = || format!("half-edge {}", i + 1);
            if he.origin.index() >= nv {
                return Err(dangling(owner(), "vertex", he.origin.index(), nv));
            }
            if he.face.index() >= nf {
                return Err(dangling(owner(), "face", he.face.index(), nf));
            }
            for e in [he.twin, he.next, he.prev] {
                if e.index() >= ne {
                    return Err(dangling(owner(), "half-edge", e.index(), ne));
                }
            }
        }

        Ok(Self {
            vertices,
            half_edges,
            faces,
        })
    }

    /// Builds the half-edge structure of a closed polygon mesh.
    ///
    /// Half-edges are numbered face by face, following each face's vertex order, so
    /// `next` and `prev` stay inside the face and `twin` is the half-edge of the reversed
    /// side. Every side must have a reverse side; run the validator first.
    pub fn from_polygon_mesh(mesh: &PolygonMesh) -> Result<Self> {
        let mut half_edges = Vec::new();
        let mut ends = Vec::new();
        let mut faces = Vec::new();
        let mut side_map: HashMap<(VertexId, VertexId), HalfEdgeId> = HashMap::new();

        // 1. Полурёбра граней, next/prev внутри каждой грани.
        for f in mesh.face_ids() {
            let first = half_edges.len();
            let n = mesh.face(f).len();
            faces.push(Face {
                edge: HalfEdgeId(first),
            });
            for (i, (a, b)) in mesh.face_sides(f).enumerate() {
                let idx = HalfEdgeId(first + i);
                side_map.insert((a, b), idx);
                ends.push(b);
                half_edges.push(HalfEdge {
                    origin: a,
                    twin: idx,
                    face: f,
                    next: HalfEdgeId(first + (i + 1) % n),
                    prev: HalfEdgeId(first + (i + n - 1) % n),
                });
            }
        }

        // 2. Связывание близнецов.
        for (he, &to) in half_edges.iter_mut().zip(&ends) {
            he.twin = *side_map
                .get(&(to, he.origin))
                .ok_or(MeshError::MissingTwin {
                    from: he.origin.number(),
                    to: to.number(),
                })?;
        }

        let mut vertices: Vec<Vertex> = mesh
            .vertices()
            .iter()
            .map(|&pos| Vertex { pos, edge: None })
            .collect();
        for (i, he) in half_edges.iter().enumerate() {
            vertices[he.origin.index()].edge.get_or_insert(HalfEdgeId(i));
        }

        log::debug!(
            "built DCEL with {} vertices, {} half-edges, {} faces",
            vertices.len(),
            half_edges.len(),
            faces.len()
        );

        Ok(Self {
            vertices,
            half_edges,
            faces,
        })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.index()]
    }

    pub fn half_edge(&self, e: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[e.index()]
    }

    pub fn face(&self, f: FaceId) -> &Face {
        &self.faces[f.index()]
    }

    pub fn half_edge_ids(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        (0..self.half_edges.len()).map(HalfEdgeId)
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(FaceId)
    }

    /// Number of twin pairs, the `a` of the text header.
    pub fn edge_pair_count(&self) -> usize {
        self.half_edges.len() / 2
    }

    /// Half-edges met by following `next` from `start` until it comes back.
    ///
    /// A ring can hold at most every half-edge once, so the walk stops with
    /// [`MeshError::OpenRing`] after that many steps.
    pub fn ring(&self, start: HalfEdgeId) -> Result<Vec<HalfEdgeId>> {
        let limit = self.half_edges.len();
        let mut ring = vec![start];
        let mut curr = self.half_edge(start).next;
        while curr != start {
            if ring.len() >= limit {
                return Err(MeshError::OpenRing {
                    start: start.number(),
                    limit,
                });
            }
            ring.push(curr);
            curr = self.half_edge(curr).next;
        }

        Ok(ring)
    }

    /// Origins of the half-edges around a face, starting at its reference edge.
    pub fn face_boundary(&self, f: FaceId) -> Result<Vec<VertexId>> {
        Ok(self
            .ring(self.face(f).edge)?
            .into_iter()
            .map(|e| self.half_edge(e).origin)
            .collect())
    }

    /// Boundary coordinates of a face.
    pub fn face_polygon(&self, f: FaceId) -> Result<Vec<Point>> {
        Ok(self
            .face_boundary(f)?
            .into_iter()
            .map(|v| self.vertex(v).pos)
            .collect())
    }

    /// Segment from a half-edge's origin to the origin of its `next`.
    pub fn segment(&self, e: HalfEdgeId) -> (Point, Point) {
        let he = self.half_edge(e);
        (
            self.vertex(he.origin).pos,
            self.vertex(self.half_edge(he.next).origin).pos,
        )
    }

    /// Lists every broken link: asymmetric twins, `next`/`prev` mismatches,
    /// rings that mix faces and vertices whose edge does not start at them.
    pub fn consistency_report(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for e in self.half_edge_ids() {
            let he = self.half_edge(e);
            if self.half_edge(he.twin).twin != e {
                problems.push(format!("half-edge {e}: twin of twin {} is not itself", he.twin));
            }
            if he.twin == e {
                problems.push(format!("half-edge {e}: is its own twin"));
            }
            if self.half_edge(he.next).prev != e {
                problems.push(format!("half-edge {e}: next {} has another prev", he.next));
            }
            if self.half_edge(he.prev).next != e {
                problems.push(format!("half-edge {e}: prev {} has another next", he.prev));
            }
            if self.half_edge(he.next).face != he.face {
                problems.push(format!(
                    "half-edge {e}: next {} lies on face {} instead of {}",
                    he.next,
                    self.half_edge(he.next).face,
                    he.face
                ));
            }
        }

        for (i, v) in self.vertices.iter().enumerate() {
            if let Some(e) = v.edge {
                if self.half_edge(e).origin != VertexId(i) {
                    problems.push(format!("vertex {}: edge {e} does not start here", i + 1));
                }
            }
        }

        for f in self.face_ids() {
            let edge = self.face(f).edge;
            if self.half_edge(edge).face != f {
                problems.push(format!("face {f}: edge {edge} belongs to another face"));
            }
            if let Err(err) = self.ring(edge) {
                problems.push(format!("face {f}: {err}"));
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit square: inner face 1 (counter-clockwise) and outer face 2.
    /// Rows are `origin twin face next prev`, 1-based as in the text format.
    const SQUARE: [[usize; 5]; 8] = [
        [1, 5, 1, 2, 4],
        [2, 6, 1, 3, 1],
        [3, 7, 1, 4, 2],
        [4, 8, 1, 1, 3],
        [2, 1, 2, 8, 6],
        [3, 2, 2, 5, 7],
        [4, 3, 2, 6, 8],
        [1, 4, 2, 7, 5],
    ];

    fn build(rows: &[[usize; 5]], face_edges: &[usize]) -> Result<DCEL> {
        let vertices = [(0, 0), (1, 0), (1, 1), (0, 1)]
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Vertex {
                pos: Point::new(x, y),
                edge: Some(HalfEdgeId(i)),
            })
            .collect();
        let half_edges = rows
            .iter()
            .map(|r| HalfEdge {
                origin: VertexId::from_number(r[0]),
                twin: HalfEdgeId::from_number(r[1]),
                face: FaceId::from_number(r[2]),
                next: HalfEdgeId::from_number(r[3]),
                prev: HalfEdgeId::from_number(r[4]),
            })
            .collect();
        let faces = face_edges
            .iter()
            .map(|&e| Face {
                edge: HalfEdgeId::from_number(e),
            })
            .collect();
        DCEL::new(vertices, half_edges, faces)
    }

    #[test]
    fn boundary_of_inner_face() {
        let dcel = build(&SQUARE, &[1, 5]).unwrap();
        assert_eq!(
            dcel.face_polygon(FaceId(0)).unwrap(),
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(0, 1),
            ]
        );
    }

    #[test]
    fn boundary_length_does_not_depend_on_reference_edge() {
        for start in 1..=4 {
            let dcel = build(&SQUARE, &[start, 5]).unwrap();
            let boundary = dcel.face_boundary(FaceId(0)).unwrap();
            assert_eq!(boundary.len(), 4);

            let mut sorted = boundary.clone();
            sorted.sort();
            assert_eq!(sorted, (0..4).map(VertexId).collect::<Vec<_>>());
        }
    }

    #[test]
    fn boundary_length_matches_face_labels() {
        let dcel = build(&SQUARE, &[3, 7]).unwrap();
        for f in dcel.face_ids() {
            let labelled = dcel.half_edges().iter().filter(|he| he.face == f).count();
            assert_eq!(dcel.face_boundary(f).unwrap().len(), labelled);
        }
    }

    #[test]
    fn open_ring_is_reported() {
        let mut rows = SQUARE;
        // 4 -> 2 instead of 4 -> 1: the walk from 1 circles 2, 3, 4 forever
        rows[3][3] = 2;
        let dcel = build(&rows, &[1, 5]).unwrap();
        assert!(matches!(
            dcel.face_boundary(FaceId(0)),
            Err(MeshError::OpenRing { start: 1, limit: 8 })
        ));
        assert!(!dcel.consistency_report().is_empty());
    }

    #[test]
    fn dangling_reference_is_rejected() {
        let mut rows = SQUARE;
        rows[2][1] = 9;
        assert!(matches!(
            build(&rows, &[1, 5]),
            Err(MeshError::DanglingReference {
                kind: "half-edge",
                index: 9,
                count: 8,
                ..
            })
        ));
        assert!(matches!(
            build(&SQUARE, &[1, 5, 12]),
            Err(MeshError::DanglingReference { index: 12, .. })
        ));
    }

    #[test]
    fn unpaired_half_edge_is_rejected() {
        assert!(matches!(
            build(&SQUARE[..7], &[1, 5]),
            Err(MeshError::OddHalfEdgeCount { count: 7 })
        ));
    }

    #[test]
    fn consistent_square_has_no_report() {
        let dcel = build(&SQUARE, &[1, 5]).unwrap();
        assert!(dcel.consistency_report().is_empty());
        assert_eq!(dcel.edge_pair_count(), 4);
    }

    #[test]
    fn segment_ends_at_next_origin() {
        let dcel = build(&SQUARE, &[1, 5]).unwrap();
        assert_eq!(
            dcel.segment(HalfEdgeId(4)),
            (Point::new(1, 0), Point::new(0, 0))
        );
    }

    #[test]
    fn built_from_polygons_matches_faces() {
        let mesh = PolygonMesh::new(
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(0, 1),
            ],
            [[1, 2, 3, 4], [1, 4, 3, 2]]
                .iter()
                .map(|f| f.iter().map(|&n| VertexId::from_number(n)).collect())
                .collect(),
        )
        .unwrap();
        let dcel = DCEL::from_polygon_mesh(&mesh).unwrap();

        assert_eq!(dcel.half_edges().len(), 8);
        assert!(dcel.consistency_report().is_empty());
        for f in dcel.face_ids() {
            assert_eq!(dcel.face_boundary(f).unwrap(), mesh.face(f));
        }
        assert_eq!(dcel.vertex(VertexId(3)).edge, Some(HalfEdgeId(3)));
    }

    #[test]
    fn building_open_mesh_fails() {
        let mesh = PolygonMesh::new(
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(0, 1)],
            vec![vec![VertexId(0), VertexId(1), VertexId(2)]],
        )
        .unwrap();
        assert!(matches!(
            DCEL::from_polygon_mesh(&mesh),
            Err(MeshError::MissingTwin { .. })
        ));
    }
}
