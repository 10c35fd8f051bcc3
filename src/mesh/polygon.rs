use crate::error::{MeshError, Result};
use crate::mesh::{FaceId, Point, VertexId};
use itertools::Itertools;

/// A planar mesh given as a point list and faces listing their boundary vertices in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonMesh {
    vertices: Vec<Point>,
    faces: Vec<Vec<VertexId>>,
}

impl PolygonMesh {
    /// Every face must reference existing vertices and list at least three of them.
    pub fn new(vertices: Vec<Point>, faces: Vec<Vec<VertexId>>) -> Result<Self> {
        for (i, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::FaceTooShort {
                    face: i + 1,
                    len: face.len(),
                });
            }
            if let Some(v) = face.iter().find(|v| v.index() >= vertices.len()) {
                return Err(MeshError::DanglingReference {
                    owner: format!("face {}", i + 1),
                    kind: "vertex",
                    index: v.number(),
                    count: vertices.len(),
                });
            }
        }

        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Vec<VertexId>] {
        &self.faces
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(FaceId)
    }

    pub fn point(&self, v: VertexId) -> Point {
        self.vertices[v.index()]
    }

    pub fn face(&self, f: FaceId) -> &[VertexId] {
        &self.faces[f.index()]
    }

    /// Boundary coordinates of a face in input order.
    pub fn face_polygon(&self, f: FaceId) -> Vec<Point> {
        self.face(f).iter().map(|&v| self.point(v)).collect()
    }

    /// Directed sides of a face, closing back to the first vertex.
    pub fn face_sides(&self, f: FaceId) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.face(f)
            .iter()
            .copied()
            .circular_tuple_windows::<(VertexId, VertexId)>()
    }

    /// Every directed side of every face, tagged with its face.
    pub fn sides(&self) -> impl Iterator<Item = (FaceId, VertexId, VertexId)> + '_ {
        self.face_ids()
            .flat_map(move |f| self.face_sides(f).map(move |(a, b)| (f, a, b)))
    }
}
