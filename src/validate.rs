//! Planar subdivision checks for polygon meshes.
//!
//! A mesh passes when it is closed (every side has a reverse side), every undirected
//! edge is used by exactly two face sides, no face crosses itself and no vertex lies on
//! the border of or inside a counter-clockwise face it does not belong to. The outer
//! face is the clockwise one and is exempt from the containment test.

use crate::mesh::polygon::PolygonMesh;
use crate::mesh::{FaceId, VertexId};
use crate::utils::geometry::{area_sign, inside_polygon, on_polygon_border, segments_intersect};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

/// Broad verdict reported for a failed mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefectKind {
    Open,
    NotPlanarSubdivision,
    Overlapping,
    Degenerate,
}

/// First reason a polygon mesh is not a valid planar subdivision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshDefect {
    #[error("open: side ({from}, {to}) has no reverse side")]
    Open { from: VertexId, to: VertexId },

    #[error("not a planar subdivision: side ({from}, {to}) and its reverse appear {count} times")]
    SharedSide {
        from: VertexId,
        to: VertexId,
        count: usize,
    },

    #[error("not a planar subdivision: side ({from}, {to}) appears {count} times in face {face}")]
    RepeatedSide {
        from: VertexId,
        to: VertexId,
        face: FaceId,
        count: usize,
    },

    #[error("overlapping: face {face} crosses itself at sides ({}, {}) and ({}, {})", .first.0, .first.1, .second.0, .second.1)]
    SelfIntersection {
        face: FaceId,
        first: (VertexId, VertexId),
        second: (VertexId, VertexId),
    },

    #[error("overlapping: vertex {vertex} lies on the border of face {face}")]
    VertexOnBorder { vertex: VertexId, face: FaceId },

    #[error("overlapping: vertex {vertex} lies inside face {face}")]
    VertexInside { vertex: VertexId, face: FaceId },

    #[error("face {face} has zero area")]
    DegenerateFace { face: FaceId },
}

impl MeshDefect {
    pub fn kind(&self) -> DefectKind {
        match self {
            MeshDefect::Open { .. } => DefectKind::Open,
            MeshDefect::SharedSide { .. } | MeshDefect::RepeatedSide { .. } => {
                DefectKind::NotPlanarSubdivision
            }
            MeshDefect::SelfIntersection { .. }
            | MeshDefect::VertexOnBorder { .. }
            | MeshDefect::VertexInside { .. } => DefectKind::Overlapping,
            MeshDefect::DegenerateFace { .. } => DefectKind::Degenerate,
        }
    }
}

/// Runs every check in order and returns the first defect found.
pub fn check_mesh(mesh: &PolygonMesh) -> Result<(), MeshDefect> {
    check_sides(mesh)?;
    check_self_intersections(mesh)?;
    check_containment(mesh)?;
    log::debug!(
        "mesh with {} vertices and {} faces is a planar subdivision",
        mesh.vertices().len(),
        mesh.faces().len()
    );
    Ok(())
}

/// Side census. A side repeated inside one face wins over a shared-side count,
/// which wins over a missing reverse side.
pub fn check_sides(mesh: &PolygonMesh) -> Result<(), MeshDefect> {
    let mut side_faces: BTreeMap<(VertexId, VertexId), Vec<FaceId>> = BTreeMap::new();
    for (f, a, b) in mesh.sides() {
        side_faces.entry((a, b)).or_default().push(f);
    }

    for (&(from, to), faces) in &side_faces {
        let mut per_face: HashMap<FaceId, usize> = HashMap::new();
        for &f in faces {
            *per_face.entry(f).or_default() += 1;
        }
        if let Some((&face, &count)) = per_face.iter().filter(|(_, c)| **c > 1).min() {
            return Err(MeshDefect::RepeatedSide {
                from,
                to,
                face,
                count,
            });
        }
    }

    let mut open = None;
    let mut shared = None;
    let mut processed = HashSet::new();
    for (&(from, to), faces) in &side_faces {
        if processed.contains(&(from, to)) {
            continue;
        }
        let Some(reverse) = side_faces.get(&(to, from)) else {
            open.get_or_insert(MeshDefect::Open { from, to });
            continue;
        };

        let count = faces.len() + reverse.len();
        if count != 2 {
            shared.get_or_insert(MeshDefect::SharedSide { from, to, count });
        }
        processed.insert((from, to));
        processed.insert((to, from));
    }

    match shared.or(open) {
        Some(defect) => Err(defect),
        None => Ok(()),
    }
}

/// Non-adjacent sides of one face must not touch.
pub fn check_self_intersections(mesh: &PolygonMesh) -> Result<(), MeshDefect> {
    for f in mesh.face_ids() {
        let face = mesh.face(f);
        let pts = mesh.face_polygon(f);
        let n = face.len();

        for i in 0..n {
            let i_next = (i + 1) % n;
            for j in 0..n {
                let j_next = (j + 1) % n;
                if i == j || i == j_next || i_next == j || i_next == j_next {
                    continue;
                }
                if segments_intersect(&pts[i], &pts[i_next], &pts[j], &pts[j_next]) {
                    return Err(MeshDefect::SelfIntersection {
                        face: f,
                        first: (face[i], face[i_next]),
                        second: (face[j], face[j_next]),
                    });
                }
            }
        }
    }

    Ok(())
}

/// No vertex may sit on or inside a counter-clockwise face it is not part of.
pub fn check_containment(mesh: &PolygonMesh) -> Result<(), MeshDefect> {
    for f in mesh.face_ids() {
        let polygon = mesh.face_polygon(f);
        match area_sign(&polygon) {
            Ordering::Equal => return Err(MeshDefect::DegenerateFace { face: f }),
            Ordering::Less => continue,
            Ordering::Greater => {}
        }

        let face = mesh.face(f);
        for v in mesh.vertex_ids().filter(|v| !face.contains(v)) {
            let p = mesh.point(v);
            if on_polygon_border(&p, &polygon) {
                return Err(MeshDefect::VertexOnBorder { vertex: v, face: f });
            }
            if inside_polygon(&p, &polygon) {
                return Err(MeshDefect::VertexInside { vertex: v, face: f });
            }
        }
    }

    Ok(())
}
