use crate::config::{EDGE_COLOR, EDGE_WIDTH};
use crate::error::Result;
use crate::mesh::dcel::DCEL;
use crate::mesh::{Bounds, to_world};
use crate::render::palette::FaceColors;
use crate::render::{Scene, Shape};

pub struct DcelDrawer;

impl DcelDrawer {
    /// Every face filled along its `next` ring, then every half-edge as a thin segment
    /// from its origin to the origin of its `next`.
    pub fn scene(dcel: &DCEL, colors: &mut FaceColors) -> Result<Scene> {
        let mut scene = Scene::new(Bounds::of(dcel.vertices().iter().map(|v| &v.pos)));

        for f in dcel.face_ids() {
            let polygon = dcel.face_polygon(f)?;
            log::debug!("face {f}: {} boundary points", polygon.len());
            scene.push(Shape::FilledPolygon {
                points: polygon.iter().map(to_world).collect(),
                color: colors.next_color(),
            });
        }

        for e in dcel.half_edge_ids() {
            let (from, to) = dcel.segment(e);
            scene.push(Shape::Segment {
                from: to_world(&from),
                to: to_world(&to),
                color: EDGE_COLOR,
                width: EDGE_WIDTH,
            });
        }

        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use crate::io::read_dcel;
    use crate::test_utils::SQUARE_DCEL;

    #[test]
    fn one_fill_per_face_and_one_segment_per_half_edge() {
        let dcel = read_dcel(SQUARE_DCEL.as_bytes()).unwrap();
        let scene = DcelDrawer::scene(&dcel, &mut FaceColors::new(Some(5))).unwrap();
        assert_eq!(scene.filled_polygons().count(), 2);
        assert_eq!(scene.segments().count(), 8);

        for shape in scene.filled_polygons() {
            let Shape::FilledPolygon { points, .. } = shape else {
                unreachable!()
            };
            assert_eq!(points.len(), 4);
        }
    }

    #[test]
    fn broken_ring_is_an_error() {
        let text = SQUARE_DCEL.replace("4 8 1 1 3", "4 8 1 2 3");
        let dcel = read_dcel(text.as_bytes()).unwrap();
        assert!(matches!(
            DcelDrawer::scene(&dcel, &mut FaceColors::new(Some(5))),
            Err(MeshError::OpenRing { .. })
        ));
    }
}
