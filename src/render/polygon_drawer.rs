use crate::config::{
    AXIS_COLOR, EDGE_COLOR, EDGE_WIDTH, FIGURE_EDGE_COLOR, FIGURE_EDGE_WIDTH, GRID_COLOR,
    LABEL_BACKGROUND, LABEL_COLOR, MARKER_OUTLINE_COLOR, MARKER_RADIUS, VERTEX_RADIUS,
};
use crate::mesh::polygon::PolygonMesh;
use crate::mesh::{Bounds, to_world};
use crate::render::palette::{FaceColors, marker_color};
use crate::render::{Scene, Shape};
use image::Rgb;

pub struct PolygonDrawer;

impl PolygonDrawer {
    /// Filled faces in random pastel colours, thin outlines and vertex dots.
    pub fn filled(mesh: &PolygonMesh, colors: &mut FaceColors) -> Scene {
        let mut scene = Scene::new(Bounds::of(mesh.vertices()));

        for f in mesh.face_ids() {
            scene.push(Shape::FilledPolygon {
                points: mesh.face_polygon(f).iter().map(to_world).collect(),
                color: colors.next_color(),
            });
        }
        Self::push_sides(&mut scene, mesh, EDGE_COLOR, EDGE_WIDTH);

        for p in mesh.vertices() {
            scene.push(Shape::Marker {
                center: to_world(p),
                radius: VERTEX_RADIUS,
                fill: EDGE_COLOR,
                outline: None,
            });
        }

        scene
    }

    /// Cartesian figure: dashed axes and grid, thick sides, coloured vertex markers
    /// labelled with their 1-based index.
    pub fn figure(mesh: &PolygonMesh) -> Scene {
        let mut scene = Scene::new(Bounds::of(mesh.vertices()));
        scene.push(Shape::Grid { color: GRID_COLOR });
        scene.push(Shape::Axes { color: AXIS_COLOR });

        Self::push_sides(&mut scene, mesh, FIGURE_EDGE_COLOR, FIGURE_EDGE_WIDTH);

        for (i, p) in mesh.vertices().iter().enumerate() {
            scene.push(Shape::Marker {
                center: to_world(p),
                radius: MARKER_RADIUS,
                fill: marker_color(i),
                outline: Some(MARKER_OUTLINE_COLOR),
            });
        }
        for (v, p) in mesh.vertex_ids().zip(mesh.vertices()) {
            scene.push(Shape::Label {
                anchor: to_world(p),
                text: v.to_string(),
                color: LABEL_COLOR,
                background: Some(LABEL_BACKGROUND),
            });
        }

        scene
    }

    /// One segment per face side, so shared edges are drawn once from each face.
    fn push_sides(scene: &mut Scene, mesh: &PolygonMesh, color: Rgb<u8>, width: f32) {
        for (_, a, b) in mesh.sides() {
            scene.push(Shape::Segment {
                from: to_world(&mesh.point(a)),
                to: to_world(&mesh.point(b)),
                color,
                width,
            });
        }
    }
}
