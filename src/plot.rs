use crate::config::RenderConfig;
use crate::error::{MeshError, Result};
use crate::io::{load_dcel, load_polygon_mesh};
use crate::render::dcel_drawer::DcelDrawer;
use crate::render::palette::FaceColors;
use crate::render::polygon_drawer::PolygonDrawer;
use crate::render::raster::Rasterizer;
use crate::render::{Renderer, Scene, save_png};
use std::path::{Path, PathBuf};

/// What to draw and from which input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Polygon list, faces filled.
    Polygons,
    /// Polygon list, labelled figure on cartesian axes.
    Figure,
    /// Half-edge list, faces resolved through `next` rings.
    Dcel,
}

impl Variant {
    pub fn default_out_dir(self) -> &'static Path {
        match self {
            Variant::Polygons | Variant::Figure => Path::new("imgs"),
            Variant::Dcel => Path::new("valid"),
        }
    }
}

/// Reads `input` and builds the scene for `variant`.
pub fn build_scene(variant: Variant, input: &Path, config: &RenderConfig) -> Result<Scene> {
    let mut colors = FaceColors::new(config.seed);

    match variant {
        Variant::Polygons | Variant::Figure => {
            let mesh = load_polygon_mesh(input)?;
            if mesh.vertices().is_empty() {
                return Err(MeshError::Empty);
            }
            Ok(match variant {
                Variant::Figure => PolygonDrawer::figure(&mesh),
                _ => PolygonDrawer::filled(&mesh, &mut colors),
            })
        }
        Variant::Dcel => {
            let dcel = load_dcel(input)?;
            if dcel.vertices().is_empty() {
                return Err(MeshError::Empty);
            }
            for problem in dcel.consistency_report() {
                log::warn!("{problem}");
            }
            DcelDrawer::scene(&dcel, &mut colors)
        }
    }
}

/// Renders `input` and writes `<out_dir>/<input stem>.png`, returning the written path.
pub fn render_file(
    variant: Variant,
    input: &Path,
    out_dir: &Path,
    config: &RenderConfig,
) -> Result<PathBuf> {
    let scene = build_scene(variant, input, config)?;
    log::debug!("{variant:?} scene of {} shapes", scene.shapes.len());

    let image = Rasterizer::new(config.size).create_frame(&scene);
    save_png(&image, out_dir, input)
}
