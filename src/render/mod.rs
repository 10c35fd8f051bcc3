pub mod dcel_drawer;
pub mod glyphs;
pub mod palette;
pub mod polygon_drawer;
pub mod raster;

use crate::config::{BACKGROUND_COLOR, MARGIN_FRACTION};
use crate::error::Result;
use crate::mesh::Bounds;
use image::{Rgb, RgbImage};
use nalgebra::Point2;
use std::fs;
use std::path::{Path, PathBuf};

/// World-space drawing primitive. Widths and radii are in pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    FilledPolygon {
        points: Vec<Point2<f64>>,
        color: Rgb<u8>,
    },
    Segment {
        from: Point2<f64>,
        to: Point2<f64>,
        color: Rgb<u8>,
        width: f32,
    },
    /// Dashed lines through the world origin, across the whole frame.
    Axes { color: Rgb<u8> },
    /// Dashed grid at "nice" world spacing, across the whole frame.
    Grid { color: Rgb<u8> },
    Marker {
        center: Point2<f64>,
        radius: f32,
        fill: Rgb<u8>,
        outline: Option<Rgb<u8>>,
    },
    /// Text placed right of `anchor`, vertically centred on it.
    Label {
        anchor: Point2<f64>,
        text: String,
        color: Rgb<u8>,
        background: Option<Rgb<u8>>,
    },
}

/// Display list drawn back to front over a region of the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub bounds: Bounds,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn segments(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Segment { .. }))
    }

    pub fn filled_polygons(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::FilledPolygon { .. }))
    }
}

/// Maps world coordinates to pixels with equal scale on both axes and y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    min: Point2<f64>,
    scale: f64,
    margin: f64,
    width: u32,
    height: u32,
}

impl Viewport {
    /// Fits `bounds` into a frame whose longer side is `long_side` pixels.
    /// A zero extent is treated as one world unit.
    pub fn fit(bounds: &Bounds, long_side: u32) -> Self {
        let long_side = long_side.max(1) as f64;
        let dx = bounds.width().max(1.);
        let dy = bounds.height().max(1.);
        let margin = (long_side * MARGIN_FRACTION).round();
        let scale = (long_side - 2. * margin).max(1.) / dx.max(dy);

        let min = Point2::new(
            bounds.min.x - (dx - bounds.width()) / 2.,
            bounds.min.y - (dy - bounds.height()) / 2.,
        );

        Self {
            min,
            scale,
            margin,
            width: ((dx * scale + 2. * margin).round() as u32).max(1),
            height: ((dy * scale + 2. * margin).round() as u32).max(1),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn to_pixel(&self, p: &Point2<f64>) -> (f32, f32) {
        let x = self.margin + (p.x - self.min.x) * self.scale;
        let y = self.height as f64 - self.margin - (p.y - self.min.y) * self.scale;
        (x as f32, y as f32)
    }

    pub fn to_world(&self, x: f32, y: f32) -> Point2<f64> {
        Point2::new(
            (x as f64 - self.margin) / self.scale + self.min.x,
            (self.height as f64 - self.margin - y as f64) / self.scale + self.min.y,
        )
    }

    /// World rectangle covered by the whole frame, margins included.
    pub fn visible(&self) -> Bounds {
        let a = self.to_world(0., self.height as f32);
        let b = self.to_world(self.width as f32, 0.);
        Bounds { min: a, max: b }
    }
}

pub trait Renderer {
    fn frame_size(&self, scene: &Scene) -> (u32, u32);

    fn create_frame(&mut self, scene: &Scene) -> RgbImage {
        let (width, height) = self.frame_size(scene);
        let mut image = RgbImage::from_pixel(width, height, BACKGROUND_COLOR);
        self.create_frame_mut(&mut image, scene);
        image
    }

    fn create_frame_mut(&mut self, image: &mut RgbImage, scene: &Scene);
}

/// `<out_dir>/<input stem>.png`
pub fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());
    out_dir.join(format!("{stem}.png"))
}

/// Saves `image` as PNG next to its siblings in `out_dir`, creating the directory.
pub fn save_png(image: &RgbImage, out_dir: &Path, input: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let path = output_path(out_dir, input);
    image.save_with_format(&path, image::ImageFormat::Png)?;
    log::info!(
        "wrote {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(path)
}
