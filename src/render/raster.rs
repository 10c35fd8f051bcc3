use crate::config::{DASH_LENGTH, DEFAULT_IMAGE_SIZE, GRID_TARGET_LINES, LABEL_SCALE};
use crate::render::glyphs::{draw_text_mut, text_size};
use crate::render::{Renderer, Scene, Shape, Viewport};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut,
    draw_polygon_mut,
};
use imageproc::point::Point;
use imageproc::rect::Rect;
use nalgebra::Point2;

/// Draws a scene's display list with `imageproc`.
pub struct Rasterizer {
    size: u32,
}

impl Rasterizer {
    pub fn new(size: u32) -> Self {
        Self { size: size.max(1) }
    }

    /// Strokes and radii are tuned for the default size and grow with the frame.
    fn stroke_scale(&self) -> f32 {
        self.size as f32 / DEFAULT_IMAGE_SIZE as f32
    }

    fn draw_filled_polygon(image: &mut RgbImage, viewport: &Viewport, points: &[Point2<f64>], color: Rgb<u8>) {
        let mut poly: Vec<Point<i32>> = Vec::with_capacity(points.len());
        for p in points {
            let (x, y) = viewport.to_pixel(p);
            let px = Point::new(x.round() as i32, y.round() as i32);
            if poly.last() != Some(&px) {
                poly.push(px);
            }
        }
        // draw_polygon_mut wants an open polygon
        while poly.len() > 1 && poly.first() == poly.last() {
            poly.pop();
        }
        if poly.len() >= 3 {
            draw_polygon_mut(image, &poly, color);
        }
    }

    fn draw_segment(image: &mut RgbImage, from: (f32, f32), to: (f32, f32), color: Rgb<u8>, width: f32) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = (dx * dx + dy * dy).sqrt();
        if width <= 1.5 || len < 1. {
            draw_line_segment_mut(image, from, to, color);
            return;
        }

        let half = width / 2.;
        let (nx, ny) = (-dy / len * half, dx / len * half);
        let corners = [
            (from.0 + nx, from.1 + ny),
            (to.0 + nx, to.1 + ny),
            (to.0 - nx, to.1 - ny),
            (from.0 - nx, from.1 - ny),
        ]
        .map(|(x, y)| Point::new(x.round() as i32, y.round() as i32));

        if corners[0] == corners[3] || corners[0] == corners[1] {
            draw_line_segment_mut(image, from, to, color);
        } else {
            draw_polygon_mut(image, &corners, color);
        }

        // round caps
        let r = half.round() as i32;
        for (x, y) in [from, to] {
            draw_filled_circle_mut(image, (x.round() as i32, y.round() as i32), r, color);
        }
    }

    fn draw_dashed(image: &mut RgbImage, from: (f32, f32), to: (f32, f32), color: Rgb<u8>, dash: f32) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0. {
            return;
        }
        let (ux, uy) = (dx / len, dy / len);
        let mut t = 0.;
        while t < len {
            let end = (t + dash).min(len);
            draw_line_segment_mut(
                image,
                (from.0 + ux * t, from.1 + uy * t),
                (from.0 + ux * end, from.1 + uy * end),
                color,
            );
            t += 2. * dash;
        }
    }

    fn draw_axes(&self, image: &mut RgbImage, viewport: &Viewport, color: Rgb<u8>) {
        let (w, h) = viewport.dimensions();
        let (x0, y0) = viewport.to_pixel(&Point2::origin());
        let dash = DASH_LENGTH * self.stroke_scale();
        if (0. ..w as f32).contains(&x0) {
            Self::draw_dashed(image, (x0, 0.), (x0, h as f32), color, dash);
        }
        if (0. ..h as f32).contains(&y0) {
            Self::draw_dashed(image, (0., y0), (w as f32, y0), color, dash);
        }
    }

    fn draw_grid(&self, image: &mut RgbImage, viewport: &Viewport, color: Rgb<u8>) {
        let visible = viewport.visible();
        let step = nice_step(visible.width().max(visible.height()) / GRID_TARGET_LINES);
        let (w, h) = viewport.dimensions();
        let dash = DASH_LENGTH * self.stroke_scale() / 2.;

        for x in grid_lines(visible.min.x, visible.max.x, step) {
            let (px, _) = viewport.to_pixel(&Point2::new(x, 0.));
            Self::draw_dashed(image, (px, 0.), (px, h as f32), color, dash);
        }
        for y in grid_lines(visible.min.y, visible.max.y, step) {
            let (_, py) = viewport.to_pixel(&Point2::new(0., y));
            Self::draw_dashed(image, (0., py), (w as f32, py), color, dash);
        }
    }

    fn draw_label(
        &self,
        image: &mut RgbImage,
        viewport: &Viewport,
        anchor: &Point2<f64>,
        text: &str,
        color: Rgb<u8>,
        background: Option<Rgb<u8>>,
    ) {
        let scale = (LABEL_SCALE * self.stroke_scale()).round().max(1.) as u32;
        let (tw, th) = text_size(text, scale);
        if tw == 0 {
            return;
        }
        let (ax, ay) = viewport.to_pixel(anchor);
        // leave room for the vertex marker
        let x = ax.round() as i32 + 4 * scale as i32;
        let y = ay.round() as i32 - th as i32 / 2;

        if let Some(bg) = background {
            let pad = scale;
            draw_filled_rect_mut(
                image,
                Rect::at(x - pad as i32, y - pad as i32).of_size(tw + 2 * pad, th + 2 * pad),
                bg,
            );
        }
        draw_text_mut(image, x, y, text, scale, color);
    }
}

impl Renderer for Rasterizer {
    fn frame_size(&self, scene: &Scene) -> (u32, u32) {
        Viewport::fit(&scene.bounds, self.size).dimensions()
    }

    fn create_frame_mut(&mut self, image: &mut RgbImage, scene: &Scene) {
        let viewport = Viewport::fit(&scene.bounds, self.size);
        let k = self.stroke_scale();

        for shape in &scene.shapes {
            match shape {
                Shape::FilledPolygon { points, color } => {
                    Self::draw_filled_polygon(image, &viewport, points, *color);
                }
                Shape::Segment {
                    from,
                    to,
                    color,
                    width,
                } => {
                    let from = viewport.to_pixel(from);
                    let to = viewport.to_pixel(to);
                    Self::draw_segment(image, from, to, *color, width * k);
                }
                Shape::Axes { color } => self.draw_axes(image, &viewport, *color),
                Shape::Grid { color } => self.draw_grid(image, &viewport, *color),
                Shape::Marker {
                    center,
                    radius,
                    fill,
                    outline,
                } => {
                    let (x, y) = viewport.to_pixel(center);
                    let c = (x.round() as i32, y.round() as i32);
                    let r = (radius * k).round().max(1.) as i32;
                    draw_filled_circle_mut(image, c, r, *fill);
                    if let Some(outline) = outline {
                        draw_hollow_circle_mut(image, c, r, *outline);
                    }
                }
                Shape::Label {
                    anchor,
                    text,
                    color,
                    background,
                } => self.draw_label(image, &viewport, anchor, text, *color, *background),
            }
        }
    }
}

/// Smallest of 1, 2 or 5 times a power of ten not below `raw`.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0. {
        return 1.;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    [1., 2., 5., 10.]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw * (1. - 1e-9))
        .unwrap_or(10. * magnitude)
}

/// Multiples of `step` inside `[min, max]`.
fn grid_lines(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(move |i| i as f64 * step)
}
