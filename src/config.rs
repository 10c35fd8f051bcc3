use image::Rgb;

pub const BACKGROUND_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

// Frame settings
pub const DEFAULT_IMAGE_SIZE: u32 = 1200;
pub const MARGIN_FRACTION: f64 = 0.06;

// Face fill settings
pub const FACE_ALPHA: f64 = 0.8;
pub const FACE_CHANNEL_MIN: f64 = 0.5;

// Stroke widths and radii, in pixels at DEFAULT_IMAGE_SIZE
pub const EDGE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
pub const EDGE_WIDTH: f32 = 1.5;
pub const FIGURE_EDGE_COLOR: Rgb<u8> = Rgb([0x33, 0x33, 0x33]);
pub const FIGURE_EDGE_WIDTH: f32 = 5.;
pub const VERTEX_RADIUS: f32 = 4.;
pub const MARKER_RADIUS: f32 = 10.;
pub const MARKER_OUTLINE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

// Labels
pub const LABEL_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
pub const LABEL_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const LABEL_SCALE: f32 = 4.;

// Cartesian axes and grid
pub const AXIS_COLOR: Rgb<u8> = Rgb([128, 128, 128]);
pub const GRID_COLOR: Rgb<u8> = Rgb([211, 211, 211]);
pub const DASH_LENGTH: f32 = 12.;
pub const GRID_TARGET_LINES: f64 = 10.;

/// matplotlib's `tab10` categorical palette.
pub const TAB10: [Rgb<u8>; 10] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
    Rgb([148, 103, 189]),
    Rgb([140, 86, 75]),
    Rgb([227, 119, 194]),
    Rgb([127, 127, 127]),
    Rgb([188, 189, 34]),
    Rgb([23, 190, 207]),
];

/// Per-run rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Length of the longer image side in pixels.
    pub size: u32,
    /// Seed for face colours; `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_IMAGE_SIZE,
            seed: None,
        }
    }
}
