use crate::config::{BACKGROUND_COLOR, FACE_ALPHA, FACE_CHANNEL_MIN, TAB10};
use image::Rgb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random pastel colours for face fills.
pub struct FaceColors {
    rng: StdRng,
}

impl FaceColors {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Every channel is drawn from `[FACE_CHANNEL_MIN, 1]` and the colour is
    /// composed over the background with `FACE_ALPHA`.
    pub fn next_color(&mut self) -> Rgb<u8> {
        let channels = [(); 3].map(|_| self.rng.gen_range(FACE_CHANNEL_MIN..=1.0));
        blend_over(channels, FACE_ALPHA, BACKGROUND_COLOR)
    }
}

/// `color` (channels in `[0, 1]`) with opacity `alpha` painted over `background`.
pub fn blend_over(color: [f64; 3], alpha: f64, background: Rgb<u8>) -> Rgb<u8> {
    let mix = |c: f64, bg: u8| (c * 255. * alpha + bg as f64 * (1. - alpha)).round().clamp(0., 255.) as u8;
    Rgb([
        mix(color[0], background[0]),
        mix(color[1], background[1]),
        mix(color[2], background[2]),
    ])
}

/// Categorical marker colour for the `i`-th vertex.
pub fn marker_color(i: usize) -> Rgb<u8> {
    TAB10[i % TAB10.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_colors_repeat() {
        let mut a = FaceColors::new(Some(7));
        let mut b = FaceColors::new(Some(7));
        for _ in 0..5 {
            assert_eq!(a.next_color(), b.next_color());
        }
    }

    #[test]
    fn colors_stay_pastel() {
        let mut colors = FaceColors::new(Some(1));
        // 0.5 * 255 * 0.8 + 255 * 0.2 = 153
        for _ in 0..100 {
            let c = colors.next_color();
            assert!(c.0.iter().all(|&ch| ch >= 153));
        }
    }

    #[test]
    fn blending() {
        let white = Rgb([255, 255, 255]);
        assert_eq!(blend_over([1., 1., 1.], 0.8, white), white);
        assert_eq!(blend_over([0., 0., 0.], 1., white), Rgb([0, 0, 0]));
        assert_eq!(blend_over([0., 0.5, 1.], 0.5, Rgb([0, 0, 0])), Rgb([0, 64, 128]));
    }

    #[test]
    fn markers_cycle_through_palette() {
        assert_eq!(marker_color(0), marker_color(10));
        assert_ne!(marker_color(0), marker_color(1));
    }
}
