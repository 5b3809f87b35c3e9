use nannou::prelude::*;

use super::{FrameInput, Layer};
use crate::utils::color::hsba;

const GLOW_DISCS: usize = 10;

/// Soft halo behind everything; swells with the bass, tinted by the treble
pub struct BackgroundGlow;

impl BackgroundGlow {
    /// Diameter of the smallest disc
    pub fn base_diameter(input: &FrameInput) -> f32 {
        map_range(input.bands.bass, 0.0, 255.0, 230.0, 320.0)
    }
}

impl Layer for BackgroundGlow {
    fn draw(&self, draw: &Draw, center: Vec2, input: &FrameInput) {
        let base = Self::base_diameter(input);
        let hue = map_range(input.bands.treble, 0.0, 255.0, 210.0, 260.0);

        for i in 0..GLOW_DISCS {
            let i = i as f32;
            let d = base + i * 30.0;
            draw.ellipse()
                .xy(center)
                .w_h(d, d)
                .color(hsba(hue, 30.0, 18.0, 16.0 - i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SmoothedBands;

    #[test]
    fn test_glow_follows_bass() {
        let mut input = FrameInput::default();
        assert!((BackgroundGlow::base_diameter(&input) - 230.0).abs() < 1e-4);

        input.bands = SmoothedBands {
            bass: 255.0,
            mid: 0.0,
            treble: 0.0,
        };
        assert!((BackgroundGlow::base_diameter(&input) - 320.0).abs() < 1e-3);
    }
}
