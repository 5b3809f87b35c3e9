use nannou::prelude::*;

use super::{FrameInput, Layer};
use crate::utils::color::{hsb, hsba};

/// Pulsing center disc with a short glow falloff
pub struct Core;

impl Core {
    pub fn radius(input: &FrameInput) -> f32 {
        map_range(input.bands.bass, 0.0, 255.0, 25.0, 70.0)
    }

    pub fn hue(input: &FrameInput) -> f32 {
        map_range(input.bands.mid, 0.0, 255.0, 270.0, 330.0)
    }
}

impl Layer for Core {
    fn draw(&self, draw: &Draw, center: Vec2, input: &FrameInput) {
        let r = Self::radius(input);
        let hue = Self::hue(input);

        for i in 0..6 {
            let i = i as f32;
            let d = r * 1.7 + i * 8.0;
            draw.ellipse()
                .xy(center)
                .w_h(d, d)
                .color(hsba(hue, 80.0, 100.0, 28.0 - i * 4.0));
        }

        let d = r * 1.4;
        draw.ellipse()
            .xy(center)
            .w_h(d, d)
            .color(hsb(hue, 90.0, 100.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SmoothedBands;

    #[test]
    fn test_core_pulses_with_bass() {
        let quiet = FrameInput::default();
        let loud = FrameInput {
            bands: SmoothedBands {
                bass: 255.0,
                mid: 255.0,
                treble: 0.0,
            },
            frame: 1,
        };
        assert!((Core::radius(&quiet) - 25.0).abs() < 1e-4);
        assert!((Core::radius(&loud) - 70.0).abs() < 1e-3);
        assert!((Core::hue(&quiet) - 270.0).abs() < 1e-4);
        assert!((Core::hue(&loud) - 330.0).abs() < 1e-3);
    }
}
