//! Hue/saturation/brightness colors on the 360/100/100/100 scale the
//! visual constants are written in.

use nannou::prelude::*;

/// Opaque HSB color
pub fn hsb(hue: f32, saturation: f32, brightness: f32) -> Srgba<u8> {
    hsba(hue, saturation, brightness, 100.0)
}

/// HSB color with alpha; hue in degrees, the rest in 0-100
pub fn hsba(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Srgba<u8> {
    let hue = hue.rem_euclid(360.0);
    let saturation = (saturation / 100.0).clamp(0.0, 1.0);
    let value = (brightness / 100.0).clamp(0.0, 1.0);
    let alpha = (alpha / 100.0).clamp(0.0, 1.0);

    let c = value * saturation;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = value - c;

    let (r1, g1, b1) = if hue < 60.0 {
        (c, x, 0.0)
    } else if hue < 120.0 {
        (x, c, 0.0)
    } else if hue < 180.0 {
        (0.0, c, x)
    } else if hue < 240.0 {
        (0.0, x, c)
    } else if hue < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    srgba(
        ((r1 + m) * 255.0).round() as u8,
        ((g1 + m) * 255.0).round() as u8,
        ((b1 + m) * 255.0).round() as u8,
        (alpha * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        let red = hsb(0.0, 100.0, 100.0);
        assert_eq!((red.red, red.green, red.blue, red.alpha), (255, 0, 0, 255));

        let blue = hsb(240.0, 100.0, 100.0);
        assert_eq!((blue.red, blue.green, blue.blue), (0, 0, 255));
    }

    #[test]
    fn test_zero_saturation_is_grey() {
        let grey = hsb(123.0, 0.0, 4.0);
        assert_eq!(grey.red, grey.green);
        assert_eq!(grey.green, grey.blue);
        assert_eq!(grey.red, 10);
    }

    #[test]
    fn test_alpha_and_hue_wrap() {
        let c = hsba(360.0 + 120.0, 100.0, 100.0, 50.0);
        assert_eq!((c.red, c.green, c.blue), (0, 255, 0));
        assert_eq!(c.alpha, 128);

        let faint = hsba(0.0, 0.0, 100.0, -5.0);
        assert_eq!(faint.alpha, 0);
    }
}
