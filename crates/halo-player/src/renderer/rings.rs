//! Deformed rings.
//!
//! Both rings are closed curves whose radius wobbles around a base radius:
//! a petal term with `lobes` bumps per turn plus a ripple term at twice that
//! frequency. Angles and phases are in degrees.

use nannou::prelude::*;

use super::{FrameInput, Layer};
use crate::utils::color::{hsb, hsba};

/// Glow copies drawn under each ring
const GLOW_PASSES: usize = 4;

/// Parameters of one closed ring curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingShape {
    pub base_radius: f32,
    pub lobes: f32,
    pub petal_amp: f32,
    pub ripple_amp: f32,
    /// Petal phase offset (degrees)
    pub petal_phase: f32,
    /// Ripple phase offset (degrees)
    pub ripple_phase: f32,
    /// Angular sampling step (degrees)
    pub step: f32,
}

impl RingShape {
    /// Radius of the curve at angle `a` (degrees)
    pub fn radius_at(&self, a: f32) -> f32 {
        let petal = (a * self.lobes + self.petal_phase).to_radians().sin();
        let ripple = (a * self.lobes * 2.0 + self.ripple_phase).to_radians().sin();
        self.base_radius + petal * self.petal_amp + ripple * self.ripple_amp
    }
}

/// Samples the ring over one full turn, centered on the origin
pub fn ring_points(shape: &RingShape) -> Vec<Vec2> {
    let count = (360.0 / shape.step).ceil() as usize;
    (0..count)
        .map(|i| {
            let a = i as f32 * shape.step;
            let r = shape.radius_at(a);
            let rad = a.to_radians();
            vec2(r * rad.cos(), r * rad.sin())
        })
        .collect()
}

fn stroke_ring(draw: &Draw, center: Vec2, shape: &RingShape, weight: f32, color: Srgba<u8>) {
    let points = ring_points(shape).into_iter().map(|p| p + center);
    draw.polyline().weight(weight).points_closed(points).color(color);
}

/// Wide ten-lobed ring; radius and color follow the bass, petals the mids,
/// ripples the treble
pub struct OuterRing;

impl OuterRing {
    pub fn shape(input: &FrameInput) -> RingShape {
        let bands = &input.bands;
        let t = input.time();
        let bass_offset: f32 = map_range(bands.bass, 0.0, 255.0, -50.0, 30.0);
        RingShape {
            base_radius: 150.0 + bass_offset,
            lobes: 10.0,
            petal_amp: map_range(bands.mid, 0.0, 100.0, 5.0, 15.0),
            ripple_amp: map_range(bands.treble, 0.0, 255.0, 0.0, 80.0),
            petal_phase: t * 0.6,
            ripple_phase: t * 1.1,
            step: 3.0,
        }
    }
}

impl Layer for OuterRing {
    fn draw(&self, draw: &Draw, center: Vec2, input: &FrameInput) {
        let shape = Self::shape(input);
        let bass = input.bands.bass;
        let hue = map_range(bass, 0.0, 255.0, 240.0, 270.0);
        let brightness = map_range(bass, 0.0, 255.0, 55.0, 100.0);

        for g in 0..GLOW_PASSES {
            let g = g as f32;
            let glow = RingShape {
                base_radius: shape.base_radius + g * 2.0,
                petal_amp: shape.petal_amp * 0.9,
                ripple_amp: shape.ripple_amp * 0.6,
                ..shape
            };
            let color = hsba(hue, 60.0, brightness, 32.0 - g * 7.0);
            stroke_ring(draw, center, &glow, 10.0 - g * 2.0, color);
        }

        stroke_ring(draw, center, &shape, 3.0, hsb(hue, 90.0, brightness));
    }
}

/// Tighter five-lobed ring; size follows the bass, color and spin the mids
pub struct InnerRing;

impl InnerRing {
    pub fn shape(input: &FrameInput) -> RingShape {
        let bands = &input.bands;
        let wave_speed: f32 = map_range(bands.mid, 0.0, 255.0, 0.3, 1.0);
        RingShape {
            base_radius: map_range(bands.bass, 0.0, 255.0, 55.0, 115.0),
            lobes: 5.0,
            petal_amp: map_range(bands.bass, 0.0, 100.0, 8.0, 12.0),
            ripple_amp: 0.0,
            petal_phase: -input.time() * wave_speed,
            ripple_phase: 0.0,
            step: 4.0,
        }
    }
}

impl Layer for InnerRing {
    fn draw(&self, draw: &Draw, center: Vec2, input: &FrameInput) {
        let shape = Self::shape(input);
        let hue = map_range(input.bands.mid, 0.0, 255.0, 250.0, 315.0);

        for g in 0..GLOW_PASSES {
            let g = g as f32;
            let color = hsba(hue, 60.0, 95.0, 30.0 - g * 6.0);
            stroke_ring(draw, center, &shape, 7.0 - g, color);
        }
    }
}
