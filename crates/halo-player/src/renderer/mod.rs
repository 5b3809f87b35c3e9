//! Radial scene: glow, two deformed rings, a pulsing core and orbiting
//! particles, all driven by the smoothed band energies.

pub mod glow;
pub mod orb;
pub mod particles;
pub mod rings;

use nannou::prelude::*;
use rand::Rng;

use crate::audio::SmoothedBands;
use crate::utils::color::hsb;

pub use glow::BackgroundGlow;
pub use orb::Core;
pub use particles::ParticleField;
pub use rings::{InnerRing, OuterRing};

/// Side of the square drawing canvas
pub const CANVAS_SIZE: f32 = 500.0;

/// Everything a layer needs to know about the current frame
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub bands: SmoothedBands,
    /// Rendered frames so far (first frame is 1)
    pub frame: u64,
}

impl FrameInput {
    /// Frame counter as a float time base
    pub fn time(&self) -> f32 {
        self.frame as f32
    }
}

/// One layer of the radial scene
pub trait Layer {
    /// Advance any per-frame state
    fn update(&mut self, _input: &FrameInput) {}

    /// Draw centered on `center`
    fn draw(&self, draw: &Draw, center: Vec2, input: &FrameInput);
}

/// Draws the layers back to front over the canvas background
pub struct Renderer {
    layers: Vec<Box<dyn Layer>>,
    input: FrameInput,
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_rng(&mut rand::rng())
    }

    pub fn with_rng(rng: &mut impl Rng) -> Self {
        Self {
            layers: vec![
                Box::new(BackgroundGlow),
                Box::new(OuterRing),
                Box::new(InnerRing),
                Box::new(Core),
                Box::new(ParticleField::new(rng)),
            ],
            input: FrameInput::default(),
        }
    }

    pub fn update(&mut self, bands: SmoothedBands, frame: u64) {
        self.input = FrameInput { bands, frame };
        for layer in &mut self.layers {
            layer.update(&self.input);
        }
    }

    pub fn draw(&self, draw: &Draw, canvas: Rect) {
        draw.rect()
            .xy(canvas.xy())
            .wh(canvas.wh())
            .color(hsb(0.0, 0.0, 4.0));

        for layer in &self.layers {
            layer.draw(draw, canvas.xy(), &self.input);
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
