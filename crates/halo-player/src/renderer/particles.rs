//! Orbiting particles.
//!
//! A fixed population circles the center. The treble drives orbital speed,
//! the bass pushes the orbits outward and the mids add a radial wobble.

use nannou::prelude::*;
use rand::Rng;

use super::{FrameInput, Layer};
use crate::utils::color::{hsb, hsba};

pub const NUM_PARTICLES: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Orbital angle (degrees)
    pub angle: f32,
    /// Resting orbital radius
    pub base_radius: f32,
    /// Radius for the current frame
    pub radius: f32,
    pub size: f32,
    /// Per-particle speed multiplier
    pub speed_offset: f32,
    /// Wobble phase (degrees)
    pub wobble_offset: f32,
}

impl Particle {
    fn random(rng: &mut impl Rng) -> Self {
        let base_radius = rng.random_range(140.0..220.0);
        Self {
            angle: rng.random_range(0.0..360.0),
            base_radius,
            radius: base_radius,
            size: rng.random_range(3.0..7.0),
            speed_offset: rng.random_range(0.3..1.2),
            wobble_offset: rng.random_range(0.0..360.0),
        }
    }

    fn update(&mut self, input: &FrameInput) {
        let bands = &input.bands;
        let speed: f32 = map_range(bands.treble, 0.0, 255.0, 0.3, 1.8);
        self.angle += speed * self.speed_offset;

        let push: f32 = map_range(bands.bass, 0.0, 255.0, 0.0, 35.0);
        let wobble_amp: f32 = map_range(bands.mid, 0.0, 255.0, 0.0, 15.0);
        let wobble = (input.time() * 1.2 + self.wobble_offset).to_radians().sin();
        self.radius = self.base_radius + push + wobble * wobble_amp;
    }

    /// Offset from the scene center
    pub fn offset(&self) -> Vec2 {
        let rad = self.angle.to_radians();
        vec2(rad.cos(), rad.sin()) * self.radius
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            particles: (0..NUM_PARTICLES).map(|_| Particle::random(rng)).collect(),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[cfg(test)]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

impl Layer for ParticleField {
    fn update(&mut self, input: &FrameInput) {
        for p in &mut self.particles {
            p.update(input);
        }
    }

    fn draw(&self, draw: &Draw, center: Vec2, input: &FrameInput) {
        let hue = map_range(input.bands.mid, 0.0, 255.0, 200.0, 260.0);
        let grow: f32 = map_range(input.bands.treble, 0.0, 255.0, 0.0, 5.0);

        for p in &self.particles {
            let pos = center + p.offset();
            let sz = p.size + grow;

            for g in 0..2 {
                let g = g as f32;
                let d = sz + g * 4.0;
                draw.ellipse()
                    .xy(pos)
                    .w_h(d, d)
                    .color(hsba(hue, 40.0, 90.0, 20.0 - g * 8.0));
            }
            draw.ellipse()
                .xy(pos)
                .w_h(sz, sz)
                .color(hsb(hue, 70.0, 100.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SmoothedBands;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn frame(bass: f32, mid: f32, treble: f32, frame: u64) -> FrameInput {
        FrameInput {
            bands: SmoothedBands { bass, mid, treble },
            frame,
        }
    }

    #[test]
    fn test_population_is_fixed() {
        let mut field = ParticleField::new(&mut StdRng::seed_from_u64(1));
        assert_eq!(field.len(), NUM_PARTICLES);
        for f in 1..=500 {
            field.update(&frame(200.0, 120.0, 255.0, f));
        }
        assert_eq!(field.len(), NUM_PARTICLES);
    }

    #[test]
    fn test_initial_ranges() {
        let field = ParticleField::new(&mut StdRng::seed_from_u64(7));
        for p in field.particles() {
            assert!((0.0..360.0).contains(&p.angle));
            assert!((140.0..220.0).contains(&p.base_radius));
            assert!((3.0..7.0).contains(&p.size));
            assert!((0.3..1.2).contains(&p.speed_offset));
            assert!((0.0..360.0).contains(&p.wobble_offset));
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = ParticleField::new(&mut StdRng::seed_from_u64(42));
        let b = ParticleField::new(&mut StdRng::seed_from_u64(42));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_silence_keeps_resting_radius() {
        let mut field = ParticleField::new(&mut StdRng::seed_from_u64(3));
        field.update(&frame(0.0, 0.0, 0.0, 1));
        for p in field.particles() {
            assert!((p.radius - p.base_radius).abs() < 1e-4);
        }
    }

    #[test]
    fn test_bass_pushes_outward() {
        let mut field = ParticleField::new(&mut StdRng::seed_from_u64(3));
        field.update(&frame(255.0, 0.0, 0.0, 1));
        for p in field.particles() {
            assert!((p.radius - p.base_radius - 35.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_angle_advance_scales_with_treble() {
        let mut quiet = ParticleField::new(&mut StdRng::seed_from_u64(9));
        let mut loud = ParticleField::new(&mut StdRng::seed_from_u64(9));
        let start: Vec<f32> = quiet.particles().iter().map(|p| p.angle).collect();

        quiet.update(&frame(0.0, 0.0, 0.0, 1));
        loud.update(&frame(0.0, 0.0, 255.0, 1));

        for ((q, l), a0) in quiet.particles().iter().zip(loud.particles()).zip(start) {
            let dq = q.angle - a0;
            let dl = l.angle - a0;
            assert!((dq - 0.3 * q.speed_offset).abs() < 1e-3);
            assert!((dl - 1.8 * l.speed_offset).abs() < 1e-3);
        }
    }
}
