//! Frame-over-frame smoothing of the three band energies.
//!
//! Raw analyzer output jumps around from one frame to the next; the visuals
//! read these eased values instead.

use super::BandEnergies;

/// Smoothing factor for bass
pub const BASS_SMOOTHING: f32 = 0.3;
/// Smoothing factor for mids (reacts faster to transients)
pub const MID_SMOOTHING: f32 = 0.4;
/// Smoothing factor for treble
pub const TREBLE_SMOOTHING: f32 = 0.3;

/// Moves `current` a fraction `k` of the way toward `target`.
pub fn smooth(current: f32, target: f32, k: f32) -> f32 {
    current + k * (target - current)
}

/// Exponentially smoothed bass/mid/treble values (same 0-255 scale as the analyzer)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothedBands {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
}

impl SmoothedBands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame toward the latest raw energies
    pub fn update(&mut self, raw: &BandEnergies) {
        self.bass = smooth(self.bass, raw.bass, BASS_SMOOTHING);
        self.mid = smooth(self.mid, raw.mid, MID_SMOOTHING);
        self.treble = smooth(self.treble, raw.treble, TREBLE_SMOOTHING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(bass: f32, mid: f32, treble: f32) -> BandEnergies {
        BandEnergies { bass, mid, treble }
    }

    #[test]
    fn test_smooth_steps_toward_target() {
        assert!((smooth(0.0, 100.0, 0.3) - 30.0).abs() < 1e-4);
        assert_eq!(smooth(100.0, 0.0, 0.5), 50.0);
        assert_eq!(smooth(42.0, 42.0, 0.4), 42.0);
    }

    #[test]
    fn test_distance_to_constant_input_never_grows() {
        let mut bands = SmoothedBands::new();
        let target = raw(255.0, 120.0, 30.0);
        let mut prev = (255.0f32, 120.0f32, 30.0f32);

        for _ in 0..200 {
            bands.update(&target);
            let dist = (
                (target.bass - bands.bass).abs(),
                (target.mid - bands.mid).abs(),
                (target.treble - bands.treble).abs(),
            );
            assert!(dist.0 <= prev.0);
            assert!(dist.1 <= prev.1);
            assert!(dist.2 <= prev.2);
            prev = dist;
        }

        assert!((bands.bass - 255.0).abs() < 0.01);
    }

    #[test]
    fn test_no_overshoot_with_changing_input() {
        let mut bands = SmoothedBands::new();
        let inputs = [200.0, 10.0, 255.0, 0.0, 128.0, 64.0, 250.0];
        let mut lo = 0.0f32;
        let mut hi = 0.0f32;

        for &v in &inputs {
            lo = lo.min(v);
            hi = hi.max(v);
            bands.update(&raw(v, v, v));
            for s in [bands.bass, bands.mid, bands.treble] {
                assert!(s >= lo && s <= hi, "{} outside [{}, {}]", s, lo, hi);
            }
        }
    }

    #[test]
    fn test_mid_tracks_faster_than_bass() {
        let mut bands = SmoothedBands::new();
        bands.update(&raw(100.0, 100.0, 100.0));
        assert!(bands.mid > bands.bass);
        assert_eq!(bands.bass, bands.treble);
    }
}
