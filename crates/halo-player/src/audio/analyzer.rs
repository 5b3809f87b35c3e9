//! Spectrum analysis of the playing track.
//!
//! Runs one FFT per frame over the samples the current track has just played
//! and reduces the spectrum to three band energies on a 0-255 scale.
//! Bin magnitudes are eased over time and mapped from decibels onto bytes the
//! way browser analyser nodes do, so the visual constants stay comparable.

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

use super::source::{SampleTap, TAP_SIZE};

/// FFT size - gives 1024 usable bins
pub const FFT_SIZE: usize = TAP_SIZE;

/// Number of spectrum bins
const BIN_COUNT: usize = FFT_SIZE / 2;

/// Per-bin easing between successive frames
const SMOOTHING_TIME_CONSTANT: f32 = 0.8;

/// Decibel window mapped onto 0-255
const MIN_DECIBELS: f32 = -100.0;
const MAX_DECIBELS: f32 = -30.0;

/// Highest value a band energy can take
pub const MAX_ENERGY: f32 = 255.0;

/// Named frequency bands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Bass,
    Mid,
    Treble,
}

impl Band {
    /// Frequency range in Hz (inclusive)
    pub fn range(self) -> (f32, f32) {
        match self {
            Band::Bass => (20.0, 140.0),
            Band::Mid => (400.0, 2600.0),
            Band::Treble => (5200.0, 14000.0),
        }
    }
}

/// Raw per-frame band energies (0-255)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandEnergies {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
}

pub struct SpectrumAnalyzer {
    // FFT resources (pre-allocated)
    fft: Arc<dyn Fft<f32>>,
    fft_buffer: Vec<Complex<f32>>,
    fft_window: Vec<f32>,

    /// Time-smoothed linear magnitudes
    magnitudes: Vec<f32>,
    /// Byte-scaled spectrum (0-255 per bin)
    spectrum: Vec<f32>,

    sample_rate: f32,
    input: Option<SampleTap>,
}

impl SpectrumAnalyzer {
    pub fn new() -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);

        // Pre-compute Hann window
        let fft_window: Vec<f32> = (0..FFT_SIZE)
            .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / FFT_SIZE as f32).cos()))
            .collect();

        Self {
            fft,
            fft_buffer: vec![Complex::new(0.0, 0.0); FFT_SIZE],
            fft_window,
            magnitudes: vec![0.0; BIN_COUNT],
            spectrum: vec![0.0; BIN_COUNT],
            sample_rate: 44100.0,
            input: None,
        }
    }

    /// Bind to a track's output. `None` detaches and the analyzer hears silence.
    pub fn set_input(&mut self, input: Option<SampleTap>) {
        if let Some(ref tap) = input {
            self.sample_rate = tap.sample_rate() as f32;
        }
        self.input = input;
    }

    /// Analyze the bound signal. Call once per frame.
    /// A paused track contributes silence so the spectrum decays.
    pub fn analyze(&mut self, playing: bool) -> BandEnergies {
        let samples = match (&self.input, playing) {
            (Some(tap), true) => tap.snapshot(),
            _ => Vec::new(),
        };
        self.analyze_samples(&samples)
    }

    /// Analyze an explicit block of mono samples (zero-padded to the FFT size)
    pub fn analyze_samples(&mut self, samples: &[f32]) -> BandEnergies {
        let sample_count = samples.len().min(FFT_SIZE);

        // Apply window and fill buffer (reusing pre-allocated buffer)
        for i in 0..FFT_SIZE {
            self.fft_buffer[i] = if i < sample_count {
                Complex::new(samples[i] * self.fft_window[i], 0.0)
            } else {
                Complex::new(0.0, 0.0)
            };
        }

        self.fft.process(&mut self.fft_buffer);

        let range = MAX_DECIBELS - MIN_DECIBELS;
        for (i, bin) in self.fft_buffer[..BIN_COUNT].iter().enumerate() {
            let magnitude = bin.norm() / FFT_SIZE as f32;
            self.magnitudes[i] = SMOOTHING_TIME_CONSTANT * self.magnitudes[i]
                + (1.0 - SMOOTHING_TIME_CONSTANT) * magnitude;

            let db = 20.0 * (self.magnitudes[i] + 1e-10).log10();
            self.spectrum[i] = ((db - MIN_DECIBELS) / range * MAX_ENERGY)
                .floor()
                .clamp(0.0, MAX_ENERGY);
        }

        BandEnergies {
            bass: self.energy(Band::Bass),
            mid: self.energy(Band::Mid),
            treble: self.energy(Band::Treble),
        }
    }

    /// Average byte value of the bins covering `band` in the last analysis
    pub fn energy(&self, band: Band) -> f32 {
        let (low_hz, high_hz) = band.range();
        let nyquist = self.sample_rate / 2.0;
        let to_bin = |hz: f32| ((hz / nyquist) * BIN_COUNT as f32).round() as usize;

        let low = to_bin(low_hz).min(BIN_COUNT - 1);
        let high = to_bin(high_hz).min(BIN_COUNT - 1);
        if high < low {
            return 0.0;
        }

        let total: f32 = self.spectrum[low..=high].iter().sum();
        total / (high - low + 1) as f32
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, amplitude: f32, sample_rate: f32) -> Vec<f32> {
        (0..FFT_SIZE)
            .map(|i| amplitude * (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_silence_has_no_energy() {
        let mut analyzer = SpectrumAnalyzer::new();
        let bands = analyzer.analyze_samples(&vec![0.0; FFT_SIZE]);
        assert_eq!(bands, BandEnergies::default());
    }

    #[test]
    fn test_unbound_analyzer_hears_silence() {
        let mut analyzer = SpectrumAnalyzer::new();
        let bands = analyzer.analyze(true);
        assert_eq!(bands.bass, 0.0);
        assert_eq!(bands.mid, 0.0);
        assert_eq!(bands.treble, 0.0);
    }

    #[test]
    fn test_mid_tone_lights_mid_band() {
        let mut analyzer = SpectrumAnalyzer::new();
        let tone = sine(1000.0, 0.8, 44100.0);

        let mut bands = BandEnergies::default();
        for _ in 0..10 {
            bands = analyzer.analyze_samples(&tone);
        }

        assert!(bands.mid > 0.0);
        assert!(bands.mid > bands.bass, "mid {} bass {}", bands.mid, bands.bass);
        assert!(bands.mid > bands.treble, "mid {} treble {}", bands.mid, bands.treble);
        assert!(bands.mid <= MAX_ENERGY);
    }

    #[test]
    fn test_energy_decays_when_paused() {
        let mut analyzer = SpectrumAnalyzer::new();
        let tap = SampleTap::new(44100);
        tap.push(&sine(80.0, 0.9, 44100.0));
        analyzer.set_input(Some(tap));

        let mut loud = BandEnergies::default();
        for _ in 0..10 {
            loud = analyzer.analyze(true);
        }
        assert!(loud.bass > 0.0);

        let mut quiet = loud;
        for _ in 0..60 {
            quiet = analyzer.analyze(false);
        }
        assert!(quiet.bass < loud.bass);
    }

    #[test]
    fn test_band_ranges_are_ordered() {
        let (_, bass_hi) = Band::Bass.range();
        let (mid_lo, mid_hi) = Band::Mid.range();
        let (treble_lo, _) = Band::Treble.range();
        assert!(bass_hi < mid_lo);
        assert!(mid_hi < treble_lo);
    }
}
