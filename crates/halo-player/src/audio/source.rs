//! Playback-engine seam.
//!
//! The transport and the visuals only talk to a track through [`AudioSource`],
//! and the analyzer only sees the track's audio through a [`SampleTap`].

use std::sync::{Arc, Mutex};

/// Number of mono samples kept for analysis (one FFT window)
pub const TAP_SIZE: usize = 2048;

/// Everything the transport needs from a playing track.
///
/// Implementations must tolerate any call order; callers check
/// [`AudioSource::is_loaded`] before touching playback. Sources are built
/// on loader threads and handed to the main thread, hence `Send`.
pub trait AudioSource: Send {
    fn is_loaded(&self) -> bool;
    fn is_playing(&self) -> bool;
    /// Start playing once from the current position
    fn play(&mut self);
    /// Start looping playback from the current position
    fn loop_playback(&mut self);
    fn pause(&mut self);
    /// Halt playback and rewind to the start
    fn stop(&mut self);
    /// Jump to an absolute position in seconds
    fn jump(&mut self, seconds: f32);
    /// Volume in 0-1
    fn set_volume(&mut self, volume: f32);
    /// Total length in seconds
    fn duration(&self) -> f32;
    /// Playback position in seconds
    fn current_time(&self) -> f32;
    /// Signal the analyzer should listen to
    fn output(&self) -> SampleTap;
}

struct TapRing {
    samples: Vec<f32>,
    write: usize,
}

/// Shared ring of the most recent mono samples a source has played.
///
/// Written from the audio thread, read once per frame by the analyzer.
#[derive(Clone)]
pub struct SampleTap {
    ring: Arc<Mutex<TapRing>>,
    sample_rate: u32,
}

impl SampleTap {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            ring: Arc::new(Mutex::new(TapRing {
                samples: vec![0.0; TAP_SIZE],
                write: 0,
            })),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn push(&self, samples: &[f32]) {
        let mut ring = self.ring.lock().unwrap_or_else(|e| e.into_inner());
        for &s in samples {
            let idx = ring.write;
            ring.samples[idx] = s;
            ring.write = (idx + 1) % TAP_SIZE;
        }
    }

    /// Returns the last `TAP_SIZE` samples, oldest first
    pub fn snapshot(&self) -> Vec<f32> {
        let ring = self.ring.lock().unwrap_or_else(|e| e.into_inner());
        let mut out = Vec::with_capacity(TAP_SIZE);
        out.extend_from_slice(&ring.samples[ring.write..]);
        out.extend_from_slice(&ring.samples[..ring.write]);
        out
    }

    pub fn clear(&self) {
        let mut ring = self.ring.lock().unwrap_or_else(|e| e.into_inner());
        ring.samples.iter_mut().for_each(|s| *s = 0.0);
        ring.write = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_oldest_first() {
        let tap = SampleTap::new(44100);
        let samples: Vec<f32> = (0..TAP_SIZE + 3).map(|i| i as f32).collect();
        tap.push(&samples);

        let snap = tap.snapshot();
        assert_eq!(snap.len(), TAP_SIZE);
        assert_eq!(snap[0], 3.0);
        assert_eq!(snap[TAP_SIZE - 1], (TAP_SIZE + 2) as f32);
    }

    #[test]
    fn test_clear_zeroes_ring() {
        let tap = SampleTap::new(48000);
        tap.push(&[0.5; 100]);
        tap.clear();
        assert!(tap.snapshot().iter().all(|&s| s == 0.0));
        assert_eq!(tap.sample_rate(), 48000);
    }
}
