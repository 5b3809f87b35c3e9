//! Decoded track playback over rodio.
//!
//! A track is decoded completely up front, then played by a custom
//! [`rodio::Source`] that reads the buffer at a shared playhead. Seeking and
//! looping are plain atomic updates of that playhead, and every sample played
//! is mixed down to mono and copied into the track's [`SampleTap`].

use rodio::{Decoder, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::loader::LoadError;
use super::source::{AudioSource, SampleTap};

/// Mono samples batched before touching the tap's lock
const TAP_BATCH: usize = 256;

/// Interleaved samples of a fully decoded file
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Decode an entire file into memory
    pub fn decode(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<f32> = decoder.convert_samples::<f32>().collect();

        Self::from_samples(path, samples, channels, sample_rate)
    }

    fn from_samples(
        path: &Path,
        mut samples: Vec<f32>,
        channels: u16,
        sample_rate: u32,
    ) -> Result<Self, LoadError> {
        if channels > 0 {
            // Drop a trailing partial frame
            samples.truncate(samples.len() - samples.len() % channels as usize);
        }
        if samples.is_empty() || channels == 0 || sample_rate == 0 {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Length in seconds
    pub fn duration(&self) -> f32 {
        self.frames() as f32 / self.sample_rate as f32
    }

    /// Interleaved sample index of the frame at `seconds` (clamped to the track)
    pub fn sample_index_at(&self, seconds: f32) -> usize {
        let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        let frame = ((seconds * self.sample_rate as f32) as usize).min(self.frames());
        frame * self.channels as usize
    }
}

/// `Playhead::seek` value meaning no move is pending
const NO_SEEK: usize = usize::MAX;

/// Shared between the audio thread and the owning [`RodioTrack`]
struct Playhead {
    /// Interleaved sample index of the next sample to play
    position: AtomicUsize,
    /// Requested frame-aligned index, applied at the next frame boundary
    seek: AtomicUsize,
    looping: AtomicBool,
    /// Set when a non-looping pass ran off the end
    ended: AtomicBool,
}

impl Playhead {
    fn new() -> Self {
        Self {
            position: AtomicUsize::new(0),
            seek: AtomicUsize::new(NO_SEEK),
            looping: AtomicBool::new(false),
            ended: AtomicBool::new(false),
        }
    }

    /// Move to `index`. The audio thread only switches between whole
    /// frames, so channel order survives a move requested mid-frame.
    fn seek_to(&self, index: usize) {
        self.position.store(index, Ordering::Relaxed);
        self.seek.store(index, Ordering::Relaxed);
    }
}

/// Endless rodio source over a decoded buffer (plays silence once ended)
struct TrackSource {
    audio: Arc<DecodedAudio>,
    playhead: Arc<Playhead>,
    tap: SampleTap,
    /// Index of the next buffer sample, owned by the audio thread
    cursor: usize,
    /// Output channel the next emitted sample lands in
    slot: u16,
    pending: Vec<f32>,
    frame_sum: f32,
    frame_fill: u16,
}

impl TrackSource {
    fn new(audio: Arc<DecodedAudio>, playhead: Arc<Playhead>, tap: SampleTap) -> Self {
        Self {
            audio,
            playhead,
            tap,
            cursor: 0,
            slot: 0,
            pending: Vec::with_capacity(TAP_BATCH),
            frame_sum: 0.0,
            frame_fill: 0,
        }
    }

    fn tap_sample(&mut self, sample: f32) {
        self.frame_sum += sample;
        self.frame_fill += 1;
        if self.frame_fill == self.audio.channels {
            self.pending.push(self.frame_sum / self.audio.channels as f32);
            self.frame_sum = 0.0;
            self.frame_fill = 0;
            if self.pending.len() >= TAP_BATCH {
                self.tap.push(&self.pending);
                self.pending.clear();
            }
        }
    }
}

impl Iterator for TrackSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.slot == 0 {
            let requested = self.playhead.seek.swap(NO_SEEK, Ordering::Relaxed);
            if requested != NO_SEEK {
                self.cursor = requested;
                if requested < self.audio.samples.len() {
                    self.playhead.ended.store(false, Ordering::Relaxed);
                }
            }
            if self.cursor >= self.audio.samples.len()
                && self.playhead.looping.load(Ordering::Relaxed)
            {
                self.cursor = 0;
            }
        }
        self.slot = (self.slot + 1) % self.audio.channels;

        // The buffer holds whole frames, so running out only happens on a boundary.
        match self.audio.samples.get(self.cursor) {
            Some(&sample) => {
                self.cursor += 1;
                self.playhead.position.store(self.cursor, Ordering::Relaxed);
                self.tap_sample(sample);
                Some(sample)
            }
            None => {
                // A pending rewind will land at the next boundary
                if self.playhead.seek.load(Ordering::Relaxed) == NO_SEEK {
                    self.playhead.ended.store(true, Ordering::Relaxed);
                }
                Some(0.0)
            }
        }
    }
}

impl Source for TrackSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.audio.channels
    }

    fn sample_rate(&self) -> u32 {
        self.audio.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// A loaded track playing through its own rodio sink
pub struct RodioTrack {
    path: PathBuf,
    audio: Arc<DecodedAudio>,
    playhead: Arc<Playhead>,
    sink: Sink,
    tap: SampleTap,
}

impl RodioTrack {
    /// Decode `path` and attach it to the output, paused at the start
    pub fn open(path: &Path, output: &OutputStreamHandle) -> Result<Self, LoadError> {
        let audio = Arc::new(DecodedAudio::decode(path)?);
        let sink = Sink::try_new(output)?;
        sink.pause();

        let playhead = Arc::new(Playhead::new());
        let tap = SampleTap::new(audio.sample_rate);
        sink.append(TrackSource::new(
            Arc::clone(&audio),
            Arc::clone(&playhead),
            tap.clone(),
        ));

        Ok(Self {
            path: path.to_path_buf(),
            audio,
            playhead,
            sink,
            tap,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rewind_if_ended(&self) {
        if self.playhead.ended.swap(false, Ordering::Relaxed) {
            self.playhead.seek_to(0);
        }
    }
}

impl AudioSource for RodioTrack {
    fn is_loaded(&self) -> bool {
        true
    }

    fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.playhead.ended.load(Ordering::Relaxed)
    }

    fn play(&mut self) {
        self.playhead.looping.store(false, Ordering::Relaxed);
        self.rewind_if_ended();
        self.sink.play();
    }

    fn loop_playback(&mut self) {
        self.playhead.looping.store(true, Ordering::Relaxed);
        self.rewind_if_ended();
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn stop(&mut self) {
        self.sink.pause();
        self.playhead.seek_to(0);
        self.playhead.ended.store(false, Ordering::Relaxed);
        self.tap.clear();
    }

    fn jump(&mut self, seconds: f32) {
        let index = self.audio.sample_index_at(seconds);
        self.playhead.seek_to(index);
        let past_end = index >= self.audio.samples.len();
        let looping = self.playhead.looping.load(Ordering::Relaxed);
        self.playhead
            .ended
            .store(past_end && !looping, Ordering::Relaxed);
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    fn duration(&self) -> f32 {
        self.audio.duration()
    }

    fn current_time(&self) -> f32 {
        let pos = self.playhead.position.load(Ordering::Relaxed);
        let frame = (pos / self.audio.channels as usize).min(self.audio.frames());
        frame as f32 / self.audio.sample_rate as f32
    }

    fn output(&self) -> SampleTap {
        self.tap.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo_second(sample_rate: u32) -> DecodedAudio {
        DecodedAudio::from_samples(
            Path::new("test.wav"),
            vec![0.25; sample_rate as usize * 2],
            2,
            sample_rate,
        )
        .unwrap()
    }

    #[test]
    fn test_duration_from_frames() {
        let audio = stereo_second(8000);
        assert_eq!(audio.frames(), 8000);
        assert!((audio.duration() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_index_is_frame_aligned_and_clamped() {
        let audio = stereo_second(8000);
        assert_eq!(audio.sample_index_at(0.5), 8000);
        assert_eq!(audio.sample_index_at(-3.0), 0);
        assert_eq!(audio.sample_index_at(f32::NAN), 0);
        assert_eq!(audio.sample_index_at(10.0), audio.samples.len());
        assert_eq!(audio.sample_index_at(0.25) % 2, 0);
    }

    #[test]
    fn test_empty_audio_is_rejected() {
        let result = DecodedAudio::from_samples(Path::new("empty.wav"), Vec::new(), 2, 44100);
        assert!(matches!(result, Err(LoadError::Empty { .. })));
    }

    #[test]
    fn test_source_loops_and_taps_mono() {
        let audio = Arc::new(
            DecodedAudio::from_samples(Path::new("t.wav"), vec![0.5, -0.5, 1.0, 0.0], 2, 10).unwrap(),
        );
        let playhead = Arc::new(Playhead::new());
        playhead.looping.store(true, Ordering::Relaxed);
        let mut source = TrackSource::new(audio, Arc::clone(&playhead), SampleTap::new(10));

        let played: Vec<f32> = (0..6).filter_map(|_| source.next()).collect();
        assert_eq!(played, vec![0.5, -0.5, 1.0, 0.0, 0.5, -0.5]);
        assert_eq!(source.pending, vec![0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_source_plays_silence_after_end_without_loop() {
        let audio = Arc::new(
            DecodedAudio::from_samples(Path::new("t.wav"), vec![0.5, 0.5], 1, 10).unwrap(),
        );
        let playhead = Arc::new(Playhead::new());
        let mut source = TrackSource::new(audio, Arc::clone(&playhead), SampleTap::new(10));

        assert_eq!(source.next(), Some(0.5));
        assert_eq!(source.next(), Some(0.5));
        assert_eq!(source.next(), Some(0.0));
        assert!(playhead.ended.load(Ordering::Relaxed));
    }

    #[test]
    fn test_trailing_partial_frame_is_dropped() {
        let audio =
            DecodedAudio::from_samples(Path::new("t.wav"), vec![0.1, 0.2, 0.3], 2, 10).unwrap();
        assert_eq!(audio.samples, vec![0.1, 0.2]);
    }

    #[test]
    fn test_jump_mid_frame_keeps_channel_order() {
        // Left channel +1, right channel -1
        let audio = Arc::new(
            DecodedAudio::from_samples(Path::new("lr.wav"), [1.0, -1.0].repeat(8), 2, 10).unwrap(),
        );
        let target = audio.sample_index_at(0.2);
        let playhead = Arc::new(Playhead::new());
        let mut source = TrackSource::new(audio, Arc::clone(&playhead), SampleTap::new(10));

        assert_eq!(source.next(), Some(1.0));
        playhead.seek_to(target);

        let played: Vec<f32> = (0..5).filter_map(|_| source.next()).collect();
        assert_eq!(played, vec![-1.0, 1.0, -1.0, 1.0, -1.0]);
        // Finished frame 0, then continued from frame 2
        assert_eq!(playhead.position.load(Ordering::Relaxed), target + 4);
        assert!(source.pending.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_silence_after_end_keeps_frames_aligned() {
        let audio = Arc::new(
            DecodedAudio::from_samples(Path::new("lr.wav"), vec![1.0, -1.0], 2, 10).unwrap(),
        );
        let playhead = Arc::new(Playhead::new());
        let mut source = TrackSource::new(audio, Arc::clone(&playhead), SampleTap::new(10));

        // Frame, then three silent samples leave the output mid-frame
        let played: Vec<f32> = (0..5).filter_map(|_| source.next()).collect();
        assert_eq!(played, vec![1.0, -1.0, 0.0, 0.0, 0.0]);
        assert!(playhead.ended.load(Ordering::Relaxed));

        // Rewind lands on the next boundary
        playhead.ended.store(false, Ordering::Relaxed);
        playhead.seek_to(0);
        let played: Vec<f32> = (0..3).filter_map(|_| source.next()).collect();
        assert_eq!(played, vec![0.0, 1.0, -1.0]);
        assert!(!playhead.ended.load(Ordering::Relaxed));
    }
}
