//! Transport control: play/pause, skip, seek, volume and track switching.
//!
//! Owns the current track and the in-flight load. All display updates go
//! through a [`TransportView`], so the controller works the same against the
//! on-screen bar and against a plain recorder in tests.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, error, info};

use crate::audio::{AudioSource, LoadOutcome, SampleTap, TrackLoader};

/// Seconds jumped by the back/forward controls
pub const SKIP_SECONDS: f32 = 30.0;

/// Label shown while no track is ready
pub const EMPTY_TIME_LABEL: &str = "0:00 / 0:00";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// Glyph on the play/pause control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayIcon {
    /// Nothing playing, control starts playback
    Play,
    /// Playing, control pauses
    Pause,
}

/// Display side of the transport
pub trait TransportView {
    fn set_play_icon(&mut self, icon: PlayIcon);
    fn set_time_label(&mut self, text: &str);
    /// Seek slider position as a fraction of the track (0-1)
    fn set_seek_position(&mut self, fraction: f32);
    /// Abandon a seek drag in progress; its release must not jump
    fn cancel_seek_drag(&mut self);
    /// Current volume slider value (0-1)
    fn volume(&self) -> f32;
}

/// Formats seconds as `M:SS`. Non-finite input renders as `0:00`.
pub fn format_time(seconds: f32) -> String {
    if !seconds.is_finite() {
        return "0:00".to_string();
    }
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, secs)
}

/// `elapsed / total` label text
pub fn time_label(current: f32, duration: f32) -> String {
    format!("{} / {}", format_time(current), format_time(duration))
}

struct PendingLoad {
    id: u64,
    autoplay: bool,
}

pub struct Transport<L: TrackLoader> {
    loader: L,
    track: Option<Box<dyn AudioSource>>,
    track_path: Option<PathBuf>,
    state: PlaybackState,
    /// Id of the most recent load request; older completions are discarded
    latest_request: u64,
    pending: Option<PendingLoad>,
    done_tx: Sender<LoadOutcome>,
    done_rx: Receiver<LoadOutcome>,
    /// Seek slider is being dragged
    seeking: bool,
}

impl<L: TrackLoader> Transport<L> {
    pub fn new(loader: L) -> Self {
        let (done_tx, done_rx) = mpsc::channel();
        Self {
            loader,
            track: None,
            track_path: None,
            state: PlaybackState::Stopped,
            latest_request: 0,
            pending: None,
            done_tx,
            done_rx,
            seeking: false,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[cfg(test)]
    pub fn is_seeking(&self) -> bool {
        self.seeking
    }

    /// A load has been requested and not yet completed
    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Path of the last requested track, whether or not it loaded
    pub fn track_path(&self) -> Option<&Path> {
        self.track_path.as_deref()
    }

    /// Whether a track is present and ready for playback calls
    pub fn is_ready(&self) -> bool {
        self.ready_track().is_some()
    }

    pub fn is_playing(&self) -> bool {
        self.ready_track().map(|t| t.is_playing()).unwrap_or(false)
    }

    /// Signal of the current track, for binding the analyzer
    pub fn output(&self) -> Option<SampleTap> {
        self.ready_track().map(|t| t.output())
    }

    #[cfg(test)]
    pub fn current_time(&self) -> f32 {
        self.ready_track().map(|t| t.current_time()).unwrap_or(0.0)
    }

    #[cfg(test)]
    pub fn duration(&self) -> f32 {
        self.ready_track().map(|t| t.duration()).unwrap_or(0.0)
    }

    fn ready_track(&self) -> Option<&dyn AudioSource> {
        self.track.as_deref().filter(|t| t.is_loaded())
    }

    fn ready_track_mut(&mut self) -> Option<&mut Box<dyn AudioSource>> {
        self.track.as_mut().filter(|t| t.is_loaded())
    }

    /// Load the startup track without starting playback
    pub fn load_initial(&mut self, path: &Path, view: &mut dyn TransportView) {
        self.request(path, false, view);
    }

    /// Switch to another track and play it once loaded
    pub fn select_track(&mut self, path: &Path, view: &mut dyn TransportView) {
        self.request(path, true, view);
    }

    fn request(&mut self, path: &Path, autoplay: bool, view: &mut dyn TransportView) {
        if let Some(mut old) = self.track.take() {
            if old.is_playing() {
                old.stop();
            }
        }
        self.track_path = Some(path.to_path_buf());
        self.state = PlaybackState::Stopped;
        self.seeking = false;

        view.cancel_seek_drag();
        view.set_seek_position(0.0);
        view.set_time_label(EMPTY_TIME_LABEL);
        view.set_play_icon(PlayIcon::Play);

        self.latest_request += 1;
        let id = self.latest_request;
        self.pending = Some(PendingLoad { id, autoplay });

        info!("Loading track [{}] {}", id, path.display());
        self.loader
            .spawn(id, path.to_path_buf(), self.done_tx.clone());
    }

    /// Applies finished loads. Returns true when the current track changed
    /// (loaded or failed), so the caller can rebind the analyzer.
    pub fn poll_loads(&mut self, view: &mut dyn TransportView) -> bool {
        let mut changed = false;

        while let Ok(outcome) = self.done_rx.try_recv() {
            let autoplay = match &self.pending {
                Some(p) if p.id == outcome.id => p.autoplay,
                _ => {
                    debug!(
                        "Discarding stale load [{}] {}",
                        outcome.id,
                        outcome.path.display()
                    );
                    continue;
                }
            };
            self.pending = None;
            changed = true;

            match outcome.result {
                Ok(mut track) => {
                    track.set_volume(view.volume());
                    if autoplay {
                        track.play();
                        self.state = PlaybackState::Playing;
                        view.set_play_icon(PlayIcon::Pause);
                    } else {
                        self.state = PlaybackState::Stopped;
                        view.set_play_icon(PlayIcon::Play);
                    }
                    info!(
                        "Loaded {} ({})",
                        outcome.path.display(),
                        format_time(track.duration())
                    );
                    self.track = Some(track);
                }
                Err(e) => {
                    error!("Error loading track: {}", e);
                    self.state = PlaybackState::Stopped;
                }
            }
        }

        changed
    }

    pub fn toggle_play(&mut self, view: &mut dyn TransportView) {
        let Some(track) = self.ready_track_mut() else {
            return;
        };

        if track.is_playing() {
            track.pause();
            self.state = PlaybackState::Paused;
            view.set_play_icon(PlayIcon::Play);
        } else {
            track.loop_playback();
            self.state = PlaybackState::Playing;
            view.set_play_icon(PlayIcon::Pause);
        }
    }

    /// Move the playhead by `delta` seconds, clamped to the track
    pub fn skip(&mut self, delta: f32) {
        let Some(track) = self.ready_track_mut() else {
            return;
        };
        let duration = track.duration();
        let target = (track.current_time() + delta).clamp(0.0, duration);
        track.jump(target);
    }

    pub fn set_volume(&mut self, volume: f32) {
        if let Some(track) = self.ready_track_mut() {
            track.set_volume(volume);
        }
    }

    /// Seek slider moved by the user. Only the label follows; playback
    /// jumps when the drag ends.
    pub fn seek_drag(&mut self, fraction: f32, view: &mut dyn TransportView) {
        self.seeking = true;
        match self.ready_track() {
            Some(track) => {
                let duration = track.duration();
                view.set_time_label(&time_label(fraction * duration, duration));
            }
            None => view.set_time_label(EMPTY_TIME_LABEL),
        }
    }

    /// Seek slider released at `fraction`
    pub fn end_seek(&mut self, fraction: f32) {
        if let Some(track) = self.ready_track_mut() {
            let duration = track.duration();
            track.jump(fraction.clamp(0.0, 1.0) * duration);
        }
        self.seeking = false;
    }

    /// Per-frame sync: applies the volume slider, notices a finished track
    /// and, unless the user is dragging, moves the seek slider and label.
    pub fn update_frame(&mut self, view: &mut dyn TransportView) {
        let volume = view.volume();
        let seeking = self.seeking;
        let Some(track) = self.ready_track_mut() else {
            return;
        };

        track.set_volume(volume);
        let playing = track.is_playing();
        let current = track.current_time();
        let duration = track.duration();

        if self.state == PlaybackState::Playing && !playing {
            self.state = PlaybackState::Stopped;
            view.set_play_icon(PlayIcon::Play);
        }

        if !seeking && duration > 0.0 {
            view.set_seek_position(current / duration);
            view.set_time_label(&time_label(current, duration));
        }
    }
}
