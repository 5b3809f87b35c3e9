//! Background track loading.
//!
//! Decoding a whole file takes long enough to stall a frame, so each request
//! runs on its own thread and reports back over a channel. Requests carry an
//! id; whoever drains the channel decides whether the result is still wanted.

use rodio::OutputStreamHandle;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;
use thiserror::Error;
use tracing::debug;

use super::source::AudioSource;
use super::track::RodioTrack;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("{} contains no audio", path.display())]
    Empty { path: PathBuf },

    #[error("could not attach to audio output: {0}")]
    Sink(#[from] rodio::PlayError),

    #[error("no audio output device available")]
    NoOutput,
}

/// Finished (or failed) load for request `id`
pub struct LoadOutcome {
    pub id: u64,
    pub path: PathBuf,
    pub result: Result<Box<dyn AudioSource>, LoadError>,
}

/// Starts loads; completions arrive later on `done`
pub trait TrackLoader {
    fn spawn(&self, id: u64, path: PathBuf, done: Sender<LoadOutcome>);
}

/// Decodes with rodio on a worker thread and plays through the shared output
pub struct RodioLoader {
    output: Option<OutputStreamHandle>,
}

impl RodioLoader {
    pub fn new(output: Option<OutputStreamHandle>) -> Self {
        Self { output }
    }
}

impl TrackLoader for RodioLoader {
    fn spawn(&self, id: u64, path: PathBuf, done: Sender<LoadOutcome>) {
        let Some(output) = self.output.clone() else {
            let _ = done.send(LoadOutcome {
                id,
                path,
                result: Err(LoadError::NoOutput),
            });
            return;
        };

        thread::spawn(move || {
            debug!(id, path = %path.display(), "decoding track");
            let result = RodioTrack::open(&path, &output).map(|track| {
                debug!(id, path = %track.path().display(), duration = track.duration(), "track decoded");
                Box::new(track) as Box<dyn AudioSource>
            });
            // The receiver is gone only when the app is shutting down.
            let _ = done.send(LoadOutcome { id, path, result });
        });
    }
}
