//! Selectable track list.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Track used when nothing else is configured
pub const DEFAULT_TRACK: &str = "assets/hype.mp3";

pub const DEFAULT_ASSETS_DIR: &str = "assets";

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac"];

#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    tracks: Vec<PathBuf>,
    current: usize,
}

impl Playlist {
    /// Builds the list from, in order of precedence: explicit tracks,
    /// configured tracks, audio files in `assets_dir`, the default track.
    pub fn discover(cli_tracks: &[PathBuf], config_tracks: Option<&[PathBuf]>, assets_dir: &Path) -> Self {
        let tracks = if !cli_tracks.is_empty() {
            cli_tracks.to_vec()
        } else if let Some(tracks) = config_tracks.filter(|t| !t.is_empty()) {
            tracks.to_vec()
        } else {
            let scanned = scan_assets(assets_dir);
            if scanned.is_empty() {
                vec![PathBuf::from(DEFAULT_TRACK)]
            } else {
                scanned
            }
        };
        Self { tracks, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn tracks(&self) -> &[PathBuf] {
        &self.tracks
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Path> {
        self.tracks.get(self.current).map(PathBuf::as_path)
    }

    pub fn next(&mut self) -> Option<&Path> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.tracks.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<&Path> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = (self.current + self.tracks.len() - 1) % self.tracks.len();
        self.current()
    }

    /// Selects by index; out-of-range indices leave the selection unchanged
    pub fn select(&mut self, idx: usize) -> Option<&Path> {
        if idx >= self.tracks.len() {
            return None;
        }
        self.current = idx;
        self.current()
    }
}

/// File name shown in the transport bar
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Audio files directly inside `dir`, sorted by name
pub fn scan_assets(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("No assets scanned from {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_audio_file(p))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_cli_tracks_win() {
        let cli = paths(&["x.mp3"]);
        let config = paths(&["y.mp3"]);
        let list = Playlist::discover(&cli, Some(config.as_slice()), Path::new("does-not-exist"));
        assert_eq!(list.tracks(), cli.as_slice());
    }

    #[test]
    fn test_config_tracks_before_scan() {
        let config = paths(&["y.mp3", "z.mp3"]);
        let list = Playlist::discover(&[], Some(config.as_slice()), Path::new("does-not-exist"));
        assert_eq!(list.tracks(), config.as_slice());
    }

    #[test]
    fn test_fallback_to_default_track() {
        let list = Playlist::discover(&[], Some(&[][..]), Path::new("does-not-exist"));
        assert_eq!(list.tracks(), paths(&[DEFAULT_TRACK]).as_slice());
        assert_eq!(list.current(), Some(Path::new(DEFAULT_TRACK)));
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = std::env::temp_dir().join(format!("halo-player-scan-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in ["b.ogg", "a.MP3", "notes.txt", "c.flac"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        fs::create_dir_all(dir.join("sub.wav")).unwrap();

        let list = Playlist::discover(&[], None, &dir);
        let names: Vec<String> = list.tracks().iter().map(|p| display_name(p)).collect();
        assert_eq!(names, vec!["a.MP3", "b.ogg", "c.flac"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_navigation_wraps() {
        let mut list = Playlist::discover(&paths(&["a", "b", "c"]), None, Path::new("."));
        assert_eq!(list.prev(), Some(Path::new("c")));
        assert_eq!(list.next(), Some(Path::new("a")));
        assert_eq!(list.next(), Some(Path::new("b")));
        assert_eq!(list.current_index(), 1);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut list = Playlist::discover(&paths(&["a", "b"]), None, Path::new("."));
        assert_eq!(list.select(1), Some(Path::new("b")));
        assert_eq!(list.select(5), None);
        assert_eq!(list.current_index(), 1);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("assets/hype.mp3")), "hype.mp3");
    }
}
