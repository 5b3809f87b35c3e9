//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;
use std::sync::OnceLock;

static ARGS: OnceLock<Args> = OnceLock::new();

/// Command line arguments
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "halo-player")]
#[command(about = "Audio player with a radial particle visualizer", long_about = None)]
pub struct Args {
    /// Tracks to play, in order (overrides the config file and assets scan)
    #[arg(value_name = "TRACK")]
    pub tracks: Vec<PathBuf>,

    /// Directory scanned for audio files when no tracks are given
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Initial volume, 0.0 - 1.0
    #[arg(long, value_name = "LEVEL", value_parser = parse_volume)]
    pub volume: Option<f32>,

    /// Print available output devices and exit
    #[arg(long)]
    pub list_devices: bool,
}

impl Args {
    /// Stores the parsed arguments for the nannou model callback, which takes
    /// no user data. The first stored value wins.
    pub fn install(self) -> &'static Args {
        ARGS.get_or_init(|| self)
    }

    /// Arguments stored by [`Args::install`]; parses the command line only if
    /// nothing was stored.
    pub fn installed() -> &'static Args {
        ARGS.get_or_init(Args::parse)
    }
}

fn parse_volume(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("volume must be between 0 and 1, got {}", v))
    }
}
