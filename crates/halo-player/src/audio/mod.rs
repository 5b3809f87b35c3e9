mod analyzer;
mod loader;
mod output;
mod smoothing;
mod source;
mod track;

pub use analyzer::{BandEnergies, SpectrumAnalyzer};
#[cfg(test)]
pub use loader::LoadError;
pub use loader::{LoadOutcome, RodioLoader, TrackLoader};
pub use output::{list_output_devices, open_output};
pub use smoothing::SmoothedBands;
pub use source::{AudioSource, SampleTap};
