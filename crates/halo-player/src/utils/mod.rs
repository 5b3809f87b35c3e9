pub mod color;
mod config;
pub mod logging;

pub use config::Config;
