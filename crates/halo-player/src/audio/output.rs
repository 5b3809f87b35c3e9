//! Audio output device selection.

use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait};
use rodio::{OutputStream, OutputStreamHandle};
use tracing::info;

/// Opens the named output device, or the system default when `name` is `None`
pub fn open_output(name: Option<&str>) -> Result<(OutputStream, OutputStreamHandle)> {
    let Some(name) = name else {
        info!("Using default audio output");
        return OutputStream::try_default().context("failed to open default audio output");
    };

    let host = cpal::default_host();
    let device = host
        .output_devices()
        .context("failed to enumerate output devices")?
        .find(|d| d.name().map(|n| n == name).unwrap_or(false))
        .ok_or_else(|| anyhow!("output device '{}' not found", name))?;

    info!("Using audio output: {}", name);
    OutputStream::try_from_device(&device)
        .with_context(|| format!("failed to open output device '{}'", name))
}

/// Prints every output device the default host knows about
pub fn list_output_devices() {
    let host = cpal::default_host();
    let default_name = host.default_output_device().and_then(|d| d.name().ok());

    println!("\n=== Audio Output Devices ===");
    match host.output_devices() {
        Ok(devices) => {
            for (idx, device) in devices.enumerate() {
                if let Ok(name) = device.name() {
                    let marker = if default_name.as_deref() == Some(name.as_str()) {
                        " (default)"
                    } else {
                        ""
                    };
                    println!("  [{}] {}{}", idx, name, marker);
                }
            }
        }
        Err(e) => eprintln!("  Failed to enumerate devices: {}", e),
    }
    println!("Set `output_device = \"<name>\"` in ~/.halo-player.toml to pick one\n");
}
