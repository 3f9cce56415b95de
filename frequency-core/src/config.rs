//! # Settings Module
//!
//! Session settings loaded from (and saved to) a JSON file. Every field has
//! a default, so a partial or missing file still yields a usable setup.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::params::Parameters;

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = "frequency_settings.json";

/// Everything fixed for the duration of a capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Sample rate and frame size for analysis.
    #[serde(default)]
    pub analysis: Parameters,
    /// Length of the rolling capture buffer, in seconds.
    #[serde(default = "default_capture_seconds")]
    pub capture_seconds: u32,
    /// How often the driver polls for a new frame, in milliseconds.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

fn default_capture_seconds() -> u32 { 1 }
fn default_refresh_interval_ms() -> u64 { 16 }

impl Default for Settings {
    fn default() -> Self {
        Self {
            analysis: Parameters::default(),
            capture_seconds: default_capture_seconds(),
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }
}

impl Settings {
    /// Loads settings from a JSON file.
    ///
    /// # Returns
    /// * `Ok(Settings)` - Parsed and validated settings
    /// * `Err(e)` - File I/O error, malformed JSON, or invalid parameters
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .with_context(|| format!("opening settings file {}", path.display()))?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;
        let settings = serde_json::from_str(&data)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        Ok(settings)
    }

    /// Loads settings, falling back to defaults only when the file does not
    /// exist.
    ///
    /// # Errors
    /// Anything other than a missing file is returned: unreadable files,
    /// malformed JSON and invalid parameters all stop start-up.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if is_not_found(&e) => {
                log::info!("No settings file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves the settings as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path.as_ref())?;
        file.write_all(json_string.as_bytes())?;
        Ok(())
    }

    /// Number of samples a rolling capture buffer running at `sample_rate`
    /// needs to span `capture_seconds`.
    ///
    /// Never smaller than one analysis frame.
    pub fn capture_capacity(&self, sample_rate: u32) -> usize {
        let requested = sample_rate as usize * self.capture_seconds as usize;
        requested.max(self.analysis.frame_size())
    }

    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.refresh_interval_ms.max(1))
    }
}

fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}
