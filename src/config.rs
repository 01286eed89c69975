/// TOML configuration with sensible defaults.
/// No config file is required to run — defaults work out of the box.

use crate::intensity::Intensity;
use serde::Deserialize;

/// Which platform sink the demo drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Log motor edges only.
    Log,
    /// No vibration hardware.
    Null,
    /// JSON messages on stdout, as a native shell would receive them.
    Bridge,
    /// Raw vibrate calls re-issued on a cadence timer, logged.
    Cadence,
}

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frame period of the step loop (~30fps)
    pub frame_interval_ms: u64,
    pub intensity: Intensity,
    /// Continuous strength forwarded to the bridge sink, clamped to [0, 1]
    pub strength: f64,
    /// Library pattern to play
    pub pattern: String,
    /// Run time limit in ms (0 = run until interrupted)
    pub limit_ms: u64,
    /// Seconds of motor history kept in the trace
    pub trace_window_s: f64,
    pub sink: SinkKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_interval_ms: 33,
            intensity: Intensity::High,
            strength: 1.0,
            pattern: "heartbeat".into(),
            limit_ms: 2000,
            trace_window_s: 10.0,
            sink: SinkKind::Log,
        }
    }
}

impl Config {
    /// Load config from the default config file path, or return defaults if not found.
    pub fn load() -> Self {
        let config_path = config_file_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {config_path}");
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {config_path}: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config file found at {config_path}. Using defaults.");
                Self::default()
            }
        }
    }
}

fn config_file_path() -> String {
    std::env::var("HAPTICK_CONFIG").unwrap_or_else(|_| "haptick.toml".into())
}
