/// Frame-driven vibration pattern scheduling for interactive simulations.
///
/// The host owns a `VibrationScheduler`, calls `step(dt)` once per frame, and
/// picks a `PlatformSink` that turns on/off edges into real vibration.

pub use error::{HapticError, Result};
pub use intensity::{Intensity, Strength};
pub use pattern::Pattern;
pub use scheduler::{HostState, VibrationScheduler};
pub use sink::PlatformSink;

pub mod audition;
pub mod bridge;
pub mod cadence;
pub mod config;
pub mod error;
pub mod intensity;
pub mod pattern;
pub mod recorder;
pub mod scheduler;
pub mod sink;
pub mod trace;
