/// Vibration scheduler: turns a pattern + intensity into motor on/off decisions.
///
/// Stepped once per frame with the elapsed wall time. Each step:
///   1. If the current interval has been exceeded, move to the next one
///      (wrapping, so every pattern loops until stopped).
///      Otherwise the motor is on for even intervals, off for odd ones.
///   2. Accumulate elapsed time for the interval and the whole run.
///   3. Stop once a timed run reaches its limit.
///
/// The sink is only called on transitions of the on/off state, never per frame.
/// Observers subscribe to `vibrating` and `intensity` through watch channels.

use crate::error::{HapticError, Result};
use crate::intensity::Intensity;
use crate::pattern::Pattern;
use crate::sink::PlatformSink;
use tokio::sync::watch;

/// Whether the hosting application currently allows vibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostState {
    pub enabled: bool,
    pub visible: bool,
    pub active: bool,
}

impl HostState {
    pub fn allows_vibration(self) -> bool {
        self.enabled && self.visible && self.active
    }
}

impl Default for HostState {
    fn default() -> Self {
        Self { enabled: true, visible: true, active: true }
    }
}

pub struct VibrationScheduler<S> {
    sink: S,
    pattern: Pattern,
    interval_index: usize,
    /// ms spent in the current interval, including "off" time.
    time_in_interval: f64,
    /// ms since the current run started, including "off" time.
    time_in_pattern: f64,
    /// ms after which the run stops; infinite for untimed runs.
    time_limit: f64,
    running: bool,
    host: HostState,
    vibrating: watch::Sender<bool>,
    intensity: watch::Sender<Intensity>,
}

impl<S: PlatformSink> VibrationScheduler<S> {
    pub fn new(sink: S) -> Self {
        let (vibrating, _) = watch::channel(false);
        let (intensity, _) = watch::channel(Intensity::default());
        Self {
            sink,
            pattern: Pattern::continuous(),
            interval_index: 0,
            time_in_interval: 0.0,
            time_in_pattern: 0.0,
            time_limit: f64::INFINITY,
            running: false,
            host: HostState::default(),
            vibrating,
            intensity,
        }
    }

    /// Begin running `pattern` (continuous vibration when None) until `stop`.
    pub fn start_pattern(&mut self, pattern: Option<Pattern>) {
        self.begin_run(pattern, f64::INFINITY);
    }

    /// Begin running `pattern` for `duration_ms`, then stop automatically.
    /// Rejects negative, NaN and infinite durations without touching any state.
    pub fn start_timed_pattern(&mut self, duration_ms: f64, pattern: Option<Pattern>) -> Result<()> {
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(HapticError::InvalidDuration(duration_ms));
        }
        self.begin_run(pattern, duration_ms);
        Ok(())
    }

    fn begin_run(&mut self, pattern: Option<Pattern>, time_limit: f64) {
        self.interval_index = 0;
        self.time_in_interval = 0.0;
        self.time_in_pattern = 0.0;
        self.time_limit = time_limit;
        self.running = true;
        self.pattern = pattern.unwrap_or_default();
        if time_limit.is_finite() {
            log::info!("Starting pattern {:?} for {time_limit}ms", self.pattern.intervals());
        } else {
            log::info!("Starting pattern {:?}", self.pattern.intervals());
        }
    }

    /// Stop the running pattern and de-energize the motor. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Stopping pattern after {:.0}ms", self.time_in_pattern);
        }
        self.running = false;
        self.set_vibrating(false);
    }

    /// Switch intensity. Re-arms the sink at the new cadence if the motor is on.
    pub fn set_intensity(&mut self, intensity: Intensity) {
        let previous = self.intensity.send_replace(intensity);
        if previous == intensity {
            return;
        }
        log::debug!("Intensity {previous} → {intensity}");
        if self.is_vibrating() {
            self.sink.end_pulsing();
            self.sink.begin_pulsing(intensity.sub_pattern(), intensity.cycle_ms());
        }
    }

    /// Update host visibility/activity. Vibration stops whenever the host
    /// is disabled, hidden, or inactive.
    pub fn set_host_state(&mut self, host: HostState) {
        self.host = host;
        if !host.allows_vibration() && (self.running || self.is_vibrating()) {
            log::info!("Host no longer allows vibration ({host:?}), stopping");
            self.stop();
        }
    }

    /// Advance by `dt_seconds` of wall time. Non-finite or negative deltas count as zero.
    pub fn step(&mut self, dt_seconds: f64) {
        if !self.running {
            return;
        }
        if !self.host.allows_vibration() {
            log::info!("Host does not allow vibration ({:?}), stopping", self.host);
            self.stop();
            return;
        }
        let dt = if dt_seconds.is_finite() && dt_seconds > 0.0 { dt_seconds * 1000.0 } else { 0.0 };

        // index is always in range: it is reset on every new pattern and wrapped below
        let current = self.pattern.intervals()[self.interval_index] as f64;
        if self.time_in_interval > current {
            self.interval_index = (self.interval_index + 1) % self.pattern.len();
            self.time_in_interval = 0.0;
        } else {
            self.set_vibrating(Pattern::is_on_phase(self.interval_index));
        }

        self.time_in_interval += dt;
        self.time_in_pattern += dt;

        if self.time_in_pattern >= self.time_limit {
            self.stop();
        }
    }

    fn set_vibrating(&mut self, vibrating: bool) {
        let previous = self.vibrating.send_replace(vibrating);
        if previous == vibrating {
            return;
        }
        let intensity = self.intensity();
        if vibrating {
            log::debug!("Vibration on ({intensity}, index {})", self.interval_index);
            self.sink.begin_pulsing(intensity.sub_pattern(), intensity.cycle_ms());
        } else {
            log::debug!("Vibration off (index {})", self.interval_index);
            self.sink.end_pulsing();
        }
    }

    pub fn is_vibrating(&self) -> bool {
        *self.vibrating.borrow()
    }

    /// True while a pattern is active, including its "off" intervals.
    pub fn is_running_pattern(&self) -> bool {
        self.running
    }

    pub fn intensity(&self) -> Intensity {
        *self.intensity.borrow()
    }

    pub fn subscribe_vibrating(&self) -> watch::Receiver<bool> {
        self.vibrating.subscribe()
    }

    pub fn subscribe_intensity(&self) -> watch::Receiver<Intensity> {
        self.intensity.subscribe()
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn interval_index(&self) -> usize {
        self.interval_index
    }

    pub fn time_in_interval_ms(&self) -> f64 {
        self.time_in_interval
    }

    pub fn time_in_pattern_ms(&self) -> f64 {
        self.time_in_pattern
    }

    pub fn time_limit_ms(&self) -> f64 {
        self.time_limit
    }

    pub fn host_state(&self) -> HostState {
        self.host
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
