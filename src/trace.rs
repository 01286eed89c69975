/// Vibration trace: a scrolling square wave of the motor state over time.
///
/// Each frame appends one sample, +1.0 while vibrating and -1.0 otherwise.
/// Samples older than the window are dropped, so memory stays bounded.

use std::collections::VecDeque;

pub const DEFAULT_WINDOW_S: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Seconds since the trace was created.
    pub t: f64,
    pub level: f64,
}

#[derive(Debug, Clone)]
pub struct VibrationTrace {
    window_s: f64,
    now: f64,
    samples: VecDeque<Sample>,
}

impl VibrationTrace {
    pub fn new(window_s: f64) -> Self {
        let window_s = if window_s.is_finite() && window_s > 0.0 { window_s } else { DEFAULT_WINDOW_S };
        Self { window_s, now: 0.0, samples: VecDeque::new() }
    }

    /// Record the motor state after `dt_seconds` of elapsed time.
    pub fn step(&mut self, dt_seconds: f64, vibrating: bool) {
        if dt_seconds.is_finite() && dt_seconds > 0.0 {
            self.now += dt_seconds;
        }
        let level = if vibrating { 1.0 } else { -1.0 };
        self.samples.push_back(Sample { t: self.now, level });
        while self.samples.front().is_some_and(|s| s.t < self.now - self.window_s) {
            self.samples.pop_front();
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Fraction of retained samples where the motor was on.
    pub fn duty_cycle(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let on = self.samples.iter().filter(|s| s.level > 0.0).count();
        on as f64 / self.samples.len() as f64
    }

    /// One character per sample: `#` on, `_` off. Limited to the last `width` samples.
    pub fn render_ascii(&self, width: usize) -> String {
        let skip = self.samples.len().saturating_sub(width);
        self.samples
            .iter()
            .skip(skip)
            .map(|s| if s.level > 0.0 { '#' } else { '_' })
            .collect()
    }
}

impl Default for VibrationTrace {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_S)
    }
}
