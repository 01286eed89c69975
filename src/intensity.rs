/// Intensity model: simulating partial-strength vibration on on/off-only motors.
///
///   High → one effectively endless "on" pulse (continuous)
///   Low  → 8ms on / 8ms off, re-issued every 16ms
///
/// `Strength` is a separate continuous scalar for hosts that accept one. It never
/// influences local timing.

use crate::error::HapticError;
use crate::pattern::FOREVER_MS;
use serde::{Deserialize, Serialize};

const HIGH_SUB_PATTERN: &[u64] = &[FOREVER_MS, 0];
const LOW_SUB_PATTERN: &[u64] = &[8, 8];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    #[default]
    High,
    Low,
}

impl Intensity {
    /// Parse from a user-facing name. Trims whitespace, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Intensity::High),
            "low" => Some(Intensity::Low),
            _ => None,
        }
    }

    /// The on/off micro-pattern handed to the platform for this level.
    pub fn sub_pattern(self) -> &'static [u64] {
        match self {
            Intensity::High => HIGH_SUB_PATTERN,
            Intensity::Low => LOW_SUB_PATTERN,
        }
    }

    /// Repeat period of the sub-pattern, in ms.
    pub fn cycle_ms(self) -> u64 {
        self.sub_pattern().iter().fold(0u64, |acc, &ms| acc.saturating_add(ms))
    }
}

impl std::str::FromStr for Intensity {
    type Err = HapticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intensity::parse(s).ok_or_else(|| HapticError::UnsupportedIntensity(s.trim().to_string()))
    }
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intensity::High => f.write_str("high"),
            Intensity::Low => f.write_str("low"),
        }
    }
}

/// Continuous vibration strength in [0, 1], clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Strength(f64);

impl Strength {
    pub const FULL: Strength = Strength(1.0);

    /// NaN maps to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Strength(0.0);
        }
        Strength(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Strength {
    fn default() -> Self {
        Strength::FULL
    }
}
