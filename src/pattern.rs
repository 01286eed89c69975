/// Vibration patterns and the canned pattern library.
///
/// A pattern is a list of millisecond intervals alternating motor on / motor off,
/// always starting with "on":
///
///   [100, 100, 150, 1000]  →  on 100, off 100, on 150, off 1000, (repeat)
///
/// A single-entry pattern has no "off" phase and vibrates until stopped.

use crate::error::{HapticError, Result};

/// Largest integer a double represents exactly; used as "effectively forever".
pub const FOREVER_MS: u64 = 9_007_199_254_740_991;

/// A validated interval pattern: at least one entry, every entry > 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    intervals: Vec<u64>,
}

impl Pattern {
    pub fn new(intervals: Vec<u64>) -> Result<Self> {
        if intervals.is_empty() {
            return Err(HapticError::EmptyPattern);
        }
        if let Some(index) = intervals.iter().position(|&ms| ms == 0) {
            return Err(HapticError::ZeroInterval(index));
        }
        Ok(Self { intervals })
    }

    pub fn from_slice(intervals: &[u64]) -> Result<Self> {
        Self::new(intervals.to_vec())
    }

    /// The default pattern: one "on" interval that never ends.
    pub fn continuous() -> Self {
        Self { intervals: vec![FOREVER_MS] }
    }

    pub fn intervals(&self) -> &[u64] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Duration of one full pass through the pattern.
    pub fn period_ms(&self) -> u64 {
        self.intervals.iter().fold(0u64, |acc, &ms| acc.saturating_add(ms))
    }

    /// Interval at `index`, or None when out of range.
    pub fn interval(&self, index: usize) -> Option<u64> {
        self.intervals.get(index).copied()
    }

    /// Even indices are motor-on phases.
    pub fn is_on_phase(index: usize) -> bool {
        index % 2 == 0
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::continuous()
    }
}

impl TryFrom<Vec<u64>> for Pattern {
    type Error = HapticError;

    fn try_from(intervals: Vec<u64>) -> Result<Self> {
        Self::new(intervals)
    }
}

impl TryFrom<&[u64]> for Pattern {
    type Error = HapticError;

    fn try_from(intervals: &[u64]) -> Result<Self> {
        Self::from_slice(intervals)
    }
}

/// Which group of the library a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternSet {
    Pulses,
    Effects,
    Tunes,
}

impl PatternSet {
    pub const ALL: [PatternSet; 3] = [PatternSet::Pulses, PatternSet::Effects, PatternSet::Tunes];
}

impl std::fmt::Display for PatternSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternSet::Pulses => f.write_str("Pulses"),
            PatternSet::Effects => f.write_str("Effects"),
            PatternSet::Tunes => f.write_str("Tunes"),
        }
    }
}

/// One named entry in the pattern library.
#[derive(Debug, Clone, Copy)]
pub struct LibraryEntry {
    /// Lookup key, snake_case.
    pub name: &'static str,
    /// Button label.
    pub label: &'static str,
    pub set: PatternSet,
    pub intervals: &'static [u64],
}

impl LibraryEntry {
    /// Library intervals are all positive, so this never fails for built-in entries.
    pub fn pattern(&self) -> Result<Pattern> {
        Pattern::from_slice(self.intervals)
    }
}

pub const HZ_2_5: &[u64] = &[200, 200];
pub const HZ_5: &[u64] = &[100, 100];
pub const HZ_10: &[u64] = &[50, 50];
pub const HZ_25: &[u64] = &[25, 25];
// Shorter than a 60 fps frame; these alias badly when stepped per frame.
pub const HZ_50: &[u64] = &[10, 10];
pub const HZ_100: &[u64] = &[5, 5];

pub const QUICK_BALL_ROLL: &[u64] = &[70, 100];
pub const SLOW_BALL_ROLL: &[u64] = &[700, 300];
pub const FLUTTER: &[u64] = &[
    10, 10, 10, 10, 10, 20, 10, 20, 10, 20, 10, 20, 10, 20, 10, 50, 10, 50, 10, 50, 10, 50, 10, 50,
    10, 70, 10, 70, 10, 70, 10,
];
pub const SLOW_DOWN: &[u64] = &[70, 300, 70, 400, 100, 500, 200, 500];
pub const HEARTBEAT: &[u64] = &[100, 100, 150, 1000];
pub const QUICK_HEARTBEAT: &[u64] = &[50, 50, 100, 700];

pub const MARIO: &[u64] = &[125, 75, 125, 275, 200, 275, 125, 75, 125, 275, 200, 600, 200, 600];
pub const JAMES_BOND: &[u64] = &[
    200, 100, 200, 275, 425, 100, 200, 100, 200, 275, 425, 100, 75, 25, 75, 125, 75, 25, 75, 125,
    100, 100,
];
pub const STAR_WARS: &[u64] = &[
    500, 110, 500, 110, 450, 110, 200, 110, 170, 40, 450, 110, 200, 110, 170, 40, 500,
];
pub const SONG_OF_STORMS: &[u64] = &[
    200, 100, 200, 100, 400, 200, 200, 100, 200, 100, 400, 200, 400, 200, 200, 100, 200, 100, 200,
    100, 200, 100, 200, 100, 200, 100,
];

/// Every canned pattern, in display order within each set.
pub const LIBRARY: &[LibraryEntry] = &[
    LibraryEntry { name: "hz_2_5", label: "2.5 Hz", set: PatternSet::Pulses, intervals: HZ_2_5 },
    LibraryEntry { name: "hz_5", label: "5 Hz", set: PatternSet::Pulses, intervals: HZ_5 },
    LibraryEntry { name: "hz_10", label: "10 Hz", set: PatternSet::Pulses, intervals: HZ_10 },
    LibraryEntry { name: "hz_25", label: "25 Hz", set: PatternSet::Pulses, intervals: HZ_25 },
    LibraryEntry { name: "hz_50", label: "50 Hz", set: PatternSet::Pulses, intervals: HZ_50 },
    LibraryEntry { name: "hz_100", label: "100 Hz", set: PatternSet::Pulses, intervals: HZ_100 },
    LibraryEntry { name: "quick_ball_roll", label: "Quick Ball Roll", set: PatternSet::Effects, intervals: QUICK_BALL_ROLL },
    LibraryEntry { name: "slow_ball_roll", label: "Slow Ball Roll", set: PatternSet::Effects, intervals: SLOW_BALL_ROLL },
    LibraryEntry { name: "flutter", label: "Flutter", set: PatternSet::Effects, intervals: FLUTTER },
    LibraryEntry { name: "slow_down", label: "Slow Down", set: PatternSet::Effects, intervals: SLOW_DOWN },
    LibraryEntry { name: "heartbeat", label: "Heartbeat", set: PatternSet::Effects, intervals: HEARTBEAT },
    LibraryEntry { name: "quick_heartbeat", label: "Quick Heartbeat", set: PatternSet::Effects, intervals: QUICK_HEARTBEAT },
    LibraryEntry { name: "mario", label: "Mario", set: PatternSet::Tunes, intervals: MARIO },
    LibraryEntry { name: "james_bond", label: "James Bond", set: PatternSet::Tunes, intervals: JAMES_BOND },
    LibraryEntry { name: "star_wars", label: "Star Wars", set: PatternSet::Tunes, intervals: STAR_WARS },
    LibraryEntry { name: "song_of_storms", label: "Song of Storms", set: PatternSet::Tunes, intervals: SONG_OF_STORMS },
];

/// Look up a library entry by name. Case-insensitive, surrounding whitespace ignored.
pub fn lookup(name: &str) -> Result<&'static LibraryEntry> {
    let key = name.trim().to_ascii_lowercase();
    LIBRARY
        .iter()
        .find(|entry| entry.name == key)
        .ok_or_else(|| HapticError::UnknownPattern(name.trim().to_string()))
}

/// Entries belonging to one set, in display order.
pub fn entries_in(set: PatternSet) -> impl Iterator<Item = &'static LibraryEntry> {
    LIBRARY.iter().filter(move |entry| entry.set == set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_pattern() {
        assert_eq!(Pattern::new(vec![]), Err(HapticError::EmptyPattern));
    }

    #[test]
    fn rejects_zero_interval() {
        assert_eq!(Pattern::new(vec![50, 0, 50]), Err(HapticError::ZeroInterval(1)));
    }

    #[test]
    fn continuous_is_single_forever_interval() {
        let p = Pattern::continuous();
        assert_eq!(p.intervals(), &[FOREVER_MS]);
        assert_eq!(Pattern::default(), p);
    }

    #[test]
    fn period_sums_intervals() {
        let p = Pattern::from_slice(HEARTBEAT).unwrap();
        assert_eq!(p.period_ms(), 1350);
    }

    #[test]
    fn every_library_entry_is_valid() {
        for entry in LIBRARY {
            assert!(entry.pattern().is_ok(), "{} should be a valid pattern", entry.name);
        }
    }

    #[test]
    fn library_names_are_unique() {
        let mut names: Vec<_> = LIBRARY.iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), LIBRARY.len());
    }

    #[test]
    fn pulses_are_symmetric_pairs() {
        let pulses: Vec<_> = entries_in(PatternSet::Pulses).collect();
        assert_eq!(pulses.len(), 6);
        for entry in pulses {
            assert_eq!(entry.intervals.len(), 2);
            assert_eq!(entry.intervals[0], entry.intervals[1]);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup(" Heartbeat ").unwrap().intervals, HEARTBEAT);
        assert_eq!(
            lookup("disco").unwrap_err(),
            HapticError::UnknownPattern("disco".into())
        );
    }

    #[test]
    fn sets_partition_library() {
        let total: usize = PatternSet::ALL.iter().map(|&s| entries_in(s).count()).sum();
        assert_eq!(total, LIBRARY.len());
    }
}
