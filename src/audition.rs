/// Audition model: the state behind the "try a pattern" screens.
///
/// Patterns screen:
///   - one set of buttons visible at a time (pulses / effects / tunes)
///   - pressing a button activates its pattern; pressing the active one again clears it
///   - a "limit" toggle makes patterns run for `limit_ms` instead of forever
/// Basics screen:
///   - a single on/off toggle for continuous vibration
///
/// Every change is pushed to the scheduler with `apply`.

use crate::error::Result;
use crate::pattern::{self, LibraryEntry, PatternSet};
use crate::scheduler::VibrationScheduler;
use crate::sink::PlatformSink;

pub const DEFAULT_LIMIT_MS: f64 = 2000.0;

#[derive(Debug)]
pub struct AuditionModel {
    active_set: PatternSet,
    active: Option<&'static LibraryEntry>,
    limited: bool,
    limit_ms: f64,
}

impl AuditionModel {
    pub fn new(limit_ms: f64) -> Self {
        Self {
            active_set: PatternSet::Pulses,
            active: None,
            limited: false,
            limit_ms,
        }
    }

    pub fn active_set(&self) -> PatternSet {
        self.active_set
    }

    /// Switch the visible button set. The running pattern keeps running.
    pub fn select_set(&mut self, set: PatternSet) {
        self.active_set = set;
    }

    /// Buttons of the visible set, in display order.
    pub fn entries(&self) -> impl Iterator<Item = &'static LibraryEntry> {
        pattern::entries_in(self.active_set)
    }

    pub fn active(&self) -> Option<&'static LibraryEntry> {
        self.active
    }

    pub fn is_limited(&self) -> bool {
        self.limited
    }

    pub fn limit_ms(&self) -> f64 {
        self.limit_ms
    }

    /// Press the button for `name`. Returns the now-active entry, if any.
    pub fn toggle(&mut self, name: &str) -> Result<Option<&'static LibraryEntry>> {
        let entry = pattern::lookup(name)?;
        self.active = match self.active {
            Some(current) if current.name == entry.name => None,
            _ => Some(entry),
        };
        Ok(self.active)
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn set_limited(&mut self, limited: bool) {
        self.limited = limited;
    }

    /// Push the current selection to the scheduler.
    pub fn apply<S: PlatformSink>(&self, scheduler: &mut VibrationScheduler<S>) -> Result<()> {
        let Some(entry) = self.active else {
            scheduler.stop();
            return Ok(());
        };
        let pattern = entry.pattern()?;
        log::info!("Auditioning {} ({})", entry.label, entry.set);
        if self.limited {
            scheduler.start_timed_pattern(self.limit_ms, Some(pattern))
        } else {
            scheduler.start_pattern(Some(pattern));
            Ok(())
        }
    }
}

impl Default for AuditionModel {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT_MS)
    }
}

/// Continuous on/off toggle.
#[derive(Debug, Default)]
pub struct BasicToggle {
    on: bool,
}

impl BasicToggle {
    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn set<S: PlatformSink>(&mut self, on: bool, scheduler: &mut VibrationScheduler<S>) {
        if on == self.on {
            return;
        }
        self.on = on;
        if on {
            scheduler.start_pattern(None);
        } else {
            scheduler.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HapticError;
    use crate::sink::NullSink;

    #[test]
    fn pressing_twice_deactivates() {
        let mut model = AuditionModel::default();
        assert_eq!(model.toggle("hz_10").unwrap().map(|e| e.name), Some("hz_10"));
        assert!(model.toggle("hz_10").unwrap().is_none());
    }

    #[test]
    fn pressing_another_switches() {
        let mut model = AuditionModel::default();
        model.toggle("hz_10").unwrap();
        let active = model.toggle("heartbeat").unwrap().unwrap();
        assert_eq!(active.name, "heartbeat");
    }

    #[test]
    fn unknown_name_keeps_selection() {
        let mut model = AuditionModel::default();
        model.toggle("flutter").unwrap();
        assert_eq!(model.toggle("wobble").unwrap_err(), HapticError::UnknownPattern("wobble".into()));
        assert_eq!(model.active().map(|e| e.name), Some("flutter"));
    }

    #[test]
    fn apply_runs_untimed_by_default() {
        let mut model = AuditionModel::default();
        let mut sched = VibrationScheduler::new(NullSink);
        model.toggle("hz_5").unwrap();
        model.apply(&mut sched).unwrap();
        assert!(sched.is_running_pattern());
        assert_eq!(sched.pattern().intervals(), pattern::HZ_5);
        assert!(sched.time_limit_ms().is_infinite());
    }

    #[test]
    fn apply_limited_uses_timed_run() {
        let mut model = AuditionModel::default();
        let mut sched = VibrationScheduler::new(NullSink);
        model.set_limited(true);
        model.toggle("mario").unwrap();
        model.apply(&mut sched).unwrap();
        assert_eq!(sched.time_limit_ms(), DEFAULT_LIMIT_MS);
    }

    #[test]
    fn apply_without_selection_stops() {
        let mut model = AuditionModel::default();
        let mut sched = VibrationScheduler::new(NullSink);
        model.toggle("hz_5").unwrap();
        model.apply(&mut sched).unwrap();
        model.clear();
        model.apply(&mut sched).unwrap();
        assert!(!sched.is_running_pattern());
    }

    #[test]
    fn invalid_limit_surfaces_error() {
        let mut model = AuditionModel::new(f64::NAN);
        let mut sched = VibrationScheduler::new(NullSink);
        model.set_limited(true);
        model.toggle("hz_5").unwrap();
        assert!(matches!(model.apply(&mut sched), Err(HapticError::InvalidDuration(_))));
        assert!(!sched.is_running_pattern());
    }

    #[test]
    fn visible_entries_follow_set() {
        let mut model = AuditionModel::default();
        model.select_set(PatternSet::Tunes);
        let labels: Vec<_> = model.entries().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Mario", "James Bond", "Star Wars", "Song of Storms"]);
    }

    #[test]
    fn basic_toggle_starts_and_stops() {
        let mut toggle = BasicToggle::default();
        let mut sched = VibrationScheduler::new(NullSink);
        toggle.set(true, &mut sched);
        sched.step(0.016);
        assert!(sched.is_vibrating());
        toggle.set(false, &mut sched);
        assert!(!sched.is_vibrating());
        assert!(!toggle.is_on());
    }
}
