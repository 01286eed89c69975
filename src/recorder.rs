/// User-testing event recorder.
///
/// Pointer events are stamped with an elapsed time that the host sets once per
/// frame (several listeners share one clock). The log serializes as
/// `x,y,time,name;` per event and can be shipped to the native shell.

use crate::bridge::{MessagePort, NativeBridge};

#[derive(Debug, Clone, PartialEq)]
pub struct TestEvent {
    pub x: f64,
    pub y: f64,
    /// Seconds.
    pub time: f64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

impl PointerPhase {
    fn suffix(self) -> &'static str {
        match self {
            PointerPhase::Down => "down",
            PointerPhase::Move => "move",
            PointerPhase::Up => "up",
        }
    }
}

#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Vec<TestEvent>,
    elapsed_s: f64,
    saved: bool,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_elapsed_time(&mut self, seconds: f64) {
        self.elapsed_s = seconds;
    }

    pub fn add(&mut self, event: TestEvent) {
        self.events.push(event);
    }

    /// Record a pointer event, e.g. pointer type `touch` + Down → `touchdown`.
    pub fn pointer(&mut self, pointer_type: &str, phase: PointerPhase, x: f64, y: f64) {
        self.events.push(TestEvent {
            x,
            y,
            time: self.elapsed_s,
            name: format!("{pointer_type}{}", phase.suffix()),
        });
    }

    pub fn events(&self) -> &[TestEvent] {
        &self.events
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn data_to_string(&self) -> String {
        self.events
            .iter()
            .map(|e| format!("{},{},{},{};", e.x, e.y, e.time, e.name))
            .collect()
    }

    /// Ship the log to the native shell.
    pub fn save<P: MessagePort>(&mut self, bridge: &NativeBridge<P>) {
        log::info!("Saving {} test event(s)", self.events.len());
        bridge.save_test_events(self.data_to_string());
        self.saved = true;
    }
}
