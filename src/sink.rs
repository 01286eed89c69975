/// Platform sinks: where the scheduler's on/off edges become real vibration.
///
/// The scheduler only ever calls two methods, and only on transitions:
///   off → on   begin_pulsing(sub_pattern, cycle_ms)
///   on  → off  end_pulsing()
///
/// A platform without a vibration motor uses `NullSink`; the scheduler still
/// advances normally so observers see the intended behavior.
///
/// Capability that performs the actual hardware or cross-process vibration call.
pub trait PlatformSink {
    /// Start pulsing `sub_pattern`, repeating it every `cycle_ms`.
    /// Any previous pulsing must be replaced, never layered.
    fn begin_pulsing(&mut self, sub_pattern: &[u64], cycle_ms: u64);

    /// Stop pulsing immediately.
    fn end_pulsing(&mut self);
}

impl<S: PlatformSink + ?Sized> PlatformSink for Box<S> {
    fn begin_pulsing(&mut self, sub_pattern: &[u64], cycle_ms: u64) {
        (**self).begin_pulsing(sub_pattern, cycle_ms);
    }

    fn end_pulsing(&mut self) {
        (**self).end_pulsing();
    }
}

/// Sink for platforms with no vibration capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PlatformSink for NullSink {
    fn begin_pulsing(&mut self, _sub_pattern: &[u64], _cycle_ms: u64) {}

    fn end_pulsing(&mut self) {}
}

/// Sink that only logs edges. Useful on headless hosts and in the demo binary.
#[derive(Debug, Default)]
pub struct LogSink {
    pulses: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times pulsing has been started.
    pub fn pulses(&self) -> u64 {
        self.pulses
    }
}

impl PlatformSink for LogSink {
    fn begin_pulsing(&mut self, sub_pattern: &[u64], cycle_ms: u64) {
        self.pulses += 1;
        log::info!("Motor on: sub-pattern {sub_pattern:?} every {cycle_ms}ms");
    }

    fn end_pulsing(&mut self) {
        log::info!("Motor off");
    }
}

/// A sink call as seen by `RecordingSink`.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SinkCall {
    Begin { sub_pattern: Vec<u64>, cycle_ms: u64 },
    End,
}

/// Test sink that remembers every call in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub calls: Vec<SinkCall>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn begins(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, SinkCall::Begin { .. })).count()
    }

    pub fn ends(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, SinkCall::End)).count()
    }
}

#[cfg(test)]
impl PlatformSink for RecordingSink {
    fn begin_pulsing(&mut self, sub_pattern: &[u64], cycle_ms: u64) {
        self.calls.push(SinkCall::Begin { sub_pattern: sub_pattern.to_vec(), cycle_ms });
    }

    fn end_pulsing(&mut self) {
        self.calls.push(SinkCall::End);
    }
}
