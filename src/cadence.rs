/// Cadence sink: drives a raw vibrate primitive on a repeating timer.
///
/// Hosts whose vibration call takes an on/off array and plays it once
/// (browser-style `vibrate([8, 8])`) need the array re-issued every cycle to
/// sustain the effect. This sink owns that timer:
///   - begin_pulsing: cancel the previous timer, vibrate once immediately,
///     then again every `cycle_ms`
///   - end_pulsing:   abort the timer and cancel any in-flight vibration
///
/// At most one timer task is alive at any time.

use crate::sink::PlatformSink;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Upper bound on the re-issue period. Longer cycles (the continuous
/// sub-pattern) are re-issued at this rate instead, which is indistinguishable
/// on hardware and keeps timer deadlines representable.
const MAX_REARM_PERIOD: Duration = Duration::from_secs(60 * 60);

/// Low-level vibration primitive of a host platform.
pub trait Vibrate: Send + Sync + 'static {
    /// Play `pattern` once (on/off ms alternating).
    fn vibrate(&self, pattern: &[u64]);

    /// Cancel any vibration in progress.
    fn cancel(&self);
}

pub struct CadenceSink<V: Vibrate> {
    vibrator: Arc<V>,
    runtime: Handle,
    task: Option<JoinHandle<()>>,
}

impl<V: Vibrate> CadenceSink<V> {
    /// Spawns timers on `runtime`.
    pub fn new(vibrator: V, runtime: Handle) -> Self {
        Self {
            vibrator: Arc::new(vibrator),
            runtime,
            task: None,
        }
    }

    /// Spawns timers on the runtime of the calling context. Panics outside a tokio runtime.
    pub fn on_current_runtime(vibrator: V) -> Self {
        Self::new(vibrator, Handle::current())
    }

    pub fn vibrator(&self) -> &V {
        &self.vibrator
    }

    /// True while a cadence timer is armed.
    pub fn is_armed(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.vibrator.cancel();
        }
    }
}

impl<V: Vibrate> PlatformSink for CadenceSink<V> {
    fn begin_pulsing(&mut self, sub_pattern: &[u64], cycle_ms: u64) {
        self.disarm();

        let period = Duration::from_millis(cycle_ms.max(1)).min(MAX_REARM_PERIOD);
        let pattern = sub_pattern.to_vec();
        let vibrator = Arc::clone(&self.vibrator);
        log::debug!("Arming cadence: {pattern:?} every {}ms", period.as_millis());

        // first tick completes immediately, so the motor starts without waiting a cycle
        self.task = Some(self.runtime.spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                vibrator.vibrate(&pattern);
            }
        }));
    }

    fn end_pulsing(&mut self) {
        log::debug!("Disarming cadence");
        self.disarm();
    }
}

impl<V: Vibrate> Drop for CadenceSink<V> {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeVibrator {
        calls: Mutex<Vec<Vec<u64>>>,
        cancels: Mutex<u32>,
    }

    impl FakeVibrator {
        fn calls(&self) -> Vec<Vec<u64>> {
            self.calls.lock().unwrap().clone()
        }

        fn cancels(&self) -> u32 {
            *self.cancels.lock().unwrap()
        }
    }

    impl Vibrate for FakeVibrator {
        fn vibrate(&self, pattern: &[u64]) {
            self.calls.lock().unwrap().push(pattern.to_vec());
        }

        fn cancel(&self) {
            *self.cancels.lock().unwrap() += 1;
        }
    }

    struct SharedVibrator(Arc<FakeVibrator>);

    impl Vibrate for SharedVibrator {
        fn vibrate(&self, pattern: &[u64]) {
            self.0.vibrate(pattern);
        }

        fn cancel(&self) {
            self.0.cancel();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reissues_every_cycle() {
        let mut sink = CadenceSink::on_current_runtime(FakeVibrator::default());
        sink.begin_pulsing(&[8, 8], 16);
        tokio::task::yield_now().await;
        assert_eq!(sink.vibrator().calls().len(), 1);

        tokio::time::sleep(Duration::from_millis(16 * 3 + 1)).await;
        let calls = sink.vibrator().calls();
        assert_eq!(calls.len(), 4);
        assert!(calls.iter().all(|c| c == &[8, 8]));
    }

    #[tokio::test(start_paused = true)]
    async fn end_cancels_timer() {
        let mut sink = CadenceSink::on_current_runtime(FakeVibrator::default());
        sink.begin_pulsing(&[8, 8], 16);
        tokio::task::yield_now().await;
        sink.end_pulsing();
        assert!(!sink.is_armed());
        assert_eq!(sink.vibrator().cancels(), 1);

        let before = sink.vibrator().calls().len();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(sink.vibrator().calls().len(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_previous_timer() {
        let mut sink = CadenceSink::on_current_runtime(FakeVibrator::default());
        sink.begin_pulsing(&[8, 8], 16);
        tokio::task::yield_now().await;
        sink.begin_pulsing(&[20, 20], 40);
        tokio::task::yield_now().await;
        assert_eq!(sink.vibrator().cancels(), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        // only the new cadence keeps firing: 1 old + (1 immediate + 2 ticks) new
        let calls = sink.vibrator().calls();
        assert_eq!(calls[0], vec![8, 8]);
        assert!(calls[1..].iter().all(|c| c == &[20, 20]));
        assert_eq!(calls.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn continuous_cycle_is_capped() {
        let mut sink = CadenceSink::on_current_runtime(FakeVibrator::default());
        sink.begin_pulsing(&[crate::pattern::FOREVER_MS, 0], crate::pattern::FOREVER_MS);
        tokio::task::yield_now().await;
        assert_eq!(sink.vibrator().calls().len(), 1);
        assert!(sink.is_armed());
        sink.end_pulsing();
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_armed_sink_cancels_vibration() {
        let vibrator = Arc::new(FakeVibrator::default());
        let mut sink = CadenceSink::on_current_runtime(SharedVibrator(Arc::clone(&vibrator)));
        sink.begin_pulsing(&[crate::pattern::FOREVER_MS, 0], crate::pattern::FOREVER_MS);
        tokio::task::yield_now().await;
        drop(sink);
        assert_eq!(vibrator.cancels(), 1);

        tokio::time::sleep(MAX_REARM_PERIOD * 2).await;
        assert_eq!(vibrator.calls().len(), 1);
    }

    #[test]
    fn end_without_begin_is_noop() {
        let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let mut sink = CadenceSink::new(FakeVibrator::default(), rt.handle().clone());
        sink.end_pulsing();
        assert_eq!(sink.vibrator().cancels(), 0);
        assert!(!sink.is_armed());
    }
}
