use haptick::audition::AuditionModel;
use haptick::bridge::{BridgeSink, MessagePort, NativeBridge};
use haptick::cadence::{CadenceSink, Vibrate};
use haptick::config::{Config, SinkKind};
use haptick::sink::{LogSink, NullSink, PlatformSink};
use haptick::trace::VibrationTrace;
use haptick::VibrationScheduler;

use std::time::Instant;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Width of the square-wave line logged when the run ends.
const TRACE_COLUMNS: usize = 120;

/// Prints bridge messages one JSON object per line, as a native shell would receive them.
struct StdoutPort;

impl MessagePort for StdoutPort {
    fn post(&self, json: &str) {
        println!("{json}");
    }
}

/// Stand-in for a host vibrate primitive.
struct LogVibrator;

impl Vibrate for LogVibrator {
    fn vibrate(&self, pattern: &[u64]) {
        log::debug!("vibrate({pattern:?})");
    }

    fn cancel(&self) {
        log::debug!("vibrate(0)");
    }
}

fn build_sink(cfg: &Config) -> Box<dyn PlatformSink> {
    match cfg.sink {
        SinkKind::Log => Box::new(LogSink::new()),
        SinkKind::Null => Box::new(NullSink),
        SinkKind::Bridge => {
            let mut sink = BridgeSink::new(NativeBridge::new(Some(StdoutPort)));
            sink.set_strength(cfg.strength);
            Box::new(sink)
        }
        SinkKind::Cadence => Box::new(CadenceSink::on_current_runtime(LogVibrator)),
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("haptick v{} starting...", env!("CARGO_PKG_VERSION"));

    let cfg = Config::load();

    let mut scheduler = VibrationScheduler::new(build_sink(&cfg));
    scheduler.set_intensity(cfg.intensity);

    let mut audition = AuditionModel::new(cfg.limit_ms as f64);
    audition.set_limited(cfg.limit_ms > 0);
    if let Err(e) = audition.toggle(&cfg.pattern) {
        log::error!("{e}");
        std::process::exit(1);
    }
    if let Err(e) = audition.apply(&mut scheduler) {
        log::error!("Failed to start pattern: {e}");
        std::process::exit(1);
    }

    let mut trace = VibrationTrace::new(cfg.trace_window_s);
    let mut vibrating_rx = scheduler.subscribe_vibrating();
    let mut ticker = interval(Duration::from_millis(cfg.frame_interval_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_frame = Instant::now();

    while scheduler.is_running_pattern() {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let dt = now.duration_since(last_frame).as_secs_f64();
                last_frame = now;
                scheduler.step(dt);
                trace.step(dt, scheduler.is_vibrating());
            }
            result = vibrating_rx.changed() => {
                if result.is_err() {
                    log::error!("Vibration state channel closed");
                    break;
                }
                log::debug!("Motor {}", if *vibrating_rx.borrow_and_update() { "on" } else { "off" });
            }
        }
    }

    log::info!(
        "Pattern finished after {:.0}ms, duty cycle {:.0}%",
        scheduler.time_in_pattern_ms(),
        trace.duty_cycle() * 100.0
    );
    log::info!("Trace: {}", trace.render_ascii(TRACE_COLUMNS));
}
