/// Native bridge: vibration requests posted as JSON messages to an embedding app.
///
/// When the library runs inside a native shell (web view in a mobile app), the
/// shell owns the motor. Each request becomes one message with a `type` tag:
///
///   {"type":"vibrateWithCustomPatternForever","vibrationPattern":[8,8],"intensity":0.5}
///   {"type":"stop"}
///
/// Durations in messages are seconds, patterns are milliseconds.
/// If the shell exposes no message port, every request is a silent no-op.

use crate::intensity::Strength;
use crate::sink::PlatformSink;
use serde::Serialize;

/// One message understood by the native shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NativeMessage {
    Vibrate {
        duration: f64,
    },
    VibrateForever,
    VibrateAtFrequency {
        duration: f64,
        frequency: f64,
    },
    VibrateAtFrequencyForever {
        frequency: f64,
    },
    #[serde(rename_all = "camelCase")]
    VibrateWithCustomPattern {
        vibration_pattern: Vec<u64>,
        duration: f64,
        loop_forever: bool,
    },
    #[serde(rename_all = "camelCase")]
    VibrateWithCustomPatternDuration {
        vibration_pattern: Vec<u64>,
        duration: f64,
    },
    #[serde(rename_all = "camelCase")]
    VibrateWithCustomPatternForever {
        vibration_pattern: Vec<u64>,
        intensity: Strength,
    },
    Stop,
    /// Recorded user-testing data, see `recorder`.
    SaveTestEvents {
        data: String,
    },
}

/// Delivery channel to the native shell.
pub trait MessagePort {
    fn post(&self, json: &str);
}

impl MessagePort for std::sync::mpsc::Sender<String> {
    fn post(&self, json: &str) {
        if self.send(json.to_string()).is_err() {
            log::debug!("Native bridge receiver gone; dropping message");
        }
    }
}

/// Typed front-end over an optional message port.
pub struct NativeBridge<P> {
    port: Option<P>,
}

impl<P: MessagePort> NativeBridge<P> {
    pub fn new(port: Option<P>) -> Self {
        if port.is_none() {
            log::info!("No native message port; vibration requests will be ignored");
        }
        Self { port }
    }

    pub fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    pub fn send(&self, message: &NativeMessage) {
        let Some(port) = &self.port else {
            return;
        };
        match serde_json::to_string(message) {
            Ok(json) => {
                log::debug!("Native bridge → {json}");
                port.post(&json);
            }
            Err(e) => log::warn!("Failed to encode native message {message:?}: {e}"),
        }
    }

    pub fn vibrate(&self, seconds: f64) {
        self.send(&NativeMessage::Vibrate { duration: seconds });
    }

    pub fn vibrate_forever(&self) {
        self.send(&NativeMessage::VibrateForever);
    }

    pub fn vibrate_at_frequency(&self, seconds: f64, frequency: f64) {
        self.send(&NativeMessage::VibrateAtFrequency { duration: seconds, frequency });
    }

    pub fn vibrate_at_frequency_forever(&self, frequency: f64) {
        self.send(&NativeMessage::VibrateAtFrequencyForever { frequency });
    }

    pub fn vibrate_with_custom_pattern(&self, pattern: &[u64], seconds: f64, loop_forever: bool) {
        self.send(&NativeMessage::VibrateWithCustomPattern {
            vibration_pattern: pattern.to_vec(),
            duration: seconds,
            loop_forever,
        });
    }

    pub fn vibrate_with_custom_pattern_duration(&self, pattern: &[u64], seconds: f64) {
        self.send(&NativeMessage::VibrateWithCustomPatternDuration {
            vibration_pattern: pattern.to_vec(),
            duration: seconds,
        });
    }

    pub fn vibrate_with_custom_pattern_forever(&self, pattern: &[u64], intensity: Strength) {
        self.send(&NativeMessage::VibrateWithCustomPatternForever {
            vibration_pattern: pattern.to_vec(),
            intensity,
        });
    }

    pub fn stop(&self) {
        self.send(&NativeMessage::Stop);
    }

    pub fn save_test_events(&self, data: String) {
        self.send(&NativeMessage::SaveTestEvents { data });
    }
}

/// Platform sink that forwards scheduler edges over the native bridge.
/// The continuous strength is passed through untouched.
pub struct BridgeSink<P> {
    bridge: NativeBridge<P>,
    strength: Strength,
}

impl<P: MessagePort> BridgeSink<P> {
    pub fn new(bridge: NativeBridge<P>) -> Self {
        Self { bridge, strength: Strength::default() }
    }

    /// Clamped to [0, 1]; takes effect on the next pulse.
    pub fn set_strength(&mut self, value: f64) {
        self.strength = Strength::new(value);
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn bridge(&self) -> &NativeBridge<P> {
        &self.bridge
    }
}

impl<P: MessagePort> PlatformSink for BridgeSink<P> {
    fn begin_pulsing(&mut self, sub_pattern: &[u64], _cycle_ms: u64) {
        // the shell loops the pattern itself, so the cadence is implied
        self.bridge.vibrate_with_custom_pattern_forever(sub_pattern, self.strength);
    }

    fn end_pulsing(&mut self) {
        self.bridge.stop();
    }
}
