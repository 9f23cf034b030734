//! Monitor service — the hexagonal core.
//!
//! [`MonitorService`] owns the alarm state, the latest climate measurement,
//! the processing cursor, and the immutable recipient list. Each public
//! method is one phase of the control loop; all I/O flows through port
//! traits injected at call sites, making the entire service testable with
//! mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────┐ ──▶ MessagingPort
//!                  │      MonitorService       │
//! IndicatorPort ◀──│  alarm · measurement ·    │──▶ CursorStore
//!                  │  cursor · recipients      │
//!                  └──────────────────────────┘
//! ```

use log::{info, warn};

use crate::alarm::AlarmState;
use crate::cursor::ProcessingCursor;
use crate::error::CommsError;

use super::commands::BotCommand;
use super::ports::{ChatId, CursorStore, IndicatorPort, InboundMessage, MessagingPort, SensorPort};

/// Broadcast when motion is seen while armed. Sent every iteration motion
/// stays asserted — repeated alerts are not suppressed.
pub const ALERT_TEXT: &str = "ALERT! Motion detected";
/// Broadcast on `/alarmon`.
pub const ARMED_TEXT: &str = "Alarm is ACTIVE";
/// Broadcast on `/alarmoff`.
pub const DISARMED_TEXT: &str = "Alarm is INACTIVE";
/// Broadcast once to every recipient after network bring-up.
pub const ACTIVATION_TEXT: &str = "Hello, I'm active";

// ───────────────────────────────────────────────────────────────
// Measurement
// ───────────────────────────────────────────────────────────────

/// Latest climate reading. Overwritten once per successful read, never
/// accumulated; `None` until the first successful read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
}

impl Measurement {
    /// Reply text for `/temp`.
    pub fn temperature_text(&self) -> String {
        match self.temperature_c {
            Some(t) => format!("T: {t:.1}"),
            None => "T: n/a".to_string(),
        }
    }

    /// Reply text for `/humidity`.
    pub fn humidity_text(&self) -> String {
        match self.humidity_pct {
            Some(h) => format!("H: {h:.1}"),
            None => "H: n/a".to_string(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// Owns all mutable monitor state and runs the per-phase logic.
pub struct MonitorService {
    alarm: AlarmState,
    measurement: Measurement,
    cursor: ProcessingCursor,
    recipients: Vec<ChatId>,
}

impl MonitorService {
    /// Build the service from the configured recipient list and the cursor
    /// loaded at startup.
    pub fn new(recipients: Vec<ChatId>, cursor: ProcessingCursor) -> Self {
        Self {
            alarm: AlarmState::default(),
            measurement: Measurement::default(),
            cursor,
            recipients,
        }
    }

    /// Seed the indicator LEDs with the initial (disarmed) state.
    /// Call once before entering the loop.
    pub fn start(&self, indicators: &mut impl IndicatorPort) {
        indicators.set_alarm_armed(self.alarm.is_armed());
        info!("monitor started, alarm {}", self.alarm);
    }

    // ── Phase: motion ─────────────────────────────────────────

    /// Poll the PIR level. The activity LED tracks the level; if the alarm
    /// is armed and motion is asserted, one alert goes to every recipient
    /// this iteration.
    pub fn poll_motion(
        &mut self,
        sensors: &mut impl SensorPort,
        indicators: &mut impl IndicatorPort,
        messenger: &mut impl MessagingPort,
    ) {
        let motion = sensors.read_motion();
        indicators.set_activity(motion);
        if motion && self.alarm.is_armed() {
            info!("motion while armed, alerting {} recipient(s)", self.recipients.len());
            self.broadcast(messenger, ALERT_TEXT);
        }
    }

    // ── Phase: climate ────────────────────────────────────────

    /// One climate read attempt. On failure the previous measurement is
    /// kept bit-for-bit and the fault is only logged.
    pub fn poll_climate(&mut self, sensors: &mut impl SensorPort) {
        match sensors.read_climate() {
            Ok(reading) => {
                self.measurement = Measurement {
                    temperature_c: Some(reading.temperature_c),
                    humidity_pct: Some(reading.humidity_pct),
                };
            }
            Err(e) => warn!("climate read failed ({e}), keeping last measurement"),
        }
    }

    // ── Phase: inbound commands ───────────────────────────────

    /// Fetch one batch of inbound messages and handle each in delivery
    /// order. A fetch/parse failure is returned for the loop boundary to
    /// log; alarm state and cursor are untouched in that case.
    pub fn process_inbound(
        &mut self,
        messenger: &mut impl MessagingPort,
        indicators: &mut impl IndicatorPort,
        store: &mut impl CursorStore,
    ) -> Result<(), CommsError> {
        let batch = messenger.fetch_inbound()?;
        for msg in batch {
            self.handle_message(&msg, messenger, indicators, store);
        }
        Ok(())
    }

    /// Handle one message: stale/duplicate ids (≤ cursor) are silently
    /// ignored; recognized commands fire exactly once; every handled
    /// message — recognized or not — advances and persists the cursor.
    fn handle_message(
        &mut self,
        msg: &InboundMessage,
        messenger: &mut impl MessagingPort,
        indicators: &mut impl IndicatorPort,
        store: &mut impl CursorStore,
    ) {
        if !self.cursor.is_new(msg.id) {
            return;
        }
        info!("message id={} sender={} text={:?}", msg.id, msg.sender, msg.text);

        match BotCommand::parse(&msg.text) {
            Some(BotCommand::AlarmOn) => {
                self.alarm.arm();
                indicators.set_alarm_armed(true);
                self.broadcast(messenger, ARMED_TEXT);
            }
            Some(BotCommand::AlarmOff) => {
                self.alarm.disarm();
                indicators.set_alarm_armed(false);
                self.broadcast(messenger, DISARMED_TEXT);
            }
            Some(BotCommand::Temp) => {
                messenger.send(msg.sender, &self.measurement.temperature_text());
            }
            Some(BotCommand::Humidity) => {
                messenger.send(msg.sender, &self.measurement.humidity_text());
            }
            None => {}
        }

        self.cursor.advance_to(msg.id);
        // Write-through on every message; a failed save is logged and the
        // loop keeps going (best effort, matches the storage contract).
        if let Err(e) = store.save(&self.cursor) {
            warn!("cursor save failed ({e}), id={}", msg.id);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_armed(&self) -> bool {
        self.alarm.is_armed()
    }

    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    pub fn cursor_id(&self) -> i64 {
        self.cursor.last_message_processed
    }

    pub fn recipients(&self) -> &[ChatId] {
        &self.recipients
    }

    // ── Internal ──────────────────────────────────────────────

    /// One message per recipient, in configured order, fire-and-forget.
    fn broadcast(&self, messenger: &mut impl MessagingPort, text: &str) {
        for &chat in &self.recipients {
            messenger.send(chat, text);
        }
    }
}
