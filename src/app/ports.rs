//! Port traits — the hexagonal boundary between domain logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensors, LEDs, the Telegram client, the cursor file,
//! the SNTP clock) implement these traits. The
//! [`MonitorService`](super::service::MonitorService) consumes them via
//! generics, so the domain core never touches hardware or HTTP directly
//! and the whole service runs under host-side mocks.

use crate::cursor::ProcessingCursor;
use crate::error::{CommsError, SensorError, StorageError, TimeError};
use crate::sensors::ClimateReading;

/// Opaque handle identifying a remote chat/user to message.
pub type ChatId = i64;

/// One inbound bot message. Transient: fetched each cycle, never stored —
/// only the maximum id seen feeds the processing cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub id: i64,
    pub sender: ChatId,
    pub text: String,
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the PIR and DHT11 sensors.
pub trait SensorPort {
    /// Current motion level. Pure level read — no debouncing, no edge
    /// detection; pulses between polls are missed by design.
    fn read_motion(&mut self) -> bool;

    /// One climate read attempt, no retries. The caller keeps its previous
    /// measurement on error.
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → LEDs)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the three indicator LEDs.
pub trait IndicatorPort {
    /// Activity LED tracks the motion level each poll.
    fn set_activity(&mut self, on: bool);

    /// Reflect the alarm state on the armed/disarmed pair. Implementations
    /// must light exactly one of the two: armed XOR disarmed, always.
    fn set_alarm_armed(&mut self, armed: bool);
}

// ───────────────────────────────────────────────────────────────
// Messaging port (driven adapter: domain ↔ bot backend)
// ───────────────────────────────────────────────────────────────

/// Remote messaging to/from the fixed recipient set.
pub trait MessagingPort {
    /// One "get updates" request; deserializes the whole batch. Malformed
    /// entries degrade to empty-text messages rather than rejecting.
    fn fetch_inbound(&mut self) -> Result<Vec<InboundMessage>, CommsError>;

    /// Best-effort, fire-and-forget post. Failures are logged by the
    /// implementation and never surfaced; no delivery confirmation.
    fn send(&mut self, chat: ChatId, text: &str);

    /// Like [`send`](Self::send) but surfaces the failure. Used for the
    /// startup activation broadcast, where a fault is fatal.
    fn try_send(&mut self, chat: ChatId, text: &str) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Cursor store (driven adapter: domain ↔ stable storage)
// ───────────────────────────────────────────────────────────────

/// Persistence for the processing cursor. One synchronous write per
/// processed message; read once at startup.
pub trait CursorStore {
    /// Load the persisted cursor. Absent or corrupt storage yields the
    /// zero cursor — never an error.
    fn load(&self) -> ProcessingCursor;

    /// Persist the cursor synchronously.
    fn save(&mut self, cursor: &ProcessingCursor) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain → wall clock)
// ───────────────────────────────────────────────────────────────

/// Best-effort wall-clock resynchronization against an external time
/// source. On failure the previous clock value stays in effect.
pub trait ClockPort {
    fn resync(&mut self) -> Result<(), TimeError>;
}
