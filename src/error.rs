//! Unified error types for the HomeSentry firmware.
//!
//! Every control-loop phase has its own error enum so the loop boundary can
//! catch each phase independently and keep the "log and continue" semantics
//! without swallowing unrelated faults. All variants funnel into the
//! top-level [`Error`] for uniform display at the outermost layer.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read (stale values are kept by the caller).
    Sensor(SensorError),
    /// The remote bot backend or the network failed.
    Comms(CommsError),
    /// Wall-clock resynchronization failed.
    Time(TimeError),
    /// The cursor file could not be read or written.
    Storage(StorageError),
    /// Configuration is invalid or could not be loaded (fatal at startup).
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Time(e) => write!(f, "time: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Transient DHT11 read faults. The climate phase absorbs these and keeps
/// the previous measurement; they never abort the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not answer the start signal in time.
    Timeout,
    /// The 40-bit frame arrived but its checksum byte does not match.
    ChecksumMismatch,
    /// GPIO read/write failed at the HAL layer.
    GpioFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "read timed out"),
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
            Self::GpioFailed => write!(f, "GPIO access failed"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

/// Failures talking to the Telegram backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommsError {
    /// No network association; request not attempted.
    NotConnected,
    /// The HTTP request itself failed (DNS, TCP, TLS, timeout).
    Transport,
    /// The backend answered with a non-success HTTP status.
    HttpStatus(u16),
    /// The response body was not a parseable updates document.
    MalformedResponse,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::Transport => write!(f, "transport failed"),
            Self::HttpStatus(code) => write!(f, "HTTP status {code}"),
            Self::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Time errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeError {
    /// SNTP exchange failed; the previous wall clock stays in effect.
    SyncFailed,
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SyncFailed => write!(f, "clock sync failed"),
        }
    }
}

impl From<TimeError> for Error {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

// ---------------------------------------------------------------------------
// Storage errors
// ---------------------------------------------------------------------------

/// Cursor-file persistence faults. Writes are best effort; a failed save is
/// logged and the loop continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Filesystem I/O failed.
    Io,
    /// The cursor document could not be serialized.
    Serialize,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "I/O error"),
            Self::Serialize => write!(f, "serialization failed"),
        }
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
