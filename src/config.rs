//! Startup configuration: credentials file and loop timing.
//!
//! Credentials are loaded once from a JSON document at boot. A missing or
//! malformed file, or a file that fails validation, is a fatal startup
//! error — the monitor cannot run without WiFi and bot credentials.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::ports::ChatId;
use crate::error::Error;

// ---------------------------------------------------------------------------
// Loop timing
// ---------------------------------------------------------------------------

/// Pause after the motion check.
pub const MOTION_SETTLE_MS: u64 = 500;
/// Pause after the climate read.
pub const CLIMATE_SETTLE_MS: u64 = 500;
/// Pause at the end of each duty cycle.
pub const CYCLE_TAIL_MS: u64 = 2000;
/// Settle delay between WiFi association and the activation broadcast.
pub const STARTUP_SETTLE_MS: u64 = 3000;

/// Connectivity checks per connect attempt, spaced one second apart.
/// After this many the attempt gives up for the current iteration.
pub const WIFI_CONNECT_CHECKS: u32 = 20;

/// Default credentials path (SPIFFS mount on target, cwd on host).
#[cfg(target_os = "espidf")]
pub const CREDENTIALS_PATH: &str = "/spiffs/credentials.json";
#[cfg(not(target_os = "espidf"))]
pub const CREDENTIALS_PATH: &str = "credentials.json";

/// Default cursor-file path.
#[cfg(target_os = "espidf")]
pub const CURSOR_PATH: &str = "/spiffs/cursor.json";
#[cfg(not(target_os = "espidf"))]
pub const CURSOR_PATH: &str = "cursor.json";

// ---------------------------------------------------------------------------
// Credentials document
// ---------------------------------------------------------------------------

/// WiFi station credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WifiCredentials {
    pub ssid: String,
    pub password: String,
}

/// Telegram bot access: API key plus the ordered recipient list.
/// The recipient list is immutable at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub api_key: String,
    /// Chat ids that receive broadcasts (activation, alerts, arm/disarm).
    pub chat_id: Vec<ChatId>,
}

/// The full credentials document (`credentials.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub wifi: WifiCredentials,
    pub telegram_bot: TelegramConfig,
}

impl Credentials {
    /// Load and validate the credentials file. Any failure here is fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)
            .map_err(|_| Error::Config("credentials file unreadable"))?;
        let creds: Self = serde_json::from_str(&raw)
            .map_err(|_| Error::Config("credentials file malformed"))?;
        creds.validate()?;
        Ok(creds)
    }

    /// Reject credentials the monitor cannot operate with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.wifi.ssid.is_empty() || self.wifi.ssid.len() > 32 {
            return Err(Error::Config("wifi.ssid must be 1-32 bytes"));
        }
        if self.telegram_bot.api_key.is_empty() {
            return Err(Error::Config("telegram_bot.api_key is empty"));
        }
        if self.telegram_bot.chat_id.is_empty() {
            return Err(Error::Config("telegram_bot.chat_id is empty"));
        }
        Ok(())
    }
}
