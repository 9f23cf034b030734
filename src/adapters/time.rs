//! SNTP wall-clock adapter.
//!
//! Implements [`ClockPort`]. Resync is best effort: a failure is reported
//! for the loop boundary to log and the previous clock value stays in
//! effect — never fatal.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: lazily starts the `esp-idf-svc` SNTP service (default pool
//! servers) and reports its sync status.
//! On host/test: counts calls and always succeeds.

use crate::app::ports::ClockPort;
use crate::error::TimeError;

pub struct SntpClock {
    #[cfg(target_os = "espidf")]
    sntp: Option<esp_idf_svc::sntp::EspSntp<'static>>,
    #[cfg(not(target_os = "espidf"))]
    resync_calls: u32,
}

impl SntpClock {
    pub fn new() -> Self {
        Self {
            #[cfg(target_os = "espidf")]
            sntp: None,
            #[cfg(not(target_os = "espidf"))]
            resync_calls: 0,
        }
    }

    /// Number of resync calls so far (host/test only).
    #[cfg(not(target_os = "espidf"))]
    pub fn resync_calls(&self) -> u32 {
        self.resync_calls
    }
}

impl ClockPort for SntpClock {
    #[cfg(target_os = "espidf")]
    fn resync(&mut self) -> Result<(), TimeError> {
        use esp_idf_svc::sntp::{EspSntp, SyncStatus};

        if self.sntp.is_none() {
            // First call starts the service; it re-polls the pool on its
            // own schedule afterwards.
            let sntp = EspSntp::new_default().map_err(|_| TimeError::SyncFailed)?;
            self.sntp = Some(sntp);
        }
        match self.sntp.as_ref() {
            Some(s) if s.get_sync_status() == SyncStatus::Completed => Ok(()),
            Some(_) => Err(TimeError::SyncFailed),
            None => Err(TimeError::SyncFailed),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn resync(&mut self) -> Result<(), TimeError> {
        self.resync_calls += 1;
        Ok(())
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn resync_counts_calls_on_host() {
        let mut clock = SntpClock::new();
        assert!(clock.resync().is_ok());
        assert!(clock.resync().is_ok());
        assert_eq!(clock.resync_calls(), 2);
    }
}
