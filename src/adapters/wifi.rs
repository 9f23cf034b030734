//! WiFi station-mode adapter.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via
//!   `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stubs for host-side tests.
//!
//! ## Reconnection policy
//!
//! `connect()` performs bounded retry: after starting the association it
//! checks connectivity up to [`WIFI_CONNECT_CHECKS`] times, one second
//! apart, then gives up for this loop iteration. It never blocks
//! indefinitely; the loop tries again next cycle.

use core::fmt;
use log::{info, warn};

use crate::config::WIFI_CONNECT_CHECKS;

// ───────────────────────────────────────────────────────────────
// Port trait
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    InvalidSsid,
    InvalidPassword,
    /// Association did not complete within the check budget.
    ConnectionFailed,
    /// Driver-level failure (start, configuration, platform call).
    DriverFailed,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 bytes)"),
            Self::InvalidPassword => write!(f, "password invalid (must be at most 64 bytes)"),
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
            Self::DriverFailed => write!(f, "WiFi driver failed"),
        }
    }
}

pub trait ConnectivityPort {
    /// Attempt association with bounded retry. Safe to call every
    /// iteration; returns quickly when already connected.
    fn connect(&mut self) -> Result<(), ConnectivityError>;
    fn is_connected(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Disconnected,
    Connecting,
    Connected,
    /// Last bounded attempt exhausted its check budget.
    Failed,
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    #[cfg(target_os = "espidf")]
    driver: esp_idf_svc::wifi::BlockingWifi<esp_idf_svc::wifi::EspWifi<'static>>,
    /// Simulation: force association attempts to fail.
    #[cfg(not(target_os = "espidf"))]
    sim_down: bool,
    #[cfg(not(target_os = "espidf"))]
    sim_connect_attempts: u32,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(
        modem: esp_idf_hal::modem::Modem,
        sysloop: esp_idf_svc::eventloop::EspSystemEventLoop,
        nvs: esp_idf_svc::nvs::EspDefaultNvsPartition,
        ssid: &str,
        password: &str,
    ) -> anyhow::Result<Self> {
        use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

        let wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs))?;
        let driver = BlockingWifi::wrap(wifi, sysloop)?;
        let mut adapter = Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            driver,
        };
        adapter.set_credentials(ssid, password).map_err(|e| anyhow::anyhow!("{e}"))?;
        Ok(adapter)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(ssid: &str, password: &str) -> anyhow::Result<Self> {
        let mut adapter = Self {
            state: WifiState::Disconnected,
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            sim_down: false,
            sim_connect_attempts: 0,
        };
        adapter.set_credentials(ssid, password).map_err(|e| anyhow::anyhow!("{e}"))?;
        Ok(adapter)
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError> {
        if ssid.is_empty() {
            return Err(ConnectivityError::InvalidSsid);
        }
        self.ssid.clear();
        self.ssid
            .push_str(ssid)
            .map_err(|()| ConnectivityError::InvalidSsid)?;
        self.password.clear();
        self.password
            .push_str(password)
            .map_err(|()| ConnectivityError::InvalidPassword)?;
        Ok(())
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_start_association(&mut self) -> Result<(), ConnectivityError> {
        use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};

        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: self.ssid.clone(),
            password: self.password.clone(),
            auth_method,
            ..Default::default()
        });
        self.driver
            .set_configuration(&config)
            .map_err(|_| ConnectivityError::DriverFailed)?;
        if !self.driver.is_started().unwrap_or(false) {
            self.driver.start().map_err(|_| ConnectivityError::DriverFailed)?;
        }
        // connect() returns once association kicks off; actual readiness is
        // polled by the 1-second check loop below.
        self.driver.connect().map_err(|_| ConnectivityError::DriverFailed)?;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start_association(&mut self) -> Result<(), ConnectivityError> {
        self.sim_connect_attempts += 1;
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_is_up(&self) -> bool {
        self.driver.is_connected().unwrap_or(false) && self.driver.is_up().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_up(&self) -> bool {
        !self.sim_down
    }

    #[cfg(target_os = "espidf")]
    fn pause_one_second() {
        esp_idf_hal::delay::FreeRtos::delay_ms(1000);
    }

    // The simulated check loop runs without real delays so tests stay fast.
    #[cfg(not(target_os = "espidf"))]
    fn pause_one_second() {}
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn connect(&mut self) -> Result<(), ConnectivityError> {
        if self.is_connected() {
            self.state = WifiState::Connected;
            return Ok(());
        }

        info!("WiFi: connecting to '{}'", self.ssid);
        self.state = WifiState::Connecting;
        self.platform_start_association()?;

        for check in 1..=WIFI_CONNECT_CHECKS {
            if self.platform_is_up() {
                self.state = WifiState::Connected;
                info!("WiFi: connected after {check} check(s)");
                return Ok(());
            }
            info!("WiFi: waiting for connection, check {check}/{WIFI_CONNECT_CHECKS}");
            Self::pause_one_second();
        }

        warn!("WiFi: not connected after {WIFI_CONNECT_CHECKS} checks, giving up this cycle");
        self.state = WifiState::Failed;
        Err(ConnectivityError::ConnectionFailed)
    }

    fn is_connected(&self) -> bool {
        self.platform_is_up() && self.state == WifiState::Connected
    }
}

// ───────────────────────────────────────────────────────────────
// Simulation hooks
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl WifiAdapter {
    /// Force the simulated link down (or back up).
    pub fn sim_set_down(&mut self, down: bool) {
        self.sim_down = down;
        if down {
            self.state = WifiState::Disconnected;
        }
    }

    /// Number of association attempts started so far.
    pub fn sim_connect_attempts(&self) -> u32 {
        self.sim_connect_attempts
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_ssid() {
        assert!(WifiAdapter::new("", "password123").is_err());
    }

    #[test]
    fn connects_on_first_check() {
        let mut w = WifiAdapter::new("HomeNet", "hunter22").unwrap();
        assert!(!w.is_connected());
        w.connect().unwrap();
        assert!(w.is_connected());
        assert_eq!(w.state(), WifiState::Connected);
    }

    #[test]
    fn connect_is_idempotent_when_up() {
        let mut w = WifiAdapter::new("HomeNet", "hunter22").unwrap();
        w.connect().unwrap();
        w.connect().unwrap();
        assert_eq!(w.sim_connect_attempts(), 1);
    }

    #[test]
    fn bounded_attempt_gives_up_when_link_is_down() {
        let mut w = WifiAdapter::new("HomeNet", "hunter22").unwrap();
        w.sim_set_down(true);
        assert_eq!(w.connect(), Err(ConnectivityError::ConnectionFailed));
        assert_eq!(w.state(), WifiState::Failed);
        assert!(!w.is_connected());
    }

    #[test]
    fn recovers_after_link_returns() {
        let mut w = WifiAdapter::new("HomeNet", "hunter22").unwrap();
        w.sim_set_down(true);
        let _ = w.connect();
        w.sim_set_down(false);
        w.connect().unwrap();
        assert!(w.is_connected());
    }
}
