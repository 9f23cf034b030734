//! HomeSentry Firmware — Main Entry Point
//!
//! Startup order (any fault here is fatal — there is deliberately no catch
//! at this layer): logger → credentials → cursor → peripherals → WiFi
//! association → activation broadcast. After that the process runs the
//! sequential polling loop forever; every per-phase fault inside the loop
//! is caught at this boundary, logged, and the loop continues.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                Adapters (outer ring)                 │
//! │                                                      │
//! │  WifiAdapter   TelegramClient   FileCursorStore      │
//! │  SensorRig     IndicatorBank    SntpClock            │
//! │                                                      │
//! │  ───────────── Port Trait Boundary ────────────      │
//! │                                                      │
//! │  ┌────────────────────────────────────────────┐      │
//! │  │        MonitorService (pure logic)         │      │
//! │  │  alarm · measurement · cursor · commands   │      │
//! │  └────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{info, warn};

use homesentry::adapters::indicators::IndicatorBank;
use homesentry::adapters::storage::FileCursorStore;
use homesentry::adapters::time::SntpClock;
use homesentry::adapters::wifi::{ConnectivityPort, WifiAdapter};
use homesentry::app::ports::{ClockPort, CursorStore, MessagingPort};
use homesentry::app::service::{ACTIVATION_TEXT, MonitorService};
use homesentry::config::{self, Credentials};
use homesentry::pins;
use homesentry::sensors::{SensorRig, dht11::Dht11, motion::PirSensor};
use homesentry::telegram::TelegramClient;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("HomeSentry v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration (fatal on any fault) ─────────────────
    let creds = Credentials::load(config::CREDENTIALS_PATH)
        .context("loading credentials")?;

    // ── 3. Processing cursor (lenient: absent/corrupt ⇒ 0) ────
    let mut cursor_store = FileCursorStore::new(config::CURSOR_PATH);
    let cursor = cursor_store.load();
    info!("resuming after message id {}", cursor.last_message_processed);

    // ── 4. Peripherals and adapters ───────────────────────────
    let peripherals = esp_idf_hal::peripherals::Peripherals::take()?;
    let sysloop = esp_idf_svc::eventloop::EspSystemEventLoop::take()?;
    let nvs = esp_idf_svc::nvs::EspDefaultNvsPartition::take()?;

    let dht = Dht11::new(pins::DHT11_GPIO)?;
    let pir = PirSensor::new(pins::PIR_GPIO)?;
    let mut sensors = SensorRig::new(dht, pir);
    let mut indicators = IndicatorBank::new(
        pins::ACTIVITY_LED_GPIO,
        pins::ARMED_LED_GPIO,
        pins::DISARMED_LED_GPIO,
    )?;

    let mut wifi = WifiAdapter::new(
        peripherals.modem,
        sysloop,
        nvs,
        &creds.wifi.ssid,
        &creds.wifi.password,
    )?;
    let mut telegram = TelegramClient::new(creds.telegram_bot.api_key.clone());
    let mut clock = SntpClock::new();

    let mut service = MonitorService::new(creds.telegram_bot.chat_id.clone(), cursor);
    service.start(&mut indicators);

    // ── 5. Network bring-up + activation broadcast ────────────
    // Still the fatal zone: a failure here halts the process.
    wifi.connect()
        .map_err(|e| anyhow::anyhow!("startup WiFi association failed: {e}"))?;
    pause_ms(config::STARTUP_SETTLE_MS);
    for &chat in service.recipients() {
        telegram
            .try_send(chat, ACTIVATION_TEXT)
            .map_err(|e| anyhow::anyhow!("activation message to {chat} failed: {e}"))?;
    }

    info!("system ready, entering control loop");

    // ── 6. Control loop ───────────────────────────────────────
    // One sequential thread, fixed pauses, no termination condition.
    loop {
        // Connectivity: bounded reconnect, degraded mode on failure.
        if !wifi.is_connected() {
            if let Err(e) = wifi.connect() {
                warn!("reconnect failed ({e}), running degraded this cycle");
            }
        }

        service.poll_motion(&mut sensors, &mut indicators, &mut telegram);
        pause_ms(config::MOTION_SETTLE_MS);

        service.poll_climate(&mut sensors);
        pause_ms(config::CLIMATE_SETTLE_MS);

        if let Err(e) = service.process_inbound(&mut telegram, &mut indicators, &mut cursor_store)
        {
            warn!("command phase failed ({e}), continuing");
        }

        if let Err(e) = clock.resync() {
            warn!("clock resync failed ({e}), keeping previous time");
        }

        pause_ms(config::CYCLE_TAIL_MS);
    }
}

fn pause_ms(ms: u64) {
    esp_idf_hal::delay::FreeRtos::delay_ms(ms as u32);
}
