//! GPIO assignment map for the ESP32-C3 carrier board.
//!
//! Single source of truth — every driver takes its pin number from here so
//! a board respin only touches this file.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT11 single-wire data line (external 10 kOhm pull-up).
pub const DHT11_GPIO: i32 = 4;

/// PIR motion sensor output (active high, level output).
pub const PIR_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Indicator LEDs (active high)
// ---------------------------------------------------------------------------

/// Activity LED — lit while motion is asserted.
pub const ACTIVITY_LED_GPIO: i32 = 8;

/// Armed LED — lit while the alarm is armed.
pub const ARMED_LED_GPIO: i32 = 6;

/// Disarmed LED — lit while the alarm is disarmed.
pub const DISARMED_LED_GPIO: i32 = 7;
