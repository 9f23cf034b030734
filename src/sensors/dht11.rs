//! DHT11 temperature/humidity sensor, single-wire protocol.
//!
//! One blocking read per call, no retries — a transient fault (timeout,
//! checksum) surfaces as a [`SensorError`] and the caller keeps its last
//! good measurement.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the handshake on an open-drain GPIO with
//! microsecond busy-waits, then hands the 5 raw bytes to the pure
//! [`decode_frame`] below.
//! On host/test: reads injected values/faults from statics.
//!
//! Frame layout (40 bits, MSB first): humidity integral, humidity decimal,
//! temperature integral, temperature decimal, checksum (low byte of the
//! sum of the first four).

use crate::error::SensorError;
use crate::sensors::ClimateReading;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

// ───────────────────────────────────────────────────────────────
// Pure frame decode
// ───────────────────────────────────────────────────────────────

/// Validate the checksum and convert the raw frame to a reading.
pub fn decode_frame(frame: [u8; 5]) -> Result<ClimateReading, SensorError> {
    let sum = frame[0]
        .wrapping_add(frame[1])
        .wrapping_add(frame[2])
        .wrapping_add(frame[3]);
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }
    let humidity_pct = f32::from(frame[0]) + f32::from(frame[1]) / 10.0;
    // Bit 7 of the temperature decimal byte is the sign flag.
    let temp = f32::from(frame[2]) + f32::from(frame[3] & 0x7F) / 10.0;
    let temperature_c = if frame[3] & 0x80 != 0 { -temp } else { temp };
    Ok(ClimateReading {
        temperature_c,
        humidity_pct,
    })
}

// ───────────────────────────────────────────────────────────────
// Host simulation hooks
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_BITS: AtomicU32 = AtomicU32::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_HUM_BITS: AtomicU32 = AtomicU32::new(0);
/// 0 = ok, 1 = timeout, 2 = checksum, 3 = gpio.
#[cfg(not(target_os = "espidf"))]
static SIM_FAULT: AtomicU8 = AtomicU8::new(0);

/// Inject the simulated climate values (host/test only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_BITS.store(temperature_c.to_bits(), Ordering::Relaxed);
    SIM_HUM_BITS.store(humidity_pct.to_bits(), Ordering::Relaxed);
}

/// Inject a read fault; `None` clears it (host/test only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_fault(fault: Option<SensorError>) {
    let code = match fault {
        None => 0,
        Some(SensorError::Timeout) => 1,
        Some(SensorError::ChecksumMismatch) => 2,
        Some(SensorError::GpioFailed) => 3,
    };
    SIM_FAULT.store(code, Ordering::Relaxed);
}

// ───────────────────────────────────────────────────────────────
// Driver
// ───────────────────────────────────────────────────────────────

/// Start signal hold time (sensor datasheet: at least 18 ms low).
#[cfg(target_os = "espidf")]
const START_LOW_US: u32 = 18_000;
/// Longest level we wait for before declaring a timeout.
#[cfg(target_os = "espidf")]
const LEVEL_TIMEOUT_US: u32 = 100;
/// High phase longer than this is a 1 bit (0 bit highs are ~26 us).
#[cfg(target_os = "espidf")]
const ONE_BIT_THRESHOLD_US: u32 = 50;

pub struct Dht11 {
    #[cfg(target_os = "espidf")]
    pin: esp_idf_hal::gpio::PinDriver<
        'static,
        esp_idf_hal::gpio::AnyIOPin,
        esp_idf_hal::gpio::InputOutput,
    >,
    #[cfg(not(target_os = "espidf"))]
    _gpio: i32,
}

impl Dht11 {
    #[cfg(target_os = "espidf")]
    pub fn new(gpio: i32) -> anyhow::Result<Self> {
        use esp_idf_hal::gpio::{AnyIOPin, PinDriver};
        // SAFETY: pin numbers come from the pins module; each GPIO is
        // claimed exactly once at startup.
        let any = unsafe { AnyIOPin::new(gpio) };
        let mut pin = PinDriver::input_output_od(any)?;
        pin.set_high()?;
        Ok(Self { pin })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(gpio: i32) -> anyhow::Result<Self> {
        Ok(Self { _gpio: gpio })
    }

    /// One blocking measure cycle.
    #[cfg(target_os = "espidf")]
    pub fn read(&mut self) -> Result<ClimateReading, SensorError> {
        let frame = self.read_frame()?;
        decode_frame(frame)
    }

    /// One simulated measure cycle (host/test).
    #[cfg(not(target_os = "espidf"))]
    pub fn read(&mut self) -> Result<ClimateReading, SensorError> {
        match SIM_FAULT.load(Ordering::Relaxed) {
            1 => return Err(SensorError::Timeout),
            2 => return Err(SensorError::ChecksumMismatch),
            3 => return Err(SensorError::GpioFailed),
            _ => {}
        }
        Ok(ClimateReading {
            temperature_c: f32::from_bits(SIM_TEMP_BITS.load(Ordering::Relaxed)),
            humidity_pct: f32::from_bits(SIM_HUM_BITS.load(Ordering::Relaxed)),
        })
    }

    // ── ESP-IDF bit-bang transport ────────────────────────────

    #[cfg(target_os = "espidf")]
    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        use embedded_hal::delay::DelayNs;
        use esp_idf_hal::delay::Ets;

        let mut delay = Ets;

        // Host start signal: pull low >= 18 ms, then release and let the
        // pull-up raise the line.
        self.pin.set_low().map_err(|_| SensorError::GpioFailed)?;
        delay.delay_us(START_LOW_US);
        self.pin.set_high().map_err(|_| SensorError::GpioFailed)?;
        delay.delay_us(40);

        // Sensor response: ~80 us low, ~80 us high.
        self.wait_for_level(false, LEVEL_TIMEOUT_US)?;
        self.wait_for_level(true, LEVEL_TIMEOUT_US)?;
        self.wait_for_level(false, LEVEL_TIMEOUT_US)?;

        // 40 data bits: 50 us low preamble, then a high whose duration
        // encodes the bit.
        let mut frame = [0u8; 5];
        for bit in 0..40 {
            self.wait_for_level(true, LEVEL_TIMEOUT_US)?;
            let high_us = self.measure_level(true, LEVEL_TIMEOUT_US)?;
            if high_us > ONE_BIT_THRESHOLD_US {
                frame[bit / 8] |= 1 << (7 - (bit % 8));
            }
        }
        Ok(frame)
    }

    /// Busy-wait until the line reaches `level`.
    #[cfg(target_os = "espidf")]
    fn wait_for_level(&mut self, level: bool, timeout_us: u32) -> Result<(), SensorError> {
        use embedded_hal::delay::DelayNs;
        use esp_idf_hal::delay::Ets;

        let mut delay = Ets;
        for _ in 0..timeout_us {
            if self.pin.is_high() == level {
                return Ok(());
            }
            delay.delay_us(1);
        }
        Err(SensorError::Timeout)
    }

    /// Busy-wait while the line stays at `level`, returning the duration.
    #[cfg(target_os = "espidf")]
    fn measure_level(&mut self, level: bool, timeout_us: u32) -> Result<u32, SensorError> {
        use embedded_hal::delay::DelayNs;
        use esp_idf_hal::delay::Ets;

        let mut delay = Ets;
        for elapsed in 0..timeout_us {
            if self.pin.is_high() != level {
                return Ok(elapsed);
            }
            delay.delay_us(1);
        }
        Err(SensorError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_valid_frame() {
        // 48.0 %RH, 21.0 C
        let r = decode_frame([48, 0, 21, 0, 69]).unwrap();
        assert!((r.humidity_pct - 48.0).abs() < f32::EPSILON);
        assert!((r.temperature_c - 21.0).abs() < f32::EPSILON);
    }

    #[test]
    fn decodes_decimal_and_negative_temperature() {
        // -3.5 C: decimal byte carries the sign flag.
        let frame = [60, 2, 3, 0x80 | 5, 60u8.wrapping_add(2).wrapping_add(3).wrapping_add(0x85)];
        let r = decode_frame(frame).unwrap();
        assert!((r.temperature_c + 3.5).abs() < 0.001);
        assert!((r.humidity_pct - 60.2).abs() < 0.001);
    }

    #[test]
    fn rejects_bad_checksum() {
        assert_eq!(
            decode_frame([48, 0, 21, 0, 70]),
            Err(SensorError::ChecksumMismatch)
        );
    }

    #[test]
    fn checksum_wraps_at_byte_width() {
        let frame = [200, 200, 200, 200, 200u8.wrapping_mul(4)];
        assert!(decode_frame(frame).is_ok());
    }
}
