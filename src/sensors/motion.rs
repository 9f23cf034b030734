//! PIR motion sensor — plain digital level read.
//!
//! Polling only: no interrupt capture, no debouncing, no edge detection.
//! A pulse shorter than the loop period is missed, which is acceptable for
//! this sensor's multi-second output hold time.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the PIR GPIO (pull-down, active high).
//! On host/test: reads a static `AtomicBool` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_MOTION: AtomicBool = AtomicBool::new(false);

/// Inject the simulated motion level (host/test only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_motion(asserted: bool) {
    SIM_MOTION.store(asserted, Ordering::Relaxed);
}

pub struct PirSensor {
    #[cfg(target_os = "espidf")]
    pin: esp_idf_hal::gpio::PinDriver<'static, esp_idf_hal::gpio::AnyIOPin, esp_idf_hal::gpio::Input>,
    #[cfg(not(target_os = "espidf"))]
    _gpio: i32,
}

impl PirSensor {
    #[cfg(target_os = "espidf")]
    pub fn new(gpio: i32) -> anyhow::Result<Self> {
        use esp_idf_hal::gpio::{AnyIOPin, PinDriver, Pull};
        // SAFETY: pin numbers come from the pins module; each GPIO is
        // claimed exactly once at startup.
        let any = unsafe { AnyIOPin::new(gpio) };
        let mut pin = PinDriver::input(any)?;
        pin.set_pull(Pull::Down)?;
        Ok(Self { pin })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(gpio: i32) -> anyhow::Result<Self> {
        Ok(Self { _gpio: gpio })
    }

    /// Whether motion is currently asserted.
    #[cfg(target_os = "espidf")]
    pub fn level(&mut self) -> bool {
        self.pin.is_high()
    }

    /// Whether motion is currently asserted (simulated level).
    #[cfg(not(target_os = "espidf"))]
    pub fn level(&mut self) -> bool {
        SIM_MOTION.load(Ordering::Relaxed)
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn level_follows_injected_value() {
        let mut pir = PirSensor::new(5).unwrap();
        sim_set_motion(false);
        assert!(!pir.level());
        sim_set_motion(true);
        assert!(pir.level());
        sim_set_motion(false);
    }
}
