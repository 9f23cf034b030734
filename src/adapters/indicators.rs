//! Indicator LED bank: activity, armed, disarmed.
//!
//! Implements [`IndicatorPort`]. The armed/disarmed pair is only ever
//! driven through [`set_alarm_armed`](IndicatorBank::set_alarm_armed),
//! which writes both outputs from a single boolean — exactly one of the
//! two is lit at all times.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: three push-pull GPIO outputs.
//! On host/test: levels tracked in-memory with read-back accessors.

use crate::app::ports::IndicatorPort;

#[cfg(target_os = "espidf")]
type OutputPin =
    esp_idf_hal::gpio::PinDriver<'static, esp_idf_hal::gpio::AnyIOPin, esp_idf_hal::gpio::Output>;

pub struct IndicatorBank {
    #[cfg(target_os = "espidf")]
    activity: OutputPin,
    #[cfg(target_os = "espidf")]
    armed: OutputPin,
    #[cfg(target_os = "espidf")]
    disarmed: OutputPin,
    levels: Levels,
}

/// Mirror of the three output levels, also the whole state on host.
#[derive(Debug, Clone, Copy, Default)]
struct Levels {
    activity: bool,
    armed: bool,
    disarmed: bool,
}

impl IndicatorBank {
    /// Claim the three LED GPIOs. Boot state: activity off, disarmed lit.
    #[cfg(target_os = "espidf")]
    pub fn new(activity_gpio: i32, armed_gpio: i32, disarmed_gpio: i32) -> anyhow::Result<Self> {
        use esp_idf_hal::gpio::{AnyIOPin, PinDriver};
        // SAFETY: pin numbers come from the pins module; each GPIO is
        // claimed exactly once at startup.
        let activity = PinDriver::output(unsafe { AnyIOPin::new(activity_gpio) })?;
        let armed = PinDriver::output(unsafe { AnyIOPin::new(armed_gpio) })?;
        let disarmed = PinDriver::output(unsafe { AnyIOPin::new(disarmed_gpio) })?;
        let mut bank = Self {
            activity,
            armed,
            disarmed,
            levels: Levels::default(),
        };
        bank.set_activity(false);
        bank.set_alarm_armed(false);
        Ok(bank)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(_activity_gpio: i32, _armed_gpio: i32, _disarmed_gpio: i32) -> anyhow::Result<Self> {
        let mut bank = Self {
            levels: Levels::default(),
        };
        bank.set_activity(false);
        bank.set_alarm_armed(false);
        Ok(bank)
    }

    #[cfg(target_os = "espidf")]
    fn write_outputs(&mut self) {
        // A failed GPIO write leaves the previous level; nothing to recover.
        let _ = self.activity.set_level(self.levels.activity.into());
        let _ = self.armed.set_level(self.levels.armed.into());
        let _ = self.disarmed.set_level(self.levels.disarmed.into());
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_outputs(&mut self) {}

    // ── Read-back (host tests) ────────────────────────────────

    pub fn activity_lit(&self) -> bool {
        self.levels.activity
    }

    pub fn armed_lit(&self) -> bool {
        self.levels.armed
    }

    pub fn disarmed_lit(&self) -> bool {
        self.levels.disarmed
    }
}

impl IndicatorPort for IndicatorBank {
    fn set_activity(&mut self, on: bool) {
        self.levels.activity = on;
        self.write_outputs();
    }

    fn set_alarm_armed(&mut self, armed: bool) {
        self.levels.armed = armed;
        self.levels.disarmed = !armed;
        self.write_outputs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_state_is_disarmed_lit() {
        let bank = IndicatorBank::new(8, 6, 7).unwrap();
        assert!(!bank.activity_lit());
        assert!(!bank.armed_lit());
        assert!(bank.disarmed_lit());
    }

    #[test]
    fn alarm_pair_is_exclusive_both_ways() {
        let mut bank = IndicatorBank::new(8, 6, 7).unwrap();
        bank.set_alarm_armed(true);
        assert!(bank.armed_lit() && !bank.disarmed_lit());
        bank.set_alarm_armed(false);
        assert!(!bank.armed_lit() && bank.disarmed_lit());
    }

    #[test]
    fn activity_tracks_the_level() {
        let mut bank = IndicatorBank::new(8, 6, 7).unwrap();
        bank.set_activity(true);
        assert!(bank.activity_lit());
        bank.set_activity(false);
        assert!(!bank.activity_lit());
    }
}
