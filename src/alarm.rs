//! Alarm state machine: two states, `Disarmed` and `Armed`.
//!
//! Transitions happen only through the command interpreter. The state
//! drives two mutually exclusive indicator LEDs — armed XOR disarmed,
//! exactly one lit at all times. That invariant lives in the single
//! [`IndicatorPort::set_alarm_armed`](crate::app::ports::IndicatorPort)
//! entry point: the state machine never touches individual LEDs.

use core::fmt;

/// The two-state alarm machine controlling whether motion triggers alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlarmState {
    /// Motion is ignored (beyond the activity LED). Initial state.
    #[default]
    Disarmed,
    /// Motion broadcasts an alert to every recipient.
    Armed,
}

impl AlarmState {
    pub fn arm(&mut self) {
        *self = Self::Armed;
    }

    pub fn disarm(&mut self) {
        *self = Self::Disarmed;
    }

    pub fn is_armed(self) -> bool {
        self == Self::Armed
    }
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disarmed => write!(f, "DISARMED"),
            Self::Armed => write!(f, "ARMED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_disarmed() {
        assert!(!AlarmState::default().is_armed());
    }

    #[test]
    fn arm_then_disarm() {
        let mut s = AlarmState::default();
        s.arm();
        assert!(s.is_armed());
        s.disarm();
        assert!(!s.is_armed());
    }

    #[test]
    fn transitions_are_idempotent() {
        let mut s = AlarmState::default();
        s.arm();
        s.arm();
        assert!(s.is_armed());
        s.disarm();
        s.disarm();
        assert!(!s.is_armed());
    }
}
