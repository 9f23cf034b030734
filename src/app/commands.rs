//! Inbound bot commands.
//!
//! Recognition is exact-match on the full message text. Anything else is
//! not a command: no state change, no reply — but the message still
//! advances the processing cursor so garbage is never reprocessed.

/// Commands remote users can send to the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// Arm the alarm; broadcast confirmation to every recipient.
    AlarmOn,
    /// Disarm the alarm; broadcast confirmation to every recipient.
    AlarmOff,
    /// Reply to the sender with the current temperature.
    Temp,
    /// Reply to the sender with the current humidity.
    Humidity,
}

impl BotCommand {
    /// Exact-match parse. Trailing whitespace, arguments, or case
    /// differences make a message unrecognized.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/alarmon" => Some(Self::AlarmOn),
            "/alarmoff" => Some(Self::AlarmOff),
            "/temp" => Some(Self::Temp),
            "/humidity" => Some(Self::Humidity),
            _ => None,
        }
    }
}
