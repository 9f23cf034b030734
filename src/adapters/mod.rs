//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements       | Connects to                |
//! |--------------|------------------|----------------------------|
//! | `wifi`       | ConnectivityPort | ESP-IDF WiFi STA           |
//! | `indicators` | IndicatorPort    | Activity/armed/disarmed LEDs |
//! | `storage`    | CursorStore      | JSON cursor file (SPIFFS)  |
//! | `time`       | ClockPort        | SNTP (pool.ntp.org)        |

pub mod indicators;
pub mod storage;
pub mod time;
pub mod wifi;
