//! Sensor subsystem — the DHT11 climate sensor, the PIR motion sensor,
//! and the aggregating [`SensorRig`] that the control loop polls through
//! [`SensorPort`](crate::app::ports::SensorPort).

pub mod dht11;
pub mod motion;

use crate::app::ports::SensorPort;
use crate::error::SensorError;
use dht11::Dht11;
use motion::PirSensor;

/// One successful climate read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Owns both sensor drivers. Built in `main` where peripheral ownership
/// is established, then handed to the service behind the port trait.
pub struct SensorRig {
    dht: Dht11,
    pir: PirSensor,
}

impl SensorRig {
    pub fn new(dht: Dht11, pir: PirSensor) -> Self {
        Self { dht, pir }
    }
}

impl SensorPort for SensorRig {
    fn read_motion(&mut self) -> bool {
        self.pir.level()
    }

    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.dht.read()
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;
    use crate::app::ports::SensorPort;
    use crate::pins;

    // Single test so the climate sim statics have one owner; the motion
    // statics are covered in the motion module.
    #[test]
    fn rig_reads_climate_and_surfaces_faults() {
        let dht = Dht11::new(pins::DHT11_GPIO).unwrap();
        let pir = PirSensor::new(pins::PIR_GPIO).unwrap();
        let mut rig = SensorRig::new(dht, pir);

        dht11::sim_set_fault(None);
        dht11::sim_set_climate(21.0, 48.0);
        let r = rig.read_climate().unwrap();
        assert!((r.temperature_c - 21.0).abs() < f32::EPSILON);
        assert!((r.humidity_pct - 48.0).abs() < f32::EPSILON);

        dht11::sim_set_fault(Some(SensorError::Timeout));
        assert_eq!(rig.read_climate(), Err(SensorError::Timeout));
        dht11::sim_set_fault(None);
    }
}
