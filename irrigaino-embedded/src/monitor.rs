use embedded_io::Read;
use irrigaino_api::{SoilMoisture, Status};
use log::{info, warn};

use crate::error::{Error, Result};
use crate::rtc::Clock;
use crate::sensor::SoilSensor;

/// Feeds clock and soil readings into a caller-owned [`Status`].
///
/// Only `timedata` and `soil_moisture` are written; the irrigation window,
/// screen selection and irrigation state belong to whoever owns the status.
pub struct StatusMonitor<C, IO>
where
    C: Clock,
    IO: Read,
{
    clock: C,
    soil_sensor: SoilSensor<IO>,
}

impl<C, IO> StatusMonitor<C, IO>
where
    C: Clock,
    IO: Read,
{
    pub fn new(clock: C, soil_sensor: SoilSensor<IO>) -> Self {
        Self { clock, soil_sensor }
    }

    pub fn clock(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn release(self) -> (C, SoilSensor<IO>) {
        (self.clock, self.soil_sensor)
    }

    /// Reads both inputs and updates `status` only if both succeed.
    ///
    /// A probe that does not answer is reported as
    /// [`SoilMoisture::Disconnected`] rather than as an error.
    pub fn refresh(&mut self, status: &mut Status) -> Result<()> {
        let timedata = self.clock.read_time()?;

        let soil_moisture = match self.soil_sensor.read_moisture() {
            Ok(soil_moisture) => soil_moisture,
            Err(Error::DeviceNotFound) => SoilMoisture::Disconnected,
            Err(err) => return Err(err),
        };

        if status.soil_moisture != soil_moisture {
            if soil_moisture.is_connected() {
                info!(
                    "Soil moisture changed: {} -> {}",
                    status.soil_moisture.name(),
                    soil_moisture.name()
                );
            } else {
                warn!("Soil probe disconnected at {}", timedata);
            }
        }

        status.timedata = timedata;
        status.soil_moisture = soil_moisture;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use irrigaino_api::{ActiveScreen, Irrigation, TimeData, TimeHm};

    use super::*;
    use crate::rtc::mock::MockI2c;
    use crate::rtc::registers::CLOCK_HALT;
    use crate::rtc::{DS1307_ADDRESS, Ds1307};
    use crate::sensor::mock::MockIO;

    const REGISTERS: [u8; 7] = [0x10, 0x05, 0x06, 0x02, 0x03, 0x06, 0x24];

    fn monitor(registers: [u8; 7], io: MockIO) -> StatusMonitor<Ds1307<MockI2c>, MockIO> {
        let rtc = Ds1307::new(MockI2c::with_registers(DS1307_ADDRESS, registers));
        StatusMonitor::new(rtc, SoilSensor::new(io))
    }

    fn owned_status() -> Status {
        let mut status = Status::new(
            TimeData::default(),
            TimeHm::new(6, 0).unwrap(),
            TimeHm::new(6, 30).unwrap(),
        );
        status.active_screen = ActiveScreen::Screen2;
        status.irrigation = Irrigation::Underway;
        status
    }

    #[test]
    fn test_refresh_updates_time_and_moisture() {
        let mut monitor = monitor(REGISTERS, MockIO::new(600));
        let mut status = owned_status();

        monitor.refresh(&mut status).unwrap();

        // Monday 2024-06-03 06:05:10
        assert_eq!(
            status.timedata,
            TimeData::new(6, 5, 10, 2, 3, 6, 24).unwrap()
        );
        assert_eq!(status.soil_moisture, SoilMoisture::Dry);
        assert!(status.in_irrigation_window());
    }

    #[test]
    fn test_refresh_leaves_owner_fields_alone() {
        let mut monitor = monitor(REGISTERS, MockIO::new(800));
        let mut status = owned_status();

        monitor.refresh(&mut status).unwrap();

        assert_eq!(status.irrigation_start, TimeHm::new(6, 0).unwrap());
        assert_eq!(status.irrigation_end, TimeHm::new(6, 30).unwrap());
        assert_eq!(status.active_screen, ActiveScreen::Screen2);
        assert_eq!(status.irrigation, Irrigation::Underway);
        assert_eq!(status.soil_moisture, SoilMoisture::Ok);
    }

    #[test]
    fn test_unreachable_probe_reports_disconnected() {
        let mut io = MockIO::new(800);
        io.connected = false;
        let mut monitor = monitor(REGISTERS, io);
        let mut status = owned_status();
        status.soil_moisture = SoilMoisture::Ok;

        monitor.refresh(&mut status).unwrap();

        assert_eq!(status.soil_moisture, SoilMoisture::Disconnected);
    }

    #[test]
    fn test_out_of_range_reading_keeps_status() {
        let mut monitor = monitor(REGISTERS, MockIO::new(2000));
        let mut status = owned_status();
        let before = status;

        assert_eq!(
            monitor.refresh(&mut status),
            Err(Error::SensorReadingOutOfRange(2000))
        );
        assert_eq!(status, before);
    }

    #[test]
    fn test_halted_clock_keeps_status() {
        let mut registers = REGISTERS;
        registers[0] |= CLOCK_HALT;
        let mut monitor = monitor(registers, MockIO::new(800));
        let mut status = owned_status();
        let before = status;

        assert_eq!(monitor.refresh(&mut status), Err(Error::ClockHalted));
        assert_eq!(status, before);

        monitor.clock().start().unwrap();
        monitor.refresh(&mut status).unwrap();
        assert_eq!(status.timedata.seconds, 10);
    }
}
