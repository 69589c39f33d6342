use embedded_hal::i2c::I2c;
use irrigaino_api::{RtcConfig, TimeData};
use log::{debug, info, warn};

use super::registers::{self, CLOCK_HALT, SECONDS, TIME_REGISTERS};
use super::{Clock, DS1307_ADDRESS};

use crate::error::{Error, Result};

fn bus_error<E: embedded_hal::i2c::Error>(err: E) -> Error {
    Error::I2c(err.kind())
}

/// DS1307 real-time clock on an I2C bus.
pub struct Ds1307<I2C>
where
    I2C: I2c,
{
    i2c: I2C,
    address: u8,
}

impl<I2C> Ds1307<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DS1307_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn from_config(i2c: I2C, config: &RtcConfig) -> Self {
        Self::with_address(i2c, config.address)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn is_running(&mut self) -> Result<bool> {
        Ok(self.read_register(SECONDS)? & CLOCK_HALT == 0)
    }

    /// Clears the clock-halt flag, keeping the current seconds count.
    pub fn start(&mut self) -> Result<()> {
        let seconds = self.read_register(SECONDS)?;
        if seconds & CLOCK_HALT != 0 {
            self.write_register(SECONDS, seconds & !CLOCK_HALT)?;
            info!("RTC oscillator started");
        }
        Ok(())
    }

    /// Sets the clock-halt flag, stopping the oscillator.
    pub fn halt(&mut self) -> Result<()> {
        let seconds = self.read_register(SECONDS)?;
        self.write_register(SECONDS, seconds | CLOCK_HALT)
    }

    fn read_register(&mut self, register: u8) -> Result<u8> {
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buffer)
            .map_err(bus_error)?;
        Ok(buffer[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<()> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(bus_error)
    }

    fn read_time_registers(&mut self) -> Result<[u8; TIME_REGISTERS]> {
        let mut buffer = [0u8; TIME_REGISTERS];
        self.i2c
            .write_read(self.address, &[SECONDS], &mut buffer)
            .map_err(bus_error)?;
        debug!("RTC registers {:02x?}", buffer);
        Ok(buffer)
    }
}

impl<I2C> Clock for Ds1307<I2C>
where
    I2C: I2c,
{
    /// Fails with [`Error::ClockHalted`] while the oscillator is stopped,
    /// since the registers then hold a stale time.
    fn read_time(&mut self) -> Result<TimeData> {
        let buffer = self.read_time_registers()?;
        if buffer[SECONDS as usize] & CLOCK_HALT != 0 {
            warn!("RTC oscillator is halted");
            return Err(Error::ClockHalted);
        }
        registers::decode(buffer)
    }

    /// Writes the whole time block in one transfer, which also starts the
    /// oscillator.
    fn set_time(&mut self, time: &TimeData) -> Result<()> {
        let encoded = registers::encode(time)?;

        let mut frame = [0u8; TIME_REGISTERS + 1];
        frame[0] = SECONDS;
        frame[1..].copy_from_slice(&encoded);

        self.i2c.write(self.address, &frame).map_err(bus_error)?;
        info!("RTC set to {}", time);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use irrigaino_api::ModelError;

    use super::super::mock::MockI2c;
    use super::*;

    fn sample_time() -> TimeData {
        // Thursday 2024-03-14 15:30:05
        TimeData::new(15, 30, 5, 5, 14, 3, 24).unwrap()
    }

    #[test]
    fn test_read_time() {
        let i2c = MockI2c::with_registers(
            DS1307_ADDRESS,
            [0x05, 0x30, 0x15, 0x05, 0x14, 0x03, 0x24],
        );
        let mut rtc = Ds1307::new(i2c);

        assert_eq!(rtc.read_time().unwrap(), sample_time());
    }

    #[test]
    fn test_set_time_writes_registers() {
        let mut rtc = Ds1307::new(MockI2c::new(DS1307_ADDRESS));
        rtc.set_time(&sample_time()).unwrap();

        let i2c = rtc.release();
        assert_eq!(
            &i2c.registers[..TIME_REGISTERS],
            &[0x05, 0x30, 0x15, 0x05, 0x14, 0x03, 0x24]
        );
        assert_eq!(i2c.writes, 1);
    }

    #[test]
    fn test_set_time_rejects_invalid_time_without_writing() {
        let mut rtc = Ds1307::new(MockI2c::new(DS1307_ADDRESS));
        let mut time = sample_time();
        time.month_day = 31;
        time.month = 4;

        assert!(matches!(
            rtc.set_time(&time),
            Err(Error::Model(ModelError::MonthDayOutOfRange { .. }))
        ));
        assert_eq!(rtc.release().writes, 0);
    }

    #[test]
    fn test_halted_clock() {
        let i2c = MockI2c::with_registers(
            DS1307_ADDRESS,
            [CLOCK_HALT | 0x05, 0x30, 0x15, 0x05, 0x14, 0x03, 0x24],
        );
        let mut rtc = Ds1307::new(i2c);

        assert!(!rtc.is_running().unwrap());
        assert_eq!(rtc.read_time(), Err(Error::ClockHalted));

        rtc.start().unwrap();
        assert!(rtc.is_running().unwrap());
        assert_eq!(rtc.read_time().unwrap(), sample_time());

        rtc.halt().unwrap();
        assert!(!rtc.is_running().unwrap());
    }

    #[test]
    fn test_set_time_starts_halted_clock() {
        let mut i2c = MockI2c::new(DS1307_ADDRESS);
        i2c.registers[0] = CLOCK_HALT;
        let mut rtc = Ds1307::new(i2c);

        rtc.set_time(&sample_time()).unwrap();
        assert!(rtc.is_running().unwrap());
    }

    #[test]
    fn test_wrong_address() {
        let mut rtc = Ds1307::from_config(
            MockI2c::new(DS1307_ADDRESS),
            &RtcConfig { address: 0x50 },
        );

        assert_eq!(rtc.address(), 0x50);
        assert_eq!(
            rtc.read_time(),
            Err(Error::I2c(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address
            )))
        );
    }
}
