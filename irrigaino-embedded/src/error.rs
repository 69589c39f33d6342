use embedded_hal::i2c::ErrorKind;
use irrigaino_api::ModelError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("I2C bus error: {0}")]
    I2c(ErrorKind),
    #[error("Device not found")]
    DeviceNotFound,
    #[error("Sensor reading {0} out of valid range")]
    SensorReadingOutOfRange(u16),
    #[error("Register value {0:#04x} is not valid BCD")]
    InvalidBcd(u8),
    #[error("Clock oscillator is halted")]
    ClockHalted,
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = core::result::Result<T, Error>;
