use embedded_io::Read;
use irrigaino_api::{SoilMoisture, SoilThresholds};
use log::debug;

use crate::error::{Error, Result};

/// Soil moisture probe sampled through a byte stream.
///
/// Each sample is a big-endian `u16` from the probe's ADC; higher readings
/// mean wetter soil.
pub struct SoilSensor<IO>
where
    IO: Read,
{
    io_device: IO,
    thresholds: SoilThresholds,
}

impl<IO> SoilSensor<IO>
where
    IO: Read,
{
    pub fn new(io_device: IO) -> Self {
        Self {
            io_device,
            thresholds: SoilThresholds::default(),
        }
    }

    pub fn with_thresholds(io_device: IO, thresholds: SoilThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self {
            io_device,
            thresholds,
        })
    }

    /// A probe that errors or closes the stream before a full sample is
    /// reported as [`Error::DeviceNotFound`].
    pub fn read_raw(&mut self) -> Result<u16> {
        let mut buffer = [0u8; 2];

        self.io_device
            .read_exact(&mut buffer)
            .map_err(|_| Error::DeviceNotFound)?;

        let raw_value = u16::from_be_bytes(buffer);
        debug!("Soil probe raw value {}", raw_value);

        if raw_value > self.thresholds.adc_max {
            return Err(Error::SensorReadingOutOfRange(raw_value));
        }

        Ok(raw_value)
    }

    pub fn classify(&self, raw_value: u16) -> SoilMoisture {
        let thresholds = &self.thresholds;
        if raw_value < thresholds.disconnected_below {
            SoilMoisture::Disconnected
        } else if raw_value < thresholds.dry_below {
            SoilMoisture::Dry
        } else if raw_value > thresholds.water_above {
            SoilMoisture::Water
        } else {
            SoilMoisture::Ok
        }
    }

    pub fn read_moisture(&mut self) -> Result<SoilMoisture> {
        let raw_value = self.read_raw()?;
        Ok(self.classify(raw_value))
    }

    pub fn thresholds(&self) -> SoilThresholds {
        self.thresholds
    }
}
