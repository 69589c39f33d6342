#[cfg(feature = "std")]
use alloc::string::ToString;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::models::{TimeHm, validate_window};
use crate::DS1307_ADDRESS;

/// Raw-reading thresholds used to classify the soil probe output.
///
/// Readings grow with moisture, so `disconnected_below <= dry_below <=
/// water_above <= adc_max` must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilThresholds {
    /// Readings below this mean the probe is not connected
    pub disconnected_below: u16,
    /// Readings below this mean the soil is dry
    pub dry_below: u16,
    /// Readings above this mean the soil is saturated
    pub water_above: u16,
    /// Largest value the ADC can produce
    pub adc_max: u16,
}

impl Default for SoilThresholds {
    fn default() -> Self {
        Self {
            disconnected_below: 50,
            dry_below: 750,
            water_above: 850,
            adc_max: 1023, // 10-bit ADC
        }
    }
}

impl SoilThresholds {
    pub fn validate(&self) -> Result<(), ModelError> {
        let ordered = self.disconnected_below <= self.dry_below
            && self.dry_below <= self.water_above
            && self.water_above <= self.adc_max;

        if ordered {
            Ok(())
        } else {
            Err(ModelError::InvalidThresholds)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtcConfig {
    /// 7-bit I2C address of the clock
    pub address: u8,
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self {
            address: DS1307_ADDRESS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub irrigation_start: TimeHm,
    pub irrigation_end: TimeHm,
    pub soil: SoilThresholds,
    pub rtc: RtcConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            irrigation_start: TimeHm {
                hours: 6,
                minutes: 0,
            },
            irrigation_end: TimeHm {
                hours: 6,
                minutes: 30,
            },
            soil: SoilThresholds::default(),
            rtc: RtcConfig::default(),
        }
    }
}

impl RtcConfig {
    /// Largest address that fits the 7-bit I2C address space.
    pub const MAX_ADDRESS: u8 = 0x7F;

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.address > Self::MAX_ADDRESS {
            return Err(ModelError::InvalidRtcAddress(self.address));
        }
        Ok(())
    }
}

impl DeviceConfig {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_window(self.irrigation_start, self.irrigation_end)?;
        self.soil.validate()?;
        self.rtc.validate()
    }

    #[cfg(feature = "std")]
    pub fn from_toml_str(content: &str) -> Result<Self, ModelError> {
        let config: DeviceConfig =
            toml::from_str(content).map_err(|e| ModelError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration bundled at `configs/default.toml`.
    #[cfg(feature = "std")]
    pub fn load_default() -> Result<Self, ModelError> {
        Self::from_toml_str(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/default.toml"
        )))
    }
}
