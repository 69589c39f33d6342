use serde::{Deserialize, Serialize};

use super::{TimeData, TimeHm};

use crate::config::DeviceConfig;
use crate::error::ModelError;

/// Soil moisture classification reported by the probe.
///
/// Serialized as its numeric code, like the other status enumerations.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum SoilMoisture {
    /// Probe not wired or not answering
    #[default]
    Disconnected = 0,
    /// Soil needs watering
    Dry = 1,
    /// Soil moisture within target
    Ok = 2,
    /// Soil saturated
    Water = 3,
}

impl SoilMoisture {
    pub fn from_u8(value: u8) -> Result<Self, ModelError> {
        match value {
            0 => Ok(Self::Disconnected),
            1 => Ok(Self::Dry),
            2 => Ok(Self::Ok),
            3 => Ok(Self::Water),
            other => Err(ModelError::UnknownSoilMoisture(other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Dry => "dry",
            Self::Ok => "ok",
            Self::Water => "water",
        }
    }

    pub fn is_connected(&self) -> bool {
        !matches!(self, Self::Disconnected)
    }
}

impl TryFrom<u8> for SoilMoisture {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value)
    }
}

impl From<SoilMoisture> for u8 {
    fn from(value: SoilMoisture) -> Self {
        value as u8
    }
}

/// Page currently shown on the LCD.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum ActiveScreen {
    #[default]
    Screen1 = 0,
    Screen2 = 1,
}

impl ActiveScreen {
    pub fn from_u8(value: u8) -> Result<Self, ModelError> {
        match value {
            0 => Ok(Self::Screen1),
            1 => Ok(Self::Screen2),
            other => Err(ModelError::UnknownActiveScreen(other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Screen1 => "screen_1",
            Self::Screen2 => "screen_2",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Screen1 => Self::Screen2,
            Self::Screen2 => Self::Screen1,
        }
    }
}

impl TryFrom<u8> for ActiveScreen {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value)
    }
}

impl From<ActiveScreen> for u8 {
    fn from(value: ActiveScreen) -> Self {
        value as u8
    }
}

/// Whether watering is running.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Irrigation {
    #[default]
    Standby = 0,
    Underway = 1,
}

impl Irrigation {
    pub fn from_u8(value: u8) -> Result<Self, ModelError> {
        match value {
            0 => Ok(Self::Standby),
            1 => Ok(Self::Underway),
            other => Err(ModelError::UnknownIrrigation(other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Standby => "standby",
            Self::Underway => "underway",
        }
    }

    pub fn is_underway(&self) -> bool {
        matches!(self, Self::Underway)
    }
}

impl TryFrom<u8> for Irrigation {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value)
    }
}

impl From<Irrigation> for u8 {
    fn from(value: Irrigation) -> Self {
        value as u8
    }
}

/// Live state of the whole device.
///
/// Owned by whoever drives the device and handed out by reference; there is
/// no global instance.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Status {
    /// Current time read from the RTC
    pub timedata: TimeData,
    /// Start of the daily irrigation window
    pub irrigation_start: TimeHm,
    /// End of the daily irrigation window
    pub irrigation_end: TimeHm,
    /// Latest soil moisture classification
    pub soil_moisture: SoilMoisture,
    /// Page shown on the LCD
    pub active_screen: ActiveScreen,
    /// Irrigation state
    pub irrigation: Irrigation,
}

/// Starts at the default clock time with the default irrigation window.
impl Default for Status {
    fn default() -> Self {
        let config = DeviceConfig::default();
        Self::new(
            TimeData::default(),
            config.irrigation_start,
            config.irrigation_end,
        )
    }
}

impl Status {
    pub fn new(timedata: TimeData, irrigation_start: TimeHm, irrigation_end: TimeHm) -> Self {
        Self {
            timedata,
            irrigation_start,
            irrigation_end,
            soil_moisture: SoilMoisture::default(),
            active_screen: ActiveScreen::default(),
            irrigation: Irrigation::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.timedata.validate()?;
        validate_window(self.irrigation_start, self.irrigation_end)
    }

    pub fn now(&self) -> TimeHm {
        self.timedata.time_hm()
    }

    /// Whether the current time falls in `[irrigation_start, irrigation_end)`.
    pub fn in_irrigation_window(&self) -> bool {
        if validate_window(self.irrigation_start, self.irrigation_end).is_err() {
            return false;
        }

        let now = self.now();
        self.irrigation_start <= now && now < self.irrigation_end
    }
}

pub(crate) fn validate_window(start: TimeHm, end: TimeHm) -> Result<(), ModelError> {
    start.validate()?;
    end.validate()?;
    if start >= end {
        return Err(ModelError::InvalidIrrigationWindow { start, end });
    }
    Ok(())
}
